pub mod config;
pub mod format;
pub mod github;
pub mod hash;
pub mod language;
pub mod poll;
pub mod pool;
pub mod prompt;
pub mod settings;
pub mod site;
pub mod storage;
pub mod types;
pub mod upload;
