extern crate chrono;
extern crate clap;
extern crate judgehub;
extern crate pretty_env_logger;
extern crate termcolor;
extern crate tokio;

use clap::{crate_description, crate_name, Arg, Command};
use judgehub::{
    format::Formatter,
    github::GitHub,
    settings::{self, Settings},
    storage::Cache,
    upload::Uploader,
};
use std::{fs::File, io::Write, path::PathBuf, sync::Arc};
use termcolor::{Color, ColorChoice, StandardStream};

#[macro_use]
mod color;
mod command {
    pub mod baekjoon;
    pub mod programmers;
    pub mod swea;
    pub mod sync;
}
mod read;
mod write;

pub struct Context {
    pub settings: Settings,
    pub uploader: Uploader<GitHub>,
    pub cache_path: PathBuf,
}

fn load_context(stdout: &mut StandardStream, settings: &str, cache: &str) -> Option<Context> {
    let settings = match File::open(settings).map(settings::from_reader) {
        Ok(Ok(s)) => s,
        Ok(Err(e)) => {
            write_error!(stdout, "Error", "Failed to parse settings {}: {}", settings, e);
            return None;
        }
        Err(e) => {
            write_error!(stdout, "Error", "Failed to open settings {}: {}", settings, e);
            return None;
        }
    };
    if settings.token.is_empty() {
        write_warn!(
            stdout,
            "Warning",
            "No GitHub token, set `token` or {}",
            settings::TOKEN_ENV
        );
    }
    let cache_path = PathBuf::from(cache);
    let cache = match Cache::open(&cache_path) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            write_error!(stdout, "Error", "Failed to open cache {}: {}", cache_path.display(), e);
            return None;
        }
    };
    let remote = match GitHub::with_base(settings.token.clone(), settings.api_base.clone()) {
        Ok(r) => r,
        Err(e) => {
            write_error!(stdout, "Error", "Failed to create GitHub client: {}", e);
            return None;
        }
    };
    let formatter = match Formatter::new(settings.format_config()) {
        Ok(f) => f,
        Err(e) => {
            write_error!(stdout, "Error", "Failed to load templates: {}", e);
            return None;
        }
    };
    let uploader = Uploader::new(remote, cache, formatter, settings.coordinates());
    Some(Context {
        settings,
        uploader,
        cache_path,
    })
}

fn persist_cache(stdout: &mut StandardStream, ctx: &Context) {
    if let Err(e) = ctx.uploader.cache().persist(&ctx.cache_path) {
        write_error!(stdout, "Error", "Failed to save cache: {}", e);
    }
}

#[tokio::main]
async fn main() {
    pretty_env_logger::init_timed();
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .version(get_version!("version"))
        .long_version(get_version!("long_version"))
        .arg(
            Arg::new("settings")
                .help("Settings file")
                .takes_value(true)
                .default_value("judgehub.yaml"),
        )
        .arg(
            Arg::new("cache")
                .help("Cache file")
                .long("cache")
                .short('c')
                .takes_value(true)
                .default_value("judgehub-cache.yaml"),
        )
        .get_matches();

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    let ctx = match load_context(
        &mut stdout,
        matches.value_of("settings").unwrap_or("judgehub.yaml"),
        matches.value_of("cache").unwrap_or("judgehub-cache.yaml"),
    ) {
        Some(c) => c,
        None => return,
    };
    if !ctx.settings.enabled {
        write_warn!(&mut stdout, "Warning", "Uploading is disabled in settings");
    }
    loop {
        let line = match read::try_read_line(&mut stdout, b"judgehub> ") {
            Some(l) => l,
            None => break,
        };
        let cmd = line.trim();
        let uploads = matches!(cmd, "boj" | "boj-all" | "pro" | "swea" | "swea-watch");
        if uploads && !ctx.settings.enabled {
            write_error!(&mut stdout, "Error", "Uploading is disabled in settings");
            continue;
        }
        match cmd {
            "boj" => command::baekjoon::upload_one(&mut stdout, &ctx).await,
            "boj-all" => command::baekjoon::upload_all(&mut stdout, &ctx).await,
            "pro" => command::programmers::upload(&mut stdout, &ctx).await,
            "swea-watch" => command::swea::watch(&mut stdout, &ctx).await,
            "swea" => command::swea::upload(&mut stdout, &ctx).await,
            "sync" => command::sync::sync(&mut stdout, &ctx).await,
            "help" => write_info!(
                &mut stdout,
                "Help",
                "boj, boj-all, pro, swea-watch, swea, sync, exit"
            ),
            "exit" => break,
            "" => continue,
            _ => {
                write_error!(&mut stdout, "Error", "Unknown command {}", cmd);
                continue;
            }
        }
        persist_cache(&mut stdout, &ctx);
    }
    persist_cache(&mut stdout, &ctx);
}
