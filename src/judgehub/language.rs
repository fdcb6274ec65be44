//! Judge language labels, their file extensions and repository folders.

use std::collections::HashSet;

pub struct Language {
    pub label: &'static str,
    pub extension: &'static str,
    pub folder: &'static str,
}

macro_rules! languages {
    ($(($label:expr, $ext:expr, $folder:expr)),* $(,)?) => {
        &[$(Language { label: $label, extension: $ext, folder: $folder }),*]
    };
}

pub const LANGUAGES: &[Language] = languages![
    ("C", "c", "C"),
    ("C99", "c", "C"),
    ("C11", "c", "C"),
    ("C90", "c", "C"),
    ("C2x", "c", "C"),
    ("C (Clang)", "c", "C"),
    ("C99 (Clang)", "c", "C"),
    ("C11 (Clang)", "c", "C"),
    ("C++", "cpp", "Cpp"),
    ("C++98", "cpp", "Cpp"),
    ("C++11", "cpp", "Cpp"),
    ("C++14", "cpp", "Cpp"),
    ("C++17", "cpp", "Cpp"),
    ("C++20", "cpp", "Cpp"),
    ("C++23", "cpp", "Cpp"),
    ("C++26", "cpp", "Cpp"),
    ("C++ (Clang)", "cpp", "Cpp"),
    ("C++17 (Clang)", "cpp", "Cpp"),
    ("C++20 (Clang)", "cpp", "Cpp"),
    ("C#", "cs", "CSharp"),
    ("Java", "java", "Java"),
    ("Java 8", "java", "Java"),
    ("Java 11", "java", "Java"),
    ("Java 15", "java", "Java"),
    ("Java 8 (OpenJDK)", "java", "Java"),
    ("Kotlin", "kt", "Kotlin"),
    ("Kotlin (JVM)", "kt", "Kotlin"),
    ("Python", "py", "Python"),
    ("Python 2", "py", "Python"),
    ("Python 3", "py", "Python"),
    ("Python3", "py", "Python"),
    ("PyPy2", "py", "Python"),
    ("PyPy3", "py", "Python"),
    ("JavaScript", "js", "JavaScript"),
    ("node.js", "js", "JavaScript"),
    ("TypeScript", "ts", "TypeScript"),
    ("Go", "go", "Go"),
    ("Rust", "rs", "Rust"),
    ("Rust 2015", "rs", "Rust"),
    ("Rust 2018", "rs", "Rust"),
    ("Rust 2021", "rs", "Rust"),
    ("Ruby", "rb", "Ruby"),
    ("Swift", "swift", "Swift"),
    ("Scala", "scala", "Scala"),
    ("PHP", "php", "PHP"),
    ("Perl", "pl", "Perl"),
    ("Haskell", "hs", "Haskell"),
    ("Lua", "lua", "Lua"),
    ("R", "r", "R"),
    ("Dart", "dart", "Dart"),
    ("Text", "txt", "Text"),
    ("MySQL", "sql", "SQL"),
    ("Oracle", "sql", "SQL"),
];

/// Exact match first, then case-insensitive (SWEA reports `c++`, `JAVA`).
pub fn find(label: &str) -> Option<&'static Language> {
    let label = label.trim();
    LANGUAGES
        .iter()
        .find(|l| l.label == label)
        .or_else(|| LANGUAGES.iter().find(|l| l.label.eq_ignore_ascii_case(label)))
}

pub fn extension(label: &str) -> Option<&'static str> {
    find(label).map(|l| l.extension)
}

/// Folder for the language scheme, falling back to the version-less label.
pub fn folder(label: &str, ignores: &HashSet<String>) -> String {
    match find(label) {
        Some(l) => l.folder.to_string(),
        None => lang_version_remove(label, ignores),
    }
}

/// Drops a trailing space-separated version token (`Python 3.8` -> `Python`).
/// Labels in `ignores` are returned unchanged.
pub fn lang_version_remove(lang: &str, ignores: &HashSet<String>) -> String {
    if ignores.contains(lang) {
        return lang.to_string();
    }
    let mut parts: Vec<&str> = lang.split(' ').collect();
    if parts.len() > 1
        && parts
            .last()
            .map_or(false, |p| p.starts_with(|c: char| c.is_ascii_digit()))
    {
        parts.pop();
    }
    parts.join(" ")
}

/// `JAVA` -> `Java`; mixed case labels like `C++` or `Python` are kept.
pub fn normalize_case(lang: &str) -> String {
    if lang == lang.to_uppercase() {
        let mut chars = lang.chars();
        match chars.next() {
            Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
            None => String::new(),
        }
    } else {
        lang.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_stripped() {
        let none = HashSet::new();
        assert_eq!(lang_version_remove("Python 3.8", &none), "Python");
        assert_eq!(lang_version_remove("Java 11", &none), "Java");
        assert_eq!(lang_version_remove("PyPy3", &none), "PyPy3");
        assert_eq!(lang_version_remove("C++17", &none), "C++17");
    }

    #[test]
    fn ignored_labels_keep_version() {
        let ignores: HashSet<String> = vec!["Python 3.8".to_string()].into_iter().collect();
        assert_eq!(lang_version_remove("Python 3.8", &ignores), "Python 3.8");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(extension("c++"), Some("cpp"));
        assert_eq!(extension("JAVA"), Some("java"));
        assert_eq!(extension("C++17"), Some("cpp"));
        assert_eq!(extension("Brainfuck"), None);
    }

    #[test]
    fn folder_falls_back_to_label() {
        let none = HashSet::new();
        assert_eq!(folder("C++17", &none), "Cpp");
        assert_eq!(folder("Zig 0.11", &none), "Zig");
    }

    #[test]
    fn uppercase_labels_are_normalized() {
        assert_eq!(normalize_case("JAVA"), "Java");
        assert_eq!(normalize_case("PYTHON"), "Python");
        assert_eq!(normalize_case("C++"), "C++");
        assert_eq!(normalize_case("Python"), "Python");
    }
}
