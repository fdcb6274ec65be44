//! Java sources have to match their file name and live in a package.

extern crate regex;

use regex::{NoExpand, Regex};
use std::sync::OnceLock;

struct JavaRegex {
    public_class: Regex,
    import: Regex,
    solution: Regex,
}
impl JavaRegex {
    fn new() -> Self {
        JavaRegex {
            public_class: Regex::new(r"public\s+class\s+[A-Za-z_][A-Za-z0-9_]*").unwrap(),
            import: Regex::new(r"import\s+.*?;").unwrap(),
            solution: Regex::new(r"(public\s*)?class\s*Solution").unwrap(),
        }
    }
}
fn regex() -> &'static JavaRegex {
    static REGEX: OnceLock<JavaRegex> = OnceLock::new();
    REGEX.get_or_init(JavaRegex::new)
}

/// Renames the first public class to `name`.
pub fn rename_public_class(code: &str, name: &str) -> String {
    regex()
        .public_class
        .replace(code, NoExpand(&format!("public class {}", name)))
        .into_owned()
}

pub fn with_package(code: &str, package: &str, separator: &str) -> String {
    format!("package {};{}{}", package, separator, code)
}

/// Turns a Programmers `Solution` class into `Solution_{id}` and adds a
/// runnable `PRO_{id}` class. Imports are hoisted above both.
pub fn wrap_solution(code: &str, problem_id: &str, author: &str) -> String {
    let solution = format!("Solution_{}", problem_id);
    let main = format!("PRO_{}", problem_id);
    let regex = regex();
    let imports = regex
        .import
        .find_iter(code)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let body = regex.import.replace_all(code, "");
    let body = regex
        .solution
        .replace(body.trim(), NoExpand(&format!("class {}", solution)))
        .into_owned();
    format!(
        r#"package PRO.{author};

{imports}

public class {main} {{
    public static void main(String[] args) {{
        {solution} s = new {solution}();
        // 테스트케이스를 활용해 실행 코드를 작성하세요.
    }}
}}

{body}"#,
        author = author,
        imports = imports,
        main = main,
        solution = solution,
        body = body
    )
}
