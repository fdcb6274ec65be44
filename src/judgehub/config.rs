pub mod github {
    pub const API_BASE: &str = "https://api.github.com";
    pub const ACCEPT: &str = "application/vnd.github.v3+json";
    pub const USER_AGENT: &str = concat!("judgehub/", env!("CARGO_PKG_VERSION"));
    pub const FILE_MODE: &str = "100644";
}
pub mod poll {
    use std::time::Duration;
    pub const CHECK_DELAY: Duration = Duration::from_secs(2);
}
pub mod pool {
    pub const LOOKUP_DEGREE: usize = 1;
    pub const FETCH_DEGREE: usize = 2;
    pub const LOOKUP_CHUNK: usize = 100;
}
pub mod policy {
    /// Baekjoon ids below this are contest problems and are never uploaded.
    pub const MIN_PROBLEM_ID: u32 = 1000;
}
pub mod storage {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
pub mod text {
    pub const EMPTY_SECTION: &str = "작성된 내용이 없습니다.";
    pub const NO_CLASSIFICATION: &str = "분류 정보 없음";
    pub const APPROACH: &str = "#접근방법#";
    pub const DIFFICULTY: &str = "#어려웠던점#";
    pub const LEARNED: &str = "#배운점#";
    pub const ALGORITHM: &str = "#알고리즘유형#";
}
pub mod site {
    pub const BAEKJOON: &str = "https://www.acmicpc.net";
    pub const SOLVED_AC: &str = "https://solved.ac/api/v3";
    pub const PROGRAMMERS: &str = "https://school.programmers.co.kr";
    pub const SWEA: &str = "https://swexpertacademy.com";
    pub const SWEA_PASS: &str = "pass입니다";
}
