//! solved.ac problem metadata and tier labels.

extern crate serde;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayName {
    pub language: String,
    pub name: String,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(default)]
    pub display_names: Vec<DisplayName>,
}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvedProblem {
    pub problem_id: u32,
    pub title_ko: String,
    pub level: u8,
    #[serde(default)]
    pub tags: Vec<Tag>,
}
impl SolvedProblem {
    pub fn korean_tags(&self) -> Vec<String> {
        self.tags
            .iter()
            .flat_map(|t| t.display_names.iter())
            .filter(|d| d.language == "ko")
            .map(|d| d.name.clone())
            .collect()
    }
    pub fn level_label(&self) -> String {
        level_label(self.level)
    }
}

const TIERS: [&str; 6] = ["Bronze", "Silver", "Gold", "Platinum", "Diamond", "Ruby"];
const ROMAN: [&str; 5] = ["I", "II", "III", "IV", "V"];

/// solved.ac numeric level to its label: 1 is `Bronze V`, 30 is `Ruby I`.
pub fn level_label(level: u8) -> String {
    match level {
        0 => "Unrated".to_string(),
        1..=30 => {
            let index = (level - 1) as usize;
            format!("{} {}", TIERS[index / 5], ROMAN[4 - index % 5])
        }
        _ => "Master".to_string(),
    }
}
