pub mod io;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CATEGORIES: [&str; 4] = ["螺丝", "螺母", "连接件", "异形件"];

/// Session settings persisted between runs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ClassifierSettings {
    pub source_folder: PathBuf,
    pub destination_folder: PathBuf,
    pub categories: Vec<String>,
    /// Listing index the next launch opens at.
    pub start_index: usize,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            source_folder: PathBuf::from("./source_folder"),
            destination_folder: PathBuf::from("./destination_folder"),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            start_index: 0,
        }
    }
}

impl ClassifierSettings {
    /// Drops blank and repeated labels, falling back to the defaults if none survive.
    pub fn normalize_categories(&mut self) {
        let mut seen: Vec<String> = Vec::new();
        for label in self.categories.drain(..) {
            let label = label.trim().to_string();
            if !label.is_empty() && !seen.contains(&label) {
                seen.push(label);
            }
        }
        self.categories = if seen.is_empty() {
            DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
        } else {
            seen
        };
    }
}
