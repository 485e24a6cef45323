// src/cli/mod.rs
// Launch flags; each one overrides the persisted setting for this run.

use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

use crate::settings::ClassifierSettings;

#[derive(Parser, Debug, Default, Clone, Resource)]
#[command(name = "mesh_sorter")]
#[command(about = "Mesh Sorter - view OBJ candidates one by one and sort them into category folders", long_about = None)]
pub struct Cli {
    /// Folder holding one subfolder per candidate mesh
    #[arg(long)]
    pub source: Option<PathBuf>,

    /// Folder receiving one subfolder per category
    #[arg(long)]
    pub destination: Option<PathBuf>,

    /// Listing index to start from
    #[arg(long)]
    pub start: Option<usize>,

    /// Category label; repeat to replace the whole category set
    #[arg(long = "category", value_name = "LABEL")]
    pub categories: Vec<String>,
}

impl Cli {
    pub fn apply_to(&self, settings: &mut ClassifierSettings) {
        if let Some(source) = &self.source {
            if *source != settings.source_folder {
                // A different source listing makes the saved index meaningless.
                settings.start_index = 0;
            }
            settings.source_folder = source.clone();
        }
        if let Some(destination) = &self.destination {
            settings.destination_folder = destination.clone();
        }
        if let Some(start) = self.start {
            settings.start_index = start;
        }
        if !self.categories.is_empty() {
            settings.categories = self.categories.clone();
        }
        settings.normalize_categories();
    }
}
