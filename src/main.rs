// src/main.rs

#![cfg_attr(all(not(debug_assertions), target_os = "windows"), windows_subsystem = "windows")]

use bevy::{
    log::LogPlugin,
    prelude::*,
    window::{WindowPlugin, WindowResolution},
    winit::{UpdateMode, WinitSettings},
};
use clap::Parser;
use std::time::Duration;

use bevy_egui::EguiPlugin;

mod classifier;
mod cli;
mod mesh;
mod settings;
mod ui;
mod viewer;

use classifier::ClassifierPlugin;
use cli::Cli;
use ui::ClassifierUiPlugin;
use viewer::ViewerPlugin;

fn main() {
    let cli = Cli::parse();

    App::new()
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::Continuous,
            unfocused_mode: UpdateMode::reactive_low_power(Duration::from_secs_f32(1.0 / 5.0)),
        })
        .insert_resource(cli)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "3D Model Classifier".into(),
                        resolution: WindowResolution::new(1000.0, 800.0),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: bevy::log::Level::INFO,
                    filter: "wgpu=error,naga=warn,mesh_sorter::diagonal=info".to_string(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .add_plugins(ViewerPlugin)
        .add_plugins(ClassifierPlugin)
        .add_plugins(ClassifierUiPlugin)
        .run();
}
