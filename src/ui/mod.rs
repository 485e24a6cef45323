// src/ui/mod.rs
use bevy::prelude::*;
use bevy_egui::EguiContextPass;

pub mod fonts;
pub mod panel;

use fonts::install_cjk_fallback_font;
use panel::classifier_panel_ui;

/// Plugin for the classifier's button panel.
pub struct ClassifierUiPlugin;

impl Plugin for ClassifierUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            EguiContextPass,
            (install_cjk_fallback_font, classifier_panel_ui).chain(),
        );

        info!("ClassifierUiPlugin initialized.");
    }
}
