// src/ui/panel.rs
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::classifier::{
    events::{AdvanceRequest, ClassifyRequest, FolderRole, PickFolderRequest, RescanSourceRequest},
    resources::ClassifierState,
};

const NEXT_LABEL: &str = "下一件";
const MAX_PATH_DISPLAY_CHARS: usize = 48;

/// Keeps the tail of a long path, which is the part that tells folders apart.
pub(crate) fn shorten_path(path_str: &str, max_chars: usize) -> String {
    let count = path_str.chars().count();
    if count <= max_chars {
        return path_str.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let tail: String = path_str.chars().skip(count - keep).collect();
    format!("...{}", tail)
}

pub(crate) fn current_file_text(state: &ClassifierState) -> String {
    let name = state
        .current
        .as_ref()
        .map(|c| c.file_name())
        .unwrap_or_default();
    format!("Current File: {}", name)
}

pub(crate) fn progress_text(state: &ClassifierState) -> String {
    let shown = state.current.as_ref().map_or(0, |c| c.index + 1);
    format!("{}/{}", shown, state.cursor.total())
}

pub fn classifier_panel_ui(
    mut contexts: EguiContexts,
    state: Res<ClassifierState>,
    mut classify_writer: EventWriter<ClassifyRequest>,
    mut advance_writer: EventWriter<AdvanceRequest>,
    mut pick_folder_writer: EventWriter<PickFolderRequest>,
    mut rescan_writer: EventWriter<RescanSourceRequest>,
) {
    let ctx = contexts.ctx_mut();

    egui::TopBottomPanel::top("classifier_top_panel").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(current_file_text(&state)).size(16.0));
            if let Some(current) = &state.current {
                ui.separator();
                ui.label(format!("Diagonal: {:.2} m", current.diagonal / 1000.0));
            }
            ui.separator();
            ui.label(progress_text(&state));
        });

        ui.horizontal(|ui| {
            let has_candidate = state.classifiable().is_some();
            for (idx, category) in state.layout.categories.iter().enumerate() {
                let button = ui
                    .add_enabled(has_candidate, egui::Button::new(category.as_str()))
                    .on_hover_text(format!("Copy into '{}' ({})", category, idx + 1));
                if button.clicked() {
                    classify_writer.write(ClassifyRequest {
                        category: category.clone(),
                    });
                }
            }
            ui.separator();
            if ui.button(NEXT_LABEL).on_hover_text("Skip to the next candidate (Space)").clicked() {
                advance_writer.write(AdvanceRequest);
            }
        });

        ui.horizontal(|ui| {
            if ui.button("FROM").on_hover_text("Select source folder").clicked() {
                pick_folder_writer.write(PickFolderRequest { role: FolderRole::Source });
            }
            let from_path_str = state.layout.source_root.display().to_string();
            ui.label(shorten_path(&from_path_str, MAX_PATH_DISPLAY_CHARS))
                .on_hover_text(&from_path_str);

            if ui.button("TO").on_hover_text("Select destination folder").clicked() {
                pick_folder_writer.write(PickFolderRequest { role: FolderRole::Destination });
            }
            let to_path_str = state.layout.destination_root.display().to_string();
            ui.label(shorten_path(&to_path_str, MAX_PATH_DISPLAY_CHARS))
                .on_hover_text(&to_path_str);

            if ui.button("Rescan").on_hover_text("List the source folder again and start over").clicked() {
                rescan_writer.write(RescanSourceRequest);
            }
        });

        let status_color = if state.status_is_error {
            egui::Color32::LIGHT_RED
        } else {
            ui.visuals().text_color()
        };
        ui.colored_label(status_color, &state.status);
        ui.add_space(4.0);
    });
}
