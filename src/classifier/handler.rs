// src/classifier/handler.rs

use bevy::prelude::*;
use bevy_egui::EguiContexts;
use rfd::FileDialog;

use super::events::*;
use super::executers::{
    advance_to_next_candidate, classification_message, execute_classification, prepare_destination,
};
use super::resources::{CandidateCursor, ClassifierState, SortLayout};
use crate::cli::Cli;
use crate::settings::io::{load_settings_from_file, save_settings_to_file};
use crate::settings::ClassifierSettings;

/// Builds the session from saved settings plus launch flags and queues the first advance.
pub(crate) fn setup_classifier_on_startup(
    mut commands: Commands,
    cli: Res<Cli>,
    mut advance_writer: EventWriter<AdvanceRequest>,
) {
    let mut settings = match load_settings_from_file() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Classifier: Failed to load settings: {}. Using defaults.", e);
            ClassifierSettings::default()
        }
    };
    cli.apply_to(&mut settings);

    let mut state = ClassifierState::new(SortLayout::from_settings(&settings));
    rescan(&mut state, settings.start_index);
    if let Err(e) = prepare_destination(&state.layout) {
        error!(
            "Classifier: Could not create destination folders under {}: {}",
            state.layout.destination_root.display(),
            e
        );
        state.set_error(format!("Error: destination unusable: {}", e));
    }

    info!(
        "Classifier: Session ready. Source: {:?}, Destination: {:?}, Categories: {:?}, Start: {}/{}.",
        state.layout.source_root,
        state.layout.destination_root,
        state.layout.categories,
        state.cursor.index,
        state.cursor.total()
    );
    commands.insert_resource(state);
    advance_writer.write(AdvanceRequest);
}

fn rescan(state: &mut ClassifierState, start_index: usize) {
    state.current = None;
    state.finished = false;
    match CandidateCursor::scan(&state.layout.source_root, start_index) {
        Ok(cursor) => {
            info!(
                "Classifier: Found {} candidate folders in {}",
                cursor.total(),
                state.layout.source_root.display()
            );
            state.set_status(format!("Found {} candidate folders.", cursor.total()));
            state.cursor = cursor;
        }
        Err(e) => {
            error!("Classifier: Could not list {}: {}", state.layout.source_root.display(), e);
            state.cursor = CandidateCursor::default();
            state.set_error(format!("Error: {}", e));
        }
    }
}

/// Handles the `PickFolderRequest` event to show a folder dialog.
/// Sends a `FolderPickedEvent` with the result.
pub(crate) fn handle_pick_folder_request_system(
    mut events: EventReader<PickFolderRequest>,
    mut folder_picked_writer: EventWriter<FolderPickedEvent>,
) {
    if let Some(event) = events.read().next() {
        info!("Classifier: Received PickFolderRequest: {:?}", event);
        let picked_path = FileDialog::new().pick_folder();
        folder_picked_writer.write(FolderPickedEvent {
            role: event.role,
            path: picked_path,
        });
    }
}

pub(crate) fn handle_folder_picked_event_system(
    mut events: EventReader<FolderPickedEvent>,
    mut state: ResMut<ClassifierState>,
    mut rescan_writer: EventWriter<RescanSourceRequest>,
    mut state_changed_writer: EventWriter<ClassifierStateChanged>,
) {
    for event in events.read() {
        let Some(path) = event.path.clone() else {
            info!("Classifier: {:?} folder selection cancelled.", event.role);
            continue;
        };
        info!("Classifier: {:?} folder set to {}", event.role, path.display());
        match event.role {
            FolderRole::Source => {
                state.layout.source_root = path;
                rescan_writer.write(RescanSourceRequest);
            }
            FolderRole::Destination => {
                state.layout.destination_root = path;
                match prepare_destination(&state.layout) {
                    Ok(()) => state.set_status("Destination folder set."),
                    Err(e) => {
                        error!("Classifier: Could not prepare destination: {}", e);
                        state.set_error(format!("Error: destination unusable: {}", e));
                    }
                }
            }
        }
        state_changed_writer.write(ClassifierStateChanged);
    }
}

pub(crate) fn handle_rescan_request_system(
    mut events: EventReader<RescanSourceRequest>,
    mut state: ResMut<ClassifierState>,
    mut clear_writer: EventWriter<ClearDisplayEvent>,
    mut advance_writer: EventWriter<AdvanceRequest>,
) {
    if events.read().next().is_none() {
        return;
    }
    events.clear();
    rescan(&mut state, 0);
    clear_writer.write(ClearDisplayEvent);
    advance_writer.write(AdvanceRequest);
}

pub(crate) fn handle_classify_request_system(
    mut events: EventReader<ClassifyRequest>,
    mut state: ResMut<ClassifierState>,
    mut advance_writer: EventWriter<AdvanceRequest>,
) {
    for event in events.read() {
        if let Some(candidate) = state.classifiable().cloned() {
            match execute_classification(&state.layout, &candidate, &event.category) {
                Ok(target) => {
                    info!("Classified {} as {}", candidate.dir.display(), event.category);
                    debug!("Classifier: Copy stored at {}", target.display());
                    let message = classification_message(&candidate, &event.category);
                    state.set_status(message);
                }
                Err(e) => {
                    error!(
                        "Classifier: Failed to classify {} as {}: {}",
                        candidate.dir.display(),
                        event.category,
                        e
                    );
                    state.set_error(format!("Error: {}", e));
                }
            }
        } else {
            warn!("Classifier: No candidate left to classify as {}.", event.category);
        }
        advance_writer.write(AdvanceRequest);
    }
}

pub(crate) fn handle_advance_request_system(
    mut events: EventReader<AdvanceRequest>,
    mut state: ResMut<ClassifierState>,
    mut display_writer: EventWriter<DisplayMeshEvent>,
    mut state_changed_writer: EventWriter<ClassifierStateChanged>,
) {
    for _event in events.read() {
        match advance_to_next_candidate(&mut state.cursor) {
            Some(loaded) => {
                display_writer.write(DisplayMeshEvent {
                    label: loaded.candidate.file_name(),
                    mesh: loaded.mesh,
                });
                state.current = Some(loaded.candidate);
            }
            None => {
                if !state.finished {
                    info!(
                        "Classifier: No more candidates in {} ({} folders examined).",
                        state.layout.source_root.display(),
                        state.cursor.total()
                    );
                    state.finished = true;
                    if !state.status_is_error {
                        state.set_status("All candidates visited.");
                    }
                }
            }
        }
        state_changed_writer.write(ClassifierStateChanged);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Shortcut {
    Classify(String),
    Advance,
}

const DIGITS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Digits `1..=9` pick the matching category; Space or Right arrow advances.
/// Nothing fires while an egui widget holds keyboard focus, since it already
/// reacts to Space itself.
pub(crate) fn shortcut_for(
    keys: &ButtonInput<KeyCode>,
    categories: &[String],
    egui_has_focus: bool,
) -> Option<Shortcut> {
    if egui_has_focus {
        return None;
    }
    if let Some((_, category)) = DIGITS
        .iter()
        .zip(categories)
        .find(|(key, _)| keys.just_pressed(**key))
    {
        return Some(Shortcut::Classify(category.clone()));
    }
    if keys.just_pressed(KeyCode::Space) || keys.just_pressed(KeyCode::ArrowRight) {
        return Some(Shortcut::Advance);
    }
    None
}

pub(crate) fn classifier_keyboard_shortcuts_system(
    mut contexts: EguiContexts,
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<ClassifierState>,
    mut classify_writer: EventWriter<ClassifyRequest>,
    mut advance_writer: EventWriter<AdvanceRequest>,
) {
    let egui_has_focus = contexts
        .try_ctx_mut()
        .is_some_and(|ctx| ctx.wants_keyboard_input());

    match shortcut_for(&keys, &state.layout.categories, egui_has_focus) {
        Some(Shortcut::Classify(category)) => {
            classify_writer.write(ClassifyRequest { category });
        }
        Some(Shortcut::Advance) => {
            advance_writer.write(AdvanceRequest);
        }
        None => {}
    }
}

/// Writes settings whenever the session's folders or resume point change.
pub(crate) fn handle_state_change_and_save_system(
    mut events: EventReader<ClassifierStateChanged>,
    state: Res<ClassifierState>,
) {
    if events.read().next().is_none() {
        return;
    }
    events.clear();
    if let Err(e) = save_settings_to_file(&state.to_settings()) {
        error!("Classifier: Failed to save settings: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TRIANGLE_OBJ: &str = "v 0 0 0\nv 1000 0 0\nv 0 1000 500\nf 1 2 3\n";

    /// Headless app with the rescan, classify and advance systems over two candidates,
    /// `c1` and `c2`, in a source folder named `abc_0002_obj_v00`.
    fn session_app() -> (TempDir, App) {
        let tmp = tempfile::tempdir().unwrap();
        let layout = SortLayout {
            source_root: tmp.path().join("abc_0002_obj_v00"),
            destination_root: tmp.path().join("destination_folder"),
            categories: vec!["螺丝".into(), "螺母".into()],
        };
        for name in ["c1", "c2"] {
            let dir = layout.source_root.join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("part.obj"), TRIANGLE_OBJ).unwrap();
        }
        prepare_destination(&layout).unwrap();

        let mut state = ClassifierState::new(layout);
        state.cursor = CandidateCursor::scan(&state.layout.source_root, 0).unwrap();

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<AdvanceRequest>()
            .add_event::<ClassifyRequest>()
            .add_event::<RescanSourceRequest>()
            .add_event::<DisplayMeshEvent>()
            .add_event::<ClearDisplayEvent>()
            .add_event::<ClassifierStateChanged>()
            .insert_resource(state)
            .add_systems(
                Update,
                (
                    handle_rescan_request_system,
                    handle_classify_request_system,
                    handle_advance_request_system,
                )
                    .chain(),
            );
        (tmp, app)
    }

    fn classify(app: &mut App, category: &str) {
        app.world_mut().send_event(ClassifyRequest {
            category: category.to_string(),
        });
        app.update();
    }

    fn advance(app: &mut App) {
        app.world_mut().send_event(AdvanceRequest);
        app.update();
    }

    fn state(app: &App) -> &ClassifierState {
        app.world().resource::<ClassifierState>()
    }

    fn copied_mesh(tmp: &TempDir, category: &str, name: &str) -> bool {
        tmp.path()
            .join("destination_folder")
            .join(category)
            .join(name)
            .join(format!("{}.obj", name))
            .is_file()
    }

    #[test]
    fn classify_then_advance_until_finished() {
        let (tmp, mut app) = session_app();
        advance(&mut app);
        assert_eq!(state(&app).current.as_ref().map(|c| c.index), Some(0));

        classify(&mut app, "螺丝");
        assert!(copied_mesh(&tmp, "螺丝", "abc_0002_c1"));
        assert_eq!(state(&app).current.as_ref().map(|c| c.index), Some(1));
        assert!(!state(&app).finished);
        assert!(state(&app).status.contains("classified as 螺丝"));

        classify(&mut app, "螺母");
        assert!(copied_mesh(&tmp, "螺母", "abc_0002_c2"));
        let s = state(&app);
        assert!(s.finished);
        assert_eq!(s.cursor.index, 2);
        assert_eq!(s.status, "All candidates visited.");
        assert!(!s.status_is_error);
        assert_eq!(s.to_settings().start_index, 2);

        // The last mesh stays on screen but can no longer be sorted again.
        classify(&mut app, "螺丝");
        assert!(!copied_mesh(&tmp, "螺丝", "abc_0002_c2"));
        assert!(copied_mesh(&tmp, "螺母", "abc_0002_c2"));
        assert_eq!(state(&app).cursor.index, 2);
    }

    #[test]
    fn failed_copy_still_advances_and_keeps_error() {
        let (tmp, mut app) = session_app();
        advance(&mut app);

        classify(&mut app, "废料");
        let s = state(&app);
        assert!(s.status_is_error);
        assert!(s.status.contains("废料"));
        assert_eq!(s.current.as_ref().map(|c| c.index), Some(1));
        assert!(!copied_mesh(&tmp, "螺丝", "abc_0002_c1"));

        advance(&mut app);
        let s = state(&app);
        assert!(s.finished);
        assert!(s.status_is_error);
        assert!(s.status.contains("废料"));
    }

    #[test]
    fn classify_without_candidate_only_advances() {
        let (tmp, mut app) = session_app();

        classify(&mut app, "螺丝");
        assert_eq!(state(&app).current.as_ref().map(|c| c.index), Some(0));
        let copies = fs::read_dir(tmp.path().join("destination_folder").join("螺丝"))
            .unwrap()
            .count();
        assert_eq!(copies, 0);
    }

    #[test]
    fn advancing_past_the_end_is_idempotent() {
        let (_tmp, mut app) = session_app();
        for _ in 0..4 {
            advance(&mut app);
        }
        let s = state(&app);
        assert!(s.finished);
        assert_eq!(s.cursor.index, 2);
        assert_eq!(s.current.as_ref().map(|c| c.index), Some(1));
        assert_eq!(s.status, "All candidates visited.");
    }

    #[test]
    fn rescan_of_emptied_source_clears_the_view() {
        let (tmp, mut app) = session_app();
        advance(&mut app);
        assert!(state(&app).current.is_some());

        for name in ["c1", "c2"] {
            fs::remove_dir_all(tmp.path().join("abc_0002_obj_v00").join(name)).unwrap();
        }
        app.world_mut().send_event(RescanSourceRequest);
        app.update();

        let s = state(&app);
        assert!(s.current.is_none());
        assert_eq!(s.cursor.total(), 0);
        assert!(s.finished);
        assert_eq!(app.world().resource::<Events<ClearDisplayEvent>>().len(), 1);
    }

    #[test]
    fn shortcuts_map_digits_and_space() {
        let categories = vec!["螺丝".to_string(), "螺母".to_string()];
        let mut keys = ButtonInput::<KeyCode>::default();

        keys.press(KeyCode::Digit2);
        assert_eq!(
            shortcut_for(&keys, &categories, false),
            Some(Shortcut::Classify("螺母".to_string()))
        );

        keys.clear();
        keys.press(KeyCode::Digit3);
        assert_eq!(shortcut_for(&keys, &categories, false), None);

        keys.clear();
        keys.press(KeyCode::Space);
        assert_eq!(shortcut_for(&keys, &categories, false), Some(Shortcut::Advance));
    }

    #[test]
    fn shortcuts_yield_to_focused_widget() {
        let categories = vec!["螺丝".to_string()];
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::Space);
        keys.press(KeyCode::Digit1);
        assert_eq!(shortcut_for(&keys, &categories, true), None);
    }
}
