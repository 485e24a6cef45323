// src/classifier/plugin.rs

use bevy::prelude::*;

use super::events::*;
use super::handler::{
    classifier_keyboard_shortcuts_system,
    handle_advance_request_system,
    handle_classify_request_system,
    handle_folder_picked_event_system,
    handle_pick_folder_request_system,
    handle_rescan_request_system,
    handle_state_change_and_save_system,
    setup_classifier_on_startup,
};

/// Folder cursor, classification copies and settings persistence.
pub struct ClassifierPlugin;

impl Plugin for ClassifierPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AdvanceRequest>()
            .add_event::<ClassifyRequest>()
            .add_event::<RescanSourceRequest>()
            .add_event::<PickFolderRequest>()
            .add_event::<FolderPickedEvent>()
            .add_event::<DisplayMeshEvent>()
            .add_event::<ClearDisplayEvent>()
            .add_event::<ClassifierStateChanged>();

        app.add_systems(Startup, setup_classifier_on_startup);

        // One pass per frame, in order: input, folder changes, classify, advance, save.
        app.add_systems(
            Update,
            (
                classifier_keyboard_shortcuts_system,
                handle_pick_folder_request_system,
                handle_folder_picked_event_system,
                handle_rescan_request_system,
                handle_classify_request_system,
                handle_advance_request_system,
                handle_state_change_and_save_system,
            )
                .chain(),
        );

        info!("ClassifierPlugin initialized.");
    }
}
