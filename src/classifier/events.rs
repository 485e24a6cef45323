// src/classifier/events.rs

use bevy::prelude::*;
use std::path::PathBuf;

use crate::mesh::LoadedMesh;

/// Move on to the next candidate without classifying the current one.
#[derive(Event, Debug)]
pub struct AdvanceRequest;

/// Sort the current candidate into `category`, then advance.
#[derive(Event, Debug, Clone)]
pub struct ClassifyRequest {
    pub category: String,
}

/// Re-list the source folder and restart from its first candidate.
#[derive(Event, Debug)]
pub struct RescanSourceRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderRole {
    Source,
    Destination,
}

/// Event to request picking a folder.
#[derive(Event, Debug, Clone)]
pub struct PickFolderRequest {
    pub role: FolderRole,
}

/// Event sent after a folder has been picked (or selection cancelled).
#[derive(Event, Debug, Clone)]
pub struct FolderPickedEvent {
    pub role: FolderRole,
    pub path: Option<PathBuf>, // None if selection was cancelled
}

/// A freshly loaded candidate mesh for the viewer to show.
#[derive(Event, Debug)]
pub struct DisplayMeshEvent {
    pub label: String,
    pub mesh: LoadedMesh,
}

/// The listing was reset, so whatever mesh is on screen no longer belongs to it.
#[derive(Event, Debug)]
pub struct ClearDisplayEvent;

/// Persisted session state changed and should be written out.
#[derive(Event, Debug)]
pub struct ClassifierStateChanged;
