// src/mesh/mod.rs

// OBJ loading and the display metrics computed for each candidate.
pub mod loader;
pub mod metrics;

pub use loader::{load_obj, LoadedMesh};
