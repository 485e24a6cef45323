// src/viewer/mod.rs

pub mod camera;
pub mod plugin;

pub use plugin::ViewerPlugin;
