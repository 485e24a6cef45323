// src/classifier/mod.rs

pub mod plugin;
pub mod resources;
pub mod events;
pub mod candidates;

pub mod handler;
pub mod executers;

pub use plugin::ClassifierPlugin;
