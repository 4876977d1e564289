//! World-side types: tile maps, the viewer and input handling.
//!
//! - `tilemap`: map loading and the tile palette
//! - `player`: viewer pose and movement
//! - `process_events`: raylib input to per-frame movement

pub mod tilemap;
pub mod player;
pub mod process_events;
