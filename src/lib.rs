//! Ray-cast first-person rendering of 2D tile maps into a CPU framebuffer.

pub mod config;
pub mod core;
pub mod error;
pub mod render;
