//! Rendering into CPU framebuffers.
//!
//! - `color`: packed pixel codec
//! - `framebuffer`: pixel buffer and the tile-id layer rays sample
//! - `casters`: fixed-step ray marching
//! - `render3d`: first-person column renderer
//! - `minimap`: top-down map and viewer overlay
//! - `ppm`: P3/P6 image dumps

pub mod color;
pub mod framebuffer;
pub mod casters;
pub mod render3d;
pub mod minimap;
pub mod ppm;
