//! Validated render settings shared by the window loop and headless dumps.
use crate::error::{RaycastError, Result};
use crate::render::casters::RayCaster;
use crate::render::render3d::{Shading, DEFAULT_WALL_SCALE};

pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;
pub const DEFAULT_FOV_DEG: f32 = 60.0;
/// Largest accepted width or height.
pub const MAX_DIMENSION: u32 = 16_384;
/// Largest accepted `width * height`.
pub const MAX_PIXELS: usize = 1 << 26;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Field of view, radians
    pub fov: f32,
    pub caster: RayCaster,
    pub wall_scale: f32,
    pub shading: Shading,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fov: DEFAULT_FOV_DEG.to_radians(),
            caster: RayCaster::default(),
            wall_scale: DEFAULT_WALL_SCALE,
            shading: Shading::default(),
        }
    }
}

impl RenderConfig {
    pub fn new(
        width: u32,
        height: u32,
        fov_deg: f32,
        step: f32,
        max_distance: f32,
        wall_scale: f32,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RaycastError::InvalidConfig(format!("screen size must be non-zero, got {width}x{height}")));
        }
        let pixels = (width as usize).checked_mul(height as usize);
        if width > MAX_DIMENSION || height > MAX_DIMENSION || pixels.is_none_or(|n| n > MAX_PIXELS) {
            return Err(RaycastError::InvalidConfig(format!(
                "screen size {width}x{height} exceeds {MAX_DIMENSION} per side or {MAX_PIXELS} pixels"
            )));
        }
        if !(fov_deg > 0.0 && fov_deg < 180.0) {
            return Err(RaycastError::InvalidConfig(format!("fov must be in (0, 180) degrees, got {fov_deg}")));
        }
        if !(wall_scale.is_finite() && wall_scale > 0.0) {
            return Err(RaycastError::InvalidConfig(format!("wall scale must be positive, got {wall_scale}")));
        }
        Ok(Self {
            width,
            height,
            fov: fov_deg.to_radians(),
            caster: RayCaster::new(step, max_distance)?,
            wall_scale,
            shading: Shading::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_values() {
        let cfg = RenderConfig::default();
        assert_eq!(cfg.caster.step, 0.05);
        assert_eq!(cfg.caster.max_distance, 10_000.0);
        assert!((cfg.fov - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    }

    #[test]
    fn oversized_screens_are_rejected() {
        for (w, h) in [(65_536, 65_536), (u32::MAX, 2), (16_385, 1), (16_384, 16_384)] {
            assert!(
                matches!(RenderConfig::new(w, h, 60.0, 0.05, 10_000.0, 0.02), Err(RaycastError::InvalidConfig(_))),
                "{w}x{h} accepted"
            );
        }
        assert!(RenderConfig::new(16_384, 4_096, 60.0, 0.05, 10_000.0, 0.02).is_ok());
    }

    #[test]
    fn validates_every_field() {
        assert!(RenderConfig::new(640, 480, 60.0, 0.05, 10_000.0, 0.02).is_ok());
        assert!(RenderConfig::new(0, 480, 60.0, 0.05, 10_000.0, 0.02).is_err());
        assert!(RenderConfig::new(640, 480, 180.0, 0.05, 10_000.0, 0.02).is_err());
        assert!(RenderConfig::new(640, 480, 60.0, 0.0, 10_000.0, 0.02).is_err());
        assert!(RenderConfig::new(640, 480, 60.0, 0.05, 0.0, 0.02).is_err());
        assert!(RenderConfig::new(640, 480, 60.0, 0.05, 10_000.0, 0.0).is_err());
    }
}
