//! First-person column renderer: one ray per screen column, flat-shaded
//! sky, wall and ground.
use crate::core::player::Player;
use crate::render::casters::RayCaster;
use crate::render::color::{self, Pixel};
use crate::render::framebuffer::{Framebuffer, TileLayer};

/// Stand-in for corrected distances at or below zero.
pub const MIN_DISTANCE: f32 = 0.0001;
pub const DEFAULT_WALL_SCALE: f32 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shading {
    pub sky: Pixel,
    pub wall: Pixel,
    pub ground: Pixel,
}

impl Default for Shading {
    fn default() -> Self {
        Self { sky: color::SKY, wall: color::WALL, ground: color::GROUND }
    }
}

#[inline]
pub fn ray_angle(heading: f32, fov: f32, columns: u32, i: u32) -> f32 {
    heading - fov * 0.5 + i as f32 * (fov / columns as f32)
}

/// Projects a radial distance onto the view direction (fisheye removal).
#[inline]
pub fn corrected_distance(distance: f32, heading: f32, a: f32) -> f32 {
    distance * (heading - a).cos()
}

#[inline]
pub fn wall_height(screen_h: f32, corrected: f32, scale: f32) -> f32 {
    let d = if corrected <= 0.0 { MIN_DISTANCE } else { corrected };
    screen_h / (d * scale)
}

/// `(top, bottom)` of a wall slice centered on the horizon. Not clipped.
#[inline]
pub fn wall_span(screen_h: f32, wall_h: f32) -> (f32, f32) {
    let top = (screen_h - wall_h) * 0.5;
    (top, top + wall_h)
}

/// Paints column `x`: sky on rows `[0, y0)`, wall on `[y0, y1)`, ground
/// below.
fn paint_column(fb: &mut Framebuffer, x: u32, y0: u32, y1: u32, shading: &Shading) {
    fb.fill_column(x, 0, y0, shading.sky);
    fb.fill_column(x, y0, y1, shading.wall);
    fb.fill_column(x, y1, fb.height, shading.ground);
}

/// Renders a full frame from `player` into `fb`, overwriting every column.
/// Rays that find no wall draw an empty horizon.
pub fn render_3d(
    fb: &mut Framebuffer,
    layer: &TileLayer,
    caster: &RayCaster,
    player: &Player,
    shading: &Shading,
    wall_scale: f32,
) {
    let h = fb.height as f32;
    let horizon = fb.height / 2;

    for i in 0..fb.width {
        let a = ray_angle(player.a, player.fov, fb.width, i);
        let intersect = caster.cast_ray(layer, player.pos.x, player.pos.y, a);

        if !intersect.is_hit() {
            paint_column(fb, i, horizon, horizon, shading);
            continue;
        }

        let corrected = corrected_distance(intersect.distance, player.a, a);
        let (top, bottom) = wall_span(h, wall_height(h, corrected, wall_scale));

        // wall covers rows with top <= y <= bottom
        let y0 = top.max(0.0).ceil().min(h) as u32;
        let y1 = (bottom.floor() + 1.0).clamp(0.0, h) as u32;
        paint_column(fb, i, y0, y1.max(y0), shading);
    }
}
