use std::f32::consts::{FRAC_PI_2, TAU};

use raylib::prelude::Vector2;

use crate::core::tilemap::TileMap;
use crate::render::framebuffer::{cell_span, TileLayer};

/// How far inside the far edge a clamped position sits, so that truncating
/// it to a pixel index always lands on the last valid pixel.
const EDGE_MARGIN: f32 = 1e-3;

/// Movement requested by the host for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub mouse_dx: f32,
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
}

/// Viewer pose in framebuffer pixel units plus movement tuning.
pub struct Player {
    pub pos: Vector2,
    pub a: f32,            // heading, radians
    pub fov: f32,
    pub speed_walk: f32,   // px/s
    pub speed_sprint: f32,
    pub mouse_sens: f32,   // rad per mouse px
    pub sprinting: bool,
}

impl Player {
    pub fn new(x: f32, y: f32, angle: f32) -> Self {
        Self {
            pos: Vector2::new(x, y),
            a: angle,
            fov: 60f32.to_radians(),
            speed_walk: 80.0,
            speed_sprint: 140.0,
            mouse_sens: 0.0025,
            sprinting: false,
        }
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Center of the first empty cell, scanning rows top to bottom, when the
    /// map is drawn over `width × height` pixels.
    pub fn spawn_point(map: &TileMap, width: u32, height: u32) -> Option<(f32, f32)> {
        let (i, j) = (0..map.height())
            .flat_map(|j| (0..map.width()).map(move |i| (i, j)))
            .find(|&(i, j)| !map.is_solid(i, j))?;
        let (x0, x1) = cell_span(i, map.width(), width as usize);
        let (y0, y1) = cell_span(j, map.height(), height as usize);
        Some(((x0 + x1) as f32 * 0.5, (y0 + y1) as f32 * 0.5))
    }

    /// Keeps the position inside `[0, width) × [0, height)` of `layer`.
    pub fn clamp_to(&mut self, layer: &TileLayer) {
        self.pos.x = clamp_axis(self.pos.x, layer.width);
        self.pos.y = clamp_axis(self.pos.y, layer.height);
    }

    /// Turns by the mouse delta and walks, one axis at a time, refusing any
    /// step that ends inside a solid tile. Every candidate position is
    /// clamped to the layer before it is sampled, and so is the final one.
    pub fn apply_input(&mut self, input: &FrameInput, dt: f32, layer: &TileLayer) {
        self.a = (self.a + input.mouse_dx * self.mouse_sens).rem_euclid(TAU);
        self.sprinting = input.sprint;

        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
        let fwd = axis(input.forward, input.back);
        let side = axis(input.right, input.left);

        self.clamp_to(layer);
        if fwd == 0.0 && side == 0.0 {
            return;
        }

        let (sin_a, cos_a) = self.a.sin_cos();
        let (sin_s, cos_s) = (self.a + FRAC_PI_2).sin_cos();
        let mut dx = fwd * cos_a + side * cos_s;
        let mut dy = fwd * sin_a + side * sin_s;
        let len = (dx * dx + dy * dy).sqrt();
        let speed = if self.sprinting { self.speed_sprint } else { self.speed_walk };
        dx *= speed * dt / len;
        dy *= speed * dt / len;

        let nx = clamp_axis(self.pos.x + dx, layer.width);
        if !layer.is_solid_at(nx, self.pos.y) {
            self.pos.x = nx;
        }
        let ny = clamp_axis(self.pos.y + dy, layer.height);
        if !layer.is_solid_at(self.pos.x, ny) {
            self.pos.y = ny;
        }
        self.clamp_to(layer);
    }
}

#[inline]
fn clamp_axis(v: f32, extent: u32) -> f32 {
    let max = (extent as f32 - EDGE_MARGIN).max(0.0);
    if v.is_nan() { 0.0 } else { v.clamp(0.0, max) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn open_layer(w: u32, h: u32) -> TileLayer {
        TileLayer::rasterize(&TileMap::parse("0 0\n0 0").unwrap(), w, h)
    }

    #[test]
    fn mouse_turns_heading() {
        let layer = open_layer(10, 10);
        let mut p = Player::new(5.0, 5.0, 0.0);
        p.apply_input(&FrameInput { mouse_dx: 100.0, ..Default::default() }, 0.016, &layer);
        assert!((p.a - 0.25).abs() < 1e-6);
        p.apply_input(&FrameInput { mouse_dx: -200.0, ..Default::default() }, 0.016, &layer);
        assert!((p.a - (TAU - 0.25)).abs() < 1e-5);
    }

    #[test]
    fn walks_forward_along_heading() {
        let layer = open_layer(100, 100);
        let mut p = Player::new(50.0, 50.0, 0.0);
        p.apply_input(&FrameInput { forward: true, ..Default::default() }, 0.1, &layer);
        assert!((p.pos.x - 58.0).abs() < 1e-3);
        assert!((p.pos.y - 50.0).abs() < 1e-3);
    }

    #[test]
    fn walls_block_movement() {
        let map = TileMap::parse("0 1").unwrap();
        let layer = TileLayer::rasterize(&map, 20, 10);
        let mut p = Player::new(8.0, 5.0, 0.0);
        p.apply_input(&FrameInput { forward: true, ..Default::default() }, 0.1, &layer);
        assert_eq!(p.pos.x, 8.0);
    }

    #[test]
    fn diagonal_moves_never_leave_the_layer() {
        let (w, h) = (64, 48);
        let layer = open_layer(w, h);
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let mut p = Player::new(rng.gen_range(0.0..w as f32), rng.gen_range(0.0..h as f32), 0.0);
            p.a = rng.gen_range(0.0..TAU);
            let input = FrameInput {
                forward: rng.gen_range(0..2) == 1,
                back: rng.gen_range(0..2) == 1,
                left: rng.gen_range(0..2) == 1,
                right: rng.gen_range(0..2) == 1,
                sprint: true,
                mouse_dx: 0.0,
            };
            for _ in 0..20 {
                p.apply_input(&input, 0.5, &layer);
                let (x, y) = (p.pos.x as u32, p.pos.y as u32);
                assert!(p.pos.x >= 0.0 && p.pos.y >= 0.0);
                assert!(x < w && y < h, "({}, {}) escaped", p.pos.x, p.pos.y);
                assert!(layer.get(x, y).is_some());
            }
        }
    }

    #[test]
    fn out_of_range_pose_is_clamped_before_use() {
        let layer = open_layer(10, 10);
        let mut p = Player::new(-4.0, 25.0, 0.0);
        p.apply_input(&FrameInput::default(), 0.016, &layer);
        assert_eq!(p.pos.x, 0.0);
        assert!(p.pos.y < 10.0 && p.pos.y as u32 == 9);
    }

    #[test]
    fn spawns_in_first_empty_cell() {
        let map = TileMap::parse("1 1\n1 0").unwrap();
        assert_eq!(Player::spawn_point(&map, 20, 20), Some((15.0, 15.0)));
        let full = TileMap::parse("1").unwrap();
        assert_eq!(Player::spawn_point(&full, 20, 20), None);
    }
}
