use raylib::prelude::*;

use crate::core::player::{FrameInput, Player};
use crate::render::framebuffer::TileLayer;

/// Samples keyboard and mouse state for the current frame.
pub fn read_input(window: &RaylibHandle) -> FrameInput {
    let down = |a: KeyboardKey, b: KeyboardKey| window.is_key_down(a) || window.is_key_down(b);
    FrameInput {
        mouse_dx: window.get_mouse_delta().x,
        forward: down(KeyboardKey::KEY_W, KeyboardKey::KEY_UP),
        back: down(KeyboardKey::KEY_S, KeyboardKey::KEY_DOWN),
        left: down(KeyboardKey::KEY_A, KeyboardKey::KEY_LEFT),
        right: down(KeyboardKey::KEY_D, KeyboardKey::KEY_RIGHT),
        sprint: down(KeyboardKey::KEY_LEFT_SHIFT, KeyboardKey::KEY_RIGHT_SHIFT),
    }
}

pub fn process_events(window: &RaylibHandle, player: &mut Player, layer: &TileLayer) {
    let dt = window.get_frame_time();
    let input = read_input(window);
    player.apply_input(&input, dt, layer);
}
