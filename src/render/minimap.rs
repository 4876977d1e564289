//! Top-down view of the tile map, plus the viewer overlay drawn over it.
use crate::core::player::Player;
use crate::core::tilemap::{TileMap, TilePalette};
use crate::render::casters::RayCaster;
use crate::render::color::Pixel;
use crate::render::framebuffer::{cell_span, Framebuffer, TileLayer};

/// Number of field-of-view rays drawn by [`draw_view_cone`].
pub const DEBUG_RAYS: u32 = 25;

/// Fills `fb` with one solid rectangle per map cell.
pub fn render_map(fb: &mut Framebuffer, map: &TileMap, palette: &TilePalette) {
    let (w, h) = (fb.width as usize, fb.height as usize);
    for j in 0..map.height() {
        let (y0, y1) = cell_span(j, map.height(), h);
        for i in 0..map.width() {
            let (x0, x1) = cell_span(i, map.width(), w);
            let id = map.tiles()[j * map.width() + i];
            fb.fill_rect(x0 as u32, y0 as u32, x1 as u32, y1 as u32, palette.color(id));
        }
    }
}

/// Renders the map into a new `width × height` framebuffer.
pub fn map_image(map: &TileMap, palette: &TilePalette, width: u32, height: u32) -> Framebuffer {
    let mut fb = Framebuffer::new(width, height);
    render_map(&mut fb, map, palette);
    fb
}

/// Draws the viewer as a small square. Only ever drawn into the display
/// buffer, after casting.
pub fn draw_viewer_marker(fb: &mut Framebuffer, player: &Player, color: Pixel) {
    let (x, y) = (player.pos.x as i64, player.pos.y as i64);
    for yy in (y - 2).max(0)..=y + 2 {
        for xx in (x - 2).max(0)..=x + 2 {
            fb.set_pixel_color(xx as u32, yy as u32, color);
        }
    }
}

/// Plots a fan of rays across the viewer's field of view.
pub fn draw_view_cone(
    fb: &mut Framebuffer,
    layer: &TileLayer,
    caster: &RayCaster,
    player: &Player,
    color: Pixel,
) {
    fb.set_current_color(color);
    for i in 0..DEBUG_RAYS {
        let t = i as f32 / DEBUG_RAYS as f32;
        let a = player.a - (player.fov / 2.0) + (player.fov * t);
        caster.cast_ray_traced(layer, player.pos.x, player.pos.y, a, fb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::{self, rgb};

    #[test]
    fn quadrants_follow_the_palette() {
        let map = TileMap::parse("0 1\n1 0").unwrap();
        let green = rgb(0, 255, 0);
        let red = rgb(255, 0, 0);
        let palette = TilePalette::new(color::MAGENTA).with(0, green).with(1, red);
        let fb = map_image(&map, &palette, 4, 4);

        let quadrant = |x0: u32, y0: u32| -> Vec<Pixel> {
            (y0..y0 + 2).flat_map(|y| (x0..x0 + 2).map(move |x| (x, y))).map(|(x, y)| fb.get_pixel(x, y)).collect()
        };
        assert!(quadrant(0, 0).iter().all(|&p| p == green));
        assert!(quadrant(2, 0).iter().all(|&p| p == red));
        assert!(quadrant(0, 2).iter().all(|&p| p == red));
        assert!(quadrant(2, 2).iter().all(|&p| p == green));
    }

    #[test]
    fn uneven_sizes_cover_every_pixel() {
        let map = TileMap::parse("1 1 1\n1 1 1").unwrap();
        let palette = TilePalette::default();
        let fb = map_image(&map, &palette, 10, 7);
        assert!(fb.color_buffer.iter().all(|&p| p == palette.color(1)));
    }

    #[test]
    fn overlay_does_not_touch_the_tile_layer() {
        let map = TileMap::parse("0 0\n0 0").unwrap();
        let layer = TileLayer::rasterize(&map, 20, 20);
        let palette = TilePalette::default();
        let mut fb = map_image(&map, &palette, 20, 20);
        let player = Player::new(10.0, 10.0, 0.0);

        draw_viewer_marker(&mut fb, &player, color::BLACK);
        assert_eq!(fb.get_pixel(10, 10), color::BLACK);
        assert_eq!(fb.get_pixel(12, 8), color::BLACK);

        // the marker is invisible to the caster
        let caster = RayCaster::default();
        assert!(!caster.cast_ray(&layer, 9.0, 10.0, 0.0).is_hit());
    }

    #[test]
    fn marker_near_origin_is_clipped() {
        let mut fb = Framebuffer::new(4, 4);
        draw_viewer_marker(&mut fb, &Player::new(0.0, 0.0, 0.0), color::WHITE);
        assert_eq!(fb.get_pixel(0, 0), color::WHITE);
        assert_eq!(fb.get_pixel(3, 3), color::BLACK);
    }

    #[test]
    fn view_cone_is_plotted() {
        let map = TileMap::parse("1 1 1\n1 0 1\n1 1 1").unwrap();
        let layer = TileLayer::rasterize(&map, 30, 30);
        let mut fb = Framebuffer::new(30, 30);
        let player = Player::new(15.0, 15.0, 0.0);
        draw_view_cone(&mut fb, &layer, &RayCaster::default(), &player, color::WHITE);
        assert_eq!(fb.get_pixel(18, 15), color::WHITE);
        assert_eq!(fb.get_pixel(12, 15), color::BLACK);
    }
}
