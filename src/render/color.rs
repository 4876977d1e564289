//! Packed 32-bit pixels.
//!
//! Layout is `0xAABBGGRR`: alpha in the most significant byte, red in the
//! least significant. On little-endian targets the in-memory bytes of a
//! pixel are therefore `R, G, B, A`, the layout raylib expects for an
//! uncompressed RGBA8 texture.
use raylib::prelude::Color;

pub type Pixel = u32;

pub const SKY: Pixel = pack_color(110, 160, 230, 255);
pub const WALL: Pixel = pack_color(150, 150, 150, 255);
pub const GROUND: Pixel = pack_color(70, 60, 50, 255);
pub const YELLOW: Pixel = pack_color(255, 255, 0, 255);
pub const LIGHT_GREEN: Pixel = pack_color(150, 225, 150, 255);
pub const MAGENTA: Pixel = pack_color(255, 0, 255, 255);
pub const WHITE: Pixel = pack_color(255, 255, 255, 255);
pub const BLACK: Pixel = pack_color(0, 0, 0, 255);

#[inline]
pub const fn pack_color(r: u8, g: u8, b: u8, a: u8) -> Pixel {
    ((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | r as u32
}

/// Opaque shorthand for `pack_color(r, g, b, 255)`.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Pixel {
    pack_color(r, g, b, 255)
}

#[inline]
pub const fn unpack_color(p: Pixel) -> (u8, u8, u8, u8) {
    (p as u8, (p >> 8) as u8, (p >> 16) as u8, (p >> 24) as u8)
}

#[inline]
pub fn to_raylib(p: Pixel) -> Color {
    let (r, g, b, a) = unpack_color(p);
    Color::new(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn alpha_is_high_byte_red_is_low_byte() {
        assert_eq!(pack_color(0x11, 0x22, 0x33, 0x44), 0x4433_2211);
        assert_eq!(rgb(255, 0, 0), 0xFF00_00FF);
    }

    #[test]
    fn known_packed_values() {
        // yellow and light green as stored in map palettes
        assert_eq!(rgb(255, 255, 0), 4278255615);
        assert_eq!(LIGHT_GREEN, 4288078230);
    }

    #[test]
    fn unpack_inverts_pack() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let (r, g, b, a) = (
                rng.gen_range(0..=255u8),
                rng.gen_range(0..=255u8),
                rng.gen_range(0..=255u8),
                rng.gen_range(0..=255u8),
            );
            assert_eq!(unpack_color(pack_color(r, g, b, a)), (r, g, b, a));
        }
        assert_eq!(unpack_color(pack_color(0, 0, 0, 0)), (0, 0, 0, 0));
        assert_eq!(unpack_color(pack_color(255, 255, 255, 255)), (255, 255, 255, 255));
    }

    #[test]
    fn converts_to_raylib_color() {
        let c = to_raylib(pack_color(1, 2, 3, 4));
        assert_eq!((c.r, c.g, c.b, c.a), (1, 2, 3, 4));
    }
}
