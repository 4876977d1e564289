use raylib::prelude::Texture2D;
use raylib::core::texture::RaylibTexture2D;

use tracing::warn;

use crate::core::tilemap::{TileId, TileMap, EMPTY};
use crate::error::{RaycastError, Result};
use crate::render::color::{self, Pixel};

/// Pixel range `[start, end)` covered by cell `index` when `count` cells are
/// spread over `extent` pixels. The last cell absorbs the remainder so the
/// whole extent is covered.
#[inline]
pub fn cell_span(index: usize, count: usize, extent: usize) -> (usize, usize) {
    let size = (extent / count).max(1);
    let start = (index * size).min(extent);
    let end = if index + 1 == count { extent } else { ((index + 1) * size).min(extent) };
    (start, end)
}

/// Row-major index of `(x, y)`, computed in `usize` so large buffers cannot
/// overflow `u32`.
#[inline]
fn pixel_index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

pub struct Framebuffer {
    pub color_buffer: Vec<Pixel>,
    pub width: u32,
    pub height: u32,
    pub background_color: Pixel,
    pub current_color: Pixel,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        let bg = color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
            current_color: color::WHITE,
        }
    }

    /// Wraps an existing pixel vector, checking its length.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(RaycastError::BufferSize { expected, actual: pixels.len() });
        }
        Ok(Self {
            color_buffer: pixels,
            width,
            height,
            background_color: color::BLACK,
            current_color: color::WHITE,
        })
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.color_buffer[pixel_index(self.width, x, y)] = self.current_color;
        }
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Pixel) {
        if x < self.width && y < self.height {
            self.color_buffer[pixel_index(self.width, x, y)] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        if x < self.width && y < self.height {
            return self.color_buffer[pixel_index(self.width, x, y)];
        }
        self.background_color
    }

    #[inline] pub fn set_current_color(&mut self, c: Pixel) { self.current_color = c; }

    /// Fills `[x0, x1) × [y0, y1)`, clipped to the buffer.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Pixel) {
        let (x1, y1) = (x1.min(self.width), y1.min(self.height));
        for y in y0..y1 {
            if x0 < x1 {
                let row = pixel_index(self.width, 0, y);
                self.color_buffer[row + x0 as usize..row + x1 as usize].fill(color);
            }
        }
    }

    /// Fills rows `[y0, y1)` of column `x`.
    #[inline]
    pub fn fill_column(&mut self, x: u32, y0: u32, y1: u32, color: Pixel) {
        if x >= self.width {
            return;
        }
        for y in y0..y1.min(self.height) {
            self.color_buffer[pixel_index(self.width, x, y)] = color;
        }
    }

    /// Copies the pixels into `out` as RGBA8 bytes.
    pub fn write_rgba_bytes(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.color_buffer.len() * 4);
        for &p in &self.color_buffer {
            let (r, g, b, a) = color::unpack_color(p);
            out.extend_from_slice(&[r, g, b, a]);
        }
    }

    /// Uploads the pixels into a persistent RGBA8 texture, reusing `scratch`.
    pub fn upload_to_texture(&self, tex: &mut Texture2D, scratch: &mut Vec<u8>) {
        self.write_rgba_bytes(scratch);
        if let Err(e) = tex.update_texture(&scratch[..]) {
            warn!(error = %e, "Texture upload failed, frame not presented");
        }
    }
}

/// Tile ids rasterized at framebuffer resolution.
///
/// The ray caster and the movement code sample this instead of reading
/// colors back out of a rendered image, so overlays drawn into a
/// [`Framebuffer`] can never be mistaken for walls.
pub struct TileLayer {
    pub width: u32,
    pub height: u32,
    ids: Vec<TileId>,
}

impl TileLayer {
    pub fn rasterize(map: &TileMap, width: u32, height: u32) -> Self {
        let (w, h) = (width as usize, height as usize);
        let mut ids = vec![EMPTY; w * h];
        for j in 0..map.height() {
            let (y0, y1) = cell_span(j, map.height(), h);
            for i in 0..map.width() {
                let (x0, x1) = cell_span(i, map.width(), w);
                let id = map.tiles()[j * map.width() + i];
                for y in y0..y1 {
                    ids[y * w + x0..y * w + x1].fill(id);
                }
            }
        }
        Self { width, height, ids }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<TileId> {
        if x < self.width && y < self.height {
            Some(self.ids[pixel_index(self.width, x, y)])
        } else {
            None
        }
    }

    /// Tile id under a continuous sample point; `None` outside the layer.
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> Option<TileId> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        self.get(x as u32, y as u32)
    }

    /// Points outside the layer count as solid.
    #[inline]
    pub fn is_solid_at(&self, x: f32, y: f32) -> bool {
        self.sample(x, y).is_none_or(|id| id != EMPTY)
    }
}
