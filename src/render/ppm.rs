//! PPM image dumps (binary `P6` and ASCII `P3`).
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{RaycastError, Result};
use crate::render::color::{pack_color, unpack_color};
use crate::render::framebuffer::Framebuffer;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PpmFormat {
    /// ASCII triples, one image row per line
    P3,
    /// Binary RGB triples
    #[default]
    P6,
}

impl FromStr for PpmFormat {
    type Err = RaycastError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "P3" => Ok(Self::P3),
            "P6" => Ok(Self::P6),
            other => Err(RaycastError::UnsupportedPpmFormat(other.to_string())),
        }
    }
}

impl fmt::Display for PpmFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::P3 => "P3",
            Self::P6 => "P6",
        })
    }
}

/// Writes `fb` as a PPM image. Alpha is dropped.
pub fn write_ppm<W: Write>(out: &mut W, fb: &Framebuffer, format: PpmFormat) -> Result<()> {
    let expected = fb.width as usize * fb.height as usize;
    if fb.color_buffer.len() != expected {
        return Err(RaycastError::BufferSize { expected, actual: fb.color_buffer.len() });
    }

    write!(out, "{}\n{} {}\n255\n", format, fb.width, fb.height)?;
    match format {
        PpmFormat::P6 => {
            for &p in &fb.color_buffer {
                let (r, g, b, _) = unpack_color(p);
                out.write_all(&[r, g, b])?;
            }
        }
        PpmFormat::P3 => {
            for row in fb.color_buffer.chunks(fb.width.max(1) as usize) {
                for &p in row {
                    let (r, g, b, _) = unpack_color(p);
                    write!(out, "{} {} {} ", r, g, b)?;
                }
                out.write_all(b"\n")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

pub fn save_ppm<P: AsRef<Path>>(path: P, fb: &Framebuffer, format: PpmFormat) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source: std::io::Error| RaycastError::Io { path: path.to_path_buf(), source };
    let file = File::create(path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    match write_ppm(&mut out, fb, format) {
        Err(RaycastError::Stream(source)) => return Err(io_err(source)),
        other => other?,
    }
    info!(path = %path.display(), %format, width = fb.width, height = fb.height, "Saved PPM image");
    Ok(())
}

/// Red increasing downwards, green increasing to the right. Handy for
/// checking channel order of a dump.
pub fn gradient(width: u32, height: u32) -> Framebuffer {
    let mut fb = Framebuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let r = (255.0 * y as f32 / height as f32) as u8;
            let g = (255.0 * x as f32 / width as f32) as u8;
            fb.set_pixel_color(x, y, pack_color(r, g, 0, 255));
        }
    }
    fb
}
