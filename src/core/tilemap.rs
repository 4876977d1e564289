//! Tile map loading and tile classification.
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{RaycastError, Result};
use crate::render::color::{self, Pixel};

pub type TileId = u16;

/// Tile id of traversable, empty cells. Every other id is solid.
pub const EMPTY: TileId = 0;

/// Immutable id → color table. Built once at startup and shared by reference.
#[derive(Clone, Debug)]
pub struct TilePalette {
    colors: HashMap<TileId, Pixel>,
    fallback: Pixel,
}

impl TilePalette {
    pub fn new(fallback: Pixel) -> Self {
        Self { colors: HashMap::new(), fallback }
    }

    pub fn with(mut self, id: TileId, color: Pixel) -> Self {
        self.colors.insert(id, color);
        self
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.colors.contains_key(&id)
    }

    /// Color for `id`, or the palette's fallback color when `id` is unknown.
    /// Maps are checked with [`TileMap::validate_against`] before rendering,
    /// so the fallback only shows up for hand-built maps.
    #[inline]
    pub fn color(&self, id: TileId) -> Pixel {
        self.colors.get(&id).copied().unwrap_or(self.fallback)
    }

    pub fn try_color(&self, id: TileId) -> Result<Pixel> {
        self.colors.get(&id).copied().ok_or(RaycastError::UnknownTile(id))
    }
}

impl Default for TilePalette {
    fn default() -> Self {
        Self::new(color::MAGENTA)
            .with(EMPTY, color::YELLOW)
            .with(1, color::LIGHT_GREEN)
            .with(2, color::rgb(90, 120, 200))
            .with(3, color::rgb(200, 90, 70))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    width: usize,
    height: usize,
    tiles: Vec<TileId>,
}

impl TileMap {
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<TileId>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RaycastError::EmptyMap);
        }
        match width.checked_mul(height) {
            Some(expected) if expected == tiles.len() => {}
            expected => {
                return Err(RaycastError::BufferSize { expected: expected.unwrap_or(usize::MAX), actual: tiles.len() });
            }
        }
        Ok(Self { width, height, tiles })
    }

    /// Parses one row per line. Numbers may be separated by any non-digit
    /// characters; lines without numbers are skipped. Every row must hold
    /// as many tiles as the first one.
    pub fn parse(src: &str) -> Result<Self> {
        let mut tiles = Vec::new();
        let mut width = 0;
        let mut height = 0;

        for (line_no, line) in src.lines().enumerate() {
            let before = tiles.len();
            for digits in line.split(|c: char| !c.is_ascii_digit()).filter(|s| !s.is_empty()) {
                let id = digits
                    .parse::<TileId>()
                    .map_err(|_| RaycastError::InvalidTile(digits.to_string()))?;
                tiles.push(id);
            }
            let count = tiles.len() - before;
            if count == 0 {
                continue;
            }
            if height == 0 {
                width = count;
            } else if count != width {
                return Err(RaycastError::RaggedMap { line: line_no + 1, expected: width, actual: count });
            }
            height += 1;
        }

        if height == 0 {
            return Err(RaycastError::EmptyMap);
        }
        Self::from_tiles(width, height, tiles)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let src = fs::read_to_string(path)
            .map_err(|source| RaycastError::Io { path: path.to_path_buf(), source })?;
        let map = Self::parse(&src)?;
        info!(path = %path.display(), width = map.width, height = map.height, "Loaded tile map");
        Ok(map)
    }

    /// Fails with the first tile id the palette cannot color.
    pub fn validate_against(&self, palette: &TilePalette) -> Result<()> {
        match self.tiles.iter().find(|&&id| !palette.contains(id)) {
            Some(&id) => Err(RaycastError::UnknownTile(id)),
            None => {
                debug!(tiles = self.tiles.len(), "All map tiles have palette colors");
                Ok(())
            }
        }
    }

    #[inline] pub fn width(&self) -> usize { self.width }
    #[inline] pub fn height(&self) -> usize { self.height }
    #[inline] pub fn tiles(&self) -> &[TileId] { &self.tiles }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<TileId> {
        if i < self.width && j < self.height {
            Some(self.tiles[j * self.width + i])
        } else {
            None
        }
    }

    /// Cells outside the grid count as solid.
    #[inline]
    pub fn is_solid(&self, i: usize, j: usize) -> bool {
        self.get(i, j).is_none_or(|id| id != EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_by_two() {
        let map = TileMap::parse("0 1\n1 0\n").unwrap();
        assert_eq!(map.width(), 2);
        assert_eq!(map.height(), 2);
        assert_eq!(map.tiles(), &[0, 1, 1, 0]);
    }

    #[test]
    fn accepts_any_separator() {
        let map = TileMap::parse("1,1,1\n1;0;12\r\n1|1|1").unwrap();
        assert_eq!((map.width(), map.height()), (3, 3));
        assert_eq!(map.get(2, 1), Some(12));
    }

    #[test]
    fn skips_blank_lines() {
        let map = TileMap::parse("\n1 1\n\n0 1\n   \n").unwrap();
        assert_eq!((map.width(), map.height()), (2, 2));
    }

    #[test]
    fn empty_source_is_an_error() {
        assert!(matches!(TileMap::parse(""), Err(RaycastError::EmptyMap)));
        assert!(matches!(TileMap::parse("\n  ,,\n"), Err(RaycastError::EmptyMap)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = TileMap::parse("1 1 1\n1 0\n").unwrap_err();
        match err {
            RaycastError::RaggedMap { line, expected, actual } => {
                assert_eq!((line, expected, actual), (2, 3, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn oversized_number_is_rejected() {
        assert!(matches!(TileMap::parse("1 99999999"), Err(RaycastError::InvalidTile(_))));
    }

    #[test]
    fn out_of_grid_is_solid() {
        let map = TileMap::parse("0 0\n0 0").unwrap();
        assert!(!map.is_solid(1, 1));
        assert!(map.is_solid(2, 0));
        assert!(map.is_solid(0, 2));
    }

    #[test]
    fn palette_lookup_and_fallback() {
        let palette = TilePalette::new(color::MAGENTA).with(0, color::rgb(0, 255, 0));
        assert_eq!(palette.color(0), color::rgb(0, 255, 0));
        assert_eq!(palette.color(7), color::MAGENTA);
        assert!(matches!(palette.try_color(7), Err(RaycastError::UnknownTile(7))));
    }

    #[test]
    fn validation_reports_unknown_tiles() {
        let map = TileMap::parse("0 1\n1 9").unwrap();
        let palette = TilePalette::default();
        assert!(matches!(map.validate_against(&palette), Err(RaycastError::UnknownTile(9))));
        let ok = TileMap::parse("0 1\n1 0").unwrap();
        assert!(ok.validate_against(&palette).is_ok());
    }

    #[test]
    fn missing_file_reports_its_path() {
        let path = std::env::temp_dir().join("tile_raycaster_no_such_map.txt");
        match TileMap::load(&path) {
            Err(RaycastError::Io { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn loads_from_disk() {
        let path = std::env::temp_dir().join(format!("tile_raycaster_map_{}.txt", std::process::id()));
        std::fs::write(&path, "1 1
1 0
").unwrap();
        let map = TileMap::load(&path);
        std::fs::remove_file(&path).ok();
        assert_eq!(map.unwrap().tiles(), &[1, 1, 1, 0]);
    }

    #[test]
    fn from_tiles_checks_length() {
        assert!(TileMap::from_tiles(2, 2, vec![0; 3]).is_err());
        assert!(TileMap::from_tiles(0, 2, vec![]).is_err());
    }
}
