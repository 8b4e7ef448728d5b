//! Fixed-size tile map
//!
//! Tiles are mutated in place (pellets eaten) but the map is never resized.
//! Columns wrap around so that open edge tiles form a horizontal tunnel;
//! rows outside the map are solid.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Contents of one map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Pellet,
    Empty,
    GhostHouse,
    /// Player start; walkable, holds no pellet
    Spawn,
}

impl Tile {
    /// Layout digit: 1 wall, 0 pellet, 2 empty, 3 ghost house, 4 spawn
    pub fn from_digit(d: u8) -> Option<Tile> {
        match d {
            0 => Some(Tile::Pellet),
            1 => Some(Tile::Wall),
            2 => Some(Tile::Empty),
            3 => Some(Tile::GhostHouse),
            4 => Some(Tile::Spawn),
            _ => None,
        }
    }
}

/// Rectangular tile map with pixel geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    width: i32,
    height: i32,
    tile_size: f32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Build a map from digit rows; unknown digits become walls
    pub fn from_rows<const W: usize>(rows: &[[u8; W]], tile_size: f32) -> Self {
        let tiles = rows
            .iter()
            .flat_map(|row| row.iter().map(|&d| Tile::from_digit(d).unwrap_or(Tile::Wall)))
            .collect();
        Self {
            width: W as i32,
            height: rows.len() as i32,
            tile_size,
            tiles,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Width of the map in pixels
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        if cell.y < 0 || cell.y >= self.height {
            return None;
        }
        let col = cell.x.rem_euclid(self.width);
        Some((cell.y * self.width + col) as usize)
    }

    /// Tile at a cell (columns wrap, rows outside the map are walls)
    pub fn tile(&self, cell: IVec2) -> Tile {
        self.index(cell).map_or(Tile::Wall, |i| self.tiles[i])
    }

    pub fn set(&mut self, cell: IVec2, tile: Tile) {
        if let Some(i) = self.index(cell) {
            self.tiles[i] = tile;
        }
    }

    pub fn is_wall(&self, cell: IVec2) -> bool {
        self.tile(cell) == Tile::Wall
    }

    /// Cell containing a pixel position
    pub fn cell_at(&self, pos: Vec2) -> IVec2 {
        (pos / self.tile_size).floor().as_ivec2()
    }

    /// Nearest cell by rounding (used for turn snapping)
    pub fn nearest_cell(&self, pos: Vec2) -> IVec2 {
        ((pos - Vec2::splat(self.tile_size / 2.0)) / self.tile_size)
            .round()
            .as_ivec2()
    }

    /// Pixel centre of a cell
    pub fn center_of(&self, cell: IVec2) -> Vec2 {
        (cell.as_vec2() + Vec2::splat(0.5)) * self.tile_size
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// First cell holding `tile`, scanning rows top to bottom
    pub fn find(&self, tile: Tile) -> Option<IVec2> {
        self.tiles
            .iter()
            .position(|&t| t == tile)
            .map(|i| IVec2::new(i as i32 % self.width, i as i32 / self.width))
    }

    /// Row-major snapshot for renderers
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
