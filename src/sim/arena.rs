//! Tile grid, level layout and wall obstacles
//!
//! The grid is generated once per run and never mutated; destruction is
//! tracked on the derived [`Wall`] list instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::TILE_SIZE;
use crate::tuning::TerrainTuning;

/// Terrain of a single grid cell. The discriminant is the level data code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileKind {
    #[default]
    Empty = 0,
    Brick = 1,
    Steel = 2,
    Water = 3,
    Grass = 4,
}

impl TileKind {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TileKind::Empty),
            1 => Some(TileKind::Brick),
            2 => Some(TileKind::Steel),
            3 => Some(TileKind::Water),
            4 => Some(TileKind::Grass),
            _ => None,
        }
    }

    /// Bricks and steel block movement and shots
    pub fn is_solid(self) -> bool {
        matches!(self, TileKind::Brick | TileKind::Steel)
    }
}

/// Rectangular grid of tiles, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileGrid {
    pub cols: usize,
    pub rows: usize,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// An all-empty grid covering `width` × `height` world units
    pub fn empty(width: f32, height: f32) -> Self {
        let cols = (width / TILE_SIZE).floor() as usize;
        let rows = (height / TILE_SIZE).floor() as usize;
        Self {
            cols,
            rows,
            tiles: vec![TileKind::Empty; cols * rows],
        }
    }

    pub fn get(&self, col: usize, row: usize) -> TileKind {
        debug_assert!(col < self.cols && row < self.rows, "tile ({col}, {row}) out of grid");
        self.tiles[row * self.cols + col]
    }

    pub fn set(&mut self, col: usize, row: usize, kind: TileKind) {
        debug_assert!(col < self.cols && row < self.rows, "tile ({col}, {row}) out of grid");
        self.tiles[row * self.cols + col] = kind;
    }

    /// Fill a rectangle of cells, leaving the border ring untouched
    fn fill_interior(&mut self, col: usize, row: usize, w: usize, h: usize, kind: TileKind) {
        for y in row..row + h {
            for x in col..col + w {
                if x > 0 && x < self.cols - 1 && y > 0 && y < self.rows - 1 {
                    self.set(x, y, kind);
                }
            }
        }
    }

    /// Level data as raw codes, one row per inner vector
    pub fn codes(&self) -> Vec<Vec<u8>> {
        self.tiles
            .chunks(self.cols)
            .map(|row| row.iter().map(|t| t.code()).collect())
            .collect()
    }

    /// Tile under a world position.
    ///
    /// Positions outside the grid report [`TileKind::Steel`]: everything beyond
    /// the arena is solid boundary.
    pub fn tile_at(&self, pos: Vec2) -> TileKind {
        let tx = (pos.x / TILE_SIZE).floor();
        let ty = (pos.y / TILE_SIZE).floor();
        if !(tx >= 0.0 && ty >= 0.0 && tx < self.cols as f32 && ty < self.rows as f32) {
            return TileKind::Steel;
        }
        self.get(tx as usize, ty as usize)
    }

    /// Speed multiplier for the terrain under `pos`
    pub fn friction_at(&self, pos: Vec2, terrain: &TerrainTuning) -> f32 {
        match self.tile_at(pos) {
            TileKind::Water => terrain.water_friction,
            TileKind::Grass => terrain.grass_friction,
            _ => 1.0,
        }
    }
}

/// Build the arena layout: steel border, brick bunkers in the top corners,
/// two steel barriers, a brick cross in the middle, grass and water patches.
pub fn generate_level(width: f32, height: f32) -> TileGrid {
    let mut grid = TileGrid::empty(width, height);
    let (cols, rows) = (grid.cols, grid.rows);
    debug_assert!(cols >= 16 && rows >= 16, "arena too small for the layout");

    for x in 0..cols {
        grid.set(x, 0, TileKind::Steel);
        grid.set(x, rows - 1, TileKind::Steel);
    }
    for y in 0..rows {
        grid.set(0, y, TileKind::Steel);
        grid.set(cols - 1, y, TileKind::Steel);
    }

    // Top-left and top-right bunkers
    grid.fill_interior(3, 3, 6, 1, TileKind::Brick);
    grid.fill_interior(3, 4, 1, 4, TileKind::Brick);
    grid.fill_interior(8, 4, 1, 4, TileKind::Brick);
    grid.fill_interior(cols - 9, 3, 6, 1, TileKind::Brick);
    grid.fill_interior(cols - 9, 4, 1, 4, TileKind::Brick);
    grid.fill_interior(cols - 4, 4, 1, 4, TileKind::Brick);

    // Barriers
    grid.fill_interior(6, 9, cols - 12, 1, TileKind::Steel);
    grid.fill_interior(6, rows - 10, cols - 12, 1, TileKind::Steel);

    // Central cross
    grid.fill_interior(cols / 2 - 4, rows / 2 - 1, 8, 1, TileKind::Brick);
    grid.fill_interior(cols / 2 - 1, rows / 2 - 4, 1, 8, TileKind::Brick);

    grid.fill_interior(2, rows - 6, 5, 3, TileKind::Grass);
    grid.fill_interior(cols - 7, rows - 6, 5, 3, TileKind::Grass);
    grid.fill_interior(cols / 2 - 2, 2, 4, 2, TileKind::Water);

    grid
}

/// Durability class of a wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallKind {
    /// Destroyed once `hp` reaches zero
    Brick { hp: u8 },
    /// Indestructible
    Steel,
}

/// A solid obstacle occupying one grid cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
    pub kind: WallKind,
}

impl Wall {
    /// Tile code this wall was derived from
    pub fn tile(&self) -> TileKind {
        match self.kind {
            WallKind::Brick { .. } => TileKind::Brick,
            WallKind::Steel => TileKind::Steel,
        }
    }

    /// Remaining hit-points; `None` means indestructible
    pub fn hp(&self) -> Option<u8> {
        match self.kind {
            WallKind::Brick { hp } => Some(hp),
            WallKind::Steel => None,
        }
    }

    /// Apply one hit. Returns true if the wall is now destroyed.
    pub fn take_hit(&mut self) -> bool {
        match &mut self.kind {
            WallKind::Brick { hp } => {
                *hp = hp.saturating_sub(1);
                *hp == 0
            }
            WallKind::Steel => false,
        }
    }
}

/// One wall per brick or steel cell, in row-major order
pub fn derive_walls(grid: &TileGrid, brick_hp: u8) -> Vec<Wall> {
    let mut walls = Vec::new();
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let kind = match grid.get(col, row) {
                TileKind::Brick => WallKind::Brick { hp: brick_hp },
                TileKind::Steel => WallKind::Steel,
                _ => continue,
            };
            walls.push(Wall {
                rect: Rect::new(
                    col as f32 * TILE_SIZE,
                    row as f32 * TILE_SIZE,
                    TILE_SIZE,
                    TILE_SIZE,
                ),
                kind,
            });
        }
    }
    walls
}
