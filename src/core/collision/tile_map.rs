//=========================================================================
// Tile Map
//=========================================================================
//
// Grid of tile ids with a solid-id set, queried in Y-up world space.
//
// Storage is row-major with row 0 at the TOP of the map (the order the
// text format is written in); queries flip Y so world y = 0 is the
// bottom edge. Anything outside the grid is solid.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::contracts::SolidityQuery;
use crate::core::error::{CoreError, CoreResult};
use crate::core::geometry::Rect;

/// Tile id used for walls by [`TileMap::walled`].
pub const WALL_TILE: u16 = 32;

/// Tile id used for open floor by [`TileMap::walled`].
pub const FLOOR_TILE: u16 = 0;

//=== TileMap =============================================================

#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    width: usize,
    height: usize,
    tile_size: f32,
    tiles: Vec<u16>,
    solid: HashSet<u16>,
}

impl TileMap {
    //--- Construction -----------------------------------------------------

    /// Builds a map from top-to-bottom rows. All rows must share a width.
    pub fn from_rows<I>(rows: Vec<Vec<u16>>, tile_size: f32, solid: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = u16>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if let Some(line) = rows.iter().position(|row| row.len() != width) {
            return Err(CoreError::MapFormat {
                line: line + 1,
                reason: format!("expected {} tiles, found {}", width, rows[line].len()),
            });
        }

        Ok(Self {
            width,
            height,
            tile_size,
            tiles: rows.into_iter().flatten().collect(),
            solid: solid.into_iter().collect(),
        })
    }

    /// Parses whitespace-separated tile ids, one row per non-blank line.
    pub fn parse<I>(text: &str, tile_size: f32, solid: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = u16>,
    {
        let mut rows = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let row = line
                .split_whitespace()
                .map(|token| {
                    token.parse::<u16>().map_err(|_| CoreError::MapFormat {
                        line: index + 1,
                        reason: format!("bad tile `{}`", token),
                    })
                })
                .collect::<CoreResult<Vec<u16>>>()?;

            rows.push(row);
        }

        let map = Self::from_rows(rows, tile_size, solid)?;
        debug!("Parsed tile map: {}x{} tiles", map.width, map.height);
        Ok(map)
    }

    /// A map with no tiles: every query is out of bounds, hence solid.
    pub fn empty(tile_size: f32) -> Self {
        Self {
            width: 0,
            height: 0,
            tile_size,
            tiles: Vec::new(),
            solid: HashSet::new(),
        }
    }

    /// Floor surrounded by a one-tile wall ring.
    pub fn walled(width: usize, height: usize, tile_size: f32) -> Self {
        let tiles = (0..height)
            .flat_map(|row| {
                (0..width).map(move |col| {
                    let edge = row == 0 || col == 0 || row + 1 == height || col + 1 == width;
                    if edge { WALL_TILE } else { FLOOR_TILE }
                })
            })
            .collect();

        Self {
            width,
            height,
            tile_size,
            tiles,
            solid: HashSet::from([WALL_TILE]),
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World-space extent of the map.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    /// Tile id under a world-space point, `None` outside the map.
    pub fn tile_at(&self, x: f32, y: f32) -> Option<u16> {
        let bounds = self.bounds();
        if x < bounds.left() || x >= bounds.right() || y < bounds.bottom() || y >= bounds.top() {
            return None;
        }

        let col = (x / self.tile_size) as usize;
        let row_from_bottom = (y / self.tile_size) as usize;
        let row = self.height.checked_sub(row_from_bottom + 1)?;

        if col < self.width {
            self.tiles.get(row * self.width + col).copied()
        } else {
            None
        }
    }

    /// Iterates `(col, row_from_bottom, id)` for every tile.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, u16)> + '_ {
        self.tiles.iter().enumerate().map(move |(index, &id)| {
            let row = index / self.width.max(1);
            (index % self.width.max(1), self.height - 1 - row, id)
        })
    }

    pub fn is_solid_tile(&self, id: u16) -> bool {
        self.solid.contains(&id)
    }
}

//=== SolidityQuery =======================================================

impl SolidityQuery for TileMap {
    fn is_solid(&self, x: f32, y: f32) -> bool {
        match self.tile_at(x, y) {
            Some(id) => self.is_solid_tile(id),
            None => true,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
