use serde::{Deserialize, Serialize};

use crate::*;

/// Position in the host's screen space, in pixels.
pub type ScreenPos = (i32, i32);

/// Tile edge length used when a grid is created without explicit geometry.
pub const DEFAULT_TILE_SIZE: i32 = 16;

/// Axis-aligned rectangle in screen space, `left`/`top` inclusive, `right`/`bottom` exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ScreenRect {
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub const fn contains(&self, (x, y): ScreenPos) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

/// Where the field sits on screen and how large each tile is drawn.
///
/// Only used to translate pointer positions into grid coordinates, the grid logic itself
/// never looks at it. Construction guarantees a field of the largest board size fits in
/// screen coordinates, so tile positions never overflow.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldGeometry {
    origin: ScreenPos,
    tile_size: i32,
}

impl FieldGeometry {
    pub fn new(origin: ScreenPos, tile_size: i32) -> Result<Self> {
        if tile_size <= 0 {
            return Err(GameError::InvalidTileSize);
        }
        let extent = i32::from(Coord::MAX)
            .checked_mul(tile_size)
            .ok_or(GameError::InvalidTileSize)?;
        if origin.0.checked_add(extent).is_none() || origin.1.checked_add(extent).is_none() {
            return Err(GameError::FieldOutOfRange);
        }
        Ok(Self { origin, tile_size })
    }

    /// Geometry placing a field of `size` tiles centered on `center`.
    pub fn centered(center: ScreenPos, size: Coord2, tile_size: i32) -> Result<Self> {
        let field_w = i32::from(size.0)
            .checked_mul(tile_size)
            .ok_or(GameError::InvalidTileSize)?;
        let field_h = i32::from(size.1)
            .checked_mul(tile_size)
            .ok_or(GameError::InvalidTileSize)?;
        let origin = (
            center.0.checked_sub(field_w / 2).ok_or(GameError::FieldOutOfRange)?,
            center.1.checked_sub(field_h / 2).ok_or(GameError::FieldOutOfRange)?,
        );
        Self::new(origin, tile_size)
    }

    pub fn origin(&self) -> ScreenPos {
        self.origin
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Tile under `pos`, rounding towards negative infinity. May lie outside any board.
    ///
    /// Computed in `i64` so positions anywhere in screen space translate without overflow.
    pub fn screen_to_tile(&self, (x, y): ScreenPos) -> (i64, i64) {
        let tile_size = i64::from(self.tile_size);
        (
            (i64::from(x) - i64::from(self.origin.0)).div_euclid(tile_size),
            (i64::from(y) - i64::from(self.origin.1)).div_euclid(tile_size),
        )
    }

    /// Grid coordinates under `pos`, `None` when the position is off a board of `size`.
    pub fn screen_to_grid(&self, pos: ScreenPos, size: Coord2) -> Option<Coord2> {
        let (tx, ty) = self.screen_to_tile(pos);
        let coords = (Coord::try_from(tx).ok()?, Coord::try_from(ty).ok()?);
        in_bounds(coords, size).then_some(coords)
    }

    /// Top-left pixel of the tile at `coords`, in range for any `Coord2` by construction.
    pub fn tile_origin(&self, (x, y): Coord2) -> ScreenPos {
        (
            self.origin.0 + i32::from(x) * self.tile_size,
            self.origin.1 + i32::from(y) * self.tile_size,
        )
    }

    pub fn field_rect(&self, size: Coord2) -> ScreenRect {
        let (right, bottom) = self.tile_origin(size);
        ScreenRect {
            left: self.origin.0,
            top: self.origin.1,
            right,
            bottom,
        }
    }
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            origin: (0, 0),
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}
