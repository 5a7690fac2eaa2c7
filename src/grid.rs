//! Tile coordinates and their mapping onto screen cells.

use crate::TermInt;

/// A tile on the board. The playable area is `1..width` x `1..height`; row and
/// column zero belong to the border.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: TermInt,
    pub y: TermInt,
}

impl Position {
    pub const fn new(x: TermInt, y: TermInt) -> Self {
        Position { x, y }
    }
}

/// Board dimensions in tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub width: TermInt,
    pub height: TermInt,
}

impl GridSize {
    pub const fn new(width: TermInt, height: TermInt) -> Self {
        GridSize { width, height }
    }

    /// Whether `pos` lies strictly inside the border.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x > 0 && pos.y > 0 && pos.x < self.width && pos.y < self.height
    }

    /// Number of playable tiles.
    pub fn playable_tiles(&self) -> usize {
        (self.width.saturating_sub(1) as usize) * (self.height.saturating_sub(1) as usize)
    }
}

/// A screen coordinate, in whatever unit the host draws with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelPos {
    pub x: TermInt,
    pub y: TermInt,
}

/// Affine tile-to-screen transform: `pixel = position * tile_size + nudge`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    pub tile_width: TermInt,
    pub tile_height: TermInt,
    pub nudge: PixelPos,
}

impl GridGeometry {
    pub fn new(tile_width: TermInt, tile_height: TermInt, nudge: PixelPos) -> Self {
        GridGeometry { tile_width, tile_height, nudge }
    }

    /// Picks a nudge that centers a `grid` (border included) inside a screen of
    /// `screen` cells. Returns `None` if it doesn't fit, reserving `reserved_rows`
    /// at the bottom.
    pub fn centered(
        grid: GridSize,
        tile_width: TermInt,
        tile_height: TermInt,
        screen: (TermInt, TermInt),
        reserved_rows: TermInt,
    ) -> Option<Self> {
        let board_w = (grid.width as u32 + 1) * tile_width as u32;
        let board_h = (grid.height as u32 + 1) * tile_height as u32;
        let avail_h = screen.1.checked_sub(reserved_rows)? as u32;

        if board_w > screen.0 as u32 || board_h > avail_h {
            return None;
        }

        let nudge = PixelPos {
            x: ((screen.0 as u32 - board_w) / 2) as TermInt,
            y: ((avail_h - board_h) / 2) as TermInt,
        };
        Some(GridGeometry::new(tile_width, tile_height, nudge))
    }

    pub fn to_pixel(&self, pos: Position) -> PixelPos {
        to_pixel(pos, self.tile_width, self.tile_height, self.nudge)
    }
}

pub fn to_pixel(pos: Position, tile_width: TermInt, tile_height: TermInt, nudge: PixelPos) -> PixelPos {
    PixelPos {
        x: pos.x * tile_width + nudge.x,
        y: pos.y * tile_height + nudge.y,
    }
}
