use rand::Rng;
use tracing::warn;

use crate::grid::{GridSize, Position};

/// Draws before giving up and accepting an occupied tile.
pub const PLACEMENT_ATTEMPTS: usize = 32;

/// Picks a uniformly random playable tile that `is_occupied` rejects, trying at
/// most [`PLACEMENT_ATTEMPTS`] times. On a (nearly) full board the last draw is
/// returned even if it overlaps.
pub fn place_fruit<R, F>(rng: &mut R, grid: GridSize, is_occupied: F) -> Position
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    let mut candidate = random_tile(rng, grid);

    for _ in 1..PLACEMENT_ATTEMPTS {
        if !is_occupied(candidate) {
            return candidate;
        }
        candidate = random_tile(rng, grid);
    }

    if is_occupied(candidate) {
        warn!(x = candidate.x, y = candidate.y, "no free tile found, fruit overlaps the snake");
    }
    candidate
}

fn random_tile<R: Rng + ?Sized>(rng: &mut R, grid: GridSize) -> Position {
    Position::new(rng.gen_range(1..grid.width), rng.gen_range(1..grid.height))
}
