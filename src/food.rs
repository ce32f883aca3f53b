use rand::Rng;

use crate::grid::{GridSize, Position};
use crate::snake::Snake;

/// The single food cell on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Creates food at a fixed `position`.
    #[must_use]
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Spawns food in a cell the snake does not occupy.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: GridSize, snake: &Snake) -> Self {
        Self::at(spawn_position(rng, grid, snake))
    }

    /// Moves the food to a fresh cell the snake does not occupy.
    pub fn respawn<R: Rng + ?Sized>(&mut self, rng: &mut R, grid: GridSize, snake: &Snake) {
        self.position = spawn_position(rng, grid, snake);
    }
}

/// Samples uniformly random cells until one is not covered by the snake.
///
/// # Panics
///
/// Panics when the snake covers every cell of the grid, since no cell could
/// ever be accepted. Settings validation keeps round starts clear of that.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(rng: &mut R, grid: GridSize, snake: &Snake) -> Position {
    assert!(
        snake.occupied_cells_within(grid) < grid.total_cells(),
        "spawn_position: no free cells on the board ({}×{})",
        grid.width,
        grid.height,
    );

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(grid.width)),
            y: rng.gen_range(0..i32::from(grid.height)),
        };
        if !snake.occupies(candidate) {
            return candidate;
        }
    }
}
