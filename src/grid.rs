use serde::{Deserialize, Serialize};

use crate::input::Direction;

/// Logical grid dimensions in cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Returns the center cell, rounding toward the origin on odd sizes.
    #[must_use]
    pub fn center(self) -> Position {
        Position {
            x: i32::from(self.width / 2),
            y: i32::from(self.height / 2),
        }
    }

    /// Iterates over every cell, row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (0..i32::from(self.height))
            .flat_map(move |y| (0..i32::from(self.width)).map(move |x| Position { x, y }))
    }
}

/// Grid cell in logical coordinates, not pixels.
///
/// Coordinates are signed so that a head stepping off the board under the
/// stop policy is still representable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell one step in `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }

    /// Scales the cell to the top-left corner of its on-screen rectangle.
    #[must_use]
    pub fn scaled(self, cell_width: u16, cell_height: u16) -> (i64, i64) {
        (
            i64::from(self.x) * i64::from(cell_width),
            i64::from(self.y) * i64::from(cell_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Direction;

    use super::{GridSize, Position};

    const GRID: GridSize = GridSize {
        width: 10,
        height: 8,
    };

    #[test]
    fn wrapping_keeps_coordinates_inside_bounds() {
        assert_eq!(Position::new(-1, 3).wrapped(GRID), Position::new(9, 3));
        assert_eq!(Position::new(4, 8).wrapped(GRID), Position::new(4, 0));
        assert_eq!(Position::new(10, -1).wrapped(GRID), Position::new(0, 7));
        assert_eq!(Position::new(-21, 17).wrapped(GRID), Position::new(9, 1));
    }

    #[test]
    fn bounds_check_is_half_open() {
        assert!(Position::new(0, 0).is_within_bounds(GRID));
        assert!(Position::new(9, 7).is_within_bounds(GRID));
        assert!(!Position::new(10, 7).is_within_bounds(GRID));
        assert!(!Position::new(9, 8).is_within_bounds(GRID));
        assert!(!Position::new(-1, 0).is_within_bounds(GRID));
    }

    #[test]
    fn offset_follows_direction_vectors() {
        let origin = Position::new(5, 5);

        assert_eq!(origin.offset(Direction::Right), Position::new(6, 5));
        assert_eq!(origin.offset(Direction::Left), Position::new(4, 5));
        assert_eq!(origin.offset(Direction::Down), Position::new(5, 6));
        assert_eq!(origin.offset(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn center_and_cell_enumeration() {
        assert_eq!(GRID.center(), Position::new(5, 4));
        assert_eq!(GRID.cells().count(), GRID.total_cells());
        assert_eq!(GRID.cells().next(), Some(Position::new(0, 0)));
        assert_eq!(GRID.cells().last(), Some(Position::new(9, 7)));
    }

    #[test]
    fn scaling_multiplies_by_cell_size() {
        assert_eq!(Position::new(3, 2).scaled(20, 20), (60, 40));
        assert_eq!(Position::new(3, 2).scaled(2, 1), (6, 2));
    }
}
