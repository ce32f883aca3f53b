use std::collections::{HashMap, VecDeque};

use crate::config::WallCollision;
use crate::grid::{GridSize, Position};
use crate::input::{Direction, direction_change_is_valid};

/// Movement parameters fixed for the lifetime of one round.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SnakeRules {
    pub grid: GridSize,
    pub wall_collision: WallCollision,
    pub step_interval_ms: u64,
    pub initial_length: usize,
}

/// Snake body, steering, and time-gated movement.
///
/// The body is a deque with the head at the front. A per-cell occupancy count
/// is kept alongside it so overlap checks stay O(1) per step.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    occupancy: HashMap<Position, usize>,
    overlaps: usize,
    /// Direction the next step will take.
    direction: Direction,
    /// Direction the last step took. Reversal is judged against this.
    heading: Direction,
    growth_target: usize,
    last_step_ms: u64,
    rules: SnakeRules,
}

impl Snake {
    /// Creates a one-cell snake at the grid center heading right.
    #[must_use]
    pub fn new(rules: SnakeRules, now_ms: u64) -> Self {
        let mut snake = Self::from_segments(vec![rules.grid.center()], Direction::Right, rules);
        snake.reset(rules, now_ms);
        snake
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The growth target equals the segment count, so the body keeps its
    /// length until [`Snake::grow`] is called.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction, rules: SnakeRules) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        let mut snake = Self {
            body: VecDeque::with_capacity(segments.len()),
            occupancy: HashMap::new(),
            overlaps: 0,
            direction,
            heading: direction,
            growth_target: segments.len(),
            last_step_ms: 0,
            rules,
        };
        for segment in segments {
            snake.push_back(segment);
        }
        snake
    }

    /// Puts the snake back to its round-start state under `rules`.
    pub fn reset(&mut self, rules: SnakeRules, now_ms: u64) {
        self.body.clear();
        self.occupancy.clear();
        self.overlaps = 0;
        self.rules = rules;
        self.push_front(rules.grid.center());
        self.direction = Direction::Right;
        self.heading = Direction::Right;
        self.growth_target = rules.initial_length;
        self.last_step_ms = now_ms;
    }

    /// Steers the snake. Reversals of the current heading are ignored; among
    /// accepted changes before a step, the last one wins.
    ///
    /// The check is against the last executed step, not the pending direction,
    /// so Up then Down from a rightward heading ends up going Down.
    ///
    /// Returns whether the change was accepted.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.heading, direction) {
            return false;
        }

        self.direction = direction;
        true
    }

    /// Advances one cell if more than the step interval has elapsed since the
    /// last step. Returns whether a step happened.
    pub fn step(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_step_ms) <= self.rules.step_interval_ms {
            return false;
        }
        self.last_step_ms = now_ms;

        let mut next_head = self.head().offset(self.direction);
        if self.rules.wall_collision == WallCollision::Wrap {
            next_head = next_head.wrapped(self.rules.grid);
        }

        self.push_front(next_head);
        if self.body.len() > self.growth_target {
            self.pop_back();
        }
        self.heading = self.direction;

        true
    }

    /// Raises the growth target by one; the body catches up on later steps.
    pub fn grow(&mut self) {
        self.growth_target += 1;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.occupancy.contains_key(&position)
    }

    /// Returns true when two or more segments share a cell.
    #[must_use]
    pub fn has_self_collision(&self) -> bool {
        self.overlaps > 0
    }

    /// Number of distinct in-bounds cells covered by the body.
    #[must_use]
    pub fn occupied_cells_within(&self, grid: GridSize) -> usize {
        self.occupancy
            .keys()
            .filter(|cell| cell.is_within_bounds(grid))
            .count()
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn growth_target(&self) -> usize {
        self.growth_target
    }

    /// Returns the direction the next step will take.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction of the most recent step.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    #[must_use]
    pub fn rules(&self) -> SnakeRules {
        self.rules
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    fn push_front(&mut self, cell: Position) {
        self.body.push_front(cell);
        self.occupy(cell);
    }

    fn push_back(&mut self, cell: Position) {
        self.body.push_back(cell);
        self.occupy(cell);
    }

    fn pop_back(&mut self) {
        let Some(cell) = self.body.pop_back() else {
            return;
        };

        if let Some(count) = self.occupancy.get_mut(&cell) {
            *count -= 1;
            if *count == 0 {
                self.occupancy.remove(&cell);
            } else {
                self.overlaps -= 1;
            }
        }
    }

    fn occupy(&mut self, cell: Position) {
        let count = self.occupancy.entry(cell).or_insert(0);
        *count += 1;
        if *count > 1 {
            self.overlaps += 1;
        }
    }
}
