use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{POINTS_PER_FOOD, Settings, WallCollision};
use crate::food::Food;
use crate::grid::{GridSize, Position};
use crate::input::Direction;
use crate::snake::{Snake, SnakeRules};

/// Result of one simulation tick.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    Continue,
    GameOver,
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    /// The body covers every cell, leaving nowhere to put the next food.
    BoardFull,
}

/// Colour role of a drawn cell; the renderer resolves it to a real colour.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Paint {
    Snake,
    Food,
}

/// Presentation-agnostic draw instruction.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DrawCommand {
    Cell { cell: Position, paint: Paint },
    Score(u32),
}

/// One round of play: snake, food, and score.
#[derive(Debug, Clone)]
pub struct Round {
    pub snake: Snake,
    pub food: Food,
    score: u32,
    death_reason: Option<DeathReason>,
    rng: StdRng,
}

impl Round {
    /// Starts a round with entropy-seeded food placement.
    #[must_use]
    pub fn new(settings: &Settings, now_ms: u64) -> Self {
        Self::with_rng(settings, StdRng::from_entropy(), now_ms)
    }

    /// Creates a deterministic round for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(settings: &Settings, seed: u64, now_ms: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed), now_ms)
    }

    fn with_rng(settings: &Settings, mut rng: StdRng, now_ms: u64) -> Self {
        let snake = Snake::new(settings.snake_rules(), now_ms);
        let food = Food::spawn(&mut rng, settings.grid_size(), &snake);

        Self {
            snake,
            food,
            score: 0,
            death_reason: None,
            rng,
        }
    }

    /// Resets snake, food and score for a new round under `settings`.
    pub fn restart(&mut self, settings: &Settings, now_ms: u64) {
        self.snake.reset(settings.snake_rules(), now_ms);
        self.food
            .respawn(&mut self.rng, settings.grid_size(), &self.snake);
        self.score = 0;
        self.death_reason = None;
    }

    /// Forwards a steering request to the snake.
    pub fn steer(&mut self, direction: Direction) {
        if !self.snake.change_direction(direction) {
            tracing::debug!(?direction, heading = ?self.snake.heading(), "reversal ignored");
        }
    }

    /// Advances the round by one frame.
    ///
    /// Food is resolved before collisions, so a step that eats and collides
    /// at once still scores before the round ends.
    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        if self.death_reason.is_some() {
            return TickOutcome::GameOver;
        }

        self.snake.step(now_ms);

        let grid = self.grid();
        let head = self.snake.head();
        if head == self.food.position {
            self.snake.grow();
            self.score += POINTS_PER_FOOD;
            if self.snake.occupied_cells_within(grid) == grid.total_cells() {
                let reason = if self.snake.has_self_collision() {
                    DeathReason::SelfCollision
                } else {
                    DeathReason::BoardFull
                };
                return self.end(reason);
            }
            self.food.respawn(&mut self.rng, grid, &self.snake);
            tracing::debug!(
                x = head.x,
                y = head.y,
                score = self.score,
                growth_target = self.snake.growth_target(),
                "food eaten"
            );
        }

        if self.snake.has_self_collision() {
            return self.end(DeathReason::SelfCollision);
        }

        if self.rules().wall_collision == WallCollision::Stop && !head.is_within_bounds(grid) {
            return self.end(DeathReason::WallCollision);
        }

        TickOutcome::Continue
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn death_reason(&self) -> Option<DeathReason> {
        self.death_reason
    }

    #[must_use]
    pub fn rules(&self) -> SnakeRules {
        self.snake.rules()
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.snake.rules().grid
    }

    /// Cells to paint and the score to display, food first.
    #[must_use]
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(self.snake.len() + 2);
        commands.push(DrawCommand::Cell {
            cell: self.food.position,
            paint: Paint::Food,
        });
        commands.extend(self.snake.segments().map(|cell| DrawCommand::Cell {
            cell: *cell,
            paint: Paint::Snake,
        }));
        commands.push(DrawCommand::Score(self.score));
        commands
    }

    fn end(&mut self, reason: DeathReason) -> TickOutcome {
        self.death_reason = Some(reason);
        tracing::info!(score = self.score, ?reason, "round over");
        TickOutcome::GameOver
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Difficulty, Settings, WallCollision};
    use crate::food::Food;
    use crate::grid::Position;
    use crate::input::Direction;
    use crate::snake::Snake;

    use super::{DeathReason, DrawCommand, Paint, Round, TickOutcome};

    const STEP: u64 = 151;

    /// 10×10 grid at medium speed with the given wall policy.
    fn settings(wall_collision: WallCollision) -> Settings {
        let mut settings = Settings {
            screen_width: 200,
            screen_height: 200,
            cell_size: 20,
            ..Settings::default()
        };
        settings.set_difficulty(Difficulty::Medium);
        settings.difficulties.medium.wall_collision = wall_collision;
        settings.difficulties.medium.initial_length = 1;
        settings
    }

    fn place(round: &mut Round, segments: Vec<Position>, direction: Direction) {
        round.snake = Snake::from_segments(segments, direction, round.rules());
    }

    #[test]
    fn eating_food_grows_scores_and_respawns() {
        let mut round = Round::new_with_seed(&settings(WallCollision::Stop), 1, 0);
        assert_eq!(round.snake.head(), Position::new(5, 5));
        round.food = Food::at(Position::new(6, 5));

        let outcome = round.tick(STEP);

        assert_eq!(outcome, TickOutcome::Continue);
        assert_eq!(round.snake.head(), Position::new(6, 5));
        assert_eq!(round.snake.growth_target(), 2);
        assert_eq!(round.score(), 10);
        assert_ne!(round.food.position, Position::new(6, 5));
        assert!(!round.snake.occupies(round.food.position));
    }

    #[test]
    fn respawned_food_avoids_the_whole_growing_body() {
        let mut settings = settings(WallCollision::Stop);
        settings.difficulties.medium.initial_length = 3;

        for seed in 0..50 {
            let mut round = Round::new_with_seed(&settings, seed, 0);
            round.food = Food::at(Position::new(6, 5));

            round.tick(STEP);

            assert_eq!(round.snake.len(), 2);
            assert_eq!(round.snake.growth_target(), 4);
            assert_ne!(round.food.position, Position::new(6, 5));
            assert_ne!(round.food.position, Position::new(5, 5));
        }
    }

    #[test]
    fn tick_without_a_step_changes_nothing() {
        let mut round = Round::new_with_seed(&settings(WallCollision::Stop), 2, 0);
        round.food = Food::at(Position::new(6, 5));

        assert_eq!(round.tick(STEP - 1), TickOutcome::Continue);
        assert_eq!(round.snake.head(), Position::new(5, 5));
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn wrap_policy_never_ends_at_the_edge() {
        let mut round = Round::new_with_seed(&settings(WallCollision::Wrap), 3, 0);
        place(&mut round, vec![Position::new(9, 5)], Direction::Right);
        round.food = Food::at(Position::new(0, 0));

        assert_eq!(round.tick(STEP), TickOutcome::Continue);
        assert_eq!(round.snake.head(), Position::new(0, 5));
    }

    #[test]
    fn stop_policy_ends_at_the_edge() {
        let mut round = Round::new_with_seed(&settings(WallCollision::Stop), 4, 0);
        place(&mut round, vec![Position::new(9, 5)], Direction::Right);
        round.food = Food::at(Position::new(0, 0));

        assert_eq!(round.tick(STEP), TickOutcome::GameOver);
        assert_eq!(round.snake.head(), Position::new(10, 5));
        assert_eq!(round.death_reason(), Some(DeathReason::WallCollision));
    }

    #[test]
    fn duplicate_body_cell_ends_the_round() {
        let mut round = Round::new_with_seed(&settings(WallCollision::Stop), 5, 0);
        place(
            &mut round,
            vec![
                Position::new(3, 3),
                Position::new(3, 4),
                Position::new(3, 3),
            ],
            Direction::Up,
        );
        round.food = Food::at(Position::new(0, 0));

        // No step is due yet; the constructed duplicate alone is terminal.
        assert_eq!(round.tick(0), TickOutcome::GameOver);
        assert_eq!(round.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn running_into_own_body_ends_the_round() {
        let mut round = Round::new_with_seed(&settings(WallCollision::Stop), 6, 0);
        place(
            &mut round,
            vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(1, 3),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
            ],
            Direction::Down,
        );
        round.food = Food::at(Position::new(9, 9));

        assert_eq!(round.tick(STEP), TickOutcome::GameOver);
        assert_eq!(round.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn food_eaten_on_a_fatal_step_still_scores() {
        let mut round = Round::new_with_seed(&settings(WallCollision::Wrap), 7, 0);
        // The head wraps onto (0,5), which holds both the food and a body cell.
        place(
            &mut round,
            vec![
                Position::new(9, 5),
                Position::new(9, 6),
                Position::new(0, 6),
                Position::new(0, 5),
                Position::new(0, 4),
            ],
            Direction::Right,
        );
        round.food = Food::at(Position::new(0, 5));

        // Food placement normally excludes the body; force the overlap.
        assert_eq!(round.tick(STEP), TickOutcome::GameOver);
        assert_eq!(round.score(), 10);
        assert_eq!(round.snake.growth_target(), 6);
        assert_eq!(round.death_reason(), Some(DeathReason::SelfCollision));
    }

    #[test]
    fn eating_onto_the_last_free_cell_ends_the_round() {
        let mut settings = Settings {
            screen_width: 40,
            screen_height: 40,
            cell_size: 20,
            ..Settings::default()
        };
        settings.set_difficulty(Difficulty::Medium);
        settings.difficulties.medium.initial_length = 3;
        assert!(settings.validate().is_ok());

        let mut round = Round::new_with_seed(&settings, 12, 0);
        place(
            &mut round,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ],
            Direction::Right,
        );
        round.snake.grow();
        round.food = Food::at(Position::new(1, 0));

        assert_eq!(round.tick(STEP), TickOutcome::GameOver);
        assert_eq!(round.score(), 10);
        assert_eq!(round.snake.len(), 4);
        assert_eq!(round.snake.growth_target(), 5);
        assert_eq!(round.death_reason(), Some(DeathReason::BoardFull));
        assert_eq!(round.food.position, Position::new(1, 0));
    }

    #[test]
    fn ended_round_stays_over() {
        let mut round = Round::new_with_seed(&settings(WallCollision::Stop), 8, 0);
        place(&mut round, vec![Position::new(9, 5)], Direction::Right);
        round.food = Food::at(Position::new(0, 0));

        assert_eq!(round.tick(STEP), TickOutcome::GameOver);
        assert_eq!(round.tick(2 * STEP), TickOutcome::GameOver);
        assert_eq!(round.snake.head(), Position::new(10, 5));
    }

    #[test]
    fn score_rises_only_by_ten_per_food() {
        let mut round = Round::new_with_seed(&settings(WallCollision::Wrap), 9, 0);
        let mut now = 0;
        let mut previous = round.score();

        for _ in 0..300 {
            let target = round.snake.growth_target();
            now += STEP;
            if round.tick(now) == TickOutcome::GameOver {
                break;
            }

            let eaten = round.snake.growth_target() - target;
            assert_eq!(round.score(), previous + 10 * eaten as u32);
            assert!(round.score() >= previous);
            previous = round.score();

            // Steer toward the food so some gets eaten.
            let head = round.snake.head();
            let food = round.food.position;
            if food.x != head.x {
                round.steer(if food.x > head.x { Direction::Right } else { Direction::Left });
            } else {
                round.steer(if food.y > head.y { Direction::Down } else { Direction::Up });
            }
        }

        assert!(round.score() > 0);
    }

    #[test]
    fn restart_clears_score_and_applies_new_rules() {
        let mut round = Round::new_with_seed(&settings(WallCollision::Stop), 10, 0);
        round.food = Food::at(Position::new(6, 5));
        round.tick(STEP);
        assert_eq!(round.score(), 10);

        let mut hard = settings(WallCollision::Stop);
        hard.set_difficulty(Difficulty::Hard);
        round.restart(&hard, 1_000);

        assert_eq!(round.score(), 0);
        assert_eq!(round.death_reason(), None);
        assert_eq!(round.snake.len(), 1);
        assert_eq!(round.snake.growth_target(), 5);
        assert_eq!(round.rules().step_interval_ms, 100);
        assert!(!round.snake.occupies(round.food.position));
    }

    #[test]
    fn draw_commands_cover_food_snake_and_score() {
        let mut round = Round::new_with_seed(&settings(WallCollision::Stop), 11, 0);
        place(
            &mut round,
            vec![Position::new(4, 4), Position::new(3, 4)],
            Direction::Right,
        );
        round.food = Food::at(Position::new(8, 8));

        assert_eq!(
            round.draw_commands(),
            vec![
                DrawCommand::Cell {
                    cell: Position::new(8, 8),
                    paint: Paint::Food
                },
                DrawCommand::Cell {
                    cell: Position::new(4, 4),
                    paint: Paint::Snake
                },
                DrawCommand::Cell {
                    cell: Position::new(3, 4),
                    paint: Paint::Snake
                },
                DrawCommand::Score(0),
            ]
        );
    }
}
