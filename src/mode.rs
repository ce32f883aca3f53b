//! Top-level mode state machine.
//!
//! Exactly one [`Mode`] is active. Input events are dispatched through a single
//! exhaustive match over `(mode, input)`; the per-frame update only simulates
//! while [`Mode::Playing`].

use crate::clock::Clock;
use crate::config::{Difficulty, Settings};
use crate::input::GameInput;
use crate::round::{Round, TickOutcome};

/// Difficulty highlighted when the list is opened from the main menu.
pub const DEFAULT_DIFFICULTY_INDEX: usize = 1;

/// Application mode. Only `DifficultySelect` carries state: the cursor.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    MainMenu,
    DifficultySelect { cursor: usize },
    Playing,
    GameOver,
}

/// Whether the frame loop should keep running.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the settings, the active mode and the round.
#[derive(Debug, Clone)]
pub struct App {
    mode: Mode,
    settings: Settings,
    round: Round,
}

impl App {
    /// Creates the app on the main menu with entropy-seeded food placement.
    #[must_use]
    pub fn new(settings: Settings, clock: &impl Clock) -> Self {
        let round = Round::new(&settings, clock.now_ms());
        Self::with_round(settings, round)
    }

    /// Creates the app with deterministic food placement.
    #[must_use]
    pub fn new_with_seed(settings: Settings, seed: u64, clock: &impl Clock) -> Self {
        let round = Round::new_with_seed(&settings, seed, clock.now_ms());
        Self::with_round(settings, round)
    }

    fn with_round(settings: Settings, round: Round) -> Self {
        Self {
            mode: Mode::MainMenu,
            settings,
            round,
        }
    }

    /// Handles one input event in the current mode.
    pub fn handle_event(&mut self, input: GameInput, clock: &impl Clock) -> Flow {
        let options = Difficulty::ALL.len();

        match (self.mode, input) {
            (_, GameInput::Quit) => return Flow::Quit,

            (Mode::MainMenu, GameInput::Confirm) => self.enter(Mode::DifficultySelect {
                cursor: DEFAULT_DIFFICULTY_INDEX,
            }),
            (
                Mode::MainMenu,
                GameInput::Cancel
                | GameInput::Up
                | GameInput::Down
                | GameInput::Left
                | GameInput::Right
                | GameInput::Restart,
            ) => {}

            (Mode::DifficultySelect { cursor }, GameInput::Up) => {
                self.mode = Mode::DifficultySelect {
                    cursor: (cursor + options - 1) % options,
                };
            }
            (Mode::DifficultySelect { cursor }, GameInput::Down) => {
                self.mode = Mode::DifficultySelect {
                    cursor: (cursor + 1) % options,
                };
            }
            (Mode::DifficultySelect { cursor }, GameInput::Confirm) => {
                self.start_round(Difficulty::ALL[cursor], clock.now_ms());
            }
            (Mode::DifficultySelect { .. }, GameInput::Cancel) => self.enter(Mode::MainMenu),
            (
                Mode::DifficultySelect { .. },
                GameInput::Left | GameInput::Right | GameInput::Restart,
            ) => {}

            (
                Mode::Playing,
                GameInput::Up | GameInput::Down | GameInput::Left | GameInput::Right,
            ) => {
                if let Some(direction) = input.direction() {
                    self.round.steer(direction);
                }
            }
            (Mode::Playing, GameInput::Confirm | GameInput::Cancel | GameInput::Restart) => {}

            (Mode::GameOver, GameInput::Restart) => self.enter(Mode::DifficultySelect {
                cursor: self.settings.current_difficulty.index(),
            }),
            (Mode::GameOver, GameInput::Cancel) => self.enter(Mode::MainMenu),
            (
                Mode::GameOver,
                GameInput::Confirm
                | GameInput::Up
                | GameInput::Down
                | GameInput::Left
                | GameInput::Right,
            ) => {}
        }

        Flow::Continue
    }

    /// Runs the mode's per-frame update. Only `Playing` does any work.
    pub fn update(&mut self, clock: &impl Clock) {
        if self.mode != Mode::Playing {
            return;
        }

        if self.round.tick(clock.now_ms()) == TickOutcome::GameOver {
            self.enter(Mode::GameOver);
        }
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Mutable round access for scripted setups.
    pub fn round_mut(&mut self) -> &mut Round {
        &mut self.round
    }

    fn start_round(&mut self, difficulty: Difficulty, now_ms: u64) {
        self.settings.set_difficulty(difficulty);
        self.round.restart(&self.settings, now_ms);

        let rules = self.round.rules();
        tracing::info!(
            ?difficulty,
            width = rules.grid.width,
            height = rules.grid.height,
            initial_length = rules.initial_length,
            wall_collision = ?rules.wall_collision,
            "round started"
        );

        self.enter(Mode::Playing);
    }

    fn enter(&mut self, mode: Mode) {
        tracing::info!(from = ?self.mode, to = ?mode, "mode change");
        self.mode = mode;
    }
}
