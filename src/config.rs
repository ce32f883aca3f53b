use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::grid::GridSize;
use crate::snake::SnakeRules;

const APP_DIR_NAME: &str = "grid-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Score awarded for each food eaten.
pub const POINTS_PER_FOOD: u32 = 10;

/// Terminal columns used to draw one grid cell, so cells look square.
pub const CELL_COLUMNS: u16 = 2;

/// Terminal rows used to draw one grid cell.
pub const CELL_ROWS: u16 = 1;

/// Glyph used to fill a grid cell.
pub const GLYPH_CELL: &str = "██";

/// Selectable difficulty levels.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Menu order of the difficulty list.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Milliseconds between snake steps. Fixed per level.
    #[must_use]
    pub fn step_interval_ms(self) -> u64 {
        match self {
            Self::Easy => 250,
            Self::Medium => 150,
            Self::Hard => 100,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }

    /// Position of this level in [`Difficulty::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }
}

/// What happens when the head leaves the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallCollision {
    /// Toroidal grid: the head re-enters on the opposite edge.
    Wrap,
    /// Bounded grid: leaving it ends the round.
    Stop,
}

/// Per-difficulty round parameters.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub initial_length: usize,
    pub wall_collision: WallCollision,
}

/// Profiles for every level. Keys missing from a settings file keep the
/// level's own defaults, including individual profile fields.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "DifficultyTableFile")]
pub struct DifficultyTable {
    pub easy: DifficultyProfile,
    pub medium: DifficultyProfile,
    pub hard: DifficultyProfile,
}

impl DifficultyTable {
    #[must_use]
    pub fn get(&self, difficulty: Difficulty) -> DifficultyProfile {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: DifficultyProfile {
                initial_length: 3,
                wall_collision: WallCollision::Wrap,
            },
            medium: DifficultyProfile {
                initial_length: 3,
                wall_collision: WallCollision::Stop,
            },
            hard: DifficultyProfile {
                initial_length: 5,
                wall_collision: WallCollision::Stop,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DifficultyTableFile {
    easy: ProfileOverrides,
    medium: ProfileOverrides,
    hard: ProfileOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfileOverrides {
    initial_length: Option<usize>,
    wall_collision: Option<WallCollision>,
}

impl ProfileOverrides {
    fn apply(self, base: DifficultyProfile) -> DifficultyProfile {
        DifficultyProfile {
            initial_length: self.initial_length.unwrap_or(base.initial_length),
            wall_collision: self.wall_collision.unwrap_or(base.wall_collision),
        }
    }
}

impl From<DifficultyTableFile> for DifficultyTable {
    fn from(file: DifficultyTableFile) -> Self {
        let defaults = Self::default();
        Self {
            easy: file.easy.apply(defaults.easy),
            medium: file.medium.apply(defaults.medium),
            hard: file.hard.apply(defaults.hard),
        }
    }
}

/// 24-bit colour as `[r, g, b]`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

/// Shared game settings.
///
/// Owned by the top-level controller and passed by reference. Only a confirmed
/// difficulty selection mutates it at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Side of one grid cell, in screen units.
    pub cell_size: u32,
    pub fps: u32,
    pub current_difficulty: Difficulty,
    pub difficulties: DifficultyTable,
    pub snake_color: Rgb,
    pub food_color: Rgb,
    pub background_color: Rgb,
    pub text_color: Rgb,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 600,
            screen_height: 400,
            cell_size: 20,
            fps: 60,
            current_difficulty: Difficulty::Medium,
            difficulties: DifficultyTable::default(),
            snake_color: Rgb([0, 255, 0]),
            food_color: Rgb([255, 0, 0]),
            background_color: Rgb([0, 0, 0]),
            text_color: Rgb([255, 255, 255]),
        }
    }
}

impl Settings {
    /// Reads and validates settings from a JSON file. Missing keys take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;

        let settings: Self = serde_json::from_str(&raw).map_err(|source| Error::SettingsParse {
            path: path.to_path_buf(),
            source,
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Loads the per-user settings file when present, defaults otherwise.
    ///
    /// A file that exists but cannot be used is reported and skipped.
    #[must_use]
    pub fn load_or_default() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };

        match Self::load(&path) {
            Ok(settings) => settings,
            Err(Error::SettingsRead { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(error) => {
                tracing::warn!(%error, "ignoring settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Checks that every difficulty can start a round on the configured grid.
    pub fn validate(&self) -> Result<()> {
        if self.cell_size == 0 {
            return Err(Error::InvalidSettings("cell_size must be positive".into()));
        }
        if self.fps == 0 {
            return Err(Error::InvalidSettings("fps must be positive".into()));
        }

        let width = self.screen_width / self.cell_size;
        let height = self.screen_height / self.cell_size;
        if width < 2 || height < 2 {
            return Err(Error::InvalidSettings(format!(
                "grid of {width}x{height} cells is smaller than 2x2"
            )));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(Error::InvalidSettings(format!(
                "grid of {width}x{height} cells is too large"
            )));
        }

        let total_cells = self.grid_size().total_cells();
        for difficulty in Difficulty::ALL {
            let profile = self.difficulties.get(difficulty);
            if profile.initial_length == 0 || profile.initial_length >= total_cells {
                return Err(Error::InvalidSettings(format!(
                    "{} initial_length {} must be between 1 and {}",
                    difficulty.label().to_lowercase(),
                    profile.initial_length,
                    total_cells - 1,
                )));
            }
        }

        Ok(())
    }

    /// Logical grid derived from screen size and cell size.
    #[must_use]
    pub fn grid_size(&self) -> GridSize {
        let cell = self.cell_size.max(1);
        GridSize {
            width: u16::try_from(self.screen_width / cell).unwrap_or(u16::MAX),
            height: u16::try_from(self.screen_height / cell).unwrap_or(u16::MAX),
        }
    }

    #[must_use]
    pub fn current_profile(&self) -> DifficultyProfile {
        self.difficulties.get(self.current_difficulty)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.current_difficulty = difficulty;
    }

    /// Movement rules for a snake at the current difficulty.
    #[must_use]
    pub fn snake_rules(&self) -> SnakeRules {
        let profile = self.current_profile();
        SnakeRules {
            grid: self.grid_size(),
            wall_collision: profile.wall_collision,
            step_interval_ms: self.current_difficulty.step_interval_ms(),
            initial_length: profile.initial_length,
        }
    }
}

/// Returns the platform-correct per-user settings path.
#[must_use]
pub fn default_settings_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    Some(base)
}
