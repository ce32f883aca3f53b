//! Grid-based Snake: time-gated movement, growth, food placement, wrap/stop
//! walls, and a menu → difficulty → play → game-over mode machine.

pub mod clock;
pub mod config;
pub mod error;
pub mod food;
pub mod grid;
pub mod input;
pub mod logging;
pub mod mode;
pub mod renderer;
pub mod round;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
