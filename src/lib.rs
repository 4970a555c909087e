//! # mazechase
//!
//! A maze-chase arcade game for the terminal. The player eats dots while
//! randomly wandering ghosts hunt for it; pills turn the ghosts blue for a
//! while.
//!
//! The game loop in [`game`] owns nearly all state. Two helpers run on their
//! own threads: the [`input`] reader, which feeds decoded keypresses into a
//! channel, and the pill timer in [`power`], which shares ghost modes with
//! the loop behind a mutex.

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod maze;
pub mod movement;
pub mod power;
pub mod render;
pub mod sprite;
pub mod terminal;

pub use config::{Config, Pacing};
pub use error::{GameError, GameResult, MazeError};
pub use game::{Game, Outcome, Status};
pub use input::InputEvent;
pub use maze::{Level, Maze, Pickup, Tile};
pub use movement::Dir;
pub use power::PowerUp;
pub use render::{Frame, Screen, TerminalScreen};
pub use sprite::{GhostMode, Pos, Sprite};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
