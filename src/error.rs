use std::io;

/// Problems found while turning maze text into a [`crate::maze::Level`].
#[derive(thiserror::Error, Debug)]
pub enum MazeError {
    #[error("maze has no rows")]
    Empty,

    #[error("row {row} is {found} cells wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("maze has no player spawn marker")]
    MissingPlayer,
}

/// Core error type for the game.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file could not be decoded
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Maze definition is unusable
    #[error("maze error: {0}")]
    Maze(#[from] MazeError),
}

pub type GameResult<T> = Result<T, GameError>;
