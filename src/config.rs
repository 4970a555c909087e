use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::GameResult;

/// Glyphs and pill timing, read from a JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: String,
    pub ghost: String,
    pub ghost_blue: String,
    pub wall: String,
    pub dot: String,
    pub pill: String,
    pub death: String,
    pub space: String,
    /// Glyphs are double-width emoji; every cell takes two columns.
    pub use_emoji: bool,
    pub pill_duration_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            player: "P".into(),
            ghost: "G".into(),
            ghost_blue: "B".into(),
            wall: "#".into(),
            dot: ".".into(),
            pill: "X".into(),
            death: "*".into(),
            space: " ".into(),
            use_emoji: false,
            pill_duration_secs: 10,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> GameResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn pill_duration(&self) -> Duration {
        Duration::from_secs(self.pill_duration_secs)
    }

    /// Terminal columns taken by one maze cell.
    pub fn cell_width(&self) -> usize {
        if self.use_emoji {
            2
        } else {
            1
        }
    }
}

/// Fixed delays of the game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pacing {
    /// Sleep at the end of every tick.
    pub tick: Duration,
    /// Pause after losing a life, before the player respawns.
    pub death_pause: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(100),
            death_pause: Duration::from_millis(1000),
        }
    }
}

impl Pacing {
    /// No delays at all; for driving the loop from tests.
    pub fn instant() -> Self {
        Self {
            tick: Duration::ZERO,
            death_pause: Duration::ZERO,
        }
    }
}
