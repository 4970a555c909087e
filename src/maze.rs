use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{GameResult, MazeError};
use crate::sprite::{Pos, Sprite};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Empty,
    Dot,
    Pill,
}

impl Tile {
    fn from_code(code: char) -> Self {
        match code {
            '#' => Tile::Wall,
            '.' => Tile::Dot,
            'X' => Tile::Pill,
            _ => Tile::Empty,
        }
    }
}

/// What the player picked up when entering a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pickup {
    Dot,
    Pill,
}

impl Pickup {
    pub fn points(self) -> u32 {
        match self {
            Pickup::Dot => 1,
            Pickup::Pill => 10,
        }
    }
}

/// Rectangular grid of tiles. The only mutation after loading is clearing a
/// dot or pill when it gets eaten.
#[derive(Clone, Debug)]
pub struct Maze {
    grid: Vec<Vec<Tile>>,
    dots_left: usize,
}

/// A parsed maze together with the sprites found on it.
#[derive(Clone, Debug)]
pub struct Level {
    pub maze: Maze,
    pub player: Sprite,
    pub ghosts: Vec<Sprite>,
}

impl Maze {
    /// Parses maze text. `P` marks the player spawn and `G` a ghost spawn;
    /// both become empty floor.
    pub fn parse(text: &str) -> Result<Level, MazeError> {
        let mut rows: Vec<&str> = text.lines().collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        if rows.is_empty() {
            return Err(MazeError::Empty);
        }

        let width = rows[0].chars().count();
        let mut grid = Vec::with_capacity(rows.len());
        let mut player = None;
        let mut ghosts = Vec::new();
        let mut dots_left = 0;

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MazeError::Ragged {
                    row,
                    expected: width,
                    found,
                });
            }
            let mut tiles = Vec::with_capacity(width);
            for (col, code) in line.chars().enumerate() {
                match code {
                    'P' => player = Some(Sprite::new(Pos { row, col })),
                    'G' => ghosts.push(Sprite::new(Pos { row, col })),
                    _ => {}
                }
                let tile = Tile::from_code(code);
                if tile == Tile::Dot {
                    dots_left += 1;
                }
                tiles.push(tile);
            }
            grid.push(tiles);
        }

        let player = player.ok_or(MazeError::MissingPlayer)?;
        Ok(Level {
            maze: Maze { grid, dots_left },
            player,
            ghosts,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> GameResult<Level> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let level = Maze::parse(&text)?;
        debug!(
            "loaded maze {} ({}x{}, {} ghosts, {} dots)",
            path.display(),
            level.maze.height(),
            level.maze.width(),
            level.ghosts.len(),
            level.maze.dots_left()
        );
        Ok(level)
    }

    pub fn height(&self) -> usize {
        self.grid.len()
    }

    pub fn width(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    pub fn tile(&self, pos: Pos) -> Tile {
        self.grid[pos.row][pos.col]
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.tile(pos) == Tile::Wall
    }

    pub fn dots_left(&self) -> usize {
        self.dots_left
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.grid.iter().map(Vec::as_slice)
    }

    /// Eats whatever sits at `pos`. Eating an already empty cell is a no-op.
    pub fn consume(&mut self, pos: Pos) -> Option<Pickup> {
        let cell = &mut self.grid[pos.row][pos.col];
        let pickup = match *cell {
            Tile::Dot => {
                self.dots_left = self.dots_left.saturating_sub(1);
                Pickup::Dot
            }
            Tile::Pill => Pickup::Pill,
            Tile::Wall | Tile::Empty => return None,
        };
        *cell = Tile::Empty;
        Some(pickup)
    }
}
