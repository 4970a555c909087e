use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::maze::{Maze, Tile};
use crate::sprite::{GhostMode, Pos, Sprite};

/// Everything needed to draw one tick.
pub struct Frame<'a> {
    pub maze: &'a Maze,
    pub player: Pos,
    pub ghosts: &'a [Sprite],
    /// Same order and length as `ghosts`.
    pub modes: &'a [GhostMode],
    pub score: u32,
    pub lives: u32,
}

/// Where the game loop sends its output.
pub trait Screen {
    /// Full redraw of maze, sprites and the score line.
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()>;

    /// Marks the spot where the player just died.
    fn draw_death(&mut self, at: Pos, maze: &Maze) -> io::Result<()>;
}

/// Draws with crossterm escape sequences into any writer.
pub struct TerminalScreen<W: Write> {
    out: W,
    config: Config,
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W, config: Config) -> Self {
        Self { out, config }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn move_to(&mut self, row: usize, col: usize) -> io::Result<()> {
        let x = (col * self.config.cell_width()) as u16;
        queue!(self.out, MoveTo(x, row as u16))
    }

    fn lives_text(&self, lives: u32) -> String {
        if self.config.use_emoji {
            self.config.player.repeat(lives as usize)
        } else {
            lives.to_string()
        }
    }
}

/// Right-pads `glyph` with spaces up to `width` terminal columns.
fn pad(glyph: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(glyph);
    let mut text = glyph.to_string();
    for _ in w..width {
        text.push(' ');
    }
    text
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;

        let width = self.config.cell_width();
        for (row, tiles) in frame.maze.rows().enumerate() {
            queue!(self.out, MoveTo(0, row as u16))?;
            for tile in tiles {
                let glyph = match tile {
                    Tile::Wall => &self.config.wall,
                    Tile::Dot => &self.config.dot,
                    Tile::Pill => &self.config.pill,
                    Tile::Empty => &self.config.space,
                };
                if *tile == Tile::Wall {
                    queue!(
                        self.out,
                        SetBackgroundColor(Color::Blue),
                        Print(pad(glyph, width)),
                        ResetColor
                    )?;
                } else {
                    queue!(self.out, Print(pad(glyph, width)))?;
                }
            }
        }

        self.move_to(frame.player.row, frame.player.col)?;
        queue!(self.out, Print(&self.config.player))?;

        for (ghost, mode) in frame.ghosts.iter().zip(frame.modes) {
            self.move_to(ghost.pos.row, ghost.pos.col)?;
            let glyph = match mode {
                GhostMode::Normal => &self.config.ghost,
                GhostMode::Blue => &self.config.ghost_blue,
            };
            queue!(self.out, Print(glyph))?;
        }

        queue!(self.out, MoveTo(0, (frame.maze.height() + 1) as u16))?;
        let hud = format!(
            "Score: {}\tLives: {}",
            frame.score,
            self.lives_text(frame.lives)
        );
        queue!(self.out, Print(hud))?;
        self.out.flush()
    }

    fn draw_death(&mut self, at: Pos, maze: &Maze) -> io::Result<()> {
        self.move_to(at.row, at.col)?;
        queue!(
            self.out,
            Print(&self.config.death),
            MoveTo(0, (maze.height() + 2) as u16)
        )?;
        self.out.flush()
    }
}
