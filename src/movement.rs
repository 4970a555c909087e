use rand::Rng;

use crate::maze::Maze;
use crate::sprite::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    /// Uniformly random direction, used for ghost wandering.
    pub fn random(rng: &mut impl Rng) -> Dir {
        Dir::ALL[rng.gen_range(0..Dir::ALL.len())]
    }
}

fn wrap(value: usize, delta: isize, len: usize) -> usize {
    (value as isize + delta).rem_euclid(len as isize) as usize
}

/// Where a sprite at `pos` ends up after trying to step in `dir`.
///
/// Each axis wraps around independently; a step into a wall leaves the
/// sprite where it was. `None` means no input and is always a no-op.
pub fn resolve(pos: Pos, dir: Option<Dir>, maze: &Maze) -> Pos {
    let Some(dir) = dir else {
        return pos;
    };
    let (dr, dc) = dir.delta();
    let next = Pos {
        row: wrap(pos.row, dr, maze.height()),
        col: wrap(pos.col, dc, maze.width()),
    };
    if maze.is_wall(next) {
        pos
    } else {
        next
    }
}
