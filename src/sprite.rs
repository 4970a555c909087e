/// Grid coordinate, row-major like the maze text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

/// A positioned actor that remembers where it spawned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub pos: Pos,
    pub start: Pos,
}

impl Sprite {
    pub fn new(start: Pos) -> Self {
        Self { pos: start, start }
    }

    pub fn respawn(&mut self) {
        self.pos = self.start;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GhostMode {
    #[default]
    Normal,
    /// Vulnerable while a pill is active. Only affects how the ghost is drawn.
    Blue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respawn_returns_to_start() {
        let mut sprite = Sprite::new(Pos { row: 2, col: 3 });
        sprite.pos = Pos { row: 5, col: 1 };
        sprite.respawn();
        assert_eq!(sprite.pos, Pos { row: 2, col: 3 });
        assert_eq!(sprite.start, Pos { row: 2, col: 3 });
    }
}
