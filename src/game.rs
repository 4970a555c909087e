use std::io;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use crate::config::Pacing;
use crate::input::InputEvent;
use crate::maze::{Level, Maze, Pickup};
use crate::movement::{self, Dir};
use crate::power::PowerUp;
use crate::render::{Frame, Screen};
use crate::sprite::Sprite;

pub const STARTING_LIVES: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    GameOver(Outcome),
}

/// All state touched by the game loop. Only ghost modes live elsewhere, in
/// the shared [`PowerUp`].
pub struct Game {
    maze: Maze,
    player: Sprite,
    ghosts: Vec<Sprite>,
    score: u32,
    lives: u32,
    power: PowerUp,
}

impl Game {
    /// Ghost modes are sized from the level, so every ghost has one.
    pub fn new(level: Level, pill_duration: Duration) -> Self {
        let power = PowerUp::new(level.ghosts.len(), pill_duration);
        Self {
            maze: level.maze,
            player: level.player,
            ghosts: level.ghosts,
            score: 0,
            lives: STARTING_LIVES,
            power,
        }
    }

    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives = lives;
        self
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Sprite {
        &self.player
    }

    pub fn ghosts(&self) -> &[Sprite] {
        &self.ghosts
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn power(&self) -> &PowerUp {
        &self.power
    }

    fn render(&self, screen: &mut impl Screen) -> io::Result<()> {
        let modes = self.power.modes();
        screen.draw(&Frame {
            maze: &self.maze,
            player: self.player.pos,
            ghosts: &self.ghosts,
            modes: &modes,
            score: self.score,
            lives: self.lives,
        })
    }

    /// Applies at most one pending input event. Anything else stays queued
    /// for later ticks.
    pub fn apply_input(&mut self, events: &Receiver<InputEvent>) {
        match events.try_recv() {
            Ok(InputEvent::Cancel) => {
                info!("game cancelled");
                self.lives = 0;
            }
            Ok(InputEvent::Move(dir)) => self.move_player(dir),
            // A dead reader has already sent its Cancel.
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => {}
        }
    }

    pub fn move_player(&mut self, dir: Dir) {
        self.player.pos = movement::resolve(self.player.pos, Some(dir), &self.maze);
        let Some(pickup) = self.maze.consume(self.player.pos) else {
            return;
        };
        self.score += pickup.points();
        if pickup == Pickup::Pill {
            debug!("pill eaten at {:?}", self.player.pos);
            self.power.activate();
        }
    }

    /// Every ghost takes one uniformly random step.
    pub fn move_ghosts(&mut self, rng: &mut impl Rng) {
        for ghost in &mut self.ghosts {
            let dir = Dir::random(rng);
            ghost.pos = movement::resolve(ghost.pos, Some(dir), &self.maze);
        }
    }

    /// Each ghost sharing the player's cell costs a life. While lives
    /// remain the player is sent back to its spawn after a short pause.
    pub fn resolve_collisions(
        &mut self,
        screen: &mut impl Screen,
        pacing: &Pacing,
    ) -> io::Result<()> {
        for idx in 0..self.ghosts.len() {
            if self.ghosts[idx].pos != self.player.pos {
                continue;
            }
            self.lives = self.lives.saturating_sub(1);
            info!(
                "caught by ghost {idx} at {:?}, {} lives left",
                self.player.pos, self.lives
            );
            if self.lives > 0 {
                screen.draw_death(self.player.pos, &self.maze)?;
                thread::sleep(pacing.death_pause);
                self.player.respawn();
            }
        }
        Ok(())
    }

    pub fn status(&self) -> Status {
        if self.lives == 0 {
            Status::GameOver(Outcome::Lost)
        } else if self.maze.dots_left() == 0 {
            Status::GameOver(Outcome::Won)
        } else {
            Status::Running
        }
    }

    /// One frame: render, input, ghosts, collisions, end check, pace.
    pub fn tick(
        &mut self,
        events: &Receiver<InputEvent>,
        screen: &mut impl Screen,
        rng: &mut impl Rng,
        pacing: &Pacing,
    ) -> io::Result<Status> {
        self.render(screen)?;
        self.apply_input(events);
        self.move_ghosts(rng);
        self.resolve_collisions(screen, pacing)?;

        let status = self.status();
        match status {
            Status::GameOver(Outcome::Lost) => screen.draw_death(self.player.pos, &self.maze)?,
            Status::GameOver(Outcome::Won) => {}
            Status::Running => thread::sleep(pacing.tick),
        }
        Ok(status)
    }

    /// Ticks until the game is decided.
    pub fn run(
        &mut self,
        events: &Receiver<InputEvent>,
        screen: &mut impl Screen,
        rng: &mut impl Rng,
        pacing: &Pacing,
    ) -> io::Result<Outcome> {
        loop {
            if let Status::GameOver(outcome) = self.tick(events, screen, rng, pacing)? {
                info!(
                    "game over: {outcome:?}, score {}, {} pill(s) ran out",
                    self.score,
                    self.power.reversions()
                );
                self.power.shutdown();
                return Ok(outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Tile;
    use crate::sprite::Pos;
    use rand::rngs::mock::StepRng;
    use std::sync::mpsc;

    /// Records what would have been drawn.
    #[derive(Default)]
    struct Recorder {
        frames: Vec<(u32, u32)>,
        deaths: Vec<Pos>,
    }

    impl Screen for Recorder {
        fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
            self.frames.push((frame.score, frame.lives));
            Ok(())
        }

        fn draw_death(&mut self, at: Pos, _maze: &Maze) -> io::Result<()> {
            self.deaths.push(at);
            Ok(())
        }
    }

    fn game(text: &str) -> Game {
        Game::new(Maze::parse(text).unwrap(), Duration::from_secs(60))
    }

    // StepRng(0, 0) always draws index 0, so every ghost tries to go up.
    fn up_only() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn eating_a_dot_scores_one() {
        let mut game = game("#####\n#P..#\n#####\n");
        game.move_player(Dir::Right);
        assert_eq!(game.player().pos, Pos { row: 1, col: 2 });
        assert_eq!(game.score(), 1);
        assert_eq!(game.maze().dots_left(), 1);
        assert_eq!(game.maze().tile(Pos { row: 1, col: 2 }), Tile::Empty);

        game.move_player(Dir::Left);
        game.move_player(Dir::Right);
        assert_eq!(game.score(), 1);
        assert_eq!(game.maze().dots_left(), 1);
    }

    #[test]
    fn eating_a_pill_scores_ten_and_turns_ghosts_blue() {
        let mut game = game("######\n#PX.G#\n######\n");
        game.move_player(Dir::Right);
        assert_eq!(game.score(), 10);
        assert_eq!(game.maze().dots_left(), 1);
        assert!(game.power().is_active());
        assert_eq!(game.power().modes(), vec![crate::sprite::GhostMode::Blue]);
        game.power().shutdown();
    }

    #[test]
    fn walking_into_a_wall_stays_put() {
        let mut game = game("###\n#P#\n#.#\n");
        game.move_player(Dir::Left);
        assert_eq!(game.player().pos, Pos { row: 1, col: 1 });
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn only_one_event_per_tick() {
        let mut game = game("#######\n#P....#\n#######\n");
        let (tx, rx) = mpsc::channel();
        for _ in 0..3 {
            tx.send(InputEvent::Move(Dir::Right)).unwrap();
        }
        let mut screen = Recorder::default();
        let mut rng = up_only();
        let pacing = Pacing::instant();

        game.tick(&rx, &mut screen, &mut rng, &pacing).unwrap();
        assert_eq!(game.player().pos.col, 2);
        game.tick(&rx, &mut screen, &mut rng, &pacing).unwrap();
        assert_eq!(game.player().pos.col, 3);
        game.tick(&rx, &mut screen, &mut rng, &pacing).unwrap();
        assert_eq!(game.player().pos.col, 4);
        game.tick(&rx, &mut screen, &mut rng, &pacing).unwrap();
        assert_eq!(game.player().pos.col, 4);
        assert_eq!(screen.frames.len(), 4);
    }

    #[test]
    fn cancel_ends_the_game_lost() {
        let mut game = game("#####\n#P..#\n#####\n");
        let (tx, rx) = mpsc::channel();
        tx.send(InputEvent::Cancel).unwrap();
        let mut screen = Recorder::default();
        let status = game
            .tick(&rx, &mut screen, &mut up_only(), &Pacing::instant())
            .unwrap();
        assert_eq!(status, Status::GameOver(Outcome::Lost));
        assert_eq!(game.lives(), 0);
        assert_eq!(screen.deaths, vec![Pos { row: 1, col: 1 }]);
    }

    #[test]
    fn collision_costs_a_life_and_respawns() {
        // The ghost has a wall above it, so with `up_only` it never moves.
        let mut game = game("######\n#P.G.#\n######\n");
        let mut screen = Recorder::default();
        let pacing = Pacing::instant();
        game.move_player(Dir::Right);
        game.move_player(Dir::Right);
        game.move_ghosts(&mut up_only());
        game.resolve_collisions(&mut screen, &pacing).unwrap();

        assert_eq!(game.lives(), 2);
        assert_eq!(game.player().pos, Pos { row: 1, col: 1 });
        assert_eq!(screen.deaths, vec![Pos { row: 1, col: 3 }]);
        assert_eq!(game.status(), Status::Running);
    }

    #[test]
    fn last_life_does_not_respawn() {
        let mut game = game("####\n#PG#\n####\n").with_lives(1);
        let mut screen = Recorder::default();
        game.move_player(Dir::Right);
        game.resolve_collisions(&mut screen, &Pacing::instant()).unwrap();

        assert_eq!(game.lives(), 0);
        assert_eq!(game.player().pos, Pos { row: 1, col: 2 });
        assert!(screen.deaths.is_empty());
        assert_eq!(game.status(), Status::GameOver(Outcome::Lost));
    }

    #[test]
    fn respawn_after_first_catch_spares_second_ghost() {
        let mut game = game("#####\n#PGG#\n#####\n");
        game.ghosts[1].pos = Pos { row: 1, col: 2 };
        let mut screen = Recorder::default();
        game.move_player(Dir::Right);
        game.resolve_collisions(&mut screen, &Pacing::instant()).unwrap();
        // First hit respawns the player, so the second ghost misses.
        assert_eq!(game.lives(), 2);
        assert_eq!(game.player().pos, Pos { row: 1, col: 1 });
    }

    #[test]
    fn blue_ghosts_still_cost_a_life() {
        let mut game = game("#####\n#XPG#\n#####\n");
        game.move_player(Dir::Left);
        game.move_player(Dir::Right);
        game.move_player(Dir::Right);
        assert!(game.power().is_active());
        game.resolve_collisions(&mut Recorder::default(), &Pacing::instant())
            .unwrap();
        assert_eq!(game.lives(), 2);
        game.power().shutdown();
    }

    #[test]
    fn every_ghost_gets_a_mode() {
        let game = game("#####\n#PGG#\n#G..#\n#####\n");
        assert_eq!(game.ghosts().len(), 3);
        assert_eq!(game.power().modes().len(), 3);
    }

    #[test]
    fn lost_wins_over_won_when_both_happen() {
        let game = game("P\n").with_lives(0);
        assert_eq!(game.maze().dots_left(), 0);
        assert_eq!(game.status(), Status::GameOver(Outcome::Lost));
    }
}
