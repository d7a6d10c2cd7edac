use rand::Rng;

use crate::components::Dir;
use crate::constants::COINS_REQUIRED;
use crate::level::{Maze, Tile};
use crate::monster::Monster;
use crate::player::Robot;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    InProgress,
    Victory,
    Defeat,
}

/// One round: the maze, both agents, and the win/loss state. The maze is
/// owned here and handed to the robot's move-acceptance step as the only
/// writer besides coin scatter at setup.
pub struct Game {
    pub maze: Maze,
    pub robot: Robot,
    pub monster: Monster,
    pub ticks: u64,
    pub outcome: Outcome,
}

impl Game {
    pub fn new(rng: &mut impl Rng) -> Self {
        let mut maze = Maze::new();
        maze.scatter_coins(rng);
        Self {
            maze,
            robot: Robot::new(),
            monster: Monster::new(),
            ticks: 0,
            outcome: Outcome::InProgress,
        }
    }

    /// Runs one fixed tick: player intent, monster decision, motion, then
    /// the outcome predicates. Victory is evaluated before Defeat so that
    /// reaching the door wins even if the monster lands there on the same
    /// tick. Both predicates compare discrete cells; pixel overlap during
    /// transit never ends the round.
    pub fn advance_tick(&mut self, intent: Option<Dir>, rng: &mut impl Rng) -> Outcome {
        if self.outcome != Outcome::InProgress {
            return self.outcome;
        }
        self.ticks += 1;

        if let Some(dir) = intent {
            if !self.robot.mover.moving {
                self.robot.request_move(dir, &mut self.maze);
            }
        }
        self.monster
            .choose_move(&self.maze, self.robot.mover.cell, rng);
        self.monster.advance();
        self.robot.advance();

        if self.maze.tile(self.robot.mover.cell) == Tile::Door
            && self.robot.coins_collected >= COINS_REQUIRED
        {
            self.outcome = Outcome::Victory;
        } else if self.robot.mover.cell == self.monster.mover.cell {
            self.outcome = Outcome::Defeat;
        }
        self.outcome
    }
}
