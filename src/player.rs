use crate::components::{Dir, Mover, Pos};
use crate::constants::{COINS_REQUIRED, ROBOT_SPEED, ROBOT_START};
use crate::level::{Maze, Tile};

pub struct Robot {
    pub mover: Mover,
    pub coins_collected: u32,
}

impl Robot {
    pub fn new() -> Self {
        let (x, y) = ROBOT_START;
        Self {
            mover: Mover::new(Pos { x, y }, ROBOT_SPEED),
            coins_collected: 0,
        }
    }

    /// Applies a directional intent. Illegal moves (mid-transit, out of
    /// bounds, wall, locked door) are normal gameplay and dropped silently.
    /// A coin is collected the instant the move is accepted, before the
    /// robot visually arrives on the tile.
    pub fn request_move(&mut self, dir: Dir, maze: &mut Maze) {
        if self.mover.moving {
            return;
        }
        let (dx, dy) = dir.delta();
        let nx = self.mover.cell.x as isize + dx;
        let ny = self.mover.cell.y as isize + dy;
        if !maze.in_bounds(nx, ny) {
            return;
        }
        let next = Pos {
            x: nx as usize,
            y: ny as usize,
        };
        match maze.tile(next) {
            Tile::Wall => return,
            Tile::Door if self.coins_collected < COINS_REQUIRED => return,
            Tile::Coin => {
                self.coins_collected += 1;
                maze.set_tile(next, Tile::Empty);
            }
            _ => {}
        }
        self.mover.begin_move(dx, dy);
    }

    pub fn advance(&mut self) {
        self.mover.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn robot_at(x: usize, y: usize, coins: u32) -> Robot {
        Robot {
            mover: Mover::new(Pos { x, y }, ROBOT_SPEED),
            coins_collected: coins,
        }
    }

    #[test]
    fn move_into_wall_is_rejected() {
        let mut maze = Maze::new();
        let mut robot = robot_at(1, 1, 0);
        robot.request_move(Dir::Up, &mut maze); // (1, 0) is a border wall
        assert!(!robot.mover.moving);
        assert_eq!(robot.mover.cell, Pos { x: 1, y: 1 });
    }

    #[test]
    fn door_stays_locked_below_the_coin_requirement() {
        let mut maze = Maze::new();
        let mut robot = robot_at(18, 13, COINS_REQUIRED - 1);
        robot.request_move(Dir::Right, &mut maze);
        assert!(!robot.mover.moving);

        robot.coins_collected = COINS_REQUIRED;
        robot.request_move(Dir::Right, &mut maze);
        assert!(robot.mover.moving);
        assert_eq!(robot.mover.target, Pos { x: 19, y: 13 });
    }

    #[test]
    fn coin_is_collected_at_move_acceptance() {
        let mut maze = Maze::new();
        maze.set_tile(Pos { x: 2, y: 1 }, Tile::Coin);
        let mut robot = robot_at(1, 1, 2);
        robot.request_move(Dir::Right, &mut maze);

        // Counter and tile flip immediately; the robot is still in transit.
        assert_eq!(robot.coins_collected, 3);
        assert_eq!(maze.tile(Pos { x: 2, y: 1 }), Tile::Empty);
        assert!(robot.mover.moving);
        assert_eq!(robot.mover.cell, Pos { x: 1, y: 1 });
        assert_eq!(robot.mover.target, Pos { x: 2, y: 1 });
    }

    #[test]
    fn coin_cannot_be_collected_twice() {
        let mut maze = Maze::new();
        maze.set_tile(Pos { x: 2, y: 1 }, Tile::Coin);
        let mut robot = robot_at(1, 1, 0);

        robot.request_move(Dir::Right, &mut maze);
        while robot.mover.moving {
            robot.advance();
        }
        robot.request_move(Dir::Left, &mut maze);
        while robot.mover.moving {
            robot.advance();
        }
        robot.request_move(Dir::Right, &mut maze);
        assert_eq!(robot.coins_collected, 1);
    }

    #[test]
    fn requests_while_in_transit_are_dropped() {
        let mut maze = Maze::new();
        let mut robot = robot_at(1, 1, 0);
        robot.request_move(Dir::Down, &mut maze); // (1, 2) is open
        assert!(robot.mover.moving);
        robot.request_move(Dir::Right, &mut maze);
        assert_eq!(robot.mover.target, Pos { x: 1, y: 2 });
        assert_eq!(robot.mover.dir, (0, 1));
    }
}
