use crate::constants::TILE_SIZE;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub fn manhattan(self, other: Pos) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// Grid-to-pixel interpolation shared by the robot and the monster.
///
/// A move is a single cell hop: `begin_move` locks in a target cell and
/// `advance` walks `pixel` toward it by at most `speed` px per axis per
/// tick, clamped at the target so arrival is always exact even when the
/// speed does not divide the tile size. `cell` changes only on arrival;
/// while `moving` is set, further move requests are dropped.
pub struct Mover {
    pub cell: Pos,
    pub pixel: (f32, f32),
    pub target: Pos,
    pub dir: (isize, isize),
    pub moving: bool,
    speed: f32,
}

impl Mover {
    pub fn new(cell: Pos, speed: f32) -> Self {
        Self {
            cell,
            pixel: (cell.x as f32 * TILE_SIZE, cell.y as f32 * TILE_SIZE),
            target: cell,
            dir: (0, 0),
            moving: false,
            speed,
        }
    }

    pub fn begin_move(&mut self, dx: isize, dy: isize) {
        if self.moving {
            return;
        }
        self.target = Pos {
            x: (self.cell.x as isize + dx) as usize,
            y: (self.cell.y as isize + dy) as usize,
        };
        self.dir = (dx, dy);
        self.moving = true;
    }

    pub fn advance(&mut self) {
        if !self.moving {
            return;
        }
        let tx = self.target.x as f32 * TILE_SIZE;
        let ty = self.target.y as f32 * TILE_SIZE;
        self.pixel.0 = step_toward(self.pixel.0, tx, self.speed);
        self.pixel.1 = step_toward(self.pixel.1, ty, self.speed);
        if self.pixel.0 == tx && self.pixel.1 == ty {
            self.cell = self.target;
            self.moving = false;
        }
    }
}

fn step_toward(current: f32, target: f32, speed: f32) -> f32 {
    if current < target {
        (current + speed).min(target)
    } else if current > target {
        (current - speed).max(target)
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrival_is_exact_even_when_speed_does_not_divide_tile() {
        // 3 px/tick against 40 px tiles: the clamp must land exactly on
        // the target instead of oscillating around it.
        let mut mover = Mover::new(Pos { x: 1, y: 1 }, 3.0);
        mover.begin_move(1, 0);
        let mut ticks = 0;
        while mover.moving {
            mover.advance();
            ticks += 1;
            assert!(ticks <= 100, "mover never arrived");
        }
        assert_eq!(mover.pixel, (2.0 * TILE_SIZE, TILE_SIZE));
        assert_eq!(mover.cell, Pos { x: 2, y: 1 });
        assert_eq!(ticks, 14); // ceil(40 / 3)
    }

    #[test]
    fn cell_updates_only_on_arrival() {
        let mut mover = Mover::new(Pos { x: 1, y: 1 }, 4.0);
        mover.begin_move(0, 1);
        assert_eq!(mover.cell, Pos { x: 1, y: 1 });
        assert_eq!(mover.target, Pos { x: 1, y: 2 });
        for _ in 0..9 {
            mover.advance();
            assert_eq!(mover.cell, Pos { x: 1, y: 1 });
            assert!(mover.moving);
        }
        mover.advance();
        assert_eq!(mover.cell, Pos { x: 1, y: 2 });
        assert!(!mover.moving);
    }

    #[test]
    fn begin_move_while_in_transit_is_dropped() {
        let mut mover = Mover::new(Pos { x: 1, y: 1 }, 4.0);
        mover.begin_move(1, 0);
        mover.advance();
        let pixel_before = mover.pixel;
        mover.begin_move(0, 1);
        assert_eq!(mover.target, Pos { x: 2, y: 1 });
        assert_eq!(mover.dir, (1, 0));
        assert_eq!(mover.pixel, pixel_before);
    }
}
