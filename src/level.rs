use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::Pos;
use crate::constants::{COINS_PLACED, GRID_H, GRID_W};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Tile {
    Wall,
    Empty,
    Coin,
    Door,
}

// Fixed layout: W = wall, . = empty, D = exit door. The door sits on the
// border at (19, 13) and only unlocks once enough coins are collected.
const LAYOUT: [&str; GRID_H] = [
    "WWWWWWWWWWWWWWWWWWWW",
    "W..................W",
    "W.WWW.W.WWWW.WWWW.WW",
    "W.W...W.....W......W",
    "W.WWWWW.WWW.W.WWW.WW",
    "W...W...W...W.W....W",
    "WWW.W.WWW.WWW.W.WWWW",
    "W...W.....W....W...W",
    "W.W.WWWWW.W.WWWWWW.W",
    "W.W.....W.W.W......W",
    "W.WWWWW.W.W.W.WWWWWW",
    "W.....W.W.W.W.W....W",
    "WWW.W.W.W.W.W.W.WWWW",
    "W..................D",
    "WWWWWWWWWWWWWWWWWWWW",
];

pub struct Maze {
    tiles: Vec<Vec<Tile>>,
}

impl Maze {
    pub fn new() -> Self {
        let tiles = LAYOUT
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        'W' => Tile::Wall,
                        'D' => Tile::Door,
                        _ => Tile::Empty,
                    })
                    .collect()
            })
            .collect();
        Self { tiles }
    }

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < GRID_W && (y as usize) < GRID_H
    }

    /// Out-of-range coordinates are a caller bug (legality is checked
    /// before querying) and panic via the index.
    pub fn tile(&self, pos: Pos) -> Tile {
        self.tiles[pos.y][pos.x]
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.tile(pos) == Tile::Wall
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        self.tiles[pos.y][pos.x] = tile;
    }

    /// Scatters coins onto distinct randomly chosen empty tiles.
    pub fn scatter_coins(&mut self, rng: &mut impl Rng) {
        let mut empties = Vec::new();
        for y in 0..GRID_H {
            for x in 0..GRID_W {
                if self.tiles[y][x] == Tile::Empty {
                    empties.push(Pos { x, y });
                }
            }
        }
        empties.shuffle(rng);
        for pos in empties.iter().take(COINS_PLACED) {
            self.tiles[pos.y][pos.x] = Tile::Coin;
        }
    }

    pub fn coin_count(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&tile| tile == Tile::Coin)
            .count()
    }
}
