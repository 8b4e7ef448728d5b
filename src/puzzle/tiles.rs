//! 2048
//!
//! 4×4 board of tile values (0 = empty). A slide compresses every line toward
//! the moved-to edge and merges each adjacent equal pair once; a merged tile
//! never merges again in the same slide.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::sim::{Direction, GameStatus};

pub const SIZE: usize = 4;
/// Chance a spawned tile is a 2 rather than a 4
pub const TWO_CHANCE: f64 = 0.9;

pub type Line = [u32; SIZE];

/// Compress a line toward index 0, returning the new line and points scored
pub fn slide_line(line: Line) -> (Line, u32) {
    let mut out = [0; SIZE];
    let mut len = 0;
    let mut gained = 0;
    let mut mergeable = false;

    for value in line.into_iter().filter(|&v| v != 0) {
        if mergeable && out[len - 1] == value {
            out[len - 1] *= 2;
            gained += out[len - 1];
            mergeable = false;
        } else {
            out[len] = value;
            len += 1;
            mergeable = true;
        }
    }
    (out, gained)
}

/// Cell indices of each line, ordered from the edge tiles slide toward
fn lines(dir: Direction) -> [[usize; SIZE]; SIZE] {
    std::array::from_fn(|i| {
        std::array::from_fn(|k| match dir {
            Direction::Left => i * SIZE + k,
            Direction::Right => i * SIZE + (SIZE - 1 - k),
            Direction::Up => k * SIZE + i,
            Direction::Down => (SIZE - 1 - k) * SIZE + i,
        })
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tiles {
    pub cells: [u32; SIZE * SIZE],
    pub score: u32,
    pub status: GameStatus,
}

impl Tiles {
    /// New game with two spawned tiles
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Self::from_cells([0; SIZE * SIZE]);
        game.spawn_tile(rng);
        game.spawn_tile(rng);
        log::info!("2048 started");
        game
    }

    pub fn from_cells(cells: [u32; SIZE * SIZE]) -> Self {
        Self {
            cells,
            score: 0,
            status: GameStatus::Playing,
        }
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::new(rng);
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.cells.len()).filter(|&i| self.cells[i] == 0)
    }

    pub fn highest(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Slide without spawning; false (and no change) if nothing would move
    pub fn slide(&mut self, dir: Direction) -> bool {
        if self.status.is_terminal() {
            return false;
        }

        let mut next = self.cells;
        let mut gained = 0;
        for idx in lines(dir) {
            let (line, points) = slide_line(idx.map(|i| self.cells[i]));
            for (&i, value) in idx.iter().zip(line) {
                next[i] = value;
            }
            gained += points;
        }

        if next == self.cells {
            return false;
        }
        self.cells = next;
        self.score += gained;
        true
    }

    /// Place a 2 (90%) or 4 on a random empty cell, then check for game over
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        let open: Vec<usize> = self.empty_cells().collect();
        let index = *open.choose(rng)?;
        self.cells[index] = if rng.random_bool(TWO_CHANCE) { 2 } else { 4 };

        if self.is_stuck() {
            self.status = GameStatus::Lost;
            log::info!("2048 over with score {}", self.score);
        }
        Some(index)
    }

    /// Slide and, if anything moved, spawn a tile
    pub fn make_move<R: Rng + ?Sized>(&mut self, dir: Direction, rng: &mut R) -> bool {
        let moved = self.slide(dir);
        if moved {
            self.spawn_tile(rng);
        }
        moved
    }

    /// Full board with no equal orthogonal neighbours
    pub fn is_stuck(&self) -> bool {
        if self.cells.contains(&0) {
            return false;
        }
        (0..SIZE).all(|r| {
            (0..SIZE).all(|c| {
                let value = self.cells[r * SIZE + c];
                let right = c + 1 < SIZE && self.cells[r * SIZE + c + 1] == value;
                let down = r + 1 < SIZE && self.cells[(r + 1) * SIZE + c] == value;
                !right && !down
            })
        })
    }
}
