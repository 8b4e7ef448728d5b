//! Shared simulation types
//!
//! Status, headings and events used by every tick-driven game.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a game instance
///
/// Only ever moves from `Playing` to one of the terminal states; a restart
/// rebuilds the game instead of leaving a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Playing
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Playing => "Playing",
            GameStatus::Won => "Won",
            GameStatus::Lost => "Lost",
            GameStatus::Draw => "Draw",
        }
    }
}

/// Discrete direction intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Canonical evaluation order; ties in every AI resolve in this order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in grid coordinates (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Which side of a two-sided match an actor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

/// Something notable that happened during a tick (for sound/HUD collaborators)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A snake ate the food and grew
    FoodEaten { side: Side },
    /// A snake hit a wall or a body
    SnakeDied { side: Side },
    /// Pacman ate the pellet in this tile
    PelletEaten { col: i32, row: i32 },
    /// A ghost caught Pacman
    Caught { lives: u8 },
    /// Ball bounced off the paddle at this offset from its centre
    PaddleBounce { offset: f32 },
    /// Ball broke a brick
    BrickBroken { col: usize, row: usize },
    /// Ball fell past the paddle
    BallLost { lives: u8 },
    /// Game reached a terminal status
    Finished(GameStatus),
}
