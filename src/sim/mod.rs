//! Tick-driven simulation module
//!
//! Snake, Pacman and Breakout live here. Every game:
//! - Advances only through `tick`, one discrete step at a time
//! - Draws randomness from an injected RNG only
//! - Owns all of its actors; nothing is shared between instances
//! - Has no rendering or platform dependencies

pub mod breakout;
pub mod collision;
pub mod grid;
pub mod pacman;
pub mod schedule;
pub mod snake;
pub mod state;
pub mod tick;

pub use breakout::{Breakout, BreakoutInput};
pub use collision::{Rect, manhattan, near_center, paddle_english, reflect_velocity};
pub use grid::{Tile, TileMap};
pub use pacman::{Pacman, PacmanInput};
pub use schedule::FixedStep;
pub use snake::{SnakeInput, SnakeMatch, SnakeMode};
pub use state::{Direction, GameEvent, GameStatus, Side};
pub use tick::{TickReport, TickRules, tick};
