//! Move-driven games
//!
//! These advance only on a player action, never on a timer. Illegal actions
//! are ignored and reported through `bool`/`Option` returns.

pub mod flow;
pub mod memory;
pub mod tictactoe;
pub mod tiles;

pub use flow::FlowFree;
pub use memory::{Flip, Memory};
pub use tictactoe::{Board, Mode, Player, TicTacToe};
pub use tiles::Tiles;
