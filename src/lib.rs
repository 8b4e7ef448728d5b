//! Arcade Sim - rules and simulation core for a small arcade collection
//!
//! Core modules:
//! - `ai`: Exhaustive Tic-Tac-Toe search and difficulty policy
//! - `sim`: Tick-driven games (Snake, Pacman, Breakout) sharing one tick driver
//! - `puzzle`: Move-driven games (Tic-Tac-Toe, 2048, Memory, Flow Free)
//! - `settings`: Difficulty, modes and cosmetic delays

pub mod ai;
pub mod puzzle;
pub mod settings;
pub mod sim;

#[cfg(test)]
pub(crate) mod testing;

pub use settings::{Difficulty, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Per-frame timestep for the frame-driven games (60 Hz display refresh)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum ticks run for a single elapsed-time update
    pub const MAX_SUBSTEPS: u32 = 8;
}
