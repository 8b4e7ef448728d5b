//! Shared tick driver
//!
//! Every tick-driven game advances through the same phase order:
//! 1. `steer`: buffered turns, applied near cell centres
//! 2. `advance`: actors move one at a time in a fixed order; AI actors pick
//!    their heading just before their own move, so they see every actor that
//!    already moved this tick. Then the leading-edge obstacle test and the
//!    boundary wrap or reflection
//! 3. `collect`: pickups resolved by proximity
//! 4. `collide`: actor-vs-actor contact
//! 5. `verdict`: termination rule
//!
//! The games only supply the per-phase rules; the loop body lives here once.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameStatus};

/// Per-game movement, collision and termination rules
pub trait TickRules {
    /// Input intents for one tick (zero or one per actor)
    type Input;

    fn status(&self) -> GameStatus;

    fn score(&self) -> u32;

    /// Lives left, for games that have them
    fn lives(&self) -> Option<u8> {
        None
    }

    fn steer<R: Rng + ?Sized>(&mut self, input: &Self::Input, rng: &mut R);

    fn advance<R: Rng + ?Sized>(&mut self, events: &mut Vec<GameEvent>, rng: &mut R);

    fn collect<R: Rng + ?Sized>(&mut self, _events: &mut Vec<GameEvent>, _rng: &mut R) {}

    fn collide(&mut self, _events: &mut Vec<GameEvent>) {}

    /// Terminal status reached this tick, if any
    fn verdict(&self) -> Option<GameStatus>;

    /// Record the terminal status
    fn conclude(&mut self, status: GameStatus);
}

/// Authoritative state deltas after one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub events: Vec<GameEvent>,
    pub score: u32,
    pub lives: Option<u8>,
    pub status: GameStatus,
}

/// Advance a game by exactly one tick
///
/// A game in a terminal status is left untouched.
pub fn tick<G, R>(game: &mut G, input: &G::Input, rng: &mut R) -> TickReport
where
    G: TickRules,
    R: Rng + ?Sized,
{
    let mut events = Vec::new();

    if !game.status().is_terminal() {
        game.steer(input, rng);
        game.advance(&mut events, rng);
        game.collect(&mut events, rng);
        game.collide(&mut events);

        if let Some(status) = game.verdict().filter(|s| s.is_terminal()) {
            game.conclude(status);
            log::info!("Game finished: {} (score {})", status.as_str(), game.score());
            events.push(GameEvent::Finished(status));
        }
    }

    TickReport {
        events,
        score: game.score(),
        lives: game.lives(),
        status: game.status(),
    }
}
