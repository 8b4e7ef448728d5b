//! Memory (pair matching)

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::sim::GameStatus;

pub const SYMBOLS: [char; 8] = ['🐶', '🐱', '🐭', '🐹', '🐰', '🦊', '🐻', '🐼'];

/// Result of flipping a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// Not allowed right now (two cards up, already up, matched, out of range)
    Ignored,
    /// First card of a pair is up
    First,
    /// Second card matched the first; both stay up
    Match,
    /// Second card differs; both stay up until `hide_mismatch`
    Mismatch,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Memory {
    pub cards: Vec<char>,
    pub matched: Vec<bool>,
    /// Face-up, unmatched cards (at most two)
    pub flipped: Vec<usize>,
    pub moves: u32,
    pub status: GameStatus,
}

impl Memory {
    /// Every symbol twice, shuffled
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards: Vec<char> = SYMBOLS.iter().chain(SYMBOLS.iter()).copied().collect();
        cards.shuffle(rng);
        Self::with_cards(cards)
    }

    pub fn with_cards(cards: Vec<char>) -> Self {
        Self {
            matched: vec![false; cards.len()],
            cards,
            flipped: Vec::with_capacity(2),
            moves: 0,
            status: GameStatus::Playing,
        }
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::new(rng);
    }

    pub fn is_face_up(&self, index: usize) -> bool {
        self.matched.get(index).copied().unwrap_or(false) || self.flipped.contains(&index)
    }

    /// Whether a mismatched pair is waiting to be hidden
    pub fn awaiting_hide(&self) -> bool {
        self.flipped.len() == 2
    }

    pub fn flip(&mut self, index: usize) -> Flip {
        if index >= self.cards.len() || self.awaiting_hide() || self.is_face_up(index) {
            return Flip::Ignored;
        }

        self.flipped.push(index);
        let &[first, second] = self.flipped.as_slice() else {
            return Flip::First;
        };

        self.moves += 1;
        if self.cards[first] != self.cards[second] {
            return Flip::Mismatch;
        }

        self.matched[first] = true;
        self.matched[second] = true;
        self.flipped.clear();
        if self.matched.iter().all(|&m| m) {
            self.status = GameStatus::Won;
            log::info!("Memory solved in {} moves", self.moves);
        }
        Flip::Match
    }

    /// Turn a mismatched pair back face-down
    pub fn hide_mismatch(&mut self) {
        if self.awaiting_hide() {
            self.flipped.clear();
        }
    }
}
