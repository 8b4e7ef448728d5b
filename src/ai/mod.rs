//! Tic-Tac-Toe search
//!
//! Full-depth minimax with O as the maximising side. Scores are
//! `WIN_SCORE - depth` for an O win, `depth - WIN_SCORE` for an X win and 0
//! for a draw, so the search prefers the fastest win and the slowest loss.
//! No pruning or caching: the tree has at most 9! leaves.
//!
//! Ties keep the first child found in ascending cell order, which makes the
//! result a pure function of the board.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::puzzle::tictactoe::{Board, Player};
use crate::settings::Difficulty;

pub const WIN_SCORE: i32 = 10;

/// Chance that medium difficulty plays the searched move
pub const MEDIUM_OPTIMAL_CHANCE: f64 = 0.5;

/// Result of a search node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Best cell for the side to move (None at terminal nodes)
    pub index: Option<usize>,
    pub score: i32,
}

/// Evaluate `board` with `to_move` about to play
pub fn minimax(board: &Board, to_move: Player) -> Evaluation {
    search(board, to_move, 0)
}

fn search(board: &Board, to_move: Player, depth: i32) -> Evaluation {
    match board.winner() {
        Some(Player::O) => return terminal(WIN_SCORE - depth),
        Some(Player::X) => return terminal(depth - WIN_SCORE),
        None if board.is_full() => return terminal(0),
        None => {}
    }

    let mut best = Evaluation {
        index: None,
        score: match to_move {
            Player::O => i32::MIN,
            Player::X => i32::MAX,
        },
    };

    for index in board.empty_cells() {
        let mut child = *board;
        child.place(index, to_move);
        let score = search(&child, to_move.opponent(), depth + 1).score;

        let better = match to_move {
            Player::O => score > best.score,
            Player::X => score < best.score,
        };
        if better {
            best = Evaluation {
                index: Some(index),
                score,
            };
        }
    }
    best
}

fn terminal(score: i32) -> Evaluation {
    Evaluation { index: None, score }
}

/// Optimal cell for `to_move`, or None on a finished board
pub fn best_move(board: &Board, to_move: Player) -> Option<usize> {
    if board.is_terminal() {
        return None;
    }
    minimax(board, to_move).index
}

/// Uniformly random empty cell
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    if board.is_terminal() {
        return None;
    }
    let open: Vec<usize> = board.empty_cells().collect();
    open.choose(rng).copied()
}

/// Difficulty policy around the search
///
/// Easy is always random, medium flips a fair coin between the searched move
/// and a random one, hard always searches.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    to_move: Player,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<usize> {
    match difficulty {
        Difficulty::Easy => random_move(board, rng),
        Difficulty::Medium => {
            if rng.random_bool(MEDIUM_OPTIMAL_CHANCE) {
                best_move(board, to_move)
            } else {
                random_move(board, rng)
            }
        }
        Difficulty::Hard => best_move(board, to_move),
    }
}
