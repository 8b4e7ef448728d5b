//! Tic-Tac-Toe board and game session
//!
//! X always moves first. In player-vs-AI mode the AI plays O and the human's
//! clicks are ignored while it is O's turn.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai;
use crate::settings::Difficulty;
use crate::sim::GameStatus;

/// Rows, columns and diagonals
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Player::X => "X",
            Player::O => "O",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    PlayerVsPlayer,
    #[default]
    PlayerVsAi,
}

/// Nine cells in row-major order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board([Option<Player>; 9]);

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a 9-character string of `X`, `O` and anything else for empty
    pub fn parse(s: &str) -> Option<Board> {
        let mut cells = [None; 9];
        let mut chars = s.chars();
        for cell in &mut cells {
            *cell = match chars.next()? {
                'X' | 'x' => Some(Player::X),
                'O' | 'o' => Some(Player::O),
                _ => None,
            };
        }
        chars.next().is_none().then_some(Board(cells))
    }

    pub fn get(&self, index: usize) -> Option<Player> {
        self.0.get(index).copied().flatten()
    }

    /// Place a mark on an empty in-range cell
    pub fn place(&mut self, index: usize, player: Player) -> bool {
        match self.0.get_mut(index) {
            Some(cell) if cell.is_none() => {
                *cell = Some(player);
                true
            }
            _ => false,
        }
    }

    pub fn cells(&self) -> &[Option<Player>; 9] {
        &self.0
    }

    /// Empty cell indices, ascending
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        (0..9).filter(|&i| self.0[i].is_none())
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    pub fn winner(&self) -> Option<Player> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.0[a]?;
            (self.0[b] == Some(mark) && self.0[c] == Some(mark)).then_some(mark)
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }
}

/// One Tic-Tac-Toe session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicTacToe {
    pub board: Board,
    pub to_move: Player,
    pub status: GameStatus,
    pub winner: Option<Player>,
    pub mode: Mode,
    pub difficulty: Difficulty,
}

impl TicTacToe {
    pub fn new(mode: Mode, difficulty: Difficulty) -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
            status: GameStatus::Playing,
            winner: None,
            mode,
            difficulty,
        }
    }

    /// Fresh board, same mode and difficulty
    pub fn restart(&mut self) {
        *self = Self::new(self.mode, self.difficulty);
    }

    /// Whether the AI should move next
    pub fn awaiting_ai(&self) -> bool {
        self.mode == Mode::PlayerVsAi && self.to_move == Player::O && self.status == GameStatus::Playing
    }

    /// Human move; ignored when illegal or when the AI is to move
    pub fn play(&mut self, index: usize) -> bool {
        if self.status.is_terminal() || self.awaiting_ai() {
            return false;
        }
        self.apply(index)
    }

    /// AI move for O, returning the chosen cell
    pub fn ai_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if !self.awaiting_ai() {
            return None;
        }
        let index = ai::choose_move(&self.board, Player::O, self.difficulty, rng)?;
        log::debug!("AI ({}) plays {index}", self.difficulty.as_str());
        self.apply(index).then_some(index)
    }

    fn apply(&mut self, index: usize) -> bool {
        if !self.board.place(index, self.to_move) {
            return false;
        }

        if let Some(winner) = self.board.winner() {
            self.status = GameStatus::Won;
            self.winner = Some(winner);
            log::info!("Tic-Tac-Toe won by {}", winner.as_str());
        } else if self.board.is_full() {
            self.status = GameStatus::Draw;
            log::info!("Tic-Tac-Toe drawn");
        } else {
            self.to_move = self.to_move.opponent();
        }
        true
    }
}
