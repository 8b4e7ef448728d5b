//! Snake
//!
//! Cell-indexed movement on a 20x20 board. The grid edge and every live body
//! are lethal; growth is "push a new head, then skip the tail pop" on the tick
//! the food is eaten.

use std::collections::VecDeque;

use glam::IVec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::collision::grid_manhattan;
use super::state::{Direction, GameEvent, GameStatus, Side};
use super::tick::TickRules;
use crate::settings::Difficulty;

/// Board width and height in cells
pub const GRID_SIZE: i32 = 20;
/// Score per food item
pub const FOOD_REWARD: u32 = 10;
/// Starting body length
pub const START_LENGTH: i32 = 3;

/// Match layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnakeMode {
    /// One human snake
    #[default]
    Single,
    /// Two AI snakes sharing one board
    AiVsAi,
    /// A human and an AI snake, each on its own board
    HumanVsAi,
}

/// One snake; `body[0]` is the head
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    pub side: Side,
    pub body: VecDeque<IVec2>,
    pub heading: Direction,
    /// Buffered turn, applied on the next tick
    pub queued: Direction,
    pub is_ai: bool,
    pub alive: bool,
    pub score: u32,
    /// Head was pushed this tick and the tail is still pending
    #[serde(skip)]
    moved: bool,
}

impl Snake {
    /// Vertical snake in column `x`, head up, tail at the bottom row
    pub fn new(side: Side, x: i32, is_ai: bool) -> Self {
        let bottom = GRID_SIZE - 1;
        let body = (0..START_LENGTH)
            .map(|i| IVec2::new(x, bottom - (START_LENGTH - 1) + i))
            .collect();
        Self {
            side,
            body,
            heading: Direction::Up,
            queued: Direction::Up,
            is_ai,
            alive: true,
            score: 0,
            moved: false,
        }
    }

    pub fn head(&self) -> IVec2 {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, cell: IVec2) -> bool {
        self.body.contains(&cell)
    }

    /// Buffer a turn; reversing onto the neck is ignored
    pub fn queue_turn(&mut self, dir: Direction) {
        if dir != self.heading.opposite() {
            self.queued = dir;
        }
    }
}

/// Snakes sharing one board, plus its food
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnakeBoard {
    pub snakes: Vec<Snake>,
    /// None only when every cell is occupied
    pub food: Option<IVec2>,
}

impl SnakeBoard {
    fn new<R: Rng + ?Sized>(snakes: Vec<Snake>, rng: &mut R) -> Self {
        let food = free_cell(&snakes, rng);
        Self { snakes, food }
    }
}

/// Input intents for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct SnakeInput {
    /// Turn requested for the human snake
    pub turn: Option<Direction>,
}

/// A complete Snake session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnakeMatch {
    pub mode: SnakeMode,
    pub difficulty: Difficulty,
    pub boards: Vec<SnakeBoard>,
    pub status: GameStatus,
    /// Surviving side of a two-sided match
    pub winner: Option<Side>,
}

impl SnakeMatch {
    pub fn new<R: Rng + ?Sized>(mode: SnakeMode, difficulty: Difficulty, rng: &mut R) -> Self {
        let boards = match mode {
            SnakeMode::Single => vec![SnakeBoard::new(vec![Snake::new(Side::First, 10, false)], rng)],
            SnakeMode::AiVsAi => vec![SnakeBoard::new(
                vec![
                    Snake::new(Side::First, 5, true),
                    Snake::new(Side::Second, 15, true),
                ],
                rng,
            )],
            SnakeMode::HumanVsAi => vec![
                SnakeBoard::new(vec![Snake::new(Side::First, 10, false)], rng),
                SnakeBoard::new(vec![Snake::new(Side::Second, 10, true)], rng),
            ],
        };
        log::info!("Snake started: {:?} on {}", mode, difficulty.as_str());
        Self {
            mode,
            difficulty,
            boards,
            status: GameStatus::Playing,
            winner: None,
        }
    }

    /// Rebuild from the canonical layout
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::new(self.mode, self.difficulty, rng);
    }

    pub fn snakes(&self) -> impl Iterator<Item = &Snake> {
        self.boards.iter().flat_map(|b| b.snakes.iter())
    }

    pub fn snake(&self, side: Side) -> Option<&Snake> {
        self.snakes().find(|s| s.side == side)
    }

    fn side_alive(&self, side: Side) -> bool {
        self.snake(side).is_some_and(|s| s.alive)
    }
}

impl TickRules for SnakeMatch {
    type Input = SnakeInput;

    fn status(&self) -> GameStatus {
        self.status
    }

    /// Score of the first side (the human in human modes)
    fn score(&self) -> u32 {
        self.snake(Side::First).map_or(0, |s| s.score)
    }

    fn steer<R: Rng + ?Sized>(&mut self, input: &SnakeInput, _rng: &mut R) {
        let Some(turn) = input.turn else { return };
        for snake in self.boards.iter_mut().flat_map(|b| b.snakes.iter_mut()) {
            if snake.alive && !snake.is_ai {
                snake.queue_turn(turn);
            }
        }
    }

    fn advance<R: Rng + ?Sized>(&mut self, events: &mut Vec<GameEvent>, rng: &mut R) {
        let difficulty = self.difficulty;
        for board in &mut self.boards {
            for i in 0..board.snakes.len() {
                if !board.snakes[i].alive {
                    continue;
                }
                // AI snakes decide on the board as left by the snakes before them
                if board.snakes[i].is_ai {
                    let dir = ai_direction(&board.snakes[i], board.food, &board.snakes, difficulty, rng);
                    board.snakes[i].queued = dir;
                }

                let snake = &mut board.snakes[i];
                snake.heading = snake.queued;
                let head = snake.head() + snake.heading.delta();

                // Leaving the grid or running into any live body is fatal
                let blocked = !in_bounds(head)
                    || board.snakes.iter().any(|other| other.alive && other.occupies(head));

                let snake = &mut board.snakes[i];
                if blocked {
                    snake.alive = false;
                    log::debug!("Snake {:?} died at {}", snake.side, head);
                    events.push(GameEvent::SnakeDied { side: snake.side });
                } else {
                    snake.body.push_front(head);
                    snake.moved = true;
                }
            }
        }
    }

    fn collect<R: Rng + ?Sized>(&mut self, events: &mut Vec<GameEvent>, rng: &mut R) {
        for board in &mut self.boards {
            let mut eaten = false;
            for snake in board.snakes.iter_mut().filter(|s| s.moved) {
                snake.moved = false;
                if Some(snake.head()) == board.food && !eaten {
                    eaten = true;
                    snake.score += FOOD_REWARD;
                    events.push(GameEvent::FoodEaten { side: snake.side });
                } else {
                    snake.body.pop_back();
                }
            }
            if eaten {
                board.food = free_cell(&board.snakes, rng);
            }
        }
    }

    fn verdict(&self) -> Option<GameStatus> {
        match self.mode {
            SnakeMode::Single => (!self.side_alive(Side::First)).then_some(GameStatus::Lost),
            SnakeMode::AiVsAi | SnakeMode::HumanVsAi => {
                match (self.side_alive(Side::First), self.side_alive(Side::Second)) {
                    (true, true) => None,
                    (false, false) => Some(GameStatus::Draw),
                    (true, false) => Some(GameStatus::Won),
                    // In HumanVsAi the human is the first side
                    (false, true) if self.mode == SnakeMode::HumanVsAi => Some(GameStatus::Lost),
                    (false, true) => Some(GameStatus::Won),
                }
            }
        }
    }

    fn conclude(&mut self, status: GameStatus) {
        self.status = status;
        if self.mode != SnakeMode::Single && status != GameStatus::Draw {
            self.winner = [Side::First, Side::Second]
                .into_iter()
                .find(|&side| self.side_alive(side));
        }
    }
}

fn in_bounds(cell: IVec2) -> bool {
    cell.x >= 0 && cell.x < GRID_SIZE && cell.y >= 0 && cell.y < GRID_SIZE
}

/// Uniformly random cell not covered by any body (live or dead)
fn free_cell<R: Rng + ?Sized>(snakes: &[Snake], rng: &mut R) -> Option<IVec2> {
    let free: Vec<IVec2> = (0..GRID_SIZE)
        .flat_map(|y| (0..GRID_SIZE).map(move |x| IVec2::new(x, y)))
        .filter(|&cell| !snakes.iter().any(|s| s.occupies(cell)))
        .collect();
    free.choose(rng).copied()
}

/// AI steering: keep to safe cells, then chase the food
///
/// Easy picks a random safe move; Medium and Hard take the safe move closest
/// to the food (ties in `Direction::ALL` order). With no safe move the snake
/// keeps its heading.
pub fn ai_direction<R: Rng + ?Sized>(
    snake: &Snake,
    food: Option<IVec2>,
    snakes: &[Snake],
    difficulty: Difficulty,
    rng: &mut R,
) -> Direction {
    let head = snake.head();
    let safe: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|d| {
            let next = head + d.delta();
            in_bounds(next) && !snakes.iter().any(|s| s.alive && s.occupies(next))
        })
        .collect();

    if safe.is_empty() {
        return snake.heading;
    }

    if difficulty == Difficulty::Easy {
        return safe.choose(rng).copied().unwrap_or(snake.heading);
    }

    match food {
        Some(food) => safe
            .iter()
            .copied()
            .min_by_key(|d| grid_manhattan(head + d.delta(), food))
            .unwrap_or(snake.heading),
        None => safe[0],
    }
}
