//! Breakout
//!
//! Continuous-plane ball with lookahead wall reflection, a pointer-driven
//! paddle that imparts english, and a fixed wall of bricks.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, paddle_english, reflect_velocity};
use super::state::{GameEvent, GameStatus};
use super::tick::TickRules;
use crate::settings::Difficulty;

pub const FIELD_WIDTH: f32 = 600.0;
pub const FIELD_HEIGHT: f32 = 400.0;
pub const BALL_RADIUS: f32 = 8.0;
pub const PADDLE_HEIGHT: f32 = 15.0;

pub const BRICK_COLUMNS: usize = 8;
pub const BRICK_ROWS: usize = 5;
pub const BRICK_PADDING: f32 = 10.0;
pub const BRICK_OFFSET_TOP: f32 = 30.0;
pub const BRICK_OFFSET_LEFT: f32 = 35.0;
pub const BRICK_HEIGHT: f32 = 20.0;
pub const BRICK_WIDTH: f32 = (FIELD_WIDTH
    - BRICK_OFFSET_LEFT * 2.0
    - BRICK_PADDING * (BRICK_COLUMNS as f32 - 1.0))
    / BRICK_COLUMNS as f32;

pub const BRICK_REWARD: u32 = 1;
pub const START_LIVES: u8 = 3;

/// Ball launch point, 30 px above the bottom edge
const BALL_START: Vec2 = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - 30.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    fn launch(speed: f32) -> Self {
        Self {
            pos: BALL_START,
            vel: Vec2::new(speed, -speed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub col: usize,
    pub row: usize,
    pub rect: Rect,
    pub alive: bool,
}

/// Input intents for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakoutInput {
    /// Pointer x in field coordinates
    pub pointer_x: Option<f32>,
}

/// A complete Breakout session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breakout {
    pub difficulty: Difficulty,
    pub ball: Ball,
    pub paddle: Rect,
    pub bricks: Vec<Brick>,
    pub score: u32,
    pub lives: u8,
    pub status: GameStatus,
}

impl Breakout {
    pub fn new(difficulty: Difficulty) -> Self {
        let bricks = (0..BRICK_COLUMNS)
            .flat_map(|col| (0..BRICK_ROWS).map(move |row| (col, row)))
            .map(|(col, row)| Brick {
                col,
                row,
                rect: Rect::new(
                    col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT,
                    row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP,
                    BRICK_WIDTH,
                    BRICK_HEIGHT,
                ),
                alive: true,
            })
            .collect();
        log::info!("Breakout started on {}", difficulty.as_str());

        Self {
            difficulty,
            ball: Ball::launch(difficulty.breakout_ball_speed()),
            paddle: centered_paddle(difficulty.breakout_paddle_width()),
            bricks,
            score: 0,
            lives: START_LIVES,
            status: GameStatus::Playing,
        }
    }

    /// Full reinitialisation, optionally on a new difficulty
    pub fn restart(&mut self, difficulty: Difficulty) {
        *self = Self::new(difficulty);
    }

    pub fn active_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    /// Place the paddle centre at `x`, kept inside the field
    pub fn move_paddle(&mut self, x: f32) {
        if !x.is_finite() {
            return;
        }
        let max_x = FIELD_WIDTH - self.paddle.size.x;
        self.paddle.min.x = (x - self.paddle.size.x / 2.0).clamp(0.0, max_x);
    }

    fn reset_ball(&mut self) {
        self.ball = Ball::launch(self.difficulty.breakout_ball_speed());
        self.paddle = centered_paddle(self.paddle.size.x);
    }
}

fn centered_paddle(width: f32) -> Rect {
    Rect::new(
        (FIELD_WIDTH - width) / 2.0,
        FIELD_HEIGHT - PADDLE_HEIGHT,
        width,
        PADDLE_HEIGHT,
    )
}

impl TickRules for Breakout {
    type Input = BreakoutInput;

    fn status(&self) -> GameStatus {
        self.status
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn lives(&self) -> Option<u8> {
        Some(self.lives)
    }

    fn steer<R: Rng + ?Sized>(&mut self, input: &BreakoutInput, _rng: &mut R) {
        if let Some(x) = input.pointer_x {
            self.move_paddle(x);
        }
    }

    fn advance<R: Rng + ?Sized>(&mut self, _events: &mut Vec<GameEvent>, _rng: &mut R) {
        let ball = &mut self.ball;
        ball.pos += ball.vel;

        // Side and top walls reflect when the next step would cross them
        let next = ball.pos + ball.vel;
        if next.x > FIELD_WIDTH - BALL_RADIUS || next.x < BALL_RADIUS {
            ball.vel = reflect_velocity(ball.vel, Vec2::X);
        }
        if next.y < BALL_RADIUS {
            ball.vel = reflect_velocity(ball.vel, Vec2::Y);
        }
    }

    fn collide(&mut self, events: &mut Vec<GameEvent>) {
        let next_y = self.ball.pos.y + self.ball.vel.y;
        if self.ball.vel.y > 0.0 && next_y > FIELD_HEIGHT - BALL_RADIUS {
            if self.paddle.spans_x(self.ball.pos.x) {
                let offset = self.ball.pos.x - self.paddle.center().x;
                self.ball.vel = reflect_velocity(self.ball.vel, Vec2::Y);
                self.ball.vel.x = paddle_english(offset);
                events.push(GameEvent::PaddleBounce { offset });
            } else {
                self.lives = self.lives.saturating_sub(1);
                log::debug!("Ball lost, {} lives left", self.lives);
                events.push(GameEvent::BallLost { lives: self.lives });
                if self.lives > 0 {
                    self.reset_ball();
                }
                return;
            }
        }

        for brick in self.bricks.iter_mut().filter(|b| b.alive) {
            if brick.rect.contains(self.ball.pos) {
                brick.alive = false;
                self.ball.vel = reflect_velocity(self.ball.vel, Vec2::Y);
                self.score += BRICK_REWARD;
                events.push(GameEvent::BrickBroken {
                    col: brick.col,
                    row: brick.row,
                });
            }
        }
    }

    fn verdict(&self) -> Option<GameStatus> {
        if self.active_bricks() == 0 {
            Some(GameStatus::Won)
        } else if self.lives == 0 {
            Some(GameStatus::Lost)
        } else {
            None
        }
    }

    fn conclude(&mut self, status: GameStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::tick;
    use crate::testing::ConstRng;
    use proptest::prelude::*;

    fn step(game: &mut Breakout, pointer_x: Option<f32>) -> crate::sim::tick::TickReport {
        tick(game, &BreakoutInput { pointer_x }, &mut ConstRng(0))
    }

    #[test]
    fn test_initial_layout() {
        let game = Breakout::new(Difficulty::Medium);
        assert_eq!(game.bricks.len(), BRICK_COLUMNS * BRICK_ROWS);
        assert_eq!(BRICK_WIDTH, 57.5);
        assert_eq!(game.ball.pos, Vec2::new(300.0, 370.0));
        assert_eq!(game.ball.vel, Vec2::new(4.0, -4.0));
        assert_eq!(game.paddle.min.x, 250.0);
        assert_eq!(game.paddle.size.x, 100.0);

        let last = game.bricks.last().map(|b| b.rect);
        assert_eq!(last, Some(Rect::new(7.0 * 67.5 + 35.0, 150.0, 57.5, 20.0)));
    }

    #[test]
    fn test_pointer_is_clamped() {
        let mut game = Breakout::new(Difficulty::Easy);
        game.move_paddle(300.0);
        assert_eq!(game.paddle.center().x, 300.0);
        game.move_paddle(10.0);
        assert_eq!(game.paddle.min.x, 0.0);
        game.move_paddle(1000.0);
        assert_eq!(game.paddle.max().x, FIELD_WIDTH);
        game.move_paddle(f32::NAN);
        assert_eq!(game.paddle.max().x, FIELD_WIDTH);
    }

    #[test]
    fn test_side_wall_reflects() {
        let mut game = Breakout::new(Difficulty::Medium);
        game.ball.pos = Vec2::new(586.0, 200.0);
        game.ball.vel = Vec2::new(4.0, -4.0);
        step(&mut game, None);
        assert_eq!(game.ball.pos, Vec2::new(590.0, 196.0));
        assert_eq!(game.ball.vel, Vec2::new(-4.0, -4.0));
    }

    #[test]
    fn test_corner_reflects_both_axes() {
        let mut game = Breakout::new(Difficulty::Medium);
        game.ball.pos = Vec2::new(10.0, 10.0);
        game.ball.vel = Vec2::new(-4.0, -4.0);
        let report = step(&mut game, None);
        assert_eq!(game.ball.pos, Vec2::new(6.0, 6.0));
        assert_eq!(game.ball.vel, Vec2::new(4.0, 4.0));
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_paddle_english() {
        let mut game = Breakout::new(Difficulty::Medium);
        game.ball.pos = Vec2::new(326.0, 386.0);
        game.ball.vel = Vec2::new(4.0, 4.0);

        let report = step(&mut game, None);
        assert_eq!(game.ball.vel.y, -4.0);
        assert!((game.ball.vel.x - 4.5).abs() < 1e-4);
        assert!(report.events.contains(&GameEvent::PaddleBounce { offset: 30.0 }));

        // Left of centre sends the ball left
        game.ball.pos = Vec2::new(274.0, 386.0);
        game.ball.vel = Vec2::new(-4.0, 4.0);
        step(&mut game, None);
        assert!(game.ball.vel.x < 0.0);
    }

    #[test]
    fn test_brick_breaks() {
        let mut game = Breakout::new(Difficulty::Medium);
        game.ball.pos = Vec2::new(60.0, 52.0);
        game.ball.vel = Vec2::new(1.0, -4.0);

        let report = step(&mut game, None);
        assert_eq!(report.score, 1);
        assert_eq!(game.ball.vel.y, 4.0);
        assert_eq!(game.active_bricks(), BRICK_COLUMNS * BRICK_ROWS - 1);
        assert_eq!(report.events, [GameEvent::BrickBroken { col: 0, row: 0 }]);
    }

    #[test]
    fn test_miss_costs_life_and_resets() {
        let mut game = Breakout::new(Difficulty::Hard);
        game.move_paddle(400.0);
        game.ball.pos = Vec2::new(50.0, 386.0);
        game.ball.vel = Vec2::new(4.0, 4.0);

        let report = step(&mut game, None);
        assert_eq!(report.lives, Some(2));
        assert_eq!(report.status, GameStatus::Playing);
        assert_eq!(game.ball.pos, BALL_START);
        assert_eq!(game.ball.vel, Vec2::new(6.0, -6.0));
        assert_eq!(game.paddle.min.x, 260.0);
    }

    #[test]
    fn test_last_life_loses() {
        let mut game = Breakout::new(Difficulty::Medium);
        game.lives = 1;
        game.ball.pos = Vec2::new(50.0, 386.0);
        game.ball.vel = Vec2::new(4.0, 4.0);

        let report = step(&mut game, None);
        assert_eq!(report.status, GameStatus::Lost);
        assert_eq!(report.events.last(), Some(&GameEvent::Finished(GameStatus::Lost)));
    }

    #[test]
    fn test_last_brick_wins() {
        let mut game = Breakout::new(Difficulty::Medium);
        for brick in game.bricks.iter_mut().skip(1) {
            brick.alive = false;
        }
        game.ball.pos = Vec2::new(60.0, 52.0);
        game.ball.vel = Vec2::new(1.0, -4.0);

        let report = step(&mut game, None);
        assert_eq!(report.status, GameStatus::Won);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn ball_stays_in_field(
            pointers in prop::collection::vec(prop::option::of(0.0f32..600.0), 1..800),
        ) {
            let mut game = Breakout::new(Difficulty::Hard);
            for pointer_x in pointers {
                let report = step(&mut game, pointer_x);
                let pos = game.ball.pos;
                prop_assert!(pos.x >= -BALL_RADIUS && pos.x <= FIELD_WIDTH + BALL_RADIUS);
                prop_assert!(pos.y >= -BALL_RADIUS && pos.y <= FIELD_HEIGHT + BALL_RADIUS);
                prop_assert_eq!(
                    report.score as usize + game.active_bricks(),
                    BRICK_COLUMNS * BRICK_ROWS
                );
            }
        }
    }
}
