//! Pacman
//!
//! Actors move in pixel space over a tile map. Turns snap to cell centres,
//! walls are tested at the leading edge, pellets and ghosts are resolved by
//! Manhattan proximity, and the side edges form a tunnel.

use glam::{IVec2, Vec2};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::collision::{manhattan, near_center};
use super::grid::{Tile, TileMap};
use super::state::{Direction, GameEvent, GameStatus};
use super::tick::TickRules;

pub const TILE_SIZE: f32 = 20.0;
pub const MAP_WIDTH: usize = 19;
pub const MAP_HEIGHT: usize = 21;

/// 1 wall, 0 pellet, 2 empty, 3 ghost house, 4 Pacman start
pub const LEVEL_MAP: [[u8; MAP_WIDTH]; MAP_HEIGHT] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 1, 0, 1],
    [1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 0, 1, 1, 1, 2, 1, 2, 1, 1, 1, 0, 1, 1, 1, 1],
    [2, 2, 2, 1, 0, 1, 2, 2, 2, 2, 2, 2, 2, 1, 0, 1, 2, 2, 2],
    [1, 1, 1, 1, 0, 1, 2, 1, 1, 3, 1, 1, 2, 1, 0, 1, 1, 1, 1],
    [2, 2, 2, 2, 0, 2, 2, 1, 3, 3, 3, 1, 2, 2, 0, 2, 2, 2, 2],
    [1, 1, 1, 1, 0, 1, 2, 1, 1, 1, 1, 1, 2, 1, 0, 1, 1, 1, 1],
    [2, 2, 2, 1, 0, 1, 2, 2, 2, 2, 2, 2, 2, 1, 0, 1, 2, 2, 2],
    [1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 1, 1, 0, 1, 0, 1, 1, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 1, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0, 0, 1, 0, 0, 1],
    [1, 1, 0, 1, 0, 1, 0, 1, 1, 1, 1, 1, 0, 1, 0, 1, 0, 1, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

pub const PELLET_REWARD: u32 = 10;
pub const START_LIVES: u8 = 3;
pub const PACMAN_SPEED: f32 = 2.0;
/// Ghost spawn cells and speeds
pub const GHOSTS: [((i32, i32), f32); 3] = [((9, 8), 2.0), ((8, 10), 1.5), ((10, 10), 1.0)];
/// Leading-edge distance for the wall test
pub const ACTOR_RADIUS: f32 = 9.0;
/// Buffered turns apply within this distance of a centre (per axis)
pub const TURN_TOLERANCE: f32 = 3.0;
/// Ghosts retarget within this distance of a centre (per axis)
pub const GHOST_TURN_TOLERANCE: f32 = 2.0;
/// Pellet pickup radius (Manhattan)
pub const PELLET_RADIUS: f32 = 5.0;
/// Ghost contact radius (Manhattan)
pub const CATCH_DISTANCE: f32 = TILE_SIZE / 1.5;
/// Chance a ghost picks a random forward direction instead of chasing
pub const GHOST_JITTER: f64 = 0.3;

/// A moving actor (Pacman or a ghost)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    /// Current travel direction (None = standing still)
    pub heading: Option<Direction>,
    /// Buffered turn request
    pub queued: Option<Direction>,
    pub speed: f32,
    spawn: Vec2,
    spawn_heading: Option<Direction>,
}

impl Actor {
    fn new(pos: Vec2, heading: Option<Direction>, speed: f32) -> Self {
        Self {
            pos,
            heading,
            queued: heading,
            speed,
            spawn: pos,
            spawn_heading: heading,
        }
    }

    /// Back to the spawn point with the starting heading
    fn respawn(&mut self) {
        self.pos = self.spawn;
        self.heading = self.spawn_heading;
        self.queued = self.spawn_heading;
    }

    /// Back to the spawn point, still facing the same way
    fn return_home(&mut self) {
        self.pos = self.spawn;
    }

    /// Apply the buffered turn if near a centre and the target cell is open
    fn apply_turn(&mut self, map: &TileMap) {
        let Some(want) = self.queued else { return };
        if self.heading == Some(want) {
            return;
        }
        let cell = map.nearest_cell(self.pos);
        let center = map.center_of(cell);
        if near_center(self.pos, center, TURN_TOLERANCE) && !map.is_wall(cell + want.delta()) {
            self.pos = center;
            self.heading = Some(want);
        }
    }

    /// Move one step unless the leading edge would enter a wall, then wrap
    fn step(&mut self, map: &TileMap) {
        if let Some(dir) = self.heading {
            let d = dir.delta().as_vec2();
            let next = self.pos + d * self.speed;
            let lead = map.cell_at(next + d * ACTOR_RADIUS);
            if !map.is_wall(lead) {
                self.pos = next;
            }
        }

        let width = map.pixel_width();
        if self.pos.x < 0.0 {
            self.pos.x = width;
        } else if self.pos.x > width {
            self.pos.x = 0.0;
        }
    }
}

/// Input intents for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct PacmanInput {
    pub turn: Option<Direction>,
}

/// A complete Pacman session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pacman {
    pub map: TileMap,
    pub player: Actor,
    pub ghosts: Vec<Actor>,
    pub score: u32,
    pub lives: u8,
    pub pellets_remaining: usize,
    pub status: GameStatus,
}

impl Default for Pacman {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacman {
    pub fn new() -> Self {
        let map = TileMap::from_rows(&LEVEL_MAP, TILE_SIZE);
        let spawn = map.find(Tile::Spawn).unwrap_or(IVec2::new(9, 16));
        let player = Actor::new(map.center_of(spawn), Some(Direction::Right), PACMAN_SPEED);
        let ghosts = GHOSTS
            .iter()
            .map(|&((x, y), speed)| Actor::new(map.center_of(IVec2::new(x, y)), None, speed))
            .collect();
        let pellets_remaining = map.count(Tile::Pellet);
        log::info!("Pacman started with {pellets_remaining} pellets");

        Self {
            map,
            player,
            ghosts,
            score: 0,
            lives: START_LIVES,
            pellets_remaining,
            status: GameStatus::Playing,
        }
    }

    /// Rebuild from the canonical layout
    pub fn restart(&mut self) {
        *self = Self::new();
    }
}

impl TickRules for Pacman {
    type Input = PacmanInput;

    fn status(&self) -> GameStatus {
        self.status
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn lives(&self) -> Option<u8> {
        Some(self.lives)
    }

    fn steer<R: Rng + ?Sized>(&mut self, input: &PacmanInput, _rng: &mut R) {
        if let Some(turn) = input.turn {
            self.player.queued = Some(turn);
        }
        self.player.apply_turn(&self.map);
    }

    fn advance<R: Rng + ?Sized>(&mut self, _events: &mut Vec<GameEvent>, rng: &mut R) {
        self.player.step(&self.map);

        // Ghosts chase where Pacman is after this tick's move
        let target = self.player.pos;
        for ghost in &mut self.ghosts {
            ghost.heading = ghost_heading(ghost, target, &self.map, rng);
            ghost.step(&self.map);
        }
    }

    fn collect<R: Rng + ?Sized>(&mut self, events: &mut Vec<GameEvent>, _rng: &mut R) {
        let cell = self.map.cell_at(self.player.pos);
        if self.map.tile(cell) != Tile::Pellet {
            return;
        }
        if manhattan(self.player.pos, self.map.center_of(cell)) < PELLET_RADIUS {
            self.map.set(cell, Tile::Empty);
            self.score += PELLET_REWARD;
            self.pellets_remaining = self.pellets_remaining.saturating_sub(1);
            events.push(GameEvent::PelletEaten {
                col: cell.x,
                row: cell.y,
            });
        }
    }

    fn collide(&mut self, events: &mut Vec<GameEvent>) {
        // At most one catch per tick; the first ghost in order wins
        let caught = self
            .ghosts
            .iter()
            .any(|g| manhattan(self.player.pos, g.pos) < CATCH_DISTANCE);
        if !caught {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        log::debug!("Pacman caught, {} lives left", self.lives);
        events.push(GameEvent::Caught { lives: self.lives });

        if self.lives > 0 {
            self.player.respawn();
            for ghost in &mut self.ghosts {
                ghost.return_home();
            }
        }
    }

    fn verdict(&self) -> Option<GameStatus> {
        if self.pellets_remaining == 0 {
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

/// Ghost targeting policy
///
/// Only re-decides near a cell centre. Never reverses unless that is the only
/// way out; otherwise chases the target by Manhattan distance, with a
/// `GHOST_JITTER` chance of a random forward pick instead.
pub fn ghost_heading<R: Rng + ?Sized>(
    ghost: &Actor,
    target: Vec2,
    map: &TileMap,
    rng: &mut R,
) -> Option<Direction> {
    let cell = map.cell_at(ghost.pos);
    if !near_center(ghost.pos, map.center_of(cell), GHOST_TURN_TOLERANCE) {
        return ghost.heading;
    }

    let valid: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|d| !map.is_wall(cell + d.delta()))
        .collect();
    let mut forward: Vec<Direction> = valid
        .iter()
        .copied()
        .filter(|d| ghost.heading != Some(d.opposite()))
        .collect();

    if forward.is_empty() {
        return valid
            .first()
            .copied()
            .or_else(|| ghost.heading.map(Direction::opposite));
    }

    let goal = target / map.tile_size();
    let distance = |d: &Direction| manhattan((cell + d.delta()).as_vec2(), goal);
    // Stable sort keeps Direction::ALL order on ties
    forward.sort_by(|a, b| distance(a).total_cmp(&distance(b)));

    if rng.random_bool(GHOST_JITTER) {
        forward.choose(rng).copied()
    } else {
        Some(forward[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::tick;
    use crate::testing::{ConstRng, ScriptedRng};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn center(x: i32, y: i32) -> Vec2 {
        Vec2::new((x as f32 + 0.5) * TILE_SIZE, (y as f32 + 0.5) * TILE_SIZE)
    }

    #[test]
    fn test_initial_layout() {
        let game = Pacman::new();
        assert_eq!(game.player.pos, center(9, 16));
        assert_eq!(game.pellets_remaining, game.map.count(Tile::Pellet));
        assert!(game.pellets_remaining > 0);
        for ghost in &game.ghosts {
            assert!(!game.map.is_wall(game.map.cell_at(ghost.pos)));
        }
    }

    #[test]
    fn test_wall_ahead_blocks_move() {
        let mut game = Pacman::new();
        game.ghosts.clear();
        // Cell above the spawn is a wall
        game.player.heading = Some(Direction::Up);
        game.player.queued = Some(Direction::Up);
        let before = game.player.pos;

        tick(&mut game, &PacmanInput::default(), &mut ConstRng(u64::MAX));
        assert_eq!(game.player.pos, before);
    }

    #[test]
    fn test_turn_into_wall_is_not_taken() {
        let mut game = Pacman::new();
        game.ghosts.clear();
        let input = PacmanInput {
            turn: Some(Direction::Up),
        };
        tick(&mut game, &input, &mut ConstRng(u64::MAX));
        // Kept heading right, turn stays buffered
        assert_eq!(game.player.heading, Some(Direction::Right));
        assert_eq!(game.player.queued, Some(Direction::Up));
        assert_eq!(game.player.pos, center(9, 16) + Vec2::new(PACMAN_SPEED, 0.0));
    }

    #[test]
    fn test_turn_snaps_to_center() {
        let mut game = Pacman::new();
        game.ghosts.clear();
        // Two pixels past the centre of (8,14); the cell below is open
        game.player.pos = center(8, 14) + Vec2::new(2.0, 0.0);
        let input = PacmanInput {
            turn: Some(Direction::Down),
        };
        tick(&mut game, &input, &mut ConstRng(u64::MAX));
        assert_eq!(game.player.heading, Some(Direction::Down));
        assert_eq!(game.player.pos, center(8, 14) + Vec2::new(0.0, PACMAN_SPEED));
    }

    #[test]
    fn test_pellet_eaten_by_proximity() {
        let mut game = Pacman::new();
        game.ghosts.clear();
        let before = game.pellets_remaining;
        let mut rng = ConstRng(u64::MAX);

        let mut report = tick(&mut game, &PacmanInput::default(), &mut rng);
        for _ in 0..7 {
            report = tick(&mut game, &PacmanInput::default(), &mut rng);
        }
        // x = 206: inside (10,16), 4px from its centre
        assert_eq!(game.player.pos.x, 206.0);
        assert_eq!(report.score, PELLET_REWARD);
        assert_eq!(game.pellets_remaining, before - 1);
        assert_eq!(game.map.tile(IVec2::new(10, 16)), Tile::Empty);
        assert!(report.events.contains(&GameEvent::PelletEaten { col: 10, row: 16 }));
    }

    #[test]
    fn test_last_pellet_wins() {
        let mut game = Pacman::new();
        game.ghosts.clear();
        game.pellets_remaining = 1;
        game.player.pos = center(10, 16) - Vec2::new(6.0, 0.0);

        let report = tick(&mut game, &PacmanInput::default(), &mut ConstRng(u64::MAX));
        assert_eq!(report.status, GameStatus::Won);
        assert_eq!(report.events.last(), Some(&GameEvent::Finished(GameStatus::Won)));
    }

    #[test]
    fn test_tunnel_wraps() {
        let mut game = Pacman::new();
        game.ghosts.clear();
        game.player.pos = center(17, 10);
        let mut rng = ConstRng(u64::MAX);

        let mut wrapped = false;
        for _ in 0..30 {
            tick(&mut game, &PacmanInput::default(), &mut rng);
            wrapped |= game.player.pos.x < TILE_SIZE;
            assert!(!game.map.is_wall(game.map.cell_at(game.player.pos)));
        }
        assert!(wrapped);
    }

    #[test]
    fn test_catch_costs_life_and_resets() {
        let mut game = Pacman::new();
        game.ghosts.truncate(1);
        game.ghosts[0].pos = game.player.pos + Vec2::new(8.0, 0.0);
        game.ghosts[0].heading = Some(Direction::Left);

        let report = tick(&mut game, &PacmanInput::default(), &mut ConstRng(u64::MAX));
        assert_eq!(report.lives, Some(START_LIVES - 1));
        assert_eq!(report.status, GameStatus::Playing);
        assert_eq!(game.player.pos, center(9, 16));
        assert_eq!(game.ghosts[0].pos, center(9, 8));
        // Ghosts keep facing the way they were going
        assert_eq!(game.ghosts[0].heading, Some(Direction::Left));
        assert_eq!(game.player.heading, Some(Direction::Right));
    }

    #[test]
    fn test_last_life_loses() {
        let mut game = Pacman::new();
        game.lives = 1;
        game.ghosts[0].pos = game.player.pos;

        let report = tick(&mut game, &PacmanInput::default(), &mut ConstRng(u64::MAX));
        assert_eq!(report.status, GameStatus::Lost);
        assert_eq!(report.lives, Some(0));

        // Terminal: further ticks change nothing
        let pos = game.player.pos;
        tick(&mut game, &PacmanInput::default(), &mut ConstRng(u64::MAX));
        assert_eq!(game.player.pos, pos);
    }

    #[test]
    fn test_ghost_chases_greedily() {
        let game = Pacman::new();
        // From (9,8) the open cells are Down, Left and Right; Down is closest to Pacman
        let dir = ghost_heading(&game.ghosts[0], game.player.pos, &game.map, &mut ConstRng(u64::MAX));
        assert_eq!(dir, Some(Direction::Down));
    }

    #[test]
    fn test_ghost_does_not_reverse() {
        let mut game = Pacman::new();
        game.ghosts[0].heading = Some(Direction::Up);
        let dir = ghost_heading(&game.ghosts[0], game.player.pos, &game.map, &mut ConstRng(u64::MAX));
        assert_eq!(dir, Some(Direction::Right));
    }

    #[test]
    fn test_ghost_reverses_out_of_dead_end() {
        let mut game = Pacman::new();
        // (8,10) only opens to the right
        game.ghosts[1].heading = Some(Direction::Left);
        let dir = ghost_heading(&game.ghosts[1], game.player.pos, &game.map, &mut ConstRng(u64::MAX));
        assert_eq!(dir, Some(Direction::Right));
    }

    #[test]
    fn test_ghost_jitter_picks_any_forward_direction() {
        let game = Pacman::new();
        let ghost = &game.ghosts[0];
        let target = game.player.pos;
        // Forward choices from (9,8) ranked by distance: Down, Right, Left
        let mut last = ScriptedRng::new(&[0, u64::MAX]);
        assert_eq!(ghost_heading(ghost, target, &game.map, &mut last), Some(Direction::Left));

        let mut middle = ScriptedRng::new(&[0, 1 << 63]);
        assert_eq!(ghost_heading(ghost, target, &game.map, &mut middle), Some(Direction::Right));

        // A false coin skips the pick and chases
        let mut greedy = ScriptedRng::new(&[u64::MAX, 0]);
        assert_eq!(ghost_heading(ghost, target, &game.map, &mut greedy), Some(Direction::Down));
    }

    #[test]
    fn test_ghost_targets_pacman_after_his_move() {
        let mut game = Pacman::new();
        game.ghosts.truncate(1);
        game.ghosts[0].heading = Some(Direction::Up);
        // On the line between (8,8) and (10,8) before the move, right of it after
        game.player.pos = Vec2::new(9.0 * TILE_SIZE, 16.5 * TILE_SIZE);

        tick(&mut game, &PacmanInput::default(), &mut ConstRng(u64::MAX));
        assert_eq!(game.player.pos.x, 9.0 * TILE_SIZE + PACMAN_SPEED);
        assert_eq!(game.ghosts[0].heading, Some(Direction::Right));
    }

    #[test]
    fn test_ghost_keeps_heading_between_centres() {
        let mut game = Pacman::new();
        game.ghosts[0].pos += Vec2::new(5.0, 0.0);
        game.ghosts[0].heading = Some(Direction::Right);
        let dir = ghost_heading(&game.ghosts[0], game.player.pos, &game.map, &mut ConstRng(0));
        assert_eq!(dir, Some(Direction::Right));
    }

    fn turn_strategy() -> impl Strategy<Value = Option<Direction>> {
        prop_oneof![
            4 => Just(None),
            1 => Just(Some(Direction::Up)),
            1 => Just(Some(Direction::Down)),
            1 => Just(Some(Direction::Left)),
            1 => Just(Some(Direction::Right)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn actors_never_enter_walls(
            seed in any::<u64>(),
            turns in prop::collection::vec(turn_strategy(), 1..600),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut game = Pacman::new();

            for turn in turns {
                tick(&mut game, &PacmanInput { turn }, &mut rng);
                prop_assert!(!game.map.is_wall(game.map.cell_at(game.player.pos)));
                for ghost in &game.ghosts {
                    prop_assert!(!game.map.is_wall(game.map.cell_at(ghost.pos)));
                }
            }
        }
    }
}
