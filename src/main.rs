//! Arcade Sim entry point
//!
//! Headless demo: plays each game with AI or scripted input on a simulated
//! clock and logs the outcome. Pass a settings JSON path as the only argument.

use std::time::Duration;

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use arcade_sim::ai;
use arcade_sim::puzzle::{Flip, FlowFree, Memory, Mode, TicTacToe, Tiles};
use arcade_sim::sim::snake::ai_direction;
use arcade_sim::sim::{
    Breakout, BreakoutInput, Direction, FixedStep, Pacman, PacmanInput, SnakeInput, SnakeMatch,
    TickReport, TickRules, tick,
};
use arcade_sim::{Difficulty, Settings};

/// Simulated time per rendered frame (60 Hz)
const FRAME: Duration = Duration::from_micros(16_667);
/// Give up on a tick game after this many simulated frames (five minutes)
const MAX_FRAMES: u32 = 60 * 60 * 5;
/// Chance per tick that the Pacman demo player requests a turn
const PACMAN_TURN_CHANCE: f64 = 0.05;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
    log::info!(
        "Arcade Sim starting (difficulty {}, seed {seed})",
        settings.difficulty.as_str()
    );
    let mut rng = Pcg32::seed_from_u64(seed);

    play_tictactoe(&settings, &mut rng);
    play_snake(&settings, &mut rng);
    play_pacman(&mut rng);
    play_breakout(&settings, &mut rng);
    play_tiles(&settings, &mut rng);
    play_memory(&settings, &mut rng);
    show_flow(&settings);
}

/// Drive a tick game through `FixedStep` until it ends or runs out of time
fn run<G, F>(name: &str, game: &mut G, step: &mut FixedStep, rng: &mut Pcg32, mut input: F) -> Option<TickReport>
where
    G: TickRules,
    F: FnMut(&G, &mut Pcg32) -> G::Input,
{
    let mut last = None;
    let mut ticks = 0;
    'frames: for _ in 0..MAX_FRAMES {
        for _ in 0..step.advance(FRAME) {
            let intent = input(game, rng);
            let report = tick(game, &intent, rng);
            ticks += 1;
            let done = report.status.is_terminal();
            last = Some(report);
            if done {
                break 'frames;
            }
        }
    }
    if !game.status().is_terminal() {
        log::warn!("{name}: still playing after {MAX_FRAMES} frames, stopping");
    }
    log::debug!("{name}: {ticks} ticks, {:?} of game time", step.period() * ticks);
    step.stop();
    last
}

fn play_tictactoe(settings: &Settings, rng: &mut Pcg32) {
    let mut game = TicTacToe::new(settings.tictactoe_mode, settings.difficulty);
    // The demo's human (and, in PvP, both sides) play random legal cells
    while !game.status.is_terminal() {
        if game.awaiting_ai() {
            log::debug!("AI thinking for {:?}", settings.ai_think_delay());
            game.ai_turn(rng);
        } else if let Some(index) = ai::random_move(&game.board, rng) {
            game.play(index);
        }
    }
    let mode = match game.mode {
        Mode::PlayerVsPlayer => "PvP",
        Mode::PlayerVsAi => "PvE",
    };
    let winner = game.winner.map_or("nobody", |p| p.as_str());
    log::info!("Tic-Tac-Toe ({mode}): {} for {winner}", game.status.as_str());
}

fn play_snake(settings: &Settings, rng: &mut Pcg32) {
    let mut game = SnakeMatch::new(settings.snake_mode, settings.difficulty, rng);
    let mut step = FixedStep::interval(settings.difficulty.snake_tick_interval());

    let report = run("Snake", &mut game, &mut step, rng, |game, rng| {
        // The human seat is played by the greedy policy
        let turn = game.boards.first().and_then(|board| {
            let snake = board.snakes.first().filter(|s| !s.is_ai)?;
            Some(ai_direction(snake, board.food, &board.snakes, Difficulty::Medium, rng))
        });
        SnakeInput { turn }
    });

    let lengths: Vec<usize> = game.snakes().map(|s| s.len()).collect();
    log::info!(
        "Snake: {} (winner {:?}, lengths {lengths:?}, score {})",
        game.status.as_str(),
        game.winner,
        report.map_or(0, |r| r.score)
    );
}

fn play_pacman(rng: &mut Pcg32) {
    let mut game = Pacman::new();
    let mut step = FixedStep::per_frame();

    let report = run("Pacman", &mut game, &mut step, rng, |_, rng| PacmanInput {
        turn: rng
            .random_bool(PACMAN_TURN_CHANCE)
            .then(|| Direction::ALL.choose(rng).copied())
            .flatten(),
    });

    log::info!(
        "Pacman: {} with {} points, {} pellets left",
        game.status.as_str(),
        report.map_or(0, |r| r.score),
        game.pellets_remaining
    );
}

fn play_breakout(settings: &Settings, rng: &mut Pcg32) {
    let mut game = Breakout::new(settings.difficulty);
    let mut step = FixedStep::per_frame();

    let report = run("Breakout", &mut game, &mut step, rng, |game, _| {
        // Meet the ball off-centre so bounces keep some english
        let lead = if game.score % 2 == 0 { 20.0 } else { -20.0 };
        BreakoutInput {
            pointer_x: Some(game.ball.pos.x - lead),
        }
    });

    log::info!(
        "Breakout: {} with {} bricks broken, {} lives left",
        game.status.as_str(),
        report.as_ref().map_or(0, |r| r.score),
        game.lives
    );
}

fn play_tiles(settings: &Settings, rng: &mut Pcg32) {
    const PREFERENCE: [Direction; 4] = [Direction::Down, Direction::Left, Direction::Right, Direction::Up];

    let mut game = Tiles::new(rng);
    let mut moves = 0;
    while !game.status.is_terminal() {
        if !PREFERENCE.iter().any(|&dir| game.make_move(dir, rng)) {
            break;
        }
        moves += 1;
    }
    log::debug!(
        "2048: {moves} moves, {:?} spent on tile spawn pauses",
        settings.tile_spawn_delay() * moves
    );
    log::info!("2048: score {}, highest tile {}", game.score, game.highest());
}

fn play_memory(settings: &Settings, rng: &mut Pcg32) {
    let mut game = Memory::new(rng);
    let count = game.cards.len();
    let mut seen: Vec<Option<char>> = vec![None; count];

    while !game.status.is_terminal() {
        let Some(first) = (0..count).find(|&i| !game.is_face_up(i)) else {
            break;
        };
        game.flip(first);
        seen[first] = Some(game.cards[first]);

        let known_partner = (0..count).find(|&j| j != first && !game.matched[j] && seen[j] == seen[first]);
        let unseen = (0..count).find(|&j| j != first && seen[j].is_none());
        let Some(second) = known_partner.or(unseen) else {
            break;
        };
        seen[second] = Some(game.cards[second]);
        if game.flip(second) == Flip::Mismatch {
            log::debug!("Mismatch, hiding after {:?}", settings.mismatch_hide_delay());
            game.hide_mismatch();
        }
    }
    log::info!("Memory: {} in {} moves", game.status.as_str(), game.moves);
}

fn show_flow(settings: &Settings) {
    let game = FlowFree::new(settings.difficulty, settings.flow_level);
    log::info!(
        "Flow: {}×{} board with {} flows loaded",
        game.size(),
        game.size(),
        game.endpoints().len()
    );
}
