use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tick_snake::engine::{Engine, EngineSettings, TickOutcome};
use tick_snake::grid::{GridSize, Position};
use tick_snake::input::{Direction, Direction::*, Input, Submission};
use tick_snake::snake::START_BODY;

fn pos(x: u16, y: u16) -> Position {
    Position::new(x, y)
}

fn engine(seed: u64) -> Engine {
    Engine::seeded(GridSize::new(16, 16), EngineSettings::default(), seed)
}

#[test]
fn first_tick_moves_one_tile_right() {
    let mut engine = engine(42);
    assert_eq!(engine.snapshot().snake, vec![pos(6, 4), pos(5, 4), pos(4, 4)]);
    let fruit = engine.fruit();

    let outcome = engine.advance_tick();
    let snake = engine.snapshot().snake;

    if fruit == pos(7, 4) {
        assert_eq!(outcome, TickOutcome::Ate);
        assert_eq!(snake, vec![pos(7, 4), pos(6, 4), pos(5, 4), pos(4, 4)]);
    } else {
        assert_eq!(outcome, TickOutcome::Moved);
        assert_eq!(snake, vec![pos(7, 4), pos(6, 4), pos(5, 4)]);
        assert_eq!(engine.fruit(), fruit);
    }
}

#[test]
fn double_turn_within_one_tick() {
    let mut engine = engine(1);
    assert_eq!(engine.turn(Down), Submission::Committed);
    assert_eq!(engine.turn(Up), Submission::Buffered);
    assert_eq!(engine.turn(Left), Submission::Ignored);

    engine.advance_tick();
    assert_eq!(engine.direction(), Down);
    assert_eq!(engine.snapshot().snake[0], pos(6, 5));
}

#[test]
fn reverse_keypress_is_ignored() {
    let mut engine = engine(2);
    engine.submit(Input::Turn(Left));
    engine.advance_tick();
    assert_eq!(engine.direction(), Right);
    assert_eq!(engine.snapshot().snake[0], pos(7, 4));
}

#[test]
fn running_into_the_wall_grace_then_reset() {
    let mut engine = engine(3);

    let mut before = engine.snapshot().snake;
    let mut outcome = engine.advance_tick();
    for _ in 0..20 {
        if outcome == TickOutcome::Grace {
            break;
        }
        before = engine.snapshot().snake;
        outcome = engine.advance_tick();
    }
    assert_eq!(outcome, TickOutcome::Grace);
    assert!(engine.grace_pending());
    assert_eq!(engine.snapshot().snake, before);
    assert_eq!(before[0], pos(15, 4));
    assert!(engine.tick_interval() < Duration::from_millis(250));

    assert_eq!(engine.advance_tick(), TickOutcome::Reset);
    assert_eq!(engine.snapshot().snake, START_BODY.to_vec());
    assert_eq!(engine.direction(), Right);
    assert_eq!(engine.tick_interval(), Duration::from_millis(250));
    assert_eq!(engine.round(), 2);
}

#[test]
fn tick_interval_follows_decay_curve() {
    let mut engine = Engine::seeded(GridSize::new(64, 16), EngineSettings::default(), 4);
    let n = 40;
    for _ in 0..n {
        assert_ne!(engine.advance_tick(), TickOutcome::Reset);
    }

    let expected = 250_000_000.0 * 0.999f64.powi(n);
    let actual = engine.tick_interval().as_nanos() as f64;
    assert!((actual - expected).abs() < 2.0, "{} vs {}", actual, expected);
}

/// Random play, checking the invariants that hold on every tick.
#[test]
fn random_play_keeps_invariants() {
    let grid = GridSize::new(12, 10);
    let settings = EngineSettings::default();
    let mut engine = Engine::seeded(grid, settings, 11);
    let mut rng = StdRng::seed_from_u64(12);
    let dirs = [Up, Down, Left, Right];
    let mut resets = 0;

    for _ in 0..5_000 {
        for _ in 0..rng.gen_range(0..4) {
            engine.turn(dirs[rng.gen_range(0..4)]);
        }

        let len = engine.len();
        let previous: Direction = engine.direction();
        let outcome = engine.advance_tick();
        let snap = engine.snapshot();

        match outcome {
            TickOutcome::Moved => assert_eq!(snap.snake.len(), len),
            TickOutcome::Ate => assert_eq!(snap.snake.len(), len + 1),
            TickOutcome::Grace => assert_eq!(snap.snake.len(), len),
            TickOutcome::Reset => {
                resets += 1;
                assert_eq!(snap.snake, START_BODY.to_vec());
            }
        }

        if matches!(outcome, TickOutcome::Moved | TickOutcome::Ate) {
            assert_ne!(engine.direction(), previous.opposite());
        }

        assert!(snap.snake.iter().all(|p| grid.contains(*p)));
        assert!(grid.contains(snap.fruit));
        assert!(!snap.snake.contains(&snap.fruit));
        assert!(engine.tick_interval() >= settings.min_tick);
    }

    assert!(resets > 0);
}

#[test]
fn restart_input_starts_a_fresh_round() {
    let mut engine = engine(5);
    engine.turn(Down);
    engine.advance_tick();
    engine.advance_tick();

    engine.submit(Input::Restart);
    assert_eq!(engine.snapshot().snake, START_BODY.to_vec());
    assert_eq!(engine.direction(), Right);
    assert!(!engine.grace_pending());
    assert_eq!(engine.round(), 2);
}
