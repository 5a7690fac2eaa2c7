//! The tick state machine.
//!
//! An [`Engine`] owns everything that changes during play: the snake, the
//! fruit, the input buffer and the round state. The host feeds it keypresses
//! and calls [`Engine::advance_tick`] whenever a tick interval has elapsed; the
//! engine never looks at a clock itself.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::fruit::place_fruit;
use crate::grid::{GridSize, Position};
use crate::input::{Direction, Input, InputBuffer, Submission};
use crate::snake::{Snake, START_BODY};

/// Smallest board the fixed starting snake fits on with room to turn.
pub const MIN_GRID_WIDTH: u16 = 8;
pub const MIN_GRID_HEIGHT: u16 = 6;

pub const DEFAULT_TICK: Duration = Duration::from_millis(250);
pub const DEFAULT_DECAY: f64 = 0.999;
pub const DEFAULT_MIN_TICK: Duration = Duration::from_millis(10);

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EngineSettings {
    pub initial_tick: Duration,
    /// Multiplier applied to the tick interval after every tick.
    pub decay: f64,
    pub min_tick: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            initial_tick: DEFAULT_TICK,
            decay: DEFAULT_DECAY,
            min_tick: DEFAULT_MIN_TICK,
        }
    }
}

impl EngineSettings {
    pub fn is_valid(&self) -> bool {
        !self.min_tick.is_zero()
            && self.min_tick <= self.initial_tick
            && self.decay > 0.0
            && self.decay <= 1.0
    }
}

/// Per-round bookkeeping, rebuilt whenever a round starts.
#[derive(Copy, Clone, Debug, PartialEq)]
struct RoundState {
    tick_nanos: f64,
    grace: bool,
}

impl RoundState {
    fn new(settings: &EngineSettings) -> Self {
        RoundState {
            tick_nanos: settings.initial_tick.as_nanos() as f64,
            grace: false,
        }
    }

    fn decay(&mut self, settings: &EngineSettings) {
        let floor = settings.min_tick.as_nanos() as f64;
        self.tick_nanos = (self.tick_nanos * settings.decay).max(floor);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    /// Moved onto the fruit and grew by one segment.
    Ate,
    /// Would have crashed; the snake stayed put and the next crash resets.
    Grace,
    /// Crashed twice in a row and a fresh round started.
    Reset,
}

/// Read-only view for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Head first.
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub fruit: Position,
    pub grid: GridSize,
}

pub struct Engine<R = StdRng> {
    grid: GridSize,
    settings: EngineSettings,
    snake: Snake,
    fruit: Position,
    input: InputBuffer,
    round: RoundState,
    round_number: u32,
    rng: R,
}

impl Engine<StdRng> {
    pub fn new(grid: GridSize, settings: EngineSettings) -> Self {
        Engine::with_rng(grid, settings, StdRng::from_entropy())
    }

    pub fn seeded(grid: GridSize, settings: EngineSettings, seed: u64) -> Self {
        Engine::with_rng(grid, settings, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Panics if the grid or settings are out of range; hosts validate their
    /// configuration before getting here.
    pub fn with_rng(grid: GridSize, settings: EngineSettings, mut rng: R) -> Self {
        assert!(
            grid.width >= MIN_GRID_WIDTH && grid.height >= MIN_GRID_HEIGHT,
            "grid {}x{} is smaller than {}x{}",
            grid.width,
            grid.height,
            MIN_GRID_WIDTH,
            MIN_GRID_HEIGHT
        );
        assert!(settings.is_valid(), "invalid engine settings: {:?}", settings);

        let snake = Snake::starting();
        let fruit = place_fruit(&mut rng, grid, |p| snake.occupies(p));

        Engine {
            grid,
            settings,
            snake,
            fruit,
            input: InputBuffer::new(),
            round: RoundState::new(&settings),
            round_number: 1,
            rng,
        }
    }

    pub fn submit(&mut self, input: Input) {
        match input {
            Input::Turn(dir) => {
                let res = self.turn(dir);
                trace!(?dir, ?res, "turn submitted");
            }
            Input::Restart => self.restart(),
        }
    }

    pub fn turn(&mut self, dir: Direction) -> Submission {
        self.input.submit(dir, self.snake.direction())
    }

    /// Starts a new round regardless of what is buffered.
    pub fn restart(&mut self) {
        debug!(round = self.round_number, "restart requested");
        self.reset();
    }

    /// Performs exactly one simulation step.
    pub fn advance_tick(&mut self) -> TickOutcome {
        let direction = self.input.next_direction(self.snake.direction());
        let grid = self.grid;
        let snake = &self.snake;
        let candidate = direction
            .step(snake.head())
            .filter(|p| grid.contains(*p) && !snake.occupies(*p));

        let new_head = match candidate {
            Some(pos) => pos,
            None => return self.crash(),
        };

        self.round.grace = false;
        self.input.complete_tick(direction);

        let ate = new_head == self.fruit;
        self.snake.advance(new_head, direction, ate);

        let outcome = if ate {
            let snake = &self.snake;
            self.fruit = place_fruit(&mut self.rng, grid, |p| snake.occupies(p));
            debug!(len = self.snake.len(), x = self.fruit.x, y = self.fruit.y, "fruit eaten");
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        };

        self.round.decay(&self.settings);
        trace!(x = new_head.x, y = new_head.y, ?direction, "tick");
        outcome
    }

    fn crash(&mut self) -> TickOutcome {
        if !self.round.grace {
            self.round.grace = true;
            self.round.decay(&self.settings);
            debug!(x = self.snake.head().x, y = self.snake.head().y, "crash pending, grace tick");
            return TickOutcome::Grace;
        }

        info!(round = self.round_number, len = self.snake.len(), score = self.score(), "round over");
        self.reset();
        TickOutcome::Reset
    }

    fn reset(&mut self) {
        self.snake = Snake::starting();
        self.input.clear();
        self.round = RoundState::new(&self.settings);
        self.round_number += 1;

        let snake = &self.snake;
        self.fruit = place_fruit(&mut self.rng, self.grid, |p| snake.occupies(p));
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.body().iter().copied().collect(),
            direction: self.snake.direction(),
            fruit: self.fruit,
            grid: self.grid,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_nanos(self.round.tick_nanos.round() as u64)
    }

    /// Direction applied on the last completed move.
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn grace_pending(&self) -> bool {
        self.round.grace
    }

    pub fn round(&self) -> u32 {
        self.round_number
    }

    pub fn grid(&self) -> GridSize {
        self.grid
    }

    pub fn fruit(&self) -> Position {
        self.fruit
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn score(&self) -> usize {
        self.snake.len() - START_BODY.len()
    }
}
