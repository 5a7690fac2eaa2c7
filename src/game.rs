use std::cmp::max;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::config::Config;
use crate::engine::{Engine, Snapshot, TickOutcome};
use crate::error::AppError;
use crate::grid::{GridGeometry, Position};
use crate::input::{Direction::*, Input};
use crate::scheduler::TickScheduler;
use crate::term::TermManager;

/// Terminal cells per tile; cells are roughly twice as tall as they are wide.
const TILE_WIDTH: u16 = 2;
const TILE_HEIGHT: u16 = 1;
/// Rows kept free under the board for the status line.
const STATUS_ROWS: u16 = 1;
/// Longest the loop sleeps waiting for keys while nothing is due.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

const SNAKE_BODY_TILE: [char; 2] = ['█', '█'];
const FRUIT_TILE: [char; 2] = ['(', ')'];
const DEAD_SNAKE_CHAR: char = 'X';
const EMPTY_TILE: [char; 2] = [' ', ' '];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HostKey {
    Input(Input),
    Pause,
    Quit,
}

pub fn map_key(ev: &KeyEvent) -> Option<HostKey> {
    if is_ctrl_c(ev) {
        return Some(HostKey::Quit);
    }

    let key = match ev.code {
        KeyCode::Char('w') | KeyCode::Up => HostKey::Input(Input::Turn(Up)),
        KeyCode::Char('a') | KeyCode::Left => HostKey::Input(Input::Turn(Left)),
        KeyCode::Char('s') | KeyCode::Down => HostKey::Input(Input::Turn(Down)),
        KeyCode::Char('d') | KeyCode::Right => HostKey::Input(Input::Turn(Right)),
        KeyCode::Char(' ') | KeyCode::Char('r') => HostKey::Input(Input::Restart),
        KeyCode::Esc => HostKey::Pause,
        KeyCode::Char('q') => HostKey::Quit,
        _ => return None,
    };
    Some(key)
}

pub struct SnakeGame {
    term: TermManager,
    engine: Engine,
    geometry: GridGeometry,
    scheduler: TickScheduler,
    paused: bool,
    exiting: bool,
    best_score: usize,
    drawn: Option<Snapshot>,
}

impl SnakeGame {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        config.validate()?;

        let term = TermManager::new()?;
        let grid = config.grid();
        let screen = term.get_terminal_size();
        let geometry = GridGeometry::centered(grid, TILE_WIDTH, TILE_HEIGHT, screen, STATUS_ROWS).ok_or(
            AppError::TerminalTooSmall {
                have_w: screen.0,
                have_h: screen.1,
                need_w: grid.width.saturating_add(1).saturating_mul(TILE_WIDTH),
                need_h: grid.height.saturating_add(1).saturating_mul(TILE_HEIGHT).saturating_add(STATUS_ROWS),
            },
        )?;

        let engine = match config.seed {
            Some(seed) => Engine::seeded(grid, config.engine_settings(), seed),
            None => Engine::new(grid, config.engine_settings()),
        };

        info!(width = grid.width, height = grid.height, tick_ms = config.tick_ms, decay = config.decay, "starting");

        Ok(SnakeGame {
            term,
            engine,
            geometry,
            scheduler: TickScheduler::new(),
            paused: false,
            exiting: false,
            best_score: 0,
            drawn: None,
        })
    }

    /// Takes over the terminal until the player quits, restoring it afterwards
    /// even if the game loop failed.
    pub fn run(&mut self) -> Result<(), AppError> {
        self.term.setup()?;
        let res = self.play();
        let restored = self.term.restore();
        res?;
        restored?;
        info!(best = self.best_score, rounds = self.engine.round(), "exiting");
        Ok(())
    }

    fn play(&mut self) -> Result<(), AppError> {
        self.term.clear()?;
        self.term.draw_borders(&self.geometry, self.engine.grid())?;
        self.render()?;
        self.show_intro()?;

        self.scheduler.schedule_after(Instant::now(), self.engine.tick_interval());

        while !self.exiting {
            let wait = if self.paused {
                POLL_INTERVAL
            } else {
                self.scheduler.wait_time(Instant::now(), POLL_INTERVAL)
            };

            for key_ev in self.term.read_key_events(wait)? {
                if let Some(key) = map_key(&key_ev) {
                    self.handle_key(key)?;
                }
            }

            if self.paused || self.exiting {
                continue;
            }

            let now = Instant::now();
            if self.scheduler.is_due(now) {
                let outcome = self.engine.advance_tick();
                if outcome == TickOutcome::Ate {
                    self.best_score = max(self.best_score, self.engine.score());
                }
                self.scheduler.schedule_after(now, self.engine.tick_interval());
                self.render()?;
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: HostKey) -> io::Result<()> {
        match key {
            HostKey::Quit => self.exiting = true,
            HostKey::Pause => self.toggle_pause()?,
            HostKey::Input(Input::Restart) => {
                debug!(round = self.engine.round(), "restart key");
                self.engine.submit(Input::Restart);
                self.scheduler.clear();
                if self.paused {
                    self.toggle_pause()?;
                }
                self.render()?;
            }
            HostKey::Input(input) => {
                if !self.paused {
                    self.engine.submit(input);
                }
            }
        }
        Ok(())
    }

    fn show_intro(&mut self) -> io::Result<()> {
        let lines = &[
            "Arrow keys or WASD to move",
            "Space to restart",
            "Esc to pause",
            "q or CTRL+C to quit",
            "",
            "Press any key to begin"
        ];

        self.term.show_message(lines)?;

        let key = self.term.read_key_blocking()?;
        if map_key(&key) == Some(HostKey::Quit) {
            self.exiting = true;
        }

        self.term.hide_message()
    }

    fn toggle_pause(&mut self) -> io::Result<()> {
        if !self.paused {
            self.term.show_message(&["Paused", "Press Esc to resume", "or q to quit"])?;
        } else {
            self.term.hide_message()?;
            self.scheduler.schedule_after(Instant::now(), self.engine.tick_interval());
        }

        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let snap = self.engine.snapshot();

        if let Some(prev) = self.drawn.take() {
            for pos in prev.snake.iter().chain(std::iter::once(&prev.fruit)) {
                if !snap.snake.contains(pos) && snap.fruit != *pos {
                    self.term.print_tile(&self.geometry, *pos, EMPTY_TILE)?;
                }
            }
        }

        self.term.print_tile(&self.geometry, snap.fruit, FRUIT_TILE)?;

        for pos in snap.snake.iter().skip(1) {
            self.term.print_tile(&self.geometry, *pos, SNAKE_BODY_TILE)?;
        }

        let head_char = if self.engine.grace_pending() {
            DEAD_SNAKE_CHAR
        } else {
            snap.direction.head_char()
        };
        if let Some(head) = snap.snake.first() {
            self.term.print_tile(&self.geometry, *head, [head_char, head_char])?;
        }

        self.draw_status()?;
        self.term.flush()?;
        self.drawn = Some(snap);
        Ok(())
    }

    fn draw_status(&mut self) -> io::Result<()> {
        let grid = self.engine.grid();
        let corner = self.geometry.to_pixel(Position::new(0, grid.height));
        let width = (grid.width + 1) * TILE_WIDTH;
        let text = format!(
            " Length: {}  Score: {}  Best: {}  Round: {}",
            self.engine.len(),
            self.engine.score(),
            self.best_score,
            self.engine.round()
        );
        self.term.print_line((corner.x, corner.y + TILE_HEIGHT), &text, width)
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
