//! Snake on a fixed grid.
//!
//! [`engine::Engine`] is the whole game: a synchronous state machine advanced
//! one tick at a time. Everything under [`game`] and [`term`] is the terminal
//! host that times ticks, forwards keys and draws snapshots.

pub mod config;
pub mod engine;
pub mod error;
pub mod fruit;
pub mod game;
pub mod grid;
pub mod input;
pub mod logging;
pub mod scheduler;
pub mod snake;
pub mod term;

pub type TermInt = u16;
pub type Coords = (u16, u16);
