use std::io;

use thiserror::Error;

use crate::TermInt;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least {min_width}x{min_height} tiles, got {width}x{height}")]
    GridTooSmall {
        width: TermInt,
        height: TermInt,
        min_width: TermInt,
        min_height: TermInt,
    },
    #[error("tick intervals must be positive")]
    ZeroTick,
    #[error("minimum tick ({min_ms} ms) is longer than the initial tick ({initial_ms} ms)")]
    FloorAboveInitial { min_ms: u64, initial_ms: u64 },
    #[error("decay must lie in (0, 1], got {0}")]
    Decay(f64),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
    #[error("terminal is {have_w}x{have_h} but the board needs {need_w}x{need_h}")]
    TerminalTooSmall {
        have_w: TermInt,
        have_h: TermInt,
        need_w: TermInt,
        need_h: TermInt,
    },
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: io::Error,
    },
}
