use std::process::exit;

use clap::Parser;
use tick_snake::config::Config;
use tick_snake::error::AppError;
use tick_snake::game::SnakeGame;
use tick_snake::logging;

fn main() {
    let config = Config::parse();

    if let Err(err) = run(&config) {
        eprintln!("snake: {}", err);
        exit(1);
    }
}

fn run(config: &Config) -> Result<(), AppError> {
    logging::init(config.log_file.as_deref())?;

    let mut game = SnakeGame::new(config)?;
    // The game loop returns once the player quits
    game.run()
}
