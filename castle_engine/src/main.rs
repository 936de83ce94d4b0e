#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Castle Escape **
//! Text adventure: get out of the castle alive.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use castle_engine::style::GameStyle;
use castle_engine::{EngineConfig, Session, TerminalDisplay, load_content, run_repl};
use clap::Parser;
use colored::Colorize;
use log::info;

#[derive(Parser)]
#[command(author, version, about = "Escape the castle by solving its puzzles.")]
struct Cli {
    /// Engine configuration file (defaults to castle.toml in the data directory).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Skip the name prompt and play as this player.
    #[arg(long)]
    name: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load_or_default(path)?,
        None => EngineConfig::load_default()?,
    };
    info!("Start: loading castle content...");
    let content = load_content(config.world_file.as_deref()).context("while loading castle content")?;
    info!("Castle content loaded and validated.");

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush().context("flushing stdout")?;

    println!("{:^84}", content.game.title.to_uppercase().bright_yellow().underline());
    println!("{}", "Type \"help\" at any time to list the commands.".notice_style());

    let mut session = Session::new(
        content,
        TerminalDisplay::new(),
        config.persistence(),
        config.restart_delay(),
    );
    session.start();
    if let Some(name) = cli.name.as_deref() {
        session.handle_line(name)?;
    }
    run_repl(&mut session)
}
