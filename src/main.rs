//! Snoopy's Revenge entry point
//!
//! Terminal front end: stdin lines in, text frames out.

use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;

use snoopy_revenge::session::Session;
use snoopy_revenge::sim::GamePhase;
use snoopy_revenge::{Level, Settings};

/// Guide Snoopy while the ball hunts the birds
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Play this level file once instead of showing the menu
    level: Option<PathBuf>,

    /// Settings file (defaults to the platform config directory)
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Seed for the first random level
    #[arg(long)]
    seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Logs go to stderr; keep them quiet by default so frames stay readable
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let env = Env::default().default_filter_or(level.to_string());
    let _ = Builder::from_env(env).try_init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = match &args.settings {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load(),
    };

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Snoopy's Revenge starting, seed {}", seed);

    let stdin = io::stdin();
    let mut session = Session::new(settings, stdin.lock(), io::stdout(), seed);

    match args.level {
        Some(path) => {
            let mut level = Level::load(&path)?;
            let phase = session.play_level(&mut level)?;
            if phase == GamePhase::Quit {
                log::info!("Left level early");
            }
        }
        None => session.run()?,
    }

    Ok(())
}
