//! Menu and turn loop over any line reader and writer
//!
//! The binary wires this to stdin/stdout; tests drive it with in-memory buffers.

use std::io::{self, BufRead, Write};

use crate::consts::DEFAULT_LEVEL;
use crate::error::LevelError;
use crate::render;
use crate::settings::Settings;
use crate::sim::{GamePhase, Level, TickInput, TurnOutcome, generate_level, tick};

/// Size of levels made by the "random level" option
pub const RANDOM_LEVEL_SIZE: (usize, usize) = (20, 10);

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    NewGame,
    LoadGame,
    Quit,
    RandomLevel,
}

impl MenuChoice {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "1" => Some(MenuChoice::NewGame),
            "2" => Some(MenuChoice::LoadGame),
            "3" => Some(MenuChoice::Quit),
            "4" => Some(MenuChoice::RandomLevel),
            _ => None,
        }
    }
}

/// One player's sitting: menu, levels, continue prompt
pub struct Session<R, W> {
    settings: Settings,
    input: R,
    output: W,
    /// Seed for the next random level
    seed: u64,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(settings: Settings, input: R, output: W, seed: u64) -> Self {
        Self {
            settings,
            input,
            output,
            seed,
        }
    }

    /// Run menus and levels until the player quits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_menu()?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            let loaded = match MenuChoice::parse(&line) {
                Some(MenuChoice::Quit) => return Ok(()),
                Some(MenuChoice::NewGame) => self.default_level(),
                Some(MenuChoice::LoadGame) => {
                    write!(self.output, "Level file: ")?;
                    self.output.flush()?;
                    let Some(path) = self.read_line()? else {
                        return Ok(());
                    };
                    Level::load(path.trim())
                }
                Some(MenuChoice::RandomLevel) => {
                    let seed = self.seed;
                    self.seed = self.seed.wrapping_add(1);
                    let (width, height) = RANDOM_LEVEL_SIZE;
                    generate_level(seed, width, height)
                }
                None => {
                    writeln!(self.output, "Invalid choice")?;
                    continue;
                }
            };

            let mut level = match loaded {
                Ok(level) => level,
                Err(e) => {
                    log::warn!("Level not loaded: {}", e);
                    writeln!(self.output, "Could not load level: {e}")?;
                    continue;
                }
            };

            if self.play_level(&mut level)? == GamePhase::Quit {
                return Ok(());
            }
            if !self.ask_continue()? {
                return Ok(());
            }
        }
    }

    /// Play turns until the level ends; end of input quits the level
    pub fn play_level(&mut self, level: &mut Level) -> io::Result<GamePhase> {
        loop {
            write!(self.output, "{}", render::frame(level, self.settings.show_hud))?;
            write!(self.output, "Move: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                log::info!("Input closed, leaving level");
                level.phase = GamePhase::Quit;
                return Ok(level.phase);
            };

            let input = TickInput {
                intent: self.settings.keys.intent_for_line(&line),
            };
            let outcome = tick(level, &input);

            for message in level.events.iter().filter_map(render::event_message) {
                writeln!(self.output, "{message}")?;
            }

            if outcome != TurnOutcome::Continue {
                write!(self.output, "{}", render::frame(level, self.settings.show_hud))?;
                writeln!(self.output, "{}", render::outcome_message(outcome))?;
                return Ok(level.phase);
            }
        }
    }

    /// Yes/no prompt between levels (`y` or `o` continues)
    pub fn ask_continue(&mut self) -> io::Result<bool> {
        write!(self.output, "Continue (y/n)? ")?;
        self.output.flush()?;
        Ok(self
            .read_line()?
            .and_then(|line| line.trim().chars().next())
            .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'y' | 'o')))
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "** Snoopy's Revenge **")?;
        writeln!(self.output)?;
        writeln!(self.output, "1. New game")?;
        writeln!(self.output, "2. Load game")?;
        writeln!(self.output, "3. Quit")?;
        writeln!(self.output, "4. Random level")?;
        writeln!(self.output)?;
        write!(self.output, "Your choice: ")?;
        self.output.flush()
    }

    fn default_level(&self) -> Result<Level, LevelError> {
        match &self.settings.default_level {
            Some(path) => Level::load(path),
            None => Level::parse(DEFAULT_LEVEL),
        }
    }

    /// Next input line, `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
