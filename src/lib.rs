//! Snoopy's Revenge - A turn-based tile arcade game
//!
//! Core modules:
//! - `sim`: Deterministic turn simulation (grid, blocks, movement, game state)
//! - `render`: Grid + entities to characters
//! - `settings`: Key bindings and preferences
//! - `session`: Menu and turn loop glue over any reader/writer

pub mod error;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::LevelError;
pub use settings::{KeyBindings, Settings};
pub use sim::{Direction, Level, TickInput, TurnOutcome, tick};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Turns available on each freshly loaded level
    pub const TIME_BUDGET: u32 = 120;
    /// Lives at the start of each level
    pub const STARTING_LIVES: u32 = 3;
    /// Points for every bird the ball reaches
    pub const BIRD_SCORE: u32 = 100;
    /// Bird slots per level
    pub const MAX_BIRDS: usize = 4;

    /// Level played by "new game" when no default level is configured
    pub const DEFAULT_LEVEL: &str = include_str!("../levels/level1.txt");
}

/// True if `pos` lies inside a `width` x `height` grid
#[inline]
pub fn in_bounds(pos: IVec2, width: usize, height: usize) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}
