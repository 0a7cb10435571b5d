//! Seeded random level generation
//!
//! The ball only ever travels along its starting row, so all birds are placed
//! on that row to keep generated levels winnable.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::level::{Level, symbols};
use crate::consts::MAX_BIRDS;
use crate::error::LevelError;

/// Share of free cells that receive a block
const BLOCK_DENSITY: f64 = 0.2;

/// Smallest width that fits the ball plus every bird on one row
pub const MIN_WIDTH: usize = MAX_BIRDS + 2;
pub const MIN_HEIGHT: usize = 2;

/// Build a random level; the same seed always yields the same level
pub fn generate_level(seed: u64, width: usize, height: usize) -> Result<Level, LevelError> {
    Level::parse(&generate_text(seed, width, height)?)
}

/// Level description text for [`generate_level`]
pub fn generate_text(seed: u64, width: usize, height: usize) -> Result<String, LevelError> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(LevelError::malformed(format!(
            "generated levels need at least {MIN_WIDTH}x{MIN_HEIGHT}, got {width}x{height}"
        )));
    }

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut cells = vec![vec![symbols::EMPTY; width]; height];

    let ball_row = rng.random_range(0..height);
    let mut columns: Vec<usize> = (0..width).collect();
    columns.shuffle(&mut rng);
    let (ball_col, bird_cols) = (columns[0], &columns[1..=MAX_BIRDS]);
    cells[ball_row][ball_col] = symbols::BALL;
    for &x in bird_cols {
        cells[ball_row][x] = symbols::BIRD;
    }

    let mut player_row = rng.random_range(0..height - 1);
    if player_row >= ball_row {
        player_row += 1;
    }
    let player_col = rng.random_range(0..width);
    cells[player_row][player_col] = symbols::PLAYER;

    for (y, row) in cells.iter_mut().enumerate() {
        for cell in row.iter_mut().filter(|c| **c == symbols::EMPTY) {
            if !rng.random_bool(BLOCK_DENSITY) {
                continue;
            }
            let roll = rng.random_range(0..100);
            *cell = match roll {
                0..60 => symbols::BREAKABLE,
                60..85 => symbols::PUSHABLE,
                // No traps in the ball's path
                _ if y == ball_row => symbols::BREAKABLE,
                _ => symbols::TRAPPED,
            };
        }
    }

    log::info!("Generated {}x{} level from seed {}", width, height, seed);

    let mut text = format!("{width} {height}\n");
    for row in &cells {
        text.extend(row);
        text.push('\n');
    }
    Ok(text)
}
