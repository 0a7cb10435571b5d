//! Level: the aggregate root of a play session, and its text loader
//!
//! Level files start with a `<width> <height>` header followed by `height`
//! rows of exactly `width` characters. See [`symbols`] for the cell alphabet.

use std::fs;
use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::blocks::{BlockKind, BlockRegistry};
use super::direction::Direction;
use super::grid::{EMPTY, Grid};
use super::state::{BirdSlots, GameEvent, GamePhase};
use crate::consts::*;
use crate::error::LevelError;

/// Cell alphabet of level files
pub mod symbols {
    pub const EMPTY: char = ' ';
    pub const PUSHABLE: char = 'P';
    pub const TRAPPED: char = 'T';
    /// Any other non-entity symbol is breakable; this one is used by the generator
    pub const BREAKABLE: char = 'B';
    pub const PLAYER: char = 'S';
    pub const BALL: char = '*';
    pub const BIRD: char = 'O';
}

/// Block kind for a static layout symbol, `None` for empty space
fn block_kind_for(symbol: char) -> Option<BlockKind> {
    match symbol {
        symbols::EMPTY => None,
        symbols::PUSHABLE => Some(BlockKind::Pushable),
        symbols::TRAPPED => Some(BlockKind::Trapped),
        _ => Some(BlockKind::Breakable),
    }
}

/// One playable level with its entities and session counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub width: usize,
    pub height: usize,
    /// Static layout; broken blocks are blanked out
    pub grid: Grid,
    /// Snoopy's position
    pub player: IVec2,
    pub ball: IVec2,
    pub ball_direction: Direction,
    pub birds: BirdSlots,
    pub blocks: BlockRegistry,
    /// Turns remaining
    pub time_left: u32,
    pub lives: u32,
    pub score: u32,
    pub phase: GamePhase,
    /// Events raised during the most recent turn
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Level {
    /// Parse a level description
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut lines = text.lines();
        let header = lines
            .next()
            .ok_or_else(|| LevelError::malformed("empty level description"))?;
        let (width, height) = parse_header(header)?;

        // Validate every row before sizing the grid from the header
        let mut rows = Vec::new();
        for y in 0..height {
            let row = lines.next().ok_or_else(|| {
                LevelError::malformed(format!("expected {height} rows, found {y}"))
            })?;
            let row = row.strip_suffix('\r').unwrap_or(row);
            let len = row.chars().count();
            if len != width {
                return Err(LevelError::malformed(format!(
                    "row {y} has {len} symbols, expected {width}"
                )));
            }
            rows.push(row);
        }

        let mut grid = Grid::new(width, height);
        let mut player = None;
        let mut ball = None;
        let mut birds = Vec::new();

        for (y, row) in rows.into_iter().enumerate() {
            for (x, symbol) in row.chars().enumerate() {
                let pos = IVec2::new(x as i32, y as i32);
                match symbol {
                    symbols::PLAYER => {
                        if player.replace(pos).is_some() {
                            return Err(LevelError::malformed("more than one player start"));
                        }
                    }
                    symbols::BALL => {
                        if ball.replace(pos).is_some() {
                            return Err(LevelError::malformed("more than one ball start"));
                        }
                    }
                    symbols::BIRD => birds.push(pos),
                    other => {
                        grid.set(pos, other);
                    }
                }
            }
        }

        let player = player.ok_or_else(|| LevelError::malformed("no player start"))?;
        let birds = BirdSlots::from_positions(&birds).ok_or_else(|| {
            LevelError::malformed(format!(
                "{} birds declared, at most {MAX_BIRDS} allowed",
                birds.len()
            ))
        })?;
        // The player start is always empty, so a free cell exists
        let ball = ball
            .or_else(|| grid.cells().find(|&(_, c)| c == EMPTY).map(|(p, _)| p))
            .unwrap_or(player);

        let mut blocks = BlockRegistry::new();
        for (pos, symbol) in grid.cells() {
            if let Some(kind) = block_kind_for(symbol) {
                blocks.insert(kind, pos);
            }
        }

        log::info!(
            "Loaded {}x{} level: {} blocks, {} birds",
            width,
            height,
            blocks.len(),
            birds.active_count()
        );

        Ok(Self {
            width,
            height,
            grid,
            player,
            ball,
            ball_direction: Direction::Right,
            birds,
            blocks,
            time_left: TIME_BUDGET,
            lives: STARTING_LIVES,
            score: 0,
            phase: GamePhase::Playing,
            events: Vec::new(),
        })
    }

    /// Read and parse a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        crate::in_bounds(pos, self.width, self.height)
    }
}

fn parse_header(header: &str) -> Result<(usize, usize), LevelError> {
    let mut parts = header.split_whitespace();
    let mut dimension = |name: &str| -> Result<usize, LevelError> {
        let raw = parts
            .next()
            .ok_or_else(|| LevelError::malformed(format!("header is missing the {name}")))?;
        let value: i64 = raw
            .parse()
            .map_err(|_| LevelError::malformed(format!("{name} '{raw}' is not an integer")))?;
        if value <= 0 {
            return Err(LevelError::malformed(format!(
                "{name} must be positive, got {value}"
            )));
        }
        // Coordinates are i32, so every cell index must fit one
        if value > i64::from(i32::MAX) {
            return Err(LevelError::malformed(format!("{name} {value} is too large")));
        }
        usize::try_from(value)
            .map_err(|_| LevelError::malformed(format!("{name} {value} is too large")))
    };
    let width = dimension("width")?;
    let height = dimension("height")?;
    if parts.next().is_some() {
        return Err(LevelError::malformed("header must be '<width> <height>'"));
    }
    if width.checked_mul(height).is_none() {
        return Err(LevelError::malformed(format!(
            "{width}x{height} level is too large"
        )));
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    const SMALL: &str = "5 3\n*    \nS P O\n BT  \n";

    #[test]
    fn test_parse_entities_and_blocks() {
        let level = Level::parse(SMALL).unwrap();
        assert_eq!((level.width, level.height), (5, 3));
        assert_eq!(level.player, IVec2::new(0, 1));
        assert_eq!(level.ball, IVec2::new(0, 0));
        assert_eq!(level.ball_direction, Direction::Right);
        assert!(level.birds.is_active_at(IVec2::new(4, 1)));
        assert_eq!(level.birds.active_count(), 1);

        assert_eq!(level.blocks.len(), 3);
        assert_eq!(level.blocks.kind_at(IVec2::new(2, 1)), Some(BlockKind::Pushable));
        assert_eq!(level.blocks.kind_at(IVec2::new(1, 2)), Some(BlockKind::Breakable));
        assert_eq!(level.blocks.kind_at(IVec2::new(2, 2)), Some(BlockKind::Trapped));

        // Entity cells are walkable layout
        assert_eq!(level.grid.cell(IVec2::new(0, 1)), Some(' '));
        assert_eq!(level.grid.cell(IVec2::new(4, 1)), Some(' '));
    }

    #[test]
    fn test_parse_initial_counters() {
        let level = Level::parse(SMALL).unwrap();
        assert_eq!(level.time_left, 120);
        assert_eq!(level.lives, 3);
        assert_eq!(level.score, 0);
        assert_eq!(level.phase, GamePhase::Playing);
    }

    #[test]
    fn test_parse_crlf_rows() {
        let level = Level::parse("3 1\r\nS#O\r\n").unwrap();
        assert_eq!(level.blocks.len(), 1);
        assert!(level.birds.is_active_at(IVec2::new(2, 0)));
    }

    #[test]
    fn test_ball_defaults_to_first_empty_cell() {
        let level = Level::parse("3 2\nBB \nS  \n").unwrap();
        assert_eq!(level.ball, IVec2::new(2, 0));
    }

    #[test]
    fn test_rejects_malformed() {
        let cases = [
            "",
            "5\nS    \n",
            "0 1\n\n",
            "-3 1\nS  \n",
            "x 1\nS\n",
            "3 1 7\nS  \n",
            "3 2\nS  \n",
            "3 1\nS \n",
            "3 1\nS   \n",
            "3 1\n   \n",
            "3 1\nSS \n",
            "3 1\nS**\n",
            "6 1\nSOOOOO\n",
            // Oversized headers are rejected before the grid is allocated
            "4000000000 1\nS  \n",
            "3037000500 3037000500\nS  \n",
            "2147483647 2147483647\nS  \n",
            "2147483648 1\nS  \n",
        ];
        for text in cases {
            let err = Level::parse(text).unwrap_err();
            assert!(
                matches!(err, LevelError::Malformed { .. }),
                "{text:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SMALL.as_bytes()).unwrap();
        let level = Level::load(file.path()).unwrap();
        assert_eq!(level.player, IVec2::new(0, 1));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Level::load(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, LevelError::Io { .. }));
    }

    fn cell_symbol() -> impl Strategy<Value = char> {
        prop::sample::select(vec![' ', ' ', ' ', 'P', 'T', 'B', '#', 'O'])
    }

    proptest! {
        #[test]
        fn prop_block_count_matches_static_symbols(
            width in 1usize..12,
            height in 1usize..8,
            cells in prop::collection::vec(cell_symbol(), 96),
            player_at in 0usize..96,
        ) {
            let area = width * height;
            let player_at = player_at % area;
            let mut layout: Vec<char> = cells.into_iter().cycle().take(area).collect();
            layout[player_at] = 'S';
            // Keep within bird capacity
            let mut birds_seen = 0;
            for s in layout.iter_mut() {
                if *s == 'O' {
                    birds_seen += 1;
                    if birds_seen > MAX_BIRDS {
                        *s = ' ';
                    }
                }
            }

            let mut text = format!("{width} {height}\n");
            for row in layout.chunks(width) {
                text.extend(row);
                text.push('\n');
            }
            let level = Level::parse(&text).unwrap();

            let expected_blocks = layout
                .iter()
                .filter(|&&c| !matches!(c, ' ' | 'S' | '*' | 'O'))
                .count();
            prop_assert_eq!(level.blocks.len(), expected_blocks);
            prop_assert_eq!(
                level.player,
                IVec2::new((player_at % width) as i32, (player_at / width) as i32)
            );
            for (i, &s) in layout.iter().enumerate() {
                if s == 'O' {
                    let pos = IVec2::new((i % width) as i32, (i / width) as i32);
                    prop_assert!(level.birds.is_active_at(pos));
                }
            }
            prop_assert!(level.blocks.len() <= area);
        }
    }
}
