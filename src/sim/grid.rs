//! Fixed-size character grid holding the static level layout

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::in_bounds;

/// Symbol of a walkable cell
pub const EMPTY: char = ' ';

/// Row-major grid of layout symbols
///
/// Entities (player, ball, birds) are never stored here; only blocks are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    /// An all-empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        in_bounds(pos, self.width, self.height)
    }

    /// Symbol at `pos`, or `None` outside the grid
    pub fn cell(&self, pos: IVec2) -> Option<char> {
        self.index(pos).map(|i| self.cells[i])
    }

    /// True if an in-bounds cell holds something other than empty space
    ///
    /// Cells outside the grid read as unoccupied; callers bounds-check after.
    pub fn is_occupied(&self, pos: IVec2) -> bool {
        self.cell(pos).is_some_and(|c| c != EMPTY)
    }

    /// Overwrite a cell. Returns false (and does nothing) outside the grid.
    pub fn set(&mut self, pos: IVec2, symbol: char) -> bool {
        match self.index(pos) {
            Some(i) => {
                self.cells[i] = symbol;
                true
            }
            None => false,
        }
    }

    /// Symbols of row `y`, or `None` below the last row
    pub fn row(&self, y: usize) -> Option<&[char]> {
        let start = y.checked_mul(self.width)?;
        self.cells.get(start..start.checked_add(self.width)?)
    }

    /// Iterate every cell as (position, symbol), row-major
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, char)> + '_ {
        self.cells.iter().enumerate().map(|(i, &c)| {
            let pos = IVec2::new((i % self.width) as i32, (i / self.width) as i32);
            (pos, c)
        })
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.width + pos.x as usize)
        } else {
            None
        }
    }
}
