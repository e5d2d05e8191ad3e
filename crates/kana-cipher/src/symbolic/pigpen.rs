// Pigpen: each symbol becomes a cell of one of five grids, with or without a dot
//
// Grids 0-3 are tic-tac-toe grids of 9 cells, each used twice (plain, then
// dotted), giving 18 symbols per grid. Grid 4 is the X grid: 4 cells, plain
// then dotted. 4 * 18 + 8 = 80 symbols.

use std::fmt;

use hashbrown::HashMap;
use kana_core::{Alphabet, script};

/// Symbols covered by the four square grids.
const SQUARE_SYMBOLS: usize = 72;
const SQUARE_CELLS: usize = 9;
const X_GRID: u8 = 4;
const X_CELLS: usize = 4;

/// Character produced when a cell has no symbol.
pub const UNKNOWN_CELL: char = '?';

/// One unit of pigpen output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PigpenGlyph {
    /// A drawn cell. `original` is the plaintext symbol, kept for display.
    Cell {
        grid: u8,
        pos: u8,
        dot: bool,
        original: char,
    },
    /// A character with no glyph, copied as it is.
    Passthrough(char),
}

impl PigpenGlyph {
    /// Glyph for the alphabet index `index` (0..80).
    pub fn for_index(index: usize, original: char) -> Self {
        let (grid, pos, dot) = if index < SQUARE_SYMBOLS {
            let in_grid = index % (2 * SQUARE_CELLS);
            (
                (index / (2 * SQUARE_CELLS)) as u8,
                (in_grid % SQUARE_CELLS) as u8,
                in_grid >= SQUARE_CELLS,
            )
        } else {
            let in_x = index - SQUARE_SYMBOLS;
            (X_GRID, (in_x % X_CELLS) as u8, in_x >= X_CELLS)
        };
        Self::Cell {
            grid,
            pos,
            dot,
            original,
        }
    }

    /// Compact `grid-pos-dot` form, e.g. `0-3-1`. Passthrough glyphs render
    /// as their character.
    pub fn descriptor(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PigpenGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cell { grid, pos, dot, .. } => write!(f, "{grid}-{pos}-{}", u8::from(*dot)),
            Self::Passthrough(ch) => write!(f, "{ch}"),
        }
    }
}

/// Reverse lookup from cells to symbols.
#[derive(Debug, Clone)]
pub struct PigpenTable {
    reverse: HashMap<(u8, u8, bool), char>,
}

impl PigpenTable {
    pub fn new() -> Self {
        let reverse = Alphabet::GOJUON
            .symbols()
            .iter()
            .enumerate()
            .filter_map(|(i, &ch)| match PigpenGlyph::for_index(i, ch) {
                PigpenGlyph::Cell { grid, pos, dot, .. } => Some(((grid, pos, dot), ch)),
                PigpenGlyph::Passthrough(_) => None,
            })
            .collect();
        Self { reverse }
    }

    pub fn encrypt(&self, text: &str) -> Vec<PigpenGlyph> {
        let alphabet = Alphabet::GOJUON;
        script::normalize(text)
            .chars()
            .map(|ch| match alphabet.index_of(ch) {
                Some(i) => PigpenGlyph::for_index(i, ch),
                None => PigpenGlyph::Passthrough(ch),
            })
            .collect()
    }

    /// Read glyphs back. Cells that name no symbol become [`UNKNOWN_CELL`].
    pub fn decrypt(&self, glyphs: &[PigpenGlyph]) -> String {
        glyphs
            .iter()
            .map(|glyph| match *glyph {
                PigpenGlyph::Cell { grid, pos, dot, .. } => self
                    .reverse
                    .get(&(grid, pos, dot))
                    .copied()
                    .unwrap_or(UNKNOWN_CELL),
                PigpenGlyph::Passthrough(ch) => ch,
            })
            .collect()
    }
}

impl Default for PigpenTable {
    fn default() -> Self {
        Self::new()
    }
}
