// Alphabet index: ordered symbol set, modular index arithmetic, grid layout

use std::fmt;

// ---------------------------------------------------------------------------
// Symbol tables
// ---------------------------------------------------------------------------

/// The canonical 80-symbol order: 46 plain kana, 20 voiced, 5 semi-voiced,
/// 9 small kana. This order *is* the key space of every shift cipher.
pub const GOJUON_SYMBOLS: &[char] = &[
    'あ', 'い', 'う', 'え', 'お', //
    'か', 'き', 'く', 'け', 'こ', //
    'さ', 'し', 'す', 'せ', 'そ', //
    'た', 'ち', 'つ', 'て', 'と', //
    'な', 'に', 'ぬ', 'ね', 'の', //
    'は', 'ひ', 'ふ', 'へ', 'ほ', //
    'ま', 'み', 'む', 'め', 'も', //
    'や', 'ゆ', 'よ', 'ら', 'り', //
    'る', 'れ', 'ろ', 'わ', 'を', //
    'ん', 'が', 'ぎ', 'ぐ', 'げ', //
    'ご', 'ざ', 'じ', 'ず', 'ぜ', //
    'ぞ', 'だ', 'ぢ', 'づ', 'で', //
    'ど', 'ば', 'び', 'ぶ', 'べ', //
    'ぼ', 'ぱ', 'ぴ', 'ぷ', 'ぺ', //
    'ぽ', 'ぁ', 'ぃ', 'ぅ', 'ぇ', //
    'ぉ', 'っ', 'ゃ', 'ゅ', 'ょ', //
];

/// The 46 unmarked kana. Voiced and semi-voiced kana are not members of
/// this alphabet; they reach it through the diacritic adapter.
pub const SEION_SYMBOLS: &[char] = &[
    'あ', 'い', 'う', 'え', 'お', //
    'か', 'き', 'く', 'け', 'こ', //
    'さ', 'し', 'す', 'せ', 'そ', //
    'た', 'ち', 'つ', 'て', 'と', //
    'な', 'に', 'ぬ', 'ね', 'の', //
    'は', 'ひ', 'ふ', 'へ', 'ほ', //
    'ま', 'み', 'む', 'め', 'も', //
    'や', 'ゆ', 'よ', 'ら', 'り', //
    'る', 'れ', 'ろ', 'わ', 'を', //
    'ん',
];

/// Grid width used by the coordinate ciphers for both built-in alphabets.
pub const GRID_COLS: usize = 5;

/// Largest grid width whose 1-based column still fits in one decimal digit.
pub const MAX_GRID_COLS: usize = 9;

// Membership lookup covers the hiragana block U+3040..U+309F.
const LOOKUP_BASE: u32 = 0x3040;
const LOOKUP_LEN: usize = 0x60;
const NO_INDEX: u8 = u8::MAX;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Reasons an alphabet definition is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AlphabetError {
    #[error("alphabet has no symbols")]
    Empty,
    #[error("grid width must be between 1 and 9, got {0}")]
    GridWidth(usize),
    #[error("symbol {0:?} is outside the hiragana block")]
    NotHiragana(char),
    #[error("symbol {0:?} appears more than once")]
    Duplicate(char),
}

// ---------------------------------------------------------------------------
// Grid coordinate
// ---------------------------------------------------------------------------

/// Zero-based (row, column) cell of a symbol in the coordinate grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoordinate {
    pub row: usize,
    pub col: usize,
}

impl GridCoordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

// ---------------------------------------------------------------------------
// Alphabet
// ---------------------------------------------------------------------------

/// An ordered set of kana with a bijection between symbols and indices.
///
/// All index arithmetic is taken modulo [`Alphabet::len`] with floor
/// semantics, so negative shifts wrap around the end of the alphabet.
/// Symbols are laid out row-major on a grid of [`Alphabet::grid_cols`]
/// columns; cells past the last symbol are sentinels with no symbol.
#[derive(Clone, Copy)]
pub struct Alphabet {
    name: &'static str,
    symbols: &'static [char],
    lookup: [u8; LOOKUP_LEN],
    grid_cols: usize,
}

impl Alphabet {
    /// The canonical 80-symbol alphabet (16 x 5 grid, no sentinel cells).
    pub const GOJUON: Alphabet = match Alphabet::build("gojuon", GOJUON_SYMBOLS, GRID_COLS) {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("gojuon symbol table is malformed"),
    };

    /// The 46-symbol base alphabet (10 x 5 grid, 4 sentinel cells).
    pub const SEION: Alphabet = match Alphabet::build("seion", SEION_SYMBOLS, GRID_COLS) {
        Ok(alphabet) => alphabet,
        Err(_) => panic!("seion symbol table is malformed"),
    };

    /// Names accepted by [`Alphabet::by_name`], canonical first.
    pub const NAMES: [&'static str; 2] = ["gojuon", "seion"];

    /// Validate a custom alphabet.
    ///
    /// Symbols must be distinct hiragana code points (U+3040..U+309F) and
    /// the grid width must be between 1 and [`MAX_GRID_COLS`].
    pub fn try_new(
        name: &'static str,
        symbols: &'static [char],
        grid_cols: usize,
    ) -> Result<Self, AlphabetError> {
        Self::build(name, symbols, grid_cols)
    }

    const fn build(
        name: &'static str,
        symbols: &'static [char],
        grid_cols: usize,
    ) -> Result<Self, AlphabetError> {
        if symbols.is_empty() {
            return Err(AlphabetError::Empty);
        }
        if grid_cols == 0 || grid_cols > MAX_GRID_COLS {
            return Err(AlphabetError::GridWidth(grid_cols));
        }
        let mut lookup = [NO_INDEX; LOOKUP_LEN];
        let mut i = 0;
        while i < symbols.len() {
            let ch = symbols[i];
            let cp = ch as u32;
            if cp < LOOKUP_BASE || cp >= LOOKUP_BASE + LOOKUP_LEN as u32 {
                return Err(AlphabetError::NotHiragana(ch));
            }
            let slot = (cp - LOOKUP_BASE) as usize;
            if lookup[slot] != NO_INDEX {
                return Err(AlphabetError::Duplicate(ch));
            }
            // At most LOOKUP_LEN distinct slots exist, so i always fits in u8.
            lookup[slot] = i as u8;
            i += 1;
        }
        Ok(Self {
            name,
            symbols,
            lookup,
            grid_cols,
        })
    }

    /// Look up a built-in alphabet by name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "gojuon" => Some(Self::GOJUON),
            "seion" => Some(Self::SEION),
            _ => None,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of symbols (N).
    pub const fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed alphabet; provided for API symmetry.
    pub const fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in key-space order.
    pub const fn symbols(&self) -> &'static [char] {
        self.symbols
    }

    /// Position of `ch` in the alphabet, or `None` if it is not a member.
    pub fn index_of(&self, ch: char) -> Option<usize> {
        let slot = (ch as u32).checked_sub(LOOKUP_BASE)? as usize;
        match self.lookup.get(slot) {
            Some(&idx) if idx != NO_INDEX => Some(idx as usize),
            _ => None,
        }
    }

    pub fn is_member(&self, ch: char) -> bool {
        self.index_of(ch).is_some()
    }

    /// Reduce any integer into `[0, N)` with floor semantics.
    pub fn floor_mod(&self, value: i64) -> usize {
        value.rem_euclid(self.len() as i64) as usize
    }

    /// Symbol at `index` taken modulo N; negative indices wrap from the end.
    pub fn symbol_at(&self, index: i64) -> char {
        self.symbols[self.floor_mod(index)]
    }

    pub const fn grid_cols(&self) -> usize {
        self.grid_cols
    }

    /// Number of grid rows, counting a partially filled last row.
    pub const fn grid_rows(&self) -> usize {
        self.symbols.len().div_ceil(self.grid_cols)
    }

    /// Grid cell of a member symbol.
    pub fn grid_coordinate(&self, ch: char) -> Option<GridCoordinate> {
        let idx = self.index_of(ch)?;
        Some(GridCoordinate::new(idx / self.grid_cols, idx % self.grid_cols))
    }

    /// Symbol in a grid cell. Out-of-range and sentinel cells yield `None`.
    pub fn symbol_at_coordinate(&self, row: usize, col: usize) -> Option<char> {
        if col >= self.grid_cols || row >= self.grid_rows() {
            return None;
        }
        self.symbols.get(row * self.grid_cols + col).copied()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Alphabet")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("grid_cols", &self.grid_cols)
            .finish()
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols && self.grid_cols == other.grid_cols
    }
}

impl Eq for Alphabet {}

impl Default for Alphabet {
    fn default() -> Self {
        Self::GOJUON
    }
}
