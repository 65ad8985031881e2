use std::fmt;

pub mod api;
pub mod groups;
pub mod play;
pub mod runs;
pub mod scoring;
pub mod search;
pub mod sets;
pub mod sorting;
#[cfg(target_arch = "wasm32")]
pub mod wasm_api;
pub mod wildcards;

pub use play::{
    find_best_melding_play, find_best_melding_play_with, find_best_play, find_best_play_with,
};
pub use search::make_play;
pub use sets::{BoardSet, SetError, TileGroup, TileRun, TileSet};
pub use wildcards::{WildcardAttachment, bind_free_wildcards, substitute_wildcards};

/// Lowest value printed on a tile.
pub const MIN_VALUE: u8 = 1;
/// Highest value printed on a tile.
pub const MAX_VALUE: u8 = 13;
/// Points a wildcard counts for when scoring a hand.
pub const WILDCARD_SCORE: u32 = 30;
/// Minimum total score of a player's qualifying first play.
pub const MELD_THRESHOLD: u32 = 30;

/// The four tile colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileColor {
    Red,
    Blue,
    Orange,
    Black,
}

impl TileColor {
    /// All colors, in canonical order.
    pub const ALL: [TileColor; 4] = [
        TileColor::Red,
        TileColor::Blue,
        TileColor::Orange,
        TileColor::Black,
    ];

    /// Single-letter code used in tile strings ("k" for black).
    pub fn letter(&self) -> char {
        match self {
            TileColor::Red => 'r',
            TileColor::Blue => 'b',
            TileColor::Orange => 'o',
            TileColor::Black => 'k',
        }
    }

    /// Parse a single-letter color code.
    pub fn from_letter(c: char) -> Result<Self, String> {
        match c {
            'r' => Ok(TileColor::Red),
            'b' => Ok(TileColor::Blue),
            'o' => Ok(TileColor::Orange),
            'k' => Ok(TileColor::Black),
            _ => Err(format!("Invalid color: {}", c)),
        }
    }
}

/// A regular tile: one of four colors, value 1-13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NumberedTile {
    pub color: TileColor,
    pub value: u8,
}

impl NumberedTile {
    /// Create a new numbered tile. The value must be 1-13.
    pub fn new(color: TileColor, value: u8) -> Self {
        assert!(
            (MIN_VALUE..=MAX_VALUE).contains(&value),
            "Value must be {}-{}",
            MIN_VALUE,
            MAX_VALUE
        );
        NumberedTile { color, value }
    }
}

impl fmt::Display for NumberedTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.letter(), self.value)
    }
}

/// A wildcard occupying a slot in a board set. Carries the numbered tiles
/// that would legally take its place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundWildcard {
    candidates: Vec<NumberedTile>,
}

impl BoundWildcard {
    /// Bind to an explicit candidate list. The list must be non-empty.
    pub fn new(candidates: Vec<NumberedTile>) -> Self {
        assert!(!candidates.is_empty(), "Candidate list must be non-empty");
        BoundWildcard { candidates }
    }

    /// Derive candidates from the numbered members of the set being joined.
    ///
    /// An all-same-value list (a group) yields that value in every color. A
    /// same-color list (a run) yields the values immediately outside the
    /// current span, dropping any that fall outside the 1-13 range.
    pub fn from_tiles(tiles: &[NumberedTile]) -> Self {
        assert!(!tiles.is_empty(), "Cannot bind a wildcard to an empty set");
        let first = tiles[0];
        if tiles.iter().all(|t| t.value == first.value) {
            let candidates = TileColor::ALL
                .iter()
                .map(|&color| NumberedTile::new(color, first.value))
                .collect();
            return BoundWildcard { candidates };
        }

        let low = tiles.iter().map(|t| t.value).min().unwrap();
        let high = tiles.iter().map(|t| t.value).max().unwrap();
        let mut candidates = Vec::new();
        if low > MIN_VALUE {
            candidates.push(NumberedTile::new(first.color, low - 1));
        }
        if high < MAX_VALUE {
            candidates.push(NumberedTile::new(first.color, high + 1));
        }
        BoundWildcard::new(candidates)
    }

    /// Whether the given tile may replace this wildcard.
    pub fn matches(&self, tile: &NumberedTile) -> bool {
        self.candidates.contains(tile)
    }

    pub fn candidates(&self) -> &[NumberedTile] {
        &self.candidates
    }

    /// The value this wildcard indexes at (its first candidate's value).
    pub fn value(&self) -> u8 {
        self.candidates[0].value
    }

    /// The color this wildcard indexes at (its first candidate's color).
    pub fn color(&self) -> TileColor {
        self.candidates[0].color
    }
}

impl fmt::Display for BoundWildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.candidates.iter().map(|t| t.to_string()).collect();
        write!(f, "w({})", parts.join(","))
    }
}

/// A tile in any of its three states.
///
/// A free wildcard and a bound wildcard are the same physical tile; the two
/// variants track whether it currently occupies a board-set slot. Conversion
/// between them happens only through the binder/substitution functions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tile {
    Numbered(NumberedTile),
    FreeWildcard,
    BoundWildcard(BoundWildcard),
}

impl Tile {
    /// Shorthand for a numbered tile.
    pub fn numbered(color: TileColor, value: u8) -> Self {
        Tile::Numbered(NumberedTile::new(color, value))
    }

    /// The value this tile sorts and indexes at, or None for a free wildcard.
    pub fn value(&self) -> Option<u8> {
        match self {
            Tile::Numbered(t) => Some(t.value),
            Tile::FreeWildcard => None,
            Tile::BoundWildcard(w) => Some(w.value()),
        }
    }

    /// The color this tile sorts at, or None for a free wildcard.
    pub fn color(&self) -> Option<TileColor> {
        match self {
            Tile::Numbered(t) => Some(t.color),
            Tile::FreeWildcard => None,
            Tile::BoundWildcard(w) => Some(w.color()),
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Tile::FreeWildcard | Tile::BoundWildcard(_))
    }

    pub fn is_free_wildcard(&self) -> bool {
        matches!(self, Tile::FreeWildcard)
    }

    pub fn is_bound_wildcard(&self) -> bool {
        matches!(self, Tile::BoundWildcard(_))
    }

    pub fn as_numbered(&self) -> Option<NumberedTile> {
        match self {
            Tile::Numbered(t) => Some(*t),
            _ => None,
        }
    }

    /// Parse a tile from its string form.
    ///
    /// Format: "r7" (red 7), "b1", "o13", "k9", "w" (free wildcard),
    /// "w(r6,r9)" (bound wildcard with its candidates).
    pub fn from_string(s: &str) -> Result<Self, String> {
        if s == "w" {
            return Ok(Tile::FreeWildcard);
        }
        if let Some(inner) = s.strip_prefix("w(").and_then(|rest| rest.strip_suffix(')')) {
            let mut candidates = Vec::new();
            for part in inner.split(',') {
                let part = part.trim();
                if part.is_empty() {
                    return Err(format!("Bound wildcard without candidates: {}", s));
                }
                match Tile::from_string(part)? {
                    Tile::Numbered(t) => candidates.push(t),
                    _ => return Err(format!("Invalid candidate: {}", part)),
                }
            }
            if candidates.is_empty() {
                return Err(format!("Bound wildcard without candidates: {}", s));
            }
            return Ok(Tile::BoundWildcard(BoundWildcard::new(candidates)));
        }

        let mut chars = s.chars();
        let color = chars
            .next()
            .ok_or_else(|| format!("Invalid tile string: {}", s))
            .and_then(TileColor::from_letter)?;
        let value: u8 = chars
            .as_str()
            .parse()
            .map_err(|_| format!("Invalid value: {}", chars.as_str()))?;
        if !(MIN_VALUE..=MAX_VALUE).contains(&value) {
            return Err(format!(
                "Value must be {}-{}, got {}",
                MIN_VALUE, MAX_VALUE, value
            ));
        }
        Ok(Tile::numbered(color, value))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Numbered(t) => t.fmt(f),
            Tile::FreeWildcard => write!(f, "w"),
            Tile::BoundWildcard(w) => w.fmt(f),
        }
    }
}

/// The state handed to the engine once per turn: sets on the board and the
/// active player's hand.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    pub board: Vec<Vec<Tile>>,
    pub hand: Vec<Tile>,
}
