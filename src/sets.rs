//! Board sets as capability objects: the contract the combinatorial search
//! drives, plus the group and run implementations.
//!
//! Mutating operations are value-returning: they hand back an updated set
//! and the caller swaps it into the board, so two holders of the same set
//! can never observe each other's edits.

use crate::{MAX_VALUE, Tile, TileColor, scoring};
use std::error::Error;
use std::fmt;

/// Misuse signals from set operations. Callers are expected to consult
/// [`TileSet::removable_tiles`] before removing; seeing one of these means
/// the orchestration is buggy, not that the game state is ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetError {
    /// Removal requested for a tile the set does not contain.
    MissingTile(Tile),
    /// Direct removal of a wildcard. Wildcards only leave a set through
    /// substitution.
    InvalidWildcardRemoval,
    /// Removal requested for a run-interior tile. Only the two boundary
    /// tiles of a run are removable.
    InvalidBoundaryRemoval(Tile),
}

impl fmt::Display for SetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetError::MissingTile(tile) => {
                write!(f, "the set does not contain the tile {}", tile)
            }
            SetError::InvalidWildcardRemoval => {
                write!(f, "wildcards may only leave a set through substitution")
            }
            SetError::InvalidBoundaryRemoval(tile) => {
                write!(f, "{} is not a boundary tile of the run", tile)
            }
        }
    }
}

impl Error for SetError {}

/// The capabilities a board set exposes to the combinatorial search.
pub trait TileSet {
    /// Whether the set may sit on the board as-is.
    fn is_valid(&self) -> bool;

    /// Whether the tile could be added to the set. Must be consulted before
    /// [`TileSet::with_tile`].
    fn check(&self, tile: &Tile) -> bool;

    /// The set with the tile added. When the tile takes over a wildcard's
    /// slot, the freed wildcard is returned alongside.
    fn with_tile(&self, tile: Tile) -> (Self, Option<Tile>)
    where
        Self: Sized;

    /// The set with the tile removed, plus the removed tile.
    fn without_tile(&self, tile: &Tile) -> Result<(Self, Tile), SetError>
    where
        Self: Sized;

    /// The tiles that may currently be removed without consulting anything
    /// else.
    fn removable_tiles(&self) -> Vec<Tile>;

    /// The tiles in the set, in board order.
    fn tiles(&self) -> &[Tile];

    /// The set's score.
    fn score(&self) -> u32;
}

/// A same-value set of tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGroup {
    tiles: Vec<Tile>,
}

impl TileGroup {
    pub fn new(tiles: Vec<Tile>) -> Self {
        TileGroup { tiles }
    }

    fn shared_value(&self) -> Option<u8> {
        self.tiles.iter().find_map(|t| t.as_numbered()).map(|t| t.value)
    }
}

impl TileSet for TileGroup {
    fn is_valid(&self) -> bool {
        self.tiles.len() >= 3
    }

    fn check(&self, tile: &Tile) -> bool {
        if self.tiles.is_empty() {
            return true;
        }
        // One slot per color: a group never grows past four tiles.
        if self.tiles.len() >= 4 {
            return false;
        }
        if tile.is_wildcard() {
            return true;
        }
        match self.shared_value() {
            Some(value) => tile.as_numbered().is_some_and(|t| t.value == value),
            // Nothing but wildcards so far; any tile sets the value.
            None => true,
        }
    }

    fn with_tile(&self, tile: Tile) -> (Self, Option<Tile>) {
        let mut tiles = self.tiles.clone();
        if !tile.is_wildcard() {
            if let Some(slot) = tiles.iter().position(|t| t.is_wildcard()) {
                tiles[slot] = tile;
                return (TileGroup::new(tiles), Some(Tile::FreeWildcard));
            }
        }
        tiles.push(tile);
        (TileGroup::new(tiles), None)
    }

    fn without_tile(&self, tile: &Tile) -> Result<(Self, Tile), SetError> {
        if tile.is_wildcard() {
            return Err(SetError::InvalidWildcardRemoval);
        }
        let slot = self
            .tiles
            .iter()
            .position(|t| t == tile)
            .ok_or_else(|| SetError::MissingTile(tile.clone()))?;
        let mut tiles = self.tiles.clone();
        let removed = tiles.remove(slot);
        Ok((TileGroup::new(tiles), removed))
    }

    fn removable_tiles(&self) -> Vec<Tile> {
        if self.tiles.len() <= 3 {
            return Vec::new();
        }
        self.tiles
            .iter()
            .filter(|t| !t.is_wildcard())
            .cloned()
            .collect()
    }

    fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn score(&self) -> u32 {
        scoring::group_score(&self.tiles)
    }
}

/// A same-color consecutive sequence, ordered low to high.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRun {
    tiles: Vec<Tile>,
}

impl TileRun {
    /// The tiles must already be in ascending board order.
    pub fn new(tiles: Vec<Tile>) -> Self {
        TileRun { tiles }
    }

    /// Color and the value the first slot resolves to, anchored on the
    /// first numbered member. None while the run holds no numbered tile.
    fn anchor(&self) -> Option<(TileColor, i32)> {
        self.tiles.iter().enumerate().find_map(|(i, t)| {
            t.as_numbered()
                .map(|n| (n.color, n.value as i32 - i as i32))
        })
    }
}

impl TileSet for TileRun {
    fn is_valid(&self) -> bool {
        self.tiles.len() >= 3
    }

    fn check(&self, tile: &Tile) -> bool {
        if self.tiles.is_empty() {
            return true;
        }
        if tile.is_wildcard() {
            // A wildcard extends the high end; its slot must still resolve
            // to a legal value.
            return match self.anchor() {
                Some((_, start)) => start + self.tiles.len() as i32 <= MAX_VALUE as i32,
                None => true,
            };
        }
        let Some(numbered) = tile.as_numbered() else {
            return true;
        };
        let Some((color, start)) = self.anchor() else {
            // Only wildcards so far; they will resolve to the values just
            // below this tile, which must not run off the low end.
            return numbered.value as i32 > self.tiles.len() as i32;
        };
        if numbered.color != color {
            return false;
        }
        let value = numbered.value as i32;
        let end = start + self.tiles.len() as i32 - 1;
        if value == start - 1 || value == end + 1 {
            return true;
        }
        // A wildcard slot resolving to this value accepts it as a
        // substitution.
        self.tiles
            .iter()
            .enumerate()
            .any(|(i, t)| t.is_wildcard() && start + i as i32 == value)
    }

    fn with_tile(&self, tile: Tile) -> (Self, Option<Tile>) {
        let mut tiles = self.tiles.clone();
        let Some(numbered) = tile.as_numbered() else {
            // A wildcard extends the run at the high end.
            tiles.push(tile);
            return (TileRun::new(tiles), None);
        };
        if let Some((_, start)) = self.anchor() {
            let value = numbered.value as i32;
            if let Some(slot) = tiles
                .iter()
                .enumerate()
                .position(|(i, t)| t.is_wildcard() && start + i as i32 == value)
            {
                tiles[slot] = tile;
                return (TileRun::new(tiles), Some(Tile::FreeWildcard));
            }
            if value == start - 1 {
                tiles.insert(0, tile);
                return (TileRun::new(tiles), None);
            }
        }
        tiles.push(tile);
        (TileRun::new(tiles), None)
    }

    fn without_tile(&self, tile: &Tile) -> Result<(Self, Tile), SetError> {
        if tile.is_wildcard() {
            return Err(SetError::InvalidWildcardRemoval);
        }
        if self.tiles.first() == Some(tile) {
            let mut tiles = self.tiles.clone();
            let removed = tiles.remove(0);
            return Ok((TileRun::new(tiles), removed));
        }
        if self.tiles.last() == Some(tile) {
            let mut tiles = self.tiles.clone();
            let removed = tiles.pop().unwrap();
            return Ok((TileRun::new(tiles), removed));
        }
        if self.tiles.contains(tile) {
            return Err(SetError::InvalidBoundaryRemoval(tile.clone()));
        }
        Err(SetError::MissingTile(tile.clone()))
    }

    fn removable_tiles(&self) -> Vec<Tile> {
        if self.tiles.len() <= 3 {
            return Vec::new();
        }
        let mut removable = Vec::new();
        if let Some(first) = self.tiles.first() {
            if !first.is_wildcard() {
                removable.push(first.clone());
            }
        }
        if let Some(last) = self.tiles.last() {
            if !last.is_wildcard() {
                removable.push(last.clone());
            }
        }
        removable
    }

    fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    fn score(&self) -> u32 {
        scoring::run_score(&self.tiles)
    }
}

/// Either kind of board set, for heterogeneous boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardSet {
    Group(TileGroup),
    Run(TileRun),
}

impl BoardSet {
    pub fn group(tiles: Vec<Tile>) -> Self {
        BoardSet::Group(TileGroup::new(tiles))
    }

    pub fn run(tiles: Vec<Tile>) -> Self {
        BoardSet::Run(TileRun::new(tiles))
    }
}

impl TileSet for BoardSet {
    fn is_valid(&self) -> bool {
        match self {
            BoardSet::Group(set) => set.is_valid(),
            BoardSet::Run(set) => set.is_valid(),
        }
    }

    fn check(&self, tile: &Tile) -> bool {
        match self {
            BoardSet::Group(set) => set.check(tile),
            BoardSet::Run(set) => set.check(tile),
        }
    }

    fn with_tile(&self, tile: Tile) -> (Self, Option<Tile>) {
        match self {
            BoardSet::Group(set) => {
                let (set, freed) = set.with_tile(tile);
                (BoardSet::Group(set), freed)
            }
            BoardSet::Run(set) => {
                let (set, freed) = set.with_tile(tile);
                (BoardSet::Run(set), freed)
            }
        }
    }

    fn without_tile(&self, tile: &Tile) -> Result<(Self, Tile), SetError> {
        match self {
            BoardSet::Group(set) => {
                let (set, removed) = set.without_tile(tile)?;
                Ok((BoardSet::Group(set), removed))
            }
            BoardSet::Run(set) => {
                let (set, removed) = set.without_tile(tile)?;
                Ok((BoardSet::Run(set), removed))
            }
        }
    }

    fn removable_tiles(&self) -> Vec<Tile> {
        match self {
            BoardSet::Group(set) => set.removable_tiles(),
            BoardSet::Run(set) => set.removable_tiles(),
        }
    }

    fn tiles(&self) -> &[Tile] {
        match self {
            BoardSet::Group(set) => set.tiles(),
            BoardSet::Run(set) => set.tiles(),
        }
    }

    fn score(&self) -> u32 {
        match self {
            BoardSet::Group(set) => set.score(),
            BoardSet::Run(set) => set.score(),
        }
    }
}
