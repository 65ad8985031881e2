//! Scoring rules.
//!
//! Groups and runs value a wildcard slot differently: a group wildcard is
//! worth the group's shared value, while a run wildcard is worth the value
//! its position resolves to between its neighbors. The two rules are kept
//! separate on purpose.

use crate::{Tile, WILDCARD_SCORE};

/// Score of a loose pile of tiles (a hand). Wildcards count for
/// [`WILDCARD_SCORE`] points each.
pub fn hand_score(tiles: &[Tile]) -> u32 {
    tiles
        .iter()
        .map(|tile| match tile {
            Tile::Numbered(t) => t.value as u32,
            Tile::FreeWildcard | Tile::BoundWildcard(_) => WILDCARD_SCORE,
        })
        .sum()
}

/// Score of a same-value group: the shared value times the member count.
///
/// Every wildcard slot is worth the group's value. A set with no numbered
/// member has no determinable value and scores zero.
pub fn group_score(tiles: &[Tile]) -> u32 {
    let value = tiles.iter().rev().find_map(|t| t.as_numbered());
    match value {
        Some(t) => t.value as u32 * tiles.len() as u32,
        None => 0,
    }
}

/// Score of a consecutive run: the sum of the values each slot resolves to.
///
/// Wildcard slots interpolate from the nearest numbered neighbor, so the run
/// [r7, w, r9] scores 7 + 8 + 9. A set with no numbered member scores zero.
pub fn run_score(tiles: &[Tile]) -> u32 {
    let anchor = tiles
        .iter()
        .enumerate()
        .find_map(|(i, t)| t.as_numbered().map(|n| (i as i32, n.value as i32)));
    let Some((anchor_index, anchor_value)) = anchor else {
        return 0;
    };
    tiles
        .iter()
        .enumerate()
        .map(|(i, _)| (anchor_value + (i as i32 - anchor_index)).max(0) as u32)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoundWildcard, NumberedTile, TileColor};

    fn red(value: u8) -> Tile {
        Tile::numbered(TileColor::Red, value)
    }

    #[test]
    fn test_hand_score_sums_values() {
        let tiles = vec![red(7), red(8), Tile::numbered(TileColor::Black, 7)];
        assert_eq!(hand_score(&tiles), 22);
    }

    #[test]
    fn test_hand_score_counts_wildcards() {
        let tiles = vec![red(7), Tile::FreeWildcard];
        assert_eq!(hand_score(&tiles), 7 + WILDCARD_SCORE);
    }

    #[test]
    fn test_hand_score_empty() {
        assert_eq!(hand_score(&[]), 0);
    }

    #[test]
    fn test_group_score_multiplies_shared_value() {
        let tiles = vec![red(7), Tile::numbered(TileColor::Black, 7), red(7)];
        assert_eq!(group_score(&tiles), 21);
    }

    #[test]
    fn test_group_score_values_wildcard_slots() {
        let bound = Tile::BoundWildcard(BoundWildcard::from_tiles(&[NumberedTile::new(
            TileColor::Red,
            10,
        )]));
        let tiles = vec![red(10), red(10), bound];
        assert_eq!(group_score(&tiles), 30);
    }

    #[test]
    fn test_group_score_without_numbered_members() {
        assert_eq!(group_score(&[Tile::FreeWildcard, Tile::FreeWildcard]), 0);
    }

    #[test]
    fn test_run_score_interpolates_interior_wildcard() {
        let bound = Tile::BoundWildcard(BoundWildcard::new(vec![NumberedTile::new(
            TileColor::Red,
            8,
        )]));
        let tiles = vec![red(7), bound, red(9)];
        assert_eq!(run_score(&tiles), 24);
    }

    #[test]
    fn test_run_score_resolves_leading_wildcard() {
        let tiles = vec![Tile::FreeWildcard, red(8), red(9)];
        assert_eq!(run_score(&tiles), 24);
    }

    #[test]
    fn test_run_score_plain_run() {
        let tiles = vec![red(8), red(9), red(10)];
        assert_eq!(run_score(&tiles), 27);
    }
}
