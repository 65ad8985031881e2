//! The two-state wildcard lifecycle: binding leftover free wildcards into an
//! emitted set, and swapping a bound wildcard back out once a matching real
//! tile shows up in the hand.

use crate::{BoundWildcard, GameState, Tile};
use log::trace;

/// Which emitted set absorbs the free wildcards left over after extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WildcardAttachment {
    /// Attach to the highest-scoring emitted set (ties go to the earlier one).
    #[default]
    HighestScore,
    /// Attach to the set that was emitted first.
    FirstEmitted,
}

impl WildcardAttachment {
    /// Pick the receiving set. `sets` must be non-empty.
    pub(crate) fn choose(self, sets: &[Vec<Tile>], score: fn(&[Tile]) -> u32) -> usize {
        match self {
            WildcardAttachment::FirstEmitted => 0,
            WildcardAttachment::HighestScore => sets
                .iter()
                .enumerate()
                .max_by_key(|(i, set)| (score(set), std::cmp::Reverse(*i)))
                .map(|(i, _)| i)
                .unwrap_or(0),
        }
    }
}

/// Bind free wildcards into `set`, returning the extended set.
///
/// Candidates come from the set's numbered members: an all-same-value set
/// offers that value in every color, a same-color sequence offers the two
/// values just outside its span. The caller is responsible for swapping the
/// result back into the board.
pub fn bind_free_wildcards(set: &[Tile], wildcards: &[Tile]) -> Vec<Tile> {
    if wildcards.is_empty() {
        return set.to_vec();
    }
    debug_assert!(wildcards.iter().all(|t| t.is_free_wildcard()));

    let numbered: Vec<_> = set.iter().filter_map(|t| t.as_numbered()).collect();
    let mut bound = set.to_vec();
    if numbered.is_empty() {
        bound.extend(wildcards.iter().cloned());
        return bound;
    }
    for _ in wildcards {
        bound.push(Tile::BoundWildcard(BoundWildcard::from_tiles(&numbered)));
    }
    bound
}

/// Swap bound wildcards on the board for matching tiles from the hand.
///
/// Board sets are scanned in order; for each bound wildcard the first
/// matching numbered tile still in the hand takes its exact slot, and one
/// free wildcard is returned to the hand. A hand tile consumed by one
/// substitution is not available to a later wildcard in the same pass.
pub fn substitute_wildcards(state: &GameState) -> GameState {
    let mut hand = state.hand.clone();
    let mut board = Vec::with_capacity(state.board.len());

    for set in &state.board {
        let mut new_set = set.clone();
        for slot in 0..new_set.len() {
            let Tile::BoundWildcard(wildcard) = &new_set[slot] else {
                continue;
            };
            let found = hand.iter().position(|t| {
                t.as_numbered()
                    .is_some_and(|numbered| wildcard.matches(&numbered))
            });
            if let Some(pos) = found {
                let replacement = hand.remove(pos);
                trace!("substituting {} for {}", replacement, new_set[slot]);
                new_set[slot] = replacement;
                hand.push(Tile::FreeWildcard);
            }
        }
        board.push(new_set);
    }

    GameState { board, hand }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NumberedTile, TileColor, scoring};

    fn red(value: u8) -> Tile {
        Tile::numbered(TileColor::Red, value)
    }

    fn black(value: u8) -> Tile {
        Tile::numbered(TileColor::Black, value)
    }

    fn bound(candidates: &[(TileColor, u8)]) -> Tile {
        Tile::BoundWildcard(BoundWildcard::new(
            candidates
                .iter()
                .map(|&(color, value)| NumberedTile::new(color, value))
                .collect(),
        ))
    }

    #[test]
    fn test_bind_nothing_to_empty_set() {
        assert_eq!(bind_free_wildcards(&[], &[]), Vec::<Tile>::new());
    }

    #[test]
    fn test_bind_without_wildcards_is_identity() {
        let set = vec![red(7), red(7), black(7)];
        assert_eq!(bind_free_wildcards(&set, &[]), set);
    }

    #[test]
    fn test_bind_to_group() {
        let set = vec![red(7), red(7), black(7)];
        let result = bind_free_wildcards(&set, &[Tile::FreeWildcard]);
        let expected_wildcard = bound(&[
            (TileColor::Red, 7),
            (TileColor::Blue, 7),
            (TileColor::Orange, 7),
            (TileColor::Black, 7),
        ]);
        assert_eq!(result, vec![red(7), red(7), black(7), expected_wildcard]);
    }

    #[test]
    fn test_bind_multiple_to_group() {
        let set = vec![red(7), red(7), black(7)];
        let result = bind_free_wildcards(&set, &[Tile::FreeWildcard, Tile::FreeWildcard]);
        assert_eq!(result.len(), 5);
        assert_eq!(result[3], result[4]);
        assert!(result[3].is_bound_wildcard());
    }

    #[test]
    fn test_bind_to_run() {
        let set = vec![red(8), red(9), red(10)];
        let result = bind_free_wildcards(&set, &[Tile::FreeWildcard]);
        let expected_wildcard = bound(&[(TileColor::Red, 7), (TileColor::Red, 11)]);
        assert_eq!(result, vec![red(8), red(9), red(10), expected_wildcard]);
    }

    #[test]
    fn test_bind_multiple_to_run() {
        let set = vec![red(8), red(9), red(10)];
        let result = bind_free_wildcards(&set, &[Tile::FreeWildcard, Tile::FreeWildcard]);
        let expected_wildcard = bound(&[(TileColor::Red, 7), (TileColor::Red, 11)]);
        assert_eq!(
            result,
            vec![
                red(8),
                red(9),
                red(10),
                expected_wildcard.clone(),
                expected_wildcard
            ]
        );
    }

    #[test]
    fn test_attachment_first_emitted() {
        let sets = vec![vec![red(7), red(7), red(7)], vec![red(10), red(10), red(10)]];
        assert_eq!(
            WildcardAttachment::FirstEmitted.choose(&sets, scoring::group_score),
            0
        );
    }

    #[test]
    fn test_attachment_highest_score() {
        let sets = vec![vec![red(7), red(7), red(7)], vec![red(10), red(10), red(10)]];
        assert_eq!(
            WildcardAttachment::HighestScore.choose(&sets, scoring::group_score),
            1
        );
    }

    #[test]
    fn test_attachment_highest_score_tie_prefers_earlier() {
        let sets = vec![vec![red(7), red(7), red(7)], vec![black(7), black(7), black(7)]];
        assert_eq!(
            WildcardAttachment::HighestScore.choose(&sets, scoring::group_score),
            0
        );
    }

    #[test]
    fn test_substitute_no_board() {
        let state = GameState {
            board: vec![],
            hand: vec![red(9), Tile::FreeWildcard],
        };
        assert_eq!(substitute_wildcards(&state), state);
    }

    #[test]
    fn test_substitute_no_bound_wildcards() {
        let state = GameState {
            board: vec![vec![red(7), red(8), red(9)]],
            hand: vec![red(9), Tile::FreeWildcard],
        };
        assert_eq!(substitute_wildcards(&state), state);
    }

    #[test]
    fn test_substitute_into_group() {
        let state = GameState {
            board: vec![vec![red(7), red(7), bound(&[(TileColor::Black, 7)])]],
            hand: vec![black(7), red(10)],
        };
        let result = substitute_wildcards(&state);
        assert_eq!(result.board, vec![vec![red(7), red(7), black(7)]]);
        assert_eq!(result.hand, vec![red(10), Tile::FreeWildcard]);
    }

    #[test]
    fn test_substitute_into_run() {
        let state = GameState {
            board: vec![vec![
                red(7),
                red(8),
                bound(&[(TileColor::Red, 6), (TileColor::Red, 9)]),
            ]],
            hand: vec![black(7), red(9)],
        };
        let result = substitute_wildcards(&state);
        assert_eq!(result.board, vec![vec![red(7), red(8), red(9)]]);
        assert_eq!(result.hand, vec![black(7), Tile::FreeWildcard]);
    }

    #[test]
    fn test_substitute_consumes_each_hand_tile_once() {
        let state = GameState {
            board: vec![vec![
                red(7),
                red(8),
                bound(&[(TileColor::Red, 6), (TileColor::Red, 9)]),
            ]],
            hand: vec![black(7), red(9), red(9)],
        };
        let result = substitute_wildcards(&state);
        assert_eq!(result.board, vec![vec![red(7), red(8), red(9)]]);
        assert_eq!(result.hand, vec![black(7), red(9), Tile::FreeWildcard]);
    }

    #[test]
    fn test_bind_then_substitute_round_trip() {
        let set = vec![red(7), red(8), red(9)];
        let wildcards = vec![Tile::FreeWildcard, Tile::FreeWildcard];
        let bound_set = bind_free_wildcards(&set, &wildcards);
        assert_eq!(bound_set.len(), 5);

        let state = GameState {
            board: vec![bound_set],
            hand: vec![red(6), red(10)],
        };
        let result = substitute_wildcards(&state);
        let freed = result
            .hand
            .iter()
            .filter(|t| t.is_free_wildcard())
            .count();
        assert_eq!(freed, 2);
        assert!(result.board[0].iter().all(|t| !t.is_bound_wildcard()));
        assert_eq!(result.hand.len(), 2);
    }
}
