//! Turn-level orchestration: recombine the eligible pool into fresh groups
//! and runs, or pick a single qualifying set for a player's first meld.

use crate::groups::extract_groups;
use crate::runs::extract_runs;
use crate::wildcards::WildcardAttachment;
use crate::{GameState, MELD_THRESHOLD, Tile, scoring};
use log::debug;

/// Recombine the hand and every eligible board set into the best
/// decomposition, using the default wildcard attachment policy.
pub fn find_best_play(state: &GameState) -> GameState {
    find_best_play_with(state, WildcardAttachment::default())
}

/// Recombine the hand and every eligible board set into the best
/// decomposition.
///
/// Board sets containing a bound wildcard are protected: they carry a
/// commitment that only substitution may undo, so they are never pooled and
/// come back untouched. Everything else, plus the hand, is decomposed into
/// groups first and runs second; whatever neither extractor claims becomes
/// the new hand.
pub fn find_best_play_with(state: &GameState, attachment: WildcardAttachment) -> GameState {
    let mut protected: Vec<Vec<Tile>> = Vec::new();
    let mut pool: Vec<Tile> = Vec::new();

    for set in &state.board {
        if set.iter().any(|t| t.is_bound_wildcard()) {
            protected.push(set.clone());
        } else {
            pool.extend(set.iter().cloned());
        }
    }
    pool.extend(state.hand.iter().cloned());
    debug!(
        "recombining {} pooled tiles ({} protected set(s))",
        pool.len(),
        protected.len()
    );

    let grouped = extract_groups(&pool, attachment);
    let run_result = extract_runs(&grouped.rest, attachment);

    let mut board = grouped.groups;
    board.extend(run_result.runs);
    board.extend(protected);

    GameState {
        board,
        hand: run_result.rest,
    }
}

/// Find a player's first play with the default wildcard attachment policy.
pub fn find_best_melding_play(state: &GameState) -> GameState {
    find_best_melding_play_with(state, WildcardAttachment::default())
}

/// Find a player's first play: decompose the hand alone and keep the single
/// highest-scoring set that reaches the meld threshold.
///
/// The board is never pooled before a player has melded. All other
/// decomposed tiles return to the hand even if they formed valid sets, with
/// any wildcards bound during decomposition released back to their free
/// state.
pub fn find_best_melding_play_with(state: &GameState, attachment: WildcardAttachment) -> GameState {
    let grouped = extract_groups(&state.hand, attachment);
    let run_result = extract_runs(&grouped.rest, attachment);

    let mut candidates: Vec<(Vec<Tile>, u32)> = Vec::new();
    for set in grouped.groups {
        let score = scoring::group_score(&set);
        candidates.push((set, score));
    }
    for set in run_result.runs {
        let score = scoring::run_score(&set);
        candidates.push((set, score));
    }

    let mut best: Option<(usize, u32)> = None;
    for (i, (_, score)) in candidates.iter().enumerate() {
        if *score >= MELD_THRESHOLD && best.is_none_or(|(_, best_score)| *score > best_score) {
            best = Some((i, *score));
        }
    }

    let Some((chosen, score)) = best else {
        debug!("no candidate set reaches the meld threshold");
        return state.clone();
    };
    debug!("melding a set worth {} points", score);

    let mut board = state.board.clone();
    let mut hand = run_result.rest;
    for (i, (set, _)) in candidates.into_iter().enumerate() {
        if i == chosen {
            board.push(set);
        } else {
            hand.extend(set.iter().map(release_wildcard));
        }
    }

    GameState { board, hand }
}

/// A tile heading back to the hand: a wildcard bound during decomposition
/// returns to its free state, one for one.
fn release_wildcard(tile: &Tile) -> Tile {
    match tile {
        Tile::BoundWildcard(_) => Tile::FreeWildcard,
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoundWildcard, NumberedTile, TileColor};

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
    fn test_find_best_play_empty_state() {
        let state = GameState::default();
        let result = find_best_play(&state);
        assert!(result.board.is_empty());
        assert!(result.hand.is_empty());
    }

    #[test]
    fn test_find_best_play_single_group() {
        let state = GameState {
            board: vec![],
            hand: vec![red(7), red(7), red(7)],
        };
        let result = find_best_play(&state);
        assert_eq!(result.board, vec![vec![red(7), red(7), red(7)]]);
        assert!(result.hand.is_empty());
    }

    #[test]
    fn test_find_best_play_single_run() {
        let state = GameState {
            board: vec![],
            hand: vec![red(7), red(8), red(9)],
        };
        let result = find_best_play(&state);
        assert_eq!(result.board, vec![vec![red(7), red(8), red(9)]]);
        assert!(result.hand.is_empty());
    }

    #[test]
    fn test_find_best_play_group_with_wildcard() {
        let state = GameState {
            board: vec![],
            hand: vec![red(7), red(7), Tile::FreeWildcard],
        };
        let result = find_best_play(&state);
        assert_eq!(
            result.board,
            vec![vec![
                red(7),
                red(7),
                bound(&[
                    (TileColor::Red, 7),
                    (TileColor::Blue, 7),
                    (TileColor::Orange, 7),
                    (TileColor::Black, 7),
                ])
            ]]
        );
        assert!(result.hand.is_empty());
    }

    #[test]
    fn test_find_best_play_run_with_wildcard() {
        let state = GameState {
            board: vec![],
            hand: vec![red(7), red(8), Tile::FreeWildcard],
        };
        let result = find_best_play(&state);
        assert_eq!(
            result.board,
            vec![vec![
                red(7),
                red(8),
                bound(&[(TileColor::Red, 6), (TileColor::Red, 9)])
            ]]
        );
        assert!(result.hand.is_empty());
    }

    #[test]
    fn test_find_best_play_prefers_group_over_run() {
        let state = GameState {
            board: vec![],
            hand: vec![red(7), red(7), red(7), red(8), red(9)],
        };
        let result = find_best_play(&state);
        assert_eq!(result.board, vec![vec![red(7), red(7), red(7)]]);
        assert_eq!(result.hand, vec![red(8), red(9)]);
    }

    #[test]
    fn test_protected_group_not_raided_for_a_group() {
        let protected = vec![
            red(7),
            red(7),
            bound(&[
                (TileColor::Red, 7),
                (TileColor::Blue, 7),
                (TileColor::Orange, 7),
                (TileColor::Black, 7),
            ]),
        ];
        let state = GameState {
            board: vec![protected.clone()],
            hand: vec![red(8), red(8)],
        };
        let result = find_best_play(&state);
        assert_eq!(result.board, vec![protected]);
        assert_eq!(result.hand, vec![red(8), red(8)]);
    }

    #[test]
    fn test_protected_group_not_raided_for_a_run() {
        let protected = vec![
            red(7),
            red(7),
            bound(&[
                (TileColor::Red, 7),
                (TileColor::Blue, 7),
                (TileColor::Orange, 7),
                (TileColor::Black, 7),
            ]),
        ];
        let state = GameState {
            board: vec![protected.clone()],
            hand: vec![red(9), red(10)],
        };
        let result = find_best_play(&state);
        assert_eq!(result.board, vec![protected]);
        assert_eq!(result.hand, vec![red(9), red(10)]);
    }

    #[test]
    fn test_protected_run_not_raided_for_a_group() {
        let protected = vec![red(7), red(8), bound(&[(TileColor::Red, 6), (TileColor::Red, 9)])];
        let state = GameState {
            board: vec![protected.clone()],
            hand: vec![red(9), red(9)],
        };
        let result = find_best_play(&state);
        assert_eq!(result.board, vec![protected]);
        assert_eq!(result.hand, vec![red(9), red(9)]);
    }

    #[test]
    fn test_protected_run_not_raided_for_a_run() {
        let protected = vec![red(7), red(8), bound(&[(TileColor::Red, 6), (TileColor::Red, 9)])];
        let state = GameState {
            board: vec![protected.clone()],
            hand: vec![red(9), red(10)],
        };
        let result = find_best_play(&state);
        assert_eq!(result.board, vec![protected]);
        assert_eq!(result.hand, vec![red(9), red(10)]);
    }

    #[test]
    fn test_eligible_board_set_is_pooled() {
        let state = GameState {
            board: vec![vec![red(7), red(8), red(9)]],
            hand: vec![red(10)],
        };
        let result = find_best_play(&state);
        assert_eq!(result.board, vec![vec![red(7), red(8), red(9), red(10)]]);
        assert!(result.hand.is_empty());
    }

    #[test]
    fn test_redecomposing_a_valid_board_is_stable() {
        let state = GameState {
            board: vec![
                vec![red(7), red(7), red(7)],
                vec![black(9), black(10), black(11)],
            ],
            hand: vec![],
        };
        let result = find_best_play(&state);
        assert_eq!(result, state);
    }

    #[test]
    fn test_find_best_play_conserves_tiles() {
        let state = GameState {
            board: vec![
                vec![red(1), red(2), red(3)],
                vec![red(7), red(7), bound(&[(TileColor::Black, 7)])],
            ],
            hand: vec![black(4), black(4), red(4), red(13), Tile::FreeWildcard],
        };
        let before: usize = state.board.iter().map(|s| s.len()).sum::<usize>() + state.hand.len();
        let result = find_best_play(&state);
        let after: usize =
            result.board.iter().map(|s| s.len()).sum::<usize>() + result.hand.len();
        assert_eq!(before, after);
    }

    #[test]
    fn test_melding_play_below_threshold() {
        let state = GameState {
            board: vec![],
            hand: vec![red(7), red(7), red(7)],
        };
        let result = find_best_melding_play(&state);
        assert_eq!(result, state);
    }

    #[test]
    fn test_melding_play_picks_highest_scoring_set() {
        let state = GameState {
            board: vec![],
            hand: vec![red(10), red(10), red(10), red(11), red(11), red(11)],
        };
        let result = find_best_melding_play(&state);
        assert_eq!(result.board, vec![vec![red(11), red(11), red(11)]]);
        assert_eq!(result.hand, vec![red(10), red(10), red(10)]);
    }

    #[test]
    fn test_melding_play_ignores_the_board() {
        let existing = vec![red(1), red(2), red(3)];
        let state = GameState {
            board: vec![existing.clone()],
            hand: vec![red(11), red(11), red(11)],
        };
        let result = find_best_melding_play(&state);
        assert_eq!(
            result.board,
            vec![existing, vec![red(11), red(11), red(11)]]
        );
        assert!(result.hand.is_empty());
    }

    #[test]
    fn test_melding_play_releases_wildcards_from_unchosen_sets() {
        // The wildcard completes the 6-group (18 points, under threshold)
        // while the 11-group melds; the wildcard must come back free.
        let state = GameState {
            board: vec![],
            hand: vec![
                red(11),
                red(11),
                red(11),
                red(6),
                black(6),
                Tile::FreeWildcard,
            ],
        };
        let result = find_best_melding_play(&state);
        assert_eq!(result.board, vec![vec![red(11), red(11), red(11)]]);
        assert_eq!(result.hand, vec![red(6), black(6), Tile::FreeWildcard]);
    }

    #[test]
    fn test_melding_play_conserves_tiles() {
        let state = GameState {
            board: vec![],
            hand: vec![
                red(11),
                red(11),
                red(11),
                red(6),
                black(6),
                red(1),
                Tile::FreeWildcard,
            ],
        };
        let result = find_best_melding_play(&state);
        let after: usize =
            result.board.iter().map(|s| s.len()).sum::<usize>() + result.hand.len();
        assert_eq!(after, 7);
    }
}
