//! The general combinatorial formulation: enumerate subsets of the hand and
//! of tiles removable from board sets, and realize the highest-scoring legal
//! rearrangement.
//!
//! Subset enumeration is 2^n - 1 per candidate list, so this is only viable
//! for the small hands and boards it is meant for.

use crate::sets::{BoardSet, TileGroup, TileRun, TileSet};
use crate::{BoundWildcard, MELD_THRESHOLD, NumberedTile, Tile};
use log::debug;

/// All non-empty subsets of `items`, in ascending bitmask order. Each subset
/// preserves the input order.
pub fn combinations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let n = items.len();
    let mut subsets = Vec::with_capacity((1usize << n) - 1);
    for mask in 1usize..(1 << n) {
        let subset: Vec<T> = items
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, item)| item.clone())
            .collect();
        subsets.push(subset);
    }
    subsets
}

/// Non-empty subsets of `items` that leave at least `keep` elements behind,
/// smallest subsets first, positions in lexicographic order within a size.
pub fn combinations_with_min_remaining<T: Clone>(items: &[T], keep: usize) -> Vec<Vec<T>> {
    let n = items.len();
    let mut subsets = Vec::new();
    for size in 1..=n.saturating_sub(keep) {
        let mut indices: Vec<usize> = (0..size).collect();
        loop {
            subsets.push(indices.iter().map(|&i| items[i].clone()).collect());
            if !next_index_combination(&mut indices, n) {
                break;
            }
        }
    }
    subsets
}

/// Advance an index combination to its lexicographic successor.
fn next_index_combination(indices: &mut [usize], n: usize) -> bool {
    let k = indices.len();
    let mut i = k;
    while i > 0 {
        i -= 1;
        if indices[i] < n - k + i {
            indices[i] += 1;
            for j in (i + 1)..k {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// One greedy decomposition of a candidate pile against a working board.
struct Assembly {
    /// Newly formed sets, each with the tiles it consumed.
    new_sets: Vec<(BoardSet, Vec<Tile>)>,
    /// The working board: sources after extraction, plus any extensions.
    board: Vec<BoardSet>,
    /// Indices into `board` that were extended with candidate tiles.
    extended: Vec<usize>,
    /// Every candidate tile consumed, across new sets and extensions.
    consumed: Vec<Tile>,
    /// Candidates left over (including wildcards freed by substitution).
    remaining: Vec<Tile>,
}

impl Assembly {
    fn score(&self) -> u32 {
        let new: u32 = self.new_sets.iter().map(|(set, _)| set.score()).sum();
        let board: u32 = self.board.iter().map(|set| set.score()).sum();
        new + board
    }
}

/// Feed tiles in order into `set`, keeping the longest valid prefix under
/// its membership rule. Returns the grown set, the tiles consumed, and any
/// wildcards the growth freed out of the original set.
fn grow<S: TileSet>(set: &S, tiles: &[Tile]) -> (S, Vec<Tile>, Vec<Tile>)
where
    S: Clone,
{
    let mut grown = set.clone();
    let mut consumed: Vec<Tile> = Vec::new();
    let mut freed: Vec<Tile> = Vec::new();
    for tile in tiles {
        if !grown.check(tile) {
            break;
        }
        let (next, released) = grown.with_tile(tile.clone());
        grown = next;
        consumed.push(tile.clone());
        if let Some(wildcard) = released {
            // If the substituted wildcard was one we fed ourselves, it was
            // never really consumed; otherwise it leaves the original set.
            if let Some(pos) = consumed.iter().position(|t| *t == wildcard) {
                consumed.remove(pos);
            } else {
                freed.push(wildcard);
            }
        }
    }
    (grown, consumed, freed)
}

/// Remove one occurrence of each tile in `consumed` from `candidates`.
fn remove_consumed(candidates: &mut Vec<Tile>, consumed: &[Tile]) {
    for tile in consumed {
        if let Some(pos) = candidates.iter().position(|t| t == tile) {
            candidates.remove(pos);
        }
    }
}

/// Greedily decompose `candidates`: for each subset, largest first, try a
/// new group, then a new run, then extending each board set; accept the
/// first success, drop its consumed tiles, and start over until nothing
/// more forms.
fn assemble(mut candidates: Vec<Tile>, board: &[BoardSet]) -> Assembly {
    let mut working: Vec<BoardSet> = board.to_vec();
    let mut extended: Vec<usize> = Vec::new();
    let mut new_sets: Vec<(BoardSet, Vec<Tile>)> = Vec::new();
    let mut consumed_total: Vec<Tile> = Vec::new();
    let mut freed_total: Vec<Tile> = Vec::new();

    'accept: loop {
        let subsets = combinations(&candidates);
        for subset in subsets.iter().rev() {
            let (group, consumed, _) = grow(&TileGroup::new(Vec::new()), subset);
            if group.is_valid() {
                remove_consumed(&mut candidates, &consumed);
                consumed_total.extend(consumed.iter().cloned());
                new_sets.push((BoardSet::Group(group), consumed));
                continue 'accept;
            }
            let (run, consumed, _) = grow(&TileRun::new(Vec::new()), subset);
            if run.is_valid() {
                remove_consumed(&mut candidates, &consumed);
                consumed_total.extend(consumed.iter().cloned());
                new_sets.push((BoardSet::Run(run), consumed));
                continue 'accept;
            }
            for i in 0..working.len() {
                let (extended_set, consumed, freed) = grow(&working[i], subset);
                if consumed.is_empty() || !extended_set.is_valid() {
                    continue;
                }
                remove_consumed(&mut candidates, &consumed);
                consumed_total.extend(consumed.iter().cloned());
                // Wildcards freed out of a board set head back to the hand;
                // they are not up for grabs in this same pass.
                freed_total.extend(freed);
                working[i] = extended_set;
                if !extended.contains(&i) {
                    extended.push(i);
                }
                continue 'accept;
            }
        }
        break;
    }

    candidates.extend(freed_total);
    Assembly {
        new_sets,
        board: working,
        extended,
        consumed: consumed_total,
        remaining: candidates,
    }
}

/// The per-source take options: nothing, or any subset of the removable
/// tiles whose extraction leaves the source valid.
fn removable_options(set: &BoardSet) -> Vec<Vec<Tile>> {
    let mut options = vec![Vec::new()];
    for subset in combinations(&set.removable_tiles()) {
        if extract_from(set, &subset).is_some() {
            options.push(subset);
        }
    }
    options
}

/// Extract `tiles` from `set` one by one; None if any extraction fails or
/// the result is no longer valid.
fn extract_from(set: &BoardSet, tiles: &[Tile]) -> Option<BoardSet> {
    let mut current = set.clone();
    for tile in tiles {
        let (next, _removed) = current.without_tile(tile).ok()?;
        current = next;
    }
    current.is_valid().then_some(current)
}

/// Every cross-combination of per-source options, take-nothing first.
fn cross_combinations(options: &[Vec<Vec<Tile>>]) -> Vec<Vec<Vec<Tile>>> {
    let mut combos: Vec<Vec<Vec<Tile>>> = vec![Vec::new()];
    for source_options in options {
        let mut next = Vec::with_capacity(combos.len() * source_options.len());
        for combo in &combos {
            for option in source_options {
                let mut extended = combo.clone();
                extended.push(option.clone());
                next.push(extended);
            }
        }
        combos = next;
    }
    combos
}

/// Whether `consumed` covers every tile of `taken`, as multisets.
fn covers(consumed: &[Tile], taken: &[Tile]) -> bool {
    let mut pool = consumed.to_vec();
    taken.iter().all(|tile| {
        if let Some(pos) = pool.iter().position(|t| t == tile) {
            pool.remove(pos);
            true
        } else {
            false
        }
    })
}

/// Bind the free wildcards of a freshly realized set: group wildcards take
/// the group's value in every color, run wildcards take the exact value
/// their slot resolves to.
fn finalize_set(set: BoardSet) -> BoardSet {
    match set {
        BoardSet::Group(group) => {
            let numbered: Vec<NumberedTile> =
                group.tiles().iter().filter_map(|t| t.as_numbered()).collect();
            if numbered.is_empty() {
                return BoardSet::Group(group);
            }
            let tiles = group
                .tiles()
                .iter()
                .map(|t| match t {
                    Tile::FreeWildcard => {
                        Tile::BoundWildcard(BoundWildcard::from_tiles(&numbered))
                    }
                    other => other.clone(),
                })
                .collect();
            BoardSet::group(tiles)
        }
        BoardSet::Run(run) => {
            let anchor = run.tiles().iter().enumerate().find_map(|(i, t)| {
                t.as_numbered().map(|n| (n.color, n.value as i32 - i as i32))
            });
            let Some((color, start)) = anchor else {
                return BoardSet::Run(run);
            };
            let tiles = run
                .tiles()
                .iter()
                .enumerate()
                .map(|(i, t)| match t {
                    Tile::FreeWildcard => Tile::BoundWildcard(BoundWildcard::new(vec![
                        NumberedTile::new(color, (start + i as i32) as u8),
                    ])),
                    other => other.clone(),
                })
                .collect();
            BoardSet::run(tiles)
        }
    }
}

/// Find and apply the best legal play for the given hand and board.
///
/// Before melding, only the hand participates and at most one set may be
/// realized, the highest-scoring one reaching [`MELD_THRESHOLD`]. Once
/// melded, every cross-combination of per-source removable subsets is
/// evaluated together with the hand, the assembly of maximum total score
/// wins (first found on ties), its extractions and extensions are swapped
/// into the board, and the consumed tiles leave the hand.
///
/// Returns the realized sets: newly formed ones plus any board sets that
/// were extended.
pub fn make_play(hand: &mut Vec<Tile>, board: &mut Vec<BoardSet>, melded: bool) -> Vec<BoardSet> {
    if !melded {
        return make_melding_play(hand);
    }

    let options: Vec<Vec<Vec<Tile>>> = board.iter().map(removable_options).collect();
    let mut best: Option<(u32, Assembly, Vec<Tile>)> = None;

    for combo in cross_combinations(&options) {
        let mut working: Vec<BoardSet> = Vec::with_capacity(board.len());
        let mut taken: Vec<Tile> = Vec::new();
        let mut feasible = true;
        for (set, picks) in board.iter().zip(&combo) {
            match extract_from(set, picks) {
                Some(reduced) => {
                    working.push(reduced);
                    taken.extend(picks.iter().cloned());
                }
                None => {
                    feasible = false;
                    break;
                }
            }
        }
        if !feasible {
            continue;
        }

        let mut candidates = taken.clone();
        candidates.extend(hand.iter().cloned());
        let assembly = assemble(candidates, &working);
        if !covers(&assembly.consumed, &taken) {
            continue;
        }

        let score = assembly.score();
        if best.as_ref().is_none_or(|(best_score, _, _)| score > *best_score) {
            best = Some((score, assembly, taken));
        }
    }

    let Some((score, mut assembly, _)) = best else {
        return Vec::new();
    };
    debug!(
        "realizing assembly worth {} points ({} new set(s), {} extension(s))",
        score,
        assembly.new_sets.len(),
        assembly.extended.len()
    );

    for &i in &assembly.extended {
        assembly.board[i] = finalize_set(assembly.board[i].clone());
    }
    let mut play: Vec<BoardSet> = Vec::new();
    for (set, _) in assembly.new_sets {
        play.push(finalize_set(set));
    }
    for &i in &assembly.extended {
        play.push(assembly.board[i].clone());
    }

    *board = assembly.board;
    *hand = assembly.remaining;
    play
}

/// The pre-meld play: decompose the hand alone and realize the single
/// best set that reaches the meld threshold.
fn make_melding_play(hand: &mut Vec<Tile>) -> Vec<BoardSet> {
    let assembly = assemble(hand.clone(), &[]);
    let mut best: Option<(u32, &(BoardSet, Vec<Tile>))> = None;
    for candidate in &assembly.new_sets {
        let score = candidate.0.score();
        if score >= MELD_THRESHOLD
            && best.is_none_or(|(best_score, _)| score > best_score)
        {
            best = Some((score, candidate));
        }
    }
    let Some((score, (set, consumed))) = best else {
        return Vec::new();
    };
    debug!("melding a set worth {} points", score);
    remove_consumed(hand, consumed);
    vec![finalize_set(set.clone())]
}
