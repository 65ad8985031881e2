//! Partitions a tile pool into same-color consecutive runs, padding or
//! bridging short clusters with free wildcards.

use crate::sorting::{consecutive_runs, tiles_by_color_sorted};
use crate::wildcards::{WildcardAttachment, bind_free_wildcards};
use crate::{BoundWildcard, MAX_VALUE, MIN_VALUE, NumberedTile, Tile, TileColor, scoring};
use log::debug;

/// Result of a run extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunExtraction {
    pub runs: Vec<Vec<Tile>>,
    pub rest: Vec<Tile>,
}

/// Partition `tiles` into valid runs and a leftover pile.
///
/// Per color, tiles are sorted and chunked into maximal consecutive spans.
/// Complete spans (three or more) emit directly, longest first. Shorter
/// spans are then visited in ascending value order; the last one of its
/// color may be padded out to length three, while an earlier one may be
/// merged with the next span by bridging the gap, one wildcard per missing
/// value. Spans that can do neither go to the leftover pile, as do free
/// wildcards that remain when nothing was emitted.
pub fn extract_runs(tiles: &[Tile], attachment: WildcardAttachment) -> RunExtraction {
    if tiles.len() < 3 {
        return RunExtraction {
            runs: Vec::new(),
            rest: tiles.to_vec(),
        };
    }

    let mut runs: Vec<Vec<Tile>> = Vec::new();
    let mut rest: Vec<Tile> = Vec::new();
    let mut free: Vec<Tile> = tiles
        .iter()
        .filter(|t| t.is_free_wildcard())
        .cloned()
        .collect();

    for (color, sorted) in tiles_by_color_sorted(tiles) {
        let mut insufficient: Vec<Vec<Tile>> = Vec::new();
        for chunk in consecutive_runs(&sorted) {
            if chunk.len() >= 3 {
                runs.push(chunk);
            } else {
                insufficient.push(chunk);
            }
        }
        insufficient.sort_by_key(|chunk| chunk[0].value());
        debug!(
            "{:?}: {} insufficient span(s), {} free wildcard(s) available",
            color,
            insufficient.len(),
            free.len()
        );

        let mut i = 0;
        while i < insufficient.len() {
            let current = &insufficient[i];
            let start = current[0].value().unwrap();
            let end = current[current.len() - 1].value().unwrap();

            match insufficient.get(i + 1) {
                None => {
                    let needed = 3 - current.len();
                    if needed <= free.len() {
                        let mut padded = current.clone();
                        for j in 0..needed as u8 {
                            free.pop();
                            padded.push(Tile::BoundWildcard(pad_wildcard(color, start, end, j)));
                        }
                        runs.push(padded);
                    } else {
                        rest.extend(current.iter().cloned());
                    }
                }
                Some(next) => {
                    let next_start = next[0].value().unwrap();
                    let gap = next_start as i32 - end as i32 - 1;
                    if gap >= 1 && gap as usize <= free.len() {
                        let mut merged = current.clone();
                        for j in 0..gap as u8 {
                            free.pop();
                            merged.push(Tile::BoundWildcard(BoundWildcard::new(vec![
                                NumberedTile::new(color, end + j + 1),
                            ])));
                        }
                        merged.extend(next.iter().cloned());
                        runs.push(merged);
                        i += 1;
                    } else {
                        rest.extend(current.iter().cloned());
                    }
                }
            }
            i += 1;
        }
    }

    if !free.is_empty() && !runs.is_empty() {
        let target = attachment.choose(&runs, scoring::run_score);
        runs[target] = bind_free_wildcards(&runs[target], &free);
    } else {
        rest.extend(free);
    }

    debug!("emitted {} run(s), {} tile(s) left over", runs.len(), rest.len());
    RunExtraction { runs, rest }
}

/// Candidates for the j-th wildcard padding a standalone short span: the
/// values one step further out on each side, kept to the 1-13 range.
fn pad_wildcard(color: TileColor, start: u8, end: u8, j: u8) -> BoundWildcard {
    let mut candidates = Vec::new();
    if start > MIN_VALUE + j {
        candidates.push(NumberedTile::new(color, start - j - 1));
    }
    if end + j < MAX_VALUE {
        candidates.push(NumberedTile::new(color, end + j + 1));
    }
    BoundWildcard::new(candidates)
}
