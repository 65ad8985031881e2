//! Partitions a tile pool into same-value groups, completing short clusters
//! with free wildcards.

use crate::sorting::tiles_by_value;
use crate::wildcards::{WildcardAttachment, bind_free_wildcards};
use crate::{BoundWildcard, Tile, scoring};
use log::debug;

/// Result of a group extraction pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupExtraction {
    pub groups: Vec<Vec<Tile>>,
    pub rest: Vec<Tile>,
}

/// Partition `tiles` into valid groups and a leftover pile.
///
/// Tiles are bucketed by value, in ascending value order. A bucket of three
/// or more emits as a group unchanged; a smaller bucket is completed by
/// binding free wildcards to the bucket's value when enough remain. Free
/// wildcards left over after all buckets attach to one emitted group per the
/// attachment policy, or return to the leftover pile when nothing was
/// emitted.
pub fn extract_groups(tiles: &[Tile], attachment: WildcardAttachment) -> GroupExtraction {
    let mut groups: Vec<Vec<Tile>> = Vec::new();
    let mut rest: Vec<Tile> = Vec::new();

    let buckets = tiles_by_value(tiles);
    let mut free: Vec<Tile> = tiles
        .iter()
        .filter(|t| t.is_free_wildcard())
        .cloned()
        .collect();
    debug!(
        "group extraction over {} tiles ({} buckets, {} free wildcards)",
        tiles.len(),
        buckets.len(),
        free.len()
    );

    for (value, bucket) in buckets {
        let needed = 3usize.saturating_sub(bucket.len());
        let numbered: Vec<_> = bucket.iter().filter_map(|t| t.as_numbered()).collect();
        if needed == 0 {
            groups.push(bucket);
        } else if needed <= free.len() && !numbered.is_empty() {
            debug!("completing value-{} bucket with {} wildcard(s)", value, needed);
            let mut completed = bucket;
            for _ in 0..needed {
                free.pop();
                completed.push(Tile::BoundWildcard(BoundWildcard::from_tiles(&numbered)));
            }
            groups.push(completed);
        } else {
            rest.extend(bucket);
        }
    }

    if !free.is_empty() && !groups.is_empty() {
        let target = attachment.choose(&groups, scoring::group_score);
        groups[target] = bind_free_wildcards(&groups[target], &free);
    } else {
        rest.extend(free);
    }

    debug!("emitted {} group(s), {} tile(s) left over", groups.len(), rest.len());
    GroupExtraction { groups, rest }
}
