//! Indexing helpers the extractors are built on: value buckets, per-color
//! sorted lists, and maximal consecutive chunks.

use crate::{Tile, TileColor};
use std::collections::BTreeMap;

/// Bucket tiles by value, in ascending value order.
///
/// Numbered tiles and bound wildcards participate (a bound wildcard indexes
/// at its bound value); free wildcards are excluded. Tiles within a bucket
/// keep their encounter order.
pub fn tiles_by_value(tiles: &[Tile]) -> BTreeMap<u8, Vec<Tile>> {
    let mut buckets: BTreeMap<u8, Vec<Tile>> = BTreeMap::new();
    for tile in tiles {
        if let Some(value) = tile.value() {
            buckets.entry(value).or_default().push(tile.clone());
        }
    }
    buckets
}

/// Per color, the tiles of that color sorted ascending by value (stable).
///
/// Every color is present in the result, empty or not. Free wildcards are
/// excluded.
pub fn tiles_by_color_sorted(tiles: &[Tile]) -> BTreeMap<TileColor, Vec<Tile>> {
    let mut by_color: BTreeMap<TileColor, Vec<Tile>> = TileColor::ALL
        .iter()
        .map(|&color| (color, Vec::new()))
        .collect();
    for tile in tiles {
        if let Some(color) = tile.color() {
            by_color.get_mut(&color).unwrap().push(tile.clone());
        }
    }
    for list in by_color.values_mut() {
        list.sort_by_key(|t| t.value());
    }
    by_color
}

/// Chunk a value-sorted sequence into maximal consecutive runs, where each
/// successive value is exactly one above the previous.
///
/// The chunks come back longest-first (stable on ties): when leftover
/// wildcards later look for a run to attach to, the longest candidate is
/// considered first.
pub fn consecutive_runs(tiles: &[Tile]) -> Vec<Vec<Tile>> {
    let mut chunks: Vec<Vec<Tile>> = Vec::new();
    let mut current: Vec<Tile> = Vec::new();
    for tile in tiles {
        match current.last().and_then(|t| t.value()) {
            Some(prev) if tile.value() == Some(prev + 1) => current.push(tile.clone()),
            Some(_) => {
                chunks.push(std::mem::take(&mut current));
                current.push(tile.clone());
            }
            None => current.push(tile.clone()),
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks.sort_by_key(|chunk| std::cmp::Reverse(chunk.len()));
    chunks
}
