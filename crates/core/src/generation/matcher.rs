//! Entry-point matching: which templates can attach to an open entry point,
//! and where they have to be placed to do so.

use std::sync::Arc;

use crate::placement::PlacedEntry;
use crate::template::{EntryPoint, SegmentTemplate};
use crate::types::BlockPos;

/// A pool template together with the entry point it would connect through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub pool_index: usize,
    pub entry: EntryPoint,
}

/// Every template in `pool` exposing an entry point opposite to `target`,
/// in pool order.
pub fn compatible_candidates(target: PlacedEntry, pool: &[Arc<SegmentTemplate>]) -> Vec<Candidate> {
    let wanted = target.direction.opposite();
    pool.iter()
        .enumerate()
        .filter_map(|(pool_index, template)| {
            template.entry_point_facing(wanted).map(|entry| Candidate { pool_index, entry })
        })
        .collect()
}

/// Origin that puts `mating` exactly one cell beyond `target`, so the two
/// segments touch across the shared face without sharing a cell.
///
/// Panics if `mating` does not face `target`.
pub fn placement_origin(target: PlacedEntry, mating: EntryPoint) -> BlockPos {
    assert_eq!(
        mating.direction,
        target.direction.opposite(),
        "candidate entry point must face the frontier entry point"
    );
    target.connection_cell() - mating.offset
}
