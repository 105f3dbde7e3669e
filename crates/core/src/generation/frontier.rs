//! Open entry points still available for growing the layout.

use rand_chacha::ChaCha8Rng;

use crate::placement::{PlacedEntry, PlacedSegment};
use crate::types::Direction;

use super::seed::pick_index;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct FrontierEntry {
    pub(super) entry: PlacedEntry,
    /// Index of the accepted placement that exposes this entry point.
    pub(super) owner: usize,
    pub(super) owner_depth: u32,
}

#[derive(Clone, Debug, Default)]
pub(super) struct Frontier {
    entries: Vec<FrontierEntry>,
}

impl Frontier {
    /// Adds every entry point of `placement` except the one facing `consumed`.
    pub(super) fn extend_from(
        &mut self,
        owner: usize,
        placement: &PlacedSegment,
        consumed: Option<Direction>,
    ) {
        let owner_depth = placement.depth();
        self.entries.extend(
            placement
                .entry_points()
                .filter(|entry| Some(entry.direction) != consumed)
                .map(|entry| FrontierEntry { entry, owner, owner_depth }),
        );
    }

    /// Removes and returns one entry chosen uniformly at random.
    pub(super) fn take_random(&mut self, rng: &mut ChaCha8Rng) -> Option<FrontierEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let index = pick_index(rng, self.entries.len());
        Some(self.entries.remove(index))
    }

    pub(super) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }
}
