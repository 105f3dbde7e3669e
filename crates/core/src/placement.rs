//! Templates bound to an origin and a depth in the layout graph.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::template::{ColorTag, SegmentTemplate};
use crate::types::{Area, BlockPos, Direction};

/// An entry point expressed in placed coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlacedEntry {
    pub position: BlockPos,
    pub direction: Direction,
}

impl PlacedEntry {
    /// Cell directly beyond this entry point, where a connecting segment's
    /// entry point has to land.
    pub fn connection_cell(self) -> BlockPos {
        self.position.step(self.direction)
    }

    /// Whether `other` is the matching entry point of a segment attached here.
    pub fn mates_with(self, other: Self) -> bool {
        other.direction == self.direction.opposite() && other.position == self.connection_cell()
    }
}

/// A shared template plus the origin it was placed at. The origin may be
/// absolute-world or relative to the blueprint root; every derived position
/// lives in the same space as the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedSegment {
    template: Arc<SegmentTemplate>,
    origin: BlockPos,
    depth: u32,
}

impl PlacedSegment {
    pub fn new(template: Arc<SegmentTemplate>, origin: BlockPos, depth: u32) -> Self {
        Self { template, origin, depth }
    }

    pub fn template(&self) -> &Arc<SegmentTemplate> {
        &self.template
    }

    pub fn name(&self) -> &str {
        self.template.name()
    }

    pub fn origin(&self) -> BlockPos {
        self.origin
    }

    /// Graph distance from the hub, which sits at depth 0.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn bounds(&self) -> Area {
        Area::from_origin_and_size(self.origin, self.template.size())
    }

    /// Maps a template-relative offset into this placement's coordinate space.
    pub fn to_placed(&self, offset: BlockPos) -> BlockPos {
        self.origin + offset
    }

    pub fn entry_points(&self) -> impl Iterator<Item = PlacedEntry> + '_ {
        self.template.entry_points().iter().map(|entry| PlacedEntry {
            position: self.to_placed(entry.offset),
            direction: entry.direction,
        })
    }

    pub fn entry_point_facing(&self, direction: Direction) -> Option<PlacedEntry> {
        self.template
            .entry_point_facing(direction)
            .map(|entry| PlacedEntry { position: self.to_placed(entry.offset), direction })
    }

    pub fn sand_spawns(&self) -> impl Iterator<Item = BlockPos> + '_ {
        self.template.sand_spawns().iter().map(|&offset| self.to_placed(offset))
    }

    pub fn item_spawns(&self) -> impl Iterator<Item = BlockPos> + '_ {
        self.template.item_spawns().iter().map(|&offset| self.to_placed(offset))
    }

    pub fn coin_spawns(&self) -> impl Iterator<Item = BlockPos> + '_ {
        self.template.coin_spawns().iter().map(|&offset| self.to_placed(offset))
    }

    pub fn vault(&self) -> Option<(&ColorTag, BlockPos)> {
        self.template.vault().map(|vault| (&vault.color, self.to_placed(vault.offset)))
    }

    pub fn key(&self) -> Option<(&ColorTag, BlockPos)> {
        self.template.key().map(|key| (&key.color, self.to_placed(key.offset)))
    }

    /// Same placement moved into a coordinate space shifted by `offset`.
    pub fn translated(&self, offset: BlockPos) -> Self {
        Self {
            template: Arc::clone(&self.template),
            origin: self.origin + offset,
            depth: self.depth,
        }
    }
}
