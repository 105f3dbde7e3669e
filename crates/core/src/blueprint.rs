//! Immutable result of one generation run, with the feature collections the
//! world painter and feature placer consume.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::LayoutViolation;
use crate::generation::{GenerationStats, PlacementValidator, Termination};
use crate::placement::{PlacedEntry, PlacedSegment};
use crate::template::ColorTag;
use crate::types::BlockPos;

/// Parent link of one accepted placement. Both entry points are in the
/// blueprint's coordinate space, and `child_entry` sits one cell beyond
/// `parent_entry`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub parent: usize,
    pub child: usize,
    pub parent_entry: PlacedEntry,
    pub child_entry: PlacedEntry,
}

impl Connection {
    fn translated(self, offset: BlockPos) -> Self {
        let shift = |entry: PlacedEntry| PlacedEntry { position: entry.position + offset, ..entry };
        Self {
            parent_entry: shift(self.parent_entry),
            child_entry: shift(self.child_entry),
            ..self
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Blueprint {
    seed: u64,
    root_origin: BlockPos,
    placements: Vec<PlacedSegment>,
    connections: Vec<Connection>,
    termination: Termination,
    stats: GenerationStats,
    features: FeatureIndex,
}

/// Feature locations gathered across all placements.
#[derive(Clone, Debug, Default, PartialEq)]
struct FeatureIndex {
    vaults: BTreeMap<ColorTag, Vec<BlockPos>>,
    keys: BTreeMap<ColorTag, Vec<BlockPos>>,
    sand_spawns: Vec<BlockPos>,
    item_spawns: Vec<BlockPos>,
    coin_spawns: Vec<BlockPos>,
    open_entry_points: Vec<PlacedEntry>,
}

impl FeatureIndex {
    fn collect(placements: &[PlacedSegment], connections: &[Connection]) -> Self {
        let consumed: BTreeSet<PlacedEntry> = connections
            .iter()
            .flat_map(|connection| [connection.parent_entry, connection.child_entry])
            .collect();

        let mut index = Self::default();
        for placement in placements {
            if let Some((color, location)) = placement.vault() {
                index.vaults.entry(color.clone()).or_default().push(location);
            }
            if let Some((color, location)) = placement.key() {
                index.keys.entry(color.clone()).or_default().push(location);
            }
            index.sand_spawns.extend(placement.sand_spawns());
            index.item_spawns.extend(placement.item_spawns());
            index.coin_spawns.extend(placement.coin_spawns());
            index
                .open_entry_points
                .extend(placement.entry_points().filter(|entry| !consumed.contains(entry)));
        }
        index
    }
}

impl Blueprint {
    pub(crate) fn assemble(
        seed: u64,
        root_origin: BlockPos,
        placements: Vec<PlacedSegment>,
        connections: Vec<Connection>,
        termination: Termination,
        stats: GenerationStats,
    ) -> Self {
        assert!(!placements.is_empty(), "a blueprint always contains its hub");
        let features = FeatureIndex::collect(&placements, &connections);
        Self { seed, root_origin, placements, connections, termination, stats, features }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The origin the hub was placed at.
    pub fn root_origin(&self) -> BlockPos {
        self.root_origin
    }

    /// Accepted placements in acceptance order; the hub is always first.
    pub fn placements(&self) -> &[PlacedSegment] {
        &self.placements
    }

    pub fn hub(&self) -> &PlacedSegment {
        &self.placements[0]
    }

    pub fn hub_location(&self) -> BlockPos {
        self.hub().origin()
    }

    pub fn vault_locations(&self) -> &BTreeMap<ColorTag, Vec<BlockPos>> {
        &self.features.vaults
    }

    pub fn key_locations(&self) -> &BTreeMap<ColorTag, Vec<BlockPos>> {
        &self.features.keys
    }

    pub fn sand_spawns(&self) -> &[BlockPos] {
        &self.features.sand_spawns
    }

    pub fn item_spawns(&self) -> &[BlockPos] {
        &self.features.item_spawns
    }

    pub fn coin_spawns(&self) -> &[BlockPos] {
        &self.features.coin_spawns
    }

    /// One connection per non-hub placement, in acceptance order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn parent_connection(&self, child: usize) -> Option<&Connection> {
        self.connections.iter().find(|connection| connection.child == child)
    }

    /// Entry points that no connection consumed. Capping them is left to the
    /// world painter.
    pub fn open_entry_points(&self) -> &[PlacedEntry] {
        &self.features.open_entry_points
    }

    pub fn termination(&self) -> Termination {
        self.termination
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Sum of every placement's approximate coins scaled by its multiplier.
    pub fn total_coin_budget(&self) -> u64 {
        let total: f64 = self
            .placements
            .iter()
            .map(|placement| {
                let template = placement.template();
                f64::from(template.approximate_coins()) * template.coin_multiplier()
            })
            .sum();
        total.round() as u64
    }

    pub fn puzzle_rooms(&self) -> impl Iterator<Item = &PlacedSegment> + '_ {
        self.placements.iter().filter(|placement| placement.template().is_puzzle_room())
    }

    pub fn lava_parkour_rooms(&self) -> impl Iterator<Item = &PlacedSegment> + '_ {
        self.placements.iter().filter(|placement| placement.template().is_lava_parkour())
    }

    /// True when nothing could be attached to the hub. Callers usually retry
    /// with another seed.
    pub fn is_hub_only(&self) -> bool {
        self.placements.len() == 1
    }

    /// Re-expresses the whole blueprint in a space shifted by `offset`, e.g.
    /// blueprint-relative to absolute world coordinates. The shifted root
    /// origin is expected to stay within [`crate::types::COORDINATE_LIMIT`].
    pub fn translated(&self, offset: BlockPos) -> Self {
        let placements: Vec<_> =
            self.placements.iter().map(|placement| placement.translated(offset)).collect();
        let connections: Vec<_> =
            self.connections.iter().map(|connection| connection.translated(offset)).collect();
        Self::assemble(
            self.seed,
            self.root_origin + offset,
            placements,
            connections,
            self.termination,
            self.stats,
        )
    }

    /// Re-checks the structural properties every generated layout has: no
    /// two placements share a cell, every non-hub origin is within
    /// `max_distance` of the hub, templates are unique, and every non-hub
    /// placement hangs one depth below a parent it mates with.
    pub fn check_layout(&self, max_distance: f64) -> Result<(), LayoutViolation> {
        let distance_bound = PlacementValidator::new(self.hub_location(), max_distance);
        let mut names = BTreeSet::new();

        for (index, placement) in self.placements.iter().enumerate() {
            if !names.insert(placement.name()) {
                return Err(LayoutViolation::DuplicateTemplate {
                    name: placement.name().to_string(),
                });
            }
            let bounds = placement.bounds();
            if let Some(other) =
                self.placements[..index].iter().position(|other| other.bounds().intersects(&bounds))
            {
                return Err(LayoutViolation::Overlap { first: other, second: index });
            }
            if index == 0 {
                if placement.depth() != 0 {
                    return Err(LayoutViolation::DepthMismatch { index });
                }
                continue;
            }
            if !distance_bound.within_distance(placement) {
                return Err(LayoutViolation::TooFar { index });
            }

            let connection =
                self.parent_connection(index).ok_or(LayoutViolation::Unconnected { index })?;
            let parent = self
                .placements
                .get(connection.parent)
                .filter(|_| connection.parent < index)
                .ok_or(LayoutViolation::Unconnected { index })?;
            if placement.depth() != parent.depth() + 1 {
                return Err(LayoutViolation::DepthMismatch { index });
            }
            let seam_holds = connection.parent_entry.mates_with(connection.child_entry)
                && parent.entry_points().any(|entry| entry == connection.parent_entry)
                && placement.entry_points().any(|entry| entry == connection.child_entry);
            if !seam_holds {
                return Err(LayoutViolation::BrokenSeam { index });
            }
        }
        Ok(())
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.seed.to_le_bytes());
        push_pos(&mut bytes, self.root_origin);
        bytes.push(self.termination.code());

        bytes.extend((self.placements.len() as u32).to_le_bytes());
        for placement in &self.placements {
            let name = placement.name().as_bytes();
            bytes.extend((name.len() as u32).to_le_bytes());
            bytes.extend(name);
            push_pos(&mut bytes, placement.origin());
            bytes.extend(placement.depth().to_le_bytes());
        }

        bytes.extend((self.connections.len() as u32).to_le_bytes());
        for connection in &self.connections {
            bytes.extend((connection.parent as u32).to_le_bytes());
            bytes.extend((connection.child as u32).to_le_bytes());
            push_pos(&mut bytes, connection.parent_entry.position);
            bytes.push(connection.parent_entry.direction.code());
            push_pos(&mut bytes, connection.child_entry.position);
            bytes.push(connection.child_entry.direction.code());
        }

        bytes
    }
}

fn push_pos(bytes: &mut Vec<u8>, pos: BlockPos) {
    bytes.extend(pos.x.to_le_bytes());
    bytes.extend(pos.y.to_le_bytes());
    bytes.extend(pos.z.to_le_bytes());
}
