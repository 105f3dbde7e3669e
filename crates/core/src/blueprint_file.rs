//! JSON persistence for blueprints. A file stores template names, origins,
//! and parent links only; `resolve` rebuilds the full blueprint against a
//! template pack and re-checks every seam.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::blueprint::{Blueprint, Connection};
use crate::error::BlueprintFileError;
use crate::generation::{GenerationStats, Termination};
use crate::placement::PlacedSegment;
use crate::template_pack::TemplatePack;
use crate::types::{BlockPos, Direction};

pub const BLUEPRINT_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BlueprintFile {
    pub format_version: u32,
    pub seed: u64,
    pub root_origin: BlockPos,
    pub termination: Termination,
    pub stats: GenerationStats,
    pub placements: Vec<PlacementRecord>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlacementRecord {
    pub template: String,
    pub origin: BlockPos,
    pub depth: u32,
    #[serde(default)]
    pub parent: Option<ParentLink>,
}

/// Which earlier placement this one hangs off, and through which of the
/// parent's entry points.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentLink {
    pub index: usize,
    pub direction: Direction,
}

impl BlueprintFile {
    pub fn from_blueprint(blueprint: &Blueprint) -> Self {
        let placements = blueprint
            .placements()
            .iter()
            .enumerate()
            .map(|(index, placement)| PlacementRecord {
                template: placement.name().to_string(),
                origin: placement.origin(),
                depth: placement.depth(),
                parent: blueprint.parent_connection(index).map(|connection| ParentLink {
                    index: connection.parent,
                    direction: connection.parent_entry.direction,
                }),
            })
            .collect();

        Self {
            format_version: BLUEPRINT_FORMAT_VERSION,
            seed: blueprint.seed(),
            root_origin: blueprint.root_origin(),
            termination: blueprint.termination(),
            stats: *blueprint.stats(),
            placements,
        }
    }

    pub fn write_atomic(&self, path: &Path) -> Result<(), BlueprintFileError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, path)?;

        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, BlueprintFileError> {
        let content = fs::read_to_string(path)?;
        let file: Self = serde_json::from_str(&content)?;
        if file.format_version != BLUEPRINT_FORMAT_VERSION {
            return Err(BlueprintFileError::UnsupportedVersion { found: file.format_version });
        }
        Ok(file)
    }

    /// Rebuilds the blueprint with templates from `pack`. Fails when a name is
    /// unknown or when a recorded link no longer describes a valid seam, e.g.
    /// because the pack's geometry changed since the file was written.
    pub fn resolve(&self, pack: &TemplatePack) -> Result<Blueprint, BlueprintFileError> {
        let Some(hub) = self.placements.first() else {
            return Err(BlueprintFileError::Empty);
        };
        if hub.origin != self.root_origin {
            return Err(BlueprintFileError::RootOriginMismatch {
                root_origin: self.root_origin,
                hub_origin: hub.origin,
            });
        }

        let mut placements: Vec<PlacedSegment> = Vec::with_capacity(self.placements.len());
        let mut connections = Vec::with_capacity(self.placements.len() - 1);

        for (index, record) in self.placements.iter().enumerate() {
            let template = pack
                .get(&record.template)
                .ok_or_else(|| BlueprintFileError::UnknownTemplate(record.template.clone()))?;
            if !record.origin.within_coordinate_limit() {
                return Err(BlueprintFileError::OriginOutOfRange { index });
            }
            let placement = PlacedSegment::new(Arc::clone(template), record.origin, record.depth);

            match (index, record.parent) {
                (0, None) if record.depth == 0 => {}
                (0, None) => return Err(BlueprintFileError::DepthMismatch { index }),
                (_, None) => return Err(BlueprintFileError::MissingParent { index }),
                (_, Some(link)) => {
                    let parent = placements.get(link.index).ok_or(
                        BlueprintFileError::InvalidParent { index, parent: link.index },
                    )?;
                    connections.push(link_to_parent(index, link, parent, &placement)?);
                }
            }
            placements.push(placement);
        }

        Ok(Blueprint::assemble(
            self.seed,
            self.root_origin,
            placements,
            connections,
            self.termination,
            self.stats,
        ))
    }
}

fn link_to_parent(
    index: usize,
    link: ParentLink,
    parent: &PlacedSegment,
    child: &PlacedSegment,
) -> Result<Connection, BlueprintFileError> {
    if child.depth() != parent.depth() + 1 {
        return Err(BlueprintFileError::DepthMismatch { index });
    }

    let disconnected =
        move || BlueprintFileError::DisconnectedPlacement { index, direction: link.direction };
    let parent_entry = parent.entry_point_facing(link.direction).ok_or_else(disconnected)?;
    let child_entry = child.entry_point_facing(link.direction.opposite()).ok_or_else(disconnected)?;
    if !parent_entry.mates_with(child_entry) {
        return Err(disconnected());
    }

    Ok(Connection { parent: link.index, child: index, parent_entry, child_entry })
}
