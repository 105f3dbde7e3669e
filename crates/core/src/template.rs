//! World-independent segment templates and their validated construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::types::{Area, BlockPos, Direction};

/// Largest size a template may have along any axis.
pub const MAX_TEMPLATE_EXTENT: i32 = 4_096;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    #[default]
    Room,
    Corridor,
    Staircase,
}

/// Free-form color label pairing a vault with the key that opens it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorTag(pub String);

impl ColorTag {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryPoint {
    pub offset: BlockPos,
    pub direction: Direction,
}

/// Feature families a template can anchor, used in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    SandSpawn,
    ItemSpawn,
    CoinSpawn,
    Vault,
    Key,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SandSpawn => "sand spawn",
            Self::ItemSpawn => "item spawn",
            Self::CoinSpawn => "coin spawn",
            Self::Vault => "vault",
            Self::Key => "key",
        })
    }
}

/// Color-tagged feature anchored at a template-relative offset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColoredFeature {
    pub color: ColorTag,
    pub offset: BlockPos,
}

fn default_coin_multiplier() -> f64 {
    1.0
}

/// Template as supplied by an external loader, before validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub name: String,
    pub schematic: String,
    #[serde(default)]
    pub kind: SegmentKind,
    pub size: BlockPos,
    #[serde(default)]
    pub entry_points: Vec<EntryPoint>,
    #[serde(default)]
    pub sand_spawns: Vec<BlockPos>,
    #[serde(default)]
    pub item_spawns: Vec<BlockPos>,
    #[serde(default)]
    pub coin_spawns: Vec<BlockPos>,
    #[serde(default)]
    pub approximate_coins: u32,
    #[serde(default = "default_coin_multiplier")]
    pub coin_multiplier: f64,
    #[serde(default)]
    pub hub: bool,
    #[serde(default)]
    pub puzzle_room: bool,
    #[serde(default)]
    pub lava_parkour: bool,
    #[serde(default)]
    pub vault_color: Option<ColorTag>,
    #[serde(default)]
    pub vault_offset: Option<BlockPos>,
    #[serde(default)]
    pub key_color: Option<ColorTag>,
    #[serde(default)]
    pub key_offset: Option<BlockPos>,
}

impl TemplateDefinition {
    /// Minimal definition with no entry points or features.
    pub fn new(name: impl Into<String>, kind: SegmentKind, size: BlockPos) -> Self {
        let name = name.into();
        Self {
            schematic: name.clone(),
            name,
            kind,
            size,
            entry_points: Vec::new(),
            sand_spawns: Vec::new(),
            item_spawns: Vec::new(),
            coin_spawns: Vec::new(),
            approximate_coins: 0,
            coin_multiplier: default_coin_multiplier(),
            hub: false,
            puzzle_room: false,
            lava_parkour: false,
            vault_color: None,
            vault_offset: None,
            key_color: None,
            key_offset: None,
        }
    }
}

/// Immutable, validated template shared by every placement made from it.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentTemplate {
    name: String,
    schematic: String,
    kind: SegmentKind,
    size: BlockPos,
    entry_points: Vec<EntryPoint>,
    sand_spawns: Vec<BlockPos>,
    item_spawns: Vec<BlockPos>,
    coin_spawns: Vec<BlockPos>,
    approximate_coins: u32,
    coin_multiplier: f64,
    hub: bool,
    puzzle_room: bool,
    lava_parkour: bool,
    vault: Option<ColoredFeature>,
    key: Option<ColoredFeature>,
}

impl SegmentTemplate {
    pub fn from_definition(definition: TemplateDefinition) -> Result<Self, TemplateError> {
        let TemplateDefinition {
            name,
            schematic,
            kind,
            size,
            entry_points,
            sand_spawns,
            item_spawns,
            coin_spawns,
            approximate_coins,
            coin_multiplier,
            hub,
            puzzle_room,
            lava_parkour,
            vault_color,
            vault_offset,
            key_color,
            key_offset,
        } = definition;

        if name.trim().is_empty() {
            return Err(TemplateError::EmptyName);
        }
        if schematic.trim().is_empty() {
            return Err(TemplateError::MissingSchematic { name });
        }
        if size.x <= 0 || size.y <= 0 || size.z <= 0 {
            return Err(TemplateError::NonPositiveSize { name, size });
        }
        if [size.x, size.y, size.z].into_iter().any(|extent| extent > MAX_TEMPLATE_EXTENT) {
            return Err(TemplateError::OversizedTemplate { name, size });
        }
        if !coin_multiplier.is_finite() || coin_multiplier < 0.0 {
            return Err(TemplateError::InvalidCoinMultiplier { name, multiplier: coin_multiplier });
        }

        let local_bounds = Area::from_origin_and_size(BlockPos::ORIGIN, size);
        validate_entry_points(&name, local_bounds, &entry_points)?;

        for (feature, offsets) in [
            (FeatureKind::SandSpawn, &sand_spawns),
            (FeatureKind::ItemSpawn, &item_spawns),
            (FeatureKind::CoinSpawn, &coin_spawns),
        ] {
            if let Some(&offset) = offsets.iter().find(|&&offset| !local_bounds.contains(offset)) {
                return Err(TemplateError::FeatureOutsideBounds { name, feature, offset });
            }
        }

        let vault = pair_colored_feature(
            &name,
            local_bounds,
            FeatureKind::Vault,
            vault_color,
            vault_offset,
        )?;
        let key =
            pair_colored_feature(&name, local_bounds, FeatureKind::Key, key_color, key_offset)?;

        Ok(Self {
            name,
            schematic,
            kind,
            size,
            entry_points,
            sand_spawns,
            item_spawns,
            coin_spawns,
            approximate_coins,
            coin_multiplier,
            hub,
            puzzle_room,
            lava_parkour,
            vault,
            key,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schematic(&self) -> &str {
        &self.schematic
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn size(&self) -> BlockPos {
        self.size
    }

    pub fn entry_points(&self) -> &[EntryPoint] {
        &self.entry_points
    }

    /// The entry point opening towards `direction`, if the template has one.
    pub fn entry_point_facing(&self, direction: Direction) -> Option<EntryPoint> {
        self.entry_points.iter().copied().find(|entry| entry.direction == direction)
    }

    pub fn sand_spawns(&self) -> &[BlockPos] {
        &self.sand_spawns
    }

    pub fn item_spawns(&self) -> &[BlockPos] {
        &self.item_spawns
    }

    pub fn coin_spawns(&self) -> &[BlockPos] {
        &self.coin_spawns
    }

    pub fn approximate_coins(&self) -> u32 {
        self.approximate_coins
    }

    pub fn coin_multiplier(&self) -> f64 {
        self.coin_multiplier
    }

    pub fn is_hub(&self) -> bool {
        self.hub
    }

    pub fn is_puzzle_room(&self) -> bool {
        self.puzzle_room
    }

    pub fn is_lava_parkour(&self) -> bool {
        self.lava_parkour
    }

    pub fn vault(&self) -> Option<&ColoredFeature> {
        self.vault.as_ref()
    }

    pub fn key(&self) -> Option<&ColoredFeature> {
        self.key.as_ref()
    }
}

fn validate_entry_points(
    name: &str,
    local_bounds: Area,
    entry_points: &[EntryPoint],
) -> Result<(), TemplateError> {
    let max = local_bounds.max();
    for (index, entry) in entry_points.iter().enumerate() {
        let EntryPoint { offset, direction } = *entry;
        if !local_bounds.contains(offset) {
            return Err(TemplateError::EntryPointOutsideBounds {
                name: name.to_string(),
                offset,
                direction,
            });
        }
        let on_face = match direction {
            Direction::North => offset.z == 0,
            Direction::South => offset.z == max.z,
            Direction::West => offset.x == 0,
            Direction::East => offset.x == max.x,
            Direction::Down => offset.y == 0,
            Direction::Up => offset.y == max.y,
        };
        if !on_face {
            return Err(TemplateError::EntryPointOffFace {
                name: name.to_string(),
                offset,
                direction,
            });
        }
        if entry_points[..index].iter().any(|earlier| earlier.direction == direction) {
            return Err(TemplateError::DuplicateEntryDirection {
                name: name.to_string(),
                direction,
            });
        }
    }
    Ok(())
}

fn pair_colored_feature(
    name: &str,
    local_bounds: Area,
    feature: FeatureKind,
    color: Option<ColorTag>,
    offset: Option<BlockPos>,
) -> Result<Option<ColoredFeature>, TemplateError> {
    match (color, offset) {
        (None, None) => Ok(None),
        (Some(_), None) => {
            Err(TemplateError::ColorWithoutOffset { name: name.to_string(), feature })
        }
        (None, Some(_)) => {
            Err(TemplateError::OffsetWithoutColor { name: name.to_string(), feature })
        }
        (Some(color), Some(offset)) => {
            if !local_bounds.contains(offset) {
                return Err(TemplateError::FeatureOutsideBounds {
                    name: name.to_string(),
                    feature,
                    offset,
                });
            }
            Ok(Some(ColoredFeature { color, offset }))
        }
    }
}
