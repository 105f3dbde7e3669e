//! Error types surfaced by template validation, pack loading, configuration,
//! generation, and blueprint persistence.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use toml::de::Error as TomlError;

use crate::template::{FeatureKind, MAX_TEMPLATE_EXTENT};
use crate::types::{BlockPos, COORDINATE_LIMIT, Direction};

/// A template definition that cannot be turned into usable geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    #[error("template name must not be empty")]
    EmptyName,
    #[error("template `{name}` has no schematic reference")]
    MissingSchematic { name: String },
    #[error("template `{name}` has non-positive size {size}")]
    NonPositiveSize { name: String, size: BlockPos },
    #[error(
        "template `{name}` has size {size}, above {max} on some axis",
        max = MAX_TEMPLATE_EXTENT
    )]
    OversizedTemplate { name: String, size: BlockPos },
    #[error("template `{name}` has a {direction:?} entry point at {offset} outside its bounds")]
    EntryPointOutsideBounds { name: String, offset: BlockPos, direction: Direction },
    #[error("template `{name}` has a {direction:?} entry point at {offset} off its own face")]
    EntryPointOffFace { name: String, offset: BlockPos, direction: Direction },
    #[error("template `{name}` declares more than one {direction:?} entry point")]
    DuplicateEntryDirection { name: String, direction: Direction },
    #[error("template `{name}` has a {feature} offset {offset} outside its bounds")]
    FeatureOutsideBounds { name: String, feature: FeatureKind, offset: BlockPos },
    #[error("template `{name}` has a {feature} color but no {feature} offset")]
    ColorWithoutOffset { name: String, feature: FeatureKind },
    #[error("template `{name}` has a {feature} offset but no {feature} color")]
    OffsetWithoutColor { name: String, feature: FeatureKind },
    #[error("template `{name}` has invalid coin multiplier {multiplier}")]
    InvalidCoinMultiplier { name: String, multiplier: f64 },
    #[error("template name `{name}` is already used by an earlier template")]
    DuplicateName { name: String },
}

/// The template pack document itself could not be read.
#[derive(Debug, Error)]
pub enum PackLoadError {
    #[error("failed to read template pack {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("template pack is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read generation config {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("generation config is not valid TOML: {0}")]
    Toml(#[from] TomlError),
    #[error("max_segments must be at least 1")]
    ZeroSegmentCap,
    #[error("max_tries_per_entrance must be at least 1")]
    ZeroTries,
    #[error("max_distance must be finite and within 0..={max}, got {0}", max = COORDINATE_LIMIT)]
    InvalidMaxDistance(f64),
}

/// Hard failures of a generation run. Rejected placements and dead ends are
/// handled inside the driver and never surface here.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid generation config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("root origin {origin} is outside the supported coordinate range")]
    OriginOutOfRange { origin: BlockPos },
    #[error("no hub template is available to start generation")]
    MissingHub,
    #[error("generation was cancelled after {placed} placements")]
    Cancelled { placed: usize },
}

#[derive(Debug, Error)]
pub enum BlueprintFileError {
    #[error("blueprint file I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("blueprint file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported blueprint format version {found}")]
    UnsupportedVersion { found: u32 },
    #[error("blueprint file has no placements")]
    Empty,
    #[error("root origin {root_origin} does not match the hub origin {hub_origin}")]
    RootOriginMismatch { root_origin: BlockPos, hub_origin: BlockPos },
    #[error("placement {index} has an origin outside the supported coordinate range")]
    OriginOutOfRange { index: usize },
    #[error("blueprint references unknown template `{0}`")]
    UnknownTemplate(String),
    #[error("placement {index} references parent {parent} which is not an earlier placement")]
    InvalidParent { index: usize, parent: usize },
    #[error("placement {index} has no parent link")]
    MissingParent { index: usize },
    #[error("placement {index} has a depth inconsistent with its parent")]
    DepthMismatch { index: usize },
    #[error("placement {index} does not mate with its parent through a {direction:?} entry point")]
    DisconnectedPlacement { index: usize, direction: Direction },
}

/// A broken layout property found by [`crate::blueprint::Blueprint::check_layout`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutViolation {
    #[error("placements {first} and {second} overlap")]
    Overlap { first: usize, second: usize },
    #[error("placement {index} is beyond the distance bound")]
    TooFar { index: usize },
    #[error("template `{name}` is placed more than once")]
    DuplicateTemplate { name: String },
    #[error("placement {index} has no parent connection")]
    Unconnected { index: usize },
    #[error("placement {index} does not mate with its parent's entry point")]
    BrokenSeam { index: usize },
    #[error("placement {index} has a depth inconsistent with its parent")]
    DepthMismatch { index: usize },
}
