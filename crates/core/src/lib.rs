pub mod blueprint;
pub mod blueprint_file;
pub mod catalog;
pub mod error;
pub mod generation;
pub mod placement;
pub mod template;
pub mod template_pack;
pub mod types;

pub use blueprint::{Blueprint, Connection};
pub use blueprint_file::BlueprintFile;
pub use error::*;
pub use generation::{
    GenerationConfig, GenerationStats, SegmentGenerator, Termination, derive_dungeon_seed,
    generate_blueprint,
};
pub use placement::{PlacedEntry, PlacedSegment};
pub use template::{ColorTag, EntryPoint, SegmentKind, SegmentTemplate, TemplateDefinition};
pub use template_pack::{LoadedPack, TemplatePack};
pub use types::*;
