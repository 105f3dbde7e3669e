//! Segment placement engine split into matching, validation, frontier
//! tracking, and the randomized driver that ties them together.

pub mod config;

mod driver;
mod frontier;
mod matcher;
mod seed;
mod validator;

pub use config::GenerationConfig;
pub use driver::{GenerationStats, SegmentGenerator, Termination};
pub use matcher::{Candidate, compatible_candidates, placement_origin};
pub use seed::derive_dungeon_seed;
pub use validator::{PlacementValidator, Rejection};

use crate::blueprint::Blueprint;
use crate::error::GenerationError;
use crate::template_pack::TemplatePack;
use crate::types::BlockPos;

pub fn generate_blueprint(
    pack: &TemplatePack,
    config: &GenerationConfig,
    root_origin: BlockPos,
) -> Result<Blueprint, GenerationError> {
    SegmentGenerator::new(config.clone()).generate(pack, root_origin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_blueprint_matches_segment_generator_output() {
        let pack = TemplatePack::builtin();
        let config = GenerationConfig { seed: 123, ..GenerationConfig::default() };
        let root = BlockPos::new(100, 40, -100);

        let from_helper = generate_blueprint(&pack, &config, root).expect("builtin pack has a hub");
        let from_generator =
            SegmentGenerator::new(config).generate(&pack, root).expect("builtin pack has a hub");

        assert_eq!(from_helper, from_generator);
    }
}
