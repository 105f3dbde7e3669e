//! Overlap and distance checks for candidate placements.

use crate::placement::PlacedSegment;
use crate::types::BlockPos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// The candidate shares at least one cell with an accepted placement.
    Overlap { accepted_index: usize },
    /// The candidate's origin lies beyond the configured distance from the root.
    TooFar,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementValidator {
    root_origin: BlockPos,
    max_distance: f64,
}

impl PlacementValidator {
    pub fn new(root_origin: BlockPos, max_distance: f64) -> Self {
        Self { root_origin, max_distance }
    }

    /// A negative or NaN bound admits nothing.
    pub fn within_distance(&self, candidate: &PlacedSegment) -> bool {
        self.max_distance >= 0.0
            && candidate.origin().distance_squared(self.root_origin) as f64
                <= self.max_distance * self.max_distance
    }

    /// Accepts `candidate` only if it is close enough to the root and shares
    /// no cell with any of `accepted`. Face contact is not overlap.
    pub fn validate(
        &self,
        candidate: &PlacedSegment,
        accepted: &[PlacedSegment],
    ) -> Result<(), Rejection> {
        if !self.within_distance(candidate) {
            return Err(Rejection::TooFar);
        }
        let bounds = candidate.bounds();
        match accepted.iter().position(|placed| placed.bounds().intersects(&bounds)) {
            Some(accepted_index) => Err(Rejection::Overlap { accepted_index }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::generation::matcher::placement_origin;
    use crate::template::{EntryPoint, SegmentKind, SegmentTemplate, TemplateDefinition};
    use crate::types::Direction;

    fn block(name: &str, size: BlockPos, entry_points: Vec<EntryPoint>) -> Arc<SegmentTemplate> {
        let mut definition = TemplateDefinition::new(name, SegmentKind::Room, size);
        definition.entry_points = entry_points;
        Arc::new(SegmentTemplate::from_definition(definition).expect("valid template"))
    }

    fn hub() -> PlacedSegment {
        let template = block(
            "hub",
            BlockPos::new(30, 8, 27),
            vec![EntryPoint { offset: BlockPos::new(15, 0, 0), direction: Direction::North }],
        );
        PlacedSegment::new(template, BlockPos::ORIGIN, 0)
    }

    #[test]
    fn connected_segments_validate_as_non_overlapping() {
        let hub = hub();
        let corridor = block(
            "corridor",
            BlockPos::new(3, 6, 3),
            vec![EntryPoint { offset: BlockPos::new(1, 0, 2), direction: Direction::South }],
        );
        let target = hub.entry_point_facing(Direction::North).expect("hub has north");
        let mating = corridor.entry_point_facing(Direction::South).expect("corridor has south");
        let candidate = PlacedSegment::new(corridor, placement_origin(target, mating), 1);

        assert_eq!(candidate.bounds().max().z, hub.bounds().min().z - 1);
        let validator = PlacementValidator::new(BlockPos::ORIGIN, 100.0);
        assert_eq!(validator.validate(&candidate, &[hub]), Ok(()));
    }

    #[test]
    fn a_single_shared_cell_is_overlap() {
        let hub = hub();
        let cube = block("cube", BlockPos::new(3, 3, 3), Vec::new());
        let candidate = PlacedSegment::new(cube, BlockPos::new(-2, -2, -2), 1);

        let validator = PlacementValidator::new(BlockPos::ORIGIN, 100.0);
        assert_eq!(
            validator.validate(&candidate, &[hub]),
            Err(Rejection::Overlap { accepted_index: 0 })
        );
    }

    #[test]
    fn distance_bound_is_inclusive_and_checked_before_overlap() {
        let cube = block("cube", BlockPos::new(3, 3, 3), Vec::new());
        let validator = PlacementValidator::new(BlockPos::new(10, 0, 10), 5.0);

        let on_limit = PlacedSegment::new(Arc::clone(&cube), BlockPos::new(13, 0, 14), 1);
        let past_limit = PlacedSegment::new(Arc::clone(&cube), BlockPos::new(13, 0, 15), 1);
        assert_eq!(validator.validate(&on_limit, &[]), Ok(()));
        assert_eq!(validator.validate(&past_limit, &[]), Err(Rejection::TooFar));

        let overlapping_and_far = PlacedSegment::new(cube, BlockPos::new(100, 0, 100), 1);
        let blocker = overlapping_and_far.clone();
        assert_eq!(
            validator.validate(&overlapping_and_far, &[blocker]),
            Err(Rejection::TooFar)
        );
    }

    #[test]
    fn negative_and_nan_bounds_admit_no_candidate() {
        let cube = block("cube", BlockPos::new(3, 3, 3), Vec::new());
        let at_root = PlacedSegment::new(Arc::clone(&cube), BlockPos::ORIGIN, 1);
        let nearby = PlacedSegment::new(cube, BlockPos::new(10, 0, 0), 1);

        for max_distance in [-40.0, f64::NAN] {
            let validator = PlacementValidator::new(BlockPos::ORIGIN, max_distance);
            assert!(!validator.within_distance(&at_root));
            assert_eq!(validator.validate(&nearby, &[]), Err(Rejection::TooFar));
        }
    }

    #[test]
    fn rejection_reports_the_first_overlapping_placement() {
        let cube = block("cube", BlockPos::new(4, 4, 4), Vec::new());
        let accepted = vec![
            PlacedSegment::new(Arc::clone(&cube), BlockPos::new(50, 0, 0), 0),
            PlacedSegment::new(Arc::clone(&cube), BlockPos::new(0, 0, 0), 1),
            PlacedSegment::new(Arc::clone(&cube), BlockPos::new(2, 0, 0), 1),
        ];
        let candidate = PlacedSegment::new(cube, BlockPos::new(1, 1, 1), 2);
        let validator = PlacementValidator::new(BlockPos::ORIGIN, 1_000.0);
        assert_eq!(
            validator.validate(&candidate, &accepted),
            Err(Rejection::Overlap { accepted_index: 1 })
        );
    }
}
