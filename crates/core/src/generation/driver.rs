//! Randomized frontier expansion: places the hub, then repeatedly picks an
//! open entry point and tries to attach an unused template to it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::blueprint::{Blueprint, Connection};
use crate::error::GenerationError;
use crate::placement::{PlacedEntry, PlacedSegment};
use crate::template::SegmentTemplate;
use crate::template_pack::TemplatePack;
use crate::types::BlockPos;

use super::config::GenerationConfig;
use super::frontier::{Frontier, FrontierEntry};
use super::matcher::{Candidate, compatible_candidates, placement_origin};
use super::seed::shuffle;
use super::validator::{PlacementValidator, Rejection};

/// Why a successful run stopped expanding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// No open entry point was left to visit.
    FrontierExhausted,
    /// Every template in the pool has been placed.
    TemplatesExhausted,
    /// The configured segment cap was reached.
    SegmentCapReached,
    /// The configured bound on frontier visits was reached.
    IterationBudgetReached,
}

impl Termination {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::FrontierExhausted => 0,
            Self::TemplatesExhausted => 1,
            Self::SegmentCapReached => 2,
            Self::IterationBudgetReached => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    pub frontier_visits: u32,
    /// Visits where no remaining template had a compatible entry point.
    pub dead_ends: u32,
    /// Visits where every tried candidate was rejected.
    pub abandoned_entries: u32,
    pub overlap_rejections: u32,
    pub distance_rejections: u32,
}

pub struct SegmentGenerator {
    config: GenerationConfig,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl SegmentGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config, cancel_flag: None }
    }

    /// Aborts a run with [`GenerationError::Cancelled`] once `flag` is raised.
    /// The flag is polled before every frontier visit.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    /// Fails up front on an invalid config or a root origin outside
    /// [`COORDINATE_LIMIT`](crate::types::COORDINATE_LIMIT).
    pub fn generate(
        &self,
        pack: &TemplatePack,
        root_origin: BlockPos,
    ) -> Result<Blueprint, GenerationError> {
        self.config.validate()?;
        if !root_origin.within_coordinate_limit() {
            return Err(GenerationError::OriginOutOfRange { origin: root_origin });
        }

        let mut run = GenerationRun::initialize(self, pack, root_origin)?;
        let termination = run.expand()?;
        info!(
            seed = self.config.seed,
            placed = run.placements.len(),
            remaining_templates = run.pool.len(),
            open_frontier = run.frontier.len(),
            ?termination,
            "segment generation finished"
        );
        Ok(Blueprint::assemble(
            self.config.seed,
            root_origin,
            run.placements,
            run.connections,
            termination,
            run.stats,
        ))
    }
}

struct GenerationRun<'a> {
    config: &'a GenerationConfig,
    cancel_flag: Option<&'a AtomicBool>,
    rng: ChaCha8Rng,
    validator: PlacementValidator,
    pool: Vec<Arc<SegmentTemplate>>,
    placements: Vec<PlacedSegment>,
    connections: Vec<Connection>,
    frontier: Frontier,
    stats: GenerationStats,
}

impl<'a> GenerationRun<'a> {
    fn initialize(
        generator: &'a SegmentGenerator,
        pack: &TemplatePack,
        root_origin: BlockPos,
    ) -> Result<Self, GenerationError> {
        let hub = pack
            .templates()
            .iter()
            .find(|template| template.is_hub())
            .ok_or(GenerationError::MissingHub)?;
        let pool: Vec<_> = pack
            .templates()
            .iter()
            .filter(|template| !template.is_hub())
            .map(Arc::clone)
            .collect();

        let hub_placement = PlacedSegment::new(Arc::clone(hub), root_origin, 0);
        let mut frontier = Frontier::default();
        frontier.extend_from(0, &hub_placement, None);
        debug!(template = hub.name(), origin = %root_origin, "placed hub");

        Ok(Self {
            config: &generator.config,
            cancel_flag: generator.cancel_flag.as_deref(),
            rng: ChaCha8Rng::seed_from_u64(generator.config.seed),
            validator: PlacementValidator::new(root_origin, generator.config.max_distance),
            pool,
            placements: vec![hub_placement],
            connections: Vec::new(),
            frontier,
            stats: GenerationStats::default(),
        })
    }

    fn expand(&mut self) -> Result<Termination, GenerationError> {
        loop {
            if let Some(termination) = self.termination() {
                return Ok(termination);
            }
            if self.cancel_flag.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(GenerationError::Cancelled { placed: self.placements.len() });
            }

            self.stats.frontier_visits += 1;
            let target =
                self.frontier.take_random(&mut self.rng).expect("frontier is checked non-empty");
            self.resolve(target);
        }
    }

    fn termination(&self) -> Option<Termination> {
        if self.placements.len() >= self.config.max_segments {
            Some(Termination::SegmentCapReached)
        } else if self.pool.is_empty() {
            Some(Termination::TemplatesExhausted)
        } else if self.frontier.is_empty() {
            Some(Termination::FrontierExhausted)
        } else if self.stats.frontier_visits >= self.config.max_iterations {
            Some(Termination::IterationBudgetReached)
        } else {
            None
        }
    }

    /// Gives `target` its single resolution attempt for this visit. Whatever
    /// happens, the entry point does not return to the frontier.
    fn resolve(&mut self, target: FrontierEntry) {
        let mut candidates = compatible_candidates(target.entry, &self.pool);
        if candidates.is_empty() {
            self.stats.dead_ends += 1;
            trace!(
                position = %target.entry.position,
                direction = ?target.entry.direction,
                "dead end"
            );
            return;
        }

        shuffle(&mut self.rng, &mut candidates);
        candidates.truncate(self.config.max_tries_per_entrance);

        for candidate in candidates {
            let template = &self.pool[candidate.pool_index];
            let origin = placement_origin(target.entry, candidate.entry);
            let placement =
                PlacedSegment::new(Arc::clone(template), origin, target.owner_depth + 1);

            match self.validator.validate(&placement, &self.placements) {
                Ok(()) => {
                    self.accept(target, candidate, placement);
                    return;
                }
                Err(rejection) => {
                    match rejection {
                        Rejection::Overlap { .. } => self.stats.overlap_rejections += 1,
                        Rejection::TooFar => self.stats.distance_rejections += 1,
                    }
                    trace!(
                        template = template.name(),
                        origin = %origin,
                        ?rejection,
                        "rejected placement"
                    );
                }
            }
        }

        self.stats.abandoned_entries += 1;
    }

    fn accept(&mut self, target: FrontierEntry, candidate: Candidate, placement: PlacedSegment) {
        let child = self.placements.len();
        let child_entry = PlacedEntry {
            position: placement.to_placed(candidate.entry.offset),
            direction: candidate.entry.direction,
        };
        debug_assert!(target.entry.mates_with(child_entry));

        debug!(
            template = placement.name(),
            origin = %placement.origin(),
            depth = placement.depth(),
            parent = target.owner,
            "placed segment"
        );

        self.pool.remove(candidate.pool_index);
        self.frontier.extend_from(child, &placement, Some(candidate.entry.direction));
        self.connections.push(Connection {
            parent: target.owner,
            child,
            parent_entry: target.entry,
            child_entry,
        });
        self.placements.push(placement);
    }
}
