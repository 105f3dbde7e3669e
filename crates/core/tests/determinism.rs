use segment_core::{
    BlockPos, Direction, EntryPoint, GenerationConfig, SegmentGenerator, SegmentKind,
    TemplateDefinition, TemplatePack, derive_dungeon_seed,
};
use xxhash_rust::xxh3::xxh3_64;

/// Hub of 30x8x27 with one entry per horizontal side, plus identical 3x6x3
/// north-south corridors under distinct names.
fn hub_and_corridor_pack(corridors: usize) -> TemplatePack {
    let mut hub = TemplateDefinition::new("hub", SegmentKind::Room, BlockPos::new(30, 8, 27));
    hub.hub = true;
    hub.entry_points = vec![
        EntryPoint { offset: BlockPos::new(15, 0, 0), direction: Direction::North },
        EntryPoint { offset: BlockPos::new(29, 0, 13), direction: Direction::East },
        EntryPoint { offset: BlockPos::new(15, 0, 26), direction: Direction::South },
        EntryPoint { offset: BlockPos::new(0, 0, 13), direction: Direction::West },
    ];

    let mut definitions = vec![hub];
    for index in 0..corridors {
        let mut corridor = TemplateDefinition::new(
            format!("corridor_{index}"),
            SegmentKind::Corridor,
            BlockPos::new(3, 6, 3),
        );
        corridor.entry_points = vec![
            EntryPoint { offset: BlockPos::new(1, 0, 0), direction: Direction::North },
            EntryPoint { offset: BlockPos::new(1, 0, 2), direction: Direction::South },
        ];
        definitions.push(corridor);
    }

    let loaded = TemplatePack::from_definitions(definitions);
    assert!(loaded.failures.is_empty());
    loaded.pack
}

fn example_config(seed: u64) -> GenerationConfig {
    GenerationConfig { seed, max_distance: 100.0, max_segments: 10, ..GenerationConfig::default() }
}

fn layout(pack: &TemplatePack, config: GenerationConfig) -> Vec<(String, BlockPos, u32)> {
    SegmentGenerator::new(config)
        .generate(pack, BlockPos::ORIGIN)
        .expect("pack has a hub")
        .placements()
        .iter()
        .map(|placement| (placement.name().to_string(), placement.origin(), placement.depth()))
        .collect()
}

#[test]
fn hub_and_corridor_example_is_reproducible_for_a_fixed_seed() {
    let pack = hub_and_corridor_pack(12);
    let first = layout(&pack, example_config(42));
    let second = layout(&pack, example_config(42));

    assert_eq!(first, second);
    assert_eq!(first.len(), 10, "twelve corridors are enough to reach the cap");
    assert_eq!(first[0], ("hub".to_string(), BlockPos::ORIGIN, 0));
}

#[test]
fn hub_and_corridor_example_changes_with_the_seed_and_keeps_its_invariants() {
    let pack = hub_and_corridor_pack(12);
    let baseline = layout(&pack, example_config(42));

    for seed in 43..=48 {
        let config = example_config(seed);
        assert_ne!(layout(&pack, config.clone()), baseline, "seed {seed} repeated seed 42");

        let blueprint =
            SegmentGenerator::new(config).generate(&pack, BlockPos::ORIGIN).expect("hub present");
        assert_eq!(blueprint.check_layout(100.0), Ok(()));
    }
}

#[test]
fn builtin_pack_fingerprints_match_across_independent_runs() {
    let pack = TemplatePack::builtin();
    for seed in [0_u64, 1, 42, 9_001, u64::MAX] {
        let root = BlockPos::new(-320, 70, 1_280);
        let a = SegmentGenerator::new(GenerationConfig::with_seed(seed))
            .generate(&pack, root)
            .expect("builtin pack has a hub");
        let b = SegmentGenerator::new(GenerationConfig::with_seed(seed))
            .generate(&TemplatePack::builtin(), root)
            .expect("builtin pack has a hub");

        assert_eq!(a, b);
        assert_eq!(
            xxh3_64(&a.canonical_bytes()),
            xxh3_64(&b.canonical_bytes()),
            "seed {seed} produced diverging layouts"
        );
    }
}

#[test]
fn generating_relative_then_translating_matches_generating_in_place() {
    let pack = TemplatePack::builtin();
    let world_origin = BlockPos::new(1_000, 64, -2_000);
    let config = GenerationConfig::with_seed(77);

    let relative = SegmentGenerator::new(config.clone())
        .generate(&pack, BlockPos::ORIGIN)
        .expect("builtin pack has a hub");
    let absolute = SegmentGenerator::new(config)
        .generate(&pack, world_origin)
        .expect("builtin pack has a hub");

    assert_eq!(relative.translated(world_origin), absolute);
}

#[test]
fn per_dungeon_seeds_give_each_team_its_own_layout() {
    let pack = TemplatePack::builtin();
    let layouts: Vec<_> = (0..4)
        .map(|team| layout(&pack, GenerationConfig::with_seed(derive_dungeon_seed(1_234, team))))
        .collect();

    for (index, dungeon) in layouts.iter().enumerate() {
        assert!(!layouts[..index].contains(dungeon), "dungeon {index} repeated an earlier layout");
    }
}
