//! Handcrafted default template library shipped with the engine.

use crate::template::{ColorTag, EntryPoint, SegmentKind, TemplateDefinition};
use crate::template_pack::TemplatePack;
use crate::types::{BlockPos, Direction};

pub mod names {
    pub const HUB: &str = "hub";
    pub const CORRIDOR_NS_A: &str = "corridor_ns_a";
    pub const CORRIDOR_NS_B: &str = "corridor_ns_b";
    pub const CORRIDOR_NS_LONG: &str = "corridor_ns_long";
    pub const CORRIDOR_EW_A: &str = "corridor_ew_a";
    pub const CORRIDOR_EW_B: &str = "corridor_ew_b";
    pub const CORRIDOR_EW_LONG: &str = "corridor_ew_long";
    pub const CORNER_NE: &str = "corner_ne";
    pub const CORNER_NW: &str = "corner_nw";
    pub const CORNER_SE: &str = "corner_se";
    pub const CORNER_SW: &str = "corner_sw";
    pub const JUNCTION_T: &str = "junction_t";
    pub const STAIRS_RISE: &str = "stairs_rise";
    pub const STAIRS_DROP: &str = "stairs_drop";
    pub const LADDER_SHAFT: &str = "ladder_shaft";
    pub const SKY_LANDING: &str = "sky_landing";
    pub const LIBRARY: &str = "library";
    pub const CRYPT: &str = "crypt";
    pub const SAND_PIT: &str = "sand_pit";
    pub const RED_VAULT: &str = "red_vault";
    pub const RED_KEY_ROOM: &str = "red_key_room";
    pub const BLUE_VAULT: &str = "blue_vault";
    pub const BLUE_KEY_ROOM: &str = "blue_key_room";
    pub const PUZZLE_CHAMBER: &str = "puzzle_chamber";
    pub const LAVA_RUN: &str = "lava_run";
}

fn entry(x: i32, y: i32, z: i32, direction: Direction) -> EntryPoint {
    EntryPoint { offset: BlockPos::new(x, y, z), direction }
}

fn definition(
    name: &str,
    kind: SegmentKind,
    size: (i32, i32, i32),
    entry_points: Vec<EntryPoint>,
) -> TemplateDefinition {
    let mut definition =
        TemplateDefinition::new(name, kind, BlockPos::new(size.0, size.1, size.2));
    definition.entry_points = entry_points;
    definition
}

fn corridor_ns(name: &str, length: i32) -> TemplateDefinition {
    definition(
        name,
        SegmentKind::Corridor,
        (3, 6, length),
        vec![entry(1, 0, 0, Direction::North), entry(1, 0, length - 1, Direction::South)],
    )
}

fn corridor_ew(name: &str, length: i32) -> TemplateDefinition {
    definition(
        name,
        SegmentKind::Corridor,
        (length, 6, 3),
        vec![entry(length - 1, 0, 1, Direction::East), entry(0, 0, 1, Direction::West)],
    )
}

fn corner(name: &str, first: Direction, second: Direction) -> TemplateDefinition {
    let side = |direction| match direction {
        Direction::North => entry(2, 0, 0, Direction::North),
        Direction::South => entry(2, 0, 4, Direction::South),
        Direction::East => entry(4, 0, 2, Direction::East),
        Direction::West => entry(0, 0, 2, Direction::West),
        Direction::Up => entry(2, 5, 2, Direction::Up),
        Direction::Down => entry(2, 0, 2, Direction::Down),
    };
    definition(name, SegmentKind::Corridor, (5, 6, 5), vec![side(first), side(second)])
}

fn vault_room(name: &str, color: &str, coins: u32, multiplier: f64) -> TemplateDefinition {
    let mut vault =
        definition(name, SegmentKind::Room, (9, 7, 9), vec![entry(4, 0, 0, Direction::North)]);
    vault.vault_color = Some(ColorTag::new(color));
    vault.vault_offset = Some(BlockPos::new(4, 1, 7));
    vault.coin_spawns =
        vec![BlockPos::new(2, 1, 6), BlockPos::new(6, 1, 6), BlockPos::new(4, 1, 5)];
    vault.approximate_coins = coins;
    vault.coin_multiplier = multiplier;
    vault
}

fn key_room(name: &str, color: &str) -> TemplateDefinition {
    let mut room = definition(
        name,
        SegmentKind::Room,
        (9, 6, 9),
        vec![entry(4, 0, 8, Direction::South), entry(0, 0, 4, Direction::West)],
    );
    room.key_color = Some(ColorTag::new(color));
    room.key_offset = Some(BlockPos::new(4, 1, 4));
    room.item_spawns = vec![BlockPos::new(7, 1, 1)];
    room
}

impl TemplatePack {
    /// The default library: one hub plus corridors, stairs, and themed rooms.
    pub fn builtin() -> Self {
        let mut hub = definition(
            names::HUB,
            SegmentKind::Room,
            (30, 8, 27),
            vec![
                entry(15, 0, 0, Direction::North),
                entry(29, 0, 13, Direction::East),
                entry(15, 0, 26, Direction::South),
                entry(0, 0, 13, Direction::West),
            ],
        );
        hub.hub = true;
        hub.item_spawns = vec![BlockPos::new(4, 1, 4), BlockPos::new(25, 1, 22)];
        hub.sand_spawns = vec![BlockPos::new(15, 7, 13)];

        let mut junction = definition(
            names::JUNCTION_T,
            SegmentKind::Corridor,
            (9, 6, 5),
            vec![
                entry(0, 0, 2, Direction::West),
                entry(8, 0, 2, Direction::East),
                entry(4, 0, 4, Direction::South),
            ],
        );
        junction.coin_spawns = vec![BlockPos::new(4, 1, 2)];
        junction.approximate_coins = 3;

        let stairs_rise = definition(
            names::STAIRS_RISE,
            SegmentKind::Staircase,
            (5, 12, 9),
            vec![entry(2, 6, 0, Direction::North), entry(2, 0, 8, Direction::South)],
        );
        let stairs_drop = definition(
            names::STAIRS_DROP,
            SegmentKind::Staircase,
            (5, 12, 9),
            vec![entry(2, 0, 0, Direction::North), entry(2, 6, 8, Direction::South)],
        );
        let ladder_shaft = definition(
            names::LADDER_SHAFT,
            SegmentKind::Staircase,
            (5, 14, 5),
            vec![
                entry(2, 0, 0, Direction::North),
                entry(2, 9, 4, Direction::South),
                entry(2, 13, 2, Direction::Up),
            ],
        );
        let mut sky_landing = definition(
            names::SKY_LANDING,
            SegmentKind::Room,
            (9, 6, 9),
            vec![entry(4, 0, 4, Direction::Down), entry(8, 0, 4, Direction::East)],
        );
        sky_landing.item_spawns = vec![BlockPos::new(2, 1, 2)];

        let mut library = definition(
            names::LIBRARY,
            SegmentKind::Room,
            (13, 8, 11),
            vec![
                entry(6, 0, 0, Direction::North),
                entry(6, 0, 10, Direction::South),
                entry(12, 0, 5, Direction::East),
            ],
        );
        library.item_spawns = vec![BlockPos::new(2, 1, 2), BlockPos::new(10, 1, 8)];
        library.coin_spawns = vec![BlockPos::new(6, 4, 5)];
        library.approximate_coins = 12;

        let mut crypt = definition(
            names::CRYPT,
            SegmentKind::Room,
            (11, 7, 11),
            vec![
                entry(0, 0, 5, Direction::West),
                entry(10, 0, 5, Direction::East),
                entry(5, 0, 10, Direction::South),
            ],
        );
        crypt.coin_spawns = vec![BlockPos::new(2, 1, 2), BlockPos::new(8, 1, 2)];
        crypt.approximate_coins = 10;

        let mut sand_pit = definition(
            names::SAND_PIT,
            SegmentKind::Room,
            (11, 9, 11),
            vec![entry(5, 0, 0, Direction::North), entry(10, 0, 5, Direction::East)],
        );
        sand_pit.sand_spawns =
            vec![BlockPos::new(3, 8, 3), BlockPos::new(7, 8, 3), BlockPos::new(5, 8, 7)];
        sand_pit.approximate_coins = 6;
        sand_pit.coin_spawns = vec![BlockPos::new(5, 1, 5)];

        let mut puzzle_chamber = definition(
            names::PUZZLE_CHAMBER,
            SegmentKind::Room,
            (15, 9, 15),
            vec![entry(7, 0, 0, Direction::North), entry(7, 0, 14, Direction::South)],
        );
        puzzle_chamber.puzzle_room = true;
        puzzle_chamber.approximate_coins = 25;
        puzzle_chamber.coin_spawns = vec![BlockPos::new(7, 1, 7)];

        let mut lava_run = definition(
            names::LAVA_RUN,
            SegmentKind::Room,
            (7, 10, 25),
            vec![entry(3, 2, 0, Direction::North), entry(3, 2, 24, Direction::South)],
        );
        lava_run.lava_parkour = true;
        lava_run.approximate_coins = 20;
        lava_run.coin_multiplier = 1.5;
        lava_run.coin_spawns = vec![BlockPos::new(3, 5, 12)];

        let definitions = vec![
            hub,
            corridor_ns(names::CORRIDOR_NS_A, 3),
            corridor_ns(names::CORRIDOR_NS_B, 5),
            corridor_ns(names::CORRIDOR_NS_LONG, 11),
            corridor_ew(names::CORRIDOR_EW_A, 3),
            corridor_ew(names::CORRIDOR_EW_B, 5),
            corridor_ew(names::CORRIDOR_EW_LONG, 11),
            corner(names::CORNER_NE, Direction::North, Direction::East),
            corner(names::CORNER_NW, Direction::North, Direction::West),
            corner(names::CORNER_SE, Direction::South, Direction::East),
            corner(names::CORNER_SW, Direction::South, Direction::West),
            junction,
            stairs_rise,
            stairs_drop,
            ladder_shaft,
            sky_landing,
            library,
            crypt,
            sand_pit,
            vault_room(names::RED_VAULT, "red", 40, 2.0),
            key_room(names::RED_KEY_ROOM, "red"),
            vault_room(names::BLUE_VAULT, "blue", 30, 1.0),
            key_room(names::BLUE_KEY_ROOM, "blue"),
            puzzle_chamber,
            lava_run,
        ];

        let loaded = Self::from_definitions(definitions);
        debug_assert!(loaded.failures.is_empty(), "builtin templates must validate");
        loaded.pack
    }
}
