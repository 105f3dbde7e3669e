//! Integer cell geometry shared by templates, placements, and the generator.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Bound on the absolute value of root origins and of the distance bound.
/// Together with the template size limit it keeps every derived cell inside
/// `i32`.
pub const COORDINATE_LIMIT: i32 = 30_000_000;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy, z: self.z + dz }
    }

    /// The neighbouring cell one step away in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        self + direction.unit_vector()
    }

    pub fn distance_squared(self, other: Self) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        let dz = i64::from(self.z) - i64::from(other.z);
        (dx * dx).saturating_add(dy * dy).saturating_add(dz * dz)
    }

    pub fn distance(self, other: Self) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    pub fn within_coordinate_limit(self) -> bool {
        let limit = COORDINATE_LIMIT.unsigned_abs();
        [self.x, self.y, self.z].into_iter().all(|value| value.unsigned_abs() <= limit)
    }

    pub fn component_min(self, other: Self) -> Self {
        Self { x: self.x.min(other.x), y: self.y.min(other.y), z: self.z.min(other.z) }
    }

    pub fn component_max(self, other: Self) -> Self {
        Self { x: self.x.max(other.x), y: self.y.max(other.y), z: self.z.max(other.z) }
    }
}

impl Add for BlockPos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl Sub for BlockPos {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl Neg for BlockPos {
    type Output = Self;

    fn neg(self) -> Self {
        Self { x: -self.x, y: -self.y, z: -self.z }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Axis-aligned connection direction. North is -Z, East is +X, Up is +Y.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Self; 6] =
        [Self::North, Self::South, Self::East, Self::West, Self::Up, Self::Down];

    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    pub const fn unit_vector(self) -> BlockPos {
        match self {
            Self::North => BlockPos::new(0, 0, -1),
            Self::South => BlockPos::new(0, 0, 1),
            Self::East => BlockPos::new(1, 0, 0),
            Self::West => BlockPos::new(-1, 0, 0),
            Self::Up => BlockPos::new(0, 1, 0),
            Self::Down => BlockPos::new(0, -1, 0),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::North | Self::South | Self::East | Self::West)
    }

    pub(crate) const fn code(self) -> u8 {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
            Self::Up => 4,
            Self::Down => 5,
        }
    }
}

/// Inclusive box of cells. `min` is always the component-wise minimum corner.
///
/// Two areas that only share a face plane, such as segments joined through an
/// entry point, occupy disjoint cells and therefore do not intersect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Area {
    min: BlockPos,
    max: BlockPos,
}

impl Area {
    pub fn new(first_corner: BlockPos, second_corner: BlockPos) -> Self {
        Self {
            min: first_corner.component_min(second_corner),
            max: first_corner.component_max(second_corner),
        }
    }

    /// Box covering `size` cells per axis starting at `origin`.
    ///
    /// Panics if any size component is not positive.
    pub fn from_origin_and_size(origin: BlockPos, size: BlockPos) -> Self {
        assert!(
            size.x > 0 && size.y > 0 && size.z > 0,
            "area size must be positive on every axis, got {size}"
        );
        Self::new(origin, origin + size.offset(-1, -1, -1))
    }

    pub fn min(&self) -> BlockPos {
        self.min
    }

    pub fn max(&self) -> BlockPos {
        self.max
    }

    pub fn width(&self) -> u32 {
        self.max.x.abs_diff(self.min.x) + 1
    }

    pub fn height(&self) -> u32 {
        self.max.y.abs_diff(self.min.y) + 1
    }

    pub fn depth(&self) -> u32 {
        self.max.z.abs_diff(self.min.z) + 1
    }

    pub fn volume(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height()) * u64::from(self.depth())
    }

    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_an_involution_and_reverses_the_unit_vector() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().unit_vector(), -direction.unit_vector());
        }
    }

    #[test]
    fn only_cardinal_directions_are_horizontal() {
        let horizontal: Vec<_> =
            Direction::ALL.into_iter().filter(|direction| direction.is_horizontal()).collect();
        assert_eq!(
            horizontal,
            vec![Direction::North, Direction::South, Direction::East, Direction::West]
        );
    }

    #[test]
    fn area_normalizes_corners_regardless_of_input_order() {
        let area = Area::new(BlockPos::new(5, -2, 9), BlockPos::new(1, 4, 3));
        assert_eq!(area.min(), BlockPos::new(1, -2, 3));
        assert_eq!(area.max(), BlockPos::new(5, 4, 9));
        assert_eq!((area.width(), area.height(), area.depth()), (5, 7, 7));
        assert_eq!(area, Area::new(BlockPos::new(1, 4, 3), BlockPos::new(5, -2, 9)));
    }

    #[test]
    fn area_from_origin_and_size_is_inclusive_of_both_boundaries() {
        let area = Area::from_origin_and_size(BlockPos::new(10, 0, -3), BlockPos::new(3, 6, 3));
        assert_eq!(area.max(), BlockPos::new(12, 5, -1));
        assert_eq!(area.volume(), 54);
        assert!(area.contains(BlockPos::new(10, 0, -3)));
        assert!(area.contains(BlockPos::new(12, 5, -1)));
        assert!(!area.contains(BlockPos::new(13, 5, -1)));
        assert!(!area.contains(BlockPos::new(12, 5, 0)));
    }

    #[test]
    fn face_adjacent_areas_do_not_intersect() {
        let left = Area::from_origin_and_size(BlockPos::ORIGIN, BlockPos::new(4, 4, 4));
        let east_neighbour =
            Area::from_origin_and_size(BlockPos::new(4, 0, 0), BlockPos::new(4, 4, 4));
        let north_neighbour =
            Area::from_origin_and_size(BlockPos::new(0, 0, -4), BlockPos::new(4, 4, 4));
        assert!(!left.intersects(&east_neighbour));
        assert!(!east_neighbour.intersects(&left));
        assert!(!left.intersects(&north_neighbour));
    }

    #[test]
    fn areas_sharing_a_single_cell_intersect() {
        let left = Area::from_origin_and_size(BlockPos::ORIGIN, BlockPos::new(4, 4, 4));
        let corner = Area::from_origin_and_size(BlockPos::new(3, 3, 3), BlockPos::new(2, 2, 2));
        assert!(left.intersects(&corner));
        assert!(corner.intersects(&left));
        assert!(left.intersects(&left));
    }

    #[test]
    #[should_panic(expected = "area size must be positive")]
    fn area_rejects_non_positive_size() {
        let _ = Area::from_origin_and_size(BlockPos::ORIGIN, BlockPos::new(3, 0, 3));
    }

    #[test]
    fn coordinate_limit_is_inclusive_on_both_signs() {
        assert!(BlockPos::new(COORDINATE_LIMIT, -COORDINATE_LIMIT, 0).within_coordinate_limit());
        assert!(!BlockPos::new(0, 0, COORDINATE_LIMIT + 1).within_coordinate_limit());
        assert!(!BlockPos::new(i32::MIN, 0, 0).within_coordinate_limit());
    }

    #[test]
    fn distance_squared_is_exact_for_large_coordinates() {
        let far = BlockPos::new(2_000_000, 0, 1);
        let near = BlockPos::new(-2_000_000, 0, 0);
        assert_eq!(far.distance_squared(near), 16_000_000_000_001);
        assert_eq!(BlockPos::new(3, 4, 0).distance(BlockPos::ORIGIN), 5.0);
    }
}
