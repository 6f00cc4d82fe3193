//! Classification of 2D displacement vectors into discrete angular sectors.

use ::strum::{EnumIter, FromRepr};
use ::tap::Pipe;

/// Number of angular sectors in a full rotation.
pub const SECTOR_COUNT: u32 = 32;

/// Angular width of one sector, in degrees.
pub const SECTOR_WIDTH_DEG: f64 = 360.0 / SECTOR_COUNT as f64;

/// Displacements shorter than this on both axes have no defined direction.
const EPSILON: f64 = 1e-6;

/// One of 32 compass sectors, 11.25° apart.
///
/// Index 0 is East (cursor moved screen-right) and indices increase
/// counter-clockwise in mathematical angle terms, i.e. after inverting the
/// screen Y axis (which grows downward). Exactly 32 contiguous values backed
/// by `0..32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, FromRepr)]
#[repr(u8)]
pub enum Direction {
    East,
    EastByNorth,
    EastNorthEast,
    NorthEastByEast,
    NorthEast,
    NorthEastByNorth,
    NorthNorthEast,
    NorthByEast,
    North,
    NorthByWest,
    NorthNorthWest,
    NorthWestByNorth,
    NorthWest,
    NorthWestByWest,
    WestNorthWest,
    WestByNorth,
    West,
    WestBySouth,
    WestSouthWest,
    SouthWestByWest,
    SouthWest,
    SouthWestBySouth,
    SouthSouthWest,
    SouthByWest,
    South,
    SouthByEast,
    SouthSouthEast,
    SouthEastBySouth,
    SouthEast,
    SouthEastByEast,
    EastSouthEast,
    EastBySouth,
}

impl Direction {
    /// Classifies a screen-space displacement into its nearest sector.
    ///
    /// `dx` is positive toward screen-right and `dy` positive toward
    /// screen-down; the Y axis is negated before `atan2` so that sector
    /// indices increase counter-clockwise. Each sector owns an 11.25°-wide
    /// span centered on its nominal angle, with exact midpoints rounding to
    /// the sector above. A near-zero displacement classifies as
    /// [`Direction::East`] by convention.
    ///
    /// # Example
    ///
    /// ```
    /// use ::keylight::motion::Direction;
    ///
    /// // Screen-right.
    /// assert_eq!(Direction::classify(10.0, 0.0), Direction::East);
    /// // Screen-up: Y grows downward, so a negative dy points north.
    /// assert_eq!(Direction::classify(0.0, -10.0), Direction::North);
    /// ```
    pub fn classify(dx: f64, dy: f64) -> Self {
        if dx.abs() < EPSILON && dy.abs() < EPSILON {
            return Self::East;
        }

        let angle = (-dy).atan2(dx).to_degrees().rem_euclid(360.0);
        (angle / SECTOR_WIDTH_DEG)
            .round()
            .pipe(|sector| sector as u32 % SECTOR_COUNT)
            .pipe(|sector| {
                Self::from_repr(sector as u8).expect("sector index is always within 0..32")
            })
    }

    /// The nominal angle at the center of this sector, in degrees
    /// counter-clockwise from East.
    pub fn angle_deg(self) -> f64 {
        f64::from(self as u8) * SECTOR_WIDTH_DEG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;
    use ::strum::IntoEnumIterator;

    /// Builds the screen-space unit displacement for a mathematical angle.
    fn displacement(angle_deg: f64) -> (f64, f64) {
        let radians = angle_deg.to_radians();
        // Screen dy is the negated mathematical y component.
        (radians.cos(), -radians.sin())
    }

    /// Every canonical angle `k * 11.25°` classifies to sector `k`.
    #[test]
    fn test_canonical_angles() {
        for (k, expected) in Direction::iter().enumerate() {
            let (dx, dy) = displacement(k as f64 * SECTOR_WIDTH_DEG);
            assert_eq!(Direction::classify(dx, dy), expected, "sector {k}");
        }
    }

    /// Zero displacement has no defined direction; East is the convention.
    #[test]
    fn test_zero_displacement_is_east() {
        assert_eq!(Direction::classify(0.0, 0.0), Direction::East);
        assert_eq!(Direction::classify(1e-9, -1e-9), Direction::East);
    }

    /// Normalization is consistent mod 360: a -45° vector and a 315° vector
    /// agree.
    #[test]
    fn test_negative_angle_wraps() {
        let (dx, dy) = displacement(-45.0);
        let (wx, wy) = displacement(315.0);
        assert_eq!(Direction::classify(dx, dy), Direction::classify(wx, wy));
        assert_eq!(Direction::classify(dx, dy), Direction::SouthEast);
    }

    /// Sector boundaries sit at the midpoints between nominal angles, with
    /// the midpoint itself belonging to the sector above. Trig round-trips
    /// make an exact tie unreliable to synthesize, so probe just either side
    /// of the boundary.
    #[test]
    fn test_sector_boundaries() {
        let (dx, dy) = displacement(SECTOR_WIDTH_DEG / 2.0 + 0.01);
        assert_eq!(Direction::classify(dx, dy), Direction::EastByNorth);

        let (dx, dy) = displacement(SECTOR_WIDTH_DEG / 2.0 - 0.01);
        assert_eq!(Direction::classify(dx, dy), Direction::East);

        // The final boundary wraps past the last sector back to East.
        let (dx, dy) = displacement(360.0 - SECTOR_WIDTH_DEG / 2.0 + 0.01);
        assert_eq!(Direction::classify(dx, dy), Direction::East);
    }

    /// Screen axes: (10, 0) is East, (0, -10) is North, (10, 10) is
    /// down-and-right which lands south of east.
    #[test]
    fn test_screen_axis_convention() {
        assert_eq!(Direction::classify(10.0, 0.0), Direction::East);
        assert_eq!(Direction::classify(0.0, -10.0), Direction::North);
        assert_eq!(Direction::classify(-10.0, 0.0), Direction::West);
        assert_eq!(Direction::classify(0.0, 10.0), Direction::South);
        assert_eq!(Direction::classify(10.0, 10.0), Direction::SouthEast);
    }

    #[test]
    fn test_sector_count_and_angles() {
        assert_eq!(Direction::iter().count(), SECTOR_COUNT as usize);
        assert_eq!(Direction::East.angle_deg(), 0.0);
        assert_eq!(Direction::North.angle_deg(), 90.0);
        assert_eq!(Direction::EastBySouth.angle_deg(), 348.75);
    }
}
