use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::PackError;
use crate::geometry::Dims;

/// Axis-aligned orientation of a box, expressed as the permutation of its original axes.
/// The variant name lists which original extent ends up along x, y and z respectively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rotation {
    /// `(dx, dy, dz)`, code 0
    Xyz,
    /// `(dy, dx, dz)`, code 1: quarter turn around the vertical axis
    Yxz,
    /// `(dx, dz, dy)`, code 2
    Xzy,
    /// `(dz, dy, dx)`, code 3
    Zyx,
    /// `(dy, dz, dx)`, code 4
    Yzx,
    /// `(dz, dx, dy)`, code 5
    Zxy,
}

impl Rotation {
    pub const ALL: [Rotation; 6] = [
        Rotation::Xyz,
        Rotation::Yxz,
        Rotation::Xzy,
        Rotation::Zyx,
        Rotation::Yzx,
        Rotation::Zxy,
    ];

    /// Only rotations that keep the original vertical extent upright
    pub const UPRIGHT: [Rotation; 2] = [Rotation::Xyz, Rotation::Yxz];

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the oriented extents. Pure: the input is left untouched.
    pub fn apply(self, d: Dims) -> Dims {
        let Dims { dx, dy, dz } = d;
        match self {
            Rotation::Xyz => Dims::new(dx, dy, dz),
            Rotation::Yxz => Dims::new(dy, dx, dz),
            Rotation::Xzy => Dims::new(dx, dz, dy),
            Rotation::Zyx => Dims::new(dz, dy, dx),
            Rotation::Yzx => Dims::new(dy, dz, dx),
            Rotation::Zxy => Dims::new(dz, dx, dy),
        }
    }
}

impl TryFrom<u8> for Rotation {
    type Error = PackError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Rotation::ALL
            .get(code as usize)
            .copied()
            .ok_or(PackError::InvalidRotation(code))
    }
}

impl From<Rotation> for u8 {
    fn from(r: Rotation) -> u8 {
        r.code()
    }
}

impl Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Rotation::Xyz, Dims::new(2, 3, 5); "identity")]
    #[test_case(Rotation::Yxz, Dims::new(3, 2, 5); "yaw")]
    #[test_case(Rotation::Xzy, Dims::new(2, 5, 3); "x axis")]
    #[test_case(Rotation::Zyx, Dims::new(5, 3, 2); "y axis")]
    #[test_case(Rotation::Yzx, Dims::new(3, 5, 2); "cycle left")]
    #[test_case(Rotation::Zxy, Dims::new(5, 2, 3); "cycle right")]
    fn apply_permutes_axes(r: Rotation, expected: Dims) {
        let d = Dims::new(2, 3, 5);
        assert_eq!(r.apply(d), expected);
        assert_eq!(r.apply(d).volume(), d.volume());
    }

    #[test]
    fn codes_round_trip() {
        for r in Rotation::ALL {
            assert_eq!(Rotation::try_from(r.code()), Ok(r));
        }
        assert_eq!(Rotation::try_from(6), Err(PackError::InvalidRotation(6)));
    }

    #[test]
    fn all_orientations_are_distinct_for_scalene_box() {
        let d = Dims::new(1, 2, 3);
        let mut oriented: Vec<Dims> = Rotation::ALL.iter().map(|r| r.apply(d)).collect();
        oriented.sort_by_key(|d| (d.dx, d.dy, d.dz));
        oriented.dedup();
        assert_eq!(oriented.len(), 6);
    }
}
