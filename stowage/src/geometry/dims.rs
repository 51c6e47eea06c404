use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::{PackError, Result};

/// Axis-aligned extents of a box or container, in grid units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dims {
    pub dx: u32,
    pub dy: u32,
    pub dz: u32,
}

impl Dims {
    pub const fn new(dx: u32, dy: u32, dz: u32) -> Self {
        Self { dx, dy, dz }
    }

    /// Like [`Dims::new`], but rejects zero extents.
    pub fn try_new(dx: u32, dy: u32, dz: u32) -> Result<Self> {
        if dx == 0 || dy == 0 || dz == 0 {
            return Err(PackError::InvalidGeometry(format!(
                "all dimensions must be positive, got ({dx}, {dy}, {dz})"
            )));
        }
        Ok(Self { dx, dy, dz })
    }

    pub fn volume(&self) -> u64 {
        self.dx as u64 * self.dy as u64 * self.dz as u64
    }

    /// Number of grid cells covered by the footprint
    pub fn base_area(&self) -> u64 {
        self.dx as u64 * self.dy as u64
    }

    /// The three extents sorted in descending order
    pub fn sorted_desc(&self) -> [u32; 3] {
        let mut d = [self.dx, self.dy, self.dz];
        d.sort_unstable_by(|a, b| b.cmp(a));
        d
    }

    /// True if `self` can hold `other` in its current orientation.
    pub fn fits_within(&self, other: &Dims) -> bool {
        self.dx <= other.dx && self.dy <= other.dy && self.dz <= other.dz
    }

    /// True if `self` can hold `other` in at least one axis permutation.
    /// Necessary condition only, it ignores occupancy.
    pub fn fits_within_any_orientation(&self, other: &Dims) -> bool {
        let inner = self.sorted_desc();
        let outer = other.sorted_desc();
        inner.iter().zip(outer.iter()).all(|(i, o)| i <= o)
    }
}

impl Display for Dims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.dx, self.dy, self.dz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_descending() {
        assert_eq!(Dims::new(2, 7, 5).sorted_desc(), [7, 5, 2]);
    }

    #[test]
    fn zero_extent_is_rejected() {
        assert!(matches!(
            Dims::try_new(3, 0, 1),
            Err(PackError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn any_orientation_fit() {
        let container = Dims::new(10, 4, 6);
        assert!(Dims::new(6, 10, 4).fits_within_any_orientation(&container));
        assert!(!Dims::new(6, 10, 4).fits_within(&container));
        assert!(!Dims::new(11, 1, 1).fits_within_any_orientation(&container));
        assert!(!Dims::new(5, 5, 5).fits_within_any_orientation(&container));
    }
}
