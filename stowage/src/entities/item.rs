use crate::error::{PackError, Result};
use crate::geometry::{Dims, Rotation};

/// A rectangular box to be packed.
///
/// The extents stored here are canonical and never change: orientations are evaluated
/// through [`Item::oriented`], which returns a new [`Dims`].
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: usize,
    pub name: String,
    pub dims: Dims,
    pub wt: f32,
}

impl Item {
    pub fn new(id: usize, name: impl Into<String>, dims: Dims, wt: f32) -> Result<Self> {
        let name = name.into();
        if dims.dx == 0 || dims.dy == 0 || dims.dz == 0 {
            return Err(PackError::InvalidGeometry(format!(
                "box {name} has a zero extent: {dims}"
            )));
        }
        if !wt.is_finite() || wt < 0.0 {
            return Err(PackError::InvalidGeometry(format!(
                "box {name} has an invalid weight: {wt}"
            )));
        }
        Ok(Item { id, name, dims, wt })
    }

    pub fn volume(&self) -> u64 {
        self.dims.volume()
    }

    /// Extents of the box in the given orientation
    pub fn oriented(&self, rotation: Rotation) -> Dims {
        rotation.apply(self.dims)
    }
}
