use crate::error::{PackError, Result};
use crate::geometry::Dims;

/// A container type in which [`Item`](crate::entities::Item)s can be packed.
/// Static description only, the occupancy lives in a [`Layout`](crate::entities::Layout).
#[derive(Clone, Debug, PartialEq)]
pub struct Container {
    pub id: usize,
    pub name: String,
    pub dims: Dims,
    pub max_weight: f32,
}

impl Container {
    pub fn new(id: usize, name: impl Into<String>, dims: Dims, max_weight: f32) -> Result<Self> {
        let name = name.into();
        if dims.dx == 0 || dims.dy == 0 || dims.dz == 0 {
            return Err(PackError::InvalidGeometry(format!(
                "container {name} has a zero extent: {dims}"
            )));
        }
        if !max_weight.is_finite() || max_weight <= 0.0 {
            return Err(PackError::InvalidGeometry(format!(
                "container {name} has an invalid weight capacity: {max_weight}"
            )));
        }
        Ok(Container {
            id,
            name,
            dims,
            max_weight,
        })
    }

    pub fn volume(&self) -> u64 {
        self.dims.volume()
    }
}
