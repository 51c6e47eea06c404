use crate::entities::{Item, PlacementName};
use crate::geometry::{Dims, Rotation};

/// An [`Item`] that has been packed, together with where and how.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedItem {
    pub item: Item,
    /// Orientation applied to the item
    pub rotation: Rotation,
    /// Extents of the item after the rotation
    pub dims: Dims,
    /// Position of the minimum corner, z relative to the floor of the container
    pub position: (u32, u32, u32),
    pub container_id: usize,
    /// The physical container instance the item was packed in
    pub placement: PlacementName,
    /// Human readable label of `placement`, `<type-name>(<use-count>)`
    pub container_name: String,
    pub container_size: Dims,
}

impl PlacedItem {
    pub fn item_id(&self) -> usize {
        self.item.id
    }

    /// Height of the top face, relative to the container floor
    pub fn top(&self) -> u32 {
        self.position.2 + self.dims.dz
    }
}
