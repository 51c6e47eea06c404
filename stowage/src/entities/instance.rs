use itertools::Itertools;

use crate::entities::{Container, Item};
use crate::error::{PackError, Result};
use crate::geometry::Rotation;
use crate::util::GridConfig;
use crate::util::assertions::instance_ids_correct;

/// Static description of a packing episode: the box sequence, the available container types,
/// the allowed orientations and the canonical grid.
#[derive(Clone, Debug)]
pub struct Instance {
    pub name: String,
    /// Boxes in arrival order
    pub items: Vec<Item>,
    pub containers: Vec<Container>,
    /// Allowed orientations, their position is the rotation axis of a feasibility mask
    pub rotations: Vec<Rotation>,
    pub grid: GridConfig,
}

impl Instance {
    /// Creates a new instance. The grid defaults to the smallest one covering all containers.
    pub fn new(
        name: impl Into<String>,
        items: Vec<Item>,
        containers: Vec<Container>,
        rotations: Vec<Rotation>,
        grid: Option<GridConfig>,
    ) -> Result<Self> {
        if containers.is_empty() {
            return Err(PackError::InvalidGeometry(
                "at least one container is required".into(),
            ));
        }
        if !instance_ids_correct(&items, &containers) {
            return Err(PackError::InvalidGeometry(format!(
                "ids must be consecutive starting from 0, items: {:?}, containers: {:?}",
                items.iter().map(|i| i.id).collect_vec(),
                containers.iter().map(|c| c.id).collect_vec()
            )));
        }
        if rotations.is_empty() || !rotations.iter().all_unique() {
            return Err(PackError::InvalidGeometry(format!(
                "rotations must be a non-empty set, got {rotations:?}"
            )));
        }

        let grid = grid.unwrap_or_else(|| GridConfig::covering(&containers));
        if let Some(c) = containers.iter().find(|c| !grid.contains(c)) {
            return Err(PackError::InvalidGeometry(format!(
                "container {} ({}) exceeds the grid {}x{}x{}",
                c.name, c.dims, grid.max_x, grid.max_y, grid.max_z
            )));
        }
        if !(grid.max_w.is_finite() && grid.max_w > 0.0) {
            return Err(PackError::InvalidGeometry(format!(
                "grid weight normaliser must be positive, got {}",
                grid.max_w
            )));
        }

        Ok(Self {
            name: name.into(),
            items,
            containers,
            rotations,
            grid,
        })
    }

    pub fn item(&self, id: usize) -> &Item {
        &self.items[id]
    }

    pub fn container(&self, id: usize) -> &Container {
        &self.containers[id]
    }

    /// Position of `rotation` along the rotation axis of a feasibility mask
    pub fn rotation_index(&self, rotation: Rotation) -> Option<usize> {
        self.rotations.iter().position(|r| *r == rotation)
    }

    /// Sum of the volumes of all boxes
    pub fn item_volume(&self) -> u64 {
        self.items.iter().map(|i| i.volume()).sum()
    }

    /// True if `item` fits in at least one empty container under the allowed rotations.
    pub fn fits_any_container(&self, item: &Item) -> bool {
        self.containers.iter().any(|c| self.fits_empty(item, c))
    }

    /// True if `item` fits in the empty `container` under at least one allowed rotation.
    pub fn fits_empty(&self, item: &Item, container: &Container) -> bool {
        item.wt <= container.max_weight
            && self
                .rotations
                .iter()
                .any(|r| item.oriented(*r).fits_within(&container.dims))
    }
}
