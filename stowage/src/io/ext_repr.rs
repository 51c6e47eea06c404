use serde::{Deserialize, Serialize};

/// External representation of an [`Item`](crate::entities::Item), a box to be packed.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtItem {
    pub name: String,
    pub dx: u32,
    pub dy: u32,
    pub dz: u32,
    /// Weight of the box
    pub wt: f32,
}

/// External representation of a [`Container`](crate::entities::Container) type.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtContainer {
    pub name: String,
    pub dx: u32,
    pub dy: u32,
    pub dz: u32,
    pub max_weight: f32,
}

/// External representation of a [`GridConfig`](crate::util::GridConfig).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExtGrid {
    pub max_x: u32,
    pub max_y: u32,
    pub max_z: u32,
    pub max_w: f32,
}

/// External representation of an [`Instance`](crate::entities::Instance).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtInstance {
    /// The name of the instance
    pub name: String,
    /// Container types, in id order
    pub containers: Vec<ExtContainer>,
    /// The box sequence, in arrival order
    pub items: Vec<ExtItem>,
    /// Allowed rotation codes (0..=5). All six if not specified
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub rotations: Option<Vec<u8>>,
    /// Canonical grid. The smallest grid covering all containers if not specified
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub grid: Option<ExtGrid>,
}

/// External representation of a [`PlacedItem`](crate::entities::PlacedItem).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPlacedItem {
    /// Index of the box in the instance
    pub item_id: usize,
    pub name: String,
    /// Rotation code that was applied
    pub rotation: u8,
    /// Oriented extents (dx, dy, dz)
    pub dims: (u32, u32, u32),
    /// Minimum corner, z relative to the container floor
    pub position: (u32, u32, u32),
}

/// A physical container instance and the boxes packed in it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtPlacement {
    /// `<type-name>(<use-count>)`
    pub name: String,
    pub container_id: usize,
    pub use_count: usize,
    pub placed_items: Vec<ExtPlacedItem>,
    /// Fraction of the container volume occupied by boxes
    pub utilization: f32,
    /// Total weight of the packed boxes
    pub weight: f32,
}

/// External representation of the outcome of a packing episode.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ExtSolution {
    pub placements: Vec<ExtPlacement>,
    /// Names of the boxes that could not be packed
    pub skipped: Vec<String>,
    /// Number of physical containers used
    pub n_containers_used: usize,
    /// Packed volume over the volume of all containers used
    pub utilization: f32,
    pub run_time_sec: f64,
}
