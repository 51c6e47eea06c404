use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::geometry::Rotation;

/// A placement decision: which container, which orientation, and which footprint origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub container_id: usize,
    pub rotation: Rotation,
    pub x: u32,
    pub y: u32,
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "container {} | {} | ({}, {})",
            self.container_id, self.rotation, self.x, self.y
        )
    }
}
