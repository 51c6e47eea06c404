use serde::{Deserialize, Serialize};

use crate::entities::Container;
use crate::error::{PackError, Result};

/// Configuration of the feasibility engine
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Maximum number of set bits in a feasibility mask, over all containers
    pub mask_budget: usize,
    /// Maximum number of set bits in a feasibility mask, per container
    pub container_budget: usize,
    /// Fraction of the footprint of a box that must rest on its support height.
    /// 1.0 demands a perfectly level base, lower values allow a bounded overhang.
    pub min_support: f32,
    /// Scan the containers in parallel when building a mask.
    /// The budgets stay hard limits, but which bits survive a saturated budget depends on scheduling.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mask_budget: 1000,
            container_budget: 1000,
            min_support: 1.0,
            parallel: false,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(PackError::InvalidGeometry(format!(
                "min_support must lie in (0, 1], got {}",
                self.min_support
            )));
        }
        Ok(())
    }
}

/// Canonical grid every container is embedded in.
/// All height fields and spatial summaries share this shape, regardless of the container's true size.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub max_x: u32,
    pub max_y: u32,
    pub max_z: u32,
    /// Weight used to normalise the weight channel of the spatial summary
    pub max_w: f32,
}

impl GridConfig {
    /// The smallest grid covering every container.
    pub fn covering(containers: &[Container]) -> Self {
        containers.iter().fold(
            GridConfig {
                max_x: 0,
                max_y: 0,
                max_z: 0,
                max_w: 0.0,
            },
            |g, c| GridConfig {
                max_x: g.max_x.max(c.dims.dx),
                max_y: g.max_y.max(c.dims.dy),
                max_z: g.max_z.max(c.dims.dz),
                max_w: g.max_w.max(c.max_weight),
            },
        )
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.max_x as usize, self.max_y as usize)
    }

    pub fn contains(&self, container: &Container) -> bool {
        container.dims.dx <= self.max_x
            && container.dims.dy <= self.max_y
            && container.dims.dz <= self.max_z
    }
}
