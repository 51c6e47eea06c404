use serde::{Deserialize, Serialize};

use stowage::util::EngineConfig;

/// Configuration for the DBLF driver
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DblfConfig {
    /// Configuration of the feasibility engine
    pub engine: EngineConfig,
    /// Number of later boxes that may be moved ahead of a box that fits nowhere
    pub lookahead: usize,
    /// Seed for the PRNG. If undefined, synthetic instances are generated non-deterministically
    pub prng_seed: Option<u64>,
    /// Write a top view of every used container next to the solution
    #[serde(default)]
    pub svg_output: bool,
    /// Used to generate an instance when no input file is provided
    #[serde(default)]
    pub synthetic: SyntheticConfig,
}

impl Default for DblfConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            lookahead: 5,
            prng_seed: Some(0),
            svg_output: true,
            synthetic: SyntheticConfig::default(),
        }
    }
}

/// A single container type and a box sequence that tiles it exactly
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct SyntheticConfig {
    /// Extents of the container type (dx, dy, dz)
    pub container: (u32, u32, u32),
    pub max_weight: f32,
    pub n_items: usize,
    /// Box weights are drawn uniformly from this range
    pub weight_range: (f32, f32),
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            container: (10, 10, 10),
            max_weight: 100.0,
            n_items: 40,
            weight_range: (1.0, 5.0),
        }
    }
}
