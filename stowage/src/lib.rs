//!
//! A placement and feasibility engine for offline 3D bin packing over heterogeneous containers.
//!
//! Boxes are placed one by one into a set of container types. For every box, the engine
//! enumerates which `(container, rotation, x, y)` placements are legal, executes the chosen one
//! and keeps a discretized height field per container up to date.
//!

/// Entities to model the packing episode: boxes, containers, layouts and the set of containers
pub mod entities;

/// Integer geometry: extents and axis permutations
pub mod geometry;

/// Feasibility masks over all placements of a box
pub mod mask;

/// Importing problem instances into and exporting solutions out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;

mod error;

#[doc(inline)]
pub use error::{PackError, Result};
