/// Set of functions used throughout to assure the correctness of the library.
pub mod assertions;

/// Generation of synthetic box sequences.
pub mod generator;

mod config;
mod reorder;

#[doc(inline)]
pub use config::EngineConfig;
#[doc(inline)]
pub use config::GridConfig;
#[doc(inline)]
pub use reorder::reorder;
