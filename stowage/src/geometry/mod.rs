mod dims;
mod rotation;

#[doc(inline)]
pub use dims::Dims;

#[doc(inline)]
pub use rotation::Rotation;
