mod action;
mod container;
mod container_sets;
mod instance;
mod item;
mod layout;
mod placed_item;

#[doc(inline)]
pub use action::Action;

#[doc(inline)]
pub use container::Container;

#[doc(inline)]
pub use container_sets::CSSnapshot;

#[doc(inline)]
pub use container_sets::ContainerSets;

#[doc(inline)]
pub use container_sets::PlacementName;

#[doc(inline)]
pub use instance::Instance;

#[doc(inline)]
pub use item::Item;

#[doc(inline)]
pub use layout::Layout;

#[doc(inline)]
pub use layout::LayoutSnapshot;

#[doc(inline)]
pub use placed_item::PlacedItem;
