//! Entity storage

pub mod registry;

pub use registry::{CollectionView, EntityRegistry, Identified, Registry};
