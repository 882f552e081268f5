//! Catalog module - canonical tradable-item definitions.

mod catalog_model;
mod catalog_traits;

pub use catalog_model::{CatalogItem, ItemType, Wear};
pub use catalog_traits::CatalogRepositoryTrait;
