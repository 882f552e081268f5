mod model;
mod repository;

pub use model::CatalogItemDB;
pub use repository::CatalogRepository;
