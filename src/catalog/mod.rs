//! Element catalog: baked elements with their dense group indices.

pub use self::catalog::{ElementCatalog, ElementRecord};
pub use self::catalog_error::CatalogError;
pub use self::element::{Element, RawElement};
pub use self::group_table::GroupTable;

mod catalog;
mod catalog_error;
mod element;
mod group_table;
