//! Catalog Engine - category hierarchy and metadata validation
//!
//! Categories form a forest addressed by id. Metadata fields are assigned to
//! categories with a set of allowed values and inherited down the tree with
//! the nearest assignment winning. Product variations carry metadata that
//! must fit the schema of their (leaf) category and the shape of their
//! sibling variations.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use catalog_engine::{CatalogService, Config, MemoryCatalogStore};
//! use market_shared::models::Category;
//!
//! let store = MemoryCatalogStore::new();
//! store.insert_category(Category::with_id(1, "Electronics", None)).unwrap();
//!
//! let service = CatalogService::new(Arc::new(store), Config::default());
//! assert!(service.validate_new_category_name("electronics", None).is_err());
//! assert!(service.validate_new_category_name("Books", None).is_ok());
//! ```

pub mod catalog;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

pub use catalog::{CatalogError, CatalogResult, NameConflict};
pub use core::Config;
pub use db::{CatalogStore, MemoryCatalogStore, RepoError, RepoResult};
pub use services::CatalogService;
pub use utils::{init_logger, init_logger_from_config, init_logger_with_file};
