//! Core library surface for the book catalog manager.
//!
//! The catalog itself (`models`), its JSON persistence and the add operation
//! (`store`), the read-only queries (`query`) and CSV exports (`export`) are
//! usable without a terminal; `ui` drives them interactively.
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod query;
pub mod store;
pub mod ui;

pub use error::{CatalogError, ExportError, StoreError, ValidationError};
pub use export::{export_field, ExportField};
pub use models::{Book, Catalog};
pub use store::{add_book, BookInput, CatalogFile, Loaded};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
