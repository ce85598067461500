//! Persistence module split across logical submodules: whole-file JSON I/O
//! and the add operation that is the catalog's only writer.

mod books;
mod file;

pub use books::{add_book, BookInput};
pub use file::{CatalogFile, Corruption, Loaded};
