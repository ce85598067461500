//! Single-column CSV projections of the catalog.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::ExportError;
use crate::models::{Book, Catalog};

/// Fields that can be projected into an export file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportField {
    Title,
    Year,
}

impl ExportField {
    /// Header row text.
    pub fn header(self) -> &'static str {
        match self {
            ExportField::Title => "Title",
            ExportField::Year => "Year",
        }
    }

    /// Raw cell value; missing values become an empty cell.
    fn cell(self, book: &Book) -> String {
        match self {
            ExportField::Title => book.title.clone().unwrap_or_default(),
            ExportField::Year => book.year.map(|year| year.to_string()).unwrap_or_default(),
        }
    }
}

/// Write `field` for every record, in catalog order, under a one-cell header.
/// The destination is overwritten. Returns the number of data rows.
pub fn export_field(
    catalog: &Catalog,
    field: ExportField,
    destination: &Path,
) -> Result<usize, ExportError> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ExportError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let csv_err = |source| ExportError::Csv {
        path: destination.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(destination).map_err(csv_err)?;
    writer.write_record([field.header()]).map_err(csv_err)?;
    let mut rows = 0;
    for book in catalog.books() {
        writer.write_record([field.cell(book)]).map_err(csv_err)?;
        rows += 1;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: destination.to_path_buf(),
        source,
    })?;

    info!(path = %destination.display(), field = field.header(), rows, "export written");
    Ok(rows)
}
