use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::Catalog;

/// Why a present backing file was discarded at load time.
#[derive(Debug)]
pub enum Corruption {
    /// The file is not valid JSON at all.
    Malformed(serde_json::Error),
    /// Valid JSON, but the top level is not an object or one of its entries
    /// is not an object. Field types inside an entry are not checked.
    UnexpectedShape,
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Corruption::Malformed(_) => write!(f, "Error: JSON file is malformed."),
            Corruption::UnexpectedShape => write!(
                f,
                "Error: JSON data is not in the expected dictionary format."
            ),
        }
    }
}

/// Result of reading the backing file. A corrupt file still yields an (empty)
/// catalog; the caller decides how to surface `corruption`.
#[derive(Debug)]
pub struct Loaded {
    /// Records read from disk, or an empty catalog when the file was missing
    /// or unreadable.
    pub catalog: Catalog,
    /// Set when a present file had to be discarded.
    pub corruption: Option<Corruption>,
}

/// Handle on the JSON file that holds the catalog between sessions.
#[derive(Debug, Clone)]
pub struct CatalogFile {
    /// Location of `books.json`; its parent is created on first save.
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole catalog. A missing file is an empty catalog; unreadable
    /// content is reported through `Loaded::corruption` and dropped.
    pub fn load(&self) -> Result<Loaded, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "no catalog file yet, starting empty");
                return Ok(Loaded {
                    catalog: Catalog::new(),
                    corruption: None,
                });
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let loaded = match parse_catalog(&raw) {
            Ok(catalog) => {
                info!(path = %self.path.display(), books = catalog.len(), "catalog loaded");
                Loaded {
                    catalog,
                    corruption: None,
                }
            }
            Err(corruption) => {
                warn!(
                    path = %self.path.display(),
                    error = ?corruption,
                    "discarding unreadable catalog"
                );
                Loaded {
                    catalog: Catalog::new(),
                    corruption: Some(corruption),
                }
            }
        };
        Ok(loaded)
    }

    /// Overwrite the file with the full catalog, indented by four spaces.
    pub fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buf, formatter);
        catalog.serialize(&mut serializer)?;

        fs::write(&self.path, buf).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), books = catalog.len(), "catalog saved");
        Ok(())
    }
}

/// Two-stage parse so syntax errors and shape errors stay distinguishable.
fn parse_catalog(raw: &str) -> Result<Catalog, Corruption> {
    let value: Value = serde_json::from_str(raw).map_err(Corruption::Malformed)?;
    if !value.is_object() {
        return Err(Corruption::UnexpectedShape);
    }
    serde_json::from_value(value).map_err(|_| Corruption::UnexpectedShape)
}
