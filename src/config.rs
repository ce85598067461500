use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".book-catalog";
const CATALOG_FILE_NAME: &str = "books.json";
const TITLES_CSV_FILE_NAME: &str = "titles.csv";
const YEARS_CSV_FILE_NAME: &str = "years.csv";
const LOG_FILE_NAME: &str = "book-catalog.log";

/// Personal book catalog in the terminal.
#[derive(Debug, Parser)]
#[command(name = "book-catalog", version, about)]
pub struct Cli {
    /// Directory holding the catalog, exports and log file
    /// (defaults to ~/.book-catalog).
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `book_catalog=trace`.
    /// RUST_LOG takes precedence when set.
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Every file the application touches, derived from one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Folder holding everything below; created on first save or log write.
    pub data_dir: PathBuf,
    /// `books.json`, the backing store.
    pub catalog: PathBuf,
    /// Target of "Extract Titles to CSV".
    pub titles_csv: PathBuf,
    /// Target of "Extract Years to CSV".
    pub years_csv: PathBuf,
    /// Tracing output; the terminal belongs to the UI.
    pub log: PathBuf,
}

impl Paths {
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            catalog: data_dir.join(CATALOG_FILE_NAME),
            titles_csv: data_dir.join(TITLES_CSV_FILE_NAME),
            years_csv: data_dir.join(YEARS_CSV_FILE_NAME),
            log: data_dir.join(LOG_FILE_NAME),
            data_dir,
        }
    }

    /// Use the `--data-dir` override when given, otherwise the home folder.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        match &cli.data_dir {
            Some(dir) => Ok(Self::in_dir(dir)),
            None => Ok(Self::in_dir(default_data_dir()?)),
        }
    }
}

/// Resolve the default data directory inside the user's home.
fn default_data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
