//! Binary entry point: resolve the data directory, start logging, load the
//! catalog once, and hand it to the terminal UI until the user exits.
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use book_catalog::config::{Cli, Paths};
use book_catalog::{logging, run_app, App, CatalogFile};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = Paths::resolve(&cli)?;
    logging::init(&paths, &cli.log_level)?;
    info!(data_dir = %paths.data_dir.display(), "starting book catalog");

    let loaded = CatalogFile::new(paths.catalog.clone())
        .load()
        .context("failed to load catalog")?;

    let mut app = App::new(loaded.catalog, paths);
    if let Some(corruption) = &loaded.corruption {
        app.report_corruption(corruption);
    }

    run_app(&mut app)?;
    info!("exiting");
    Ok(())
}
