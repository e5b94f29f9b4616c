// Declare modules
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod formatter;
pub mod matcher;
pub mod models;
pub mod tree;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;

use self::cli::Cli;
use self::collector::Collector;
use self::config::resolve_config;
use self::error::AppError;
use self::formatter::OutputGenerator;
use self::models::{RunTotals, RuntimeConfig};
use self::tree::{default_renderer, TreeRenderer};

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    // 2. Resolve Configuration (presets + CLI)
    let config = resolve_config(args).context("Failed to resolve configuration")?;
    log::debug!("Resolved configuration: {:?}", config);

    if config.include.is_empty() {
        log::warn!("💡 Tip: No include extensions configured; only the tree will be written.");
    }

    // 3. Render, collect, write
    let start = Instant::now();
    let totals = process(&config, &default_renderer(config.sort))?;

    // 4. Report
    println!("{}", OutputGenerator::format_summary(&totals));
    println!("Processing completed in {:?}", start.elapsed());

    Ok(())
}

/// One full run: tree, walk, assemble, write. Nothing is written unless every
/// earlier stage succeeded.
pub fn process(
    config: &RuntimeConfig,
    renderer: &dyn TreeRenderer,
) -> Result<RunTotals, AppError> {
    log::info!("Collecting files under {}", config.root.display());

    let tree = renderer.render(&config.root, &config.ignore)?;
    let collection = Collector::new(config).collect()?;
    let document = OutputGenerator::assemble(&tree, &collection.content);

    write_atomically(&config.output, &document).map_err(|source| AppError::OutputWrite {
        path: config.output.clone(),
        source,
    })?;
    log::info!("Wrote {} bytes to {}", document.len(), config.output.display());

    Ok(collection.totals)
}

/// Writes next to `path` and renames into place, so `path` ends up holding
/// either the whole document or whatever it held before.
fn write_atomically(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;

    // NamedTempFile is created 0600; match a plain file write.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
