use std::time::Instant;

use anyhow::{Context, Result};
use bookmark_sync::bookmarks::{decode, extract, locate};
use bookmark_sync::{report, settings, Store};
use tracing::info;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let t0 = Instant::now();

    let settings = settings::load().context("Failed to load settings")?;
    info!(settings = ?settings, "Starting bookmark sync");

    let bookmarks_path = locate::resolve(&settings).context("Failed to locate bookmarks file")?;
    println!("Found bookmarks file: {}", bookmarks_path.display());

    let set = decode::read_file(&bookmarks_path)
        .with_context(|| format!("Failed to parse {:?}", bookmarks_path))?;
    info!(version = set.version, checksum = %set.checksum, "Decoded bookmarks");

    let records = extract::extract_roots(&set);
    drop(set);
    info!(count = records.len(), "Extracted bookmarks");

    let store = Store::initialize(&settings.db_path)
        .with_context(|| format!("Failed to initialize store {:?}", settings.db_path))?;

    // `store` is released on drop if any step below fails.
    let applied = store.upsert(&records).context("Failed to save bookmarks")?;
    info!(applied = applied, "Upserted bookmarks");
    println!("Saved {} bookmarks to {}", applied, store.path().display());

    let stored = store.query_all().context("Failed to read bookmarks")?;
    info!(count = stored.len(), "Read back stored bookmarks");
    report::print(&stored);

    store.close().context("Failed to close store")?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "Done");
    Ok(())
}
