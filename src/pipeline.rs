//! End-to-end processing of one collection, and of a directory of them.
//!
//! Every collection gets its own `Registry`; nothing is carried over between
//! collections, so a batch can continue after one of them fails.

use crate::collection::Collection;
use crate::config::LinearizeOptions;
use crate::linearize::linearize;
use crate::rebuild::{FlatCollection, rebuild};
use crate::registry::Registry;
use anyhow::{Context, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Suffix of files written by this tool; skipped when scanning a directory.
pub const OUTPUT_SUFFIX: &str = ".linear.json";

/// Counts at the three checkpoints of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Requests found while flattening the tree.
    pub found: usize,
    /// Entries placed by the linearizer.
    pub placed: usize,
    /// Requests in the rebuilt flat collection.
    pub rebuilt: usize,
}

pub fn linearize_collection(
    collection: Collection,
    options: &LinearizeOptions,
) -> crate::Result<(FlatCollection, RunReport)> {
    let Collection { header, root } = collection;

    // 1) Flatten.
    let mut registry = Registry::build(root)?;
    let found = registry.len();
    info!("Found {} requests.", found);

    // 2) Traverse.
    let order = linearize(&mut registry, options)?;
    info!("Reordered {} items.", order.len());

    // 3) Rebuild.
    let (_, by_id) = registry.into_parts();
    let flat = FlatCollection {
        header,
        items: rebuild(&order, by_id)?,
    };
    info!("Replaced {} items.", flat.len());

    let report = RunReport {
        found,
        placed: order.len(),
        rebuilt: flat.len(),
    };
    Ok((flat, report))
}

pub fn linearize_json(
    text: &str,
    options: &LinearizeOptions,
) -> crate::Result<(FlatCollection, RunReport)> {
    let collection = Collection::from_json(text)?;
    info!(
        "Linearizing collection {:?} with {} top-level items.",
        collection.name().unwrap_or("<unnamed>"),
        collection.root.children.len()
    );
    linearize_collection(collection, options)
}

pub fn read_and_linearize(
    input: &Path,
    options: &LinearizeOptions,
) -> anyhow::Result<(FlatCollection, RunReport)> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("read collection file {}", input.display()))?;
    linearize_json(&text, options).with_context(|| format!("linearize {}", input.display()))
}

/// Linearize `input` and write the flat collection to `output`.
pub fn linearize_file(
    input: &Path,
    output: &Path,
    options: &LinearizeOptions,
) -> anyhow::Result<RunReport> {
    let (flat, report) = read_and_linearize(input, options)?;
    let json = flat.to_json_pretty()?;
    fs::write(output, json).with_context(|| format!("write {}", output.display()))?;
    info!("Wrote {}", output.display());
    Ok(report)
}

/// `dir/name.json` => `out_dir/name.linear.json`.
pub fn output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "collection".to_string());
    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{}{}", stem, OUTPUT_SUFFIX))
}

/// `*.json` files of `dir`, sorted by name, excluding previous outputs.
pub fn collection_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read directory {}", dir.display()))? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if path.is_file() && name.ends_with(".json") && !name.ends_with(OUTPUT_SUFFIX) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub succeeded: Vec<(PathBuf, RunReport)>,
    pub failed: Vec<(PathBuf, anyhow::Error)>,
}

/// Linearize every collection of `dir`. A failing collection is logged and
/// recorded; the others are still processed.
pub fn run_batch(
    dir: &Path,
    out_dir: Option<&Path>,
    options: &LinearizeOptions,
) -> anyhow::Result<BatchSummary> {
    let files = collection_files(dir)?;
    if files.is_empty() {
        bail!("no collection files (*.json) found in {}", dir.display());
    }
    if let Some(out) = out_dir {
        fs::create_dir_all(out).with_context(|| format!("create directory {}", out.display()))?;
    }

    let mut summary = BatchSummary::default();
    for input in files {
        info!("Processing {}", input.display());
        let output = output_path(&input, out_dir);
        match linearize_file(&input, &output, options) {
            Ok(report) => summary.succeeded.push((input, report)),
            Err(err) => {
                error!("{:#}", err);
                summary.failed.push((input, err));
            }
        }
    }
    Ok(summary)
}
