//! Loading options, reading every source, and building the dataset.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info_span};

use aero_ingest::load_sources;
use aero_model::DatasetOptions;
use aero_transform::Dataset;

/// Option values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub data_dir: Option<PathBuf>,
}

/// Reads `DatasetOptions` from an optional JSON config and applies overrides.
pub fn resolve_options(config: Option<&Path>, overrides: &OptionOverrides) -> Result<DatasetOptions> {
    let mut options = match config {
        Some(path) => read_config(path)?,
        None => DatasetOptions::default(),
    };
    if let Some(data_dir) = &overrides.data_dir {
        options.data_dir.clone_from(data_dir);
    }
    options
        .validate()
        .context("invalid dataset options")?;
    Ok(options)
}

fn read_config(path: &Path) -> Result<DatasetOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let options: DatasetOptions = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(options)
}

/// Result of one pipeline run.
#[derive(Debug)]
pub struct PipelineRun {
    pub options: DatasetOptions,
    pub dataset: Dataset,
    /// One message per source that failed to load, naming its file.
    pub load_errors: Vec<String>,
}

/// Loads every source, then normalizes and combines them.
///
/// Source failures do not abort the run; they are logged and returned in
/// [`PipelineRun::load_errors`].
pub fn run_pipeline(options: DatasetOptions) -> Result<PipelineRun> {
    let span = info_span!("pipeline", data_dir = %options.data_dir.display());
    let _guard = span.enter();

    // Ingest
    let loaded = load_sources(&options).context("load sources")?;
    let load_errors = loaded.report_failures();

    // Normalize and combine
    let dataset = Dataset::build(loaded.into_tables(), &options.catalog);

    Ok(PipelineRun {
        options,
        dataset,
        load_errors,
    })
}
