//! The generation pipeline: scan → resolve → build targets → render.
//!
//! One synchronous, linear pass. The document is assembled fully in memory
//! so a failure at any stage produces no output at all; the caller decides
//! whether to print it or write it atomically.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::emitter;
use crate::index::PackageIndex;
use crate::resolver;
use crate::targets;
use crate::utils::fs::read_optional_text_file;

/// Outcome of a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Number of packages discovered in the tree, nested copies included.
    pub package_count: usize,
    /// Number of generated targets.
    pub target_count: usize,
    /// The complete build-file document.
    pub document: String,
}

/// Runs the full pipeline over `<workspace_root>/node_modules`.
///
/// `extra_path` points at the optional override fragment; when the file
/// exists its contents are appended verbatim after the generated targets.
/// An empty tree still yields a valid preamble-only document.
pub fn generate(workspace_root: &Path, extra_path: &Path) -> Result<GenerateReport> {
    let mut index = PackageIndex::scan(workspace_root)?;
    info!("discovered {} packages, {} scopes", index.len(), index.scopes().len());

    resolver::resolve_all(&mut index)?;

    let targets = targets::build_targets(&index);
    let extra = read_optional_text_file(extra_path)?;
    let document = emitter::render(&targets, extra.as_deref());

    Ok(GenerateReport {
        package_count: index.len(),
        target_count: targets.len(),
        document,
    })
}
