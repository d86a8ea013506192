//! Transitive dependency resolution over a [`PackageIndex`].
//!
//! For every package this computes the full transitive closure of its
//! declared dependencies as an ordered, duplicate-free list of package
//! `dir`s, reproducing npm's module-resolution semantics on the installed
//! tree:
//!
//! - **Nearest-ancestor lookup.** A dependency name is resolved by probing
//!   `<segments…>/node_modules/<name>` starting from requiring package's
//!   full `dir` and dropping one trailing segment per miss, then falling
//!   back to `<name>` at the tree root. A privately nested copy therefore
//!   shadows a root-hoisted package of the same name, exactly as `require`
//!   would pick it.
//! - **Required vs optional.** `dependencies` and `peerDependencies` must
//!   resolve or the whole run aborts; `optionalDependencies` that are not
//!   installed are skipped without an edge.
//! - **Cycle safety.** Each closure records the package itself first and
//!   short-circuits on revisits, so declared cycles terminate and every
//!   node appears exactly once.
//!
//! Traversal order is fully determined by the input: declared key order
//! within each map, maps in the order `dependencies`, `peerDependencies`,
//! `optionalDependencies`. Re-running over an unchanged tree yields
//! byte-identical closures, which keeps regenerated output diff-free.
//!
//! The index is read-only during resolution; closures accumulate in
//! per-package state and are written back in one step at the end. A
//! required-dependency failure therefore leaves no partial results behind.

use anyhow::Result;
use std::collections::HashSet;
use tracing::{debug, trace};

use crate::constants::NODE_MODULES_DIR;
use crate::core::NbgenError;
use crate::index::PackageIndex;


/// Populates `resolved` on every package in the index.
///
/// # Errors
///
/// [`NbgenError::DependencyNotFound`] when a required dependency resolves
/// to nothing, naming the missing dependency and the directory of the
/// package declaring it. Nothing is written back on failure.
pub fn resolve_all(index: &mut PackageIndex) -> Result<()> {
    let closures = (0..index.len())
        .map(|root| flatten_closure(index, root))
        .collect::<Result<Vec<_>>>()?;

    debug!("resolved closures for {} packages", closures.len());
    index.assign_resolved(closures);
    Ok(())
}

/// Computes the ordered transitive closure of one package.
///
/// The closure opens with the package's own `dir`; consumers filter it out
/// when building dependency lists.
fn flatten_closure(index: &PackageIndex, root: usize) -> Result<Vec<String>> {
    let mut ordered = Vec::new();
    let mut visited = HashSet::new();
    visit(index, root, &mut ordered, &mut visited)?;
    Ok(ordered)
}

/// Depth-first accumulation step: records `dep_idx` then descends into
/// each of its declared dependencies in order.
fn visit(
    index: &PackageIndex,
    dep_idx: usize,
    ordered: &mut Vec<String>,
    visited: &mut HashSet<String>,
) -> Result<()> {
    let dep = &index.packages()[dep_idx];

    // Revisit means a cycle or a diamond; either way the node and its
    // subtree are already accounted for.
    if !visited.insert(dep.dir.clone()) {
        return Ok(());
    }
    ordered.push(dep.dir.clone());

    let sources = [
        (&dep.dependencies, true),
        (&dep.peer_dependencies, true),
        (&dep.optional_dependencies, false),
    ];

    for (pairs, required) in sources {
        for (name, _range) in pairs {
            match lookup(index, &dep.dir, name) {
                Some(found) => visit(index, found, ordered, visited)?,
                None if required => {
                    return Err(NbgenError::DependencyNotFound {
                        name: name.clone(),
                        required_by: dep.dir.clone(),
                    }
                    .into());
                }
                None => {
                    trace!(
                        "optional dependency `{}` of `{}` not installed, skipping",
                        name, dep.dir
                    );
                }
            }
        }
    }

    Ok(())
}

/// Resolves a dependency name from the viewpoint of `from_dir`.
///
/// Probes `<segments…>/node_modules/<name>` with segments taken from
/// `from_dir`, shortening from the end on each miss, then falls back to
/// `<name>` at the tree root.
fn lookup(index: &PackageIndex, from_dir: &str, name: &str) -> Option<usize> {
    let mut segments: Vec<&str> = from_dir.split('/').collect();

    while !segments.is_empty() {
        let candidate = format!("{}/{}/{}", segments.join("/"), NODE_MODULES_DIR, name);
        if let Some(found) = index.position(&candidate) {
            return Some(found);
        }
        segments.pop();
    }

    index.position(name)
}
