//! Package discovery over an installed `node_modules` tree.
//!
//! The index walks the tree once and produces a flat, read-only view of
//! every package in it, however deeply nested, plus the list of scope
//! directories found at the root. A directory is a package iff it directly
//! contains a parseable `package.json`; scope directories (`@foo`) are
//! namespaces whose children are packages, not packages themselves.
//!
//! Each package is keyed by `dir`, its forward-slash path relative to the
//! root `node_modules` directory (`left`, `@babel/core`,
//! `left/node_modules/right`). That path is the sole identity used for
//! lookup and graph edges; declared `name`/`version` are informational.
//!
//! Directory entries are visited in lexicographic order so repeated scans
//! of an unchanged tree yield identical indices; `read_dir` order is
//! platform-dependent and must not leak into the output.

pub mod manifest;

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

use crate::constants::{NODE_MODULES_DIR, PACKAGE_MANIFEST, SCOPE_MARKER};
use crate::core::NbgenError;
use crate::utils::fs::{read_text_file, relative_to};
use self::manifest::PackageManifest;

/// One installed package, parsed from its `package.json`.
#[derive(Debug, Clone)]
pub struct PackageRecord {
    /// Forward-slash path relative to the root `node_modules` directory.
    /// Unique across the index.
    pub dir: String,
    /// Declared name, empty when the manifest omits it.
    pub name: String,
    /// Declared version, empty when the manifest omits it.
    pub version: String,
    /// True iff `dir` contains a `node_modules` segment, i.e. this copy is
    /// private to an ancestor package rather than hoisted to the root.
    pub nested: bool,
    /// Required dependencies in declared order, name → opaque range.
    pub dependencies: Vec<(String, String)>,
    /// Required peer dependencies in declared order.
    pub peer_dependencies: Vec<(String, String)>,
    /// Optional dependencies in declared order; misses are skipped.
    pub optional_dependencies: Vec<(String, String)>,
    /// Normalized `bin` entries. Only populated for non-nested packages;
    /// nested copies never get wrapper targets.
    pub executables: Vec<(String, String)>,
    /// Transitive closure as ordered `dir`s, populated by the resolver.
    /// Contains the package itself (cycle guard); consumers filter it out.
    pub resolved: Vec<String>,
}

/// Read-only view of every package in an install tree.
#[derive(Debug)]
pub struct PackageIndex {
    packages: Vec<PackageRecord>,
    by_dir: HashMap<String, usize>,
    scopes: Vec<String>,
}

impl PackageIndex {
    /// Walks `<workspace_root>/node_modules` and indexes every package in
    /// it, including private copies nested arbitrarily deep.
    ///
    /// A missing `node_modules` directory yields an empty index, not an
    /// error; generation over an uninstalled workspace is a no-op.
    ///
    /// # Errors
    ///
    /// [`NbgenError::ManifestParseError`] when any `package.json` is
    /// unreadable or malformed; directory-listing failures surface as
    /// [`NbgenError::FileSystemError`].
    pub fn scan(workspace_root: &Path) -> Result<Self> {
        let tree_root = workspace_root.join(NODE_MODULES_DIR);

        if !tree_root.is_dir() {
            debug!("no {} directory under {}", NODE_MODULES_DIR, workspace_root.display());
            return Ok(Self::from_records(Vec::new()));
        }

        let mut records = Vec::new();
        collect_packages(&tree_root, &tree_root, &mut records)?;

        let scopes = sorted_entries(&tree_root)?
            .into_iter()
            .filter(|(name, path)| name.starts_with(SCOPE_MARKER) && path.is_dir())
            .map(|(name, _)| name)
            .collect();

        debug!("indexed {} packages", records.len());

        let mut index = Self::from_records(records);
        index.scopes = scopes;
        Ok(index)
    }

    /// Builds an index from pre-parsed records, e.g. in tests. Scope list
    /// starts empty.
    pub fn from_records(packages: Vec<PackageRecord>) -> Self {
        let by_dir =
            packages.iter().enumerate().map(|(i, p)| (p.dir.clone(), i)).collect();
        Self { packages, by_dir, scopes: Vec::new() }
    }

    /// Replaces the scope list, e.g. when building an index from records
    /// rather than a scan.
    #[must_use]
    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// All packages in discovery order.
    pub fn packages(&self) -> &[PackageRecord] {
        &self.packages
    }

    /// Scope directory names found at the tree root, in lexicographic
    /// order.
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Position of the package with the given `dir`, if present.
    pub fn position(&self, dir: &str) -> Option<usize> {
        self.by_dir.get(dir).copied()
    }

    /// The package with the given `dir`, if present.
    pub fn get(&self, dir: &str) -> Option<&PackageRecord> {
        self.position(dir).map(|i| &self.packages[i])
    }

    /// Number of indexed packages.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// True when no packages were discovered.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Stores the per-package closures computed by the resolver. Panics if
    /// the closure count disagrees with the package count; the resolver
    /// produces exactly one closure per package.
    pub(crate) fn assign_resolved(&mut self, closures: Vec<Vec<String>>) {
        assert_eq!(closures.len(), self.packages.len());
        for (pkg, resolved) in self.packages.iter_mut().zip(closures) {
            pkg.resolved = resolved;
        }
    }
}

/// Lists the sub-entries of `dir` as `(file name, full path)` pairs in
/// lexicographic name order.
fn sorted_entries(dir: &Path) -> Result<Vec<(String, std::path::PathBuf)>> {
    let read = std::fs::read_dir(dir).map_err(|e| NbgenError::FileSystemError {
        operation: format!("directory listing ({e})"),
        path: dir.display().to_string(),
    })?;

    let mut entries = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| NbgenError::FileSystemError {
            operation: format!("directory listing ({e})"),
            path: dir.display().to_string(),
        })?;
        entries.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

/// Recursively accumulates packages under `dir`, treating it as the root of
/// a dependency tree.
///
/// Plain entries that hold a `package.json` are parsed and then searched
/// for their own nested `node_modules`; scope entries are descended into as
/// pseudo-roots whose children are packages named `@scope/child`.
fn collect_packages(
    tree_root: &Path,
    dir: &Path,
    out: &mut Vec<PackageRecord>,
) -> Result<()> {
    for (name, path) in sorted_entries(dir)? {
        if !path.is_dir() {
            continue;
        }

        if name.starts_with(SCOPE_MARKER) {
            collect_packages(tree_root, &path, out)?;
        } else if path.join(PACKAGE_MANIFEST).is_file() {
            out.push(parse_package(tree_root, &path)?);

            let nested_tree = path.join(NODE_MODULES_DIR);
            if nested_tree.is_dir() {
                collect_packages(tree_root, &nested_tree, out)?;
            }
        }
    }
    Ok(())
}

/// Parses one package directory into a [`PackageRecord`].
fn parse_package(tree_root: &Path, package_path: &Path) -> Result<PackageRecord> {
    let dir = relative_to(package_path, tree_root).ok_or_else(|| NbgenError::FileSystemError {
        operation: "package path resolution".to_string(),
        path: package_path.display().to_string(),
    })?;

    let manifest_path = package_path.join(PACKAGE_MANIFEST);
    let raw = read_text_file(&manifest_path).map_err(|e| NbgenError::ManifestParseError {
        dir: dir.clone(),
        reason: e.to_string(),
    })?;
    let manifest: PackageManifest =
        serde_json::from_str(&raw).map_err(|e| NbgenError::ManifestParseError {
            dir: dir.clone(),
            reason: e.to_string(),
        })?;

    let nested = dir.split('/').any(|segment| segment == NODE_MODULES_DIR);

    // Wrapper targets are only generated for root-level packages, so bin
    // entries of nested copies are dropped at parse time.
    let fallback_name = dir.rsplit('/').next().unwrap_or(&dir);
    let executables =
        if nested { Vec::new() } else { manifest.executables(fallback_name) };

    Ok(PackageRecord {
        dir,
        name: manifest.name.clone().unwrap_or_default(),
        version: manifest.version.clone().unwrap_or_default(),
        nested,
        dependencies: PackageManifest::dependency_pairs(&manifest.dependencies),
        peer_dependencies: PackageManifest::dependency_pairs(&manifest.peer_dependencies),
        optional_dependencies: PackageManifest::dependency_pairs(&manifest.optional_dependencies),
        executables,
        resolved: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Writes a package.json at `node_modules/<dir>` under the workspace.
    fn write_package(ws: &Path, dir: &str, json: &str) {
        let pkg_dir = ws.join(NODE_MODULES_DIR).join(dir);
        fs::create_dir_all(&pkg_dir).unwrap();
        fs::write(pkg_dir.join(PACKAGE_MANIFEST), json).unwrap();
    }

    #[test]
    fn test_missing_node_modules_yields_empty_index() {
        let ws = TempDir::new().unwrap();
        let index = PackageIndex::scan(ws.path()).unwrap();
        assert!(index.is_empty());
        assert!(index.scopes().is_empty());
    }

    #[test]
    fn test_scan_finds_root_packages_sorted() {
        let ws = TempDir::new().unwrap();
        write_package(ws.path(), "zeta", r#"{"name": "zeta", "version": "1.0.0"}"#);
        write_package(ws.path(), "alpha", r#"{"name": "alpha", "version": "2.0.0"}"#);

        let index = PackageIndex::scan(ws.path()).unwrap();
        let dirs: Vec<&str> = index.packages().iter().map(|p| p.dir.as_str()).collect();
        assert_eq!(dirs, ["alpha", "zeta"]);
        assert_eq!(index.get("alpha").unwrap().version, "2.0.0");
        assert!(!index.get("alpha").unwrap().nested);
    }

    #[test]
    fn test_scan_descends_into_nested_trees() {
        let ws = TempDir::new().unwrap();
        write_package(ws.path(), "a", r#"{"name": "a"}"#);
        write_package(ws.path(), "a/node_modules/b", r#"{"name": "b"}"#);
        write_package(ws.path(), "a/node_modules/b/node_modules/c", r#"{"name": "c"}"#);

        let index = PackageIndex::scan(ws.path()).unwrap();
        assert_eq!(index.len(), 3);

        let b = index.get("a/node_modules/b").unwrap();
        assert!(b.nested);
        let c = index.get("a/node_modules/b/node_modules/c").unwrap();
        assert!(c.nested);
        assert!(!index.get("a").unwrap().nested);
    }

    #[test]
    fn test_scoped_packages_and_scope_list() {
        let ws = TempDir::new().unwrap();
        write_package(ws.path(), "@s/a", r#"{"name": "@s/a"}"#);
        write_package(ws.path(), "@s/b", r#"{"name": "@s/b"}"#);
        write_package(ws.path(), "c", r#"{"name": "c"}"#);

        let index = PackageIndex::scan(ws.path()).unwrap();
        let dirs: Vec<&str> = index.packages().iter().map(|p| p.dir.as_str()).collect();
        assert_eq!(dirs, ["@s/a", "@s/b", "c"]);
        assert_eq!(index.scopes(), ["@s"]);
    }

    #[test]
    fn test_scoped_package_nested_under_plain_package() {
        let ws = TempDir::new().unwrap();
        write_package(ws.path(), "a", r#"{"name": "a"}"#);
        write_package(ws.path(), "a/node_modules/@s/x", r#"{"name": "@s/x"}"#);

        let index = PackageIndex::scan(ws.path()).unwrap();
        let nested = index.get("a/node_modules/@s/x").unwrap();
        assert!(nested.nested);
        // Nested scope dirs are not root scopes.
        assert!(index.scopes().is_empty());
    }

    #[test]
    fn test_directory_without_manifest_is_not_a_package() {
        let ws = TempDir::new().unwrap();
        write_package(ws.path(), "real", r#"{"name": "real"}"#);
        fs::create_dir_all(ws.path().join("node_modules/.bin")).unwrap();
        fs::create_dir_all(ws.path().join("node_modules/junk")).unwrap();

        let index = PackageIndex::scan(ws.path()).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.packages()[0].dir, "real");
    }

    #[test]
    fn test_malformed_manifest_is_fatal_and_names_directory() {
        let ws = TempDir::new().unwrap();
        write_package(ws.path(), "bad", "{ not json");

        let err = PackageIndex::scan(ws.path()).unwrap_err();
        let err = err.downcast::<NbgenError>().unwrap();
        match err {
            NbgenError::ManifestParseError { dir, .. } => assert_eq!(dir, "bad"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_executables_only_for_root_level_packages() {
        let ws = TempDir::new().unwrap();
        write_package(ws.path(), "cli", r#"{"name": "cli", "bin": "./run.js"}"#);
        write_package(
            ws.path(),
            "cli/node_modules/sub",
            r#"{"name": "sub", "bin": "./sub.js"}"#,
        );

        let index = PackageIndex::scan(ws.path()).unwrap();
        assert_eq!(
            index.get("cli").unwrap().executables,
            vec![("cli".to_string(), "run.js".to_string())]
        );
        assert!(index.get("cli/node_modules/sub").unwrap().executables.is_empty());
    }

    #[test]
    fn test_declared_dependency_order_is_preserved() {
        let ws = TempDir::new().unwrap();
        write_package(
            ws.path(),
            "a",
            r#"{"name": "a", "dependencies": {"z": "1", "b": "1", "m": "1"}}"#,
        );

        let index = PackageIndex::scan(ws.path()).unwrap();
        let names: Vec<&str> =
            index.get("a").unwrap().dependencies.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["z", "b", "m"]);
    }
}
