//! Target descriptors derived from resolved packages.
//!
//! Converts the resolved [`PackageIndex`] into an abstract list of build
//! targets; rendering them to text is the emitter's job. Per non-nested
//! package:
//!
//! - an aggregate file group named after the package `dir`, listing the
//!   package's own files target plus the files targets of every non-nested
//!   record in its transitive closure (nested copies already live inside
//!   their owner's file set on disk, so listing them would double-count);
//! - a files group `<dir>__files` matching everything under the package;
//! - a typings group `<dir>__typings` restricted to `.d.ts` files;
//! - one executable wrapper per `bin` entry, depending on the aggregate.
//!
//! Each scope gets an aggregate group listing the aggregates of the
//! non-nested root packages under it.
//!
//! All lists keep the order of the input index and closures; nothing is
//! re-sorted, so regenerated output diffs stay minimal.
//!
//! File groups exclude `test`/`tests`/`docs` sub-trees and any path with a
//! space in a segment. The space rule is a heuristic, not full label
//! validation: spaces are the one character that actually occurs in
//! shipped npm packages and is unrepresentable in a target label.

use tracing::debug;

use crate::constants::{FILES_SUFFIX, NODE_MODULE_TAG, TYPINGS_SUFFIX};
use crate::index::{PackageIndex, PackageRecord};

/// Inputs of a file group: either glob patterns over the tree or
/// references to other targets by label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileGroupInputs {
    /// Match files on disk.
    Glob {
        /// Include patterns.
        include: Vec<String>,
        /// Exclude patterns.
        exclude: Vec<String>,
    },
    /// Reference other targets by label.
    Targets(Vec<String>),
}

/// A named group of files or of other targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// Target name; package `dir`s are used verbatim.
    pub name: String,
    /// What the group contains.
    pub inputs: FileGroupInputs,
    /// Tags attached to the target.
    pub tags: Vec<String>,
}

/// A wrapper target exposing one declared executable of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutableWrapper {
    /// Target name, `<dir>/<bin name>`.
    pub name: String,
    /// Entry-point path, `<dir>/<normalized bin path>`.
    pub entry_point: String,
    /// Label of the package's aggregate target, made available at run
    /// time.
    pub data: String,
}

/// One generated target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A file group.
    FileGroup(FileGroup),
    /// An executable wrapper.
    ExecutableWrapper(ExecutableWrapper),
}

/// Builds the full target list for a resolved index: per-package targets
/// in index order, then one aggregate per scope.
pub fn build_targets(index: &PackageIndex) -> Vec<Target> {
    let mut targets = Vec::new();

    for pkg in index.packages().iter().filter(|p| !p.nested) {
        targets.push(aggregate_target(pkg, index));
        targets.push(files_target(pkg));
        targets.push(typings_target(pkg));

        for (bin_name, bin_path) in &pkg.executables {
            targets.push(Target::ExecutableWrapper(ExecutableWrapper {
                name: format!("{}/{}", pkg.dir, bin_name),
                entry_point: format!("{}/{}", pkg.dir, bin_path),
                data: format!(":{}", pkg.dir),
            }));
        }
    }

    for scope in index.scopes() {
        targets.push(scope_target(scope, index));
    }

    debug!("built {} targets", targets.len());
    targets
}

/// Aggregate group: the package's own files plus the files of its
/// non-nested transitive dependencies, self excluded.
fn aggregate_target(pkg: &PackageRecord, index: &PackageIndex) -> Target {
    let mut labels = vec![format!(":{}{}", pkg.dir, FILES_SUFFIX)];

    for dep_dir in &pkg.resolved {
        if dep_dir == &pkg.dir {
            continue;
        }
        let Some(dep) = index.get(dep_dir) else { continue };
        if dep.nested {
            continue;
        }
        labels.push(format!(":{}{}", dep_dir, FILES_SUFFIX));
    }

    Target::FileGroup(FileGroup {
        name: pkg.dir.clone(),
        inputs: FileGroupInputs::Targets(labels),
        tags: vec![NODE_MODULE_TAG.to_string()],
    })
}

fn files_target(pkg: &PackageRecord) -> Target {
    Target::FileGroup(FileGroup {
        name: format!("{}{}", pkg.dir, FILES_SUFFIX),
        inputs: FileGroupInputs::Glob {
            include: vec![format!("{}/**/*", pkg.dir)],
            exclude: standard_excludes(&pkg.dir),
        },
        tags: vec![NODE_MODULE_TAG.to_string()],
    })
}

fn typings_target(pkg: &PackageRecord) -> Target {
    Target::FileGroup(FileGroup {
        name: format!("{}{}", pkg.dir, TYPINGS_SUFFIX),
        inputs: FileGroupInputs::Glob {
            include: vec![format!("{}/**/*.d.ts", pkg.dir)],
            exclude: standard_excludes(&pkg.dir),
        },
        tags: vec![NODE_MODULE_TAG.to_string()],
    })
}

/// Scope aggregate: the aggregates of every non-nested root package whose
/// `dir` sits under the scope, in index order.
fn scope_target(scope: &str, index: &PackageIndex) -> Target {
    let prefix = format!("{scope}/");
    let labels = index
        .packages()
        .iter()
        .filter(|p| !p.nested && p.dir.starts_with(&prefix))
        .map(|p| format!(":{}", p.dir))
        .collect();

    Target::FileGroup(FileGroup {
        name: scope.to_string(),
        inputs: FileGroupInputs::Targets(labels),
        tags: vec![NODE_MODULE_TAG.to_string()],
    })
}

/// Exclusions applied to every per-package glob: test and doc sub-trees,
/// and paths with a space in any segment.
fn standard_excludes(dir: &str) -> Vec<String> {
    vec![
        format!("{dir}/test/**"),
        format!("{dir}/tests/**"),
        format!("{dir}/docs/**"),
        format!("{dir}/**/* *"),
        format!("{dir}/**/* */**"),
    ]
}
