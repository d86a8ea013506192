//! Fixed names and markers used throughout nbgen.
//!
//! These mirror npm's on-disk conventions: the dependency-tree directory
//! name, the per-package metadata file, and the scope marker. Defining them
//! centrally keeps the walk and resolution code free of string literals.

/// Directory name npm uses for an installed dependency tree, at the root
/// and nested inside individual packages.
pub const NODE_MODULES_DIR: &str = "node_modules";

/// Per-package metadata file. A directory is a package iff it directly
/// contains a parseable file with this name.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// Prefix marking a scope (namespace) directory, e.g. `@babel`.
pub const SCOPE_MARKER: char = '@';

/// Default name of the generated build file, relative to the workspace root.
pub const DEFAULT_OUTPUT_FILE: &str = "BUILD.bazel";

/// Optional user-supplied fragment appended verbatim to the generated file.
/// Looked up next to `node_modules`; absence is not an error.
pub const EXTRA_CONTENTS_FILE: &str = "BUILD.extra";

/// Suffix of the per-package file-group target exposing a package's files.
pub const FILES_SUFFIX: &str = "__files";

/// Suffix of the per-package file-group target restricted to type
/// declarations.
pub const TYPINGS_SUFFIX: &str = "__typings";

/// Tag applied to every generated per-package file group so downstream
/// tooling can distinguish generated targets from hand-written ones.
pub const NODE_MODULE_TAG: &str = "node_module";
