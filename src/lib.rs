//! nbgen - Bazel build-target generation for installed node_modules trees.
//!
//! Inspects the `node_modules` directory a package manager left behind and
//! emits a build file exposing every package's files - and its
//! transitively required files - as addressable targets, plus wrapper
//! targets for each package's declared executables. The tree is trusted as
//! already resolved: nbgen maps it, it never evaluates version ranges.
//!
//! # Pipeline
//!
//! One synchronous pass: [`index`] walks the tree and parses each
//! `package.json` into package records; [`resolver`] computes every
//! package's transitive dependency closure with nearest-ancestor lookup
//! (so privately nested copies shadow root-hoisted packages, matching
//! npm's own resolution); [`targets`] turns resolved records into abstract
//! target descriptors; [`emitter`] renders them to Starlark text.
//! [`generator`] ties the stages together and output is written atomically,
//! so a failed run never leaves a partial build file.
//!
//! # Core Modules
//!
//! - [`index`] - package discovery and `package.json` parsing
//! - [`resolver`] - transitive closure computation, hoisting-aware
//! - [`targets`] - target descriptor construction
//! - [`emitter`] - Starlark rendering and boilerplate templates
//!
//! # Supporting Modules
//!
//! - [`cli`] - command-line interface
//! - [`core`] - error types and user-facing error reporting
//! - [`generator`] - the end-to-end pipeline
//! - [`constants`] - fixed names (`node_modules`, `package.json`, ...)
//! - [`utils`] - filesystem helpers
//!
//! # Usage
//!
//! ```bash
//! # Generate <workspace>/BUILD.bazel from <workspace>/node_modules
//! nbgen path/to/workspace
//!
//! # Inspect the output without writing it
//! nbgen path/to/workspace --dry-run
//! ```

// Core pipeline stages
pub mod emitter;
pub mod index;
pub mod resolver;
pub mod targets;

// Supporting modules
pub mod cli;
pub mod constants;
pub mod core;
pub mod generator;
pub mod utils;
