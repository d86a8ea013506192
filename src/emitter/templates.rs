//! Fixed boilerplate for the generated build file.
//!
//! The preamble is constant text: a generated-file banner, the rule load,
//! public visibility, and two catch-all file groups over the whole tree,
//! one matching everything and one restricted to the extensions that
//! usually matter at build time. Per-package targets are appended after
//! this.

/// Everything the generated file starts with, up to the first per-package
/// target.
pub const BUILD_FILE_HEADER: &str = r#"# GENERATED FILE, DO NOT EDIT.
# Regenerate with `nbgen` after changing installed packages.

load("@build_bazel_rules_nodejs//:defs.bzl", "nodejs_binary")

package(default_visibility = ["//visibility:public"])

# All files in the dependency tree.
filegroup(
    name = "node_modules",
    srcs = glob(
        include = ["**/*"],
        exclude = [
            "**/* *",
            "**/* */**",
        ],
    ),
)

# Source-like files only; cheaper to depend on when assets are not needed.
filegroup(
    name = "node_modules_sources",
    srcs = glob(
        include = [
            "**/*.js",
            "**/*.mjs",
            "**/*.cjs",
            "**/*.jsx",
            "**/*.ts",
            "**/*.d.ts",
            "**/*.json",
            "**/*.map",
        ],
        exclude = [
            "**/* *",
            "**/* */**",
        ],
    ),
)
"#;
