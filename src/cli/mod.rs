//! Command-line interface for nbgen.
//!
//! A single-purpose tool, so no subcommands: `nbgen [ROOT]` scans
//! `<ROOT>/node_modules`, generates the build file, and writes it
//! atomically. `--dry-run` prints the document instead; `--verbose` and
//! `RUST_LOG` control tracing output on stderr.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::constants::{DEFAULT_OUTPUT_FILE, EXTRA_CONTENTS_FILE};
use crate::generator;
use crate::utils::fs::atomic_write;

/// Generate Bazel build targets from an installed node_modules tree.
#[derive(Parser, Debug)]
#[command(name = "nbgen", version, about, long_about = None)]
pub struct Cli {
    /// Workspace directory containing the node_modules tree.
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,

    /// Where to write the generated build file [default: <ROOT>/BUILD.bazel].
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// File appended verbatim after the generated targets, if it exists
    /// [default: <ROOT>/BUILD.extra].
    #[arg(long, value_name = "PATH")]
    extra_contents: Option<PathBuf>,

    /// Print the generated document to stdout instead of writing it.
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging. `RUST_LOG` takes precedence when set.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress the success summary.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Runs the tool to completion.
    pub fn execute(self) -> Result<()> {
        self.init_logging();

        let output = self.output.clone().unwrap_or_else(|| self.root.join(DEFAULT_OUTPUT_FILE));
        let extra =
            self.extra_contents.clone().unwrap_or_else(|| self.root.join(EXTRA_CONTENTS_FILE));

        let report = generator::generate(&self.root, &extra)?;

        if self.dry_run {
            print!("{}", report.document);
            return Ok(());
        }

        atomic_write(&output, report.document.as_bytes())?;

        if !self.quiet {
            println!(
                "{} wrote {} ({} targets from {} packages)",
                "✓".green().bold(),
                output.display(),
                report.target_count,
                report.package_count,
            );
        }

        Ok(())
    }

    /// Sets up tracing output on stderr. Quiet by default; `--verbose`
    /// lowers the threshold to debug and `RUST_LOG` overrides both.
    fn init_logging(&self) {
        let default_filter = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["nbgen"]);
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.output.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_explicit_paths() {
        let cli = Cli::parse_from([
            "nbgen",
            "workspace",
            "--output",
            "out/BUILD.bazel",
            "--extra-contents",
            "overrides.bzl",
        ]);
        assert_eq!(cli.root, PathBuf::from("workspace"));
        assert_eq!(cli.output, Some(PathBuf::from("out/BUILD.bazel")));
        assert_eq!(cli.extra_contents, Some(PathBuf::from("overrides.bzl")));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["nbgen", "-v", "-q"]).is_err());
    }
}
