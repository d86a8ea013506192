//! Error handling for nbgen.
//!
//! Two layers, mirroring the split between code that needs to match on
//! failure modes and a CLI that needs to explain them:
//! - [`NbgenError`] - strongly-typed error variants for every failure mode
//! - [`ErrorContext`] - wrapper adding a suggestion and details for display
//!
//! Common conversions happen automatically:
//! - [`std::io::Error`] → [`NbgenError::IoError`]
//!
//! Generation is all-or-nothing: every fatal variant is raised before any
//! output is written, so a failed run never leaves a partial build file
//! behind. Use [`user_friendly_error`] at the CLI boundary to turn any
//! `anyhow::Error` into a colored report with actionable suggestions.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for nbgen operations.
///
/// Each variant carries the context needed to point the user at the
/// offending package directory rather than a bare message.
#[derive(Error, Debug)]
pub enum NbgenError {
    /// A `package.json` exists but could not be read or parsed.
    ///
    /// Fatal: a package with unreadable metadata poisons every closure that
    /// might reach it, so the run aborts immediately.
    #[error("invalid package.json in `{dir}`: {reason}")]
    ManifestParseError {
        /// Directory of the offending package, relative to `node_modules`.
        dir: String,
        /// Parser or I/O detail.
        reason: String,
    },

    /// A required dependency could not be resolved to any package in the
    /// tree, neither nested under an ancestor nor hoisted to the root.
    #[error("could not find package `{name}` required by `{required_by}`")]
    DependencyNotFound {
        /// The declared dependency name that failed to resolve.
        name: String,
        /// Directory of the package declaring the dependency.
        required_by: String,
    },

    /// General filesystem failure with operation context.
    #[error("file system error during {operation}: {path}")]
    FileSystemError {
        /// The operation being performed (e.g. "directory listing").
        operation: String,
        /// The path involved.
        path: String,
    },

    /// Standard I/O error wrapper.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON syntax error wrapper, used when no package directory is known.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Catch-all for errors without a specific variant.
    #[error("{message}")]
    Other {
        /// The error description.
        message: String,
    },
}

/// Wrapper adding a user-facing suggestion and details to an [`NbgenError`].
///
/// Displayed with color coding on stderr: the error in red, details in
/// yellow, the suggestion in green.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error.
    pub error: NbgenError,
    /// Optional actionable suggestion.
    pub suggestion: Option<String>,
    /// Optional additional detail about why the error occurred.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a bare context with no suggestion or details.
    pub fn new(error: NbgenError) -> Self {
        Self { error, suggestion: None, details: None }
    }

    /// Attach a resolution suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach additional detail.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details, and suggestion to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Recognizes [`NbgenError`] variants and raw [`std::io::Error`]s and maps
/// them to tailored suggestions; anything else becomes a generic context
/// carrying the full error chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(nbgen_error) = error.downcast_ref::<NbgenError>() {
        return create_error_context(nbgen_error);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(NbgenError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership or re-run with elevated permissions")
                .with_details("nbgen lacked permission to read or write a file");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(NbgenError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the workspace path exists and is spelled correctly");
            }
            _ => {}
        }
    }

    // Generic error: include the full chain for diagnostics.
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(NbgenError::Other { message })
}

/// Map each [`NbgenError`] variant to a context with tailored suggestions.
fn create_error_context(error: &NbgenError) -> ErrorContext {
    match error {
        NbgenError::ManifestParseError { dir, reason } => {
            ErrorContext::new(NbgenError::ManifestParseError {
                dir: dir.clone(),
                reason: reason.clone(),
            })
            .with_suggestion(format!(
                "Inspect node_modules/{dir}/package.json for syntax errors, or reinstall \
                 the package"
            ))
            .with_details("Every installed package must carry a parseable package.json")
        }
        NbgenError::DependencyNotFound { name, required_by } => {
            ErrorContext::new(NbgenError::DependencyNotFound {
                name: name.clone(),
                required_by: required_by.clone(),
            })
            .with_suggestion(
                "Run your package manager's install step so the tree on disk matches the \
                 declared dependencies",
            )
            .with_details(format!(
                "`{required_by}` declares `{name}` as a required dependency, but no package \
                 by that name exists nested under an ancestor or hoisted to the root"
            ))
        }
        NbgenError::FileSystemError { operation, path } => {
            ErrorContext::new(NbgenError::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            })
            .with_suggestion("Check the path exists and is accessible")
        }
        NbgenError::IoError(e) => ErrorContext::new(NbgenError::Other {
            message: format!("IO error: {e}"),
        }),
        NbgenError::JsonError(e) => ErrorContext::new(NbgenError::Other {
            message: format!("JSON error: {e}"),
        }),
        NbgenError::Other { message } => {
            ErrorContext::new(NbgenError::Other { message: message.clone() })
        }
    }
}
