//! Cross-platform utilities.
//!
//! Currently just filesystem helpers; see [`fs`].

pub mod fs;
