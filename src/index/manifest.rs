//! Deserialization of `package.json` metadata.
//!
//! Only the fields the generator consumes are modeled. Dependency maps keep
//! their declared key order (serde_json's `preserve_order` feature), which
//! downstream resolution relies on for byte-identical output across runs.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::utils::fs::normalize_entry_path;

/// The subset of `package.json` nbgen reads.
///
/// Version ranges are carried as opaque strings and never evaluated; the
/// tree on disk is trusted as already resolved.
#[derive(Debug, Deserialize)]
pub struct PackageManifest {
    /// Declared package name, informational.
    pub name: Option<String>,

    /// Declared version, informational.
    pub version: Option<String>,

    /// Required runtime dependencies, name → range.
    #[serde(default)]
    pub dependencies: Map<String, Value>,

    /// Required peer dependencies, name → range.
    #[serde(default, rename = "peerDependencies")]
    pub peer_dependencies: Map<String, Value>,

    /// Optional dependencies, name → range. Missing ones are skipped
    /// silently instead of failing resolution.
    #[serde(default, rename = "optionalDependencies")]
    pub optional_dependencies: Map<String, Value>,

    /// Declared executables: a bare path string, or a name → path object.
    /// Any other shape (npm tolerates arrays here) counts as no
    /// executables.
    pub bin: Option<Value>,
}

impl PackageManifest {
    /// Flattens a dependency map into ordered `(name, range)` pairs.
    ///
    /// Range values that are not strings (seen in the wild with malformed
    /// manifests) are stringified rather than rejected; the range is never
    /// interpreted anyway.
    pub fn dependency_pairs(map: &Map<String, Value>) -> Vec<(String, String)> {
        map.iter()
            .map(|(name, range)| {
                let range = match range.as_str() {
                    Some(s) => s.to_string(),
                    None => range.to_string(),
                };
                (name.clone(), range)
            })
            .collect()
    }

    /// Normalizes the `bin` field into ordered `(name, entry path)` pairs.
    ///
    /// A string form maps the package's own name to that path; an object
    /// form maps each key. Paths get backslashes flattened to `/` and a
    /// leading `./` stripped. A list-typed `bin` is treated as absent.
    pub fn executables(&self, fallback_name: &str) -> Vec<(String, String)> {
        let own_name = self.name.as_deref().unwrap_or(fallback_name);

        match &self.bin {
            Some(Value::String(path)) => {
                vec![(own_name.to_string(), normalize_entry_path(path))]
            }
            Some(Value::Object(map)) => map
                .iter()
                .filter_map(|(bin_name, path)| {
                    path.as_str().map(|p| (bin_name.clone(), normalize_entry_path(p)))
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
