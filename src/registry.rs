//! Registry Module for the Component Auto-Import Engine
//!
//! Maps canonical PascalCase component names to import descriptors. A
//! registry is an immutable snapshot: every discovery pass builds a fresh
//! one from the enumerated paths and the owner swaps it in whole, so
//! deletions and renames never leave stale entries behind.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::name::{get_name_from_file_path, pascal_case, slash};
use crate::options::ResolvedOptions;

/// A single import rendered alongside a component import
/// (`import '...'` side effects, or an extra named/default binding).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportInfo {
    /// Bare module path: `import 'path'`.
    Bare(String),
    Spec {
        #[serde(rename = "as")]
        as_name: Option<String>,
        from: String,
        /// Named export to bind; `None` imports the default export.
        name: Option<String>,
    },
}

/// Import descriptor for one discovered component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfo {
    /// Canonical PascalCase name; also the registry key.
    pub name: String,
    /// Absolute, slashed source path.
    pub from: String,
    /// Named export to import; `None` means the default export.
    pub export_name: Option<String>,
    /// Bare imports emitted right after the component import.
    pub side_effects: Vec<ImportInfo>,
}

/// Snapshot of all discovered components, keyed by canonical name.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    name_map: HashMap<String, ComponentInfo>,
}

impl ComponentRegistry {
    /// Build a registry from a freshly enumerated path set. Two paths
    /// resolving to the same canonical name are not a conflict: the last
    /// one in enumeration order wins.
    pub fn rebuild(paths: &[String], options: &ResolvedOptions) -> Self {
        let mut name_map = HashMap::new();
        for path in paths {
            let name = pascal_case(&get_name_from_file_path(path, options));
            let info = ComponentInfo {
                name: name.clone(),
                from: slash(path),
                export_name: None,
                side_effects: Vec::new(),
            };
            if let Some(previous) = name_map.insert(name, info) {
                eprintln!(
                    "[ComponentsNative] duplicate component name {}: {} overrides {}",
                    previous.name, path, previous.from
                );
            }
        }
        ComponentRegistry { name_map }
    }

    pub fn find(&self, name: &str) -> Option<&ComponentInfo> {
        self.name_map.get(name)
    }

    /// Registered canonical names, sorted for deterministic output.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.name_map.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.name_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_map.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
