//! Options Module for the Component Auto-Import Engine
//!
//! Raw plugin options as received from the host build pipeline, and their
//! resolved form used by discovery, naming and transform.

use serde::Deserialize;
use std::sync::Arc;

use crate::name::{resolve_path, slash};

/// Hook applied to a component path before it is rendered into an import
/// statement. Returning `None` keeps the original path.
pub type ImportPathTransform = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Compiler convention used to locate component usage sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transformer {
    /// Current compiler output: `_resolveComponent("Name")` markers.
    #[default]
    Vue3,
    /// Legacy compiler output: `h("name", ...)` / `_c("name", ...)` calls.
    Vue2,
}

/// One-or-many fields on the JSON surface (`dirs: "src/ui"` and
/// `dirs: ["src/ui"]` are both accepted).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }
}

fn to_array<T>(value: Option<OneOrMany<T>>) -> Option<Vec<T>> {
    value.map(OneOrMany::into_vec)
}

/// Declaration-file option: `true` for the default location, or a path.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DtsOption {
    Enabled(bool),
    Path(String),
}

/// Raw options as supplied by the host.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Relative paths to the directories to search for components.
    pub dirs: Option<OneOrMany<String>>,
    /// Valid file extensions for components.
    pub extensions: Option<OneOrMany<String>>,
    /// Glob patterns matching component files. When set, `dirs`,
    /// `extensions` and `deep` are ignored.
    pub globs: Option<OneOrMany<String>>,
    /// Search subdirectories.
    pub deep: Option<bool>,
    /// Allow subdirectories as namespace prefixes for component names.
    pub directory_as_namespace: Option<bool>,
    /// Subdirectory names excluded from namespace prefixes.
    /// Works when `directoryAsNamespace` is enabled.
    pub global_namespaces: Option<Vec<String>>,
    /// Collapse same prefixes (case-insensitive) of folders and components
    /// to prevent duplication inside a namespaced name.
    pub collapse_same_prefixes: Option<bool>,
    /// Usage-site convention to scan for.
    pub transformer: Option<Transformer>,
    /// Declaration file emission target.
    pub dts: Option<DtsOption>,
    /// Custom transform over the path used in emitted imports. Not part of
    /// the JSON surface; set it from Rust callers.
    #[serde(skip)]
    pub import_path_transform: Option<ImportPathTransform>,
}

/// Options after defaults and root resolution have been applied.
#[derive(Clone)]
pub struct ResolvedOptions {
    pub dirs: Vec<String>,
    pub extensions: Vec<String>,
    pub globs: Option<Vec<String>>,
    pub deep: bool,
    pub directory_as_namespace: bool,
    pub global_namespaces: Vec<String>,
    pub collapse_same_prefixes: bool,
    pub transformer: Transformer,
    pub import_path_transform: Option<ImportPathTransform>,
    /// `dirs` resolved against `root`, slashed.
    pub resolved_dirs: Vec<String>,
    /// Declaration file path resolved against `root`, when enabled.
    pub dts: Option<String>,
    pub root: String,
}

/// Apply defaults and resolve paths against the project root.
pub fn resolve_options(raw: &Options, root: &str) -> ResolvedOptions {
    let root = slash(root);
    let dirs = to_array(raw.dirs.clone())
        .unwrap_or_else(|| vec!["src/components".to_string()]);
    let extensions =
        to_array(raw.extensions.clone()).unwrap_or_else(|| vec!["vue".to_string()]);
    let globs = to_array(raw.globs.clone())
        .map(|globs| globs.iter().map(|g| resolve_path(&root, g)).collect());
    let resolved_dirs = dirs.iter().map(|d| resolve_path(&root, d)).collect();

    let dts = match &raw.dts {
        None | Some(DtsOption::Enabled(false)) => None,
        Some(DtsOption::Enabled(true)) => Some(resolve_path(&root, "components.d.ts")),
        Some(DtsOption::Path(p)) => Some(resolve_path(&root, p)),
    };

    ResolvedOptions {
        dirs,
        extensions,
        globs,
        deep: raw.deep.unwrap_or(true),
        directory_as_namespace: raw.directory_as_namespace.unwrap_or(false),
        global_namespaces: raw.global_namespaces.clone().unwrap_or_default(),
        collapse_same_prefixes: raw.collapse_same_prefixes.unwrap_or(false),
        transformer: raw.transformer.unwrap_or_default(),
        import_path_transform: raw.import_path_transform.clone(),
        resolved_dirs,
        dts,
        root,
    }
}

/// Errors surfaced before any scan occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No `extensions` and no `globs`: there is nothing to search for.
    MissingExtensions,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingExtensions => write!(
                f,
                "`extensions` option is required to search for components"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let resolved = resolve_options(&Options::default(), "/proj");
        assert_eq!(resolved.dirs, vec!["src/components"]);
        assert_eq!(resolved.extensions, vec!["vue"]);
        assert!(resolved.deep);
        assert!(!resolved.directory_as_namespace);
        assert_eq!(resolved.transformer, Transformer::Vue3);
        assert_eq!(resolved.resolved_dirs, vec!["/proj/src/components"]);
        assert!(resolved.dts.is_none());
    }

    #[test]
    fn test_arrayable_fields_from_json() {
        let raw: Options = serde_json::from_str(
            r#"{ "dirs": "src/ui", "extensions": ["vue", "ts"], "deep": false }"#,
        )
        .unwrap();
        let resolved = resolve_options(&raw, "/proj");
        assert_eq!(resolved.dirs, vec!["src/ui"]);
        assert_eq!(resolved.extensions, vec!["vue", "ts"]);
        assert!(!resolved.deep);
    }

    #[test]
    fn test_transformer_from_json() {
        let raw: Options = serde_json::from_str(r#"{ "transformer": "vue2" }"#).unwrap();
        assert_eq!(resolve_options(&raw, "/p").transformer, Transformer::Vue2);
    }

    #[test]
    fn test_dts_resolution() {
        let raw: Options = serde_json::from_str(r#"{ "dts": true }"#).unwrap();
        assert_eq!(
            resolve_options(&raw, "/proj").dts.as_deref(),
            Some("/proj/components.d.ts")
        );

        let raw: Options = serde_json::from_str(r#"{ "dts": "types/ui.d.ts" }"#).unwrap();
        assert_eq!(
            resolve_options(&raw, "/proj").dts.as_deref(),
            Some("/proj/types/ui.d.ts")
        );

        let raw: Options = serde_json::from_str(r#"{ "dts": false }"#).unwrap();
        assert!(resolve_options(&raw, "/proj").dts.is_none());
    }

    #[test]
    fn test_globs_resolved_against_root() {
        let raw: Options =
            serde_json::from_str(r#"{ "globs": "widgets/**/*.vue" }"#).unwrap();
        let resolved = resolve_options(&raw, "/proj");
        assert_eq!(
            resolved.globs,
            Some(vec!["/proj/widgets/**/*.vue".to_string()])
        );
    }
}
