//! Transform Module for the Component Auto-Import Engine
//!
//! Locates component usage sites in compiled template output and rewrites
//! the unit: one import statement prepended per resolved site, the usage
//! site spliced to reference the injected local binding. Unresolved names
//! are left byte-identical; the engine is additive, never destructive.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::name::pascal_case;
use crate::options::{ImportPathTransform, Transformer};
use crate::registry::{ComponentInfo, ComponentRegistry, ImportInfo};
use crate::splice::{SourceMap, SpliceBuffer};

lazy_static! {
    /// Current compiler convention: `_resolveComponent("Name")` markers.
    static ref RESOLVE_COMPONENT_RE: Regex =
        Regex::new(r#"_resolveComponent\("(.+?)"\)"#).unwrap();
    /// Legacy convention: the component literal in `h(...)`/`_c(...)`
    /// render calls. `regex` has no backreferences, so both quote styles
    /// are spelled out.
    static ref LEGACY_RENDER_CALL_RE: Regex =
        Regex::new(r#"\b(?:_c|h)\(\s*(?:"([^"\\]+)"|'([^'\\]+)')"#).unwrap();
}

/// One component reference eligible for import injection. The byte range
/// is against the original source text and is what gets spliced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageSite {
    pub raw_name: String,
    pub start: usize,
    pub end: usize,
}

/// Scan current-convention compiled output. Names with a leading
/// underscore denote already-resolved built-ins and are skipped. Sites
/// come back in left-to-right source order.
pub fn scan_vue3(code: &str) -> Vec<UsageSite> {
    RESOLVE_COMPONENT_RE
        .captures_iter(code)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str();
            if name.starts_with('_') {
                return None;
            }
            Some(UsageSite {
                raw_name: name.to_string(),
                start: whole.start(),
                end: whole.end(),
            })
        })
        .collect()
}

/// Scan legacy-convention compiled output. The byte range covers the
/// quoted literal, quotes included.
pub fn scan_vue2(code: &str) -> Vec<UsageSite> {
    LEGACY_RENDER_CALL_RE
        .captures_iter(code)
        .filter_map(|caps| {
            let literal = caps.get(1).or_else(|| caps.get(2))?;
            Some(UsageSite {
                raw_name: literal.as_str().to_string(),
                start: literal.start() - 1,
                end: literal.end() + 1,
            })
        })
        .collect()
}

/// Dialect dispatch, selected once from configuration.
pub fn scan(code: &str, transformer: Transformer) -> Vec<UsageSite> {
    match transformer {
        Transformer::Vue3 => scan_vue3(code),
        Transformer::Vue2 => scan_vue2(code),
    }
}

/// Rewritten source plus its map, handed back to the host pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformResult {
    pub code: String,
    pub map: SourceMap,
}

/// Apply the configured path hook; `None` from the hook keeps the path.
pub fn get_transformed_path(path: &str, hook: Option<&ImportPathTransform>) -> String {
    match hook {
        Some(hook) => hook(path).unwrap_or_else(|| path.to_string()),
        None => path.to_string(),
    }
}

fn stringify_import(as_name: Option<&str>, from: &str, name: Option<&str>) -> String {
    match (as_name, name) {
        (None, _) => format!("import '{}'", from),
        (Some(a), Some(n)) => format!("import {{ {} as {} }} from '{}'", n, a, from),
        (Some(a), None) => format!("import {} from '{}'", a, from),
    }
}

fn stringify_import_info(info: &ImportInfo) -> String {
    match info {
        ImportInfo::Bare(from) => stringify_import(None, from, None),
        ImportInfo::Spec {
            as_name,
            from,
            name,
        } => stringify_import(as_name.as_deref(), from, name.as_deref()),
    }
}

/// Render the import statement(s) binding `component` to `as_name`:
/// the component import itself, then any side-effect imports.
pub fn stringify_component_import(
    component: &ComponentInfo,
    as_name: &str,
    hook: Option<&ImportPathTransform>,
) -> String {
    let path = get_transformed_path(&component.from, hook);
    let mut imports = vec![stringify_import(
        Some(as_name),
        &path,
        component.export_name.as_deref(),
    )];
    for side_effect in &component.side_effects {
        imports.push(stringify_import_info(side_effect));
    }
    imports.join(";")
}

/// Rewrite one source unit against a registry snapshot. Bindings are
/// allocated per pass (`components_0`, `components_1`, ...) independent of
/// the canonical names, so they cannot clash with identifiers already in
/// the file. Identical input and registry state produce byte-identical
/// output.
pub fn rewrite(
    code: &str,
    sites: &[UsageSite],
    registry: &ComponentRegistry,
    hook: Option<&ImportPathTransform>,
    source_name: &str,
) -> TransformResult {
    let mut s = SpliceBuffer::new(code);
    let mut counter = 0;
    for site in sites {
        let name = pascal_case(&site.raw_name);
        if let Some(component) = registry.find(&name) {
            let binding = format!("components_{}", counter);
            counter += 1;
            s.prepend(format!(
                "{};\n",
                stringify_component_import(component, &binding, hook)
            ));
            s.overwrite(site.start, site.end, binding);
        }
    }
    TransformResult {
        code: s.to_string(),
        map: s.generate_map(source_name, true),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
