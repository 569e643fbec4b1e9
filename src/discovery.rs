//! Discovery Module for the Component Auto-Import Engine
//!
//! Plans the glob patterns derived from configuration, enumerates the
//! matching component files, and filters filesystem watch events so only
//! qualifying paths trigger a rescan.

use glob::{MatchOptions, Pattern};

use crate::name::slash;
use crate::options::{ConfigError, ResolvedOptions};

/// Errors from glob planning or filesystem enumeration. Enumeration
/// failures propagate to the caller untouched; the engine never retries.
#[derive(Debug)]
pub enum DiscoveryError {
    Config(ConfigError),
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },
    Read(glob::GlobError),
}

impl std::fmt::Display for DiscoveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{}", e),
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid glob pattern '{}': {}", pattern, source)
            }
            Self::Read(e) => write!(f, "failed to read component path: {}", e),
        }
    }
}

impl std::error::Error for DiscoveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::InvalidPattern { source, .. } => Some(source),
            Self::Read(e) => Some(e),
        }
    }
}

impl From<ConfigError> for DiscoveryError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Derive the absolute glob patterns to search. Explicit `globs` win over
/// `dirs`/`extensions`; without them one pattern is emitted per configured
/// directory.
pub fn resolve_globs(options: &ResolvedOptions) -> Result<Vec<String>, ConfigError> {
    if let Some(globs) = &options.globs {
        // Already resolved against the root during option resolution.
        return Ok(globs.clone());
    }
    if options.extensions.is_empty() {
        return Err(ConfigError::MissingExtensions);
    }
    let ext_glob = if options.extensions.len() == 1 {
        options.extensions[0].clone()
    } else {
        format!("{{{}}}", options.extensions.join(","))
    };
    Ok(options
        .resolved_dirs
        .iter()
        .map(|dir| {
            if options.deep {
                format!("{}/**/*.{}", dir, ext_glob)
            } else {
                format!("{}/*.{}", dir, ext_glob)
            }
        })
        .collect())
}

/// Expand `{a,b}` alternations; the `glob` crate has no brace support.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    if let Some(open) = pattern.find('{') {
        if let Some(close) = pattern[open..].find('}').map(|i| open + i) {
            let prefix = &pattern[..open];
            let suffix = &pattern[close + 1..];
            let mut expanded = Vec::new();
            for alt in pattern[open + 1..close].split(',') {
                expanded.extend(expand_braces(&format!("{}{}{}", prefix, alt, suffix)));
            }
            return expanded;
        }
    }
    vec![pattern.to_string()]
}

/// Enumerate all files matching the planned globs. Returns absolute
/// slashed paths, sorted and deduplicated so enumeration order is
/// deterministic across passes. `node_modules` is never searched.
pub fn search_component_files(globs: &[String]) -> Result<Vec<String>, DiscoveryError> {
    let mut files = Vec::new();
    for pattern in globs {
        for expanded in expand_braces(pattern) {
            let entries =
                glob::glob(&expanded).map_err(|source| DiscoveryError::InvalidPattern {
                    pattern: expanded.clone(),
                    source,
                })?;
            for entry in entries {
                let path = entry.map_err(DiscoveryError::Read)?;
                if !path.is_file() {
                    continue;
                }
                let slashed = slash(&path.to_string_lossy());
                if slashed.contains("/node_modules/") {
                    continue;
                }
                files.push(slashed);
            }
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Test a watch-event path against the planned globs. Unparseable
/// patterns simply do not match.
pub fn matches_any_glob(path: &str, globs: &[String]) -> bool {
    let slashed = slash(path);
    let match_options = MatchOptions {
        // `*` must not cross separators, so shallow patterns stay shallow.
        require_literal_separator: true,
        ..MatchOptions::new()
    };
    globs.iter().flat_map(|g| expand_braces(g)).any(|pattern| {
        Pattern::new(&pattern)
            .map(|p| p.matches_with(&slashed, match_options))
            .unwrap_or(false)
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
