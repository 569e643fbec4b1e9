//! Naming Module for the Component Auto-Import Engine
//!
//! Derives the canonical component name from a file path. All functions
//! here are pure; case normalization (`pascal_case`) is applied by the
//! caller on the returned name.

use std::collections::HashMap;

use crate::options::ResolvedOptions;

/// Normalize path separators to forward slashes.
pub fn slash(path: &str) -> String {
    path.replace('\\', "/")
}

fn is_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    path.starts_with('/')
        || (bytes.len() >= 2 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic())
}

/// Lexically resolve `path` against `root`. Already-absolute paths are
/// returned slashed and otherwise untouched.
pub fn resolve_path(root: &str, path: &str) -> String {
    let path = slash(path);
    if is_absolute(&path) {
        return path;
    }
    let root = slash(root);
    let root = root.trim_end_matches('/');
    let path = path.strip_prefix("./").unwrap_or(&path);
    format!("{}/{}", root, path)
}

/// Split a module id into its path part and query map
/// (`/a/b.vue?vue&type=style` style ids from the host pipeline).
pub fn parse_id(id: &str) -> (String, HashMap<String, String>) {
    match id.find('?') {
        None => (id.to_string(), HashMap::new()),
        Some(index) => {
            let mut query = HashMap::new();
            for pair in id[index + 1..].split('&') {
                if pair.is_empty() {
                    continue;
                }
                match pair.split_once('=') {
                    Some((k, v)) => query.insert(k.to_string(), v.to_string()),
                    None => query.insert(pair.to_string(), String::new()),
                };
            }
            (id[..index].to_string(), query)
        }
    }
}

/// Camel-case hyphen-separated tokens: `foo-bar` -> `fooBar`.
pub fn camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            match chars.peek() {
                Some(&next) if next.is_ascii_alphanumeric() || next == '_' => {
                    out.extend(next.to_uppercase());
                    chars.next();
                }
                _ => out.push('-'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

pub fn pascal_case(s: &str) -> String {
    capitalize(&camel_case(s))
}

/// Split a slashed path into (directory, file stem). The stem keeps a
/// leading dot but drops the last extension, matching the host pipeline's
/// path parsing.
fn split_dir_and_stem(path: &str) -> (&str, &str) {
    let (dir, file) = match path.rfind('/') {
        Some(i) => (&path[..i], &path[i + 1..]),
        None => ("", path),
    };
    let stem = match file.rfind('.') {
        Some(i) if i > 0 => &file[..i],
        _ => file,
    };
    (dir, stem)
}

/// Derive the raw (pre-PascalCase) component name for a file path.
///
/// The containing directory is stripped of the longest matching configured
/// component dir; when none matches (e.g. with the `globs` option), the
/// project root is stripped instead. `index` files take their parent
/// folder's name unless directories contribute namespaces.
pub fn get_name_from_file_path(file_path: &str, options: &ResolvedOptions) -> String {
    let slashed = slash(file_path);
    let (dir, stem) = split_dir_and_stem(&slashed);

    let root_stripped = || {
        dir.strip_prefix(options.root.as_str())
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or("")
    };

    let mut best_match: Option<&str> = None;
    let mut best_len = 0;
    for resolved_dir in &options.resolved_dirs {
        if dir.starts_with(resolved_dir.as_str()) && resolved_dir.len() > best_len {
            best_len = resolved_dir.len();
            best_match = Some(&dir[resolved_dir.len()..]);
        }
    }
    let stripped_path = match best_match {
        Some(stripped) => stripped,
        None => root_stripped(),
    };

    let mut folders: Vec<String> = stripped_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
        .collect();

    // An index file is named after its parent directory.
    if stem == "index" && !options.directory_as_namespace {
        if folders.is_empty() {
            folders = root_stripped()
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(|segment| segment.to_string())
                .collect();
        }
        return folders.last().cloned().unwrap_or_else(|| stem.to_string());
    }

    if options.directory_as_namespace {
        folders.retain(|folder| !options.global_namespaces.contains(folder));
        for folder in folders.iter_mut() {
            folder.retain(|c| c.is_ascii_alphanumeric() || c == '-');
        }
        let filename = if stem.eq_ignore_ascii_case("index") {
            String::new()
        } else {
            stem.to_string()
        };
        if folders.is_empty() {
            return filename;
        }

        let mut namespaced: Vec<String> = folders;
        namespaced.push(filename);
        if options.collapse_same_prefixes {
            let mut collapsed: Vec<String> = Vec::new();
            for segment in namespaced {
                let joined: String = collapsed.concat();
                if !joined.is_empty()
                    && segment.len() >= joined.len()
                    && segment.is_char_boundary(joined.len())
                    && segment[..joined.len()].eq_ignore_ascii_case(&joined)
                {
                    collapsed.push(segment[joined.len()..].to_string());
                } else {
                    collapsed.push(segment);
                }
            }
            namespaced = collapsed;
        }
        return namespaced
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("-");
    }

    stem.to_string()
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
