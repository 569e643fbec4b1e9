//! Context Module for the Component Auto-Import Engine
//!
//! Owns the resolved options, the planned glob patterns and the current
//! registry snapshot, and orchestrates discovery and per-file transforms
//! on behalf of the host build pipeline.

use crate::discovery::{self, DiscoveryError};
use crate::name::{parse_id, slash};
use crate::options::{resolve_options, ConfigError, Options, ResolvedOptions};
use crate::registry::{ComponentInfo, ComponentRegistry};
use crate::transform::{self, TransformResult};

pub struct Context {
    raw_options: Options,
    options: ResolvedOptions,
    globs: Vec<String>,
    registry: ComponentRegistry,
}

impl Context {
    /// Create a context rooted at the current working directory. The host
    /// normally follows up with `set_root` once its config is resolved.
    pub fn new(raw_options: Options) -> Result<Self, ConfigError> {
        let root = std::env::current_dir()
            .map(|p| slash(&p.to_string_lossy()))
            .unwrap_or_else(|_| ".".to_string());
        Self::with_root(raw_options, &root)
    }

    pub fn with_root(raw_options: Options, root: &str) -> Result<Self, ConfigError> {
        let options = resolve_options(&raw_options, root);
        let globs = discovery::resolve_globs(&options)?;
        Ok(Context {
            raw_options,
            options,
            globs,
            registry: ComponentRegistry::default(),
        })
    }

    /// Re-resolve options and glob plan against a new project root.
    pub fn set_root(&mut self, root: &str) -> Result<(), ConfigError> {
        self.options = resolve_options(&self.raw_options, root);
        self.globs = discovery::resolve_globs(&self.options)?;
        Ok(())
    }

    pub fn root(&self) -> &str {
        &self.options.root
    }

    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    pub fn globs(&self) -> &[String] {
        &self.globs
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Full discovery pass. The replacement snapshot is built before the
    /// old one is dropped, so a failing enumeration leaves the previous
    /// registry observable.
    pub fn search_components(&mut self) -> Result<usize, DiscoveryError> {
        let paths = discovery::search_component_files(&self.globs)?;
        self.registry = ComponentRegistry::rebuild(&paths, &self.options);
        Ok(self.registry.len())
    }

    pub fn find_component(&self, name: &str) -> Option<&ComponentInfo> {
        self.registry.find(name)
    }

    /// Watch callback for add/unlink events. Paths outside the planned
    /// globs are ignored without a rescan; qualifying events trigger a
    /// full discovery pass. Returns whether a rescan ran.
    pub fn handle_watch_event(&mut self, path: &str) -> Result<bool, DiscoveryError> {
        if !discovery::matches_any_glob(path, &self.globs) {
            return Ok(false);
        }
        self.search_components()?;
        self.generate_declaration();
        Ok(true)
    }

    /// Declaration-file extension point. The `dts` target is resolved from
    /// options but emission is not wired up.
    pub fn generate_declaration(&self) {
        let Some(_dts) = &self.options.dts else {
            return;
        };
        // TODO: emit the resolved `dts` declaration file
    }

    /// Rewrite one source unit against the current registry snapshot.
    pub fn transform(&self, code: &str, id: &str) -> TransformResult {
        let (path, _query) = parse_id(id);
        let sites = transform::scan(code, self.options.transformer);
        transform::rewrite(
            code,
            &sites,
            &self.registry,
            self.options.import_path_transform.as_ref(),
            &path,
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
mod bindings {
    use super::*;
    use lazy_static::lazy_static;
    use napi_derive::napi;
    use std::sync::Mutex;

    lazy_static! {
        static ref CONTEXT: Mutex<Option<Context>> = Mutex::new(None);
    }

    fn with_context<T>(f: impl FnOnce(&mut Context) -> napi::Result<T>) -> napi::Result<T> {
        let mut guard = CONTEXT
            .lock()
            .map_err(|_| napi::Error::from_reason("context lock poisoned"))?;
        match guard.as_mut() {
            Some(ctx) => f(ctx),
            None => Err(napi::Error::from_reason(
                "context not initialized; call init_context_native first",
            )),
        }
    }

    #[napi]
    pub fn init_context_native(options: serde_json::Value, root: String) -> napi::Result<()> {
        let raw: Options = serde_json::from_value(options)
            .map_err(|e| napi::Error::from_reason(format!("invalid options: {}", e)))?;
        let ctx = Context::with_root(raw, &root)
            .map_err(|e| napi::Error::from_reason(e.to_string()))?;
        let mut guard = CONTEXT
            .lock()
            .map_err(|_| napi::Error::from_reason("context lock poisoned"))?;
        *guard = Some(ctx);
        Ok(())
    }

    #[napi]
    pub fn set_root_native(root: String) -> napi::Result<()> {
        with_context(|ctx| {
            ctx.set_root(&root)
                .map_err(|e| napi::Error::from_reason(e.to_string()))
        })
    }

    #[napi]
    pub fn search_components_native() -> napi::Result<u32> {
        with_context(|ctx| {
            ctx.search_components()
                .map(|count| count as u32)
                .map_err(|e| napi::Error::from_reason(e.to_string()))
        })
    }

    #[napi]
    pub fn handle_watch_event_native(path: String) -> napi::Result<bool> {
        with_context(|ctx| {
            ctx.handle_watch_event(&path)
                .map_err(|e| napi::Error::from_reason(e.to_string()))
        })
    }

    #[napi]
    pub fn transform_native(code: String, id: String) -> napi::Result<serde_json::Value> {
        with_context(|ctx| {
            serde_json::to_value(ctx.transform(&code, &id))
                .map_err(|e| napi::Error::from_reason(e.to_string()))
        })
    }

    #[napi]
    pub fn get_component_names_native() -> napi::Result<Vec<String>> {
        with_context(|ctx| Ok(ctx.registry().names()))
    }

    #[napi]
    pub fn get_globs_native() -> napi::Result<Vec<String>> {
        with_context(|ctx| Ok(ctx.globs().to_vec()))
    }
}

#[cfg(feature = "napi")]
pub use bindings::*;

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
