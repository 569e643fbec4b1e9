//! End-to-end tests for the discovery -> registry -> transform pipeline,
//! exercised against a real temporary project tree.

#[cfg(test)]
mod tests {
    use crate::name::slash;
    use crate::options::Options;
    use crate::transform::scan_vue3;
    use crate::Context;
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn options(raw: &str) -> Options {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_discover_and_transform_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let root = slash(&dir.path().to_string_lossy());
        write(dir.path(), "src/components/Foo.vue", "<template/>");
        write(dir.path(), "src/components/button-group.vue", "<template/>");

        let mut ctx = Context::with_root(Options::default(), &root).unwrap();
        assert_eq!(ctx.search_components().unwrap(), 2);
        assert_eq!(ctx.registry().names(), vec!["ButtonGroup", "Foo"]);

        let code = "const _a = _resolveComponent(\"Foo\");\n\
                    const _b = _resolveComponent(\"button-group\");\n\
                    const _c = _resolveComponent(\"NotRegistered\");\n\
                    render();\n";
        let result = ctx.transform(code, "/app/src/App.vue");

        // One import per resolved site, later binding first.
        assert_eq!(
            result.code,
            format!(
                "import components_1 from '{root}/src/components/button-group.vue';\n\
                 import components_0 from '{root}/src/components/Foo.vue';\n\
                 const _a = components_0;\n\
                 const _b = components_1;\n\
                 const _c = _resolveComponent(\"NotRegistered\");\n\
                 render();\n",
                root = root
            )
        );

        // Re-scanning the output finds only the unresolved site.
        let remaining = scan_vue3(&result.code);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].raw_name, "NotRegistered");

        assert_eq!(result.map.version, 3);
        assert_eq!(result.map.sources, vec!["/app/src/App.vue"]);
        assert_eq!(result.map.sources_content, Some(vec![code.to_string()]));
        assert!(!result.map.mappings.is_empty());
    }

    #[test]
    fn test_transform_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let root = slash(&dir.path().to_string_lossy());
        write(dir.path(), "src/components/Foo.vue", "");

        let mut ctx = Context::with_root(Options::default(), &root).unwrap();
        ctx.search_components().unwrap();

        let code = "_resolveComponent(\"Foo\");";
        let a = ctx.transform(code, "/a.vue");
        let b = ctx.transform(code, "/a.vue");
        assert_eq!(a.code, b.code);
        assert_eq!(a.map, b.map);
    }

    #[test]
    fn test_watch_event_outside_globs_does_not_rescan() {
        let dir = tempfile::tempdir().unwrap();
        let root = slash(&dir.path().to_string_lossy());
        write(dir.path(), "src/components/Foo.vue", "");

        let mut ctx = Context::with_root(Options::default(), &root).unwrap();
        ctx.search_components().unwrap();

        // A new component appears on disk, but the reported event path is
        // outside the planned globs: no rescan, stale view kept.
        write(dir.path(), "src/components/Bar.vue", "");
        let rescanned = ctx
            .handle_watch_event(&format!("{}/src/pages/Bar.vue", root))
            .unwrap();
        assert!(!rescanned);
        assert!(ctx.find_component("Bar").is_none());

        // The same file reported under its real path qualifies.
        let rescanned = ctx
            .handle_watch_event(&format!("{}/src/components/Bar.vue", root))
            .unwrap();
        assert!(rescanned);
        assert!(ctx.find_component("Bar").is_some());
    }

    #[test]
    fn test_unlink_event_drops_stale_entries() {
        let dir = tempfile::tempdir().unwrap();
        let root = slash(&dir.path().to_string_lossy());
        write(dir.path(), "src/components/Foo.vue", "");
        write(dir.path(), "src/components/Bar.vue", "");

        let mut ctx = Context::with_root(Options::default(), &root).unwrap();
        assert_eq!(ctx.search_components().unwrap(), 2);

        let bar = dir.path().join("src/components/Bar.vue");
        fs::remove_file(&bar).unwrap();
        let rescanned = ctx
            .handle_watch_event(&slash(&bar.to_string_lossy()))
            .unwrap();
        assert!(rescanned);
        assert!(ctx.find_component("Bar").is_none());
        assert!(ctx.find_component("Foo").is_some());
    }

    #[test]
    fn test_on_disk_collision_keeps_last_enumerated() {
        let dir = tempfile::tempdir().unwrap();
        let root = slash(&dir.path().to_string_lossy());
        // Both resolve to `Foo`; `foo.vue` sorts before `foo/index.vue`.
        write(dir.path(), "src/components/foo.vue", "");
        write(dir.path(), "src/components/foo/index.vue", "");

        let mut ctx = Context::with_root(Options::default(), &root).unwrap();
        assert_eq!(ctx.search_components().unwrap(), 1);
        assert_eq!(
            ctx.find_component("Foo").unwrap().from,
            format!("{}/src/components/foo/index.vue", root)
        );
    }

    #[test]
    fn test_repeated_discovery_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let root = slash(&dir.path().to_string_lossy());
        write(dir.path(), "src/components/Foo.vue", "");
        write(dir.path(), "src/components/nested/Bar.vue", "");

        let mut ctx = Context::with_root(Options::default(), &root).unwrap();
        ctx.search_components().unwrap();
        let first = ctx.registry().names();
        ctx.search_components().unwrap();
        assert_eq!(first, ctx.registry().names());
    }

    #[test]
    fn test_shallow_discovery_skips_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = slash(&dir.path().to_string_lossy());
        write(dir.path(), "src/components/Foo.vue", "");
        write(dir.path(), "src/components/nested/Bar.vue", "");

        let mut ctx =
            Context::with_root(options(r#"{ "deep": false }"#), &root).unwrap();
        assert_eq!(ctx.search_components().unwrap(), 1);
        assert!(ctx.find_component("Foo").is_some());
        assert!(ctx.find_component("Bar").is_none());
    }

    #[test]
    fn test_legacy_dialect_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let root = slash(&dir.path().to_string_lossy());
        write(dir.path(), "src/components/my-button.vue", "");

        let mut ctx =
            Context::with_root(options(r#"{ "transformer": "vue2" }"#), &root).unwrap();
        ctx.search_components().unwrap();

        let code = "return h('my-button', {})";
        let result = ctx.transform(code, "/a.vue");
        assert_eq!(
            result.code,
            format!(
                "import components_0 from '{}/src/components/my-button.vue';\nreturn h(components_0, {{}})",
                root
            )
        );
    }

    #[test]
    fn test_namespaced_discovery() {
        let dir = tempfile::tempdir().unwrap();
        let root = slash(&dir.path().to_string_lossy());
        write(dir.path(), "src/components/forms/Input.vue", "");

        let mut ctx = Context::with_root(
            options(r#"{ "directoryAsNamespace": true }"#),
            &root,
        )
        .unwrap();
        ctx.search_components().unwrap();
        assert!(ctx.find_component("FormsInput").is_some());
    }
}
