//! Detects a CMS-style platform (WordPress-like) where the callback passed
//! to a hook-registration function is the only reference to that callback;
//! ordinary name-matching sees no call site at all. This plugin regex-scans
//! themes/plugins/must-use directories and synthesizes the reference the
//! hook system creates at runtime.

use super::{read_file_lossy, ManifestView, Plugin};
use crate::symbol_table::SymbolTable;
use crate::types::{Reference, ReferenceKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

const HOOK_FUNCTIONS: &[&str] = &[
    "add_action",
    "add_filter",
    "add_shortcode",
    "register_activation_hook",
    "register_deactivation_hook",
];

fn hook_alternation() -> String {
    HOOK_FUNCTIONS.join("|")
}

static BARE_CALLBACK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"(?:{})\(\s*['"][^'"]*['"]\s*,\s*['"]([A-Za-z_][A-Za-z0-9_]*)['"]"#,
        hook_alternation()
    ))
    .expect("valid regex")
});

static THIS_METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"(?:{})\(\s*['"][^'"]*['"]\s*,\s*\[\s*\$this\s*,\s*['"]([A-Za-z_][A-Za-z0-9_]*)['"]\s*\]"#,
        hook_alternation()
    ))
    .expect("valid regex")
});

static STATIC_METHOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"(?:{})\(\s*['"][^'"]*['"]\s*,\s*\[\s*([A-Za-z_][A-Za-z0-9_\\]*)::class\s*,\s*['"]([A-Za-z_][A-Za-z0-9_]*)['"]\s*\]"#,
        hook_alternation()
    ))
    .expect("valid regex")
});

pub struct FrameworkCPlugin;

impl FrameworkCPlugin {
    pub fn new() -> Self {
        Self
    }

    fn scan_hooks_in(&self, dir: &Path, out: &mut Vec<Reference>) {
        if !dir.is_dir() {
            return;
        }
        for entry in WalkDir::new(dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().map(|ext| ext == "php").unwrap_or(false))
        {
            let Some(contents) = read_file_lossy(entry.path(), self.name()) else {
                continue;
            };
            let path_str = entry.path().display().to_string();

            for (line_no, line) in contents.lines().enumerate() {
                let line_number = (line_no + 1) as u32;
                let mut metadata = BTreeMap::new();
                metadata.insert("source".to_string(), "framework-c-hook".to_string());

                if let Some(cap) = STATIC_METHOD_RE.captures(line) {
                    out.push(Reference {
                        kind: ReferenceKind::StaticCall,
                        symbol_name: cap[2].to_string(),
                        symbol_parent: Some(cap[1].to_string()),
                        file_path: path_str.clone(),
                        line: line_number,
                        context: "hook".to_string(),
                        is_dynamic: false,
                        metadata: metadata.clone(),
                        string_literals: Vec::new(),
                    });
                } else if let Some(cap) = THIS_METHOD_RE.captures(line) {
                    out.push(Reference {
                        kind: ReferenceKind::MethodCall,
                        symbol_name: cap[1].to_string(),
                        symbol_parent: None,
                        file_path: path_str.clone(),
                        line: line_number,
                        context: "hook".to_string(),
                        is_dynamic: false,
                        metadata: metadata.clone(),
                        string_literals: Vec::new(),
                    });
                } else if let Some(cap) = BARE_CALLBACK_RE.captures(line) {
                    out.push(Reference {
                        kind: ReferenceKind::FunctionCall,
                        symbol_name: cap[1].to_string(),
                        symbol_parent: None,
                        file_path: path_str.clone(),
                        line: line_number,
                        context: "hook".to_string(),
                        is_dynamic: false,
                        metadata,
                        string_literals: Vec::new(),
                    });
                }
            }
        }
    }
}

impl Default for FrameworkCPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for FrameworkCPlugin {
    fn name(&self) -> &str {
        "framework-c"
    }

    fn description(&self) -> &str {
        "CMS hook system: themes/plugins register callbacks invoked only at runtime."
    }

    fn priority(&self) -> i32 {
        5
    }

    fn is_applicable(&self, project_root: &Path, manifest: &ManifestView) -> bool {
        project_root.join("wp-config.php").is_file()
            || project_root.join("wp-load.php").is_file()
            || manifest
                .dependency_names
                .iter()
                .any(|d| d.starts_with("framework-c-core/") || d.starts_with("framework-c-theme/"))
    }

    fn ignore_symbol_patterns(&self) -> Vec<String> {
        vec![
            "*Widget".to_string(),
            "*_shortcode".to_string(),
            "*::activate".to_string(),
            "*::deactivate".to_string(),
        ]
    }

    fn ignore_file_patterns(&self) -> Vec<String> {
        vec![
            "wp-content/themes/**/*".to_string(),
            "wp-content/plugins/**/*".to_string(),
            "wp-content/mu-plugins/**/*".to_string(),
        ]
    }

    fn additional_references(&self, project_root: &Path) -> Vec<Reference> {
        let mut out = Vec::new();
        for dir in [
            "wp-content/themes",
            "wp-content/plugins",
            "wp-content/mu-plugins",
        ] {
            self.scan_hooks_in(&project_root.join(dir), &mut out);
        }
        out
    }

    fn process_symbols(&self, _symbols: &mut SymbolTable, _project_root: &Path) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_plugin_file(dir: &Path, contents: &str) {
        std::fs::create_dir_all(dir.join("wp-content/plugins/demo")).unwrap();
        std::fs::write(dir.join("wp-content/plugins/demo/demo.php"), contents).unwrap();
    }

    #[test]
    fn bare_string_callback_becomes_function_call_reference() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin_file(
            dir.path(),
            "<?php add_action('init', 'demo_register_post_type');",
        );
        let plugin = FrameworkCPlugin::new();
        let refs = plugin.additional_references(dir.path());
        assert!(refs
            .iter()
            .any(|r| r.kind == ReferenceKind::FunctionCall && r.symbol_name == "demo_register_post_type"));
    }

    #[test]
    fn this_method_callback_becomes_method_call_reference() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin_file(
            dir.path(),
            "<?php add_action('init', [$this, 'register_post_type']);",
        );
        let plugin = FrameworkCPlugin::new();
        let refs = plugin.additional_references(dir.path());
        assert!(refs
            .iter()
            .any(|r| r.kind == ReferenceKind::MethodCall && r.symbol_name == "register_post_type"));
    }

    #[test]
    fn static_class_callback_becomes_static_call_reference() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin_file(
            dir.path(),
            "<?php add_filter('the_content', [Demo\\Hooks::class, 'filterContent']);",
        );
        let plugin = FrameworkCPlugin::new();
        let refs = plugin.additional_references(dir.path());
        assert!(refs.iter().any(|r| r.kind == ReferenceKind::StaticCall
            && r.symbol_name == "filterContent"
            && r.symbol_parent.as_deref() == Some("Demo\\Hooks")));
    }
}
