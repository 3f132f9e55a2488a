//! Detects a Laravel-style MVC framework and contributes the ignore
//! conventions, route/config entry points, and class-string references that
//! come from the framework's own service-container wiring rather than
//! ordinary code references.

use super::{read_file_lossy, ManifestView, Plugin};
use crate::symbol_table::SymbolTable;
use crate::types::{Reference, ReferenceKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

static CLASS_STRING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z_][A-Za-z0-9_\\]*)::class").expect("valid regex"));

pub struct FrameworkAPlugin;

impl FrameworkAPlugin {
    pub fn new() -> Self {
        Self
    }

    fn scan_class_strings(&self, project_root: &Path, relative_dir: &str, out: &mut Vec<Reference>) {
        let dir = project_root.join(relative_dir);
        if !dir.is_dir() {
            return;
        }
        for entry in WalkDir::new(&dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().map(|ext| ext == "php").unwrap_or(false))
        {
            let Some(contents) = read_file_lossy(entry.path(), self.name()) else {
                continue;
            };
            for (line_no, line) in contents.lines().enumerate() {
                for cap in CLASS_STRING_RE.captures_iter(line) {
                    let class_name = cap[1].to_string();
                    let mut metadata = BTreeMap::new();
                    metadata.insert("source".to_string(), "framework-a-config".to_string());
                    out.push(Reference {
                        kind: ReferenceKind::ClassString,
                        symbol_name: class_name,
                        symbol_parent: None,
                        file_path: entry.path().display().to_string(),
                        line: (line_no + 1) as u32,
                        context: "config".to_string(),
                        is_dynamic: false,
                        metadata,
                        string_literals: Vec::new(),
                    });
                }
            }
        }
    }
}

impl Default for FrameworkAPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for FrameworkAPlugin {
    fn name(&self) -> &str {
        "framework-a"
    }

    fn description(&self) -> &str {
        "Laravel-style MVC conventions: service providers, controllers, jobs, listeners."
    }

    fn priority(&self) -> i32 {
        10
    }

    fn is_applicable(&self, project_root: &Path, manifest: &ManifestView) -> bool {
        project_root.join("artisan").is_file()
            || manifest
                .dependency_names
                .iter()
                .any(|d| *d == "framework-a/core" || d.starts_with("framework-a-vendor/"))
    }

    fn ignore_symbol_patterns(&self) -> Vec<String> {
        vec![
            "*ServiceProvider".to_string(),
            "*Controller".to_string(),
            "*Middleware".to_string(),
            "*Job".to_string(),
            "*Listener".to_string(),
            "*::boot".to_string(),
            "*::register".to_string(),
            "*::handle".to_string(),
        ]
    }

    fn ignore_file_patterns(&self) -> Vec<String> {
        vec![
            "app/Providers/*".to_string(),
            "app/Http/Controllers/**/*".to_string(),
            "app/Http/Middleware/*".to_string(),
            "app/Jobs/*".to_string(),
            "app/Listeners/*".to_string(),
            "database/migrations/*".to_string(),
            "database/seeders/*".to_string(),
        ]
    }

    fn entry_points(&self, project_root: &Path) -> Vec<String> {
        let mut entries = Vec::new();
        for dir in ["app/Http/Controllers", "app/Console/Commands", "app/Providers"] {
            let full = project_root.join(dir);
            if !full.is_dir() {
                continue;
            }
            for entry in WalkDir::new(&full)
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.path().extension().map(|ext| ext == "php").unwrap_or(false))
            {
                if let Some(stem) = entry.path().file_stem().and_then(|s| s.to_str()) {
                    entries.push(stem.to_string());
                }
            }
        }
        entries
    }

    fn additional_references(&self, project_root: &Path) -> Vec<Reference> {
        let mut out = Vec::new();
        self.scan_class_strings(project_root, "config", &mut out);
        self.scan_class_strings(project_root, "routes", &mut out);
        out
    }

    fn process_symbols(&self, _symbols: &mut SymbolTable, _project_root: &Path) {}
}
