//! Detects a Symfony-style framework: bundle manifest, service wiring in
//! YAML-like config, and the controller/command/subscriber/entity
//! directory conventions that keep those classes alive without a direct
//! code reference.

use super::{read_file_lossy, ManifestView, Plugin};
use crate::symbol_table::SymbolTable;
use crate::types::{Reference, ReferenceKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use walkdir::WalkDir;

static SERVICE_CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"class:\s*([A-Za-z_][A-Za-z0-9_\\]*)").expect("valid regex"));

pub struct FrameworkBPlugin;

impl FrameworkBPlugin {
    pub fn new() -> Self {
        Self
    }

    fn scan_service_files(&self, project_root: &Path, out: &mut Vec<Reference>) {
        let config_dir = project_root.join("config");
        if !config_dir.is_dir() {
            return;
        }
        for entry in WalkDir::new(&config_dir)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            let Some(contents) = read_file_lossy(entry.path(), self.name()) else {
                continue;
            };
            for (line_no, line) in contents.lines().enumerate() {
                if let Some(cap) = SERVICE_CLASS_RE.captures(line) {
                    let mut metadata = BTreeMap::new();
                    metadata.insert("source".to_string(), "framework-b-service".to_string());
                    out.push(Reference {
                        kind: ReferenceKind::ClassString,
                        symbol_name: cap[1].to_string(),
                        symbol_parent: None,
                        file_path: entry.path().display().to_string(),
                        line: (line_no + 1) as u32,
                        context: "services".to_string(),
                        is_dynamic: false,
                        metadata,
                        string_literals: Vec::new(),
                    });
                }
            }
        }
    }
}

impl Default for FrameworkBPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for FrameworkBPlugin {
    fn name(&self) -> &str {
        "framework-b"
    }

    fn description(&self) -> &str {
        "Symfony-style bundles: controllers, commands, subscribers, entities, voters."
    }

    fn priority(&self) -> i32 {
        10
    }

    fn is_applicable(&self, project_root: &Path, manifest: &ManifestView) -> bool {
        project_root.join("framework-b.lock").is_file()
            || project_root.join("config/bundles.php").is_file()
            || manifest.dependency_names.iter().any(|d| {
                *d == "framework-b/framework-bundle"
                    || *d == "framework-b/http-kernel"
                    || *d == "framework-b/console"
            })
    }

    fn ignore_symbol_patterns(&self) -> Vec<String> {
        vec![
            "*Controller".to_string(),
            "*Command".to_string(),
            "*Subscriber".to_string(),
            "*Voter".to_string(),
            "*Repository".to_string(),
            "*Extension".to_string(),
            "*::configure".to_string(),
            "*::execute".to_string(),
            "*::onKernel*".to_string(),
        ]
    }

    fn ignore_file_patterns(&self) -> Vec<String> {
        vec![
            "src/Controller/**/*".to_string(),
            "src/Command/*".to_string(),
            "src/EventSubscriber/*".to_string(),
            "src/Security/Voter/*".to_string(),
            "src/Entity/*".to_string(),
            "src/Repository/*".to_string(),
            "src/Form/*".to_string(),
            "src/MessageHandler/*".to_string(),
            "src/Twig/*".to_string(),
            "migrations/*".to_string(),
        ]
    }

    fn entry_points(&self, project_root: &Path) -> Vec<String> {
        let mut entries = Vec::new();
        for dir in [
            "src/Controller",
            "src/Command",
            "src/EventSubscriber",
            "src/MessageHandler",
        ] {
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
        self.scan_service_files(project_root, &mut out);
        out
    }

    fn process_symbols(&self, _symbols: &mut SymbolTable, _project_root: &Path) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_applicable_detects_bundles_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("config")).unwrap();
        std::fs::write(dir.path().join("config/bundles.php"), "<?php return [];").unwrap();
        let plugin = FrameworkBPlugin::new();
        let manifest = ManifestView {
            dependency_names: vec![],
        };
        assert!(plugin.is_applicable(dir.path(), &manifest));
    }

    #[test]
    fn scans_service_yaml_for_class_references() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("config")).unwrap();
        std::fs::write(
            dir.path().join("config/services.yaml"),
            "services:\n  App\\Service\\Mailer:\n    class: App\\Service\\Mailer\n",
        )
        .unwrap();

        let plugin = FrameworkBPlugin::new();
        let refs = plugin.additional_references(dir.path());
        assert!(refs.iter().any(|r| r.symbol_name == "App\\Service\\Mailer"));
    }
}
