//! Flags declared dependencies never resolved from by any reference's
//! target namespace. No-op without a manifest attached to the context.

use super::Analyzer;
use crate::context::AnalysisContext;
use crate::manifest::PROJECT_SENTINEL;
use crate::types::{Issue, IssueKind, Reference, ReferenceKind, Severity};
use std::collections::HashSet;

pub struct DependencyAnalyzer;

const RELEVANT_KINDS: &[ReferenceKind] = &[
    ReferenceKind::New,
    ReferenceKind::Extends,
    ReferenceKind::Implements,
    ReferenceKind::UseTrait,
    ReferenceKind::UseImport,
    ReferenceKind::StaticCall,
    ReferenceKind::TypeHint,
    ReferenceKind::ReturnType,
    ReferenceKind::Instanceof,
    ReferenceKind::Catch,
    ReferenceKind::ClassString,
    ReferenceKind::FunctionCall,
];

/// The pseudo-package Composer uses to record the PHP runtime constraint.
const RUNTIME_PSEUDO_PACKAGE: &str = "php";

/// Declarative-only packages with no code surface of their own.
const CONFIGURATION_ONLY_PACKAGES: &[&str] = &["roave/security-advisories", "composer/installers"];

fn is_platform_pseudo_package(name: &str) -> bool {
    name == RUNTIME_PSEUDO_PACKAGE || name.starts_with("ext-") || name.starts_with("lib-")
}

fn reference_target(r: &Reference) -> &str {
    r.symbol_parent.as_deref().unwrap_or(r.symbol_name.as_str())
}

fn used_packages(context: &AnalysisContext) -> HashSet<String> {
    let Some(autoload) = context.autoload_resolver() else {
        return HashSet::new();
    };
    let mut used = HashSet::new();
    for r in context.references() {
        if !RELEVANT_KINDS.contains(&r.kind) || r.is_dynamic {
            continue;
        }
        let target = reference_target(r);
        let resolved = match r.kind {
            ReferenceKind::FunctionCall => autoload.resolve_function(target),
            _ => autoload.resolve_class(target),
        };
        if let Some(package) = resolved {
            if package != autoload.project_name() && package != PROJECT_SENTINEL {
                used.insert(package);
            }
        }
    }
    used
}

impl Analyzer for DependencyAnalyzer {
    fn name(&self) -> &str {
        "dependency"
    }

    fn analyze(&self, context: &AnalysisContext) -> Vec<Issue> {
        let Some(manifest) = context.manifest() else {
            return Vec::new();
        };

        let used = used_packages(context);
        let mut issues = Vec::new();

        for (name, is_dev) in manifest.all_dependencies() {
            if is_platform_pseudo_package(&name) || CONFIGURATION_ONLY_PACKAGES.contains(&name.as_str()) {
                continue;
            }
            if context.config_ignore_dependency_matches(&name) {
                continue;
            }
            if used.contains(&name) {
                continue;
            }

            let mut metadata = std::collections::BTreeMap::new();
            metadata.insert("isDev".to_string(), is_dev.to_string());

            issues.push(Issue {
                kind: IssueKind::UnusedDependencies,
                severity: if is_dev { Severity::Info } else { Severity::Warning },
                message: format!("Dependency '{name}' is never referenced from project code"),
                file: None,
                line: None,
                symbol: Some(name),
                symbol_kind: None,
                metadata,
            });
        }

        issues
    }
}

impl DependencyAnalyzer {
    /// Packages referenced from project code but absent from the manifest.
    pub fn missing_dependencies(&self, context: &AnalysisContext) -> Vec<String> {
        let Some(manifest) = context.manifest() else {
            return Vec::new();
        };
        let declared: HashSet<String> = manifest.all_dependencies().into_iter().map(|(n, _)| n).collect();
        let mut missing: Vec<String> = used_packages(context)
            .into_iter()
            .filter(|pkg| !declared.contains(pkg))
            .collect();
        missing.sort();
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoload::AutoloadResolver;
    use crate::config::Config;
    use crate::manifest::{AutoloadSection, Lockfile, LockedPackage, Manifest, PathOrPaths};
    use crate::plugins::PluginManager;
    use crate::symbol_table::SymbolTable;
    use std::collections::{BTreeMap, HashMap as StdHashMap};

    fn manifest_with_dep(name: &str, dev: bool) -> Manifest {
        let mut manifest = Manifest {
            name: Some("acme/app".to_string()),
            ..Manifest::default()
        };
        if dev {
            manifest.require_dev.insert(name.to_string(), "^1.0".to_string());
        } else {
            manifest.require.insert(name.to_string(), "^1.0".to_string());
        }
        manifest
    }

    fn lockfile_for(package: &str, prefix: &str) -> Lockfile {
        let mut psr4 = StdHashMap::new();
        psr4.insert(prefix.to_string(), PathOrPaths::One("src/".into()));
        Lockfile {
            packages: vec![LockedPackage {
                name: package.to_string(),
                version: "1.0.0".into(),
                autoload: AutoloadSection {
                    psr4,
                    ..Default::default()
                },
            }],
            packages_dev: vec![],
            content_hash: None,
        }
    }

    #[test]
    fn unreferenced_runtime_dependency_is_warning() {
        let manifest = manifest_with_dep("acme/core", false);
        let lockfile = lockfile_for("acme/core", "Acme\\Core\\");
        let autoload = AutoloadResolver::build(&manifest, &lockfile);

        let plugins = PluginManager::new();
        let context = AnalysisContext::new(
            SymbolTable::new(),
            vec![],
            Config::default(),
            Vec::new(),
            &plugins,
        )
        .with_dependencies(manifest, autoload);

        let issues = DependencyAnalyzer.analyze(&context);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn unreferenced_dev_dependency_is_info() {
        let manifest = manifest_with_dep("acme/test-tools", true);
        let lockfile = lockfile_for("acme/test-tools", "Acme\\TestTools\\");
        let autoload = AutoloadResolver::build(&manifest, &lockfile);

        let plugins = PluginManager::new();
        let context = AnalysisContext::new(
            SymbolTable::new(),
            vec![],
            Config::default(),
            Vec::new(),
            &plugins,
        )
        .with_dependencies(manifest, autoload);

        let issues = DependencyAnalyzer.analyze(&context);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);
        assert_eq!(issues[0].metadata.get("isDev").map(String::as_str), Some("true"));
    }

    #[test]
    fn referenced_dependency_is_not_flagged() {
        let manifest = manifest_with_dep("acme/core", false);
        let lockfile = lockfile_for("acme/core", "Acme\\Core\\");
        let autoload = AutoloadResolver::build(&manifest, &lockfile);

        let references = vec![Reference {
            kind: ReferenceKind::New,
            symbol_name: "Acme\\Core\\Thing".to_string(),
            symbol_parent: None,
            file_path: "src/App.php".to_string(),
            line: 7,
            context: "App".to_string(),
            is_dynamic: false,
            metadata: BTreeMap::new(),
            string_literals: vec![],
        }];

        let plugins = PluginManager::new();
        let context = AnalysisContext::new(
            SymbolTable::new(),
            references,
            Config::default(),
            Vec::new(),
            &plugins,
        )
        .with_dependencies(manifest, autoload);

        assert!(DependencyAnalyzer.analyze(&context).is_empty());
    }

    #[test]
    fn absent_manifest_yields_no_issues() {
        let plugins = PluginManager::new();
        let context = AnalysisContext::new(
            SymbolTable::new(),
            vec![],
            Config::default(),
            Vec::new(),
            &plugins,
        );
        assert!(DependencyAnalyzer.analyze(&context).is_empty());
    }
}
