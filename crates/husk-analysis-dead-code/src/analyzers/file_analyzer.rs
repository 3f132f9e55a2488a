//! Flags files whose top-level symbols (classes, interfaces, traits,
//! functions, global constants) are collectively never referenced.
//!
//! Plugin-contributed entry points are folded into `config.entry_points` by
//! the pipeline before analysis runs, so this analyzer only has to consult
//! one list.

use super::{short, Analyzer};
use crate::context::AnalysisContext;
use crate::types::{Issue, IssueKind, Severity};
use husk_analysis_common::glob::any_path_glob_matches;
use std::collections::{HashMap, HashSet};

pub struct FileAnalyzer;

const DEFAULT_ENTRY_POINTS: &[&str] = &[
    "bin/*",
    "public/*.php",
    "public/index.php",
    "index.php",
    "bootstrap.php",
    "bootstrap/*.php",
    "console/*",
    "cli/*",
    "artisan",
];

fn project_wide_referenced_set(context: &AnalysisContext) -> HashSet<String> {
    let mut set = HashSet::new();
    for r in context.references() {
        set.insert(r.symbol_name.clone());
        set.insert(short(&r.symbol_name).to_string());
        if let Some(parent) = &r.symbol_parent {
            set.insert(format!("{parent}::{}", r.symbol_name));
            set.insert(format!("{}::{}", short(parent), r.symbol_name));
        }
    }
    set
}

fn is_entry_point(context: &AnalysisContext, relative_path: &str) -> bool {
    any_path_glob_matches(DEFAULT_ENTRY_POINTS, relative_path)
        || any_path_glob_matches(&context.config.entry_points, relative_path)
}

impl Analyzer for FileAnalyzer {
    fn name(&self) -> &str {
        "file"
    }

    fn analyze(&self, context: &AnalysisContext) -> Vec<Issue> {
        // Group by file while preserving first-seen file order: an index
        // into `order` keeps `HashMap` out of the iteration path so issues
        // come out in the same order regardless of hashing.
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<&crate::types::Symbol>> = HashMap::new();
        for symbol in context.symbols.get_all() {
            if symbol.kind.is_member() {
                continue;
            }
            let path = symbol.file_path.as_str();
            if !groups.contains_key(path) {
                order.push(path);
            }
            groups.entry(path).or_default().push(symbol);
        }

        let referenced = project_wide_referenced_set(context);
        let mut issues = Vec::new();

        for file_path in order {
            let symbols = &groups[file_path];
            if symbols.is_empty() {
                continue;
            }

            let relative_path = context.config.relativize(file_path);

            if is_entry_point(context, relative_path) {
                continue;
            }
            if context.config_ignore_path_matches(relative_path) || context.plugin_ignore_file(relative_path) {
                continue;
            }

            let any_referenced = symbols.iter().any(|s| {
                let fqn = s.fully_qualified_name();
                referenced.contains(&fqn) || referenced.contains(&s.name)
            });
            if any_referenced {
                continue;
            }

            let first = symbols.iter().min_by_key(|s| s.start_line).unwrap();
            issues.push(Issue {
                kind: IssueKind::UnusedFiles,
                severity: Severity::Warning,
                message: format!("File '{file_path}' has no referenced top-level symbols"),
                file: Some(file_path.to_string()),
                line: Some(first.start_line),
                symbol: None,
                symbol_kind: None,
                metadata: Default::default(),
            });
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::plugins::PluginManager;
    use crate::symbol_table::SymbolTable;
    use crate::types::{Kind, Reference, ReferenceKind, Symbol, Visibility};
    use std::collections::BTreeMap;

    fn class(name: &str, namespace: &str, file: &str) -> Symbol {
        Symbol {
            kind: Kind::Class,
            name: name.to_string(),
            namespace: namespace.to_string(),
            parent: None,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_final: false,
            file_path: file.to_string(),
            start_line: 3,
            end_line: 20,
            extends: vec![],
            implements: vec![],
            uses: vec![],
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn file_with_no_referenced_symbols_is_flagged() {
        let mut symbols = SymbolTable::new();
        symbols.add(class("Orphan", "App", "src/Orphan.php"));
        let plugins = PluginManager::new();
        let context = AnalysisContext::new(
            symbols,
            vec![],
            Config::default(),
            Vec::new(),
            &plugins,
        );
        assert_eq!(FileAnalyzer.analyze(&context).len(), 1);
    }

    #[test]
    fn entry_point_path_is_never_flagged() {
        let mut symbols = SymbolTable::new();
        symbols.add(class("Bootstrap", "", "bootstrap.php"));
        let plugins = PluginManager::new();
        let context = AnalysisContext::new(
            symbols,
            vec![],
            Config::default(),
            Vec::new(),
            &plugins,
        );
        assert!(FileAnalyzer.analyze(&context).is_empty());
    }

    #[test]
    fn file_with_referenced_symbol_is_not_flagged() {
        let mut symbols = SymbolTable::new();
        symbols.add(class("Used", "App", "src/Used.php"));
        let references = vec![Reference {
            kind: ReferenceKind::New,
            symbol_name: "App\\Used".to_string(),
            symbol_parent: None,
            file_path: "src/Controller.php".to_string(),
            line: 9,
            context: "Controller::index".to_string(),
            is_dynamic: false,
            metadata: BTreeMap::new(),
            string_literals: vec![],
        }];
        let plugins = PluginManager::new();
        let context = AnalysisContext::new(
            symbols,
            references,
            Config::default(),
            Vec::new(),
            &plugins,
        );
        assert!(FileAnalyzer.analyze(&context).is_empty());
    }
}
