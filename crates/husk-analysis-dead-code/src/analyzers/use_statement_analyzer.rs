//! Flags `use` imports whose aliased or bare name never appears anywhere
//! else in the same file's references.

use super::{short, Analyzer};
use crate::context::AnalysisContext;
use crate::types::{Issue, IssueKind, ReferenceKind, Severity};
use std::collections::HashSet;

pub struct UseStatementAnalyzer;

/// Every name a reference could plausibly be written with: the resolved FQN
/// itself, its last segment, its first segment, and (for member references)
/// the `symbol_parent` forms.
fn used_names_in_file(context: &AnalysisContext, file_path: &str) -> HashSet<String> {
    let mut used = HashSet::new();
    for r in context.references() {
        if r.file_path != file_path || r.kind == ReferenceKind::UseImport {
            continue;
        }
        used.insert(r.symbol_name.clone());
        used.insert(short(&r.symbol_name).to_string());
        if let Some(first) = r.symbol_name.split(crate::types::NS_SEP).next() {
            used.insert(first.to_string());
        }
        if let Some(parent) = &r.symbol_parent {
            used.insert(parent.clone());
            used.insert(short(parent).to_string());
        }
        for literal in &r.string_literals {
            used.insert(literal.clone());
            used.insert(short(literal).to_string());
        }
    }
    used
}

impl Analyzer for UseStatementAnalyzer {
    fn name(&self) -> &str {
        "use_statement"
    }

    fn analyze(&self, context: &AnalysisContext) -> Vec<Issue> {
        let mut issues = Vec::new();

        for (file_path, records) in context.all_imports() {
            let used = used_names_in_file(context, file_path);

            for record in records {
                let referenced_name = record.alias.as_deref().unwrap_or_else(|| short(&record.fqn));

                let is_used = used.contains(&record.fqn)
                    || used.contains(referenced_name)
                    || used.contains(short(&record.fqn));
                if is_used {
                    continue;
                }

                if context.config_ignore_symbol_matches(&record.fqn) {
                    continue;
                }

                issues.push(Issue {
                    kind: IssueKind::UnusedUseStatements,
                    severity: Severity::Warning,
                    message: format!("Import '{}' is never referenced in this file", record.fqn),
                    file: Some(file_path.clone()),
                    line: Some(record.line),
                    symbol: Some(record.fqn.clone()),
                    symbol_kind: None,
                    metadata: Default::default(),
                });
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ImportKind;
    use crate::collect::ImportRecord;
    use crate::config::Config;
    use crate::plugins::PluginManager;
    use crate::symbol_table::SymbolTable;
    use crate::types::Reference;
    use std::collections::BTreeMap;

    fn import(fqn: &str, alias: Option<&str>) -> ImportRecord {
        ImportRecord {
            fqn: fqn.to_string(),
            alias: alias.map(str::to_string),
            line: 3,
            kind: ImportKind::Class,
        }
    }

    #[test]
    fn used_import_is_not_flagged() {
        let imports = vec![(
            "src/Controller.php".to_string(),
            vec![import("App\\Services\\Mailer", None)],
        )];
        let references = vec![Reference {
            kind: ReferenceKind::New,
            symbol_name: "App\\Services\\Mailer".to_string(),
            symbol_parent: None,
            file_path: "src/Controller.php".to_string(),
            line: 11,
            context: "Controller::index".to_string(),
            is_dynamic: false,
            metadata: BTreeMap::new(),
            string_literals: vec![],
        }];
        let plugins = PluginManager::new();
        let context = AnalysisContext::new(SymbolTable::new(), references, Config::default(), imports, &plugins);
        assert!(UseStatementAnalyzer.analyze(&context).is_empty());
    }

    #[test]
    fn unused_import_is_flagged() {
        let imports = vec![(
            "src/Controller.php".to_string(),
            vec![import("App\\Services\\Logger", None)],
        )];
        let plugins = PluginManager::new();
        let context = AnalysisContext::new(SymbolTable::new(), vec![], Config::default(), imports, &plugins);
        assert_eq!(UseStatementAnalyzer.analyze(&context).len(), 1);
    }

    #[test]
    fn aliased_import_used_by_alias_is_not_flagged() {
        let imports = vec![(
            "src/Controller.php".to_string(),
            vec![import("App\\Services\\Mailer", Some("Mail"))],
        )];
        let references = vec![Reference {
            kind: ReferenceKind::New,
            symbol_name: "Mail".to_string(),
            symbol_parent: None,
            file_path: "src/Controller.php".to_string(),
            line: 11,
            context: "Controller::index".to_string(),
            is_dynamic: false,
            metadata: BTreeMap::new(),
            string_literals: vec![],
        }];
        let plugins = PluginManager::new();
        let context = AnalysisContext::new(SymbolTable::new(), references, Config::default(), imports, &plugins);
        assert!(UseStatementAnalyzer.analyze(&context).is_empty());
    }
}
