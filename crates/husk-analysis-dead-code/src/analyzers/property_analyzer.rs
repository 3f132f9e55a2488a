//! Flags private properties never accessed, matching the same bare-name,
//! `Class::$name`, `short(Class)::$name` forms the method analyzer uses.

use super::{is_symbol_ignored, short, Analyzer};
use crate::context::AnalysisContext;
use crate::types::{Issue, IssueKind, Kind, ReferenceKind, Severity, Visibility};
use std::collections::HashSet;

pub struct PropertyAnalyzer;

fn accessed_set(context: &AnalysisContext) -> HashSet<String> {
    let mut set = HashSet::new();
    for r in context.references_by_kind(ReferenceKind::PropertyAccess) {
        set.insert(r.symbol_name.clone());
    }
    for r in context.references_by_kind(ReferenceKind::StaticProperty) {
        set.insert(r.symbol_name.clone());
        if let Some(parent) = &r.symbol_parent {
            set.insert(format!("{parent}::${}", r.symbol_name));
            set.insert(format!("{}::${}", short(parent), r.symbol_name));
        }
    }
    set
}

impl Analyzer for PropertyAnalyzer {
    fn name(&self) -> &str {
        "property"
    }

    fn analyze(&self, context: &AnalysisContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        let accessed = accessed_set(context);

        for property in context.symbols.get_by_kind(Kind::Property) {
            if property.visibility != Visibility::Private {
                continue;
            }

            let parent = property.parent.as_deref().unwrap_or_default();
            let full = format!("{parent}::${}", property.name);
            let short_form = format!("{}::${}", short(parent), property.name);

            let referenced = accessed.contains(&property.name)
                || accessed.contains(&full)
                || accessed.contains(&short_form);
            if referenced {
                continue;
            }

            if is_symbol_ignored(context, &full) || is_symbol_ignored(context, &property.name) {
                continue;
            }

            issues.push(Issue {
                kind: IssueKind::UnusedProperties,
                severity: Severity::Warning,
                message: format!("Private property '{full}' is never accessed"),
                file: Some(property.file_path.clone()),
                line: Some(property.start_line),
                symbol: Some(full),
                symbol_kind: Some(Kind::Property.to_string()),
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
    use crate::types::{Reference, Symbol};
    use std::collections::BTreeMap;

    fn private_property(name: &str, parent: &str) -> Symbol {
        Symbol {
            kind: Kind::Property,
            name: name.to_string(),
            namespace: "App".to_string(),
            parent: Some(parent.to_string()),
            visibility: Visibility::Private,
            is_static: false,
            is_abstract: false,
            is_final: false,
            file_path: "src/Svc.php".to_string(),
            start_line: 6,
            end_line: 6,
            extends: vec![],
            implements: vec![],
            uses: vec![],
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn unused_private_property_is_flagged() {
        let mut symbols = SymbolTable::new();
        symbols.add(private_property("cache", "App\\Svc"));
        let plugins = PluginManager::new();
        let context = AnalysisContext::new(symbols, vec![], Config::default(), Vec::new(), &plugins);
        assert_eq!(PropertyAnalyzer.analyze(&context).len(), 1);
    }

    #[test]
    fn property_access_reference_exempts_property() {
        let mut symbols = SymbolTable::new();
        symbols.add(private_property("cache", "App\\Svc"));
        let references = vec![Reference {
            kind: ReferenceKind::PropertyAccess,
            symbol_name: "cache".to_string(),
            symbol_parent: None,
            file_path: "src/Svc.php".to_string(),
            line: 20,
            context: "Svc::run".to_string(),
            is_dynamic: false,
            metadata: BTreeMap::new(),
            string_literals: vec![],
        }];
        let plugins = PluginManager::new();
        let context = AnalysisContext::new(symbols, references, Config::default(), Vec::new(), &plugins);
        assert!(PropertyAnalyzer.analyze(&context).is_empty());
    }
}
