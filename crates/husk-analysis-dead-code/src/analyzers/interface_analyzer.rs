//! Flags interfaces never implemented, used as a type hint/return type, or
//! extended by a sub-interface.

use super::{is_symbol_ignored, Analyzer};
use crate::context::AnalysisContext;
use crate::types::{Issue, IssueKind, Kind, ReferenceKind, Severity};

pub struct InterfaceAnalyzer;

impl Analyzer for InterfaceAnalyzer {
    fn name(&self) -> &str {
        "interface"
    }

    fn analyze(&self, context: &AnalysisContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        let relevant = [
            ReferenceKind::Implements,
            ReferenceKind::TypeHint,
            ReferenceKind::ReturnType,
        ];

        for iface in context.symbols.get_by_kind(Kind::Interface) {
            let fqn = iface.fully_qualified_name();

            let referenced = context.is_referenced(&fqn, Some(&relevant))
                || context.is_referenced(&iface.name, Some(&relevant));
            if referenced {
                continue;
            }

            let extended_by_subinterface = context
                .references_by_kind(ReferenceKind::Extends)
                .iter()
                .any(|r| r.symbol_name == fqn || r.symbol_name == iface.name);
            if extended_by_subinterface {
                continue;
            }

            if is_symbol_ignored(context, &fqn) {
                continue;
            }

            issues.push(Issue {
                kind: IssueKind::UnusedInterfaces,
                severity: Severity::Warning,
                message: format!("Interface '{fqn}' is never implemented or referenced"),
                file: Some(iface.file_path.clone()),
                line: Some(iface.start_line),
                symbol: Some(fqn),
                symbol_kind: Some(Kind::Interface.to_string()),
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
    use crate::types::{Reference, Symbol, Visibility};
    use std::collections::BTreeMap;

    fn interface_symbol(name: &str, namespace: &str) -> Symbol {
        Symbol {
            kind: Kind::Interface,
            name: name.to_string(),
            namespace: namespace.to_string(),
            parent: None,
            visibility: Visibility::Public,
            is_static: false,
            is_abstract: false,
            is_final: false,
            file_path: "src/I.php".to_string(),
            start_line: 1,
            end_line: 5,
            extends: vec![],
            implements: vec![],
            uses: vec![],
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn unused_interface_is_flagged() {
        let mut symbols = SymbolTable::new();
        symbols.add(interface_symbol("Greetable", "App"));
        let plugins = PluginManager::new();
        let context = AnalysisContext::new(symbols, vec![], Config::default(), Vec::new(), &plugins);
        assert_eq!(InterfaceAnalyzer.analyze(&context).len(), 1);
    }

    #[test]
    fn interface_extended_by_subinterface_is_exempt() {
        let mut symbols = SymbolTable::new();
        symbols.add(interface_symbol("Base", "App"));
        let references = vec![Reference {
            kind: ReferenceKind::Extends,
            symbol_name: "App\\Base".to_string(),
            symbol_parent: None,
            file_path: "src/Sub.php".to_string(),
            line: 3,
            context: "Sub".to_string(),
            is_dynamic: false,
            metadata: BTreeMap::new(),
            string_literals: vec![],
        }];
        let plugins = PluginManager::new();
        let context = AnalysisContext::new(symbols, references, Config::default(), Vec::new(), &plugins);
        assert!(InterfaceAnalyzer.analyze(&context).is_empty());
    }
}
