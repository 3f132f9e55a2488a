//! Flags traits never pulled into a class via `use`.

use super::{is_symbol_ignored, Analyzer};
use crate::context::AnalysisContext;
use crate::types::{Issue, IssueKind, Kind, ReferenceKind, Severity};

pub struct TraitAnalyzer;

impl Analyzer for TraitAnalyzer {
    fn name(&self) -> &str {
        "trait"
    }

    fn analyze(&self, context: &AnalysisContext) -> Vec<Issue> {
        let mut issues = Vec::new();

        for trait_symbol in context.symbols.get_by_kind(Kind::Trait) {
            let fqn = trait_symbol.fully_qualified_name();

            let used = context.is_referenced(&fqn, Some(&[ReferenceKind::UseTrait]))
                || context.is_referenced(&trait_symbol.name, Some(&[ReferenceKind::UseTrait]));
            if used {
                continue;
            }

            if is_symbol_ignored(context, &fqn) {
                continue;
            }

            issues.push(Issue {
                kind: IssueKind::UnusedTraits,
                severity: Severity::Error,
                message: format!("Trait '{fqn}' is never used by any class"),
                file: Some(trait_symbol.file_path.clone()),
                line: Some(trait_symbol.start_line),
                symbol: Some(fqn),
                symbol_kind: Some(Kind::Trait.to_string()),
                metadata: Default::default(),
            });
        }

        issues
    }
}
