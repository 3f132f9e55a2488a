//! Flags functions never called directly and never passed as a callback
//! string to a higher-order built-in.

use super::{is_symbol_ignored, Analyzer};
use crate::context::AnalysisContext;
use crate::types::{Issue, IssueKind, Kind, ReferenceKind, Severity};
use std::collections::HashSet;

pub struct FunctionAnalyzer;

fn callback_string_set(context: &AnalysisContext) -> HashSet<&str> {
    context
        .references()
        .iter()
        .flat_map(|r| r.string_literals.iter().map(String::as_str))
        .collect()
}

impl Analyzer for FunctionAnalyzer {
    fn name(&self) -> &str {
        "function"
    }

    fn analyze(&self, context: &AnalysisContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        let callback_strings = callback_string_set(context);

        for function in context.symbols.get_by_kind(Kind::Function) {
            let fqn = function.fully_qualified_name();

            if function.name.starts_with('_') {
                continue;
            }

            let called = context.is_referenced(&fqn, Some(&[ReferenceKind::FunctionCall]))
                || context.is_referenced(&function.name, Some(&[ReferenceKind::FunctionCall]));
            if called {
                continue;
            }

            let rescued_by_callback_string =
                callback_strings.contains(fqn.as_str()) || callback_strings.contains(function.name.as_str());
            if rescued_by_callback_string {
                continue;
            }

            if is_symbol_ignored(context, &fqn) {
                continue;
            }

            issues.push(Issue {
                kind: IssueKind::UnusedFunctions,
                severity: Severity::Error,
                message: format!("Function '{fqn}' is never called"),
                file: Some(function.file_path.clone()),
                line: Some(function.start_line),
                symbol: Some(fqn),
                symbol_kind: Some(Kind::Function.to_string()),
                metadata: Default::default(),
            });
        }

        issues
    }
}
