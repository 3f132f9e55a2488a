//! Flags unused constants in two passes: global constants (no `symbol_parent`
//! on the referencing side) and class constants (which carry one).

use super::{is_symbol_ignored, short, Analyzer};
use crate::context::AnalysisContext;
use crate::types::{Issue, IssueKind, Kind, ReferenceKind, Severity};
use std::collections::HashSet;

pub struct ConstantAnalyzer;

impl Analyzer for ConstantAnalyzer {
    fn name(&self) -> &str {
        "constant"
    }

    fn analyze(&self, context: &AnalysisContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        issues.extend(self.analyze_global(context));
        issues.extend(self.analyze_class(context));
        issues
    }
}

impl ConstantAnalyzer {
    fn analyze_global(&self, context: &AnalysisContext) -> Vec<Issue> {
        let referenced: HashSet<&str> = context
            .references_by_kind(ReferenceKind::Constant)
            .into_iter()
            .filter(|r| r.symbol_parent.is_none())
            .map(|r| r.symbol_name.as_str())
            .collect();

        let mut issues = Vec::new();
        for constant in context.symbols.get_by_kind(Kind::Constant) {
            let fqn = constant.fully_qualified_name();
            if referenced.contains(fqn.as_str()) || referenced.contains(constant.name.as_str()) {
                continue;
            }
            if is_symbol_ignored(context, &fqn) {
                continue;
            }
            issues.push(Issue {
                kind: IssueKind::UnusedConstants,
                severity: Severity::Warning,
                message: format!("Constant '{fqn}' is never referenced"),
                file: Some(constant.file_path.clone()),
                line: Some(constant.start_line),
                symbol: Some(fqn),
                symbol_kind: Some(Kind::Constant.to_string()),
                metadata: Default::default(),
            });
        }
        issues
    }

    fn analyze_class(&self, context: &AnalysisContext) -> Vec<Issue> {
        let mut referenced: HashSet<String> = HashSet::new();
        for r in context.references_by_kind(ReferenceKind::Constant) {
            if let Some(parent) = &r.symbol_parent {
                referenced.insert(format!("{parent}::{}", r.symbol_name));
                referenced.insert(format!("{}::{}", short(parent), r.symbol_name));
                referenced.insert(r.symbol_name.clone());
            }
        }

        let mut issues = Vec::new();
        for constant in context.symbols.get_by_kind(Kind::ClassConstant) {
            let parent = constant.parent.clone().unwrap_or_default();
            let full = format!("{parent}::{}", constant.name);
            let short_form = format!("{}::{}", short(&parent), constant.name);

            let is_referenced = referenced.contains(&full)
                || referenced.contains(&short_form)
                || referenced.contains(&constant.name);
            if is_referenced {
                continue;
            }
            if is_symbol_ignored(context, &full) {
                continue;
            }

            issues.push(Issue {
                kind: IssueKind::UnusedConstants,
                severity: Severity::Warning,
                message: format!("Class constant '{full}' is never referenced"),
                file: Some(constant.file_path.clone()),
                line: Some(constant.start_line),
                symbol: Some(full),
                symbol_kind: Some(Kind::ClassConstant.to_string()),
                metadata: Default::default(),
            });
        }
        issues
    }
}
