//! Flags private methods never called, either by bare name, `Class::method`,
//! or `short(Class)::method`. Magic methods are always exempt since the
//! runtime invokes them without a matching call-site reference.

use super::{is_symbol_ignored, short, Analyzer, MAGIC_METHODS};
use crate::context::AnalysisContext;
use crate::types::{Issue, IssueKind, Kind, ReferenceKind, Severity, Visibility};
use std::collections::HashSet;

pub struct MethodAnalyzer;

fn called_set(context: &AnalysisContext) -> HashSet<String> {
    let mut set = HashSet::new();
    for r in context.references_by_kind(ReferenceKind::MethodCall) {
        set.insert(r.symbol_name.clone());
    }
    for r in context.references_by_kind(ReferenceKind::StaticCall) {
        set.insert(r.symbol_name.clone());
        if let Some(parent) = &r.symbol_parent {
            set.insert(format!("{parent}::{}", r.symbol_name));
            set.insert(format!("{}::{}", short(parent), r.symbol_name));
        }
    }
    set
}

impl Analyzer for MethodAnalyzer {
    fn name(&self) -> &str {
        "method"
    }

    fn analyze(&self, context: &AnalysisContext) -> Vec<Issue> {
        let mut issues = Vec::new();
        let called = called_set(context);

        for method in context.symbols.get_by_kind(Kind::Method) {
            if method.visibility != Visibility::Private {
                continue;
            }
            if method.is_magic_method() || MAGIC_METHODS.contains(&method.name.as_str()) {
                continue;
            }

            let parent = method.parent.as_deref().unwrap_or_default();
            let full = format!("{parent}::{}", method.name);
            let short_form = format!("{}::{}", short(parent), method.name);

            let referenced = called.contains(&method.name)
                || called.contains(&full)
                || called.contains(&short_form);
            if referenced {
                continue;
            }

            if is_symbol_ignored(context, &full) || is_symbol_ignored(context, &method.name) {
                continue;
            }

            issues.push(Issue {
                kind: IssueKind::UnusedMethods,
                severity: Severity::Warning,
                message: format!("Private method '{full}' is never called"),
                file: Some(method.file_path.clone()),
                line: Some(method.start_line),
                symbol: Some(full),
                symbol_kind: Some(Kind::Method.to_string()),
                metadata: Default::default(),
            });
        }

        issues
    }
}
