//! Flags classes that are never instantiated, extended, implemented, used as
//! a trait... used in any way a reference can express.

use super::{is_symbol_ignored, Analyzer};
use crate::context::AnalysisContext;
use crate::types::{Issue, IssueKind, Kind, ReferenceKind, Severity};

const RELEVANT_KINDS: &[ReferenceKind] = &[
    ReferenceKind::New,
    ReferenceKind::Extends,
    ReferenceKind::Implements,
    ReferenceKind::UseTrait,
    ReferenceKind::StaticCall,
    ReferenceKind::StaticProperty,
    ReferenceKind::Constant,
    ReferenceKind::Instanceof,
    ReferenceKind::TypeHint,
    ReferenceKind::ReturnType,
    ReferenceKind::Catch,
    ReferenceKind::ClassString,
];

pub struct ClassAnalyzer;

impl Analyzer for ClassAnalyzer {
    fn name(&self) -> &str {
        "class"
    }

    fn analyze(&self, context: &AnalysisContext) -> Vec<Issue> {
        let mut issues = Vec::new();

        for class in context.symbols.get_by_kind(Kind::Class) {
            let fqn = class.fully_qualified_name();

            let referenced = context.is_referenced(&fqn, Some(RELEVANT_KINDS))
                || context.is_referenced(&class.name, Some(RELEVANT_KINDS));
            if referenced {
                continue;
            }

            if class.is_abstract {
                let extended = context
                    .references_by_kind(ReferenceKind::Extends)
                    .iter()
                    .any(|r| r.symbol_name == fqn || r.symbol_name == class.name);
                if extended {
                    continue;
                }
            }

            if is_symbol_ignored(context, &fqn) {
                continue;
            }

            issues.push(Issue {
                kind: IssueKind::UnusedClasses,
                severity: Severity::Error,
                message: format!("Class '{fqn}' is never referenced"),
                file: Some(class.file_path.clone()),
                line: Some(class.start_line),
                symbol: Some(fqn),
                symbol_kind: Some(Kind::Class.to_string()),
                metadata: Default::default(),
            });
        }

        issues
    }
}
