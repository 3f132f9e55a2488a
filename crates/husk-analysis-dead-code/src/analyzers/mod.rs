//! Analyzers: given an `AnalysisContext`, each produces the issues for one
//! symbol kind by building a referenced-name set and flagging symbols absent
//! from it after a chain of exemptions (plugin ignore, config ignore glob,
//! kind-specific structural exemptions).

mod class_analyzer;
mod constant_analyzer;
mod dependency_analyzer;
mod file_analyzer;
mod function_analyzer;
mod interface_analyzer;
mod method_analyzer;
mod property_analyzer;
mod trait_analyzer;
mod use_statement_analyzer;

pub use class_analyzer::ClassAnalyzer;
pub use constant_analyzer::ConstantAnalyzer;
pub use dependency_analyzer::DependencyAnalyzer;
pub use file_analyzer::FileAnalyzer;
pub use function_analyzer::FunctionAnalyzer;
pub use interface_analyzer::InterfaceAnalyzer;
pub use method_analyzer::MethodAnalyzer;
pub use property_analyzer::PropertyAnalyzer;
pub use trait_analyzer::TraitAnalyzer;
pub use use_statement_analyzer::UseStatementAnalyzer;

use crate::context::AnalysisContext;
use crate::types::Issue;

pub trait Analyzer {
    fn name(&self) -> &str;
    fn analyze(&self, context: &AnalysisContext) -> Vec<Issue>;
}

/// The magic methods a consuming class may invoke only implicitly (the
/// runtime calls them, never an explicit `$obj->__construct()`-style call
/// site), so the method analyzer never flags them regardless of references.
pub const MAGIC_METHODS: &[&str] = &[
    "__construct",
    "__destruct",
    "__call",
    "__callStatic",
    "__get",
    "__set",
    "__isset",
    "__unset",
    "__sleep",
    "__wakeup",
    "__serialize",
    "__unserialize",
    "__toString",
    "__invoke",
    "__set_state",
    "__clone",
    "__debugInfo",
];

/// Runs every built-in analyzer and concatenates their issues in a fixed,
/// deterministic order (class, interface, trait, method, property, constant,
/// function, use-statement, file, dependency).
pub fn run_all(context: &AnalysisContext) -> Vec<Issue> {
    let analyzers: Vec<Box<dyn Analyzer>> = vec![
        Box::new(ClassAnalyzer),
        Box::new(InterfaceAnalyzer),
        Box::new(TraitAnalyzer),
        Box::new(MethodAnalyzer),
        Box::new(PropertyAnalyzer),
        Box::new(ConstantAnalyzer),
        Box::new(FunctionAnalyzer),
        Box::new(UseStatementAnalyzer),
        Box::new(FileAnalyzer),
        Box::new(DependencyAnalyzer),
    ];

    let mut issues = Vec::new();
    for analyzer in &analyzers {
        issues.extend(analyzer.analyze(context));
    }
    issues
}

/// Shared exemption check every analyzer applies last: plugin ignore or a
/// configured `ignore.symbols` glob.
pub(crate) fn is_symbol_ignored(context: &AnalysisContext, fqn: &str) -> bool {
    context.plugin_ignore_symbol(fqn) || context.config_ignore_symbol_matches(fqn)
}

pub(crate) fn short(fqn: &str) -> &str {
    crate::types::short_name(fqn)
}
