//! Core value types: symbol definitions, reference use-sites, and the
//! issues analyzers produce from them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The kind of a definition site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Class,
    Interface,
    Trait,
    Enum,
    Function,
    Method,
    Property,
    Constant,
    ClassConstant,
}

impl Kind {
    /// True for kinds that always have a `parent` (an owning class FQN).
    pub fn is_member(&self) -> bool {
        matches!(self, Kind::Method | Kind::Property | Kind::ClassConstant)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Kind::Class => "class",
            Kind::Interface => "interface",
            Kind::Trait => "trait",
            Kind::Enum => "enum",
            Kind::Function => "function",
            Kind::Method => "method",
            Kind::Property => "property",
            Kind::Constant => "constant",
            Kind::ClassConstant => "class_constant",
        };
        write!(f, "{s}")
    }
}

/// Visibility of a class member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Public
    }
}

/// The namespace separator used throughout FQN construction and splitting.
pub const NS_SEP: &str = "\\";

/// Join a namespace and an unqualified name into a fully-qualified name.
pub fn join_fqn(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_string()
    } else {
        format!("{namespace}{NS_SEP}{name}")
    }
}

/// The last segment of a dotted/namespaced name.
pub fn short_name(fqn: &str) -> &str {
    fqn.rsplit(NS_SEP).next().unwrap_or(fqn)
}

/// One definition site extracted by the symbol collector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symbol {
    pub kind: Kind,
    pub name: String,
    pub namespace: String,
    /// Owning class FQN; required for `Method`/`Property`/`ClassConstant`.
    pub parent: Option<String>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub file_path: String,
    pub start_line: u32,
    pub end_line: u32,
    /// Names this class `extends` (as written, pre-resolution).
    #[serde(default)]
    pub extends: Vec<String>,
    /// Interfaces this class/enum `implements`.
    #[serde(default)]
    pub implements: Vec<String>,
    /// Traits pulled in via `use` inside the class body.
    #[serde(default)]
    pub uses: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Symbol {
    pub fn fully_qualified_name(&self) -> String {
        join_fqn(&self.namespace, &self.name)
    }

    /// Stable identity used for table insertion/replacement semantics.
    pub fn id(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}:{}::{}", self.kind, parent, self.name),
            None => format!("{}:{}", self.kind, self.fully_qualified_name()),
        }
    }

    pub fn is_magic_method(&self) -> bool {
        self.metadata.get("isMagic").map(String::as_str) == Some("true")
    }
}

/// The closed set of reference kinds the reference collector produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    New,
    Extends,
    Implements,
    UseTrait,
    UseImport,
    StaticCall,
    StaticProperty,
    Constant,
    FunctionCall,
    MethodCall,
    PropertyAccess,
    Instanceof,
    TypeHint,
    ReturnType,
    Catch,
    ClassString,
}

/// Sentinel used for a reference whose target could not be resolved statically.
pub const DYNAMIC_TARGET: &str = "(dynamic)";

/// One use-site extracted by the reference collector (or synthesized by a plugin).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub symbol_name: String,
    pub symbol_parent: Option<String>,
    pub file_path: String,
    pub line: u32,
    pub context: String,
    #[serde(default)]
    pub is_dynamic: bool,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Populated only for `ClassString`/callback-rescue references: the set of
    /// literal strings seen alongside this reference, used by the function
    /// analyzer's callback-string sweep.
    #[serde(default)]
    pub string_literals: Vec<String>,
}

impl Reference {
    pub fn dynamic(kind: ReferenceKind, file_path: &str, line: u32, context: &str) -> Self {
        Self {
            kind,
            symbol_name: DYNAMIC_TARGET.to_string(),
            symbol_parent: None,
            file_path: file_path.to_string(),
            line,
            context: context.to_string(),
            is_dynamic: true,
            metadata: BTreeMap::new(),
            string_literals: Vec::new(),
        }
    }
}

/// Severity of a reported issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// The kind of issue an analyzer reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    UnusedFiles,
    UnusedClasses,
    UnusedInterfaces,
    UnusedTraits,
    UnusedMethods,
    UnusedFunctions,
    UnusedConstants,
    UnusedProperties,
    UnusedUseStatements,
    UnusedDependencies,
}

/// One finding surfaced to a reporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub symbol: Option<String>,
    pub symbol_kind: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fqn_join_handles_empty_namespace() {
        assert_eq!(join_fqn("", "Foo"), "Foo");
        assert_eq!(join_fqn("App\\Models", "Foo"), "App\\Models\\Foo");
    }

    #[test]
    fn short_name_takes_last_segment() {
        assert_eq!(short_name("App\\Models\\Foo"), "Foo");
        assert_eq!(short_name("Foo"), "Foo");
    }

    #[test]
    fn symbol_id_distinguishes_members_by_parent() {
        let method = Symbol {
            kind: Kind::Method,
            name: "helper".into(),
            namespace: String::new(),
            parent: Some("App\\Svc".into()),
            visibility: Visibility::Private,
            is_static: false,
            is_abstract: false,
            is_final: false,
            file_path: "src/Svc.php".into(),
            start_line: 10,
            end_line: 12,
            extends: vec![],
            implements: vec![],
            uses: vec![],
            metadata: BTreeMap::new(),
        };
        assert_eq!(method.id(), "method:App\\Svc::helper");
    }
}
