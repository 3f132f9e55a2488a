//! The AST contract the symbol and reference collectors visit.
//!
//! The source-language parser is an external collaborator: something upstream
//! turns source text into the tree below. This module only defines the shape
//! of that tree, mirroring the set of node kinds a parser is required to
//! distinguish. Where a node's target cannot be determined without runtime
//! information (a variable holding a class name, a computed method name) the
//! corresponding field is a tagged enum whose `Dynamic` variant the reference
//! collector propagates as `is_dynamic = true` rather than guessing.

use serde::{Deserialize, Serialize};

/// A 1-indexed source line, the only position info a node is required to carry.
pub type Line = u32;

/// Either a statically-known name or a target that can only be known at runtime
/// (e.g. `new $className()`, `$obj->$method()`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameTarget {
    Name(String),
    Dynamic,
}

/// The class side of a `new` / static-access / `instanceof` expression.
pub type ClassTarget = NameTarget;

/// A member name (method or property) that may be resolved only at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberName {
    Static(String),
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    Class,
    Function,
    Constant,
}

/// A `use X\Y as Z` (or function/const variant) import statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseImport {
    pub path: String,
    pub alias: Option<String>,
    pub kind: ImportKind,
    pub line: Line,
}

/// A type as written in a hint position; flattened for union/intersection/nullable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TypeNode {
    Named(String),
    Nullable(Box<TypeNode>),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
}

impl TypeNode {
    /// Flatten into the list of named leaves this type references.
    pub fn leaf_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeNode::Named(n) => out.push(n.as_str()),
            TypeNode::Nullable(inner) => inner.collect_leaves(out),
            TypeNode::Union(items) | TypeNode::Intersection(items) => {
                for item in items {
                    item.collect_leaves(out);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassLikeKind {
    Class,
    Interface,
    Trait,
    Enum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub type_hint: Option<TypeNode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberVisibility {
    Public,
    Protected,
    Private,
}

impl Default for MemberVisibility {
    fn default() -> Self {
        MemberVisibility::Public
    }
}

/// A statement or expression inside a function/method body relevant to
/// reference extraction. Nodes with nested bodies carry their children so the
/// reference collector can recurse without a separate generic walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Node {
    New {
        class: ClassTarget,
        line: Line,
    },
    Instanceof {
        class: ClassTarget,
        line: Line,
    },
    StaticCall {
        class: ClassTarget,
        method: MemberName,
        /// literal string arguments, used by the function analyzer's
        /// callback-string rescue when this call is e.g. `call_user_func`.
        string_args: Vec<String>,
        line: Line,
    },
    StaticPropertyFetch {
        class: ClassTarget,
        property: MemberName,
        line: Line,
    },
    ClassConstFetch {
        class: ClassTarget,
        name: String,
        line: Line,
    },
    BareConstantFetch {
        name: String,
        line: Line,
    },
    FunctionCall {
        name: NameTarget,
        string_args: Vec<String>,
        line: Line,
    },
    MethodCall {
        method: MemberName,
        line: Line,
    },
    PropertyAccess {
        property: MemberName,
        line: Line,
    },
    Define {
        name_literal: Option<String>,
        line: Line,
    },
    Catch {
        types: Vec<String>,
        line: Line,
        body: Vec<Node>,
    },
    /// A structural container (if/while/block/...) with no reference meaning
    /// of its own besides holding further nodes to visit.
    Block(Vec<Node>),
}

impl Node {
    /// Nodes directly nested under this one, for recursive traversal.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Catch { body, .. } => body,
            Node::Block(items) => items,
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub visibility: MemberVisibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub params: Vec<Param>,
    pub return_type: Option<TypeNode>,
    pub body: Vec<Node>,
    pub line: Line,
    pub end_line: Line,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub name: String,
    pub visibility: MemberVisibility,
    pub is_static: bool,
    pub line: Line,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassConstDecl {
    pub name: String,
    pub visibility: MemberVisibility,
    pub line: Line,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassLikeDecl {
    pub kind: ClassLikeKind,
    pub name: String,
    pub is_abstract: bool,
    pub is_final: bool,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub uses: Vec<String>,
    pub consts: Vec<ClassConstDecl>,
    pub properties: Vec<PropertyDecl>,
    pub methods: Vec<MethodDecl>,
    pub line: Line,
    pub end_line: Line,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<TypeNode>,
    pub body: Vec<Node>,
    pub line: Line,
    pub end_line: Line,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstDecl {
    pub name: String,
    pub line: Line,
}

/// A namespace block: either the file's single namespace, or empty for the
/// global namespace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceBlock {
    pub name: String,
    pub uses: Vec<UseImport>,
    pub class_likes: Vec<ClassLikeDecl>,
    pub functions: Vec<FunctionDecl>,
    pub consts: Vec<ConstDecl>,
    /// `define("X", ...)` calls made at the top level of this namespace.
    pub defines: Vec<Node>,
}

/// One parsed source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    pub namespaces: Vec<NamespaceBlock>,
}
