//! Reference collector: walks a parsed source file and extracts (and
//! resolves) name references.

use crate::ast::{
    ClassLikeDecl, ClassTarget, FunctionDecl, ImportKind, MemberName, MethodDecl, NameTarget,
    NamespaceBlock, Node, SourceFile, TypeNode, UseImport,
};
use crate::types::{join_fqn, Reference, ReferenceKind, NS_SEP};
use std::collections::HashMap;
use tracing::debug;

const BUILTIN_TYPES: &[&str] = &[
    "int", "string", "bool", "float", "array", "object", "callable", "iterable", "void", "null",
    "mixed", "never", "true", "false", "self", "static", "parent",
];

fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Per-namespace alias maps built from that namespace's `use` statements,
/// one per import kind since PHP keeps separate symbol tables for
/// classes/functions/constants.
#[derive(Debug, Default)]
struct AliasMaps {
    classes: HashMap<String, String>,
    functions: HashMap<String, String>,
    consts: HashMap<String, String>,
}

impl AliasMaps {
    fn build(uses: &[UseImport]) -> Self {
        let mut maps = AliasMaps::default();
        for u in uses {
            let short = u
                .alias
                .clone()
                .unwrap_or_else(|| u.path.rsplit(NS_SEP).next().unwrap_or(&u.path).to_string());
            let target = match u.kind {
                ImportKind::Class => &mut maps.classes,
                ImportKind::Function => &mut maps.functions,
                ImportKind::Constant => &mut maps.consts,
            };
            target.insert(short, u.path.clone());
        }
        maps
    }

    fn for_kind(&self, kind: ImportKind) -> &HashMap<String, String> {
        match kind {
            ImportKind::Class => &self.classes,
            ImportKind::Function => &self.functions,
            ImportKind::Constant => &self.consts,
        }
    }
}

/// Resolves a name against the current namespace and an alias map, following
/// the three-step algorithm: strip a leading separator verbatim; else
/// substitute the first segment via the alias map; else prefix with the
/// current namespace.
fn resolve_name(alias_map: &HashMap<String, String>, current_namespace: &str, name: &str) -> String {
    if let Some(stripped) = name.strip_prefix(NS_SEP) {
        return stripped.to_string();
    }
    let mut parts = name.splitn(2, NS_SEP);
    let head = parts.next().unwrap_or(name);
    let rest = parts.next();
    if let Some(target) = alias_map.get(head) {
        return match rest {
            Some(r) => format!("{target}{NS_SEP}{r}"),
            None => target.clone(),
        };
    }
    if current_namespace.is_empty() {
        name.to_string()
    } else {
        format!("{current_namespace}{NS_SEP}{name}")
    }
}

struct FileCtx<'a> {
    file_path: &'a str,
    namespace: &'a str,
    alias: &'a AliasMaps,
    current_class: Option<&'a str>,
}

impl<'a> FileCtx<'a> {
    fn resolve_class(&self, name: &str) -> String {
        match name {
            "self" | "static" => self.current_class.unwrap_or(name).to_string(),
            "parent" => "parent".to_string(),
            _ => resolve_name(&self.alias.classes, self.namespace, name),
        }
    }

    fn resolve_function(&self, name: &str) -> String {
        resolve_name(&self.alias.functions, self.namespace, name)
    }
}

fn class_target_reference(
    target: &ClassTarget,
    ctx: &FileCtx,
    kind: ReferenceKind,
    line: u32,
    context: &str,
) -> Reference {
    match target {
        NameTarget::Name(name) => Reference {
            kind,
            symbol_name: ctx.resolve_class(name),
            symbol_parent: None,
            file_path: ctx.file_path.to_string(),
            line,
            context: context.to_string(),
            is_dynamic: false,
            metadata: Default::default(),
            string_literals: Vec::new(),
        },
        NameTarget::Dynamic => Reference::dynamic(kind, ctx.file_path, line, context),
    }
}

fn member_name_or_dynamic(name: &MemberName) -> Option<&str> {
    match name {
        MemberName::Static(s) => Some(s.as_str()),
        MemberName::Dynamic => None,
    }
}

fn visit_node(node: &Node, ctx: &FileCtx, context: &str, out: &mut Vec<Reference>) {
    match node {
        Node::New { class, line } => {
            out.push(class_target_reference(class, ctx, ReferenceKind::New, *line, context));
        }
        Node::Instanceof { class, line } => {
            out.push(class_target_reference(
                class,
                ctx,
                ReferenceKind::Instanceof,
                *line,
                context,
            ));
        }
        Node::StaticCall {
            class,
            method,
            string_args,
            line,
        } => {
            let class_name = match class {
                NameTarget::Name(n) => Some(ctx.resolve_class(n)),
                NameTarget::Dynamic => None,
            };
            let method_name = member_name_or_dynamic(method);
            let is_dynamic = class_name.is_none() || method_name.is_none();
            let mut reference = Reference {
                kind: ReferenceKind::StaticCall,
                symbol_name: method_name.unwrap_or(crate::types::DYNAMIC_TARGET).to_string(),
                symbol_parent: class_name,
                file_path: ctx.file_path.to_string(),
                line: *line,
                context: context.to_string(),
                is_dynamic,
                metadata: Default::default(),
                string_literals: string_args.clone(),
            };
            if is_dynamic {
                reference.symbol_name = crate::types::DYNAMIC_TARGET.to_string();
            }
            out.push(reference);
        }
        Node::StaticPropertyFetch {
            class,
            property,
            line,
        } => {
            let class_name = match class {
                NameTarget::Name(n) => Some(ctx.resolve_class(n)),
                NameTarget::Dynamic => None,
            };
            let property_name = member_name_or_dynamic(property);
            let is_dynamic = class_name.is_none() || property_name.is_none();
            out.push(Reference {
                kind: ReferenceKind::StaticProperty,
                symbol_name: property_name
                    .unwrap_or(crate::types::DYNAMIC_TARGET)
                    .to_string(),
                symbol_parent: class_name,
                file_path: ctx.file_path.to_string(),
                line: *line,
                context: context.to_string(),
                is_dynamic,
                metadata: Default::default(),
                string_literals: Vec::new(),
            });
        }
        Node::ClassConstFetch { class, name, line } => {
            let class_name = match class {
                NameTarget::Name(n) => Some(ctx.resolve_class(n)),
                NameTarget::Dynamic => None,
            };
            let kind = if name == "class" {
                ReferenceKind::ClassString
            } else {
                ReferenceKind::Constant
            };
            out.push(Reference {
                kind,
                symbol_name: name.clone(),
                symbol_parent: class_name.clone(),
                file_path: ctx.file_path.to_string(),
                line: *line,
                context: context.to_string(),
                is_dynamic: class_name.is_none(),
                metadata: Default::default(),
                string_literals: Vec::new(),
            });
        }
        Node::BareConstantFetch { name, line } => {
            out.push(Reference {
                kind: ReferenceKind::Constant,
                symbol_name: name.clone(),
                symbol_parent: None,
                file_path: ctx.file_path.to_string(),
                line: *line,
                context: context.to_string(),
                is_dynamic: false,
                metadata: Default::default(),
                string_literals: Vec::new(),
            });
        }
        Node::FunctionCall {
            name,
            string_args,
            line,
        } => match name {
            NameTarget::Name(n) if n != "define" => {
                out.push(Reference {
                    kind: ReferenceKind::FunctionCall,
                    symbol_name: ctx.resolve_function(n),
                    symbol_parent: None,
                    file_path: ctx.file_path.to_string(),
                    line: *line,
                    context: context.to_string(),
                    is_dynamic: false,
                    metadata: Default::default(),
                    string_literals: string_args.clone(),
                });
            }
            NameTarget::Name(_) => {}
            NameTarget::Dynamic => {
                let mut reference =
                    Reference::dynamic(ReferenceKind::FunctionCall, ctx.file_path, *line, context);
                reference.string_literals = string_args.clone();
                out.push(reference);
            }
        },
        Node::MethodCall { method, line } => match member_name_or_dynamic(method) {
            Some(name) => out.push(Reference {
                kind: ReferenceKind::MethodCall,
                symbol_name: name.to_string(),
                symbol_parent: None,
                file_path: ctx.file_path.to_string(),
                line: *line,
                context: context.to_string(),
                is_dynamic: false,
                metadata: Default::default(),
                string_literals: Vec::new(),
            }),
            None => out.push(Reference::dynamic(
                ReferenceKind::MethodCall,
                ctx.file_path,
                *line,
                context,
            )),
        },
        Node::PropertyAccess { property, line } => match member_name_or_dynamic(property) {
            Some(name) => out.push(Reference {
                kind: ReferenceKind::PropertyAccess,
                symbol_name: name.to_string(),
                symbol_parent: None,
                file_path: ctx.file_path.to_string(),
                line: *line,
                context: context.to_string(),
                is_dynamic: false,
                metadata: Default::default(),
                string_literals: Vec::new(),
            }),
            None => out.push(Reference::dynamic(
                ReferenceKind::PropertyAccess,
                ctx.file_path,
                *line,
                context,
            )),
        },
        Node::Define { .. } => {
            // Handled by the symbol collector; defining a constant is not a use of one.
        }
        Node::Catch { types, line, .. } => {
            for ty in types {
                if !is_builtin_type(ty) {
                    out.push(Reference {
                        kind: ReferenceKind::Catch,
                        symbol_name: ctx.resolve_class(ty),
                        symbol_parent: None,
                        file_path: ctx.file_path.to_string(),
                        line: *line,
                        context: context.to_string(),
                        is_dynamic: false,
                        metadata: Default::default(),
                        string_literals: Vec::new(),
                    });
                }
            }
            // Recursion into `body` happens via `node.children()` below.
        }
        Node::Block(_) => {
            // Recursion into the block's items happens via `node.children()` below.
        }
    }
    for child in node.children() {
        visit_node(child, ctx, context, out);
    }
}

fn type_hint_references(
    type_node: &TypeNode,
    kind: ReferenceKind,
    ctx: &FileCtx,
    line: u32,
    context: &str,
    out: &mut Vec<Reference>,
) {
    for leaf in type_node.leaf_names() {
        if is_builtin_type(leaf) {
            continue;
        }
        out.push(Reference {
            kind,
            symbol_name: ctx.resolve_class(leaf),
            symbol_parent: None,
            file_path: ctx.file_path.to_string(),
            line,
            context: context.to_string(),
            is_dynamic: false,
            metadata: Default::default(),
            string_literals: Vec::new(),
        });
    }
}

fn function_like_references(
    context: &str,
    params: &[crate::ast::Param],
    return_type: &Option<TypeNode>,
    body: &[Node],
    line: u32,
    ctx: &FileCtx,
    out: &mut Vec<Reference>,
) {
    for param in params {
        if let Some(type_hint) = &param.type_hint {
            type_hint_references(type_hint, ReferenceKind::TypeHint, ctx, line, context, out);
        }
    }
    if let Some(return_type) = return_type {
        type_hint_references(return_type, ReferenceKind::ReturnType, ctx, line, context, out);
    }
    for stmt in body {
        visit_node(stmt, ctx, context, out);
    }
}

fn class_like_references(decl: &ClassLikeDecl, ctx: &FileCtx, out: &mut Vec<Reference>) {
    for parent in &decl.extends {
        out.push(Reference {
            kind: ReferenceKind::Extends,
            symbol_name: ctx.resolve_class(parent),
            symbol_parent: None,
            file_path: ctx.file_path.to_string(),
            line: decl.line,
            context: decl.name.clone(),
            is_dynamic: false,
            metadata: Default::default(),
            string_literals: Vec::new(),
        });
    }
    for iface in &decl.implements {
        out.push(Reference {
            kind: ReferenceKind::Implements,
            symbol_name: ctx.resolve_class(iface),
            symbol_parent: None,
            file_path: ctx.file_path.to_string(),
            line: decl.line,
            context: decl.name.clone(),
            is_dynamic: false,
            metadata: Default::default(),
            string_literals: Vec::new(),
        });
    }
    for used_trait in &decl.uses {
        out.push(Reference {
            kind: ReferenceKind::UseTrait,
            symbol_name: ctx.resolve_class(used_trait),
            symbol_parent: None,
            file_path: ctx.file_path.to_string(),
            line: decl.line,
            context: decl.name.clone(),
            is_dynamic: false,
            metadata: Default::default(),
            string_literals: Vec::new(),
        });
    }

    let class_fqn = join_fqn(ctx.namespace, &decl.name);
    let method_ctx = FileCtx {
        current_class: Some(&class_fqn),
        ..*ctx
    };

    for method in &decl.methods {
        let context = format!("{}::{}", decl.name, method.name);
        function_like_references(
            &context,
            &method.params,
            &method.return_type,
            &method.body,
            method.line,
            &method_ctx,
            out,
        );
    }
}

fn collect_namespace_references(ns: &NamespaceBlock, file_path: &str, out: &mut Vec<Reference>) {
    let alias = AliasMaps::build(&ns.uses);

    for u in &ns.uses {
        out.push(Reference {
            kind: ReferenceKind::UseImport,
            symbol_name: u.path.clone(),
            symbol_parent: None,
            file_path: file_path.to_string(),
            line: u.line,
            context: ns.name.clone(),
            is_dynamic: false,
            metadata: u
                .alias
                .clone()
                .map(|a| {
                    let mut m = std::collections::BTreeMap::new();
                    m.insert("alias".to_string(), a);
                    m
                })
                .unwrap_or_default(),
            string_literals: Vec::new(),
        });
    }

    let ctx = FileCtx {
        file_path,
        namespace: &ns.name,
        alias: &alias,
        current_class: None,
    };

    for class_like in &ns.class_likes {
        class_like_references(class_like, &ctx, out);
    }

    for function in &ns.functions {
        let FunctionDecl {
            name,
            params,
            return_type,
            body,
            line,
            ..
        } = function;
        function_like_references(name, params, return_type, body, *line, &ctx, out);
    }
}

/// Per-file import record consumed by the use-statement analyzer.
#[derive(Debug, Clone)]
pub struct ImportRecord {
    pub fqn: String,
    pub alias: Option<String>,
    pub line: u32,
    pub kind: ImportKind,
}

pub fn collect_imports(file: &SourceFile) -> Vec<(String, Vec<ImportRecord>)> {
    file.namespaces
        .iter()
        .map(|ns| {
            let records = ns
                .uses
                .iter()
                .map(|u| ImportRecord {
                    fqn: u.path.clone(),
                    alias: u.alias.clone(),
                    line: u.line,
                    kind: u.kind,
                })
                .collect();
            (file.path.clone(), records)
        })
        .collect()
}

/// Extracts every reference in `file`.
pub fn collect_references(file: &SourceFile) -> Vec<Reference> {
    let mut out = Vec::new();
    for ns in &file.namespaces {
        collect_namespace_references(ns, &file.path, &mut out);
    }
    debug!(file = %file.path, reference_count = out.len(), "collected references");
    out
}
