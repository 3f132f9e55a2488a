//! Symbol collector: walks a parsed source file and extracts definition sites.

use crate::ast::{ClassLikeDecl, ClassLikeKind, Node, SourceFile};
use crate::types::{join_fqn, Kind, Symbol, Visibility};
use std::collections::BTreeMap;
use tracing::debug;

fn member_visibility(v: crate::ast::MemberVisibility) -> Visibility {
    match v {
        crate::ast::MemberVisibility::Public => Visibility::Public,
        crate::ast::MemberVisibility::Protected => Visibility::Protected,
        crate::ast::MemberVisibility::Private => Visibility::Private,
    }
}

fn class_like_kind(kind: ClassLikeKind) -> Kind {
    match kind {
        ClassLikeKind::Class => Kind::Class,
        ClassLikeKind::Interface => Kind::Interface,
        ClassLikeKind::Trait => Kind::Trait,
        ClassLikeKind::Enum => Kind::Enum,
    }
}

fn magic_metadata(name: &str) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    if name.starts_with("__") {
        metadata.insert("isMagic".to_string(), "true".to_string());
    }
    metadata
}

fn collect_class_like(
    decl: &ClassLikeDecl,
    namespace: &str,
    file_path: &str,
    out: &mut Vec<Symbol>,
) {
    let fqn = join_fqn(namespace, &decl.name);

    out.push(Symbol {
        kind: class_like_kind(decl.kind),
        name: decl.name.clone(),
        namespace: namespace.to_string(),
        parent: None,
        visibility: Visibility::Public,
        is_static: false,
        is_abstract: decl.is_abstract,
        is_final: decl.is_final,
        file_path: file_path.to_string(),
        start_line: decl.line,
        end_line: decl.end_line,
        extends: decl.extends.clone(),
        implements: decl.implements.clone(),
        uses: decl.uses.clone(),
        metadata: BTreeMap::new(),
    });

    for method in &decl.methods {
        out.push(Symbol {
            kind: Kind::Method,
            name: method.name.clone(),
            namespace: namespace.to_string(),
            parent: Some(fqn.clone()),
            visibility: member_visibility(method.visibility),
            is_static: method.is_static,
            is_abstract: method.is_abstract,
            is_final: method.is_final,
            file_path: file_path.to_string(),
            start_line: method.line,
            end_line: method.end_line,
            extends: vec![],
            implements: vec![],
            uses: vec![],
            metadata: magic_metadata(&method.name),
        });
    }

    for property in &decl.properties {
        out.push(Symbol {
            kind: Kind::Property,
            name: property.name.clone(),
            namespace: namespace.to_string(),
            parent: Some(fqn.clone()),
            visibility: member_visibility(property.visibility),
            is_static: property.is_static,
            is_abstract: false,
            is_final: false,
            file_path: file_path.to_string(),
            start_line: property.line,
            end_line: property.line,
            extends: vec![],
            implements: vec![],
            uses: vec![],
            metadata: BTreeMap::new(),
        });
    }

    for constant in &decl.consts {
        out.push(Symbol {
            kind: Kind::ClassConstant,
            name: constant.name.clone(),
            namespace: namespace.to_string(),
            parent: Some(fqn.clone()),
            visibility: member_visibility(constant.visibility),
            is_static: true,
            is_abstract: false,
            is_final: false,
            file_path: file_path.to_string(),
            start_line: constant.line,
            end_line: constant.line,
            extends: vec![],
            implements: vec![],
            uses: vec![],
            metadata: BTreeMap::new(),
        });
    }
}

/// Extracts every definition site in `file` into a flat symbol list.
///
/// The caller is responsible for adding the result into a `SymbolTable`; this
/// function has no notion of a running table so it can be used per-file in a
/// parallel collection pipeline (see `collect_parallel` in `lib.rs`).
pub fn collect_symbols(file: &SourceFile) -> Vec<Symbol> {
    let mut out = Vec::new();

    for ns in &file.namespaces {
        for class_like in &ns.class_likes {
            collect_class_like(class_like, &ns.name, &file.path, &mut out);
        }

        for function in &ns.functions {
            out.push(Symbol {
                kind: Kind::Function,
                name: function.name.clone(),
                namespace: ns.name.clone(),
                parent: None,
                visibility: Visibility::Public,
                is_static: false,
                is_abstract: false,
                is_final: false,
                file_path: file.path.clone(),
                start_line: function.line,
                end_line: function.end_line,
                extends: vec![],
                implements: vec![],
                uses: vec![],
                metadata: BTreeMap::new(),
            });
        }

        for constant in &ns.consts {
            let mut metadata = BTreeMap::new();
            metadata.insert("definedWith".to_string(), "const".to_string());
            out.push(Symbol {
                kind: Kind::Constant,
                name: constant.name.clone(),
                namespace: ns.name.clone(),
                parent: None,
                visibility: Visibility::Public,
                is_static: false,
                is_abstract: false,
                is_final: false,
                file_path: file.path.clone(),
                start_line: constant.line,
                end_line: constant.line,
                extends: vec![],
                implements: vec![],
                uses: vec![],
                metadata,
            });
        }

        for define in &ns.defines {
            if let Node::Define {
                name_literal: Some(name),
                line,
            } = define
            {
                let mut metadata = BTreeMap::new();
                metadata.insert("definedWith".to_string(), "define".to_string());
                out.push(Symbol {
                    kind: Kind::Constant,
                    name: name.clone(),
                    namespace: String::new(),
                    parent: None,
                    visibility: Visibility::Public,
                    is_static: false,
                    is_abstract: false,
                    is_final: false,
                    file_path: file.path.clone(),
                    start_line: *line,
                    end_line: *line,
                    extends: vec![],
                    implements: vec![],
                    uses: vec![],
                    metadata,
                });
            }
        }
    }

    debug!(file = %file.path, symbol_count = out.len(), "collected symbols");
    out
}
