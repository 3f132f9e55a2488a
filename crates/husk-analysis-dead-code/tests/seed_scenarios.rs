//! End-to-end pipeline tests for the literal seed scenarios: build a small
//! in-memory AST, run the full analyzer, and check the issues it produces.

use husk_analysis_dead_code::ast::{
    ClassLikeDecl, ClassLikeKind, ClassTarget, FunctionDecl, ImportKind, MemberVisibility,
    MethodDecl, NameTarget, NamespaceBlock, Node, SourceFile, UseImport,
};
use husk_analysis_dead_code::{Config, DeadCodeAnalyzer, IssueKind, Severity};
use std::path::Path;

fn empty_class(name: &str, namespace: &str, file: &str, line: u32) -> SourceFile {
    SourceFile {
        path: file.to_string(),
        namespaces: vec![NamespaceBlock {
            name: namespace.to_string(),
            uses: vec![],
            class_likes: vec![ClassLikeDecl {
                kind: ClassLikeKind::Class,
                name: name.to_string(),
                is_abstract: false,
                is_final: false,
                extends: vec![],
                implements: vec![],
                uses: vec![],
                consts: vec![],
                properties: vec![],
                methods: vec![],
                line,
                end_line: line + 5,
            }],
            functions: vec![],
            consts: vec![],
            defines: vec![],
        }],
    }
}

#[test]
fn scenario_1_unused_class_with_no_exemption() {
    let file = empty_class("B", "A", "src/B.php", 10);

    let report =
        DeadCodeAnalyzer::analyze(&[file], Path::new("."), None, None, Config::default()).unwrap();

    let class_issues: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::UnusedClasses)
        .collect();
    assert_eq!(class_issues.len(), 1);
    let issue = class_issues[0];
    assert_eq!(issue.symbol.as_deref(), Some("A\\B"));
    assert_eq!(issue.file.as_deref(), Some("src/B.php"));
    assert_eq!(issue.line, Some(10));
    assert_eq!(issue.severity, Severity::Error);
}

#[test]
fn scenario_2_abstract_base_preserved_via_extends() {
    let decl_file = SourceFile {
        path: "src/Hierarchy.php".to_string(),
        namespaces: vec![NamespaceBlock {
            name: "A".to_string(),
            uses: vec![],
            class_likes: vec![
                ClassLikeDecl {
                    kind: ClassLikeKind::Class,
                    name: "Base".to_string(),
                    is_abstract: true,
                    is_final: false,
                    extends: vec![],
                    implements: vec![],
                    uses: vec![],
                    consts: vec![],
                    properties: vec![],
                    methods: vec![],
                    line: 3,
                    end_line: 6,
                },
                ClassLikeDecl {
                    kind: ClassLikeKind::Class,
                    name: "Derived".to_string(),
                    is_abstract: false,
                    is_final: false,
                    extends: vec!["Base".to_string()],
                    implements: vec![],
                    uses: vec![],
                    consts: vec![],
                    properties: vec![],
                    methods: vec![],
                    line: 8,
                    end_line: 12,
                },
            ],
            functions: vec![],
            consts: vec![],
            defines: vec![],
        }],
    };

    let usage_file = SourceFile {
        path: "src/app.php".to_string(),
        namespaces: vec![NamespaceBlock {
            name: "A".to_string(),
            uses: vec![],
            class_likes: vec![],
            functions: vec![FunctionDecl {
                name: "run".to_string(),
                params: vec![],
                return_type: None,
                body: vec![Node::New {
                    class: ClassTarget::Name("Derived".to_string()),
                    line: 20,
                }],
                line: 18,
                end_line: 22,
            }],
            consts: vec![],
            defines: vec![],
        }],
    };

    let report = DeadCodeAnalyzer::analyze(
        &[decl_file, usage_file],
        Path::new("."),
        None,
        None,
        Config::default(),
    )
    .unwrap();

    let class_issues: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::UnusedClasses)
        .collect();
    assert!(class_issues.is_empty());
}

#[test]
fn scenario_3_use_statement_short_name_propagation() {
    let used_file = SourceFile {
        path: "src/U.php".to_string(),
        namespaces: vec![NamespaceBlock {
            name: "App".to_string(),
            uses: vec![UseImport {
                path: "X\\Y\\Helper".to_string(),
                alias: Some("Helper".to_string()),
                kind: ImportKind::Class,
                line: 5,
            }],
            class_likes: vec![],
            functions: vec![FunctionDecl {
                name: "main".to_string(),
                params: vec![],
                return_type: None,
                body: vec![Node::New {
                    class: ClassTarget::Name("Helper".to_string()),
                    line: 20,
                }],
                line: 18,
                end_line: 22,
            }],
            consts: vec![],
            defines: vec![],
        }],
    };

    let unused_file = SourceFile {
        path: "src/U2.php".to_string(),
        namespaces: vec![NamespaceBlock {
            name: "App".to_string(),
            uses: vec![UseImport {
                path: "X\\Y\\Helper".to_string(),
                alias: Some("Helper".to_string()),
                kind: ImportKind::Class,
                line: 5,
            }],
            class_likes: vec![],
            functions: vec![],
            consts: vec![],
            defines: vec![],
        }],
    };

    let report = DeadCodeAnalyzer::analyze(
        &[used_file, unused_file],
        Path::new("."),
        None,
        None,
        Config::default(),
    )
    .unwrap();

    let use_issues: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::UnusedUseStatements)
        .collect();
    assert_eq!(use_issues.len(), 1);
    assert_eq!(use_issues[0].file.as_deref(), Some("src/U2.php"));
    assert_eq!(use_issues[0].line, Some(5));
}

#[test]
fn scenario_4_private_magic_method_is_exempt() {
    let file = SourceFile {
        path: "src/Svc.php".to_string(),
        namespaces: vec![NamespaceBlock {
            name: "App".to_string(),
            uses: vec![],
            class_likes: vec![ClassLikeDecl {
                kind: ClassLikeKind::Class,
                name: "Svc".to_string(),
                is_abstract: false,
                is_final: false,
                extends: vec![],
                implements: vec![],
                uses: vec![],
                consts: vec![],
                properties: vec![],
                methods: vec![
                    MethodDecl {
                        name: "__toString".to_string(),
                        visibility: MemberVisibility::Private,
                        is_static: false,
                        is_abstract: false,
                        is_final: false,
                        params: vec![],
                        return_type: None,
                        body: vec![],
                        line: 6,
                        end_line: 8,
                    },
                    MethodDecl {
                        name: "helper".to_string(),
                        visibility: MemberVisibility::Private,
                        is_static: false,
                        is_abstract: false,
                        is_final: false,
                        params: vec![],
                        return_type: None,
                        body: vec![],
                        line: 10,
                        end_line: 12,
                    },
                ],
                line: 4,
                end_line: 14,
            }],
            functions: vec![],
            consts: vec![],
            defines: vec![],
        }],
    };

    let report =
        DeadCodeAnalyzer::analyze(&[file], Path::new("."), None, None, Config::default()).unwrap();

    let method_issues: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::UnusedMethods)
        .collect();
    assert_eq!(method_issues.len(), 1);
    assert_eq!(method_issues[0].symbol.as_deref(), Some("App\\Svc::helper"));
}

#[test]
fn scenario_5_unused_dev_dependency_is_info() {
    let manifest_json = r#"{
        "name": "acme/app",
        "require-dev": { "phpunit/phpunit": "^9" }
    }"#;
    let lock_json = r#"{
        "packages-dev": [
            { "name": "phpunit/phpunit", "version": "9.5.0",
              "autoload": { "psr-4": { "PHPUnit\\": "src/" } } }
        ]
    }"#;

    let report = DeadCodeAnalyzer::analyze(
        &[],
        Path::new("."),
        Some(manifest_json),
        Some(lock_json),
        Config::default(),
    )
    .unwrap();

    let dependency_issues: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.kind == IssueKind::UnusedDependencies)
        .collect();
    assert_eq!(dependency_issues.len(), 1);
    assert_eq!(dependency_issues[0].severity, Severity::Info);
    assert_eq!(dependency_issues[0].symbol.as_deref(), Some("phpunit/phpunit"));
    assert_eq!(
        dependency_issues[0].metadata.get("isDev").map(String::as_str),
        Some("true")
    );
}

#[test]
fn scenario_6_function_callback_string_rescue() {
    let file = SourceFile {
        path: "src/run.php".to_string(),
        namespaces: vec![NamespaceBlock {
            name: "App".to_string(),
            uses: vec![],
            class_likes: vec![],
            functions: vec![
                FunctionDecl {
                    name: "my_callback".to_string(),
                    params: vec![],
                    return_type: None,
                    body: vec![],
                    line: 4,
                    end_line: 6,
                },
                FunctionDecl {
                    name: "run".to_string(),
                    params: vec![],
                    return_type: None,
                    body: vec![Node::FunctionCall {
                        name: NameTarget::Name("array_map".to_string()),
                        string_args: vec!["App\\my_callback".to_string()],
                        line: 9,
                    }],
                    line: 8,
                    end_line: 10,
                },
            ],
            consts: vec![],
            defines: vec![],
        }],
    };

    let report =
        DeadCodeAnalyzer::analyze(&[file], Path::new("."), None, None, Config::default()).unwrap();

    let rescued = report
        .issues
        .iter()
        .find(|i| i.symbol.as_deref() == Some("App\\my_callback"));
    assert!(rescued.is_none());
}
