//! Dead code analysis for a dynamically-namespaced, class-based source
//! language, driven by matching-rule analyzers rather than graph
//! reachability.
//!
//! The source-language parser is an external collaborator: callers hand in
//! an already-parsed [`ast::SourceFile`] per file. This crate owns symbol
//! and reference collection, the autoload-aware dependency analysis, the
//! plugin layer, and the ten analyzers that turn all of it into [`Issue`]s.
//!
//! # Example
//!
//! ```ignore
//! use husk_analysis_dead_code::{DeadCodeAnalyzer, Config};
//! use std::path::Path;
//!
//! let report = DeadCodeAnalyzer::analyze(
//!     &parsed_files,
//!     Path::new("."),
//!     Some(&manifest_json),
//!     Some(&lock_json),
//!     Config::default(),
//! )?;
//! for issue in &report.issues {
//!     println!("{:?}: {}", issue.severity, issue.message);
//! }
//! ```

pub mod analyzers;
pub mod ast;
pub mod autoload;
pub mod collect;
pub mod config;
pub mod context;
mod error;
pub mod manifest;
pub mod plugins;
pub mod symbol_table;
pub mod types;

pub use config::Config;
pub use error::Error;
pub use types::*;

use ast::SourceFile;
use collect::{collect_file, FileCollection, ImportRecord};
use config::FrameworkHint;
use context::AnalysisContext;
use manifest::{Lockfile, Manifest};
use plugins::{ManifestView, PluginManager};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use symbol_table::SymbolTable;
use tracing::info;

/// Runs the symbol/reference collectors over every file, one after another.
pub fn collect_sequential(files: &[SourceFile]) -> Vec<FileCollection> {
    files.iter().map(collect_file).collect()
}

/// Runs the symbol/reference collectors in parallel over every file. Results
/// are returned in the same order as `files`, so merging them produces the
/// same symbol table and reference list as [`collect_sequential`] regardless
/// of worker scheduling.
#[cfg(feature = "parallel")]
pub fn collect_parallel(files: &[SourceFile]) -> Vec<FileCollection> {
    use rayon::prelude::*;
    files.par_iter().map(collect_file).collect()
}

fn merge_collections(
    collections: Vec<FileCollection>,
) -> (SymbolTable, Vec<types::Reference>, Vec<(String, Vec<ImportRecord>)>) {
    let mut symbols = SymbolTable::new();
    let mut references = Vec::new();
    // Insertion-ordered by first-seen file path: an index map keeps `HashMap`
    // out of the iteration path so `all_imports()` output stays deterministic.
    let mut import_order: HashMap<String, usize> = HashMap::new();
    let mut imports: Vec<(String, Vec<ImportRecord>)> = Vec::new();

    for collection in collections {
        for symbol in collection.symbols {
            symbols.add(symbol);
        }
        references.extend(collection.references);
        for (path, records) in collection.imports {
            match import_order.get(&path) {
                Some(&idx) => imports[idx].1.extend(records),
                None => {
                    import_order.insert(path.clone(), imports.len());
                    imports.push((path, records));
                }
            }
        }
    }

    (symbols, references, imports)
}

/// Aggregate counts describing one analysis run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub files_analyzed: usize,
    pub symbols_collected: usize,
    pub references_collected: usize,
    pub issues_found: usize,
    pub duration_ms: u64,
}

/// The result of one analysis run.
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub issues: Vec<types::Issue>,
    pub stats: Stats,
}

pub struct DeadCodeAnalyzer;

impl DeadCodeAnalyzer {
    /// Runs the full pipeline: collection, autoload resolution, plugin
    /// activation, then every analyzer. `manifest_json`/`lock_json` are
    /// optional; without a manifest the dependency analyzer is a no-op.
    pub fn analyze(
        files: &[SourceFile],
        project_root: &Path,
        manifest_json: Option<&str>,
        lock_json: Option<&str>,
        mut config: Config,
    ) -> Result<Report, Error> {
        let start = Instant::now();
        info!(file_count = files.len(), "starting dead code analysis");

        let filtered_files: Vec<SourceFile>;
        let files = match &config.file_types {
            Some(extensions) => {
                filtered_files = files
                    .iter()
                    .filter(|f| {
                        Path::new(&f.path)
                            .extension()
                            .and_then(|ext| ext.to_str())
                            .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
                    })
                    .cloned()
                    .collect();
                filtered_files.as_slice()
            }
            None => files,
        };

        let collections = collect_sequential(files);
        let (mut symbols, mut references, imports) = merge_collections(collections);
        info!(
            symbols = symbols.stats().total,
            references = references.len(),
            "collected symbols and references"
        );

        let manifest: Option<Manifest> = manifest_json.map(Manifest::from_json).transpose()?;
        let lockfile = lock_json.map(Lockfile::from_json).transpose()?.unwrap_or_default();

        let dependency_names: Vec<String> = manifest
            .as_ref()
            .map(|m| m.all_dependencies().into_iter().map(|(name, _)| name).collect())
            .unwrap_or_default();
        let manifest_view = ManifestView {
            dependency_names: dependency_names.iter().map(String::as_str).collect(),
        };

        let mut plugins = PluginManager::with_builtin_plugins();
        match &config.framework {
            FrameworkHint::Auto => plugins.activate(project_root, &manifest_view, None),
            FrameworkHint::Named(name) => plugins.activate(project_root, &manifest_view, Some(name)),
            FrameworkHint::None => {}
        }
        info!(active_plugins = ?plugins.active_plugin_names(), "activated plugins");

        plugins.process_symbols(&mut symbols, project_root);
        references.extend(plugins.additional_references(project_root));
        config.entry_points.extend(plugins.entry_points(project_root));

        let mut context = AnalysisContext::new(symbols, references, config, imports, &plugins);
        if let Some(manifest) = manifest {
            let autoload = autoload::AutoloadResolver::build(&manifest, &lockfile);
            context = context.with_dependencies(manifest, autoload);
        }

        let mut issues = analyzers::run_all(&context);
        if let Some(max_results) = context.config.max_results {
            if issues.len() > max_results {
                issues.truncate(max_results);
            }
        }
        let duration_ms = start.elapsed().as_millis() as u64;
        info!(issues = issues.len(), duration_ms, "analysis complete");

        Ok(Report {
            stats: Stats {
                files_analyzed: files.len(),
                symbols_collected: context.symbols.stats().total,
                references_collected: context.references().len(),
                issues_found: issues.len(),
                duration_ms,
            },
            issues,
        })
    }
}
