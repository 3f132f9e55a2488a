//! The read-heavy aggregate analyzers are handed: the symbol table, the
//! reference list, configuration, per-file imports, and plugin hooks.

use crate::autoload::AutoloadResolver;
use crate::collect::ImportRecord;
use crate::config::Config;
use crate::manifest::Manifest;
use crate::plugins::PluginManager;
use crate::symbol_table::SymbolTable;
use crate::types::{Reference, ReferenceKind};

pub struct AnalysisContext<'a> {
    pub symbols: SymbolTable,
    references: Vec<Reference>,
    pub config: Config,
    /// Insertion-ordered (by first-seen file path), matching
    /// `FileCollection::imports`'s own shape, so iterating it never routes
    /// output through a `HashMap`'s hash-dependent order.
    imports: Vec<(String, Vec<ImportRecord>)>,
    plugins: &'a PluginManager,
    manifest: Option<Manifest>,
    autoload: Option<AutoloadResolver>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        symbols: SymbolTable,
        references: Vec<Reference>,
        config: Config,
        imports: Vec<(String, Vec<ImportRecord>)>,
        plugins: &'a PluginManager,
    ) -> Self {
        Self {
            symbols,
            references,
            config,
            imports,
            plugins,
            manifest: None,
            autoload: None,
        }
    }

    /// Attaches the manifest and autoload resolver; the dependency analyzer
    /// is a no-op without them.
    pub fn with_dependencies(mut self, manifest: Manifest, autoload: AutoloadResolver) -> Self {
        self.manifest = Some(manifest);
        self.autoload = Some(autoload);
        self
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }

    pub fn autoload_resolver(&self) -> Option<&AutoloadResolver> {
        self.autoload.as_ref()
    }

    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    /// Appends references collected outside the normal per-file pass (plugin
    /// synthetic references). Never removes or mutates existing entries.
    pub fn add_references(&mut self, mut new_refs: Vec<Reference>) {
        self.references.append(&mut new_refs);
    }

    pub fn references_by_kind(&self, kind: ReferenceKind) -> Vec<&Reference> {
        self.references.iter().filter(|r| r.kind == kind).collect()
    }

    pub fn references_to(&self, name: &str) -> Vec<&Reference> {
        self.references
            .iter()
            .filter(|r| r.symbol_name == name)
            .collect()
    }

    /// A symbol counts as referenced once it has at least
    /// `config.min_reference_threshold` matching references.
    pub fn is_referenced(&self, name: &str, kinds: Option<&[ReferenceKind]>) -> bool {
        let count = self
            .references
            .iter()
            .filter(|r| r.symbol_name == name && kinds.map_or(true, |ks| ks.contains(&r.kind)))
            .count();
        count >= self.config.min_reference_threshold
    }

    pub fn imports_for_file(&self, file_path: &str) -> &[ImportRecord] {
        self.imports
            .iter()
            .find(|(path, _)| path == file_path)
            .map(|(_, records)| records.as_slice())
            .unwrap_or(&[])
    }

    pub fn all_imports(&self) -> impl Iterator<Item = (&String, &Vec<ImportRecord>)> {
        self.imports.iter().map(|(path, records)| (path, records))
    }

    pub fn plugin_ignore_symbol(&self, name: &str) -> bool {
        self.plugins.should_ignore_symbol(name)
    }

    pub fn plugin_ignore_file(&self, path: &str) -> bool {
        self.plugins.should_ignore_file(path)
    }

    pub fn active_plugin_names(&self) -> Vec<&str> {
        self.plugins.active_plugin_names()
    }

    pub fn config_ignore_symbol_matches(&self, name: &str) -> bool {
        husk_analysis_common::glob::any_symbol_glob_matches(&self.config.ignore.symbols, name)
    }

    pub fn config_ignore_path_matches(&self, path: &str) -> bool {
        husk_analysis_common::glob::any_path_glob_matches(&self.config.ignore.paths, path)
    }

    pub fn config_ignore_dependency_matches(&self, name: &str) -> bool {
        husk_analysis_common::glob::any_symbol_glob_matches(&self.config.ignore.dependencies, name)
    }
}
