//! Plugin layer: framework detection contributing ignore patterns, synthetic
//! references, entry points, and symbol metadata.

pub mod framework_a;
pub mod framework_b;
pub mod framework_c;

use crate::symbol_table::SymbolTable;
use crate::types::Reference;
use husk_analysis_common::glob::{any_path_glob_matches, any_symbol_glob_matches};
use std::path::Path;
use tracing::{info, warn};

/// Minimal view of the manifest a plugin needs to decide applicability,
/// without coupling the plugin layer to the full `Manifest` type.
pub struct ManifestView<'a> {
    pub dependency_names: Vec<&'a str>,
}

/// A framework (or CMS) integration. Every method besides `name` has a
/// sensible default so a plugin only overrides what it actually contributes.
pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Higher runs first when multiple plugins are active.
    fn priority(&self) -> i32 {
        0
    }

    fn is_applicable(&self, _project_root: &Path, _manifest: &ManifestView) -> bool {
        false
    }

    fn ignore_symbol_patterns(&self) -> Vec<String> {
        Vec::new()
    }

    fn ignore_file_patterns(&self) -> Vec<String> {
        Vec::new()
    }

    fn entry_points(&self, _project_root: &Path) -> Vec<String> {
        Vec::new()
    }

    fn additional_references(&self, _project_root: &Path) -> Vec<Reference> {
        Vec::new()
    }

    /// Mutates symbol metadata in place (e.g. tagging controller actions as
    /// framework-managed). Never removes or replaces symbols.
    fn process_symbols(&self, _symbols: &mut SymbolTable, _project_root: &Path) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActivationState {
    Inactive,
    Activated,
}

/// Selects, sorts, and aggregates the framework plugins relevant to a project.
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
    active: Vec<usize>,
    state: ActivationState,
}

impl PluginManager {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            active: Vec::new(),
            state: ActivationState::Inactive,
        }
    }

    /// The three built-in framework plugins, in registration order.
    pub fn with_builtin_plugins() -> Self {
        let mut manager = Self::new();
        manager.register_plugin(Box::new(framework_a::FrameworkAPlugin::new()));
        manager.register_plugin(Box::new(framework_b::FrameworkBPlugin::new()));
        manager.register_plugin(Box::new(framework_c::FrameworkCPlugin::new()));
        manager
    }

    /// Registering a plugin after activation invalidates the activation; the
    /// caller must call `activate` again before querying ignore/entry state.
    pub fn register_plugin(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.push(plugin);
        self.state = ActivationState::Inactive;
        self.active.clear();
    }

    /// Activates the plugin set for one project. `framework_hint` of `Some(name)`
    /// restricts activation to the named plugin; `None` probes `is_applicable`
    /// on every registered plugin.
    pub fn activate(&mut self, project_root: &Path, manifest: &ManifestView, framework_hint: Option<&str>) {
        let mut indices: Vec<usize> = match framework_hint {
            Some(name) => self
                .plugins
                .iter()
                .enumerate()
                .filter(|(_, p)| p.name() == name)
                .map(|(i, _)| i)
                .collect(),
            None => self
                .plugins
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_applicable(project_root, manifest))
                .map(|(i, _)| i)
                .collect(),
        };

        indices.sort_by_key(|&i| std::cmp::Reverse(self.plugins[i].priority()));
        info!(
            active_plugins = ?indices.iter().map(|&i| self.plugins[i].name()).collect::<Vec<_>>(),
            "activated plugins"
        );
        self.active = indices;
        self.state = ActivationState::Activated;
    }

    fn active_plugins(&self) -> impl Iterator<Item = &Box<dyn Plugin>> {
        self.active.iter().map(move |&i| &self.plugins[i])
    }

    pub fn active_plugin_names(&self) -> Vec<&str> {
        self.active_plugins().map(|p| p.name()).collect()
    }

    pub fn should_ignore_symbol(&self, name: &str) -> bool {
        self.active_plugins()
            .any(|p| any_symbol_glob_matches(&p.ignore_symbol_patterns(), name))
    }

    pub fn should_ignore_file(&self, path: &str) -> bool {
        self.active_plugins()
            .any(|p| any_path_glob_matches(&p.ignore_file_patterns(), path))
    }

    pub fn entry_points(&self, project_root: &Path) -> Vec<String> {
        self.active_plugins()
            .flat_map(|p| p.entry_points(project_root))
            .collect()
    }

    pub fn additional_references(&self, project_root: &Path) -> Vec<Reference> {
        self.active_plugins()
            .flat_map(|p| p.additional_references(project_root))
            .collect()
    }

    pub fn process_symbols(&self, symbols: &mut SymbolTable, project_root: &Path) {
        for plugin in self.active_plugins() {
            plugin.process_symbols(symbols, project_root);
        }
    }

    pub fn is_activated(&self) -> bool {
        self.state == ActivationState::Activated
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared regex-extraction helper: best-effort scan of `path`'s contents,
/// absorbing I/O and parse failures rather than aborting the whole plugin.
pub(crate) fn read_file_lossy(path: &Path, plugin_name: &str) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(e) => {
            warn!(plugin = plugin_name, file = %path.display(), error = %e, "plugin file read failed");
            None
        }
    }
}
