//! Configuration consumed by the analyzers and the plugin layer.

use serde::{Deserialize, Serialize};

/// Glob-based ignore lists, one per concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IgnoreConfig {
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Which concrete framework plugin to activate, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameworkHint {
    /// Probe each plugin's `is_applicable` and activate every match.
    #[default]
    Auto,
    /// Activate exactly the named plugin.
    Named(String),
    /// Activate no plugins.
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root the project's paths are relativized against when matching globs.
    #[serde(default, rename = "basePath")]
    pub base_path: String,

    /// Additional project-specific entry-point path globs, merged with the
    /// analyzer's built-in defaults and any plugin-contributed entry points.
    #[serde(default)]
    pub entry_points: Vec<String>,

    #[serde(default)]
    pub ignore: IgnoreConfig,

    #[serde(default)]
    pub framework: FrameworkHint,

    /// Minimum number of matching references a symbol needs before it counts
    /// as used. Raising this past 1 lets a lone, possibly spurious reference
    /// be ignored; 0 would mark every symbol as used and disable detection.
    #[serde(default = "default_min_reference_threshold")]
    pub min_reference_threshold: usize,

    /// Caps the number of issues a run returns, keeping the highest-severity
    /// ones (ties broken by the order `analyzers::run_all` produced them in).
    /// `None` returns every issue found.
    #[serde(default)]
    pub max_results: Option<usize>,

    /// Restricts collection to files whose extension (without the leading
    /// dot) is in this list. `None` analyzes every file handed in.
    #[serde(default)]
    pub file_types: Option<Vec<String>>,
}

fn default_min_reference_threshold() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            entry_points: Vec::new(),
            ignore: IgnoreConfig::default(),
            framework: FrameworkHint::default(),
            min_reference_threshold: default_min_reference_threshold(),
            max_results: None,
            file_types: None,
        }
    }
}

impl Config {
    /// Strips `base_path` from a path, for glob matching against
    /// project-relative patterns.
    pub fn relativize<'a>(&self, path: &'a str) -> &'a str {
        if self.base_path.is_empty() {
            return path;
        }
        path.strip_prefix(&self.base_path)
            .map(|rest| rest.trim_start_matches('/'))
            .unwrap_or(path)
    }
}
