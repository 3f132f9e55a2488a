//! Parsing for `manifest.json` and `lock.json`.

use husk_analysis_common::AnalysisError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A PSR-4/PSR-0 prefix entry: either one directory or several.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathOrPaths {
    One(String),
    Many(Vec<String>),
}

impl PathOrPaths {
    pub fn as_vec(&self) -> Vec<String> {
        match self {
            PathOrPaths::One(p) => vec![p.clone()],
            PathOrPaths::Many(p) => p.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutoloadSection {
    #[serde(rename = "psr-4", default)]
    pub psr4: HashMap<String, PathOrPaths>,
    #[serde(rename = "psr-0", default)]
    pub psr0: HashMap<String, PathOrPaths>,
    #[serde(default)]
    pub classmap: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
}

/// The project's own `manifest.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub name: Option<String>,
    #[serde(default)]
    pub require: HashMap<String, String>,
    #[serde(rename = "require-dev", default)]
    pub require_dev: HashMap<String, String>,
    #[serde(default)]
    pub autoload: AutoloadSection,
    #[serde(rename = "autoload-dev", default)]
    pub autoload_dev: AutoloadSection,
}

/// Sentinel used in place of a manifest `name` when the project declares none.
pub const PROJECT_SENTINEL: &str = "(project)";

impl Manifest {
    pub fn from_json(data: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(data)
            .map_err(|e| AnalysisError::ConfigError(format!("invalid manifest.json: {e}")))
    }

    pub fn project_name(&self) -> &str {
        self.name.as_deref().unwrap_or(PROJECT_SENTINEL)
    }

    /// All declared dependencies, paired with whether each is a dev dependency.
    pub fn all_dependencies(&self) -> Vec<(String, bool)> {
        let mut out: Vec<(String, bool)> = self
            .require
            .keys()
            .map(|name| (name.clone(), false))
            .collect();
        out.extend(self.require_dev.keys().map(|name| (name.clone(), true)));
        out.sort();
        out
    }
}

/// One installed package entry in `lock.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedPackage {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub autoload: AutoloadSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lockfile {
    #[serde(default)]
    pub packages: Vec<LockedPackage>,
    #[serde(rename = "packages-dev", default)]
    pub packages_dev: Vec<LockedPackage>,
    #[serde(rename = "content-hash", default)]
    pub content_hash: Option<String>,
}

impl Lockfile {
    pub fn from_json(data: &str) -> Result<Self, AnalysisError> {
        serde_json::from_str(data)
            .map_err(|e| AnalysisError::ConfigError(format!("invalid lock.json: {e}")))
    }

    pub fn all_packages(&self) -> impl Iterator<Item = &LockedPackage> {
        self.packages.iter().chain(self.packages_dev.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_parses_require_and_autoload() {
        let raw = r#"{
            "name": "acme/widgets",
            "require": {"acme/core": "^1.0"},
            "require-dev": {"phpunit/phpunit": "^9"},
            "autoload": {"psr-4": {"Acme\\Widgets\\": "src/"}}
        }"#;
        let manifest = Manifest::from_json(raw).unwrap();
        assert_eq!(manifest.project_name(), "acme/widgets");
        assert_eq!(manifest.require.get("acme/core").unwrap(), "^1.0");
        assert!(manifest
            .autoload
            .psr4
            .contains_key("Acme\\Widgets\\"));
    }

    #[test]
    fn manifest_without_name_uses_sentinel() {
        let manifest = Manifest::from_json("{}").unwrap();
        assert_eq!(manifest.project_name(), PROJECT_SENTINEL);
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let err = Manifest::from_json("not json").unwrap_err();
        assert!(matches!(err, AnalysisError::ConfigError(_)));
    }

    #[test]
    fn lockfile_parses_packages_and_dev_packages() {
        let raw = r#"{
            "packages": [{"name": "acme/core", "version": "1.2.0",
                "autoload": {"psr-4": {"Acme\\Core\\": "src/"}}}],
            "packages-dev": [{"name": "phpunit/phpunit", "version": "9.5.0"}]
        }"#;
        let lock = Lockfile::from_json(raw).unwrap();
        assert_eq!(lock.all_packages().count(), 2);
    }
}
