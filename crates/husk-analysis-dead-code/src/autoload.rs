//! Maps fully-qualified names to the package that provides them, via
//! longest-prefix match over a namespace map built from the lockfile and the
//! project's own autoload declarations.

use crate::manifest::{Lockfile, Manifest, PROJECT_SENTINEL};
use crate::types::NS_SEP;
use std::path::Path;
use tracing::debug;

/// One `namespace_prefix -> package` entry, with the prefix's trailing
/// separator stripped so prefix comparisons are uniform.
#[derive(Debug, Clone)]
struct PrefixEntry {
    prefix: String,
    package: String,
}

#[derive(Debug, Default)]
pub struct AutoloadResolver {
    /// Sorted by descending prefix length so the first match is the longest.
    entries: Vec<PrefixEntry>,
    classmap: Vec<(String, String)>,
    project_name: String,
}

fn strip_trailing_sep(prefix: &str) -> String {
    prefix.trim_end_matches(NS_SEP).to_string()
}

impl AutoloadResolver {
    /// Builds the resolver from a parsed manifest and lockfile.
    pub fn build(manifest: &Manifest, lockfile: &Lockfile) -> Self {
        let project_name = manifest.project_name().to_string();
        let mut entries = Vec::new();

        for pkg in lockfile.all_packages() {
            for (prefix, _) in pkg.autoload.psr4.iter() {
                entries.push(PrefixEntry {
                    prefix: strip_trailing_sep(prefix),
                    package: pkg.name.clone(),
                });
            }
            for (prefix, _) in pkg.autoload.psr0.iter() {
                entries.push(PrefixEntry {
                    prefix: strip_trailing_sep(prefix),
                    package: pkg.name.clone(),
                });
            }
        }

        for (prefix, _) in manifest.autoload.psr4.iter() {
            entries.push(PrefixEntry {
                prefix: strip_trailing_sep(prefix),
                package: project_name.clone(),
            });
        }
        for (prefix, _) in manifest.autoload.psr0.iter() {
            entries.push(PrefixEntry {
                prefix: strip_trailing_sep(prefix),
                package: project_name.clone(),
            });
        }

        // Autoload prefixes come from `HashMap` fields on the parsed manifest/
        // lock (no JSON object has a meaningful "insertion order" once
        // deserialized), so break same-length ties lexicographically rather
        // than relying on a hash iteration order that varies between runs.
        entries.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()).then_with(|| a.prefix.cmp(&b.prefix)));

        debug!(entry_count = entries.len(), "built autoload prefix map");

        Self {
            entries,
            classmap: Vec::new(),
            project_name,
        }
    }

    /// Loads a generated classmap (name -> absolute path) and records package
    /// ownership inferred from the first two path segments under `vendor_dir`.
    pub fn load_classmap(&mut self, vendor_dir: &Path, classmap: &[(String, String)]) {
        for (name, path) in classmap {
            if let Ok(relative) = Path::new(path).strip_prefix(vendor_dir) {
                let mut segments = relative.components();
                if let (Some(vendor), Some(pkg)) = (segments.next(), segments.next()) {
                    let package = format!(
                        "{}/{}",
                        vendor.as_os_str().to_string_lossy(),
                        pkg.as_os_str().to_string_lossy()
                    );
                    self.classmap.push((name.clone(), package));
                    continue;
                }
            }
            self.classmap.push((name.clone(), self.project_name.clone()));
        }
    }

    fn resolve_prefix(&self, fqn: &str) -> Option<&str> {
        for entry in &self.entries {
            if fqn == entry.prefix
                || fqn.starts_with(&format!("{}{}", entry.prefix, NS_SEP))
            {
                return Some(entry.package.as_str());
            }
        }
        None
    }

    /// Resolves a class/interface/trait/enum FQN to the package that provides it.
    pub fn resolve_class(&self, fqn: &str) -> Option<String> {
        if let Some((_, package)) = self.classmap.iter().find(|(name, _)| name == fqn) {
            return Some(package.clone());
        }
        self.resolve_prefix(fqn).map(str::to_string)
    }

    /// Resolves a function FQN using its namespace portion.
    pub fn resolve_function(&self, fqn: &str) -> Option<String> {
        let namespace = match fqn.rfind(NS_SEP) {
            Some(idx) => &fqn[..idx],
            None => return None,
        };
        self.resolve_prefix(namespace).map(str::to_string)
    }

    pub fn is_project_class(&self, fqn: &str) -> bool {
        match self.resolve_class(fqn) {
            Some(pkg) => pkg == self.project_name || pkg == PROJECT_SENTINEL,
            None => true,
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }
}
