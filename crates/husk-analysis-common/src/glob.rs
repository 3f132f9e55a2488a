//! Shell-style glob matching shared by the configuration's `ignore.*` lists
//! and plugin-contributed ignore patterns.
//!
//! Two flavors are supported because file paths and symbol names need different
//! `**` semantics: a path glob's `**` crosses path separators, while a symbol
//! glob has no separator to respect and so `*`/`**` both collapse to "any run
//! of characters".

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;

static PATH_CACHE: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));
static SYMBOL_CACHE: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn translate(pattern: &str, path_mode: bool) -> String {
    let mut out = String::from("^");
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '*' => {
                if path_mode && chars.get(i + 1) == Some(&'*') {
                    out.push_str(".*");
                    i += 2;
                    // swallow an immediately following separator so `**/x` also
                    // matches `x` at the root.
                    if chars.get(i) == Some(&'/') {
                        i += 1;
                    }
                    continue;
                }
                if path_mode {
                    out.push_str("[^/]*");
                } else {
                    out.push_str(".*");
                }
            }
            '?' => out.push('.'),
            c if "\\.+^$()[]{}|".contains(c) => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
        i += 1;
    }
    out.push('$');
    out
}

fn is_match(pattern: &str, candidate: &str, path_mode: bool, cache: &Mutex<HashMap<String, Regex>>) -> bool {
    let mut guard = cache.lock().expect("glob cache poisoned");
    let re = guard.entry(pattern.to_string()).or_insert_with(|| {
        let translated = translate(pattern, path_mode);
        Regex::new(&translated).unwrap_or_else(|_| Regex::new("$^").expect("empty regex"))
    });
    re.is_match(candidate)
}

/// Matches a file-path glob, where `**` crosses separators and `*` matches one segment.
pub fn path_glob_matches(pattern: &str, candidate: &str) -> bool {
    is_match(pattern, candidate, true, &PATH_CACHE)
}

/// Matches a symbol-name glob, where `*` and `**` both mean "any characters".
pub fn symbol_glob_matches(pattern: &str, candidate: &str) -> bool {
    is_match(pattern, candidate, false, &SYMBOL_CACHE)
}

/// True if any pattern in `patterns` matches `candidate` as a path glob.
pub fn any_path_glob_matches<S: AsRef<str>>(patterns: &[S], candidate: &str) -> bool {
    patterns
        .iter()
        .any(|p| path_glob_matches(p.as_ref(), candidate))
}

/// True if any pattern in `patterns` matches `candidate` as a symbol glob.
pub fn any_symbol_glob_matches<S: AsRef<str>>(patterns: &[S], candidate: &str) -> bool {
    patterns
        .iter()
        .any(|p| symbol_glob_matches(p.as_ref(), candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_glob_star_matches_single_segment() {
        assert!(path_glob_matches("public/*.php", "public/index.php"));
        assert!(!path_glob_matches("public/*.php", "public/sub/index.php"));
    }

    #[test]
    fn path_glob_double_star_crosses_segments() {
        assert!(path_glob_matches("app/**/*.php", "app/a/b/c.php"));
        assert!(path_glob_matches("bin/*", "bin/console"));
    }

    #[test]
    fn symbol_glob_star_matches_anything() {
        assert!(symbol_glob_matches("App\\Legacy\\*", "App\\Legacy\\Thing"));
        assert!(symbol_glob_matches("*Controller", "App\\Http\\FooController"));
    }

    #[test]
    fn literal_pattern_requires_exact_match() {
        assert!(symbol_glob_matches("App\\Fixed", "App\\Fixed"));
        assert!(!symbol_glob_matches("App\\Fixed", "App\\Fixed2"));
    }
}
