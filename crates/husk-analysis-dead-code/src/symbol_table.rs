//! Indexed storage for collected symbols.

use crate::types::{Kind, Symbol};
use std::collections::HashMap;

/// A keyed collection of symbols with precomputed lookup indices.
///
/// Insertion order is preserved by `symbols`; every index stores positions
/// into that vector rather than owning copies, so `get_all` and friends
/// always iterate in the order symbols were added.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_id: HashMap<String, usize>,
    by_kind: HashMap<Kind, Vec<usize>>,
    by_file: HashMap<String, Vec<usize>>,
    by_namespace: HashMap<String, Vec<usize>>,
    by_parent: HashMap<String, Vec<usize>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a symbol, replacing any existing symbol with the same id.
    pub fn add(&mut self, symbol: Symbol) {
        let id = symbol.id();
        if let Some(&pos) = self.by_id.get(&id) {
            self.symbols[pos] = symbol;
            return;
        }
        let pos = self.symbols.len();
        self.by_kind.entry(symbol.kind).or_default().push(pos);
        self.by_file
            .entry(symbol.file_path.clone())
            .or_default()
            .push(pos);
        self.by_namespace
            .entry(symbol.namespace.clone())
            .or_default()
            .push(pos);
        if let Some(parent) = &symbol.parent {
            self.by_parent.entry(parent.clone()).or_default().push(pos);
        }
        self.by_id.insert(id, pos);
        self.symbols.push(symbol);
    }

    /// Removes the symbol with the given id, rebuilding indices.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(&pos) = self.by_id.get(id) else {
            return false;
        };
        self.symbols.remove(pos);
        self.rebuild_indices();
        true
    }

    fn rebuild_indices(&mut self) {
        self.by_id.clear();
        self.by_kind.clear();
        self.by_file.clear();
        self.by_namespace.clear();
        self.by_parent.clear();
        let symbols = std::mem::take(&mut self.symbols);
        for symbol in symbols {
            self.add(symbol);
        }
    }

    pub fn has(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Symbol> {
        self.by_id.get(id).map(|&pos| &self.symbols[pos])
    }

    pub fn get_all(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn get_by_kind(&self, kind: Kind) -> Vec<&Symbol> {
        self.by_kind
            .get(&kind)
            .map(|positions| positions.iter().map(|&p| &self.symbols[p]).collect())
            .unwrap_or_default()
    }

    pub fn get_by_file(&self, file_path: &str) -> Vec<&Symbol> {
        self.by_file
            .get(file_path)
            .map(|positions| positions.iter().map(|&p| &self.symbols[p]).collect())
            .unwrap_or_default()
    }

    pub fn get_by_namespace(&self, namespace: &str) -> Vec<&Symbol> {
        self.by_namespace
            .get(namespace)
            .map(|positions| positions.iter().map(|&p| &self.symbols[p]).collect())
            .unwrap_or_default()
    }

    /// Methods/properties/constants declared directly on `parent_fqn`.
    pub fn get_class_members(&self, parent_fqn: &str) -> Vec<&Symbol> {
        self.by_parent
            .get(parent_fqn)
            .map(|positions| positions.iter().map(|&p| &self.symbols[p]).collect())
            .unwrap_or_default()
    }

    /// Finds a symbol by fully-qualified name, optionally narrowed by kind.
    pub fn find_by_fqn(&self, fqn: &str, kind: Option<Kind>) -> Option<&Symbol> {
        self.symbols
            .iter()
            .find(|s| s.fully_qualified_name() == fqn && kind.map_or(true, |k| s.kind == k))
    }

    /// Finds a class-like symbol by FQN first, falling back to a short-name scan.
    pub fn find_class(&self, name_or_fqn: &str) -> Option<&Symbol> {
        let is_class_like = |k: Kind| {
            matches!(
                k,
                Kind::Class | Kind::Interface | Kind::Trait | Kind::Enum
            )
        };
        if let Some(s) = self
            .symbols
            .iter()
            .find(|s| is_class_like(s.kind) && s.fully_qualified_name() == name_or_fqn)
        {
            return Some(s);
        }
        self.symbols
            .iter()
            .find(|s| is_class_like(s.kind) && s.name == name_or_fqn)
    }

    pub fn find_function(&self, name_or_fqn: &str) -> Option<&Symbol> {
        if let Some(s) = self
            .symbols
            .iter()
            .find(|s| s.kind == Kind::Function && s.fully_qualified_name() == name_or_fqn)
        {
            return Some(s);
        }
        self.symbols
            .iter()
            .find(|s| s.kind == Kind::Function && s.name == name_or_fqn)
    }

    pub fn find_method(&self, class_fqn: &str, method_name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| {
            s.kind == Kind::Method
                && s.name == method_name
                && s.parent.as_deref() == Some(class_fqn)
        })
    }

    pub fn stats(&self) -> SymbolTableStats {
        SymbolTableStats {
            total: self.symbols.len(),
            classes: self.get_by_kind(Kind::Class).len(),
            interfaces: self.get_by_kind(Kind::Interface).len(),
            traits: self.get_by_kind(Kind::Trait).len(),
            enums: self.get_by_kind(Kind::Enum).len(),
            functions: self.get_by_kind(Kind::Function).len(),
            methods: self.get_by_kind(Kind::Method).len(),
            properties: self.get_by_kind(Kind::Property).len(),
            constants: self.get_by_kind(Kind::Constant).len() + self.get_by_kind(Kind::ClassConstant).len(),
            files: self.by_file.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymbolTableStats {
    pub total: usize,
    pub classes: usize,
    pub interfaces: usize,
    pub traits: usize,
    pub enums: usize,
    pub functions: usize,
    pub methods: usize,
    pub properties: usize,
    pub constants: usize,
    pub files: usize,
}
