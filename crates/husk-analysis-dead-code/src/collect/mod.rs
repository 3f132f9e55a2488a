//! Symbol and reference collection: the two AST visitors that turn a parsed
//! source file into the inputs the analyzers consume.

pub mod references;
pub mod symbols;

pub use references::{collect_imports, collect_references, ImportRecord};
pub use symbols::collect_symbols;

use crate::ast::SourceFile;
use crate::types::{Reference, Symbol};

/// The per-file output of running both collectors once.
pub struct FileCollection {
    pub symbols: Vec<Symbol>,
    pub references: Vec<Reference>,
    pub imports: Vec<(String, Vec<ImportRecord>)>,
}

/// Runs both collectors over one parsed file.
pub fn collect_file(file: &SourceFile) -> FileCollection {
    FileCollection {
        symbols: collect_symbols(file),
        references: collect_references(file),
        imports: collect_imports(file),
    }
}
