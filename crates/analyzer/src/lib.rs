//! # Flowmap Analyzer
//!
//! Turns submitted source text into a structure model describing the code's
//! functions, branches, and calls.
//!
//! ## Pipeline
//!
//! ```text
//! source text
//!     │
//!     ├──> Parser (tree-sitter)
//!     │      └─ Syntax tree (ERROR/MISSING nodes => syntax error)
//!     │
//!     └──> CodeAnalyzer (single traversal)
//!            ├─ Functions and methods (name, params, span)
//!            ├─ Branch constructs (if/for/while/try/with)
//!            ├─ Call sites
//!            └─ Module-level statements under "<module>"
//! ```

mod analyzer;
mod error;
mod parser;
mod structure;

pub use analyzer::CodeAnalyzer;
pub use error::{AnalyzerError, Result};
pub use parser::{parse_source, SourceTree};
pub use structure::{
    Branch, BranchKind, CallSite, CodeElement, CodeStructure, ElementKind, MODULE_ELEMENT,
};

/// Convenience entry point: parse and analyze in one call.
pub fn analyze_source(source: &str) -> Result<CodeStructure> {
    let tree = parse_source(source)?;
    let analyzer = CodeAnalyzer::new();
    Ok(analyzer.analyze(&tree))
}
