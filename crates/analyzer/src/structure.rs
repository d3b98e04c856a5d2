use serde::{Deserialize, Serialize};

/// Synthetic element name for module-level code.
pub const MODULE_ELEMENT: &str = "<module>";

/// Kind of a code element in the structure model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    Module,
    Function,
    Method,
}

/// Branch construct kinds tracked by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BranchKind {
    If,
    For,
    While,
    Try,
    With,
}

impl BranchKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::For => "for",
            Self::While => "while",
            Self::Try => "try",
            Self::With => "with",
        }
    }
}

/// A branch construct inside an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub kind: BranchKind,
    /// 1-based source line.
    pub line: usize,
    /// Short excerpt of the condition or iteration target, empty for `try`.
    pub condition: String,
}

/// A call site inside an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    /// Last identifier segment of the called expression (`obj.m()` => `m`).
    pub callee: String,
    /// 1-based source line.
    pub line: usize,
}

/// One element of the structure model: a function, method, or the synthetic
/// module-level element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeElement {
    /// `<module>`, `name`, or `Class.name` for methods.
    pub name: String,
    pub kind: ElementKind,
    pub params: Vec<String>,
    pub start_line: usize,
    pub end_line: usize,
    pub calls: Vec<CallSite>,
    pub branches: Vec<Branch>,
    /// Names of functions defined directly inside this element.
    pub nested: Vec<String>,
}

impl CodeElement {
    pub fn new(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            kind,
            params: Vec::new(),
            start_line: 0,
            end_line: 0,
            calls: Vec::new(),
            branches: Vec::new(),
            nested: Vec::new(),
        }
    }
}

/// Structure model: ordered list of elements as they appear in the source.
///
/// Duplicate names are kept in definition order; call targets are not
/// resolved here (the graph builder matches them against defined names).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeStructure {
    pub elements: Vec<CodeElement>,
}

impl CodeStructure {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Find an element by name (first match wins for duplicates).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CodeElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Names of all defined functions and methods.
    #[must_use]
    pub fn defined_names(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter(|e| e.kind != ElementKind::Module)
            .map(|e| e.name.as_str())
            .collect()
    }
}
