use crate::parser::SourceTree;
use crate::structure::{
    Branch, BranchKind, CallSite, CodeElement, CodeStructure, ElementKind, MODULE_ELEMENT,
};
use tree_sitter::Node;

/// Longest condition excerpt kept on a branch record.
const MAX_CONDITION_LEN: usize = 48;

/// Traverses a parsed tree into a [`CodeStructure`].
///
/// Functions and methods become their own elements; statements outside any
/// definition are attributed to a synthetic `<module>` element. Nested
/// function definitions are recorded on the parent and analyzed as separate
/// elements.
#[derive(Debug, Default)]
pub struct CodeAnalyzer;

impl CodeAnalyzer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, tree: &SourceTree) -> CodeStructure {
        let mut structure = CodeStructure::default();
        let mut module = CodeElement::new(MODULE_ELEMENT, ElementKind::Module);
        module.start_line = 1;
        module.end_line = tree.root().end_position().row + 1;

        let root = tree.root();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            self.visit_top_level(child, tree, &mut structure, &mut module);
        }

        // Empty source stays an empty structure; the module element only
        // participates when module-level logic exists.
        if !module.calls.is_empty() || !module.branches.is_empty() {
            structure.elements.insert(0, module);
        }

        log::debug!(
            "Analyzed structure: {} elements",
            structure.elements.len()
        );
        structure
    }

    fn visit_top_level(
        &self,
        node: Node<'_>,
        tree: &SourceTree,
        structure: &mut CodeStructure,
        module: &mut CodeElement,
    ) {
        match node.kind() {
            "function_definition" => {
                if let Some(name) = definition_name(node, tree) {
                    module.nested.push(name);
                }
                self.collect_callable(node, None, tree, structure);
            }
            "class_definition" => self.collect_class(node, tree, structure),
            "decorated_definition" => {
                if let Some(inner) = node.child_by_field_name("definition") {
                    self.visit_top_level(inner, tree, structure, module);
                }
            }
            _ => self.scan_statement(node, tree, module, structure),
        }
    }

    /// Collect a function or method element, plus elements for any functions
    /// defined inside it.
    fn collect_callable(
        &self,
        node: Node<'_>,
        class_name: Option<&str>,
        tree: &SourceTree,
        structure: &mut CodeStructure,
    ) {
        let Some(name) = definition_name(node, tree) else {
            return;
        };

        let (qualified, kind) = match class_name {
            Some(class) => (format!("{class}.{name}"), ElementKind::Method),
            None => (name, ElementKind::Function),
        };

        let mut element = CodeElement::new(qualified, kind);
        element.start_line = node.start_position().row + 1;
        element.end_line = node.end_position().row + 1;
        element.params = extract_params(node, tree);

        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for child in body.children(&mut cursor) {
                self.scan_statement(child, tree, &mut element, structure);
            }
        }

        structure.elements.push(element);
    }

    fn collect_class(&self, node: Node<'_>, tree: &SourceTree, structure: &mut CodeStructure) {
        let Some(class_name) = definition_name(node, tree) else {
            return;
        };

        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for child in body.children(&mut cursor) {
                match child.kind() {
                    "function_definition" => {
                        self.collect_callable(child, Some(&class_name), tree, structure);
                    }
                    "decorated_definition" => {
                        if let Some(inner) = child.child_by_field_name("definition") {
                            if inner.kind() == "function_definition" {
                                self.collect_callable(inner, Some(&class_name), tree, structure);
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    /// Scan a statement subtree for calls and branches, attributing them to
    /// `element`. Definitions found along the way become their own elements
    /// and are recorded on `element.nested`.
    fn scan_statement(
        &self,
        node: Node<'_>,
        tree: &SourceTree,
        element: &mut CodeElement,
        structure: &mut CodeStructure,
    ) {
        match node.kind() {
            "function_definition" => {
                if let Some(name) = definition_name(node, tree) {
                    element.nested.push(name);
                }
                self.collect_callable(node, None, tree, structure);
                return;
            }
            "class_definition" => {
                self.collect_class(node, tree, structure);
                return;
            }
            "decorated_definition" => {
                if let Some(inner) = node.child_by_field_name("definition") {
                    self.scan_statement(inner, tree, element, structure);
                }
                return;
            }
            "call" => {
                if let Some(function) = node.child_by_field_name("function") {
                    if let Some(callee) = last_identifier(function, tree) {
                        element.calls.push(CallSite {
                            callee,
                            line: node.start_position().row + 1,
                        });
                    }
                }
            }
            "if_statement" => self.record_branch(node, BranchKind::If, "condition", tree, element),
            "while_statement" => {
                self.record_branch(node, BranchKind::While, "condition", tree, element);
            }
            "for_statement" => {
                let excerpt = for_excerpt(node, tree);
                element.branches.push(Branch {
                    kind: BranchKind::For,
                    line: node.start_position().row + 1,
                    condition: excerpt,
                });
            }
            "try_statement" => element.branches.push(Branch {
                kind: BranchKind::Try,
                line: node.start_position().row + 1,
                condition: String::new(),
            }),
            "with_statement" => {
                let excerpt = node
                    .child(1)
                    .map(|clause| truncate(tree.text_of(clause)))
                    .unwrap_or_default();
                element.branches.push(Branch {
                    kind: BranchKind::With,
                    line: node.start_position().row + 1,
                    condition: excerpt,
                });
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.scan_statement(child, tree, element, structure);
        }
    }

    fn record_branch(
        &self,
        node: Node<'_>,
        kind: BranchKind,
        field: &str,
        tree: &SourceTree,
        element: &mut CodeElement,
    ) {
        let condition = node
            .child_by_field_name(field)
            .map(|c| truncate(tree.text_of(c)))
            .unwrap_or_default();
        element.branches.push(Branch {
            kind,
            line: node.start_position().row + 1,
            condition,
        });
    }
}

/// Name of a function/class definition node.
fn definition_name(node: Node<'_>, tree: &SourceTree) -> Option<String> {
    node.child_by_field_name("name")
        .map(|n| tree.text_of(n).to_string())
}

/// Parameter names from a definition's parameter list.
fn extract_params(node: Node<'_>, tree: &SourceTree) -> Vec<String> {
    let Some(params) = node.child_by_field_name("parameters") else {
        return Vec::new();
    };

    let mut names = Vec::new();
    let mut cursor = params.walk();
    for child in params.children(&mut cursor) {
        match child.kind() {
            "identifier" => names.push(tree.text_of(child).to_string()),
            "typed_parameter" | "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = first_identifier(child, tree) {
                    names.push(name);
                }
            }
            "list_splat_pattern" | "dictionary_splat_pattern" => {
                if let Some(name) = first_identifier(child, tree) {
                    names.push(format!("*{name}"));
                }
            }
            _ => {}
        }
    }
    names
}

fn first_identifier(node: Node<'_>, tree: &SourceTree) -> Option<String> {
    if node.kind() == "identifier" {
        return Some(tree.text_of(node).to_string());
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_identifier(child, tree) {
            return Some(found);
        }
    }
    None
}

/// Last identifier in an expression: `obj.method` resolves to `method`,
/// plain `foo` to `foo`.
fn last_identifier(node: Node<'_>, tree: &SourceTree) -> Option<String> {
    if node.kind() == "identifier" {
        return Some(tree.text_of(node).to_string());
    }

    let mut cursor = node.walk();
    let mut last = None;
    for child in node.children(&mut cursor) {
        if let Some(found) = last_identifier(child, tree) {
            last = Some(found);
        }
    }
    last
}

/// `for x in xs` excerpt built from the left/right fields.
fn for_excerpt(node: Node<'_>, tree: &SourceTree) -> String {
    let left = node.child_by_field_name("left").map(|n| tree.text_of(n));
    let right = node.child_by_field_name("right").map(|n| tree.text_of(n));
    match (left, right) {
        (Some(l), Some(r)) => truncate(&format!("{l} in {r}")),
        (_, Some(r)) => truncate(r),
        _ => String::new(),
    }
}

fn truncate(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= MAX_CONDITION_LEN {
        return flat;
    }
    let cut: String = flat.chars().take(MAX_CONDITION_LEN).collect();
    format!("{cut}...")
}
