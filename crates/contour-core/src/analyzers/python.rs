//! Precise Python analyzer built on tree-sitter.

use tree_sitter::Node;

use super::SourceAnalyzer;
use crate::config::{
    AnalysisStatus, CallFact, ClassFact, FileAnalysis, FileRecord, FunctionFact, ModuleFacts,
};

/// Enclosing class and function during traversal. Copied down the recursion
/// rather than held as visitor state, so per-file analysis is reentrant.
#[derive(Clone, Copy, Default)]
struct Scope<'a> {
    class: Option<&'a str>,
    function: Option<&'a str>,
}

pub struct PythonAnalyzer;

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self
    }
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self
    }

    fn node_text(node: Node, source: &[u8]) -> Option<String> {
        node.utf8_text(source).ok().map(|s| s.to_string())
    }

    fn walk(&self, node: Node, source: &[u8], scope: Scope<'_>, facts: &mut ModuleFacts) {
        match node.kind() {
            "function_definition" => {
                let name = node
                    .child_by_field_name("name")
                    .and_then(|n| Self::node_text(n, source));
                let Some(name) = name else {
                    return;
                };
                let qualname = match scope.class {
                    Some(class) => format!("{class}.{name}"),
                    None => name,
                };
                facts.functions.push(FunctionFact {
                    name: qualname.clone(),
                    line: node.start_position().row + 1,
                    params: Self::parameter_names(node, source),
                });
                // The class stays in scope: a nested class re-binds it, a
                // nested function does not re-qualify with its parent.
                let inner = Scope {
                    class: scope.class,
                    function: Some(&qualname),
                };
                self.walk_children(node, source, inner, facts);
            }
            "class_definition" => {
                let name = node
                    .child_by_field_name("name")
                    .and_then(|n| Self::node_text(n, source));
                let Some(name) = name else {
                    return;
                };
                facts.classes.push(ClassFact {
                    name: name.clone(),
                    line: node.start_position().row + 1,
                    bases: Self::base_names(node, source),
                });
                // The enclosing function is carried through unchanged, so
                // calls in the class body outside any method stay dropped.
                let inner = Scope {
                    class: Some(&name),
                    function: scope.function,
                };
                self.walk_children(node, source, inner, facts);
            }
            "call" => {
                if let Some(caller) = scope.function {
                    let callee = node
                        .child_by_field_name("function")
                        .and_then(|f| Self::callee_name(f, source));
                    if let Some(callee) = callee {
                        facts.calls.push(CallFact {
                            caller: caller.to_string(),
                            callee,
                        });
                    }
                }
                self.walk_children(node, source, scope, facts);
            }
            _ => self.walk_children(node, source, scope, facts),
        }
    }

    fn walk_children(&self, node: Node, source: &[u8], scope: Scope<'_>, facts: &mut ModuleFacts) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.walk(child, source, scope, facts);
        }
    }

    fn parameter_names(node: Node, source: &[u8]) -> Vec<String> {
        let mut params = Vec::new();
        let Some(list) = node.child_by_field_name("parameters") else {
            return params;
        };
        let mut cursor = list.walk();
        for child in list.named_children(&mut cursor) {
            match child.kind() {
                "identifier" => {
                    if let Some(text) = Self::node_text(child, source) {
                        params.push(text);
                    }
                }
                "typed_parameter" | "default_parameter" | "typed_default_parameter" => {
                    if let Some(text) = Self::first_identifier(child, source) {
                        params.push(text);
                    }
                }
                // Splat parameters and separators are not plain names.
                _ => {}
            }
        }
        params
    }

    fn first_identifier(node: Node, source: &[u8]) -> Option<String> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "identifier" {
                return Self::node_text(child, source);
            }
        }
        None
    }

    /// Base-class identifiers from the superclass list. An attribute chain
    /// like `animals.base.Pet` is reduced to its trailing identifier.
    fn base_names(node: Node, source: &[u8]) -> Vec<String> {
        let mut bases = Vec::new();
        let Some(superclasses) = node.child_by_field_name("superclasses") else {
            return bases;
        };
        let mut cursor = superclasses.walk();
        for child in superclasses.named_children(&mut cursor) {
            match child.kind() {
                "identifier" => {
                    if let Some(text) = Self::node_text(child, source) {
                        bases.push(text);
                    }
                }
                "attribute" => {
                    let attr = child
                        .child_by_field_name("attribute")
                        .and_then(|a| Self::node_text(a, source));
                    if let Some(attr) = attr {
                        bases.push(attr);
                    }
                }
                _ => {}
            }
        }
        bases
    }

    /// Name of the called target: a bare identifier, or an attribute chain
    /// joined root-to-leaf (`obj.foo.bar`). Anything else (subscripts,
    /// lambdas, nested call results) yields no name.
    fn callee_name(func: Node, source: &[u8]) -> Option<String> {
        match func.kind() {
            "identifier" => Self::node_text(func, source),
            "attribute" => {
                let mut parts = Vec::new();
                let mut cur = func;
                while cur.kind() == "attribute" {
                    let attr = cur.child_by_field_name("attribute")?;
                    parts.push(Self::node_text(attr, source)?);
                    cur = cur.child_by_field_name("object")?;
                }
                // A non-identifier root (e.g. a call result) contributes
                // nothing; the partial chain is still reported.
                if cur.kind() == "identifier" {
                    parts.push(Self::node_text(cur, source)?);
                }
                parts.reverse();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("."))
                }
            }
            _ => None,
        }
    }

    fn degraded(record: &FileRecord) -> FileAnalysis {
        FileAnalysis {
            relpath: record.relpath.clone(),
            facts: ModuleFacts::default(),
            status: AnalysisStatus::ParseFailed,
        }
    }
}

impl SourceAnalyzer for PythonAnalyzer {
    fn extensions(&self) -> &[&str] {
        &["py"]
    }

    fn name(&self) -> &str {
        "python"
    }

    fn analyze(&self, record: &FileRecord) -> FileAnalysis {
        let mut parser = tree_sitter::Parser::new();
        if parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .is_err()
        {
            log::warn!("python grammar unavailable, {} yields no facts", record.relpath);
            return Self::degraded(record);
        }

        let source = record.content.as_bytes();
        let tree = match parser.parse(source, None) {
            Some(t) => t,
            None => {
                log::debug!("parser returned no tree for {}", record.relpath);
                return Self::degraded(record);
            }
        };

        // A tree containing syntax errors degrades to empty facts instead
        // of reporting a partial, possibly misleading structure.
        if tree.root_node().has_error() {
            log::debug!("syntax errors in {}, returning empty facts", record.relpath);
            return Self::degraded(record);
        }

        let mut facts = ModuleFacts::default();
        self.walk(tree.root_node(), source, Scope::default(), &mut facts);

        FileAnalysis {
            relpath: record.relpath.clone(),
            facts,
            status: AnalysisStatus::Parsed,
        }
    }
}
