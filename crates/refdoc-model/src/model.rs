//! Declaration model: typed records for the documented C++ API surface.

use serde::Serialize;

/// Kind of a description run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    /// Plain prose.
    Text,
    /// LaTeX-like math expression (without `$` delimiters).
    Math,
    /// Inline code reference.
    Code,
}

/// Contiguous piece of a description with a single kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Run {
    pub kind: RunKind,
    pub content: String,
}

impl Run {
    #[must_use]
    pub fn new(kind: RunKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// Ordered sequence of runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Description {
    pub runs: Vec<Run>,
}

impl Description {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Plain text of all runs, ignoring their kinds.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.content.as_str()).collect()
    }
}

/// Documentation block attached to a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Doc {
    pub description: Description,
    pub remarks: Vec<String>,
    pub invariants: Vec<String>,
    pub preconditions: Vec<String>,
    pub postconditions: Vec<String>,
}

impl Doc {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_empty()
            && self.remarks.is_empty()
            && self.invariants.is_empty()
            && self.preconditions.is_empty()
            && self.postconditions.is_empty()
    }
}

/// Source span of a declaration body (1-based lines).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub filename: String,
    pub bodystart: usize,
    pub bodyend: usize,
}

/// Function or template parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub default: Option<String>,
    pub description: Option<Description>,
}

/// Free function or class method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    pub argsstring: String,
    pub declaration: String,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub template_parameters: Vec<Parameter>,
    pub template_declaration: Option<String>,
    pub doc: Option<Doc>,
    pub fully_qualified_name: String,
    pub parent_fully_qualified_name: String,
}

impl Function {
    /// Build the declaration string `return_type name argsstring`.
    ///
    /// Leading whitespace is dropped so constructors (empty return type)
    /// start with their name.
    #[must_use]
    pub fn make_declaration(return_type: &str, name: &str, argsstring: &str) -> String {
        format!("{return_type} {name}{argsstring}")
            .trim_start()
            .to_owned()
    }
}

/// Accessor pair folded into a single documented member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub declaration: String,
    pub default: Option<String>,
    pub doc: Option<Doc>,
    pub getter: Function,
    pub setter: Option<Function>,
    pub fully_qualified_name: String,
    pub parent_fully_qualified_name: String,
}

/// Class or struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Class {
    pub name: String,
    pub kind: String,
    pub namespace: String,
    pub declaration: String,
    pub template_declaration: Option<String>,
    pub fully_qualified_name: String,
    pub parent_fully_qualified_name: String,
    pub location: Location,
    pub methods: Vec<Function>,
    pub properties: Vec<Property>,
    pub template_parameters: Vec<Parameter>,
    pub doc: Option<Doc>,
}

/// Namespace with its classes and free functions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Namespace {
    pub name: String,
    pub fully_qualified_name: String,
    pub parent_fully_qualified_name: String,
    pub classes: Vec<String>,
    pub functions: Vec<Function>,
    pub doc: Option<Doc>,
}

/// Materialized compound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Class(Class),
    Namespace(Namespace),
}

impl Entity {
    #[must_use]
    pub fn fully_qualified_name(&self) -> &str {
        match self {
            Self::Class(c) => &c.fully_qualified_name,
            Self::Namespace(n) => &n.fully_qualified_name,
        }
    }

    /// Methods of a class or free functions of a namespace.
    #[must_use]
    pub fn functions(&self) -> &[Function] {
        match self {
            Self::Class(c) => &c.methods,
            Self::Namespace(n) => &n.functions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_declaration() {
        assert_eq!(
            Function::make_declaration("void", "resize", "(size_t n)"),
            "void resize(size_t n)"
        );
    }

    #[test]
    fn test_make_declaration_constructor() {
        assert_eq!(Function::make_declaration("", "table", "()"), "table()");
    }

    #[test]
    fn test_make_declaration_is_deterministic() {
        let first = Function::make_declaration("std::int64_t", "get_count", "() const");
        let second = Function::make_declaration("std::int64_t", "get_count", "() const");
        assert_eq!(first, second);
    }

    #[test]
    fn test_entity_functions() {
        let class = Class {
            methods: vec![Function {
                name: "run".to_owned(),
                ..Function::default()
            }],
            ..Class::default()
        };
        let entity = Entity::Class(class);
        assert_eq!(entity.functions().len(), 1);
    }

    #[test]
    fn test_doc_is_empty() {
        assert!(Doc::default().is_empty());
        let doc = Doc {
            remarks: vec!["default = 1".to_owned()],
            ..Doc::default()
        };
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_description_plain_text() {
        let description = Description {
            runs: vec![Run::new(RunKind::Text, "Size "), Run::new(RunKind::Math, "n^2")],
        };
        assert_eq!(description.plain_text(), "Size n^2");
    }
}
