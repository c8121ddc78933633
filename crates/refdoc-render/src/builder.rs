//! Line-oriented reStructuredText builder.

use refdoc_model::{Description, RunKind};

const INDENT: &str = "   ";

/// Accumulates reStructuredText lines, indenting three spaces per level.
#[derive(Debug, Default)]
pub struct RstBuilder {
    lines: Vec<String>,
}

impl RstBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` at `level`. Empty text yields an empty line.
    pub fn line(&mut self, text: impl AsRef<str>, level: usize) -> &mut Self {
        let text = text.as_ref();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.push(format!("{}{text}", INDENT.repeat(level)));
        }
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.line("", 0)
    }

    /// Namespace scope followed by the class declaration.
    pub fn add_class(&mut self, namespace: &str, declaration: &str) -> &mut Self {
        if !namespace.is_empty() {
            self.line(format!(".. cpp:namespace:: {namespace}"), 0).blank();
        }
        self.line(format!(".. cpp:class:: {declaration}"), 0).blank()
    }

    pub fn add_function(&mut self, declaration: &str, level: usize) -> &mut Self {
        self.line(format!(".. cpp:function:: {declaration}"), level)
            .blank()
    }

    /// Data member entry, used for properties.
    pub fn add_member(&mut self, declaration: &str, level: usize) -> &mut Self {
        self.line(format!(".. cpp:member:: {declaration}"), level)
            .blank()
    }

    /// Description as one paragraph; nothing for an empty description.
    pub fn add_doc(&mut self, description: &Description, level: usize) -> &mut Self {
        if description.is_empty() {
            return self;
        }
        self.line(inline(description), level).blank()
    }

    pub fn add_param(&mut self, name: &str, description: &Description, level: usize) -> &mut Self {
        self.line(format!(":param {name}: {}", inline(description)), level)
    }

    pub fn add_tparam(&mut self, name: &str, description: &Description, level: usize) -> &mut Self {
        self.line(format!(":tparam {name}: {}", inline(description)), level)
    }

    /// Titled line block, e.g. invariants or preconditions. Skipped when empty.
    pub fn add_line_block<S: AsRef<str>>(
        &mut self,
        title: &str,
        items: &[S],
        level: usize,
    ) -> &mut Self {
        if items.is_empty() {
            return self;
        }
        self.line(title, level);
        for item in items {
            self.line(format!("| {}", item.as_ref()), level + 1);
        }
        self.blank()
    }

    pub fn add_code_block<S: AsRef<str>>(&mut self, lines: &[S], level: usize) -> &mut Self {
        self.line(".. code-block:: cpp", level).blank();
        for line in lines {
            self.line(line, level + 1);
        }
        self.blank()
    }

    #[must_use]
    pub fn build(self) -> Vec<String> {
        self.lines
    }
}

/// Render runs with inline roles for math and code.
fn inline(description: &Description) -> String {
    description
        .runs
        .iter()
        .map(|run| match run.kind {
            RunKind::Text => run.content.clone(),
            RunKind::Math => format!(":math:`{}`", run.content),
            RunKind::Code => format!("``{}``", run.content),
        })
        .collect()
}
