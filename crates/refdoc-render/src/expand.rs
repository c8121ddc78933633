//! Expansion of API directives inside source documents.

use std::sync::LazyLock;

use regex::Regex;

use crate::directive::{ApiDirective, ClassDirective, Context, FunctionDirective, ListingDirective};
use crate::error::RenderError;

/// Prefix reserved for API directives; unknown names under it are errors.
const DIRECTIVE_PREFIX: &str = "api-";

static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)\.\.\s+([A-Za-z][\w-]*)::(?:\s+(.*?))?\s*$").expect("valid regex")
});

/// Replaces directive lines with their rendered output.
///
/// `.. api-class:: oneapi::dal::table` becomes the lines produced by the
/// `api-class` directive, indented like the directive line. Every other
/// line, including other reStructuredText directives, is kept.
pub struct DocumentExpander {
    directives: Vec<Box<dyn ApiDirective>>,
}

impl Default for DocumentExpander {
    fn default() -> Self {
        Self::empty()
            .with_directive(ClassDirective)
            .with_directive(FunctionDirective)
            .with_directive(ListingDirective)
    }
}

impl DocumentExpander {
    /// Expander without any directive registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            directives: Vec::new(),
        }
    }

    /// Register a directive. A later registration with the same name wins.
    #[must_use]
    pub fn with_directive(mut self, directive: impl ApiDirective + 'static) -> Self {
        self.directives.retain(|d| d.name() != directive.name());
        self.directives.push(Box::new(directive));
        self
    }

    fn directive(&self, name: &str) -> Option<&dyn ApiDirective> {
        self.directives
            .iter()
            .find(|d| d.name() == name)
            .map(AsRef::as_ref)
    }

    /// Expand every directive in `source`, the text of `ctx.docname()`.
    pub fn expand(&self, ctx: &mut Context<'_>, source: &str) -> Result<String, RenderError> {
        let mut output = String::with_capacity(source.len());
        for (index, line) in source.lines().enumerate() {
            let Some(caps) = DIRECTIVE_RE.captures(line) else {
                output.push_str(line);
                output.push('\n');
                continue;
            };
            let name = &caps[2];
            let Some(directive) = self.directive(name) else {
                if name.starts_with(DIRECTIVE_PREFIX) {
                    return Err(RenderError::UnknownDirective {
                        document: ctx.docname().to_owned(),
                        name: name.to_owned(),
                        line: index + 1,
                    });
                }
                output.push_str(line);
                output.push('\n');
                continue;
            };
            let argument = caps.get(3).map_or("", |m| m.as_str());
            if argument.is_empty() {
                return Err(RenderError::MissingArgument {
                    document: ctx.docname().to_owned(),
                    name: name.to_owned(),
                    line: index + 1,
                });
            }

            tracing::debug!(document = ctx.docname(), name, argument, "Expanding directive");
            let indent = &caps[1];
            for rendered in directive.run(ctx, argument)? {
                if !rendered.is_empty() {
                    output.push_str(indent);
                    output.push_str(&rendered);
                }
                output.push('\n');
            }
        }
        Ok(output)
    }
}
