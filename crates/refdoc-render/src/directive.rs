//! API directives rendering model entities.
//!
//! Each directive takes one argument, a fully-qualified name, links the
//! current document to the API model and returns reStructuredText lines.

use refdoc_model::{Class, Doc, Function, Index, Property};
use refdoc_watch::ProjectWatcher;

use crate::builder::RstBuilder;
use crate::error::RenderError;
use crate::listing::ListingReader;

/// Everything a directive needs while a document is being expanded.
pub struct Context<'w> {
    pub(crate) index: Index,
    pub(crate) listing: ListingReader,
    pub(crate) watcher: ProjectWatcher<'w>,
    docname: String,
}

impl<'w> Context<'w> {
    pub fn new(index: Index, listing: ListingReader, watcher: ProjectWatcher<'w>) -> Self {
        Self {
            index,
            listing,
            watcher,
            docname: String::new(),
        }
    }

    /// Name of the document being expanded.
    #[must_use]
    pub fn docname(&self) -> &str {
        &self.docname
    }

    pub fn set_document(&mut self, docname: &str) {
        docname.clone_into(&mut self.docname);
    }

    /// Record that the current document depends on the API model.
    pub fn link_current_document(&mut self) {
        self.watcher.link_document(&self.docname);
    }

    pub fn watcher(&mut self) -> &mut ProjectWatcher<'w> {
        &mut self.watcher
    }
}

/// Handler for `.. <name>:: <argument>` lines.
pub trait ApiDirective {
    /// Directive name, e.g. `api-class`.
    fn name(&self) -> &str;

    /// Render the entity named by `argument`.
    fn run(&self, ctx: &mut Context<'_>, argument: &str) -> Result<Vec<String>, RenderError>;
}

/// `api-class`: listing, class entry, methods and properties.
pub struct ClassDirective;

impl ApiDirective for ClassDirective {
    fn name(&self) -> &'static str {
        "api-class"
    }

    fn run(&self, ctx: &mut Context<'_>, argument: &str) -> Result<Vec<String>, RenderError> {
        ctx.link_current_document();
        let class = ctx.index.find_class(argument)?;
        let listing = ctx.listing.get_class_listing(class)?;

        let mut x = RstBuilder::new();
        x.add_code_block(&listing, 0);
        rst_class(class, &mut x);
        Ok(x.build())
    }
}

fn rst_class(class: &Class, x: &mut RstBuilder) {
    x.add_class(&class.namespace, &class.declaration);
    if let Some(doc) = &class.doc {
        x.add_doc(&doc.description, 1);
    }
    for param in &class.template_parameters {
        if let Some(description) = &param.description {
            x.add_tparam(&param.name, description, 1);
        }
    }
    if class.template_parameters.iter().any(|p| p.description.is_some()) {
        x.blank();
    }

    for method in &class.methods {
        rst_function(method, x, 1);
    }

    if !class.properties.is_empty() {
        x.line("**Properties**", 1).blank();
    }
    for property in &class.properties {
        rst_property(property, x);
    }
}

fn rst_property(property: &Property, x: &mut RstBuilder) {
    x.add_member(&property.declaration, 1);
    if let Some(doc) = &property.doc {
        x.add_doc(&doc.description, 2);
    }

    x.line("Getter & Setter", 2);
    x.line(format!("| ``{}``", property.getter.declaration), 3);
    if let Some(setter) = &property.setter {
        x.line(format!("| ``{}``", setter.declaration), 3);
    }
    x.blank();

    if let Some(doc) = &property.doc {
        let invariants: Vec<String> = doc
            .invariants
            .iter()
            .map(|invariant| format!(":cpp:expr:`{invariant}`"))
            .collect();
        x.add_line_block("Invariants", &invariants, 2);
        x.add_line_block("Remarks", &doc.remarks, 2);
    }
}

fn rst_function(function: &Function, x: &mut RstBuilder, level: usize) {
    let declaration = match &function.template_declaration {
        Some(template) => format!("{template} {}", function.declaration),
        None => function.declaration.clone(),
    };
    x.add_function(&declaration, level);
    if let Some(doc) = &function.doc {
        x.add_doc(&doc.description, level + 1);
    }

    let mut has_fields = false;
    for param in &function.template_parameters {
        if let Some(description) = &param.description {
            x.add_tparam(&param.name, description, level + 1);
            has_fields = true;
        }
    }
    for param in &function.parameters {
        if let Some(description) = &param.description {
            x.add_param(&param.name, description, level + 1);
            has_fields = true;
        }
    }
    if has_fields {
        x.blank();
    }

    if let Some(doc) = &function.doc {
        rst_conditions(doc, x, level + 1);
    }
}

fn rst_conditions(doc: &Doc, x: &mut RstBuilder, level: usize) {
    x.add_line_block("Preconditions", &doc.preconditions, level)
        .add_line_block("Postconditions", &doc.postconditions, level)
        .add_line_block("Invariants", &doc.invariants, level)
        .add_line_block("Remarks", &doc.remarks, level);
}

/// `api-func`: a free function or method with its documentation.
pub struct FunctionDirective;

impl ApiDirective for FunctionDirective {
    fn name(&self) -> &'static str {
        "api-func"
    }

    fn run(&self, ctx: &mut Context<'_>, argument: &str) -> Result<Vec<String>, RenderError> {
        ctx.link_current_document();
        let function = ctx.index.find_function(argument)?;

        let mut x = RstBuilder::new();
        if !function.parent_fully_qualified_name.is_empty() {
            x.line(
                format!(".. cpp:namespace:: {}", function.parent_fully_qualified_name),
                0,
            )
            .blank();
        }
        rst_function(function, &mut x, 0);
        Ok(x.build())
    }
}

/// `api-code`: the class listing only.
pub struct ListingDirective;

impl ApiDirective for ListingDirective {
    fn name(&self) -> &'static str {
        "api-code"
    }

    fn run(&self, ctx: &mut Context<'_>, argument: &str) -> Result<Vec<String>, RenderError> {
        ctx.link_current_document();
        let class = ctx.index.find_class(argument)?;
        let listing = ctx.listing.get_class_listing(class)?;

        let mut x = RstBuilder::new();
        x.add_code_block(&listing, 0);
        Ok(x.build())
    }
}
