//! Doxygen XML → declaration model.
//!
//! Walks `compounddef` elements and builds [`Class`] and [`Namespace`]
//! records. A missing mandatory field (compound name, member name, class
//! location) fails the whole entity with [`ModelError::MalformedInput`];
//! optional fields default to empty.

use serde::Serialize;

use refdoc_xml::XmlNode;

use crate::error::ModelError;
use crate::model::{
    Class, Description, Doc, Entity, Function, Location, Namespace, Parameter, Run, RunKind,
};
use crate::names::{join_name, split_compound_name};

/// Compound kinds parsed as [`Class`].
const CLASS_KINDS: &[&str] = &["class", "struct"];

/// Classes and namespaces parsed from a combined tree.
#[derive(Debug, Default, Serialize)]
pub struct ParsedModel {
    pub classes: Vec<Class>,
    pub namespaces: Vec<Namespace>,
}

fn is_class_kind(kind: &str) -> bool {
    CLASS_KINDS.contains(&kind)
}

/// Parse every class and namespace compound under `root`.
///
/// With `filter`, only the compound whose fully-qualified name matches
/// exactly is parsed.
pub fn parse_tree(root: &XmlNode, filter: Option<&str>) -> Result<ParsedModel, ModelError> {
    let mut model = ParsedModel::default();
    for compounddef in root.find_all("compounddef") {
        if let Some(filter) = filter
            && compounddef.find_text("compoundname").as_deref().map(str::trim) != Some(filter)
        {
            continue;
        }
        match parse_compound(compounddef)? {
            Some(Entity::Class(class)) => model.classes.push(class),
            Some(Entity::Namespace(namespace)) => model.namespaces.push(namespace),
            None => {}
        }
    }
    Ok(model)
}

/// Parse a single `compounddef`; kinds other than class, struct and
/// namespace yield `None`.
pub fn parse_compound(compounddef: &XmlNode) -> Result<Option<Entity>, ModelError> {
    match compounddef.attr("kind") {
        Some(kind) if is_class_kind(kind) => parse_class(compounddef).map(|c| Some(Entity::Class(c))),
        Some("namespace") => parse_namespace(compounddef).map(|n| Some(Entity::Namespace(n))),
        _ => Ok(None),
    }
}

/// Parse a class or struct compound.
pub fn parse_class(compounddef: &XmlNode) -> Result<Class, ModelError> {
    let fully_qualified_name = compound_name(compounddef)?;
    let (namespace, name) = split_compound_name(&fully_qualified_name);
    tracing::debug!("parsing class {fully_qualified_name}");

    let location = parse_location(compounddef, &fully_qualified_name)?;
    let mut template_parameters = parse_template_parameters(compounddef);
    attach_descriptions(&mut template_parameters, compounddef, "templateparam");
    let template_declaration = template_declaration(&template_parameters);
    // Signature for `.. cpp:class::`, which takes no class/struct keyword.
    let declaration = match &template_declaration {
        Some(template) => format!("{template} {name}"),
        None => name.to_owned(),
    };

    let methods = member_functions(compounddef)
        .map(|memberdef| parse_function(memberdef, &fully_qualified_name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Class {
        name: name.to_owned(),
        kind: compounddef.attr("kind").unwrap_or("class").to_owned(),
        namespace: namespace.to_owned(),
        declaration,
        template_declaration,
        parent_fully_qualified_name: namespace.to_owned(),
        location,
        methods,
        properties: Vec::new(),
        template_parameters,
        doc: parse_doc(compounddef),
        fully_qualified_name,
    })
}

/// Parse a namespace compound with its free functions.
pub fn parse_namespace(compounddef: &XmlNode) -> Result<Namespace, ModelError> {
    let fully_qualified_name = compound_name(compounddef)?;
    let (parent, name) = split_compound_name(&fully_qualified_name);
    tracing::debug!("parsing namespace {fully_qualified_name}");

    let classes = compounddef
        .find_all("innerclass")
        .map(|c| c.itertext().trim().to_owned())
        .collect();
    let functions = member_functions(compounddef)
        .map(|memberdef| parse_function(memberdef, &fully_qualified_name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Namespace {
        name: name.to_owned(),
        parent_fully_qualified_name: parent.to_owned(),
        classes,
        functions,
        doc: parse_doc(compounddef),
        fully_qualified_name,
    })
}

/// Parse a function `memberdef` declared inside `parent`.
pub fn parse_function(memberdef: &XmlNode, parent: &str) -> Result<Function, ModelError> {
    let name = memberdef
        .find_text("name")
        .map(|n| normalize_space(&n))
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            let id = memberdef.attr("id").unwrap_or("<unknown>");
            ModelError::malformed(parent, format!("member {id} has no name"))
        })?;
    let return_type = normalize_space(&memberdef.find_text("type").unwrap_or_default());
    let argsstring = memberdef.find_text("argsstring").unwrap_or_default().trim().to_owned();

    let mut parameters: Vec<Parameter> =
        memberdef.find_all("param").filter_map(parse_parameter).collect();
    attach_descriptions(&mut parameters, memberdef, "param");
    let mut template_parameters = parse_template_parameters(memberdef);
    attach_descriptions(&mut template_parameters, memberdef, "templateparam");

    Ok(Function {
        declaration: Function::make_declaration(&return_type, &name, &argsstring),
        template_declaration: template_declaration(&template_parameters),
        fully_qualified_name: join_name(parent, &name),
        parent_fully_qualified_name: parent.to_owned(),
        doc: parse_doc(memberdef),
        name,
        argsstring,
        return_type,
        parameters,
        template_parameters,
    })
}

fn compound_name(compounddef: &XmlNode) -> Result<String, ModelError> {
    compounddef
        .find_text("compoundname")
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            ModelError::malformed(
                compounddef.attr("id").unwrap_or("<unknown>"),
                "missing compoundname",
            )
        })
}

fn parse_location(compounddef: &XmlNode, entity: &str) -> Result<Location, ModelError> {
    let location = compounddef
        .find("location")
        .ok_or_else(|| ModelError::malformed(entity, "missing location"))?;
    let filename = location
        .attr("bodyfile")
        .or_else(|| location.attr("file"))
        .ok_or_else(|| ModelError::malformed(entity, "location has no file"))?;
    Ok(Location {
        filename: filename.to_owned(),
        bodystart: parse_line(location, "bodystart", entity)?,
        bodyend: parse_line(location, "bodyend", entity)?,
    })
}

fn parse_line(location: &XmlNode, attr: &str, entity: &str) -> Result<usize, ModelError> {
    let value = location
        .attr(attr)
        .ok_or_else(|| ModelError::malformed(entity, format!("location has no {attr}")))?;
    value
        .trim()
        .parse()
        .map_err(|_| ModelError::malformed(entity, format!("invalid {attr} \"{value}\"")))
}

/// Function members of all non-private sections.
fn member_functions(compounddef: &XmlNode) -> impl Iterator<Item = &XmlNode> {
    compounddef
        .find_all("sectiondef")
        .filter(|s| !s.attr("kind").unwrap_or_default().starts_with("private"))
        .flat_map(|s| s.find_all_with("memberdef", "kind", "function"))
}

fn parse_parameter(param: &XmlNode) -> Option<Parameter> {
    let type_name = normalize_space(&param.find_text("type").unwrap_or_default());
    let name = normalize_space(&param.find_text("declname").unwrap_or_default());
    // `f(void)` lists a nameless `void` parameter
    if name.is_empty() && type_name == "void" {
        return None;
    }
    Some(Parameter {
        name,
        type_name,
        default: non_empty(param.find_text("defval")),
        description: None,
    })
}

fn parse_template_parameters(node: &XmlNode) -> Vec<Parameter> {
    let Some(list) = node.find("templateparamlist") else {
        return Vec::new();
    };
    list.find_all("param")
        .map(|param| {
            let type_name = normalize_space(&param.find_text("type").unwrap_or_default());
            let name = non_empty(param.find_text("declname"))
                .or_else(|| non_empty(param.find_text("defname")))
                .unwrap_or_else(|| {
                    type_name
                        .rsplit(' ')
                        .next()
                        .unwrap_or_default()
                        .to_owned()
                });
            Parameter {
                name,
                type_name,
                default: non_empty(param.find_text("defval")),
                description: None,
            }
        })
        .collect()
}

/// `template <typename T, int N = 4>` for non-empty parameter lists.
fn template_declaration(parameters: &[Parameter]) -> Option<String> {
    if parameters.is_empty() {
        return None;
    }
    let items: Vec<String> = parameters
        .iter()
        .map(|p| {
            let mut item = if p.type_name.ends_with(&p.name) {
                p.type_name.clone()
            } else {
                format!("{} {}", p.type_name, p.name)
            };
            if let Some(default) = &p.default {
                item.push_str(" = ");
                item.push_str(default);
            }
            item
        })
        .collect();
    Some(format!("template <{}>", items.join(", ")))
}

/// Attach `parameterlist[@kind]` descriptions to parameters by name,
/// adding a parameter when the declaration does not list it.
fn attach_descriptions(parameters: &mut Vec<Parameter>, node: &XmlNode, kind: &str) {
    let Some(detailed) = node.find("detaileddescription") else {
        return;
    };
    for list in detailed.descendants("parameterlist") {
        if list.attr("kind") != Some(kind) {
            continue;
        }
        for item in list.find_all("parameteritem") {
            let description = item
                .find("parameterdescription")
                .map(parse_description)
                .unwrap_or_default();
            let names = item
                .find_all("parameternamelist")
                .flat_map(|l| l.find_all("parametername"))
                .map(|n| normalize_space(&n.itertext()));
            for name in names {
                match parameters.iter_mut().find(|p| p.name == name) {
                    Some(parameter) => parameter.description = Some(description.clone()),
                    None => parameters.push(Parameter {
                        name,
                        description: Some(description.clone()),
                        ..Parameter::default()
                    }),
                }
            }
        }
    }
}

/// Build the documentation block of a compound or member.
///
/// The description comes from the detailed description, or from the brief
/// one when the detailed description has no prose.
fn parse_doc(node: &XmlNode) -> Option<Doc> {
    let detailed = node.find("detaileddescription");
    let brief = node.find("briefdescription");

    let mut description = detailed.map(parse_description).unwrap_or_default();
    if description.is_empty() {
        description = brief.map(parse_description).unwrap_or_default();
    }

    let mut doc = Doc {
        description,
        ..Doc::default()
    };
    for section in [detailed, brief].into_iter().flatten() {
        collect_sections(section, &mut doc);
    }
    (!doc.is_empty()).then_some(doc)
}

fn collect_sections(node: &XmlNode, doc: &mut Doc) {
    for section in node.descendants("simplesect") {
        let target = match section.attr("kind") {
            Some("remark") => &mut doc.remarks,
            Some("invariant") => &mut doc.invariants,
            Some("pre") => &mut doc.preconditions,
            Some("post") => &mut doc.postconditions,
            _ => continue,
        };
        target.extend(
            section
                .find_all("para")
                .map(|p| normalize_space(&p.itertext()))
                .filter(|s| !s.is_empty()),
        );
    }
}

/// Description runs of all paragraphs directly under `node`.
pub(crate) fn parse_description(node: &XmlNode) -> Description {
    let mut builder = RunBuilder::default();
    for (i, para) in node.find_all("para").enumerate() {
        if i > 0 {
            builder.push_text(" ");
        }
        builder.push_inline(para);
    }
    builder.finish()
}

/// Accumulates runs, toggling math mode on every `$`.
#[derive(Default)]
struct RunBuilder {
    runs: Vec<Run>,
    math: bool,
}

impl RunBuilder {
    fn push_inline(&mut self, node: &XmlNode) {
        self.push_text(&node.text);
        for child in &node.children {
            match child.tag.as_str() {
                "computeroutput" => self.push(RunKind::Code, child.itertext().trim()),
                "simplesect" | "parameterlist" | "xrefsect" => {}
                _ => self.push_inline(child),
            }
            self.push_text(&child.tail);
        }
    }

    fn push_text(&mut self, text: &str) {
        for (i, piece) in text.split('$').enumerate() {
            if i > 0 {
                self.math = !self.math;
            }
            let kind = if self.math { RunKind::Math } else { RunKind::Text };
            self.push(kind, piece);
        }
    }

    fn push(&mut self, kind: RunKind, content: &str) {
        if content.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.kind == kind && kind != RunKind::Code => {
                last.content.push_str(content);
            }
            _ => self.runs.push(Run::new(kind, content)),
        }
    }

    fn finish(self) -> Description {
        let mut runs: Vec<Run> = self
            .runs
            .into_iter()
            .map(|mut run| {
                run.content = match run.kind {
                    RunKind::Text => collapse_whitespace(&run.content),
                    RunKind::Math | RunKind::Code => normalize_space(&run.content),
                };
                run
            })
            .collect();
        if let Some(first) = runs.first_mut().filter(|r| r.kind == RunKind::Text) {
            first.content = first.content.trim_start().to_owned();
        }
        if let Some(last) = runs.last_mut().filter(|r| r.kind == RunKind::Text) {
            last.content = last.content.trim_end().to_owned();
        }
        runs.retain(|r| !r.content.is_empty());
        Description { runs }
    }
}

/// Replace every whitespace sequence with a single space, keeping edges.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Collapse whitespace and trim both ends.
fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.map(|t| normalize_space(&t)).filter(|t| !t.is_empty())
}
