//! Folding of `get_x`/`set_x` accessor pairs into properties.
//!
//! The match is purely name-based: any method called `get_<ident>` becomes a
//! property getter even if it is not an accessor in the C++ sense.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Class, Function, Property};
use crate::names::join_name;
use crate::transform::TransformPass;

static ACCESSOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(get|set)_(\w+)").expect("valid regex"));

static DEFAULT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^default *= *(.+)").expect("valid regex"));

/// Transform pass building [`Property`] entries from accessor methods.
///
/// Getters keep the order in which their names first appear. A setter
/// without a getter stays an ordinary method. When a name is overloaded, the
/// last declaration is the accessor and earlier overloads remain methods,
/// also on later runs.
#[derive(Debug, Default)]
pub struct PropertyPass;

impl TransformPass for PropertyPass {
    fn transform_class(&self, class: &mut Class) {
        let mut getters: Vec<(String, usize)> = Vec::new();
        let mut setters: HashMap<String, usize> = HashMap::new();
        for (i, method) in class.methods.iter().enumerate() {
            let Some(captures) = ACCESSOR_RE.captures(&method.name) else {
                continue;
            };
            let name = captures[2].to_owned();
            if class.properties.iter().any(|p| p.name == name) {
                continue;
            }
            if &captures[1] == "get" {
                match getters.iter_mut().find(|(n, _)| *n == name) {
                    Some(slot) => slot.1 = i,
                    None => getters.push((name, i)),
                }
            } else {
                setters.insert(name, i);
            }
        }
        if getters.is_empty() {
            return;
        }

        let mut slots: Vec<Option<Function>> =
            std::mem::take(&mut class.methods).into_iter().map(Some).collect();
        for (name, getter_index) in getters {
            let Some(getter) = slots[getter_index].take() else {
                continue;
            };
            let setter = setters.get(&name).and_then(|&i| slots[i].take());
            class.properties.push(build_property(&name, getter, setter));
        }
        class.methods = slots.into_iter().flatten().collect();
    }
}

/// Build a property; the getter's doc moves to the property.
fn build_property(name: &str, mut getter: Function, setter: Option<Function>) -> Property {
    let mut doc = getter.doc.take();
    let default = doc.as_mut().and_then(take_default);

    let mut declaration = format!("{} {name}", getter.return_type);
    if let Some(default) = &default {
        declaration.push_str(" = ");
        declaration.push_str(default);
    }

    Property {
        name: name.to_owned(),
        type_name: getter.return_type.clone(),
        declaration,
        default,
        doc,
        fully_qualified_name: join_name(&getter.parent_fully_qualified_name, name),
        parent_fully_qualified_name: getter.parent_fully_qualified_name.clone(),
        getter,
        setter,
    }
}

/// Remove the first `default = <value>` remark and return its value.
fn take_default(doc: &mut crate::model::Doc) -> Option<String> {
    let (index, value) = doc.remarks.iter().enumerate().find_map(|(i, remark)| {
        DEFAULT_RE
            .captures(remark)
            .map(|c| (i, c[1].trim().to_owned()))
    })?;
    doc.remarks.remove(index);
    Some(value)
}
