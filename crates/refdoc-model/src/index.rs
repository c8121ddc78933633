//! Lazily materialized lookup from fully-qualified name to model entity.
//!
//! [`Index::open`] only reads `index.xml`, producing one [`CompoundHandle`]
//! per class, struct or namespace. An entity is parsed from its compound
//! file by [`Index::materialize`] on first access and cached for the
//! lifetime of the index.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use refdoc_xml::XmlLoader;
use serde_json::Value;

use crate::dump::to_json;
use crate::error::ModelError;
use crate::model::{Class, Entity, Function, Namespace};
use crate::names::split_compound_name;
use crate::parser::{ParsedModel, parse_compound};
use crate::transform::{TransformPass, Transformer};

/// Compound kinds the index tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompoundKind {
    Class,
    Struct,
    Namespace,
}

impl CompoundKind {
    fn from_doxygen(kind: &str) -> Option<Self> {
        match kind {
            "class" => Some(Self::Class),
            "struct" => Some(Self::Struct),
            "namespace" => Some(Self::Namespace),
            _ => None,
        }
    }
}

/// Reference to a compound that has not necessarily been parsed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundHandle {
    pub refid: String,
    pub kind: CompoundKind,
    pub name: String,
}

/// Result of an index lookup.
#[derive(Debug, Clone, Copy)]
pub enum Found<'a> {
    Class(&'a Class),
    Namespace(&'a Namespace),
    Function(&'a Function),
}

impl<'a> From<&'a Entity> for Found<'a> {
    fn from(entity: &'a Entity) -> Self {
        match entity {
            Entity::Class(c) => Self::Class(c),
            Entity::Namespace(n) => Self::Namespace(n),
        }
    }
}

/// Parses and transforms single compounds.
pub struct ModelLoader {
    xml: XmlLoader,
    transformer: Transformer,
}

impl ModelLoader {
    #[must_use]
    pub fn new(xml: XmlLoader, transformer: Transformer) -> Self {
        Self { xml, transformer }
    }

    /// Load, parse and transform the compound behind `handle`.
    pub fn load(&self, handle: &CompoundHandle) -> Result<Entity, ModelError> {
        let compounddef = self.xml.load_compound(&handle.refid)?;
        let mut entity = parse_compound(&compounddef)?.ok_or_else(|| {
            ModelError::malformed(&handle.name, "compound is not a class or namespace")
        })?;
        self.transformer.apply(&mut entity);
        Ok(entity)
    }
}

/// Name → entity lookup with on-demand parsing.
pub struct Index {
    loader: ModelLoader,
    handles: BTreeMap<String, CompoundHandle>,
    cache: HashMap<String, Entity>,
}

impl Index {
    /// Open the Doxygen XML directory and read its compound list.
    pub fn open(
        xml_dir: impl Into<PathBuf>,
        passes: Vec<Box<dyn TransformPass>>,
    ) -> Result<Self, ModelError> {
        let xml = XmlLoader::new(xml_dir);
        let handles = xml
            .load_index()?
            .into_iter()
            .filter_map(|entry| {
                let kind = CompoundKind::from_doxygen(&entry.kind)?;
                Some((
                    entry.name.clone(),
                    CompoundHandle {
                        refid: entry.refid,
                        kind,
                        name: entry.name,
                    },
                ))
            })
            .collect::<BTreeMap<_, _>>();
        tracing::debug!("indexed {} compounds in {}", handles.len(), xml.dir().display());
        Ok(Self {
            loader: ModelLoader::new(xml, Transformer::new(passes)),
            handles,
            cache: HashMap::new(),
        })
    }

    /// Indexed names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handles.keys().map(String::as_str)
    }

    /// Handle of an indexed compound.
    #[must_use]
    pub fn handle(&self, name: &str) -> Option<&CompoundHandle> {
        self.handles.get(name)
    }

    /// Whether the compound has already been parsed.
    #[must_use]
    pub fn is_materialized(&self, name: &str) -> bool {
        self.cache.contains_key(name)
    }

    /// Parse the named compound on first access and return the cached entity.
    pub fn materialize(&mut self, name: &str) -> Result<&Entity, ModelError> {
        let handle = self
            .handles
            .get(name)
            .ok_or_else(|| ModelError::lookup(name))?;
        match self.cache.entry(name.to_owned()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                tracing::debug!("materializing {name} from {}", handle.refid);
                let entity = self.loader.load(handle)?;
                Ok(entry.insert(entity))
            }
        }
    }

    /// Resolve a fully-qualified name.
    ///
    /// Compounds are matched first; otherwise the name is split at the last
    /// separator and the leaf is looked up among the parent's functions.
    pub fn find(&mut self, query: &str) -> Result<Found<'_>, ModelError> {
        if self.handles.contains_key(query) {
            return self.materialize(query).map(Found::from);
        }
        let (parent, leaf) = split_compound_name(query);
        if !self.handles.contains_key(parent) {
            return Err(ModelError::lookup(query));
        }
        self.materialize(parent)?
            .functions()
            .iter()
            .find(|f| f.name == leaf)
            .map(Found::Function)
            .ok_or_else(|| ModelError::lookup(query))
    }

    /// Resolve a name that must denote a class or struct.
    pub fn find_class(&mut self, query: &str) -> Result<&Class, ModelError> {
        match self.find(query)? {
            Found::Class(class) => Ok(class),
            _ => Err(ModelError::lookup(query)),
        }
    }

    /// Resolve a name that must denote a function or method.
    pub fn find_function(&mut self, query: &str) -> Result<&Function, ModelError> {
        match self.find(query)? {
            Found::Function(function) => Ok(function),
            _ => Err(ModelError::lookup(query)),
        }
    }

    /// Materialize every indexed compound and dump it as JSON.
    pub fn dump(&mut self, discard_empty: bool) -> Result<Value, ModelError> {
        let names: Vec<String> = self.handles.keys().cloned().collect();
        let mut model = ParsedModel::default();
        for name in &names {
            match self.materialize(name)? {
                Entity::Class(class) => model.classes.push(class.clone()),
                Entity::Namespace(namespace) => model.namespaces.push(namespace.clone()),
            }
        }
        to_json(&model, discard_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::write_xml_dir;
    use crate::property::PropertyPass;
    use tempfile::TempDir;

    fn open() -> (TempDir, Index) {
        let tmp = TempDir::new().unwrap();
        write_xml_dir(tmp.path());
        let index = Index::open(tmp.path(), vec![Box::new(PropertyPass)]).unwrap();
        (tmp, index)
    }

    #[test]
    fn test_open_indexes_classes_and_namespaces_only() {
        let (_tmp, index) = open();
        let names: Vec<_> = index.names().collect();
        assert_eq!(
            names,
            vec!["oneapi::dal::kmeans", "oneapi::dal::kmeans::descriptor"]
        );
        assert_eq!(
            index.handle("oneapi::dal::kmeans").unwrap().kind,
            CompoundKind::Namespace
        );
    }

    #[test]
    fn test_materialization_is_lazy() {
        let (_tmp, mut index) = open();
        assert!(!index.is_materialized("oneapi::dal::kmeans::descriptor"));
        index.find("oneapi::dal::kmeans::descriptor").unwrap();
        assert!(index.is_materialized("oneapi::dal::kmeans::descriptor"));
        assert!(!index.is_materialized("oneapi::dal::kmeans"));
    }

    #[test]
    fn test_materialized_entity_is_cached() {
        let (tmp, mut index) = open();
        index.materialize("oneapi::dal::kmeans").unwrap();
        // Removing the file must not matter once cached
        std::fs::remove_file(tmp.path().join("namespaceoneapi_1_1dal_1_1kmeans.xml")).unwrap();
        let entity = index.materialize("oneapi::dal::kmeans").unwrap();
        assert_eq!(entity.fully_qualified_name(), "oneapi::dal::kmeans");
    }

    #[test]
    fn test_find_class_applies_passes() {
        let (_tmp, mut index) = open();
        let class = index.find_class("oneapi::dal::kmeans::descriptor").unwrap();
        assert_eq!(class.properties.len(), 2);
        assert!(class.methods.iter().all(|m| !m.name.starts_with("get_")));
    }

    #[test]
    fn test_find_namespace_function() {
        let (_tmp, mut index) = open();
        let function = index.find_function("oneapi::dal::kmeans::train").unwrap();
        assert_eq!(function.name, "train");
    }

    #[test]
    fn test_find_method_through_parent_class() {
        let (_tmp, mut index) = open();
        let found = index
            .find("oneapi::dal::kmeans::descriptor::set_tolerance")
            .unwrap();
        assert!(matches!(found, Found::Function(f) if f.name == "set_tolerance"));
    }

    #[test]
    fn test_find_unknown_name_fails_with_lookup() {
        let (_tmp, mut index) = open();
        let err = index.find("oneapi::dal::Unknown").unwrap_err();
        assert!(matches!(&err, ModelError::Lookup { query } if query == "oneapi::dal::Unknown"));
        assert!(err.to_string().contains("oneapi::dal::Unknown"));
    }

    #[test]
    fn test_find_unknown_member_fails_with_lookup() {
        let (_tmp, mut index) = open();
        let err = index
            .find("oneapi::dal::kmeans::descriptor::get_cluster_count")
            .unwrap_err();
        // Folded into a property, so no longer a method
        assert!(matches!(err, ModelError::Lookup { .. }));
    }

    #[test]
    fn test_find_class_rejects_namespace() {
        let (_tmp, mut index) = open();
        assert!(matches!(
            index.find_class("oneapi::dal::kmeans"),
            Err(ModelError::Lookup { .. })
        ));
    }

    #[test]
    fn test_dump_materializes_everything() {
        let (_tmp, mut index) = open();
        let dump = index.dump(true).unwrap();
        assert!(index.is_materialized("oneapi::dal::kmeans"));
        assert!(index.is_materialized("oneapi::dal::kmeans::descriptor"));

        let class = &dump["oneapi::dal::kmeans::descriptor"];
        assert_eq!(class["properties"][0]["name"], "cluster_count");
        assert_eq!(dump["oneapi::dal::kmeans"]["functions"][0]["name"], "train");
    }

    #[test]
    fn test_missing_compound_file_surfaces_error() {
        let (tmp, mut index) = open();
        std::fs::remove_file(
            tmp.path()
                .join("classoneapi_1_1dal_1_1kmeans_1_1descriptor.xml"),
        )
        .unwrap();
        let err = index.find("oneapi::dal::kmeans::descriptor").unwrap_err();
        assert!(matches!(err, ModelError::Xml(_)));
    }
}
