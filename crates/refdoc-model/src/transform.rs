//! Model transformation passes.
//!
//! Passes run after parsing, once per materialized entity, in registration
//! order. Each pass mutates the entity in place.

use crate::model::{Class, Entity, Namespace};

/// A normalization step over parsed entities.
pub trait TransformPass {
    /// Transform a class. Default: no-op.
    fn transform_class(&self, _class: &mut Class) {}

    /// Transform a namespace. Default: no-op.
    fn transform_namespace(&self, _namespace: &mut Namespace) {}
}

/// Ordered list of [`TransformPass`]es.
#[derive(Default)]
pub struct Transformer {
    passes: Vec<Box<dyn TransformPass>>,
}

impl Transformer {
    #[must_use]
    pub fn new(passes: Vec<Box<dyn TransformPass>>) -> Self {
        Self { passes }
    }

    /// Apply every pass to the entity.
    pub fn apply(&self, entity: &mut Entity) {
        for pass in &self.passes {
            match entity {
                Entity::Class(class) => pass.transform_class(class),
                Entity::Namespace(namespace) => pass.transform_namespace(namespace),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rename(&'static str);

    impl TransformPass for Rename {
        fn transform_class(&self, class: &mut Class) {
            class.name.push_str(self.0);
        }
    }

    #[test]
    fn test_passes_run_in_order() {
        let transformer = Transformer::new(vec![Box::new(Rename("_a")), Box::new(Rename("_b"))]);
        let mut entity = Entity::Class(Class {
            name: "x".to_owned(),
            ..Class::default()
        });
        transformer.apply(&mut entity);
        let Entity::Class(class) = entity else {
            panic!("expected class");
        };
        assert_eq!(class.name, "x_a_b");
    }

    #[test]
    fn test_namespace_default_is_noop() {
        let transformer = Transformer::new(vec![Box::new(Rename("_a"))]);
        let namespace = Namespace {
            name: "ns".to_owned(),
            ..Namespace::default()
        };
        let mut entity = Entity::Namespace(namespace.clone());
        transformer.apply(&mut entity);
        assert_eq!(entity, Entity::Namespace(namespace));
    }
}
