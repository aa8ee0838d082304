//! Trait definitions for external collaborators
//!
//! Implementations live in other crates.

/// Read-only lookup into an ontology class index
///
/// Implemented by the infrastructure layer (phenokg-ontology). Class ids
/// are prefixed names such as `disease:Ileum`.
pub trait ClassLookup: Send + Sync {
    /// Whether the class is declared in the index
    fn is_valid_class(&self, class_id: &str) -> bool;

    /// Whether `class_id` is (transitively) a subclass of `parent_id`
    ///
    /// Every class is a subclass of itself.
    fn is_subclass_of(&self, class_id: &str, parent_id: &str) -> bool;
}

impl<T: ClassLookup + ?Sized> ClassLookup for std::sync::Arc<T> {
    fn is_valid_class(&self, class_id: &str) -> bool {
        (**self).is_valid_class(class_id)
    }

    fn is_subclass_of(&self, class_id: &str, parent_id: &str) -> bool {
        (**self).is_subclass_of(class_id, parent_id)
    }
}
