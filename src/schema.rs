mod field;
pub use field::{Field, FieldPrimitive, FieldTy, HasMany, HasOne};

/// The declared shape of a destination record type.
///
/// Produced by [`crate::Model::schema`]. Field order is declaration order
/// and determines both binding tie-breaks and the index layout of the
/// materialized [`crate::Record`].
#[derive(Debug, Clone)]
pub struct Model {
    /// Stable identity of the destination type; must match
    /// [`crate::Model::NAME`].
    pub name: &'static str,

    /// Fields contained by the model
    pub fields: Vec<Field>,
}

impl Model {
    pub fn field(&self, index: usize) -> &Field {
        &self.fields[index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// True if at least one field is a bindable leaf. A model without one
    /// can never be identified, so its whole subtree is dropped from the
    /// plan.
    pub(crate) fn has_bindable_leaf(&self) -> bool {
        self.fields.iter().any(|field| field.ty.is_primitive())
    }
}
