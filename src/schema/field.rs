use super::*;

use crate::value::Type;

use indexmap::IndexSet;

/// A single declared field of a destination model.
#[derive(Debug, Clone)]
pub struct Field {
    /// The field name
    pub name: &'static str,

    /// Column-name override, the `db:"column_name"` tag. Falls back to the
    /// field name when absent.
    pub column: Option<&'static str>,

    /// Leaf, has-one, or has-many
    pub ty: FieldTy,

    /// True if the field can be null (`Option` in the destination struct).
    pub nullable: bool,

    /// True if the field participates in sibling identity. When no field of
    /// a model is marked, every bound column participates.
    pub identity: bool,
}

#[derive(Debug, Clone)]
pub enum FieldTy {
    Primitive(FieldPrimitive),
    HasOne(HasOne),
    HasMany(HasMany),
}

#[derive(Debug, Clone)]
pub struct FieldPrimitive {
    /// The field's leaf type
    pub ty: Type,
}

#[derive(Debug, Clone)]
pub struct HasOne {
    /// Name of the associated model
    pub target: &'static str,

    /// Produces the associated model's declaration on demand, keeping
    /// cyclic declarations representable.
    pub schema: fn() -> Model,
}

#[derive(Debug, Clone)]
pub struct HasMany {
    /// Name of the associated model
    pub target: &'static str,

    pub schema: fn() -> Model,
}

impl Field {
    pub fn primitive(name: &'static str, ty: Type) -> Field {
        Field {
            name,
            column: None,
            ty: FieldTy::Primitive(FieldPrimitive { ty }),
            nullable: false,
            identity: false,
        }
    }

    pub fn has_one<T: crate::Model>(name: &'static str) -> Field {
        Field {
            name,
            column: None,
            ty: FieldTy::HasOne(HasOne {
                target: T::NAME,
                schema: T::schema,
            }),
            nullable: false,
            identity: false,
        }
    }

    pub fn has_many<T: crate::Model>(name: &'static str) -> Field {
        Field {
            name,
            column: None,
            ty: FieldTy::HasMany(HasMany {
                target: T::NAME,
                schema: T::schema,
            }),
            nullable: false,
            identity: false,
        }
    }

    /// Overrides the column name this field binds to.
    pub fn column(mut self, column: &'static str) -> Field {
        self.column = Some(column);
        self
    }

    pub fn nullable(mut self) -> Field {
        self.nullable = true;
        self
    }

    /// Marks the field as part of its model's sibling identity.
    pub fn identity(mut self) -> Field {
        self.identity = true;
        self
    }

    /// Candidate column names in priority order: tag, declared name, then
    /// lower-case forms of both. Duplicates collapse.
    pub(crate) fn candidate_names(&self) -> IndexSet<String> {
        let mut names = IndexSet::new();
        if let Some(column) = self.column {
            names.insert(column.to_string());
        }
        names.insert(self.name.to_string());
        if let Some(column) = self.column {
            names.insert(column.to_lowercase());
        }
        names.insert(self.name.to_lowercase());
        names
    }
}

impl FieldTy {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(..))
    }

    pub fn as_primitive(&self) -> Option<&FieldPrimitive> {
        match self {
            Self::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_primitive(&self) -> &FieldPrimitive {
        match self {
            Self::Primitive(primitive) => primitive,
            _ => panic!("expected primitive field, but was {self:?}"),
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, Self::HasOne(..) | Self::HasMany(..))
    }

    pub fn is_has_one(&self) -> bool {
        matches!(self, Self::HasOne(..))
    }

    pub fn is_has_many(&self) -> bool {
        matches!(self, Self::HasMany(..))
    }

    /// If the field is a relation, returns the target name and declaration
    /// thunk.
    pub(crate) fn relation(&self) -> Option<(&'static str, fn() -> Model)> {
        match self {
            Self::HasOne(has_one) => Some((has_one.target, has_one.schema)),
            Self::HasMany(has_many) => Some((has_many.target, has_many.schema)),
            Self::Primitive(_) => None,
        }
    }
}

impl From<HasOne> for FieldTy {
    fn from(value: HasOne) -> Self {
        FieldTy::HasOne(value)
    }
}

impl From<HasMany> for FieldTy {
    fn from(value: HasMany) -> Self {
        FieldTy::HasMany(value)
    }
}
