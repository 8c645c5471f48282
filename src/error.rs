use crate::value::Type;

use thiserror::Error as ThisError;

/// Boxed error surfaced by a row source.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal mapping failures.
///
/// The first fatal error short-circuits assembly; the row source is not
/// drained further. Non-fatal issues are accumulated on [`crate::Mapper`]
/// as [`crate::MapLog`] entries instead.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The destination does not describe a mappable record tree, or a
    /// materialized value does not fit the destination field it is loaded
    /// into.
    #[error("invalid destination type: {0}")]
    InvalidDestinationType(String),

    /// The destination type graph contains a cycle.
    #[error("cyclic type graph: {path}")]
    CyclicTypeGraph { path: String },

    /// An integer column value does not fit the declared width of its leaf
    /// field.
    #[error("numeric overflow: value {value} from column `{column}` does not fit {ty:?}")]
    NumericOverflow {
        column: String,
        value: i64,
        ty: Type,
    },

    /// A value could not be interpreted as a boolean.
    #[error("invalid boolean in column `{column}`: `{value}`")]
    InvalidBoolean { column: String, value: String },

    /// A textual enum value has no registered mapping.
    #[error("unknown value `{value}` for enum `{ty}` in column `{column}`")]
    UnknownEnumValue {
        ty: &'static str,
        column: String,
        value: String,
    },

    /// A textual timestamp is not valid RFC 3339.
    #[error("invalid timestamp in column `{column}`: `{value}`")]
    InvalidTimestamp { column: String, value: String },

    /// The row stream implies more than one top-level record but the
    /// destination holds a single record.
    #[error("rows describe more than one top-level `{model}`")]
    AmbiguousSingletonRoot { model: &'static str },

    /// A raw value / leaf type pairing with no defined coercion.
    #[error("cannot coerce {found} from column `{column}` into {ty:?}")]
    IncompatibleValue {
        column: String,
        ty: Type,
        found: &'static str,
    },

    /// The row source reported an error.
    #[error("row source error")]
    RowSource(#[source] BoxError),
}

impl Error {
    pub(crate) fn row_source(message: impl Into<String>) -> Error {
        Error::RowSource(message.into().into())
    }
}
