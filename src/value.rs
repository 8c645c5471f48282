mod record;
pub use record::Record;

mod timestamp;
pub use timestamp::Timestamp;

use crate::{Error, Model, Result};

/// The type of a bindable leaf field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// Unsigned 32-bit integer
    U32,

    /// Unsigned 64-bit integer
    U64,

    /// 32-bit float
    F32,

    /// 64-bit float
    F64,

    /// String type
    String,

    /// Well-known `{seconds, nanos}` timestamp
    Timestamp,

    /// A named enumerated type, resolved through the enum registry
    Enum(&'static str),
}

impl Type {
    /// The value an unbound or null-assigned non-nullable leaf holds.
    pub(crate) fn zero(&self) -> Value {
        match self {
            Type::Bool => Value::Bool(false),
            Type::I32 | Type::I64 | Type::U32 | Type::U64 | Type::Enum(_) => Value::I64(0),
            Type::F32 | Type::F64 => Value::F64(0.0),
            Type::String => Value::String(String::new()),
            Type::Timestamp => Value::Timestamp(Timestamp::default()),
        }
    }
}

/// A raw column value or a materialized record tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Null value
    #[default]
    Null,

    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer; carries every bounded-integer and enum leaf
    I64(i64),

    /// 64-bit float; carries both float leaf widths
    F64(f64),

    /// String value
    String(String),

    /// Well-known timestamp
    Timestamp(Timestamp),

    /// A materialized record
    Record(Record),

    /// A list of values of the same type
    List(Vec<Value>),
}

impl Value {
    pub const fn null() -> Value {
        Value::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub const fn is_record(&self) -> bool {
        matches!(self, Value::Record(_))
    }

    /// Name of the variant, used in diagnostics.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I64(_) => "integer",
            Value::F64(_) => "float",
            Value::String(_) => "string",
            Value::Timestamp(_) => "timestamp",
            Value::Record(_) => "record",
            Value::List(_) => "list",
        }
    }

    pub fn to_bool(self) -> Result<bool> {
        match self {
            Value::Bool(v) => Ok(v),
            _ => Err(self.mismatch("bool")),
        }
    }

    pub fn to_i32(self) -> Result<i32> {
        match self {
            Value::I64(v) => i32::try_from(v).map_err(|_| Error::InvalidDestinationType(
                format!("value {v} does not fit i32"),
            )),
            _ => Err(self.mismatch("i32")),
        }
    }

    pub fn to_i64(self) -> Result<i64> {
        match self {
            Value::I64(v) => Ok(v),
            _ => Err(self.mismatch("i64")),
        }
    }

    pub fn to_u32(self) -> Result<u32> {
        match self {
            Value::I64(v) => u32::try_from(v).map_err(|_| Error::InvalidDestinationType(
                format!("value {v} does not fit u32"),
            )),
            _ => Err(self.mismatch("u32")),
        }
    }

    pub fn to_u64(self) -> Result<u64> {
        match self {
            Value::I64(v) => u64::try_from(v).map_err(|_| Error::InvalidDestinationType(
                format!("value {v} does not fit u64"),
            )),
            _ => Err(self.mismatch("u64")),
        }
    }

    pub fn to_f32(self) -> Result<f32> {
        self.to_f64().map(|v| v as f32)
    }

    pub fn to_f64(self) -> Result<f64> {
        match self {
            Value::F64(v) => Ok(v),
            _ => Err(self.mismatch("f64")),
        }
    }

    pub fn to_string(self) -> Result<String> {
        match self {
            Value::String(v) => Ok(v),
            _ => Err(self.mismatch("String")),
        }
    }

    pub fn to_timestamp(self) -> Result<Timestamp> {
        match self {
            Value::Timestamp(v) => Ok(v),
            _ => Err(self.mismatch("Timestamp")),
        }
    }

    pub fn to_record(self) -> Result<Record> {
        match self {
            Value::Record(v) => Ok(v),
            _ => Err(self.mismatch("Record")),
        }
    }

    pub fn to_option_bool(self) -> Result<Option<bool>> {
        match self {
            Value::Null => Ok(None),
            other => other.to_bool().map(Some),
        }
    }

    pub fn to_option_i32(self) -> Result<Option<i32>> {
        match self {
            Value::Null => Ok(None),
            other => other.to_i32().map(Some),
        }
    }

    pub fn to_option_i64(self) -> Result<Option<i64>> {
        match self {
            Value::Null => Ok(None),
            other => other.to_i64().map(Some),
        }
    }

    pub fn to_option_f64(self) -> Result<Option<f64>> {
        match self {
            Value::Null => Ok(None),
            other => other.to_f64().map(Some),
        }
    }

    pub fn to_option_string(self) -> Result<Option<String>> {
        match self {
            Value::Null => Ok(None),
            other => other.to_string().map(Some),
        }
    }

    pub fn to_option_timestamp(self) -> Result<Option<Timestamp>> {
        match self {
            Value::Null => Ok(None),
            other => other.to_timestamp().map(Some),
        }
    }

    /// Loads a has-one slot: `Null` becomes `None`, a record is loaded as
    /// `T`.
    pub fn load_one<T: Model>(self) -> Result<Option<T>> {
        match self {
            Value::Null => Ok(None),
            Value::Record(record) => T::load(record).map(Some),
            other => Err(other.mismatch("record")),
        }
    }

    /// Loads a has-many slot: each record of the list is loaded as `T`,
    /// preserving order.
    pub fn load_many<T: Model>(self) -> Result<Vec<T>> {
        match self {
            Value::List(items) => items
                .into_iter()
                .map(|item| T::load(item.to_record()?))
                .collect(),
            other => Err(other.mismatch("list")),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(v) => Some(v),
            _ => None,
        }
    }

    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    fn mismatch(&self, target: &str) -> Error {
        Error::InvalidDestinationType(format!("cannot convert {} to {target}", self.kind()))
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Value {
        Value::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Value {
        Value::I64(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Value {
        Value::I64(src.into())
    }
}

impl From<f64> for Value {
    fn from(src: f64) -> Value {
        Value::F64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Value {
        Value::String(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Value {
        Value::String(src.to_string())
    }
}

impl From<Timestamp> for Value {
    fn from(src: Timestamp) -> Value {
        Value::Timestamp(src)
    }
}

impl From<Record> for Value {
    fn from(src: Record) -> Value {
        Value::Record(src)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(src: Option<T>) -> Value {
        match src {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}
