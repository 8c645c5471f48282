//! rowmap materializes a flat, ordered stream of tabular rows into a tree of
//! nested records.
//!
//! The destination shape is declared by implementing [`Model`]. On the first
//! call for a given (column vector, destination type) pair, a [`plan::Plan`]
//! is inferred that binds output columns to leaf fields and discovers where
//! the tree branches into has-one and has-many subtrees. The plan is cached
//! for the lifetime of the process and applied to every row of the result
//! set, de-duplicating parents and appending children, so that a result
//! flattened by SQL joins becomes a correctly shaped object graph.
//!
//! ```ignore
//! let mut blogs: Vec<Blog> = vec![];
//! Mapper::new().map(&mut rows, &mut blogs)?;
//! ```

mod coerce;

mod error;
pub use error::{BoxError, Error, Result};

pub mod enums;
pub use enums::register_enums;

mod log;
pub use log::{Logs, MapLog};

mod map;
pub use map::{Destination, Mapper};

mod model;
pub use model::Model;

pub mod plan;
pub use plan::Plan;

pub mod row;
pub use row::{Column, ColumnType, MemoryRows, RowSource};

pub mod schema;

pub mod value;
pub use value::{Record, Timestamp, Type, Value};
