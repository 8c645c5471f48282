use indexmap::IndexSet;

use std::fmt;

/// A non-fatal issue observed while building a plan or assembling rows.
///
/// Entries are deduplicated and surfaced through [`crate::Mapper::logs`]
/// after the call completes; the crate does not hardcode a transport beyond
/// mirroring each new entry to `tracing` at `warn` level.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MapLog {
    /// Columns present in the row vector that no field binds.
    UnboundColumns { columns: Vec<String> },

    /// A record type that bound no columns; the node and its children were
    /// dropped from the plan.
    EmptyNode { model: &'static str },

    /// Two fields of the same subtree resolve the same candidate column
    /// name; the earlier binding wins.
    DuplicateCandidate {
        model: &'static str,
        field: &'static str,
        column: String,
    },

    /// The row stream asserted a second, distinct has-one child for a
    /// parent that already has one attached. The first child wins.
    HasOneOverwrite {
        model: &'static str,
        field: &'static str,
    },

    /// A null was coerced into a non-nullable leaf, which keeps its zero
    /// value.
    NullIntoNonNullable {
        model: &'static str,
        field: &'static str,
    },
}

impl fmt::Display for MapLog {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapLog::UnboundColumns { columns } => {
                write!(fmt, "columns bound by no field: {}", columns.join(", "))
            }
            MapLog::EmptyNode { model } => {
                write!(fmt, "no columns bound to `{model}`; record omitted")
            }
            MapLog::DuplicateCandidate {
                model,
                field,
                column,
            } => {
                write!(
                    fmt,
                    "column `{column}` already claimed within `{model}`; `{field}` left unbound"
                )
            }
            MapLog::HasOneOverwrite { model, field } => {
                write!(
                    fmt,
                    "`{model}::{field}` appears more than once per parent; keeping the first"
                )
            }
            MapLog::NullIntoNonNullable { model, field } => {
                write!(fmt, "null into non-nullable `{model}::{field}`")
            }
        }
    }
}

/// Deduplicated, insertion-ordered collection of [`MapLog`] entries.
#[derive(Debug, Default)]
pub struct Logs {
    entries: IndexSet<MapLog>,
}

impl Logs {
    pub(crate) fn new() -> Logs {
        Logs::default()
    }

    pub(crate) fn push(&mut self, log: MapLog) {
        if !self.entries.contains(&log) {
            tracing::warn!(issue = %log, "non-fatal mapping issue");
            self.entries.insert(log);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapLog> {
        self.entries.iter()
    }

    pub fn contains(&self, log: &MapLog) -> bool {
        self.entries.contains(log)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Logs {
    type Item = &'a MapLog;
    type IntoIter = indexmap::set::Iter<'a, MapLog>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
