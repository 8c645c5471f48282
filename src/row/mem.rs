use super::*;

use std::collections::VecDeque;

/// An in-memory row source.
///
/// Used by the crate's own tests and useful for callers testing their
/// destination declarations without a database.
#[derive(Debug)]
pub struct MemoryRows {
    columns: Vec<Column>,
    rows: VecDeque<Vec<Value>>,
    fail: Option<String>,
}

impl MemoryRows {
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> MemoryRows {
        MemoryRows {
            columns,
            rows: rows.into(),
            fail: None,
        }
    }

    /// Builds a source from bare column names, declared as
    /// [`ColumnType::Unknown`].
    pub fn from_names<const N: usize>(names: [&str; N], rows: Vec<Vec<Value>>) -> MemoryRows {
        let columns = names
            .iter()
            .map(|name| Column::new(*name, ColumnType::Unknown))
            .collect();
        MemoryRows::new(columns, rows)
    }

    /// Makes the cursor report an error after the canned rows are drained,
    /// standing in for a mid-stream driver failure.
    pub fn fail_after(mut self, message: impl Into<String>) -> MemoryRows {
        self.fail = Some(message.into());
        self
    }
}

impl RowSource for MemoryRows {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn next_row(&mut self) -> Result<Option<Vec<Value>>, BoxError> {
        if let Some(row) = self.rows.pop_front() {
            return Ok(Some(row));
        }
        match self.fail.take() {
            Some(message) => Err(message.into()),
            None => Ok(None),
        }
    }
}
