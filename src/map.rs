mod assemble;
mod key;

use assemble::Assembly;

use crate::{
    log::Logs,
    plan::{cache, Plan},
    row::RowSource,
    value::Record,
    Error, Model, Result,
};

use std::sync::Arc;

/// Maps row streams onto destination trees.
///
/// The mapper itself is cheap; it carries the per-call diagnostic log and
/// the partial-result policy. Plans are cached process-wide, so independent
/// mappers share them.
#[derive(Debug, Default)]
pub struct Mapper {
    logs: Logs,
    keep_partial: bool,
}

impl Mapper {
    pub fn new() -> Mapper {
        Mapper::default()
    }

    /// On a row-source failure, write the partial tree built so far into
    /// the destination before surfacing the error. The default discards
    /// partial results.
    pub fn keep_partial(mut self, keep: bool) -> Mapper {
        self.keep_partial = keep;
        self
    }

    /// Non-fatal diagnostics accumulated by the most recent [`map`] call.
    ///
    /// [`map`]: Mapper::map
    pub fn logs(&self) -> &Logs {
        &self.logs
    }

    /// Maps the rows of `rows` onto `dest`.
    ///
    /// Adjacent rows carrying the same identity merge into one record;
    /// has-many children append in first-seen row order. The plan for the
    /// (column vector, destination type) pair is inferred on first use and
    /// cached for the lifetime of the process.
    pub fn map<R, D>(&mut self, rows: &mut R, dest: &mut D) -> Result<()>
    where
        R: RowSource + ?Sized,
        D: Destination,
    {
        self.logs.clear();

        let columns = rows.columns().to_vec();
        let plan = match cache::lookup(&columns, D::Model::NAME) {
            Some(plan) => plan,
            None => {
                let plan = Arc::new(Plan::build(D::Model::schema(), &columns)?);
                cache::store(&columns, D::Model::NAME, plan.clone());
                plan
            }
        };
        for log in plan.logs() {
            self.logs.push(log.clone());
        }

        let mut assembly = Assembly::new(&plan);
        let outcome = loop {
            match rows.next_row() {
                Ok(Some(row)) => {
                    if row.len() != columns.len() {
                        break Err(Error::row_source(format!(
                            "row carries {} values, column vector has {}",
                            row.len(),
                            columns.len()
                        )));
                    }
                    if let Err(error) = assembly.push_row(&row, D::SINGLE, &mut self.logs) {
                        break Err(error);
                    }
                }
                Ok(None) => break Ok(()),
                Err(error) => break Err(Error::RowSource(error)),
            }
        };

        match outcome {
            Ok(()) => dest.write(assembly.finish()),
            Err(error) => {
                if self.keep_partial && matches!(error, Error::RowSource(_)) {
                    dest.write(assembly.finish())?;
                }
                Err(error)
            }
        }
    }
}

/// A shape mapped rows can be written into: an ordered sequence of records,
/// or a single optional record.
pub trait Destination {
    type Model: Model;

    /// True when the destination holds at most one root; the assembler
    /// fails with [`Error::AmbiguousSingletonRoot`] when the stream
    /// disagrees.
    const SINGLE: bool;

    fn write(&mut self, roots: Vec<Record>) -> Result<()>;
}

impl<T: Model> Destination for Vec<T> {
    type Model = T;
    const SINGLE: bool = false;

    fn write(&mut self, roots: Vec<Record>) -> Result<()> {
        self.reserve(roots.len());
        for root in roots {
            self.push(T::load(root)?);
        }
        Ok(())
    }
}

impl<T: Model> Destination for Option<T> {
    type Model = T;
    const SINGLE: bool = true;

    fn write(&mut self, roots: Vec<Record>) -> Result<()> {
        debug_assert!(roots.len() <= 1);
        if let Some(root) = roots.into_iter().next() {
            *self = Some(T::load(root)?);
        }
        Ok(())
    }
}
