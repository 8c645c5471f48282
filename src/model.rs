use crate::{schema, value::Record, Result};

/// A destination record type.
///
/// Implementations declare their shape once and convert materialized
/// records back into typed values. The mapper infers everything else from
/// the declaration plus the observed column vector.
pub trait Model: Sized {
    /// Stable identifier for this destination type.
    ///
    /// Used as the plan-cache key component and for cycle detection, so it
    /// must be unique among the models reachable from one destination.
    const NAME: &'static str;

    /// The field declaration the plan is built from.
    fn schema() -> schema::Model;

    /// Load an instance of the model from a materialized record. Fields are
    /// indexed by declaration order.
    fn load(record: Record) -> Result<Self>;
}
