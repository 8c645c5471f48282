use super::*;

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock};

/// Plans are keyed on the ordered column names plus the destination type's
/// stable name; a plan is only valid for the column vector it was built
/// against.
type Key = (Vec<String>, &'static str);

static CACHE: LazyLock<RwLock<HashMap<Key, Arc<Plan>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

pub(crate) fn lookup(columns: &[Column], model: &'static str) -> Option<Arc<Plan>> {
    let hit = CACHE.read().unwrap().get(&key(columns, model)).cloned();
    tracing::debug!(model, hit = hit.is_some(), "plan cache lookup");
    hit
}

/// Stores a freshly built plan. Lookups that raced on the same miss may
/// both build; the last store wins, which is sound because plans are pure
/// functions of the key.
pub(crate) fn store(columns: &[Column], model: &'static str, plan: Arc<Plan>) {
    CACHE.write().unwrap().insert(key(columns, model), plan);
}

fn key(columns: &[Column], model: &'static str) -> Key {
    (
        columns.iter().map(|column| column.name.clone()).collect(),
        model,
    )
}
