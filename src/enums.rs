//! Process-wide registry mapping enum type names to their value-name /
//! integer-code pairs.
//!
//! The registry is a convenience for coercing textual enum columns; it is
//! written rarely (typically once at startup) and read under a shared lock
//! on every textual enum coercion.

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

static REGISTRY: LazyLock<RwLock<HashMap<String, HashMap<String, i64>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Merges a mapping from enum type name to (value name → integer code)
/// into the process-wide registry.
///
/// Repeated calls union entries; same-key conflicts take the latest value.
pub fn register_enums(enums: HashMap<String, HashMap<String, i64>>) {
    let mut registry = REGISTRY.write().unwrap();
    for (ty, values) in enums {
        registry.entry(ty).or_default().extend(values);
    }
}

pub(crate) fn lookup(ty: &str, name: &str) -> Option<i64> {
    let registry = REGISTRY.read().unwrap();
    registry.get(ty)?.get(name).copied()
}
