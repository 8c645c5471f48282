use super::*;

use std::ops;

/// A materialized record: one value per destination field, indexed by field
/// declaration order. Relation slots hold `Record`/`Null` for has-one and
/// `List` for has-many.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<Value>,
}

impl Record {
    pub fn new() -> Record {
        Record::default()
    }

    pub fn from_vec(fields: Vec<Value>) -> Record {
        Record { fields }
    }

    /// Takes the value at `index`, leaving `Null` behind. The usual way for
    /// [`crate::Model::load`] impls to consume a record.
    pub fn take(&mut self, index: usize) -> Value {
        self.fields[index].take()
    }

    pub fn into_fields(self) -> Vec<Value> {
        self.fields
    }
}

impl ops::Deref for Record {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.fields
    }
}

impl ops::DerefMut for Record {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.fields
    }
}

impl FromIterator<Value> for Record {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Record {
        Record::from_vec(iter.into_iter().collect())
    }
}

impl IntoIterator for Record {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
