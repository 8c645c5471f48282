use super::key::identity_key;

use crate::{
    coerce,
    log::{Logs, MapLog},
    plan::{Cardinality, Plan, PlanNode},
    value::{Record, Value},
    Error, Result,
};

use std::collections::HashMap;
use std::mem;

/// Per-stream assembly state: an instance arena plus one identity map per
/// plan node. Created for each map call, never shared.
pub(super) struct Assembly<'a> {
    plan: &'a Plan,

    arena: Vec<Instance>,

    /// Per plan node: composite identity key to arena index.
    seen: Vec<HashMap<Vec<u8>, usize>>,

    /// Root arena indices in first-seen row order.
    roots: Vec<usize>,
}

/// A materialized record plus, per child slot, the arena indices of its
/// attached children. Realized into a record tree once the stream ends.
#[derive(Default)]
struct Instance {
    record: Record,
    children: Vec<Vec<usize>>,
}

impl<'a> Assembly<'a> {
    pub(super) fn new(plan: &'a Plan) -> Assembly<'a> {
        Assembly {
            plan,
            arena: vec![],
            seen: vec![HashMap::new(); plan.node_count],
            roots: vec![],
        }
    }

    pub(super) fn push_row(&mut self, row: &[Value], single: bool, logs: &mut Logs) -> Result<()> {
        let plan = self.plan;
        let Some(root) = plan.root.as_ref() else {
            return Ok(());
        };

        // A row whose root identity is entirely null is outer-join filler.
        let Some(root_key) = identity_key(root, row, &[]) else {
            return Ok(());
        };

        let index = match self.seen[root.id].get(&root_key) {
            Some(&index) => index,
            None => {
                if single && !self.roots.is_empty() {
                    return Err(Error::AmbiguousSingletonRoot { model: root.model });
                }
                let index = self.allocate(root, row, logs)?;
                self.roots.push(index);
                self.seen[root.id].insert(root_key.clone(), index);
                index
            }
        };

        self.descend(root, index, &root_key, row, logs)
    }

    fn descend(
        &mut self,
        node: &PlanNode,
        parent: usize,
        parent_key: &[u8],
        row: &[Value],
        logs: &mut Logs,
    ) -> Result<()> {
        for (slot, child) in node.children.iter().enumerate() {
            let Some(child_key) = identity_key(&child.node, row, parent_key) else {
                continue;
            };

            let index = match self.seen[child.node.id].get(&child_key) {
                Some(&index) => index,
                None => {
                    if child.node.cardinality == Cardinality::HasOne
                        && !self.arena[parent].children[slot].is_empty()
                    {
                        // The stream asserts a second distinct child for a
                        // has-one slot; keep the first.
                        logs.push(MapLog::HasOneOverwrite {
                            model: node.model,
                            field: child.field_name,
                        });
                        continue;
                    }
                    let index = self.allocate(&child.node, row, logs)?;
                    self.arena[parent].children[slot].push(index);
                    self.seen[child.node.id].insert(child_key.clone(), index);
                    index
                }
            };

            // On a hit the leaves are left untouched; only descendants may
            // still grow.
            self.descend(&child.node, index, &child_key, row, logs)?;
        }
        Ok(())
    }

    fn allocate(&mut self, node: &PlanNode, row: &[Value], logs: &mut Logs) -> Result<usize> {
        let mut record = node.template.clone();
        for bound in &node.fields {
            record[bound.field] = coerce::coerce(&row[bound.column], bound, node.model, logs)?;
        }
        self.arena.push(Instance {
            record,
            children: vec![vec![]; node.children.len()],
        });
        Ok(self.arena.len() - 1)
    }

    /// Realizes the arena into record trees, root order preserved.
    pub(super) fn finish(self) -> Vec<Record> {
        let Assembly {
            plan,
            mut arena,
            roots,
            ..
        } = self;
        let Some(root) = plan.root.as_ref() else {
            return vec![];
        };
        roots
            .into_iter()
            .map(|index| realize(&mut arena, root, index))
            .collect()
    }
}

fn realize(arena: &mut Vec<Instance>, node: &PlanNode, index: usize) -> Record {
    let Instance {
        mut record,
        children,
    } = mem::take(&mut arena[index]);

    for (slot, child) in node.children.iter().enumerate() {
        match child.node.cardinality {
            Cardinality::HasOne => {
                if let Some(&child_index) = children[slot].first() {
                    record[child.field] = Value::Record(realize(arena, &child.node, child_index));
                }
            }
            Cardinality::HasMany => {
                let items = children[slot]
                    .iter()
                    .map(|&child_index| Value::Record(realize(arena, &child.node, child_index)))
                    .collect();
                record[child.field] = Value::List(items);
            }
            Cardinality::Root => unreachable!("root nodes are never children"),
        }
    }

    record
}
