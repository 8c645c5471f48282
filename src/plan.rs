mod builder;
pub(crate) mod cache;

use crate::{log::MapLog, row::Column, schema, value::Record, value::Type, Result};

/// The immutable artifact produced by binding a destination type to a
/// specific column vector.
///
/// A plan is a pure function of (column names, destination type): it is
/// built once per pair, cached for the lifetime of the process, and safe to
/// share across concurrent assemble calls.
#[derive(Debug)]
pub struct Plan {
    /// The root node, or `None` when the root bound no columns and was
    /// dropped.
    pub root: Option<PlanNode>,

    /// The column vector the plan was built against.
    pub columns: Vec<Column>,

    /// Total node count; sizes the per-call identity maps.
    pub(crate) node_count: usize,

    /// Build-time diagnostics, replayed into every call that uses the plan.
    pub(crate) logs: Vec<MapLog>,
}

impl Plan {
    /// Builds a plan for `model` against the given column vector.
    pub fn build(model: schema::Model, columns: &[Column]) -> Result<Plan> {
        builder::build(model, columns)
    }

    pub fn logs(&self) -> &[MapLog] {
        &self.logs
    }

    /// All nodes in pre-order.
    pub fn nodes(&self) -> Vec<&PlanNode> {
        let mut nodes = vec![];
        let mut stack: Vec<&PlanNode> = self.root.iter().collect();
        while let Some(node) = stack.pop() {
            nodes.push(node);
            stack.extend(node.children.iter().rev().map(|child| &child.node));
        }
        nodes
    }
}

/// One node of the plan tree, mirroring a destination subtree.
#[derive(Debug)]
pub struct PlanNode {
    /// Identity of the record type this node materializes
    pub model: &'static str,

    pub cardinality: Cardinality,

    /// Index into the per-call identity maps
    pub(crate) id: usize,

    /// Columns bound to this node's leaf fields
    pub fields: Vec<BoundColumn>,

    /// Column indices that distinguish sibling instances at this level
    pub identity: Vec<usize>,

    /// Child subtrees in field declaration order
    pub children: Vec<ChildPlan>,

    /// Zero-value record cloned on each allocation
    pub(crate) template: Record,
}

impl PlanNode {
    pub fn child(&self, field_name: &str) -> Option<&ChildPlan> {
        self.children
            .iter()
            .find(|child| child.field_name == field_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Root,
    HasOne,
    HasMany,
}

/// A column bound to a leaf field.
#[derive(Debug, Clone)]
pub struct BoundColumn {
    /// Index of the field within its model's declaration
    pub field: usize,

    pub field_name: &'static str,

    /// Index of the column within the row vector
    pub column: usize,

    pub column_name: String,

    /// Declared leaf type the raw value is coerced into
    pub ty: Type,

    pub nullable: bool,
}

/// A child subtree plus the parent field slot it attaches to.
#[derive(Debug)]
pub struct ChildPlan {
    /// Index of the relation field within the parent model's declaration
    pub field: usize,

    pub field_name: &'static str,

    pub node: PlanNode,
}
