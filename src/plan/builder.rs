use super::*;

use crate::{
    schema::FieldTy,
    value::{Type, Value},
    Error,
};

use indexmap::{IndexMap, IndexSet};

/// Build-time record of one bound column. Lowered into [`BoundColumn`]
/// once the node is complete; run-time consumption uses the bound indices
/// only.
struct ColumnField {
    field: usize,
    field_name: &'static str,
    column: usize,
    ty: Type,
    nullable: bool,
    identity: bool,
}

pub(super) fn build(model: schema::Model, columns: &[Column]) -> Result<Plan> {
    if model.fields.is_empty() {
        return Err(Error::InvalidDestinationType(format!(
            "`{}` declares no fields",
            model.name
        )));
    }

    let mut builder = Builder {
        pool: columns.iter().cloned().map(Some).collect(),
        path: vec![],
        logs: vec![],
        next_id: 0,
    };

    let root = builder.node(model, Cardinality::Root, &IndexSet::new())?;

    let unbound: Vec<String> = builder
        .pool
        .iter()
        .flatten()
        .map(|column| column.name.clone())
        .collect();
    if !unbound.is_empty() {
        builder.logs.push(MapLog::UnboundColumns { columns: unbound });
    }

    tracing::debug!(
        nodes = builder.next_id,
        columns = columns.len(),
        "plan built"
    );

    Ok(Plan {
        root,
        columns: columns.to_vec(),
        node_count: builder.next_id,
        logs: builder.logs,
    })
}

struct Builder {
    /// Claimable column pool. Claimed slots are blanked so indices of the
    /// remaining columns are preserved.
    pool: Vec<Option<Column>>,

    /// Record type names on the current descent, for cycle detection.
    path: Vec<&'static str>,

    logs: Vec<MapLog>,

    next_id: usize,
}

impl Builder {
    /// Builds the plan node for one record type. Returns `None` when the
    /// node bound no columns; such nodes are dropped together with their
    /// children, since a child cannot be identified without its parent.
    fn node(
        &mut self,
        model: schema::Model,
        cardinality: Cardinality,
        ancestors: &IndexSet<String>,
    ) -> Result<Option<PlanNode>> {
        if self.path.contains(&model.name) {
            let mut path = self.path.clone();
            path.push(model.name);
            return Err(Error::CyclicTypeGraph {
                path: path.join(" -> "),
            });
        }

        if !model.has_bindable_leaf() {
            self.logs.push(MapLog::EmptyNode { model: model.name });
            return Ok(None);
        }

        // Bind leaves in declaration order before descending: declaration
        // order within a node beats depth, and the parent claims a shared
        // column name before any child sees it.
        let mut present: IndexMap<String, ColumnField> = IndexMap::new();
        for (index, field) in model.fields.iter().enumerate() {
            let Some(primitive) = field.ty.as_primitive() else {
                continue;
            };
            let candidates = field.candidate_names();
            match self.claim(&candidates) {
                Some((column, column_name)) => {
                    present.insert(
                        column_name,
                        ColumnField {
                            field: index,
                            field_name: field.name,
                            column,
                            ty: primitive.ty,
                            nullable: field.nullable,
                            identity: field.identity,
                        },
                    );
                }
                None => {
                    // Unbound leaves stay at their zero value. Flag the
                    // field when its candidate was already claimed within
                    // this node or by an ancestor.
                    if let Some(taken) = candidates
                        .iter()
                        .find(|name| present.contains_key(*name) || ancestors.contains(*name))
                    {
                        self.logs.push(MapLog::DuplicateCandidate {
                            model: model.name,
                            field: field.name,
                            column: taken.clone(),
                        });
                    }
                }
            }
        }

        if present.is_empty() {
            self.logs.push(MapLog::EmptyNode { model: model.name });
            return Ok(None);
        }

        let id = self.next_id;
        self.next_id += 1;

        let mut union = ancestors.clone();
        union.extend(present.keys().cloned());

        self.path.push(model.name);
        let mut children = vec![];
        let mut outcome = Ok(());
        for (index, field) in model.fields.iter().enumerate() {
            let Some((_, child_schema)) = field.ty.relation() else {
                continue;
            };
            let child_cardinality = if field.ty.is_has_one() {
                Cardinality::HasOne
            } else {
                Cardinality::HasMany
            };
            match self.node(child_schema(), child_cardinality, &union) {
                Ok(Some(node)) => children.push(ChildPlan {
                    field: index,
                    field_name: field.name,
                    node,
                }),
                Ok(None) => {}
                Err(error) => {
                    outcome = Err(error);
                    break;
                }
            }
        }
        self.path.pop();
        outcome?;

        let marked: Vec<usize> = present
            .values()
            .filter(|bound| bound.identity)
            .map(|bound| bound.column)
            .collect();
        let identity = if marked.is_empty() {
            present.values().map(|bound| bound.column).collect()
        } else {
            marked
        };

        let template = template(&model);
        let fields = present
            .into_iter()
            .map(|(column_name, bound)| BoundColumn {
                field: bound.field,
                field_name: bound.field_name,
                column: bound.column,
                column_name,
                ty: bound.ty,
                nullable: bound.nullable,
            })
            .collect();

        Ok(Some(PlanNode {
            model: model.name,
            cardinality,
            id,
            fields,
            identity,
            children,
            template,
        }))
    }

    /// Claims the first unclaimed column, in row order, whose name matches
    /// a candidate. Claimed slots are blanked, not removed.
    fn claim(&mut self, candidates: &IndexSet<String>) -> Option<(usize, String)> {
        let index = self.pool.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|column| candidates.contains(&column.name))
        })?;
        let column = self.pool[index].take()?;
        Some((index, column.name))
    }
}

/// The zero-value record for a model: nullable leaves and has-one slots are
/// null, non-nullable leaves hold their type's zero, has-many slots hold an
/// empty list.
fn template(model: &schema::Model) -> Record {
    model
        .fields
        .iter()
        .map(|field| match &field.ty {
            FieldTy::Primitive(_) if field.nullable => Value::Null,
            FieldTy::Primitive(primitive) => primitive.ty.zero(),
            FieldTy::HasOne(_) => Value::Null,
            FieldTy::HasMany(_) => Value::List(vec![]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::ColumnType;
    use crate::schema::Field;

    fn columns(names: &[&str]) -> Vec<Column> {
        names
            .iter()
            .map(|name| Column::new(*name, ColumnType::Unknown))
            .collect()
    }

    #[test]
    fn candidate_names_collapse_and_prioritize_tag() {
        let field = Field::primitive("Title", Type::String).column("blog_title");
        let names: Vec<_> = field.candidate_names().into_iter().collect();
        assert_eq!(names, ["blog_title", "Title", "title"]);
    }

    #[test]
    fn claim_prefers_row_order_and_blanks_the_slot() {
        let mut builder = Builder {
            pool: columns(&["a", "id", "b", "id"]).into_iter().map(Some).collect(),
            path: vec![],
            logs: vec![],
            next_id: 0,
        };
        let field = Field::primitive("id", Type::I64);
        let (index, name) = builder.claim(&field.candidate_names()).unwrap();
        assert_eq!((index, name.as_str()), (1, "id"));
        // the first `id` slot is blanked; a second claim finds the later one
        let (index, _) = builder.claim(&field.candidate_names()).unwrap();
        assert_eq!(index, 3);
        assert!(builder.claim(&field.candidate_names()).is_none());
    }
}
