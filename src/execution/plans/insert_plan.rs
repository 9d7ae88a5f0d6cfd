use crate::catalog::schema::Schema;
use crate::common::config::Oid;
use crate::execution::expressions::abstract_expression::Expression;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Inserts either literal rows carried on the plan, or the rows produced by
/// a child subtree (insert-from-select). The two forms are exclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertPlanNode {
    output_schema: Arc<Schema>,
    table_oid: Oid,
    rows: Vec<Vec<Arc<Expression>>>,
    children: Vec<PlanNode>,
}

impl InsertPlanNode {
    pub fn new_raw_values(
        output_schema: Arc<Schema>,
        table_oid: Oid,
        rows: Vec<Vec<Arc<Expression>>>,
    ) -> Self {
        Self {
            output_schema,
            table_oid,
            rows,
            children: Vec::new(),
        }
    }

    pub fn new_from_child(output_schema: Arc<Schema>, table_oid: Oid, child: PlanNode) -> Self {
        Self {
            output_schema,
            table_oid,
            rows: Vec::new(),
            children: vec![child],
        }
    }

    pub fn get_table_oid(&self) -> Oid {
        self.table_oid
    }

    pub fn get_rows(&self) -> &[Vec<Arc<Expression>>] {
        &self.rows
    }

    pub fn has_raw_values(&self) -> bool {
        !self.rows.is_empty()
    }
}

impl AbstractPlanNode for InsertPlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::Insert
    }
}

impl Display for InsertPlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.has_raw_values() {
            write!(f, "Insert: table {} ({} rows)", self.table_oid, self.rows.len())
        } else {
            write!(f, "Insert: table {} (from child)", self.table_oid)
        }
    }
}

impl From<InsertPlanNode> for PlanNode {
    fn from(node: InsertPlanNode) -> Self {
        PlanNode::Insert(node)
    }
}
