use crate::catalog::schema::Schema;
use crate::common::config::Oid;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Deletes the rows its child produces.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletePlanNode {
    output_schema: Arc<Schema>,
    table_oid: Oid,
    children: Vec<PlanNode>,
}

impl DeletePlanNode {
    pub fn new(output_schema: Arc<Schema>, table_oid: Oid, child: PlanNode) -> Self {
        Self {
            output_schema,
            table_oid,
            children: vec![child],
        }
    }

    pub fn get_table_oid(&self) -> Oid {
        self.table_oid
    }
}

impl AbstractPlanNode for DeletePlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::Delete
    }
}

impl Display for DeletePlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Delete: table {}", self.table_oid)
    }
}

impl From<DeletePlanNode> for PlanNode {
    fn from(node: DeletePlanNode) -> Self {
        PlanNode::Delete(node)
    }
}
