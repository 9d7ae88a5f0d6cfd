use crate::catalog::schema::Schema;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct DropTablePlanNode {
    output_schema: Arc<Schema>,
    table_name: String,
    children: Vec<PlanNode>,
}

impl DropTablePlanNode {
    pub fn new(table_name: String) -> Self {
        Self {
            output_schema: Arc::new(Schema::empty()),
            table_name,
            children: Vec::new(),
        }
    }

    pub fn get_table_name(&self) -> &str {
        &self.table_name
    }
}

impl AbstractPlanNode for DropTablePlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::DropTable
    }
}

impl Display for DropTablePlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DropTable: {}", self.table_name)
    }
}

impl From<DropTablePlanNode> for PlanNode {
    fn from(node: DropTablePlanNode) -> Self {
        PlanNode::DropTable(node)
    }
}
