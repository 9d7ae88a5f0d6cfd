use crate::catalog::schema::Schema;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTablePlanNode {
    output_schema: Arc<Schema>,
    table_name: String,
    table_schema: Schema,
    children: Vec<PlanNode>,
}

impl CreateTablePlanNode {
    pub fn new(table_name: String, table_schema: Schema) -> Self {
        Self {
            output_schema: Arc::new(Schema::empty()),
            table_name,
            table_schema,
            children: Vec::new(),
        }
    }

    pub fn get_table_name(&self) -> &str {
        &self.table_name
    }

    pub fn get_table_schema(&self) -> &Schema {
        &self.table_schema
    }
}

impl AbstractPlanNode for CreateTablePlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::CreateTable
    }
}

impl Display for CreateTablePlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "CreateTable: {}", self.table_name)
    }
}

impl From<CreateTablePlanNode> for PlanNode {
    fn from(node: CreateTablePlanNode) -> Self {
        PlanNode::CreateTable(node)
    }
}
