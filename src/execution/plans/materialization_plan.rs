use crate::catalog::schema::Schema;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Converts positional tiles from the child into fully owned rows, cutting
/// any reference the output holds into table storage.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterializationPlanNode {
    output_schema: Arc<Schema>,
    children: Vec<PlanNode>,
}

impl MaterializationPlanNode {
    pub fn new(output_schema: Arc<Schema>, child: PlanNode) -> Self {
        Self {
            output_schema,
            children: vec![child],
        }
    }
}

impl AbstractPlanNode for MaterializationPlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::Materialization
    }
}

impl Display for MaterializationPlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Materialization")
    }
}

impl From<MaterializationPlanNode> for PlanNode {
    fn from(node: MaterializationPlanNode) -> Self {
        PlanNode::Materialization(node)
    }
}
