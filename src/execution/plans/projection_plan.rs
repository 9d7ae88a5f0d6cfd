use crate::catalog::schema::Schema;
use crate::execution::expressions::abstract_expression::Expression;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Computes one output column per expression over each child row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionPlanNode {
    output_schema: Arc<Schema>,
    expressions: Vec<Arc<Expression>>,
    children: Vec<PlanNode>,
}

impl ProjectionPlanNode {
    pub fn new(
        output_schema: Arc<Schema>,
        expressions: Vec<Arc<Expression>>,
        child: PlanNode,
    ) -> Self {
        Self {
            output_schema,
            expressions,
            children: vec![child],
        }
    }

    pub fn get_expressions(&self) -> &[Arc<Expression>] {
        &self.expressions
    }
}

impl AbstractPlanNode for ProjectionPlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::Projection
    }
}

impl Display for ProjectionPlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Projection: {} columns", self.expressions.len())
    }
}

impl From<ProjectionPlanNode> for PlanNode {
    fn from(node: ProjectionPlanNode) -> Self {
        PlanNode::Projection(node)
    }
}
