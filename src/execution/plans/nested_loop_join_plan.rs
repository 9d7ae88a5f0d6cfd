use crate::catalog::schema::Schema;
use crate::execution::expressions::abstract_expression::Expression;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Inner join evaluated pairwise; the predicate sees the left tuple as side
/// 0 and the right tuple as side 1.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedLoopJoinPlanNode {
    output_schema: Arc<Schema>,
    predicate: Option<Arc<Expression>>,
    children: Vec<PlanNode>,
}

impl NestedLoopJoinPlanNode {
    pub fn new(
        output_schema: Arc<Schema>,
        predicate: Option<Arc<Expression>>,
        left: PlanNode,
        right: PlanNode,
    ) -> Self {
        Self {
            output_schema,
            predicate,
            children: vec![left, right],
        }
    }

    pub fn get_predicate(&self) -> Option<&Arc<Expression>> {
        self.predicate.as_ref()
    }
}

impl AbstractPlanNode for NestedLoopJoinPlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::NestedLoopJoin
    }
}

impl Display for NestedLoopJoinPlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "NestedLoopJoin")?;
        if let Some(predicate) = &self.predicate {
            write!(f, ": {}", predicate)?;
        }
        Ok(())
    }
}

impl From<NestedLoopJoinPlanNode> for PlanNode {
    fn from(node: NestedLoopJoinPlanNode) -> Self {
        PlanNode::NestedLoopJoin(node)
    }
}
