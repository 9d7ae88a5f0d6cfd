use crate::catalog::schema::Schema;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Skips `offset` rows from the child, then passes through at most `limit`.
#[derive(Debug, Clone, PartialEq)]
pub struct LimitPlanNode {
    output_schema: Arc<Schema>,
    limit: usize,
    offset: usize,
    children: Vec<PlanNode>,
}

impl LimitPlanNode {
    pub fn new(output_schema: Arc<Schema>, limit: usize, offset: usize, child: PlanNode) -> Self {
        Self {
            output_schema,
            limit,
            offset,
            children: vec![child],
        }
    }

    pub fn get_limit(&self) -> usize {
        self.limit
    }

    pub fn get_offset(&self) -> usize {
        self.offset
    }
}

impl AbstractPlanNode for LimitPlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::Limit
    }
}

impl Display for LimitPlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Limit: {} offset {}", self.limit, self.offset)
    }
}

impl From<LimitPlanNode> for PlanNode {
    fn from(node: LimitPlanNode) -> Self {
        PlanNode::Limit(node)
    }
}
