use crate::catalog::schema::Schema;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use crate::storage::tuple::Tuple;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Leaf node that emits canned rows, one tile per batch. Test-plan plumbing.
#[derive(Debug, Clone, PartialEq)]
pub struct MockScanPlanNode {
    output_schema: Arc<Schema>,
    batches: Vec<Vec<Tuple>>,
    children: Vec<PlanNode>,
}

impl MockScanPlanNode {
    pub fn new(output_schema: Arc<Schema>, batches: Vec<Vec<Tuple>>) -> Self {
        Self {
            output_schema,
            batches,
            children: Vec::new(),
        }
    }

    pub fn get_batches(&self) -> &[Vec<Tuple>] {
        &self.batches
    }
}

impl AbstractPlanNode for MockScanPlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::MockScan
    }
}

impl Display for MockScanPlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "MockScan: {} batches", self.batches.len())
    }
}

impl From<MockScanPlanNode> for PlanNode {
    fn from(node: MockScanPlanNode) -> Self {
        PlanNode::MockScan(node)
    }
}
