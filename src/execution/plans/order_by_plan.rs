use crate::catalog::schema::Schema;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Materializing sort over the child's full output.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByPlanNode {
    output_schema: Arc<Schema>,
    sort_keys: Vec<(usize, SortDirection)>,
    children: Vec<PlanNode>,
}

impl OrderByPlanNode {
    pub fn new(
        output_schema: Arc<Schema>,
        sort_keys: Vec<(usize, SortDirection)>,
        child: PlanNode,
    ) -> Self {
        Self {
            output_schema,
            sort_keys,
            children: vec![child],
        }
    }

    pub fn get_sort_keys(&self) -> &[(usize, SortDirection)] {
        &self.sort_keys
    }
}

impl AbstractPlanNode for OrderByPlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::OrderBy
    }
}

impl Display for OrderByPlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "OrderBy: {:?}", self.sort_keys)
    }
}

impl From<OrderByPlanNode> for PlanNode {
    fn from(node: OrderByPlanNode) -> Self {
        PlanNode::OrderBy(node)
    }
}
