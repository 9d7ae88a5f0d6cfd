use crate::catalog::schema::Schema;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode, PlanType};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Equi-join: builds a hash table over the right child keyed on
/// `right_key_columns`, probes it with the left child's `left_key_columns`.
#[derive(Debug, Clone, PartialEq)]
pub struct HashJoinPlanNode {
    output_schema: Arc<Schema>,
    left_key_columns: Vec<usize>,
    right_key_columns: Vec<usize>,
    children: Vec<PlanNode>,
}

impl HashJoinPlanNode {
    pub fn new(
        output_schema: Arc<Schema>,
        left_key_columns: Vec<usize>,
        right_key_columns: Vec<usize>,
        left: PlanNode,
        right: PlanNode,
    ) -> Self {
        Self {
            output_schema,
            left_key_columns,
            right_key_columns,
            children: vec![left, right],
        }
    }

    pub fn get_left_key_columns(&self) -> &[usize] {
        &self.left_key_columns
    }

    pub fn get_right_key_columns(&self) -> &[usize] {
        &self.right_key_columns
    }
}

impl AbstractPlanNode for HashJoinPlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        &self.output_schema
    }

    fn get_children(&self) -> &[PlanNode] {
        &self.children
    }

    fn get_type(&self) -> PlanType {
        PlanType::HashJoin
    }
}

impl Display for HashJoinPlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HashJoin: left {:?} = right {:?}",
            self.left_key_columns, self.right_key_columns
        )
    }
}

impl From<HashJoinPlanNode> for PlanNode {
    fn from(node: HashJoinPlanNode) -> Self {
        PlanNode::HashJoin(node)
    }
}
