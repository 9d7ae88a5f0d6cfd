use crate::catalog::schema::Schema;
use crate::execution::plans::aggregation_plan::AggregationPlanNode;
use crate::execution::plans::create_table_plan::CreateTablePlanNode;
use crate::execution::plans::delete_plan::DeletePlanNode;
use crate::execution::plans::drop_table_plan::DropTablePlanNode;
use crate::execution::plans::hash_join_plan::HashJoinPlanNode;
use crate::execution::plans::index_scan_plan::IndexScanPlanNode;
use crate::execution::plans::insert_plan::InsertPlanNode;
use crate::execution::plans::limit_plan::LimitPlanNode;
use crate::execution::plans::materialization_plan::MaterializationPlanNode;
use crate::execution::plans::mock_scan_plan::MockScanPlanNode;
use crate::execution::plans::nested_loop_join_plan::NestedLoopJoinPlanNode;
use crate::execution::plans::order_by_plan::OrderByPlanNode;
use crate::execution::plans::projection_plan::ProjectionPlanNode;
use crate::execution::plans::seq_scan_plan::SeqScanPlanNode;
use crate::execution::plans::update_plan::UpdatePlanNode;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanType {
    SeqScan,
    IndexScan,
    Insert,
    Update,
    Delete,
    Limit,
    NestedLoopJoin,
    HashJoin,
    Projection,
    Materialization,
    Aggregation,
    OrderBy,
    CreateTable,
    DropTable,
    MockScan,
}

/// Closed set of plan node kinds. Every kind listed here has an executor;
/// a plan shape this enum cannot express cannot be constructed, so there is
/// no "unknown node" path at execution time.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanNode {
    SeqScan(SeqScanPlanNode),
    IndexScan(IndexScanPlanNode),
    Insert(InsertPlanNode),
    Update(UpdatePlanNode),
    Delete(DeletePlanNode),
    Limit(LimitPlanNode),
    NestedLoopJoin(NestedLoopJoinPlanNode),
    HashJoin(HashJoinPlanNode),
    Projection(ProjectionPlanNode),
    Materialization(MaterializationPlanNode),
    Aggregation(AggregationPlanNode),
    OrderBy(OrderByPlanNode),
    CreateTable(CreateTablePlanNode),
    DropTable(DropTablePlanNode),
    MockScan(MockScanPlanNode),
}

pub trait AbstractPlanNode {
    fn get_output_schema(&self) -> &Arc<Schema>;
    fn get_children(&self) -> &[PlanNode];
    fn get_type(&self) -> PlanType;
}

impl PlanNode {
    fn as_abstract_plan_node(&self) -> &dyn AbstractPlanNode {
        match self {
            PlanNode::SeqScan(node) => node,
            PlanNode::IndexScan(node) => node,
            PlanNode::Insert(node) => node,
            PlanNode::Update(node) => node,
            PlanNode::Delete(node) => node,
            PlanNode::Limit(node) => node,
            PlanNode::NestedLoopJoin(node) => node,
            PlanNode::HashJoin(node) => node,
            PlanNode::Projection(node) => node,
            PlanNode::Materialization(node) => node,
            PlanNode::Aggregation(node) => node,
            PlanNode::OrderBy(node) => node,
            PlanNode::CreateTable(node) => node,
            PlanNode::DropTable(node) => node,
            PlanNode::MockScan(node) => node,
        }
    }

    /// Number of nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        1 + self
            .get_children()
            .iter()
            .map(PlanNode::node_count)
            .sum::<usize>()
    }
}

impl AbstractPlanNode for PlanNode {
    fn get_output_schema(&self) -> &Arc<Schema> {
        self.as_abstract_plan_node().get_output_schema()
    }

    fn get_children(&self) -> &[PlanNode] {
        self.as_abstract_plan_node().get_children()
    }

    fn get_type(&self) -> PlanType {
        self.as_abstract_plan_node().get_type()
    }
}

impl Display for PlanNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PlanNode::SeqScan(node) => write!(f, "{}", node),
            PlanNode::IndexScan(node) => write!(f, "{}", node),
            PlanNode::Insert(node) => write!(f, "{}", node),
            PlanNode::Update(node) => write!(f, "{}", node),
            PlanNode::Delete(node) => write!(f, "{}", node),
            PlanNode::Limit(node) => write!(f, "{}", node),
            PlanNode::NestedLoopJoin(node) => write!(f, "{}", node),
            PlanNode::HashJoin(node) => write!(f, "{}", node),
            PlanNode::Projection(node) => write!(f, "{}", node),
            PlanNode::Materialization(node) => write!(f, "{}", node),
            PlanNode::Aggregation(node) => write!(f, "{}", node),
            PlanNode::OrderBy(node) => write!(f, "{}", node),
            PlanNode::CreateTable(node) => write!(f, "{}", node),
            PlanNode::DropTable(node) => write!(f, "{}", node),
            PlanNode::MockScan(node) => write!(f, "{}", node),
        }
    }
}
