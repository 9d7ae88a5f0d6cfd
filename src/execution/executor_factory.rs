use crate::common::exception::ExecutorError;
use crate::execution::executor_context::ExecutorContext;
use crate::execution::executors::abstract_executor::BoxedExecutor;
use crate::execution::executors::aggregation_executor::AggregationExecutor;
use crate::execution::executors::create_table_executor::CreateTableExecutor;
use crate::execution::executors::delete_executor::DeleteExecutor;
use crate::execution::executors::drop_table_executor::DropTableExecutor;
use crate::execution::executors::hash_join_executor::HashJoinExecutor;
use crate::execution::executors::index_scan_executor::IndexScanExecutor;
use crate::execution::executors::insert_executor::InsertExecutor;
use crate::execution::executors::limit_executor::LimitExecutor;
use crate::execution::executors::materialization_executor::MaterializationExecutor;
use crate::execution::executors::mock_scan_executor::MockScanExecutor;
use crate::execution::executors::nested_loop_join_executor::NestedLoopJoinExecutor;
use crate::execution::executors::order_by_executor::OrderByExecutor;
use crate::execution::executors::projection_executor::ProjectionExecutor;
use crate::execution::executors::seq_scan_executor::SeqScanExecutor;
use crate::execution::executors::update_executor::UpdateExecutor;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode};
use std::sync::Arc;

/// Builds the executor tree isomorphic to a plan tree: one executor per
/// plan node, children attached in plan order. A `None` plan is legal and
/// produces no tree.
pub fn build_executor_tree(
    plan: Option<&PlanNode>,
    context: &Arc<ExecutorContext>,
) -> Result<Option<BoxedExecutor>, ExecutorError> {
    match plan {
        Some(plan) => Ok(Some(build_node(plan, context)?)),
        None => Ok(None),
    }
}

fn build_node(
    plan: &PlanNode,
    context: &Arc<ExecutorContext>,
) -> Result<BoxedExecutor, ExecutorError> {
    let mut executor: BoxedExecutor = match plan {
        PlanNode::SeqScan(node) => {
            Box::new(SeqScanExecutor::new(Arc::clone(context), node.clone()))
        }
        PlanNode::IndexScan(node) => {
            Box::new(IndexScanExecutor::new(Arc::clone(context), node.clone()))
        }
        PlanNode::Insert(node) => Box::new(InsertExecutor::new(Arc::clone(context), node.clone())),
        PlanNode::Update(node) => Box::new(UpdateExecutor::new(Arc::clone(context), node.clone())),
        PlanNode::Delete(node) => Box::new(DeleteExecutor::new(Arc::clone(context), node.clone())),
        PlanNode::Limit(node) => Box::new(LimitExecutor::new(node.clone())),
        PlanNode::NestedLoopJoin(node) => Box::new(NestedLoopJoinExecutor::new(
            Arc::clone(context),
            node.clone(),
        )),
        PlanNode::HashJoin(node) => Box::new(HashJoinExecutor::new(node.clone())),
        PlanNode::Projection(node) => {
            Box::new(ProjectionExecutor::new(Arc::clone(context), node.clone()))
        }
        PlanNode::Materialization(node) => Box::new(MaterializationExecutor::new(node.clone())),
        PlanNode::Aggregation(node) => Box::new(AggregationExecutor::new(node.clone())),
        PlanNode::OrderBy(node) => Box::new(OrderByExecutor::new(node.clone())),
        PlanNode::CreateTable(node) => {
            Box::new(CreateTableExecutor::new(Arc::clone(context), node.clone()))
        }
        PlanNode::DropTable(node) => {
            Box::new(DropTableExecutor::new(Arc::clone(context), node.clone()))
        }
        PlanNode::MockScan(node) => Box::new(MockScanExecutor::new(node.clone())),
    };

    for child_plan in plan.get_children() {
        executor.add_child(build_node(child_plan, context)?);
    }
    Ok(executor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog::Catalog;
    use crate::catalog::column::Column;
    use crate::catalog::schema::Schema;
    use crate::concurrency::transaction_manager::TransactionManager;
    use crate::execution::plans::limit_plan::LimitPlanNode;
    use crate::execution::plans::mock_scan_plan::MockScanPlanNode;
    use crate::storage::storage_manager::StorageManager;
    use crate::types_db::type_id::TypeId;

    fn test_context() -> Arc<ExecutorContext> {
        let storage = Arc::new(StorageManager::new());
        let txn_manager = Arc::new(TransactionManager::new(Arc::clone(&storage)));
        let catalog = Arc::new(Catalog::new(storage));
        let txn = txn_manager.begin_transaction();
        Arc::new(ExecutorContext::new(txn, txn_manager, catalog, Vec::new()))
    }

    #[test]
    fn test_tree_is_isomorphic_to_plan() {
        let schema = Arc::new(Schema::new(vec![Column::new("x", TypeId::Integer)]));
        let scan = MockScanPlanNode::new(Arc::clone(&schema), Vec::new());
        let plan: PlanNode =
            LimitPlanNode::new(Arc::clone(&schema), 10, 0, scan.into()).into();
        assert_eq!(plan.node_count(), 2);

        let context = test_context();
        let mut root = build_executor_tree(Some(&plan), &context).unwrap().unwrap();
        assert_eq!(root.get_children().len(), 1);
        assert_eq!(root.get_children()[0].get_children().len(), 0);
    }

    #[test]
    fn test_none_plan_builds_no_tree() {
        let context = test_context();
        assert!(build_executor_tree(None, &context).unwrap().is_none());
    }
}
