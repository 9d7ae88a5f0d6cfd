use crate::common::exception::ExecutorError;
use crate::concurrency::transaction::TransactionResult;
use crate::execution::executor_context::ExecutorContext;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::expressions::abstract_expression::ExpressionOps;
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::abstract_plan::AbstractPlanNode;
use crate::execution::plans::nested_loop_join_plan::NestedLoopJoinPlanNode;
use crate::storage::tuple::Tuple;
use log::warn;
use std::sync::Arc;

/// Inner join by exhaustive pairing. The right child is drained and
/// materialized up front; each left batch then produces at most one output
/// tile of concatenated matches.
pub struct NestedLoopJoinExecutor {
    context: Arc<ExecutorContext>,
    plan: NestedLoopJoinPlanNode,
    children: Vec<BoxedExecutor>,
    right_rows: Vec<Tuple>,
    right_loaded: bool,
    output: Option<LogicalTile>,
}

impl NestedLoopJoinExecutor {
    pub fn new(context: Arc<ExecutorContext>, plan: NestedLoopJoinPlanNode) -> Self {
        Self {
            context,
            plan,
            children: Vec::new(),
            right_rows: Vec::new(),
            right_loaded: false,
            output: None,
        }
    }

    fn load_right(&mut self) -> ExecuteResult {
        loop {
            match self.children[1].execute() {
                ExecuteResult::Produced => {
                    if let Some(tile) = self.children[1].get_output() {
                        self.right_rows.extend(tile.materialize());
                    }
                }
                ExecuteResult::Exhausted => {
                    self.right_loaded = true;
                    return ExecuteResult::Produced;
                }
                ExecuteResult::Failed => return ExecuteResult::Failed,
            }
        }
    }

    fn join_batch(&mut self, left_tile: &LogicalTile) -> Result<Vec<Tuple>, ExecuteResult> {
        let params = self.context.get_params();
        let mut joined = Vec::new();
        for left_idx in 0..left_tile.row_count() {
            let left_tuple = match left_tile.get_tuple(left_idx) {
                Some(tuple) => tuple,
                None => continue,
            };
            for right_tuple in &self.right_rows {
                if let Some(predicate) = self.plan.get_predicate() {
                    match predicate.evaluate_join(&left_tuple, right_tuple, params) {
                        Ok(value) if value.is_true() => {}
                        Ok(_) => continue,
                        Err(err) => {
                            warn!("Join predicate failed: {}", err);
                            let txn = self.context.get_transaction();
                            self.context
                                .get_transaction_manager()
                                .set_transaction_result(txn, TransactionResult::Failure);
                            return Err(ExecuteResult::Failed);
                        }
                    }
                }
                let mut values = left_tuple.get_values().to_vec();
                values.extend(right_tuple.get_values().iter().cloned());
                joined.push(Tuple::new(values));
            }
        }
        Ok(joined)
    }
}

impl AbstractExecutor for NestedLoopJoinExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 2, "NestedLoopJoinExecutor")?;
        self.children[0].init()?;
        self.children[1].init()
    }

    fn execute(&mut self) -> ExecuteResult {
        if !self.right_loaded && self.load_right() == ExecuteResult::Failed {
            return ExecuteResult::Failed;
        }

        loop {
            match self.children[0].execute() {
                ExecuteResult::Produced => {}
                other => return other,
            }
            let left_tile = match self.children[0].get_output() {
                Some(tile) => tile,
                None => continue,
            };
            let joined = match self.join_batch(&left_tile) {
                Ok(joined) => joined,
                Err(failed) => return failed,
            };
            if joined.is_empty() {
                continue;
            }
            self.output = Some(LogicalTile::from_tuples(
                joined,
                Arc::clone(self.plan.get_output_schema()),
            ));
            return ExecuteResult::Produced;
        }
    }

    fn get_output(&mut self) -> Option<LogicalTile> {
        self.output.take()
    }

    fn add_child(&mut self, child: BoxedExecutor) {
        self.children.push(child);
    }

    fn get_children(&mut self) -> &mut [BoxedExecutor] {
        &mut self.children
    }
}
