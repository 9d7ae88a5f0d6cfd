use crate::common::exception::ExecutorError;
use crate::concurrency::transaction::TransactionResult;
use crate::execution::executor_context::ExecutorContext;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::drop_table_plan::DropTablePlanNode;
use log::{info, warn};
use std::sync::Arc;

/// DDL: removes the table and its tile groups from the catalog.
pub struct DropTableExecutor {
    context: Arc<ExecutorContext>,
    plan: DropTablePlanNode,
    children: Vec<BoxedExecutor>,
    done: bool,
}

impl DropTableExecutor {
    pub fn new(context: Arc<ExecutorContext>, plan: DropTablePlanNode) -> Self {
        Self {
            context,
            plan,
            children: Vec::new(),
            done: false,
        }
    }
}

impl AbstractExecutor for DropTableExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 0, "DropTableExecutor")
    }

    fn execute(&mut self) -> ExecuteResult {
        if self.done {
            return ExecuteResult::Exhausted;
        }
        self.done = true;

        match self.context.get_catalog().drop_table(self.plan.get_table_name()) {
            Ok(()) => {
                info!("Dropped table {}", self.plan.get_table_name());
                ExecuteResult::Exhausted
            }
            Err(err) => {
                warn!("Drop table failed: {}", err);
                let txn = self.context.get_transaction();
                self.context
                    .get_transaction_manager()
                    .set_transaction_result(txn, TransactionResult::Failure);
                ExecuteResult::Failed
            }
        }
    }

    fn get_output(&mut self) -> Option<LogicalTile> {
        None
    }

    fn add_child(&mut self, child: BoxedExecutor) {
        self.children.push(child);
    }

    fn get_children(&mut self) -> &mut [BoxedExecutor] {
        &mut self.children
    }
}
