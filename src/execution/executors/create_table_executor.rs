use crate::common::exception::ExecutorError;
use crate::concurrency::transaction::TransactionResult;
use crate::execution::executor_context::ExecutorContext;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::create_table_plan::CreateTablePlanNode;
use log::{info, warn};
use std::sync::Arc;

/// DDL: creates the table on first pull. Catalog changes are not versioned;
/// a failed creation simply fails the statement.
pub struct CreateTableExecutor {
    context: Arc<ExecutorContext>,
    plan: CreateTablePlanNode,
    children: Vec<BoxedExecutor>,
    done: bool,
}

impl CreateTableExecutor {
    pub fn new(context: Arc<ExecutorContext>, plan: CreateTablePlanNode) -> Self {
        Self {
            context,
            plan,
            children: Vec::new(),
            done: false,
        }
    }
}

impl AbstractExecutor for CreateTableExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 0, "CreateTableExecutor")
    }

    fn execute(&mut self) -> ExecuteResult {
        if self.done {
            return ExecuteResult::Exhausted;
        }
        self.done = true;

        let catalog = self.context.get_catalog();
        match catalog.create_table(
            self.plan.get_table_name(),
            self.plan.get_table_schema().clone(),
        ) {
            Ok(table) => {
                info!(
                    "Created table {} with oid {}",
                    table.get_name(),
                    table.get_table_oid()
                );
                ExecuteResult::Exhausted
            }
            Err(err) => {
                warn!("Create table failed: {}", err);
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
