use crate::common::exception::{CatalogError, ExecutorError};
use crate::concurrency::transaction::TransactionResult;
use crate::execution::executor_context::ExecutorContext;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::delete_plan::DeletePlanNode;
use log::debug;
use std::sync::Arc;

/// Deletes the rows its child produces, under the same ownership protocol
/// as an update: own versions are marked directly, ownable versions are
/// acquired first, anything else is an immediate conflict.
pub struct DeleteExecutor {
    context: Arc<ExecutorContext>,
    plan: DeletePlanNode,
    children: Vec<BoxedExecutor>,
    done: bool,
}

impl DeleteExecutor {
    pub fn new(context: Arc<ExecutorContext>, plan: DeletePlanNode) -> Self {
        Self {
            context,
            plan,
            children: Vec::new(),
            done: false,
        }
    }

    fn delete_tile(&self, tile: &LogicalTile) -> ExecuteResult {
        let txn = self.context.get_transaction();
        let txn_manager = self.context.get_transaction_manager();

        for row_idx in 0..tile.row_count() {
            let (location, tile_group) = match (tile.get_location(row_idx), tile.get_tile_group())
            {
                (Some(location), Some(tile_group)) => (location, tile_group),
                _ => {
                    txn_manager.set_transaction_result(txn, TransactionResult::Failure);
                    return ExecuteResult::Failed;
                }
            };
            let header = tile_group.get_header();
            let offset = location.get_offset();

            if txn_manager.is_owner(txn, header, offset)
                || (txn_manager.is_ownable(txn, header, offset)
                    && txn_manager.acquire_ownership(txn, header, offset))
            {
                txn_manager.perform_delete(txn, location);
                self.context.increment_processed(1);
            } else {
                debug!(
                    "Delete conflict at {}, transaction {} fails fast",
                    location,
                    txn.get_transaction_id()
                );
                txn_manager.set_transaction_result(txn, TransactionResult::Failure);
                return ExecuteResult::Failed;
            }
        }
        ExecuteResult::Produced
    }
}

impl AbstractExecutor for DeleteExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 1, "DeleteExecutor")?;
        // The table only needs to exist; deletions act through the child's
        // tile locations.
        self.context
            .get_catalog()
            .get_table(self.plan.get_table_oid())
            .ok_or(CatalogError::TableOidNotFound(self.plan.get_table_oid()))?;
        self.children[0].init()
    }

    fn execute(&mut self) -> ExecuteResult {
        if self.done {
            return ExecuteResult::Exhausted;
        }
        match self.children[0].execute() {
            ExecuteResult::Produced => match self.children[0].get_output() {
                Some(tile) => self.delete_tile(&tile),
                None => ExecuteResult::Produced,
            },
            ExecuteResult::Exhausted => {
                self.done = true;
                ExecuteResult::Exhausted
            }
            ExecuteResult::Failed => {
                self.done = true;
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
