use crate::common::exception::{CatalogError, ExecutorError};
use crate::concurrency::transaction::TransactionResult;
use crate::execution::executor_context::ExecutorContext;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::update_plan::UpdatePlanNode;
use crate::storage::data_table::DataTable;
use log::{debug, warn};
use std::sync::Arc;

/// Rewrites every row its child produces, following the optimistic
/// ownership protocol per row:
///
/// - Already owner: the version was created by this transaction, so the new
///   values overwrite it in place and no chain link is added.
/// - Ownable: acquire ownership by compare-and-swap, append the projected
///   version to the table, and link old to new. A lost race or a failed
///   version insert marks the transaction Failed, nothing is retried.
/// - Neither: another transaction holds the row, or the version is stale
///   under this snapshot. Immediate failure, no waiting.
///
/// Each consumed child batch yields one Produced step with no output tile;
/// row counts accumulate on the executor context.
pub struct UpdateExecutor {
    context: Arc<ExecutorContext>,
    plan: UpdatePlanNode,
    children: Vec<BoxedExecutor>,
    table: Option<Arc<DataTable>>,
    done: bool,
}

impl UpdateExecutor {
    pub fn new(context: Arc<ExecutorContext>, plan: UpdatePlanNode) -> Self {
        Self {
            context,
            plan,
            children: Vec::new(),
            table: None,
            done: false,
        }
    }

    fn update_tile(&self, tile: &LogicalTile, table: &Arc<DataTable>) -> ExecuteResult {
        let txn = self.context.get_transaction();
        let txn_manager = self.context.get_transaction_manager();
        let project_info = self.plan.get_project_info();
        let schema = table.get_schema();
        let params = self.context.get_params();

        for row_idx in 0..tile.row_count() {
            let old_location = match tile.get_location(row_idx) {
                Some(location) => location,
                None => {
                    // Materialized input cannot be traced back to storage.
                    warn!("Update fed a materialized tile, no storage location");
                    txn_manager.set_transaction_result(txn, TransactionResult::Failure);
                    return ExecuteResult::Failed;
                }
            };
            let tile_group = match tile.get_tile_group() {
                Some(tile_group) => tile_group,
                None => {
                    txn_manager.set_transaction_result(txn, TransactionResult::Failure);
                    return ExecuteResult::Failed;
                }
            };
            let header = tile_group.get_header();
            let offset = old_location.get_offset();

            let old_tuple = match tile_group.get_tuple(offset) {
                Some(tuple) => tuple,
                None => continue,
            };
            let new_tuple = match project_info.evaluate(&old_tuple, schema, params) {
                Ok(tuple) => tuple,
                Err(err) => {
                    warn!("Update projection failed: {}", err);
                    txn_manager.set_transaction_result(txn, TransactionResult::Failure);
                    return ExecuteResult::Failed;
                }
            };

            if txn_manager.is_owner(txn, header, offset) {
                // This transaction created the version; overwrite in place.
                tile_group.copy_tuple(&new_tuple, offset);
                txn_manager.perform_update(txn, old_location, None);
                self.context.increment_processed(1);
            } else if txn_manager.is_ownable(txn, header, offset)
                && txn_manager.acquire_ownership(txn, header, offset)
            {
                let new_location = match table.insert_version(new_tuple) {
                    Some(location) => location,
                    None => {
                        // Ownership was already recorded; abort releases it.
                        warn!(
                            "Version insert failed on table {}, storage exhausted",
                            table.get_name()
                        );
                        txn_manager.set_transaction_result(txn, TransactionResult::Failure);
                        return ExecuteResult::Failed;
                    }
                };
                txn_manager.perform_update(txn, old_location, Some(new_location));
                self.context.increment_processed(1);
            } else {
                debug!(
                    "Update conflict at {}, transaction {} fails fast",
                    old_location,
                    txn.get_transaction_id()
                );
                txn_manager.set_transaction_result(txn, TransactionResult::Failure);
                return ExecuteResult::Failed;
            }
        }
        ExecuteResult::Produced
    }
}

impl AbstractExecutor for UpdateExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 1, "UpdateExecutor")?;
        let table = self
            .context
            .get_catalog()
            .get_table(self.plan.get_table_oid())
            .ok_or(CatalogError::TableOidNotFound(self.plan.get_table_oid()))?;
        self.table = Some(table);
        self.children[0].init()
    }

    fn execute(&mut self) -> ExecuteResult {
        if self.done {
            return ExecuteResult::Exhausted;
        }
        let table = match &self.table {
            Some(table) => Arc::clone(table),
            None => return ExecuteResult::Failed,
        };

        match self.children[0].execute() {
            ExecuteResult::Produced => {
                let tile = match self.children[0].get_output() {
                    Some(tile) => tile,
                    None => return ExecuteResult::Produced,
                };
                self.update_tile(&tile, &table)
            }
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
