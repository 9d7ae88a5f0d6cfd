use crate::common::exception::{CatalogError, ExecutorError};
use crate::concurrency::transaction::TransactionResult;
use crate::execution::executor_context::ExecutorContext;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::expressions::abstract_expression::ExpressionOps;
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::abstract_plan::AbstractPlanNode;
use crate::execution::plans::seq_scan_plan::SeqScanPlanNode;
use crate::storage::tile_group::TileGroup;
use log::{debug, error};
use std::sync::Arc;

/// Scans the target table one tile group at a time, emitting a positional
/// tile of the rows visible to the transaction that also pass the
/// predicate. Tile groups with nothing visible are skipped, never emitted
/// as empty tiles.
pub struct SeqScanExecutor {
    context: Arc<ExecutorContext>,
    plan: SeqScanPlanNode,
    children: Vec<BoxedExecutor>,
    tile_groups: Vec<Arc<TileGroup>>,
    cursor: usize,
    output: Option<LogicalTile>,
}

impl SeqScanExecutor {
    pub fn new(context: Arc<ExecutorContext>, plan: SeqScanPlanNode) -> Self {
        Self {
            context,
            plan,
            children: Vec::new(),
            tile_groups: Vec::new(),
            cursor: 0,
            output: None,
        }
    }

    fn scan_tile_group(&self, tile_group: &Arc<TileGroup>) -> Result<Vec<u32>, ExecuteResult> {
        let txn = self.context.get_transaction();
        let txn_manager = self.context.get_transaction_manager();
        let header = tile_group.get_header();
        let params = self.context.get_params();

        let mut position_list = Vec::new();
        for offset in 0..tile_group.get_active_tuple_count() as u32 {
            if !txn_manager.is_visible(txn, header, offset) {
                continue;
            }
            if let Some(predicate) = self.plan.get_predicate() {
                let tuple = match tile_group.get_tuple(offset) {
                    Some(tuple) => tuple,
                    None => continue,
                };
                match predicate.evaluate(&tuple, params) {
                    Ok(value) if value.is_true() => {}
                    Ok(_) => continue,
                    Err(err) => {
                        error!("Scan predicate failed: {}", err);
                        txn_manager.set_transaction_result(txn, TransactionResult::Failure);
                        return Err(ExecuteResult::Failed);
                    }
                }
            }
            position_list.push(offset);
        }
        Ok(position_list)
    }
}

impl AbstractExecutor for SeqScanExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 0, "SeqScanExecutor")?;
        let table = self
            .context
            .get_catalog()
            .get_table(self.plan.get_table_oid())
            .ok_or(CatalogError::TableOidNotFound(self.plan.get_table_oid()))?;
        self.tile_groups = table.get_tile_groups();
        self.cursor = 0;
        Ok(())
    }

    fn execute(&mut self) -> ExecuteResult {
        while let Some(tile_group) = self.tile_groups.get(self.cursor) {
            let tile_group = Arc::clone(tile_group);
            self.cursor += 1;

            let position_list = match self.scan_tile_group(&tile_group) {
                Ok(position_list) => position_list,
                Err(failed) => return failed,
            };
            if position_list.is_empty() {
                continue;
            }
            debug!(
                "SeqScan over {} produced {} rows from tile group {}",
                self.plan.get_table_name(),
                position_list.len(),
                tile_group.get_tile_group_id()
            );
            self.output = Some(LogicalTile::from_tile_group(
                tile_group,
                position_list,
                Arc::clone(self.plan.get_output_schema()),
            ));
            return ExecuteResult::Produced;
        }
        ExecuteResult::Exhausted
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
