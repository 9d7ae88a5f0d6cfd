use crate::common::exception::{CatalogError, ExecutorError};
use crate::execution::executor_context::ExecutorContext;
use crate::execution::executors::abstract_executor::{
    check_child_count, AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::abstract_plan::AbstractPlanNode;
use crate::execution::plans::index_scan_plan::IndexScanPlanNode;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Point lookup through an index. Matching locations are grouped per tile
/// group and filtered by snapshot visibility, so a lookup behaves exactly
/// like a very selective scan.
pub struct IndexScanExecutor {
    context: Arc<ExecutorContext>,
    plan: IndexScanPlanNode,
    children: Vec<BoxedExecutor>,
    pending: Vec<LogicalTile>,
    output: Option<LogicalTile>,
}

impl IndexScanExecutor {
    pub fn new(context: Arc<ExecutorContext>, plan: IndexScanPlanNode) -> Self {
        Self {
            context,
            plan,
            children: Vec::new(),
            pending: Vec::new(),
            output: None,
        }
    }
}

impl AbstractExecutor for IndexScanExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        check_child_count(&self.children, 0, "IndexScanExecutor")?;
        let table = self
            .context
            .get_catalog()
            .get_table(self.plan.get_table_oid())
            .ok_or(CatalogError::TableOidNotFound(self.plan.get_table_oid()))?;
        let index = table.get_index(self.plan.get_index_name()).ok_or_else(|| {
            ExecutorError::InitializationFailure(format!(
                "index {} not found on table {}",
                self.plan.get_index_name(),
                table.get_name()
            ))
        })?;

        let txn = self.context.get_transaction();
        let txn_manager = self.context.get_transaction_manager();
        let storage = txn_manager.get_storage_manager();

        // Bucket matches by tile group, keep only visible versions.
        let mut buckets: HashMap<u64, Vec<u32>> = HashMap::new();
        for location in index.scan_key(self.plan.get_key()) {
            buckets
                .entry(location.get_block())
                .or_default()
                .push(location.get_offset());
        }

        self.pending.clear();
        for (tile_group_id, mut offsets) in buckets {
            let tile_group = match storage.get_tile_group(tile_group_id) {
                Some(tile_group) => tile_group,
                None => continue,
            };
            offsets.sort_unstable();
            let header = tile_group.get_header();
            let position_list: Vec<u32> = offsets
                .into_iter()
                .filter(|offset| txn_manager.is_visible(txn, header, *offset))
                .collect();
            if position_list.is_empty() {
                continue;
            }
            self.pending.push(LogicalTile::from_tile_group(
                tile_group,
                position_list,
                Arc::clone(self.plan.get_output_schema()),
            ));
        }
        debug!(
            "IndexScan on {} found {} tiles for key {}",
            self.plan.get_index_name(),
            self.pending.len(),
            self.plan.get_key()
        );
        Ok(())
    }

    fn execute(&mut self) -> ExecuteResult {
        if self.pending.is_empty() {
            return ExecuteResult::Exhausted;
        }
        self.output = Some(self.pending.remove(0));
        ExecuteResult::Produced
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
