use crate::common::exception::{CatalogError, ExecutorError};
use crate::concurrency::transaction::TransactionResult;
use crate::execution::executor_context::ExecutorContext;
use crate::execution::executors::abstract_executor::{
    AbstractExecutor, BoxedExecutor, ExecuteResult,
};
use crate::execution::expressions::abstract_expression::ExpressionOps;
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::insert_plan::InsertPlanNode;
use crate::storage::data_table::DataTable;
use crate::storage::tuple::Tuple;
use log::warn;
use std::sync::Arc;

/// Inserts the plan's literal rows, or the rows a child subtree produces.
/// Every inserted version is stamped as owned-uncommitted and recorded in
/// the write set; the rows become visible to others only at commit.
pub struct InsertExecutor {
    context: Arc<ExecutorContext>,
    plan: InsertPlanNode,
    children: Vec<BoxedExecutor>,
    table: Option<Arc<DataTable>>,
    done: bool,
}

impl InsertExecutor {
    pub fn new(context: Arc<ExecutorContext>, plan: InsertPlanNode) -> Self {
        Self {
            context,
            plan,
            children: Vec::new(),
            table: None,
            done: false,
        }
    }

    fn insert_tuple(&self, table: &Arc<DataTable>, tuple: Tuple) -> ExecuteResult {
        let txn = self.context.get_transaction();
        let txn_manager = self.context.get_transaction_manager();
        match table.insert_tuple(tuple) {
            Some(location) => {
                txn_manager.perform_insert(txn, location);
                self.context.increment_processed(1);
                ExecuteResult::Produced
            }
            None => {
                warn!("Insert failed, table {} is out of storage", table.get_name());
                txn_manager.set_transaction_result(txn, TransactionResult::Failure);
                ExecuteResult::Failed
            }
        }
    }

    fn insert_raw_values(&self, table: &Arc<DataTable>) -> ExecuteResult {
        let txn = self.context.get_transaction();
        let txn_manager = self.context.get_transaction_manager();
        let params = self.context.get_params();
        let empty_tuple = Tuple::new(Vec::new());

        for row in self.plan.get_rows() {
            let mut values = Vec::with_capacity(row.len());
            for expr in row {
                match expr.evaluate(&empty_tuple, params) {
                    Ok(value) => values.push(value),
                    Err(err) => {
                        warn!("Insert value evaluation failed: {}", err);
                        txn_manager.set_transaction_result(txn, TransactionResult::Failure);
                        return ExecuteResult::Failed;
                    }
                }
            }
            if self.insert_tuple(table, Tuple::new(values)) == ExecuteResult::Failed {
                return ExecuteResult::Failed;
            }
        }
        ExecuteResult::Produced
    }

    fn insert_from_tile(&self, table: &Arc<DataTable>, tile: &LogicalTile) -> ExecuteResult {
        for tuple in tile.materialize() {
            if self.insert_tuple(table, tuple) == ExecuteResult::Failed {
                return ExecuteResult::Failed;
            }
        }
        ExecuteResult::Produced
    }
}

impl AbstractExecutor for InsertExecutor {
    fn init(&mut self) -> Result<(), ExecutorError> {
        if self.plan.has_raw_values() && !self.children.is_empty() {
            return Err(ExecutorError::InitializationFailure(
                "InsertExecutor got both raw values and a child".to_string(),
            ));
        }
        let table = self
            .context
            .get_catalog()
            .get_table(self.plan.get_table_oid())
            .ok_or(CatalogError::TableOidNotFound(self.plan.get_table_oid()))?;
        self.table = Some(table);
        match self.children.first_mut() {
            Some(child) => child.init(),
            None => Ok(()),
        }
    }

    fn execute(&mut self) -> ExecuteResult {
        if self.done {
            return ExecuteResult::Exhausted;
        }
        let table = match &self.table {
            Some(table) => Arc::clone(table),
            None => return ExecuteResult::Failed,
        };

        if self.children.is_empty() {
            // All literal rows go in as one batch.
            self.done = true;
            return self.insert_raw_values(&table);
        }

        match self.children[0].execute() {
            ExecuteResult::Produced => match self.children[0].get_output() {
                Some(tile) => self.insert_from_tile(&table, &tile),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog::Catalog;
    use crate::catalog::column::Column;
    use crate::catalog::schema::Schema;
    use crate::concurrency::transaction_manager::TransactionManager;
    use crate::execution::expressions::abstract_expression::Expression;
    use crate::execution::expressions::constant_value_expression::ConstantExpression;
    use crate::storage::storage_manager::StorageManager;
    use crate::types_db::type_id::TypeId;
    use crate::types_db::value::Value;

    #[test]
    fn test_insert_raw_values_counts_rows() {
        let storage = Arc::new(StorageManager::new());
        let catalog = Arc::new(Catalog::new(Arc::clone(&storage)));
        let txn_manager = Arc::new(TransactionManager::new(storage));
        let table = catalog
            .create_table(
                "accounts",
                Schema::new(vec![Column::new("id", TypeId::Integer)]),
            )
            .unwrap();

        let txn = txn_manager.begin_transaction();
        let context = Arc::new(ExecutorContext::new(
            Arc::clone(&txn),
            Arc::clone(&txn_manager),
            Arc::clone(&catalog),
            Vec::new(),
        ));
        let rows: Vec<Vec<Arc<Expression>>> = vec![
            vec![Arc::new(ConstantExpression::new(Value::Integer(1)).into())],
            vec![Arc::new(ConstantExpression::new(Value::Integer(2)).into())],
        ];
        let plan = InsertPlanNode::new_raw_values(
            Arc::clone(table.get_schema()),
            table.get_table_oid(),
            rows,
        );

        let mut executor = InsertExecutor::new(Arc::clone(&context), plan);
        executor.init().unwrap();
        assert_eq!(executor.execute(), ExecuteResult::Produced);
        assert_eq!(executor.execute(), ExecuteResult::Exhausted);
        assert_eq!(context.get_num_processed(), 2);
        assert_eq!(table.get_number_of_tuples(), 2);
    }
}
