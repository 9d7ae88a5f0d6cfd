use crate::catalog::catalog::Catalog;
use crate::concurrency::transaction::{Transaction, TransactionResult};
use crate::concurrency::transaction_manager::TransactionManager;
use crate::execution::executor_context::ExecutorContext;
use crate::execution::executor_factory::build_executor_tree;
use crate::execution::executors::abstract_executor::ExecuteResult;
use crate::execution::logical_tile::LogicalTile;
use crate::execution::plans::abstract_plan::{AbstractPlanNode, PlanNode};
use crate::types_db::value::Value;
use log::{error, info};
use std::sync::Arc;

/// Outcome of running one plan: rows touched by DML operators plus the
/// final transaction result.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExecutionStatus {
    pub processed: u64,
    pub result: TransactionResult,
}

/// Drives a plan to completion: builds the executor tree, initializes it,
/// pulls the root until it stops producing, and settles the transaction.
///
/// The transaction is explicit. Passing `None` runs the plan as its own
/// single-statement transaction that commits on Success and aborts on
/// anything else. Passing `Some` leaves commit/abort to the caller, with
/// one exception: a tree that never initialized settles the transaction
/// right away, since the caller has nothing meaningful to continue with.
/// Teardown needs no special path, dropping the tree releases every
/// executor whatever the outcome.
#[derive(Debug)]
pub struct PlanExecutor {
    transaction_manager: Arc<TransactionManager>,
    catalog: Arc<Catalog>,
}

impl PlanExecutor {
    pub fn new(transaction_manager: Arc<TransactionManager>, catalog: Arc<Catalog>) -> Self {
        Self {
            transaction_manager,
            catalog,
        }
    }

    pub fn get_transaction_manager(&self) -> &Arc<TransactionManager> {
        &self.transaction_manager
    }

    pub fn get_catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn execute_plan(
        &self,
        plan: Option<&PlanNode>,
        params: Vec<Value>,
        txn: Option<Arc<Transaction>>,
    ) -> ExecutionStatus {
        self.run(plan, params, txn, None)
    }

    /// Like `execute_plan`, but collects every non-empty output tile into
    /// `output`.
    pub fn execute_plan_with_output(
        &self,
        plan: Option<&PlanNode>,
        params: Vec<Value>,
        txn: Option<Arc<Transaction>>,
        output: &mut Vec<LogicalTile>,
    ) -> ExecutionStatus {
        self.run(plan, params, txn, Some(output))
    }

    fn run(
        &self,
        plan: Option<&PlanNode>,
        params: Vec<Value>,
        txn: Option<Arc<Transaction>>,
        mut output: Option<&mut Vec<LogicalTile>>,
    ) -> ExecutionStatus {
        let plan = match plan {
            Some(plan) => plan,
            None => return ExecutionStatus::default(),
        };

        let single_statement_txn = txn.is_none();
        let txn = txn.unwrap_or_else(|| self.transaction_manager.begin_transaction());
        let context = Arc::new(ExecutorContext::new(
            Arc::clone(&txn),
            Arc::clone(&self.transaction_manager),
            Arc::clone(&self.catalog),
            params,
        ));

        let mut init_failure = false;
        {
            // Tree lifetime is this block; drop is the teardown.
            match build_executor_tree(Some(plan), &context) {
                Ok(Some(mut root)) => match root.init() {
                    Ok(()) => loop {
                        match root.execute() {
                            ExecuteResult::Produced => {
                                if let Some(tile) = root.get_output() {
                                    if !tile.is_empty() {
                                        if let Some(collect) = output.as_mut() {
                                            collect.push(tile);
                                        }
                                    }
                                }
                            }
                            ExecuteResult::Exhausted | ExecuteResult::Failed => break,
                        }
                    },
                    Err(err) => {
                        error!("Executor tree initialization failed: {}", err);
                        init_failure = true;
                        self.transaction_manager
                            .set_transaction_result(&txn, TransactionResult::Failure);
                    }
                },
                Ok(None) => {}
                Err(err) => {
                    error!("Executor tree construction failed: {}", err);
                    init_failure = true;
                    self.transaction_manager
                        .set_transaction_result(&txn, TransactionResult::Failure);
                }
            }
        }

        // A drive loop that finished with nothing going wrong is a success,
        // even if no operator ever touched the transaction result.
        if txn.get_result() == TransactionResult::Undetermined {
            self.transaction_manager
                .set_transaction_result(&txn, TransactionResult::Success);
        }

        let mut result = txn.get_result();
        if single_statement_txn || init_failure {
            result = if result == TransactionResult::Success {
                self.transaction_manager.commit_transaction(&txn)
            } else {
                self.transaction_manager.abort_transaction(&txn)
            };
        }

        ExecutionStatus {
            processed: context.get_num_processed(),
            result,
        }
    }
}

/// Logs a plan tree, one node per line, children indented under parents.
pub fn print_plan(plan: &PlanNode, depth: usize) {
    info!("{}{}", "  ".repeat(depth), plan);
    for child in plan.get_children() {
        print_plan(child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_plan_yields_default_status() {
        let storage = Arc::new(crate::storage::storage_manager::StorageManager::new());
        let txn_manager = Arc::new(TransactionManager::new(Arc::clone(&storage)));
        let catalog = Arc::new(Catalog::new(storage));
        let executor = PlanExecutor::new(txn_manager, catalog);

        let status = executor.execute_plan(None, Vec::new(), None);
        assert_eq!(status, ExecutionStatus::default());
        assert_eq!(status.result, TransactionResult::Undetermined);
        assert_eq!(status.processed, 0);
    }
}
