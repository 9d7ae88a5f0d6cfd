use crate::catalog::catalog::Catalog;
use crate::concurrency::transaction::Transaction;
use crate::concurrency::transaction_manager::TransactionManager;
use crate::types_db::value::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared state handed to every executor in one tree: the transaction the
/// statement runs under, the parameter values bound to the plan, and the
/// running count of rows mutated by DML operators.
#[derive(Debug)]
pub struct ExecutorContext {
    transaction: Arc<Transaction>,
    transaction_manager: Arc<TransactionManager>,
    catalog: Arc<Catalog>,
    params: Vec<Value>,
    num_processed: AtomicU64,
}

impl ExecutorContext {
    pub fn new(
        transaction: Arc<Transaction>,
        transaction_manager: Arc<TransactionManager>,
        catalog: Arc<Catalog>,
        params: Vec<Value>,
    ) -> Self {
        Self {
            transaction,
            transaction_manager,
            catalog,
            params,
            num_processed: AtomicU64::new(0),
        }
    }

    pub fn get_transaction(&self) -> &Arc<Transaction> {
        &self.transaction
    }

    pub fn get_transaction_manager(&self) -> &Arc<TransactionManager> {
        &self.transaction_manager
    }

    pub fn get_catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn get_params(&self) -> &[Value] {
        &self.params
    }

    pub fn increment_processed(&self, count: u64) {
        self.num_processed.fetch_add(count, Ordering::SeqCst);
    }

    pub fn get_num_processed(&self) -> u64 {
        self.num_processed.load(Ordering::SeqCst)
    }
}
