use crate::common::config::MAX_CID;
use crate::index::btree_index::BTreeIndex;
use crate::storage::data_table::DataTable;
use log::{debug, info};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const DEFAULT_SLEEP_DURATION: Duration = Duration::from_millis(100);
const DEFAULT_TUPLE_COUNT_THRESHOLD: usize = 16;

/// Background advisor that watches registered tables and builds a b-tree
/// index over the first column of any table that grows past a threshold and
/// has no index yet.
///
/// The built index is published through the table's index list in one step,
/// so queries either use it fully or not at all. `tune` is public so tests
/// can run one pass deterministically without the thread.
pub struct IndexTuner {
    tables: Arc<Mutex<Vec<Arc<DataTable>>>>,
    tuning_stop: Arc<AtomicBool>,
    tuner_thread: Option<thread::JoinHandle<()>>,
    sleep_duration: Duration,
    tuple_count_threshold: usize,
}

impl IndexTuner {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(Vec::new())),
            tuning_stop: Arc::new(AtomicBool::new(false)),
            tuner_thread: None,
            sleep_duration: DEFAULT_SLEEP_DURATION,
            tuple_count_threshold: DEFAULT_TUPLE_COUNT_THRESHOLD,
        }
    }

    pub fn with_threshold(tuple_count_threshold: usize) -> Self {
        let mut tuner = Self::new();
        tuner.tuple_count_threshold = tuple_count_threshold;
        tuner
    }

    pub fn add_table(&self, table: Arc<DataTable>) {
        self.tables.lock().push(table);
    }

    pub fn clear_tables(&self) {
        self.tables.lock().clear();
    }

    pub fn get_table_count(&self) -> usize {
        self.tables.lock().len()
    }

    /// One tuning pass over every registered table.
    pub fn tune(&self) {
        let tables = self.tables.lock().clone();
        for table in tables {
            Self::index_tune_helper(&table, self.tuple_count_threshold);
        }
    }

    fn index_tune_helper(table: &Arc<DataTable>, threshold: usize) {
        if table.get_index_count() > 0 {
            return;
        }
        if table.get_number_of_tuples() < threshold {
            debug!(
                "Table {} below tuning threshold ({} tuples)",
                table.get_name(),
                table.get_number_of_tuples()
            );
            return;
        }

        let index_name = format!("{}_tuned_idx", table.get_name());
        let index = Arc::new(BTreeIndex::new(index_name, table.get_table_oid(), 0));

        // Index only committed versions; uncommitted or superseded versions
        // are filtered by their commit-id stamps.
        for tile_group in table.get_tile_groups() {
            let header = tile_group.get_header();
            for offset in 0..tile_group.get_active_tuple_count() as u32 {
                let begin_cid = header.get_begin_cid(offset);
                let end_cid = header.get_end_cid(offset);
                if begin_cid == MAX_CID || end_cid != MAX_CID {
                    continue;
                }
                if let Some(tuple) = tile_group.get_tuple(offset) {
                    if let Some(key) = tuple.get_value(0) {
                        index.insert_entry(
                            key.clone(),
                            crate::common::item_pointer::ItemPointer::new(
                                tile_group.get_tile_group_id(),
                                offset,
                            ),
                        );
                    }
                }
            }
        }

        info!(
            "Tuned index {} on table {} with {} entries",
            index.get_name(),
            table.get_name(),
            index.get_entry_count()
        );
        table.add_index(index);
    }

    pub fn start(&mut self) {
        if self.tuner_thread.is_some() {
            return;
        }
        self.tuning_stop.store(false, Ordering::SeqCst);

        let tables = Arc::clone(&self.tables);
        let stop = Arc::clone(&self.tuning_stop);
        let sleep_duration = self.sleep_duration;
        let threshold = self.tuple_count_threshold;

        self.tuner_thread = Some(thread::spawn(move || {
            info!("Index tuner thread started");
            while !stop.load(Ordering::SeqCst) {
                let snapshot = tables.lock().clone();
                for table in snapshot {
                    Self::index_tune_helper(&table, threshold);
                }
                thread::sleep(sleep_duration);
            }
            info!("Index tuner thread stopped");
        }));
    }

    pub fn stop(&mut self) {
        self.tuning_stop.store(true, Ordering::SeqCst);
        if let Some(handle) = self.tuner_thread.take() {
            let _ = handle.join();
        }
    }

    pub fn is_running(&self) -> bool {
        self.tuner_thread.is_some()
    }
}

impl Default for IndexTuner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for IndexTuner {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog::Catalog;
    use crate::catalog::column::Column;
    use crate::catalog::schema::Schema;
    use crate::concurrency::transaction_manager::TransactionManager;
    use crate::storage::storage_manager::StorageManager;
    use crate::storage::tuple::Tuple;
    use crate::types_db::type_id::TypeId;
    use crate::types_db::value::Value;

    fn seeded_table(rows: i32) -> (Arc<DataTable>, Arc<TransactionManager>) {
        let storage = Arc::new(StorageManager::new());
        let catalog = Catalog::new(Arc::clone(&storage));
        let txn_manager = Arc::new(TransactionManager::new(storage));
        let table = catalog
            .create_table(
                "orders",
                Schema::new(vec![
                    Column::new("id", TypeId::Integer),
                    Column::new("total", TypeId::Integer),
                ]),
            )
            .unwrap();

        let txn = txn_manager.begin_transaction();
        for i in 0..rows {
            let location = table
                .insert_tuple(Tuple::new(vec![Value::Integer(i), Value::Integer(i * 2)]))
                .unwrap();
            txn_manager.perform_insert(&txn, location);
        }
        txn_manager.commit_transaction(&txn);
        (table, txn_manager)
    }

    #[test]
    fn test_tune_builds_index_over_threshold() {
        let (table, _txn_manager) = seeded_table(8);
        let tuner = IndexTuner::with_threshold(4);
        tuner.add_table(Arc::clone(&table));

        tuner.tune();
        assert_eq!(table.get_index_count(), 1);
        let index = table.get_index("orders_tuned_idx").unwrap();
        assert_eq!(index.get_entry_count(), 8);
        assert_eq!(index.scan_key(&Value::Integer(3)).len(), 1);

        // A second pass must not build a duplicate.
        tuner.tune();
        assert_eq!(table.get_index_count(), 1);
    }

    #[test]
    fn test_with_threshold_overrides_only_the_threshold() {
        let tuner = IndexTuner::with_threshold(4);
        assert_eq!(tuner.tuple_count_threshold, 4);
        assert_eq!(tuner.sleep_duration, DEFAULT_SLEEP_DURATION);
        assert_eq!(tuner.get_table_count(), 0);
        assert!(!tuner.is_running());
    }

    #[test]
    fn test_tune_skips_small_tables() {
        let (table, _txn_manager) = seeded_table(2);
        let tuner = IndexTuner::with_threshold(4);
        tuner.add_table(Arc::clone(&table));
        tuner.tune();
        assert_eq!(table.get_index_count(), 0);
    }

    #[test]
    fn test_background_thread_stops_cleanly() {
        let (table, _txn_manager) = seeded_table(8);
        let mut tuner = IndexTuner::with_threshold(4);
        tuner.add_table(table);
        tuner.start();
        assert!(tuner.is_running());
        tuner.stop();
        assert!(!tuner.is_running());
    }
}
