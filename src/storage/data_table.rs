use crate::catalog::schema::Schema;
use crate::common::config::Oid;
use crate::common::item_pointer::ItemPointer;
use crate::index::btree_index::BTreeIndex;
use crate::storage::storage_manager::StorageManager;
use crate::storage::tile_group::TileGroup;
use crate::storage::tuple::Tuple;
use log::debug;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A table: an ordered list of tile groups plus the indexes built over it.
///
/// Version inserts return None when the configured tuple budget is used up;
/// callers treat that exactly like a lost ownership race.
#[derive(Debug)]
pub struct DataTable {
    table_oid: Oid,
    name: String,
    schema: Arc<Schema>,
    storage: Arc<StorageManager>,
    tile_groups: RwLock<Vec<Arc<TileGroup>>>,
    tuples_per_tile_group: usize,
    max_tuples: Option<usize>,
    number_of_tuples: AtomicUsize,
    indexes: RwLock<Vec<Arc<BTreeIndex>>>,
}

impl DataTable {
    pub fn new(
        table_oid: Oid,
        name: String,
        schema: Schema,
        storage: Arc<StorageManager>,
        tuples_per_tile_group: usize,
        max_tuples: Option<usize>,
    ) -> Self {
        let table = Self {
            table_oid,
            name,
            schema: Arc::new(schema),
            storage,
            tile_groups: RwLock::new(Vec::new()),
            tuples_per_tile_group,
            max_tuples,
            number_of_tuples: AtomicUsize::new(0),
            indexes: RwLock::new(Vec::new()),
        };
        table.add_tile_group();
        table
    }

    pub fn get_table_oid(&self) -> Oid {
        self.table_oid
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn get_number_of_tuples(&self) -> usize {
        self.number_of_tuples.load(Ordering::SeqCst)
    }

    pub fn get_tile_groups(&self) -> Vec<Arc<TileGroup>> {
        self.tile_groups.read().clone()
    }

    pub fn get_tile_group_count(&self) -> usize {
        self.tile_groups.read().len()
    }

    fn add_tile_group(&self) -> Arc<TileGroup> {
        let tile_group_id = self.storage.get_next_tile_group_id();
        let tile_group = Arc::new(TileGroup::new(
            tile_group_id,
            Arc::clone(&self.schema),
            self.tuples_per_tile_group,
        ));
        self.storage.register_tile_group(Arc::clone(&tile_group));
        self.tile_groups.write().push(Arc::clone(&tile_group));
        debug!(
            "Table {} added tile group {}",
            self.name, tile_group_id
        );
        tile_group
    }

    /// Appends a tuple version to the table, returning its location or None
    /// on storage exhaustion. Concurrency metadata is stamped by the
    /// transaction manager, not here.
    pub fn insert_version(&self, tuple: Tuple) -> Option<ItemPointer> {
        if let Some(max) = self.max_tuples {
            if self.number_of_tuples.load(Ordering::SeqCst) >= max {
                debug!("Table {} exhausted its tuple budget of {}", self.name, max);
                return None;
            }
        }

        loop {
            let last = {
                let tile_groups = self.tile_groups.read();
                Arc::clone(tile_groups.last()?)
            };
            if let Some(offset) = last.insert_tuple(tuple.clone()) {
                self.number_of_tuples.fetch_add(1, Ordering::SeqCst);
                let location = ItemPointer::new(last.get_tile_group_id(), offset);
                self.insert_in_indexes(&tuple, location);
                return Some(location);
            }
            // Current tile group is full; extend the table, but only if no
            // other thread already did.
            let mut tile_groups = self.tile_groups.write();
            if tile_groups
                .last()
                .map(|tg| tg.get_tile_group_id() == last.get_tile_group_id())
                .unwrap_or(false)
            {
                drop(tile_groups);
                self.add_tile_group();
            }
        }
    }

    /// Alias used by the insert path; identical mechanics to a version
    /// append for an update.
    pub fn insert_tuple(&self, tuple: Tuple) -> Option<ItemPointer> {
        self.insert_version(tuple)
    }

    fn insert_in_indexes(&self, tuple: &Tuple, location: ItemPointer) {
        for index in self.indexes.read().iter() {
            if let Some(key) = tuple.get_value(index.get_key_column()) {
                index.insert_entry(key.clone(), location);
            }
        }
    }

    /// Publishes a fully built index. Readers either see the index in the
    /// list or they don't; there is no partially visible state.
    pub fn add_index(&self, index: Arc<BTreeIndex>) {
        self.indexes.write().push(index);
    }

    pub fn get_indexes(&self) -> Vec<Arc<BTreeIndex>> {
        self.indexes.read().clone()
    }

    pub fn get_index(&self, name: &str) -> Option<Arc<BTreeIndex>> {
        self.indexes.read().iter().find(|i| i.get_name() == name).cloned()
    }

    pub fn get_index_count(&self) -> usize {
        self.indexes.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::column::Column;
    use crate::types_db::type_id::TypeId;
    use crate::types_db::value::Value;

    fn small_table(max_tuples: Option<usize>) -> DataTable {
        let storage = Arc::new(StorageManager::new());
        DataTable::new(
            1,
            "test_table".to_string(),
            Schema::new(vec![Column::new("id", TypeId::Integer)]),
            storage,
            2, // two tuples per tile group, to exercise growth
            max_tuples,
        )
    }

    #[test]
    fn test_insert_grows_tile_groups() {
        let table = small_table(None);
        for i in 0..5 {
            let location = table.insert_tuple(Tuple::new(vec![Value::Integer(i)]));
            assert!(location.is_some());
        }
        assert_eq!(table.get_number_of_tuples(), 5);
        assert!(table.get_tile_group_count() >= 3);
    }

    #[test]
    fn test_insert_version_respects_budget() {
        let table = small_table(Some(2));
        assert!(table.insert_version(Tuple::new(vec![Value::Integer(1)])).is_some());
        assert!(table.insert_version(Tuple::new(vec![Value::Integer(2)])).is_some());
        assert!(table.insert_version(Tuple::new(vec![Value::Integer(3)])).is_none());
    }
}
