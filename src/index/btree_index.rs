use crate::common::config::Oid;
use crate::common::item_pointer::ItemPointer;
use crate::types_db::value::Value;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Ordered single-column index mapping key values to the physical locations
/// that carry them. Entries point at tuple versions; visibility filtering is
/// the reader's job.
#[derive(Debug)]
pub struct BTreeIndex {
    name: String,
    table_oid: Oid,
    key_column: usize,
    entries: RwLock<BTreeMap<Value, Vec<ItemPointer>>>,
}

impl BTreeIndex {
    pub fn new(name: String, table_oid: Oid, key_column: usize) -> Self {
        Self {
            name,
            table_oid,
            key_column,
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_table_oid(&self) -> Oid {
        self.table_oid
    }

    pub fn get_key_column(&self) -> usize {
        self.key_column
    }

    pub fn insert_entry(&self, key: Value, location: ItemPointer) {
        self.entries.write().entry(key).or_default().push(location);
    }

    pub fn scan_key(&self, key: &Value) -> Vec<ItemPointer> {
        self.entries.read().get(key).cloned().unwrap_or_default()
    }

    pub fn scan_all_keys(&self) -> Vec<ItemPointer> {
        self.entries.read().values().flatten().copied().collect()
    }

    pub fn get_entry_count(&self) -> usize {
        self.entries.read().values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_scan() {
        let index = BTreeIndex::new("idx".to_string(), 1, 0);
        index.insert_entry(Value::Integer(5), ItemPointer::new(1, 0));
        index.insert_entry(Value::Integer(5), ItemPointer::new(1, 3));
        index.insert_entry(Value::Integer(7), ItemPointer::new(2, 1));

        assert_eq!(index.scan_key(&Value::Integer(5)).len(), 2);
        assert_eq!(index.scan_key(&Value::Integer(6)).len(), 0);
        assert_eq!(index.get_entry_count(), 3);
        assert_eq!(index.scan_all_keys().len(), 3);
    }
}
