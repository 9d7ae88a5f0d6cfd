use crate::catalog::schema::Schema;
use crate::common::config::{Oid, DEFAULT_TUPLES_PER_TILE_GROUP};
use crate::common::exception::CatalogError;
use crate::storage::data_table::DataTable;
use crate::storage::storage_manager::StorageManager;
use log::{debug, info};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Table registry. Narrow by design: just enough for the DDL executors and
/// for scan/mutation executors to resolve their target tables.
#[derive(Debug)]
pub struct Catalog {
    storage: Arc<StorageManager>,
    tables: RwLock<HashMap<Oid, Arc<DataTable>>>,
    table_names: RwLock<HashMap<String, Oid>>,
    next_table_oid: AtomicU64,
}

impl Catalog {
    pub fn new(storage: Arc<StorageManager>) -> Self {
        Self {
            storage,
            tables: RwLock::new(HashMap::new()),
            table_names: RwLock::new(HashMap::new()),
            next_table_oid: AtomicU64::new(1),
        }
    }

    pub fn create_table(&self, name: &str, schema: Schema) -> Result<Arc<DataTable>, CatalogError> {
        self.create_table_with_budget(name, schema, None)
    }

    /// Creates a table with a bounded tuple budget. Version inserts beyond
    /// the budget fail with a null location.
    pub fn create_table_with_budget(
        &self,
        name: &str,
        schema: Schema,
        max_tuples: Option<usize>,
    ) -> Result<Arc<DataTable>, CatalogError> {
        let mut table_names = self.table_names.write();
        if table_names.contains_key(name) {
            return Err(CatalogError::TableAlreadyExists(name.to_string()));
        }

        let table_oid = self.next_table_oid.fetch_add(1, Ordering::SeqCst);
        let table = Arc::new(DataTable::new(
            table_oid,
            name.to_string(),
            schema,
            Arc::clone(&self.storage),
            DEFAULT_TUPLES_PER_TILE_GROUP,
            max_tuples,
        ));

        table_names.insert(name.to_string(), table_oid);
        self.tables.write().insert(table_oid, Arc::clone(&table));
        info!("Created table {} (oid {})", name, table_oid);
        Ok(table)
    }

    pub fn drop_table(&self, name: &str) -> Result<(), CatalogError> {
        let mut table_names = self.table_names.write();
        let table_oid = table_names
            .remove(name)
            .ok_or_else(|| CatalogError::TableNotFound(name.to_string()))?;

        if let Some(table) = self.tables.write().remove(&table_oid) {
            for tile_group in table.get_tile_groups() {
                self.storage.drop_tile_group(tile_group.get_tile_group_id());
            }
        }
        debug!("Dropped table {} (oid {})", name, table_oid);
        Ok(())
    }

    pub fn get_table(&self, table_oid: Oid) -> Option<Arc<DataTable>> {
        self.tables.read().get(&table_oid).cloned()
    }

    pub fn get_table_by_name(&self, name: &str) -> Option<Arc<DataTable>> {
        let table_oid = *self.table_names.read().get(name)?;
        self.get_table(table_oid)
    }

    pub fn get_table_count(&self) -> usize {
        self.tables.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::column::Column;
    use crate::types_db::type_id::TypeId;

    fn test_schema() -> Schema {
        Schema::new(vec![Column::new("id", TypeId::Integer)])
    }

    #[test]
    fn test_create_and_lookup() {
        let catalog = Catalog::new(Arc::new(StorageManager::new()));
        let table = catalog.create_table("accounts", test_schema()).unwrap();
        assert_eq!(catalog.get_table(table.get_table_oid()).unwrap().get_name(), "accounts");
        assert!(catalog.get_table_by_name("accounts").is_some());
        assert_eq!(catalog.get_table_count(), 1);
    }

    #[test]
    fn test_duplicate_create_fails() {
        let catalog = Catalog::new(Arc::new(StorageManager::new()));
        catalog.create_table("accounts", test_schema()).unwrap();
        let err = catalog.create_table("accounts", test_schema()).unwrap_err();
        assert_eq!(err, CatalogError::TableAlreadyExists("accounts".to_string()));
    }

    #[test]
    fn test_drop_table() {
        let catalog = Catalog::new(Arc::new(StorageManager::new()));
        catalog.create_table("accounts", test_schema()).unwrap();
        catalog.drop_table("accounts").unwrap();
        assert!(catalog.get_table_by_name("accounts").is_none());
        assert_eq!(
            catalog.drop_table("accounts"),
            Err(CatalogError::TableNotFound("accounts".to_string()))
        );
    }
}
