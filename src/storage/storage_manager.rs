use crate::common::config::Oid;
use crate::storage::tile_group::TileGroup;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-wide tile group directory. Tables register every tile group they
/// allocate here so that the transaction manager can resolve an ItemPointer
/// back to physical storage during commit and abort.
#[derive(Debug, Default)]
pub struct StorageManager {
    tile_groups: RwLock<HashMap<Oid, Arc<TileGroup>>>,
    next_tile_group_id: AtomicU64,
}

impl StorageManager {
    pub fn new() -> Self {
        Self {
            tile_groups: RwLock::new(HashMap::new()),
            next_tile_group_id: AtomicU64::new(1),
        }
    }

    pub fn get_next_tile_group_id(&self) -> Oid {
        self.next_tile_group_id.fetch_add(1, Ordering::SeqCst)
    }

    pub fn register_tile_group(&self, tile_group: Arc<TileGroup>) {
        self.tile_groups
            .write()
            .insert(tile_group.get_tile_group_id(), tile_group);
    }

    pub fn get_tile_group(&self, tile_group_id: Oid) -> Option<Arc<TileGroup>> {
        self.tile_groups.read().get(&tile_group_id).cloned()
    }

    pub fn drop_tile_group(&self, tile_group_id: Oid) {
        self.tile_groups.write().remove(&tile_group_id);
    }
}
