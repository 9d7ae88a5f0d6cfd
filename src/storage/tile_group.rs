use crate::catalog::schema::Schema;
use crate::common::config::{Cid, Oid, TxnId, INITIAL_TXN_ID, MAX_CID};
use crate::common::item_pointer::ItemPointer;
use crate::storage::tuple::Tuple;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// Per-slot concurrency metadata for one tile group.
///
/// Every transaction that touches a logical row contends on these fields, so
/// mutation is restricted to atomic transitions: ownership is a single
/// compare-and-swap on the owner word, and a failed swap is a conflict
/// signal, never a wait.
#[derive(Debug)]
pub struct TileGroupHeader {
    tile_group_id: Oid,
    owners: Vec<AtomicU64>,
    begin_cids: Vec<AtomicU64>,
    end_cids: Vec<AtomicU64>,
    /// Version chain links: `next[i]` points at the version that supersedes
    /// slot `i`, if any.
    next_pointers: Vec<RwLock<Option<ItemPointer>>>,
}

impl TileGroupHeader {
    fn new(tile_group_id: Oid, capacity: usize) -> Self {
        Self {
            tile_group_id,
            owners: (0..capacity).map(|_| AtomicU64::new(INITIAL_TXN_ID)).collect(),
            begin_cids: (0..capacity).map(|_| AtomicU64::new(MAX_CID)).collect(),
            end_cids: (0..capacity).map(|_| AtomicU64::new(MAX_CID)).collect(),
            next_pointers: (0..capacity).map(|_| RwLock::new(None)).collect(),
        }
    }

    pub fn get_tile_group_id(&self) -> Oid {
        self.tile_group_id
    }

    pub fn get_owner(&self, offset: u32) -> TxnId {
        self.owners[offset as usize].load(Ordering::SeqCst)
    }

    pub fn set_owner(&self, offset: u32, txn_id: TxnId) {
        self.owners[offset as usize].store(txn_id, Ordering::SeqCst);
    }

    /// Atomically acquires ownership of an unowned slot. Returns false if a
    /// concurrent transaction won the race.
    pub fn try_acquire_owner(&self, offset: u32, txn_id: TxnId) -> bool {
        self.owners[offset as usize]
            .compare_exchange(INITIAL_TXN_ID, txn_id, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn release_owner(&self, offset: u32) {
        self.owners[offset as usize].store(INITIAL_TXN_ID, Ordering::SeqCst);
    }

    pub fn get_begin_cid(&self, offset: u32) -> Cid {
        self.begin_cids[offset as usize].load(Ordering::SeqCst)
    }

    pub fn set_begin_cid(&self, offset: u32, cid: Cid) {
        self.begin_cids[offset as usize].store(cid, Ordering::SeqCst);
    }

    pub fn get_end_cid(&self, offset: u32) -> Cid {
        self.end_cids[offset as usize].load(Ordering::SeqCst)
    }

    pub fn set_end_cid(&self, offset: u32, cid: Cid) {
        self.end_cids[offset as usize].store(cid, Ordering::SeqCst);
    }

    pub fn get_next(&self, offset: u32) -> Option<ItemPointer> {
        *self.next_pointers[offset as usize].read()
    }

    pub fn set_next(&self, offset: u32, next: Option<ItemPointer>) {
        *self.next_pointers[offset as usize].write() = next;
    }
}

/// A fixed-capacity run of tuple slots plus their concurrency metadata.
#[derive(Debug)]
pub struct TileGroup {
    tile_group_id: Oid,
    schema: Arc<Schema>,
    header: TileGroupHeader,
    slots: Vec<RwLock<Option<Tuple>>>,
    next_slot: AtomicUsize,
}

impl TileGroup {
    pub fn new(tile_group_id: Oid, schema: Arc<Schema>, capacity: usize) -> Self {
        Self {
            tile_group_id,
            schema,
            header: TileGroupHeader::new(tile_group_id, capacity),
            slots: (0..capacity).map(|_| RwLock::new(None)).collect(),
            next_slot: AtomicUsize::new(0),
        }
    }

    pub fn get_tile_group_id(&self) -> Oid {
        self.tile_group_id
    }

    pub fn get_schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn get_header(&self) -> &TileGroupHeader {
        &self.header
    }

    pub fn get_capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots handed out so far.
    pub fn get_active_tuple_count(&self) -> usize {
        self.next_slot.load(Ordering::SeqCst).min(self.slots.len())
    }

    /// Claims the next free slot and stores the tuple there. Returns None
    /// when the tile group is full; the slot counter is intentionally not
    /// rolled back, a full group stays full.
    pub fn insert_tuple(&self, tuple: Tuple) -> Option<u32> {
        let offset = self.next_slot.fetch_add(1, Ordering::SeqCst);
        if offset >= self.slots.len() {
            return None;
        }
        *self.slots[offset].write() = Some(tuple);
        Some(offset as u32)
    }

    pub fn get_tuple(&self, offset: u32) -> Option<Tuple> {
        self.slots.get(offset as usize)?.read().clone()
    }

    /// Overwrites the tuple at an occupied slot in place. Only valid for a
    /// version owned by the calling transaction.
    pub fn copy_tuple(&self, tuple: &Tuple, offset: u32) {
        *self.slots[offset as usize].write() = Some(tuple.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::column::Column;
    use crate::common::config::TXN_START_ID;
    use crate::types_db::type_id::TypeId;
    use crate::types_db::value::Value;

    fn test_tile_group(capacity: usize) -> TileGroup {
        let schema = Arc::new(Schema::new(vec![Column::new("id", TypeId::Integer)]));
        TileGroup::new(1, schema, capacity)
    }

    #[test]
    fn test_insert_until_full() {
        let tile_group = test_tile_group(2);
        assert_eq!(tile_group.insert_tuple(Tuple::new(vec![Value::Integer(1)])), Some(0));
        assert_eq!(tile_group.insert_tuple(Tuple::new(vec![Value::Integer(2)])), Some(1));
        assert_eq!(tile_group.insert_tuple(Tuple::new(vec![Value::Integer(3)])), None);
        assert_eq!(tile_group.get_active_tuple_count(), 2);
    }

    #[test]
    fn test_ownership_cas() {
        let tile_group = test_tile_group(1);
        tile_group.insert_tuple(Tuple::new(vec![Value::Integer(1)]));
        let header = tile_group.get_header();

        let txn_a = TXN_START_ID;
        let txn_b = TXN_START_ID + 1;
        assert!(header.try_acquire_owner(0, txn_a));
        // Second acquisition must lose the race, not block.
        assert!(!header.try_acquire_owner(0, txn_b));
        assert_eq!(header.get_owner(0), txn_a);

        header.release_owner(0);
        assert!(header.try_acquire_owner(0, txn_b));
    }

    #[test]
    fn test_copy_tuple_in_place() {
        let tile_group = test_tile_group(1);
        tile_group.insert_tuple(Tuple::new(vec![Value::Integer(1)]));
        tile_group.copy_tuple(&Tuple::new(vec![Value::Integer(9)]), 0);
        assert_eq!(
            tile_group.get_tuple(0).unwrap().get_value(0),
            Some(&Value::Integer(9))
        );
    }
}
