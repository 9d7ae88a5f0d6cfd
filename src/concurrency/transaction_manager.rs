use crate::common::config::{INITIAL_TXN_ID, INVALID_CID, MAX_CID, START_CID, TXN_START_ID};
use crate::common::item_pointer::ItemPointer;
use crate::concurrency::transaction::{Transaction, TransactionResult, WriteRecord};
use crate::storage::storage_manager::StorageManager;
use crate::storage::tile_group::TileGroupHeader;
use log::{debug, warn};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Optimistic, first-acquirer-wins MVCC transaction manager.
///
/// Conflict detection is a failed compare-and-swap on a slot's owner word.
/// There is no wait or retry anywhere: a transaction that loses a race marks
/// itself failed and the orchestrator aborts it. The abort path is the
/// single authoritative place that releases every ownership bit a failed
/// transaction acquired, whether or not the corresponding write made it into
/// the write set.
#[derive(Debug)]
pub struct TransactionManager {
    next_txn_id: AtomicU64,
    next_cid: AtomicU64,
    storage: Arc<StorageManager>,
}

impl TransactionManager {
    pub fn new(storage: Arc<StorageManager>) -> Self {
        Self {
            next_txn_id: AtomicU64::new(TXN_START_ID),
            next_cid: AtomicU64::new(START_CID),
            storage,
        }
    }

    pub fn get_storage_manager(&self) -> &Arc<StorageManager> {
        &self.storage
    }

    pub fn begin_transaction(&self) -> Arc<Transaction> {
        let txn_id = self.next_txn_id.fetch_add(1, Ordering::SeqCst);
        let begin_cid = self.next_cid.fetch_add(1, Ordering::SeqCst);
        debug!("Begin transaction {} at snapshot {}", txn_id, begin_cid);
        Arc::new(Transaction::new(txn_id, begin_cid))
    }

    /// True if the executing transaction already owns this tuple version.
    pub fn is_owner(&self, txn: &Transaction, header: &TileGroupHeader, offset: u32) -> bool {
        header.get_owner(offset) == txn.get_transaction_id()
    }

    /// True if the version is the latest of its row, unowned, and visible
    /// under the transaction's snapshot, i.e. eligible for acquisition.
    pub fn is_ownable(&self, txn: &Transaction, header: &TileGroupHeader, offset: u32) -> bool {
        let begin_cid = header.get_begin_cid(offset);
        header.get_owner(offset) == INITIAL_TXN_ID
            && header.get_end_cid(offset) == MAX_CID
            && begin_cid != MAX_CID
            && begin_cid <= txn.get_begin_cid()
    }

    /// Attempts the atomic ownership transition. A false return is a lost
    /// race against a concurrent transaction.
    pub fn acquire_ownership(
        &self,
        txn: &Transaction,
        header: &TileGroupHeader,
        offset: u32,
    ) -> bool {
        if header.try_acquire_owner(offset, txn.get_transaction_id()) {
            txn.record_ownership(ItemPointer::new(header.get_tile_group_id(), offset));
            true
        } else {
            debug!(
                "Transaction {} lost ownership race at {}:{}",
                txn.get_transaction_id(),
                header.get_tile_group_id(),
                offset
            );
            false
        }
    }

    /// Snapshot visibility of one tuple version.
    pub fn is_visible(&self, txn: &Transaction, header: &TileGroupHeader, offset: u32) -> bool {
        let owner = header.get_owner(offset);
        let begin_cid = header.get_begin_cid(offset);
        let end_cid = header.get_end_cid(offset);

        if owner == txn.get_transaction_id() {
            // Own writes are visible unless this transaction superseded or
            // deleted the version (pending-expiration marker).
            end_cid != INVALID_CID && (begin_cid == MAX_CID || begin_cid <= txn.get_begin_cid())
        } else {
            begin_cid != MAX_CID && begin_cid <= txn.get_begin_cid() && txn.get_begin_cid() < end_cid
        }
    }

    /// Records an update in the write set. With a new location, links the
    /// version chain and stamps the new version's metadata; the old version
    /// gets the pending-expiration marker so the updating transaction stops
    /// seeing it. With `None`, the overwrite happened in place on a version
    /// this transaction already owns and no new version exists.
    pub fn perform_update(
        &self,
        txn: &Transaction,
        old_location: ItemPointer,
        new_location: Option<ItemPointer>,
    ) {
        match new_location {
            None => {
                txn.record_write(WriteRecord::Update {
                    old: old_location,
                    new: old_location,
                });
            }
            Some(new_location) => {
                if let Some(old_tile_group) = self.storage.get_tile_group(old_location.get_block())
                {
                    let old_header = old_tile_group.get_header();
                    old_header.set_end_cid(old_location.get_offset(), INVALID_CID);
                    old_header.set_next(old_location.get_offset(), Some(new_location));
                }
                if let Some(new_tile_group) = self.storage.get_tile_group(new_location.get_block())
                {
                    let new_header = new_tile_group.get_header();
                    new_header.set_owner(new_location.get_offset(), txn.get_transaction_id());
                    new_header.set_begin_cid(new_location.get_offset(), MAX_CID);
                    new_header.set_end_cid(new_location.get_offset(), MAX_CID);
                }
                txn.record_write(WriteRecord::Update {
                    old: old_location,
                    new: new_location,
                });
            }
        }
    }

    /// Stamps a freshly inserted tuple as uncommitted and owned by `txn`.
    pub fn perform_insert(&self, txn: &Transaction, location: ItemPointer) {
        if let Some(tile_group) = self.storage.get_tile_group(location.get_block()) {
            let header = tile_group.get_header();
            header.set_owner(location.get_offset(), txn.get_transaction_id());
            header.set_begin_cid(location.get_offset(), MAX_CID);
            header.set_end_cid(location.get_offset(), MAX_CID);
        }
        txn.record_write(WriteRecord::Insert { location });
    }

    /// Marks a version as deleted by `txn`; the deletion becomes visible to
    /// others at commit, when the end commit id is stamped.
    pub fn perform_delete(&self, txn: &Transaction, location: ItemPointer) {
        if let Some(tile_group) = self.storage.get_tile_group(location.get_block()) {
            tile_group
                .get_header()
                .set_end_cid(location.get_offset(), INVALID_CID);
        }
        txn.record_write(WriteRecord::Delete { location });
    }

    pub fn set_transaction_result(&self, txn: &Transaction, result: TransactionResult) {
        txn.set_result(result);
    }

    /// Stamps commit ids onto every version the transaction wrote, then
    /// releases all held ownership.
    pub fn commit_transaction(&self, txn: &Transaction) -> TransactionResult {
        let commit_cid = self.next_cid.fetch_add(1, Ordering::SeqCst);
        debug!(
            "Commit transaction {} at cid {}",
            txn.get_transaction_id(),
            commit_cid
        );

        for record in txn.get_write_set() {
            match record {
                WriteRecord::Insert { location } => {
                    self.with_header(location, |header, offset| {
                        header.set_begin_cid(offset, commit_cid);
                    });
                }
                WriteRecord::Update { old, new } => {
                    if old != new {
                        self.with_header(old, |header, offset| {
                            header.set_end_cid(offset, commit_cid);
                        });
                        self.with_header(new, |header, offset| {
                            header.set_begin_cid(offset, commit_cid);
                        });
                    }
                    // In-place overwrite: the version's commit ids are
                    // stamped by the record that created it.
                }
                WriteRecord::Delete { location } => {
                    self.with_header(location, |header, offset| {
                        header.set_end_cid(offset, commit_cid);
                    });
                }
            }
        }

        self.release_all_ownership(txn);
        TransactionResult::Success
    }

    /// Undoes the transaction's effects: restores superseded/deleted
    /// versions, unlinks version-chain links, and leaves versions created by
    /// the transaction permanently invisible. Finally releases every
    /// acquired ownership bit, write set or not.
    pub fn abort_transaction(&self, txn: &Transaction) -> TransactionResult {
        debug!("Abort transaction {}", txn.get_transaction_id());

        for record in txn.get_write_set().into_iter().rev() {
            match record {
                WriteRecord::Insert { location: _ } => {
                    // Begin cid was never stamped; the version stays
                    // invisible to every snapshot.
                }
                WriteRecord::Update { old, new } => {
                    if old != new {
                        self.with_header(old, |header, offset| {
                            header.set_end_cid(offset, MAX_CID);
                            header.set_next(offset, None);
                        });
                    }
                }
                WriteRecord::Delete { location } => {
                    self.with_header(location, |header, offset| {
                        header.set_end_cid(offset, MAX_CID);
                    });
                }
            }
        }

        self.release_all_ownership(txn);
        TransactionResult::Failure
    }

    fn release_all_ownership(&self, txn: &Transaction) {
        let mut locations: HashSet<ItemPointer> = txn.get_owned_set().into_iter().collect();
        for record in txn.get_write_set() {
            match record {
                WriteRecord::Insert { location } => {
                    locations.insert(location);
                }
                WriteRecord::Update { old, new } => {
                    locations.insert(old);
                    locations.insert(new);
                }
                WriteRecord::Delete { location } => {
                    locations.insert(location);
                }
            }
        }
        for location in locations {
            self.with_header(location, |header, offset| {
                header.release_owner(offset);
            });
        }
    }

    fn with_header<F: FnOnce(&TileGroupHeader, u32)>(&self, location: ItemPointer, f: F) {
        match self.storage.get_tile_group(location.get_block()) {
            Some(tile_group) => f(tile_group.get_header(), location.get_offset()),
            None => warn!("Tile group {} no longer registered", location.get_block()),
        }
    }
}
