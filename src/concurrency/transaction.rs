use crate::common::config::{Cid, TxnId};
use crate::common::item_pointer::ItemPointer;
use parking_lot::{Mutex, RwLock};

/// Outcome recorded on a transaction as it executes. Operators set Failure
/// on conflict; the orchestrator maps Success to commit and everything else
/// to abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionResult {
    #[default]
    Undetermined,
    Success,
    Failure,
}

/// One entry in a transaction's write set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteRecord {
    /// `old == new` marks an in-place overwrite of a version this
    /// transaction already owned; no new version was created.
    Update { old: ItemPointer, new: ItemPointer },
    Insert { location: ItemPointer },
    Delete { location: ItemPointer },
}

/// Unit of atomicity. Mutated only by the single thread executing it; other
/// transactions observe its effects through per-slot concurrency metadata,
/// never through this object.
#[derive(Debug)]
pub struct Transaction {
    txn_id: TxnId,
    begin_cid: Cid,
    result: RwLock<TransactionResult>,
    write_set: Mutex<Vec<WriteRecord>>,
    /// Every location whose ownership this transaction acquired, including
    /// acquisitions that never made it into the write set (e.g. an update
    /// whose version insert failed right after the acquire). The abort path
    /// releases all of them.
    owned_set: Mutex<Vec<ItemPointer>>,
}

impl Transaction {
    pub fn new(txn_id: TxnId, begin_cid: Cid) -> Self {
        Self {
            txn_id,
            begin_cid,
            result: RwLock::new(TransactionResult::Undetermined),
            write_set: Mutex::new(Vec::new()),
            owned_set: Mutex::new(Vec::new()),
        }
    }

    pub fn get_transaction_id(&self) -> TxnId {
        self.txn_id
    }

    /// Snapshot commit id: versions committed at or before this are visible.
    pub fn get_begin_cid(&self) -> Cid {
        self.begin_cid
    }

    pub fn get_result(&self) -> TransactionResult {
        *self.result.read()
    }

    pub fn set_result(&self, result: TransactionResult) {
        *self.result.write() = result;
    }

    pub fn record_write(&self, record: WriteRecord) {
        self.write_set.lock().push(record);
    }

    pub fn get_write_set(&self) -> Vec<WriteRecord> {
        self.write_set.lock().clone()
    }

    pub fn record_ownership(&self, location: ItemPointer) {
        self.owned_set.lock().push(location);
    }

    pub fn get_owned_set(&self) -> Vec<ItemPointer> {
        self.owned_set.lock().clone()
    }
}
