pub type Oid = u64; // object id type
pub type TxnId = u64; // transaction id type
pub type Cid = u64; // commit id type

pub const INVALID_OID: Oid = u64::MAX; // invalid object id
pub const INVALID_TXN_ID: TxnId = u64::MAX; // invalid transaction id
pub const INVALID_CID: Cid = u64::MAX; // invalid commit id

/// Owner field value of an unowned tuple slot. Ownership acquisition is a
/// compare-and-swap from this value to the acquiring transaction's id.
pub const INITIAL_TXN_ID: TxnId = 0;

/// First transaction id handed out by the transaction manager. Keeping
/// transaction ids in the upper half of the id space keeps them disjoint
/// from commit ids.
pub const TXN_START_ID: TxnId = 1 << 63;

/// First commit id handed out by the transaction manager.
pub const START_CID: Cid = 1;

/// Begin/end commit id of a tuple version that has not been committed /
/// superseded yet. A slot whose end commit id equals MAX_CID holds the
/// latest version of its logical row.
pub const MAX_CID: Cid = u64::MAX - 1;

/// Number of tuple slots in one tile group.
pub const DEFAULT_TUPLES_PER_TILE_GROUP: usize = 1024;
