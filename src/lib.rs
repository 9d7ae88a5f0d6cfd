//! An MVCC query execution engine.
//!
//! Plans are closed trees of operator nodes; the executor factory builds an
//! isomorphic tree of pull-based executors that exchange logical tiles.
//! Mutations follow an optimistic, first-acquirer-wins ownership protocol
//! over versioned tile-group storage; the plan executor settles each
//! statement's transaction by its recorded result.

pub mod brain;
pub mod catalog;
pub mod common;
pub mod concurrency;
pub mod execution;
pub mod index;
pub mod storage;
pub mod types_db;
