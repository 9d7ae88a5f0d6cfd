use crate::common::config::{Oid, INVALID_OID};
use std::fmt;

/// Identifies one physical tuple version: (tile group id, slot offset).
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct ItemPointer {
    block: Oid,
    offset: u32,
}

impl ItemPointer {
    pub fn new(block: Oid, offset: u32) -> Self {
        Self { block, offset }
    }

    /// The null pointer, returned e.g. when a version insert fails.
    pub fn null() -> Self {
        Self {
            block: INVALID_OID,
            offset: 0,
        }
    }

    pub fn is_null(&self) -> bool {
        self.block == INVALID_OID
    }

    /// Returns the tile group id this pointer refers to.
    pub fn get_block(&self) -> Oid {
        self.block
    }

    /// Returns the slot offset within the tile group.
    pub fn get_offset(&self) -> u32 {
        self.offset
    }
}

impl fmt::Display for ItemPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block: {} offset: {}", self.block, self.offset)
    }
}

impl Default for ItemPointer {
    fn default() -> Self {
        Self::null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let location = ItemPointer::new(3, 7);
        assert_eq!(location.get_block(), 3);
        assert_eq!(location.get_offset(), 7);
        assert!(!location.is_null());
    }

    #[test]
    fn test_null() {
        let location = ItemPointer::null();
        assert!(location.is_null());
        assert_eq!(ItemPointer::default(), location);
    }

    #[test]
    fn test_display() {
        let location = ItemPointer::new(1, 2);
        assert_eq!(format!("{}", location), "block: 1 offset: 2");
    }

    #[test]
    fn test_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(ItemPointer::new(1, 2));
        assert!(set.contains(&ItemPointer::new(1, 2)));
        assert!(!set.contains(&ItemPointer::new(1, 3)));
    }
}
