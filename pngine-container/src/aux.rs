//! Uniform and animation tables (C5).
//!
//! These are auxiliary metadata tables whose internal shape belongs to
//! the WebGPU host backend and the browser-side animation player, both
//! out of scope here. The container core carries them opaquely: a raw
//! byte range in, a raw byte range out, no parsing, no validation beyond
//! the header's offset bookkeeping.

use alloc::vec::Vec;

/// An opaque auxiliary table, carried verbatim between builder and
/// serialized container.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AuxTable {
    bytes: Vec<u8>,
}

impl AuxTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing byte range as an opaque table.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The raw contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the table carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_is_empty() {
        assert!(AuxTable::new().is_empty());
    }

    #[test]
    fn wraps_bytes_verbatim() {
        let table = AuxTable::from_bytes(alloc::vec![1, 2, 3]);
        assert_eq!(table.as_bytes(), &[1, 2, 3]);
        assert_eq!(table.len(), 3);
    }
}
