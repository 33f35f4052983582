//! The interned, deduplicated string table (C2).
//!
//! Serialized form: `count:u16 | offsets[count]:u16 | lengths[count]:u16 |
//! bytes`. Writing metadata before payload lets a decoder validate every
//! offset/length pair before it ever touches the byte region they
//! describe.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use pngine_types::StringId;

use crate::error::StringTableError;

const MAX_TOTAL_BYTES: usize = u16::MAX as usize;
const MAX_ENTRIES: usize = u16::MAX as usize;

/// An append-only, content-deduplicated table of UTF-8 byte strings.
#[derive(Debug, Default, Clone)]
pub struct StringTable {
    bytes: Vec<u8>,
    offsets: Vec<u16>,
    lengths: Vec<u16>,
    by_content: BTreeMap<Vec<u8>, StringId>,
}

impl StringTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `bytes`, returning the id of the existing entry on
    /// duplicate content or assigning the next free id otherwise.
    pub fn intern(&mut self, bytes: &[u8]) -> Result<StringId, StringTableError> {
        if let Some(&id) = self.by_content.get(bytes) {
            return Ok(id);
        }

        let attempted_bytes = self.bytes.len() + bytes.len();
        let attempted_count = self.offsets.len() + 1;
        if attempted_bytes > MAX_TOTAL_BYTES || attempted_count > MAX_ENTRIES {
            return Err(StringTableError::TableFull {
                attempted_bytes,
                attempted_count,
            });
        }

        let id = StringId::new(self.offsets.len() as u16);
        self.offsets.push(self.bytes.len() as u16);
        self.lengths.push(bytes.len() as u16);
        self.bytes.extend_from_slice(bytes);
        self.by_content.insert(bytes.to_vec(), id);
        Ok(id)
    }

    /// The bytes interned under `id`, or an empty slice if `id` is out of
    /// range.
    pub fn get(&self, id: StringId) -> &[u8] {
        let index = id.index();
        match (self.offsets.get(index), self.lengths.get(index)) {
            (Some(&offset), Some(&length)) => {
                let start = offset as usize;
                let end = start + length as usize;
                &self.bytes[start..end]
            }
            _ => &[],
        }
    }

    /// Reverse lookup by content, used at replay to resolve a source-level
    /// string literal back to its id without re-interning.
    pub fn find_id(&self, bytes: &[u8]) -> Option<StringId> {
        self.by_content.get(bytes).copied()
    }

    /// Read-only iteration over every entry in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (StringId, &[u8])> {
        (0..self.offsets.len()).map(|i| (StringId::new(i as u16), self.get(StringId::new(i as u16))))
    }

    /// Number of interned entries.
    pub fn count(&self) -> u16 {
        self.offsets.len() as u16
    }

    /// Serializes the table to its on-disk form.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.offsets.len() * 4 + self.bytes.len());
        out.extend_from_slice(&self.count().to_le_bytes());
        for &offset in &self.offsets {
            out.extend_from_slice(&offset.to_le_bytes());
        }
        for &length in &self.lengths {
            out.extend_from_slice(&length.to_le_bytes());
        }
        out.extend_from_slice(&self.bytes);
        out
    }

    /// Decodes a table from its on-disk form, copying string bytes out of
    /// `buf` so the returned table is independent of it.
    pub fn deserialize(buf: &[u8]) -> Result<Self, StringTableError> {
        if buf.len() < 2 {
            return Err(StringTableError::Truncated);
        }
        let count = u16::from_le_bytes([buf[0], buf[1]]) as usize;
        let metadata_len = 2 + count * 2 + count * 2;
        if buf.len() < metadata_len {
            return Err(StringTableError::Truncated);
        }

        let mut offsets = Vec::with_capacity(count);
        let mut cursor = 2;
        for _ in 0..count {
            offsets.push(u16::from_le_bytes([buf[cursor], buf[cursor + 1]]));
            cursor += 2;
        }
        let mut lengths = Vec::with_capacity(count);
        for _ in 0..count {
            lengths.push(u16::from_le_bytes([buf[cursor], buf[cursor + 1]]));
            cursor += 2;
        }

        let payload = &buf[metadata_len..];
        let mut bytes = Vec::new();
        let mut by_content = BTreeMap::new();
        for i in 0..count {
            let start = offsets[i] as usize;
            let length = lengths[i] as usize;
            let end = start
                .checked_add(length)
                .ok_or(StringTableError::Malformed)?;
            if end > payload.len() {
                return Err(StringTableError::Malformed);
            }
            let slice = payload
                .get(start..end)
                .ok_or(StringTableError::Malformed)?;
            bytes.extend_from_slice(slice);
            by_content.insert(slice.to_vec(), StringId::new(i as u16));
        }

        Ok(Self {
            bytes,
            offsets,
            lengths,
            by_content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_returns_the_same_id() {
        let mut table = StringTable::new();
        let a = table.intern(b"a").unwrap();
        let b = table.intern(b"b").unwrap();
        let a_again = table.intern(b"a").unwrap();
        assert_eq!(a.get(), 0);
        assert_eq!(b.get(), 1);
        assert_eq!(a_again, a);
        assert_eq!(table.count(), 2);
    }

    #[test]
    fn get_returns_the_interned_bytes() {
        let mut table = StringTable::new();
        let id = table.intern(b"hello world").unwrap();
        assert_eq!(table.get(id), b"hello world");
    }

    #[test]
    fn round_trips_through_serialize_deserialize() {
        let mut table = StringTable::new();
        table.intern(b"a").unwrap();
        table.intern(b"b").unwrap();
        table.intern(b"a").unwrap();
        let bytes = table.serialize();
        let decoded = StringTable::deserialize(&bytes).unwrap();
        assert_eq!(decoded.count(), 2);
        assert_eq!(decoded.get(StringId::new(0)), b"a");
        assert_eq!(decoded.get(StringId::new(1)), b"b");
    }

    #[test]
    fn deserialize_rejects_truncated_metadata() {
        assert_eq!(
            StringTable::deserialize(&[0x02, 0x00]),
            Err(StringTableError::Truncated)
        );
    }

    #[test]
    fn find_id_is_the_reverse_of_intern() {
        let mut table = StringTable::new();
        let id = table.intern(b"main").unwrap();
        assert_eq!(table.find_id(b"main"), Some(id));
        assert_eq!(table.find_id(b"missing"), None);
    }
}
