//! The ordered, non-deduplicated data/blob section (C3).
//!
//! Like [`crate::StringTable`] but blobs are never deduplicated — a
//! caller that interns the same bytes twice gets two distinct ids — and
//! lengths are `u32` rather than `u16` since a single blob (an embedded
//! image, a WASM module) can dwarf the string table's budget.
//!
//! Serialized form: `count:u16 | (offset:u32, length:u32)[count] |
//! concatenated bytes`.

use alloc::vec::Vec;

use pngine_types::DataId;

use crate::error::DataSectionError;

const MAX_ENTRIES: usize = u16::MAX as usize;
const MAX_TOTAL_BYTES: u64 = u32::MAX as u64;

/// An append-only, order-preserving table of opaque byte blobs.
#[derive(Debug, Default, Clone)]
pub struct DataSection {
    bytes: Vec<u8>,
    offsets: Vec<u32>,
    lengths: Vec<u32>,
}

impl DataSection {
    /// An empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `blob`, always assigning a fresh id — no deduplication.
    pub fn add(&mut self, blob: &[u8]) -> Result<DataId, DataSectionError> {
        let attempted_count = self.offsets.len() + 1;
        if attempted_count > MAX_ENTRIES {
            return Err(DataSectionError::TooManyDataEntries { attempted_count });
        }
        let attempted_bytes = self.bytes.len() as u64 + blob.len() as u64;
        if attempted_bytes > MAX_TOTAL_BYTES {
            return Err(DataSectionError::DataSectionOverflow { attempted_bytes });
        }

        let id = DataId::new(self.offsets.len() as u16);
        self.offsets.push(self.bytes.len() as u32);
        self.lengths.push(blob.len() as u32);
        self.bytes.extend_from_slice(blob);
        Ok(id)
    }

    /// The bytes stored under `id`, or an empty slice if `id` is out of
    /// range.
    pub fn get(&self, id: DataId) -> &[u8] {
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

    /// Read-only iteration over every blob in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DataId, &[u8])> {
        (0..self.offsets.len()).map(|i| (DataId::new(i as u16), self.get(DataId::new(i as u16))))
    }

    /// Number of stored entries.
    pub fn count(&self) -> u16 {
        self.offsets.len() as u16
    }

    /// Serializes the section to its on-disk form.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 + self.offsets.len() * 8 + self.bytes.len());
        out.extend_from_slice(&self.count().to_le_bytes());
        for (&offset, &length) in self.offsets.iter().zip(&self.lengths) {
            out.extend_from_slice(&offset.to_le_bytes());
            out.extend_from_slice(&length.to_le_bytes());
        }
        out.extend_from_slice(&self.bytes);
        out
    }

    /// Decodes a section from its on-disk form, copying blob bytes out of
    /// `buf` so the returned section is independent of it.
    pub fn deserialize(buf: &[u8]) -> Result<Self, DataSectionError> {
        if buf.len() < 2 {
            return Err(DataSectionError::Truncated);
        }
        let count = u16::from_le_bytes([buf[0], buf[1]]) as usize;
        let metadata_len = 2 + count * 8;
        if buf.len() < metadata_len {
            return Err(DataSectionError::Truncated);
        }

        let mut offsets = Vec::with_capacity(count);
        let mut lengths = Vec::with_capacity(count);
        let mut cursor = 2;
        for _ in 0..count {
            let offset = u32::from_le_bytes(buf[cursor..cursor + 4].try_into().unwrap());
            let length = u32::from_le_bytes(buf[cursor + 4..cursor + 8].try_into().unwrap());
            offsets.push(offset);
            lengths.push(length);
            cursor += 8;
        }

        let payload = &buf[metadata_len..];
        let mut bytes = Vec::new();
        for i in 0..count {
            let start = offsets[i] as usize;
            let length = lengths[i] as usize;
            let end = start
                .checked_add(length)
                .ok_or(DataSectionError::Malformed)?;
            let slice = payload
                .get(start..end)
                .ok_or(DataSectionError::Malformed)?;
            bytes.extend_from_slice(slice);
        }

        Ok(Self {
            bytes,
            offsets,
            lengths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_never_deduplicates() {
        let mut section = DataSection::new();
        let a = section.add(b"hello world").unwrap();
        let b = section.add(b"hello world").unwrap();
        assert_ne!(a, b);
        assert_eq!(section.count(), 2);
    }

    #[test]
    fn get_returns_the_stored_bytes() {
        let mut section = DataSection::new();
        let id = section.add(b"hello world").unwrap();
        assert_eq!(section.get(id), b"hello world");
        assert_eq!(section.get(id).len(), 11);
    }

    #[test]
    fn round_trips_through_serialize_deserialize() {
        let mut section = DataSection::new();
        section.add(b"alpha").unwrap();
        section.add(b"beta").unwrap();
        let bytes = section.serialize();
        let decoded = DataSection::deserialize(&bytes).unwrap();
        assert_eq!(decoded.count(), 2);
        assert_eq!(decoded.get(DataId::new(0)), b"alpha");
        assert_eq!(decoded.get(DataId::new(1)), b"beta");
        assert_eq!(decoded.serialize(), bytes);
    }

    #[test]
    fn deserialize_rejects_truncated_metadata() {
        assert_eq!(
            DataSection::deserialize(&[0x01, 0x00]),
            Err(DataSectionError::Truncated)
        );
    }
}
