//! The WGSL module dependency table (C4).
//!
//! Entries are `(data_id, deps)` pairs: `data_id` names the data-section
//! blob holding the module's source text, `deps` names the `wgsl_id`s of
//! modules it depends on at link time. Because every `deps` entry can
//! only reference an already-registered `wgsl_id`, the table is a DAG by
//! construction — no cycle detection is needed.
//!
//! Serialized form: `count:varint | (data_id:varint, dep_count:varint,
//! deps[*]:varint)*`.

use alloc::vec::Vec;

use pngine_types::{self as types, DataId, WgslId};

use crate::error::WgslTableError;

const MAX_ENTRIES: usize = 1024;
const MAX_DEPS: usize = 64;

/// One entry: the data blob holding a module's source, plus the
/// `wgsl_id`s of modules it depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WgslEntry {
    /// Data-section id of this module's WGSL source text.
    pub data_id: DataId,
    /// Ids of modules this one depends on, in declaration order.
    pub deps: Vec<WgslId>,
}

/// An append-only list of WGSL module dependency entries.
#[derive(Debug, Default, Clone)]
pub struct WgslTable {
    entries: Vec<WgslEntry>,
}

impl WgslTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, cloning `deps` into entry-owned storage and
    /// returning the new id.
    pub fn add(&mut self, data_id: DataId, deps: &[WgslId]) -> Result<WgslId, WgslTableError> {
        if self.entries.len() >= MAX_ENTRIES {
            return Err(WgslTableError::TooManyEntries);
        }
        if deps.len() > MAX_DEPS {
            return Err(WgslTableError::TooManyDeps(deps.len()));
        }
        let id = WgslId::new(self.entries.len() as u16);
        self.entries.push(WgslEntry {
            data_id,
            deps: deps.to_vec(),
        });
        Ok(id)
    }

    /// The entry registered under `id`, if any.
    pub fn get(&self, id: WgslId) -> Option<&WgslEntry> {
        self.entries.get(id.index())
    }

    /// Number of registered entries.
    pub fn count(&self) -> u16 {
        self.entries.len() as u16
    }

    /// Serializes the table to its on-disk form.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        types::write(&mut out, self.entries.len() as u32);
        for entry in &self.entries {
            types::write(&mut out, u32::from(entry.data_id.get()));
            types::write(&mut out, entry.deps.len() as u32);
            for dep in &entry.deps {
                types::write(&mut out, u32::from(dep.get()));
            }
        }
        out
    }

    /// Decodes a table from its on-disk form. Tolerant of truncation: a
    /// buffer that runs out mid-entry yields that entry with an empty
    /// dependency list rather than failing, though the leading count is
    /// always honored (missing trailing entries are simply not added).
    pub fn deserialize(buf: &[u8]) -> Self {
        let mut entries = Vec::new();
        let Ok((count, mut pos)) = types::decode(buf) else {
            return Self { entries };
        };
        let count = (count as usize).min(MAX_ENTRIES);

        for _ in 0..count {
            let Ok((data_id, len)) = types::decode(&buf[pos..]) else {
                break;
            };
            pos += len;

            let Ok((dep_count, len)) = types::decode(&buf[pos..]) else {
                entries.push(WgslEntry {
                    data_id: DataId::new(data_id as u16),
                    deps: Vec::new(),
                });
                break;
            };
            pos += len;

            let dep_count = (dep_count as usize).min(MAX_DEPS);
            let mut deps = Vec::with_capacity(dep_count);
            for _ in 0..dep_count {
                let Ok((dep, len)) = types::decode(&buf[pos..]) else {
                    break;
                };
                pos += len;
                deps.push(WgslId::new(dep as u16));
            }

            entries.push(WgslEntry {
                data_id: DataId::new(data_id as u16),
                deps,
            });
        }

        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assigns_dense_ids() {
        let mut table = WgslTable::new();
        let a = table.add(DataId::new(0), &[]).unwrap();
        let b = table.add(DataId::new(1), &[a]).unwrap();
        assert_eq!(a.get(), 0);
        assert_eq!(b.get(), 1);
        assert_eq!(table.get(b).unwrap().deps, alloc::vec![a]);
    }

    #[test]
    fn rejects_too_many_deps() {
        let mut table = WgslTable::new();
        let deps: Vec<WgslId> = (0..65).map(WgslId::new).collect();
        assert_eq!(
            table.add(DataId::new(0), &deps),
            Err(WgslTableError::TooManyDeps(65))
        );
    }

    #[test]
    fn round_trips_through_serialize_deserialize() {
        let mut table = WgslTable::new();
        let a = table.add(DataId::new(0), &[]).unwrap();
        table.add(DataId::new(1), &[a]).unwrap();
        let bytes = table.serialize();
        let decoded = WgslTable::deserialize(&bytes);
        assert_eq!(decoded.count(), 2);
        assert_eq!(decoded.get(a).unwrap().data_id, DataId::new(0));
    }

    #[test]
    fn truncated_buffer_decodes_empty_deps_rather_than_failing() {
        let mut table = WgslTable::new();
        table.add(DataId::new(5), &[WgslId::new(0)]).unwrap();
        let mut bytes = table.serialize();
        bytes.truncate(bytes.len() - 1);
        let decoded = WgslTable::deserialize(&bytes);
        assert_eq!(decoded.count(), 1);
        assert!(decoded.get(WgslId::new(0)).unwrap().deps.is_empty());
    }
}
