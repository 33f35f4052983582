//! Parsing of `$<prefix>:<u16>` resource-id atoms and the per-namespace
//! duplicate-definition tracking the assembler's second pass relies on.

use alloc::string::{String, ToString};

use crate::error::InvalidResourceId;

/// The upper bound on any single resource namespace's index space.
pub const MAX_RESOURCES: usize = 256;

/// Which resource namespace a `$<prefix>:<u16>` atom names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `$d:N` — a data-section blob.
    Data,
    /// `$shd:N` — a shader module.
    Shader,
    /// `$buf:N` — a GPU buffer.
    Buffer,
    /// `$tex:N` — a GPU texture.
    Texture,
    /// `$samp:N` — a GPU sampler.
    Sampler,
    /// `$pipe:N` — a render or compute pipeline.
    Pipeline,
    /// `$bg:N` — a bind group.
    BindGroup,
    /// `$pass:N` — a render or compute pass.
    Pass,
    /// `$frm:N` — a frame.
    Frame,
}

impl ResourceKind {
    fn from_prefix(prefix: &str) -> Option<Self> {
        Some(match prefix {
            "d" => Self::Data,
            "shd" => Self::Shader,
            "buf" => Self::Buffer,
            "tex" => Self::Texture,
            "samp" => Self::Sampler,
            "pipe" => Self::Pipeline,
            "bg" => Self::BindGroup,
            "pass" => Self::Pass,
            "frm" => Self::Frame,
            _ => return None,
        })
    }

    const fn slot(self) -> usize {
        match self {
            Self::Data => 0,
            Self::Shader => 1,
            Self::Buffer => 2,
            Self::Texture => 3,
            Self::Sampler => 4,
            Self::Pipeline => 5,
            Self::BindGroup => 6,
            Self::Pass => 7,
            Self::Frame => 8,
        }
    }
}

/// Count of distinct resource namespaces, used to size
/// [`DuplicateTracker`].
const NAMESPACE_COUNT: usize = 9;

/// A parsed `$<prefix>:<u16>` resource id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId {
    /// Which namespace this id lives in.
    pub kind: ResourceKind,
    /// The dense index within that namespace.
    pub index: u16,
}

/// Parses a `$<prefix>:<u16>` atom. Fails if the sigil, prefix, or index
/// is malformed, or if the index is `>= MAX_RESOURCES`.
pub fn parse(atom: &str) -> Result<ResourceId, InvalidResourceId> {
    let rest = atom
        .strip_prefix('$')
        .ok_or_else(|| InvalidResourceId::MissingSigil(atom.to_string()))?;
    let (prefix, index_str) = rest
        .split_once(':')
        .ok_or_else(|| InvalidResourceId::NonNumericIndex(atom.to_string()))?;
    let kind = ResourceKind::from_prefix(prefix)
        .ok_or_else(|| InvalidResourceId::UnknownPrefix(atom.to_string()))?;
    let index: u32 = index_str
        .parse()
        .map_err(|_| InvalidResourceId::NonNumericIndex(atom.to_string()))?;
    if index as usize >= MAX_RESOURCES {
        return Err(InvalidResourceId::IndexOutOfRange(atom.to_string(), index));
    }
    Ok(ResourceId {
        kind,
        index: index as u16,
    })
}

/// Per-resource-kind bitsets marking every id defined so far, used to
/// detect redefinition during the assembler's emit pass.
#[derive(Debug, Clone)]
pub struct DuplicateTracker {
    seen: [[bool; MAX_RESOURCES]; NAMESPACE_COUNT],
}

impl Default for DuplicateTracker {
    fn default() -> Self {
        Self {
            seen: [[false; MAX_RESOURCES]; NAMESPACE_COUNT],
        }
    }
}

impl DuplicateTracker {
    /// A tracker with nothing marked defined.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as defined, returning `false` if it was already marked
    /// (the caller should fault with `DuplicateResource` in that case).
    pub fn define(&mut self, id: ResourceId) -> bool {
        let slot = &mut self.seen[id.kind.slot()][id.index as usize];
        if *slot {
            false
        } else {
            *slot = true;
            true
        }
    }
}

/// Assigns the next unused index in `kind`'s namespace, used by
/// shorthand forms (e.g. a bare `(frame "name" ...)`) that do not spell
/// out an explicit `$frm:N`.
#[derive(Debug, Clone, Default)]
pub struct AutoIndexer {
    next: [u16; NAMESPACE_COUNT],
}

impl AutoIndexer {
    /// A fresh indexer, every namespace starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and then increments the next free index for `kind`.
    pub fn next(&mut self, kind: ResourceKind) -> u16 {
        let slot = &mut self.next[kind.slot()];
        let index = *slot;
        *slot += 1;
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_prefix() {
        assert_eq!(parse("$d:0").unwrap().kind, ResourceKind::Data);
        assert_eq!(parse("$shd:1").unwrap().kind, ResourceKind::Shader);
        assert_eq!(parse("$buf:2").unwrap().kind, ResourceKind::Buffer);
        assert_eq!(parse("$frm:3").unwrap().kind, ResourceKind::Frame);
    }

    #[test]
    fn rejects_missing_sigil() {
        assert_eq!(
            parse("d:0"),
            Err(InvalidResourceId::MissingSigil("d:0".into()))
        );
    }

    #[test]
    fn rejects_unknown_prefix() {
        assert!(matches!(
            parse("$xyz:0"),
            Err(InvalidResourceId::UnknownPrefix(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_index() {
        assert!(matches!(
            parse("$buf:256"),
            Err(InvalidResourceId::IndexOutOfRange(_, 256))
        ));
    }

    #[test]
    fn duplicate_tracker_flags_redefinition() {
        let mut tracker = DuplicateTracker::new();
        let id = ResourceId {
            kind: ResourceKind::Buffer,
            index: 0,
        };
        assert!(tracker.define(id));
        assert!(!tracker.define(id));
    }

    #[test]
    fn auto_indexer_assigns_sequentially_per_namespace() {
        let mut indexer = AutoIndexer::new();
        assert_eq!(indexer.next(ResourceKind::Frame), 0);
        assert_eq!(indexer.next(ResourceKind::Frame), 1);
        assert_eq!(indexer.next(ResourceKind::Buffer), 0);
    }
}
