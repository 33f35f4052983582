//! Precondition faults raised by the [`crate::Emitter`] façade.
//!
//! These are programmer errors, not recoverable container/structural
//! errors: a caller that trips one should fix the call site, not retry.
//! When the `precondition-checks` feature is disabled the emitter skips
//! these checks entirely and trusts the caller, trading a safety net for
//! a few bytes of code size in release builds.

use core::fmt;

/// A precondition the emitter façade checked and found violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum EmitFault {
    /// `draw`/`draw_indexed` requires `vertex_count`/`index_count` >= 1.
    #[cfg_attr(feature = "std", error("draw requires at least 1 vertex/index, got {0}"))]
    ZeroDrawCount(u32),
    /// `draw`/`draw_indexed` requires `instance_count` >= 1.
    #[cfg_attr(feature = "std", error("draw requires at least 1 instance, got {0}"))]
    ZeroInstanceCount(u32),
    /// `dispatch` requires all three workgroup dimensions >= 1.
    #[cfg_attr(
        feature = "std",
        error("dispatch requires non-zero workgroup dimensions, got ({0}, {1}, {2})")
    )]
    ZeroDispatchDim(u32, u32, u32),
    /// `set_vertex_buffer_pool`/`set_bind_group_pool` requires `pool_size >= 1`.
    #[cfg_attr(feature = "std", error("pool size must be at least 1"))]
    ZeroPoolSize,
    /// `set_vertex_buffer_pool`/`set_bind_group_pool` requires `offset < pool_size`.
    #[cfg_attr(
        feature = "std",
        error("pool offset {offset} is out of range for pool size {pool_size}")
    )]
    PoolOffsetOutOfRange {
        /// The offending offset.
        offset: u8,
        /// The pool size it was checked against.
        pool_size: u8,
    },
    /// `execute_bundles` requires `1 <= bundle_count <= 16`.
    #[cfg_attr(
        feature = "std",
        error("execute_bundles accepts 1 to 16 bundles, got {0}")
    )]
    BundleCountOutOfRange(usize),
    /// `create_shader_concat` requires `1 <= data_id_count <= 255`.
    #[cfg_attr(
        feature = "std",
        error("create_shader_concat accepts 1 to 255 data ids, got {0}")
    )]
    ShaderConcatCountOutOfRange(usize),
    /// `create_buffer` requires at least one usage flag set.
    #[cfg_attr(feature = "std", error("create_buffer requires at least one usage flag"))]
    EmptyBufferUsage,
}

#[cfg(not(feature = "std"))]
impl fmt::Display for EmitFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
