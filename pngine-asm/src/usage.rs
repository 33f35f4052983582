//! Packed single-byte bitfields used as opcode parameters.

use bitflags::bitflags;

bitflags! {
    /// `create_buffer`'s `usage:b` parameter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BufferUsage: u8 {
        /// Bit 0.
        const MAP_READ = 1 << 0;
        /// Bit 1.
        const MAP_WRITE = 1 << 1;
        /// Bit 2.
        const COPY_SRC = 1 << 2;
        /// Bit 3.
        const COPY_DST = 1 << 3;
        /// Bit 4.
        const INDEX = 1 << 4;
        /// Bit 5.
        const VERTEX = 1 << 5;
        /// Bit 6.
        const UNIFORM = 1 << 6;
        /// Bit 7.
        const STORAGE = 1 << 7;
    }
}

bitflags! {
    /// The container header's `plugins` bitfield.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Plugins: u8 {
        /// Bit 0, always set.
        const CORE = 1 << 0;
        /// Bit 1.
        const RENDER = 1 << 1;
        /// Bit 2.
        const COMPUTE = 1 << 2;
        /// Bit 3.
        const WASM = 1 << 3;
        /// Bit 4.
        const ANIMATION = 1 << 4;
        /// Bit 5.
        const TEXTURE = 1 << 5;
    }
}

impl Plugins {
    /// `core`-only plugin set, the default for a payload using no optional
    /// replay-engine feature.
    pub const CORE_ONLY: Self = Self::CORE;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_buffer_requires_at_least_one_usage_flag() {
        assert!(BufferUsage::empty().is_empty());
        assert!(!BufferUsage::VERTEX.is_empty());
    }

    #[test]
    fn plugin_bitfield_combines_flags() {
        // render+compute set alongside the always-on core bit.
        let plugins = Plugins::CORE | Plugins::RENDER | Plugins::COMPUTE;
        assert_eq!(plugins.bits(), 0b0000_0111);
    }
}
