//! The PNGB container header: a 40-byte v5 layout with a 28-byte v4
//! decode path promoted into it.

use pngine_asm::Plugins;

use crate::error::ContainerError;

/// ASCII `"PNGB"`, the leading four bytes of every container.
pub const MAGIC: [u8; 4] = *b"PNGB";

/// Current encode version. Decode also accepts [`V4`](Self::V4_VERSION).
pub const VERSION: u16 = 5;

/// Size in bytes of the v5 header.
pub const V5_HEADER_SIZE: u32 = 40;

/// Size in bytes of the legacy v4 header.
pub const V4_HEADER_SIZE: u32 = 28;

/// Bit 0 of `flags`: an embedded WASM executor follows the header.
pub const FLAG_HAS_EMBEDDED_EXECUTOR: u16 = 1 << 0;
/// Bit 1 of `flags`: an animation table is present.
pub const FLAG_HAS_ANIMATION_TABLE: u16 = 1 << 1;

/// The fixed-size, little-endian fields preceding every container's
/// variable-length sections. Always normalized to the 40-byte v5 shape
/// in memory; [`Header::deserialize`] promotes a v4 buffer on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// The version the buffer declared on the wire (4 or 5). A promoted
    /// v4 header keeps this for diagnostics even though every other field
    /// is now in v5 shape.
    pub source_version: u16,
    /// Byte length of the on-wire header this was parsed from: 40 for
    /// v5, 28 for a promoted v4 buffer. Always 40 for a freshly built
    /// header destined for encode. Needed because a v4 buffer's
    /// bytecode section starts right after its 28-byte header, not
    /// after a hypothetical 40-byte one.
    pub header_len: u32,
    /// `has_embedded_executor` / `has_animation_table` bits; always 0 for
    /// a promoted v4 header.
    pub flags: u16,
    /// Which optional replay-engine features this payload exercises.
    pub plugins: Plugins,
    /// Byte offset of the embedded executor, or 0 if absent.
    pub executor_offset: u32,
    /// Byte length of the embedded executor, or 0 if absent.
    pub executor_length: u32,
    /// Byte offset of the string table section.
    pub string_table_offset: u32,
    /// Byte offset of the data section.
    pub data_section_offset: u32,
    /// Byte offset of the WGSL table section.
    pub wgsl_table_offset: u32,
    /// Byte offset of the uniform table section.
    pub uniform_table_offset: u32,
    /// Byte offset of the animation table section.
    pub animation_table_offset: u32,
}

impl Header {
    /// Wire version accepted on decode but never produced on encode.
    pub const V4_VERSION: u16 = 4;

    /// Whether `flags` has [`FLAG_HAS_EMBEDDED_EXECUTOR`] set.
    pub fn has_embedded_executor(&self) -> bool {
        self.flags & FLAG_HAS_EMBEDDED_EXECUTOR != 0
    }

    /// Whether `flags` has [`FLAG_HAS_ANIMATION_TABLE`] set.
    pub fn has_animation_table(&self) -> bool {
        self.flags & FLAG_HAS_ANIMATION_TABLE != 0
    }

    /// Where the bytecode section begins: right after the executor when
    /// one is embedded, otherwise right after the header. Fails rather
    /// than wrapping if `executor_offset + executor_length` overflows
    /// `u32` — both fields are attacker-controlled on the decode path.
    pub fn bytecode_start(&self, buffer_len: usize) -> Result<u32, ContainerError> {
        if self.has_embedded_executor() {
            self.executor_offset
                .checked_add(self.executor_length)
                .ok_or(ContainerError::InvalidOffset {
                    field: "executor_offset",
                    offset: self.executor_offset,
                    buffer_len,
                })
        } else {
            Ok(self.header_len)
        }
    }

    /// Serializes the always-v5 on-disk layout.
    pub fn serialize(&self) -> [u8; V5_HEADER_SIZE as usize] {
        let mut out = [0u8; V5_HEADER_SIZE as usize];
        out[0..4].copy_from_slice(&MAGIC);
        out[4..6].copy_from_slice(&VERSION.to_le_bytes());
        out[6..8].copy_from_slice(&self.flags.to_le_bytes());
        out[8] = self.plugins.bits();
        // out[9..12] reserved, left zero.
        out[12..16].copy_from_slice(&self.executor_offset.to_le_bytes());
        out[16..20].copy_from_slice(&self.executor_length.to_le_bytes());
        out[20..24].copy_from_slice(&self.string_table_offset.to_le_bytes());
        out[24..28].copy_from_slice(&self.data_section_offset.to_le_bytes());
        out[28..32].copy_from_slice(&self.wgsl_table_offset.to_le_bytes());
        out[32..36].copy_from_slice(&self.uniform_table_offset.to_le_bytes());
        out[36..40].copy_from_slice(&self.animation_table_offset.to_le_bytes());
        out
    }

    /// Parses a header from the front of `buf`, promoting a v4 buffer to
    /// the synthetic v5 shape described in the module docs. Returns the
    /// parsed header and the number of header bytes consumed (28 or 40).
    pub fn deserialize(buf: &[u8]) -> Result<(Self, usize), ContainerError> {
        if buf.len() < 4 || buf[0..4] != MAGIC {
            return Err(ContainerError::InvalidMagic);
        }
        if buf.len() < 6 {
            return Err(ContainerError::InvalidFormat {
                needed: 6,
                available: buf.len(),
            });
        }
        let version = u16::from_le_bytes([buf[4], buf[5]]);

        match version {
            Self::V4_VERSION => Self::deserialize_v4(buf),
            VERSION => Self::deserialize_v5(buf),
            other => Err(ContainerError::UnsupportedVersion(other)),
        }
    }

    fn deserialize_v5(buf: &[u8]) -> Result<(Self, usize), ContainerError> {
        let size = V5_HEADER_SIZE as usize;
        if buf.len() < size {
            return Err(ContainerError::InvalidFormat {
                needed: size,
                available: buf.len(),
            });
        }
        let header = Self {
            source_version: VERSION,
            header_len: V5_HEADER_SIZE,
            flags: u16::from_le_bytes([buf[6], buf[7]]),
            plugins: Plugins::from_bits_truncate(buf[8]),
            executor_offset: u32::from_le_bytes(buf[12..16].try_into().unwrap()),
            executor_length: u32::from_le_bytes(buf[16..20].try_into().unwrap()),
            string_table_offset: u32::from_le_bytes(buf[20..24].try_into().unwrap()),
            data_section_offset: u32::from_le_bytes(buf[24..28].try_into().unwrap()),
            wgsl_table_offset: u32::from_le_bytes(buf[28..32].try_into().unwrap()),
            uniform_table_offset: u32::from_le_bytes(buf[32..36].try_into().unwrap()),
            animation_table_offset: u32::from_le_bytes(buf[36..40].try_into().unwrap()),
        };
        Ok((header, size))
    }

    /// v4 has no executor or plugins fields: five section offsets only,
    /// immediately after the 6-byte magic+version prefix.
    fn deserialize_v4(buf: &[u8]) -> Result<(Self, usize), ContainerError> {
        let size = V4_HEADER_SIZE as usize;
        if buf.len() < size {
            return Err(ContainerError::InvalidFormat {
                needed: size,
                available: buf.len(),
            });
        }
        let header = Self {
            source_version: Self::V4_VERSION,
            header_len: V4_HEADER_SIZE,
            flags: 0,
            plugins: Plugins::CORE_ONLY,
            executor_offset: 0,
            executor_length: 0,
            string_table_offset: u32::from_le_bytes(buf[8..12].try_into().unwrap()),
            data_section_offset: u32::from_le_bytes(buf[12..16].try_into().unwrap()),
            wgsl_table_offset: u32::from_le_bytes(buf[16..20].try_into().unwrap()),
            uniform_table_offset: u32::from_le_bytes(buf[20..24].try_into().unwrap()),
            animation_table_offset: u32::from_le_bytes(buf[24..28].try_into().unwrap()),
        };
        Ok((header, size))
    }

    /// Validates offset ranges and monotonicity against a decoded
    /// buffer's actual length. Magic/version are already checked by
    /// [`Self::deserialize`]; this covers clause (c)/(d) of the
    /// container's decode validation.
    pub fn validate(&self, buffer_len: usize) -> Result<(), ContainerError> {
        let fields: [(&'static str, u32); 5] = [
            ("string_table_offset", self.string_table_offset),
            ("data_section_offset", self.data_section_offset),
            ("wgsl_table_offset", self.wgsl_table_offset),
            ("uniform_table_offset", self.uniform_table_offset),
            ("animation_table_offset", self.animation_table_offset),
        ];

        let mut prev = self.bytecode_start(buffer_len)?;
        for (field, offset) in fields {
            if offset < prev || offset as usize > buffer_len {
                return Err(ContainerError::InvalidOffset {
                    field,
                    offset,
                    buffer_len,
                });
            }
            prev = offset;
        }

        if self.has_embedded_executor() {
            if self.executor_length == 0 {
                return Err(ContainerError::InvalidOffset {
                    field: "executor_length",
                    offset: self.executor_length,
                    buffer_len,
                });
            }
            let executor_end = self.executor_offset.checked_add(self.executor_length).ok_or(
                ContainerError::InvalidOffset {
                    field: "executor_offset",
                    offset: self.executor_offset,
                    buffer_len,
                },
            )?;
            if executor_end > self.string_table_offset {
                return Err(ContainerError::InvalidOffset {
                    field: "executor_offset",
                    offset: self.executor_offset,
                    buffer_len,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> Header {
        Header {
            source_version: VERSION,
            header_len: V5_HEADER_SIZE,
            flags: 0,
            plugins: Plugins::CORE_ONLY,
            executor_offset: 0,
            executor_length: 0,
            string_table_offset: 40,
            data_section_offset: 50,
            wgsl_table_offset: 60,
            uniform_table_offset: 60,
            animation_table_offset: 60,
        }
    }

    #[test]
    fn serialize_starts_with_magic_and_version() {
        let bytes = sample_header().serialize();
        assert_eq!(&bytes[0..4], b"PNGB");
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), 5);
    }

    #[test]
    fn round_trips_through_serialize_deserialize() {
        let header = sample_header();
        let bytes = header.serialize();
        let (decoded, consumed) = Header::deserialize(&bytes).unwrap();
        assert_eq!(consumed, V5_HEADER_SIZE as usize);
        assert_eq!(decoded, header);
    }

    #[test]
    fn rejects_bad_magic() {
        let bytes = [0u8; 40];
        assert_eq!(Header::deserialize(&bytes), Err(ContainerError::InvalidMagic));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut bytes = sample_header().serialize();
        bytes[4..6].copy_from_slice(&99u16.to_le_bytes());
        assert_eq!(
            Header::deserialize(&bytes),
            Err(ContainerError::UnsupportedVersion(99))
        );
    }

    #[test]
    fn promotes_v4_header_to_v5_shape() {
        let mut v4 = alloc::vec![0u8; V4_HEADER_SIZE as usize];
        v4[0..4].copy_from_slice(b"PNGB");
        v4[4..6].copy_from_slice(&4u16.to_le_bytes());
        v4[8..12].copy_from_slice(&28u32.to_le_bytes());
        v4[12..16].copy_from_slice(&40u32.to_le_bytes());
        v4[16..20].copy_from_slice(&50u32.to_le_bytes());
        v4[20..24].copy_from_slice(&50u32.to_le_bytes());
        v4[24..28].copy_from_slice(&50u32.to_le_bytes());

        let (header, consumed) = Header::deserialize(&v4).unwrap();
        assert_eq!(consumed, V4_HEADER_SIZE as usize);
        assert_eq!(header.source_version, Header::V4_VERSION);
        assert_eq!(header.executor_length, 0);
        assert_eq!(header.plugins, Plugins::CORE_ONLY);
        assert_eq!(header.string_table_offset, 28);
    }

    #[test]
    fn validate_rejects_non_monotonic_offsets() {
        let mut header = sample_header();
        header.data_section_offset = 10;
        assert!(header.validate(100).is_err());
    }
}
