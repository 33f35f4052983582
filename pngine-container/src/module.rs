//! The decoded container: a header plus its sections, in fixed order.

use alloc::vec::Vec;

use pngine_asm::Plugins;

use crate::aux::AuxTable;
use crate::data_section::DataSection;
use crate::error::ContainerError;
use crate::header::Header;
use crate::string_table::StringTable;
use crate::wgsl_table::WgslTable;

/// A fully decoded PNGB container: independent copies of every section,
/// owned and ready to use without the source buffer.
#[derive(Debug, Clone)]
pub struct Module {
    header: Header,
    executor: Vec<u8>,
    bytecode: Vec<u8>,
    strings: StringTable,
    data: DataSection,
    wgsl: WgslTable,
    uniforms: AuxTable,
    animations: AuxTable,
}

impl Module {
    pub(crate) fn new(
        header: Header,
        executor: Vec<u8>,
        bytecode: Vec<u8>,
        strings: StringTable,
        data: DataSection,
        wgsl: WgslTable,
        uniforms: AuxTable,
        animations: AuxTable,
    ) -> Self {
        Self {
            header,
            executor,
            bytecode,
            strings,
            data,
            wgsl,
            uniforms,
            animations,
        }
    }

    /// The (always v5-shaped) header. `header.source_version` reports
    /// whether the original buffer was v4 or v5.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// The embedded WASM executor, empty if none was present.
    pub fn executor(&self) -> &[u8] {
        &self.executor
    }

    /// The bytecode section.
    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// The interned string table.
    pub fn strings(&self) -> &StringTable {
        &self.strings
    }

    /// The data/blob section.
    pub fn data(&self) -> &DataSection {
        &self.data
    }

    /// The WGSL module dependency table.
    pub fn wgsl(&self) -> &WgslTable {
        &self.wgsl
    }

    /// The opaque uniform table.
    pub fn uniforms(&self) -> &AuxTable {
        &self.uniforms
    }

    /// The opaque animation table.
    pub fn animations(&self) -> &AuxTable {
        &self.animations
    }

    /// Convenience accessor over the header's plugin bitfield.
    pub fn plugins(&self) -> Plugins {
        self.header.plugins
    }

    /// Whether the `render` plugin bit is set.
    pub fn has_render(&self) -> bool {
        self.plugins().contains(Plugins::RENDER)
    }

    /// Whether the `compute` plugin bit is set.
    pub fn has_compute(&self) -> bool {
        self.plugins().contains(Plugins::COMPUTE)
    }

    /// Whether the `wasm` plugin bit is set.
    pub fn has_wasm(&self) -> bool {
        self.plugins().contains(Plugins::WASM)
    }

    /// Whether the `animation` plugin bit is set.
    pub fn has_animation(&self) -> bool {
        self.plugins().contains(Plugins::ANIMATION)
    }

    /// Whether the `texture` plugin bit is set.
    pub fn has_texture(&self) -> bool {
        self.plugins().contains(Plugins::TEXTURE)
    }

    /// Serializes the module back to its on-disk v5 form. Re-serializing
    /// a module decoded from a v5 buffer reproduces it byte-for-byte; a
    /// module promoted from v4 serializes to the equivalent v5 layout
    /// (v4 is decode-only, never encode).
    #[tracing::instrument(skip(self))]
    pub fn serialize(&self) -> Vec<u8> {
        let strings_bytes = self.strings.serialize();
        let data_bytes = self.data.serialize();
        let wgsl_bytes = self.wgsl.serialize();

        // Re-serialization always produces the 40-byte v5 header shape,
        // even for a `Module` promoted from a v4 decode: `header_len`
        // only describes where bytecode started in the *source* buffer.
        let bytecode_start = if self.header.has_embedded_executor() {
            self.header.executor_offset + self.header.executor_length
        } else {
            crate::header::V5_HEADER_SIZE
        };
        let string_table_offset = bytecode_start + self.bytecode.len() as u32;
        let data_section_offset = string_table_offset + strings_bytes.len() as u32;
        let wgsl_table_offset = data_section_offset + data_bytes.len() as u32;
        let uniform_table_offset = wgsl_table_offset + wgsl_bytes.len() as u32;
        let animation_table_offset = uniform_table_offset + self.uniforms.len() as u32;

        let header = Header {
            header_len: crate::header::V5_HEADER_SIZE,
            string_table_offset,
            data_section_offset,
            wgsl_table_offset,
            uniform_table_offset,
            animation_table_offset,
            ..self.header
        };

        let mut out = Vec::new();
        out.extend_from_slice(&header.serialize());
        out.extend_from_slice(&self.executor);
        out.extend_from_slice(&self.bytecode);
        out.extend_from_slice(&strings_bytes);
        out.extend_from_slice(&data_bytes);
        out.extend_from_slice(&wgsl_bytes);
        out.extend_from_slice(self.uniforms.as_bytes());
        out.extend_from_slice(self.animations.as_bytes());
        out
    }

    /// Decodes a serialized buffer into an independent `Module`.
    #[tracing::instrument(skip(buf), fields(buffer_len = buf.len()))]
    pub fn deserialize(buf: &[u8]) -> Result<Self, ContainerError> {
        let (header, _header_len) = Header::deserialize(buf)?;
        header.validate(buf.len())?;
        tracing::debug!(version = header.source_version, "container header validated");

        let executor = if header.has_embedded_executor() {
            let start = header.executor_offset as usize;
            let end = start + header.executor_length as usize;
            buf.get(start..end)
                .ok_or(ContainerError::InvalidOffset {
                    field: "executor_offset",
                    offset: header.executor_offset,
                    buffer_len: buf.len(),
                })?
                .to_vec()
        } else {
            Vec::new()
        };

        let bytecode_start = header.bytecode_start(buf.len())? as usize;
        let string_table_offset = header.string_table_offset as usize;
        let bytecode = buf
            .get(bytecode_start..string_table_offset)
            .ok_or(ContainerError::InvalidOffset {
                field: "string_table_offset",
                offset: header.string_table_offset,
                buffer_len: buf.len(),
            })?
            .to_vec();

        let data_section_offset = header.data_section_offset as usize;
        let strings =
            StringTable::deserialize(&buf[string_table_offset..data_section_offset])?;

        let wgsl_table_offset = header.wgsl_table_offset as usize;
        let data = DataSection::deserialize(&buf[data_section_offset..wgsl_table_offset])?;

        let uniform_table_offset = header.uniform_table_offset as usize;
        let wgsl = WgslTable::deserialize(&buf[wgsl_table_offset..uniform_table_offset]);

        let animation_table_offset = header.animation_table_offset as usize;
        let uniforms =
            AuxTable::from_bytes(buf[uniform_table_offset..animation_table_offset].to_vec());
        let animations = AuxTable::from_bytes(buf[animation_table_offset..].to_vec());

        Ok(Self::new(
            header, executor, bytecode, strings, data, wgsl, uniforms, animations,
        ))
    }

    /// Human-readable dump of section sizes, useful for debugging a
    /// decoded container without pulling in a full disassembler.
    pub fn describe(&self) -> alloc::string::String {
        alloc::format!(
            "PNGB v{} ({} bytes executor, {} bytes bytecode, {} strings, {} data entries, {} wgsl entries)",
            self.header.source_version,
            self.executor.len(),
            self.bytecode.len(),
            self.strings.count(),
            self.data.count(),
            self.wgsl.count(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    #[test]
    fn empty_module_round_trips() {
        let mut builder = Builder::new();
        builder.intern_string(b"test").unwrap();
        let bytes = builder.finalize();

        let module = Module::deserialize(&bytes).unwrap();
        assert_eq!(module.header().source_version, 5);
        assert_eq!(module.strings().count(), 1);
        assert_eq!(module.strings().get(pngine_types::StringId::new(0)), b"test");
    }

    #[test]
    fn serialize_is_stable_across_a_round_trip() {
        let mut builder = Builder::new();
        builder.intern_string(b"a").unwrap();
        builder.add_data(b"hello world").unwrap();
        let bytes = builder.finalize();

        let module = Module::deserialize(&bytes).unwrap();
        assert_eq!(module.serialize(), bytes);
    }
}
