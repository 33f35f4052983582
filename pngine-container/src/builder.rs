//! The container builder: owns C2 (strings), C3 (data), C4 (WGSL), C6
//! (the bytecode emitter), and the two opaque auxiliary tables, and ties
//! them all into a single serialized buffer on `finalize`.

use alloc::vec::Vec;

use pngine_asm::{Emitter, Plugins};
use pngine_types::{DataId, StringId, WgslId};

use crate::aux::AuxTable;
use crate::data_section::DataSection;
use crate::error::BuilderError;
use crate::header::{Header, FLAG_HAS_ANIMATION_TABLE, FLAG_HAS_EMBEDDED_EXECUTOR, VERSION};
use crate::string_table::StringTable;
use crate::wgsl_table::WgslTable;

/// Options accepted by [`Builder::finalize_with_options`].
#[derive(Debug, Default, Clone)]
pub struct FinalizeOptions<'a> {
    /// An embedded WASM executor blob, stored verbatim between the
    /// header and the bytecode section.
    pub executor: Option<&'a [u8]>,
    /// The plugin bitfield to declare in the header. The `core` bit is
    /// always set regardless of what the caller passes.
    pub plugins: Plugins,
}

/// Accumulates the pieces of a container and serializes them once.
#[derive(Debug, Default)]
pub struct Builder {
    strings: StringTable,
    data: DataSection,
    wgsl: WgslTable,
    emitter: Emitter,
    uniforms: AuxTable,
    animations: AuxTable,
}

impl Builder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns a string, see [`StringTable::intern`].
    pub fn intern_string(&mut self, bytes: &[u8]) -> Result<StringId, BuilderError> {
        Ok(self.strings.intern(bytes)?)
    }

    /// Adds a data blob, see [`DataSection::add`].
    pub fn add_data(&mut self, bytes: &[u8]) -> Result<DataId, BuilderError> {
        Ok(self.data.add(bytes)?)
    }

    /// Adds a WGSL dependency entry, see [`WgslTable::add`].
    pub fn add_wgsl(&mut self, data_id: DataId, deps: &[WgslId]) -> Result<WgslId, BuilderError> {
        Ok(self.wgsl.add(data_id, deps)?)
    }

    /// Sets the opaque uniform table's raw bytes.
    pub fn set_uniforms(&mut self, bytes: Vec<u8>) {
        self.uniforms = AuxTable::from_bytes(bytes);
    }

    /// Sets the opaque animation table's raw bytes.
    pub fn set_animations(&mut self, bytes: Vec<u8>) {
        self.animations = AuxTable::from_bytes(bytes);
    }

    /// Read-only access to the bytecode emitter, e.g. to inspect how many
    /// bytes have been written so far.
    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Mutable access to the bytecode emitter, the assembler's main way
    /// of populating the bytecode section.
    pub fn emitter_mut(&mut self) -> &mut Emitter {
        &mut self.emitter
    }

    /// Finalizes the builder with no embedded executor and the
    /// `core`-only plugin set. Sugar over [`Self::finalize_with_options`].
    pub fn finalize(self) -> Vec<u8> {
        self.finalize_with_options(FinalizeOptions::default())
    }

    /// Finalizes the builder into a serialized v5 container buffer,
    /// embedding `options.executor` (if any) and declaring
    /// `options.plugins` (always with the `core` bit forced on).
    #[tracing::instrument(skip(self, options))]
    pub fn finalize_with_options(self, options: FinalizeOptions<'_>) -> Vec<u8> {
        let bytecode = self.emitter.into_bytes();
        let strings_bytes = self.strings.serialize();
        let data_bytes = self.data.serialize();
        let wgsl_bytes = self.wgsl.serialize();

        let has_executor = options.executor.is_some_and(|e| !e.is_empty());
        let executor = options.executor.unwrap_or(&[]);

        let mut flags = 0u16;
        if has_executor {
            flags |= FLAG_HAS_EMBEDDED_EXECUTOR;
        }
        if !self.animations.is_empty() {
            flags |= FLAG_HAS_ANIMATION_TABLE;
        }

        let executor_offset = if has_executor { crate::header::V5_HEADER_SIZE } else { 0 };
        let executor_length = if has_executor { executor.len() as u32 } else { 0 };

        let bytecode_start = executor_offset + executor_length;
        let string_table_offset = bytecode_start + bytecode.len() as u32;
        let data_section_offset = string_table_offset + strings_bytes.len() as u32;
        let wgsl_table_offset = data_section_offset + data_bytes.len() as u32;
        let uniform_table_offset = wgsl_table_offset + wgsl_bytes.len() as u32;
        let animation_table_offset = uniform_table_offset + self.uniforms.len() as u32;

        let header = Header {
            source_version: VERSION,
            header_len: crate::header::V5_HEADER_SIZE,
            flags,
            plugins: options.plugins | Plugins::CORE,
            executor_offset,
            executor_length,
            string_table_offset,
            data_section_offset,
            wgsl_table_offset,
            uniform_table_offset,
            animation_table_offset,
        };

        let mut out = Vec::with_capacity(animation_table_offset as usize + self.animations.len());
        out.extend_from_slice(&header.serialize());
        out.extend_from_slice(executor);
        out.extend_from_slice(&bytecode);
        out.extend_from_slice(&strings_bytes);
        out.extend_from_slice(&data_bytes);
        out.extend_from_slice(&wgsl_bytes);
        out.extend_from_slice(self.uniforms.as_bytes());
        out.extend_from_slice(self.animations.as_bytes());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::Module;

    #[test]
    fn empty_module_has_the_literal_s1_header_shape() {
        let mut builder = Builder::new();
        builder.intern_string(b"test").unwrap();
        let bytes = builder.finalize();

        assert_eq!(&bytes[0..4], b"PNGB");
        assert_eq!(&bytes[4..6], &5u16.to_le_bytes());
        assert_eq!(
            u32::from_le_bytes(bytes[20..24].try_into().unwrap()),
            40
        );
    }

    #[test]
    fn embedded_executor_lands_right_after_the_header() {
        let executor = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
        let builder = Builder::new();
        let bytes = builder.finalize_with_options(FinalizeOptions {
            executor: Some(&executor),
            plugins: Plugins::RENDER | Plugins::COMPUTE,
        });

        assert_ne!(bytes[6] & 0b0000_0001, 0);
        assert_eq!(bytes[8] & 0b0000_0111, 0b0000_0111);
        assert_eq!(&bytes[40..48], &executor);
    }

    #[test]
    fn finalize_then_deserialize_round_trips() {
        let mut builder = Builder::new();
        let data_id = builder.add_data(b"hello world").unwrap();
        builder.add_wgsl(data_id, &[]).unwrap();
        let bytes = builder.finalize();

        let module = Module::deserialize(&bytes).unwrap();
        assert_eq!(module.data().get(data_id), b"hello world");
        assert_eq!(module.wgsl().count(), 1);
    }
}
