//! PNGine: a two-pass assembler turning a parsed PBSF s-expression tree
//! into a serialized PNGB v5 container.
//!
//! This crate owns the assembler itself (the `$<prefix>:<u16>`
//! resource-id grammar, duplicate/undefined-resource checking, and the
//! collect/emit walk over the tree) plus a re-export surface wide
//! enough that a caller never needs to depend on `pngine-types`,
//! `pngine-asm`, or `pngine-container` directly. The tree this crate
//! consumes is assumed to already be parsed; see [`Sexpr`] for the
//! minimal shape a lexer/parser must produce.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

mod assembler;
mod error;
mod resource_id;
mod sexpr;

pub use assembler::Assembler;
pub use error::{AssembleError, DecodeError, InvalidResourceId};
pub use resource_id::{AutoIndexer, DuplicateTracker, ResourceId, ResourceKind, MAX_RESOURCES};
pub use sexpr::Sexpr;

pub use pngine_asm::{
    BufferUsage, ElementType, Emitter, InstructionDecodeError, LoadOp, Opcode, PassType, Plugins,
    StoreOp,
};
pub use pngine_container::{
    AuxTable, Builder, ContainerError, DataSection, FinalizeOptions, Header, Module, StringTable,
    WgslEntry, WgslTable, MAGIC, VERSION,
};
pub use pngine_types::{
    BindGroupId, BindGroupLayoutId, BufferId, DataId, FrameId, ImageBitmapId, PassId, PipelineId,
    PipelineLayoutId, QuerySetId, RenderBundleId, SamplerId, ShaderId, StringId, TextureId,
    TextureViewId, TypedArrayId, WasmCallId, WasmModuleId, WgslId,
};

/// Assembles a parsed s-expression tree into a serialized PNGB buffer.
/// Sugar over [`Assembler::assemble`].
pub fn assemble(forms: &[Sexpr]) -> Result<alloc::vec::Vec<u8>, AssembleError> {
    Assembler::assemble(forms)
}

/// Decodes a serialized PNGB buffer into a [`Module`].
pub fn decode(buf: &[u8]) -> Result<Module, DecodeError> {
    Module::deserialize(buf)
}
