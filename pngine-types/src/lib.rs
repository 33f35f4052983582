//! Primitive wire types shared by the PNGine assembler, container and
//! bytecode crates.
//!
//! This crate owns exactly two things: the three-width varint codec used
//! everywhere a `u32` crosses the wire, and the family of dense `u16`
//! resource-id newtypes that keep strings, blobs, buffers, textures and
//! the rest from being mixed up at call sites. Nothing here allocates
//! beyond the caller-supplied buffers it is handed.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub(crate) use alloc::vec::Vec;

mod ids;
mod varint;

pub use ids::{
    BindGroupId,
    BindGroupLayoutId,
    BufferId,
    DataId,
    FrameId,
    ImageBitmapId,
    PassId,
    PipelineId,
    PipelineLayoutId,
    QuerySetId,
    RenderBundleId,
    SamplerId,
    ShaderId,
    StringId,
    TextureId,
    TextureViewId,
    TypedArrayId,
    WasmCallId,
    WasmModuleId,
    WgslId,
};
pub use varint::{decode, encode, encode_vec, write, DecodeError, MAX_ENCODED_LEN};
