//! The PNGB v5 binary container: string/data/WGSL/auxiliary tables, the
//! fixed-size header codec (with v4-compat promotion on decode), and the
//! builder that ties them to the bytecode emitter from `pngine-asm`.
//!
//! Section order on disk: header → optional executor → bytecode →
//! string table → data section → WGSL table → uniform table →
//! animation table → EOF. [`Builder`] populates everything but the
//! header itself and produces a single serialized buffer on
//! [`Builder::finalize`]; [`Module::deserialize`] is its inverse.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

mod aux;
mod builder;
mod data_section;
mod error;
mod header;
mod module;
mod string_table;
mod wgsl_table;

pub use aux::AuxTable;
pub use builder::{Builder, FinalizeOptions};
pub use data_section::DataSection;
pub use error::{BuilderError, ContainerError, DataSectionError, StringTableError, WgslTableError};
pub use header::{
    Header, FLAG_HAS_ANIMATION_TABLE, FLAG_HAS_EMBEDDED_EXECUTOR, MAGIC, V4_HEADER_SIZE,
    V5_HEADER_SIZE, VERSION,
};
pub use module::Module;
pub use string_table::StringTable;
pub use wgsl_table::{WgslEntry, WgslTable};
