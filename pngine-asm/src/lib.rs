//! The PNGine bytecode instruction set: a typed emitter, a stream
//! decoder, and the closed opcode table they both sit on.
//!
//! Bytecode is produced only through [`Emitter`]'s one-method-per-opcode
//! façade, so a caller can never write a byte sequence the decoder
//! cannot parse back. Decoding is the mirror image: [`decode_instruction`]
//! and [`decode_all`] turn a byte slice into [`Instruction`] values
//! without re-interpreting resource ids beyond range-checking them as
//! `u32`s.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

mod cursor;
mod decode;
mod emit;
mod error;
mod fault;
mod instruction;
mod opcode;
mod params;
mod usage;
mod wasm_args;

pub use decode::{decode_all, decode_instruction, InstructionIter};
pub use emit::{Emitter, DEFAULT_CAPACITY_HINT};
pub use error::InstructionDecodeError;
pub use fault::EmitFault;
pub use instruction::Instruction;
pub use opcode::{InvalidOpcode, Opcode};
pub use params::{ElementType, LoadOp, PassType, StoreOp, NO_DEPTH_TEXTURE};
pub use usage::{BufferUsage, Plugins};
pub use wasm_args::{decode_blob as decode_wasm_args, encode_blob as encode_wasm_args, WasmArg};
