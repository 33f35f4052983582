//! A small forward-only byte cursor shared by every opcode's decode arm.

use pngine_types::decode as decode_varint;

use crate::error::InstructionDecodeError;

pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    opcode: u8,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(bytes: &'a [u8], opcode: u8) -> Self {
        Self {
            bytes,
            pos: 0,
            opcode,
        }
    }

    pub(crate) fn varint(&mut self) -> Result<u32, InstructionDecodeError> {
        let (value, len) = decode_varint(&self.bytes[self.pos..]).map_err(|_| {
            InstructionDecodeError::TruncatedParameter {
                opcode: self.opcode,
            }
        })?;
        self.pos += len;
        Ok(value)
    }

    pub(crate) fn byte(&mut self) -> Result<u8, InstructionDecodeError> {
        let b = *self
            .bytes
            .get(self.pos)
            .ok_or(InstructionDecodeError::TruncatedParameter {
                opcode: self.opcode,
            })?;
        self.pos += 1;
        Ok(b)
    }

    /// Every remaining byte, consumed in one go (used for `call_wasm_func`'s
    /// trailing `args_blob:raw`).
    pub(crate) fn remainder(&mut self) -> &'a [u8] {
        let slice = &self.bytes[self.pos..];
        self.pos = self.bytes.len();
        slice
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }
}
