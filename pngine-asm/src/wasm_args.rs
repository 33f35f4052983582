//! The `call_wasm_func` (opcode `0x27`) trailing `args_blob:raw` layout:
//! `count:b, (type:b, value?)*`.

use alloc::vec::Vec;

use crate::error::InstructionDecodeError;

const OPCODE: u8 = 0x27;

/// One argument passed to an embedded WASM function call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WasmArg {
    /// `0x00`, a literal `f32` constant (4 LE bytes follow).
    LiteralF32(f32),
    /// `0x01`, the canvas width at replay time. No payload.
    CanvasWidth,
    /// `0x02`, the canvas height at replay time. No payload.
    CanvasHeight,
    /// `0x03`, total elapsed time at replay time. No payload.
    TimeTotal,
    /// `0x04`, a literal `i32` constant (4 LE bytes follow).
    LiteralI32(i32),
    /// `0x05`, a literal `u32` constant (4 LE bytes follow).
    LiteralU32(u32),
    /// `0x06`, the delta time since the previous frame. No payload.
    TimeDelta,
}

impl WasmArg {
    fn tag(self) -> u8 {
        match self {
            Self::LiteralF32(_) => 0x00,
            Self::CanvasWidth => 0x01,
            Self::CanvasHeight => 0x02,
            Self::TimeTotal => 0x03,
            Self::LiteralI32(_) => 0x04,
            Self::LiteralU32(_) => 0x05,
            Self::TimeDelta => 0x06,
        }
    }

    /// Appends this argument's wire representation (tag plus any payload)
    /// to `out`.
    pub fn write(self, out: &mut Vec<u8>) {
        out.push(self.tag());
        match self {
            Self::LiteralF32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::LiteralI32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::LiteralU32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Self::CanvasWidth | Self::CanvasHeight | Self::TimeTotal | Self::TimeDelta => {}
        }
    }
}

/// Encodes a full args blob (`count` byte followed by each argument) for
/// direct embedding after `call_wasm_func`'s three leading varints.
pub fn encode_blob(args: &[WasmArg]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + args.len() * 5);
    out.push(args.len() as u8);
    for arg in args {
        arg.write(&mut out);
    }
    out
}

/// Parses a full args blob from the tail of a `call_wasm_func` instruction.
pub fn decode_blob(blob: &[u8]) -> Result<Vec<WasmArg>, InstructionDecodeError> {
    let mut pos = 0usize;
    let truncated = || InstructionDecodeError::TruncatedParameter { opcode: OPCODE };
    let count = *blob.get(pos).ok_or_else(truncated)? as usize;
    pos += 1;
    let mut args = Vec::with_capacity(count);
    for index in 0..count {
        let tag = *blob.get(pos).ok_or_else(|| InstructionDecodeError::TruncatedArray {
            opcode: OPCODE,
            count,
            index,
        })?;
        pos += 1;
        let arg = match tag {
            0x00 => {
                let bytes: [u8; 4] = blob
                    .get(pos..pos + 4)
                    .ok_or_else(truncated)?
                    .try_into()
                    .map_err(|_| truncated())?;
                pos += 4;
                WasmArg::LiteralF32(f32::from_le_bytes(bytes))
            }
            0x01 => WasmArg::CanvasWidth,
            0x02 => WasmArg::CanvasHeight,
            0x03 => WasmArg::TimeTotal,
            0x04 => {
                let bytes: [u8; 4] = blob
                    .get(pos..pos + 4)
                    .ok_or_else(truncated)?
                    .try_into()
                    .map_err(|_| truncated())?;
                pos += 4;
                WasmArg::LiteralI32(i32::from_le_bytes(bytes))
            }
            0x05 => {
                let bytes: [u8; 4] = blob
                    .get(pos..pos + 4)
                    .ok_or_else(truncated)?
                    .try_into()
                    .map_err(|_| truncated())?;
                pos += 4;
                WasmArg::LiteralU32(u32::from_le_bytes(bytes))
            }
            0x06 => WasmArg::TimeDelta,
            value => {
                return Err(InstructionDecodeError::InvalidParameterValue {
                    opcode: OPCODE,
                    field: "args_blob.type",
                    value,
                })
            }
        };
        args.push(arg);
    }
    Ok(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_mixed_args() {
        let args = [
            WasmArg::LiteralF32(1.5),
            WasmArg::CanvasWidth,
            WasmArg::TimeDelta,
            WasmArg::LiteralI32(-7),
            WasmArg::LiteralU32(42),
        ];
        let blob = encode_blob(&args);
        let decoded = decode_blob(&blob).unwrap();
        assert_eq!(decoded, args);
    }

    #[test]
    fn empty_args_encode_to_single_zero_byte() {
        assert_eq!(encode_blob(&[]), alloc::vec![0u8]);
    }
}
