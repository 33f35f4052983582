//! Errors surfaced while decoding a bytecode stream back into
//! [`crate::Instruction`] values.

use core::fmt;

use crate::opcode::InvalidOpcode;

/// Failure decoding an instruction from a byte slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum InstructionDecodeError {
    /// The opcode byte did not match any assigned opcode.
    #[cfg_attr(feature = "std", error(transparent))]
    InvalidOpcode(InvalidOpcode),
    /// The slice ended before a fixed-size (raw byte) or varint parameter
    /// could be read.
    #[cfg_attr(
        feature = "std",
        error("buffer ended while reading a parameter for opcode 0x{opcode:02x}")
    )]
    TruncatedParameter {
        /// The opcode whose parameter could not be read.
        opcode: u8,
    },
    /// A count-prefixed array parameter (e.g. `create_shader_concat`'s
    /// `data_id[n]`) declared more elements than remain in the buffer.
    #[cfg_attr(
        feature = "std",
        error("buffer ended while reading element {index} of a {count}-element array for opcode 0x{opcode:02x}")
    )]
    TruncatedArray {
        /// The opcode whose array parameter could not be read.
        opcode: u8,
        /// Declared element count.
        count: usize,
        /// Index of the element that could not be read.
        index: usize,
    },
    /// A single-byte enum parameter (`load`, `store`, `pass_type`,
    /// `element_type`, ...) held a value outside its closed range.
    #[cfg_attr(
        feature = "std",
        error("opcode 0x{opcode:02x} parameter {field} had out-of-range value {value}")
    )]
    InvalidParameterValue {
        /// The opcode whose parameter was invalid.
        opcode: u8,
        /// Name of the offending parameter.
        field: &'static str,
        /// The raw byte that was read.
        value: u8,
    },
}

#[cfg(not(feature = "std"))]
impl fmt::Display for InstructionDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
