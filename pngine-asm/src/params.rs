//! Small closed enumerations carried as single-byte opcode parameters.

use crate::error::InstructionDecodeError;

/// `begin_render_pass`'s `load:b` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LoadOp {
    /// Preserve the attachment's existing contents.
    Load = 0,
    /// Clear the attachment before the pass.
    Clear = 1,
}

/// `begin_render_pass`'s `store:b` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum StoreOp {
    /// Persist the attachment's contents after the pass.
    Store = 0,
    /// Discard the attachment's contents after the pass.
    Discard = 1,
}

/// `define_pass`'s `pass_type:b` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PassType {
    /// Render pass.
    Render = 0,
    /// Compute pass.
    Compute = 1,
}

/// `create_typed_array`'s `element_type:b` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ElementType {
    /// 32-bit IEEE float.
    F32 = 0,
    /// Signed 32-bit integer.
    I32 = 1,
    /// Unsigned 32-bit integer.
    U32 = 2,
    /// 16-bit IEEE float.
    F16 = 3,
    /// Two-component float vector.
    Vec2F = 4,
    /// Three-component float vector.
    Vec3F = 5,
    /// Four-component float vector.
    Vec4F = 6,
    /// 4x4 float matrix.
    Mat4X4F = 7,
}

macro_rules! byte_enum_from_opcode_param {
    ($Name:ident { $($Variant:ident = $val:literal),* $(,)? }) => {
        impl $Name {
            /// Parses the byte for `field` of `opcode`, producing
            /// [`InstructionDecodeError::InvalidParameterValue`] on an
            /// out-of-range value.
            pub(crate) fn from_opcode_byte(
                byte: u8,
                opcode: u8,
                field: &'static str,
            ) -> Result<Self, InstructionDecodeError> {
                match byte {
                    $($val => Ok(Self::$Variant),)*
                    value => Err(InstructionDecodeError::InvalidParameterValue {
                        opcode,
                        field,
                        value,
                    }),
                }
            }
        }
    };
}

byte_enum_from_opcode_param!(LoadOp { Load = 0, Clear = 1 });
byte_enum_from_opcode_param!(StoreOp { Store = 0, Discard = 1 });
byte_enum_from_opcode_param!(PassType { Render = 0, Compute = 1 });
byte_enum_from_opcode_param!(ElementType {
    F32 = 0,
    I32 = 1,
    U32 = 2,
    F16 = 3,
    Vec2F = 4,
    Vec3F = 5,
    Vec4F = 6,
    Mat4X4F = 7,
});

/// Sentinel `depth_tex` value in `begin_render_pass` meaning "no depth
/// attachment".
pub const NO_DEPTH_TEXTURE: u32 = 0xFFFF;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_store_roundtrip() {
        assert_eq!(LoadOp::from_opcode_byte(0, 0x10, "load"), Ok(LoadOp::Load));
        assert_eq!(LoadOp::from_opcode_byte(1, 0x10, "load"), Ok(LoadOp::Clear));
        assert_eq!(
            StoreOp::from_opcode_byte(0, 0x10, "store"),
            Ok(StoreOp::Store)
        );
        assert_eq!(
            StoreOp::from_opcode_byte(1, 0x10, "store"),
            Ok(StoreOp::Discard)
        );
    }

    #[test]
    fn out_of_range_load_is_rejected() {
        assert_eq!(
            LoadOp::from_opcode_byte(2, 0x10, "load"),
            Err(InstructionDecodeError::InvalidParameterValue {
                opcode: 0x10,
                field: "load",
                value: 2,
            })
        );
    }
}
