//! The opcode byte. One variant per assigned opcode;
//! everything outside this table is reserved.

use core::fmt;

/// Failure converting a raw byte into a known [`Opcode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[cfg_attr(feature = "std", error("opcode byte 0x{0:02x} is reserved or unassigned"))]
pub struct InvalidOpcode(pub u8);

#[cfg(not(feature = "std"))]
impl fmt::Display for InvalidOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "opcode byte 0x{:02x} is reserved or unassigned", self.0)
    }
}

macro_rules! define_opcodes {
    ($(
        $(#[$meta:meta])*
        $hex:literal $Name:ident $mnemonic:literal
    ),* $(,)?) => {
        /// A single assigned opcode byte.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(u8)]
        #[non_exhaustive]
        pub enum Opcode {
            $(
                $(#[$meta])*
                $Name = $hex,
            )*
        }

        impl Opcode {
            /// The lower-case mnemonic used in diagnostics and in the
            /// `Display` impl for decoded instructions.
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $(Self::$Name => $mnemonic,)*
                }
            }
        }

        impl TryFrom<u8> for Opcode {
            type Error = InvalidOpcode;

            fn try_from(byte: u8) -> Result<Self, Self::Error> {
                match byte {
                    $($hex => Ok(Self::$Name),)*
                    other => Err(InvalidOpcode(other)),
                }
            }
        }

        impl From<Opcode> for u8 {
            fn from(op: Opcode) -> u8 {
                op as u8
            }
        }
    };
}

define_opcodes! {
    /// Reserved; invalid at replay.
    0x00 Nop "nop",
    /// `id:v, size:v, usage:b`.
    0x01 CreateBuffer "create_buffer",
    /// `id:v, desc_data_id:v`.
    0x02 CreateTexture "create_texture",
    /// `id:v, desc_data_id:v`.
    0x03 CreateSampler "create_sampler",
    /// `id:v, code_data_id:v`.
    0x04 CreateShaderModule "create_shader_module",
    /// `id:v, n:b, data_id[n]:v`, `1 <= n <= 255`.
    0x05 CreateShaderConcat "create_shader_concat",
    /// `id:v, desc_data_id:v`.
    0x06 CreateBindGroupLayout "create_bind_group_layout",
    /// `id:v, desc_data_id:v`.
    0x07 CreatePipelineLayout "create_pipeline_layout",
    /// `id:v, desc_data_id:v`.
    0x08 CreateRenderPipeline "create_render_pipeline",
    /// `id:v, desc_data_id:v`.
    0x09 CreateComputePipeline "create_compute_pipeline",
    /// `id:v, layout_id:v, entries_data_id:v`.
    0x0A CreateBindGroup "create_bind_group",
    /// `id:v, blob_data_id:v`.
    0x0B CreateImageBitmap "create_image_bitmap",
    /// `id:v, texture_id:v, desc_data_id:v`.
    0x0C CreateTextureView "create_texture_view",
    /// `id:v, desc_data_id:v`.
    0x0D CreateQuerySet "create_query_set",
    /// `color_tex:v, load:b, store:b, depth_tex:v`.
    0x10 BeginRenderPass "begin_render_pass",
    /// No parameters.
    0x11 BeginComputePass "begin_compute_pass",
    /// `pipeline_id:v`.
    0x12 SetPipeline "set_pipeline",
    /// `slot:b, group_id:v`.
    0x13 SetBindGroup "set_bind_group",
    /// `slot:b, buffer_id:v`.
    0x14 SetVertexBuffer "set_vertex_buffer",
    /// `buffer_id:v, format:b`.
    0x15 SetIndexBuffer "set_index_buffer",
    /// `vertex_count:v, instance_count:v, first_vertex:v, first_instance:v`.
    0x16 Draw "draw",
    /// `index_count:v, instance_count:v, first_index:v, base_vertex:v, first_instance:v`.
    0x17 DrawIndexed "draw_indexed",
    /// `x:v, y:v, z:v`.
    0x18 Dispatch "dispatch",
    /// No parameters.
    0x19 EndPass "end_pass",
    /// `buffer_id:v, offset:v, data_id:v`.
    0x20 WriteBuffer "write_buffer",
    /// `buffer_id:v, uniform_id:v`.
    0x21 WriteUniform "write_uniform",
    /// `src:v, src_off:v, dst:v, dst_off:v, size:v`.
    0x22 CopyBufferToBuffer "copy_buffer_to_buffer",
    /// `src_tex:v, dst_tex:v`.
    0x23 CopyTextureToTexture "copy_texture_to_texture",
    /// No parameters.
    0x24 Submit "submit",
    /// `bitmap_id:v, texture_id:v, mip:b, origin_x:v, origin_y:v`.
    0x25 CopyExternalImageToTexture "copy_external_image_to_texture",
    /// `module_id:v, wasm_data_id:v`.
    0x26 InitWasmModule "init_wasm_module",
    /// `call_id:v, module_id:v, func_name_string_id:v, args_blob:raw`.
    0x27 CallWasmFunc "call_wasm_func",
    /// `call_id:v, buffer_id:v, offset:v, byte_len:v`.
    0x28 WriteBufferFromWasm "write_buffer_from_wasm",
    /// `buffer_id:v, offset:v, array_id:v`.
    0x29 WriteBufferFromArray "write_buffer_from_array",
    /// `n:v, bundle_id[n]:v`, `1 <= n <= 16`.
    0x2A ExecuteBundles "execute_bundles",
    /// `frame_id:v, name_string_id:v`.
    0x30 DefineFrame "define_frame",
    /// No parameters.
    0x31 EndFrame "end_frame",
    /// `pass_id:v`.
    0x32 ExecPass "exec_pass",
    /// `pass_id:v, pass_type:b, desc_data_id:v`, `pass_type in {0=render, 1=compute}`.
    0x33 DefinePass "define_pass",
    /// No parameters.
    0x34 EndPassDef "end_pass_def",
    /// `dest_slot:b, pool_id:v, frame_offset:v`.
    0x40 SelectFromPool "select_from_pool",
    /// `slot:b, base_id:v, pool_size:b, offset:b`.
    0x41 SetVertexBufferPool "set_vertex_buffer_pool",
    /// `slot:b, base_id:v, pool_size:b, offset:b`.
    0x42 SetBindGroupPool "set_bind_group_pool",
    /// `id:v, element_type:b, element_count:v`.
    0x50 CreateTypedArray "create_typed_array",
    /// `id:v, off:v, n:v, stride:b, value_data_id:v`.
    0x51 FillConstant "fill_constant",
    /// `id:v, off:v, n:v, stride:b, seed_data_id:v, min_data_id:v, max_data_id:v`.
    0x52 FillRandom "fill_random",
    /// `id:v, off:v, n:v, stride:b, start_data_id:v, step_data_id:v`.
    0x53 FillLinear "fill_linear",
    /// `id:v, off:v, n:v, stride:b, scale_data_id:v, bias_data_id:v`.
    0x54 FillElementIndex "fill_element_index",
    /// `id:v, off:v, n:v, stride:b, expr_data_id:v`.
    0x55 FillExpression "fill_expression",
    /// `buffer_id:v, offset:v, size:v`.
    0x56 WriteTimeUniform "write_time_uniform",
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn roundtrips_through_u8() {
        for op in Opcode::iter() {
            let byte: u8 = op.into();
            assert_eq!(Opcode::try_from(byte), Ok(op));
        }
    }

    #[test]
    fn reserved_byte_is_rejected() {
        assert_eq!(Opcode::try_from(0x0e), Err(InvalidOpcode(0x0e)));
        assert_eq!(Opcode::try_from(0xff), Err(InvalidOpcode(0xff)));
    }

    #[test]
    fn create_shader_module_is_0x04() {
        assert_eq!(Opcode::CreateShaderModule as u8, 0x04);
    }
}
