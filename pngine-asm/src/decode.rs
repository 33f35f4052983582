//! Turns a byte slice back into [`Instruction`] values, one opcode at a
//! time. The decoder never interprets resource ids beyond parsing them as
//! plain `u32`s; see the module doc on [`crate::Instruction`].

use alloc::vec::Vec;

use crate::cursor::Cursor;
use crate::error::InstructionDecodeError;
use crate::instruction::Instruction;
use crate::opcode::Opcode;
use crate::params::{ElementType, LoadOp, PassType, StoreOp};
use crate::wasm_args;

/// Decodes a single instruction from the front of `bytes`, returning it
/// alongside the number of bytes consumed.
///
/// `bytes` must begin on an opcode boundary; this function does not scan
/// for one.
pub fn decode_instruction(bytes: &[u8]) -> Result<(Instruction, usize), InstructionDecodeError> {
    let opcode_byte = *bytes
        .first()
        .ok_or(InstructionDecodeError::TruncatedParameter { opcode: 0 })?;
    let opcode = Opcode::try_from(opcode_byte).map_err(InstructionDecodeError::InvalidOpcode)?;
    let mut cursor = Cursor::new(&bytes[1..], opcode_byte);
    let instruction = decode_body(opcode, opcode_byte, &mut cursor)?;
    Ok((instruction, 1 + cursor.position()))
}

fn array_of_varints(
    cursor: &mut Cursor<'_>,
    opcode: u8,
    count: usize,
) -> Result<Vec<u32>, InstructionDecodeError> {
    let mut out = Vec::with_capacity(count);
    for index in 0..count {
        let value = cursor
            .varint()
            .map_err(|_| InstructionDecodeError::TruncatedArray {
                opcode,
                count,
                index,
            })?;
        out.push(value);
    }
    Ok(out)
}

#[allow(clippy::too_many_lines)]
fn decode_body(
    opcode: Opcode,
    opcode_byte: u8,
    c: &mut Cursor<'_>,
) -> Result<Instruction, InstructionDecodeError> {
    Ok(match opcode {
        Opcode::Nop => Instruction::Nop,
        Opcode::CreateBuffer => Instruction::CreateBuffer {
            id: c.varint()?,
            size: c.varint()?,
            usage: c.byte()?,
        },
        Opcode::CreateTexture => Instruction::CreateTexture {
            id: c.varint()?,
            desc_data_id: c.varint()?,
        },
        Opcode::CreateSampler => Instruction::CreateSampler {
            id: c.varint()?,
            desc_data_id: c.varint()?,
        },
        Opcode::CreateShaderModule => Instruction::CreateShaderModule {
            id: c.varint()?,
            code_data_id: c.varint()?,
        },
        Opcode::CreateShaderConcat => {
            let id = c.varint()?;
            let n = c.byte()? as usize;
            let data_ids = array_of_varints(c, opcode_byte, n)?;
            Instruction::CreateShaderConcat { id, data_ids }
        }
        Opcode::CreateBindGroupLayout => Instruction::CreateBindGroupLayout {
            id: c.varint()?,
            desc_data_id: c.varint()?,
        },
        Opcode::CreatePipelineLayout => Instruction::CreatePipelineLayout {
            id: c.varint()?,
            desc_data_id: c.varint()?,
        },
        Opcode::CreateRenderPipeline => Instruction::CreateRenderPipeline {
            id: c.varint()?,
            desc_data_id: c.varint()?,
        },
        Opcode::CreateComputePipeline => Instruction::CreateComputePipeline {
            id: c.varint()?,
            desc_data_id: c.varint()?,
        },
        Opcode::CreateBindGroup => Instruction::CreateBindGroup {
            id: c.varint()?,
            layout_id: c.varint()?,
            entries_data_id: c.varint()?,
        },
        Opcode::CreateImageBitmap => Instruction::CreateImageBitmap {
            id: c.varint()?,
            blob_data_id: c.varint()?,
        },
        Opcode::CreateTextureView => Instruction::CreateTextureView {
            id: c.varint()?,
            texture_id: c.varint()?,
            desc_data_id: c.varint()?,
        },
        Opcode::CreateQuerySet => Instruction::CreateQuerySet {
            id: c.varint()?,
            desc_data_id: c.varint()?,
        },
        Opcode::BeginRenderPass => {
            let color_tex = c.varint()?;
            let load = LoadOp::from_opcode_byte(c.byte()?, opcode_byte, "load")?;
            let store = StoreOp::from_opcode_byte(c.byte()?, opcode_byte, "store")?;
            let depth_tex = c.varint()?;
            Instruction::BeginRenderPass {
                color_tex,
                load,
                store,
                depth_tex,
            }
        }
        Opcode::BeginComputePass => Instruction::BeginComputePass,
        Opcode::SetPipeline => Instruction::SetPipeline {
            pipeline_id: c.varint()?,
        },
        Opcode::SetBindGroup => Instruction::SetBindGroup {
            slot: c.byte()?,
            group_id: c.varint()?,
        },
        Opcode::SetVertexBuffer => Instruction::SetVertexBuffer {
            slot: c.byte()?,
            buffer_id: c.varint()?,
        },
        Opcode::SetIndexBuffer => Instruction::SetIndexBuffer {
            buffer_id: c.varint()?,
            format: c.byte()?,
        },
        Opcode::Draw => Instruction::Draw {
            vertex_count: c.varint()?,
            instance_count: c.varint()?,
            first_vertex: c.varint()?,
            first_instance: c.varint()?,
        },
        Opcode::DrawIndexed => Instruction::DrawIndexed {
            index_count: c.varint()?,
            instance_count: c.varint()?,
            first_index: c.varint()?,
            base_vertex: c.varint()?,
            first_instance: c.varint()?,
        },
        Opcode::Dispatch => Instruction::Dispatch {
            x: c.varint()?,
            y: c.varint()?,
            z: c.varint()?,
        },
        Opcode::EndPass => Instruction::EndPass,
        Opcode::WriteBuffer => Instruction::WriteBuffer {
            buffer_id: c.varint()?,
            offset: c.varint()?,
            data_id: c.varint()?,
        },
        Opcode::WriteUniform => Instruction::WriteUniform {
            buffer_id: c.varint()?,
            uniform_id: c.varint()?,
        },
        Opcode::CopyBufferToBuffer => Instruction::CopyBufferToBuffer {
            src: c.varint()?,
            src_off: c.varint()?,
            dst: c.varint()?,
            dst_off: c.varint()?,
            size: c.varint()?,
        },
        Opcode::CopyTextureToTexture => Instruction::CopyTextureToTexture {
            src_tex: c.varint()?,
            dst_tex: c.varint()?,
        },
        Opcode::Submit => Instruction::Submit,
        Opcode::CopyExternalImageToTexture => Instruction::CopyExternalImageToTexture {
            bitmap_id: c.varint()?,
            texture_id: c.varint()?,
            mip: c.byte()?,
            origin_x: c.varint()?,
            origin_y: c.varint()?,
        },
        Opcode::InitWasmModule => Instruction::InitWasmModule {
            module_id: c.varint()?,
            wasm_data_id: c.varint()?,
        },
        Opcode::CallWasmFunc => {
            let call_id = c.varint()?;
            let module_id = c.varint()?;
            let func_name_string_id = c.varint()?;
            let args_blob = c.remainder().to_vec();
            // Validate eagerly so a malformed blob is caught at decode
            // time rather than when `wasm_args::decode_blob` is later
            // called by a replay engine.
            wasm_args::decode_blob(&args_blob)?;
            Instruction::CallWasmFunc {
                call_id,
                module_id,
                func_name_string_id,
                args_blob,
            }
        }
        Opcode::WriteBufferFromWasm => Instruction::WriteBufferFromWasm {
            call_id: c.varint()?,
            buffer_id: c.varint()?,
            offset: c.varint()?,
            byte_len: c.varint()?,
        },
        Opcode::WriteBufferFromArray => Instruction::WriteBufferFromArray {
            buffer_id: c.varint()?,
            offset: c.varint()?,
            array_id: c.varint()?,
        },
        Opcode::ExecuteBundles => {
            let n = c.varint()? as usize;
            let bundle_ids = array_of_varints(c, opcode_byte, n)?;
            Instruction::ExecuteBundles { bundle_ids }
        }
        Opcode::DefineFrame => Instruction::DefineFrame {
            frame_id: c.varint()?,
            name_string_id: c.varint()?,
        },
        Opcode::EndFrame => Instruction::EndFrame,
        Opcode::ExecPass => Instruction::ExecPass {
            pass_id: c.varint()?,
        },
        Opcode::DefinePass => {
            let pass_id = c.varint()?;
            let pass_type = PassType::from_opcode_byte(c.byte()?, opcode_byte, "pass_type")?;
            let desc_data_id = c.varint()?;
            Instruction::DefinePass {
                pass_id,
                pass_type,
                desc_data_id,
            }
        }
        Opcode::EndPassDef => Instruction::EndPassDef,
        Opcode::SelectFromPool => Instruction::SelectFromPool {
            dest_slot: c.byte()?,
            pool_id: c.varint()?,
            frame_offset: c.varint()?,
        },
        Opcode::SetVertexBufferPool => Instruction::SetVertexBufferPool {
            slot: c.byte()?,
            base_id: c.varint()?,
            pool_size: c.byte()?,
            offset: c.byte()?,
        },
        Opcode::SetBindGroupPool => Instruction::SetBindGroupPool {
            slot: c.byte()?,
            base_id: c.varint()?,
            pool_size: c.byte()?,
            offset: c.byte()?,
        },
        Opcode::CreateTypedArray => {
            let id = c.varint()?;
            let element_type =
                ElementType::from_opcode_byte(c.byte()?, opcode_byte, "element_type")?;
            let element_count = c.varint()?;
            Instruction::CreateTypedArray {
                id,
                element_type,
                element_count,
            }
        }
        Opcode::FillConstant => Instruction::FillConstant {
            id: c.varint()?,
            off: c.varint()?,
            n: c.varint()?,
            stride: c.byte()?,
            value_data_id: c.varint()?,
        },
        Opcode::FillRandom => Instruction::FillRandom {
            id: c.varint()?,
            off: c.varint()?,
            n: c.varint()?,
            stride: c.byte()?,
            seed_data_id: c.varint()?,
            min_data_id: c.varint()?,
            max_data_id: c.varint()?,
        },
        Opcode::FillLinear => Instruction::FillLinear {
            id: c.varint()?,
            off: c.varint()?,
            n: c.varint()?,
            stride: c.byte()?,
            start_data_id: c.varint()?,
            step_data_id: c.varint()?,
        },
        Opcode::FillElementIndex => Instruction::FillElementIndex {
            id: c.varint()?,
            off: c.varint()?,
            n: c.varint()?,
            stride: c.byte()?,
            scale_data_id: c.varint()?,
            bias_data_id: c.varint()?,
        },
        Opcode::FillExpression => Instruction::FillExpression {
            id: c.varint()?,
            off: c.varint()?,
            n: c.varint()?,
            stride: c.byte()?,
            expr_data_id: c.varint()?,
        },
        Opcode::WriteTimeUniform => Instruction::WriteTimeUniform {
            buffer_id: c.varint()?,
            offset: c.varint()?,
            size: c.varint()?,
        },
    })
}

/// Iterates over every instruction in a bytecode section, stopping at the
/// first decode error or when the buffer is exhausted.
pub struct InstructionIter<'a> {
    remaining: &'a [u8],
    failed: bool,
}

impl<'a> InstructionIter<'a> {
    /// Creates an iterator over `bytecode`, which must start on an opcode
    /// boundary.
    pub fn new(bytecode: &'a [u8]) -> Self {
        Self {
            remaining: bytecode,
            failed: false,
        }
    }
}

impl<'a> Iterator for InstructionIter<'a> {
    type Item = Result<Instruction, InstructionDecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }
        match decode_instruction(self.remaining) {
            Ok((instruction, consumed)) => {
                self.remaining = &self.remaining[consumed..];
                Some(Ok(instruction))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Decodes every instruction in `bytecode` into a `Vec`, stopping at the
/// first error.
pub fn decode_all(bytecode: &[u8]) -> Result<Vec<Instruction>, InstructionDecodeError> {
    InstructionIter::new(bytecode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::Emitter;

    #[test]
    fn decodes_a_single_draw() {
        let mut e = Emitter::new();
        e.draw(3, 1, 0, 0).unwrap();
        let (instruction, consumed) = decode_instruction(e.as_bytes()).unwrap();
        assert_eq!(consumed, e.as_bytes().len());
        assert_eq!(
            instruction,
            Instruction::Draw {
                vertex_count: 3,
                instance_count: 1,
                first_vertex: 0,
                first_instance: 0,
            }
        );
    }

    #[test]
    fn decode_all_round_trips_a_small_program() {
        let mut e = Emitter::new();
        e.begin_compute_pass();
        e.dispatch(4, 4, 1).unwrap();
        e.end_pass();
        e.submit();
        let instructions = decode_all(e.as_bytes()).unwrap();
        assert_eq!(
            instructions,
            [
                Instruction::BeginComputePass,
                Instruction::Dispatch { x: 4, y: 4, z: 1 },
                Instruction::EndPass,
                Instruction::Submit,
            ]
        );
    }

    #[test]
    fn rejects_reserved_opcode_byte() {
        let err = decode_instruction(&[0x0e]).unwrap_err();
        assert!(matches!(err, InstructionDecodeError::InvalidOpcode(_)));
    }

    #[test]
    fn truncated_stream_reports_the_offending_opcode() {
        let err = decode_instruction(&[0x01, 0x05]).unwrap_err();
        assert!(matches!(
            err,
            InstructionDecodeError::TruncatedParameter { opcode: 0x01 }
        ));
    }

    #[test]
    fn truncated_array_reports_index() {
        // create_shader_concat with n=2 but only one data_id present.
        let err = decode_instruction(&[0x05, 0x01, 0x02, 0x07]).unwrap_err();
        assert_eq!(
            err,
            InstructionDecodeError::TruncatedArray {
                opcode: 0x05,
                count: 2,
                index: 1,
            }
        );
    }
}
