//! The decoded representation of a single bytecode instruction: one
//! variant per [`Opcode`], carrying its wire parameters as plain
//! primitives. Resource ids are not re-wrapped into the
//! `pngine-types` newtypes here — the decoder is deliberately
//! non-interpreting: ids are opaque handles on the wire, and it is
//! the emitter's typed façade that enforces which newtype goes where.

use alloc::vec::Vec;

use crate::opcode::Opcode;
use crate::params::{ElementType, LoadOp, PassType, StoreOp};

/// A single decoded bytecode instruction.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Instruction {
    /// `nop`. Reserved; invalid at replay.
    Nop,
    /// `create_buffer(id, size, usage)`.
    CreateBuffer { id: u32, size: u32, usage: u8 },
    /// `create_texture(id, desc_data_id)`.
    CreateTexture { id: u32, desc_data_id: u32 },
    /// `create_sampler(id, desc_data_id)`.
    CreateSampler { id: u32, desc_data_id: u32 },
    /// `create_shader_module(id, code_data_id)`.
    CreateShaderModule { id: u32, code_data_id: u32 },
    /// `create_shader_concat(id, data_ids)`.
    CreateShaderConcat { id: u32, data_ids: Vec<u32> },
    /// `create_bind_group_layout(id, desc_data_id)`.
    CreateBindGroupLayout { id: u32, desc_data_id: u32 },
    /// `create_pipeline_layout(id, desc_data_id)`.
    CreatePipelineLayout { id: u32, desc_data_id: u32 },
    /// `create_render_pipeline(id, desc_data_id)`.
    CreateRenderPipeline { id: u32, desc_data_id: u32 },
    /// `create_compute_pipeline(id, desc_data_id)`.
    CreateComputePipeline { id: u32, desc_data_id: u32 },
    /// `create_bind_group(id, layout_id, entries_data_id)`.
    CreateBindGroup {
        id: u32,
        layout_id: u32,
        entries_data_id: u32,
    },
    /// `create_image_bitmap(id, blob_data_id)`.
    CreateImageBitmap { id: u32, blob_data_id: u32 },
    /// `create_texture_view(id, texture_id, desc_data_id)`.
    CreateTextureView {
        id: u32,
        texture_id: u32,
        desc_data_id: u32,
    },
    /// `create_query_set(id, desc_data_id)`.
    CreateQuerySet { id: u32, desc_data_id: u32 },
    /// `begin_render_pass(color_tex, load, store, depth_tex)`. `depth_tex
    /// == 0xFFFF` means no depth attachment.
    BeginRenderPass {
        color_tex: u32,
        load: LoadOp,
        store: StoreOp,
        depth_tex: u32,
    },
    /// `begin_compute_pass()`.
    BeginComputePass,
    /// `set_pipeline(pipeline_id)`.
    SetPipeline { pipeline_id: u32 },
    /// `set_bind_group(slot, group_id)`.
    SetBindGroup { slot: u8, group_id: u32 },
    /// `set_vertex_buffer(slot, buffer_id)`.
    SetVertexBuffer { slot: u8, buffer_id: u32 },
    /// `set_index_buffer(buffer_id, format)`.
    SetIndexBuffer { buffer_id: u32, format: u8 },
    /// `draw(vertex_count, instance_count, first_vertex, first_instance)`.
    Draw {
        vertex_count: u32,
        instance_count: u32,
        first_vertex: u32,
        first_instance: u32,
    },
    /// `draw_indexed(index_count, instance_count, first_index, base_vertex, first_instance)`.
    DrawIndexed {
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        base_vertex: u32,
        first_instance: u32,
    },
    /// `dispatch(x, y, z)`.
    Dispatch { x: u32, y: u32, z: u32 },
    /// `end_pass()`.
    EndPass,
    /// `write_buffer(buffer_id, offset, data_id)`.
    WriteBuffer {
        buffer_id: u32,
        offset: u32,
        data_id: u32,
    },
    /// `write_uniform(buffer_id, uniform_id)`.
    WriteUniform { buffer_id: u32, uniform_id: u32 },
    /// `copy_buffer_to_buffer(src, src_off, dst, dst_off, size)`.
    CopyBufferToBuffer {
        src: u32,
        src_off: u32,
        dst: u32,
        dst_off: u32,
        size: u32,
    },
    /// `copy_texture_to_texture(src_tex, dst_tex)`.
    CopyTextureToTexture { src_tex: u32, dst_tex: u32 },
    /// `submit()`.
    Submit,
    /// `copy_external_image_to_texture(bitmap_id, texture_id, mip, origin_x, origin_y)`.
    CopyExternalImageToTexture {
        bitmap_id: u32,
        texture_id: u32,
        mip: u8,
        origin_x: u32,
        origin_y: u32,
    },
    /// `init_wasm_module(module_id, wasm_data_id)`.
    InitWasmModule { module_id: u32, wasm_data_id: u32 },
    /// `call_wasm_func(call_id, module_id, func_name_string_id, args_blob)`.
    /// `args_blob` is carried as raw bytes; use
    /// [`crate::wasm_args::decode_blob`] to interpret it.
    CallWasmFunc {
        call_id: u32,
        module_id: u32,
        func_name_string_id: u32,
        args_blob: Vec<u8>,
    },
    /// `write_buffer_from_wasm(call_id, buffer_id, offset, byte_len)`.
    WriteBufferFromWasm {
        call_id: u32,
        buffer_id: u32,
        offset: u32,
        byte_len: u32,
    },
    /// `write_buffer_from_array(buffer_id, offset, array_id)`.
    WriteBufferFromArray {
        buffer_id: u32,
        offset: u32,
        array_id: u32,
    },
    /// `execute_bundles(bundle_ids)`.
    ExecuteBundles { bundle_ids: Vec<u32> },
    /// `define_frame(frame_id, name_string_id)`.
    DefineFrame { frame_id: u32, name_string_id: u32 },
    /// `end_frame()`.
    EndFrame,
    /// `exec_pass(pass_id)`.
    ExecPass { pass_id: u32 },
    /// `define_pass(pass_id, pass_type, desc_data_id)`.
    DefinePass {
        pass_id: u32,
        pass_type: PassType,
        desc_data_id: u32,
    },
    /// `end_pass_def()`.
    EndPassDef,
    /// `select_from_pool(dest_slot, pool_id, frame_offset)`.
    SelectFromPool {
        dest_slot: u8,
        pool_id: u32,
        frame_offset: u32,
    },
    /// `set_vertex_buffer_pool(slot, base_id, pool_size, offset)`.
    SetVertexBufferPool {
        slot: u8,
        base_id: u32,
        pool_size: u8,
        offset: u8,
    },
    /// `set_bind_group_pool(slot, base_id, pool_size, offset)`.
    SetBindGroupPool {
        slot: u8,
        base_id: u32,
        pool_size: u8,
        offset: u8,
    },
    /// `create_typed_array(id, element_type, element_count)`.
    CreateTypedArray {
        id: u32,
        element_type: ElementType,
        element_count: u32,
    },
    /// `fill_constant(id, off, n, stride, value_data_id)`.
    FillConstant {
        id: u32,
        off: u32,
        n: u32,
        stride: u8,
        value_data_id: u32,
    },
    /// `fill_random(id, off, n, stride, seed_data_id, min_data_id, max_data_id)`.
    FillRandom {
        id: u32,
        off: u32,
        n: u32,
        stride: u8,
        seed_data_id: u32,
        min_data_id: u32,
        max_data_id: u32,
    },
    /// `fill_linear(id, off, n, stride, start_data_id, step_data_id)`.
    FillLinear {
        id: u32,
        off: u32,
        n: u32,
        stride: u8,
        start_data_id: u32,
        step_data_id: u32,
    },
    /// `fill_element_index(id, off, n, stride, scale_data_id, bias_data_id)`.
    FillElementIndex {
        id: u32,
        off: u32,
        n: u32,
        stride: u8,
        scale_data_id: u32,
        bias_data_id: u32,
    },
    /// `fill_expression(id, off, n, stride, expr_data_id)`.
    FillExpression {
        id: u32,
        off: u32,
        n: u32,
        stride: u8,
        expr_data_id: u32,
    },
    /// `write_time_uniform(buffer_id, offset, size)`.
    WriteTimeUniform {
        buffer_id: u32,
        offset: u32,
        size: u32,
    },
}

impl Instruction {
    /// The opcode this instruction was (or will be) tagged with.
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Nop => Opcode::Nop,
            Self::CreateBuffer { .. } => Opcode::CreateBuffer,
            Self::CreateTexture { .. } => Opcode::CreateTexture,
            Self::CreateSampler { .. } => Opcode::CreateSampler,
            Self::CreateShaderModule { .. } => Opcode::CreateShaderModule,
            Self::CreateShaderConcat { .. } => Opcode::CreateShaderConcat,
            Self::CreateBindGroupLayout { .. } => Opcode::CreateBindGroupLayout,
            Self::CreatePipelineLayout { .. } => Opcode::CreatePipelineLayout,
            Self::CreateRenderPipeline { .. } => Opcode::CreateRenderPipeline,
            Self::CreateComputePipeline { .. } => Opcode::CreateComputePipeline,
            Self::CreateBindGroup { .. } => Opcode::CreateBindGroup,
            Self::CreateImageBitmap { .. } => Opcode::CreateImageBitmap,
            Self::CreateTextureView { .. } => Opcode::CreateTextureView,
            Self::CreateQuerySet { .. } => Opcode::CreateQuerySet,
            Self::BeginRenderPass { .. } => Opcode::BeginRenderPass,
            Self::BeginComputePass => Opcode::BeginComputePass,
            Self::SetPipeline { .. } => Opcode::SetPipeline,
            Self::SetBindGroup { .. } => Opcode::SetBindGroup,
            Self::SetVertexBuffer { .. } => Opcode::SetVertexBuffer,
            Self::SetIndexBuffer { .. } => Opcode::SetIndexBuffer,
            Self::Draw { .. } => Opcode::Draw,
            Self::DrawIndexed { .. } => Opcode::DrawIndexed,
            Self::Dispatch { .. } => Opcode::Dispatch,
            Self::EndPass => Opcode::EndPass,
            Self::WriteBuffer { .. } => Opcode::WriteBuffer,
            Self::WriteUniform { .. } => Opcode::WriteUniform,
            Self::CopyBufferToBuffer { .. } => Opcode::CopyBufferToBuffer,
            Self::CopyTextureToTexture { .. } => Opcode::CopyTextureToTexture,
            Self::Submit => Opcode::Submit,
            Self::CopyExternalImageToTexture { .. } => Opcode::CopyExternalImageToTexture,
            Self::InitWasmModule { .. } => Opcode::InitWasmModule,
            Self::CallWasmFunc { .. } => Opcode::CallWasmFunc,
            Self::WriteBufferFromWasm { .. } => Opcode::WriteBufferFromWasm,
            Self::WriteBufferFromArray { .. } => Opcode::WriteBufferFromArray,
            Self::ExecuteBundles { .. } => Opcode::ExecuteBundles,
            Self::DefineFrame { .. } => Opcode::DefineFrame,
            Self::EndFrame => Opcode::EndFrame,
            Self::ExecPass { .. } => Opcode::ExecPass,
            Self::DefinePass { .. } => Opcode::DefinePass,
            Self::EndPassDef => Opcode::EndPassDef,
            Self::SelectFromPool { .. } => Opcode::SelectFromPool,
            Self::SetVertexBufferPool { .. } => Opcode::SetVertexBufferPool,
            Self::SetBindGroupPool { .. } => Opcode::SetBindGroupPool,
            Self::CreateTypedArray { .. } => Opcode::CreateTypedArray,
            Self::FillConstant { .. } => Opcode::FillConstant,
            Self::FillRandom { .. } => Opcode::FillRandom,
            Self::FillLinear { .. } => Opcode::FillLinear,
            Self::FillElementIndex { .. } => Opcode::FillElementIndex,
            Self::FillExpression { .. } => Opcode::FillExpression,
            Self::WriteTimeUniform { .. } => Opcode::WriteTimeUniform,
        }
    }
}
