//! The typed emitter façade: the only way bytecode bytes are
//! produced. Every method here writes `opcode:u8` followed by its
//! declared parameters, in wire order, with no backpatching and no
//! reordering.

use alloc::vec::Vec;

use pngine_types::{
    BindGroupId, BindGroupLayoutId, BufferId, DataId, FrameId, ImageBitmapId, PassId, PipelineId,
    PipelineLayoutId, QuerySetId, RenderBundleId, SamplerId, ShaderId, StringId, TextureId,
    TextureViewId, TypedArrayId, WasmCallId, WasmModuleId,
};

use crate::fault::EmitFault;
use crate::opcode::Opcode;
use crate::params::{ElementType, LoadOp, PassType, StoreOp, NO_DEPTH_TEXTURE};
use crate::usage::BufferUsage;
use crate::wasm_args::{encode_blob, WasmArg};

/// Default capacity hint: enough for a typical single-shader
/// program without reallocating.
pub const DEFAULT_CAPACITY_HINT: usize = 512;

/// Append-only builder over a bytecode byte buffer.
///
/// Bytes may be borrowed from the emitter ([`Emitter::as_bytes`]) or moved
/// out into a standalone buffer ([`Emitter::into_bytes`]); either way the
/// emitter owns the only copy until one of those is called.
#[derive(Debug, Default, Clone)]
pub struct Emitter {
    buf: Vec<u8>,
}

impl Emitter {
    /// Creates an emitter with [`DEFAULT_CAPACITY_HINT`] pre-reserved.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY_HINT)
    }

    /// Creates an emitter with `capacity_hint` bytes pre-reserved.
    pub fn with_capacity(capacity_hint: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity_hint),
        }
    }

    /// Borrows the bytes emitted so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes emitted so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether no instructions have been emitted yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consumes the emitter, returning the emitted bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn op(&mut self, opcode: Opcode) {
        self.buf.push(opcode.into());
    }

    fn v(&mut self, value: u32) {
        pngine_types::write(&mut self.buf, value);
    }

    fn b(&mut self, value: u8) {
        self.buf.push(value);
    }

    fn bytes(&mut self, value: &[u8]) {
        self.buf.extend_from_slice(value);
    }
}

// --- Resource creation (0x00-0x0D) ----------------------------------------

impl Emitter {
    /// `create_buffer(id, size, usage)`. Fails with
    /// [`EmitFault::EmptyBufferUsage`] unless at least one usage flag is
    /// set.
    pub fn create_buffer(
        &mut self,
        id: BufferId,
        size: u32,
        usage: BufferUsage,
    ) -> Result<(), EmitFault> {
        #[cfg(feature = "precondition-checks")]
        if usage.is_empty() {
            tracing::warn!(?id, "create_buffer called with no usage flags set");
            return Err(EmitFault::EmptyBufferUsage);
        }
        self.op(Opcode::CreateBuffer);
        self.v(id.get().into());
        self.v(size);
        self.b(usage.bits());
        Ok(())
    }

    /// `create_texture(id, desc_data_id)`.
    pub fn create_texture(&mut self, id: TextureId, desc_data_id: DataId) {
        self.op(Opcode::CreateTexture);
        self.v(id.get().into());
        self.v(desc_data_id.get().into());
    }

    /// `create_sampler(id, desc_data_id)`.
    pub fn create_sampler(&mut self, id: SamplerId, desc_data_id: DataId) {
        self.op(Opcode::CreateSampler);
        self.v(id.get().into());
        self.v(desc_data_id.get().into());
    }

    /// `create_shader_module(id, code_data_id)`.
    pub fn create_shader_module(&mut self, id: ShaderId, code_data_id: DataId) {
        self.op(Opcode::CreateShaderModule);
        self.v(id.get().into());
        self.v(code_data_id.get().into());
    }

    /// `create_shader_concat(id, data_ids)`. Fails with
    /// [`EmitFault::ShaderConcatCountOutOfRange`] unless
    /// `1 <= data_ids.len() <= 255`.
    pub fn create_shader_concat(
        &mut self,
        id: ShaderId,
        data_ids: &[DataId],
    ) -> Result<(), EmitFault> {
        #[cfg(feature = "precondition-checks")]
        if data_ids.is_empty() || data_ids.len() > 255 {
            return Err(EmitFault::ShaderConcatCountOutOfRange(data_ids.len()));
        }
        self.op(Opcode::CreateShaderConcat);
        self.v(id.get().into());
        self.b(data_ids.len() as u8);
        for data_id in data_ids {
            self.v(data_id.get().into());
        }
        Ok(())
    }

    /// `create_bind_group_layout(id, desc_data_id)`.
    pub fn create_bind_group_layout(&mut self, id: BindGroupLayoutId, desc_data_id: DataId) {
        self.op(Opcode::CreateBindGroupLayout);
        self.v(id.get().into());
        self.v(desc_data_id.get().into());
    }

    /// `create_pipeline_layout(id, desc_data_id)`.
    pub fn create_pipeline_layout(&mut self, id: PipelineLayoutId, desc_data_id: DataId) {
        self.op(Opcode::CreatePipelineLayout);
        self.v(id.get().into());
        self.v(desc_data_id.get().into());
    }

    /// `create_render_pipeline(id, desc_data_id)`.
    pub fn create_render_pipeline(&mut self, id: PipelineId, desc_data_id: DataId) {
        self.op(Opcode::CreateRenderPipeline);
        self.v(id.get().into());
        self.v(desc_data_id.get().into());
    }

    /// `create_compute_pipeline(id, desc_data_id)`.
    pub fn create_compute_pipeline(&mut self, id: PipelineId, desc_data_id: DataId) {
        self.op(Opcode::CreateComputePipeline);
        self.v(id.get().into());
        self.v(desc_data_id.get().into());
    }

    /// `create_bind_group(id, layout_id, entries_data_id)`.
    pub fn create_bind_group(
        &mut self,
        id: BindGroupId,
        layout_id: BindGroupLayoutId,
        entries_data_id: DataId,
    ) {
        self.op(Opcode::CreateBindGroup);
        self.v(id.get().into());
        self.v(layout_id.get().into());
        self.v(entries_data_id.get().into());
    }

    /// `create_image_bitmap(id, blob_data_id)`.
    pub fn create_image_bitmap(&mut self, id: ImageBitmapId, blob_data_id: DataId) {
        self.op(Opcode::CreateImageBitmap);
        self.v(id.get().into());
        self.v(blob_data_id.get().into());
    }

    /// `create_texture_view(id, texture_id, desc_data_id)`.
    pub fn create_texture_view(
        &mut self,
        id: TextureViewId,
        texture_id: TextureId,
        desc_data_id: DataId,
    ) {
        self.op(Opcode::CreateTextureView);
        self.v(id.get().into());
        self.v(texture_id.get().into());
        self.v(desc_data_id.get().into());
    }

    /// `create_query_set(id, desc_data_id)`.
    pub fn create_query_set(&mut self, id: QuerySetId, desc_data_id: DataId) {
        self.op(Opcode::CreateQuerySet);
        self.v(id.get().into());
        self.v(desc_data_id.get().into());
    }
}

// --- Render/compute pass orchestration (0x10-0x2A) -------------------------

impl Emitter {
    /// `begin_render_pass(color_tex, load, store, depth_tex)`. `None`
    /// encodes as the sentinel [`NO_DEPTH_TEXTURE`].
    pub fn begin_render_pass(
        &mut self,
        color_tex: TextureId,
        load: LoadOp,
        store: StoreOp,
        depth_tex: Option<TextureId>,
    ) {
        self.op(Opcode::BeginRenderPass);
        self.v(color_tex.get().into());
        self.b(load as u8);
        self.b(store as u8);
        self.v(depth_tex.map_or(NO_DEPTH_TEXTURE, |id| id.get().into()));
    }

    /// `begin_compute_pass()`.
    pub fn begin_compute_pass(&mut self) {
        self.op(Opcode::BeginComputePass);
    }

    /// `set_pipeline(pipeline_id)`.
    pub fn set_pipeline(&mut self, pipeline_id: PipelineId) {
        self.op(Opcode::SetPipeline);
        self.v(pipeline_id.get().into());
    }

    /// `set_bind_group(slot, group_id)`.
    pub fn set_bind_group(&mut self, slot: u8, group_id: BindGroupId) {
        self.op(Opcode::SetBindGroup);
        self.b(slot);
        self.v(group_id.get().into());
    }

    /// `set_vertex_buffer(slot, buffer_id)`.
    pub fn set_vertex_buffer(&mut self, slot: u8, buffer_id: BufferId) {
        self.op(Opcode::SetVertexBuffer);
        self.b(slot);
        self.v(buffer_id.get().into());
    }

    /// `set_index_buffer(buffer_id, format)`.
    pub fn set_index_buffer(&mut self, buffer_id: BufferId, format: u8) {
        self.op(Opcode::SetIndexBuffer);
        self.v(buffer_id.get().into());
        self.b(format);
    }

    /// `draw(vertex_count, instance_count, first_vertex, first_instance)`.
    /// Fails unless `vertex_count >= 1` and `instance_count >= 1`.
    pub fn draw(
        &mut self,
        vertex_count: u32,
        instance_count: u32,
        first_vertex: u32,
        first_instance: u32,
    ) -> Result<(), EmitFault> {
        #[cfg(feature = "precondition-checks")]
        {
            if vertex_count == 0 {
                return Err(EmitFault::ZeroDrawCount(vertex_count));
            }
            if instance_count == 0 {
                return Err(EmitFault::ZeroInstanceCount(instance_count));
            }
        }
        self.op(Opcode::Draw);
        self.v(vertex_count);
        self.v(instance_count);
        self.v(first_vertex);
        self.v(first_instance);
        Ok(())
    }

    /// `draw_indexed(index_count, instance_count, first_index, base_vertex, first_instance)`.
    /// Fails unless `index_count >= 1` and `instance_count >= 1`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_indexed(
        &mut self,
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        base_vertex: u32,
        first_instance: u32,
    ) -> Result<(), EmitFault> {
        #[cfg(feature = "precondition-checks")]
        {
            if index_count == 0 {
                return Err(EmitFault::ZeroDrawCount(index_count));
            }
            if instance_count == 0 {
                return Err(EmitFault::ZeroInstanceCount(instance_count));
            }
        }
        self.op(Opcode::DrawIndexed);
        self.v(index_count);
        self.v(instance_count);
        self.v(first_index);
        self.v(base_vertex);
        self.v(first_instance);
        Ok(())
    }

    /// `dispatch(x, y, z)`. Fails unless all three dimensions are `>= 1`.
    pub fn dispatch(&mut self, x: u32, y: u32, z: u32) -> Result<(), EmitFault> {
        #[cfg(feature = "precondition-checks")]
        if x == 0 || y == 0 || z == 0 {
            return Err(EmitFault::ZeroDispatchDim(x, y, z));
        }
        self.op(Opcode::Dispatch);
        self.v(x);
        self.v(y);
        self.v(z);
        Ok(())
    }

    /// `end_pass()`.
    pub fn end_pass(&mut self) {
        self.op(Opcode::EndPass);
    }
}

// --- Frame-level data movement and control (0x20-0x2A) ---------------------

impl Emitter {
    /// `write_buffer(buffer_id, offset, data_id)`.
    pub fn write_buffer(&mut self, buffer_id: BufferId, offset: u32, data_id: DataId) {
        self.op(Opcode::WriteBuffer);
        self.v(buffer_id.get().into());
        self.v(offset);
        self.v(data_id.get().into());
    }

    /// `write_uniform(buffer_id, uniform_id)`. The uniform table (C5) is
    /// carried opaquely by the container, so `uniform_id` is a raw index
    /// rather than a `pngine-types` newtype.
    pub fn write_uniform(&mut self, buffer_id: BufferId, uniform_id: u32) {
        self.op(Opcode::WriteUniform);
        self.v(buffer_id.get().into());
        self.v(uniform_id);
    }

    /// `copy_buffer_to_buffer(src, src_off, dst, dst_off, size)`.
    pub fn copy_buffer_to_buffer(
        &mut self,
        src: BufferId,
        src_off: u32,
        dst: BufferId,
        dst_off: u32,
        size: u32,
    ) {
        self.op(Opcode::CopyBufferToBuffer);
        self.v(src.get().into());
        self.v(src_off);
        self.v(dst.get().into());
        self.v(dst_off);
        self.v(size);
    }

    /// `copy_texture_to_texture(src_tex, dst_tex)`.
    pub fn copy_texture_to_texture(&mut self, src_tex: TextureId, dst_tex: TextureId) {
        self.op(Opcode::CopyTextureToTexture);
        self.v(src_tex.get().into());
        self.v(dst_tex.get().into());
    }

    /// `submit()`.
    pub fn submit(&mut self) {
        self.op(Opcode::Submit);
    }

    /// `copy_external_image_to_texture(bitmap_id, texture_id, mip, origin_x, origin_y)`.
    pub fn copy_external_image_to_texture(
        &mut self,
        bitmap_id: ImageBitmapId,
        texture_id: TextureId,
        mip: u8,
        origin_x: u32,
        origin_y: u32,
    ) {
        self.op(Opcode::CopyExternalImageToTexture);
        self.v(bitmap_id.get().into());
        self.v(texture_id.get().into());
        self.b(mip);
        self.v(origin_x);
        self.v(origin_y);
    }

    /// `init_wasm_module(module_id, wasm_data_id)`.
    pub fn init_wasm_module(&mut self, module_id: WasmModuleId, wasm_data_id: DataId) {
        self.op(Opcode::InitWasmModule);
        self.v(module_id.get().into());
        self.v(wasm_data_id.get().into());
    }

    /// `call_wasm_func(call_id, module_id, func_name_string_id, args_blob)`.
    pub fn call_wasm_func(
        &mut self,
        call_id: WasmCallId,
        module_id: WasmModuleId,
        func_name_string_id: StringId,
        args: &[WasmArg],
    ) {
        self.op(Opcode::CallWasmFunc);
        self.v(call_id.get().into());
        self.v(module_id.get().into());
        self.v(func_name_string_id.get().into());
        self.bytes(&encode_blob(args));
    }

    /// `write_buffer_from_wasm(call_id, buffer_id, offset, byte_len)`.
    pub fn write_buffer_from_wasm(
        &mut self,
        call_id: WasmCallId,
        buffer_id: BufferId,
        offset: u32,
        byte_len: u32,
    ) {
        self.op(Opcode::WriteBufferFromWasm);
        self.v(call_id.get().into());
        self.v(buffer_id.get().into());
        self.v(offset);
        self.v(byte_len);
    }

    /// `write_buffer_from_array(buffer_id, offset, array_id)`.
    pub fn write_buffer_from_array(
        &mut self,
        buffer_id: BufferId,
        offset: u32,
        array_id: TypedArrayId,
    ) {
        self.op(Opcode::WriteBufferFromArray);
        self.v(buffer_id.get().into());
        self.v(offset);
        self.v(array_id.get().into());
    }

    /// `execute_bundles(bundle_ids)`. Fails unless
    /// `1 <= bundle_ids.len() <= 16`.
    pub fn execute_bundles(&mut self, bundle_ids: &[RenderBundleId]) -> Result<(), EmitFault> {
        #[cfg(feature = "precondition-checks")]
        if bundle_ids.is_empty() || bundle_ids.len() > 16 {
            return Err(EmitFault::BundleCountOutOfRange(bundle_ids.len()));
        }
        self.op(Opcode::ExecuteBundles);
        self.v(bundle_ids.len() as u32);
        for bundle_id in bundle_ids {
            self.v(bundle_id.get().into());
        }
        Ok(())
    }
}

// --- Frame/pass control (0x30-0x42) -----------------------------------------

impl Emitter {
    /// `define_frame(frame_id, name_string_id)`.
    pub fn define_frame(&mut self, frame_id: FrameId, name_string_id: StringId) {
        self.op(Opcode::DefineFrame);
        self.v(frame_id.get().into());
        self.v(name_string_id.get().into());
    }

    /// `end_frame()`.
    pub fn end_frame(&mut self) {
        self.op(Opcode::EndFrame);
    }

    /// `exec_pass(pass_id)`.
    pub fn exec_pass(&mut self, pass_id: PassId) {
        self.op(Opcode::ExecPass);
        self.v(pass_id.get().into());
    }

    /// `define_pass(pass_id, pass_type, desc_data_id)`.
    pub fn define_pass(&mut self, pass_id: PassId, pass_type: PassType, desc_data_id: DataId) {
        self.op(Opcode::DefinePass);
        self.v(pass_id.get().into());
        self.b(pass_type as u8);
        self.v(desc_data_id.get().into());
    }

    /// `end_pass_def()`.
    pub fn end_pass_def(&mut self) {
        self.op(Opcode::EndPassDef);
    }

    /// `select_from_pool(dest_slot, pool_id, frame_offset)`.
    pub fn select_from_pool(&mut self, dest_slot: u8, pool_id: u32, frame_offset: u32) {
        self.op(Opcode::SelectFromPool);
        self.b(dest_slot);
        self.v(pool_id);
        self.v(frame_offset);
    }

    /// `set_vertex_buffer_pool(slot, base_id, pool_size, offset)`. Fails
    /// unless `pool_size >= 1` and `offset < pool_size`.
    pub fn set_vertex_buffer_pool(
        &mut self,
        slot: u8,
        base_id: BufferId,
        pool_size: u8,
        offset: u8,
    ) -> Result<(), EmitFault> {
        check_pool(pool_size, offset)?;
        self.op(Opcode::SetVertexBufferPool);
        self.b(slot);
        self.v(base_id.get().into());
        self.b(pool_size);
        self.b(offset);
        Ok(())
    }

    /// `set_bind_group_pool(slot, base_id, pool_size, offset)`. Fails
    /// unless `pool_size >= 1` and `offset < pool_size`.
    pub fn set_bind_group_pool(
        &mut self,
        slot: u8,
        base_id: BindGroupId,
        pool_size: u8,
        offset: u8,
    ) -> Result<(), EmitFault> {
        check_pool(pool_size, offset)?;
        self.op(Opcode::SetBindGroupPool);
        self.b(slot);
        self.v(base_id.get().into());
        self.b(pool_size);
        self.b(offset);
        Ok(())
    }
}

#[cfg_attr(not(feature = "precondition-checks"), allow(unused_variables))]
fn check_pool(pool_size: u8, offset: u8) -> Result<(), EmitFault> {
    #[cfg(feature = "precondition-checks")]
    {
        if pool_size == 0 {
            return Err(EmitFault::ZeroPoolSize);
        }
        if offset >= pool_size {
            return Err(EmitFault::PoolOffsetOutOfRange { offset, pool_size });
        }
    }
    Ok(())
}

// --- Typed-array data generation (0x50-0x56) --------------------------------

impl Emitter {
    /// `create_typed_array(id, element_type, element_count)`.
    pub fn create_typed_array(
        &mut self,
        id: TypedArrayId,
        element_type: ElementType,
        element_count: u32,
    ) {
        self.op(Opcode::CreateTypedArray);
        self.v(id.get().into());
        self.b(element_type as u8);
        self.v(element_count);
    }

    /// `fill_constant(id, off, n, stride, value_data_id)`.
    pub fn fill_constant(
        &mut self,
        id: TypedArrayId,
        off: u32,
        n: u32,
        stride: u8,
        value_data_id: DataId,
    ) {
        self.op(Opcode::FillConstant);
        self.v(id.get().into());
        self.v(off);
        self.v(n);
        self.b(stride);
        self.v(value_data_id.get().into());
    }

    /// `fill_random(id, off, n, stride, seed_data_id, min_data_id, max_data_id)`.
    /// This is the canonical 7-field shape; a narrower form that omits
    /// `seed_data_id` is not supported.
    #[allow(clippy::too_many_arguments)]
    pub fn fill_random(
        &mut self,
        id: TypedArrayId,
        off: u32,
        n: u32,
        stride: u8,
        seed_data_id: DataId,
        min_data_id: DataId,
        max_data_id: DataId,
    ) {
        self.op(Opcode::FillRandom);
        self.v(id.get().into());
        self.v(off);
        self.v(n);
        self.b(stride);
        self.v(seed_data_id.get().into());
        self.v(min_data_id.get().into());
        self.v(max_data_id.get().into());
    }

    /// `fill_linear(id, off, n, stride, start_data_id, step_data_id)`.
    pub fn fill_linear(
        &mut self,
        id: TypedArrayId,
        off: u32,
        n: u32,
        stride: u8,
        start_data_id: DataId,
        step_data_id: DataId,
    ) {
        self.op(Opcode::FillLinear);
        self.v(id.get().into());
        self.v(off);
        self.v(n);
        self.b(stride);
        self.v(start_data_id.get().into());
        self.v(step_data_id.get().into());
    }

    /// `fill_element_index(id, off, n, stride, scale_data_id, bias_data_id)`.
    pub fn fill_element_index(
        &mut self,
        id: TypedArrayId,
        off: u32,
        n: u32,
        stride: u8,
        scale_data_id: DataId,
        bias_data_id: DataId,
    ) {
        self.op(Opcode::FillElementIndex);
        self.v(id.get().into());
        self.v(off);
        self.v(n);
        self.b(stride);
        self.v(scale_data_id.get().into());
        self.v(bias_data_id.get().into());
    }

    /// `fill_expression(id, off, n, stride, expr_data_id)`.
    pub fn fill_expression(
        &mut self,
        id: TypedArrayId,
        off: u32,
        n: u32,
        stride: u8,
        expr_data_id: DataId,
    ) {
        self.op(Opcode::FillExpression);
        self.v(id.get().into());
        self.v(off);
        self.v(n);
        self.b(stride);
        self.v(expr_data_id.get().into());
    }

    /// `write_time_uniform(buffer_id, offset, size)`.
    pub fn write_time_uniform(&mut self, buffer_id: BufferId, offset: u32, size: u32) {
        self.op(Opcode::WriteTimeUniform);
        self.v(buffer_id.get().into());
        self.v(offset);
        self.v(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_emits_single_byte_varints() {
        let mut e = Emitter::new();
        e.draw(3, 1, 0, 0).unwrap();
        assert_eq!(e.as_bytes(), &[0x16, 0x03, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn draw_emits_two_byte_varint_when_needed() {
        let mut e = Emitter::new();
        e.draw(1000, 100, 0, 0).unwrap();
        assert_eq!(e.as_bytes(), &[0x16, 0x83, 0xE8, 0x64, 0x00, 0x00]);
    }

    #[test]
    fn draw_rejects_zero_vertex_count() {
        let mut e = Emitter::new();
        assert_eq!(e.draw(0, 1, 0, 0), Err(EmitFault::ZeroDrawCount(0)));
    }

    #[test]
    fn dispatch_rejects_zero_dims() {
        let mut e = Emitter::new();
        assert_eq!(
            e.dispatch(1, 0, 1),
            Err(EmitFault::ZeroDispatchDim(1, 0, 1))
        );
    }

    #[test]
    fn create_buffer_rejects_empty_usage() {
        let mut e = Emitter::new();
        assert_eq!(
            e.create_buffer(BufferId::new(0), 16, BufferUsage::empty()),
            Err(EmitFault::EmptyBufferUsage)
        );
    }

    #[test]
    fn execute_bundles_enforces_1_to_16() {
        let mut e = Emitter::new();
        assert!(matches!(
            e.execute_bundles(&[]),
            Err(EmitFault::BundleCountOutOfRange(0))
        ));
        let too_many: Vec<RenderBundleId> = (0..17).map(RenderBundleId::new).collect();
        assert!(matches!(
            e.execute_bundles(&too_many),
            Err(EmitFault::BundleCountOutOfRange(17))
        ));
    }

    #[test]
    fn pool_offset_must_be_in_range() {
        let mut e = Emitter::new();
        assert_eq!(
            e.set_vertex_buffer_pool(0, BufferId::new(0), 4, 4),
            Err(EmitFault::PoolOffsetOutOfRange {
                offset: 4,
                pool_size: 4
            })
        );
    }

    mod pool_bounds {
        use super::*;
        use rstest::rstest;

        #[rstest]
        #[case(1, 0, true)]
        #[case(4, 3, true)]
        #[case(4, 4, false)]
        #[case(4, 5, false)]
        #[case(0, 0, false)]
        fn check_pool_enforces_offset_lt_pool_size(
            #[case] pool_size: u8,
            #[case] offset: u8,
            #[case] expect_ok: bool,
        ) {
            assert_eq!(check_pool(pool_size, offset).is_ok(), expect_ok);
        }
    }

    mod bundle_count_bounds {
        use super::*;
        use rstest::rstest;

        #[rstest]
        #[case(0, false)]
        #[case(1, true)]
        #[case(16, true)]
        #[case(17, false)]
        fn execute_bundles_enforces_1_to_16(#[case] count: usize, #[case] expect_ok: bool) {
            let mut e = Emitter::new();
            let bundles: Vec<RenderBundleId> = (0..count as u16).map(RenderBundleId::new).collect();
            assert_eq!(e.execute_bundles(&bundles).is_ok(), expect_ok);
        }
    }
}
