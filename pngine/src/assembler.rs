//! The two-pass assembler (C8): walks a parsed s-expression tree and
//! populates the container builder's string table, data section, and
//! bytecode stream.

use alloc::collections::BTreeMap;
use alloc::string::ToString;
use alloc::vec::Vec;

use pngine_asm::{LoadOp, PassType, StoreOp};
use pngine_container::Builder;
use pngine_types::{
    BindGroupId, BindGroupLayoutId, BufferId, DataId, FrameId, PassId, PipelineId, ShaderId,
    TextureId,
};

use crate::error::AssembleError;
use crate::resource_id::{self, AutoIndexer, DuplicateTracker, ResourceId, ResourceKind};
use crate::sexpr::Sexpr;

/// One command inside a pass or frame body, already classified.
#[derive(Debug, Clone)]
struct PassBody {
    kind: PassType,
    commands: Vec<Sexpr>,
}

/// Walks a parsed top-level form list and produces a serialized PNGB
/// buffer. `forms` is either the single argument list of a `(module
/// "name" form*)` wrapper, or a bare shorthand sequence — see
/// [`top_level_forms`].
#[derive(Debug, Default)]
pub struct Assembler {
    builder: Builder,
    tracker: DuplicateTracker,
    auto: AutoIndexer,
    data_ids: BTreeMap<u16, DataId>,
    pass_bodies: BTreeMap<u16, PassBody>,
}

impl Assembler {
    /// A fresh assembler over an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs both passes over `forms` and serializes the result.
    #[tracing::instrument(skip(forms))]
    pub fn assemble(forms: &[Sexpr]) -> Result<Vec<u8>, AssembleError> {
        let (module_name, top_level) = top_level_forms(forms)?;
        let mut assembler = Self::new();
        if let Some(name) = module_name {
            assembler.builder.intern_string(name.as_bytes())?;
        }
        assembler.collect(&top_level)?;
        assembler.emit(&top_level)?;
        Ok(assembler.builder.finalize())
    }

    fn collect(&mut self, forms: &[Sexpr]) -> Result<(), AssembleError> {
        for form in forms {
            match form.head() {
                Some("data") => self.collect_data(form)?,
                Some("pass") => self.collect_name(form, 1)?,
                Some("frame") => self.collect_frame_name(form)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn collect_data(&mut self, form: &Sexpr) -> Result<(), AssembleError> {
        let args = form.args();
        let id_atom = args.first().and_then(Sexpr::as_atom).ok_or(
            AssembleError::ExpectedAtom("data resource id"),
        )?;
        let id = resource_id::parse(id_atom)?;
        let bytes = args
            .get(1)
            .and_then(Sexpr::as_str_lit)
            .ok_or(AssembleError::ExpectedString("data blob contents"))?;
        let data_id = self.builder.add_data(bytes.as_bytes())?;
        self.data_ids.insert(id.index, data_id);
        Ok(())
    }

    /// Interns the string literal found at `args[at]`, if any — used for
    /// the optional pass name.
    fn collect_name(&mut self, form: &Sexpr, at: usize) -> Result<(), AssembleError> {
        if let Some(name) = form.args().get(at).and_then(Sexpr::as_str_lit) {
            self.builder.intern_string(name.as_bytes())?;
        }
        Ok(())
    }

    fn collect_frame_name(&mut self, form: &Sexpr) -> Result<(), AssembleError> {
        let args = form.args();
        let name = match args.first() {
            Some(Sexpr::Str(name)) => Some(name.as_str()),
            _ => args.get(1).and_then(Sexpr::as_str_lit),
        };
        if let Some(name) = name {
            self.builder.intern_string(name.as_bytes())?;
        }
        Ok(())
    }

    fn emit(&mut self, forms: &[Sexpr]) -> Result<(), AssembleError> {
        for form in forms {
            let head = form
                .head()
                .ok_or_else(|| AssembleError::UnknownForm("<non-list form>".to_string()))?;
            match head {
                "shader" => self.emit_shader(form)?,
                "buffer" => self.emit_buffer(form)?,
                "render-pipeline" => self.emit_pipeline(form, true)?,
                "compute-pipeline" => self.emit_pipeline(form, false)?,
                "pipeline" => self.emit_pipeline_shorthand(form)?,
                "bind-group" => self.emit_bind_group(form)?,
                "data" => self.emit_data(form)?,
                "pass" => self.emit_pass(form)?,
                "frame" => self.emit_frame(form)?,
                other => return Err(AssembleError::UnknownForm(other.to_string())),
            }
        }
        Ok(())
    }

    fn define(&mut self, id: ResourceId, atom: &str) -> Result<(), AssembleError> {
        if self.tracker.define(id) {
            Ok(())
        } else {
            Err(AssembleError::DuplicateResource(atom.to_string()))
        }
    }

    fn resolve_data(&self, index: u16, atom: &str) -> Result<DataId, AssembleError> {
        self.data_ids
            .get(&index)
            .copied()
            .ok_or_else(|| AssembleError::UndefinedResource(atom.to_string()))
    }

    // -- shader ------------------------------------------------------

    fn emit_shader(&mut self, form: &Sexpr) -> Result<(), AssembleError> {
        let args = form.args();
        match args.first() {
            // Full form: `(shader $shd:N (code $d:M))`.
            Some(Sexpr::Atom(atom)) if atom.starts_with('$') => {
                let id = resource_id::parse(atom)?;
                self.define(id, atom)?;
                let code_form = args
                    .get(1)
                    .ok_or(AssembleError::InvalidFormStructure {
                        form: "shader",
                        detail: "missing (code $d:M) argument",
                    })?;
                let data_atom = code_form
                    .args()
                    .first()
                    .and_then(Sexpr::as_atom)
                    .ok_or(AssembleError::ExpectedAtom("shader code data id"))?;
                let data_id_parsed = resource_id::parse(data_atom)?;
                let data_id = self.resolve_data(data_id_parsed.index, data_atom)?;
                self.builder
                    .emitter_mut()
                    .create_shader_module(ShaderId::new(id.index), data_id);
            }
            // Shorthand: `(shader N "code")`.
            Some(Sexpr::Num(n)) => {
                let id = ResourceId {
                    kind: ResourceKind::Shader,
                    index: *n as u16,
                };
                self.define(id, "shader")?;
                let code = args
                    .get(1)
                    .and_then(Sexpr::as_str_lit)
                    .ok_or(AssembleError::ExpectedString("inline shader code"))?;
                let data_id = self.builder.add_data(code.as_bytes())?;
                self.builder
                    .emitter_mut()
                    .create_shader_module(ShaderId::new(id.index), data_id);
            }
            _ => {
                return Err(AssembleError::InvalidFormStructure {
                    form: "shader",
                    detail: "expected a resource id or a numeric literal first",
                })
            }
        }
        Ok(())
    }

    // -- buffer --------------------------------------------------------

    fn emit_buffer(&mut self, form: &Sexpr) -> Result<(), AssembleError> {
        let args = form.args();
        let atom = args
            .first()
            .and_then(Sexpr::as_atom)
            .ok_or(AssembleError::ExpectedAtom("buffer resource id"))?;
        let id = resource_id::parse(atom)?;
        self.define(id, atom)?;

        let size = find_subform(args, "size")
            .and_then(|f| f.args().first())
            .and_then(Sexpr::as_num)
            .ok_or(AssembleError::InvalidFormStructure {
                form: "buffer",
                detail: "missing (size S)",
            })?;
        let usage = find_subform(args, "usage")
            .and_then(|f| f.args().first())
            .and_then(Sexpr::as_num)
            .ok_or(AssembleError::InvalidFormStructure {
                form: "buffer",
                detail: "missing (usage U)",
            })?;

        self.builder.emitter_mut().create_buffer(
            BufferId::new(id.index),
            size as u32,
            pngine_asm::BufferUsage::from_bits_truncate(usage as u8),
        )?;
        Ok(())
    }

    // -- pipelines -------------------------------------------------------

    fn descriptor_blob(&mut self, args: &[Sexpr]) -> Result<DataId, AssembleError> {
        let json = find_subform(args, "json")
            .and_then(|f| f.args().first())
            .and_then(Sexpr::as_str_lit)
            .unwrap_or("{}");
        Ok(self.builder.add_data(json.as_bytes())?)
    }

    fn emit_pipeline(&mut self, form: &Sexpr, render: bool) -> Result<(), AssembleError> {
        let args = form.args();
        let atom = args
            .first()
            .and_then(Sexpr::as_atom)
            .ok_or(AssembleError::ExpectedAtom("pipeline resource id"))?;
        let id = resource_id::parse(atom)?;
        self.define(id, atom)?;
        let desc = self.descriptor_blob(args)?;
        if render {
            self.builder
                .emitter_mut()
                .create_render_pipeline(PipelineId::new(id.index), desc);
        } else {
            self.builder
                .emitter_mut()
                .create_compute_pipeline(PipelineId::new(id.index), desc);
        }
        Ok(())
    }

    fn emit_pipeline_shorthand(&mut self, form: &Sexpr) -> Result<(), AssembleError> {
        let args = form.args();
        let n = args
            .first()
            .and_then(Sexpr::as_num)
            .ok_or(AssembleError::ExpectedNumber("pipeline id"))?;
        let id = ResourceId {
            kind: ResourceKind::Pipeline,
            index: n as u16,
        };
        self.define(id, "pipeline")?;
        let desc = self.descriptor_blob(args)?;
        self.builder
            .emitter_mut()
            .create_render_pipeline(PipelineId::new(id.index), desc);
        Ok(())
    }

    // -- bind group ------------------------------------------------------

    fn emit_bind_group(&mut self, form: &Sexpr) -> Result<(), AssembleError> {
        let args = form.args();
        let atom = args
            .first()
            .and_then(Sexpr::as_atom)
            .ok_or(AssembleError::ExpectedAtom("bind-group resource id"))?;
        let id = resource_id::parse(atom)?;
        self.define(id, atom)?;
        let layout = find_subform(args, "layout")
            .and_then(|f| f.args().first())
            .and_then(Sexpr::as_num)
            .ok_or(AssembleError::InvalidFormStructure {
                form: "bind-group",
                detail: "missing (layout L)",
            })?;
        let entries = find_subform(args, "entries")
            .and_then(|f| f.args().first())
            .and_then(Sexpr::as_str_lit)
            .unwrap_or("[]");
        let entries_data_id = self.builder.add_data(entries.as_bytes())?;
        self.builder.emitter_mut().create_bind_group(
            BindGroupId::new(id.index),
            BindGroupLayoutId::new(layout as u16),
            entries_data_id,
        );
        Ok(())
    }

    // -- data (no-op emission, already interned) --------------------------

    fn emit_data(&mut self, form: &Sexpr) -> Result<(), AssembleError> {
        let atom = form
            .args()
            .first()
            .and_then(Sexpr::as_atom)
            .ok_or(AssembleError::ExpectedAtom("data resource id"))?;
        let id = resource_id::parse(atom)?;
        self.define(id, atom)?;
        Ok(())
    }

    // -- passes ------------------------------------------------------------

    fn parse_pass_body(&self, args: &[Sexpr]) -> Result<PassBody, AssembleError> {
        let (kind, body) = if let Some(render) = find_subform(args, "render") {
            (PassType::Render, render)
        } else if let Some(compute) = find_subform(args, "compute") {
            (PassType::Compute, compute)
        } else {
            return Err(AssembleError::InvalidFormStructure {
                form: "pass",
                detail: "missing (render ...) or (compute ...) body",
            });
        };
        let commands = find_subform(body.args(), "commands")
            .map(|c| c.args().to_vec())
            .unwrap_or_default();
        Ok(PassBody { kind, commands })
    }

    fn emit_pass_body(&mut self, body: &PassBody) -> Result<(), AssembleError> {
        match body.kind {
            PassType::Render => {
                self.builder.emitter_mut().begin_render_pass(
                    TextureId::new(0),
                    LoadOp::Clear,
                    StoreOp::Store,
                    None,
                );
            }
            PassType::Compute => {
                self.builder.emitter_mut().begin_compute_pass();
            }
        }
        for command in &body.commands {
            self.emit_command(command)?;
        }
        self.builder.emitter_mut().end_pass();
        Ok(())
    }

    fn emit_pass(&mut self, form: &Sexpr) -> Result<(), AssembleError> {
        let args = form.args();
        let atom = args
            .first()
            .and_then(Sexpr::as_atom)
            .ok_or(AssembleError::ExpectedAtom("pass resource id"))?;
        let id = resource_id::parse(atom)?;
        self.define(id, atom)?;
        let body = self.parse_pass_body(args)?;
        self.pass_bodies.insert(id.index, body.clone());
        self.emit_pass_body(&body)
    }

    // -- frames ------------------------------------------------------------

    fn emit_frame(&mut self, form: &Sexpr) -> Result<(), AssembleError> {
        let args = form.args();
        let (frame_index, name, rest) = match args.first() {
            Some(Sexpr::Str(name)) => {
                let index = self.auto.next(ResourceKind::Frame);
                (index, name.as_str(), &args[1..])
            }
            Some(Sexpr::Atom(atom)) if atom.starts_with('$') => {
                let id = resource_id::parse(atom)?;
                self.define(id, atom)?;
                let name = args
                    .get(1)
                    .and_then(Sexpr::as_str_lit)
                    .ok_or(AssembleError::ExpectedString("frame name"))?;
                (id.index, name, &args[2..])
            }
            _ => {
                return Err(AssembleError::InvalidFormStructure {
                    form: "frame",
                    detail: "expected a resource id or a string literal first",
                })
            }
        };

        let name_id = self.builder.intern_string(name.as_bytes())?;
        self.builder
            .emitter_mut()
            .define_frame(FrameId::new(frame_index), name_id);

        for command in rest {
            self.emit_frame_command(command)?;
        }

        self.builder.emitter_mut().end_frame();
        Ok(())
    }

    fn emit_frame_command(&mut self, command: &Sexpr) -> Result<(), AssembleError> {
        match command.head() {
            Some("exec-pass") => {
                let n = command
                    .args()
                    .first()
                    .and_then(Sexpr::as_num)
                    .ok_or(AssembleError::ExpectedNumber("exec-pass pass id"))?;
                let body = self
                    .pass_bodies
                    .get(&(n as u16))
                    .cloned()
                    .ok_or_else(|| AssembleError::UndefinedResource(alloc::format!("$pass:{n}")))?;
                self.builder.emitter_mut().exec_pass(PassId::new(n as u16));
                self.emit_pass_body(&body)
            }
            Some("submit") => {
                self.builder.emitter_mut().submit();
                Ok(())
            }
            _ => self.emit_command(command),
        }
    }

    /// Shared inline-command translation used both by a standalone
    /// `(pass ...)` body and a shorthand frame's inline commands.
    fn emit_command(&mut self, command: &Sexpr) -> Result<(), AssembleError> {
        let args = command.args();
        match command.head() {
            Some("begin-render-pass") => {
                let texture = keyword_num(args, "texture").unwrap_or(0) as u16;
                let load = match keyword_atom(args, "load") {
                    Some("load") => LoadOp::Load,
                    _ => LoadOp::Clear,
                };
                let store = match keyword_atom(args, "store") {
                    Some("discard") => StoreOp::Discard,
                    _ => StoreOp::Store,
                };
                self.builder
                    .emitter_mut()
                    .begin_render_pass(TextureId::new(texture), load, store, None);
            }
            Some("set-pipeline") => {
                let n = args
                    .first()
                    .and_then(Sexpr::as_num)
                    .ok_or(AssembleError::ExpectedNumber("set-pipeline pipeline id"))?;
                self.builder
                    .emitter_mut()
                    .set_pipeline(PipelineId::new(n as u16));
            }
            Some("set-bind-group") => {
                let slot = args
                    .first()
                    .and_then(Sexpr::as_num)
                    .ok_or(AssembleError::ExpectedNumber("set-bind-group slot"))?;
                let n = args
                    .get(1)
                    .and_then(Sexpr::as_num)
                    .ok_or(AssembleError::ExpectedNumber("set-bind-group group id"))?;
                self.builder
                    .emitter_mut()
                    .set_bind_group(slot as u8, BindGroupId::new(n as u16));
            }
            Some("set-vertex-buffer") => {
                let slot = args
                    .first()
                    .and_then(Sexpr::as_num)
                    .ok_or(AssembleError::ExpectedNumber("set-vertex-buffer slot"))?;
                let n = args
                    .get(1)
                    .and_then(Sexpr::as_num)
                    .ok_or(AssembleError::ExpectedNumber("set-vertex-buffer buffer id"))?;
                self.builder
                    .emitter_mut()
                    .set_vertex_buffer(slot as u8, BufferId::new(n as u16));
            }
            Some("draw") => {
                let vertex_count = args
                    .first()
                    .and_then(Sexpr::as_num)
                    .ok_or(AssembleError::ExpectedNumber("draw vertex_count"))?;
                let instance_count = args.get(1).and_then(Sexpr::as_num).unwrap_or(1);
                self.builder.emitter_mut().draw(
                    vertex_count as u32,
                    instance_count as u32,
                    0,
                    0,
                )?;
            }
            Some("draw-indexed") => {
                let index_count = args
                    .first()
                    .and_then(Sexpr::as_num)
                    .ok_or(AssembleError::ExpectedNumber("draw-indexed index_count"))?;
                let instance_count = args.get(1).and_then(Sexpr::as_num).unwrap_or(1);
                self.builder.emitter_mut().draw_indexed(
                    index_count as u32,
                    instance_count as u32,
                    0,
                    0,
                    0,
                )?;
            }
            Some("dispatch") => {
                let x = args
                    .first()
                    .and_then(Sexpr::as_num)
                    .ok_or(AssembleError::ExpectedNumber("dispatch x"))?;
                let y = args.get(1).and_then(Sexpr::as_num).unwrap_or(1);
                let z = args.get(2).and_then(Sexpr::as_num).unwrap_or(1);
                self.builder
                    .emitter_mut()
                    .dispatch(x as u32, y as u32, z as u32)?;
            }
            Some("end-pass") => {
                self.builder.emitter_mut().end_pass();
            }
            Some(other) => {
                tracing::warn!(form = other, "ignoring unrecognized inline command");
            }
            None => {}
        }
        Ok(())
    }
}

/// Extracts the top-level form list: either the body of a single
/// `(module "name" form*)` wrapper (returning the name separately so the
/// caller can intern it) or the bare shorthand sequence itself (no
/// module name).
fn top_level_forms(
    forms: &[Sexpr],
) -> Result<(Option<alloc::string::String>, Vec<Sexpr>), AssembleError> {
    if let [Sexpr::List(single)] = forms {
        if single.first().and_then(Sexpr::as_atom) == Some("module") {
            let rest = &single[1..];
            let name = rest.first().and_then(Sexpr::as_str_lit);
            let body_start = if name.is_some() { 1 } else { 0 };
            return Ok((
                name.map(ToString::to_string),
                rest[body_start..].to_vec(),
            ));
        }
    }
    Ok((None, forms.to_vec()))
}

fn find_subform<'a>(args: &'a [Sexpr], name: &str) -> Option<&'a Sexpr> {
    args.iter().find(|a| a.head() == Some(name))
}

fn keyword_num(args: &[Sexpr], key: &str) -> Option<i64> {
    let sigil = alloc::format!(":{key}");
    args.windows(2).find_map(|pair| {
        if pair[0].as_atom() == Some(sigil.as_str()) {
            pair[1].as_num()
        } else {
            None
        }
    })
}

fn keyword_atom<'a>(args: &'a [Sexpr], key: &str) -> Option<&'a str> {
    let sigil = alloc::format!(":{key}");
    args.windows(2).find_map(|pair| {
        if pair[0].as_atom() == Some(sigil.as_str()) {
            pair[1].as_atom()
        } else {
            None
        }
    })
}
