//! In-memory backend that records every call, for tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::coords::Transform;
use crate::geometry::{Topology, Vertex};
use crate::shader::UniformValue;

use super::{Backend, BufferKind, DeviceError, Image, ShaderStage};

/// Uniform payload as seen by the backend, with textures reduced to their id.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recorded {
    Bool(bool),
    Int(i32),
    IntArray(Vec<i32>),
    IntVec4([i32; 4]),
    Float(f32),
    FloatArray(Vec<f32>),
    FloatVec4([f32; 4]),
    Matrix([f32; 16]),
    Sampler { texture: u32, unit: u32 },
}

impl Recorded {
    fn from_value(value: &UniformValue<RecTexture>) -> Self {
        match value {
            UniformValue::Bool(v) => Recorded::Bool(*v),
            UniformValue::Int(v) => Recorded::Int(*v),
            UniformValue::IntArray(v) => Recorded::IntArray(v.clone()),
            UniformValue::IntVec4(v) => Recorded::IntVec4(*v),
            UniformValue::Float(v) => Recorded::Float(*v),
            UniformValue::FloatArray(v) => Recorded::FloatArray(v.clone()),
            UniformValue::FloatVec4(v) => Recorded::FloatVec4(*v),
            UniformValue::Matrix(v) => Recorded::Matrix(*v),
            UniformValue::Sampler { texture, unit } => Recorded::Sampler { texture: texture.id, unit: *unit },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateBuffer { id: u32, kind: BufferKind, len: usize },
    CompileProgram { id: u32 },
    BindProgram(Option<u32>),
    SetUniform { program: u32, name: String, value: Recorded },
    SetTarget { target: Option<u32>, transform: Transform },
    DrawBuffer { buffer: u32, topology: Topology, count: usize, texture: Option<u32> },
    DrawIndexed { vertices: u32, indices: u32, topology: Topology, count: usize, texture: Option<u32> },
    DrawVertices { vertices: Vec<Vertex>, topology: Topology, texture: Option<u32> },
    CreateTexture { id: u32, width: u32, height: u32 },
}

impl Call {
    pub(crate) fn is_draw(&self) -> bool {
        matches!(
            self,
            Call::DrawBuffer { .. } | Call::DrawIndexed { .. } | Call::DrawVertices { .. }
        )
    }
}

#[derive(Default)]
struct Live {
    buffers: Cell<usize>,
    programs: Cell<usize>,
    textures: Cell<usize>,
}

fn inc(c: &Cell<usize>) {
    c.set(c.get() + 1);
}

fn dec(c: &Cell<usize>) {
    c.set(c.get() - 1);
}

pub(crate) struct RecBuffer {
    pub(crate) id: u32,
    pub(crate) bytes: Vec<u8>,
    live: Rc<Live>,
}

impl Drop for RecBuffer {
    fn drop(&mut self) {
        dec(&self.live.buffers);
    }
}

pub(crate) struct RecProgram {
    pub(crate) id: u32,
    live: Rc<Live>,
}

impl Drop for RecProgram {
    fn drop(&mut self) {
        dec(&self.live.programs);
    }
}

pub(crate) struct RecTexture {
    pub(crate) id: u32,
    width: u32,
    height: u32,
    pub(crate) rgba: Vec<u8>,
    live: Rc<Live>,
}

impl Image for RecTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for RecTexture {
    fn drop(&mut self) {
        dec(&self.live.textures);
    }
}

#[derive(Default)]
pub(crate) struct RecordingBackend {
    calls: RefCell<Vec<Call>>,
    live: Rc<Live>,
    next_id: Cell<u32>,
    fail_buffer: Cell<bool>,
    fail_compile: RefCell<Option<String>>,
    fail_bind: Cell<bool>,
}

impl RecordingBackend {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    pub(crate) fn draws(&self) -> Vec<Call> {
        self.calls.borrow().iter().filter(|c| c.is_draw()).cloned().collect()
    }

    pub(crate) fn live_buffers(&self) -> usize {
        self.live.buffers.get()
    }

    pub(crate) fn live_programs(&self) -> usize {
        self.live.programs.get()
    }

    pub(crate) fn live_textures(&self) -> usize {
        self.live.textures.get()
    }

    pub(crate) fn texture_id(&self, texture: &RecTexture) -> u32 {
        texture.id
    }

    pub(crate) fn fail_next_buffer(&self) {
        self.fail_buffer.set(true);
    }

    pub(crate) fn fail_next_compile(&self, log: &str) {
        *self.fail_compile.borrow_mut() = Some(log.to_owned());
    }

    pub(crate) fn fail_next_bind(&self) {
        self.fail_bind.set(true);
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn fresh_id(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }
}

impl Backend for RecordingBackend {
    type Buffer = RecBuffer;
    type Program = RecProgram;
    type Texture = RecTexture;

    fn create_buffer(&self, kind: BufferKind, contents: &[u8], len: usize) -> Result<RecBuffer, DeviceError> {
        if self.fail_buffer.replace(false) {
            return Err(DeviceError::Upload { kind, len, code: 0x0505 });
        }
        let id = self.fresh_id();
        inc(&self.live.buffers);
        self.record(Call::CreateBuffer { id, kind, len });
        Ok(RecBuffer { id, bytes: contents.to_vec(), live: Rc::clone(&self.live) })
    }

    fn compile_program(&self, _vertex: &str, _fragment: &str) -> Result<RecProgram, DeviceError> {
        if let Some(log) = self.fail_compile.borrow_mut().take() {
            return Err(DeviceError::Compile { stage: ShaderStage::Fragment, log });
        }
        let id = self.fresh_id();
        inc(&self.live.programs);
        self.record(Call::CompileProgram { id });
        Ok(RecProgram { id, live: Rc::clone(&self.live) })
    }

    fn bind_program(&self, program: Option<&RecProgram>) -> Result<(), DeviceError> {
        if self.fail_bind.replace(false) {
            return Err(DeviceError::Bind { code: 0x0502 });
        }
        self.record(Call::BindProgram(program.map(|p| p.id)));
        Ok(())
    }

    fn set_uniform(&self, program: &RecProgram, name: &str, value: &UniformValue<RecTexture>) {
        self.record(Call::SetUniform {
            program: program.id,
            name: name.to_owned(),
            value: Recorded::from_value(value),
        });
    }

    fn set_target(&self, target: Option<&RecTexture>, transform: &Transform) -> Result<(), DeviceError> {
        self.record(Call::SetTarget { target: target.map(|t| t.id), transform: *transform });
        Ok(())
    }

    fn draw_buffer(&self, vertices: &RecBuffer, topology: Topology, count: usize, texture: Option<&RecTexture>) {
        self.record(Call::DrawBuffer {
            buffer: vertices.id,
            topology,
            count,
            texture: texture.map(|t| t.id),
        });
    }

    fn draw_indexed(
        &self,
        vertices: &RecBuffer,
        indices: &RecBuffer,
        topology: Topology,
        count: usize,
        texture: Option<&RecTexture>,
    ) {
        self.record(Call::DrawIndexed {
            vertices: vertices.id,
            indices: indices.id,
            topology,
            count,
            texture: texture.map(|t| t.id),
        });
    }

    fn draw_vertices(&self, vertices: &[Vertex], topology: Topology, texture: Option<&RecTexture>) {
        self.record(Call::DrawVertices {
            vertices: vertices.to_vec(),
            topology,
            texture: texture.map(|t| t.id),
        });
    }

    fn create_texture(&self, width: u32, height: u32, rgba: &[u8]) -> Result<RecTexture, DeviceError> {
        let expected = super::backend::rgba_len(width, height);
        if rgba.len() != expected {
            return Err(DeviceError::TextureData { width, height, expected, actual: rgba.len() });
        }
        let id = self.fresh_id();
        inc(&self.live.textures);
        self.record(Call::CreateTexture { id, width, height });
        Ok(RecTexture { id, width, height, rgba: rgba.to_vec(), live: Rc::clone(&self.live) })
    }
}
