use std::cell::RefCell;
use std::io::Read;
use std::path::Path;
use std::rc::Rc;

use crate::coords::Transform;
use crate::device::{Backend, DeviceError, Gpu};
use crate::geometry::{IndexBuffer, Topology, VertexBuffer};
use crate::shader::{self, ProgramId, ShaderError, ShaderProgram, ShaderSource};
use crate::style::{StyleError, WindowStyle};

use super::{Model, Shape};

/// Entry point for one graphics context.
///
/// Owns the shared [`Gpu`] (backend + active-program cell) and the optional
/// default program used by shapes and models without their own shader. All
/// resources are created here so they share the same cell.
pub struct RenderContext<B: Backend> {
    gpu: Rc<Gpu<B>>,
    default_program: RefCell<Option<Rc<ShaderProgram<B>>>>,
}

impl<B: Backend> RenderContext<B> {
    pub fn new(backend: B) -> Self {
        log::debug!("render context created");
        Self {
            gpu: Rc::new(Gpu::new(backend)),
            default_program: RefCell::new(None),
        }
    }

    #[inline]
    pub fn gpu(&self) -> &Rc<Gpu<B>> {
        &self.gpu
    }

    #[inline]
    pub fn backend(&self) -> &B {
        self.gpu.backend()
    }

    // ── resources ─────────────────────────────────────────────────────────

    pub fn create_vertex_buffer(&self) -> Rc<VertexBuffer<B>> {
        Rc::new(VertexBuffer::new(Rc::clone(&self.gpu)))
    }

    pub fn create_index_buffer(&self) -> Rc<IndexBuffer<B>> {
        Rc::new(IndexBuffer::new(Rc::clone(&self.gpu)))
    }

    pub fn create_shape(
        &self,
        topology: Topology,
        vertices: Rc<VertexBuffer<B>>,
        indices: Option<Rc<IndexBuffer<B>>>,
        texture: Option<Rc<B::Texture>>,
    ) -> Rc<Shape<B>> {
        Rc::new(Shape::new(topology, vertices, indices, texture))
    }

    /// Compiles a program from in-memory source text.
    pub fn create_program(
        &self,
        vertex: &str,
        fragment: &str,
    ) -> Result<Rc<ShaderProgram<B>>, ShaderError> {
        let source = ShaderSource::Inline {
            vertex: vertex.to_owned(),
            fragment: fragment.to_owned(),
        };
        ShaderProgram::compile(Rc::clone(&self.gpu), source).map(Rc::new)
    }

    /// Reads and compiles a program from two source files.
    pub fn load_program(
        &self,
        vertex: impl AsRef<Path>,
        fragment: impl AsRef<Path>,
    ) -> Result<Rc<ShaderProgram<B>>, ShaderError> {
        let source = ShaderSource::Files {
            vertex: vertex.as_ref().to_path_buf(),
            fragment: fragment.as_ref().to_path_buf(),
        };
        ShaderProgram::compile(Rc::clone(&self.gpu), source).map(Rc::new)
    }

    /// Creates an empty model. `shader: None` draws with the default program.
    pub fn create_model(&self, shader: Option<Rc<ShaderProgram<B>>>) -> Rc<Model<B>> {
        Rc::new(Model::new(self.gpu.next_id(), shader))
    }

    /// Creates a texture from tightly packed RGBA8 rows.
    pub fn create_texture(&self, width: u32, height: u32, rgba: &[u8]) -> Result<Rc<B::Texture>, DeviceError> {
        self.backend().create_texture(width, height, rgba).map(Rc::new)
    }

    /// Parses an `.rws` skin and uploads its nine images.
    pub fn load_window_style(&self, reader: &mut impl Read) -> Result<Rc<WindowStyle<B>>, StyleError> {
        WindowStyle::read_from(self.backend(), reader).map(Rc::new)
    }

    // ── programs ──────────────────────────────────────────────────────────

    /// Replaces the program used when nothing more specific is requested.
    /// `None` falls back to the backend's built-in program.
    pub fn set_default_program(&self, program: Option<Rc<ShaderProgram<B>>>) {
        *self.default_program.borrow_mut() = program;
    }

    pub fn default_program(&self) -> Option<Rc<ShaderProgram<B>>> {
        self.default_program.borrow().clone()
    }

    /// Activates `program`, replaying its queued uniforms.
    ///
    /// See [`ShaderProgram`] for the caching rules. `force` rebinds even when the
    /// program is already active.
    pub fn use_program(&self, program: Option<&ShaderProgram<B>>, force: bool) -> Result<(), ShaderError> {
        shader::activate(&*self.gpu, program, force)
    }

    pub fn use_default_program(&self, force: bool) -> Result<(), ShaderError> {
        let default = self.default_program.borrow().clone();
        self.use_program(default.as_deref(), force)
    }

    #[inline]
    pub fn active_program(&self) -> Option<ProgramId> {
        self.gpu.active_program()
    }

    /// Selects the draw target (`None` = backbuffer) and model transform for the
    /// following draws.
    pub fn render_to(&self, target: Option<&B::Texture>, transform: &Transform) -> Result<(), DeviceError> {
        self.backend().set_target(target, transform)
    }
}

impl<B: Backend> Drop for RenderContext<B> {
    fn drop(&mut self) {
        self.default_program.get_mut().take();
        self.gpu.set_active_program(None);
    }
}
