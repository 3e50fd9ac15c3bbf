use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use glow::HasContext;

use crate::device::{BufferKind, Image};

/// Immutable vertex or index storage. Deleted on drop.
pub struct GlBuffer {
    gl: Rc<glow::Context>,
    pub(super) raw: glow::Buffer,
    kind: BufferKind,
}

impl GlBuffer {
    pub(super) fn new(gl: Rc<glow::Context>, raw: glow::Buffer, kind: BufferKind) -> Self {
        Self { gl, raw, kind }
    }

    #[inline]
    pub fn kind(&self) -> BufferKind {
        self.kind
    }
}

impl Drop for GlBuffer {
    fn drop(&mut self) {
        unsafe { self.gl.delete_buffer(self.raw) };
    }
}

/// Linked program plus its memoized uniform locations.
pub(super) struct ProgramInner {
    gl: Rc<glow::Context>,
    pub(super) raw: glow::Program,
    locations: RefCell<HashMap<String, Option<glow::UniformLocation>>>,
}

impl ProgramInner {
    pub(super) fn new(gl: Rc<glow::Context>, raw: glow::Program) -> Self {
        Self {
            gl,
            raw,
            locations: RefCell::new(HashMap::new()),
        }
    }

    /// Location of `name`, or `None` if the program does not declare it.
    /// Looked up once per name.
    pub(super) fn location(&self, name: &str) -> Option<glow::UniformLocation> {
        if let Some(location) = self.locations.borrow().get(name) {
            return location.clone();
        }
        let location = unsafe { self.gl.get_uniform_location(self.raw, name) };
        self.locations
            .borrow_mut()
            .insert(name.to_owned(), location.clone());
        location
    }
}

impl Drop for ProgramInner {
    fn drop(&mut self) {
        unsafe { self.gl.delete_program(self.raw) };
    }
}

/// Linked program handle.
///
/// The backend keeps its own reference to the bound program for the built-in
/// uniforms, so the native program outlives this handle while it stays bound.
pub struct GlProgram {
    pub(super) inner: Rc<ProgramInner>,
}

/// RGBA8 texture, usable as a sampler and as a render target. Deleted on drop.
pub struct GlTexture {
    gl: Rc<glow::Context>,
    pub(super) raw: glow::Texture,
    width: u32,
    height: u32,
}

impl GlTexture {
    pub(super) fn new(gl: Rc<glow::Context>, raw: glow::Texture, width: u32, height: u32) -> Self {
        Self { gl, raw, width, height }
    }
}

impl Image for GlTexture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        unsafe { self.gl.delete_texture(self.raw) };
    }
}
