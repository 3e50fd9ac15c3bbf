use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glow::HasContext;

use crate::coords::Transform;
use crate::device::{Backend, BufferKind, DeviceError, Image};
use crate::geometry::{Topology, Vertex};
use crate::paint::Color;
use crate::shader::UniformValue;

use super::program::{self, DEFAULT_FRAGMENT, DEFAULT_VERTEX};
use super::resources::{GlBuffer, GlProgram, GlTexture, ProgramInner};
use super::GlInit;

fn gl_mode(topology: Topology) -> u32 {
    match topology {
        Topology::Points => glow::POINTS,
        Topology::Lines => glow::LINES,
        Topology::LineLoop => glow::LINE_LOOP,
        Topology::LineStrip => glow::LINE_STRIP,
        Topology::Triangles => glow::TRIANGLES,
        Topology::TriangleStrip => glow::TRIANGLE_STRIP,
        Topology::TriangleFan => glow::TRIANGLE_FAN,
    }
}

/// [`Backend`] over a current OpenGL 3.3 core context.
pub struct GlBackend {
    gl: Rc<glow::Context>,
    init: GlInit,
    vao: glow::VertexArray,
    stream: glow::Buffer,
    stream_capacity: Cell<usize>,
    builtin: Rc<ProgramInner>,
    bound: RefCell<Rc<ProgramInner>>,
    framebuffer: Cell<Option<glow::Framebuffer>>,
    surface: Cell<(u32, u32)>,
    projview: Cell<Transform>,
}

impl GlBackend {
    /// Compiles the built-in program and allocates the shared vertex state.
    pub fn new(gl: Rc<glow::Context>, init: GlInit) -> Result<Self, DeviceError> {
        let builtin = Rc::new(program::link(&gl, &init.glsl_version, DEFAULT_VERTEX, DEFAULT_FRAGMENT)?);
        let stream_bytes = init.stream_capacity * Vertex::STRIDE;

        let (vao, stream) = unsafe {
            let vao = gl
                .create_vertex_array()
                .map_err(|message| DeviceError::Allocation { what: "vertex array", message })?;
            let stream = match gl.create_buffer() {
                Ok(buffer) => buffer,
                Err(message) => {
                    gl.delete_vertex_array(vao);
                    return Err(DeviceError::Allocation { what: "stream buffer", message });
                }
            };

            gl.bind_vertex_array(Some(vao));
            for location in 0..3 {
                gl.enable_vertex_attrib_array(location);
            }
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(stream));
            gl.buffer_data_size(glow::ARRAY_BUFFER, stream_bytes as i32, glow::STREAM_DRAW);

            if init.blending {
                gl.enable(glow::BLEND);
                gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            }
            gl.use_program(Some(builtin.raw));
            (vao, stream)
        };

        let (width, height) = init.surface_size;
        log::info!("gl backend ready ({width}x{height}, {})", init.glsl_version);

        Ok(Self {
            surface: Cell::new(init.surface_size),
            projview: Cell::new(Transform::orthographic(0.0, width as f32, height as f32, 0.0, -1.0, 1.0)),
            stream_capacity: Cell::new(stream_bytes),
            bound: RefCell::new(Rc::clone(&builtin)),
            builtin,
            framebuffer: Cell::new(None),
            gl,
            init,
            vao,
            stream,
        })
    }

    #[inline]
    pub fn init(&self) -> &GlInit {
        &self.init
    }

    /// Backbuffer size used by `set_target(None, ..)`.
    pub fn resize(&self, width: u32, height: u32) {
        self.surface.set((width, height));
    }

    #[inline]
    pub fn surface_size(&self) -> (u32, u32) {
        self.surface.get()
    }

    /// Clears the current target.
    pub fn clear(&self, color: Color) {
        let [r, g, b, a] = color.to_f32_array();
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }
    }

    fn drain_errors(&self) {
        for _ in 0..8 {
            if unsafe { self.gl.get_error() } == glow::NO_ERROR {
                break;
            }
        }
    }

    fn framebuffer(&self) -> Result<glow::Framebuffer, DeviceError> {
        if let Some(fbo) = self.framebuffer.get() {
            return Ok(fbo);
        }
        let fbo = unsafe { self.gl.create_framebuffer() }
            .map_err(|message| DeviceError::Allocation { what: "framebuffer", message })?;
        self.framebuffer.set(Some(fbo));
        Ok(fbo)
    }

    /// Built-in uniforms, draw texture on unit 0, shared vertex array.
    fn prepare(&self, texture: Option<&GlTexture>) {
        let program = self.bound.borrow();
        let gl = &self.gl;
        unsafe {
            if let Some(location) = program.location("u_projview") {
                gl.uniform_matrix_4_f32_slice(Some(&location), false, self.projview.get().as_array());
            }
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, texture.map(|t| t.raw));
            if let Some(location) = program.location("u_use_texture") {
                gl.uniform_1_i32(Some(&location), i32::from(texture.is_some()));
            }
            if let Some(location) = program.location("u_texture") {
                gl.uniform_1_i32(Some(&location), 0);
            }
            gl.bind_vertex_array(Some(self.vao));
        }
    }

    /// Points the attributes at the buffer bound to `ARRAY_BUFFER`.
    fn vertex_layout(&self) {
        let stride = Vertex::STRIDE as i32;
        unsafe {
            self.gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            self.gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, stride, 12);
            self.gl.vertex_attrib_pointer_f32(2, 4, glow::UNSIGNED_BYTE, true, stride, 20);
        }
    }
}

impl Drop for GlBackend {
    fn drop(&mut self) {
        unsafe {
            if let Some(fbo) = self.framebuffer.take() {
                self.gl.delete_framebuffer(fbo);
            }
            self.gl.delete_buffer(self.stream);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

impl Backend for GlBackend {
    type Buffer = GlBuffer;
    type Program = GlProgram;
    type Texture = GlTexture;

    fn create_buffer(&self, kind: BufferKind, contents: &[u8], len: usize) -> Result<GlBuffer, DeviceError> {
        let target = match kind {
            BufferKind::Vertex => glow::ARRAY_BUFFER,
            BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
        };

        self.drain_errors();
        unsafe {
            let raw = self
                .gl
                .create_buffer()
                .map_err(|message| DeviceError::Allocation { what: "buffer", message })?;

            // Element array bindings are vertex array state.
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.bind_buffer(target, Some(raw));
            self.gl.buffer_data_u8_slice(target, contents, glow::STATIC_DRAW);

            let code = self.gl.get_error();
            if code != glow::NO_ERROR {
                self.gl.delete_buffer(raw);
                return Err(DeviceError::Upload { kind, len, code });
            }
            Ok(GlBuffer::new(Rc::clone(&self.gl), raw, kind))
        }
    }

    fn compile_program(&self, vertex: &str, fragment: &str) -> Result<GlProgram, DeviceError> {
        let inner = program::link(&self.gl, &self.init.glsl_version, vertex, fragment)?;
        Ok(GlProgram { inner: Rc::new(inner) })
    }

    fn bind_program(&self, program: Option<&GlProgram>) -> Result<(), DeviceError> {
        let inner = program.map_or(&self.builtin, |p| &p.inner);

        self.drain_errors();
        unsafe {
            self.gl.use_program(Some(inner.raw));
            let code = self.gl.get_error();
            if code != glow::NO_ERROR {
                let previous = self.bound.borrow().raw;
                self.gl.use_program(Some(previous));
                return Err(DeviceError::Bind { code });
            }
        }
        *self.bound.borrow_mut() = Rc::clone(inner);
        Ok(())
    }

    fn set_uniform(&self, program: &GlProgram, name: &str, value: &UniformValue<GlTexture>) {
        let Some(location) = program.inner.location(name) else {
            log::trace!("uniform `{name}` is not declared; skipped");
            return;
        };
        let location = Some(&location);
        let gl = &self.gl;

        unsafe {
            match value {
                UniformValue::Bool(v) => gl.uniform_1_i32(location, i32::from(*v)),
                UniformValue::Int(v) => gl.uniform_1_i32(location, *v),
                UniformValue::IntArray(v) => gl.uniform_1_i32_slice(location, v),
                UniformValue::IntVec4([x, y, z, w]) => gl.uniform_4_i32(location, *x, *y, *z, *w),
                UniformValue::Float(v) => gl.uniform_1_f32(location, *v),
                UniformValue::FloatArray(v) => gl.uniform_1_f32_slice(location, v),
                UniformValue::FloatVec4([x, y, z, w]) => gl.uniform_4_f32(location, *x, *y, *z, *w),
                UniformValue::Matrix(m) => gl.uniform_matrix_4_f32_slice(location, false, m),
                UniformValue::Sampler { texture, unit } => {
                    gl.active_texture(glow::TEXTURE0 + unit);
                    gl.bind_texture(glow::TEXTURE_2D, Some(texture.raw));
                    gl.uniform_1_i32(location, *unit as i32);
                    gl.active_texture(glow::TEXTURE0);
                }
            }
        }
    }

    fn set_target(&self, target: Option<&GlTexture>, transform: &Transform) -> Result<(), DeviceError> {
        let (width, height, projection) = match target {
            None => {
                unsafe { self.gl.bind_framebuffer(glow::FRAMEBUFFER, None) };
                let (w, h) = self.surface.get();
                (w, h, Transform::orthographic(0.0, w as f32, h as f32, 0.0, -1.0, 1.0))
            }
            Some(texture) => {
                let fbo = self.framebuffer()?;
                unsafe {
                    self.gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
                    self.gl.framebuffer_texture_2d(
                        glow::FRAMEBUFFER,
                        glow::COLOR_ATTACHMENT0,
                        glow::TEXTURE_2D,
                        Some(texture.raw),
                        0,
                    );
                    let status = self.gl.check_framebuffer_status(glow::FRAMEBUFFER);
                    if status != glow::FRAMEBUFFER_COMPLETE {
                        self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                        return Err(DeviceError::Target(format!(
                            "framebuffer incomplete (status {status:#06x})"
                        )));
                    }
                }
                // Texture rows run bottom-up in GL, so the target keeps +Y up.
                let (w, h) = (texture.width(), texture.height());
                (w, h, Transform::orthographic(0.0, w as f32, 0.0, h as f32, -1.0, 1.0))
            }
        };

        unsafe { self.gl.viewport(0, 0, width as i32, height as i32) };
        self.projview.set(transform.then(&projection));
        Ok(())
    }

    fn draw_buffer(&self, vertices: &GlBuffer, topology: Topology, count: usize, texture: Option<&GlTexture>) {
        self.prepare(texture);
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertices.raw));
            self.vertex_layout();
            self.gl.draw_arrays(gl_mode(topology), 0, count as i32);
        }
    }

    fn draw_indexed(
        &self,
        vertices: &GlBuffer,
        indices: &GlBuffer,
        topology: Topology,
        count: usize,
        texture: Option<&GlTexture>,
    ) {
        self.prepare(texture);
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertices.raw));
            self.vertex_layout();
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(indices.raw));
            self.gl
                .draw_elements(gl_mode(topology), count as i32, glow::UNSIGNED_SHORT, 0);
        }
    }

    fn draw_vertices(&self, vertices: &[Vertex], topology: Topology, texture: Option<&GlTexture>) {
        if vertices.is_empty() {
            return;
        }
        let bytes: &[u8] = bytemuck::cast_slice(vertices);

        self.prepare(texture);
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.stream));
            if bytes.len() > self.stream_capacity.get() {
                log::debug!("growing stream buffer to {} bytes", bytes.len());
                self.gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, bytes, glow::STREAM_DRAW);
                self.stream_capacity.set(bytes.len());
            } else {
                self.gl.buffer_sub_data_u8_slice(glow::ARRAY_BUFFER, 0, bytes);
            }
            self.vertex_layout();
            self.gl.draw_arrays(gl_mode(topology), 0, vertices.len() as i32);
        }
    }

    fn create_texture(&self, width: u32, height: u32, rgba: &[u8]) -> Result<GlTexture, DeviceError> {
        let expected = crate::device::backend::rgba_len(width, height);
        if rgba.len() != expected {
            return Err(DeviceError::TextureData { width, height, expected, actual: rgba.len() });
        }

        unsafe {
            let raw = self
                .gl
                .create_texture()
                .map_err(|message| DeviceError::Allocation { what: "texture", message })?;

            self.gl.bind_texture(glow::TEXTURE_2D, Some(raw));
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            let pixels = (!rgba.is_empty()).then_some(rgba);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                pixels,
            );
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::NEAREST as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::NEAREST as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            self.gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(GlTexture::new(Rc::clone(&self.gl), raw, width, height))
        }
    }
}
