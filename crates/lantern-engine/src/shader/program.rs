use std::borrow::Cow;
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::coords::Transform;
use crate::device::{Backend, Gpu};
use crate::paint::Color;

use super::uniform::{UniformCache, UniformValue};
use super::{MAX_UNIFORM_NAME_LEN, ShaderError};

/// Identity of a program within its context. Never reused.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ProgramId(u64);

impl ProgramId {
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Where a program's source text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// Read from disk at compile time (and again by [`ShaderProgram::duplicate`]).
    Files { vertex: PathBuf, fragment: PathBuf },
    /// Kept in memory.
    Inline { vertex: String, fragment: String },
}

impl ShaderSource {
    fn load(&self) -> Result<(Cow<'_, str>, Cow<'_, str>), ShaderError> {
        match self {
            ShaderSource::Files { vertex, fragment } => {
                Ok((Cow::Owned(read_source(vertex)?), Cow::Owned(read_source(fragment)?)))
            }
            ShaderSource::Inline { vertex, fragment } => {
                Ok((Cow::Borrowed(vertex.as_str()), Cow::Borrowed(fragment.as_str())))
            }
        }
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    fs::read_to_string(path).map_err(|source| ShaderError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// A linked vertex + fragment program and its pending uniform writes.
///
/// Shared as `Rc<ShaderProgram<B>>`. Uniform setters take `&self`:
/// - if this program is the active one, the write is issued immediately
/// - otherwise it is queued and replayed by the next activation
///
/// Dropping the program releases queued samplers and arrays before the native
/// program.
pub struct ShaderProgram<B: Backend> {
    id: ProgramId,
    gpu: Rc<Gpu<B>>,
    source: ShaderSource,
    cache: RefCell<UniformCache<B::Texture>>,
    raw: B::Program,
}

impl<B: Backend> ShaderProgram<B> {
    pub(crate) fn compile(gpu: Rc<Gpu<B>>, source: ShaderSource) -> Result<Self, ShaderError> {
        let raw = {
            let (vertex, fragment) = source.load()?;
            gpu.backend()
                .compile_program(&vertex, &fragment)
                .inspect_err(|err| log::warn!("{err}"))?
        };

        let id = ProgramId(gpu.next_id());
        log::debug!("shader program {} ready", id.get());

        Ok(Self {
            id,
            gpu,
            source,
            cache: RefCell::new(UniformCache::new()),
            raw,
        })
    }

    #[inline]
    pub fn id(&self) -> ProgramId {
        self.id
    }

    #[inline]
    pub fn source(&self) -> &ShaderSource {
        &self.source
    }

    /// Whether this program is the context's active program.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.gpu.active_program() == Some(self.id)
    }

    /// Number of queued uniform writes.
    pub fn pending_uniforms(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Compiles a fresh program from the same source.
    ///
    /// File sources are read again. The copy starts with an empty cache and is
    /// not active.
    pub fn duplicate(&self) -> Result<Rc<ShaderProgram<B>>, ShaderError> {
        Self::compile(Rc::clone(&self.gpu), self.source.clone()).map(Rc::new)
    }

    pub fn set_bool(&self, name: &str, value: bool) -> Result<(), ShaderError> {
        self.put(name, UniformValue::Bool(value))
    }

    pub fn set_int(&self, name: &str, value: i32) -> Result<(), ShaderError> {
        self.put(name, UniformValue::Int(value))
    }

    /// Copies `values`; the caller's slice is not retained.
    pub fn set_int_array(&self, name: &str, values: &[i32]) -> Result<(), ShaderError> {
        self.put(name, UniformValue::IntArray(values.to_vec()))
    }

    pub fn set_int_vec4(&self, name: &str, value: [i32; 4]) -> Result<(), ShaderError> {
        self.put(name, UniformValue::IntVec4(value))
    }

    pub fn set_float(&self, name: &str, value: f32) -> Result<(), ShaderError> {
        self.put(name, UniformValue::Float(value))
    }

    /// Copies `values`; the caller's slice is not retained.
    pub fn set_float_array(&self, name: &str, values: &[f32]) -> Result<(), ShaderError> {
        self.put(name, UniformValue::FloatArray(values.to_vec()))
    }

    pub fn set_float_vec4(&self, name: &str, value: [f32; 4]) -> Result<(), ShaderError> {
        self.put(name, UniformValue::FloatVec4(value))
    }

    /// Normalized color as a `vec4`.
    pub fn set_color(&self, name: &str, color: Color) -> Result<(), ShaderError> {
        self.set_float_vec4(name, color.to_f32_array())
    }

    pub fn set_matrix(&self, name: &str, transform: &Transform) -> Result<(), ShaderError> {
        self.put(name, UniformValue::Matrix(*transform.as_array()))
    }

    /// Binds `texture` to texture unit `unit` and points the sampler at it.
    ///
    /// A queued sampler keeps the texture alive until it is replayed,
    /// overwritten, or the program is dropped.
    pub fn set_sampler(&self, name: &str, texture: &Rc<B::Texture>, unit: u32) -> Result<(), ShaderError> {
        self.put(name, UniformValue::Sampler { texture: Rc::clone(texture), unit })
    }

    fn put(&self, name: &str, value: UniformValue<B::Texture>) -> Result<(), ShaderError> {
        if name.len() > MAX_UNIFORM_NAME_LEN {
            return Err(ShaderError::UniformNameTooLong { len: name.len() });
        }

        if self.is_active() {
            self.gpu.backend().set_uniform(&self.raw, name, &value);
        } else {
            self.cache.borrow_mut().put(name, value);
        }
        Ok(())
    }

    /// Applies and then drops every queued write, oldest first.
    fn flush(&self) {
        let entries = self.cache.borrow_mut().take();
        if entries.is_empty() {
            return;
        }

        log::trace!("replaying {} uniform(s) on program {}", entries.len(), self.id.get());
        let backend = self.gpu.backend();
        for entry in entries {
            backend.set_uniform(&self.raw, &entry.name, &entry.value);
        }
    }
}

impl<B: Backend> Drop for ShaderProgram<B> {
    fn drop(&mut self) {
        let cache = self.cache.get_mut();
        if cache.len() > 0 {
            log::trace!(
                "program {} dropped with {} unflushed uniform(s)",
                self.id.get(),
                cache.len()
            );
        }
        cache.clear();

        if self.is_active() {
            self.gpu.set_active_program(None);
            if let Err(err) = self.gpu.backend().bind_program(None) {
                log::warn!("failed to unbind dropped program {}: {err}", self.id.get());
            }
        }
        // `raw` is released after this, by its own `Drop`.
    }
}

/// Makes `program` (or the built-in program for `None`) current.
///
/// Without `force`, activating the already-active program does nothing. After a
/// successful bind the program's queued uniforms are replayed and its cache is
/// empty. A failed bind leaves the previous program active.
pub(crate) fn activate<B: Backend>(
    gpu: &Gpu<B>,
    program: Option<&ShaderProgram<B>>,
    force: bool,
) -> Result<(), ShaderError> {
    let id = program.map(ShaderProgram::id);
    if !force && gpu.active_program() == id {
        return Ok(());
    }

    if let Some(p) = program {
        debug_assert!(std::ptr::eq(gpu, Rc::as_ptr(&p.gpu)), "program belongs to another context");
    }

    gpu.backend().bind_program(program.map(|p| &p.raw))?;

    if let Some(p) = program {
        p.flush();
    }
    gpu.set_active_program(id);
    Ok(())
}
