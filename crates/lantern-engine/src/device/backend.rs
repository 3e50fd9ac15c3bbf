use std::fmt;
use std::io::{self, Read};

use crate::coords::Transform;
use crate::geometry::{Topology, Vertex};
use crate::shader::UniformValue;

use super::DeviceError;

/// What a GPU buffer stores.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BufferKind {
    /// `Vertex` records.
    Vertex,
    /// `u16` indices.
    Index,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::Vertex => f.write_str("vertex"),
            BufferKind::Index => f.write_str("index"),
        }
    }
}

/// Image collaborator: a texture that knows its pixel size.
pub trait Image {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Native rendering interface.
///
/// Handle types own their native resource and release it on `Drop`. All calls
/// happen on the thread that owns the graphics context; implementations are not
/// expected to be `Send`.
pub trait Backend {
    /// Immutable uploaded vertex or index storage.
    type Buffer;
    /// Linked vertex + fragment program.
    type Program;
    /// Sampled image / render target.
    type Texture: Image;

    /// Allocates an immutable buffer holding `contents` (`len` elements of `kind`).
    ///
    /// On failure nothing stays allocated.
    fn create_buffer(
        &self,
        kind: BufferKind,
        contents: &[u8],
        len: usize,
    ) -> Result<Self::Buffer, DeviceError>;

    /// Compiles and links a program. Diagnostics come back verbatim in the error.
    fn compile_program(&self, vertex: &str, fragment: &str) -> Result<Self::Program, DeviceError>;

    /// Makes `program` current; `None` restores the built-in program.
    fn bind_program(&self, program: Option<&Self::Program>) -> Result<(), DeviceError>;

    /// Sets one uniform on `program`, which must be the bound program.
    ///
    /// Names the program does not declare are ignored.
    fn set_uniform(&self, program: &Self::Program, name: &str, value: &UniformValue<Self::Texture>);

    /// Selects the draw target (`None` = backbuffer) and the model transform.
    fn set_target(&self, target: Option<&Self::Texture>, transform: &Transform) -> Result<(), DeviceError>;

    /// Draws the first `count` vertices of an uploaded buffer.
    fn draw_buffer(
        &self,
        vertices: &Self::Buffer,
        topology: Topology,
        count: usize,
        texture: Option<&Self::Texture>,
    );

    /// Draws `count` indices from `indices` against `vertices`.
    fn draw_indexed(
        &self,
        vertices: &Self::Buffer,
        indices: &Self::Buffer,
        topology: Topology,
        count: usize,
        texture: Option<&Self::Texture>,
    );

    /// Draws client-side vertices (streamed, nothing retained).
    fn draw_vertices(&self, vertices: &[Vertex], topology: Topology, texture: Option<&Self::Texture>);

    /// Creates a texture from tightly packed RGBA8 rows.
    fn create_texture(&self, width: u32, height: u32, rgba: &[u8]) -> Result<Self::Texture, DeviceError>;

    /// Reads one embedded image of the given size from a stream.
    ///
    /// The default encoding is `width * height` RGBA8 pixels, row-major.
    fn read_texture(
        &self,
        reader: &mut dyn Read,
        width: u32,
        height: u32,
    ) -> Result<Self::Texture, DeviceError> {
        // Sizes come from untrusted headers: grow with the bytes actually read.
        let len = rgba_len(width, height);
        let mut rgba = Vec::new();
        Read::take(&mut *reader, len as u64).read_to_end(&mut rgba)?;
        if rgba.len() != len {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("image data ended after {} of {len} bytes", rgba.len()),
            )
            .into());
        }
        self.create_texture(width, height, &rgba)
    }
}

/// Byte length of a tightly packed RGBA8 image.
#[inline]
pub(crate) fn rgba_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}
