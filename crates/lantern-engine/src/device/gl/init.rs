/// Initialization parameters for the glow backend.
///
/// Keep this structure small. Add fields only when a concrete driver or
/// platform requirement exists.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// `#version` line prepended to shader sources that do not start with one.
    ///
    /// The built-in program is written against GLSL 3.30 core.
    pub glsl_version: String,

    /// Initial capacity, in vertices, of the streaming buffer used by image and
    /// gradient draws. It grows on demand.
    pub stream_capacity: usize,

    /// Backbuffer size in pixels until the first `resize`.
    pub surface_size: (u32, u32),

    /// Enable straight-alpha blending (`SRC_ALPHA`, `ONE_MINUS_SRC_ALPHA`).
    pub blending: bool,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            glsl_version: "#version 330 core".to_owned(),
            stream_capacity: 1024,
            surface_size: (800, 600),
            blending: true,
        }
    }
}
