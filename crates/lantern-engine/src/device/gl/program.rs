use std::borrow::Cow;
use std::rc::Rc;

use glow::HasContext;

use crate::device::{DeviceError, ShaderStage};

use super::resources::ProgramInner;

/// Fixed attribute locations, bound before linking.
pub(super) const ATTRIBUTES: [(u32, &str); 3] = [(0, "a_position"), (1, "a_texcoord"), (2, "a_color")];

pub(super) const DEFAULT_VERTEX: &str = include_str!("shaders/default.vert");
pub(super) const DEFAULT_FRAGMENT: &str = include_str!("shaders/default.frag");

fn with_version<'a>(version: &str, source: &'a str) -> Cow<'a, str> {
    if source.trim_start().starts_with("#version") {
        Cow::Borrowed(source)
    } else {
        Cow::Owned(format!("{version}\n{source}"))
    }
}

fn compile_stage(
    gl: &glow::Context,
    stage: ShaderStage,
    version: &str,
    source: &str,
) -> Result<glow::Shader, DeviceError> {
    let ty = match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    };

    unsafe {
        let shader = gl
            .create_shader(ty)
            .map_err(|message| DeviceError::Allocation { what: "shader", message })?;
        gl.shader_source(shader, &with_version(version, source));
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(DeviceError::Compile { stage, log });
        }
        Ok(shader)
    }
}

/// Compiles both stages and links them. Nothing stays allocated on failure.
pub(super) fn link(
    gl: &Rc<glow::Context>,
    version: &str,
    vertex: &str,
    fragment: &str,
) -> Result<ProgramInner, DeviceError> {
    let vs = compile_stage(gl, ShaderStage::Vertex, version, vertex)?;
    let fs = match compile_stage(gl, ShaderStage::Fragment, version, fragment) {
        Ok(fs) => fs,
        Err(err) => {
            unsafe { gl.delete_shader(vs) };
            return Err(err);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(message) => {
                gl.delete_shader(vs);
                gl.delete_shader(fs);
                return Err(DeviceError::Allocation { what: "program", message });
            }
        };

        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        for (location, name) in ATTRIBUTES {
            gl.bind_attrib_location(program, location, name);
        }
        gl.link_program(program);
        let linked = gl.get_program_link_status(program);

        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);

        if !linked {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(DeviceError::Link { log });
        }
        Ok(ProgramInner::new(Rc::clone(gl), program))
    }
}
