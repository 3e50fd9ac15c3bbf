use std::f32::consts::TAU;
use std::rc::Rc;
use std::time::Instant;

use anyhow::{Context, Result};

use lantern_engine::coords::{Rect, Transform};
use lantern_engine::device::gl::GlBackend;
use lantern_engine::geometry::{Topology, Vertex};
use lantern_engine::paint::{Color, CornerColors};
use lantern_engine::render::{Model, RenderContext};
use lantern_engine::shader::ShaderProgram;
use lantern_engine::style::{BackgroundMode, FormatVersion, RwsHeader, Slot, WindowStyle};

const PULSE_VERTEX: &str = r#"
in vec3 a_position;
in vec2 a_texcoord;
in vec4 a_color;

uniform mat4 u_projview;
uniform float u_time;

out vec4 v_color;

void main() {
    float pulse = 1.0 + 0.08 * sin(u_time * 3.0);
    v_color = a_color;
    gl_Position = u_projview * vec4(a_position.xy * pulse, a_position.z, 1.0);
}
"#;

const PULSE_FRAGMENT: &str = r#"
in vec4 v_color;

uniform vec4 u_tint;

out vec4 o_color;

void main() {
    o_color = v_color * u_tint;
}
"#;

const SEGMENTS: u16 = 48;
const RADIUS: f32 = 120.0;
const SKIN_EDGE: usize = 8;
const BACKDROP: Color = Color::rgb(24, 26, 32);

/// Demo content: a skinned panel with a pulsing disc drawn over it.
pub struct Scene {
    ctx: RenderContext<GlBackend>,
    program: Rc<ShaderProgram<GlBackend>>,
    disc: Rc<Model<GlBackend>>,
    panel: Rc<WindowStyle<GlBackend>>,
    started: Instant,
}

impl Scene {
    pub fn new(backend: GlBackend) -> Result<Self> {
        let ctx = RenderContext::new(backend);

        let program = ctx
            .create_program(PULSE_VERTEX, PULSE_FRAGMENT)
            .context("failed to build pulse program")?;
        // Not active yet: both writes wait in the cache until the first draw.
        program.set_color("u_tint", Color::rgb(255, 190, 90))?;
        program.set_float("u_time", 0.0)?;

        let disc = ctx.create_model(Some(Rc::clone(&program)));

        let fill = ctx.create_vertex_buffer();
        fill.push(Vertex::at(0.0, 0.0, Color::WHITE));
        fill.extend(ring(Color::rgba(255, 120, 40, 160), SEGMENTS + 1));
        fill.upload()?;
        disc.add_shape(ctx.create_shape(Topology::TriangleFan, fill, None, None));

        let rim = ctx.create_vertex_buffer();
        rim.extend(ring(Color::WHITE, SEGMENTS));
        rim.upload()?;
        let edges = ctx.create_index_buffer();
        edges.extend((0..SEGMENTS).flat_map(|i| [i, (i + 1) % SEGMENTS]));
        edges.upload()?;
        disc.add_shape(ctx.create_shape(Topology::Lines, rim, Some(edges), None));

        let skin = demo_skin();
        let panel = ctx
            .load_window_style(&mut skin.as_slice())
            .context("failed to load demo skin")?;

        log::info!("scene ready: {} shape(s), {:?} panel", disc.len(), panel.background());

        Ok(Self {
            ctx,
            program,
            disc,
            panel,
            started: Instant::now(),
        })
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.ctx.backend().resize(width, height);
    }

    pub fn draw(&self, width: u32, height: u32) -> Result<()> {
        let (w, h) = (width as f32, height as f32);

        self.ctx.render_to(None, &Transform::IDENTITY)?;
        self.ctx.backend().clear(BACKDROP);
        self.panel.draw(&self.ctx, Rect::new(24.0, 24.0, w - 48.0, h - 48.0))?;

        // The panel left the built-in program bound, so this is queued too.
        self.program
            .set_float("u_time", self.started.elapsed().as_secs_f32())?;
        self.disc.set_transform(Transform::translation(w * 0.5, h * 0.5, 0.0));
        self.disc.draw(&self.ctx, None)?;
        Ok(())
    }
}

fn ring(color: Color, count: u16) -> impl Iterator<Item = Vertex> {
    (0..count).map(move |i| {
        let angle = TAU * f32::from(i) / f32::from(SEGMENTS);
        Vertex::at(angle.cos() * RADIUS, angle.sin() * RADIUS, color)
    })
}

/// Version 1 skin built in memory: framed 8x8 pieces and a faint checker fill.
fn demo_skin() -> Vec<u8> {
    let header = RwsHeader {
        version: FormatVersion::V1,
        edge_size: SKIN_EDGE as u8,
        background: BackgroundMode::StretchGradient,
        gradient: CornerColors::new(
            Color::rgba(50, 70, 140, 210),
            Color::rgba(50, 70, 140, 210),
            Color::rgba(12, 12, 32, 235),
            Color::rgba(12, 12, 32, 235),
        ),
        edge_offsets: [0; 4],
    };

    let mut bytes = header.to_bytes().to_vec();
    for slot in Slot::ALL {
        for y in 0..SKIN_EDGE {
            for x in 0..SKIN_EDGE {
                bytes.extend_from_slice(&skin_pixel(slot, x, y).to_bytes());
            }
        }
    }
    bytes
}

fn skin_pixel(slot: Slot, x: usize, y: usize) -> Color {
    if slot == Slot::Background {
        return if (x + y) % 2 == 0 { Color::rgba(255, 255, 255, 20) } else { Color::TRANSPARENT };
    }
    let border = x == 0 || y == 0 || x == SKIN_EDGE - 1 || y == SKIN_EDGE - 1;
    if border {
        Color::rgb(205, 205, 225)
    } else {
        Color::rgb(80, 92, 136)
    }
}
