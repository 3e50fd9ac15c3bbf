//! Immediate image and gradient drawing.
//!
//! Every helper streams its quads through one `draw_vertices` call on the
//! current target and program. Vertex colors carry the mask, which the program
//! multiplies with the texture sample.

use crate::coords::Rect;
use crate::device::{Backend, Image};
use crate::geometry::{Topology, Vertex};
use crate::paint::{Color, CornerColors};

use super::RenderContext;

/// Two triangles covering `dst`, sampling `uv` (normalized), corner colors in
/// upper-left, upper-right, lower-right, lower-left order.
fn quad(dst: Rect, uv: Rect, colors: [Color; 4]) -> [Vertex; 6] {
    let [ul, ur, lr, ll] = colors;
    let v_ul = Vertex::new(dst.x, dst.y, 0.0, uv.x, uv.y, ul);
    let v_ur = Vertex::new(dst.right(), dst.y, 0.0, uv.right(), uv.y, ur);
    let v_lr = Vertex::new(dst.right(), dst.bottom(), 0.0, uv.right(), uv.bottom(), lr);
    let v_ll = Vertex::new(dst.x, dst.bottom(), 0.0, uv.x, uv.bottom(), ll);
    [v_ul, v_ur, v_lr, v_ul, v_lr, v_ll]
}

fn image_size<I: Image>(image: &I) -> (f32, f32) {
    (image.width() as f32, image.height() as f32)
}

/// Draws the pixel region `src` of `image` stretched over `dst`.
pub fn draw_region_masked<B: Backend>(ctx: &RenderContext<B>, image: &B::Texture, mask: Color, src: Rect, dst: Rect) {
    let (iw, ih) = image_size(image);
    if iw == 0.0 || ih == 0.0 || src.is_empty() || dst.is_empty() {
        return;
    }
    let uv = Rect::new(src.x / iw, src.y / ih, src.width / iw, src.height / ih);
    ctx.backend()
        .draw_vertices(&quad(dst, uv, [mask; 4]), Topology::Triangles, Some(image));
}

/// Draws `image` unscaled with its top-left corner at `(x, y)`.
pub fn draw_masked<B: Backend>(ctx: &RenderContext<B>, image: &B::Texture, mask: Color, x: f32, y: f32) {
    let (iw, ih) = image_size(image);
    draw_region_masked(ctx, image, mask, Rect::new(0.0, 0.0, iw, ih), Rect::new(x, y, iw, ih));
}

/// Draws all of `image` stretched over `dst`.
pub fn draw_scaled_masked<B: Backend>(ctx: &RenderContext<B>, image: &B::Texture, mask: Color, dst: Rect) {
    let (iw, ih) = image_size(image);
    draw_region_masked(ctx, image, mask, Rect::new(0.0, 0.0, iw, ih), dst);
}

/// Repeats `image` unscaled across `dst`, starting at its top-left corner.
///
/// Tiles on the right and bottom edges are cropped to `dst`.
pub fn draw_tiled_masked<B: Backend>(ctx: &RenderContext<B>, image: &B::Texture, mask: Color, dst: Rect) {
    let (iw, ih) = image_size(image);
    if iw == 0.0 || ih == 0.0 || dst.is_empty() {
        return;
    }

    // Tile offsets are derived from the index, never accumulated.
    let cols = (dst.width / iw).ceil() as usize;
    let rows = (dst.height / ih).ceil() as usize;
    let mut vertices = Vec::new();
    for row in 0..rows {
        let oy = row as f32 * ih;
        let th = ih.min(dst.height - oy);
        for col in 0..cols {
            let ox = col as f32 * iw;
            let tw = iw.min(dst.width - ox);
            let uv = Rect::new(0.0, 0.0, tw / iw, th / ih);
            let tile = Rect::new(dst.x + ox, dst.y + oy, tw, th);
            vertices.extend_from_slice(&quad(tile, uv, [mask; 4]));
        }
    }

    ctx.backend()
        .draw_vertices(&vertices, Topology::Triangles, Some(image));
}

/// Fills `dst` with a four-corner gradient (untextured).
pub fn draw_gradient<B: Backend>(ctx: &RenderContext<B>, dst: Rect, colors: CornerColors) {
    if dst.is_empty() {
        return;
    }
    let uv = Rect::new(0.0, 0.0, 0.0, 0.0);
    ctx.backend()
        .draw_vertices(&quad(dst, uv, colors.to_array()), Topology::Triangles, None);
}

#[cfg(test)]
mod tests {
    use crate::device::recording::{Call, RecordingBackend};

    use super::*;

    fn streamed(ctx: &RenderContext<RecordingBackend>) -> Vec<Vec<Vertex>> {
        ctx.backend()
            .draws()
            .into_iter()
            .filter_map(|c| match c {
                Call::DrawVertices { vertices, .. } => Some(vertices),
                _ => None,
            })
            .collect()
    }

    // ── single image ──────────────────────────────────────────────────────

    #[test]
    fn draw_masked_places_image_unscaled() {
        let ctx = RenderContext::new(RecordingBackend::default());
        let img = ctx.create_texture(4, 2, &[0; 32]).unwrap();
        let mask = Color::rgba(10, 20, 30, 40);
        draw_masked(&ctx, &*img, mask, 5.0, 6.0);

        let quads = streamed(&ctx);
        assert_eq!(quads.len(), 1);
        let v = &quads[0];
        assert_eq!(v.len(), 6);
        assert_eq!((v[0].x, v[0].y, v[0].u, v[0].v), (5.0, 6.0, 0.0, 0.0));
        assert_eq!((v[2].x, v[2].y, v[2].u, v[2].v), (9.0, 8.0, 1.0, 1.0));
        assert!(v.iter().all(|v| v.color == mask));
    }

    #[test]
    fn region_maps_to_normalized_texcoords() {
        let ctx = RenderContext::new(RecordingBackend::default());
        let img = ctx.create_texture(4, 4, &[0; 64]).unwrap();
        draw_region_masked(
            &ctx,
            &*img,
            Color::WHITE,
            Rect::new(1.0, 2.0, 2.0, 2.0),
            Rect::new(0.0, 0.0, 8.0, 8.0),
        );
        let quads = streamed(&ctx);
        let v = &quads[0];
        assert_eq!((v[0].u, v[0].v), (0.25, 0.5));
        assert_eq!((v[2].u, v[2].v), (0.75, 1.0));
    }

    #[test]
    fn empty_destination_draws_nothing() {
        let ctx = RenderContext::new(RecordingBackend::default());
        let img = ctx.create_texture(1, 1, &[0; 4]).unwrap();
        draw_scaled_masked(&ctx, &*img, Color::WHITE, Rect::new(0.0, 0.0, 0.0, 10.0));
        draw_tiled_masked(&ctx, &*img, Color::WHITE, Rect::new(0.0, 0.0, 10.0, -1.0));
        draw_gradient(&ctx, Rect::default(), CornerColors::uniform(Color::BLACK));
        assert!(ctx.backend().draws().is_empty());
    }

    #[test]
    fn zero_sized_image_draws_nothing() {
        let ctx = RenderContext::new(RecordingBackend::default());
        let img = ctx.create_texture(0, 0, &[]).unwrap();
        draw_masked(&ctx, &*img, Color::WHITE, 0.0, 0.0);
        draw_tiled_masked(&ctx, &*img, Color::WHITE, Rect::new(0.0, 0.0, 8.0, 8.0));
        assert!(ctx.backend().draws().is_empty());
    }

    // ── tiling ────────────────────────────────────────────────────────────

    #[test]
    fn tiling_crops_partial_tiles() {
        let ctx = RenderContext::new(RecordingBackend::default());
        let img = ctx.create_texture(10, 10, &[0; 400]).unwrap();
        draw_tiled_masked(&ctx, &*img, Color::WHITE, Rect::new(0.0, 0.0, 25.0, 10.0));

        let quads = streamed(&ctx);
        assert_eq!(quads.len(), 1, "all tiles go out in one draw");
        let v = &quads[0];
        assert_eq!(v.len(), 18);

        let last = &v[12..];
        assert_eq!((last[0].x, last[2].x), (20.0, 25.0));
        assert_eq!(last[2].u, 0.5);
    }

    #[test]
    fn tiling_far_from_origin_emits_one_quad_per_tile() {
        let ctx = RenderContext::new(RecordingBackend::default());
        let img = ctx.create_texture(1, 1, &[0; 4]).unwrap();
        draw_tiled_masked(&ctx, &*img, Color::WHITE, Rect::new(20_000_000.0, 0.0, 4.0, 1.0));

        let quads = streamed(&ctx);
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].len(), 4 * 6);
        assert!(quads[0].iter().all(|v| v.x >= 20_000_000.0));
    }

    // ── gradient ──────────────────────────────────────────────────────────

    #[test]
    fn gradient_colors_follow_corners() {
        let ctx = RenderContext::new(RecordingBackend::default());
        let colors = CornerColors::new(
            Color::rgb(1, 0, 0),
            Color::rgb(2, 0, 0),
            Color::rgb(3, 0, 0),
            Color::rgb(4, 0, 0),
        );
        draw_gradient(&ctx, Rect::new(0.0, 0.0, 10.0, 10.0), colors);

        match &ctx.backend().draws()[0] {
            Call::DrawVertices { vertices, topology, texture } => {
                assert_eq!(*topology, Topology::Triangles);
                assert_eq!(*texture, None);
                let reds: Vec<u8> = vertices.iter().map(|v| v.color.r).collect();
                assert_eq!(reds, [1, 2, 3, 1, 3, 4]);
                assert_eq!((vertices[5].x, vertices[5].y), (0.0, 10.0));
            }
            other => panic!("unexpected call {other:?}"),
        }
    }
}
