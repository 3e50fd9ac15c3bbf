use std::cell::Cell;
use std::io::Read;
use std::rc::Rc;

use crate::coords::Rect;
use crate::device::{Backend, Image};
use crate::paint::{Color, CornerColors};
use crate::render::{self, RenderContext, RenderError};

use super::{BackgroundMode, FormatVersion, RwsHeader, Slot, StyleError};

/// A resizable bordered panel skin: four corners, four edges, a center fill and
/// an optional four-corner gradient.
pub struct WindowStyle<B: Backend> {
    version: FormatVersion,
    background: BackgroundMode,
    gradient: CornerColors,
    mask: Cell<Color>,
    images: Vec<Rc<B::Texture>>,
}

fn image_dimensions<R: Read>(reader: &mut R, slot: Slot) -> Result<(u32, u32), StyleError> {
    let mut raw = [0u8; 4];
    reader.read_exact(&mut raw)?;
    let width = i16::from_le_bytes([raw[0], raw[1]]);
    let height = i16::from_le_bytes([raw[2], raw[3]]);
    if width < 0 || height < 0 {
        return Err(StyleError::ImageSize { slot, width, height });
    }
    Ok((width as u32, height as u32))
}

impl<B: Backend> WindowStyle<B> {
    /// Reads a header and nine images from `reader`.
    ///
    /// On failure every image decoded so far is released.
    pub fn read_from<R: Read>(backend: &B, reader: &mut R) -> Result<Self, StyleError> {
        let header = RwsHeader::read_from(reader)?;

        let mut images = Vec::with_capacity(Slot::ALL.len());
        for slot in Slot::ALL {
            let (width, height) = match header.version {
                FormatVersion::V1 => (u32::from(header.edge_size), u32::from(header.edge_size)),
                FormatVersion::V2 => image_dimensions(reader, slot)?,
            };
            let image = backend.read_texture(reader, width, height)?;
            images.push(Rc::new(image));
        }

        log::debug!(
            "loaded {:?} window style ({:?} background)",
            header.version,
            header.background
        );

        Ok(Self {
            version: header.version,
            background: header.background,
            gradient: header.gradient,
            mask: Cell::new(Color::WHITE),
            images,
        })
    }

    #[inline]
    pub fn version(&self) -> FormatVersion {
        self.version
    }

    #[inline]
    pub fn background(&self) -> BackgroundMode {
        self.background
    }

    #[inline]
    pub fn gradient(&self) -> CornerColors {
        self.gradient
    }

    /// Color multiplied into every image and the gradient. Opaque white by default.
    #[inline]
    pub fn mask(&self) -> Color {
        self.mask.get()
    }

    pub fn set_mask(&self, mask: Color) {
        self.mask.set(mask);
    }

    pub fn image(&self, slot: Slot) -> &Rc<B::Texture> {
        &self.images[slot.index()]
    }

    fn texture(&self, slot: Slot) -> &B::Texture {
        &self.images[slot.index()]
    }

    fn size(&self, slot: Slot) -> (f32, f32) {
        let image = self.texture(slot);
        (image.width() as f32, image.height() as f32)
    }

    /// Composites the panel over `dst` on the current target.
    ///
    /// Paint order: center fill, gradient, the four corners unscaled, then the
    /// four edges tiled between the corners.
    pub fn draw(&self, ctx: &RenderContext<B>, dst: Rect) -> Result<(), RenderError> {
        if dst.is_empty() {
            return Ok(());
        }
        ctx.use_default_program(false)?;
        let mask = self.mask.get();

        let fill = self.texture(Slot::Background);
        if self.background.tiles() {
            render::draw_tiled_masked(ctx, fill, mask, dst);
        } else if self.background.stretches() {
            render::draw_scaled_masked(ctx, fill, mask, dst);
        }
        if self.background.has_gradient() {
            render::draw_gradient(ctx, dst, self.gradient.masked(mask));
        }

        let (ul_w, ul_h) = self.size(Slot::UpperLeft);
        let (ur_w, ur_h) = self.size(Slot::UpperRight);
        let (lr_w, lr_h) = self.size(Slot::LowerRight);
        let (ll_w, ll_h) = self.size(Slot::LowerLeft);
        let (_, top_h) = self.size(Slot::Top);
        let (right_w, _) = self.size(Slot::Right);
        let (_, bottom_h) = self.size(Slot::Bottom);
        let (left_w, _) = self.size(Slot::Left);

        let (x, y, right, bottom) = (dst.x, dst.y, dst.right(), dst.bottom());

        render::draw_masked(ctx, self.texture(Slot::UpperLeft), mask, x, y);
        render::draw_masked(ctx, self.texture(Slot::UpperRight), mask, right - ur_w, y);
        render::draw_masked(ctx, self.texture(Slot::LowerRight), mask, right - lr_w, bottom - lr_h);
        render::draw_masked(ctx, self.texture(Slot::LowerLeft), mask, x, bottom - ll_h);

        let edges = [
            (Slot::Top, Rect::new(x + ul_w, y, right - ur_w - (x + ul_w), top_h)),
            (Slot::Right, Rect::new(right - right_w, y + ur_h, right_w, bottom - lr_h - (y + ur_h))),
            (Slot::Bottom, Rect::new(x + ll_w, bottom - bottom_h, right - lr_w - (x + ll_w), bottom_h)),
            (Slot::Left, Rect::new(x, y + ul_h, left_w, bottom - ll_h - (y + ul_h))),
        ];
        for (slot, rect) in edges {
            render::draw_tiled_masked(ctx, self.texture(slot), mask, rect);
        }
        Ok(())
    }
}
