use bytemuck::{Pod, Zeroable};

use super::ColorMatrix;

/// 8-bit straight-alpha RGBA color.
///
/// Layout is `#[repr(C)]` `r, g, b, a` so a `Color` can be embedded directly in
/// vertex data and read by the GPU as four normalized bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::rgba(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Normalized `[r, g, b, a]` in `[0, 1]`, the form float uniforms expect.
    #[inline]
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Weighted per-channel average of `self` and `other`.
    ///
    /// Each channel is `(self * weight_self + other * weight_other) / (weight_self + weight_other)`,
    /// computed in `f32` and truncated to the 8-bit range.
    ///
    /// The weights must not sum to zero; that is a caller bug and is only checked
    /// in debug builds.
    pub fn mix(self, other: Color, weight_self: f32, weight_other: f32) -> Color {
        let total = weight_self + weight_other;
        debug_assert!(total != 0.0, "Color::mix: weights sum to zero");

        let channel = |a: u8, b: u8| -> u8 {
            // `as` truncates toward zero and saturates at the u8 bounds.
            ((a as f32 * weight_self + b as f32 * weight_other) / total) as u8
        };

        Color {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: channel(self.a, other.a),
        }
    }

    /// Applies a color-transform matrix to the RGB channels. Alpha is unchanged.
    ///
    /// Per row: `clamp(bias + (rc*r + gc*g + bc*b) / 255, 0, 255)` with truncating
    /// integer division.
    pub fn transform(self, matrix: &ColorMatrix) -> Color {
        let (r, g, b) = (self.r as i64, self.g as i64, self.b as i64);

        // i64 holds 3 * i32::MAX * 255 plus the bias without overflow.
        let channel = |row: [i32; 4]| -> u8 {
            let [bias, rc, gc, bc] = row.map(i64::from);
            (bias + (rc * r + gc * g + bc * b) / 255).clamp(0, 255) as u8
        };

        Color {
            r: channel(matrix.row(0)),
            g: channel(matrix.row(1)),
            b: channel(matrix.row(2)),
            a: self.a,
        }
    }

    /// Multiplies every channel by `mask` (`c * m / 255`).
    ///
    /// Opaque white is the identity mask.
    #[inline]
    pub fn modulate(self, mask: Color) -> Color {
        let mul = |c: u8, m: u8| ((c as u16 * m as u16) / 255) as u8;
        Color {
            r: mul(self.r, mask.r),
            g: mul(self.g, mask.g),
            b: mul(self.b, mask.b),
            a: mul(self.a, mask.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── mix ───────────────────────────────────────────────────────────────

    #[test]
    fn mix_black_white_equal_weights_truncates() {
        let c = Color::rgba(0, 0, 0, 255).mix(Color::rgba(255, 255, 255, 255), 1.0, 1.0);
        assert_eq!(c, Color::rgba(127, 127, 127, 255));
    }

    #[test]
    fn mix_full_weight_on_one_side_returns_it() {
        let a = Color::rgba(10, 20, 30, 40);
        let b = Color::rgba(200, 100, 50, 250);
        assert_eq!(a.mix(b, 1.0, 0.0), a);
        assert_eq!(a.mix(b, 0.0, 3.0), b);
    }

    #[test]
    fn mix_uneven_weights() {
        // (0 * 3 + 200 * 1) / 4 = 50
        let c = Color::rgba(0, 0, 0, 0).mix(Color::rgba(200, 200, 200, 200), 3.0, 1.0);
        assert_eq!(c, Color::rgba(50, 50, 50, 50));
    }

    // ── transform ─────────────────────────────────────────────────────────

    #[test]
    fn identity_matrix_reproduces_input() {
        for c in [
            Color::rgba(0, 0, 0, 0),
            Color::rgba(1, 128, 254, 7),
            Color::rgba(255, 255, 255, 255),
            Color::rgba(33, 66, 99, 200),
        ] {
            assert_eq!(c.transform(&ColorMatrix::IDENTITY), c);
        }
    }

    #[test]
    fn transform_clamps_high_and_low() {
        let m = ColorMatrix::new([
            [300, 255, 0, 0],  // always above 255
            [-300, 255, 0, 0], // always below 0
            [0, 0, 0, 510],    // doubles blue
        ]);
        let c = Color::rgba(100, 100, 200, 9).transform(&m);
        assert_eq!(c, Color::rgba(255, 0, 255, 9));
    }

    #[test]
    fn transform_uses_truncating_division() {
        // (1 * 100) / 255 == 0 in integer math.
        let m = ColorMatrix::new([[0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]);
        assert_eq!(Color::rgb(100, 100, 100).transform(&m), Color::rgb(0, 0, 0));
    }

    #[test]
    fn transform_negative_coefficient_truncates_toward_zero() {
        // bias 10 + (-128 * 2) / 255 = 10 + (-1) = 9
        let m = ColorMatrix::new([[10, -128, 0, 0], [0, 255, 0, 0], [0, 0, 255, 0]]);
        assert_eq!(Color::rgb(2, 0, 0).transform(&m).r, 9);
    }

    #[test]
    fn transform_huge_coefficients_clamp_instead_of_overflowing() {
        let m = ColorMatrix::new([
            [0, 10_000_000, 0, 0],
            [0, 0, -10_000_000, 0],
            [i32::MAX, i32::MAX, i32::MAX, i32::MAX],
        ]);
        let c = Color::rgba(255, 255, 255, 7).transform(&m);
        assert_eq!(c, Color::rgba(255, 0, 255, 7));
    }

    // ── modulate ──────────────────────────────────────────────────────────

    #[test]
    fn modulate_by_white_is_identity() {
        let c = Color::rgba(12, 34, 56, 78);
        assert_eq!(c.modulate(Color::WHITE), c);
    }

    #[test]
    fn modulate_by_half_gray() {
        let c = Color::WHITE.modulate(Color::rgba(128, 0, 255, 128));
        assert_eq!(c, Color::rgba(128, 0, 255, 128));
    }

    #[test]
    fn color_is_four_bytes_in_rgba_order() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(bytemuck::bytes_of(&c), &[1, 2, 3, 4]);
        assert_eq!(Color::from_bytes(c.to_bytes()), c);
    }
}
