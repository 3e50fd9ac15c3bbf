/// Integer color-transform matrix.
///
/// Three rows (red, green, blue output), each `[bias, r_coef, g_coef, b_coef]`.
/// Coefficients are scaled by 255: a coefficient of `255` passes the input
/// channel through unchanged. See [`Color::transform`](super::Color::transform).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ColorMatrix {
    rows: [[i32; 4]; 3],
}

impl ColorMatrix {
    pub const IDENTITY: ColorMatrix = ColorMatrix::new([
        [0, 255, 0, 0],
        [0, 0, 255, 0],
        [0, 0, 0, 255],
    ]);

    #[inline]
    pub const fn new(rows: [[i32; 4]; 3]) -> Self {
        Self { rows }
    }

    /// Builds a matrix from 12 values in row order.
    pub const fn from_flat(v: [i32; 12]) -> Self {
        Self::new([
            [v[0], v[1], v[2], v[3]],
            [v[4], v[5], v[6], v[7]],
            [v[8], v[9], v[10], v[11]],
        ])
    }

    /// Luma-weighted grayscale (weights sum to 255).
    pub const fn grayscale() -> Self {
        const LUMA: [i32; 4] = [0, 77, 150, 28];
        Self::new([LUMA, LUMA, LUMA])
    }

    /// Row `i` as `[bias, r_coef, g_coef, b_coef]`.
    ///
    /// # Panics
    /// Panics if `i > 2`.
    #[inline]
    pub const fn row(&self, i: usize) -> [i32; 4] {
        self.rows[i]
    }
}

impl Default for ColorMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;

    #[test]
    fn from_flat_matches_rows() {
        let m = ColorMatrix::from_flat([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(m.row(0), [1, 2, 3, 4]);
        assert_eq!(m.row(2), [9, 10, 11, 12]);
    }

    #[test]
    fn grayscale_of_white_stays_white() {
        assert_eq!(Color::WHITE.transform(&ColorMatrix::grayscale()), Color::WHITE);
    }

    #[test]
    fn grayscale_equalizes_channels() {
        let c = Color::rgb(200, 40, 90).transform(&ColorMatrix::grayscale());
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }
}
