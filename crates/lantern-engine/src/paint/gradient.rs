use super::Color;

/// Per-corner colors for a gradient-filled rectangle.
///
/// The GPU interpolates between corners across the two triangles of the quad.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct CornerColors {
    pub upper_left: Color,
    pub upper_right: Color,
    pub lower_right: Color,
    pub lower_left: Color,
}

impl CornerColors {
    #[inline]
    pub const fn new(upper_left: Color, upper_right: Color, lower_right: Color, lower_left: Color) -> Self {
        Self { upper_left, upper_right, lower_right, lower_left }
    }

    /// Same color on all four corners.
    #[inline]
    pub const fn uniform(c: Color) -> Self {
        Self::new(c, c, c, c)
    }

    /// Every corner multiplied by `mask`.
    #[inline]
    pub fn masked(self, mask: Color) -> Self {
        Self {
            upper_left: self.upper_left.modulate(mask),
            upper_right: self.upper_right.modulate(mask),
            lower_right: self.lower_right.modulate(mask),
            lower_left: self.lower_left.modulate(mask),
        }
    }

    /// Corners in clockwise order starting at the upper-left.
    #[inline]
    pub const fn to_array(self) -> [Color; 4] {
        [self.upper_left, self.upper_right, self.lower_right, self.lower_left]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_by_white_is_identity() {
        let g = CornerColors::new(
            Color::rgb(255, 0, 0),
            Color::rgb(0, 255, 0),
            Color::rgb(0, 0, 255),
            Color::rgba(9, 9, 9, 9),
        );
        assert_eq!(g.masked(Color::WHITE), g);
    }

    #[test]
    fn masked_by_transparent_clears_alpha() {
        let g = CornerColors::uniform(Color::WHITE).masked(Color::TRANSPARENT);
        assert!(g.to_array().iter().all(|c| c.a == 0));
    }
}
