use core::ops::Mul;

/// 4x4 affine/projective transform, column-major (the layout GL matrix
/// uniforms take with `transpose = false`).
///
/// Composition reads left to right: `a.then(b)` applies `a` first, then `b`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    m: [f32; 16],
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Wraps a column-major matrix.
    #[inline]
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self { m }
    }

    #[inline]
    pub const fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    pub const fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut t = Self::IDENTITY;
        t.m[12] = x;
        t.m[13] = y;
        t.m[14] = z;
        t
    }

    pub const fn scale(x: f32, y: f32, z: f32) -> Self {
        let mut t = Self::IDENTITY;
        t.m[0] = x;
        t.m[5] = y;
        t.m[10] = z;
        t
    }

    /// Orthographic projection mapping the given box to clip space `[-1, 1]`.
    ///
    /// `orthographic(0, w, h, 0, -1, 1)` gives the top-left-origin pixel space
    /// used for render targets.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = right - left;
        let tb = top - bottom;
        let fnr = far - near;
        Self::from_cols_array([
            2.0 / rl, 0.0, 0.0, 0.0, //
            0.0, 2.0 / tb, 0.0, 0.0, //
            0.0, 0.0, -2.0 / fnr, 0.0, //
            -(right + left) / rl, -(top + bottom) / tb, -(far + near) / fnr, 1.0,
        ])
    }

    /// Returns the transform that applies `self` first and then `next`.
    #[inline]
    pub fn then(&self, next: &Transform) -> Transform {
        multiply(&next.m, &self.m)
    }

    /// Transforms a 2D point (z = 0, w = 1), dividing by w.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.m;
        let tx = m[0] * x + m[4] * y + m[12];
        let ty = m[1] * x + m[5] * y + m[13];
        let tw = m[3] * x + m[7] * y + m[15];
        if tw != 0.0 && tw != 1.0 {
            (tx / tw, ty / tw)
        } else {
            (tx, ty)
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Matrix product `self * rhs` (applies `rhs` first).
impl Mul for Transform {
    type Output = Transform;
    #[inline]
    fn mul(self, rhs: Transform) -> Transform {
        multiply(&self.m, &rhs.m)
    }
}

fn multiply(a: &[f32; 16], b: &[f32; 16]) -> Transform {
    let mut out = [0.0f32; 16];
    for col in 0..4 {
        for row in 0..4 {
            out[col * 4 + row] = (0..4).map(|k| a[k * 4 + row] * b[col * 4 + k]).sum();
        }
    }
    Transform::from_cols_array(out)
}
