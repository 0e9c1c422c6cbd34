//! Rigid 4D rotations used to tilt a cell out of a degenerate projection.
//!
//! Dropping `w` flattens any cell whose hyperplane contains the `w` axis
//! (its center has `w = 0`). Rotating first in a plane that mixes `w` with
//! another axis gives the cell's normal a `w` component again.

use std::f64::consts::PI;

use crate::point::Point4D;

/// A 4×4 rotation matrix acting on column vectors
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation4 {
    m: [[f64; 4]; 4],
}

impl Rotation4 {
    pub const fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Simple rotation by `angle` in the plane spanned by axes `a` and `b`
    ///
    /// # Panics
    ///
    /// Panics if `a == b` or either axis is out of range.
    pub fn plane(a: usize, b: usize, angle: f64) -> Self {
        assert!(a < 4 && b < 4 && a != b, "invalid rotation plane ({a}, {b})");
        let (sin, cos) = angle.sin_cos();
        let mut r = Self::identity();
        r.m[a][a] = cos;
        r.m[a][b] = -sin;
        r.m[b][a] = sin;
        r.m[b][b] = cos;
        r
    }

    /// Rotate a point
    pub fn apply(&self, p: &Point4D) -> Point4D {
        let c = p.coords();
        let mut out = [0.0; 4];
        for (row, o) in self.m.iter().zip(out.iter_mut()) {
            *o = row.iter().zip(c.iter()).map(|(r, x)| r * x).sum();
        }
        Point4D::from_array(out)
    }

    /// `self` followed by `next`
    pub fn then(&self, next: &Rotation4) -> Rotation4 {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| next.m[i][k] * self.m[k][j]).sum();
            }
        }
        Rotation4 { m }
    }

    /// Rows of the matrix
    pub fn matrix(&self) -> [[f64; 4]; 4] {
        self.m
    }
}

impl Default for Rotation4 {
    fn default() -> Self {
        Self::identity()
    }
}

/// The recovery transforms, tried in order after the plain projection fails:
/// rotations by π/5 in the (x, w), (y, w) and (z, w) planes.
///
/// A cell center with `w = 0` has some non-zero `x`, `y` or `z`, so one of
/// these always restores a solid projection.
pub fn recovery_transforms() -> [Rotation4; 3] {
    [
        Rotation4::plane(0, 3, PI / 5.0),
        Rotation4::plane(1, 3, PI / 5.0),
        Rotation4::plane(2, 3, PI / 5.0),
    ]
}
