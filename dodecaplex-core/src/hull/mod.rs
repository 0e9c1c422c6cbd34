//! Convex hulls of small 3D point sets.
//!
//! A dodecahedral cell projected into 3D has only 20 points, so the hull is
//! found by supporting-plane enumeration: a plane through three non-collinear
//! points is a facet plane when no point lies strictly on both sides of it.
//! All points on that plane form one polygonal face. Coplanar faces come out
//! whole (a pentagon stays a pentagon) instead of as arbitrary triangles.

mod transform;

pub use transform::{recovery_transforms, Rotation4};

use std::collections::BTreeMap;

use itertools::Itertools;
use thiserror::Error;

/// A point in R³
pub type Vec3 = [f64; 3];

/// Reasons a hull can't be built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HullError {
    /// Fewer than 4 points can't span a solid
    #[error("need at least 4 points, got {0}")]
    TooFewPoints(usize),

    /// Every point lies on one plane
    #[error("all {0} points are coplanar")]
    Flat(usize),

    /// Every point lies on one line
    #[error("no three points span a plane")]
    Collinear,
}

#[inline]
fn sub(a: &Vec3, b: &Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
fn scale(a: &Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn centroid(points: impl ExactSizeIterator<Item = Vec3>) -> Vec3 {
    let n = points.len() as f64;
    let sum = points.fold([0.0; 3], |acc, p| [acc[0] + p[0], acc[1] + p[1], acc[2] + p[2]]);
    scale(&sum, 1.0 / n)
}

/// Convex hull as a list of polygonal faces
///
/// Each face lists point indices counter-clockwise when viewed from outside.
/// Faces are ordered by their ascending vertex sets.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexHull {
    faces: Vec<Vec<usize>>,
}

impl ConvexHull {
    /// Compute the hull; `tolerance` is the plane-distance below which a
    /// point counts as lying on a facet plane
    pub fn compute(points: &[Vec3], tolerance: f64) -> Result<Self, HullError> {
        if points.len() < 4 {
            return Err(HullError::TooFewPoints(points.len()));
        }

        let interior = centroid(points.iter().copied());
        let mut faces: BTreeMap<Vec<usize>, Vec<usize>> = BTreeMap::new();
        let mut spanned = false;

        for (i, j, k) in (0..points.len()).tuple_combinations() {
            let normal = cross(&sub(&points[j], &points[i]), &sub(&points[k], &points[i]));
            let length = dot(&normal, &normal).sqrt();
            if length <= tolerance {
                continue; // collinear triple
            }
            spanned = true;
            let normal = scale(&normal, 1.0 / length);

            let mut above = false;
            let mut below = false;
            let mut on_plane = Vec::new();
            for (m, p) in points.iter().enumerate() {
                let d = dot(&normal, &sub(p, &points[i]));
                if d > tolerance {
                    above = true;
                } else if d < -tolerance {
                    below = true;
                } else {
                    on_plane.push(m);
                }
                if above && below {
                    break;
                }
            }

            if above && below {
                continue;
            }
            if !above && !below {
                return Err(HullError::Flat(points.len()));
            }
            if faces.contains_key(&on_plane) {
                continue;
            }

            let outward = if above { scale(&normal, -1.0) } else { normal };
            let cycle = Self::wind(points, &on_plane, &outward, &interior);
            faces.insert(on_plane, cycle);
        }

        if !spanned {
            return Err(HullError::Collinear);
        }

        Ok(Self {
            faces: faces.into_values().collect(),
        })
    }

    /// Order a planar face counter-clockwise around its centroid, seen from
    /// the side `outward` points to
    fn wind(points: &[Vec3], face: &[usize], outward: &Vec3, interior: &Vec3) -> Vec<usize> {
        let center = centroid(face.iter().map(|&i| points[i]));
        debug_assert!(dot(outward, &sub(&center, interior)) > 0.0);

        let u = sub(&points[face[0]], &center);
        let u = scale(&u, 1.0 / dot(&u, &u).sqrt());
        let v = cross(outward, &u);

        let angle = |i: usize| {
            let d = sub(&points[i], &center);
            dot(&d, &v).atan2(dot(&d, &u))
        };

        face.iter()
            .copied()
            .sorted_by(|&a, &b| angle(a).total_cmp(&angle(b)))
            .collect()
    }

    /// Polygonal faces
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of triangles a fan triangulation of every face yields
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|f| f.len().saturating_sub(2)).sum()
    }

    /// Fan-triangulate every face, each fan anchored at the face vertex
    /// with the lowest `rank`.
    ///
    /// Triangles keep the face winding and are emitted face by face.
    pub fn fan_triangles<K: Ord>(&self, rank: impl Fn(usize) -> K) -> Vec<[usize; 3]> {
        let mut triangles = Vec::with_capacity(self.triangle_count());
        for face in &self.faces {
            let start = face
                .iter()
                .position_min_by_key(|&&i| rank(i))
                .unwrap_or(0);
            let n = face.len();
            let at = |k: usize| face[(start + k) % n];
            for k in 1..n.saturating_sub(1) {
                triangles.push([at(0), at(k), at(k + 1)]);
            }
        }
        triangles
    }
}
