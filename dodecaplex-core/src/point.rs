//! Points in R⁴
//!
//! Every vertex of the 120-cell and 600-cell is a `Point4D`. Coordinates are
//! algebraic numbers (rationals and multiples of φ, √5) carried as `f64`, so
//! equality and hashing go through a canonical rounded key instead of raw
//! float comparison. Two points that agree to 9 decimal places are the same
//! point.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

/// Scale applied before rounding coordinates to a canonical key (10⁹)
pub const CANONICAL_SCALE: f64 = 1e9;

/// A point (or displacement) in 4-dimensional Euclidean space
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point4D {
    coords: [f64; 4],
}

/// Rounded integer form of a point, used for equality, hashing and ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey([i64; 4]);

impl CanonicalKey {
    /// Rounded coordinates
    pub fn coords(&self) -> [i64; 4] {
        self.0
    }
}

impl Point4D {
    /// Create a new point
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self {
            coords: [x, y, z, w],
        }
    }

    /// Create from a coordinate array
    pub const fn from_array(coords: [f64; 4]) -> Self {
        Self { coords }
    }

    /// The origin
    pub const fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Coordinates as an array
    #[inline]
    pub fn coords(&self) -> [f64; 4] {
        self.coords
    }

    /// The first three coordinates, i.e. the projection that drops `w`
    #[inline]
    pub fn xyz(&self) -> [f64; 3] {
        [self.coords[0], self.coords[1], self.coords[2]]
    }

    /// Dot product
    #[inline]
    pub fn dot(&self, other: &Self) -> f64 {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Squared magnitude
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Magnitude
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Euclidean distance to another point
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        (*self - *other).norm()
    }

    /// True when the distance to `other` lies in `[target - tolerance, target + tolerance]`
    #[inline]
    pub fn is_at_distance(&self, other: &Self, target: f64, tolerance: f64) -> bool {
        (self.distance(other) - target).abs() <= tolerance
    }

    /// Canonical rounded key
    pub fn canonical(&self) -> CanonicalKey {
        // `+ 0.0` folds -0.0 into 0.0 before rounding.
        CanonicalKey(self.coords.map(|c| ((c * CANONICAL_SCALE).round() + 0.0) as i64))
    }

    /// Mean of a non-empty set of points
    pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Point4D>) -> Option<Point4D> {
        let mut sum = Point4D::origin();
        let mut count = 0usize;
        for p in points {
            sum = sum + *p;
            count += 1;
        }
        (count > 0).then(|| sum * (1.0 / count as f64))
    }
}

impl PartialEq for Point4D {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for Point4D {}

impl Hash for Point4D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl PartialOrd for Point4D {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point4D {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.canonical().cmp(&other.canonical())
    }
}

impl Add for Point4D {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut coords = self.coords;
        for (c, r) in coords.iter_mut().zip(rhs.coords) {
            *c += r;
        }
        Self { coords }
    }
}

impl Sub for Point4D {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for Point4D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            coords: self.coords.map(|c| -c),
        }
    }
}

impl Mul<f64> for Point4D {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            coords: self.coords.map(|c| c * scalar),
        }
    }
}

impl From<[f64; 4]> for Point4D {
    fn from(coords: [f64; 4]) -> Self {
        Self::from_array(coords)
    }
}
