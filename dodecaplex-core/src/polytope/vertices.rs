//! 120-cell and 600-cell vertex generation.
//!
//! Both vertex sets are unions of signed coordinate permutations of a few
//! base vectors built from 1, 2, φ and √5. Some base vectors only admit
//! even permutations.

use std::collections::{BTreeSet, HashMap};

use itertools::Itertools;
use tracing::debug;

use super::constants::{SQRT_5, TOLERANCE};
use super::PolytopeKind;
use crate::error::{DodecaplexError, Result};
use crate::point::{CanonicalKey, Point4D};
use crate::PHI;

/// 1/φ = φ − 1
const INV_PHI: f64 = PHI - 1.0;
/// 1/φ² = 2 − φ
const INV_PHI2: f64 = 2.0 - PHI;
/// φ² = φ + 1
const PHI2: f64 = PHI + 1.0;
/// φ³ = 2φ + 1
const PHI3: f64 = 2.0 * PHI + 1.0;

/// Which coordinate permutations a base vector admits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parity {
    /// All 24 permutations
    Any,
    /// The 12 even permutations of the coordinate positions
    Even,
}

/// A defining 4-tuple, expanded by sign flips and permutations
#[derive(Clone, Copy, Debug)]
pub struct BaseVector {
    pub coords: [f64; 4],
    pub parity: Parity,
}

impl BaseVector {
    pub const fn any(coords: [f64; 4]) -> Self {
        Self {
            coords,
            parity: Parity::Any,
        }
    }

    pub const fn even(coords: [f64; 4]) -> Self {
        Self {
            coords,
            parity: Parity::Even,
        }
    }
}

/// Base vectors of the 120-cell (600 vertices, circumradius 2√2)
pub const HECATONICOSACHORON_BASES: [BaseVector; 7] = [
    BaseVector::any([0.0, 0.0, 2.0, 2.0]),
    BaseVector::any([PHI, PHI, PHI, INV_PHI2]),
    BaseVector::any([1.0, 1.0, 1.0, SQRT_5]),
    BaseVector::any([INV_PHI, INV_PHI, INV_PHI, PHI2]),
    BaseVector::even([0.0, INV_PHI, PHI, SQRT_5]),
    BaseVector::even([0.0, INV_PHI2, 1.0, PHI2]),
    BaseVector::even([INV_PHI, 1.0, PHI, 2.0]),
];

/// Base vectors of the 600-cell (120 vertices, circumradius φ²), oriented so
/// that its vertices are the cell centers of the 120-cell above
pub const HEXACOSICHORON_BASES: [BaseVector; 3] = [
    BaseVector::any([PHI2, 0.0, 0.0, 0.0]),
    BaseVector::any([PHI2 / 2.0, PHI2 / 2.0, PHI2 / 2.0, PHI2 / 2.0]),
    BaseVector::even([PHI / 2.0, 0.0, PHI2 / 2.0, PHI3 / 2.0]),
];

/// True when the permutation of positions has an even number of inversions
fn is_even(perm: &[usize]) -> bool {
    let inversions = perm
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a > b)
        .count();
    inversions % 2 == 0
}

/// Every distinct point obtained from `base` by the 16 sign flips and the
/// admitted permutations.
///
/// Sign flips of a zero coordinate collapse onto the same point; the
/// returned set holds each point once.
pub fn signed_permutations(base: &BaseVector) -> BTreeSet<Point4D> {
    let mut points = BTreeSet::new();

    for signs in 0..16u32 {
        let mut signed = base.coords;
        for (i, c) in signed.iter_mut().enumerate() {
            if signs & (1 << i) != 0 {
                *c = -*c;
            }
        }

        for perm in (0..4).permutations(4) {
            if base.parity == Parity::Even && !is_even(&perm) {
                continue;
            }
            points.insert(Point4D::new(
                signed[perm[0]],
                signed[perm[1]],
                signed[perm[2]],
                signed[perm[3]],
            ));
        }
    }

    points
}

/// A set of unique points with a stable enumeration order
///
/// Points are enumerated in ascending canonical-key order; a point's position
/// in that order is its global vertex index.
#[derive(Clone, Debug, Default)]
pub struct VertexSet {
    points: Vec<Point4D>,
    index: HashMap<CanonicalKey, usize>,
}

impl VertexSet {
    /// Build from any collection of points, dropping duplicates
    pub fn from_points(points: impl IntoIterator<Item = Point4D>) -> Self {
        let unique: BTreeSet<Point4D> = points.into_iter().collect();
        let points: Vec<Point4D> = unique.into_iter().collect();
        let index = points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.canonical(), i))
            .collect();

        Self { points, index }
    }

    /// All points in enumeration order
    pub fn points(&self) -> &[Point4D] {
        &self.points
    }

    /// Point by global index
    pub fn get(&self, index: usize) -> Option<&Point4D> {
        self.points.get(index)
    }

    /// Global index of a point
    pub fn index_of(&self, point: &Point4D) -> Option<usize> {
        self.index.get(&point.canonical()).copied()
    }

    pub fn contains(&self, point: &Point4D) -> bool {
        self.index.contains_key(&point.canonical())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point4D> {
        self.points.iter()
    }
}

impl std::ops::Index<usize> for VertexSet {
    type Output = Point4D;

    fn index(&self, index: usize) -> &Point4D {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a VertexSet {
    type Item = &'a Point4D;
    type IntoIter = std::slice::Iter<'a, Point4D>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Generate the vertex set of a polytope
///
/// Fails if the union does not have the polytope's vertex count or if any
/// vertex is off the circumscribed sphere.
pub fn generate(kind: PolytopeKind) -> Result<VertexSet> {
    let bases: &[BaseVector] = match kind {
        PolytopeKind::Hecatonicosachoron => &HECATONICOSACHORON_BASES,
        PolytopeKind::Hexacosichoron => &HEXACOSICHORON_BASES,
    };

    let set = VertexSet::from_points(bases.iter().flat_map(|base| {
        let points = signed_permutations(base);
        debug!(
            polytope = kind.name(),
            base = ?base.coords,
            points = points.len(),
            "expanded base vector"
        );
        points
    }));

    if set.len() != kind.vertex_count() {
        return Err(DodecaplexError::VertexCount {
            polytope: kind.name(),
            expected: kind.vertex_count(),
            found: set.len(),
        });
    }

    let radius = kind.circumradius();
    if let Some((index, point)) = set
        .iter()
        .enumerate()
        .find(|(_, p)| (p.norm() - radius).abs() > TOLERANCE)
    {
        return Err(DodecaplexError::IrregularVertex {
            polytope: kind.name(),
            index,
            norm: point.norm(),
            expected: radius,
        });
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polytope::constants::{CIRCUMRADIUS, DUAL_CIRCUMRADIUS};
    use approx::assert_relative_eq;

    #[test]
    fn test_even_parity() {
        assert!(is_even(&[0, 1, 2, 3]));
        assert!(!is_even(&[1, 0, 2, 3]));
        assert!(is_even(&[1, 0, 3, 2]));
        assert!(is_even(&[1, 2, 0, 3]));
        assert_eq!((0..4).permutations(4).filter(|p| is_even(p)).count(), 12);
    }

    #[test]
    fn test_zero_coordinates_collapse() {
        // 2 non-zero coordinates → 4 sign patterns, 6 distinct arrangements
        let points = signed_permutations(&BaseVector::any([0.0, 0.0, 2.0, 2.0]));
        assert_eq!(points.len(), 24);

        // 4 distinct non-zero values, all permutations
        let points = signed_permutations(&BaseVector::any([1.0, 1.0, 1.0, SQRT_5]));
        assert_eq!(points.len(), 64);

        // one zero coordinate, even permutations: 8 sign patterns × 12
        let points = signed_permutations(&BaseVector::even([0.0, INV_PHI, PHI, SQRT_5]));
        assert_eq!(points.len(), 96);
    }

    #[test]
    fn test_base_vector_counts_sum_to_600() {
        let total: usize = HECATONICOSACHORON_BASES
            .iter()
            .map(|b| signed_permutations(b).len())
            .sum();
        assert_eq!(total, 600);
    }

    #[test]
    fn test_two_base_union_has_uniform_norm() {
        let union = VertexSet::from_points(
            signed_permutations(&BaseVector::any([0.0, 0.0, 2.0, 2.0]))
                .into_iter()
                .chain(signed_permutations(&BaseVector::any([PHI, PHI, PHI, INV_PHI2]))),
        );
        assert_eq!(union.len(), 24 + 64);
        for p in &union {
            assert_relative_eq!(p.norm(), CIRCUMRADIUS, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_generate_120_cell() {
        let set = generate(PolytopeKind::Hecatonicosachoron).unwrap();
        assert_eq!(set.len(), 600);
        for p in &set {
            assert_relative_eq!(p.norm(), CIRCUMRADIUS, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_generate_600_cell() {
        let set = generate(PolytopeKind::Hexacosichoron).unwrap();
        assert_eq!(set.len(), 120);
        for p in &set {
            assert_relative_eq!(p.norm(), DUAL_CIRCUMRADIUS, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_enumeration_is_sorted_and_indexed() {
        let set = generate(PolytopeKind::Hexacosichoron).unwrap();
        for (i, w) in set.points().windows(2).enumerate() {
            assert!(w[0] < w[1], "points {} and {} out of order", i, i + 1);
        }
        for (i, p) in set.iter().enumerate() {
            assert_eq!(set.index_of(p), Some(i));
        }
        assert!(!set.contains(&Point4D::origin()));
    }
}
