//! Distance-band neighbour search.
//!
//! Used for the 120-cell edge graph (distance 3 − √5) and for the 600-cell
//! adjacency between cell centers (distance φ). A naive all-pairs scan is
//! fine for at most 600 points.

use super::VertexSet;
use crate::error::{DodecaplexError, Result};
use crate::point::Point4D;

/// Indices of all points of `set` whose distance to `v` lies in
/// `[target - tolerance, target + tolerance]`, excluding `v` itself.
///
/// The result is in ascending index order whatever the scan order.
pub fn neighbors(v: &Point4D, set: &VertexSet, target: f64, tolerance: f64) -> Vec<usize> {
    set.iter()
        .enumerate()
        .filter(|(_, p)| *p != v && v.is_at_distance(p, target, tolerance))
        .map(|(i, _)| i)
        .collect()
}

/// Adjacency lists for every point of a vertex set at one fixed distance
#[derive(Clone, Debug)]
pub struct NeighborIndex {
    distance: f64,
    adjacency: Vec<Vec<usize>>,
}

impl NeighborIndex {
    /// Build the adjacency lists
    pub fn build(set: &VertexSet, distance: f64, tolerance: f64) -> Self {
        let mut adjacency = vec![Vec::new(); set.len()];

        for i in 0..set.len() {
            for j in (i + 1)..set.len() {
                if set[i].is_at_distance(&set[j], distance, tolerance) {
                    adjacency[i].push(j);
                    adjacency[j].push(i);
                }
            }
        }

        Self {
            distance,
            adjacency,
        }
    }

    /// Build and check that every point has exactly `degree` neighbours
    pub fn build_regular(
        set: &VertexSet,
        distance: f64,
        tolerance: f64,
        degree: usize,
    ) -> Result<Self> {
        let index = Self::build(set, distance, tolerance);

        if let Some((i, found)) = index
            .adjacency
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, n)| n != degree)
        {
            return Err(DodecaplexError::VertexDegree {
                index: i,
                distance,
                expected: degree,
                found,
            });
        }

        Ok(index)
    }

    /// Neighbours of a point, ascending
    pub fn neighbors(&self, index: usize) -> Option<&[usize]> {
        self.adjacency.get(index).map(|v| v.as_slice())
    }

    /// The distance this index was built for
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// True when `a` and `b` are neighbours
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|n| n.binary_search(&b).is_ok())
    }
}
