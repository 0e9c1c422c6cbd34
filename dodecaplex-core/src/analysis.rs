//! Structure checks and counts that sit outside the main pipeline.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::point::CanonicalKey;
use crate::polytope::{NeighborIndex, VertexSet};

/// Displacements between neighbouring cell centers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplacementSummary {
    /// Directed (center, neighbour) pairs
    pub total: usize,
    /// Distinct displacement vectors by canonical key
    pub unique: usize,
}

/// For every 600-cell vertex and each of its neighbours, the displacement
/// `neighbour - center`
///
/// The 600-cell's 1440 directed edges point along only 120 directions.
pub fn characterize_displacements(
    t4_vertices: &VertexSet,
    neighbors: &NeighborIndex,
) -> DisplacementSummary {
    let mut total = 0;
    let mut unique: HashSet<CanonicalKey> = HashSet::new();

    for (i, center) in t4_vertices.iter().enumerate() {
        for &j in neighbors.neighbors(i).unwrap_or_default() {
            total += 1;
            unique.insert((t4_vertices[j] - *center).canonical());
        }
    }

    DisplacementSummary {
        total,
        unique: unique.len(),
    }
}

/// Counts describing one built dodecaplex
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolytopeSummary {
    pub vertices: usize,
    pub dual_vertices: usize,
    pub edges: usize,
    pub cells: usize,
    pub triangles: usize,
    /// Pentagon entries, every face counted once per cell
    pub pentagons: usize,
    /// Distinct pentagonal faces
    pub faces: usize,
    /// Cells whose projection needed a recovery transform
    pub recovered_cells: usize,
    pub displacements: DisplacementSummary,
}
