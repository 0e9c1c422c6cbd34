//! 120-cell (Hecatonicosachoron) and 600-cell (Hexacosichoron) geometry.
//!
//! The 120-cell has 600 vertices and 120 dodecahedral cells. The centers of
//! those cells are the 120 vertices of its dual, the 600-cell. Both vertex
//! sets are generated here in one shared unit system: 120-cell circumradius
//! 2√2, edge length 3 − √5.

mod neighbors;
mod vertices;

pub use neighbors::{neighbors, NeighborIndex};
pub use vertices::{generate, signed_permutations, BaseVector, Parity, VertexSet};

use serde::{Deserialize, Serialize};

/// Constants for 120-cell / 600-cell geometry
pub mod constants {
    use crate::PHI;

    /// √5
    pub const SQRT_5: f64 = 2.236_067_977_499_79;

    /// 120-cell edge length 3 − √5 = 2/φ² ≈ 0.764
    pub const EDGE_LENGTH: f64 = 3.0 - SQRT_5;

    /// Pentagon diagonal (edge · φ) ≈ 1.236
    pub const PENTAGON_DIAGONAL: f64 = EDGE_LENGTH * PHI;

    /// 120-cell circumradius 2√2
    pub const CIRCUMRADIUS: f64 = 2.828_427_124_746_19;

    /// Distance from a cell center to each of its 20 vertices
    /// (dodecahedron circumradius, edge · √3 · φ / 2 ≈ 1.070)
    pub const CELL_RADIUS: f64 = EDGE_LENGTH * 1.732_050_807_568_877_2 * PHI / 2.0;

    /// 600-cell circumradius φ², the distance of each cell center from the origin
    pub const DUAL_CIRCUMRADIUS: f64 = PHI * PHI;

    /// 600-cell edge length φ, the distance between neighbouring cell centers
    pub const DUAL_EDGE_LENGTH: f64 = PHI;

    /// Tolerance for every distance-band comparison.
    ///
    /// Derived from the smallest non-zero distance in the vertex set (the edge).
    pub const TOLERANCE: f64 = EDGE_LENGTH * 1e-6;

    /// Number of 120-cell vertices
    pub const VERTEX_COUNT: usize = 600;

    /// Number of 600-cell vertices (= 120-cell cells)
    pub const DUAL_VERTEX_COUNT: usize = 120;

    /// Number of dodecahedral cells
    pub const CELL_COUNT: usize = 120;

    /// Vertices per dodecahedral cell
    pub const CELL_VERTEX_COUNT: usize = 20;

    /// Cells meeting at each 120-cell vertex
    pub const CELLS_PER_VERTEX: usize = 4;

    /// Edges at each 120-cell vertex
    pub const EDGES_PER_VERTEX: usize = 4;

    /// Edges at each 600-cell vertex
    pub const DUAL_EDGES_PER_VERTEX: usize = 12;

    /// Pentagons per cell
    pub const PENTAGONS_PER_CELL: usize = 12;

    /// Hull triangles per pentagon
    pub const TRIANGLES_PER_PENTAGON: usize = 3;

    /// Hull triangles per cell
    pub const TRIANGLES_PER_CELL: usize = PENTAGONS_PER_CELL * TRIANGLES_PER_PENTAGON;

    /// Pentagon entries over all cells (each face is listed by both its cells)
    pub const PENTAGON_COUNT: usize = CELL_COUNT * PENTAGONS_PER_CELL;

    /// Distinct pentagonal faces of the 120-cell
    pub const FACE_COUNT: usize = 720;

    /// Edges of the 120-cell
    pub const EDGE_COUNT: usize = 1200;
}

/// Which of the two dual polytopes to generate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolytopeKind {
    /// 120-cell: 600 vertices, 120 dodecahedral cells
    Hecatonicosachoron,
    /// 600-cell: 120 vertices, the 120-cell's cell centers
    Hexacosichoron,
}

impl PolytopeKind {
    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            PolytopeKind::Hecatonicosachoron => "120-cell",
            PolytopeKind::Hexacosichoron => "600-cell",
        }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        match self {
            PolytopeKind::Hecatonicosachoron => constants::VERTEX_COUNT,
            PolytopeKind::Hexacosichoron => constants::DUAL_VERTEX_COUNT,
        }
    }

    /// Circumradius in the shared unit system
    pub fn circumradius(&self) -> f64 {
        match self {
            PolytopeKind::Hecatonicosachoron => constants::CIRCUMRADIUS,
            PolytopeKind::Hexacosichoron => constants::DUAL_CIRCUMRADIUS,
        }
    }

    /// Edge length in the shared unit system
    pub fn edge_length(&self) -> f64 {
        match self {
            PolytopeKind::Hecatonicosachoron => constants::EDGE_LENGTH,
            PolytopeKind::Hexacosichoron => constants::DUAL_EDGE_LENGTH,
        }
    }

    /// Edges at each vertex
    pub fn vertex_degree(&self) -> usize {
        match self {
            PolytopeKind::Hecatonicosachoron => constants::EDGES_PER_VERTEX,
            PolytopeKind::Hexacosichoron => constants::DUAL_EDGES_PER_VERTEX,
        }
    }
}
