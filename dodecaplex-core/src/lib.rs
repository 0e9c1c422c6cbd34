//! # Dodecaplex-Core
//!
//! Combinatorial structure of the 120-cell, exported as static data tables.
//!
//! The 120-cell (600 vertices, 120 dodecahedral cells) and its dual, the
//! 600-cell, are generated from golden-ratio permutation formulas. The
//! 120-cell is then split into cells around the 600-cell's vertices, each
//! cell is hulled into 36 triangles and 12 pentagons, and every pentagon is
//! related to the pentagons it shares an edge with.
//!
//! ## Pipeline
//!
//! 1. [`polytope::generate`]: vertex sets of both polytopes
//! 2. [`polytope::NeighborIndex`]: edge graphs at a fixed distance
//! 3. [`cells::decompose`]: 20 vertices per cell, 4 cells per vertex
//! 4. [`facets::triangulate`]: hull triangles and pentagons per cell
//! 5. [`adjacency::resolve`]: cell neighbours and interior / exterior /
//!    adjacent pentagon relations
//! 6. [`export::export`]: the text table
//!
//! ## Example
//!
//! ```rust,no_run
//! use dodecaplex_core::Dodecaplex;
//!
//! let dodecaplex = Dodecaplex::build()?;
//! assert_eq!(dodecaplex.cells.len(), 120);
//!
//! let rendered = dodecaplex.render();
//! assert!(rendered.table.starts_with("//------Cell 0------"));
//! # Ok::<(), dodecaplex_core::DodecaplexError>(())
//! ```

pub mod adjacency;
pub mod analysis;
pub mod cells;
pub mod error;
pub mod export;
pub mod facets;
pub mod hull;
pub mod pipeline;
pub mod point;
pub mod polytope;

// Re-exports for convenience
pub use adjacency::{resolve, Adjacency, PentagonRelation};
pub use analysis::{characterize_displacements, DisplacementSummary, PolytopeSummary};
pub use cells::{decompose, Cell, CellId};
pub use error::{DodecaplexError, ErrorCategory, Result};
pub use export::{export, render_vertices, to_json, DodecaplexTable, Rendered};
pub use facets::{triangulate, triangulate_with, CellFacets, HullState, Pentagon, Triangle};
pub use pipeline::Dodecaplex;
pub use point::Point4D;
pub use polytope::{generate, NeighborIndex, PolytopeKind, VertexSet};

/// Golden ratio φ = (1 + √5) / 2
pub const PHI: f64 = 1.618_033_988_749_895;

/// Default output file of the generator binary
pub const DEFAULT_OUTPUT: &str = "dodecaplex.h";

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_phi() {
        assert_relative_eq!(PHI, (1.0 + 5.0_f64.sqrt()) / 2.0, epsilon = 1e-15);
        assert_relative_eq!(PHI * PHI, PHI + 1.0, epsilon = 1e-12);
    }
}
