//! Error types for dodecaplex construction
//!
//! Every error here marks a defect in the geometric construction (a bad
//! formula, a tolerance that is too tight or too loose, a malformed
//! polytope), not expected runtime variance. The pipeline stops at the
//! first one and reports it with the offending cell, pentagon, triangle or
//! vertex.
//!
//! # Error Codes
//!
//! Each variant carries a stable error code (e.g. `DECOMPOSITION_ERROR`)
//! for logging and for tests that assert on the failure kind.
//!
//! # Example
//!
//! ```rust
//! use dodecaplex_core::error::{DodecaplexError, ErrorCategory};
//!
//! let err = DodecaplexError::Decomposition { cell: 7, found: 19 };
//! assert_eq!(err.category(), ErrorCategory::Decomposition);
//! assert_eq!(err.error_code(), "DECOMPOSITION_ERROR");
//! assert!(!err.is_recoverable());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for dodecaplex operations
pub type Result<T> = std::result::Result<T, DodecaplexError>;

/// Error category, one per pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Vertex generation produced the wrong count or an irregular set
    Generation,
    /// A cell did not resolve to its 20 vertices
    Decomposition,
    /// Convex hull of a cell was degenerate
    Triangulation,
    /// Face or pentagon relations broke an invariant
    Adjacency,
    /// Writing the output failed
    Output,
}

/// Errors that can occur while building the dodecaplex tables
#[derive(Error, Debug)]
pub enum DodecaplexError {
    // ═══════════════════════════════════════════════════════════════════════
    // Generation errors
    // ═══════════════════════════════════════════════════════════════════════

    /// Vertex count after deduplication doesn't match the polytope
    #[error("Generated {found} unique vertices for the {polytope}, expected {expected}")]
    VertexCount {
        polytope: &'static str,
        expected: usize,
        found: usize,
    },

    /// A vertex is off the circumscribed 3-sphere
    #[error("Vertex {index} of the {polytope} has norm {norm}, expected {expected}")]
    IrregularVertex {
        polytope: &'static str,
        index: usize,
        norm: f64,
        expected: f64,
    },

    /// A vertex has the wrong number of edge neighbours
    #[error("Vertex {index} has {found} neighbours at distance {distance}, expected {expected}")]
    VertexDegree {
        index: usize,
        distance: f64,
        expected: usize,
        found: usize,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Decomposition errors
    // ═══════════════════════════════════════════════════════════════════════

    /// A cell center selected the wrong number of vertices
    #[error("Cell {cell} resolved to {found} vertices, expected 20")]
    Decomposition { cell: usize, found: usize },

    /// A vertex is not shared by exactly four cells
    #[error("Vertex {vertex} belongs to {cells} cells, expected 4")]
    VertexCoverage { vertex: usize, cells: usize },

    // ═══════════════════════════════════════════════════════════════════════
    // Triangulation errors
    // ═══════════════════════════════════════════════════════════════════════

    /// The projected hull of a cell is flat or has the wrong facet count
    #[error("Degenerate hull for cell {cell}: {reason}")]
    TriangulationDegenerate { cell: usize, reason: String },

    /// Every recovery transform was tried and the hull stayed degenerate
    #[error("Hull for cell {cell} still degenerate after {attempts} attempts: {reason}")]
    TriangulationExhausted {
        cell: usize,
        attempts: usize,
        reason: String,
    },

    /// A batch of three hull triangles does not cover exactly 5 vertices
    #[error("Triangles {first}..{end} of cell {cell} cover {found} vertices, expected 5", end = .first + 3)]
    PentagonVertexCount {
        cell: usize,
        first: usize,
        found: usize,
    },

    /// The 5-vertex edge chain of a pentagon can't be closed
    #[error("Pentagon {pentagon} of cell {cell} cannot be ordered: vertex {vertex} has {found} edge neighbours in the face")]
    UnclosedPentagon {
        cell: usize,
        pentagon: usize,
        vertex: usize,
        found: usize,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Adjacency errors
    // ═══════════════════════════════════════════════════════════════════════

    /// A cell's facets list the wrong number of pentagons
    #[error("Cell {cell} lists {found} pentagons, expected 12")]
    PentagonCount { cell: usize, found: usize },

    /// More than one other cell contains a triangle
    #[error("Triangle {triangle} of cell {cell} is claimed by cells {first} and {second}")]
    FaceClaimedTwice {
        cell: usize,
        triangle: usize,
        first: usize,
        second: usize,
    },

    /// A pentagon has no cell on its other side, or its triangles disagree
    #[error("Pentagon {pentagon} of cell {cell} has inconsistent neighbours: {reason}")]
    UnmatchedFace {
        cell: usize,
        pentagon: usize,
        reason: String,
    },

    /// Two pentagons overlap in a way a dodecahedral cell can't produce
    #[error("Pentagons {first} and {second} share {shared} vertices")]
    PentagonOverlap {
        first: usize,
        second: usize,
        shared: usize,
    },

    /// A pentagon has the wrong number of related pentagons of some kind
    #[error("Pentagon {pentagon} has {found} {relation} relations, expected {expected}")]
    RelationCount {
        pentagon: usize,
        relation: &'static str,
        expected: usize,
        found: usize,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Output errors
    // ═══════════════════════════════════════════════════════════════════════

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing an output file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DodecaplexError {
    /// Returns true if a retry with a different hull transform might succeed
    ///
    /// The triangulator consumes these internally; they only surface when a
    /// caller drives a single hull attempt directly.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DodecaplexError::TriangulationDegenerate { .. })
    }

    /// Returns the pipeline stage this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            DodecaplexError::VertexCount { .. }
            | DodecaplexError::IrregularVertex { .. }
            | DodecaplexError::VertexDegree { .. } => ErrorCategory::Generation,

            DodecaplexError::Decomposition { .. }
            | DodecaplexError::VertexCoverage { .. } => ErrorCategory::Decomposition,

            DodecaplexError::TriangulationDegenerate { .. }
            | DodecaplexError::TriangulationExhausted { .. }
            | DodecaplexError::PentagonVertexCount { .. }
            | DodecaplexError::UnclosedPentagon { .. } => ErrorCategory::Triangulation,

            DodecaplexError::PentagonCount { .. }
            | DodecaplexError::FaceClaimedTwice { .. }
            | DodecaplexError::UnmatchedFace { .. }
            | DodecaplexError::PentagonOverlap { .. }
            | DodecaplexError::RelationCount { .. } => ErrorCategory::Adjacency,

            DodecaplexError::Json(_) | DodecaplexError::Io(_) => ErrorCategory::Output,
        }
    }

    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DodecaplexError::VertexCount { .. } => "VERTEX_COUNT",
            DodecaplexError::IrregularVertex { .. } => "IRREGULAR_VERTEX",
            DodecaplexError::VertexDegree { .. } => "VERTEX_DEGREE",
            DodecaplexError::Decomposition { .. } => "DECOMPOSITION_ERROR",
            DodecaplexError::VertexCoverage { .. } => "VERTEX_COVERAGE",
            DodecaplexError::TriangulationDegenerate { .. } => "TRIANGULATION_DEGENERATE",
            DodecaplexError::TriangulationExhausted { .. } => "TRIANGULATION_EXHAUSTED",
            DodecaplexError::PentagonVertexCount { .. } => "PENTAGON_VERTEX_COUNT",
            DodecaplexError::UnclosedPentagon { .. } => "UNCLOSED_PENTAGON",
            DodecaplexError::PentagonCount { .. } => "PENTAGON_COUNT",
            DodecaplexError::FaceClaimedTwice { .. } => "FACE_CLAIMED_TWICE",
            DodecaplexError::UnmatchedFace { .. } => "UNMATCHED_FACE",
            DodecaplexError::PentagonOverlap { .. } => "PENTAGON_OVERLAP",
            DodecaplexError::RelationCount { .. } => "RELATION_COUNT",
            DodecaplexError::Json(_) => "JSON_ERROR",
            DodecaplexError::Io(_) => "IO_ERROR",
        }
    }
}
