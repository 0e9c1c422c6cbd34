//! Dodecahedral cells of the 120-cell.
//!
//! Each 600-cell vertex is the center of one cell; the cell's 20 vertices are
//! the 120-cell vertices at distance [`CELL_RADIUS`] from it. Cells are not
//! disjoint: four of them meet at every vertex.
//!
//! [`CELL_RADIUS`]: crate::polytope::constants::CELL_RADIUS

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DodecaplexError, Result};
use crate::point::Point4D;
use crate::polytope::constants::{
    CELLS_PER_VERTEX, CELL_RADIUS, CELL_VERTEX_COUNT, TOLERANCE,
};
use crate::polytope::VertexSet;

/// Index of a cell (= index of its center in the 600-cell vertex set)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellId(pub usize);

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One dodecahedral cell
#[derive(Clone, Debug)]
pub struct Cell {
    pub id: CellId,
    /// Cell center (a 600-cell vertex)
    pub center: Point4D,
    /// Global 120-cell vertex indices, ascending. Position in this array is
    /// the vertex's local index within the cell.
    pub members: [usize; CELL_VERTEX_COUNT],
}

impl Cell {
    /// Global index of a local vertex
    #[inline]
    pub fn global(&self, local: usize) -> usize {
        self.members[local]
    }

    /// Local index of a global vertex, if it belongs to this cell
    pub fn local(&self, global: usize) -> Option<usize> {
        self.members.binary_search(&global).ok()
    }

    pub fn contains(&self, global: usize) -> bool {
        self.local(global).is_some()
    }

    /// The cell's 20 points, in local order
    pub fn points(&self, vertices: &VertexSet) -> [Point4D; CELL_VERTEX_COUNT] {
        self.members.map(|g| vertices[g])
    }
}

/// Split the 120-cell into its 120 dodecahedral cells, one per 600-cell vertex
/// and in the same order.
///
/// Fails if a center doesn't select exactly 20 vertices or if any vertex
/// isn't shared by exactly 4 cells.
pub fn decompose(d4_vertices: &VertexSet, t4_vertices: &VertexSet) -> Result<Vec<Cell>> {
    let mut cells = Vec::with_capacity(t4_vertices.len());

    for (i, center) in t4_vertices.iter().enumerate() {
        let members: Vec<usize> = d4_vertices
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_at_distance(center, CELL_RADIUS, TOLERANCE))
            .map(|(g, _)| g)
            .collect();

        let members: [usize; CELL_VERTEX_COUNT] =
            members
                .try_into()
                .map_err(|found: Vec<usize>| DodecaplexError::Decomposition {
                    cell: i,
                    found: found.len(),
                })?;

        cells.push(Cell {
            id: CellId(i),
            center: *center,
            members,
        });
    }

    let coverage = vertex_cells(&cells, d4_vertices.len());
    if let Some((vertex, owners)) = coverage
        .iter()
        .enumerate()
        .find(|(_, owners)| owners.len() != CELLS_PER_VERTEX)
    {
        return Err(DodecaplexError::VertexCoverage {
            vertex,
            cells: owners.len(),
        });
    }

    info!(cells = cells.len(), "decomposed 120-cell into dodecahedral cells");
    Ok(cells)
}

/// For every vertex, the cells containing it (ascending)
pub fn vertex_cells(cells: &[Cell], vertex_count: usize) -> Vec<Vec<CellId>> {
    let mut owners = vec![Vec::with_capacity(CELLS_PER_VERTEX); vertex_count];
    for cell in cells {
        for &g in &cell.members {
            owners[g].push(cell.id);
        }
    }
    owners
}
