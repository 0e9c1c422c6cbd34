//! The full generator: vertices → cells → facets → relations → tables.

use tracing::{info, info_span};

use crate::adjacency::{resolve, Adjacency};
use crate::analysis::{characterize_displacements, PolytopeSummary};
use crate::cells::{decompose, Cell};
use crate::error::Result;
use crate::export::{export, CellRecord, DodecaplexTable, Rendered};
use crate::facets::{triangulate, CellFacets, Pentagon};
use crate::polytope::constants::TOLERANCE;
use crate::polytope::{generate, NeighborIndex, PolytopeKind, VertexSet};

/// A fully built and validated 120-cell
#[derive(Clone, Debug)]
pub struct Dodecaplex {
    /// 120-cell vertices
    pub vertices: VertexSet,
    /// 600-cell vertices, one per cell
    pub centers: VertexSet,
    /// 120-cell edge graph
    pub edges: NeighborIndex,
    /// 600-cell edge graph between cell centers
    pub center_edges: NeighborIndex,
    pub cells: Vec<Cell>,
    pub facets: Vec<CellFacets>,
    pub adjacency: Adjacency,
}

impl Dodecaplex {
    /// Run every stage, failing at the first broken invariant
    pub fn build() -> Result<Self> {
        let _span = info_span!("dodecaplex_build").entered();

        let vertices = generate(PolytopeKind::Hecatonicosachoron)?;
        let centers = generate(PolytopeKind::Hexacosichoron)?;
        info!(
            vertices = vertices.len(),
            centers = centers.len(),
            "generated vertex sets"
        );

        let edges = regular_graph(&vertices, PolytopeKind::Hecatonicosachoron)?;
        let center_edges = regular_graph(&centers, PolytopeKind::Hexacosichoron)?;
        info!(
            edges = edges.edge_count(),
            center_edges = center_edges.edge_count(),
            "built edge graphs"
        );

        let cells = decompose(&vertices, &centers)?;

        let facets = cells
            .iter()
            .map(|cell| triangulate(cell, &vertices))
            .collect::<Result<Vec<_>>>()?;
        let recovered = facets.iter().filter(|f| f.recovery.is_some()).count();
        info!(cells = facets.len(), recovered, "triangulated cells");

        let adjacency = resolve(&cells, &facets)?;

        Ok(Self {
            vertices,
            centers,
            edges,
            center_edges,
            cells,
            facets,
            adjacency,
        })
    }

    /// Pentagons of every cell, in cell order
    pub fn pentagons(&self) -> Vec<Vec<Pentagon>> {
        self.facets.iter().map(|f| f.pentagons.clone()).collect()
    }

    /// Render the text table and vertex listing
    pub fn render(&self) -> Rendered {
        export(
            &self.vertices,
            &self.pentagons(),
            &self.adjacency.face_neighbors,
            &self.adjacency.interior,
            &self.adjacency.exterior,
            &self.adjacency.adjacent,
        )
    }

    /// Serializable form of the whole structure
    pub fn table(&self) -> DodecaplexTable {
        let cells = self
            .cells
            .iter()
            .zip(&self.facets)
            .zip(&self.adjacency.face_neighbors)
            .map(|((cell, facets), neighbors)| CellRecord {
                id: cell.id,
                center: cell.center,
                members: cell.members.to_vec(),
                pentagons: facets.pentagons.clone(),
                neighbors: neighbors.to_vec(),
                recovery: facets.recovery,
            })
            .collect();

        DodecaplexTable {
            vertices: self.vertices.points().to_vec(),
            cells,
            interior: self.adjacency.interior.clone(),
            exterior: self.adjacency.exterior.clone(),
            adjacent: self.adjacency.adjacent.clone(),
        }
    }

    /// Structure counts
    pub fn summary(&self) -> PolytopeSummary {
        PolytopeSummary {
            vertices: self.vertices.len(),
            dual_vertices: self.centers.len(),
            edges: self.edges.edge_count(),
            cells: self.cells.len(),
            triangles: self.facets.iter().map(|f| f.triangles.len()).sum(),
            pentagons: self.adjacency.pentagon_count(),
            faces: self.adjacency.unique_face_count(),
            recovered_cells: self.facets.iter().filter(|f| f.recovery.is_some()).count(),
            displacements: characterize_displacements(&self.centers, &self.center_edges),
        }
    }
}

fn regular_graph(set: &VertexSet, kind: PolytopeKind) -> Result<NeighborIndex> {
    NeighborIndex::build_regular(set, kind.edge_length(), TOLERANCE, kind.vertex_degree())
}
