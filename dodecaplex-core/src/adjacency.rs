//! Cell-to-cell and pentagon-to-pentagon relations.
//!
//! Every pentagon entry has a global index `cell * 12 + k`, where `k` is its
//! position within the cell. Relation tables are indexed arrays over those
//! 1440 entries.
//!
//! Two pentagons are related when they share exactly one edge (2 vertices):
//!
//! - **interior**: both belong to the same cell
//! - **exterior**: the other one belongs to the cell across this pentagon
//! - **adjacent**: the other one belongs to some other cell, touching only
//!   along that edge
//!
//! A pentagon of a dodecahedral cell has 5 interior relations, 5 exterior and
//! 10 adjacent. Any other count aborts the build.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cells::{vertex_cells, Cell, CellId};
use crate::error::{DodecaplexError, Result};
use crate::facets::{CellFacets, Pentagon};
use crate::polytope::constants::{PENTAGONS_PER_CELL, TRIANGLES_PER_CELL, TRIANGLES_PER_PENTAGON};

/// How a pentagon relates to an edge-sharing pentagon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PentagonRelation {
    Interior,
    Exterior,
    Adjacent,
}

impl PentagonRelation {
    pub const ALL: [PentagonRelation; 3] = [
        PentagonRelation::Interior,
        PentagonRelation::Exterior,
        PentagonRelation::Adjacent,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PentagonRelation::Interior => "interior",
            PentagonRelation::Exterior => "exterior",
            PentagonRelation::Adjacent => "adjacent",
        }
    }

    /// Relations of this kind every pentagon has
    pub fn expected_count(&self) -> usize {
        match self {
            PentagonRelation::Interior => 5,
            PentagonRelation::Exterior => 5,
            PentagonRelation::Adjacent => 10,
        }
    }
}

/// Global pentagon index
#[inline]
pub fn pentagon_index(cell: CellId, k: usize) -> usize {
    cell.0 * PENTAGONS_PER_CELL + k
}

/// Cell owning a global pentagon index
#[inline]
pub fn pentagon_cell(pentagon: usize) -> CellId {
    CellId(pentagon / PENTAGONS_PER_CELL)
}

/// Resolved relation tables
#[derive(Clone, Debug)]
pub struct Adjacency {
    /// Per cell, per triangle: the other cell containing the triangle
    pub triangle_neighbors: Vec<Vec<Option<CellId>>>,
    /// Per cell, per pentagon: the cell across that pentagon
    pub face_neighbors: Vec<[CellId; PENTAGONS_PER_CELL]>,
    /// Per pentagon: the same face as listed by the cell across it
    pub twins: Vec<usize>,
    pub interior: Vec<Vec<usize>>,
    pub exterior: Vec<Vec<usize>>,
    pub adjacent: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Related pentagons of one kind, ascending
    pub fn related(&self, pentagon: usize, relation: PentagonRelation) -> &[usize] {
        let table = match relation {
            PentagonRelation::Interior => &self.interior,
            PentagonRelation::Exterior => &self.exterior,
            PentagonRelation::Adjacent => &self.adjacent,
        };
        &table[pentagon]
    }

    /// Number of pentagon entries
    pub fn pentagon_count(&self) -> usize {
        self.twins.len()
    }

    /// Number of distinct faces (each is listed by two cells)
    pub fn unique_face_count(&self) -> usize {
        self.twins
            .iter()
            .enumerate()
            .filter(|&(p, &twin)| p < twin)
            .count()
    }

    /// Fail on the first pentagon whose relation counts aren't 5/5/10
    pub fn check_counts(&self) -> Result<()> {
        for p in 0..self.pentagon_count() {
            for relation in PentagonRelation::ALL {
                let found = self.related(p, relation).len();
                if found != relation.expected_count() {
                    return Err(DodecaplexError::RelationCount {
                        pentagon: p,
                        relation: relation.name(),
                        expected: relation.expected_count(),
                        found,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Resolve triangle neighbours, face neighbours and pentagon relations
pub fn resolve(cells: &[Cell], facets: &[CellFacets]) -> Result<Adjacency> {
    check_alignment(cells, facets)?;

    let vertex_count = cells
        .iter()
        .flat_map(|c| c.members.iter())
        .max()
        .map_or(0, |&g| g + 1);
    let owners = vertex_cells(cells, vertex_count);

    let triangle_neighbors = facets
        .iter()
        .map(|f| match_triangles(f, &owners))
        .collect::<Result<Vec<_>>>()?;

    let face_neighbors = triangle_neighbors
        .iter()
        .zip(facets)
        .map(|(row, f)| sample_face_neighbors(f.cell, row))
        .collect::<Result<Vec<_>>>()?;

    let pentagons: Vec<Pentagon> = facets
        .iter()
        .flat_map(|f| f.pentagons.iter().copied())
        .collect();

    // pentagons touching each vertex
    let mut by_vertex = vec![Vec::new(); vertex_count];
    for (p, pentagon) in pentagons.iter().enumerate() {
        for &v in pentagon.vertices() {
            by_vertex[v].push(p);
        }
    }

    let n = pentagons.len();
    let mut twins = Vec::with_capacity(n);
    let mut interior = vec![Vec::new(); n];
    let mut exterior = vec![Vec::new(); n];
    let mut adjacent = vec![Vec::new(); n];

    for (p, pentagon) in pentagons.iter().enumerate() {
        let cell = pentagon_cell(p);
        let across = face_neighbors[cell.0][p % PENTAGONS_PER_CELL];

        let candidates: BTreeSet<usize> = pentagon
            .vertices()
            .iter()
            .flat_map(|&v| by_vertex[v].iter().copied())
            .filter(|&q| q != p)
            .collect();

        let mut twin = None;
        for q in candidates {
            let shared = pentagon.shared_vertices(&pentagons[q]);
            let other = pentagon_cell(q);
            match shared {
                1 if other != cell => {}
                2 if other == cell => interior[p].push(q),
                2 if other == across => exterior[p].push(q),
                2 => adjacent[p].push(q),
                5 if other == across && twin.is_none() => twin = Some(q),
                _ => {
                    return Err(DodecaplexError::PentagonOverlap {
                        first: p,
                        second: q,
                        shared,
                    })
                }
            }
        }

        let twin = twin.ok_or_else(|| DodecaplexError::UnmatchedFace {
            cell: cell.0,
            pentagon: p % PENTAGONS_PER_CELL,
            reason: format!("cell {} does not list the same face", across),
        })?;
        twins.push(twin);
    }

    let adjacency = Adjacency {
        triangle_neighbors,
        face_neighbors,
        twins,
        interior,
        exterior,
        adjacent,
    };

    adjacency.check_counts()?;

    info!(
        pentagons = n,
        faces = adjacency.unique_face_count(),
        "resolved pentagon relations"
    );
    Ok(adjacency)
}

/// Facets must come one per cell, in cell order, with 12 pentagons each;
/// pentagon indices derive their cell from that layout
fn check_alignment(cells: &[Cell], facets: &[CellFacets]) -> Result<()> {
    if facets.len() != cells.len() {
        return Err(DodecaplexError::UnmatchedFace {
            cell: facets.len().min(cells.len()),
            pentagon: 0,
            reason: format!("{} facet sets for {} cells", facets.len(), cells.len()),
        });
    }

    for (i, (cell, f)) in cells.iter().zip(facets).enumerate() {
        if cell.id != CellId(i) || f.cell != CellId(i) {
            return Err(DodecaplexError::UnmatchedFace {
                cell: i,
                pentagon: 0,
                reason: format!("slot holds cell {} with facets of cell {}", cell.id, f.cell),
            });
        }
        if f.pentagons.len() != PENTAGONS_PER_CELL {
            return Err(DodecaplexError::PentagonCount {
                cell: i,
                found: f.pentagons.len(),
            });
        }
    }

    Ok(())
}

/// For each triangle of a cell, the one other cell containing all three of
/// its vertices
fn match_triangles(facets: &CellFacets, owners: &[Vec<CellId>]) -> Result<Vec<Option<CellId>>> {
    if facets.global_triangles.len() != TRIANGLES_PER_CELL {
        return Err(DodecaplexError::UnmatchedFace {
            cell: facets.cell.0,
            pentagon: 0,
            reason: format!(
                "{} triangles, expected {}",
                facets.global_triangles.len(),
                TRIANGLES_PER_CELL
            ),
        });
    }

    facets
        .global_triangles
        .iter()
        .enumerate()
        .map(|(t, triangle)| {
            let [a, b, c] = triangle.vertices();
            let mut sharing = owners[a]
                .iter()
                .copied()
                .filter(|&o| o != facets.cell && owners[b].contains(&o) && owners[c].contains(&o));

            let first = sharing.next();
            if let (Some(first), Some(second)) = (first, sharing.next()) {
                return Err(DodecaplexError::FaceClaimedTwice {
                    cell: facets.cell.0,
                    triangle: t,
                    first: first.0,
                    second: second.0,
                });
            }
            Ok(first)
        })
        .collect()
}

/// Sample every third triangle entry; the other two of each pentagon must agree
fn sample_face_neighbors(
    cell: CellId,
    row: &[Option<CellId>],
) -> Result<[CellId; PENTAGONS_PER_CELL]> {
    let mut out = [CellId(0); PENTAGONS_PER_CELL];

    for (k, batch) in row.chunks(TRIANGLES_PER_PENTAGON).enumerate() {
        let unmatched = |reason: String| DodecaplexError::UnmatchedFace {
            cell: cell.0,
            pentagon: k,
            reason,
        };
        let neighbor = batch[0]
            .ok_or_else(|| unmatched("no cell across the face".to_string()))?;
        if let Some(other) = batch.iter().find(|&&n| n != Some(neighbor)) {
            return Err(unmatched(format!(
                "triangles disagree: cell {} and {:?}",
                neighbor, other
            )));
        }
        out[k] = neighbor;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::decompose;
    use crate::facets::triangulate;
    use crate::polytope::{generate, PolytopeKind};
    use std::sync::OnceLock;

    fn shared() -> &'static (Vec<Cell>, Vec<CellFacets>, Adjacency) {
        static BUILT: OnceLock<(Vec<Cell>, Vec<CellFacets>, Adjacency)> = OnceLock::new();
        BUILT.get_or_init(|| {
            let d4 = generate(PolytopeKind::Hecatonicosachoron).unwrap();
            let t4 = generate(PolytopeKind::Hexacosichoron).unwrap();
            let cells = decompose(&d4, &t4).unwrap();
            let facets: Vec<CellFacets> = cells.iter().map(|c| triangulate(c, &d4).unwrap()).collect();
            let adjacency = resolve(&cells, &facets).unwrap();
            (cells, facets, adjacency)
        })
    }

    #[test]
    fn test_every_triangle_has_one_neighbor() {
        let (_, _, adjacency) = shared();
        for row in &adjacency.triangle_neighbors {
            assert_eq!(row.len(), 36);
            assert!(row.iter().all(Option::is_some));
        }
    }

    #[test]
    fn test_face_neighbors_are_distinct() {
        let (_, _, adjacency) = shared();
        for (c, row) in adjacency.face_neighbors.iter().enumerate() {
            let unique: BTreeSet<_> = row.iter().collect();
            assert_eq!(unique.len(), 12);
            assert!(!row.contains(&CellId(c)));
        }
    }

    #[test]
    fn test_twins_are_mutual() {
        let (_, facets, adjacency) = shared();
        assert_eq!(adjacency.pentagon_count(), 1440);
        assert_eq!(adjacency.unique_face_count(), 720);
        for (p, &q) in adjacency.twins.iter().enumerate() {
            assert_eq!(adjacency.twins[q], p);
            let a = facets[p / 12].pentagons[p % 12];
            let b = facets[q / 12].pentagons[q % 12];
            assert_eq!(a.sorted(), b.sorted());
        }
    }

    #[test]
    fn test_relation_counts_and_order() {
        let (_, _, adjacency) = shared();
        for p in 0..adjacency.pentagon_count() {
            for relation in PentagonRelation::ALL {
                let related = adjacency.related(p, relation);
                assert_eq!(related.len(), relation.expected_count());
                assert!(related.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }

    #[test]
    fn test_relations_respect_cells() {
        let (_, _, adjacency) = shared();
        let p = pentagon_index(CellId(9), 4);
        let across = adjacency.face_neighbors[9][4];
        assert!(adjacency.interior[p].iter().all(|&q| pentagon_cell(q) == CellId(9)));
        assert!(adjacency.exterior[p].iter().all(|&q| pentagon_cell(q) == across));
        assert!(adjacency.adjacent[p]
            .iter()
            .all(|&q| pentagon_cell(q) != CellId(9) && pentagon_cell(q) != across));
    }

    #[test]
    fn test_interior_relation_is_symmetric() {
        let (_, _, adjacency) = shared();
        for (p, related) in adjacency.interior.iter().enumerate() {
            for &q in related {
                assert!(adjacency.interior[q].contains(&p));
            }
        }
    }

    #[test]
    fn test_disagreeing_triangles_are_fatal() {
        let row = vec![Some(CellId(1)); 36];
        let mut broken = row.clone();
        broken[7] = Some(CellId(2));
        assert!(sample_face_neighbors(CellId(0), &row).is_ok());
        let err = sample_face_neighbors(CellId(0), &broken).unwrap_err();
        assert_eq!(err.error_code(), "UNMATCHED_FACE");

        let mut missing = row;
        missing[33] = None;
        assert!(sample_face_neighbors(CellId(0), &missing).is_err());
    }

    #[test]
    fn test_triangle_in_two_foreign_cells_is_fatal() {
        let (cells, facets, adjacency) = shared();
        let mut owners = vertex_cells(cells, 600);
        let [a, b, c] = facets[0].global_triangles[0].vertices();
        for v in [a, b, c] {
            owners[v].push(CellId(200));
        }

        let err = match_triangles(&facets[0], &owners).unwrap_err();
        let real = adjacency.triangle_neighbors[0][0].unwrap();
        match err {
            DodecaplexError::FaceClaimedTwice {
                cell,
                triangle,
                first,
                second,
            } => {
                assert_eq!((cell, triangle), (0, 0));
                assert_eq!(first, real.0);
                assert_eq!(second, 200);
            }
            other => panic!("expected a double claim, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicated_face_in_neighbor_overlaps() {
        let (cells, facets, adjacency) = shared();
        let across = adjacency.face_neighbors[0][0];
        let twin = adjacency.twins[0] % 12;
        let other = (twin + 1) % 12;

        let mut broken = facets.clone();
        let copy = broken[across.0].pentagons[twin];
        broken[across.0].pentagons[other] = copy;

        let err = resolve(cells, &broken).unwrap_err();
        assert!(
            matches!(err, DodecaplexError::PentagonOverlap { first: 0, shared: 5, .. }),
            "{}",
            err
        );
    }

    #[test]
    fn test_extra_pentagon_is_a_count_error() {
        let (cells, facets, _) = shared();
        let mut broken = facets.clone();
        let extra = broken[119].pentagons[0];
        broken[119].pentagons.push(extra);

        let err = resolve(cells, &broken).unwrap_err();
        assert!(matches!(
            err,
            DodecaplexError::PentagonCount { cell: 119, found: 13 }
        ));
    }

    #[test]
    fn test_facets_must_follow_cell_order() {
        let (cells, facets, _) = shared();

        let mut swapped = facets.clone();
        swapped.swap(3, 4);
        let err = resolve(cells, &swapped).unwrap_err();
        assert!(matches!(err, DodecaplexError::UnmatchedFace { cell: 3, .. }));

        let mut short = facets.clone();
        short.pop();
        let err = resolve(cells, &short).unwrap_err();
        assert_eq!(err.error_code(), "UNMATCHED_FACE");
    }

    #[test]
    fn test_truncated_relation_row_fails_count_check() {
        let (_, _, adjacency) = shared();
        assert!(adjacency.check_counts().is_ok());

        let mut broken = adjacency.clone();
        broken.adjacent[5].pop();
        let err = broken.check_counts().unwrap_err();
        assert!(matches!(
            err,
            DodecaplexError::RelationCount {
                pentagon: 5,
                relation: "adjacent",
                expected: 10,
                found: 9,
            }
        ));
    }
}
