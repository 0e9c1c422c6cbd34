//! Hull triangulation of a cell and pentagon reconstruction.
//!
//! A cell's 20 points are projected to 3D and hulled. The hull's 12 pentagonal
//! faces come out as 36 fan triangles, three per face, which are then merged
//! back into ordered pentagons.
//!
//! Cells whose hyperplane contains the `w` axis project flat. Those are retried
//! through a fixed list of rotations, driven by [`HullState`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cells::{Cell, CellId};
use crate::error::{DodecaplexError, Result};
use crate::hull::{recovery_transforms, ConvexHull, Rotation4, Vec3};
use crate::point::Point4D;
use crate::polytope::constants::{
    CELL_VERTEX_COUNT, EDGE_LENGTH, PENTAGONS_PER_CELL, TOLERANCE, TRIANGLES_PER_CELL,
    TRIANGLES_PER_PENTAGON,
};
use crate::polytope::VertexSet;

/// Vertices of a pentagon
const PENTAGON_SIZE: usize = 5;

/// A hull triangle as three vertex indices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Triangle(pub [usize; 3]);

impl Triangle {
    /// Remap local cell indices to global vertex indices
    pub fn to_global(&self, cell: &Cell) -> Triangle {
        Triangle(self.0.map(|local| cell.global(local)))
    }

    pub fn vertices(&self) -> [usize; 3] {
        self.0
    }
}

/// A pentagonal face as 5 global vertex indices in cyclic order
///
/// The cycle starts at the lowest index and consecutive entries (including
/// last → first) are joined by an edge of the 120-cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pentagon([usize; PENTAGON_SIZE]);

impl Pentagon {
    /// Wrap 5 vertex indices already in cyclic order
    pub fn new(vertices: [usize; PENTAGON_SIZE]) -> Self {
        Pentagon(vertices)
    }

    /// Vertices in cyclic order
    pub fn vertices(&self) -> &[usize; PENTAGON_SIZE] {
        &self.0
    }

    /// Vertices in ascending order
    pub fn sorted(&self) -> [usize; PENTAGON_SIZE] {
        let mut v = self.0;
        v.sort_unstable();
        v
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.0.contains(&vertex)
    }

    /// Number of vertices shared with another pentagon
    pub fn shared_vertices(&self, other: &Pentagon) -> usize {
        self.0.iter().filter(|v| other.contains(**v)).count()
    }
}

impl From<[usize; PENTAGON_SIZE]> for Pentagon {
    fn from(vertices: [usize; PENTAGON_SIZE]) -> Self {
        Pentagon::new(vertices)
    }
}

/// Triangulation result for one cell
#[derive(Clone, Debug)]
pub struct CellFacets {
    pub cell: CellId,
    /// 36 triangles in local indices, three consecutive per pentagon
    pub triangles: Vec<Triangle>,
    /// The same triangles in global indices
    pub global_triangles: Vec<Triangle>,
    /// 12 pentagons, in face order
    pub pentagons: Vec<Pentagon>,
    /// Recovery transform that made the hull solid, if the plain projection
    /// was degenerate
    pub recovery: Option<usize>,
}

/// Progress of the bounded hull retry loop for one cell
#[derive(Clone, Debug)]
pub enum HullState {
    /// Nothing tried yet
    Pending,
    /// Recovery transform `k` is to be tried next
    Transformed(usize),
    /// A hull with 12 pentagonal faces was found
    Succeeded {
        hull: ConvexHull,
        recovery: Option<usize>,
    },
    /// Every projection was degenerate
    Failed { attempts: usize, reason: String },
}

impl HullState {
    /// Run one attempt and move to the next state. Terminal states are
    /// returned unchanged.
    pub fn step(
        self,
        cell: &Cell,
        points: &[Point4D; CELL_VERTEX_COUNT],
        transforms: &[Rotation4],
    ) -> Result<HullState> {
        let (rotation, recovery) = match self {
            HullState::Pending => (None, None),
            HullState::Transformed(k) => match transforms.get(k) {
                Some(rotation) => (Some(rotation), Some(k)),
                None => {
                    return Ok(HullState::Failed {
                        attempts: k + 1,
                        reason: format!("no recovery transform {}", k),
                    })
                }
            },
            done => return Ok(done),
        };

        match solid_hull(cell, points, rotation) {
            Ok(hull) => Ok(HullState::Succeeded { hull, recovery }),
            Err(err) if err.is_recoverable() => {
                let next = recovery.map_or(0, |k| k + 1);
                debug!(cell = %cell.id, attempt = next, error = %err, "hull attempt degenerate");
                if next < transforms.len() {
                    Ok(HullState::Transformed(next))
                } else {
                    Ok(HullState::Failed {
                        attempts: next + 1,
                        reason: err.to_string(),
                    })
                }
            }
            Err(err) => Err(err),
        }
    }

    /// True for `Succeeded` and `Failed`
    pub fn is_terminal(&self) -> bool {
        matches!(self, HullState::Succeeded { .. } | HullState::Failed { .. })
    }
}

/// Hull of one projection; anything other than 12 pentagons is degenerate
fn solid_hull(
    cell: &Cell,
    points: &[Point4D; CELL_VERTEX_COUNT],
    rotation: Option<&Rotation4>,
) -> Result<ConvexHull> {
    let projected: Vec<Vec3> = points
        .iter()
        .map(|p| rotation.map_or(*p, |r| r.apply(p)).xyz())
        .collect();

    let hull = ConvexHull::compute(&projected, TOLERANCE).map_err(|e| {
        DodecaplexError::TriangulationDegenerate {
            cell: cell.id.0,
            reason: e.to_string(),
        }
    })?;

    let pentagonal = hull.faces().iter().all(|f| f.len() == PENTAGON_SIZE);
    if hull.face_count() != PENTAGONS_PER_CELL || !pentagonal {
        return Err(DodecaplexError::TriangulationDegenerate {
            cell: cell.id.0,
            reason: format!(
                "{} faces yielding {} triangles",
                hull.face_count(),
                hull.triangle_count()
            ),
        });
    }

    Ok(hull)
}

/// Triangulate one cell and rebuild its 12 pentagons
pub fn triangulate(cell: &Cell, vertices: &VertexSet) -> Result<CellFacets> {
    triangulate_with(cell, vertices, &recovery_transforms())
}

/// [`triangulate`] with an explicit list of recovery transforms
pub fn triangulate_with(
    cell: &Cell,
    vertices: &VertexSet,
    transforms: &[Rotation4],
) -> Result<CellFacets> {
    let points = cell.points(vertices);

    // Pending plus one state per transform
    let mut state = HullState::Pending;
    for _ in 0..=transforms.len() {
        state = state.step(cell, &points, transforms)?;
        if state.is_terminal() {
            break;
        }
    }

    let (hull, recovery) = match state {
        HullState::Succeeded { hull, recovery } => (hull, recovery),
        HullState::Failed { attempts, reason } => {
            return Err(DodecaplexError::TriangulationExhausted {
                cell: cell.id.0,
                attempts,
                reason,
            })
        }
        HullState::Pending | HullState::Transformed(_) => {
            return Err(DodecaplexError::TriangulationExhausted {
                cell: cell.id.0,
                attempts: transforms.len() + 1,
                reason: "retry loop ended without a verdict".to_string(),
            })
        }
    };

    if let Some(k) = recovery {
        warn!(cell = %cell.id, transform = k, "flat projection, used recovery transform");
    }

    let triangles: Vec<Triangle> = hull
        .fan_triangles(|local| cell.global(local))
        .into_iter()
        .map(Triangle)
        .collect();
    debug_assert_eq!(triangles.len(), TRIANGLES_PER_CELL);

    let global_triangles = triangles.iter().map(|t| t.to_global(cell)).collect();
    let pentagons = reconstruct_pentagons(cell, &triangles, &points)?;

    Ok(CellFacets {
        cell: cell.id,
        triangles,
        global_triangles,
        pentagons,
        recovery,
    })
}

/// Merge each run of 3 consecutive triangles into one cyclically ordered
/// pentagon
pub fn reconstruct_pentagons(
    cell: &Cell,
    triangles: &[Triangle],
    points: &[Point4D; CELL_VERTEX_COUNT],
) -> Result<Vec<Pentagon>> {
    triangles
        .chunks(TRIANGLES_PER_PENTAGON)
        .enumerate()
        .map(|(k, batch)| {
            let locals: BTreeSet<usize> = batch.iter().flat_map(|t| t.0).collect();
            if batch.len() != TRIANGLES_PER_PENTAGON || locals.len() != PENTAGON_SIZE {
                return Err(DodecaplexError::PentagonVertexCount {
                    cell: cell.id.0,
                    first: k * TRIANGLES_PER_PENTAGON,
                    found: locals.len(),
                });
            }
            let locals: Vec<usize> = locals.into_iter().collect();
            order_cycle(cell, k, &locals, points)
        })
        .collect()
}

/// Walk the pentagon's edges from its lowest vertex, always stepping to the
/// lower-indexed unvisited neighbour
fn order_cycle(
    cell: &Cell,
    pentagon: usize,
    locals: &[usize],
    points: &[Point4D; CELL_VERTEX_COUNT],
) -> Result<Pentagon> {
    // locals ascend, so does their global order
    let edge_neighbours = |v: usize| -> Vec<usize> {
        locals
            .iter()
            .copied()
            .filter(|&u| u != v && points[u].is_at_distance(&points[v], EDGE_LENGTH, TOLERANCE))
            .collect()
    };
    let unclosed = |v: usize, found: usize| DodecaplexError::UnclosedPentagon {
        cell: cell.id.0,
        pentagon,
        vertex: cell.global(v),
        found,
    };

    let mut order = Vec::with_capacity(PENTAGON_SIZE);
    let mut current = locals[0];
    order.push(current);

    while order.len() < PENTAGON_SIZE {
        let next = edge_neighbours(current);
        if next.len() != 2 {
            return Err(unclosed(current, next.len()));
        }
        current = next
            .into_iter()
            .find(|u| !order.contains(u))
            .ok_or_else(|| unclosed(current, 2))?;
        order.push(current);
    }

    if !edge_neighbours(current).contains(&order[0]) {
        return Err(unclosed(current, edge_neighbours(current).len()));
    }

    let mut cycle = [0; PENTAGON_SIZE];
    for (slot, local) in cycle.iter_mut().zip(order) {
        *slot = cell.global(local);
    }
    Ok(Pentagon::new(cycle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::decompose;
    use crate::polytope::{generate, PolytopeKind};

    fn setup() -> (VertexSet, Vec<Cell>) {
        let d4 = generate(PolytopeKind::Hecatonicosachoron).unwrap();
        let t4 = generate(PolytopeKind::Hexacosichoron).unwrap();
        let cells = decompose(&d4, &t4).unwrap();
        (d4, cells)
    }

    #[test]
    fn test_pentagon_overlap_is_zero_or_two() {
        let (d4, cells) = setup();
        let facets = triangulate(&cells[17], &d4).unwrap();
        assert_eq!(facets.triangles.len(), 36);
        assert_eq!(facets.pentagons.len(), 12);

        for (i, a) in facets.pentagons.iter().enumerate() {
            let mut edge_sharing = 0;
            for b in &facets.pentagons[i + 1..] {
                let shared = a.shared_vertices(b);
                assert!(shared == 0 || shared == 2, "overlap of {}", shared);
                if shared == 2 {
                    edge_sharing += 1;
                }
            }
            assert!(edge_sharing <= 5);
        }
    }

    #[test]
    fn test_pentagons_are_closed_edge_cycles() {
        let (d4, cells) = setup();
        let facets = triangulate(&cells[0], &d4).unwrap();
        for pentagon in &facets.pentagons {
            let v = pentagon.vertices();
            assert_eq!(v[0], *v.iter().min().unwrap());
            assert!(v[1] < v[4]);
            for k in 0..5 {
                let a = &d4[v[k]];
                let b = &d4[v[(k + 1) % 5]];
                assert!(a.is_at_distance(b, EDGE_LENGTH, TOLERANCE));
            }
        }
    }

    #[test]
    fn test_pentagons_cover_each_vertex_three_times() {
        let (d4, cells) = setup();
        let facets = triangulate(&cells[5], &d4).unwrap();
        for &g in &cells[5].members {
            let n = facets.pentagons.iter().filter(|p| p.contains(g)).count();
            assert_eq!(n, 3);
        }
    }

    #[test]
    fn test_flat_cells_recover() {
        let (d4, cells) = setup();
        let flat: Vec<&Cell> = cells
            .iter()
            .filter(|c| c.center.coords()[3].abs() < TOLERANCE)
            .collect();
        assert_eq!(flat.len(), 30);

        for cell in flat {
            let facets = triangulate(cell, &d4).unwrap();
            assert!(facets.recovery.is_some(), "cell {} needed no recovery", cell.id);
            assert_eq!(facets.pentagons.len(), 12);
        }
    }

    #[test]
    fn test_solid_cells_need_no_recovery() {
        let (d4, cells) = setup();
        let cell = cells
            .iter()
            .find(|c| c.center.coords()[3].abs() > 0.5)
            .unwrap();
        assert_eq!(triangulate(cell, &d4).unwrap().recovery, None);
    }

    #[test]
    fn test_state_machine_terminates_without_transforms() {
        let (d4, cells) = setup();
        let cell = cells
            .iter()
            .find(|c| c.center.coords()[3].abs() < TOLERANCE)
            .unwrap();
        let points = cell.points(&d4);

        let state = HullState::Pending.step(cell, &points, &[]).unwrap();
        match state {
            HullState::Failed { attempts, .. } => assert_eq!(attempts, 1),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn test_global_triangles_match_pentagons() {
        let (d4, cells) = setup();
        let facets = triangulate(&cells[3], &d4).unwrap();
        for (k, batch) in facets.global_triangles.chunks(3).enumerate() {
            let pentagon = facets.pentagons[k];
            assert!(batch.iter().flat_map(|t| t.0).all(|g| pentagon.contains(g)));
        }
    }

    #[test]
    fn test_bad_batch_is_rejected() {
        let (d4, cells) = setup();
        let points = cells[0].points(&d4);
        let triangles = vec![Triangle([0, 1, 2]), Triangle([0, 1, 2]), Triangle([0, 1, 3])];
        let err = reconstruct_pentagons(&cells[0], &triangles, &points).unwrap_err();
        assert_eq!(err.error_code(), "PENTAGON_VERTEX_COUNT");
    }

    #[test]
    fn test_non_face_vertices_cannot_be_ordered() {
        let (d4, cells) = setup();
        let cell = &cells[0];
        let points = cell.points(&d4);
        let facets = triangulate(cell, &d4).unwrap();

        // four vertices of a real face plus one from elsewhere in the cell
        let mut locals: Vec<usize> = facets.pentagons[0]
            .vertices()
            .iter()
            .map(|&g| cell.local(g).unwrap())
            .collect();
        let stray = (0..CELL_VERTEX_COUNT).find(|l| !locals.contains(l)).unwrap();
        locals[4] = stray;
        locals.sort_unstable();

        let err = order_cycle(cell, 0, &locals, &points).unwrap_err();
        assert_eq!(err.error_code(), "UNCLOSED_PENTAGON");

        let [a, b, c, d, e] = [locals[0], locals[1], locals[2], locals[3], locals[4]];
        let fan = vec![Triangle([a, b, c]), Triangle([a, c, d]), Triangle([a, d, e])];
        let err = reconstruct_pentagons(cell, &fan, &points).unwrap_err();
        assert!(matches!(
            err,
            DodecaplexError::UnclosedPentagon { cell: 0, pentagon: 0, .. }
        ));
    }

    #[test]
    fn test_flat_cell_without_transforms_is_exhausted() {
        let (d4, cells) = setup();
        let cell = cells
            .iter()
            .find(|c| c.center.coords()[3].abs() < TOLERANCE)
            .unwrap();

        let err = triangulate_with(cell, &d4, &[]).unwrap_err();
        match &err {
            DodecaplexError::TriangulationExhausted { cell: c, attempts, .. } => {
                assert_eq!(*c, cell.id.0);
                assert_eq!(*attempts, 1);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert!(!err.is_recoverable());

        let recovered = triangulate_with(cell, &d4, &recovery_transforms()).unwrap();
        assert!(recovered.recovery.is_some());
    }

    #[test]
    fn test_pentagon_keeps_given_order() {
        let pentagon = Pentagon::from([4, 9, 7, 8, 5]);
        assert_eq!(pentagon, Pentagon::new([4, 9, 7, 8, 5]));
        assert_eq!(pentagon.vertices(), &[4, 9, 7, 8, 5]);
        assert_eq!(pentagon.sorted(), [4, 5, 7, 8, 9]);
        assert_eq!(pentagon.shared_vertices(&Pentagon::new([5, 6, 7, 10, 11])), 2);
    }
}
