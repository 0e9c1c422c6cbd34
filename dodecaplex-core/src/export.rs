//! Text and JSON output.
//!
//! The text table is meant to be `#include`d as static initializer data:
//!
//! ```text
//! //------Cell 0------
//! <4 pentagons per line, 3 lines>
//! ...
//! //------neighbors------
//! <12 cell ids per cell>
//! //------interior------
//! <5 pentagon ids per pentagon>
//! //------exterior------
//! <5 pentagon ids per pentagon>
//! //------adjacent------
//! <10 pentagon ids per pentagon>
//! ```
//!
//! Rows are joined by `",\n"`; within a row entries are joined by `", "`.
//! Pentagon indices in the relation tables are global (`cell * 12 + k`).

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::cells::CellId;
use crate::error::Result;
use crate::facets::Pentagon;
use crate::point::Point4D;
use crate::polytope::VertexSet;

/// Pentagons per output line
const PENTAGONS_PER_LINE: usize = 4;

/// Minimum field width of one formatted pentagon
const PENTAGON_WIDTH: usize = 15;

/// Rendered text outputs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    /// The cell / neighbour / relation table
    pub table: String,
    /// Vertex coordinates the table's indices refer to
    pub vertices: String,
}

/// Format the full table plus the vertex listing. Pure formatting.
pub fn export(
    vertices: &VertexSet,
    per_cell_indices: &[Vec<Pentagon>],
    neighbor_table: &[[CellId; 12]],
    interior: &[Vec<usize>],
    exterior: &[Vec<usize>],
    adjacent: &[Vec<usize>],
) -> Rendered {
    let mut table = render_cells(per_cell_indices);
    push_section(&mut table, "neighbors", neighbor_table.iter().map(|row| join(&row[..])));
    push_section(&mut table, "interior", interior.iter().map(|row| join(row.as_slice())));
    push_section(&mut table, "exterior", exterior.iter().map(|row| join(row.as_slice())));
    push_section(&mut table, "adjacent", adjacent.iter().map(|row| join(row.as_slice())));

    Rendered {
        table,
        vertices: render_vertices(vertices),
    }
}

/// One pentagon as `"a, b, c, d, e,\t\t"`, right-aligned to width 15
pub fn format_pentagon(pentagon: &Pentagon) -> String {
    let entry = format!("{},\t\t", pentagon.vertices().iter().join(", "));
    format!("{:>width$}", entry, width = PENTAGON_WIDTH)
}

/// Per-cell pentagon blocks, each under a `//------Cell i------` header
pub fn render_cells(per_cell_indices: &[Vec<Pentagon>]) -> String {
    let mut out = String::new();
    for (i, pentagons) in per_cell_indices.iter().enumerate() {
        out.push_str(&format!("//------Cell {}------\n", i));
        for line in pentagons.chunks(PENTAGONS_PER_LINE) {
            for pentagon in line {
                out.push_str(&format_pentagon(pentagon));
            }
            out.push('\n');
        }
    }
    out
}

/// One `a, b, c, d,` line per vertex, in enumeration order
pub fn render_vertices(vertices: &VertexSet) -> String {
    let mut out = String::new();
    for p in vertices {
        let [a, b, c, d] = p.coords();
        out.push_str(&format!("{:?}, {:?}, {:?}, {:?},\n", a, b, c, d));
    }
    out
}

fn join<T: std::fmt::Display>(row: &[T]) -> String {
    row.iter().join(", ")
}

fn push_section(out: &mut String, name: &str, mut rows: impl Iterator<Item = String>) {
    out.push_str(&format!("//------{}------\n", name));
    out.push_str(&rows.join(",\n"));
    out.push('\n');
}

/// One cell of the JSON export
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub id: CellId,
    pub center: Point4D,
    /// Global vertex indices, ascending
    pub members: Vec<usize>,
    pub pentagons: Vec<Pentagon>,
    /// Cell across each pentagon, in pentagon order
    pub neighbors: Vec<CellId>,
    /// Recovery transform used to hull this cell
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub recovery: Option<usize>,
}

/// Everything the text table holds, plus coordinates, in serde form
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DodecaplexTable {
    pub vertices: Vec<Point4D>,
    pub cells: Vec<CellRecord>,
    pub interior: Vec<Vec<usize>>,
    pub exterior: Vec<Vec<usize>>,
    pub adjacent: Vec<Vec<usize>>,
}

/// Pretty-printed JSON
pub fn to_json(table: &DodecaplexTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(table)?)
}
