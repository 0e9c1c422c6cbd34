//! Layout of the generated text table

use std::sync::OnceLock;

use dodecaplex_core::{to_json, Dodecaplex, DodecaplexTable, Rendered};

fn rendered() -> &'static (Dodecaplex, Rendered) {
    static BUILT: OnceLock<(Dodecaplex, Rendered)> = OnceLock::new();
    BUILT.get_or_init(|| {
        let d = Dodecaplex::build().expect("pipeline should build");
        let r = d.render();
        (d, r)
    })
}

fn section<'a>(table: &'a str, name: &str) -> Vec<&'a str> {
    let header = format!("//------{}------", name);
    table
        .lines()
        .skip_while(|l| *l != header)
        .skip(1)
        .take_while(|l| !l.starts_with("//------"))
        .collect()
}

#[test]
fn test_cell_blocks() {
    let (d, r) = rendered();
    let lines: Vec<&str> = r.table.lines().collect();

    for cell in 0..120 {
        let at = cell * 4;
        assert_eq!(lines[at], format!("//------Cell {}------", cell));
        for line in &lines[at + 1..at + 4] {
            assert_eq!(line.matches("\t\t").count(), 4);
        }
    }

    // first pentagon of cell 0 leads the first data line
    let first = d.facets[0].pentagons[0];
    let expected: Vec<String> = first.vertices().iter().map(|v| v.to_string()).collect();
    assert!(lines[1].starts_with(&format!("{},\t\t", expected.join(", "))));
}

#[test]
fn test_section_order() {
    let (_, r) = rendered();
    let headers: Vec<&str> = r
        .table
        .lines()
        .filter(|l| l.starts_with("//------") && !l.starts_with("//------Cell"))
        .collect();
    assert_eq!(
        headers,
        [
            "//------neighbors------",
            "//------interior------",
            "//------exterior------",
            "//------adjacent------",
        ]
    );
}

#[test]
fn test_table_rows() {
    let (_, r) = rendered();
    for (name, rows, width) in [
        ("neighbors", 120, 12),
        ("interior", 1440, 5),
        ("exterior", 1440, 5),
        ("adjacent", 1440, 10),
    ] {
        let lines = section(&r.table, name);
        assert_eq!(lines.len(), rows, "{} rows", name);
        for (i, line) in lines.iter().enumerate() {
            let last = i + 1 == lines.len();
            assert_eq!(line.ends_with(','), !last, "{} row {}", name, i);
            let entries: Vec<usize> = line
                .trim_end_matches(',')
                .split(", ")
                .map(|e| e.parse().unwrap())
                .collect();
            assert_eq!(entries.len(), width, "{} row {}", name, i);
            if name != "neighbors" {
                assert!(entries.windows(2).all(|w| w[0] < w[1]));
            }
        }
    }
}

#[test]
fn test_vertex_listing() {
    let (d, r) = rendered();
    let lines: Vec<&str> = r.vertices.lines().collect();
    assert_eq!(lines.len(), 600);
    for (line, p) in lines.iter().zip(&d.vertices) {
        let coords: Vec<f64> = line
            .trim_end_matches(',')
            .split(", ")
            .map(|c| c.parse().unwrap())
            .collect();
        assert_eq!(coords, p.coords());
    }
}

#[test]
fn test_json_export() {
    let (d, _) = rendered();
    let json = to_json(&d.table()).unwrap();
    let table: DodecaplexTable = serde_json::from_str(&json).unwrap();
    assert_eq!(table.vertices.len(), 600);
    assert_eq!(table.cells.len(), 120);
    assert_eq!(table.cells[0].pentagons, d.facets[0].pentagons);
    assert_eq!(table.adjacent.len(), 1440);
    assert_eq!(table.cells.iter().filter(|c| c.recovery.is_some()).count(), 30);
}
