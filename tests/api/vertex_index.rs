use hexatile::{CellIndex, LatLng, Vertex, VertexIndex};
use std::collections::HashSet;

#[test]
fn known_canonical_vertex() {
    let index =
        VertexIndex::try_from(0x2222597fffffffff).expect("vertex index");

    assert_eq!(index.vertex(), Vertex::try_from(2).expect("vertex"));
    assert_eq!(
        index.owner(),
        CellIndex::try_from(0x822597fffffffff).expect("owner"),
    );
}

#[test]
fn try_from_u64() {
    // A cell index is not a vertex index.
    assert!(VertexIndex::try_from(0x822597fffffffff).is_err());
    // Vertex numbers above 5 are invalid.
    assert!(VertexIndex::try_from(0x2622597fffffffff).is_err());
}

#[test]
fn cell_vertex_count() {
    let hexagon = CellIndex::try_from(0x8928308280fffff).expect("hexagon");
    assert_eq!(hexagon.vertexes().count(), 6, "6 vertices on an hexagon");

    let pentagon = CellIndex::try_from(0x81083ffffffffff).expect("pentagon");
    assert_eq!(pentagon.vertexes().count(), 5, "5 vertices on a pentagon");

    // Out-of-range vertex numbers.
    assert!(pentagon.vertex(Vertex::try_from(5).expect("vertex")).is_none());
}

#[test]
fn canonical_indexes_are_valid() {
    let cells = [
        0x8928308280fffff, // Hexagon.
        0x81083ffffffffff, // Pentagon.
        0x822597fffffffff, // Coarse hexagon.
    ];

    for value in cells {
        let cell = CellIndex::try_from(value).expect("cell index");

        for vertex in cell.vertexes() {
            assert!(
                VertexIndex::try_from(u64::from(vertex)).is_ok(),
                "canonical vertex {vertex} of {cell}"
            );
        }
    }
}

// Two neighboring cells share exactly two vertices, and the shared vertices
// have a single canonical index.
#[test]
fn vertexes_are_shared_with_neighbors() {
    let origin = CellIndex::try_from(0x8928308280fffff).expect("origin");
    let vertexes = origin.vertexes().collect::<HashSet<_>>();

    for edge in origin.edges() {
        let neighbor = edge.destination();
        let shared = neighbor
            .vertexes()
            .filter(|vertex| vertexes.contains(vertex))
            .count();

        assert_eq!(shared, 2, "vertices shared with {neighbor}");
    }
}

// The geographic coordinates of a cell's vertices are the cell's boundary
// vertices.
#[test]
fn vertex_to_point_matches_boundary() {
    let cells = [
        0x8928308280fffff, // Class III hexagon.
        0x8a1fb46622dffff, // Class II hexagon.
        0x81083ffffffffff, // Pentagon.
    ];

    for value in cells {
        let cell = CellIndex::try_from(value).expect("cell index");
        let boundary = cell.boundary();

        for vertex in cell.vertexes() {
            let point = LatLng::from(vertex);

            assert!(
                boundary.iter().any(|&coord| coord == point),
                "vertex {vertex} of {cell} lies on the boundary"
            );
        }
    }
}
