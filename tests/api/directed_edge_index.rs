use approx::assert_relative_eq;
use hexatile::{CellIndex, DirectedEdgeIndex, Edge};

#[test]
fn try_from_u64() {
    assert!(
        DirectedEdgeIndex::try_from(0x13a194e699ab7fff).is_ok(),
        "valid edge index"
    );
    assert!(
        DirectedEdgeIndex::try_from(0x8a194e699ab7fff).is_err(),
        "a cell index is not an edge index"
    );
    assert!(
        DirectedEdgeIndex::try_from(0x10a194e699ab7fff).is_err(),
        "direction 0 is not a valid edge"
    );
}

#[test]
fn try_from_str() {
    let result = "13a194e699ab7fff".parse::<DirectedEdgeIndex>();
    let expected = DirectedEdgeIndex::try_from(0x13a194e699ab7fff);
    assert_eq!(result, expected, "valid string");

    assert!("no bueno".parse::<DirectedEdgeIndex>().is_err());
}

#[test]
fn endpoints() {
    let index =
        DirectedEdgeIndex::try_from(0x13a194e699ab7fff).expect("edge index");

    assert_eq!(index.edge(), Edge::try_from(3).expect("edge"));
    assert_eq!(
        index.origin(),
        CellIndex::try_from(0x8a194e699ab7fff).expect("origin"),
    );
    assert_eq!(
        index.destination(),
        CellIndex::try_from(0x8a194e699a97fff).expect("destination"),
    );
    assert_eq!(
        index.cells(),
        (index.origin(), index.destination()),
        "cells() is origin + destination"
    );
}

#[test]
fn from_cells() {
    let origin = CellIndex::try_from(0x8a194e699ab7fff).expect("origin");
    let destination =
        CellIndex::try_from(0x8a194e699a97fff).expect("destination");

    let edge = origin.edge(destination).expect("edge index");

    assert_eq!(edge.origin(), origin);
    assert_eq!(edge.destination(), destination);

    // Non-neighbors have no edge.
    let far_away = CellIndex::try_from(0x8a1fb46622dffff).expect("far away");
    assert!(origin.edge(far_away).is_none());
}

#[test]
fn edges_from_a_cell() {
    let hexagon = CellIndex::try_from(0x8928308280fffff).expect("hexagon");
    let edges = hexagon.edges().collect::<Vec<_>>();
    assert_eq!(edges.len(), 6, "an hexagon has 6 edges");

    let pentagon = CellIndex::try_from(0x81083ffffffffff).expect("pentagon");
    let edges = pentagon.edges().collect::<Vec<_>>();
    assert_eq!(edges.len(), 5, "a pentagon has 5 edges");

    for edge in edges {
        assert_eq!(edge.origin(), pentagon, "origin is preserved");
        assert!(
            DirectedEdgeIndex::try_from(u64::from(edge)).is_ok(),
            "{edge} is a valid edge index"
        );
    }
}

#[test]
fn pentagon_has_no_k_edge() {
    // Mode 2, edge 1, over a pentagonal cell (base cell 4, resolution 1).
    let pentagon = CellIndex::try_from(0x81083ffffffffff).expect("pentagon");
    let bits = (u64::from(pentagon) & !(0xf << 59)) | (2 << 59) | (1 << 56);

    assert!(
        DirectedEdgeIndex::try_from(bits).is_err(),
        "K edge on a pentagon"
    );
}

#[test]
fn boundary_and_length() {
    let index =
        DirectedEdgeIndex::try_from(0x13a194e699ab7fff).expect("edge index");

    let boundary = index.boundary();
    assert!(boundary.len() >= 2, "at least the two endpoints");

    assert_relative_eq!(
        index.length_rads(),
        1.1795418098325597e-5,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        index.length_km(),
        0.07514869340636812,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        index.length_m(),
        75.14869340636812,
        max_relative = 1e-9
    );
}

#[test]
fn roundtrip_through_neighbors() {
    let origin = CellIndex::try_from(0x8928308280fffff).expect("origin");

    for edge in origin.edges() {
        let destination = edge.destination();

        // The reverse edge leads back.
        let reverse = destination.edge(origin).expect("reverse edge");
        assert_eq!(reverse.destination(), origin, "reverse of {edge}");
    }
}
