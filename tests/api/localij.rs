use hexatile::{CellIndex, CoordIJ, LocalIJ, Resolution};

#[test]
fn display() {
    let anchor = CellIndex::try_from(0x8508282bfffffff).expect("anchor");
    let local_ij = LocalIJ::new(anchor, CoordIJ::new(-4, -3));

    assert_eq!(local_ij.to_string(), "8508282bfffffff (-4, -3)".to_owned());
}

#[test]
fn resolution_mismatch() {
    let anchor = CellIndex::try_from(0x8928308280fffff).expect("anchor");
    let coarser = CellIndex::try_from(0x85283473fffffff).expect("coarser");

    assert!(coarser.to_local_ij(anchor).is_err());
}

#[test]
fn roundtrip_with_neighbors() {
    let anchor = CellIndex::try_from(0x8928308280fffff).expect("anchor");

    // The anchor itself.
    let local_ij = anchor.to_local_ij(anchor).expect("local IJ");
    assert_eq!(
        CellIndex::try_from(local_ij).expect("cell index"),
        anchor,
        "self roundtrip"
    );

    // Its immediate neighborhood.
    for edge in anchor.edges() {
        let neighbor = edge.destination();
        let local_ij = neighbor.to_local_ij(anchor).expect("local IJ");
        let back = CellIndex::try_from(local_ij).expect("cell index");

        assert_eq!(back, neighbor, "roundtrip for {neighbor}");
    }
}

#[test]
fn neighboring_coordinates_are_adjacent() {
    let anchor = CellIndex::try_from(0x8928308280fffff).expect("anchor");
    let origin = anchor.to_local_ij(anchor).expect("local IJ");

    for edge in anchor.edges() {
        let neighbor = edge.destination();
        let coord = neighbor.to_local_ij(anchor).expect("local IJ").coord;

        let di = coord.i - origin.coord.i;
        let dj = coord.j - origin.coord.j;

        // Neighboring cells are one axial step away.
        assert!(
            matches!((di, dj), (0, 1) | (1, 0) | (0, -1) | (-1, 0) | (1, 1) | (-1, -1)),
            "offset ({di}, {dj}) for {neighbor}"
        );
    }
}

#[test]
fn to_cell_overflow() {
    let anchor = CellIndex::try_from(0x8508282bfffffff).expect("anchor");

    let ij = CoordIJ::new(i32::MAX - 10, -11);
    assert!(CellIndex::try_from(LocalIJ::new(anchor, ij)).is_err());
}

#[test]
fn grid_distance() {
    let origin = CellIndex::try_from(0x8928308280fffff).expect("origin");

    assert_eq!(origin.grid_distance(origin).expect("distance"), 0);

    for edge in origin.edges() {
        let neighbor = edge.destination();
        assert_eq!(origin.grid_distance(neighbor).expect("distance"), 1);
        assert_eq!(
            origin.grid_path_cells_size(neighbor).expect("size"),
            2,
            "a path to a neighbor has two cells"
        );
    }
}

#[test]
fn grid_path() {
    let start = CellIndex::try_from(0x8928308280fffff).expect("start");
    // A cell two steps away: the neighbor of a neighbor.
    let end = {
        let next = start.edges().next().expect("edge").destination();
        next.edges()
            .map(|edge| edge.destination())
            .find(|&cell| {
                cell != start
                    && !start.is_neighbor_with(cell).expect("same resolution")
            })
            .expect("cell at distance 2")
    };

    let distance = start.grid_distance(end).expect("distance");
    assert_eq!(distance, 2);

    let path = start
        .grid_path_cells(end)
        .expect("path")
        .collect::<Result<Vec<_>, _>>()
        .expect("path cells");

    assert_eq!(
        i32::try_from(path.len()).expect("path length"),
        distance + 1,
        "path length is distance + 1"
    );
    assert_eq!(path[0], start, "path starts at the start");
    assert_eq!(path[path.len() - 1], end, "path ends at the end");

    for pair in path.windows(2) {
        assert!(
            pair[0].is_neighbor_with(pair[1]).expect("same resolution"),
            "consecutive path cells are neighbors"
        );
    }
}

#[test]
fn grid_path_to_self() {
    let start = CellIndex::try_from(0x8928308280fffff).expect("start");

    let path = start
        .grid_path_cells(start)
        .expect("path")
        .collect::<Result<Vec<_>, _>>()
        .expect("path cells");

    assert_eq!(path, vec![start], "a path to self is the cell itself");
}

#[test]
fn grid_distance_every_resolution() {
    for resolution in Resolution::range(Resolution::One, Resolution::Seven) {
        let cell = hexatile::LatLng::new(48.864716, 2.349014)
            .expect("coordinate")
            .to_cell(resolution);

        for edge in cell.edges() {
            let neighbor = edge.destination();
            assert_eq!(
                cell.grid_distance(neighbor).expect("distance"),
                1,
                "neighbor distance at {resolution}"
            );
        }
    }
}
