use hexatile::{CellIndex, LatLng, Resolution};

#[test]
fn try_from_str() {
    let result = "8928308280fffff".parse::<CellIndex>();
    let expected = CellIndex::try_from(0x8928308280fffff);
    assert_eq!(result, expected, "valid string");

    let result = "8928308280FFFFF".parse::<CellIndex>();
    assert_eq!(result, expected, "case-insensitive hex");

    assert!("".parse::<CellIndex>().is_err(), "empty string");
    assert!("**".parse::<CellIndex>().is_err(), "junk string");
    assert!(
        "ffffffffffffffff".parse::<CellIndex>().is_err(),
        "the largest 64-bit value is not a cell"
    );
}

#[test]
fn display() {
    let index = CellIndex::try_from(0x8a1fb46622dffff).expect("cell index");

    // Default display is the lowercase hex one, no padding, no prefix.
    assert_eq!(index.to_string(), "8a1fb46622dffff".to_owned());

    // Upper hex.
    assert_eq!(format!("{index:X}"), "8A1FB46622DFFFF".to_owned());
}

#[test]
fn reserved_bits_must_be_zero() {
    // Resolution 0 cell on base cell 0, reserved bits clear.
    const TEMPLATE: u64 = 0x8001fffffffffff;

    assert!(CellIndex::try_from(TEMPLATE).is_ok(), "reserved bits unset");

    for i in 1..=7_u64 {
        let tainted = TEMPLATE | (i << 56);
        assert!(
            CellIndex::try_from(tainted).is_err(),
            "reserved bits set to {i}"
        );
    }
}

#[test]
fn high_bit_must_be_zero() {
    assert!(CellIndex::try_from(0x8928308280fffff | (1 << 63)).is_err());
}

#[test]
fn invalid_modes_are_rejected() {
    // An edge index is not a cell index.
    assert!(CellIndex::try_from(0x13a194e699ab7fff).is_err());
    // Nor is zero.
    assert!(CellIndex::try_from(0).is_err());
}

#[test]
fn unused_digits_must_be_set() {
    // Resolution 9 index whose last unused digit is zeroed out.
    assert!(CellIndex::try_from(0x8928308280ffff0).is_err());

    // Digits within the resolution range set to 7: rewrite the resolution
    // of a coarse index without clearing the unused digits.
    let cell = CellIndex::try_from(0x8928308280fffff).expect("cell index");
    let parent = u64::from(cell.parent(Resolution::Five).expect("parent"));
    let tainted = (parent & !(0xf << 52)) | (9 << 52);
    assert!(CellIndex::try_from(tainted).is_err());
}

#[test]
fn deleted_k_subsequence_is_rejected() {
    // Resolution 1 cell on pentagonal base cell 4 with a leading K digit.
    let bits = {
        let valid = 0x81083ffffffffff_u64; // leading digit 0.
        valid | (1 << 42) // rewrite digit 1 from 0 to K.
    };

    assert!(CellIndex::try_from(bits).is_err(), "leading K on a pentagon");

    // The same digits are fine on an hexagonal base cell (0).
    let hexagon = 0x81003ffffffffff_u64 | (1 << 42);
    assert!(CellIndex::try_from(hexagon).is_ok(), "leading K on a hexagon");
}

#[test]
fn base_cells() {
    let cells = CellIndex::base_cells().collect::<Vec<_>>();

    assert_eq!(cells.len(), 122, "122 base cells");
    assert_eq!(
        cells
            .iter()
            .filter(|cell| cell.is_pentagon())
            .count(),
        12,
        "12 pentagons"
    );
    assert!(
        cells.iter().all(|cell| cell.resolution() == Resolution::Zero),
        "all at resolution 0"
    );
}

#[test]
fn encode_decode_roundtrip() {
    let cells = [
        0x8001fffffffffff, // Resolution 0.
        0x8009fffffffffff, // Resolution 0, pentagon.
        0x81083ffffffffff, // Resolution 1, pentagon.
        0x822597fffffffff, // Resolution 2.
        0x85283473fffffff, // Resolution 5.
        0x8928308280fffff, // Resolution 9.
        0x8a1fb46622dffff, // Resolution 10.
        0x8f2834782b9c2ab, // Resolution 15.
    ];

    for value in cells {
        let cell = CellIndex::try_from(value).expect("valid cell index");
        let resolution = cell.resolution();

        let center = LatLng::from(cell);
        assert_eq!(
            center.to_cell(resolution),
            cell,
            "center of {cell} is located in the cell"
        );
    }
}

#[test]
fn boundary_contains_center() {
    use hexatile::BBox;

    let cells = [
        0x8009fffffffffff, // Pentagon.
        0x85283473fffffff, // Class III hexagon.
        0x8a1fb46622dffff, // Class II hexagon.
    ];

    for value in cells {
        let cell = CellIndex::try_from(value).expect("valid cell index");
        let boundary = cell.boundary();
        let expected_verts = if cell.is_pentagon() { 5 } else { 6 };

        assert!(
            boundary.len() >= expected_verts,
            "at least the topological vertices for {cell}"
        );

        let bbox = BBox::from(&boundary);
        assert!(
            bbox.contains(&LatLng::from(cell)),
            "center of {cell} within the boundary bbox"
        );
    }
}

#[test]
fn area() {
    let cell = CellIndex::try_from(0x8a1fb46622dffff).expect("cell index");
    let average = cell.resolution().area_km2();
    let area = cell.area_km2();

    // Individual cells deviate from the per-resolution average, but not by
    // an order of magnitude.
    assert!(
        area > average / 3. && area < average * 3.,
        "cell area {area} vs average {average}"
    );

    assert!(cell.area_rads2() > 0.);
    assert!((cell.area_m2() / cell.area_km2() - 1e6).abs() < 1e-3);

    // A pentagon is smaller than the average hexagon.
    let pentagon = CellIndex::try_from(0x8009fffffffffff).expect("pentagon");
    assert!(pentagon.area_km2() < pentagon.resolution().area_km2());
}

#[test]
fn neighbors() {
    let origin = CellIndex::try_from(0x8a194e699ab7fff).expect("origin");
    let destination =
        CellIndex::try_from(0x8a194e699a97fff).expect("destination");

    assert!(
        origin.is_neighbor_with(destination).expect("same resolution"),
        "known neighbors"
    );
    assert!(
        !origin.is_neighbor_with(origin).expect("same resolution"),
        "a cell is not its own neighbor"
    );

    let far_away = CellIndex::try_from(0x8a1fb46622dffff).expect("far away");
    assert!(
        !origin.is_neighbor_with(far_away).expect("same resolution"),
        "cells on the other side of the world"
    );

    let coarser = CellIndex::try_from(0x85283473fffffff).expect("coarser");
    assert!(
        origin.is_neighbor_with(coarser).is_err(),
        "resolution mismatch"
    );
}

#[test]
fn neighbors_agree_with_edges() {
    let cells = [
        0x8928308280fffff, // Hexagon.
        0x81083ffffffffff, // Pentagon.
    ];

    for value in cells {
        let origin = CellIndex::try_from(value).expect("valid cell index");
        let ring = origin
            .edges()
            .map(|edge| edge.destination())
            .collect::<Vec<_>>();

        for &neighbor in &ring {
            assert!(
                origin.is_neighbor_with(neighbor).expect("same resolution"),
                "edge destination {neighbor} is a neighbor of {origin}"
            );
            assert_eq!(
                origin.grid_distance(neighbor).expect("grid distance"),
                1,
                "neighbors are at grid distance 1"
            );
        }

        assert_eq!(
            ring.len(),
            if origin.is_pentagon() { 5 } else { 6 },
            "neighbor count of {origin}"
        );
    }
}
