use float_eq::assert_float_eq;
use hexatile::{CellIndex, LatLng, Resolution};

#[test]
fn to_cell_known_value() {
    let ll = LatLng::new(37.3615593, -122.0553238).expect("coordinate");

    assert_eq!(
        ll.to_cell(Resolution::Five),
        CellIndex::try_from(0x85283473fffffff).expect("cell index"),
    );
}

#[test]
fn to_cell_every_resolution() {
    let ll = LatLng::new(48.864716, 2.349014).expect("coordinate");

    for resolution in Resolution::range(Resolution::Zero, Resolution::Fifteen)
    {
        let cell = ll.to_cell(resolution);

        assert_eq!(cell.resolution(), resolution);
        // The cell center indexes back to the same cell.
        assert_eq!(LatLng::from(cell).to_cell(resolution), cell);
    }
}

// Class III parity matches the resolution parity by construction.
#[test]
fn class3_parity() {
    let ll = LatLng::from_radians(0., 0.).expect("coordinate");

    for resolution in Resolution::range(Resolution::Zero, Resolution::Fifteen)
    {
        let cell = ll.to_cell(resolution);

        assert_eq!(
            cell.resolution().is_class3(),
            u8::from(resolution) % 2 == 1,
            "resolution {resolution}"
        );
    }
}

#[test]
fn extreme_coordinates() {
    // Make sure nothing blows up on degenerate input.
    let ll = LatLng::from_radians(0., 1e45).expect("coordinate");
    let _cell = ll.to_cell(Resolution::Fourteen);

    let ll = LatLng::new(2., -3e39).expect("coordinate");
    let _cell = ll.to_cell(Resolution::Zero);

    let north_pole = LatLng::new(90., 0.).expect("coordinate");
    let cell = north_pole.to_cell(Resolution::Five);
    assert_eq!(
        LatLng::from(cell).to_cell(Resolution::Five),
        cell,
        "north pole roundtrip"
    );

    let south_pole = LatLng::new(-90., 17.).expect("coordinate");
    let cell = south_pole.to_cell(Resolution::Five);
    assert_eq!(
        LatLng::from(cell).to_cell(Resolution::Five),
        cell,
        "south pole roundtrip"
    );
}

#[test]
fn cell_center_distance_is_bounded() {
    // The distance from a point to the center of its containing cell is
    // bounded by the cell circumradius (approximated here by the edge
    // length, which is an upper bound of sorts for the apothem).
    let ll = LatLng::new(43.6, 1.44).expect("coordinate");

    for resolution in Resolution::range(Resolution::Zero, Resolution::Ten) {
        let cell = ll.to_cell(resolution);
        let center = LatLng::from(cell);

        assert!(
            ll.distance_km(center) <= 2. * resolution.edge_length_km(),
            "distance to center at {resolution}"
        );
    }
}

#[test]
fn distances() {
    let paris = LatLng::new(48.864716, 2.349014).expect("paris");
    let shanghai = LatLng::new(31.224361, 121.469170).expect("shanghai");

    assert_float_eq!(
        paris.distance_km(shanghai),
        9262.547534054209,
        abs <= 1e-6
    );
    assert_float_eq!(
        paris.distance_m(shanghai),
        9262547.534054209,
        abs <= 1e-3
    );
}
