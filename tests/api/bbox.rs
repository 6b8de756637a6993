use core::f64::consts::PI;
use float_eq::assert_float_eq;
use hexatile::{BBox, LatLng};

fn ring(coords: &[(f64, f64)]) -> Vec<LatLng> {
    coords
        .iter()
        .map(|&(lat, lng)| LatLng::from_radians(lat, lng).expect("coordinate"))
        .collect()
}

fn assert_bbox(
    geofence: &[(f64, f64)],
    expected: (f64, f64, f64, f64),
    inside: (f64, f64),
    outside: (f64, f64),
) {
    let result = BBox::from_ring(&ring(geofence));
    let (north, south, east, west) = expected;

    assert_float_eq!(result.north, north, abs <= f64::EPSILON, "north");
    assert_float_eq!(result.south, south, abs <= f64::EPSILON, "south");
    assert_float_eq!(result.east, east, abs <= f64::EPSILON, "east");
    assert_float_eq!(result.west, west, abs <= f64::EPSILON, "west");

    let inside =
        LatLng::from_radians(inside.0, inside.1).expect("inside point");
    assert!(result.contains(&inside), "contains the inside point");

    let outside =
        LatLng::from_radians(outside.0, outside.1).expect("outside point");
    assert!(!result.contains(&outside), "excludes the outside point");
}

#[test]
fn pos_lat_pos_lng() {
    assert_bbox(
        &[(0.8, 0.3), (0.7, 0.6), (1.1, 0.7), (1.0, 0.2)],
        (1.1, 0.7, 0.7, 0.2),
        (0.9, 0.4),
        (0.0, 0.0),
    );
}

#[test]
fn neg_lat_pos_lng() {
    assert_bbox(
        &[(-0.3, 0.6), (-0.4, 0.9), (-0.2, 0.8), (-0.1, 0.6)],
        (-0.1, -0.4, 0.9, 0.6),
        (-0.3, 0.8),
        (0.0, 0.0),
    );
}

#[test]
fn pos_lat_neg_lng() {
    assert_bbox(
        &[(0.7, -1.4), (0.8, -0.9), (1.0, -0.8), (1.1, -1.3)],
        (1.1, 0.7, -0.8, -1.4),
        (0.9, -1.0),
        (0.0, 0.0),
    );
}

#[test]
fn neg_lat_neg_lng() {
    assert_bbox(
        &[(-0.4, -1.4), (-0.3, -1.1), (-0.1, -1.2), (-0.2, -1.4)],
        (-0.1, -0.4, -1.1, -1.4),
        (-0.3, -1.2),
        (0.0, 0.0),
    );
}

#[test]
fn around_zero_zero() {
    assert_bbox(
        &[(0.4, -0.4), (0.4, 0.4), (-0.4, 0.4), (-0.4, -0.4)],
        (0.4, -0.4, 0.4, -0.4),
        (-0.1, -0.1),
        (1.0, -1.0),
    );
}

#[test]
fn transmeridian() {
    let expected = (0.4, -0.4, -PI + 0.1, PI - 0.1);
    assert_bbox(
        &[
            (0.4, PI - 0.1),
            (0.4, -PI + 0.1),
            (-0.4, -PI + 0.1),
            (-0.4, PI - 0.1),
        ],
        expected,
        (-0.1, PI),
        (1.0, PI - 0.5),
    );

    let bbox = BBox {
        north: expected.0,
        south: expected.1,
        east: expected.2,
        west: expected.3,
    };
    assert!(bbox.is_transmeridian());

    let contains = |lat, lng| {
        bbox.contains(&LatLng::from_radians(lat, lng).expect("coordinate"))
    };
    assert!(contains(0.1, PI - 0.05), "west inside point");
    assert!(contains(0.1, -PI + 0.05), "east inside point");
    assert!(!contains(0.1, PI - 0.5), "west outside point");
    assert!(!contains(0.1, -PI + 0.5), "east outside point");

    // The center is shifted back around the antimeridian.
    let center = bbox.center();
    assert_float_eq!(center.lat_radians(), 0., abs <= f64::EPSILON);
    assert!(
        center.lng_radians().abs() > PI - 0.2,
        "center near the antimeridian"
    );
}

#[test]
fn empty_ring() {
    let bbox = BBox::from_ring(&[]);

    assert_float_eq!(bbox.north, 0., abs <= f64::EPSILON);
    assert_float_eq!(bbox.south, 0., abs <= f64::EPSILON);
    assert_float_eq!(bbox.east, 0., abs <= f64::EPSILON);
    assert_float_eq!(bbox.west, 0., abs <= f64::EPSILON);
}
