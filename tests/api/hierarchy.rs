use hexatile::{CellIndex, LatLng, Resolution};
use std::collections::HashSet;

#[test]
fn parent() {
    let index = CellIndex::try_from(0x8a1fb46622dffff).expect("cell index");

    assert_eq!(
        index.parent(Resolution::Five),
        CellIndex::try_from(0x851fb467fffffff).ok(),
        "parent at resolution 5"
    );
    assert_eq!(
        index.parent(Resolution::Ten),
        Some(index),
        "parent at own resolution is self"
    );
    assert_eq!(
        index.parent(Resolution::Eleven),
        None,
        "no parent at finer resolution"
    );

    // `res(parent(c, r)) == r` for every coarser resolution.
    for resolution in Resolution::range(Resolution::Zero, Resolution::Ten) {
        let parent = index.parent(resolution).expect("parent cell");
        assert_eq!(parent.resolution(), resolution);
    }
}

#[test]
fn center_child() {
    let index = CellIndex::try_from(0x8a1fb46622dffff).expect("cell index");

    assert_eq!(
        index.center_child(Resolution::Fifteen),
        CellIndex::try_from(0x8f1fb46622d8000).ok(),
        "center child at resolution 15"
    );
    assert_eq!(
        index.center_child(Resolution::Ten),
        Some(index),
        "center child at own resolution is self"
    );
    assert_eq!(
        index.center_child(Resolution::Five),
        None,
        "no child at coarser resolution"
    );
}

#[test]
fn children_counts() {
    let hexagon = CellIndex::try_from(0x8a1fb46622dffff).expect("hexagon");
    assert_eq!(hexagon.children_count(Resolution::Ten), 1);
    assert_eq!(hexagon.children_count(Resolution::Eleven), 7);
    assert_eq!(hexagon.children_count(Resolution::Twelve), 49);
    assert_eq!(hexagon.children_count(Resolution::Fifteen), 16_807);
    assert_eq!(hexagon.children_count(Resolution::Nine), 0);

    let pentagon = CellIndex::try_from(0x81083ffffffffff).expect("pentagon");
    assert_eq!(pentagon.children_count(Resolution::Two), 6);
    assert_eq!(pentagon.children_count(Resolution::Three), 41);
}

#[test]
fn children_are_distinct_and_valid() {
    let index = CellIndex::try_from(0x8928308280fffff).expect("cell index");
    let children = index.children(Resolution::Eleven).collect::<Vec<_>>();

    assert_eq!(children.len(), 49, "expected children count");

    let unique = children.iter().copied().collect::<HashSet<_>>();
    assert_eq!(unique.len(), children.len(), "children are distinct");

    for child in children {
        assert_eq!(
            child.parent(Resolution::Nine),
            Some(index),
            "parent of {child}"
        );
        assert!(
            CellIndex::try_from(u64::from(child)).is_ok(),
            "child {child} is a valid index"
        );
    }
}

// A location indexed at resolution 8 has exactly 7 children at resolution 9,
// whose centers fall back into the resolution 8 cell.
#[test]
fn children_of_an_indexed_location() {
    let sf = LatLng::from_radians(
        0.659966917655,
        2. * std::f64::consts::PI - 2.1364398519396,
    )
    .expect("coordinate");
    let cell = sf.to_cell(Resolution::Eight);

    let children = cell.children(Resolution::Nine).collect::<Vec<_>>();
    assert_eq!(children.len(), 7, "seven children one step down");

    let unique = children.iter().copied().collect::<HashSet<_>>();
    assert_eq!(unique.len(), 7, "children are distinct");

    // The center child shares the parent's center.
    let center = LatLng::from(cell);
    assert!(
        children.contains(&center.to_cell(Resolution::Nine)),
        "found the center child"
    );

    // Every child center lands back into the parent cell.
    for child in children {
        assert_eq!(
            LatLng::from(child).to_cell(Resolution::Eight),
            cell,
            "center of {child} lies inside the parent"
        );
    }
}

// A resolution 1 pentagon expanded two levels down yields 5*7 + 6 = 41 real
// children (the deleted K sub-sequences are skipped), against a 7^2 = 49
// upper bound for an hexagonal cell.
#[test]
fn pentagon_children() {
    let pentagon = CellIndex::try_from(0x81083ffffffffff).expect("pentagon");
    assert!(pentagon.is_pentagon());

    let children = pentagon.children(Resolution::Three).collect::<Vec<_>>();
    assert_eq!(children.len(), 41, "expected children count");

    let unique = children.iter().copied().collect::<HashSet<_>>();
    assert_eq!(unique.len(), children.len(), "children are distinct");

    for child in &children {
        assert!(
            CellIndex::try_from(u64::from(*child)).is_ok(),
            "child {child} is a valid index"
        );
        assert_eq!(
            child.parent(Resolution::One),
            Some(pentagon),
            "parent of {child}"
        );
    }

    // Exactly one pentagonal child per resolution step (the center lineage).
    assert_eq!(
        children.iter().filter(|child| child.is_pentagon()).count(),
        1,
        "single pentagonal child"
    );
}

#[test]
fn parent_child_roundtrip() {
    let index = CellIndex::try_from(0x8928308280fffff).expect("cell index");

    for child in index.children(Resolution::Ten) {
        assert_eq!(
            child.parent(index.resolution()),
            Some(index),
            "parent of child {child}"
        );
    }
}
