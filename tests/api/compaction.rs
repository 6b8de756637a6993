use hexatile::{error::CompactionError, CellIndex, Resolution};
use std::collections::HashSet;

#[test]
fn compact_a_full_set_of_children() {
    let index = CellIndex::try_from(0x8928308280fffff).expect("cell index");
    let cells = index.children(Resolution::Eleven).collect::<Vec<_>>();

    let compacted = CellIndex::compact(cells).expect("compaction");

    assert_eq!(compacted, vec![index], "full coverage compacts to the root");
}

#[test]
fn compact_is_stable_on_partial_coverage() {
    let index = CellIndex::try_from(0x8928308280fffff).expect("cell index");
    let mut cells = index.children(Resolution::Ten).collect::<Vec<_>>();
    // Withhold one child: the remaining six cannot be compacted.
    cells.pop();

    let compacted = CellIndex::compact(cells.clone()).expect("compaction");

    assert_eq!(
        compacted.iter().copied().collect::<HashSet<_>>(),
        cells.into_iter().collect::<HashSet<_>>(),
        "nothing to compact"
    );
}

#[test]
fn compact_pentagon() {
    // A pentagon has 6 children: the deleted K child counts as implicitly
    // present.
    let pentagon = CellIndex::try_from(0x81083ffffffffff).expect("pentagon");
    let cells = pentagon.children(Resolution::Two).collect::<Vec<_>>();
    assert_eq!(cells.len(), 6);

    let compacted = CellIndex::compact(cells).expect("compaction");

    assert_eq!(compacted, vec![pentagon]);
}

#[test]
fn compact_resolution_zero() {
    // Resolution 0 cells cannot be compacted further.
    let cells = CellIndex::base_cells().take(10).collect::<Vec<_>>();

    let compacted =
        CellIndex::compact(cells.clone()).expect("compaction");

    assert_eq!(
        compacted.into_iter().collect::<HashSet<_>>(),
        cells.into_iter().collect::<HashSet<_>>(),
    );
}

#[test]
fn compact_rejects_duplicates() {
    let index = CellIndex::try_from(0x8928308280fffff).expect("cell index");
    let mut cells = index.children(Resolution::Ten).collect::<Vec<_>>();
    cells.push(cells[0]);

    assert_eq!(
        CellIndex::compact(cells),
        Err(CompactionError::DuplicateInput)
    );
}

#[test]
fn compact_rejects_mixed_resolutions() {
    let index = CellIndex::try_from(0x8928308280fffff).expect("cell index");
    let mut cells = index.children(Resolution::Ten).collect::<Vec<_>>();
    cells.push(index);

    assert_eq!(
        CellIndex::compact(cells),
        Err(CompactionError::HeterogeneousResolution)
    );
}

#[test]
fn compact_empty_set() {
    assert_eq!(CellIndex::compact([]), Ok(Vec::new()));
}

#[test]
fn uncompact() {
    let index = CellIndex::try_from(0x8928308280fffff).expect("cell index");

    // A cell at the target resolution is copied as-is.
    let cells =
        CellIndex::uncompact([index], Resolution::Nine).collect::<Vec<_>>();
    assert_eq!(cells, vec![index]);

    // A coarser cell expands to its children.
    let cells =
        CellIndex::uncompact([index], Resolution::Eleven).collect::<Vec<_>>();
    assert_eq!(cells.len(), 49);
    assert_eq!(
        CellIndex::uncompact_size([index], Resolution::Eleven),
        49,
        "announced size matches"
    );
}

// `uncompact(compact(S)) == S` as sets, for any duplicate-free
// single-resolution S.
#[test]
fn compact_uncompact_roundtrip() {
    let index = CellIndex::try_from(0x8928308280fffff).expect("cell index");
    // A mix of complete and incomplete parents: all the grandchildren but
    // the last one.
    let mut cells = index.children(Resolution::Eleven).collect::<Vec<_>>();
    cells.pop();

    let compacted = CellIndex::compact(cells.clone()).expect("compaction");
    assert!(compacted.len() < cells.len(), "some compaction happened");

    let expanded =
        CellIndex::uncompact(compacted, Resolution::Eleven).collect::<Vec<_>>();

    assert_eq!(
        expanded.into_iter().collect::<HashSet<_>>(),
        cells.into_iter().collect::<HashSet<_>>(),
        "same coverage"
    );
}

// Mirrors the multi-level case: compacting children from several resolutions
// deep still converges to the root cell.
#[test]
fn compact_multiple_levels() {
    let index = CellIndex::try_from(0x85283473fffffff).expect("cell index");
    let cells = index.children(Resolution::Eight).collect::<Vec<_>>();
    assert_eq!(cells.len(), 343);

    let compacted = CellIndex::compact(cells).expect("compaction");

    assert_eq!(compacted, vec![index]);
}
