//! Grid traversal primitives.

use crate::{index::bits, BaseCell, CellIndex, Direction, Resolution, CCW, CW};
use ahash::{HashSet, HashSetExt};
use std::collections::VecDeque;

/// Returns the index neighboring the origin, in the specified direction.
///
/// The only case where this returns `None` is when the origin is a pentagon
/// and the translation follows the deleted K axis.
///
/// # Arguments
///
/// * `origin`    - Origin cell index.
/// * `direction` - Direction to move in.
/// * `rotations` - Number of CCW rotations to perform to reorient the
///   translation vector.
///
/// # Returns
///
/// The neighboring index and an updated rotation count (changes when
/// crossing a face edge).
pub fn neighbor_rotations(
    origin: CellIndex,
    direction: Direction,
    rotations: u8,
) -> Option<(CellIndex, u8)> {
    // Center is not a valid direction here.
    debug_assert_ne!(direction, Direction::Center);

    let mut bits = u64::from(origin);
    let mut rotations = rotations;
    let mut direction = direction.rotate60::<{ CCW }>(rotations.into());

    // Push the translation up through the digits until a level absorbs it.
    let mut absorbed = false;
    for resolution in
        Resolution::range(Resolution::One, origin.resolution()).rev()
    {
        let from = usize::from(bits::get_direction(bits, resolution));
        let to = usize::from(direction);

        // The `II` tables apply at Class III resolutions: they are named
        // for the class of the parent grid.
        let (digit, carry) = if resolution.is_class3() {
            (NEW_DIRECTION_II[from][to], NEW_ADJUSTMENT_II[from][to])
        } else {
            (NEW_DIRECTION_III[from][to], NEW_ADJUSTMENT_III[from][to])
        };
        bits = bits::set_direction(bits, digit.into(), resolution);

        if carry == Direction::Center {
            absorbed = true;
            break;
        }
        direction = carry;
    }

    // The translation went past resolution 1: move across base cells.
    let old_base_cell = origin.base_cell();
    let base_rotations = if absorbed {
        0
    } else if let Some(base_cell) = old_base_cell.neighbor(direction) {
        bits = bits::set_base_cell(bits, base_cell.into());
        old_base_cell.neighbor_rotation(direction)
    } else {
        // The deleted K vertex of a pentagonal base cell: this edge
        // actually borders the IK neighbor.
        let base_cell = old_base_cell
            .neighbor(Direction::IK)
            .expect("pentagon neighbor");
        bits = bits::set_base_cell(bits, base_cell.into());

        // Adjust for the K sub-sequence we're skipping over.
        bits = bits::rotate60::<{ CCW }>(bits, 1);
        rotations += 1;

        old_base_cell.neighbor_rotation(Direction::IK)
    };

    // A cell index always contains a valid base cell.
    let new_base_cell = BaseCell::new_unchecked(bits::get_base_cell(bits));
    if new_base_cell.is_pentagon() {
        let mut adjusted_k_subsequence = false;

        // Force rotation out of the missing K axis sub-sequence.
        if bits::first_axe(bits) == Direction::K.axe() {
            if old_base_cell == new_base_cell {
                // We traversed into the deleted K sub-sequence from within
                // the same pentagonal base cell; the way out depends on
                // where we started. Starting from the pentagon itself, the
                // neighbor is undefined: the K direction is deleted.
                let axe = bits::first_axe(origin.into())?;

                if Some(axe) == Direction::JK.axe() {
                    // Rotate out of the deleted sub-sequence; this also
                    // changes the direction we're moving in.
                    bits = bits::rotate60::<{ CCW }>(bits, 1);
                    rotations += 1;
                } else if Some(axe) == Direction::IK.axe() {
                    // Same, but rotating the other way around.
                    bits = bits::rotate60::<{ CW }>(bits, 1);
                    rotations += 5;
                }
            } else {
                // We traversed into the deleted K sub-sequence of a new
                // pentagonal base cell; the way out depends on how we got
                // in (CW offset face or not, default is CCW).
                if new_base_cell.is_cw_offset(old_base_cell.home_face()) {
                    bits = bits::rotate60::<{ CW }>(bits, 1);
                }
                adjusted_k_subsequence = true;
            }
        }

        for _ in 0..base_rotations {
            bits = bits::pentagon_rotate60::<{ CCW }>(bits);
        }

        // Account for the differing orientation of the base cells (this
        // edge might not follow properties of some other edges).
        if old_base_cell != new_base_cell {
            let lead = bits::first_axe(bits);

            if new_base_cell.is_polar_pentagon() {
                // Polar base cells behave differently because they have all
                // `I` neighbors.
                let from_companion =
                    matches!(u8::from(old_base_cell), 8 | 118);
                rotations += u8::from(
                    !from_companion && lead != Direction::JK.axe(),
                );
            } else {
                // Account for the distortion the deleted K sub-sequence
                // introduces to the 5th neighbor.
                rotations += u8::from(
                    !adjusted_k_subsequence && lead == Direction::IK.axe(),
                );
            }
        }
    } else if base_rotations != 0 {
        bits = bits::rotate60::<{ CCW }>(bits, base_rotations.into());
    }

    Some((
        CellIndex::new_unchecked(bits),
        (rotations + base_rotations) % 6,
    ))
}

// -----------------------------------------------------------------------------

/// Finds and returns the direction from the origin to a given neighbor.
///
/// This is effectively the reverse operation of `neighbor_rotations`.
///
/// Returns `None` if the cells are not neighbors.
pub fn direction_for_neighbor(
    origin: CellIndex,
    destination: CellIndex,
) -> Option<Direction> {
    // Center would be the origin itself, and pentagons have no K neighbor.
    let start = 1 + u8::from(origin.is_pentagon());

    for value in start..=6 {
        // The loop upper bound is 6 (a.k.a. `Direction::IJ`): always valid.
        let direction = Direction::new_unchecked(value);
        let neighbor =
            neighbor_rotations(origin, direction, 0).map(|(cell, _)| cell);

        if neighbor == Some(destination) {
            return Some(direction);
        }
    }

    None
}

// -----------------------------------------------------------------------------

/// Directions used for traversing an hexagonal ring counterclockwise.
const RING_DIRECTIONS: [Direction; 6] = [
    Direction::J,
    Direction::JK,
    Direction::K,
    Direction::IK,
    Direction::I,
    Direction::IJ,
];

/// Iterator over the cells within `k` grid distance of an origin, with
/// their distance to the origin.
///
/// Traverses breadth-first and keeps a seen-set, which makes it immune to
/// pentagon distortion at the price of some memory.
pub struct DiskDistancesSafe {
    /// Max distance.
    k: u32,

    /// Already visited neighbors.
    seen: HashSet<CellIndex>,
    /// Next set of neighbors to visit.
    candidates: VecDeque<(CellIndex, u32)>,
}

impl DiskDistancesSafe {
    pub fn new(origin: CellIndex, k: u32) -> Self {
        let size = usize::try_from(crate::max_grid_disk_size(k))
            .expect("grid too large");
        let mut candidates = VecDeque::with_capacity(size);
        candidates.push_back((origin, 0));

        Self {
            k,
            seen: HashSet::with_capacity(size),
            candidates,
        }
    }
}

impl Iterator for DiskDistancesSafe {
    type Item = (CellIndex, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((cell, ring)) = self.candidates.pop_front() {
            if ring > self.k || self.seen.contains(&cell) {
                continue;
            }

            if ring < self.k {
                // Recurse to all neighbors, in no particular order.
                self.candidates.extend(
                    RING_DIRECTIONS.iter().filter_map(|&direction| {
                        neighbor_rotations(cell, direction, 0)
                            .map(|(neighbor, _)| (neighbor, ring + 1))
                    }),
                );
            }

            self.seen.insert(cell);
            return Some((cell, ring));
        }

        // We've exhausted the candidate set, we're done.
        None
    }
}

// -----------------------------------------------------------------------------

// Consts to save some typing below.
const CENTER: Direction = Direction::Center;
const K_AXE: Direction = Direction::K;
const J_AXE: Direction = Direction::J;
const JK_AXE: Direction = Direction::JK;
const I_AXE: Direction = Direction::I;
const IK_AXE: Direction = Direction::IK;
const IJ_AXE: Direction = Direction::IJ;

/// New digit when traversing along Class II grids.
///
/// Current digit -> direction -> new digit.
const NEW_DIRECTION_II: [[Direction; 7]; 7] = [
    [CENTER, K_AXE, J_AXE, JK_AXE, I_AXE, IK_AXE, IJ_AXE],
    [K_AXE, I_AXE, JK_AXE, IJ_AXE, IK_AXE, J_AXE, CENTER],
    [J_AXE, JK_AXE, K_AXE, I_AXE, IJ_AXE, CENTER, IK_AXE],
    [JK_AXE, IJ_AXE, I_AXE, IK_AXE, CENTER, K_AXE, J_AXE],
    [I_AXE, IK_AXE, IJ_AXE, CENTER, J_AXE, JK_AXE, K_AXE],
    [IK_AXE, J_AXE, CENTER, K_AXE, JK_AXE, IJ_AXE, I_AXE],
    [IJ_AXE, CENTER, IK_AXE, J_AXE, K_AXE, I_AXE, JK_AXE],
];

/// New traversal direction when traversing along Class II grids.
///
/// Current digit -> direction -> new aperture-7 move (at the coarser level).
const NEW_ADJUSTMENT_II: [[Direction; 7]; 7] = [
    [CENTER, CENTER, CENTER, CENTER, CENTER, CENTER, CENTER],
    [CENTER, K_AXE, CENTER, K_AXE, CENTER, IK_AXE, CENTER],
    [CENTER, CENTER, J_AXE, JK_AXE, CENTER, CENTER, J_AXE],
    [CENTER, K_AXE, JK_AXE, JK_AXE, CENTER, CENTER, CENTER],
    [CENTER, CENTER, CENTER, CENTER, I_AXE, I_AXE, IJ_AXE],
    [CENTER, IK_AXE, CENTER, CENTER, I_AXE, IK_AXE, CENTER],
    [CENTER, CENTER, J_AXE, CENTER, IJ_AXE, CENTER, IJ_AXE],
];

/// New digit when traversing along Class III grids.
///
/// Current digit -> direction -> new digit.
const NEW_DIRECTION_III: [[Direction; 7]; 7] = [
    [CENTER, K_AXE, J_AXE, JK_AXE, I_AXE, IK_AXE, IJ_AXE],
    [K_AXE, J_AXE, JK_AXE, I_AXE, IK_AXE, IJ_AXE, CENTER],
    [J_AXE, JK_AXE, I_AXE, IK_AXE, IJ_AXE, CENTER, K_AXE],
    [JK_AXE, I_AXE, IK_AXE, IJ_AXE, CENTER, K_AXE, J_AXE],
    [I_AXE, IK_AXE, IJ_AXE, CENTER, K_AXE, J_AXE, JK_AXE],
    [IK_AXE, IJ_AXE, CENTER, K_AXE, J_AXE, JK_AXE, I_AXE],
    [IJ_AXE, CENTER, K_AXE, J_AXE, JK_AXE, I_AXE, IK_AXE],
];

/// New traversal direction when traversing along Class III grids.
///
/// Current digit -> direction -> new aperture-7 move (at the coarser level).
const NEW_ADJUSTMENT_III: [[Direction; 7]; 7] = [
    [CENTER, CENTER, CENTER, CENTER, CENTER, CENTER, CENTER],
    [CENTER, K_AXE, CENTER, JK_AXE, CENTER, K_AXE, CENTER],
    [CENTER, CENTER, J_AXE, J_AXE, CENTER, CENTER, IJ_AXE],
    [CENTER, JK_AXE, J_AXE, JK_AXE, CENTER, CENTER, CENTER],
    [CENTER, CENTER, CENTER, CENTER, I_AXE, IK_AXE, I_AXE],
    [CENTER, K_AXE, CENTER, CENTER, IK_AXE, IK_AXE, CENTER],
    [CENTER, CENTER, IJ_AXE, CENTER, I_AXE, CENTER, IJ_AXE],
];
