//! Local `IJ` coordinates.
//!
//! Algorithms working with hexagons may want to refer to grid coordinates
//! that are not interrupted by base cells or faces. These coordinates have
//! two axes spaced 120° apart and are anchored by an origin cell index.
//!
//! - local coordinates are only comparable when they have the same origin;
//! - local coordinates are only valid near the origin (practically, within
//!   the same base cell or a neighboring one);
//! - the coordinate space may have deleted or warped regions due to pentagon
//!   distortion, and a cell may have multiple valid coordinates;
//! - the origin itself may not be at `(0, 0)`.

use crate::{
    error::{HexGridError, LocalIjError},
    hex::{CoordIJ, CoordIJK},
    icosa::FaceIJK,
    index::bits,
    BaseCell, CellIndex, Direction, Resolution, CCW, CW, DEFAULT_CELL_INDEX,
};
use core::{fmt, num::NonZeroU8};

// -----------------------------------------------------------------------------

/// `IJK` coordinates anchored by an origin cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LocalIJK {
    /// Anchor cell.
    pub anchor: CellIndex,
    /// `IJK` coordinates.
    pub coord: CoordIJK,
}

impl LocalIJK {
    /// Returns the `IJK` coordinate.
    pub const fn coord(&self) -> &CoordIJK {
        &self.coord
    }
}

impl CellIndex {
    /// Computes the local `IJK` coordinates of this cell, anchored at
    /// `origin`.
    ///
    /// May fail if the cell is too far away from the origin or when a
    /// pentagon stands in the way: the deleted sub-sequence cases listed in
    /// the failure table are rejected rather than unfolded possibly wrong.
    pub(crate) fn to_local_ijk(
        self,
        origin: Self,
    ) -> Result<LocalIJK, LocalIjError> {
        let resolution = origin.resolution();
        if resolution != self.resolution() {
            return Err(LocalIjError::ResolutionMismatch);
        }

        let origin_base_cell = origin.base_cell();
        let base_cell = self.base_cell();
        let origin_on_pent = origin_base_cell.is_pentagon();
        let index_on_pent = base_cell.is_pentagon();

        let mut bits = u64::from(self);

        // Direction from the origin base cell to the index base cell.
        let mut dir = Direction::Center;
        let mut rev_dir = Direction::Center;
        if origin_base_cell != base_cell {
            dir = origin_base_cell.direction(base_cell).ok_or_else(|| {
                HexGridError::new("base cells are not neighbors")
            })?;
            rev_dir = base_cell
                .direction(origin_base_cell)
                .expect("reverse direction");

            // Rotate the index into the orientation of the origin base cell
            // (CW because we are undoing the rotation into that base cell).
            let rotations = origin_base_cell.neighbor_rotation(dir);
            if index_on_pent {
                for _ in 0..rotations {
                    bits = bits::pentagon_rotate60::<{ CW }>(bits);

                    rev_dir = rev_dir.rotate60::<{ CW }>(1);
                    if rev_dir == Direction::K {
                        rev_dir = rev_dir.rotate60::<{ CW }>(1);
                    }
                }
            } else {
                bits = bits::rotate60::<{ CW }>(bits, rotations.into());
                rev_dir = rev_dir.rotate60::<{ CW }>(rotations.into());
            }
        }

        // Walk the digits from the zero address: this produces coordinates
        // in the base cell's coordinate space (the face is irrelevant here).
        let mut coord = FaceIJK::default()
            .walk_directions(bits, resolution)
            .coord;

        if dir == Direction::Center {
            if origin_on_pent && index_on_pent {
                // Origin and index on the same pentagonal base cell.
                let origin_leading = leading_axe(origin.into());
                let index_leading = leading_axe(bits);

                if FAILED_DIRECTIONS[origin_leading][index_leading] {
                    // The pentagon may be unfolded incorrectly in this case;
                    // fail rather than guess.
                    return Err(LocalIjError::Pentagon);
                }

                let rotations =
                    PENTAGON_ROTATIONS[origin_leading][index_leading];
                debug_assert_ne!(rotations, 0xff, "K-leading pentagon");

                for _ in 0..rotations {
                    coord = coord.rotate60::<{ CW }>();
                }
            }
        } else {
            debug_assert_ne!(base_cell, origin_base_cell);
            // Pentagon base cells are never neighbors.
            debug_assert!(!(origin_on_pent && index_on_pent));

            let (pentagon_rotations, direction_rotations) = if origin_on_pent
            {
                let origin_leading = leading_axe(origin.into());

                if FAILED_DIRECTIONS[origin_leading][usize::from(dir)] {
                    // The pentagon may be unfolded incorrectly in this case;
                    // fail rather than guess.
                    return Err(LocalIjError::Pentagon);
                }

                let count =
                    PENTAGON_ROTATIONS[origin_leading][usize::from(dir)];
                debug_assert_ne!(count, 0xff, "K direction off a pentagon");
                (count, count)
            } else if index_on_pent {
                let index_leading = leading_axe(bits);

                if FAILED_DIRECTIONS[index_leading][usize::from(rev_dir)] {
                    // Same as above: no unfolding on shaky ground.
                    return Err(LocalIjError::Pentagon);
                }

                let count =
                    PENTAGON_ROTATIONS[usize::from(rev_dir)][index_leading];
                debug_assert_ne!(count, 0xff, "K direction into a pentagon");
                (count, 0)
            } else {
                (0, 0)
            };

            for _ in 0..pentagon_rotations {
                coord = coord.rotate60::<{ CW }>();
            }

            // The unit offset between the base cells, scaled down through
            // the resolutions.
            let mut offset = CoordIJK::new(0, 0, 0).neighbor(dir);
            for res in Resolution::range(Resolution::One, resolution).rev() {
                offset = if res.is_class3() {
                    // Rotate CCW.
                    offset.down_aperture7::<{ CCW }>()
                } else {
                    // Rotate CW.
                    offset.down_aperture7::<{ CW }>()
                };
            }

            for _ in 0..direction_rotations {
                offset = offset.rotate60::<{ CW }>();
            }

            // Perform the translation.
            coord = (coord + offset).normalize();
        }

        Ok(LocalIJK {
            anchor: origin,
            coord,
        })
    }

    /// Computes the local `IJ` coordinates of this cell, anchored at
    /// `origin`.
    ///
    /// The output is not guaranteed to be compatible across different
    /// versions of the library.
    ///
    /// # Errors
    ///
    /// [`LocalIjError`] when the cell is too far away from the origin or on
    /// the wrong side of a pentagon.
    pub fn to_local_ij(self, origin: Self) -> Result<LocalIJ, LocalIjError> {
        let ijk = self.to_local_ijk(origin)?;
        Ok(LocalIJ {
            anchor: ijk.anchor,
            coord: CoordIJ::from(&ijk.coord),
        })
    }
}

impl TryFrom<LocalIJK> for CellIndex {
    type Error = LocalIjError;

    fn try_from(value: LocalIJK) -> Result<Self, Self::Error> {
        let resolution = value.anchor.resolution();
        let origin_base_cell = value.anchor.base_cell();
        let origin_on_pent = origin_base_cell.is_pentagon();

        // Initialize the index.
        let mut bits = bits::set_resolution(DEFAULT_CELL_INDEX, resolution);

        // At resolution 0 the coordinate must be the origin base cell or a
        // unit step off it.
        if resolution == Resolution::Zero {
            let dir = Direction::try_from(value.coord)?;
            // Moving off a pentagon in the deleted direction: no cell there.
            let base_cell = origin_base_cell
                .neighbor(dir)
                .ok_or(Self::Error::Pentagon)?;
            return Ok(Self::new_unchecked(bits::set_base_cell(
                bits,
                base_cell.into(),
            )));
        }

        // Write the digits from the finest resolution up; what remains is
        // the base cell offset in the origin base cell's coordinate system.
        let ijk =
            checked_directions_bits_from_ijk(value.coord, &mut bits, resolution)
                .ok_or_else(|| HexGridError::new("IJ coordinates overflow"))?;

        // The offset must be a unit vector (or null): anything farther is
        // beyond a neighboring base cell and cannot be recovered.
        let mut dir = Direction::try_from(ijk)?;
        let mut base_cell = origin_base_cell.neighbor(dir);
        // An unresolved neighbor means the origin base cell is a pentagon;
        // pentagons do not border each other, so the target cannot be one.
        let index_on_pent =
            base_cell.map(BaseCell::is_pentagon).unwrap_or_default();

        if dir == Direction::Center {
            if origin_on_pent && index_on_pent {
                let rotations = PENTAGON_ROTATIONS_REVERSE
                    [leading_axe(value.anchor.into())][leading_axe(bits)];
                assert_ne!(rotations, 0xff, "invalid K axis digit");

                bits = bits::rotate60::<{ CCW }>(bits, rotations.into());
            }
        } else {
            // The target is in a warped direction: unwarp the base cell
            // direction, then rotate the index digits back as needed.
            let mut pentagon_rotations = 0;
            if origin_on_pent {
                pentagon_rotations = PENTAGON_ROTATIONS_REVERSE
                    [leading_axe(value.anchor.into())][usize::from(dir)];
                assert_ne!(pentagon_rotations, 0xff, "invalid K axis digit");
                dir = dir.rotate60::<{ CCW }>(pentagon_rotations.into());

                // The pentagon rotations are chosen so that `dir` avoids the
                // deleted direction; if it is still K we are moving into a
                // deleted sub-sequence and there is no cell there.
                let unwarped = origin_base_cell
                    .neighbor(dir)
                    .ok_or(Self::Error::Pentagon)?;
                base_cell = Some(unwarped);
                debug_assert!(!unwarped.is_pentagon());
            }
            let target_base_cell = base_cell.expect("target base cell");

            // Relation between the origin and the target base cell.
            let base_cell_rotations =
                origin_base_cell.neighbor_rotation(dir);

            // Adjust for pentagon warping within the base cell. The base
            // cell is in the right location, now rotate the index back; no
            // error can pop here, it would just be double mapping.
            if index_on_pent {
                let rev_dir = target_base_cell
                    .direction(origin_base_cell)
                    .expect("reverse direction");

                // Adjust for the different coordinate space in the two base
                // cells first: the pentagon rotations are keyed on the
                // leading digit in the pentagon's own coordinate system.
                bits =
                    bits::rotate60::<{ CCW }>(bits, base_cell_rotations.into());

                let table = if target_base_cell.is_polar_pentagon() {
                    &PENTAGON_ROTATIONS_REVERSE_POLAR
                } else {
                    &PENTAGON_ROTATIONS_REVERSE_NONPOLAR
                };
                let rotations =
                    table[usize::from(rev_dir)][leading_axe(bits)];
                // `rev_dir` points from a pentagonal base cell towards the
                // origin: it can never be K.
                assert_ne!(rotations, 0xff, "invalid K axis digit");

                for _ in 0..rotations {
                    bits = bits::pentagon_rotate60::<{ CCW }>(bits);
                }
            } else {
                assert_ne!(pentagon_rotations, 0xff, "invalid K axis digit");
                let count =
                    usize::from(pentagon_rotations + base_cell_rotations);
                bits = bits::rotate60::<{ CCW }>(bits, count);
            }
        }

        if index_on_pent {
            // TODO: there are cases which are failed but not accounted for
            // here; instead just fail if the recovered index is invalid.
            if bits::first_axe(bits) == Direction::K.axe() {
                return Err(Self::Error::Pentagon);
            }
        }

        let base_cell = base_cell
            .ok_or_else(|| HexGridError::new("cannot resolve base cell"))?;
        Ok(Self::new_unchecked(bits::set_base_cell(
            bits,
            base_cell.into(),
        )))
    }
}

/// Sets the direction digits of a cell index (in place) from the finest
/// resolution up, guarding against overflow on user-provided coordinates.
///
/// Returns the adjusted `IJK` coordinates.
fn checked_directions_bits_from_ijk(
    mut ijk: CoordIJK,
    bits: &mut u64,
    resolution: Resolution,
) -> Option<CoordIJK> {
    for res in Resolution::range(Resolution::One, resolution).rev() {
        let last_ijk = ijk;
        let last_center = if res.is_class3() {
            // Rotate CCW.
            ijk = ijk.checked_up_aperture7::<{ CCW }>()?;
            ijk.down_aperture7::<{ CCW }>()
        } else {
            // Rotate CW.
            ijk = ijk.checked_up_aperture7::<{ CW }>()?;
            ijk.down_aperture7::<{ CW }>()
        };

        let diff = (last_ijk - last_center).normalize();
        let direction = Direction::try_from(diff).expect("unit IJK offset");
        // `res` is in `[1; resolution]`, thus valid.
        *bits = bits::set_direction(*bits, direction.into(), res);
    }

    Some(ijk)
}

/// Returns the leading non-zero digit as a table index (0 when none).
fn leading_axe(bits: u64) -> usize {
    bits::first_axe(bits).map_or(0, NonZeroU8::get).into()
}

// -----------------------------------------------------------------------------

/// `IJ` coordinates anchored by an origin cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalIJ {
    /// Anchor cell.
    pub anchor: CellIndex,
    /// `IJ` coordinates.
    pub coord: CoordIJ,
}

impl LocalIJ {
    /// Initializes a new `LocalIJ` from its components.
    ///
    /// Can be used to build invalid local IJ coordinates, which is useful
    /// for testing.
    #[must_use]
    pub const fn new(anchor: CellIndex, coord: CoordIJ) -> Self {
        Self { anchor, coord }
    }
}

impl TryFrom<LocalIJ> for CellIndex {
    type Error = LocalIjError;

    fn try_from(value: LocalIJ) -> Result<Self, Self::Error> {
        let local_ijk = LocalIJK {
            anchor: value.anchor,
            coord: CoordIJK::try_from(value.coord)?,
        };
        Self::try_from(local_ijk)
    }
}

impl fmt::Display for LocalIJ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.anchor, self.coord)
    }
}

// -----------------------------------------------------------------------------

/// Origin leading digit -> index leading digit -> rotations 60 CW.
///
/// Either the origin or the index is on a pentagon; the table gives the
/// rotations needed to transform into the coordinate space of the other.
/// `0xff` marks the deleted K axis (unreachable on valid input).
#[rustfmt::skip]
const PENTAGON_ROTATIONS: [[u8; 7]; 7] = [
    [0,    0xff, 0,    0,    0,    0,    0],    // 0
    [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff], // 1
    [0,    0xff, 0,    0,    0,    1,    0],    // 2
    [0,    0xff, 0,    0,    1,    1,    0],    // 3
    [0,    0xff, 0,    5,    0,    0,    0],    // 4
    [0,    0xff, 5,    5,    0,    0,    0],    // 5
    [0,    0xff, 0,    0,    0,    0,    0],    // 6
];

/// Origin leading digit -> index leading digit -> unfoldable.
///
/// Whether the unfolding of the pentagon in that configuration is known to
/// be ambiguous: those cases are reported as failures instead of producing a
/// possibly wrong answer.
#[rustfmt::skip]
const FAILED_DIRECTIONS: [[bool; 7]; 7] = [
    [false, false, false, false, false, false, false], // 0
    [false, false, false, false, false, false, false], // 1
    [false, false, false, false, true,  true,  false], // 2
    [false, false, false, false, true,  false, true],  // 3
    [false, false, true,  true,  false, false, false], // 4
    [false, false, true,  false, false, false, true],  // 5
    [false, false, false, true,  true,  false, false], // 6
];

/// Reverse base cell direction -> leading index digit -> rotations 60 CCW.
///
/// For reversing the rotation introduced in `PENTAGON_ROTATIONS` when the
/// origin is on a pentagon (regardless of the base cell of the index).
#[rustfmt::skip]
const PENTAGON_ROTATIONS_REVERSE: [[u8; 7]; 7] = [
    [0,    0,    0,    0,    0,    0,    0],    // 0
    [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff], // 1
    [0,    1,    0,    0,    0,    0,    0],    // 2
    [0,    1,    0,    0,    0,    1,    0],    // 3
    [0,    5,    0,    0,    0,    0,    0],    // 4
    [0,    5,    0,    5,    0,    0,    0],    // 5
    [0,    0,    0,    0,    0,    0,    0],    // 6
];

/// Reverse base cell direction -> leading index digit -> rotations 60 CCW.
///
/// For reversing the rotation introduced in `PENTAGON_ROTATIONS` when the
/// index is on a pentagon and the origin is not.
#[rustfmt::skip]
const PENTAGON_ROTATIONS_REVERSE_NONPOLAR: [[u8; 7]; 7] = [
    [0,    0,    0,    0,    0,    0,    0],    // 0
    [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff], // 1
    [0,    1,    0,    0,    0,    0,    0],    // 2
    [0,    1,    0,    0,    0,    1,    0],    // 3
    [0,    5,    0,    0,    0,    0,    0],    // 4
    [0,    1,    0,    5,    1,    1,    0],    // 5
    [0,    0,    0,    0,    0,    0,    0],    // 6
];

/// Reverse base cell direction -> leading index digit -> rotations 60 CCW.
///
/// For reversing the rotation introduced in `PENTAGON_ROTATIONS` when the
/// index is on a polar pentagon and the origin is not.
#[rustfmt::skip]
const PENTAGON_ROTATIONS_REVERSE_POLAR: [[u8; 7]; 7] = [
    [0,    0,    0,    0,    0,    0,    0],    // 0
    [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff], // 1
    [0,    1,    1,    1,    1,    1,    1],    // 2
    [0,    1,    0,    0,    0,    1,    0],    // 3
    [0,    1,    0,    0,    1,    1,    1],    // 4
    [0,    1,    0,    5,    1,    1,    0],    // 5
    [0,    1,    1,    0,    1,    1,    1],    // 6
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_ijk_zero() {
        let ijk = CoordIJK::new(0, 0, 0);
        let ij = CoordIJ::from(&ijk);

        assert_eq!(ij.i, 0, "ij.i zero");
        assert_eq!(ij.j, 0, "ij.j zero");
    }

    #[test]
    fn self_coordinates() {
        let anchor = CellIndex::try_from(0x8508282bfffffff).expect("anchor");
        let local_ij = anchor.to_local_ij(anchor).expect("local IJ");

        assert_eq!(local_ij.anchor, anchor);

        let back = CellIndex::try_from(local_ij).expect("cell index");
        assert_eq!(back, anchor, "roundtrip to self");
    }

    #[test]
    fn roundtrip_around_origin() {
        let anchor = CellIndex::try_from(0x8928308280fffff).expect("anchor");

        for cell in
            crate::grid::DiskDistancesSafe::new(anchor, 2).map(|(cell, _)| cell)
        {
            let local_ij = cell.to_local_ij(anchor).expect("local IJ");
            let back = CellIndex::try_from(local_ij).expect("cell index");

            assert_eq!(back, cell, "roundtrip for {cell}");
        }
    }
}
