//! Bit twiddling on the 64-bit index word.
//!
//! Layout, from high bit to low: 1 reserved bit (always 0), 4 mode bits, a
//! 3-bit slot (zero for cells, edge direction for directed edges, vertex
//! number for vertexes), 4 resolution bits, 7 base cell bits and fifteen
//! 3-bit direction digits (unused digits are set to `0b111`).

use super::IndexMode;
use crate::{Direction, Resolution};
use core::num::NonZeroU8;

/// Offset (in bits) of the mode in an index.
const MODE_OFFSET: usize = 59;
const MODE_MASK: u64 = 0b1111 << MODE_OFFSET;

/// Offset (in bits) of the reserved slot in an index.
///
/// For cells the slot must be zero; directed edges store their direction
/// (1..=6) and vertex indexes their vertex number (0..=5) in it.
const RESERVED_OFFSET: usize = 56;
const RESERVED_MASK: u64 = 0b111 << RESERVED_OFFSET;

/// Offset (in bits) of the resolution in an index.
const RESOLUTION_OFFSET: u64 = 52;
const RESOLUTION_MASK: u64 = 0b1111 << RESOLUTION_OFFSET;

/// Offset (in bits) of the base cell in an index.
const BASE_CELL_OFFSET: u64 = 45;
const BASE_CELL_MASK: u64 = 0b111_1111 << BASE_CELL_OFFSET;

/// Bitmask to select the direction digits in an index.
pub const DIRECTIONS_MASK: u64 = 0x0000_1fff_ffff_ffff;

/// Returns the index mode bits.
#[allow(clippy::cast_possible_truncation)] // Cast safe thx to masking.
#[must_use]
pub const fn get_mode(bits: u64) -> u8 {
    ((bits & MODE_MASK) >> MODE_OFFSET) as u8
}

/// Sets the index mode bits.
#[must_use]
pub const fn set_mode(bits: u64, mode: IndexMode) -> u64 {
    (bits & !MODE_MASK) | ((mode as u64) << MODE_OFFSET)
}

/// Returns the reserved slot bits.
#[allow(clippy::cast_possible_truncation)] // Cast safe thx to masking.
#[must_use]
pub const fn get_reserved(bits: u64) -> u8 {
    ((bits & RESERVED_MASK) >> RESERVED_OFFSET) as u8
}

/// Clears the reserved slot bits.
#[must_use]
pub const fn clr_reserved(bits: u64) -> u64 {
    bits & !RESERVED_MASK
}

/// Sets the reserved slot bits.
#[must_use]
pub fn set_reserved(bits: u64, value: u8) -> u64 {
    clr_reserved(bits) | (u64::from(value) << RESERVED_OFFSET)
}

/// Returns the index resolution.
#[allow(clippy::cast_possible_truncation)] // Cast safe thx to masking.
#[must_use]
pub const fn get_resolution(bits: u64) -> Resolution {
    // The masking restricts the value to 4 bits (thus 0-15).
    Resolution::new_unchecked(
        ((bits & RESOLUTION_MASK) >> RESOLUTION_OFFSET) as u8,
    )
}

/// Clears the index resolution bits.
#[must_use]
pub const fn clr_resolution(bits: u64) -> u64 {
    bits & !RESOLUTION_MASK
}

/// Sets the index resolution bits.
#[must_use]
pub fn set_resolution(bits: u64, resolution: Resolution) -> u64 {
    clr_resolution(bits) | (u64::from(resolution) << RESOLUTION_OFFSET)
}

/// Returns the index base cell bits.
#[allow(clippy::cast_possible_truncation)] // Cast safe thx to masking.
#[must_use]
pub const fn get_base_cell(bits: u64) -> u8 {
    ((bits & BASE_CELL_MASK) >> BASE_CELL_OFFSET) as u8
}

/// Sets the index base cell bits.
#[must_use]
pub fn set_base_cell(bits: u64, cell: u8) -> u64 {
    (bits & !BASE_CELL_MASK) | (u64::from(cell) << BASE_CELL_OFFSET)
}

/// Returns the direction digit at the given resolution.
#[allow(clippy::cast_possible_truncation)] // Cast safe thx to masking.
#[must_use]
pub fn get_direction(bits: u64, resolution: Resolution) -> u8 {
    ((bits & resolution.direction_mask()) >> resolution.direction_offset())
        as u8
}

/// Sets the direction digit at the given resolution.
#[must_use]
pub fn set_direction(bits: u64, direction: u8, resolution: Resolution) -> u64 {
    (bits & !resolution.direction_mask())
        | (u64::from(direction) << resolution.direction_offset())
}

/// Clears the direction digit at the given resolution.
#[must_use]
pub fn clr_direction(bits: u64, resolution: Resolution) -> u64 {
    bits & !resolution.direction_mask()
}

/// Sets the unused direction digits (beyond the given resolution) to their
/// expected all-one pattern.
#[must_use]
pub fn set_unused(bits: u64, resolution: Resolution) -> u64 {
    let unused_end_offset = resolution.direction_offset();
    let unused_bits = (1 << unused_end_offset) - 1;

    bits | unused_bits
}

/// Returns the leading non-zero digit of the index, if any.
#[must_use]
pub fn first_axe(bits: u64) -> Option<NonZeroU8> {
    let resolution = get_resolution(bits);

    Resolution::range(Resolution::One, resolution)
        .find_map(|res| NonZeroU8::new(get_direction(bits, res)))
}

/// Rotates the index by 60 degrees, `count` times.
#[must_use]
pub fn rotate60<const CCW: bool>(bits: u64, count: usize) -> u64 {
    let resolution = get_resolution(bits);

    Resolution::range(Resolution::One, resolution).fold(bits, |acc, res| {
        let digit = Direction::new_unchecked(get_direction(acc, res));
        set_direction(acc, digit.rotate60::<CCW>(count).into(), res)
    })
}

/// Rotates the index by 60 degrees about a pentagonal center (skipping the
/// deleted K sub-sequence).
#[must_use]
pub fn pentagon_rotate60<const IS_CCW: bool>(mut bits: u64) -> u64 {
    let resolution = get_resolution(bits);
    let mut found_first_nonzero = false;

    for res in Resolution::range(Resolution::One, resolution) {
        // Rotate this digit.
        let digit = Direction::new_unchecked(get_direction(bits, res));
        bits = set_direction(bits, digit.rotate60::<IS_CCW>(1).into(), res);

        // On the first non-zero digit, adjust for the deleted k-axes
        // sub-sequence if necessary.
        if !found_first_nonzero && get_direction(bits, res) != 0 {
            found_first_nonzero = true;

            if first_axe(bits) == Direction::K.axe() {
                bits = rotate60::<IS_CCW>(bits, 1);
            }
        }
    }

    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CellIndex;

    #[test]
    fn first_axe_none() {
        let index =
            CellIndex::try_from(0x8f2800000000000).expect("valid cell index");
        assert_eq!(first_axe(index.into()), None, "zero til the end");

        let index =
            CellIndex::try_from(0x8029fffffffffff).expect("valid cell index");
        assert_eq!(first_axe(index.into()), None, "no digit at res 0");

        let index =
            CellIndex::try_from(0x832800fffffffff).expect("valid cell index");
        assert_eq!(first_axe(index.into()), None, "some zero then unused");
    }

    #[test]
    fn first_axe_some() {
        let index =
            CellIndex::try_from(0x8f287478ab9c2ab).expect("valid cell index");
        assert_eq!(
            first_axe(index.into()),
            Direction::K.axe(),
            "first digit set"
        );

        let index =
            CellIndex::try_from(0x8f2800000000003).expect("valid cell index");
        assert_eq!(
            first_axe(index.into()),
            Direction::JK.axe(),
            "last digit set"
        );
    }

    #[test]
    fn rotate60_roundtrip() {
        let bits = 0x8f287478ab9c2ab_u64;

        assert_eq!(
            rotate60::<true>(rotate60::<false>(bits, 1), 1),
            bits,
            "CCW undoes CW"
        );
        assert_eq!(rotate60::<true>(bits, 6), bits, "full turn is identity");
    }

    #[test]
    fn direction_digits() {
        let bits = 0x8f287478ab9c2ab_u64;
        let resolution = Resolution::Nine;

        let cleared = clr_direction(bits, resolution);
        assert_eq!(get_direction(cleared, resolution), 0, "digit cleared");

        let updated = set_direction(bits, 5, resolution);
        assert_eq!(get_direction(updated, resolution), 5, "digit set");
    }

    #[test]
    fn reserved_slot() {
        let bits = 0x8f287478ab9c2ab_u64;

        assert_eq!(get_reserved(bits), 0, "cells have a zero slot");
        assert_eq!(get_reserved(set_reserved(bits, 5)), 5, "slot set");
        assert_eq!(
            clr_reserved(set_reserved(bits, 5)),
            bits,
            "slot cleared"
        );
    }
}
