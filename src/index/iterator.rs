//! Iterators over cell indexes.

use super::CellIndex;
use crate::{
    error::LocalIjError,
    hex::CoordIJK,
    index::bits,
    localij::LocalIJK,
    math, Direction, Resolution, DIRECTION_BITSIZE,
};

/// Iterator over the children of a cell, at a given resolution.
///
/// The wire format does the heavy lifting here: the digits between the
/// parent and the target resolution behave as an odometer, and listing the
/// children is counting with carry propagation. The one subtlety is for
/// pentagons, where the first K digit of every level under an all-center
/// prefix starts a deleted sub-tree and must be stepped over.
pub struct Children {
    /// The next index to emit.
    current: u64,
    /// Resolution of the cell being expanded.
    parent: Resolution,
    /// Resolution of the emitted children.
    target: Resolution,
    /// Resolution of the next K digit to step over (pentagons only, one
    /// per level, from the finest up).
    deleted_k: Option<Resolution>,
    /// Number of children left to emit.
    remaining: u64,
}

impl Children {
    /// Returns an iterator over the children of `index` at the given
    /// resolution.
    pub fn new(index: CellIndex, resolution: Resolution) -> Self {
        Self {
            current: first_child(index, resolution),
            parent: index.resolution(),
            target: resolution,
            deleted_k: index.is_pentagon().then_some(resolution),
            remaining: index.children_count(resolution),
        }
    }

    /// Moves `current` to the next child.
    fn advance(&mut self) {
        for resolution in Resolution::range(self.parent, self.target).rev() {
            let digit = self.bump(resolution);

            // The first K digit of this level starts a deleted sub-tree:
            // step over it (once per level).
            let digit = if self.deleted_k == Some(resolution)
                && digit == u8::from(Direction::K)
            {
                self.deleted_k = resolution.pred();
                self.bump(resolution)
            } else {
                digit
            };

            if digit <= u8::from(Direction::IJ) {
                return;
            }

            // This level is exhausted (the carry already went up): reset it
            // and normalize the coarser one.
            self.current = bits::clr_direction(self.current, resolution);
        }
    }

    /// Increments the digit at `resolution` and returns its new value.
    ///
    /// When the digit was 7 (unused), the addition wraps it back to center
    /// and carries into the next coarser digit.
    fn bump(&mut self, resolution: Resolution) -> u8 {
        self.current += 1 << resolution.direction_offset();

        bits::get_direction(self.current, resolution)
    }
}

impl Iterator for Children {
    type Item = CellIndex;

    fn next(&mut self) -> Option<CellIndex> {
        if self.remaining == 0 {
            return None;
        }

        let index = CellIndex::new_unchecked(self.current);
        self.remaining -= 1;

        if self.remaining != 0 {
            self.advance();
        }

        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (count, Some(count))
    }
}

impl ExactSizeIterator for Children {}

/// Returns the first (center-most) child of `index` at the given
/// resolution: the parent bits with every in-between digit cleared.
fn first_child(index: CellIndex, resolution: Resolution) -> u64 {
    let levels =
        usize::from(resolution).saturating_sub(index.resolution().into());

    let mut bits = u64::from(index);
    if levels != 0 {
        let mask = (1_u64 << (levels * DIRECTION_BITSIZE)) - 1;
        bits &= !(mask << resolution.direction_offset());
        bits = bits::set_resolution(bits, resolution);
    }

    bits
}

// -----------------------------------------------------------------------------

/// Iterator over the cells of a grid path between two cells.
///
/// The path is interpolated in cube space (the three-axis form of the
/// lattice where `x + y + z = 0`), which lends itself to linear
/// interpolation, then each sample is rounded back to the nearest cell.
#[derive(Debug, Clone)]
pub struct GridPathCells {
    /// Anchor cell (the start of the path).
    anchor: CellIndex,
    /// Starting point, in cube space.
    start: (i32, i32, i32),
    /// Per-sample increment, in cube space.
    step: (f64, f64, f64),
    // Path length.
    distance: i32,
    // Current position in the path.
    n: i32,
}

impl GridPathCells {
    /// Returns an iterator over the cells of a grid path between `start`
    /// and `end`.
    pub fn new(start: CellIndex, end: CellIndex) -> Result<Self, LocalIjError> {
        let anchor = start;

        // Get the local IJK coordinates for both endpoints.
        let src = start.to_local_ijk(start)?;
        let dst = end.to_local_ijk(start)?;
        let distance = src.coord().distance(dst.coord());

        let start = to_cube(*src.coord());
        let end = to_cube(*dst.coord());

        let step = if distance == 0 {
            (0., 0., 0.)
        } else {
            (
                f64::from(end.0 - start.0) / f64::from(distance),
                f64::from(end.1 - start.1) / f64::from(distance),
                f64::from(end.2 - start.2) / f64::from(distance),
            )
        };

        Ok(Self {
            anchor,
            start,
            step,
            distance,
            n: 0,
        })
    }
}

impl Iterator for GridPathCells {
    type Item = Result<CellIndex, LocalIjError>;

    fn next(&mut self) -> Option<Self::Item> {
        (self.n <= self.distance).then(|| {
            let scale = f64::from(self.n);
            let coord = cube_round(
                f64::from(self.start.0) + self.step.0 * scale,
                f64::from(self.start.1) + self.step.1 * scale,
                f64::from(self.start.2) + self.step.2 * scale,
            );
            self.n += 1;

            CellIndex::try_from(LocalIJK {
                anchor: self.anchor,
                coord,
            })
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = usize::try_from((self.distance - self.n).max(0))
            .unwrap_or(usize::MAX);
        (count, Some(count))
    }
}

/// Returns the cube-space position of a lattice coordinate.
fn to_cube(coord: CoordIJK) -> (i32, i32, i32) {
    let (a, b) = coord.axial();

    (-a, b, a - b)
}

/// Rounds a fractional cube-space position to the nearest cell.
///
/// The component with the largest rounding error is recomputed from the two
/// others, so that the result stays on the `x + y + z = 0` plane; this is
/// the distance-minimizing round on the lattice.
#[allow(clippy::cast_possible_truncation)] // Values are rounded.
fn cube_round(x: f64, y: f64, z: f64) -> CoordIJK {
    let (mut rx, mut ry, mut rz) =
        (math::round(x), math::round(y), math::round(z));

    let x_err = math::abs(rx - x);
    let y_err = math::abs(ry - y);
    let z_err = math::abs(rz - z);

    if x_err > y_err && x_err > z_err {
        rx = -ry - rz;
    } else if y_err > z_err {
        ry = -rx - rz;
    } else {
        rz = -rx - ry;
    }

    CoordIJK::from_axial(-rx as i32, ry as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_roundtrip() {
        for direction in Direction::iter() {
            let ijk = direction.coordinate();
            let (x, y, z) = to_cube(ijk);

            assert_eq!(x + y + z, 0, "on the cube plane");
            assert_eq!(
                cube_round(f64::from(x), f64::from(y), f64::from(z)),
                ijk,
                "roundtrip for {direction:?}"
            );
        }
    }

    #[test]
    fn cube_round_stays_on_plane() {
        // A sample that rounds naively off-plane.
        let coord = cube_round(1.4, 0.3, -1.7);
        let (x, y, z) = to_cube(coord);

        assert_eq!(x + y + z, 0);
    }
}
