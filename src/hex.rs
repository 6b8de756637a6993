//! Planar hexagon coordinates.
//!
//! A hexagonal lattice has three natural axes spaced 120° apart, named `i`,
//! `j` and `k` here. Addresses on those axes are redundant: adding `(1,1,1)`
//! to a coordinate does not move it. Subtracting `min(i, j, k)` from each
//! component (normalization) picks the unique all-positive representative,
//! which always has at most two non-zero components.
//!
//! Internally most of the algebra happens in *axial* form, the projection
//! `(a, b) = (i - k, j - k)` that quotients the redundancy away: the 60°
//! rotations and the aperture steps between resolutions are plain 2×2
//! integer maps there.

use crate::{error::HexGridError, math};
use core::{fmt, ops};

/// sin(60°), the vertical distance between adjacent lattice rows.
pub(crate) const SQRT3_2: f64 = 0.8660254037844386;

// -----------------------------------------------------------------------------

/// `IJ` hexagon coordinates.
///
/// Axial two-axis form of the `IJK` coordinates, with the axes spaced 120
/// degrees apart.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordIJ {
    /// `i` component.
    pub i: i32,
    /// `j` component.
    pub j: i32,
}

impl CoordIJ {
    /// Initializes a new `IJ` coordinate with the specified components.
    #[must_use]
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }
}

impl From<&CoordIJK> for CoordIJ {
    fn from(value: &CoordIJK) -> Self {
        let (a, b) = value.axial();
        Self::new(a, b)
    }
}

impl TryFrom<CoordIJ> for CoordIJK {
    type Error = HexGridError;

    // The `IJ` form is user input here: normalization must not wrap.
    fn try_from(value: CoordIJ) -> Result<Self, Self::Error> {
        CoordIJK::new(value.i, value.j, 0)
            .checked_normalize()
            .ok_or_else(|| HexGridError::new("IJ coordinates overflow"))
    }
}

impl fmt::Display for CoordIJ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

// -----------------------------------------------------------------------------

/// `IJK` hexagon coordinates.
///
/// Each axis is spaced 120 degrees apart.
#[derive(Debug, Clone, Default, Copy, Eq, PartialEq)]
pub struct CoordIJK {
    /// `i` component.
    i: i32,
    /// `j` component.
    j: i32,
    /// `k` component.
    k: i32,
}

impl CoordIJK {
    /// Initializes a new `IJK` coordinate with the specified components.
    pub const fn new(i: i32, j: i32, k: i32) -> Self {
        Self { i, j, k }
    }

    /// Returns the `i` component.
    pub const fn i(&self) -> i32 {
        self.i
    }

    /// Returns the `j` component.
    pub const fn j(&self) -> i32 {
        self.j
    }

    /// Returns the `k` component.
    pub const fn k(&self) -> i32 {
        self.k
    }

    /// Returns the axial form of the coordinate.
    ///
    /// Axial form is shift-invariant: every representative of a cell maps
    /// to the same pair.
    pub(crate) const fn axial(&self) -> (i32, i32) {
        (self.i - self.k, self.j - self.k)
    }

    /// Returns the normalized coordinate of the cell at the given axial
    /// position.
    pub(crate) fn from_axial(a: i32, b: i32) -> Self {
        Self::new(a, b, 0).normalize()
    }

    /// Normalizes by setting the components to the smallest possible values.
    pub fn normalize(mut self) -> Self {
        let min = self.i.min(self.j).min(self.k);

        self.i -= min;
        self.j -= min;
        self.k -= min;

        self
    }

    /// Normalizes, guarding against overflow.
    ///
    /// To be used when the coordinate comes from user input.
    fn checked_normalize(mut self) -> Option<Self> {
        let min = self.i.min(self.j).min(self.k);

        self.i = self.i.checked_sub(min)?;
        self.j = self.j.checked_sub(min)?;
        self.k = self.k.checked_sub(min)?;

        Some(self)
    }

    /// Returns the grid distance to another coordinate.
    pub fn distance(&self, other: &Self) -> i32 {
        // Hex distance in axial form: half the L1 norm of the difference,
        // with the diagonal `a - b` as the third summand.
        let (a, b) = (*self - *other).axial();

        (a.abs() + b.abs() + (a - b).abs()) / 2
    }

    /// Returns the normalized coordinates of the indexing parent of a cell
    /// in an aperture 7 grid.
    ///
    /// Inverse of [`Self::down_aperture7`]: the same 2×2 map divided by its
    /// determinant (7), rounded to the nearest cell.
    #[allow(clippy::cast_possible_truncation)] // Values are rounded.
    pub fn up_aperture7<const CCW: bool>(&self) -> Self {
        let (a, b) = self.axial();

        let (pa, pb) = if CCW {
            (f64::from(3 * a - b) / 7., f64::from(a + 2 * b) / 7.)
        } else {
            (f64::from(2 * a + b) / 7., f64::from(3 * b - a) / 7.)
        };

        Self::from_axial(math::round(pa) as i32, math::round(pb) as i32)
    }

    /// Returns the normalized coordinates of the indexing parent of a cell
    /// in an aperture 7 grid, guarding against overflow.
    #[allow(clippy::cast_possible_truncation)] // Values are rounded.
    pub fn checked_up_aperture7<const CCW: bool>(&self) -> Option<Self> {
        let (a, b) = self.axial();

        let (pa, pb) = if CCW {
            (
                f64::from(a.checked_mul(3)?.checked_sub(b)?) / 7.,
                f64::from(b.checked_mul(2)?.checked_add(a)?) / 7.,
            )
        } else {
            (
                f64::from(a.checked_mul(2)?.checked_add(b)?) / 7.,
                f64::from(b.checked_mul(3)?.checked_sub(a)?) / 7.,
            )
        };

        Self::new(math::round(pa) as i32, math::round(pb) as i32, 0)
            .checked_normalize()
    }

    /// Returns the normalized coordinates of the center of the cell at the
    /// next finer aperture 7 resolution.
    ///
    /// In axial form the aperture 7 substitution is the integer map
    /// `(a, b) ↦ (2a + b, 3b - a)` (determinant 7); the CW variant is its
    /// mirror image.
    pub fn down_aperture7<const CCW: bool>(&self) -> Self {
        let (a, b) = self.axial();

        if CCW {
            Self::from_axial(2 * a + b, 3 * b - a)
        } else {
            Self::from_axial(3 * a - b, a + 2 * b)
        }
    }

    /// Returns the normalized coordinates of the center of the cell at the
    /// next finer aperture 3 resolution.
    ///
    /// Same construction as [`Self::down_aperture7`], with the aperture 3
    /// substitution `(a, b) ↦ (a + b, 2b - a)` (determinant 3).
    pub fn down_aperture3<const CCW: bool>(&self) -> Self {
        let (a, b) = self.axial();

        if CCW {
            Self::from_axial(a + b, 2 * b - a)
        } else {
            Self::from_axial(2 * a - b, a + b)
        }
    }

    /// Returns the normalized coordinates of the neighboring cell in the
    /// specified direction.
    pub fn neighbor(&self, direction: crate::Direction) -> Self {
        (*self + direction.coordinate()).normalize()
    }

    /// Returns the coordinates after a 60 degrees rotation around the
    /// origin.
    ///
    /// In axial form a 60° CCW rotation is `(a, b) ↦ (a - b, a)`; six
    /// applications are the identity and the CW variant is the inverse.
    pub fn rotate60<const CCW: bool>(&self) -> Self {
        let (a, b) = self.axial();

        if CCW {
            Self::from_axial(a - b, a)
        } else {
            Self::from_axial(b, b - a)
        }
    }

    /// Scales every component by `factor`.
    #[must_use]
    pub fn scale(mut self, factor: i32) -> Self {
        self.i *= factor;
        self.j *= factor;
        self.k *= factor;

        self
    }
}

impl ops::Add for CoordIJK {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.i + rhs.i, self.j + rhs.j, self.k + rhs.k)
    }
}

impl ops::Sub for CoordIJK {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.i - rhs.i, self.j - rhs.j, self.k - rhs.k)
    }
}

// -----------------------------------------------------------------------------

/// A point in the plane of a hexagonal lattice.
///
/// The `x`-axis is aligned on the lattice `i`-axis and 1.0 is the distance
/// between adjacent cell centers.
#[derive(Debug, Clone, Copy)]
pub struct Hex2d {
    /// `x` component.
    pub x: f64,
    /// `y` component.
    pub y: f64,
}

impl PartialEq for Hex2d {
    fn eq(&self, other: &Self) -> bool {
        float_eq::float_eq!(self.x, other.x, abs <= f64::from(f32::EPSILON))
            && float_eq::float_eq!(
                self.y,
                other.y,
                abs <= f64::from(f32::EPSILON)
            )
    }
}

impl Hex2d {
    /// Initializes a new point with the specified components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculates the distance to the origin.
    pub fn magnitude(self) -> f64 {
        math::hypot(self.x, self.y)
    }

    /// Finds the intersection between two lines.
    ///
    /// Assumes that the lines intersect and that the intersection is not at
    /// an endpoint of either line.
    pub fn intersection(line1: (Self, Self), line2: (Self, Self)) -> Self {
        let d1 = Self::new(line1.1.x - line1.0.x, line1.1.y - line1.0.y);
        let d2 = Self::new(line2.1.x - line2.0.x, line2.1.y - line2.0.y);

        // Parameter of the crossing point along the first line.
        let t = (d2.x * (line1.0.y - line2.0.y)
            - d2.y * (line1.0.x - line2.0.x))
            / (d1.x * d2.y - d2.x * d1.y);

        Self::new(line1.0.x + t * d1.x, line1.0.y + t * d1.y)
    }
}

impl From<CoordIJK> for Hex2d {
    // The center point of a cell: skew the axial form back to cartesian.
    fn from(value: CoordIJK) -> Self {
        let (a, b) = value.axial();

        Self::new(
            f64::from(a) - f64::from(b) / 2.,
            f64::from(b) * SQRT3_2,
        )
    }
}

impl From<Hex2d> for CoordIJK {
    // Snaps a point in the plane to the cell containing it.
    //
    // The quantization (from DGGRID) works on the first quadrant with a
    // 6-sector tie-break, then folds the result across the axes; this is
    // the exact nearest-cell assignment, not a rounding of the inverse
    // skew.
    #[allow(clippy::cast_possible_truncation)] // Quantization on purpose.
    fn from(value: Hex2d) -> Self {
        let k = 0;

        let a1 = math::abs(value.x);
        let a2 = math::abs(value.y);

        // Reverse the skew.
        let x2 = a2 / SQRT3_2;
        let x1 = a1 + x2 / 2.;

        // Whole-cell part and fractional part.
        let m1 = x1 as i32;
        let m2 = x2 as i32;
        let r1 = x1 - f64::from(m1);
        let r2 = x2 - f64::from(m2);

        // Sector-aware rounding of the fractional part.
        let (mut i, mut j) = if r1 < 0.5 {
            if r1 < 1. / 3. {
                let i = m1;
                let j = m2 + i32::from(r2 >= (1. + r1) / 2.);
                (i, j)
            } else {
                let i = m1 + i32::from((1. - r1) <= r2 && r2 < (2. * r1));
                let j = m2 + i32::from(r2 >= (1. - r1));
                (i, j)
            }
        } else if r1 < 2. / 3. {
            let j = m2 + i32::from(r2 >= (1. - r1));
            let i =
                m1 + i32::from((2. * r1 - 1.) >= r2 || r2 >= (1. - r1));
            (i, j)
        } else {
            let i = m1 + 1;
            let j = m2 + i32::from(r2 >= (r1 / 2.));
            (i, j)
        };

        // Fold back across the axes if necessary.
        if value.x < 0. {
            let offset = j % 2;
            let axis_i = (j + offset) / 2;
            let diff = i - axis_i;
            i -= 2 * diff + offset;
        }

        if value.y < 0. {
            i -= (2 * j + 1) / 2;
            j = -j;
        }

        Self::new(i, j, k).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Direction, CCW, CW};
    use float_eq::assert_float_eq;

    #[test]
    fn normalize() {
        assert_eq!(
            CoordIJK::new(2, 2, 2).normalize(),
            CoordIJK::new(0, 0, 0),
            "diagonal collapses to origin"
        );
        assert_eq!(
            CoordIJK::new(3, 1, 2).normalize(),
            CoordIJK::new(2, 0, 1),
            "min component is subtracted"
        );
        assert_eq!(
            CoordIJK::new(-1, 0, 2).normalize(),
            CoordIJK::new(0, 1, 3),
            "negative components are lifted"
        );
    }

    #[test]
    fn axial_is_shift_invariant() {
        let cell = CoordIJK::new(3, 1, 2);
        let shifted = CoordIJK::new(4, 2, 3);

        assert_eq!(cell.axial(), shifted.axial());
        assert_eq!(
            CoordIJK::from_axial(cell.axial().0, cell.axial().1),
            cell.normalize()
        );
    }

    #[test]
    fn from_ij_roundtrip() {
        for direction in Direction::iter() {
            let ijk = CoordIJK::new(0, 0, 0).neighbor(direction);
            let ij = CoordIJ::from(&ijk);
            let recovered = CoordIJK::try_from(ij).expect("valid IJ");

            assert_eq!(ijk, recovered, "roundtrip for {direction:?}");
        }
    }

    #[test]
    fn rotate60_roundtrip() {
        let start = CoordIJK::new(4, 1, 0);

        // Six 60° rotations bring the coordinate back home.
        let mut ijk = start;
        for _ in 0..6 {
            ijk = ijk.rotate60::<{ CCW }>();
        }
        assert_eq!(ijk, start, "full CCW turn");

        // One step CW undoes one step CCW.
        assert_eq!(
            start.rotate60::<{ CCW }>().rotate60::<{ CW }>(),
            start,
            "CW undoes CCW"
        );
    }

    #[test]
    fn rotate60_unit_vectors() {
        // The CCW rotation cycles the axes: I lands on IJ, IJ on J, and so
        // on around the ring.
        let i = CoordIJK::new(1, 0, 0);
        let ij = CoordIJK::new(1, 1, 0);
        let j = CoordIJK::new(0, 1, 0);

        assert_eq!(i.rotate60::<{ CCW }>(), ij);
        assert_eq!(ij.rotate60::<{ CCW }>(), j);
        assert_eq!(j.rotate60::<{ CW }>(), ij);
    }

    #[test]
    fn aperture7_roundtrip() {
        // A cell center at the finer resolution maps back to the same
        // parent.
        for direction in Direction::iter() {
            let parent = CoordIJK::new(2, 0, 1).neighbor(direction);

            let center = parent.down_aperture7::<{ CCW }>();
            assert_eq!(
                center.up_aperture7::<{ CCW }>(),
                parent,
                "CCW roundtrip for {direction:?}"
            );

            let center = parent.down_aperture7::<{ CW }>();
            assert_eq!(
                center.up_aperture7::<{ CW }>(),
                parent,
                "CW roundtrip for {direction:?}"
            );
        }
    }

    #[test]
    fn aperture_unit_steps() {
        // The finer-grid addresses of the resolution `r` unit vectors.
        let i = CoordIJK::new(1, 0, 0);

        assert_eq!(
            i.down_aperture7::<{ CCW }>(),
            CoordIJK::new(3, 0, 1),
            "aperture 7 CCW"
        );
        assert_eq!(
            i.down_aperture7::<{ CW }>(),
            CoordIJK::new(3, 1, 0),
            "aperture 7 CW"
        );
        assert_eq!(
            i.down_aperture3::<{ CCW }>(),
            CoordIJK::new(2, 0, 1),
            "aperture 3 CCW"
        );
        assert_eq!(
            i.down_aperture3::<{ CW }>(),
            CoordIJK::new(2, 1, 0),
            "aperture 3 CW"
        );
    }

    #[test]
    fn distance() {
        let z = CoordIJK::new(0, 0, 0);
        let i = CoordIJK::new(1, 0, 0);
        let ik = CoordIJK::new(1, 0, 1);
        let ij = CoordIJK::new(1, 1, 0);
        let j2 = CoordIJK::new(0, 2, 0);

        assert_eq!(z.distance(&z), 0, "identity distance");
        assert_eq!(z.distance(&i), 1, "0,0,0 to 1,0,0");
        assert_eq!(z.distance(&j2), 2, "0,0,0 to 0,2,0");
        assert_eq!(z.distance(&ik), 1, "0,0,0 to 1,0,1");
        assert_eq!(i.distance(&ik), 1, "1,0,0 to 1,0,1");
        assert_eq!(ik.distance(&j2), 3, "1,0,1 to 0,2,0");
        assert_eq!(ij.distance(&ik), 2, "1,0,1 to 1,1,0");
    }

    #[test]
    fn checked_up_aperture7() {
        assert!(CoordIJK::new(0, 0, 0)
            .checked_up_aperture7::<{ CCW }>()
            .is_some());
        assert!(CoordIJK::new(-1, 0, 0)
            .checked_up_aperture7::<{ CW }>()
            .is_some());

        assert!(
            CoordIJK::new(i32::MAX, 0, 0)
                .checked_up_aperture7::<{ CCW }>()
                .is_none(),
            "a * 3 overflows"
        );
        assert!(
            CoordIJK::new(0, i32::MAX, 0)
                .checked_up_aperture7::<{ CW }>()
                .is_none(),
            "b * 3 overflows"
        );
    }

    #[test]
    fn magnitude() {
        assert_float_eq!(
            Hex2d::new(3.0, 4.0).magnitude(),
            5.0,
            abs <= f64::EPSILON
        );
    }

    #[test]
    fn intersection() {
        let line1 = (Hex2d::new(2.0, 2.0), Hex2d::new(6.0, 6.0));
        let line2 = (Hex2d::new(0.0, 4.0), Hex2d::new(10.0, 4.0));

        let result = Hex2d::intersection(line1, line2);

        assert_float_eq!(result.x, 4.0, abs <= f64::EPSILON, "x");
        assert_float_eq!(result.y, 4.0, abs <= f64::EPSILON, "y");
    }

    #[test]
    fn nearest_hex_snap() {
        // Cell centers snap onto themselves.
        for direction in Direction::iter() {
            let ijk = direction.coordinate();
            let center = Hex2d::from(ijk);

            assert_eq!(
                CoordIJK::from(center),
                ijk,
                "center of {direction:?} snaps to itself"
            );
        }

        // A point well within a cell snaps to that cell.
        assert_eq!(
            CoordIJK::from(Hex2d::new(0.2, 0.1)),
            CoordIJK::new(0, 0, 0),
            "near origin"
        );
        assert_eq!(
            CoordIJK::from(Hex2d::new(1.1, -0.1)),
            CoordIJK::new(1, 0, 0),
            "near the I axis unit"
        );
    }
}
