use crate::{
    error, hex::CoordIJK, CellIndex, Edge, Vertex, NUM_HEX_VERTS,
    NUM_PENT_VERTS,
};
use core::{fmt, num::NonZeroU8};

/// Maximum value for a direction.
const MAX: u8 = 6;

/// Hexagon direction to vertex number relationships (same face).
const TO_VERTEX_HEXAGON: [Vertex; NUM_HEX_VERTS as usize] = [
    Vertex::new_unchecked(3),
    Vertex::new_unchecked(1),
    Vertex::new_unchecked(2),
    Vertex::new_unchecked(5),
    Vertex::new_unchecked(4),
    Vertex::new_unchecked(0),
];

/// Pentagon direction to vertex number relationships (same face).
const TO_VERTEX_PENTAGON: [Vertex; NUM_PENT_VERTS as usize] = [
    Vertex::new_unchecked(1),
    Vertex::new_unchecked(2),
    Vertex::new_unchecked(4),
    Vertex::new_unchecked(3),
    Vertex::new_unchecked(0),
];

// -----------------------------------------------------------------------------

/// A direction within an hexagonal grid.
///
/// Each cell at resolution `N-1` is divided into 7 cells at resolution `N`,
/// one per direction: the center and the 6 axes of the `IJK` coordinate
/// system.
///
/// ```text
///              J axis
///             ___
///            /   \
///        +--+  2  +--+
///       / 3  \___/  6 \
///       \    /   \    /
///        +--+  0  +--+
///       /    \___/    \
///       \ 1  /   \  4 /
///      K +--+  5  +--+ I
///     axis   \___/    axis
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(u8)]
#[allow(clippy::exhaustive_enums)] // Not gonna change any time soon.
#[cfg_attr(
    feature = "serde",
    derive(serde_repr::Serialize_repr, serde_repr::Deserialize_repr)
)]
pub enum Direction {
    /// Center.
    Center = 0,
    /// K axis.
    K = 1,
    /// J axis.
    J = 2,
    /// JK axis.
    JK = 3,
    /// I axis.
    I = 4,
    /// IK axis.
    IK = 5,
    /// IJ axis.
    IJ = 6,
}

impl Direction {
    /// Iterates over the valid directions.
    ///
    /// # Example
    ///
    /// ```
    /// use hexatile::Direction;
    ///
    /// let directions = Direction::iter().collect::<Vec<_>>();
    /// ```
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..=MAX).map(Self::new_unchecked)
    }

    /// Returns the unit vector of the direction in `IJK` coordinates.
    pub(crate) const fn coordinate(self) -> CoordIJK {
        match self {
            Self::Center => CoordIJK::new(0, 0, 0),
            Self::K => CoordIJK::new(0, 0, 1),
            Self::J => CoordIJK::new(0, 1, 0),
            Self::JK => CoordIJK::new(0, 1, 1),
            Self::I => CoordIJK::new(1, 0, 0),
            Self::IK => CoordIJK::new(1, 0, 1),
            Self::IJ => CoordIJK::new(1, 1, 0),
        }
    }

    /// Returns the axis numerical value, if any.
    pub(crate) fn axe(self) -> Option<NonZeroU8> {
        NonZeroU8::new(self.into())
    }

    /// Initializes a new [`Direction`] using a value that may be out of
    /// range.
    ///
    /// # Safety
    ///
    /// The value must be a valid direction.
    pub(crate) const fn new_unchecked(value: u8) -> Self {
        debug_assert!(value <= MAX, "direction out of range");
        match value {
            0 => Self::Center,
            1 => Self::K,
            2 => Self::J,
            3 => Self::JK,
            4 => Self::I,
            5 => Self::IK,
            // Out-of-range values are caught by the `debug_assert` above.
            _ => Self::IJ,
        }
    }

    /// Returns the direction rotated `count` times by 60 degrees steps.
    ///
    /// The non-center digits form a single 6-cycle under 60° rotation:
    /// rotating is stepping along the ring.
    pub(crate) const fn rotate60<const CCW: bool>(self, count: usize) -> Self {
        // The rotation ring, in CCW order.
        const RING: [Direction; 6] = [
            Direction::K,
            Direction::IK,
            Direction::I,
            Direction::IJ,
            Direction::J,
            Direction::JK,
        ];

        let position = match self {
            // The center is not affected by any rotation.
            Self::Center => return self,
            Self::K => 0,
            Self::IK => 1,
            Self::I => 2,
            Self::IJ => 3,
            Self::J => 4,
            Self::JK => 5,
        };

        let steps = count % 6;
        let index = if CCW {
            (position + steps) % 6
        } else {
            (position + 6 - steps) % 6
        };

        RING[index]
    }

    /// Returns the first topological vertex of this direction on `origin`.
    ///
    /// The neighbor in this direction is located between this vertex and the
    /// next one in sequence.
    pub(crate) fn vertex(self, origin: CellIndex) -> Vertex {
        let is_pentagon = origin.is_pentagon();

        // Invalid directions: center, and the deleted K axis on pentagons.
        assert!(self != Self::Center && !(is_pentagon && self == Self::K));

        let rotations = origin.vertex_rotations();

        // Find the appropriate vertex, rotating CCW if necessary.
        if is_pentagon {
            // -2 because neither direction 0 (center) nor 1 (deleted K axis)
            // is used.
            let index = usize::from(self) - 2;
            Vertex::new_unchecked(
                (u8::from(TO_VERTEX_PENTAGON[index]) + NUM_PENT_VERTS
                    - rotations)
                    % NUM_PENT_VERTS,
            )
        } else {
            // -1 because direction 0 (center) is not used.
            let index = usize::from(self) - 1;
            Vertex::new_unchecked(
                (u8::from(TO_VERTEX_HEXAGON[index]) + NUM_HEX_VERTS
                    - rotations)
                    % NUM_HEX_VERTS,
            )
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = error::InvalidDirection;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > MAX {
            return Err(Self::Error::new(value, "out of range"));
        }
        Ok(Self::new_unchecked(value))
    }
}

impl TryFrom<CoordIJK> for Direction {
    type Error = crate::error::HexGridError;

    // Recovers the direction whose unit vector is the given coordinate.
    fn try_from(value: CoordIJK) -> Result<Self, Self::Error> {
        let value = value.normalize();

        match (value.i(), value.j(), value.k()) {
            (0, 0, 0) => Ok(Self::Center),
            (0, 0, 1) => Ok(Self::K),
            (0, 1, 0) => Ok(Self::J),
            (0, 1, 1) => Ok(Self::JK),
            (1, 0, 0) => Ok(Self::I),
            (1, 0, 1) => Ok(Self::IK),
            (1, 1, 0) => Ok(Self::IJ),
            _ => Err(Self::Error::new("non-unit vector in IJK coordinate")),
        }
    }
}

impl From<Direction> for u8 {
    fn from(value: Direction) -> Self {
        value as Self
    }
}

impl From<Direction> for u64 {
    fn from(value: Direction) -> Self {
        u8::from(value).into()
    }
}

impl From<Direction> for usize {
    fn from(value: Direction) -> Self {
        u8::from(value).into()
    }
}

impl From<Edge> for Direction {
    fn from(value: Edge) -> Self {
        // Edges are numbered from 1 to 6, according to the direction they
        // face.
        Self::new_unchecked(value.into())
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_ring() {
        // One CCW step on each digit.
        let expected = [
            (Direction::Center, Direction::Center),
            (Direction::K, Direction::IK),
            (Direction::IK, Direction::I),
            (Direction::I, Direction::IJ),
            (Direction::IJ, Direction::J),
            (Direction::J, Direction::JK),
            (Direction::JK, Direction::K),
        ];

        for (from, to) in expected {
            assert_eq!(from.rotate60::<true>(1), to, "{from:?} CCW");
            assert_eq!(to.rotate60::<false>(1), from, "{to:?} CW");
        }

        // Six steps are the identity, in both windings.
        for direction in Direction::iter() {
            assert_eq!(direction.rotate60::<true>(6), direction);
            assert_eq!(direction.rotate60::<false>(6), direction);
        }
    }

    #[test]
    fn coordinate_roundtrip() {
        for direction in Direction::iter() {
            let recovered = Direction::try_from(direction.coordinate())
                .expect("unit coordinate");
            assert_eq!(direction, recovered, "roundtrip for {direction:?}");
        }
    }

    #[test]
    fn non_unit_coordinates() {
        assert!(
            Direction::try_from(CoordIJK::new(2, 0, 0)).is_err(),
            "non-unit vector"
        );
        assert_eq!(
            Direction::try_from(CoordIJK::new(2, 2, 2)).expect("direction"),
            Direction::Center,
            "denormalized origin"
        );
    }
}
