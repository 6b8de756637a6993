//! Error types of the `hexatile` crate.
//!
//! Every fallible operation returns one of the types below; there is no
//! sentinel value and no panic on bad user input.

use core::fmt;

// -----------------------------------------------------------------------------

// Declares a type-specific "invalid value" error type.
macro_rules! invalid_value_error {
    ($name:literal, $error:ident, $value_type:ty) => {
        #[doc = concat!("Invalid ", $name, ".")]
        #[derive(Clone, Copy, Debug, PartialEq)]
        // Value type may not be `Eq` (e.g. f64).
        #[allow(clippy::derive_partial_eq_without_eq)]
        pub struct $error {
            /// The invalid value.
            pub value: $value_type,
            /// The reason why it's invalid.
            pub reason: &'static str,
        }

        impl $error {
            pub(crate) const fn new(
                value: $value_type,
                reason: &'static str,
            ) -> Self {
                Self { value, reason }
            }
        }

        impl fmt::Display for $error {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "invalid {} (got {:?}): {}",
                    $name, self.value, self.reason
                )
            }
        }

        impl std::error::Error for $error {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                None
            }
        }
    };
}

invalid_value_error!("resolution", InvalidResolution, Option<u8>);
invalid_value_error!("cell index", InvalidCellIndex, Option<u64>);
invalid_value_error!("vertex index", InvalidVertexIndex, Option<u64>);
invalid_value_error!(
    "directed edge index",
    InvalidDirectedEdgeIndex,
    Option<u64>
);
invalid_value_error!("latitude/longitude", InvalidLatLng, f64);
invalid_value_error!("cell edge", InvalidEdge, u8);
invalid_value_error!("cell vertex", InvalidVertex, u8);
invalid_value_error!("icosahedron face", InvalidFace, u8);
invalid_value_error!("base cell", InvalidBaseCell, u8);
invalid_value_error!("direction", InvalidDirection, u8);

// -----------------------------------------------------------------------------

/// Errors occurring while compacting a set of cell indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompactionError {
    /// Input contains indices of heterogeneous resolutions.
    HeterogeneousResolution,
    /// Input set contains duplicate indices.
    DuplicateInput,
}

impl fmt::Display for CompactionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::HeterogeneousResolution => {
                write!(f, "heterogeneous resolution")
            }
            Self::DuplicateInput => write!(f, "duplicate indices"),
        }
    }
}

impl std::error::Error for CompactionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// -----------------------------------------------------------------------------

/// Errors related to the `IJK` coordinate system and its variants (e.g.
/// [`LocalIJ`](crate::LocalIJ)).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HexGridError {
    reason: &'static str,
}

impl HexGridError {
    /// Initializes a new [`HexGridError`] with the given error message.
    pub(crate) const fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

impl fmt::Display for HexGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for HexGridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// -----------------------------------------------------------------------------

/// Resolution mismatch between two cell indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolutionMismatch;

impl fmt::Display for ResolutionMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resolution mismatch")
    }
}

impl std::error::Error for ResolutionMismatch {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// -----------------------------------------------------------------------------

/// Errors occurring during local `IJ` coordinate system conversions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum LocalIjError {
    /// Local origin and cell index have incompatible resolutions.
    ResolutionMismatch,
    /// Pentagon distortion was encountered and could not be handled.
    ///
    /// Some unfolding configurations around a pentagon are ambiguous; those
    /// are rejected rather than unfolded possibly wrong.
    Pentagon,
    /// Error related to the `IJK` coordinate system.
    HexGrid(HexGridError),
}

impl fmt::Display for LocalIjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ResolutionMismatch => write!(f, "resolution mismatch"),
            Self::Pentagon => write!(f, "pentagon distortion"),
            Self::HexGrid(err) => write!(f, "hex grid error: {err}"),
        }
    }
}

impl std::error::Error for LocalIjError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Self::ResolutionMismatch | Self::Pentagon => None,
            Self::HexGrid(ref err) => Some(err),
        }
    }
}

impl From<HexGridError> for LocalIjError {
    fn from(value: HexGridError) -> Self {
        Self::HexGrid(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // All errors must have a non-empty display.
    #[test]
    fn display() {
        assert!(!CompactionError::HeterogeneousResolution
            .to_string()
            .is_empty());
        assert!(!CompactionError::DuplicateInput.to_string().is_empty());

        assert!(!HexGridError::new("error").to_string().is_empty());
        assert!(!ResolutionMismatch.to_string().is_empty());

        assert!(!LocalIjError::ResolutionMismatch.to_string().is_empty());
        assert!(!LocalIjError::Pentagon.to_string().is_empty());
        assert!(!LocalIjError::HexGrid(HexGridError::new("error"))
            .to_string()
            .is_empty());

        assert!(!InvalidResolution::new(Some(32), "error")
            .to_string()
            .is_empty());
        assert!(!InvalidCellIndex::new(Some(0), "error")
            .to_string()
            .is_empty());
        assert!(!InvalidVertexIndex::new(Some(0), "error")
            .to_string()
            .is_empty());
        assert!(!InvalidDirectedEdgeIndex::new(Some(0), "error")
            .to_string()
            .is_empty());
        assert!(!InvalidLatLng::new(f64::NAN, "error").to_string().is_empty());
        assert!(!InvalidEdge::new(7, "error").to_string().is_empty());
        assert!(!InvalidVertex::new(8, "error").to_string().is_empty());
        assert!(!InvalidFace::new(33, "error").to_string().is_empty());
        assert!(!InvalidBaseCell::new(128, "error").to_string().is_empty());
        assert!(!InvalidDirection::new(9, "error").to_string().is_empty());
    }

    // The source is only set for wrapper errors.
    #[test]
    fn source() {
        use std::error::Error as _;

        assert!(LocalIjError::Pentagon.source().is_none());
        assert!(LocalIjError::HexGrid(HexGridError::new("error"))
            .source()
            .is_some());
    }
}
