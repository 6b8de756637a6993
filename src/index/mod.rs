//! The 64-bit index types.
//!
//! Cells, directed edges and vertexes are alternate readings of the same
//! 64-bit word, discriminated by the mode bits.

pub mod bits;
mod cell;
mod edge;
mod iterator;
mod vertex;

pub use cell::CellIndex;
pub use edge::{DirectedEdgeIndex, Edge};
pub use vertex::{Vertex, VertexIndex};

use iterator::{Children, GridPathCells};

use core::fmt;

// -----------------------------------------------------------------------------

/// Index modes.
///
/// The mode bits select which alphabet the rest of the 64-bit word is read
/// in: cell, directed edge or vertex.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(u8)]
#[non_exhaustive]
#[cfg_attr(
    feature = "serde",
    derive(serde_repr::Serialize_repr, serde_repr::Deserialize_repr)
)]
pub enum IndexMode {
    /// A cell (hexagon or pentagon) index.
    Cell = 1,
    /// A directed edge (cell A -> cell B) index.
    DirectedEdge = 2,
    /// An undirected edge (cell A <-> cell B) index.
    UndirectedEdge = 3,
    /// A vertex (i.e. a single vertex of a cell) index.
    Vertex = 4,
}

impl From<IndexMode> for u8 {
    fn from(value: IndexMode) -> Self {
        value as Self
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Self::Cell => "Cell",
            Self::DirectedEdge => "DirectedEdge",
            Self::UndirectedEdge => "UndirectedEdge",
            Self::Vertex => "Vertex",
        })
    }
}
