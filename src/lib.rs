//! The `hexatile` library implements a hierarchical hexagonal geospatial
//! indexing system.
//!
//! The surface of the Earth is projected onto an icosahedron and each
//! triangular face is subdivided into finer and finer hexagonal grids (with
//! 12 pentagons per resolution absorbing the icosahedron vertices). Every
//! cell, directed edge and vertex of the grid is addressed by a compact
//! 64-bit index from which resolution, lineage, neighbors and geometry can
//! all be recovered.

// Lints {{{

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility,
    future_incompatible,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    missing_docs,
    unsafe_code,
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::lossy_float_literal,
    clippy::mem_forget,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::string_add,
    clippy::todo,
    clippy::unimplemented,
    clippy::use_debug
)]
#![allow(
    // Internal modules are hidden from the users, so the module name is
    // never actually typed twice by anyone.
    clippy::module_name_repetitions,
    // Most literals in this crate are table data, grouping hurts there.
    clippy::unreadable_literal,
)]

// }}}

mod base_cell;
mod bbox;
mod direction;
pub mod error;
mod grid;
mod hex;
mod icosa;
mod index;
mod localij;
#[cfg_attr(feature = "std", path = "math_std.rs")]
#[cfg_attr(not(feature = "std"), path = "math_libm.rs")]
mod math;
mod resolution;
mod sphere;

pub use base_cell::BaseCell;
pub use bbox::BBox;
pub use direction::Direction;
pub use hex::CoordIJ;
pub use icosa::Face;
pub use index::{
    CellIndex, DirectedEdgeIndex, Edge, IndexMode, Vertex, VertexIndex,
};
pub use localij::LocalIJ;
pub use resolution::Resolution;
pub use sphere::{Boundary, LatLng};

use resolution::ExtendedResolution;

// -----------------------------------------------------------------------------

/// Size, in bits, of a direction digit (range [0; 6]).
const DIRECTION_BITSIZE: usize = 3;

/// An icosahedron has 20 faces.
const NUM_ICOSA_FACES: usize = 20;
// The number of vertices in a hexagon.
const NUM_HEX_VERTS: u8 = 6;
// The number of vertices in a pentagon.
const NUM_PENT_VERTS: u8 = 5;

/// Rotation direction: counterclockwise.
const CCW: bool = true;
/// Rotation direction: clockwise.
const CW: bool = false;

/// Earth radius in kilometers using the WGS84 authalic radius.
const EARTH_RADIUS_KM: f64 = 6371.007180918475_f64;

/// Number of pentagons per resolution.
const NUM_PENTAGONS: u8 = 12;

/// Default cell index (resolution 0, base cell 0).
const DEFAULT_CELL_INDEX: u64 = 0x0800_1fff_ffff_ffff;

// 2π
const TWO_PI: f64 = 2. * core::f64::consts::PI;

// -----------------------------------------------------------------------------

/// Maximum number of indices produced by a grid disk of the given radius `k`.
///
/// # Example
///
/// ```
/// let count = hexatile::max_grid_disk_size(3);
/// ```
#[must_use]
pub const fn max_grid_disk_size(k: u32) -> u64 {
    // Smallest `k` that covers every cell at resolution 15; no disk can be
    // larger than the whole grid.
    const K_MAX: u32 = 13_780_510;

    if k >= K_MAX {
        return Resolution::Fifteen.cell_count();
    }

    let k = k as u64;
    // Centered hexagonal number (https://oeis.org/A003215).
    3 * k * (k + 1) + 1
}
