use super::{bits, Children, GridPathCells, IndexMode};
use crate::{
    error::{
        CompactionError, InvalidCellIndex, LocalIjError, ResolutionMismatch,
    },
    grid,
    icosa::FaceIJK,
    sphere, BaseCell, Boundary, DirectedEdgeIndex, Direction, Edge, LatLng,
    Resolution, Vertex, VertexIndex, EARTH_RADIUS_KM, NUM_HEX_VERTS,
    NUM_PENT_VERTS,
};
use ahash::{HashMap, HashMapExt};
use either::Either;
use core::{
    cmp::Ordering,
    fmt,
    num::{NonZeroU64, NonZeroU8},
    str::FromStr,
};

/// Lookup table for the number of children of hexagonal cells.
// 7.pow(resolution_delta)
const HEXAGON_CHILDREN_COUNTS: [u64; 16] = [
    1,
    7,
    49,
    343,
    2401,
    16_807,
    117_649,
    823_543,
    5_764_801,
    40_353_607,
    282_475_249,
    1_977_326_743,
    13_841_287_201,
    96_889_010_407,
    678_223_072_849,
    4_747_561_509_943,
];

/// Lookup table for the number of children of pentagonal cells.
// 1 + 5 * (7.pow(resolution delta) - 1) / 6
const PENTAGON_CHILDREN_COUNTS: [u64; 16] = [
    1,
    6,
    41,
    286,
    2001,
    14_006,
    98_041,
    686_286,
    4_804_001,
    33_628_006,
    235_396_041,
    1_647_772_286,
    11_534_406_001,
    80_740_842_006,
    565_185_894_041,
    3_956_301_258_286,
];

// -----------------------------------------------------------------------------

/// A cell (hexagon or pentagon) of the grid, at a given resolution.
///
/// The index is encoded on 64-bit with the following bit layout:
///
/// ```text
///  ┏━┳━━━┳━━━━┳━━━━┳━━━━━━━┳━━━┳━━━┳━┈┈┈┈┈┈┈┈━┳━━━┳━━━┓
///  ┃U┃ M ┃ U  ┃ R  ┃ B     ┃C₀ ┃C₁ ┃          ┃C₁₄┃C₁₅┃
///  ┗━┻━━━┻━━━━┻━━━━┻━━━━━━━┻━━━┻━━━┻━┈┈┈┈┈┈┈┈━┻━━━┻━━━┛
/// 64 63 59   56   52      45  42  39          6   3   0
/// ```
///
/// Where:
/// - `U` are unused reserved bits, always set to 0 (bit 63 and bits 56-58).
/// - `M` is the index mode, always set to 1, coded on 4 bits (59-62).
/// - `R` is the cell resolution, in [0; 15], coded on 4 bits (52-55).
/// - `B` is the base cell, in [0; 121], coded on 7 bits (45-51).
/// - `C` are the direction digits, coded on 3 bits each, either a value in
///   [0; 6] or the pattern `0b111` when unused.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellIndex(NonZeroU64);

impl CellIndex {
    /// Returns the resolution of the index.
    ///
    /// # Example
    ///
    /// ```
    /// let index = hexatile::CellIndex::try_from(0x8a1fb46622dffff)?;
    /// assert_eq!(index.resolution(), hexatile::Resolution::Ten);
    /// # Ok::<(), hexatile::error::InvalidCellIndex>(())
    /// ```
    #[must_use]
    pub const fn resolution(self) -> Resolution {
        bits::get_resolution(self.0.get())
    }

    /// Returns the base cell of the index.
    ///
    /// # Example
    ///
    /// ```
    /// let index = hexatile::CellIndex::try_from(0x8a1fb46622dffff)?;
    /// assert_eq!(index.base_cell(), hexatile::BaseCell::try_from(15)?);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub const fn base_cell(self) -> BaseCell {
        let value = bits::get_base_cell(self.0.get());
        // A `CellIndex` only contains a valid base cell (invariant).
        BaseCell::new_unchecked(value)
    }

    /// Returns true if this index represents a pentagonal cell.
    ///
    /// Only the center child lineages of the 12 pentagonal base cells are
    /// pentagons.
    #[must_use]
    pub fn is_pentagon(self) -> bool {
        self.base_cell().is_pentagon()
            && bits::first_axe(self.0.get()).is_none()
    }

    /// Returns the direction digit of the index at the given resolution, if
    /// any.
    #[must_use]
    pub fn direction_at(self, resolution: Resolution) -> Option<Direction> {
        (resolution != Resolution::Zero && resolution <= self.resolution())
            .then(|| {
                let value = bits::get_direction(self.0.get(), resolution);
                Direction::new_unchecked(value)
            })
    }

    /// Returns the parent, at the specified resolution, of the cell.
    ///
    /// Returns `None` if the requested resolution is finer than the cell's.
    ///
    /// # Example
    ///
    /// ```
    /// use hexatile::{CellIndex, Resolution};
    ///
    /// let index = CellIndex::try_from(0x8a1fb46622dffff)?;
    /// assert_eq!(
    ///     index.parent(Resolution::Five),
    ///     CellIndex::try_from(0x851fb467fffffff).ok(),
    /// );
    /// # Ok::<(), hexatile::error::InvalidCellIndex>(())
    /// ```
    #[must_use]
    pub fn parent(self, resolution: Resolution) -> Option<Self> {
        (resolution <= self.resolution()).then(|| {
            let bits = bits::set_resolution(self.0.get(), resolution);
            Self::new_unchecked(bits::set_unused(bits, resolution))
        })
    }

    /// Returns the center child index at the specified resolution.
    ///
    /// Returns `None` if the requested resolution is coarser than the
    /// cell's.
    ///
    /// # Example
    ///
    /// ```
    /// use hexatile::{CellIndex, Resolution};
    ///
    /// let index = CellIndex::try_from(0x8a1fb46622dffff)?;
    /// assert_eq!(
    ///     index.center_child(Resolution::Fifteen),
    ///     CellIndex::try_from(0x8f1fb46622d8000).ok(),
    /// );
    /// # Ok::<(), hexatile::error::InvalidCellIndex>(())
    /// ```
    #[must_use]
    pub fn center_child(self, resolution: Resolution) -> Option<Self> {
        (resolution >= self.resolution()).then(|| {
            let start = self.resolution().direction_offset();
            let stop = resolution.direction_offset();
            let mask = (1 << (start - stop)) - 1;

            let bits = bits::set_resolution(self.0.get(), resolution);
            Self::new_unchecked(bits & !(mask << stop))
        })
    }

    /// Returns the exact number of children of the cell at the given
    /// resolution.
    ///
    /// The children of a pentagon exclude the deleted K sub-sequence, hence
    /// a pentagon has 6 direct children where a hexagon has 7.
    ///
    /// # Example
    ///
    /// ```
    /// use hexatile::{CellIndex, Resolution};
    ///
    /// let index = CellIndex::try_from(0x8a1fb46622dffff)?;
    /// assert_eq!(index.children_count(Resolution::Fifteen), 16_807);
    /// # Ok::<(), hexatile::error::InvalidCellIndex>(())
    /// ```
    #[must_use]
    pub fn children_count(self, resolution: Resolution) -> u64 {
        let resolution = usize::from(resolution);
        let current = usize::from(self.resolution());

        if current > resolution {
            return 0;
        }
        if current == resolution {
            return 1;
        }

        let delta = resolution - current;
        if self.is_pentagon() {
            PENTAGON_CHILDREN_COUNTS[delta]
        } else {
            HEXAGON_CHILDREN_COUNTS[delta]
        }
    }

    /// Iterates over the children of the cell at the given resolution.
    ///
    /// The iterator is empty when the resolution is coarser than the cell's.
    ///
    /// # Example
    ///
    /// ```
    /// use hexatile::{CellIndex, Resolution};
    ///
    /// let index = CellIndex::try_from(0x8a1fb46622dffff)?;
    /// let children = index.children(Resolution::Eleven).collect::<Vec<_>>();
    /// assert_eq!(children.len(), 7);
    /// # Ok::<(), hexatile::error::InvalidCellIndex>(())
    /// ```
    pub fn children(
        self,
        resolution: Resolution,
    ) -> impl Iterator<Item = Self> {
        Children::new(self, resolution)
    }

    /// Returns all the resolution 0 cell indexes.
    ///
    /// # Example
    ///
    /// ```
    /// let cells = hexatile::CellIndex::base_cells().collect::<Vec<_>>();
    /// assert_eq!(cells.len(), 122);
    /// ```
    pub fn base_cells() -> impl Iterator<Item = Self> {
        // Template for a resolution 0 index:
        // mode = CELL, resolution = 0, all children unset.
        const TEMPLATE: u64 = 0x0800_1fff_ffff_ffff;

        (0..BaseCell::count()).map(|base_cell| {
            Self::new_unchecked(bits::set_base_cell(TEMPLATE, base_cell))
        })
    }

    /// Compacts a set of cells: complete groups of siblings are replaced by
    /// their parent, recursively, until no group is complete.
    ///
    /// The input must be a set of distinct cells, all at the same
    /// resolution. The output, concatenated with nothing, covers exactly the
    /// same area as the input.
    ///
    /// # Errors
    ///
    /// [`CompactionError`] when the input mixes resolutions or contains
    /// duplicates.
    ///
    /// # Example
    ///
    /// ```
    /// use hexatile::{CellIndex, Resolution};
    ///
    /// let index = CellIndex::try_from(0x8a1fb46622dffff)?;
    /// let cells = index.children(Resolution::Twelve).collect::<Vec<_>>();
    /// let compacted = CellIndex::compact(cells)?;
    /// assert_eq!(compacted, vec![index]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn compact(
        cells: impl IntoIterator<Item = Self>,
    ) -> Result<Vec<Self>, CompactionError> {
        let mut remaining = cells.into_iter().collect::<Vec<_>>();
        let Some(&first) = remaining.first() else {
            return Ok(remaining);
        };

        let mut resolution = first.resolution();
        if remaining.iter().any(|cell| cell.resolution() != resolution) {
            return Err(CompactionError::HeterogeneousResolution);
        }

        // Duplicated inputs would be double-counted as siblings below.
        remaining.sort_unstable();
        if remaining.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(CompactionError::DuplicateInput);
        }

        let mut output = Vec::new();
        while resolution != Resolution::Zero && !remaining.is_empty() {
            let parent_resolution =
                resolution.pred().expect("coarser resolution");

            // Count the siblings present under each parent.
            let mut siblings = HashMap::with_capacity(remaining.len() / 6);
            for cell in &remaining {
                let parent =
                    cell.parent(parent_resolution).expect("parent cell");
                *siblings.entry(parent).or_insert(0_u8) += 1;
            }

            // A parent with a full complement of children absorbs them (the
            // deleted K child of a pentagon counts as implicitly present).
            let is_complete = |parent: Self| {
                siblings[&parent] == 7 - u8::from(parent.is_pentagon())
            };

            // Cells whose parent is incomplete are final output; the others
            // are replaced by their parent and re-enter the next round.
            output.extend(remaining.iter().copied().filter(|cell| {
                !is_complete(cell.parent(parent_resolution).expect("parent"))
            }));

            let mut promoted = siblings
                .iter()
                .filter(|&(&parent, _)| is_complete(parent))
                .map(|(&parent, _)| parent)
                .collect::<Vec<_>>();
            // The map iteration order isn't stable: keep the output
            // deterministic.
            promoted.sort_unstable();

            remaining = promoted;
            resolution = parent_resolution;
        }
        output.extend_from_slice(&remaining);

        Ok(output)
    }

    /// Expands a compacted set of cells back to the given resolution.
    ///
    /// Input cells finer than the target resolution expand to nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use hexatile::{CellIndex, Resolution};
    ///
    /// let index = CellIndex::try_from(0x8a1fb46622dffff)?;
    /// let cells =
    ///     CellIndex::uncompact([index], Resolution::Eleven).collect::<Vec<_>>();
    /// assert_eq!(cells.len(), 7);
    /// # Ok::<(), hexatile::error::InvalidCellIndex>(())
    /// ```
    pub fn uncompact(
        compacted: impl IntoIterator<Item = Self>,
        resolution: Resolution,
    ) -> impl Iterator<Item = Self> {
        compacted.into_iter().flat_map(move |cell| {
            if cell.resolution() == resolution {
                Either::Left(core::iter::once(cell))
            } else {
                Either::Right(cell.children(resolution))
            }
        })
    }

    /// Returns the exact size of the expansion of a compacted set at the
    /// given resolution.
    #[must_use]
    pub fn uncompact_size(
        compacted: impl IntoIterator<Item = Self>,
        resolution: Resolution,
    ) -> u64 {
        compacted
            .into_iter()
            .map(|cell| cell.children_count(resolution))
            .sum()
    }

    /// Returns whether `self` and `other` are neighboring cells.
    ///
    /// # Errors
    ///
    /// [`ResolutionMismatch`] when the two cells have different resolutions.
    ///
    /// # Example
    ///
    /// ```
    /// use hexatile::CellIndex;
    ///
    /// let origin = CellIndex::try_from(0x8a194e699ab7fff)?;
    /// let destination = CellIndex::try_from(0x8a194e699a97fff)?;
    /// assert!(origin.is_neighbor_with(destination)?);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn is_neighbor_with(
        self,
        other: Self,
    ) -> Result<bool, ResolutionMismatch> {
        let resolution = self.resolution();
        if resolution != other.resolution() {
            return Err(ResolutionMismatch);
        }
        if self == other {
            return Ok(false);
        }

        // Cells sharing a parent are very likely to be neighbors: the center
        // child touches every sibling, the others touch 3 of the 7. A parent
        // comparison plus a lookup of the children digits is a super-cheap
        // way to possibly detect neighbors.
        if let Some(parent_resolution) = resolution.pred() {
            if parent_resolution != Resolution::Zero
                && self.parent(parent_resolution)
                    == other.parent(parent_resolution)
            {
                let origin_digit =
                    bits::get_direction(self.0.get(), resolution);
                let destination_digit =
                    bits::get_direction(other.0.get(), resolution);

                if origin_digit == 0 || destination_digit == 0 {
                    return Ok(true);
                }

                // The relevant neighbors, clockwise and counterclockwise,
                // keyed on the origin digit.
                #[rustfmt::skip]
                const NEIGHBOR_SET_CW:  [u8; 7] = [0, 3, 6, 2, 5, 1, 4];
                #[rustfmt::skip]
                const NEIGHBOR_SET_CCW: [u8; 7] = [0, 5, 3, 1, 6, 4, 2];

                if NEIGHBOR_SET_CW[usize::from(origin_digit)]
                    == destination_digit
                    || NEIGHBOR_SET_CCW[usize::from(origin_digit)]
                        == destination_digit
                {
                    return Ok(true);
                }
            }
        }

        // Otherwise determine the relationship the "hard" way.
        Ok(grid::DiskDistancesSafe::new(self, 1)
            .any(|(cell, _)| cell == other))
    }

    /// Returns the directed edge from `self` to `destination`, if they are
    /// neighbors.
    ///
    /// # Example
    ///
    /// ```
    /// use hexatile::CellIndex;
    ///
    /// let origin = CellIndex::try_from(0x8a194e699ab7fff)?;
    /// let destination = CellIndex::try_from(0x8a194e699a97fff)?;
    /// let edge = origin.edge(destination).expect("edge");
    /// # Ok::<(), hexatile::error::InvalidCellIndex>(())
    /// ```
    #[must_use]
    pub fn edge(self, destination: Self) -> Option<DirectedEdgeIndex> {
        grid::direction_for_neighbor(self, destination).map(|direction| {
            let bits = bits::set_mode(self.0.get(), IndexMode::DirectedEdge);
            DirectedEdgeIndex::new_unchecked(bits::set_reserved(
                bits,
                direction.into(),
            ))
        })
    }

    /// Iterates over the directed edges from `self` to its neighbors.
    ///
    /// A pentagonal cell has 5 edges, other cells have 6.
    pub fn edges(self) -> impl Iterator<Item = DirectedEdgeIndex> {
        let is_pentagon = self.is_pentagon();

        Edge::iter().filter_map(move |edge| {
            (!(is_pentagon && Direction::from(edge) == Direction::K)).then(
                || {
                    let bits =
                        bits::set_mode(self.0.get(), IndexMode::DirectedEdge);
                    DirectedEdgeIndex::new_unchecked(bits::set_reserved(
                        bits,
                        edge.into(),
                    ))
                },
            )
        })
    }

    /// Returns the canonical index of the `vertex`-th vertex of the cell.
    ///
    /// The owner of a vertex is the lowest-indexed of the cells sharing it,
    /// so that two vertex indexes are equal iff they denote the same
    /// geometric point.
    ///
    /// Returns `None` for a vertex number out of range (5 and above on a
    /// pentagon).
    #[must_use]
    pub fn vertex(self, vertex: Vertex) -> Option<VertexIndex> {
        let is_pentagon = self.is_pentagon();
        let num_verts = if is_pentagon {
            NUM_PENT_VERTS
        } else {
            NUM_HEX_VERTS
        };
        let vertex_num = u8::from(vertex);

        if vertex_num >= num_verts {
            return None;
        }

        // The vertex sits between two neighbors of the cell: the one across
        // the edge it starts ("left") and the one across the edge ending on
        // it ("right").
        let left = vertex.to_direction(self);
        let (left_neighbor, _) = grid::neighbor_rotations(self, left, 0)?;

        let right_vertex =
            Vertex::new_unchecked((vertex_num + num_verts - 1) % num_verts);
        let right = right_vertex.to_direction(self);
        let (right_neighbor, _) = grid::neighbor_rotations(self, right, 0)?;

        // By convention the owner is the lowest-indexed of the three cells.
        let owner = self.min(left_neighbor).min(right_neighbor);

        let owner_vertex_num = if owner == self {
            vertex_num
        } else {
            let direction =
                grid::direction_for_neighbor(owner, self)?;
            let shared_vertex = u8::from(direction.vertex(owner));

            if owner == left_neighbor {
                // From the left neighbor, the vertex is the second endpoint
                // of the shared edge.
                let owner_num_verts = if owner.is_pentagon() {
                    NUM_PENT_VERTS
                } else {
                    NUM_HEX_VERTS
                };
                (shared_vertex + 1) % owner_num_verts
            } else {
                shared_vertex
            }
        };

        let bits = bits::set_mode(u64::from(owner), IndexMode::Vertex);
        Some(VertexIndex::new_unchecked(bits::set_reserved(
            bits,
            owner_vertex_num,
        )))
    }

    /// Iterates over the canonical indexes of the vertices of the cell, in
    /// CCW order.
    pub fn vertexes(self) -> impl Iterator<Item = VertexIndex> {
        let num_verts = if self.is_pentagon() {
            NUM_PENT_VERTS
        } else {
            NUM_HEX_VERTS
        };

        (0..num_verts)
            .filter_map(move |num| self.vertex(Vertex::new_unchecked(num)))
    }

    /// Returns the number of CCW rotations of the cell's vertex numbers
    /// compared to the directional layout of its neighbors.
    pub(crate) fn vertex_rotations(self) -> u8 {
        // Get the face and other info for the cell.
        let fijk = FaceIJK::from(self);
        let base_cell = self.base_cell();
        let leading_digit =
            bits::first_axe(self.0.get()).map_or(0, NonZeroU8::get);

        // Get the base cell's home face.
        let home_face = base_cell.home_face();

        let mut ccw_rot60 = base_cell.rotation_count(fijk.face);

        if base_cell.is_pentagon() {
            // Direction-to-face mapping, in directional order from J; the
            // IK and JK entries are the ones crossed by the deleted
            // sub-sequence.
            let direction_faces = base_cell.pentagon_direction_faces();
            let ik_face =
                direction_faces[usize::from(u8::from(Direction::IK)) - 2];
            let jk_face =
                direction_faces[usize::from(u8::from(Direction::JK)) - 2];

            // Additional CCW rotation for polar neighbors or IK neighbors.
            if fijk.face != home_face
                && (base_cell.is_polar_pentagon() || fijk.face == ik_face)
            {
                ccw_rot60 = (ccw_rot60 + 1) % 6;
            }

            // Check whether the cell crosses a deleted pentagon
            // sub-sequence.
            if leading_digit == u8::from(Direction::JK)
                && fijk.face == ik_face
            {
                // Crosses from JK to IK: rotate CW.
                ccw_rot60 = (ccw_rot60 + 5) % 6;
            } else if leading_digit == u8::from(Direction::IK)
                && fijk.face == jk_face
            {
                // Crosses from IK to JK: rotate CCW.
                ccw_rot60 = (ccw_rot60 + 1) % 6;
            }
        }

        ccw_rot60
    }

    /// Returns the cell boundary in spherical coordinates.
    ///
    /// The boundary holds the 5 or 6 topological vertices of the cell, plus
    /// the icosahedron edge crossings for Class III resolutions.
    #[must_use]
    pub fn boundary(self) -> Boundary {
        let fijk = FaceIJK::from(self);
        let resolution = self.resolution();

        if self.is_pentagon() {
            fijk.pentagon_boundary(
                resolution,
                Vertex::new_unchecked(0),
                NUM_PENT_VERTS,
            )
        } else {
            fijk.hexagon_boundary(
                resolution,
                Vertex::new_unchecked(0),
                NUM_HEX_VERTS,
            )
        }
    }

    /// Computes the exact area of the cell, in radians².
    ///
    /// The cell is broken into spherical triangles around its center point;
    /// the distortion vertices of Class III boundaries are part of the sum.
    #[must_use]
    pub fn area_rads2(self) -> f64 {
        let center = LatLng::from(self);
        let boundary = self.boundary();

        (0..boundary.len())
            .map(|i| {
                sphere::triangle_area(
                    &boundary[i],
                    &boundary[(i + 1) % boundary.len()],
                    &center,
                )
            })
            .sum()
    }

    /// Computes the exact area of the cell, in km².
    #[must_use]
    pub fn area_km2(self) -> f64 {
        self.area_rads2() * EARTH_RADIUS_KM * EARTH_RADIUS_KM
    }

    /// Computes the exact area of the cell, in m².
    #[must_use]
    pub fn area_m2(self) -> f64 {
        self.area_km2() * 1000. * 1000.
    }

    /// Returns the grid distance, in cells, between `self` and `to`.
    ///
    /// # Errors
    ///
    /// [`LocalIjError`] when the cells are too far apart or separated by
    /// pentagonal distortion.
    ///
    /// # Example
    ///
    /// ```
    /// use hexatile::CellIndex;
    ///
    /// let src = CellIndex::try_from(0x8a194e699ab7fff)?;
    /// let dst = CellIndex::try_from(0x8a194e699a97fff)?;
    /// assert_eq!(src.grid_distance(dst)?, 1);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn grid_distance(self, to: Self) -> Result<i32, LocalIjError> {
        let src = self.to_local_ijk(self)?;
        let dst = to.to_local_ijk(self)?;

        Ok(src.coord().distance(dst.coord()))
    }

    /// Returns the number of cells in a grid path from `self` to `to` (both
    /// included).
    ///
    /// # Errors
    ///
    /// [`LocalIjError`] when the grid distance cannot be computed.
    pub fn grid_path_cells_size(self, to: Self) -> Result<i32, LocalIjError> {
        self.grid_distance(to).map(|distance| distance + 1)
    }

    /// Iterates over the cells of a grid path from `self` to `to` (both
    /// included).
    ///
    /// Each consecutive pair of returned cells are neighbors. The path is
    /// drawn in grid space and may not correspond to either a Cartesian
    /// line or a great arc.
    ///
    /// # Errors
    ///
    /// [`LocalIjError`] when the line cannot be computed (cells too far
    /// apart, or on opposite sides of a pentagon).
    pub fn grid_path_cells(
        self,
        to: Self,
    ) -> Result<impl Iterator<Item = Result<Self, LocalIjError>>, LocalIjError>
    {
        GridPathCells::new(self, to)
    }

    /// Initializes a new cell index from a value that must be valid.
    ///
    /// # Safety
    ///
    /// The value must be a valid cell index.
    pub(crate) fn new_unchecked(value: u64) -> Self {
        debug_assert!(Self::try_from(value).is_ok(), "invalid cell index");
        Self(NonZeroU64::new(value).expect("valid cell index"))
    }
}

impl Ord for CellIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare while ignoring the resolution bits to get a meaningful
        // ordering: the resolution field sits *above* the direction digits
        // in the bit layout, so including it would sort a parent far away
        // from its own children.
        (bits::clr_resolution(self.0.get()))
            .cmp(&bits::clr_resolution(other.0.get()))
    }
}

impl PartialOrd for CellIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<CellIndex> for u64 {
    fn from(value: CellIndex) -> Self {
        value.0.get()
    }
}

impl TryFrom<u64> for CellIndex {
    type Error = InvalidCellIndex;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        // The high bit (bit 63) and the reserved bits (56-58) must be 0.
        if (value >> 56) & 0b1000_0111 != 0 {
            return Err(Self::Error::new(Some(value), "tainted reserved bits"));
        }
        if bits::get_mode(value) != u8::from(IndexMode::Cell) {
            return Err(Self::Error::new(Some(value), "invalid index mode"));
        }

        let base = BaseCell::try_from(bits::get_base_cell(value))
            .map_err(|_| Self::Error::new(Some(value), "invalid base cell"))?;

        // The resolution is always valid: 4 bits covers exactly [0; 15].
        let resolution = bits::get_resolution(value);

        // Every digit up to the resolution must be a valid direction, and
        // the first non-center one must not be K on a pentagon (deleted
        // sub-sequence).
        let mut before_first_axe = true;
        for res in Resolution::range(Resolution::One, resolution) {
            let digit = bits::get_direction(value, res);
            if digit == 0b111 {
                return Err(Self::Error::new(
                    Some(value),
                    "unexpected unused direction",
                ));
            }
            if before_first_axe && digit != 0 {
                before_first_axe = false;
                if base.is_pentagon() && digit == u8::from(Direction::K) {
                    return Err(Self::Error::new(
                        Some(value),
                        "pentagonal cell index with a deleted subsequence",
                    ));
                }
            }
        }

        // Every digit beyond the resolution must be unused (`0b111`).
        let unused_bitsize = resolution.direction_offset();
        let unused_mask = (1_u64 << unused_bitsize) - 1;
        if (!value) & unused_mask != 0 {
            return Err(Self::Error::new(
                Some(value),
                "invalid unused direction pattern",
            ));
        }

        // 0 is rejected by the mode check (mode cannot be 0).
        Ok(Self(NonZeroU64::new(value).expect("non-zero cell index")))
    }
}

impl FromStr for CellIndex {
    type Err = InvalidCellIndex;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s, 16)
            .map_err(|_| Self::Err {
                value: None,
                reason: "invalid 64-bit hex number",
            })
            .and_then(Self::try_from)
    }
}

impl fmt::Debug for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:015o} ({})",
            self.base_cell(),
            u64::from(*self) & bits::DIRECTIONS_MASK,
            self
        )
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:x}")
    }
}

impl fmt::Binary for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl fmt::Octal for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Octal::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_at() {
        use Resolution::{Eleven, Five, One, Ten, Zero};

        let cell = CellIndex::new_unchecked(0x8a1fb46622dffff);

        assert_eq!(cell.resolution(), Ten);
        assert_eq!(cell.direction_at(Zero), None);
        assert_eq!(cell.direction_at(One), Some(Direction::IJ));
        assert_eq!(cell.direction_at(Five), Some(Direction::K));
        assert_eq!(cell.direction_at(Ten), Some(Direction::JK));
        assert_eq!(cell.direction_at(Eleven), None);
    }

    #[test]
    fn ordering_ignores_resolution() {
        // `0x89194e69d4fffff` (12-5-1-6-3-2-3-5-2-3) must come AFTER
        // `0x8a194e699ab7fff` (12-5-1-6-3-2-3-1-5-2-6) when sorting, even
        // though its resolution field is smaller.
        let mut cells = vec![
            CellIndex::new_unchecked(0x89194e69d4fffff),
            CellIndex::new_unchecked(0x8a194e699ab7fff),
        ];
        let expected = vec![
            CellIndex::new_unchecked(0x8a194e699ab7fff),
            CellIndex::new_unchecked(0x89194e69d4fffff),
        ];

        cells.sort_unstable();

        assert_eq!(cells, expected);
    }

    #[test]
    fn is_pentagon() {
        // Resolution 0 pentagon (base cell 4).
        let pentagon = CellIndex::new_unchecked(0x8009fffffffffff);
        assert!(pentagon.is_pentagon());

        // Center child lineage of a pentagonal base cell stays pentagonal.
        let child = CellIndex::new_unchecked(0x81083ffffffffff);
        assert!(child.is_pentagon());

        // A non-center descendant of a pentagonal base cell is an hexagon.
        let hexagon = CellIndex::new_unchecked(0x8a1fb46622dffff);
        assert!(!hexagon.is_pentagon());
    }

    #[test]
    fn debug_impl() {
        assert_eq!(
            format!("{:?}", CellIndex::new_unchecked(0x802bfffffffffff)),
            "21-777777777777777 (802bfffffffffff)"
        );
        assert_eq!(
            format!("{:?}", CellIndex::new_unchecked(0x8f2834782b9c2ab)),
            "20-064360256341253 (8f2834782b9c2ab)"
        );
    }
}
