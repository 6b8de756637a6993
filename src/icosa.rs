//! The icosahedral substrate.
//!
//! Everything that ties the planar hexagon lattice to the sphere lives
//! here: the 20 faces and their constant data, the gnomonic projection in
//! both directions, the `FaceIJK` addresses (a lattice coordinate anchored
//! to one face), the overage adjustment that migrates an address across
//! face boundaries, and the substrate grids used to locate cell vertices
//! exactly.
//!
//! Each grid resolution is rotated ~19.1° relative to the next coarser one,
//! alternating between counterclockwise and clockwise, so every resolution
//! has one of two possible orientations: Class II or Class III. The base
//! cells, which make up resolution 0, are Class II.

use crate::{
    error,
    hex::{CoordIJK, Hex2d, SQRT3_2},
    index::bits,
    math,
    sphere::{self, to_positive_angle},
    BaseCell, Boundary, CellIndex, Direction, ExtendedResolution, LatLng,
    Resolution, Vertex, CCW, CW, DEFAULT_CELL_INDEX, NUM_HEX_VERTS,
    NUM_ICOSA_FACES, NUM_PENT_VERTS,
};
use core::fmt;

/// Scaling factor from `hex2d` resolution 0 unit length (or distance
/// between adjacent cell center points on the plane) to gnomonic unit
/// length.
const RES0_U_GNOMONIC: f64 = 0.381966011250105_f64;

/// Rotation angle between Class II and Class III resolution axes.
///
/// `asin(sqrt(3/28))`
const AP7_ROT_RADS: f64 = 0.3334731722518321_f64;

/// Icosahedron face `ijk` axis as azimuth in radians from face center to
/// vertex 0.
#[rustfmt::skip]
const AXES_AZ_RADS_CII: [f64; NUM_ICOSA_FACES] = [
    5.6199582685239395, 5.7603390817141875, 0.78021365439343,
    0.4304693639799999, 6.130269123335111,  2.692877706530643,
    2.982963003477244,  3.532912002790141,  3.494305004259568,
    3.0032141694995382, 5.930472956509812,  0.13837848409025486,
    0.4487149470591504, 0.15862965011254937, 5.891865957979238,
    2.711123289609793,  3.294508837434268,  3.80481969224544,
    3.6644388790551923, 2.361378999196363,
];

/// Powers of √7, one per resolution (and one more for the substrate).
const SQRT7_POWERS: &[f64] = &[
    1.0, 2.6457513110645907, 7.,
    18.520259177452136, 49.00000000000001, 129.64181424216497,
    343.0000000000001, 907.4926996951549, 2401.000000000001,
    6352.448897866085, 16807.000000000007, 44467.1422850626,
    117649.00000000007, 311269.9959954382, 823543.0000000006,
    2178889.971968068, 5764801_f64,
];

// -----------------------------------------------------------------------------

/// An icosahedron face.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[repr(transparent)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Face(u8);

impl Face {
    /// Initializes a new `Face` using a value that may be out of range.
    ///
    /// # Safety
    ///
    /// The value must be a valid face.
    #[allow(clippy::cast_possible_truncation)] // Bounded by the assert.
    pub(crate) const fn new_unchecked(value: usize) -> Self {
        debug_assert!(value < NUM_ICOSA_FACES, "face out of range");
        Self(value as u8)
    }
}

impl From<Face> for usize {
    fn from(value: Face) -> Self {
        Self::from(value.0)
    }
}

impl From<Face> for u8 {
    fn from(value: Face) -> Self {
        value.0
    }
}

impl TryFrom<u8> for Face {
    type Error = error::InvalidFace;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if usize::from(value) >= NUM_ICOSA_FACES {
            return Err(Self::Error::new(value, "out of range"));
        }

        Ok(Self(value))
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// -----------------------------------------------------------------------------

/// Returns the face whose center is nearest to the given point, along with
/// the squared euclidean distance to that center.
pub(crate) fn nearest_face(ll: LatLng) -> (Face, f64) {
    let [x, y, z] = ll.unit_vector();

    // Even antipodal points are at squared distance 4 on the unit sphere.
    let mut face = Face::new_unchecked(0);
    let mut best = 5.0_f64;
    for (candidate, &[cx, cy, cz]) in CENTER_POINT.iter().enumerate() {
        let (dx, dy, dz) = (x - cx, y - cy, z - cz);
        let sqd = dx * dx + dy * dy + dz * dz;

        if sqd < best {
            face = Face::new_unchecked(candidate);
            best = sqd;
        }
    }

    (face, best)
}

/// Projects a point of the sphere into the lattice plane of the given face,
/// scaled for the given resolution.
///
/// # Arguments
///
/// * `ll` - The point to project.
/// * `resolution` - The desired resolution for the projection.
/// * `face` - The icosahedral face nearest to the point.
/// * `sqd` - The squared euclidean distance to that face's center.
fn project(ll: LatLng, resolution: Resolution, face: Face, sqd: f64) -> Hex2d {
    // Spherical distance to the face center, from
    // cos(r) = 1 - 2*sin²(r/2) and sqd = 4*sin²(r/2).
    let r = math::acos(1. - sqd / 2.);

    if r < sphere::EPSILON {
        return Hex2d::new(0., 0.);
    }

    let index = usize::from(face);

    // Counter-clockwise angle from the face's Class II i-axis.
    let mut theta = AXES_AZ_RADS_CII[index]
        - to_positive_angle(CENTER_GEO[index].azimuth(&ll));

    // Class III grids are rotated versus the face axes.
    if resolution.is_class3() {
        theta -= AP7_ROT_RADS;
    }

    // Gnomonic scaling, in resolution units.
    let distance =
        math::tan(r) / RES0_U_GNOMONIC * SQRT7_POWERS[usize::from(resolution)];

    Hex2d::new(distance * math::cos(theta), distance * math::sin(theta))
}

/// Projects a point of the lattice plane of the given face back onto the
/// sphere.
///
/// # Arguments
///
/// * `point` - The point to project, in resolution units.
/// * `face` - The icosahedral face the plane is centered on.
/// * `resolution` - The resolution of the grid.
/// * `is_substrate` - Whether the point lives in a substrate grid relative
///   to the specified resolution.
pub(crate) fn unproject(
    point: Hex2d,
    face: Face,
    resolution: ExtendedResolution,
    is_substrate: bool,
) -> LatLng {
    let index = usize::from(face);

    let r = {
        let mut r = point.magnitude();
        if r < sphere::EPSILON {
            return CENTER_GEO[index];
        }

        // Scale back from resolution units.
        r /= SQRT7_POWERS[usize::from(resolution)];

        if is_substrate {
            r /= 3.;
            // Substrate grids are always adjusted to the next Class II.
            debug_assert!(!resolution.is_class3());
        }

        // Inverse gnomonic scaling.
        math::atan(r * RES0_U_GNOMONIC)
    };

    let theta = {
        let mut theta = math::atan2(point.y, point.x);

        // Undo the Class III rotation; a substrate grid is already back to
        // Class II.
        if !is_substrate && resolution.is_class3() {
            theta = to_positive_angle(theta + AP7_ROT_RADS);
        }

        // Express `theta` as an azimuth.
        to_positive_angle(AXES_AZ_RADS_CII[index] - theta)
    };

    CENTER_GEO[index].coord_at(theta, r)
}

/// Encodes a point of the sphere as the `FaceIJK` address of its containing
/// cell at the given resolution.
pub(crate) fn geo_to_face_ijk(ll: LatLng, resolution: Resolution) -> FaceIJK {
    let (face, sqd) = nearest_face(ll);

    FaceIJK::new(face, project(ll, resolution, face, sqd).into())
}

// -----------------------------------------------------------------------------

/// A lattice coordinate anchored to one icosahedron face.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct FaceIJK {
    /// Face number.
    pub face: Face,
    /// `ijk` coordinates on that face.
    pub coord: CoordIJK,
}

impl FaceIJK {
    pub const fn new(face: Face, coord: CoordIJK) -> Self {
        Self { face, coord }
    }

    /// Returns the base cell at these coordinates, along with the number of
    /// 60° CCW rotations to rotate into its coordinate system.
    #[allow(clippy::cast_sign_loss)] // Components are in [0; 2].
    pub fn base_cell_rotation(&self) -> Rotation {
        let (i, j, k) = (self.coord.i(), self.coord.j(), self.coord.k());
        // Guaranteed by the encoding walk, or we have a nasty bug to fix.
        debug_assert!(
            (0..=2).contains(&i)
                && (0..=2).contains(&j)
                && (0..=2).contains(&k)
        );

        FACE_IJK_BASE_CELLS[usize::from(self.face)][i as usize][j as usize]
            [k as usize]
    }

    /// Converts a `FaceIJK` address to the corresponding [`CellIndex`].
    pub(crate) fn to_cell(mut self, resolution: Resolution) -> CellIndex {
        let mut bits = bits::set_resolution(DEFAULT_CELL_INDEX, resolution);

        // At resolution 0 the coordinates address the base cell directly.
        if resolution == Resolution::Zero {
            let rotation = self.base_cell_rotation();
            return CellIndex::new_unchecked(bits::set_base_cell(
                bits,
                rotation.base_cell.into(),
            ));
        }

        // Extract the digits from the finest resolution up; what remains
        // addresses the base cell in the current face's system.
        self.coord =
            directions_bits_from_ijk(self.coord, &mut bits, resolution);

        let rotation = self.base_cell_rotation();
        bits = bits::set_base_cell(bits, rotation.base_cell.into());

        CellIndex::new_unchecked(canonicalize_orientation(
            bits, rotation, self.face,
        ))
    }

    /// Returns the center point, in spherical coordinates, of the cell at
    /// this address and the given resolution.
    pub fn to_latlng(self, resolution: Resolution) -> LatLng {
        unproject(self.coord.into(), self.face, resolution.into(), false)
    }

    /// Walks the direction digits of a cell index from this starting
    /// address, without overage handling.
    ///
    /// When the walk starts from the base cell's home address, the result is
    /// the cell's address in the home face coordinate system (overage
    /// pending); when it starts from the zero address, the result is in the
    /// base cell's own coordinate system.
    pub(crate) fn walk_directions(
        mut self,
        bits: u64,
        resolution: Resolution,
    ) -> Self {
        for res in Resolution::range(Resolution::One, resolution) {
            self.coord = if res.is_class3() {
                // Class III == rotate CCW.
                self.coord.down_aperture7::<{ CCW }>()
            } else {
                // Class II == rotate CW.
                self.coord.down_aperture7::<{ CW }>()
            };

            // The loop upper bound is the index resolution: always a valid
            // digit.
            let direction =
                Direction::new_unchecked(bits::get_direction(bits, res));
            self.coord = self.coord.neighbor(direction);
        }

        self
    }

    /// Adjusts the address in place so that it is relative to the correct
    /// icosahedral face.
    ///
    /// A cell usually lies on the same face as its base cell, but it can
    /// spill over onto an adjacent face (an "overage"), in which case the
    /// projection centered on that adjacent face must be used instead.
    ///
    /// # Arguments
    ///
    /// * `class2_res` - The Class II resolution of the cell.
    /// * `is_pent4` - Whether or not the cell is a pentagon with a leading
    ///   digit 4.
    pub fn adjust_overage_class2<const IS_SUBSTRATE: bool>(
        &mut self,
        class2_res: ExtendedResolution,
        is_pent4: bool,
    ) -> Overage {
        let class2_res = usize::from(class2_res);
        // Substrate grids are 3 times finer.
        let scale = if IS_SUBSTRATE { 3 } else { 1 };
        let face = usize::from(self.face);

        // The triangle of the face covers dimensions up to `max_dim`.
        let max_dim = MAX_DIM_BY_CII_RES[class2_res] * scale;
        let dimension = self.coord.i() + self.coord.j() + self.coord.k();

        // On the face edge, which only happens on substrate grids.
        if IS_SUBSTRATE && dimension == max_dim {
            return Overage::FaceEdge;
        }

        if dimension > max_dim {
            let orientation = if self.coord.k() > 0 {
                if self.coord.j() > 0 {
                    &NEIGHBORS[face][JK]
                } else {
                    // Adjust for the pentagonal missing sequence.
                    if is_pent4 {
                        // Translate the origin to the center of the pentagon,
                        // rotate to adjust for the missing sequence and
                        // translate the origin back.
                        let origin = CoordIJK::new(max_dim, 0, 0);
                        let tmp = (self.coord - origin).rotate60::<{ CW }>();
                        self.coord = tmp + origin;
                    }
                    &NEIGHBORS[face][KI]
                }
            } else {
                &NEIGHBORS[face][IJ]
            };
            self.reorient(
                orientation,
                UNIT_SCALE_BY_CII_RES[class2_res] * scale,
            );

            // Overage points on pentagon boundaries can end up on edges.
            if IS_SUBSTRATE
                && self.coord.i() + self.coord.j() + self.coord.k() == max_dim
            {
                return Overage::FaceEdge;
            }
            return Overage::NewFace;
        }

        Overage::None
    }

    /// Re-expresses the address in the frame of the adjacent face described
    /// by `orientation`, with the translation scaled by `unit_scale`.
    fn reorient(&mut self, orientation: &FaceOrientIJK, unit_scale: i32) {
        self.face = orientation.face;

        for _ in 0..orientation.ccw_rot60 {
            self.coord = self.coord.rotate60::<{ CCW }>();
        }

        let translation = orientation.translate.scale(unit_scale);
        self.coord = (self.coord + translation).normalize();
    }

    /// Adjusts the address of a pentagon vertex in a substrate grid in place
    /// so that it is relative to the correct icosahedral face.
    ///
    /// A pentagon vertex can spill across two successive faces; keep
    /// adjusting until it settles.
    pub fn adjust_pentagon_vertex_overage(
        &mut self,
        resolution: ExtendedResolution,
    ) {
        while self.adjust_overage_class2::<true>(resolution, false)
            == Overage::NewFace
        {}
    }

    /// Returns the vertices of the cell at this address as substrate
    /// `FaceIJK` addresses.
    ///
    /// # Arguments
    ///
    /// * `resolution` - The resolution of the cell; adjusted to the
    ///   substrate grid resolution.
    /// * `vertices` - Output array for the vertices (5 for a pentagon, 6
    ///   otherwise).
    pub fn vertices(
        &mut self,
        resolution: Resolution,
        vertices: &mut [Self],
    ) -> ExtendedResolution {
        // The vertices of an origin-centered cell in a Class II resolution
        // on a substrate grid with aperture sequence 33r. The aperture 3
        // gets us the vertices, and the 3r gets us back to Class II.
        //
        // Vertices listed CCW from the i-axis.
        const VERTS_CII: [CoordIJK; 6] = [
            CoordIJK::new(2, 1, 0),
            CoordIJK::new(1, 2, 0),
            CoordIJK::new(0, 2, 1),
            CoordIJK::new(0, 1, 2),
            CoordIJK::new(1, 0, 2),
            CoordIJK::new(2, 0, 1),
        ];

        // The vertices of an origin-centered cell in a Class III resolution
        // on a substrate grid with aperture sequence 33r7r. The aperture 3
        // gets us the vertices, and the 3r7r gets us to Class II.
        //
        // Vertices listed CCW from the i-axis.
        const VERTS_CIII: [CoordIJK; 6] = [
            CoordIJK::new(5, 4, 0),
            CoordIJK::new(1, 5, 0),
            CoordIJK::new(0, 5, 4),
            CoordIJK::new(0, 1, 5),
            CoordIJK::new(4, 0, 5),
            CoordIJK::new(5, 0, 1),
        ];

        // Adjust the center point to be in an aperture 33r substrate grid.
        self.coord = self.coord.down_aperture3::<{ CCW }>();
        self.coord = self.coord.down_aperture3::<{ CW }>();

        // If the resolution is Class III we need to add a CW aperture 7 to
        // get to an icosahedral Class II grid.
        let (verts, adjusted_resolution) = if resolution.is_class3() {
            self.coord = self.coord.down_aperture7::<{ CW }>();
            (&VERTS_CIII, ExtendedResolution::down(resolution))
        } else {
            (&VERTS_CII, resolution.into())
        };

        // The center point is now in the same substrate grid as the origin
        // cell vertices. Add the center point substrate coordinates to each
        // vertex to translate the vertices to that cell.
        for (i, vertex) in vertices.iter_mut().enumerate() {
            vertex.face = self.face;
            vertex.coord = (self.coord + verts[i]).normalize();
        }

        adjusted_resolution
    }

    /// Generates the boundary, in spherical coordinates, of the pentagonal
    /// cell at this address.
    ///
    /// # Arguments
    ///
    /// * `resolution` - The resolution of the cell.
    /// * `start` - The first topological vertex to return.
    /// * `length` - The number of topological vertices to return.
    pub fn pentagon_boundary(
        &self,
        resolution: Resolution,
        start: Vertex,
        length: u8,
    ) -> Boundary {
        let mut boundary = Boundary::new();
        let start = u8::from(start);
        let mut center = *self;
        let mut vertices = [Self::default(); NUM_PENT_VERTS as usize];
        let adjusted_resolution = center.vertices(resolution, &mut vertices);

        // If we're returning the entire loop, we need one more iteration in
        // case of a distortion vertex on the last edge.
        let additional_iteration = u8::from(length == NUM_PENT_VERTS);

        // Convert each vertex to lat/lng, adjusting faces and introducing
        // edge-crossing vertices as needed.
        let mut last_fijk = Self::default();
        for vert in start..(start + length + additional_iteration) {
            let mut fijk = vertices[usize::from(vert % NUM_PENT_VERTS)];
            fijk.adjust_pentagon_vertex_overage(adjusted_resolution);

            // All Class III pentagon edges cross icosahedron edges.
            //
            // Note that Class II pentagons have vertices on the edge, not
            // edge intersections.
            if resolution.is_class3() && vert > start {
                // Re-express the current vertex on the last vertex's face,
                // so that both ends of the edge live in the same plane.
                let mut tmp_fijk = fijk;
                let to_last = adjacent_face_dir(tmp_fijk.face, last_fijk.face);
                tmp_fijk.reorient(
                    &NEIGHBORS[usize::from(tmp_fijk.face)]
                        [usize::from(to_last)],
                    UNIT_SCALE_BY_CII_RES[usize::from(adjusted_resolution)]
                        * 3,
                );

                let orig2d0 = Hex2d::from(last_fijk.coord);
                let orig2d1 = Hex2d::from(tmp_fijk.coord);

                // The crossed icosahedron edge, in that same plane.
                let edge = face_edge(
                    usize::from(adjacent_face_dir(tmp_fijk.face, fijk.face)),
                    f64::from(
                        MAX_DIM_BY_CII_RES[usize::from(adjusted_resolution)],
                    ),
                );

                // Add the crossing point to the result.
                let intersection =
                    Hex2d::intersection((orig2d0, orig2d1), edge);
                boundary.push(unproject(
                    intersection,
                    tmp_fijk.face,
                    adjusted_resolution,
                    true,
                ));
            }

            // Convert the vertex to lat/lng and add it to the result.
            //
            // `vert == start + NUM_PENT_VERTS` is only used to test for a
            // possible intersection on the last edge.
            if vert < start + NUM_PENT_VERTS {
                boundary.push(unproject(
                    fijk.coord.into(),
                    fijk.face,
                    adjusted_resolution,
                    true,
                ));
            }

            last_fijk = fijk;
        }

        boundary
    }

    /// Generates the boundary, in spherical coordinates, of the hexagonal
    /// cell at this address.
    ///
    /// # Arguments
    ///
    /// * `resolution` - The resolution of the cell.
    /// * `start` - The first topological vertex to return.
    /// * `length` - The number of topological vertices to return.
    pub fn hexagon_boundary(
        &self,
        resolution: Resolution,
        start: Vertex,
        length: u8,
    ) -> Boundary {
        let mut boundary = Boundary::new();
        let start = u8::from(start);
        let mut center = *self;
        let mut vertices = [Self::default(); NUM_HEX_VERTS as usize];
        let adjusted_resolution = center.vertices(resolution, &mut vertices);

        // If we're returning the entire loop, we need one more iteration in
        // case of a distortion vertex on the last edge.
        let additional_iteration = u8::from(length == NUM_HEX_VERTS);

        // Convert each vertex to lat/lng, adjusting faces and introducing
        // edge-crossing vertices as needed.
        let mut last_face = usize::MAX;
        let mut last_overage = Overage::None;
        for vert in start..(start + length + additional_iteration) {
            let v = usize::from(vert % NUM_HEX_VERTS);
            let mut fijk = vertices[v];
            let overage =
                fijk.adjust_overage_class2::<true>(adjusted_resolution, false);

            // Check for edge-crossing.
            //
            // Each face of the underlying icosahedron is a different
            // projection plane, so when an edge of the cell crosses an
            // icosahedron edge an additional vertex must be introduced at
            // the intersection point; each half of the cell edge is then
            // projected with the appropriate face projection.
            //
            // Note that Class II cell edges have vertices on the face edge,
            // with no edge line intersections.
            if resolution.is_class3()
                && vert > start
                && usize::from(fijk.face) != last_face
                && last_overage != Overage::FaceEdge
            {
                // Both ends of the edge, in the plane of the center's face.
                let last_v = (v + 5) % usize::from(NUM_HEX_VERTS);
                let orig2d0 = Hex2d::from(vertices[last_v].coord);
                let orig2d1 = Hex2d::from(vertices[v].coord);

                // The crossed icosahedron edge, in that same plane.
                let neighbor_face = if last_face == usize::from(center.face) {
                    fijk.face
                } else {
                    Face::new_unchecked(last_face)
                };
                let edge = face_edge(
                    usize::from(adjacent_face_dir(center.face, neighbor_face)),
                    f64::from(
                        MAX_DIM_BY_CII_RES[usize::from(adjusted_resolution)],
                    ),
                );

                let intersection =
                    Hex2d::intersection((orig2d0, orig2d1), edge);
                // If the intersection occurs at a cell vertex, each adjacent
                // cell edge lies completely on a single icosahedron face and
                // no additional vertex is required.
                let is_intersection_at_vertex =
                    orig2d0 == intersection || orig2d1 == intersection;
                if !is_intersection_at_vertex {
                    boundary.push(unproject(
                        intersection,
                        center.face,
                        adjusted_resolution,
                        true,
                    ));
                }
            }

            // Convert the vertex to lat/lng and add it to the result.
            //
            // `vert == start + NUM_HEX_VERTS` is only used to test for a
            // possible intersection on the last edge.
            if vert < start + NUM_HEX_VERTS {
                boundary.push(unproject(
                    fijk.coord.into(),
                    fijk.face,
                    adjusted_resolution,
                    true,
                ));
            }

            last_face = fijk.face.into();
            last_overage = overage;
        }

        boundary
    }
}

impl From<CellIndex> for FaceIJK {
    /// Decodes a cell index into its `FaceIJK` address, migrating across
    /// face neighbors when the cell spills off its base cell's home face.
    fn from(value: CellIndex) -> Self {
        let mut bits = u64::from(value);
        let base_cell = value.base_cell();
        let resolution = value.resolution();

        // Adjust for the pentagonal missing sequence: all of sub-sequence 5
        // needs to be adjusted (and some of sub-sequence 4 below).
        if base_cell.is_pentagon()
            && bits::first_axe(bits) == Direction::IK.axe()
        {
            bits = bits::rotate60::<{ CW }>(bits, 1);
        }

        // Start with the "home" face and `IJK` coordinates of the base cell.
        let start = Self::from(base_cell);

        // The center base cell hierarchy is entirely on this face.
        let possible_overage = base_cell.is_pentagon()
            || (resolution != Resolution::Zero
                && start.coord != CoordIJK::new(0, 0, 0));

        let mut fijk = start.walk_directions(bits, resolution);
        if !possible_overage {
            return fijk;
        }

        // The cell may lie on an adjacent face.
        let original = fijk.coord;

        // In Class III, drop into the next finer Class II grid.
        let is_class3 = resolution.is_class3();
        let class2_res = if is_class3 {
            fijk.coord = fijk.coord.down_aperture7::<{ CW }>();
            ExtendedResolution::down(resolution)
        } else {
            resolution.into()
        };

        // A pentagon base cell with a leading 4 digit requires special
        // handling.
        let is_pent4 = base_cell.is_pentagon()
            && bits::first_axe(bits) == Direction::I.axe();

        if fijk.adjust_overage_class2::<false>(class2_res, is_pent4)
            == Overage::None
        {
            if is_class3 {
                fijk.coord = original;
            }
        } else {
            // A pentagon base cell can have secondary overages.
            if base_cell.is_pentagon() {
                while fijk.adjust_overage_class2::<false>(class2_res, false)
                    != Overage::None
                {}
            }

            if is_class3 {
                fijk.coord = fijk.coord.up_aperture7::<{ CW }>();
            }
        }

        fijk
    }
}

/// Sets the direction digits of a cell index (in place) from the finest
/// resolution up.
///
/// The `IJK` coordinates are adjusted during the traversal so that, at the
/// end, they match the `IJK` of the base cell in the coordinate system of
/// the current face.
///
/// Returns the adjusted `IJK` coordinates.
fn directions_bits_from_ijk(
    mut ijk: CoordIJK,
    bits: &mut u64,
    resolution: Resolution,
) -> CoordIJK {
    for res in Resolution::range(Resolution::One, resolution).rev() {
        let child = ijk;

        // Step up to the parent, then back down to the parent's center, and
        // read the child's slot off the difference.
        let center = if res.is_class3() {
            // Rotate CCW.
            ijk = child.up_aperture7::<{ CCW }>();
            ijk.down_aperture7::<{ CCW }>()
        } else {
            // Rotate CW.
            ijk = child.up_aperture7::<{ CW }>();
            ijk.down_aperture7::<{ CW }>()
        };

        let digit = Direction::try_from((child - center).normalize())
            .expect("unit IJK offset");
        // `res` is in `[1; resolution]`, thus valid.
        *bits = bits::set_direction(*bits, digit.into(), res);
    }

    ijk
}

/// Applies the canonical orientation of the base cell to freshly encoded
/// digits.
fn canonicalize_orientation(
    mut bits: u64,
    rotation: Rotation,
    face: Face,
) -> u64 {
    if !rotation.base_cell.is_pentagon() {
        return bits::rotate60::<{ CCW }>(bits, rotation.count.into());
    }

    // Force rotation out of the missing k-axes sub-sequence first; CW
    // offset faces rotate the other way around (default is CCW).
    if bits::first_axe(bits) == Direction::K.axe() {
        bits = if rotation.base_cell.is_cw_offset(face) {
            bits::rotate60::<{ CW }>(bits, 1)
        } else {
            bits::rotate60::<{ CCW }>(bits, 1)
        };
    }

    for _ in 0..rotation.count {
        bits = bits::pentagon_rotate60::<{ CCW }>(bits);
    }

    bits
}

// -----------------------------------------------------------------------------

/// Overage type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Overage {
    /// No overage (on the original face).
    None,
    /// On a face edge (only occurs on substrate grids).
    FaceEdge,
    /// Overage on a new face interior.
    NewFace,
}

// -----------------------------------------------------------------------------

#[allow(clippy::cast_possible_truncation)] // Masked on 3 bits.
fn adjacent_face_dir(from: Face, to: Face) -> u8 {
    ((ADJACENT_FACE_DIR[usize::from(from)] >> (usize::from(to) * 3)) & 0b111)
        as u8
}

/// Returns the endpoints, in substrate plane units, of the icosahedron edge
/// lying in the given quadrant direction.
fn face_edge(quadrant: usize, max_dim: f64) -> (Hex2d, Hex2d) {
    // The corners of the face triangle in the substrate plane.
    let v0 = Hex2d::new(3.0 * max_dim, 0.0);
    let v1 = Hex2d::new(-1.5 * max_dim, 3.0 * SQRT3_2 * max_dim);
    let v2 = Hex2d::new(-1.5 * max_dim, -3.0 * SQRT3_2 * max_dim);

    match quadrant {
        IJ => (v0, v1),
        JK => (v1, v2),
        KI => (v2, v0),
        _ => unreachable!("invalid adjacent face direction"),
    }
}

// To reduce the footprint of the lookup table, a bitset is used where the
// direction is encoded on 3 bits:
// - `000`: central face.
// - `001`: IJ quadrant.
// - `010`: KI quadrant.
// - `011`: JK quadrant.
// - `111`: invalid face.
macro_rules! face_dir {
    (central = $central:literal, IJ = $ij:literal, KI = $ki:literal, JK = $jk:literal) => {
        !(0 | (0b111 << (3 * $central))
            | (0b110 << (3 * $ij))
            | (0b101 << (3 * $ki))
            | (0b100 << (3 * $jk)))
    };
}

/// Direction from the origin face to the destination face, relative to the
/// origin face's coordinate system.
#[rustfmt::skip]
static ADJACENT_FACE_DIR: [u64; NUM_ICOSA_FACES] = [
    face_dir!(central = 0,  IJ = 4,  KI = 1,  JK = 5),  // Face  0.
    face_dir!(central = 1,  IJ = 0,  KI = 2,  JK = 6),  // Face  1.
    face_dir!(central = 2,  IJ = 1,  KI = 3,  JK = 7),  // Face  2.
    face_dir!(central = 3,  IJ = 2,  KI = 4,  JK = 8),  // Face  3.
    face_dir!(central = 4,  IJ = 3,  KI = 0,  JK = 9),  // Face  4.
    face_dir!(central = 5,  IJ = 10, KI = 14, JK = 0),  // Face  5.
    face_dir!(central = 6,  IJ = 11, KI = 10, JK = 1),  // Face  6.
    face_dir!(central = 7,  IJ = 12, KI = 11, JK = 2),  // Face  7.
    face_dir!(central = 8,  IJ = 13, KI = 12, JK = 3),  // Face  8.
    face_dir!(central = 9,  IJ = 14, KI = 13, JK = 4),  // Face  9.
    face_dir!(central = 10, IJ = 5,  KI = 6,  JK = 15), // Face 10.
    face_dir!(central = 11, IJ = 6,  KI = 7,  JK = 16), // Face 11.
    face_dir!(central = 12, IJ = 7,  KI = 8,  JK = 17), // Face 12.
    face_dir!(central = 13, IJ = 8,  KI = 9,  JK = 18), // Face 13.
    face_dir!(central = 14, IJ = 9,  KI = 5,  JK = 19), // Face 14.
    face_dir!(central = 15, IJ = 16, KI = 19, JK = 10), // Face 15.
    face_dir!(central = 16, IJ = 17, KI = 15, JK = 11), // Face 16.
    face_dir!(central = 17, IJ = 18, KI = 16, JK = 12), // Face 17.
    face_dir!(central = 18, IJ = 19, KI = 17, JK = 13), // Face 18.
    face_dir!(central = 19, IJ = 15, KI = 18, JK = 14), // Face 19.
];

// -----------------------------------------------------------------------------

/// Overage distance table, indexed by Class II resolution.
#[rustfmt::skip]
static MAX_DIM_BY_CII_RES: &[i32] = &[
    2, -1, 14, -1, 98, -1, 686, -1, 4802, -1, 33614, -1,
    235298, -1, 1647086, -1, 11529602,
];

/// Unit scale distance table, indexed by Class II resolution.
#[rustfmt::skip]
static UNIT_SCALE_BY_CII_RES: &[i32] = &[
    1, -1, 7, -1, 49, -1, 343, -1, 2401, -1, 16807, -1,
    117649, -1, 823543, -1, 5764801,
];

// -----------------------------------------------------------------------------

/// Icosahedron face centers as cartesian unit vectors.
#[rustfmt::skip]
static CENTER_POINT: [[f64; 3]; NUM_ICOSA_FACES] = [
    [ 0.2199307791404606,  0.6583691780274996,  0.7198475378926182],
    [-0.2139234834501421,  0.1478171829550703,  0.9656017935214205],
    [ 0.1092625278784797, -0.481195157287321,   0.8697775121287253],
    [ 0.7428567301586791, -0.3593941678278028,  0.5648005936517033],
    [ 0.8112534709140969,  0.3448953237639384,  0.472138773641393],
    [-0.1055498149613921,  0.9794457296411413,  0.1718874610009365],
    [-0.8075407579970092,  0.1533552485898818,  0.5695261994882688],
    [-0.2846148069787907, -0.8644080972654206,  0.4144792552473539],
    [ 0.7405621473854482, -0.6673299564565524, -0.0789837646326737],
    [ 0.8512303986474293,  0.4722343788582681, -0.2289137388687808],
    [-0.7405621473854481,  0.6673299564565524,  0.0789837646326737],
    [-0.8512303986474292, -0.4722343788582682,  0.2289137388687808],
    [ 0.1055498149613919, -0.9794457296411413, -0.1718874610009365],
    [ 0.8075407579970092, -0.1533552485898819, -0.5695261994882688],
    [ 0.2846148069787908,  0.8644080972654204, -0.4144792552473539],
    [-0.7428567301586791,  0.3593941678278027, -0.5648005936517033],
    [-0.811253470914097,  -0.3448953237639382, -0.472138773641393],
    [-0.2199307791404607, -0.6583691780274996, -0.7198475378926182],
    [ 0.213923483450142,  -0.1478171829550704, -0.9656017935214205],
    [-0.1092625278784796,  0.481195157287321,  -0.8697775121287253],
];

/// Icosahedron face centers in lat/lng radians.
#[rustfmt::skip]
pub(crate) static CENTER_GEO: [LatLng; NUM_ICOSA_FACES] = [
    LatLng::new_unchecked(0.80358264971899, 1.2483974196173961),
    LatLng::new_unchecked(1.3077478834556382, 2.5369450098779214),
    LatLng::new_unchecked(1.054751253523952, -1.3475173589003966),
    LatLng::new_unchecked(0.6001915955381868, -0.45060390946975576),
    LatLng::new_unchecked(0.49171542819877384, 0.40198820291130694),
    LatLng::new_unchecked(0.1727453274156187, 1.6781468852804338),
    LatLng::new_unchecked(0.6059293215713507, 2.9539233298124117),
    LatLng::new_unchecked(0.42737051832897965, -1.8888762003362853),
    LatLng::new_unchecked(-0.07906611854921283, -0.7334295133808677),
    LatLng::new_unchecked(-0.23096164445538364, 0.506495587332349),
    LatLng::new_unchecked(0.07906611854921283, 2.4081631402089254),
    LatLng::new_unchecked(0.23096164445538364, -2.635097066257444),
    LatLng::new_unchecked(-0.1727453274156187, -1.4634457683093596),
    LatLng::new_unchecked(-0.6059293215713507, -0.18766932377738163),
    LatLng::new_unchecked(-0.42737051832897965, 1.2527164532535078),
    LatLng::new_unchecked(-0.6001915955381868, 2.6909887441200375),
    LatLng::new_unchecked(-0.49171542819877384, -2.7396044506784865),
    LatLng::new_unchecked(-0.80358264971899, -1.8931952339723972),
    LatLng::new_unchecked(-1.3077478834556382, -0.6046476437118721),
    LatLng::new_unchecked(-1.054751253523952, 1.7940752946893965),
];

// -----------------------------------------------------------------------------

/// Information to transform into an adjacent face `IJK` system.
#[derive(Debug, Clone, Copy)]
pub struct FaceOrientIJK {
    /// Face number.
    pub face: Face,
    /// Resolution 0 translation relative to the primary face.
    pub translate: CoordIJK,
    /// Number of 60 degree CCW rotations relative to the primary face.
    pub ccw_rot60: u8,
}

// Indexes for the `NEIGHBORS` table.
/// IJ quadrant `NEIGHBORS` table direction.
const IJ: usize = 1;
/// KI quadrant `NEIGHBORS` table direction.
const KI: usize = 2;
/// JK quadrant `NEIGHBORS` table direction.
const JK: usize = 3;

macro_rules! orient {
    [$face:literal, ($i:literal, $j:literal, $k:literal), $ccw_rot60:literal] => {
        FaceOrientIJK {
            face: Face($face),
            translate: CoordIJK::new($i, $j, $k),
            ccw_rot60: $ccw_rot60,
        }
    }
}

/// Definition of which faces neighbor each other.
#[rustfmt::skip]
static NEIGHBORS: [[FaceOrientIJK; 4]; NUM_ICOSA_FACES] = [
    [
        // Face 0.
        orient!(0, (0, 0, 0), 0), // Central face.
        orient!(4, (2, 0, 2), 1), // ij quadrant.
        orient!(1, (2, 2, 0), 5), // ki quadrant.
        orient!(5, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 1.
        orient!(1, (0, 0, 0), 0), // Central face.
        orient!(0, (2, 0, 2), 1), // ij quadrant.
        orient!(2, (2, 2, 0), 5), // ki quadrant.
        orient!(6, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 2.
        orient!(2, (0, 0, 0), 0), // Central face.
        orient!(1, (2, 0, 2), 1), // ij quadrant.
        orient!(3, (2, 2, 0), 5), // ki quadrant.
        orient!(7, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 3.
        orient!(3, (0, 0, 0), 0), // Central face.
        orient!(2, (2, 0, 2), 1), // ij quadrant.
        orient!(4, (2, 2, 0), 5), // ki quadrant.
        orient!(8, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 4.
        orient!(4, (0, 0, 0), 0), // Central face.
        orient!(3, (2, 0, 2), 1), // ij quadrant.
        orient!(0, (2, 2, 0), 5), // ki quadrant.
        orient!(9, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 5.
        orient!(5,  (0, 0, 0), 0), // Central face.
        orient!(10, (2, 2, 0), 3), // ij quadrant.
        orient!(14, (2, 0, 2), 3), // ki quadrant.
        orient!(0,  (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 6.
        orient!(6,  (0, 0, 0), 0), // Central face.
        orient!(11, (2, 2, 0), 3), // ij quadrant.
        orient!(10, (2, 0, 2), 3), // ki quadrant.
        orient!(1,  (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 7.
        orient!(7,  (0, 0, 0), 0), // Central face.
        orient!(12, (2, 2, 0), 3), // ij quadrant.
        orient!(11, (2, 0, 2), 3), // ki quadrant.
        orient!(2,  (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 8.
        orient!(8,  (0, 0, 0), 0), // Central face.
        orient!(13, (2, 2, 0), 3), // ij quadrant.
        orient!(12, (2, 0, 2), 3), // ki quadrant.
        orient!(3,  (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 9.
        orient!(9,  (0, 0, 0), 0), // Central face.
        orient!(14, (2, 2, 0), 3), // ij quadrant.
        orient!(13, (2, 0, 2), 3), // ki quadrant.
        orient!(4,  (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 10.
        orient!(10, (0, 0, 0), 0), // Central face.
        orient!(5,  (2, 2, 0), 3), // ij quadrant.
        orient!(6,  (2, 0, 2), 3), // ki quadrant.
        orient!(15, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 11.
        orient!(11, (0, 0, 0), 0), // Central face.
        orient!(6,  (2, 2, 0), 3), // ij quadrant.
        orient!(7,  (2, 0, 2), 3), // ki quadrant.
        orient!(16, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 12.
        orient!(12, (0, 0, 0), 0), // Central face.
        orient!(7,  (2, 2, 0), 3), // ij quadrant.
        orient!(8,  (2, 0, 2), 3), // ki quadrant.
        orient!(17, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 13.
        orient!(13, (0, 0, 0), 0), // Central face.
        orient!(8,  (2, 2, 0), 3), // ij quadrant.
        orient!(9,  (2, 0, 2), 3), // ki quadrant.
        orient!(18, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 14.
        orient!(14, (0, 0, 0), 0), // Central face.
        orient!(9,  (2, 2, 0), 3), // ij quadrant.
        orient!(5,  (2, 0, 2), 3), // ki quadrant.
        orient!(19, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 15.
        orient!(15, (0, 0, 0), 0), // Central face.
        orient!(16, (2, 0, 2), 1), // ij quadrant.
        orient!(19, (2, 2, 0), 5), // ki quadrant.
        orient!(10, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 16.
        orient!(16, (0, 0, 0), 0), // Central face.
        orient!(17, (2, 0, 2), 1), // ij quadrant.
        orient!(15, (2, 2, 0), 5), // ki quadrant.
        orient!(11, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 17.
        orient!(17, (0, 0, 0), 0), // Central face.
        orient!(18, (2, 0, 2), 1), // ij quadrant.
        orient!(16, (2, 2, 0), 5), // ki quadrant.
        orient!(12, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 18.
        orient!(18, (0, 0, 0), 0), // Central face.
        orient!(19, (2, 0, 2), 1), // ij quadrant.
        orient!(17, (2, 2, 0), 5), // ki quadrant.
        orient!(13, (0, 2, 2), 3), // jk quadrant.
    ], [
        // Face 19.
        orient!(19, (0, 0, 0), 0), // Central face.
        orient!(15, (2, 0, 2), 1), // ij quadrant.
        orient!(18, (2, 2, 0), 5), // ki quadrant.
        orient!(14, (0, 2, 2), 3), // jk quadrant.
    ],
];

// -----------------------------------------------------------------------------

/// Base cell and its associated number of 60° CCW rotations.
#[derive(Clone, Copy)]
pub struct Rotation {
    /// Base cell.
    pub base_cell: BaseCell,
    /// Number of 60° CCW rotations.
    pub count: u8,
}

// Saves some typing when declaring base cell rotations.
macro_rules! rot {
    ($base_cell:literal, $rotation:literal) => {
        Rotation {
            base_cell: BaseCell::new_unchecked($base_cell),
            count: $rotation,
        }
    };
}

/// Resolution 0 base cell lookup table for each face.
#[rustfmt::skip]
const FACE_IJK_BASE_CELLS: [[[[Rotation; 3]; 3]; 3]; NUM_ICOSA_FACES] = [
    [
        [
            [rot!(16, 0), rot!(18, 0), rot!(24, 0)],
            [rot!(33, 0), rot!(30, 0), rot!(32, 3)],
            [rot!(49, 1), rot!(48, 3), rot!(50, 3)],
        ], [
            [rot!(8,  0), rot!(5,  5), rot!(10, 5)],
            [rot!(22, 0), rot!(16, 0), rot!(18, 0)],
            [rot!(41, 1), rot!(33, 0), rot!(30, 0)],
        ], [
            [rot!(4,  0), rot!(0,  5), rot!(2,  5)],
            [rot!(15, 1), rot!(8,  0), rot!(5,  5)],
            [rot!(31, 1), rot!(22, 0), rot!(16, 0)],
        ],
    ], [
        [
            [rot!(2,  0), rot!(6,  0), rot!(14, 0)],
            [rot!(10, 0), rot!(11, 0), rot!(17, 3)],
            [rot!(24, 1), rot!(23, 3), rot!(25, 3)],
        ], [
            [rot!(0,  0), rot!(1,  5), rot!(9,  5)],
            [rot!(5,  0), rot!(2,  0), rot!(6,  0)],
            [rot!(18, 1), rot!(10, 0), rot!(11, 0)],
        ], [
            [rot!(4,  1), rot!(3, 5), rot!(7, 5)],
            [rot!(8,  1), rot!(0, 0), rot!(1, 5)],
            [rot!(16, 1), rot!(5, 0), rot!(2, 0)],
        ],
    ], [
        [
            [rot!(7,  0), rot!(21, 0), rot!(38, 0)],
            [rot!(9,  0), rot!(19, 0), rot!(34, 3)],
            [rot!(14, 1), rot!(20, 3), rot!(36, 3)],
        ], [
            [rot!(3, 0), rot!(13, 5), rot!(29, 5)],
            [rot!(1, 0), rot!(7,  0), rot!(21, 0)],
            [rot!(6, 1), rot!(9,  0), rot!(19, 0)],
        ], [
            [rot!(4, 2), rot!(12, 5), rot!(26, 5)],
            [rot!(0, 1), rot!(3,  0), rot!(13, 5)],
            [rot!(2, 1), rot!(1,  0), rot!(7,  0)],
        ],
    ], [
        [
            [rot!(26, 0), rot!(42, 0), rot!(58, 0)],
            [rot!(29, 0), rot!(43, 0), rot!(62, 3)],
            [rot!(38, 1), rot!(47, 3), rot!(64, 3)],
        ], [
            [rot!(12, 0), rot!(28, 5), rot!(44, 5)],
            [rot!(13, 0), rot!(26, 0), rot!(42, 0)],
            [rot!(21, 1), rot!(29, 0), rot!(43, 0)],
        ], [
            [rot!(4, 3), rot!(15, 5), rot!(31, 5)],
            [rot!(3, 1), rot!(12, 0), rot!(28, 5)],
            [rot!(7, 1), rot!(13, 0), rot!(26, 0)],
        ],
    ], [
        [
            [rot!(31, 0), rot!(41, 0), rot!(49, 0)],
            [rot!(44, 0), rot!(53, 0), rot!(61, 3)],
            [rot!(58, 1), rot!(65, 3), rot!(75, 3)],
        ], [
            [rot!(15, 0), rot!(22, 5), rot!(33, 5)],
            [rot!(28, 0), rot!(31, 0), rot!(41, 0)],
            [rot!(42, 1), rot!(44, 0), rot!(53, 0)],
        ], [
            [rot!(4,  4), rot!(8,  5), rot!(16, 5)],
            [rot!(12, 1), rot!(15, 0), rot!(22, 5)],
            [rot!(26, 1), rot!(28, 0), rot!(31, 0)],
        ],
    ], [
        [
            [rot!(50, 0), rot!(48, 0), rot!(49, 3)],
            [rot!(32, 0), rot!(30, 3), rot!(33, 3)],
            [rot!(24, 3), rot!(18, 3), rot!(16, 3)],
        ], [
            [rot!(70, 0), rot!(67, 0), rot!(66, 3)],
            [rot!(52, 3), rot!(50, 0), rot!(48, 0)],
            [rot!(37, 3), rot!(32, 0), rot!(30, 3)],
        ], [
            [rot!(83, 0), rot!(87, 3), rot!(85, 3)],
            [rot!(74, 3), rot!(70, 0), rot!(67, 0)],
            [rot!(57, 1), rot!(52, 3), rot!(50, 0)],
        ],
    ], [
        [
            [rot!(25, 0), rot!(23, 0), rot!(24, 3)],
            [rot!(17, 0), rot!(11, 3), rot!(10, 3)],
            [rot!(14, 3), rot!(6,  3), rot!(2,  3)],
        ], [
            [rot!(45, 0), rot!(39, 0), rot!(37, 3)],
            [rot!(35, 3), rot!(25, 0), rot!(23, 0)],
            [rot!(27, 3), rot!(17, 0), rot!(11, 3)],
        ], [
            [rot!(63, 0), rot!(59, 3), rot!(57, 3)],
            [rot!(56, 3), rot!(45, 0), rot!(39, 0)],
            [rot!(46, 3), rot!(35, 3), rot!(25, 0)],
        ],
    ], [
        [
            [rot!(36, 0), rot!(20, 0), rot!(14, 3)],
            [rot!(34, 0), rot!(19, 3), rot!(9,  3)],
            [rot!(38, 3), rot!(21, 3), rot!(7,  3)],
        ], [
            [rot!(55, 0), rot!(40, 0), rot!(27, 3)],
            [rot!(54, 3), rot!(36, 0), rot!(20, 0)],
            [rot!(51, 3), rot!(34, 0), rot!(19, 3)],
        ], [
            [rot!(72, 0), rot!(60, 3), rot!(46, 3)],
            [rot!(73, 3), rot!(55, 0), rot!(40, 0)],
            [rot!(71, 3), rot!(54, 3), rot!(36, 0)],
        ],
    ], [
        [
            [rot!(64, 0), rot!(47, 0), rot!(38, 3)],
            [rot!(62, 0), rot!(43, 3), rot!(29, 3)],
            [rot!(58, 3), rot!(42, 3), rot!(26, 3)],
        ], [
            [rot!(84, 0), rot!(69, 0), rot!(51, 3)],
            [rot!(82, 3), rot!(64, 0), rot!(47, 0)],
            [rot!(76, 3), rot!(62, 0), rot!(43, 3)],
        ], [
            [rot!(97, 0), rot!(89, 3), rot!(71, 3)],
            [rot!(98, 3), rot!(84, 0), rot!(69, 0)],
            [rot!(96, 3), rot!(82, 3), rot!(64, 0)],
        ],
    ], [
        [
            [rot!(75, 0), rot!(65, 0), rot!(58, 3)],
            [rot!(61, 0), rot!(53, 3), rot!(44, 3)],
            [rot!(49, 3), rot!(41, 3), rot!(31, 3)],
        ], [
            [rot!(94, 0), rot!(86, 0), rot!(76, 3)],
            [rot!(81, 3), rot!(75, 0), rot!(65, 0)],
            [rot!(66, 3), rot!(61, 0), rot!(53, 3)],
        ], [
            [rot!(107, 0), rot!(104, 3), rot!(96, 3)],
            [rot!(101, 3), rot!(94,  0), rot!(86, 0)],
            [rot!(85,  3), rot!(81,  3), rot!(75, 0)],
        ],
    ], [
        [
            [rot!(57, 0), rot!(59, 0), rot!(63, 3)],
            [rot!(74, 0), rot!(78, 3), rot!(79, 3)],
            [rot!(83, 3), rot!(92, 3), rot!(95, 3)],
        ], [
            [rot!(37, 0), rot!(39, 3), rot!(45, 3)],
            [rot!(52, 0), rot!(57, 0), rot!(59, 0)],
            [rot!(70, 3), rot!(74, 0), rot!(78, 3)],
        ], [
            [rot!(24, 0), rot!(23, 3), rot!(25, 3)],
            [rot!(32, 3), rot!(37, 0), rot!(39, 3)],
            [rot!(50, 3), rot!(52, 0), rot!(57, 0)],
        ],
    ], [
        [
            [rot!(46, 0), rot!(60, 0), rot!(72, 3)],
            [rot!(56, 0), rot!(68, 3), rot!(80, 3)],
            [rot!(63, 3), rot!(77, 3), rot!(90, 3)],
        ], [
            [rot!(27, 0), rot!(40, 3), rot!(55, 3)],
            [rot!(35, 0), rot!(46, 0), rot!(60, 0)],
            [rot!(45, 3), rot!(56, 0), rot!(68, 3)],
        ], [
            [rot!(14, 0), rot!(20, 3), rot!(36, 3)],
            [rot!(17, 3), rot!(27, 0), rot!(40, 3)],
            [rot!(25, 3), rot!(35, 0), rot!(46, 0)],
        ],
    ], [
        [
            [rot!(71, 0), rot!(89, 0), rot!(97,  3)],
            [rot!(73, 0), rot!(91, 3), rot!(103, 3)],
            [rot!(72, 3), rot!(88, 3), rot!(105, 3)],
        ], [
            [rot!(51, 0), rot!(69, 3), rot!(84, 3)],
            [rot!(54, 0), rot!(71, 0), rot!(89, 0)],
            [rot!(55, 3), rot!(73, 0), rot!(91, 3)],
        ], [
            [rot!(38, 0), rot!(47, 3), rot!(64, 3)],
            [rot!(34, 3), rot!(51, 0), rot!(69, 3)],
            [rot!(36, 3), rot!(54, 0), rot!(71, 0)],
        ],
    ], [
        [
            [rot!(96, 0), rot!(104, 0), rot!(107, 3)],
            [rot!(98, 0), rot!(110, 3), rot!(115, 3)],
            [rot!(97, 3), rot!(111, 3), rot!(119, 3)],
        ], [
            [rot!(76, 0), rot!(86, 3), rot!(94,  3)],
            [rot!(82, 0), rot!(96, 0), rot!(104, 0)],
            [rot!(84, 3), rot!(98, 0), rot!(110, 3)],
        ], [
            [rot!(58, 0), rot!(65, 3), rot!(75, 3)],
            [rot!(62, 3), rot!(76, 0), rot!(86, 3)],
            [rot!(64, 3), rot!(82, 0), rot!(96, 0)],
        ],
    ], [
        [
            [rot!(85,  0), rot!(87,  0), rot!(83,  3)],
            [rot!(101, 0), rot!(102, 3), rot!(100, 3)],
            [rot!(107, 3), rot!(112, 3), rot!(114, 3)],
        ], [
            [rot!(66, 0), rot!(67,  3), rot!(70,  3)],
            [rot!(81, 0), rot!(85,  0), rot!(87,  0)],
            [rot!(94, 3), rot!(101, 0), rot!(102, 3)],
        ], [
            [rot!(49, 0), rot!(48, 3), rot!(50, 3)],
            [rot!(61, 3), rot!(66, 0), rot!(67, 3)],
            [rot!(75, 3), rot!(81, 0), rot!(85, 0)],
        ],
    ], [
        [
            [rot!(95, 0), rot!(92, 0), rot!(83, 0)],
            [rot!(79, 0), rot!(78, 0), rot!(74, 3)],
            [rot!(63, 1), rot!(59, 3), rot!(57, 3)],
        ], [
            [rot!(109, 0), rot!(108, 0), rot!(100, 5)],
            [rot!(93,  1), rot!(95,  0), rot!(92,  0)],
            [rot!(77,  1), rot!(79,  0), rot!(78,  0)],
        ], [
            [rot!(117, 4), rot!(118, 5), rot!(114, 5)],
            [rot!(106, 1), rot!(109, 0), rot!(108, 0)],
            [rot!(90,  1), rot!(93,  1), rot!(95,  0)],
        ],
    ], [
        [
            [rot!(90, 0), rot!(77, 0), rot!(63, 0)],
            [rot!(80, 0), rot!(68, 0), rot!(56, 3)],
            [rot!(72, 1), rot!(60, 3), rot!(46, 3)],
        ], [
            [rot!(106, 0), rot!(93, 0), rot!(79, 5)],
            [rot!(99,  1), rot!(90, 0), rot!(77, 0)],
            [rot!(88,  1), rot!(80, 0), rot!(68, 0)],
        ], [
            [rot!(117, 3), rot!(109, 5), rot!(95, 5)],
            [rot!(113, 1), rot!(106, 0), rot!(93, 0)],
            [rot!(105, 1), rot!(99,  1), rot!(90, 0)],
        ],
    ], [
        [
            [rot!(105, 0), rot!(88, 0), rot!(72, 0)],
            [rot!(103, 0), rot!(91, 0), rot!(73, 3)],
            [rot!(97,  1), rot!(89, 3), rot!(71, 3)],
        ], [
            [rot!(113, 0), rot!(99,  0), rot!(80, 5)],
            [rot!(116, 1), rot!(105, 0), rot!(88, 0)],
            [rot!(111, 1), rot!(103, 0), rot!(91, 0)],
        ], [
            [rot!(117, 2), rot!(106, 5), rot!(90, 5)],
            [rot!(121, 1), rot!(113, 0), rot!(99, 0)],
            [rot!(119, 1), rot!(116, 1), rot!(105, 0)],
        ],
    ], [
        [
            [rot!(119, 0), rot!(111, 0), rot!(97, 0)],
            [rot!(115, 0), rot!(110, 0), rot!(98, 3)],
            [rot!(107, 1), rot!(104, 3), rot!(96, 3)],
        ], [
            [rot!(121, 0), rot!(116, 0), rot!(103, 5)],
            [rot!(120, 1), rot!(119, 0), rot!(111, 0)],
            [rot!(112, 1), rot!(115, 0), rot!(110, 0)],
        ], [
            [rot!(117, 1), rot!(113, 5), rot!(105, 5)],
            [rot!(118, 1), rot!(121, 0), rot!(116, 0)],
            [rot!(114, 1), rot!(120, 1), rot!(119, 0)],
        ],
    ], [
        [
            [rot!(114, 0), rot!(112, 0), rot!(107, 0)],
            [rot!(100, 0), rot!(102, 0), rot!(101, 3)],
            [rot!(83,  1), rot!(87,  3), rot!(85,  3)],
        ], [
            [rot!(118, 0), rot!(120, 0), rot!(115, 5)],
            [rot!(108, 1), rot!(114, 0), rot!(112, 0)],
            [rot!(92,  1), rot!(100, 0), rot!(102, 0)],
        ], [
            [rot!(117, 0), rot!(121, 5), rot!(119, 5)],
            [rot!(109, 1), rot!(118, 0), rot!(120, 0)],
            [rot!(95,  1), rot!(108, 1), rot!(114, 0)],
        ],
    ],
];

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn nearest_face_of_centers() {
        // A face center is nearest to itself.
        for (i, center) in CENTER_GEO.iter().enumerate() {
            let (face, sqd) = nearest_face(*center);

            assert_eq!(usize::from(face), i, "face {i} center");
            assert_float_eq!(sqd, 0., abs <= 1e-12, "distance to center");
        }
    }

    #[test]
    fn projection_roundtrip() {
        let ll = LatLng::new(43.6, 1.44).expect("coordinate");

        for resolution in
            Resolution::range(Resolution::Zero, Resolution::Five)
        {
            let (face, sqd) = nearest_face(ll);
            let point = project(ll, resolution, face, sqd);
            let back = unproject(point, face, resolution.into(), false);

            assert_eq!(ll, back, "roundtrip at {resolution}");
        }
    }
}
