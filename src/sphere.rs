//! Spherical coordinates and spherical geometry primitives.

use crate::{error::InvalidLatLng, icosa, math, CellIndex, Resolution, TWO_PI};
use core::{
    f64::consts::{FRAC_PI_2, PI},
    fmt,
    ops::Deref,
};
use float_eq::float_eq;

/// Epsilon of ~0.1mm in degrees.
const EPSILON_DEG: f64 = 0.000000001;

/// Same as `EPSILON_DEG`, but in radians.
const EPSILON_RAD: f64 = EPSILON_DEG * PI / 180.0;

/// Threshold under which a spherical distance is treated as zero.
pub(crate) const EPSILON: f64 = 0.0000000000000001_f64;

// -----------------------------------------------------------------------------

/// Normalizes radians to a value between 0 and 2π.
pub(crate) fn to_positive_angle(mut angle: f64) -> f64 {
    if angle < 0. {
        angle += TWO_PI;
    } else if angle >= TWO_PI {
        angle -= TWO_PI;
    }
    debug_assert!((0.0..=TWO_PI).contains(&angle), "{angle}");

    angle
}

/// Area of the spherical triangle `ABC`, in radians², via l'Huilier's
/// theorem on the spherical excess.
pub(crate) fn triangle_area(a: &LatLng, b: &LatLng, c: &LatLng) -> f64 {
    let ab = a.distance_rads(*b);
    let bc = b.distance_rads(*c);
    let ca = c.distance_rads(*a);
    let s = (ab + bc + ca) / 2.;

    let excess = math::atan(math::sqrt(
        math::tan(s / 2.)
            * math::tan((s - ab) / 2.)
            * math::tan((s - bc) / 2.)
            * math::tan((s - ca) / 2.),
    ));

    4. * excess
}

// -----------------------------------------------------------------------------

/// Latitude/longitude.
///
/// Note that the `Display` impl prints the values as degrees (10 decimals at
/// most), while the `Debug` impl prints both degrees and radians.
#[derive(Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    /// Latitude, in radians.
    lat: f64,
    /// Longitude, in radians.
    lng: f64,
}

impl LatLng {
    /// Initializes a new coordinate from degrees.
    ///
    /// # Errors
    ///
    /// [`InvalidLatLng`] when one (or both) components is not a finite
    /// number.
    ///
    /// # Example
    ///
    /// ```
    /// let ll = hexatile::LatLng::new(48.864716, 2.349014)?;
    ///
    /// assert!(hexatile::LatLng::new(f64::NAN, 10.).is_err());
    /// # Ok::<(), hexatile::error::InvalidLatLng>(())
    /// ```
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidLatLng> {
        Self::from_radians(lat.to_radians(), lng.to_radians())
    }

    /// Initializes a new coordinate from radians.
    ///
    /// # Errors
    ///
    /// [`InvalidLatLng`] when one (or both) components is not a finite
    /// number.
    pub fn from_radians(lat: f64, lng: f64) -> Result<Self, InvalidLatLng> {
        if !lat.is_finite() {
            return Err(InvalidLatLng::new(lat, "infinite latitude"));
        }
        if !lng.is_finite() {
            return Err(InvalidLatLng::new(lng, "infinite longitude"));
        }

        Ok(Self { lat, lng })
    }

    /// Latitude, in degrees.
    #[must_use]
    pub fn lat(self) -> f64 {
        self.lat.to_degrees()
    }

    /// Longitude, in degrees.
    #[must_use]
    pub fn lng(self) -> f64 {
        self.lng.to_degrees()
    }

    /// Latitude, in radians.
    #[must_use]
    pub const fn lat_radians(self) -> f64 {
        self.lat
    }

    /// Longitude, in radians.
    #[must_use]
    pub const fn lng_radians(self) -> f64 {
        self.lng
    }

    /// The great circle distance, in radians, between two spherical
    /// coordinates, computed with the Haversine formula.
    ///
    /// See: <https://en.wikipedia.org/wiki/Haversine_formula>
    #[must_use]
    pub fn distance_rads(self, other: Self) -> f64 {
        let sin_lat = math::sin((other.lat - self.lat) / 2.);
        let sin_lng = math::sin((other.lng - self.lng) / 2.);

        let a = sin_lat * sin_lat
            + math::cos(self.lat) * math::cos(other.lat) * sin_lng * sin_lng;

        2. * math::atan2(math::sqrt(a), math::sqrt(1. - a))
    }

    /// The great circle distance, in kilometers, between two spherical
    /// coordinates.
    #[must_use]
    pub fn distance_km(self, other: Self) -> f64 {
        self.distance_rads(other) * crate::EARTH_RADIUS_KM
    }

    /// The great circle distance, in meters, between two spherical
    /// coordinates.
    #[must_use]
    pub fn distance_m(self, other: Self) -> f64 {
        self.distance_km(other) * 1000.
    }

    /// Indexes the location at the specified resolution, returning the
    /// index of the cell containing the location.
    ///
    /// # Example
    ///
    /// ```
    /// let ll = hexatile::LatLng::new(48.864716, 2.349014)?;
    /// let cell = ll.to_cell(hexatile::Resolution::Five);
    /// # Ok::<(), hexatile::error::InvalidLatLng>(())
    /// ```
    #[must_use]
    pub fn to_cell(self, resolution: Resolution) -> CellIndex {
        icosa::geo_to_face_ijk(self, resolution).to_cell(resolution)
    }

    /// The position on the unit sphere, as a cartesian vector.
    pub(crate) fn unit_vector(self) -> [f64; 3] {
        let r = math::cos(self.lat);

        [
            math::cos(self.lng) * r,
            math::sin(self.lng) * r,
            math::sin(self.lat),
        ]
    }

    /// Computes the azimuth to `other` from `self`, in radians.
    #[must_use]
    pub(crate) fn azimuth(self, other: &Self) -> f64 {
        let delta = other.lng - self.lng;

        math::atan2(
            math::cos(other.lat) * math::sin(delta),
            math::cos(self.lat) * math::sin(other.lat)
                - math::sin(self.lat)
                    * math::cos(other.lat)
                    * math::cos(delta),
        )
    }

    /// Computes the point on the sphere at the specified azimuth and
    /// distance from `self`.
    #[must_use]
    pub(crate) fn coord_at(self, azimuth: f64, distance: f64) -> Self {
        if distance < EPSILON {
            return self;
        }
        let azimuth = to_positive_angle(azimuth);

        // Along a meridian the latitude moves and the longitude doesn't;
        // anywhere else, solve the spherical triangle.
        let due_north = float_eq!(azimuth, 0.0, abs <= EPSILON);
        let due_south = float_eq!(azimuth, PI, abs <= EPSILON);

        let (sin_lat, cos_lat) = (math::sin(self.lat), math::cos(self.lat));
        let (sin_dist, cos_dist) = (math::sin(distance), math::cos(distance));

        let lat = if due_north {
            self.lat + distance
        } else if due_south {
            self.lat - distance
        } else {
            math::asin(
                (sin_lat * cos_dist
                    + cos_lat * sin_dist * math::cos(azimuth))
                .clamp(-1., 1.),
            )
        };

        // The poles swallow the longitude.
        if float_eq!(lat, FRAC_PI_2, abs <= EPSILON) {
            return Self::new_unchecked(FRAC_PI_2, 0.0); // North pole.
        } else if float_eq!(lat, -FRAC_PI_2, abs <= EPSILON) {
            return Self::new_unchecked(-FRAC_PI_2, 0.0); // South pole.
        }

        let mut lng = if due_north || due_south {
            self.lng
        } else {
            let sin_lng = (math::sin(azimuth) * sin_dist / math::cos(lat))
                .clamp(-1., 1.);
            let cos_lng = (cos_dist - sin_lat * math::sin(lat))
                / cos_lat
                / math::cos(lat);
            self.lng + math::atan2(sin_lng, cos_lng)
        };

        // Bring the longitude back into the proper bounds.
        while lng > PI {
            lng -= TWO_PI;
        }
        while lng < -PI {
            lng += TWO_PI;
        }

        Self::new_unchecked(lat, lng)
    }

    /// Initializes a new coordinate with the specified, possibly invalid,
    /// values.
    ///
    /// # Safety
    ///
    /// The values must be finite numbers.
    #[must_use]
    pub(crate) const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl PartialEq for LatLng {
    fn eq(&self, other: &Self) -> bool {
        float_eq!(self.lat, other.lat, abs <= EPSILON_RAD)
            && float_eq!(self.lng, other.lng, abs <= EPSILON_RAD)
    }
}

impl Eq for LatLng {}

impl From<CellIndex> for LatLng {
    /// Returns the center of the cell.
    fn from(value: CellIndex) -> Self {
        let resolution = value.resolution();
        icosa::FaceIJK::from(value).to_latlng(resolution)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // For display purpose, 10 decimals are more than enough.
        // See https://gis.stackexchange.com/a/8674
        write!(f, "({:.10}, {:.10})", self.lat(), self.lng())
    }
}

impl fmt::Debug for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatLng")
            .field("lat_rad", &self.lat)
            .field("lat_deg", &self.lat())
            .field("lng_rad", &self.lng)
            .field("lng_deg", &self.lng())
            .finish()
    }
}

// -----------------------------------------------------------------------------

/// Cell boundary in latitude/longitude, in CCW order.
///
/// A boundary may hold more points than the cell's topological vertex
/// count: Class III cell edges cross icosahedron edges, and the crossing
/// points are part of the boundary. The worst case is a pentagon, with 5
/// vertices and up to 5 crossings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Boundary(Vec<LatLng>);

impl Boundary {
    /// Initializes a new empty cell boundary.
    pub(crate) fn new() -> Self {
        Self(Vec::with_capacity(10))
    }

    /// Appends a point to the boundary.
    pub(crate) fn push(&mut self, ll: LatLng) {
        self.0.push(ll);
    }
}

impl Deref for Boundary {
    type Target = [LatLng];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}]",
            self.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("-")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn from_degrees() {
        let ll = LatLng::new(48.864716, 2.349014).expect("coordinate");

        assert_float_eq!(ll.lat(), 48.864716, abs <= 1e-12, "lat");
        assert_float_eq!(ll.lng(), 2.349014, abs <= 1e-12, "lng");
        assert_float_eq!(
            ll.lat_radians(),
            0.8528501822519535,
            abs <= 1e-15,
            "lat in radians"
        );
        assert_float_eq!(
            ll.lng_radians(),
            0.04099802847544208,
            abs <= 1e-15,
            "lng in radians"
        );
    }

    #[test]
    fn rejects_non_finite() {
        assert!(LatLng::new(f64::NAN, 10.).is_err(), "NaN latitude");
        assert!(
            LatLng::new(10., f64::INFINITY).is_err(),
            "infinite longitude"
        );
        assert!(LatLng::from_radians(f64::NEG_INFINITY, 0.).is_err());
    }

    #[test]
    fn distance() {
        let paris = LatLng::new(48.864716, 2.349014).expect("paris");
        let shanghai = LatLng::new(31.224361, 121.469170).expect("shanghai");

        assert_float_eq!(
            paris.distance_rads(shanghai),
            1.453859220532047,
            abs <= 1e-12,
            "distance in radians"
        );
        assert_float_eq!(
            paris.distance_km(shanghai),
            9262.547534054209,
            abs <= 1e-6,
            "distance in kilometers"
        );
        assert_float_eq!(
            paris.distance_rads(shanghai),
            shanghai.distance_rads(paris),
            abs <= f64::EPSILON,
            "distance is symmetric"
        );
        assert_float_eq!(
            paris.distance_rads(paris),
            0.,
            abs <= f64::EPSILON,
            "distance to self is 0"
        );
    }

    #[test]
    fn azimuth() {
        let origin = LatLng::new(0., 0.).expect("origin");
        let north = LatLng::new(10., 0.).expect("north");
        let east = LatLng::new(0., 10.).expect("east");

        assert_float_eq!(
            origin.azimuth(&north),
            0.,
            abs <= 1e-12,
            "due north azimuth is 0"
        );
        assert_float_eq!(
            origin.azimuth(&east),
            FRAC_PI_2,
            abs <= 1e-12,
            "due east azimuth is π/2"
        );
    }

    #[test]
    fn coord_at_roundtrip() {
        let origin = LatLng::new(12.5, 42.42).expect("origin");
        let azimuth = 1.234;
        let distance = 0.05;

        let dest = origin.coord_at(azimuth, distance);

        assert_float_eq!(
            origin.distance_rads(dest),
            distance,
            abs <= 1e-12,
            "distance is preserved"
        );
        assert_float_eq!(
            to_positive_angle(origin.azimuth(&dest)),
            azimuth,
            abs <= 1e-9,
            "azimuth is preserved"
        );
    }

    #[test]
    fn equality_threshold() {
        let ll = LatLng::new(48.864716, 2.349014).expect("coordinate");
        let almost = LatLng::from_radians(
            ll.lat_radians() + 1e-13,
            ll.lng_radians() - 1e-13,
        )
        .expect("coordinate");
        let other = LatLng::new(48.9, 2.349014).expect("coordinate");

        assert_eq!(ll, almost, "within epsilon");
        assert_ne!(ll, other, "beyond epsilon");
    }

    #[test]
    fn to_cell() {
        let ll = LatLng::new(37.3615593, -122.0553238).expect("coordinate");
        let cell = ll.to_cell(Resolution::Five);

        assert_eq!(u64::from(cell), 0x85283473fffffff);
    }

    #[test]
    fn triangle() {
        // An octant of the sphere: three right angles, area π/2.
        let a = LatLng::new(0., 0.).expect("a");
        let b = LatLng::new(0., 90.).expect("b");
        let c = LatLng::new(90., 0.).expect("c");

        assert_float_eq!(
            triangle_area(&a, &b, &c),
            FRAC_PI_2,
            abs <= 1e-9,
            "octant area"
        );

        // A degenerate triangle has no area.
        assert_float_eq!(
            triangle_area(&a, &a, &b),
            0.,
            abs <= 1e-12,
            "degenerate triangle"
        );
    }
}
