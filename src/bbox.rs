use crate::{math, Boundary, LatLng, TWO_PI};
use core::{f64::consts::PI, fmt};

/// Geographic bounding box: latitudes north/south, longitudes east/west, all
/// in radians.
///
/// A box whose east edge is smaller than its west edge crosses the
/// antimeridian.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BBox {
    /// North latitude, in radians.
    pub north: f64,
    /// South latitude, in radians.
    pub south: f64,
    /// East longitude, in radians.
    pub east: f64,
    /// West longitude, in radians.
    pub west: f64,
}

impl BBox {
    /// Computes the bounding box of a closed ring of spherical coordinates.
    ///
    /// An arc spanning more than 180 degrees of longitude flags the ring as
    /// transmeridian, in which case east and west are swapped so that the
    /// box wraps around the antimeridian.
    #[must_use]
    pub fn from_ring(ring: &[LatLng]) -> Self {
        if ring.is_empty() {
            return Self::default();
        }

        let mut bbox = Self {
            north: f64::MIN,
            south: f64::MAX,
            east: f64::MIN,
            west: f64::MAX,
        };
        let mut is_transmeridian = false;

        for (i, coord) in ring.iter().enumerate() {
            let next = ring[(i + 1) % ring.len()];
            let (lat, lng) = (coord.lat_radians(), coord.lng_radians());

            bbox.south = bbox.south.min(lat);
            bbox.west = bbox.west.min(lng);
            bbox.north = bbox.north.max(lat);
            bbox.east = bbox.east.max(lng);
            // Arcs over 180 degrees longitude cross the antimeridian.
            is_transmeridian |= math::abs(lng - next.lng_radians()) > PI;
        }

        if is_transmeridian {
            core::mem::swap(&mut bbox.east, &mut bbox.west);
        }

        bbox
    }

    /// Returns whether the box crosses the antimeridian.
    #[must_use]
    pub fn is_transmeridian(&self) -> bool {
        self.east < self.west
    }

    /// Returns the center of the box.
    #[must_use]
    pub fn center(&self) -> LatLng {
        let lat = (self.north + self.south) / 2.;
        // If the box crosses the antimeridian, shift east 360 degrees.
        let east = if self.is_transmeridian() {
            self.east + TWO_PI
        } else {
            self.east
        };
        let mut lng = (east + self.west) / 2.;
        while lng > PI {
            lng -= TWO_PI;
        }
        while lng < -PI {
            lng += TWO_PI;
        }

        LatLng::new_unchecked(lat, lng)
    }

    /// Returns whether the box contains the given point.
    #[must_use]
    pub fn contains(&self, point: &LatLng) -> bool {
        let (lat, lng) = (point.lat_radians(), point.lng_radians());

        lat >= self.south
            && lat <= self.north
            && if self.is_transmeridian() {
                lng >= self.west || lng <= self.east
            } else {
                lng >= self.west && lng <= self.east
            }
    }
}

impl From<&Boundary> for BBox {
    // Bounding box of a cell boundary.
    fn from(value: &Boundary) -> Self {
        Self::from_ring(value)
    }
}

impl fmt::Display for BBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[n={:.10}, s={:.10}, e={:.10}, w={:.10}]",
            self.north, self.south, self.east, self.west
        )
    }
}
