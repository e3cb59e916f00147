//! The ellipsoidal projection capability behind the UTM/UPS conversions.
//!
//! The zone and range bookkeeping in [`crate::utmups`] treats the
//! projection math as a swappable collaborator: anything implementing
//! [`EllipsoidProjection`] can be supplied to
//! [`crate::UtmUps::forward_with`] and [`crate::UtmUps::reverse_with`]. The
//! default is a WGS84 [`Wgs84Projection`], built once on first use.

use lazy_static::lazy_static;

pub(crate) mod polar_stereographic;
pub(crate) mod transverse_mercator;

use polar_stereographic::PolarStereographic;
use transverse_mercator::TransverseMercator;

/// Raw planar projection output, before false origins are applied.
#[derive(Clone, Copy, Debug)]
pub struct RawProjected {
    pub x: f64,
    pub y: f64,
    /// Meridian convergence at the point, degrees.
    pub convergence: f64,
    /// Point scale factor.
    pub scale: f64,
}

/// Raw geographic output of an inverse projection.
#[derive(Clone, Copy, Debug)]
pub struct RawGeographic {
    pub latitude: f64,
    pub longitude: f64,
    /// Meridian convergence at the point, degrees.
    pub convergence: f64,
    /// Point scale factor.
    pub scale: f64,
}

/// Maps geographic coordinates on an ellipsoid to planar coordinates plus
/// convergence and scale, and back, for a given central meridian
/// (transverse Mercator) or pole (polar stereographic).
pub trait EllipsoidProjection {
    /// Transverse Mercator projection about the central meridian `lon0`.
    fn tm_forward(&self, lon0: f64, lat: f64, lon: f64) -> RawProjected;

    /// Inverse transverse Mercator about the central meridian `lon0`.
    fn tm_reverse(&self, lon0: f64, x: f64, y: f64) -> RawGeographic;

    /// Polar stereographic projection about the north or south pole.
    fn ps_forward(&self, northp: bool, lat: f64, lon: f64) -> RawProjected;

    /// Inverse polar stereographic about the north or south pole.
    fn ps_reverse(&self, northp: bool, x: f64, y: f64) -> RawGeographic;
}

/// The standard WGS84 projections with the UTM/UPS central scale factors.
pub struct Wgs84Projection {
    tm: TransverseMercator,
    ps: PolarStereographic,
}

impl Wgs84Projection {
    pub fn new() -> Wgs84Projection {
        Self {
            tm: TransverseMercator::utm(),
            ps: PolarStereographic::ups(),
        }
    }
}

impl Default for Wgs84Projection {
    fn default() -> Self {
        Self::new()
    }
}

impl EllipsoidProjection for Wgs84Projection {
    fn tm_forward(&self, lon0: f64, lat: f64, lon: f64) -> RawProjected {
        self.tm.forward(lon0, lat, lon)
    }

    fn tm_reverse(&self, lon0: f64, x: f64, y: f64) -> RawGeographic {
        self.tm.reverse(lon0, x, y)
    }

    fn ps_forward(&self, northp: bool, lat: f64, lon: f64) -> RawProjected {
        self.ps.forward(northp, lat, lon)
    }

    fn ps_reverse(&self, northp: bool, x: f64, y: f64) -> RawGeographic {
        self.ps.reverse(northp, x, y)
    }
}

lazy_static! {
    // Constructing the transverse Mercator evaluates its series
    // coefficients, so a single instance is shared across calls
    pub(crate) static ref WGS84: Wgs84Projection = Wgs84Projection::new();
}
