use std::fmt::Display;

use crate::{ranges, utility, utmups::UtmUps, Error};

/// Mean radius of Earth in meters
///
/// <https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius>
const EARTH_MEAN_RADIUS_M: f64 = 6371.0088 * 1000.0;

/// A WGS84 latitude/longitude point in decimal degrees. Can be converted
/// to/from [`UtmUps`].
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    #[cfg_attr(feature = "serde", serde(alias = "lat"))]
    pub(crate) latitude: f64,
    #[cfg_attr(feature = "serde", serde(alias = "lon"))]
    pub(crate) longitude: f64,
}

impl LatLon {
    /// Internal-only constructor that doesn't check the bounds of lat/lon
    pub(crate) fn new(lat: f64, lon: f64) -> LatLon {
        Self {
            latitude: lat,
            longitude: lon,
        }
    }

    /// Tries to create a latitude/longitude point from a lat/lon pair.
    /// Latitude must be in range [-90, 90]; any finite longitude is
    /// accepted and normalized to [-180, 180].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputRange`] if the latitude is out of range or the
    /// longitude is not finite.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmups::LatLon;
    ///
    /// let coord = LatLon::create(40.748333, -73.985278);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.latitude(), 40.748333);
    /// assert_eq!(coord.longitude(), -73.985278);
    ///
    /// // Longitudes are normalized on construction
    /// let coord = LatLon::create(0.0, 220.0).unwrap();
    /// assert_eq!(coord.longitude(), -140.0);
    ///
    /// let invalid_coord_lat = LatLon::create(100.0, 0.0);
    /// assert!(invalid_coord_lat.is_err());
    ///
    /// let invalid_coord_lon = LatLon::create(0.0, f64::NAN);
    /// assert!(invalid_coord_lon.is_err());
    /// ```
    pub fn create(lat: f64, lon: f64) -> Result<LatLon, Error> {
        ranges::check_latlon(lat, lon)?;
        Ok(LatLon::new(lat, utility::ang_normalize(lon)))
    }

    /// Returns the latitude value.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude value.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns whether the point is in the northern hemisphere. The equator
    /// counts as north.
    ///
    /// # Example
    ///
    /// ```
    /// use utmups::LatLon;
    ///
    /// assert!(LatLon::create(40.748333, -73.985278).unwrap().is_north());
    /// assert!(!LatLon::create(-40.748333, -73.985278).unwrap().is_north());
    /// assert!(LatLon::create(0.0, 0.0).unwrap().is_north());
    /// ```
    pub fn is_north(&self) -> bool {
        self.latitude >= 0.0
    }

    /// Returns the distance in meters between two [`LatLon`] points
    /// using the [haversine formula](https://en.wikipedia.org/wiki/Haversine_formula).
    /// Uses the [mean radius of the Earth](https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius)
    /// in the calculation: `6371.0088`
    pub fn haversine(&self, other: &LatLon) -> f64 {
        let lat1_r = self.latitude.to_radians();
        let lat2_r = other.latitude.to_radians();

        2.0 * EARTH_MEAN_RADIUS_M * (
            ((other.latitude - self.latitude).to_radians() / 2.0).sin().powi(2) +
            lat1_r.cos() * lat2_r.cos() *
            ((other.longitude - self.longitude).to_radians() / 2.0).sin().powi(2)
        ).sqrt().asin()
    }

    /// Converts from [`UtmUps`] to [`LatLon`]
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the projected coordinates lie
    /// outside the legal envelope for their zone kind and hemisphere.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmups::{LatLon, UtmUps};
    ///
    /// let coord_utm = UtmUps::create(18, true, 585664.121, 4511315.422).unwrap();
    ///
    /// let converted = LatLon::from_utmups(&coord_utm).unwrap();
    ///
    /// assert!((converted.latitude() - 40.748333).abs() < 1e-6);
    /// assert!((converted.longitude() - -73.985278).abs() < 1e-6);
    /// ```
    pub fn from_utmups(value: &UtmUps) -> Result<LatLon, Error> {
        value.to_latlon()
    }

    /// Converts from [`LatLon`] to [`UtmUps`] in the standard zone.
    ///
    /// # Errors
    ///
    /// See [`UtmUps::from_latlon`].
    ///
    /// # Usage
    ///
    /// ```
    /// use utmups::LatLon;
    ///
    /// let coord = LatLon::create(40.748333, -73.985278).unwrap();
    ///
    /// let converted = coord.to_utmups().unwrap();
    ///
    /// assert_eq!(converted.zone(), 18);
    /// assert!(converted.is_north());
    /// // Accurate to 1mm against the GeographicLib reference values
    /// assert!((converted.easting() - 585664.121).abs() < 1e-3);
    /// assert!((converted.northing() - 4511315.422).abs() < 1e-3);
    /// ```
    pub fn to_utmups(&self) -> Result<UtmUps, Error> {
        UtmUps::from_latlon(self)
    }
}

impl Display for LatLon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut buf = ryu::Buffer::new();
        let lat = buf.format(self.latitude);
        let mut buf = ryu::Buffer::new();
        let lon = buf.format(self.longitude);
        write!(
            f,
            "{lat} {lon}",
        )
    }
}
