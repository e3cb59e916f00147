//! Zone selection: maps a position to its standard UTM zone or to UPS, and
//! resolves caller-supplied zone overrides.

use crate::{utility::{ang_normalize, dms}, Error};

/// The zone value designating UPS.
pub const UPS: i32 = 0;
/// Smallest UTM zone number.
pub const MIN_UTM_ZONE: i32 = 1;
/// Largest UTM zone number.
pub const MAX_UTM_ZONE: i32 = 60;

/// Zone preference for a forward conversion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZoneSpec {
    /// Use the standard zone for the position, UPS included.
    #[default]
    Standard,
    /// Force UPS regardless of latitude.
    Ups,
    /// Force a particular UTM zone in `[1, 60]`.
    Utm(i32),
}

impl ZoneSpec {
    /// Resolve the preference against a position.
    ///
    /// Fails only for a forced UTM zone outside `[1, 60]`.
    pub(crate) fn resolve(self, lat: f64, lon: f64) -> Result<i32, Error> {
        match self {
            ZoneSpec::Standard => Ok(standard_zone(lat, lon)),
            ZoneSpec::Ups => Ok(UPS),
            ZoneSpec::Utm(zone) if (MIN_UTM_ZONE..=MAX_UTM_ZONE).contains(&zone) => Ok(zone),
            ZoneSpec::Utm(zone) => Err(Error::InputRange(
                format!("Zone {zone} not in range [1, 60]")
            )),
        }
    }
}

/// Map a position to its standard zone: [`UPS`] for latitudes south of -80
/// or north of 84, otherwise the UTM zone in `[1, 60]`, honoring the Norway
/// and Svalbard exceptions to the regular 6 degree grid.
///
/// All latitude and longitude tests are closed on the lower end and open on
/// the upper. Thus for UTM zone 38, latitude is in [-80, 84) and longitude
/// is in [42, 48). This is exact.
///
/// ```
/// use utmups::standard_zone;
///
/// assert_eq!(standard_zone(40.0, -74.0), 18);
/// assert_eq!(standard_zone(85.0, -74.0), 0);
/// // The Norway exception: plain bucketing would give 31
/// assert_eq!(standard_zone(60.0, 5.0), 32);
/// ```
pub fn standard_zone(lat: f64, lon: f64) -> i32 {
    if !((-80_f64)..84.0).contains(&lat) {
        return UPS;
    }

    let mut lon_int = ang_normalize(lon).floor() as i32;
    if lon_int == dms::HD {
        lon_int = -dms::HD;
    }

    let mut zone = (lon_int + 186) / 6;
    let band = latitude_band(lat);
    // The Norway exception
    if band == 7 && zone == 31 && lon_int >= 3 {
        zone = 32;
    }
    // The Svalbard exception: 12 degree wide zones 31/33/35/37
    else if band == 9 && (0..42).contains(&lon_int) {
        zone = 2 * ((lon_int + 183) / 12) + 1;
    }

    zone
}

/// Longitude of the zone's central meridian, degrees.
pub fn central_meridian(zone: i32) -> f64 {
    6.0 * f64::from(zone) - 183.
}

/// Index of the 8 degree latitude band, in `[-10, 9]`; band 9 absorbs the
/// widened [72, 84) strip.
pub(crate) fn latitude_band(lat: f64) -> i32 {
    let lat_int = lat.floor() as i32;
    (-10).max(9.min((lat_int + 80) / 8 - 10))
}
