// WGS84 equatorial radius (semi-major axis a), meters
pub(crate) const WGS84_A: f64 = 6_378_137.;
// WGS84 flattening
#[allow(clippy::unreadable_literal)]
pub(crate) const WGS84_F: f64 = 1.0 / 298.257223563;

// Central scale factor on the UTM central meridian
pub(crate) const UTM_K0: f64 = 9996.0 / 10_000.;
// Central scale factor at the UPS pole
pub(crate) const UPS_K0: f64 = 994.0 / 1000.;
