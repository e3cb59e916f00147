//! The legal easting/northing envelope per (projection kind, hemisphere)
//! pair, and the input validators.
//!
//! The limits derive from the 100 km grid tiles of the MGRS lettering
//! scheme, extended by one tile on every side. 100 km is the most padding
//! consistent with eastings staying non-negative, and the extension is what
//! keeps forward and reverse conversions closed near the edges of a zone:
//! a projected point just outside its natural zone still round-trips
//! instead of being rejected on the way back.

use crate::{Error, ThisOrThat};

pub(crate) const TILE: i32 = 100_000;

// False origins and tile bounds, in tiles
const UTM_EASTING: i32 = 5;
const UPS_EASTING: i32 = 20;
const MIN_UTM_COL: i32 = 1;
const MAX_UTM_COL: i32 = 9;
const MIN_UTM_S_ROW: i32 = 10;
const MAX_UTM_S_ROW: i32 = 100;
const MIN_UTM_N_ROW: i32 = 0;
const MAX_UTM_N_ROW: i32 = 95;
const MIN_UPS_S_IND: i32 = 8;
const MAX_UPS_S_IND: i32 = 30;
const MIN_UPS_N_IND: i32 = 13;
const MAX_UPS_N_IND: i32 = 27;

// All four tables are indexed by 2 * utmp + northp, see `table_index`

pub(crate) const FALSE_EASTING: [i32; 4] = [
    UPS_EASTING * TILE,
    UPS_EASTING * TILE,
    UTM_EASTING * TILE,
    UTM_EASTING * TILE,
];

pub(crate) const FALSE_NORTHING: [i32; 4] = [
    UPS_EASTING * TILE,
    UPS_EASTING * TILE,
    MAX_UTM_S_ROW * TILE,
    MIN_UTM_N_ROW * TILE,
];

const MIN_EASTING: [i32; 4] = [
    MIN_UPS_S_IND * TILE,
    MIN_UPS_N_IND * TILE,
    MIN_UTM_COL * TILE,
    MIN_UTM_COL * TILE,
];

const MAX_EASTING: [i32; 4] = [
    MAX_UPS_S_IND * TILE,
    MAX_UPS_N_IND * TILE,
    MAX_UTM_COL * TILE,
    MAX_UTM_COL * TILE,
];

const MIN_NORTHING: [i32; 4] = [
    MIN_UPS_S_IND * TILE,
    MIN_UPS_N_IND * TILE,
    MIN_UTM_S_ROW * TILE,
    (MIN_UTM_N_ROW + MIN_UTM_S_ROW - MAX_UTM_S_ROW) * TILE,
];

const MAX_NORTHING: [i32; 4] = [
    MAX_UPS_S_IND * TILE,
    MAX_UPS_N_IND * TILE,
    (MAX_UTM_S_ROW + MAX_UTM_N_ROW - MIN_UTM_N_ROW) * TILE,
    MAX_UTM_N_ROW * TILE,
];

/// Table index for a (projection kind, hemisphere) pair.
pub(crate) fn table_index(utmp: bool, northp: bool) -> usize {
    utmp.ternary(2, 0) + northp.ternary(1, 0)
}

/// Reject latitudes outside [-90, 90] and longitudes that cannot be
/// normalized.
pub(crate) fn check_latlon(lat: f64, lon: f64) -> Result<(), Error> {
    if !((-90_f64)..=90_f64).contains(&lat) {
        return Err(Error::InputRange(
            format!("Latitude {lat} not in range [-90, 90]")
        ));
    }

    if !lon.is_finite() {
        return Err(Error::InputRange(
            format!("Longitude {lon} is not a finite angle")
        ));
    }

    Ok(())
}

/// Reject eastings and northings outside the legal envelope for the
/// (projection kind, hemisphere) pair.
pub(crate) fn check_coords(utmp: bool, northp: bool, x: f64, y: f64) -> Result<(), Error> {
    let slop = f64::from(TILE);

    let ind = table_index(utmp, northp);
    if x < f64::from(MIN_EASTING[ind]) - slop || x > f64::from(MAX_EASTING[ind]) + slop {
        return Err(Error::OutOfRange(
            format!(
                "Easting {:.2}km not in {} range for {} hemisphere [{:.2}km, {:.2}km]",
                x / 1000.0,
                utmp.ternary("UTM", "UPS"),
                northp.ternary("N", "S"),
                (f64::from(MIN_EASTING[ind]) - slop) / 1000.0,
                (f64::from(MAX_EASTING[ind]) + slop) / 1000.0,
            )
        ));
    }

    if y < f64::from(MIN_NORTHING[ind]) - slop || y > f64::from(MAX_NORTHING[ind]) + slop {
        return Err(Error::OutOfRange(
            format!(
                "Northing {:.2}km not in {} range for {} hemisphere [{:.2}km, {:.2}km]",
                y / 1000.0,
                utmp.ternary("UTM", "UPS"),
                northp.ternary("N", "S"),
                (f64::from(MIN_NORTHING[ind]) - slop) / 1000.0,
                (f64::from(MAX_NORTHING[ind]) + slop) / 1000.0,
            )
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // The padded envelope, km: UTM easting [0, 1000] in both hemispheres,
    // northing [-9100, 9600] north and [900, 19600] south; UPS easting and
    // northing [1200, 2800] north and [700, 3100] south.

    #[test]
    fn utm_bounds() {
        assert!(check_coords(true, true, 0.0, 0.0).is_ok());
        assert!(check_coords(true, true, 1_000_000.0, 9_600_000.0).is_ok());
        assert!(check_coords(true, true, -1.0, 0.0).is_err());
        assert!(check_coords(true, true, 1_000_001.0, 0.0).is_err());
        assert!(check_coords(true, true, 500_000.0, -9_100_000.0).is_ok());
        assert!(check_coords(true, true, 500_000.0, -9_100_001.0).is_err());
        assert!(check_coords(true, false, 500_000.0, 900_000.0).is_ok());
        assert!(check_coords(true, false, 500_000.0, 899_999.0).is_err());
        assert!(check_coords(true, false, 500_000.0, 19_600_000.0).is_ok());
        assert!(check_coords(true, false, 500_000.0, 19_600_001.0).is_err());
    }

    #[test]
    fn ups_bounds() {
        assert!(check_coords(false, true, 1_200_000.0, 2_800_000.0).is_ok());
        assert!(check_coords(false, true, 1_199_999.0, 2_000_000.0).is_err());
        assert!(check_coords(false, true, 2_000_000.0, 2_800_001.0).is_err());
        assert!(check_coords(false, false, 700_000.0, 3_100_000.0).is_ok());
        assert!(check_coords(false, false, 699_999.0, 2_000_000.0).is_err());
        assert!(check_coords(false, false, 2_000_000.0, 3_100_001.0).is_err());
    }

    #[test]
    fn latlon_domain() {
        assert!(check_latlon(90.0, 0.0).is_ok());
        assert!(check_latlon(-90.0, 0.0).is_ok());
        assert!(check_latlon(90.000001, 0.0).is_err());
        assert!(check_latlon(-90.000001, 0.0).is_err());
        assert!(check_latlon(f64::NAN, 0.0).is_err());
        // Any finite longitude is normalizable
        assert!(check_latlon(0.0, 5000.0).is_ok());
        assert!(check_latlon(0.0, f64::INFINITY).is_err());
        assert!(check_latlon(0.0, f64::NAN).is_err());
    }

    #[test]
    fn false_origins() {
        assert_eq!(FALSE_EASTING[table_index(true, true)], 500_000);
        assert_eq!(FALSE_NORTHING[table_index(true, true)], 0);
        assert_eq!(FALSE_NORTHING[table_index(true, false)], 10_000_000);
        assert_eq!(FALSE_EASTING[table_index(false, true)], 2_000_000);
        assert_eq!(FALSE_NORTHING[table_index(false, false)], 2_000_000);
    }
}
