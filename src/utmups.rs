//! The UTM/UPS coordinate type and the forward/reverse conversions.

use std::fmt::Display;

use crate::{
    latlon::LatLon,
    projections::{EllipsoidProjection, WGS84},
    ranges::{self, FALSE_EASTING, FALSE_NORTHING},
    zone::{self, ZoneSpec},
    Error, ThisOrThat,
};

/// A conversion result paired with the meridian convergence and point scale
/// at the converted location.
#[derive(Clone, Copy, Debug)]
pub struct Converted<T> {
    pub coord: T,
    /// Angle from true north to grid north at the point, degrees.
    pub convergence: f64,
    /// Local linear distortion of the projection at the point.
    pub scale: f64,
}

/// Representation of a WGS84
/// [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
/// /
/// [UPS](https://en.wikipedia.org/wiki/Universal_polar_stereographic_coordinate_system)
/// point. A zone value of `0` designates UPS; for UPS points the hemisphere
/// flag names the polar cap the point was projected from, not the
/// hemisphere of latitude.
///
/// Converted from latitude/longitude with [`UtmUps::forward`] (or the
/// convenience [`UtmUps::from_latlon`], which drops convergence and scale),
/// and back with [`UtmUps::reverse`]/[`UtmUps::to_latlon`]. The two
/// directions are mutual inverses to about 5 nm for any point whose
/// projected coordinates lie inside the legal envelope.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtmUps {
    pub(crate) zone: i32,
    #[cfg_attr(feature = "serde", serde(alias = "north", alias = "is_north"))]
    pub(crate) northp: bool,
    pub(crate) easting: f64,
    pub(crate) northing: f64,
}

impl UtmUps {
    /// Internal-only constructor that doesn't check the coordinate
    pub(crate) fn new(zone: i32, northp: bool, easting: f64, northing: f64) -> UtmUps {
        Self {
            zone,
            northp,
            easting,
            northing,
        }
    }

    /// Tries to create a UTM or UPS point from its constituent parts. Zone
    /// of `0` designates UPS, otherwise it is UTM.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputRange`] if the zone is outside the range
    /// `[0, 60]`, and [`Error::OutOfRange`] if the easting or northing is
    /// outside the legal envelope for the zone kind and hemisphere.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmups::UtmUps;
    ///
    /// let coord = UtmUps::create(18, true, 585664.121, 4511315.422);
    ///
    /// assert!(coord.is_ok());
    ///
    /// let coord = coord.unwrap();
    ///
    /// assert_eq!(coord.zone(), 18);
    /// assert_eq!(coord.is_north(), true);
    ///
    /// let invalid_zone = UtmUps::create(61, true, 585664.121, 4511315.422);
    /// assert!(invalid_zone.is_err());
    ///
    /// let negative_easting = UtmUps::create(18, true, -1.0, 4511315.422);
    /// assert!(negative_easting.is_err());
    /// ```
    pub fn create(zone: i32, northp: bool, easting: f64, northing: f64) -> Result<UtmUps, Error> {
        // Make sure zone is a valid value
        if !(zone::UPS..=zone::MAX_UTM_ZONE).contains(&zone) {
            return Err(Error::InputRange(format!("Zone {zone} not in range [0, 60]")));
        }

        let utmp = zone != zone::UPS;

        ranges::check_coords(utmp, northp, easting, northing)?;

        Ok(UtmUps::new(zone, northp, easting, northing))
    }

    /// Returns the zone; `0` designates UPS.
    pub fn zone(&self) -> i32 {
        self.zone
    }

    /// Returns whether the point belongs to the northern hemisphere (UTM)
    /// or the north polar cap (UPS).
    pub fn is_north(&self) -> bool {
        self.northp
    }

    /// Returns the easting in meters.
    pub fn easting(&self) -> f64 {
        self.easting
    }

    /// Returns the northing in meters.
    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// Converts from [`LatLon`] to [`UtmUps`] in the standard zone,
    /// discarding convergence and scale.
    ///
    /// # Errors
    ///
    /// See [`UtmUps::forward`].
    ///
    /// # Usage
    ///
    /// ```
    /// use utmups::{LatLon, UtmUps};
    ///
    /// let coord = LatLon::create(40.748333, -73.985278).unwrap();
    ///
    /// let converted = UtmUps::from_latlon(&coord).unwrap();
    ///
    /// assert_eq!(converted.zone(), 18);
    /// assert!(converted.is_north());
    /// // Accurate to 1mm against the GeographicLib reference values
    /// assert!((converted.easting() - 585664.121).abs() < 1e-3);
    /// assert!((converted.northing() - 4511315.422).abs() < 1e-3);
    /// ```
    pub fn from_latlon(value: &LatLon) -> Result<UtmUps, Error> {
        Self::forward(ZoneSpec::Standard, value).map(|done| done.coord)
    }

    /// Converts from [`LatLon`] to [`UtmUps`] with the built-in WGS84
    /// projections, also returning the meridian convergence and scale.
    ///
    /// The zone preference selects the standard zone, forces UPS, or forces
    /// a particular UTM zone; the hemisphere is taken from the latitude,
    /// with the equator counting as north.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputRange`] for a latitude outside [-90, 90], a
    /// non-finite longitude, or a forced UTM zone outside [1, 60]; returns
    /// [`Error::OutOfRange`] if the projected coordinates fall outside the
    /// legal envelope, which can legitimately happen when a zone is forced
    /// far from the point's natural extent.
    ///
    /// # Usage
    ///
    /// ```
    /// use utmups::{LatLon, UtmUps, ZoneSpec};
    ///
    /// let coord = LatLon::create(40.748333, -73.985278).unwrap();
    /// let done = UtmUps::forward(ZoneSpec::Standard, &coord).unwrap();
    ///
    /// assert_eq!(done.coord.zone(), 18);
    ///
    /// // The same point can be forced into the neighboring zone
    /// let forced = UtmUps::forward(ZoneSpec::Utm(19), &coord).unwrap();
    /// assert!(forced.coord.easting() < done.coord.easting());
    ///
    /// // ...but not into one on the other side of the earth
    /// assert!(UtmUps::forward(ZoneSpec::Utm(47), &coord).is_err());
    /// ```
    pub fn forward(setzone: ZoneSpec, value: &LatLon) -> Result<Converted<UtmUps>, Error> {
        Self::forward_with(&*WGS84, setzone, value)
    }

    /// Converts from [`LatLon`] to [`UtmUps`] with an explicit projection
    /// implementation. See [`UtmUps::forward`].
    ///
    /// # Errors
    ///
    /// See [`UtmUps::forward`].
    pub fn forward_with<P>(
        projection: &P,
        setzone: ZoneSpec,
        value: &LatLon,
    ) -> Result<Converted<UtmUps>, Error>
    where
        P: EllipsoidProjection + ?Sized,
    {
        let (lat, lon) = (value.latitude(), value.longitude());
        ranges::check_latlon(lat, lon)?;

        let zone = setzone.resolve(lat, lon)?;
        let northp = lat >= 0.;
        let utmp = zone != zone::UPS;

        let raw = if utmp {
            projection.tm_forward(zone::central_meridian(zone), lat, lon)
        } else {
            projection.ps_forward(northp, lat, lon)
        };

        let ind = ranges::table_index(utmp, northp);
        let easting = raw.x + f64::from(FALSE_EASTING[ind]);
        let northing = raw.y + f64::from(FALSE_NORTHING[ind]);

        // Reject a result outside the legal envelope rather than return a
        // coordinate that Reverse would refuse; this is what keeps the
        // conversions closed
        ranges::check_coords(utmp, northp, easting, northing)?;

        Ok(Converted {
            coord: UtmUps::new(zone, northp, easting, northing),
            convergence: raw.convergence,
            scale: raw.scale,
        })
    }

    /// Converts from [`UtmUps`] to [`LatLon`], discarding convergence and
    /// scale.
    ///
    /// # Errors
    ///
    /// See [`UtmUps::reverse`].
    ///
    /// # Usage
    ///
    /// ```
    /// use utmups::UtmUps;
    ///
    /// let coord_utm = UtmUps::create(18, true, 585664.121, 4511315.422).unwrap();
    ///
    /// let converted = coord_utm.to_latlon().unwrap();
    ///
    /// assert!((converted.latitude() - 40.748333).abs() < 1e-6);
    /// assert!((converted.longitude() - -73.985278).abs() < 1e-6);
    /// ```
    pub fn to_latlon(&self) -> Result<LatLon, Error> {
        self.reverse().map(|done| done.coord)
    }

    /// Converts from [`UtmUps`] to [`LatLon`] with the built-in WGS84
    /// projections, also returning the meridian convergence and scale.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InputRange`] if the zone is outside [0, 60] and
    /// [`Error::OutOfRange`] if the easting or northing is outside the
    /// legal envelope for the zone kind and hemisphere.
    pub fn reverse(&self) -> Result<Converted<LatLon>, Error> {
        self.reverse_with(&*WGS84)
    }

    /// Converts from [`UtmUps`] to [`LatLon`] with an explicit projection
    /// implementation. See [`UtmUps::reverse`].
    ///
    /// # Errors
    ///
    /// See [`UtmUps::reverse`].
    pub fn reverse_with<P>(&self, projection: &P) -> Result<Converted<LatLon>, Error>
    where
        P: EllipsoidProjection + ?Sized,
    {
        // The fields may not have gone through `create`, e.g. after
        // deserialization, so validate here as well
        if !(zone::UPS..=zone::MAX_UTM_ZONE).contains(&self.zone) {
            return Err(Error::InputRange(format!("Zone {} not in range [0, 60]", self.zone)));
        }

        let utmp = self.zone != zone::UPS;
        ranges::check_coords(utmp, self.northp, self.easting, self.northing)?;

        let ind = ranges::table_index(utmp, self.northp);
        let x = self.easting - f64::from(FALSE_EASTING[ind]);
        let y = self.northing - f64::from(FALSE_NORTHING[ind]);

        let raw = if utmp {
            projection.tm_reverse(zone::central_meridian(self.zone), x, y)
        } else {
            projection.ps_reverse(self.northp, x, y)
        };

        Ok(Converted {
            coord: LatLon::new(raw.latitude, raw.longitude),
            convergence: raw.convergence,
            scale: raw.scale,
        })
    }
}

impl Display for UtmUps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {} {}",
            self.zone,
            self.northp.ternary("n", "s"),
            self.easting,
            self.northing
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::constants::{UPS_K0, UTM_K0};

    use super::*;

    #[test]
    fn create_rejects_bad_zones() {
        assert!(UtmUps::create(-10, true, 500_000.0, 0.0).is_err());
        assert!(UtmUps::create(61, true, 500_000.0, 0.0).is_err());
        assert!(UtmUps::create(0, true, 2_000_000.0, 2_000_000.0).is_ok());
        assert!(UtmUps::create(60, true, 500_000.0, 0.0).is_ok());
    }

    #[test]
    fn create_rejects_out_of_range_coords() {
        // Negative easting is outside [0km, 1000km]
        let err = UtmUps::create(1, true, -1.0, 0.0).unwrap_err();
        assert!(matches!(err, Error::OutOfRange(_)));
        // UTM limits don't apply to UPS and vice versa
        assert!(UtmUps::create(0, true, 500_000.0, 0.0).is_err());
    }

    #[test]
    fn forward_matches_reference_values() {
        // GeographicLib: 40.748333 -73.985278 => 18n 585664.121 4511315.422
        let coord = LatLon::create(40.748333, -73.985278).unwrap();
        let done = UtmUps::forward(ZoneSpec::Standard, &coord).unwrap();

        assert_eq!(done.coord.zone(), 18);
        assert!(done.coord.is_north());
        assert_relative_eq!(done.coord.easting(), 585_664.121, epsilon = 1e-3);
        assert_relative_eq!(done.coord.northing(), 4_511_315.422, epsilon = 1e-3);
    }

    #[test]
    fn forward_on_central_meridian_at_equator() {
        let coord = LatLon::create(0.0, 3.0).unwrap();
        let done = UtmUps::forward(ZoneSpec::Standard, &coord).unwrap();

        assert_eq!(done.coord.zone(), 31);
        assert!(done.coord.is_north());
        assert_relative_eq!(done.coord.easting(), 500_000.0, epsilon = 1e-6);
        assert_relative_eq!(done.coord.northing(), 0.0, epsilon = 1e-6);
        assert_relative_eq!(done.convergence, 0.0, epsilon = 1e-12);
        assert_relative_eq!(done.scale, UTM_K0, epsilon = 1e-9);
    }

    #[test]
    fn southern_hemisphere_gets_the_false_northing() {
        let coord = LatLon::create(-33.865143, 151.2099).unwrap();
        let done = UtmUps::forward(ZoneSpec::Standard, &coord).unwrap();

        assert_eq!(done.coord.zone(), 56);
        assert!(!done.coord.is_north());
        // South of the equator, northings count down from 10,000km
        assert!(done.coord.northing() > 6_000_000.0);
        assert!(done.coord.northing() < 6_500_000.0);

        let back = done.coord.reverse().unwrap();
        assert_relative_eq!(back.coord.latitude(), -33.865143, epsilon = 1e-9);
        assert_relative_eq!(back.coord.longitude(), 151.2099, epsilon = 1e-9);
    }

    #[test]
    fn forced_zone_far_from_its_extent_is_rejected() {
        // Zone 1 is centered on -177; from -170 at the equator the easting
        // overshoots the envelope by almost 300km
        let coord = LatLon::create(0.0, -170.0).unwrap();
        let err = UtmUps::forward(ZoneSpec::Utm(1), &coord).unwrap_err();
        assert!(matches!(err, Error::OutOfRange(_)));

        // The same longitude in its standard zone is fine
        assert!(UtmUps::forward(ZoneSpec::Standard, &coord).is_ok());
    }

    #[test]
    fn forced_ups_at_mid_latitude_is_rejected() {
        let coord = LatLon::create(40.0, 0.0).unwrap();
        let err = UtmUps::forward(ZoneSpec::Ups, &coord).unwrap_err();
        assert!(matches!(err, Error::OutOfRange(_)));
    }

    #[test]
    fn north_pole_round_trips_through_ups() {
        let pole = LatLon::create(90.0, 0.0).unwrap();
        let done = UtmUps::forward(ZoneSpec::Ups, &pole).unwrap();

        assert_eq!(done.coord.zone(), zone::UPS);
        assert!(done.coord.is_north());
        assert_relative_eq!(done.coord.easting(), 2_000_000.0);
        assert_relative_eq!(done.coord.northing(), 2_000_000.0);
        assert_relative_eq!(done.scale, UPS_K0);

        // The longitude at the pole is singular; only the latitude must
        // come back
        let back = done.coord.reverse().unwrap();
        assert_relative_eq!(back.coord.latitude(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn standard_zone_picks_ups_beyond_the_utm_band() {
        let arctic = LatLon::create(86.0, -100.0).unwrap();
        let done = UtmUps::forward(ZoneSpec::Standard, &arctic).unwrap();
        assert_eq!(done.coord.zone(), zone::UPS);
        assert!(done.coord.is_north());

        let antarctic = LatLon::create(-86.0, -100.0).unwrap();
        let done = UtmUps::forward(ZoneSpec::Standard, &antarctic).unwrap();
        assert_eq!(done.coord.zone(), zone::UPS);
        assert!(!done.coord.is_north());
    }

    #[test]
    fn reverse_reports_convergence_and_scale() {
        let coord = LatLon::create(40.0, -73.0).unwrap();
        let fwd = UtmUps::forward(ZoneSpec::Standard, &coord).unwrap();
        let rev = fwd.coord.reverse().unwrap();

        assert_relative_eq!(rev.convergence, fwd.convergence, epsilon = 1e-9);
        assert_relative_eq!(rev.scale, fwd.scale, epsilon = 1e-9);
        // Two degrees east of the central meridian at lat 40
        assert!(fwd.convergence > 1.0 && fwd.convergence < 2.0);
        assert!(fwd.scale > UTM_K0);
    }

    #[test]
    fn display_format() {
        let coord = UtmUps::create(18, true, 585_664.0, 4_511_315.0).unwrap();
        assert_eq!(coord.to_string(), "18n 585664 4511315");

        let coord = UtmUps::create(0, false, 2_000_000.0, 2_000_000.0).unwrap();
        assert_eq!(coord.to_string(), "0s 2000000 2000000");
    }
}
