#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! Convert between geographic coordinates and the
//! [UTM](https://en.wikipedia.org/wiki/Universal_Transverse_Mercator_coordinate_system)
//! /
//! [UPS](https://en.wikipedia.org/wiki/Universal_polar_stereographic_coordinate_system)
//! grid systems on the WGS84 ellipsoid.
//!
//! The conversions are closed: output from [`UtmUps::forward`] is legal
//! input for [`UtmUps::reverse`] and vice versa, with a round-trip error of
//! about 5 nm. To make this work, eastings and northings are accepted 100 km
//! beyond the envelope used by the MGRS lettering scheme, which gives a
//! generous overlap between adjacent UTM zones and between UTM and UPS.
//!
//! ```
//! use utmups::{LatLon, UtmUps, ZoneSpec};
//!
//! let coord = LatLon::create(40.748333, -73.985278).unwrap();
//! let done = UtmUps::forward(ZoneSpec::Standard, &coord).unwrap();
//!
//! assert_eq!(done.coord.zone(), 18);
//! assert!(done.coord.is_north());
//! assert!(done.scale > 0.9996);
//! ```

use thiserror::Error;

pub mod latlon;
pub mod projections;
pub mod utmups;
pub mod zone;

pub use latlon::LatLon;
pub use utmups::{Converted, UtmUps};
pub use zone::{standard_zone, ZoneSpec};

pub(crate) mod constants;
pub(crate) mod ranges;
pub(crate) mod utility;

#[derive(Debug, Error)]
pub enum Error {
    /// A latitude, longitude, or zone override outside its legal domain.
    #[error("Input coordinate is not valid: {0}")]
    InputRange(String),
    /// Projected coordinates outside the legal envelope for their
    /// zone-kind/hemisphere pair.
    #[error("Coordinates out of legal range: {0}")]
    OutOfRange(String),
}

trait ThisOrThat {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T;
    fn ternary_lazy<F, E, T>(&self, r#true: F, r#false: E) -> T
    where
        F: Fn() -> T,
        E: Fn() -> T;
}

impl ThisOrThat for bool {
    fn ternary<T>(&self, r#true: T, r#false: T) -> T {
        if *self { r#true } else { r#false }
    }

    fn ternary_lazy<F, E, T>(&self, r#true: F, r#false: E) -> T
    where
        F: Fn() -> T,
        E: Fn() -> T,
    {
        if *self { r#true() } else { r#false() }
    }
}
