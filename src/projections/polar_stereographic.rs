//! Polar stereographic on the ellipsoid, exact in the conformal latitude.

use crate::{
    constants::{UPS_K0, WGS84_A, WGS84_F},
    utility::{ang_normalize, atan2d, atand, dms, eatanhe, sincosd, tand, tauf, taupf},
    ThisOrThat,
};

use super::{RawGeographic, RawProjected};

const F: f64 = WGS84_F;
const E2: f64 = F * (2. - F);
const E2M: f64 = 1. - E2;

pub(crate) struct PolarStereographic {
    a: f64,
    k0: f64,
    es: f64,
    c: f64,
}

impl PolarStereographic {
    pub fn ups() -> PolarStereographic {
        let es = (F < 0.).ternary(-1., 1.) * E2.abs().sqrt();
        let c = (1. - F) * eatanhe(1., es).exp();

        Self {
            a: WGS84_A,
            k0: UPS_K0,
            es,
            c,
        }
    }

    pub fn forward(&self, northp: bool, lat: f64, lon: f64) -> RawProjected {
        let lat = lat * northp.ternary(1., -1.);

        let tau = tand(lat);
        let secphi = 1_f64.hypot(tau);
        let taup = taupf(tau, self.es);
        let mut rho = 1_f64.hypot(taup) + taup.abs();
        rho = (taup >= 0.).ternary_lazy(
            || (lat != f64::from(dms::QD)).ternary_lazy(|| 1. / rho, || 0.),
            || rho,
        );
        rho *= 2. * self.k0 * self.a / self.c;

        let k = if lat == f64::from(dms::QD) {
            self.k0
        } else {
            (rho / self.a) * secphi * (E2M + E2 / secphi.powi(2)).sqrt()
        };

        let (slam, clam) = sincosd(lon);
        let x = rho * slam;
        let y = northp.ternary(-rho, rho) * clam;
        let gamma = ang_normalize(northp.ternary(lon, -lon));

        RawProjected { x, y, convergence: gamma, scale: k }
    }

    pub fn reverse(&self, northp: bool, x: f64, y: f64) -> RawGeographic {
        let rho = x.hypot(y);
        let t = (rho != 0.).ternary_lazy(
            || rho / (2. * self.k0 * self.a / self.c),
            || f64::EPSILON.powi(2),
        );
        let taup = (1. / t - t) / 2.;
        let tau = tauf(taup, self.es);
        let secphi = 1_f64.hypot(tau);

        let k = if rho == 0. {
            self.k0
        } else {
            (rho / self.a) * secphi * (E2M + E2 / secphi.powi(2)).sqrt()
        };

        let lat = northp.ternary(1., -1.) * atand(tau);
        let lon = atan2d(x, northp.ternary(-y, y));
        let gamma = ang_normalize(northp.ternary(lon, -lon));

        RawGeographic { latitude: lat, longitude: lon, convergence: gamma, scale: k }
    }
}
