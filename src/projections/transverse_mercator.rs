//! Transverse Mercator on the ellipsoid, after Krüger's series to sixth
//! order in the third flattening, evaluated with complex Clenshaw sums.

use std::f64::consts::PI;

use num::Complex;

use crate::{
    constants::{UTM_K0, WGS84_A, WGS84_F},
    utility::{ang_diff, ang_normalize, atan2d, atand, dms, eatanhe, is_zero, polyval, sincosd, tauf, taupf},
    ThisOrThat,
};

use super::{RawGeographic, RawProjected};

// ================================
// Transverse Mercator Constants
// ================================

// Series truncated at order 6 in n
const MAXPOW: usize = 6;

const B1_COEFF: [f64; 5] = [
    // b1*(n+1), polynomial in n2 of order 3
    1., 4., 64., 256., 256.,
];  // count = 5

#[allow(clippy::unreadable_literal)]
const ALP_COEFF: [f64; 27] = [
    // alp[1]/n^1, polynomial in n of order 5
    31564., -66675., 34440., 47250., -100800., 75600., 151200.,
    // alp[2]/n^2, polynomial in n of order 4
    -1983433., 863232., 748608., -1161216., 524160., 1935360.,
    // alp[3]/n^3, polynomial in n of order 3
    670412., 406647., -533952., 184464., 725760.,
    // alp[4]/n^4, polynomial in n of order 2
    6601661., -7732800., 2230245., 7257600.,
    // alp[5]/n^5, polynomial in n of order 1
    -13675556., 3438171., 7983360.,
    // alp[6]/n^6, polynomial in n of order 0
    212378941., 319334400.,
];  // count = 27

#[allow(clippy::unreadable_literal)]
const BET_COEFF: [f64; 27] = [
    // bet[1]/n^1, polynomial in n of order 5
    384796., -382725., -6720., 932400., -1612800., 1209600., 2419200.,
    // bet[2]/n^2, polynomial in n of order 4
    -1118711., 1695744., -1174656., 258048., 80640., 3870720.,
    // bet[3]/n^3, polynomial in n of order 3
    22276., -16929., -15984., 12852., 362880.,
    // bet[4]/n^4, polynomial in n of order 2
    -830251., -158400., 197865., 7257600.,
    // bet[5]/n^5, polynomial in n of order 1
    -435388., 453717., 15966720.,
    // bet[6]/n^6, polynomial in n of order 0
    20648693., 638668800.,
];  // count = 27

const F: f64 = WGS84_F;
const M: usize = MAXPOW / 2;
const N: f64 = F / (2. - F);
const E2: f64 = F * (2. - F);
const E2M: f64 = 1. - E2;

pub(crate) struct TransverseMercator {
    k0: f64,
    es: f64,
    c: f64,
    a1: f64,
    b1: f64,
    alp: [f64; MAXPOW + 1],
    bet: [f64; MAXPOW + 1],
}

impl TransverseMercator {
    pub fn utm() -> TransverseMercator {
        let es = (F < 0.).ternary(-1., 1.) * E2.abs().sqrt();
        let c = E2M.sqrt() * eatanhe(1., es).exp();

        let b1 = polyval(&B1_COEFF[0..=M], N.powi(2)) / (B1_COEFF[M + 1] * (1. + N));
        // a1 is the equivalent radius for computing the circumference of
        // ellipse.
        let a1 = b1 * WGS84_A;

        let mut alp = [0_f64; MAXPOW + 1];
        let mut bet = [0_f64; MAXPOW + 1];

        let mut o = 0;
        let mut d = N;

        for l in 1..=MAXPOW {
            let m = MAXPOW - l;
            alp[l] = d * polyval(&ALP_COEFF[o..=o+m], N) / ALP_COEFF[o + m + 1];
            bet[l] = d * polyval(&BET_COEFF[o..=o+m], N) / BET_COEFF[o + m + 1];
            o += m + 2;
            d *= N;
        }

        Self {
            k0: UTM_K0,
            es,
            c,
            a1,
            b1,
            alp,
            bet,
        }
    }

    #[allow(clippy::many_single_char_names, clippy::too_many_lines)]
    pub fn forward(&self, lon0: f64, lat: f64, lon: f64) -> RawProjected {
        let lon = ang_diff(lon0, lon);

        // Enforce the parity: work in the first quadrant and restore signs
        // at the end
        let mut lat_sign = (!lat.is_sign_negative()).ternary(1., -1.);
        let lon_sign = (!lon.is_sign_negative()).ternary(1., -1.);

        let mut lon = lon * lon_sign;
        let lat = lat * lat_sign;

        let backside = lon > f64::from(dms::QD);
        if backside {
            if lat == 0. {
                lat_sign = -1.;
            }
            lon = f64::from(dms::HD) - lon;
        }

        let (sphi, cphi) = sincosd(lat);
        let (slam, clam) = sincosd(lon);

        // Convergence and scale of the Gauss-Schreiber projection; the
        // Clenshaw sums below fold in the change to Gauss-Krueger
        let (xip, etap, mut gamma, mut k) = if lat == f64::from(dms::QD) {
            (PI / 2., 0., lon, self.c)
        } else {
            let tau = sphi / cphi;
            let taup = taupf(tau, self.es);
            let xip = taup.atan2(clam);
            let etap = (slam / taup.hypot(clam)).asinh();
            let gamma = atan2d(slam * taup, clam * 1_f64.hypot(taup));
            let k = (E2M + E2 * cphi.powi(2)).sqrt() * 1_f64.hypot(tau) / taup.hypot(clam);

            (xip, etap, gamma, k)
        };

        let c0 = (2. * xip).cos();
        let ch0 = (2. * etap).cosh();
        let s0 = (2. * xip).sin();
        let sh0 = (2. * etap).sinh();

        let mut a = Complex::new(2. * c0 * ch0, -2. * s0 * sh0);
        let mut n = MAXPOW;

        let mut y0 = Complex::new((n % 2 == 1).ternary(self.alp[n], 0.), 0.);
        let mut y1 = Complex::default();
        let mut z0 = Complex::new((n % 2 == 1).ternary(2. * n as f64 * self.alp[n], 0.), 0.);
        let mut z1 = Complex::default();

        if n % 2 == 1 {
            n -= 1;
        }

        while n > 0 {
            y1 = a * y0 - y1 + self.alp[n];
            z1 = a * z0 - z1 + 2.*(n as f64) * self.alp[n];
            n -= 1;

            y0 = a * y1 - y0 + self.alp[n];
            z0 = a * z1 - z0 + 2.*(n as f64) * self.alp[n];
            n -= 1;
        }

        a /= 2.;
        z1 = 1. - z1 + a * z0;
        a = Complex::new(s0 * ch0, c0 * sh0);
        y1 = Complex::new(xip, etap) + a * y0;

        gamma -= atan2d(z1.im, z1.re);
        k *= self.b1 * z1.norm();

        let xi = y1.re;
        let eta = y1.im;

        let y = self.a1 * self.k0 * backside.ternary(PI - xi, xi) * lat_sign;
        let x = self.a1 * self.k0 * eta * lon_sign;

        if backside {
            gamma = f64::from(dms::HD) - gamma;
        }
        gamma = ang_normalize(gamma * lat_sign * lon_sign);
        k *= self.k0;

        RawProjected { x, y, convergence: gamma, scale: k }
    }

    #[allow(clippy::many_single_char_names, clippy::too_many_lines)]
    pub fn reverse(&self, lon0: f64, x: f64, y: f64) -> RawGeographic {
        let mut xi = y / (self.a1 * self.k0);
        let mut eta = x / (self.a1 * self.k0);

        let xi_sign = (!xi.is_sign_negative()).ternary(1., -1.);
        let eta_sign = (!eta.is_sign_negative()).ternary(1., -1.);

        xi *= xi_sign;
        eta *= eta_sign;

        let backside = xi > PI/2.;
        if backside {
            xi = PI - xi;
        }

        let c0 = (2. * xi).cos();
        let ch0 = (2. * eta).cosh();
        let s0 = (2. * xi).sin();
        let sh0 = (2. * eta).sinh();

        let mut a = Complex::new(2. * c0 * ch0, -2. * s0 * sh0);
        let mut n = MAXPOW;

        let mut y0 = Complex::new((n % 2 == 1).ternary(-self.bet[n], 0.), 0.);
        let mut y1 = Complex::default();
        let mut z0 = Complex::new((n % 2 == 1).ternary(-2. * n as f64 * self.bet[n], 0.), 0.);
        let mut z1 = Complex::default();

        if n % 2 == 1 {
            n -= 1;
        }

        while n > 0 {
            y1 = a * y0 - y1 - self.bet[n];
            z1 = a * z0 - z1 - 2.*(n as f64) * self.bet[n];
            n -= 1;

            y0 = a * y1 - y0 - self.bet[n];
            z0 = a * z1 - z0 - 2.*(n as f64) * self.bet[n];
            n -= 1;
        }

        a /= 2.;
        z1 = 1. - z1 + a * z0;
        a = Complex::new(s0 * ch0, c0 * sh0);
        y1 = Complex::new(xi, eta) + a * y0;

        let mut gamma = atan2d(z1.im, z1.re);
        let mut k = self.b1 / z1.norm();

        let xip = y1.re;
        let etap = y1.im;
        let s = etap.sinh();
        let c = 0_f64.max(xip.cos());
        let r = s.hypot(c);

        let (mut lat, mut lon) = if is_zero(r) {
            k *= self.c;
            (f64::from(dms::QD), 0.)
        } else {
            let lon = atan2d(s, c);
            let sxip = xip.sin();
            let tau = tauf(sxip / r, self.es);

            gamma += atan2d(sxip * etap.tanh(), c);
            k *= (E2M + E2 / (1. + tau.powi(2))).sqrt() * 1_f64.hypot(tau) * r;

            (atand(tau), lon)
        };

        lat *= xi_sign;
        if backside {
            lon = f64::from(dms::HD) - lon;
        }
        lon *= eta_sign;
        lon = ang_normalize(lon + lon0);

        if backside {
            gamma = f64::from(dms::HD) - gamma;
        }
        gamma = ang_normalize(gamma * xi_sign * eta_sign);
        k *= self.k0;

        RawGeographic { latitude: lat, longitude: lon, convergence: gamma, scale: k }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn central_meridian_is_undistorted() {
        let tm = TransverseMercator::utm();
        for lat in [-75.0, -30.0, 0.0, 10.0, 40.0, 89.0] {
            let raw = tm.forward(3.0, lat, 3.0);
            assert_relative_eq!(raw.x, 0.0, epsilon = 1e-8);
            assert_relative_eq!(raw.convergence, 0.0, epsilon = 1e-9);
            assert_relative_eq!(raw.scale, UTM_K0, epsilon = 1e-9);
        }
        // Equator origin maps to the origin
        let raw = tm.forward(3.0, 0.0, 3.0);
        assert_relative_eq!(raw.y, 0.0, epsilon = 1e-8);
    }

    #[test]
    fn forward_reverse_consistency() {
        let tm = TransverseMercator::utm();
        for &(lat, lon) in &[
            (40.748333, -73.985278),
            (-33.865143, -71.2),
            (0.5, -74.9),
            (79.99, -73.0),
            (-79.99, -77.9),
        ] {
            let lon0 = -75.0;
            let fwd = tm.forward(lon0, lat, lon);
            let rev = tm.reverse(lon0, fwd.x, fwd.y);
            assert_relative_eq!(rev.latitude, lat, epsilon = 1e-11);
            assert_relative_eq!(rev.longitude, lon, epsilon = 1e-11);
            assert_relative_eq!(rev.convergence, fwd.convergence, epsilon = 1e-9);
            assert_relative_eq!(rev.scale, fwd.scale, epsilon = 1e-9);
        }
    }

    #[test]
    fn convergence_points_toward_the_pole() {
        let tm = TransverseMercator::utm();
        // East of the central meridian in the northern hemisphere, grid
        // north leans east of true north
        let raw = tm.forward(-75.0, 40.0, -73.0);
        assert!(raw.convergence > 0.);
        // gamma is roughly dlon * sin(lat)
        assert_relative_eq!(raw.convergence, 2.0 * 40_f64.to_radians().sin(), epsilon = 2e-2);
        // Mirrored south of the equator
        let raw = tm.reverse(-75.0, raw.x, -raw.y);
        assert!(raw.convergence < 0.);
    }

    #[test]
    fn scale_grows_away_from_the_central_meridian() {
        let tm = TransverseMercator::utm();
        let on_cm = tm.forward(-75.0, 40.0, -75.0);
        let off_cm = tm.forward(-75.0, 40.0, -72.0);
        assert!(off_cm.scale > on_cm.scale);

        // ~86km east of the meridian; k = k0 * (1 + (x/R)^2/2 + ...)
        let raw = tm.forward(-75.0, 40.748333, -73.985278);
        assert_relative_eq!(raw.scale, 0.999_690_333, epsilon = 1e-7);
    }
}
