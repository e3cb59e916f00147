//! Angle and auxiliary-latitude helpers shared by the projections.
//!
//! The degree-based trigonometry (`sincosd`, `atan2d`, ...) reduces the
//! argument to a quarter turn before touching the radian functions, so
//! results at multiples of 90 degrees are exact. Zone boundaries and
//! convergence signs depend on that exactness.

use crate::ThisOrThat;

pub(crate) mod dms {
    /// Degrees per quarter turn
    pub const QD: i32 = 90;
    /// Degrees per half turn
    pub const HD: i32 = 2 * QD;
    /// Degrees per turn
    pub const TD: i32 = 2 * HD;
}

pub(crate) fn is_zero(x: f64) -> bool {
    x.abs() < f64::EPSILON
}

fn eps_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < f64::EPSILON
}

/// Remainder on the round-to-nearest convention, `x - round(x/d)*d`.
pub(crate) fn remainder(x: f64, denom: f64) -> f64 {
    x - (x / denom).round() * denom
}

/// Error-free sum: returns `u + v` and the part lost to rounding.
fn sum(u: f64, v: f64) -> (f64, f64) {
    let s = u + v;
    let up = s - v;
    let vpp = s - up;

    let up = up - u;
    let vpp = vpp - v;

    let t = is_zero(s).ternary_lazy(|| s, || -(up + vpp));

    (s, t)
}

/// Evaluate a polynomial by Horner's method.
pub(crate) fn polyval(p: &[f64], x: f64) -> f64 {
    p
        .iter()
        .fold(0_f64, |acc, val| acc*x + val)
}

/// Normalize an angle to [-180, 180], keeping the sign of +/-180.
pub(crate) fn ang_normalize(x: f64) -> f64 {
    let value = remainder(x, f64::from(dms::TD));
    let hd = f64::from(dms::HD);

    if eps_eq(value.abs(), hd) {
        hd.copysign(x)
    } else {
        value
    }
}

/// Exact difference `y - x`, normalized.
pub(crate) fn ang_diff(x: f64, y: f64) -> f64 {
    let td = f64::from(dms::TD);
    // Use remainder instead of ang_normalize, since the boundary cases are
    // treated later taking account of the rounding error
    let (diff, err) = sum(remainder(-x, td), remainder(y, td));
    // This second sum can only change diff if abs(diff) < 128, so there is
    // no need to apply remainder yet again
    let (diff, err) = sum(remainder(diff, td), err);

    let hd = f64::from(dms::HD);
    // Fix the sign if diff = -180, 0, 180
    if is_zero(diff) || eps_eq(diff.abs(), hd) {
        // If err == 0, take sign from y - x
        // else (err != 0, implies diff = +/-180), diff and err must have
        // opposite signs
        let sign = if is_zero(err) { y - x } else { -err };
        diff.copysign(sign)
    } else {
        diff
    }
}

/// Sine and cosine of an angle in degrees, exact at quarter turns.
pub(crate) fn sincosd(x: f64) -> (f64, f64) {
    let mut r = remainder(x, f64::from(dms::TD));
    let q = (r / f64::from(dms::QD)).round();
    r -= f64::from(dms::QD) * q;

    let (s, c) = r.to_radians().sin_cos();
    let (sinx, cosx) = match (q as i64).rem_euclid(4) {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    };

    // Give sin(-0.0) and the like the sign of the argument, and fold any
    // -0.0 in the cosine to +0.0
    let sinx = is_zero(sinx).ternary_lazy(|| sinx.abs().copysign(x), || sinx);
    (sinx, cosx + 0.0)
}

/// Arctangent in degrees with the quadrant assigned exactly.
pub(crate) fn atan2d(y: f64, x: f64) -> f64 {
    let (mut x, mut y) = (x, y);
    let mut q = 0;
    if y.abs() > x.abs() {
        std::mem::swap(&mut x, &mut y);
        q = 2;
    }
    if x.is_sign_negative() {
        x = -x;
        q += 1;
    }

    let ang = y.atan2(x).to_degrees();
    match q {
        1 => (y >= 0.).ternary(f64::from(dms::HD), -f64::from(dms::HD)) - ang,
        2 => f64::from(dms::QD) - ang,
        3 => -f64::from(dms::QD) + ang,
        _ => ang,
    }
}

pub(crate) fn atand(x: f64) -> f64 {
    atan2d(x, 1.0)
}

/// Tangent of an angle in degrees.
pub(crate) fn tand(x: f64) -> f64 {
    let (s, c) = sincosd(x);
    s / c
}

pub(crate) fn eatanhe(x: f64, es: f64) -> f64 {
    if es.is_sign_positive() {
        es * (es * x).atanh()
    } else {
        -es * (es * x).atanh()
    }
}

/// tan of the conformal latitude from tan of the geographic latitude.
pub(crate) fn taupf(tau: f64, es: f64) -> f64 {
    // An infinite tau (the pole) maps to itself, not to NaN
    if !tau.is_finite() {
        return tau;
    }

    let tau1 = 1.0_f64.hypot(tau);
    let sig = eatanhe(tau / tau1, es).sinh();

    1.0_f64.hypot(sig) * tau - sig * tau1
}

/// Inverse of [`taupf`] by Newton's method.
#[allow(clippy::similar_names)]
pub(crate) fn tauf(taup: f64, es: f64) -> f64 {
    let numit = 5;
    let tol = f64::EPSILON.sqrt() / 10.0;

    let e2m = 1.0 - es.powi(2);
    let mut tau = if taup.abs() > 70.0 {
        taup * eatanhe(1.0, es).exp()
    } else {
        taup / e2m
    };

    let stol = tol * taup.abs().max(1.0);
    for _ in 0..numit {
        let taupa = taupf(tau, es);
        let dtau = (taup - taupa) * (1.0 + e2m * tau.powi(2))
            / (e2m * 1.0_f64.hypot(tau) * 1.0_f64.hypot(taupa));
        tau += dtau;
        if dtau.abs() < stol {
            break;
        }
    }
    tau
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn normalize_wraps_to_half_turn() {
        assert_relative_eq!(ang_normalize(220.0), -140.0);
        assert_relative_eq!(ang_normalize(-541.0), 179.0);
        assert_relative_eq!(ang_normalize(540.0), 180.0);
        assert_relative_eq!(ang_normalize(0.0), 0.0);
    }

    #[test]
    fn diff_is_shorter_arc() {
        assert_relative_eq!(ang_diff(-177.0, 178.0), -5.0);
        assert_relative_eq!(ang_diff(10.0, 350.0), -20.0);
        assert_relative_eq!(ang_diff(0.0, 90.0), 90.0);
    }

    #[test]
    fn degree_trig_exact_at_quarter_turns() {
        assert_eq!(sincosd(90.0), (1.0, 0.0));
        assert_eq!(sincosd(180.0).1, -1.0);
        assert_eq!(sincosd(-90.0).0, -1.0);
        assert_eq!(atan2d(1.0, 0.0), 90.0);
        assert_eq!(atan2d(0.0, -1.0), 180.0);
        assert_relative_eq!(tand(45.0), 1.0);
    }

    #[test]
    fn conformal_latitude_round_trips() {
        let es = 0.081_819_190_842_621_49;
        for tau in [-10.0, -1.5, 0.0, 0.3, 2.0, 50.0] {
            assert_relative_eq!(tauf(taupf(tau, es), es), tau, max_relative = 1e-12, epsilon = 1e-12);
        }
    }
}
