//! Special functions: the error function and complete elliptic integrals.
//!
//! All three use Abramowitz & Stegun polynomial approximations
//! (7.1.26 for erf, 17.3.34 and 17.3.36 for K and E). The elliptic
//! parameter convention is m = k².

/// Error function erf(x), |error| < 1.5e-7.
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let p = 0.327_591_1;
    let a1 = 0.254_829_592;
    let a2 = -0.284_496_736;
    let a3 = 1.421_413_741;
    let a4 = -1.453_152_027;
    let a5 = 1.061_405_429;

    let t = 1.0 / (1.0 + p * x);
    let poly = t * (a1 + t * (a2 + t * (a3 + t * (a4 + t * a5))));
    sign * (1.0 - poly * (-x * x).exp())
}

/// Complete elliptic integral of the first kind K(m), 0 <= m < 1.
///
/// Diverges at m = 1; returns `f64::INFINITY` there instead of evaluating `ln(0)`.
pub fn ellipk(m: f64) -> f64 {
    if m >= 1.0 {
        return f64::INFINITY;
    }
    let m1 = 1.0 - m;

    let a0 = 1.386_294_361_12;
    let a1 = 0.096_663_442_59;
    let a2 = 0.035_900_923_83;
    let a3 = 0.037_425_637_13;
    let a4 = 0.014_511_962_12;

    let b0 = 0.5;
    let b1 = 0.124_985_935_97;
    let b2 = 0.068_802_485_76;
    let b3 = 0.033_283_553_46;
    let b4 = 0.004_417_870_12;

    let poly_a = a0 + m1 * (a1 + m1 * (a2 + m1 * (a3 + m1 * a4)));
    let poly_b = b0 + m1 * (b1 + m1 * (b2 + m1 * (b3 + m1 * b4)));

    poly_a + poly_b * (-m1.ln())
}

/// Complete elliptic integral of the second kind E(m), 0 <= m <= 1.
pub fn ellipe(m: f64) -> f64 {
    if m >= 1.0 {
        return 1.0;
    }
    let m1 = 1.0 - m;

    let a1 = 0.443_251_414_63;
    let a2 = 0.062_606_012_20;
    let a3 = 0.047_573_835_46;
    let a4 = 0.017_365_064_51;

    let b1 = 0.249_983_683_10;
    let b2 = 0.092_001_800_37;
    let b3 = 0.040_696_975_26;
    let b4 = 0.005_264_496_39;

    let poly_a = 1.0 + m1 * (a1 + m1 * (a2 + m1 * (a3 + m1 * a4)));
    let poly_b = m1 * (b1 + m1 * (b2 + m1 * (b3 + m1 * b4)));

    poly_a + poly_b * (-m1.ln())
}
