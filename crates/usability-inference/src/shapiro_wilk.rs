//! Shapiro-Wilk test for normality
//!
//! Implements Royston's approximation (algorithm AS R94, 1995): the
//! coefficients are derived from normal order-statistic approximations and
//! the p-value from normalising transformations of `ln(1 - W)`, with the
//! exact distribution used for n = 3.

use crate::traits::{HypothesisTest, OneSampleTest};
use crate::{TestKind, TestResult};
use usability_core::math::distributions::normal;
use usability_core::utils::{ensure_finite, sorted};
use usability_core::{Error, Result};

const SMALL: f64 = 1e-19;

// Polynomial coefficients from AS R94
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
const G: [f64; 2] = [-2.273, 0.459];

// 6 / pi and pi / 3, for the exact n = 3 distribution
const PI6: f64 = 1.90985931710274;
const STQR: f64 = 1.04719755119660;

/// Shapiro-Wilk normality test
///
/// Valid for 3 ≤ n ≤ 5000. A constant sample has no defined W and is
/// reported as a computation error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShapiroWilk;

impl ShapiroWilk {
    /// Create a new Shapiro-Wilk test
    pub fn new() -> Self {
        Self
    }
}

impl HypothesisTest for ShapiroWilk {
    fn kind(&self) -> TestKind {
        TestKind::ShapiroWilk
    }

    fn min_group_size(&self) -> usize {
        3
    }
}

impl OneSampleTest for ShapiroWilk {
    fn test(&self, sample: &[f64]) -> Result<TestResult> {
        let n = sample.len();
        if n < 3 {
            return Err(Error::too_few(3, n));
        }
        if n > 5000 {
            return Err(Error::InvalidInput(format!(
                "Shapiro-Wilk supports at most 5000 observations, got {n}"
            )));
        }
        ensure_finite(sample, "Shapiro-Wilk sample")?;

        let x = sorted(sample);
        let range = x[n - 1] - x[0];
        if range < SMALL {
            return Err(Error::degenerate("Shapiro-Wilk", "sample range is zero"));
        }

        let half = coefficients(n);
        let w1 = one_minus_w(&x, &half, range);
        let w = (1.0 - w1).clamp(0.0, 1.0);
        let p = p_value(n, w, w1);

        Ok(TestResult::new(TestKind::ShapiroWilk, w, p, vec![n]))
    }
}

/// Evaluate c[0] + c[1] x + c[2] x² + ...
fn poly(c: &[f64], x: f64) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ci| acc * x + ci)
}

/// The upper half of the antisymmetric coefficient vector, largest first
fn coefficients(n: usize) -> Vec<f64> {
    if n == 3 {
        return vec![std::f64::consts::FRAC_1_SQRT_2];
    }

    let half = n / 2;
    let an = n as f64;
    let an25 = an + 0.25;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal::ppf((i as f64 - 0.375) / an25))
        .collect();

    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;

    let mut a = vec![0.0; half];
    let (first_free, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        a[1] = a2;
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (1, fac)
    };
    a[0] = a1;
    for i in first_free..half {
        a[i] = -m[i] / fac;
    }
    a
}

/// 1 - W, computed as one minus the squared correlation between the sorted
/// sample and the coefficients to keep precision when W is close to 1
fn one_minus_w(x: &[f64], half: &[f64], range: f64) -> f64 {
    let n = x.len();
    let mut full = vec![0.0; n];
    for (i, &a) in half.iter().enumerate() {
        full[i] = -a;
        full[n - 1 - i] = a;
    }

    let sa = full.iter().sum::<f64>() / n as f64;
    let sx = x.iter().map(|v| v / range).sum::<f64>() / n as f64;

    let (mut ssa, mut ssx, mut sax) = (0.0, 0.0, 0.0);
    for (a, v) in full.iter().zip(x) {
        let asa = a - sa;
        let xsx = v / range - sx;
        ssa += asa * asa;
        ssx += xsx * xsx;
        sax += asa * xsx;
    }

    let ssassx = (ssa * ssx).sqrt();
    (ssassx - sax) * (ssassx + sax) / (ssa * ssx)
}

fn p_value(n: usize, w: f64, w1: f64) -> f64 {
    if n == 3 {
        return (PI6 * (w.sqrt().asin() - STQR)).max(0.0);
    }

    let an = n as f64;
    let mut y = w1.ln();
    let (m, s) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let xx = an.ln();
        (poly(&C5, xx), poly(&C6, xx).exp())
    };

    normal::sf((y - m) / s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_poly_matches_direct_evaluation() {
        let x: f64 = 0.3;
        let direct: f64 = C1.iter().enumerate().map(|(i, c)| c * x.powi(i as i32)).sum();
        assert_abs_diff_eq!(poly(&C1, x), direct, epsilon = 1e-15);
    }

    #[test]
    fn test_coefficients_are_normalised() {
        for n in [4, 5, 6, 11, 12, 50] {
            let a = coefficients(n);
            let norm: f64 = 2.0 * a.iter().map(|v| v * v).sum::<f64>();
            assert_abs_diff_eq!(norm, 1.0, epsilon = 1e-9);
            assert!(a.windows(2).all(|p| p[0] > p[1]), "n={n}: {a:?}");
        }
    }

    #[test]
    fn test_shapiro_wilk_reference_weights() {
        // Shapiro & Wilk (1965) weights of 11 men
        let data = [148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0];
        let result = ShapiroWilk::new().test(&data).unwrap();

        assert_abs_diff_eq!(result.statistic, 0.7888147, epsilon = 1e-6);
        assert_abs_diff_eq!(result.p_value, 0.0067038, epsilon = 1e-6);
        assert_eq!(result.sample_sizes, vec![11]);
    }

    #[test]
    fn test_shapiro_wilk_uniform_grid() {
        let result = ShapiroWilk::new().test(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_abs_diff_eq!(result.statistic, 0.9867622, epsilon = 1e-6);
        assert_abs_diff_eq!(result.p_value, 0.9671739, epsilon = 1e-6);
    }

    #[test]
    fn test_shapiro_wilk_three_observations_exact() {
        let result = ShapiroWilk::new().test(&[4.0, 1.0, 2.0]).unwrap();
        assert_abs_diff_eq!(result.statistic, 0.9642857, epsilon = 1e-6);
        assert_abs_diff_eq!(result.p_value, 0.6368868, epsilon = 1e-6);
    }

    #[test]
    fn test_shapiro_wilk_large_sample_branch() {
        let data: Vec<f64> = (1..=20).map(|i| i as f64).collect();
        let result = ShapiroWilk::new().test(&data).unwrap();
        assert_abs_diff_eq!(result.statistic, 0.9603752, epsilon = 1e-6);
        assert_abs_diff_eq!(result.p_value, 0.5513717, epsilon = 1e-6);
    }

    #[test]
    fn test_shapiro_wilk_rejects_outliers() {
        let mut data = vec![1.0; 18];
        data.push(20.0);
        data.push(30.0);
        let result = ShapiroWilk::new().test(&data).unwrap();
        assert!(result.p_value < 1e-6);
    }

    #[test]
    fn test_shapiro_wilk_order_invariant() {
        let a = ShapiroWilk::new().test(&[2.1, 3.4, 1.9, 5.6, 4.4, 3.3, 2.8, 4.0, 3.9, 2.5]).unwrap();
        let b = ShapiroWilk::new().test(&[5.6, 4.4, 4.0, 3.9, 3.4, 3.3, 2.8, 2.5, 2.1, 1.9]).unwrap();
        assert_eq!(a, b);
        assert_abs_diff_eq!(a.p_value, 0.8330653, epsilon = 1e-6);
    }

    #[test]
    fn test_shapiro_wilk_insufficient_data() {
        let err = ShapiroWilk::new().test(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err, Error::InsufficientData { expected: 3, actual: 2 });
    }

    #[test]
    fn test_shapiro_wilk_constant_sample() {
        let err = ShapiroWilk::new().test(&[3.0, 3.0, 3.0, 3.0]).unwrap_err();
        assert!(matches!(err, Error::Computation(_)));
    }

    #[test]
    fn test_shapiro_wilk_non_finite() {
        assert!(ShapiroWilk::new().test(&[1.0, f64::NAN, 2.0]).is_err());
    }
}
