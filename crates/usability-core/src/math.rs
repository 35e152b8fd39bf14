//! Mathematical utilities for hypothesis testing
//!
//! Tail probabilities of the reference distributions used by the tests in
//! `usability-inference`. Upper tails are computed directly from the
//! regularized incomplete gamma/beta functions so that small p-values keep
//! their precision.

/// Distribution-related mathematical functions
pub mod distributions {
    /// Standard normal distribution utilities
    pub mod normal {
        use statrs::function::erf::{erfc, erfc_inv};
        use std::f64::consts::SQRT_2;

        /// Cumulative distribution function of the standard normal distribution
        pub fn cdf(x: f64) -> f64 {
            0.5 * erfc(-x / SQRT_2)
        }

        /// Survival function (upper tail) of the standard normal distribution
        pub fn sf(x: f64) -> f64 {
            0.5 * erfc(x / SQRT_2)
        }

        /// Inverse CDF (percent point function) of the standard normal distribution
        pub fn ppf(p: f64) -> f64 {
            if p <= 0.0 {
                return f64::NEG_INFINITY;
            }
            if p >= 1.0 {
                return f64::INFINITY;
            }
            -SQRT_2 * erfc_inv(2.0 * p)
        }

        #[cfg(test)]
        mod tests {
            use super::*;
            use approx::assert_abs_diff_eq;

            #[test]
            fn test_normal_cdf() {
                assert_abs_diff_eq!(cdf(0.0), 0.5, epsilon = 1e-12);
                assert_abs_diff_eq!(cdf(-1.959963984540054), 0.025, epsilon = 1e-9);
                assert_abs_diff_eq!(sf(1.959963984540054), 0.025, epsilon = 1e-9);
            }

            #[test]
            fn test_normal_ppf() {
                assert_abs_diff_eq!(ppf(0.5), 0.0, epsilon = 1e-12);
                assert_abs_diff_eq!(ppf(0.975), 1.959963984540054, epsilon = 1e-9);
                assert_eq!(ppf(0.0), f64::NEG_INFINITY);
                assert_eq!(ppf(1.0), f64::INFINITY);
            }

            #[test]
            fn test_cdf_ppf_inverse() {
                for &p in &[0.001, 0.01, 0.05, 0.1, 0.25, 0.5, 0.75, 0.9, 0.95, 0.99] {
                    let x = ppf(p);
                    assert!((cdf(x) - p).abs() < 1e-10, "Failed for p={p}");
                }
            }
        }
    }

    /// Chi-squared distribution utilities
    pub mod chi_squared {
        use crate::{Error, Result};
        use statrs::function::gamma::gamma_ur;

        /// Upper tail P(X > x) for X ~ χ²(df)
        pub fn sf(x: f64, df: f64) -> Result<f64> {
            if !(df > 0.0) || !df.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "chi-squared degrees of freedom must be positive, got {df}"
                )));
            }
            if x.is_nan() {
                return Err(Error::non_finite("chi-squared statistic"));
            }
            if x <= 0.0 {
                return Ok(1.0);
            }
            if x.is_infinite() {
                return Ok(0.0);
            }
            Ok(gamma_ur(df / 2.0, x / 2.0))
        }

        #[cfg(test)]
        mod tests {
            use super::*;
            use approx::assert_abs_diff_eq;

            #[test]
            fn test_chi_squared_sf() {
                // χ²(1) critical value at 0.05
                assert_abs_diff_eq!(sf(3.841458820694124, 1.0).unwrap(), 0.05, epsilon = 1e-9);
                // χ²(2) has sf(x) = exp(-x / 2)
                assert_abs_diff_eq!(sf(4.0, 2.0).unwrap(), (-2.0f64).exp(), epsilon = 1e-12);
                assert_eq!(sf(0.0, 2.0).unwrap(), 1.0);
                assert_eq!(sf(f64::INFINITY, 2.0).unwrap(), 0.0);
            }

            #[test]
            fn test_chi_squared_invalid() {
                assert!(sf(1.0, 0.0).is_err());
                assert!(sf(f64::NAN, 2.0).is_err());
            }
        }
    }

    /// Fisher-Snedecor (F) distribution utilities
    pub mod fisher {
        use crate::{Error, Result};
        use statrs::function::beta::beta_reg;

        /// Upper tail P(X > x) for X ~ F(d1, d2)
        pub fn sf(x: f64, d1: f64, d2: f64) -> Result<f64> {
            if !(d1 > 0.0 && d2 > 0.0) || !d1.is_finite() || !d2.is_finite() {
                return Err(Error::InvalidParameter(format!(
                    "F degrees of freedom must be positive, got ({d1}, {d2})"
                )));
            }
            if x.is_nan() {
                return Err(Error::non_finite("F statistic"));
            }
            if x <= 0.0 {
                return Ok(1.0);
            }
            if x.is_infinite() {
                return Ok(0.0);
            }
            Ok(beta_reg(d2 / 2.0, d1 / 2.0, d2 / (d2 + d1 * x)))
        }

        #[cfg(test)]
        mod tests {
            use super::*;
            use approx::assert_abs_diff_eq;

            #[test]
            fn test_fisher_sf() {
                // F(2, 12) critical value at 0.05
                assert_abs_diff_eq!(sf(3.8852938346523933, 2.0, 12.0).unwrap(), 0.05, epsilon = 1e-8);
                // F(1, d2) equals a squared t; t(10) = 2.228138851986274 at 0.025 per tail
                let t: f64 = 2.228138851986274;
                assert_abs_diff_eq!(sf(t * t, 1.0, 10.0).unwrap(), 0.05, epsilon = 1e-8);
                assert_eq!(sf(0.0, 2.0, 3.0).unwrap(), 1.0);
                assert_eq!(sf(f64::INFINITY, 2.0, 3.0).unwrap(), 0.0);
            }

            #[test]
            fn test_fisher_invalid() {
                assert!(sf(1.0, 0.0, 3.0).is_err());
                assert!(sf(1.0, 2.0, -1.0).is_err());
                assert!(sf(f64::NAN, 2.0, 3.0).is_err());
            }
        }
    }
}
