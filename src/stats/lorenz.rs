//! Lorenz curve and Gini coefficient.
//!
//! Holders are sorted by amount ascending. The curve plots cumulative % of
//! holders (x) against cumulative % of tokens (y), anchored at the origin.
//! Gini is `(A_eq - A_lorenz) / A_eq`, with `A_eq = 100 * 100 / 2` and
//! `A_lorenz` the trapezoidal area under the curve on the holder axis.

use serde::{Deserialize, Serialize};

/// A point on the Lorenz curve, both axes in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LorenzPoint {
    pub holders_pct: f64,
    pub tokens_pct: f64,
}

/// Lorenz curve points, starting at (0, 0) and ending at (100, 100)
///
/// Empty or all-zero inputs give just the origin.
pub fn lorenz_curve(amounts: &[u64]) -> Vec<LorenzPoint> {
    let mut sorted = amounts.to_vec();
    sorted.sort_unstable();

    let total: u128 = sorted.iter().map(|&a| u128::from(a)).sum();
    let n = sorted.len();

    let mut points = vec![LorenzPoint {
        holders_pct: 0.0,
        tokens_pct: 0.0,
    }];
    if n == 0 || total == 0 {
        return points;
    }

    let mut cumulative: u128 = 0;
    for (i, amount) in sorted.iter().enumerate() {
        cumulative += u128::from(*amount);
        points.push(LorenzPoint {
            holders_pct: (i + 1) as f64 / n as f64 * 100.0,
            tokens_pct: cumulative as f64 / total as f64 * 100.0,
        });
    }

    points
}

/// Gini coefficient in [0, 1]
///
/// With n holders, total T and cumulative sums C_i, every trapezoid has
/// width 100/n, so
///
/// ```text
/// A_lorenz = 10000 / (2 n T) * sum(C_i + C_{i-1})
/// gini     = 1 - sum(C_i + C_{i-1}) / (n T)
/// ```
///
/// The sum is taken in integers, so equal balances give exactly 0.
/// Empty or all-zero inputs give 0.
pub fn gini(amounts: &[u64]) -> f64 {
    let mut sorted = amounts.to_vec();
    sorted.sort_unstable();

    let n = sorted.len() as u128;
    let total: u128 = sorted.iter().map(|&a| u128::from(a)).sum();
    if n == 0 || total == 0 {
        return 0.0;
    }

    let mut previous: u128 = 0;
    let mut trapezoid_sum: u128 = 0;
    for amount in sorted {
        let current = previous + u128::from(amount);
        trapezoid_sum += current + previous;
        previous = current;
    }

    let equality = n * total;
    let value = (equality - trapezoid_sum) as f64 / equality as f64;
    value.clamp(0.0, 1.0)
}
