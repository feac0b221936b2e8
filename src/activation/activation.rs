use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Logistic sigmoid: `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the sigmoid with respect to its argument: `σ(x)·(1 − σ(x))`.
pub fn sigmoid_prime(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}

/// How the backward pass turns a neuron's stored activation into the slope
/// used for its error term.
///
/// Only activations are kept in the trace, never pre-activation sums, so the
/// slope has to be derived from the activation value `a`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivativeMode {
    /// `σ(a)·(1 − σ(a))`: the activation is fed through the sigmoid again.
    /// The default.
    #[default]
    Recomputed,
    /// `a·(1 − a)`: the textbook slope of a sigmoid output.
    FromActivation,
}

impl DerivativeMode {
    /// Slope at a neuron whose activation is `a`.
    pub fn slope(&self, a: f64) -> f64 {
        match self {
            DerivativeMode::Recomputed => sigmoid_prime(a),
            DerivativeMode::FromActivation => a * (1.0 - a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn sigmoid_known_values() {
        assert!((sigmoid(0.0) - 0.5).abs() < EPS);
        assert!((sigmoid(0.25) - 0.562_176_500_885_798_7).abs() < 1e-12);
        assert!(sigmoid(50.0) > 0.999_999);
        assert!(sigmoid(-50.0) < 1e-6);
    }

    #[test]
    fn recomputed_slope_feeds_activation_back_through_sigmoid() {
        let a = 0.7;
        let s = sigmoid(a);
        assert!((DerivativeMode::Recomputed.slope(a) - s * (1.0 - s)).abs() < EPS);
        // Not the same as the direct form.
        assert!((DerivativeMode::Recomputed.slope(a) - a * (1.0 - a)).abs() > 1e-3);
    }

    #[test]
    fn from_activation_slope_is_direct() {
        assert!((DerivativeMode::FromActivation.slope(0.7) - 0.21).abs() < EPS);
        assert_eq!(DerivativeMode::default(), DerivativeMode::Recomputed);
    }
}
