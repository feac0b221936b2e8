use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::activation::activation::sigmoid;
use crate::math::matrix::{uniform_signed, Matrix};

/// Parameters connecting one layer to the next.
///
/// `weights` has shape (size, input_size): row = destination neuron,
/// column = source neuron. `biases` has one entry per destination neuron.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer{
    pub weights: Matrix,
    pub biases: Vec<f64>,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(size: usize, input_size: usize, rng: &mut R) -> Layer {
        let weights = Matrix::random(size, input_size, rng);
        let biases = (0..size).map(|_| uniform_signed(rng)).collect();

        Layer {
            weights,
            biases,
        }
    }

    /// Number of destination neurons.
    pub fn size(&self) -> usize {
        self.weights.rows
    }

    /// Number of source neurons.
    pub fn input_size(&self) -> usize {
        self.weights.cols
    }

    /// `σ(b + W·input)` for each destination neuron. Reads parameters only.
    ///
    /// The weighted sum is accumulated starting from the bias.
    pub fn feed_from(&self, input: &[f64]) -> Vec<f64> {
        self.weights.data.iter()
            .zip(&self.biases)
            .map(|(row, &b)| {
                let z = row.iter().zip(input).fold(b, |acc, (w, x)| acc + w * x);
                sigmoid(z)
            })
            .collect()
    }

    /// Error term of each source neuron before the slope is applied:
    /// `sum_k weights[k][j] * delta[k]`.
    pub fn backpropagate(&self, delta: &[f64]) -> Vec<f64> {
        self.weights.transpose_mul_vec(delta)
    }

    /// `w[j][k] -= lr * delta[j] * inputs[k]` and `b[j] -= lr * delta[j]`.
    pub fn apply_gradients(&mut self, delta: &[f64], inputs: &[f64], lr: f64) {
        for ((row, bias), &d) in self.weights.data.iter_mut().zip(&mut self.biases).zip(delta) {
            *bias -= lr * d;
            for (w, &x) in row.iter_mut().zip(inputs) {
                *w -= lr * d * x;
            }
        }
    }

    /// `true` when the bias vector length matches the weight rows.
    pub fn is_consistent(&self) -> bool {
        self.biases.len() == self.weights.rows
            && self.weights.data.len() == self.weights.rows
            && self.weights.data.iter().all(|row| row.len() == self.weights.cols)
    }
}
