use crate::layers::dense::Layer;

/// Plain gradient descent with a fixed step size.
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to a layer given its error terms and the
    /// activations that fed it.
    pub fn step(&self, layer: &mut Layer, delta: &[f64], inputs: &[f64]) {
        layer.apply_gradients(delta, inputs, self.learning_rate);
    }
}
