use log::trace;

use crate::{
    activation::activation::DerivativeMode,
    error::{check_len, Result},
    loss::mse::MseLoss,
    network::network::Network,
    optim::sgd::Sgd,
    train::trace::{ActivationTrace, ErrorTrace},
};

/// Forward evaluation, backpropagation and gradient-descent updates.
///
/// Holds only the derivative convention; all state lives in the
/// [`Network`] passed to each call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trainer {
    pub derivative: DerivativeMode,
}

impl Trainer {
    pub fn new(derivative: DerivativeMode) -> Trainer {
        Trainer { derivative }
    }

    /// Runs a forward pass and returns every layer's activations, starting
    /// with `input` itself.
    pub fn evaluate(&self, network: &Network, input: &[f64]) -> Result<ActivationTrace> {
        check_len("input", input.len(), network.input_size())?;

        let mut layers = Vec::with_capacity(network.architecture().len());
        layers.push(input.to_vec());
        for layer in network.layers() {
            let next = layer.feed_from(&layers[layers.len() - 1]);
            layers.push(next);
        }

        Ok(ActivationTrace::new(layers))
    }

    /// Forward pass keeping only the output vector.
    pub fn predict(&self, network: &Network, input: &[f64]) -> Result<Vec<f64>> {
        Ok(self.evaluate(network, input)?.into_output())
    }

    /// Computes the error term of every non-input neuron, output first and
    /// then back towards the first hidden layer.
    ///
    /// `trace` must come from [`Trainer::evaluate`] on the same network.
    pub fn backpropagate(
        &self,
        network: &Network,
        trace: &ActivationTrace,
        target: &[f64],
    ) -> Result<ErrorTrace> {
        check_len("target", target.len(), network.output_size())?;
        check_len("trace layers", trace.len(), network.architecture().len())?;
        for (activations, &size) in trace.layers().iter().zip(network.architecture()) {
            check_len("trace activations", activations.len(), size)?;
        }

        let layers = network.layers();
        let mut deltas: Vec<Vec<f64>> = Vec::with_capacity(layers.len());

        let output = trace.output();
        let output_delta = MseLoss::derivative(output, target)
            .into_iter()
            .zip(output)
            .map(|(err, &a)| err * self.derivative.slope(a))
            .collect();
        deltas.push(output_delta);

        // Connection layer i feeds architecture layer i + 1; its error flows
        // back onto the activations of architecture layer i.
        for i in (1..layers.len()).rev() {
            let downstream = &deltas[deltas.len() - 1];
            let activations = &trace.layers()[i];
            let delta = layers[i].backpropagate(downstream)
                .into_iter()
                .zip(activations)
                .map(|(err, &a)| err * self.derivative.slope(a))
                .collect();
            deltas.push(delta);
        }

        deltas.reverse();
        Ok(ErrorTrace::new(deltas))
    }

    /// One online gradient-descent step on a single labeled example.
    ///
    /// Both vectors are checked before anything runs, so a rejected call
    /// leaves the network unchanged.
    pub fn train_step(
        &self,
        network: &mut Network,
        input: &[f64],
        target: &[f64],
        learning_rate: f64,
    ) -> Result<()> {
        self.step(network, input, target, learning_rate)?;
        Ok(())
    }

    /// `train_step` that also hands back the pre-update activation trace.
    pub(crate) fn step(
        &self,
        network: &mut Network,
        input: &[f64],
        target: &[f64],
        learning_rate: f64,
    ) -> Result<ActivationTrace> {
        check_len("input", input.len(), network.input_size())?;
        check_len("target", target.len(), network.output_size())?;

        let activations = self.evaluate(network, input)?;
        let errors = self.backpropagate(network, &activations, target)?;

        // Every update reads the traces above, never a freshly updated layer.
        let optimizer = Sgd::new(learning_rate);
        for (i, layer) in network.layers_mut().iter_mut().enumerate() {
            optimizer.step(layer, &errors.deltas()[i], &activations.layers()[i]);
        }

        trace!(
            "train step: lr={learning_rate} loss={:.6}",
            MseLoss::loss(activations.output(), target)
        );
        Ok(activations)
    }
}

/// Forward pass with the default derivative convention.
pub fn evaluate(network: &Network, input: &[f64]) -> Result<ActivationTrace> {
    Trainer::default().evaluate(network, input)
}

/// Single training step with the default derivative convention.
pub fn train_step(network: &mut Network, input: &[f64], target: &[f64], learning_rate: f64) -> Result<()> {
    Trainer::default().train_step(network, input, target, learning_rate)
}
