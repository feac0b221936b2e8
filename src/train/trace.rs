/// Per-layer activations from one forward pass.
///
/// Entry 0 is the input exactly as given; the last entry is the network
/// output. There is one entry per architecture layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationTrace {
    layers: Vec<Vec<f64>>,
}

impl ActivationTrace {
    pub(crate) fn new(layers: Vec<Vec<f64>>) -> ActivationTrace {
        debug_assert!(layers.len() >= 2);
        ActivationTrace { layers }
    }

    pub fn layers(&self) -> &[Vec<f64>] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&[f64]> {
        self.layers.get(index).map(Vec::as_slice)
    }

    pub fn input(&self) -> &[f64] {
        &self.layers[0]
    }

    pub fn output(&self) -> &[f64] {
        &self.layers[self.layers.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn into_output(mut self) -> Vec<f64> {
        self.layers.pop().unwrap_or_default()
    }
}

/// Per-layer error terms from one backward pass.
///
/// Entry `i` belongs to connection layer `i`, i.e. to architecture layer
/// `i + 1`. The input layer has no error term.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorTrace {
    deltas: Vec<Vec<f64>>,
}

impl ErrorTrace {
    pub(crate) fn new(deltas: Vec<Vec<f64>>) -> ErrorTrace {
        ErrorTrace { deltas }
    }

    pub fn deltas(&self) -> &[Vec<f64>] {
        &self.deltas
    }

    pub fn layer(&self, index: usize) -> Option<&[f64]> {
        self.deltas.get(index).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}
