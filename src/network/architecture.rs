use std::fmt;

use serde::{Serialize, Deserialize};

use crate::error::{NetError, Result};

/// Fewest layers a network can have: input and output.
pub const MIN_LAYERS: usize = 2;
/// Most layers the configuration surface allows.
pub const MAX_LAYERS: usize = 6;
/// Neuron count of a hidden layer added through `add_hidden_layer`.
pub const NEW_HIDDEN_LAYER_SIZE: usize = 3;

/// Ordered per-layer neuron counts, input first and output last.
///
/// This is the bounded configuration surface: besides the engine rules
/// (at least two layers, every size positive) it caps depth at
/// [`MAX_LAYERS`]. Serialized as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Architecture {
    sizes: Vec<usize>,
}

impl Architecture {
    pub fn new(sizes: Vec<usize>) -> Result<Architecture> {
        validate_sizes(&sizes)?;
        if sizes.len() > MAX_LAYERS {
            return Err(NetError::invalid_architecture(format!(
                "{} layers exceeds the maximum of {MAX_LAYERS}",
                sizes.len()
            )));
        }
        Ok(Architecture { sizes })
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Always false once validated.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[self.sizes.len() - 1]
    }

    /// Inserts a hidden layer of [`NEW_HIDDEN_LAYER_SIZE`] neurons right
    /// before the output layer.
    pub fn add_hidden_layer(&mut self) -> Result<()> {
        if self.sizes.len() >= MAX_LAYERS {
            return Err(NetError::invalid_architecture(format!(
                "maximum number of layers reached ({MAX_LAYERS})"
            )));
        }
        let at = self.sizes.len() - 1;
        self.sizes.insert(at, NEW_HIDDEN_LAYER_SIZE);
        Ok(())
    }

    /// Removes the last hidden layer, keeping input and output.
    pub fn remove_hidden_layer(&mut self) -> Result<()> {
        if self.sizes.len() <= MIN_LAYERS {
            return Err(NetError::invalid_architecture(format!(
                "minimum number of layers reached ({MIN_LAYERS})"
            )));
        }
        let at = self.sizes.len() - 2;
        self.sizes.remove(at);
        Ok(())
    }

    /// Sets the neuron count of one layer.
    pub fn resize_layer(&mut self, layer: usize, size: usize) -> Result<()> {
        crate::error::check_index("layer", layer, self.sizes.len())?;
        if size == 0 {
            return Err(NetError::invalid_architecture(format!(
                "layer {layer} must have at least one neuron"
            )));
        }
        self.sizes[layer] = size;
        Ok(())
    }
}

impl Default for Architecture {
    /// `[2, 3, 1]`: two inputs, one hidden layer of three, one output.
    fn default() -> Self {
        Architecture { sizes: vec![2, 3, 1] }
    }
}

impl TryFrom<Vec<usize>> for Architecture {
    type Error = NetError;

    fn try_from(sizes: Vec<usize>) -> Result<Architecture> {
        Architecture::new(sizes)
    }
}

impl From<Architecture> for Vec<usize> {
    fn from(arch: Architecture) -> Vec<usize> {
        arch.sizes
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.sizes.iter().map(|s| s.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Engine-level rules: at least two layers, every layer non-empty.
pub fn validate_sizes(sizes: &[usize]) -> Result<()> {
    if sizes.len() < MIN_LAYERS {
        return Err(NetError::invalid_architecture(format!(
            "need at least {MIN_LAYERS} layers, got {}",
            sizes.len()
        )));
    }
    if let Some(layer) = sizes.iter().position(|&s| s == 0) {
        return Err(NetError::invalid_architecture(format!(
            "layer {layer} must have at least one neuron"
        )));
    }
    Ok(())
}
