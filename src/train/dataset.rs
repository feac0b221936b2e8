use serde::{Serialize, Deserialize};

use crate::error::{check_len, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::train::trainer::Trainer;

/// One labeled example.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl Sample {
    pub fn new(input: Vec<f64>, target: Vec<f64>) -> Sample {
        Sample { input, target }
    }
}

/// The four XOR examples, in the order the interactive demo trains on them.
pub fn xor_dataset() -> Vec<Sample> {
    vec![
        Sample::new(vec![0.0, 0.0], vec![0.0]),
        Sample::new(vec![0.0, 1.0], vec![1.0]),
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
    ]
}

/// Checks every sample against the network's input and output sizes.
pub fn validate_dataset(network: &Network, dataset: &[Sample]) -> Result<()> {
    for sample in dataset {
        check_len("input", sample.input.len(), network.input_size())?;
        check_len("target", sample.target.len(), network.output_size())?;
    }
    Ok(())
}

/// Mean squared error over a dataset, without touching the parameters.
pub fn dataset_loss(network: &Network, trainer: &Trainer, dataset: &[Sample]) -> Result<f64> {
    if dataset.is_empty() {
        return Ok(0.0);
    }
    let mut total = 0.0;
    for sample in dataset {
        let output = trainer.predict(network, &sample.input)?;
        total += MseLoss::loss(&output, &sample.target);
    }
    Ok(total / dataset.len() as f64)
}
