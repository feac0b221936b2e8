use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::activation::activation::DerivativeMode;
use crate::error::Result;
use crate::network::architecture::Architecture;
use crate::network::network::Network;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::Trainer;

/// Everything a host needs to build and train a network, stored as JSON.
///
/// Missing fields fall back to the defaults: `[2, 3, 1]`, learning rate
/// 0.1, 1000 epochs, recomputed sigmoid slope, random initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub architecture: Architecture,
    pub learning_rate: f64,
    pub epochs: usize,
    pub derivative: DerivativeMode,
    /// Fixed seed for parameter initialization; `None` draws fresh values.
    pub seed: Option<u64>,
    pub log_every: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            architecture: Architecture::default(),
            learning_rate: 0.1,
            epochs: 1000,
            derivative: DerivativeMode::default(),
            seed: None,
            log_every: 100,
        }
    }
}

impl EngineConfig {
    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Reads a config from JSON. The architecture bounds are checked while
    /// parsing; the learning rate is checked by [`EngineConfig::train_config`].
    pub fn load_json(path: impl AsRef<Path>) -> Result<EngineConfig> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    /// A freshly initialized network for the configured architecture.
    pub fn build_network(&self) -> Result<Network> {
        match self.seed {
            Some(seed) => Network::seeded(self.architecture.sizes(), seed),
            None => Network::new(self.architecture.sizes()),
        }
    }

    pub fn trainer(&self) -> Trainer {
        Trainer::new(self.derivative)
    }

    pub fn train_config(&self) -> Result<TrainConfig> {
        Ok(TrainConfig::new(self.epochs, self.learning_rate)?.log_every(self.log_every))
    }
}
