use std::sync::mpsc;

use crate::error::{NetError, Result};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        — number of full passes over the dataset
/// - `learning_rate` — step size of every update
/// - `shuffle`       — visit samples in a new random order each epoch
///                     instead of dataset order
/// - `log_every`     — emit a debug log line every this many epochs (0 = never)
/// - `progress_tx`   — optional channel sender; one `EpochStats` is sent per
///                     completed epoch.  If the receiver is dropped the loop
///                     terminates early.
#[derive(Debug)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub shuffle: bool,
    pub log_every: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Fixed-order training with no progress channel.
    ///
    /// Fails if `learning_rate` is not a positive finite number.
    pub fn new(epochs: usize, learning_rate: f64) -> Result<Self> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(NetError::InvalidConfig {
                reason: format!("learning rate must be positive and finite, got {learning_rate}"),
            });
        }
        Ok(TrainConfig {
            epochs,
            learning_rate,
            shuffle: false,
            log_every: 0,
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn shuffled(mut self) -> Self {
        self.shuffle = true;
        self
    }

    pub fn log_every(mut self, epochs: usize) -> Self {
        self.log_every = epochs;
        self
    }
}
