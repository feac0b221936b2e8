use std::time::Instant;

use log::{debug, info, warn};
use rand::seq::SliceRandom;

use crate::error::Result;
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::train::dataset::{validate_dataset, Sample};
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::Trainer;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` online for `config.epochs` epochs, one `train_step` per
/// sample, and returns the mean loss of the **last completed epoch**.
///
/// Every sample is checked against the architecture before the first update,
/// so a malformed dataset is rejected with the network untouched.
///
/// # Early termination
/// The loop stops after the current epoch if the `progress_tx` receiver has
/// been dropped.
pub fn train_loop(
    network: &mut Network,
    trainer: &Trainer,
    dataset: &[Sample],
    config: &TrainConfig,
) -> Result<f64> {
    validate_dataset(network, dataset)?;

    info!(
        "training {:?} on {} samples for {} epochs (lr={})",
        network.architecture(),
        dataset.len(),
        config.epochs,
        config.learning_rate
    );

    let mut last_train_loss = 0.0;
    let mut warned_non_finite = false;

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        let train_loss = run_one_epoch(network, trainer, dataset, config)?;
        last_train_loss = train_loss;

        if !train_loss.is_finite() && !warned_non_finite {
            warn!("epoch {epoch}: loss is {train_loss}; parameters have diverged");
            warned_non_finite = true;
        }
        if config.log_every > 0 && epoch % config.log_every == 0 {
            debug!("epoch {epoch}/{}: loss = {train_loss:.6}", config.epochs);
        }

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                debug!("progress receiver dropped, stopping after epoch {epoch}");
                break;
            }
        }
    }

    info!("training finished, final loss = {last_train_loss:.6}");
    Ok(last_train_loss)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// One pass over the dataset. Returns the mean pre-update loss.
fn run_one_epoch(
    network: &mut Network,
    trainer: &Trainer,
    dataset: &[Sample],
    config: &TrainConfig,
) -> Result<f64> {
    let n = dataset.len();
    if n == 0 {
        return Ok(0.0);
    }

    let mut indices: Vec<usize> = (0..n).collect();
    if config.shuffle {
        indices.shuffle(&mut rand::thread_rng());
    }

    let mut total_loss = 0.0;
    for &idx in &indices {
        let sample = &dataset[idx];
        let trace = trainer.step(network, &sample.input, &sample.target, config.learning_rate)?;
        total_loss += MseLoss::loss(trace.output(), &sample.target);
    }

    Ok(total_loss / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    use crate::error::NetError;
    use crate::train::dataset::xor_dataset;

    #[test]
    fn bad_sample_rejects_whole_run() {
        let mut net = Network::seeded(&[2, 3, 1], 1).unwrap();
        let before = net.clone();
        let mut data = xor_dataset();
        data.push(Sample::new(vec![1.0], vec![0.0]));

        let cfg = TrainConfig::new(5, 0.1).unwrap();
        let res = train_loop(&mut net, &Trainer::default(), &data, &cfg);
        assert!(matches!(res, Err(NetError::DimensionMismatch { what: "input", .. })));
        assert_eq!(net, before);
    }

    #[test]
    fn emits_one_stat_per_epoch() {
        let mut net = Network::seeded(&[2, 3, 1], 2).unwrap();
        let (tx, rx) = mpsc::channel();
        let cfg = TrainConfig::new(7, 0.1).unwrap().with_progress(tx);

        let last = train_loop(&mut net, &Trainer::default(), &xor_dataset(), &cfg).unwrap();
        drop(cfg);

        let stats: Vec<EpochStats> = rx.iter().collect();
        assert_eq!(stats.len(), 7);
        assert_eq!(stats[0].epoch, 1);
        assert!(stats.iter().all(|s| s.total_epochs == 7));
        assert_eq!(stats[6].train_loss, last);
    }

    #[test]
    fn dropped_receiver_stops_early() {
        let mut net = Network::seeded(&[2, 3, 1], 2).unwrap();
        let before = net.clone();
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let cfg = TrainConfig::new(1000, 0.1).unwrap().with_progress(tx);

        train_loop(&mut net, &Trainer::default(), &xor_dataset(), &cfg).unwrap();

        // Exactly one epoch ran: four steps from the starting parameters.
        let mut expected = before;
        for s in xor_dataset() {
            Trainer::default().train_step(&mut expected, &s.input, &s.target, 0.1).unwrap();
        }
        assert_eq!(net, expected);
    }

    #[test]
    fn zero_epochs_is_a_no_op() {
        let mut net = Network::seeded(&[2, 3, 1], 2).unwrap();
        let before = net.clone();
        let cfg = TrainConfig::new(0, 0.1).unwrap();
        assert_eq!(train_loop(&mut net, &Trainer::default(), &xor_dataset(), &cfg).unwrap(), 0.0);
        assert_eq!(net, before);
    }

    #[test]
    fn shuffled_training_still_learns() {
        let mut net = Network::seeded(&[2, 3, 1], 5).unwrap();
        let trainer = Trainer::default();
        let data = [Sample::new(vec![1.0, 1.0], vec![1.0])];
        let start = crate::train::dataset::dataset_loss(&net, &trainer, &data).unwrap();
        let cfg = TrainConfig::new(200, 0.5).unwrap().shuffled();
        train_loop(&mut net, &trainer, &data, &cfg).unwrap();
        let end = crate::train::dataset::dataset_loss(&net, &trainer, &data).unwrap();
        assert!(end < start);
    }
}
