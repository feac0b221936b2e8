pub mod trace;
pub mod trainer;
pub mod dataset;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use trace::{ActivationTrace, ErrorTrace};
pub use trainer::{evaluate, train_step, Trainer};
pub use dataset::{dataset_loss, validate_dataset, xor_dataset, Sample};
pub use epoch_stats::EpochStats;
pub use train_config::TrainConfig;
pub use loop_fn::train_loop;
