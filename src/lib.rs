pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod config;

// Convenience re-exports
pub use error::{NetError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::DerivativeMode;
pub use layers::dense::Layer;
pub use network::{Architecture, Network, ParamEdit, ParamId};
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use train::{
    evaluate, train_loop, train_step, xor_dataset,
    ActivationTrace, EpochStats, ErrorTrace, Sample, TrainConfig, Trainer,
};
pub use config::EngineConfig;
