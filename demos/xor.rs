// Trains the configured network on XOR and prints what it learned.
//
//   cargo run --example xor -- [config.json]
//   RUST_LOG=debug cargo run --example xor
use std::process::ExitCode;

use log::{error, info};
use tinker_nn::{train_loop, xor_dataset, EngineConfig, Result};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: Option<String>) -> Result<()> {
    let config = match config_path {
        Some(path) => {
            info!("loading config from {path}");
            EngineConfig::load_json(&path)?
        }
        None => EngineConfig::default(),
    };

    let mut network = config.build_network()?;
    let trainer = config.trainer();
    let dataset = xor_dataset();

    let loss = train_loop(&mut network, &trainer, &dataset, &config.train_config()?)?;
    println!("final loss after {} epochs: {loss:.6}", config.epochs);

    for sample in &dataset {
        let output = trainer.predict(&network, &sample.input)?;
        println!("{:?} -> {:.4?} (target {:?})", sample.input, output, sample.target);
    }
    Ok(())
}
