use std::process::ExitCode;

use ferrite_mlp::{NetworkSpec, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

// Builds the network described by a spec file (or a 2-3-1 default), runs it
// once on zeroed inputs and prints every weight.
//
//   cargo run -- path/to/spec.json
//   cargo run --example circle
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(std::env::args().nth(1)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(spec_path: Option<String>) -> Result<()> {
    let spec = match spec_path {
        Some(path) => NetworkSpec::load_json(&path)?,
        None => NetworkSpec::new(2, vec![3, 1]),
    };
    tracing::info!(inputs = spec.inputs, layers = ?spec.layers, "building network");

    let network = spec.build(StdRng::from_entropy())?;
    network.print();
    Ok(())
}
