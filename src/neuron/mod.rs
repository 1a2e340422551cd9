pub mod neuron;
pub mod signal;

pub use neuron::Neuron;
pub use signal::{Signal, SignalReader};
