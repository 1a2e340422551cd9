//! A from-scratch multi-layer perceptron.
//!
//! Every neuron owns its output and holds read handles onto the values it
//! consumes, so layers can be inserted anywhere in a live network and the
//! affected neighbours are simply rewired.

pub mod error;
pub mod activation;
pub mod neuron;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use activation::transfer::{Transfer, TransferBuilder};
pub use neuron::neuron::Neuron;
pub use layers::layer::Layer;
pub use network::network::Network;
pub use network::spec::{NetworkSpec, RewirePolicy, WeightRange};
pub use loss::mse::MseLoss;
pub use optim::sgd::Sgd;
pub use train::trainer::train_network;
pub use train::loop_fn::{train_loop, classification_accuracy, mean_loss};
pub use train::train_config::TrainConfig;
