pub mod activation;
pub mod transfer;

pub use activation::{sigmoid, sigmoid_derivative, ActivationFn};
pub use transfer::{weighted_sum, NetInputFn, Transfer, TransferBuilder};
