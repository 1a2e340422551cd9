use serde::{Serialize, Deserialize};

/// Per-epoch training statistics returned by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean loss over the samples as they were visited during the epoch.
    pub train_loss: f64,
    /// Mean validation loss after the epoch, if a validation set was provided.
    pub val_loss: Option<f64>,
    /// Training accuracy in [0, 1]; only set when an accuracy threshold is configured.
    pub train_accuracy: Option<f64>,
    /// Validation accuracy in [0, 1]; needs both a threshold and a validation set.
    pub val_accuracy: Option<f64>,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}
