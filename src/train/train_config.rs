/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`              : total number of full passes over the training data
/// - `shuffle`             : visit the samples in a fresh random order each epoch
/// - `accuracy_threshold`  : when set, outputs and labels are thresholded at this
///                           value and per-epoch classification accuracy is reported
/// - `log_every`           : emit an `info!` event every this many epochs (0 = never)
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub epochs: usize,
    pub shuffle: bool,
    pub accuracy_threshold: Option<f64>,
    pub log_every: usize,
}

impl TrainConfig {
    /// Creates a `TrainConfig` that shuffles, skips accuracy and logs every 100 epochs.
    pub fn new(epochs: usize) -> Self {
        TrainConfig {
            epochs,
            shuffle: true,
            accuracy_threshold: None,
            log_every: 100,
        }
    }

    pub fn with_accuracy_threshold(mut self, threshold: f64) -> Self {
        self.accuracy_threshold = Some(threshold);
        self
    }
}
