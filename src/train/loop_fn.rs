use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::error::{NetworkError, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs of online gradient descent and
/// returns the statistics of every epoch.
///
/// # Arguments
/// - `network`      : mutable reference to the network; modified in place
/// - `train_inputs` : training samples, each of length `network.input_width()`
/// - `train_labels` : corresponding targets, each of length `network.output_width()`
/// - `validation`   : optional `(inputs, labels)` evaluated after every epoch
/// - `optimizer`    : carries the learning rate
/// - `config`       : epochs, shuffling, accuracy threshold, log cadence
/// - `rng`          : drives the per-epoch shuffle
///
/// Every sample (training and validation) is checked before the first update,
/// so a malformed dataset leaves the network untouched.
pub fn train_loop<R, S: Rng + ?Sized>(
    network: &mut Network<R>,
    train_inputs: &[Vec<f64>],
    train_labels: &[Vec<f64>],
    validation: Option<(&[Vec<f64>], &[Vec<f64>])>,
    optimizer: &Sgd,
    config: &TrainConfig,
    rng: &mut S,
) -> Result<Vec<EpochStats>> {
    if train_inputs.is_empty() {
        return Err(NetworkError::InvalidArgument("no training samples".to_string()));
    }
    check_samples(network, train_inputs, train_labels)?;
    if let Some((vi, vl)) = validation {
        check_samples(network, vi, vl)?;
    }

    let mut order: Vec<usize> = (0..train_inputs.len()).collect();
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        if config.shuffle {
            order.shuffle(rng);
        }
        let mut total_loss = 0.0;
        for &idx in &order {
            let output = network.predict(&train_inputs[idx])?;
            total_loss += MseLoss::loss(&output, &train_labels[idx]);
            optimizer.step(network, &train_inputs[idx], &train_labels[idx])?;
        }
        let train_loss = total_loss / order.len() as f64;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let train_accuracy = match config.accuracy_threshold {
            Some(t) => Some(classification_accuracy(network, train_inputs, train_labels, t)?),
            None => None,
        };

        let (val_loss, val_accuracy) = match validation {
            Some((vi, vl)) => {
                let loss = mean_loss(network, vi, vl)?;
                let accuracy = match config.accuracy_threshold {
                    Some(t) => Some(classification_accuracy(network, vi, vl, t)?),
                    None => None,
                };
                (Some(loss), accuracy)
            }
            None => (None, None),
        };

        if config.log_every > 0 && (epoch % config.log_every == 0 || epoch == config.epochs) {
            info!(
                epoch,
                total = config.epochs,
                train_loss,
                val_loss = ?val_loss,
                train_accuracy = ?train_accuracy,
                val_accuracy = ?val_accuracy,
                "epoch finished"
            );
        }

        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            val_loss,
            train_accuracy,
            val_accuracy,
            elapsed_ms,
        });
    }

    Ok(history)
}

/// Mean loss over a dataset without any weight update.
pub fn mean_loss<R>(
    network: &mut Network<R>,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
) -> Result<f64> {
    check_samples(network, inputs, labels)?;
    if inputs.is_empty() {
        return Ok(0.0);
    }
    let mut total = 0.0;
    for (input, label) in inputs.iter().zip(labels.iter()) {
        let output = network.predict(input)?;
        total += MseLoss::loss(&output, label);
    }
    Ok(total / inputs.len() as f64)
}

/// Fraction of samples whose every output lands on the same side of
/// `threshold` as the matching label.
pub fn classification_accuracy<R>(
    network: &mut Network<R>,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    threshold: f64,
) -> Result<f64> {
    check_samples(network, inputs, labels)?;
    if inputs.is_empty() {
        return Ok(0.0);
    }
    let mut correct = 0usize;
    for (input, label) in inputs.iter().zip(labels.iter()) {
        let output = network.predict(input)?;
        let hit = output.iter().zip(label.iter())
            .all(|(o, l)| (*o >= threshold) == (*l >= threshold));
        if hit {
            correct += 1;
        }
    }
    Ok(correct as f64 / inputs.len() as f64)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Checks that inputs and labels pair up and match the network's widths.
pub(crate) fn check_samples<R>(
    network: &Network<R>,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
) -> Result<()> {
    if inputs.len() != labels.len() {
        return Err(NetworkError::mismatch("label set", inputs.len(), labels.len()));
    }
    if let Some(bad) = inputs.iter().find(|x| x.len() != network.input_width()) {
        return Err(NetworkError::mismatch("input", network.input_width(), bad.len()));
    }
    if let Some(bad) = labels.iter().find(|y| y.len() != network.output_width()) {
        return Err(NetworkError::mismatch("expected output", network.output_width(), bad.len()));
    }
    Ok(())
}
