use std::fmt;

use crate::activation::activation::{sigmoid, sigmoid_derivative, ActivationFn};
use crate::error::{NetworkError, Result};

/// Combines a neuron's input values with its weights into one net input.
///
/// `weights` always holds one more element than `inputs`: the trailing weight
/// is the bias, paired with an implicit constant input of `1`.
pub type NetInputFn = fn(&[f64], &[f64]) -> f64;

/// Weighted sum of the inputs plus `1 * bias`.
pub fn weighted_sum(inputs: &[f64], weights: &[f64]) -> f64 {
    let bias = weights.get(inputs.len()).copied().unwrap_or(0.0);
    inputs
        .iter()
        .zip(weights)
        .fold(bias, |acc, (x, w)| acc + x * w)
}

/// The three functions a neuron is built from.
#[derive(Clone, Copy)]
pub struct Transfer {
    net_input: NetInputFn,
    activation: ActivationFn,
    derivative: ActivationFn,
}

impl Transfer {
    pub fn builder() -> TransferBuilder {
        TransferBuilder::default()
    }

    /// Weighted sum plus bias, followed by the logistic sigmoid.
    pub fn sigmoid() -> Transfer {
        Transfer {
            net_input: weighted_sum,
            activation: sigmoid,
            derivative: sigmoid_derivative,
        }
    }

    pub fn net_input(&self, inputs: &[f64], weights: &[f64]) -> f64 {
        (self.net_input)(inputs, weights)
    }

    pub fn activate(&self, net: f64) -> f64 {
        (self.activation)(net)
    }

    pub fn derivative(&self, net: f64) -> f64 {
        (self.derivative)(net)
    }
}

impl Default for Transfer {
    fn default() -> Self {
        Transfer::sigmoid()
    }
}

/// Collects the transfer functions one at a time; `build` refuses to produce
/// a `Transfer` with a missing piece.
#[derive(Default, Clone, Copy)]
pub struct TransferBuilder {
    net_input: Option<NetInputFn>,
    activation: Option<ActivationFn>,
    derivative: Option<ActivationFn>,
}

impl TransferBuilder {
    pub fn net_input(mut self, f: NetInputFn) -> Self {
        self.net_input = Some(f);
        self
    }

    pub fn activation(mut self, f: ActivationFn) -> Self {
        self.activation = Some(f);
        self
    }

    pub fn derivative(mut self, f: ActivationFn) -> Self {
        self.derivative = Some(f);
        self
    }

    pub fn build(self) -> Result<Transfer> {
        let missing = |name: &str| NetworkError::InvalidArgument(format!("{name} function is not set"));
        Ok(Transfer {
            net_input: self.net_input.ok_or_else(|| missing("net input"))?,
            activation: self.activation.ok_or_else(|| missing("activation"))?,
            derivative: self.derivative.ok_or_else(|| missing("activation derivative"))?,
        })
    }
}

impl fmt::Debug for Transfer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transfer")
            .field("net_input", &(self.net_input as *const ()))
            .field("activation", &(self.activation as *const ()))
            .field("derivative", &(self.derivative as *const ()))
            .finish()
    }
}

impl fmt::Debug for TransferBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferBuilder")
            .field("net_input", &self.net_input.is_some())
            .field("activation", &self.activation.is_some())
            .field("derivative", &self.derivative.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn weighted_sum_adds_bias_once() {
        assert_abs_diff_eq!(weighted_sum(&[1.0, 2.0], &[0.5, -0.5, 0.0]), -0.5);
        assert_abs_diff_eq!(weighted_sum(&[1.0, 2.0], &[0.5, -0.5, 0.25]), -0.25);
        assert_abs_diff_eq!(weighted_sum(&[], &[0.75]), 0.75);
    }

    #[test]
    fn builder_requires_every_function() {
        let err = Transfer::builder()
            .net_input(weighted_sum)
            .activation(sigmoid)
            .build()
            .unwrap_err();
        assert!(matches!(err, NetworkError::InvalidArgument(_)));
        assert!(err.to_string().contains("derivative"));

        assert!(Transfer::builder().build().is_err());
    }

    #[test]
    fn builder_accepts_custom_functions() {
        let transfer = Transfer::builder()
            .net_input(weighted_sum)
            .activation(|x| x)
            .derivative(|_| 1.0)
            .build()
            .unwrap();
        assert_abs_diff_eq!(transfer.activate(3.5), 3.5);
        assert_abs_diff_eq!(transfer.derivative(3.5), 1.0);
    }
}
