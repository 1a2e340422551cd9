use crate::activation::transfer::Transfer;
use crate::error::{check_index, NetworkError, Result};
use crate::neuron::signal::{Signal, SignalReader};

/// A single artificial neuron.
///
/// `weights` always holds `inputs.len() + 1` entries; the last one is the bias
/// weight, paired with a constant input of `1`.
#[derive(Debug)]
pub struct Neuron {
    transfer: Transfer,
    inputs: Vec<SignalReader>,
    weights: Vec<f64>,
    output: Signal,
}

impl Neuron {
    /// Creates an unconnected neuron whose only weight is `bias`.
    pub fn new(transfer: Transfer, bias: f64) -> Neuron {
        Neuron {
            transfer,
            inputs: Vec::new(),
            weights: vec![bias],
            output: Signal::default(),
        }
    }

    /// Appends a connection; its weight goes just before the bias.
    pub fn add_connection(&mut self, source: SignalReader, weight: f64) {
        self.inputs.push(source);
        let bias_slot = self.weights.len() - 1;
        self.weights.insert(bias_slot, weight);
    }

    /// Drops every connection and its weight, keeping the bias.
    pub fn clear_connections(&mut self) {
        self.inputs.clear();
        let bias = self.bias();
        self.weights.clear();
        self.weights.push(bias);
    }

    /// Sets the weight of connection `index`. The bias is not addressable here.
    pub fn set_weight(&mut self, index: usize, value: f64) -> Result<()> {
        check_index("connection weight", index, self.input_count())?;
        self.weights[index] = value;
        Ok(())
    }

    pub fn set_bias(&mut self, value: f64) {
        let last = self.weights.len() - 1;
        self.weights[last] = value;
    }

    /// Recomputes the output from the current values behind every input.
    pub fn evaluate(&mut self) {
        let out = self.transfer.activate(self.net_input());
        self.output.set(out);
    }

    pub fn net_input(&self) -> f64 {
        let values: Vec<f64> = self.inputs.iter().map(SignalReader::get).collect();
        self.transfer.net_input(&values, &self.weights)
    }

    /// Activation derivative at the current net input; never cached.
    pub fn derivative_output(&self) -> f64 {
        self.transfer.derivative(self.net_input())
    }

    /// Last computed output, `0.0` until the first `evaluate`.
    pub fn output_value(&self) -> f64 {
        self.output.get()
    }

    /// Handle through which downstream neurons read this neuron's output.
    pub fn output_handle(&self) -> SignalReader {
        self.output.reader()
    }

    pub fn input_value(&self, index: usize) -> Result<f64> {
        self.inputs
            .get(index)
            .map(SignalReader::get)
            .ok_or_else(|| NetworkError::out_of_range("input", index, self.inputs.len()))
    }

    /// Weight `index`, where `index == input_count()` is the bias.
    pub fn weight(&self, index: usize) -> Result<f64> {
        self.weights
            .get(index)
            .copied()
            .ok_or_else(|| NetworkError::out_of_range("weight", index, self.weights.len()))
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.weights[self.weights.len() - 1]
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn inputs(&self) -> &[SignalReader] {
        &self.inputs
    }

    /// `weight_i -= step * input_i` for every connection; the bias is left alone.
    pub(crate) fn descend(&mut self, step: f64) {
        for (w, input) in self.weights.iter_mut().zip(&self.inputs) {
            *w -= step * input.get();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn fixture() -> (Neuron, Signal, Signal) {
        let a = Signal::new(1.0);
        let b = Signal::new(2.0);
        let mut neuron = Neuron::new(Transfer::sigmoid(), 0.0);
        neuron.add_connection(a.reader(), 0.5);
        neuron.add_connection(b.reader(), -0.5);
        (neuron, a, b)
    }

    #[test]
    fn known_value_forward_pass() {
        let (mut neuron, _a, _b) = fixture();
        assert_eq!(neuron.output_value(), 0.0);

        neuron.evaluate();
        assert_abs_diff_eq!(neuron.net_input(), -0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(neuron.output_value(), 0.37754, epsilon = 1e-4);
        assert_abs_diff_eq!(neuron.derivative_output(), 0.23500, epsilon = 1e-4);
    }

    #[test]
    fn connections_are_inserted_before_the_bias() {
        let (neuron, _a, _b) = fixture();
        assert_eq!(neuron.input_count(), 2);
        assert_eq!(neuron.weights(), &[0.5, -0.5, 0.0]);
    }

    #[test]
    fn inputs_are_read_through() {
        let (mut neuron, a, _b) = fixture();
        a.set(3.0);
        assert_eq!(neuron.input_value(0).unwrap(), 3.0);
        neuron.evaluate();
        // 3 * 0.5 + 2 * -0.5 = 0.5
        assert_abs_diff_eq!(neuron.output_value(), 0.622_459_33, epsilon = 1e-6);
    }

    #[test]
    fn clear_keeps_only_the_bias() {
        let (mut neuron, _a, _b) = fixture();
        neuron.set_bias(0.75);
        neuron.clear_connections();
        assert_eq!(neuron.input_count(), 0);
        assert_eq!(neuron.weights(), &[0.75]);

        let c = Signal::new(1.0);
        neuron.add_connection(c.reader(), 0.25);
        assert_eq!(neuron.weights(), &[0.25, 0.75]);
    }

    #[test]
    fn set_weight_rejects_the_bias_slot() {
        let (mut neuron, _a, _b) = fixture();
        neuron.set_weight(1, 0.1).unwrap();
        assert_eq!(neuron.weight(1).unwrap(), 0.1);
        assert!(matches!(
            neuron.set_weight(2, 1.0),
            Err(NetworkError::IndexOutOfRange { index: 2, len: 2, .. })
        ));
    }

    #[test]
    fn accessors_are_bounds_checked() {
        let (neuron, _a, _b) = fixture();
        assert!(neuron.input_value(1).is_ok());
        assert!(matches!(neuron.input_value(2), Err(NetworkError::IndexOutOfRange { .. })));
        assert_eq!(neuron.weight(2).unwrap(), 0.0);
        assert!(matches!(neuron.weight(3), Err(NetworkError::IndexOutOfRange { .. })));
    }

    #[test]
    fn descend_moves_connection_weights_only() {
        let (mut neuron, _a, _b) = fixture();
        neuron.set_bias(0.3);
        neuron.descend(0.1);
        assert_abs_diff_eq!(neuron.weight(0).unwrap(), 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(neuron.weight(1).unwrap(), -0.7, epsilon = 1e-12);
        assert_eq!(neuron.bias(), 0.3);
    }
}
