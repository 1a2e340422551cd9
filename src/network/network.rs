use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::activation::transfer::Transfer;
use crate::error::{check_index, NetworkError, Result};
use crate::layers::layer::{self, Layer};
use crate::loss::mse::MseLoss;
use crate::network::spec::{RewirePolicy, WeightRange};
use crate::neuron::{Neuron, Signal, SignalReader};

/// A feed-forward stack of fully-connected layers.
///
/// Layer 0 reads the network inputs, layer `k > 0` reads every output of layer
/// `k - 1`, and the outputs of the last layer are the network outputs. Every
/// mutating operation re-runs the forward pass, so `output` is never stale.
///
/// The random source used for weight initialization is owned by the network;
/// pass a seeded `StdRng` for reproducible runs.
#[derive(Debug)]
pub struct Network<R = StdRng> {
    inputs: Vec<Signal>,
    layers: Vec<Layer>,
    layer_sizes: Vec<usize>,
    outputs: Vec<SignalReader>,
    weight_range: WeightRange,
    rewire: RewirePolicy,
    transfer: Transfer,
    rng: R,
}

impl Network<StdRng> {
    /// Shorthand for `with_layers` driven by `StdRng::seed_from_u64(seed)`.
    pub fn seeded(input_width: usize, layer_sizes: &[usize], seed: u64) -> Result<Network<StdRng>> {
        Network::with_layers(input_width, layer_sizes, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Network<R> {
    /// A network of `input_width` zeroed inputs and no layers.
    pub fn new(input_width: usize, rng: R) -> Result<Network<R>> {
        Network::with_range(input_width, WeightRange::default(), rng)
    }

    pub fn with_range(input_width: usize, weight_range: WeightRange, rng: R) -> Result<Network<R>> {
        if input_width == 0 {
            return Err(NetworkError::InvalidArgument(
                "a network needs at least one input".to_string(),
            ));
        }
        weight_range.validate()?;
        Ok(Network {
            inputs: (0..input_width).map(|_| Signal::new(0.0)).collect(),
            layers: Vec::new(),
            layer_sizes: Vec::new(),
            outputs: Vec::new(),
            weight_range,
            rewire: RewirePolicy::default(),
            transfer: Transfer::default(),
            rng,
        })
    }

    /// Builds the layers in order, each wired to its predecessor, then runs
    /// one forward pass.
    pub fn with_layers(input_width: usize, layer_sizes: &[usize], rng: R) -> Result<Network<R>> {
        let mut network = Network::new(input_width, rng)?;
        if let Some(k) = layer_sizes.iter().position(|&size| size == 0) {
            return Err(NetworkError::InvalidArgument(format!("layer {k} has no neurons")));
        }
        for &size in layer_sizes {
            network.push_layer(size)?;
        }
        network.evaluate();
        Ok(network)
    }

    /// Functions used by neurons created from now on. Existing neurons keep theirs.
    pub fn set_transfer(&mut self, transfer: Transfer) {
        self.transfer = transfer;
    }

    pub fn set_rewire_policy(&mut self, policy: RewirePolicy) {
        self.rewire = policy;
    }

    pub fn rewire_policy(&self) -> RewirePolicy {
        self.rewire
    }

    pub fn weight_range(&self) -> WeightRange {
        self.weight_range
    }

    /// Appends a layer after the current last one; it becomes the output layer.
    pub fn push_layer(&mut self, neuron_count: usize) -> Result<()> {
        let end = self.layers.len();
        self.insert_layer(neuron_count, Some(end)).map(|_| ())
    }

    /// Inserts a layer of `neuron_count` fresh neurons and returns where it went.
    ///
    /// `position` may be anything in `[0, layer_count]`; `None` places the layer
    /// just before the current output layer (or at 0 when there is none).
    ///
    /// The layer that followed the insertion point is reconnected to the new
    /// layer. Under [`RewirePolicy::Reinitialize`] its connection weights are
    /// drawn afresh, which discards whatever it had learned.
    pub fn insert_layer(&mut self, neuron_count: usize, position: Option<usize>) -> Result<usize> {
        if neuron_count == 0 {
            return Err(NetworkError::InvalidArgument(
                "cannot insert a layer with no neurons".to_string(),
            ));
        }
        let layer_count = self.layers.len();
        let index = match position {
            None => layer_count.saturating_sub(1),
            Some(i) if i <= layer_count => i,
            Some(i) => return Err(NetworkError::out_of_range("layer position", i, layer_count + 1)),
        };

        let mut fresh = layer::spawn(neuron_count, self.transfer, &self.weight_range, &mut self.rng);
        let sources = self.sources_for(index);
        layer::connect(&mut fresh, &sources, &self.weight_range, &mut self.rng);

        if let Some(next) = self.layers.get_mut(index) {
            let handles = layer::output_handles(&fresh);
            let kept = self.rewire == RewirePolicy::PreserveWhenCompatible
                && layer::reattach(next, &handles);
            if !kept {
                layer::connect(next, &handles, &self.weight_range, &mut self.rng);
            }
            debug!(layer = index + 1, kept_weights = kept, "rewired downstream layer");
        }

        self.layers.insert(index, fresh);
        self.layer_sizes.insert(index, neuron_count);
        self.outputs = self.layers.last().map(layer::output_handles).unwrap_or_default();
        self.evaluate();

        debug!(index, neurons = neuron_count, sizes = ?self.layer_sizes, "inserted layer");
        Ok(index)
    }

    /// What a layer placed at `index` has to read from.
    fn sources_for(&self, index: usize) -> Vec<SignalReader> {
        match index.checked_sub(1) {
            None => self.inputs.iter().map(Signal::reader).collect(),
            Some(prev) => layer::output_handles(&self.layers[prev]),
        }
    }
}

impl<R> Network<R> {
    /// Copies `values` into the inputs and runs the forward pass.
    pub fn set_input(&mut self, values: &[f64]) -> Result<()> {
        self.check_input(values)?;
        for (slot, &value) in self.inputs.iter().zip(values) {
            slot.set(value);
        }
        self.evaluate();
        Ok(())
    }

    /// Forward pass: every layer in order, every neuron within it.
    pub fn evaluate(&mut self) {
        for layer in &mut self.layers {
            for neuron in layer.iter_mut() {
                neuron.evaluate();
            }
        }
    }

    pub fn output(&self, index: usize) -> Result<f64> {
        self.outputs
            .get(index)
            .map(SignalReader::get)
            .ok_or_else(|| NetworkError::out_of_range("output", index, self.outputs.len()))
    }

    pub fn outputs(&self) -> Vec<f64> {
        self.outputs.iter().map(SignalReader::get).collect()
    }

    /// Sets `set_input(input)` and returns the resulting outputs.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.set_input(input)?;
        Ok(self.outputs())
    }

    pub fn set_weight(&mut self, layer: usize, neuron: usize, weight: usize, value: f64) -> Result<()> {
        self.neuron_mut(layer, neuron)?.set_weight(weight, value)?;
        self.evaluate();
        Ok(())
    }

    pub fn set_bias(&mut self, layer: usize, neuron: usize, value: f64) -> Result<()> {
        self.neuron_mut(layer, neuron)?.set_bias(value);
        self.evaluate();
        Ok(())
    }

    /// One step of online gradient descent on a single sample.
    ///
    /// The error terms of every layer are computed from the pre-update weights;
    /// only then are the connection weights moved. Biases are not trained.
    pub fn learn(&mut self, input: &[f64], expected: &[f64], learning_rate: f64) -> Result<()> {
        self.check_input(input)?;
        if expected.len() != self.output_width() {
            return Err(NetworkError::mismatch("expected output", self.output_width(), expected.len()));
        }

        self.set_input(input)?;
        let errors = self.backpropagate(expected);
        for (layer, layer_errors) in self.layers.iter_mut().zip(&errors) {
            for (neuron, error) in layer.iter_mut().zip(layer_errors) {
                neuron.descend(learning_rate * error);
            }
        }
        self.evaluate();

        trace!(loss = MseLoss::loss(&self.outputs(), expected), "learning step");
        Ok(())
    }

    /// Per-neuron error terms, one vector per layer, input side first.
    fn backpropagate(&self, expected: &[f64]) -> Vec<Vec<f64>> {
        let depth = self.layers.len();
        let mut errors = vec![Vec::new(); depth];
        let Some(last) = self.layers.last() else {
            return errors;
        };

        let predicted: Vec<f64> = last.iter().map(Neuron::output_value).collect();
        errors[depth - 1] = last
            .iter()
            .zip(MseLoss::derivative(&predicted, expected))
            .map(|(neuron, residual)| neuron.derivative_output() * residual)
            .collect();

        for l in (0..depth - 1).rev() {
            let downstream = &self.layers[l + 1];
            let layer_errors: Vec<f64> = self.layers[l]
                .iter()
                .enumerate()
                .map(|(j, neuron)| {
                    let fed_back: f64 = downstream
                        .iter()
                        .zip(&errors[l + 1])
                        .map(|(consumer, error)| consumer.weights()[j] * error)
                        .sum();
                    neuron.derivative_output() * fed_back
                })
                .collect();
            errors[l] = layer_errors;
        }
        errors
    }

    pub fn input_width(&self) -> usize {
        self.inputs.len()
    }

    /// Neuron count of the last layer, 0 while there are no layers.
    pub fn output_width(&self) -> usize {
        self.outputs.len()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn neuron(&self, layer: usize, neuron: usize) -> Result<&Neuron> {
        check_index("layer", layer, self.layers.len())?;
        let row = &self.layers[layer];
        check_index("neuron", neuron, row.len())?;
        Ok(&row[neuron])
    }

    fn neuron_mut(&mut self, layer: usize, neuron: usize) -> Result<&mut Neuron> {
        check_index("layer", layer, self.layers.len())?;
        let row = &mut self.layers[layer];
        check_index("neuron", neuron, row.len())?;
        Ok(&mut row[neuron])
    }

    fn check_input(&self, values: &[f64]) -> Result<()> {
        if values.len() != self.inputs.len() {
            return Err(NetworkError::mismatch("input", self.inputs.len(), values.len()));
        }
        Ok(())
    }

    /// Dumps every layer, neuron and weight to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl<R> fmt::Display for Network<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs: Vec<f64> = self.inputs.iter().map(Signal::get).collect();
        writeln!(f, "Network: {} inputs {:?}, {} layers", inputs.len(), inputs, self.layers.len())?;
        for (l, layer) in self.layers.iter().enumerate() {
            writeln!(f, "Layer {l} ({} neurons)", layer.len())?;
            for (n, neuron) in layer.iter().enumerate() {
                let weights = &neuron.weights()[..neuron.input_count()];
                writeln!(
                    f,
                    "  Neuron {n}: weights {:.6?} bias {:.6} output {:.6}",
                    weights,
                    neuron.bias(),
                    neuron.output_value()
                )?;
            }
        }
        write!(f, "Outputs: {:.6?}", self.outputs())
    }
}
