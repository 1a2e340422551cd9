use rand::Rng;

use crate::activation::transfer::Transfer;
use crate::network::spec::WeightRange;
use crate::neuron::{Neuron, SignalReader};

/// An ordered group of neurons that all read the same sources.
pub type Layer = Vec<Neuron>;

/// `count` unconnected neurons, each with a random bias.
pub(crate) fn spawn<R: Rng + ?Sized>(
    count: usize,
    transfer: Transfer,
    range: &WeightRange,
    rng: &mut R,
) -> Layer {
    (0..count)
        .map(|_| Neuron::new(transfer, range.sample(rng)))
        .collect()
}

/// Connects every neuron of `layer` to every source, in source order, with
/// random weights. Existing connections are dropped first; biases are kept.
pub(crate) fn connect<R: Rng + ?Sized>(
    layer: &mut Layer,
    sources: &[SignalReader],
    range: &WeightRange,
    rng: &mut R,
) {
    for neuron in layer.iter_mut() {
        neuron.clear_connections();
        for source in sources {
            neuron.add_connection(source.clone(), range.sample(rng));
        }
    }
}

/// Points `layer` at `sources` while keeping its current connection weights.
///
/// Only possible when every neuron's fan-in already equals `sources.len()`;
/// returns `false` and leaves the layer untouched otherwise.
pub(crate) fn reattach(layer: &mut Layer, sources: &[SignalReader]) -> bool {
    if layer.iter().any(|n| n.input_count() != sources.len()) {
        return false;
    }
    for neuron in layer.iter_mut() {
        let kept: Vec<f64> = neuron.weights()[..sources.len()].to_vec();
        neuron.clear_connections();
        for (source, weight) in sources.iter().zip(kept) {
            neuron.add_connection(source.clone(), weight);
        }
    }
    true
}

/// Read handles onto every neuron output of `layer`, in neuron order.
pub(crate) fn output_handles(layer: &Layer) -> Vec<SignalReader> {
    layer.iter().map(Neuron::output_handle).collect()
}
