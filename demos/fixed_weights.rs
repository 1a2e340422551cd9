use ferrite_mlp::Network;
use rand::rngs::StdRng;
use rand::SeedableRng;

// A 2-2-2 network with hand-set weights, evaluated on (2, 3).
fn main() -> ferrite_mlp::Result<()> {
    tracing_subscriber::fmt::init();

    let mut network = Network::new(2, StdRng::seed_from_u64(0))?;
    network.insert_layer(2, None)?;
    network.insert_layer(2, None)?;

    // (layer, neuron, [weight 0, weight 1, bias])
    let table = [
        (0, 0, [0.3, -0.4, 0.25]),
        (0, 1, [0.2, 0.6, 0.45]),
        (1, 0, [0.7, -0.5, 0.15]),
        (1, 1, [-0.3, -0.1, 0.35]),
    ];
    for (layer, neuron, [w0, w1, bias]) in table {
        network.set_weight(layer, neuron, 0, w0)?;
        network.set_weight(layer, neuron, 1, w1)?;
        network.set_bias(layer, neuron, bias)?;
    }

    network.set_input(&[2.0, 3.0])?;
    network.print();
    Ok(())
}
