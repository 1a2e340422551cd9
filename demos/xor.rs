use ferrite_mlp::{train_network, Network, Sgd};

fn main() {
    tracing_subscriber::fmt::init();

    let mut network = Network::seeded(2, &[4, 1], 7).expect("valid topology");

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let expected_outputs = vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ];

    let optimizer = Sgd::new(0.5).expect("positive learning rate");
    let epochs = 10000;

    for epoch in 0..epochs {
        let loss = train_network(&mut network, &inputs, &expected_outputs, &optimizer)
            .expect("samples match the network");
        if epoch % 1000 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    for input in &inputs {
        let output = network.predict(input).expect("two inputs");
        println!("Input: {:?} -> Output: {:.4}", input, output[0]);
    }
}
