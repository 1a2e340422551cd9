use ferrite_mlp::{classification_accuracy, train_loop, Network, Sgd, TrainConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random points of the unit square, labelled 1 inside the circle of radius
/// 0.5 centred on (0.5, 0.5).
fn sample(n: usize, rng: &mut StdRng) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs: Vec<Vec<f64>> = (0..n).map(|_| vec![rng.gen(), rng.gen()]).collect();
    let labels = inputs
        .iter()
        .map(|p| {
            let inside = (p[0] - 0.5).powi(2) + (p[1] - 0.5).powi(2) < 0.25;
            vec![if inside { 1.0 } else { 0.0 }]
        })
        .collect();
    (inputs, labels)
}

fn main() -> ferrite_mlp::Result<()> {
    tracing_subscriber::fmt::init();

    let mut rng = StdRng::seed_from_u64(42);
    let (train_x, train_y) = sample(1000, &mut rng);
    let (test_x, test_y) = sample(1000, &mut rng);

    let mut network = Network::seeded(2, &[8, 1], 42)?;
    let before = classification_accuracy(&mut network, &test_x, &test_y, 0.5)?;
    println!("untrained accuracy: {:.1}%", before * 100.0);

    let mut config = TrainConfig::new(50).with_accuracy_threshold(0.5);
    config.log_every = 10;
    let optimizer = Sgd::new(0.5)?;
    train_loop(
        &mut network,
        &train_x,
        &train_y,
        Some((&test_x[..], &test_y[..])),
        &optimizer,
        &config,
        &mut rng,
    )?;

    let after = classification_accuracy(&mut network, &test_x, &test_y, 0.5)?;
    println!("trained accuracy:   {:.1}%", after * 100.0);
    Ok(())
}
