use crate::{
    error::Result,
    loss::mse::MseLoss,
    network::network::Network,
    optim::sgd::Sgd,
    train::loop_fn::check_samples,
};

/// One in-order pass of online gradient descent over the samples.
///
/// Returns the mean loss measured on each sample just before its update.
/// Every sample is checked against the network width before any weight moves.
pub fn train_network<R>(
    network: &mut Network<R>,
    inputs: &[Vec<f64>],
    expected_outputs: &[Vec<f64>],
    optimizer: &Sgd,
) -> Result<f64> {
    check_samples(network, inputs, expected_outputs)?;

    let mut total_loss = 0.0;
    for (input, expected) in inputs.iter().zip(expected_outputs.iter()) {
        let output = network.predict(input)?;
        total_loss += MseLoss::loss(&output, expected);
        optimizer.step(network, input, expected)?;
    }

    Ok(total_loss / inputs.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    fn xor() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        (
            vec![vec![1.0, 0.0], vec![1.0, 1.0], vec![0.0, 1.0], vec![0.0, 0.0]],
            vec![vec![1.0], vec![0.0], vec![1.0], vec![0.0]],
        )
    }

    #[test]
    fn returns_the_mean_pre_update_loss() {
        let (inputs, labels) = xor();
        let mut network = Network::seeded(2, &[3, 1], 4).unwrap();
        let mut probe = Network::seeded(2, &[3, 1], 4).unwrap();

        let first = probe.predict(&inputs[0]).unwrap();
        let loss = train_network(&mut network, &inputs[..1], &labels[..1], &Sgd::new(0.5).unwrap()).unwrap();
        assert_eq!(loss, MseLoss::loss(&first, &labels[0]));
    }

    #[test]
    fn rejects_bad_samples_before_training() {
        let (mut inputs, labels) = xor();
        let mut network = Network::seeded(2, &[3, 1], 4).unwrap();
        let before = network.predict(&[0.5, 0.5]).unwrap();

        inputs[3] = vec![0.0];
        let sgd = Sgd::new(0.5).unwrap();
        assert!(matches!(
            train_network(&mut network, &inputs, &labels, &sgd),
            Err(NetworkError::DimensionMismatch { .. })
        ));
        assert!(train_network(&mut network, &inputs[..2], &labels, &sgd).is_err());
        assert_eq!(network.predict(&[0.5, 0.5]).unwrap(), before);
    }
}
