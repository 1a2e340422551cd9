use crate::error::{NetworkError, Result};
use crate::network::network::Network;

/// Plain online gradient descent with a fixed step size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Result<Sgd> {
        if !learning_rate.is_finite() || learning_rate <= 0.0 {
            return Err(NetworkError::InvalidArgument(format!(
                "learning rate must be positive and finite, got {learning_rate}"
            )));
        }
        Ok(Sgd { learning_rate })
    }

    /// Applies one weight update to `network` for a single labelled sample.
    pub fn step<R>(&self, network: &mut Network<R>, input: &[f64], expected: &[f64]) -> Result<()> {
        network.learn(input, expected, self.learning_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_rates() {
        assert!(Sgd::new(0.5).is_ok());
        assert!(matches!(Sgd::new(0.0), Err(NetworkError::InvalidArgument(_))));
        assert!(Sgd::new(-0.1).is_err());
        assert!(Sgd::new(f64::NAN).is_err());
    }

    #[test]
    fn step_is_one_learning_call() {
        let mut a = Network::seeded(2, &[2, 1], 9).unwrap();
        let mut b = Network::seeded(2, &[2, 1], 9).unwrap();

        Sgd::new(0.3).unwrap().step(&mut a, &[0.1, 0.9], &[1.0]).unwrap();
        b.learn(&[0.1, 0.9], &[1.0], 0.3).unwrap();

        assert_eq!(a.outputs(), b.outputs());
    }
}
