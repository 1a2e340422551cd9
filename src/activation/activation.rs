use std::f64::consts::E;

/// Scalar activation (or activation derivative) applied to a neuron's net input.
pub type ActivationFn = fn(f64) -> f64;

/// Logistic sigmoid: `1 / (1 + e^-x)`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the sigmoid taken at the net input `x`, not at `sigmoid(x)`.
pub fn sigmoid_derivative(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn sigmoid_is_centred_on_one_half() {
        assert_abs_diff_eq!(sigmoid(0.0), 0.5);
        assert_abs_diff_eq!(sigmoid_derivative(0.0), 0.25);
    }

    #[test]
    fn sigmoid_known_values() {
        assert_abs_diff_eq!(sigmoid(-0.5), 0.377_540_668_798_145_4, epsilon = 1e-12);
        assert_abs_diff_eq!(sigmoid_derivative(-0.5), 0.235_003_712_201_594_5, epsilon = 1e-12);
        assert_abs_diff_eq!(sigmoid(2.0) + sigmoid(-2.0), 1.0, epsilon = 1e-12);
    }
}
