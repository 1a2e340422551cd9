use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::network::network::Network;

/// Closed interval that fresh weights and biases are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: f64,
    pub max: f64,
}

impl WeightRange {
    pub fn new(min: f64, max: f64) -> Result<WeightRange> {
        let range = WeightRange { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(NetworkError::InvalidArgument(format!(
                "weight range [{}, {}] is not a finite, ordered interval",
                self.min, self.max
            )));
        }
        Ok(())
    }

    /// Uniform draw in `[min, max]`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}

impl Default for WeightRange {
    fn default() -> Self {
        WeightRange { min: -2.0, max: 2.0 }
    }
}

/// What `insert_layer` does to the layer that used to follow the insertion point.
///
/// - `Reinitialize`           : every downstream connection weight is drawn
///                              afresh (trained weights are lost).
/// - `PreserveWhenCompatible` : when the downstream fan-in already equals the
///                              new layer's width, the old weights are kept and
///                              simply reattached to the new layer's outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewirePolicy {
    #[default]
    Reinitialize,
    PreserveWhenCompatible,
}

/// A serializable description of a network topology and how it is initialized.
///
/// Only the shape is stored, never trained weights: building a spec always
/// yields freshly randomized weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Width of the input vector.
    pub inputs: usize,
    /// Neuron count of every layer, input side first.
    #[serde(default)]
    pub layers: Vec<usize>,
    #[serde(default)]
    pub weight_range: WeightRange,
    #[serde(default)]
    pub rewire: RewirePolicy,
}

impl NetworkSpec {
    pub fn new(inputs: usize, layers: Vec<usize>) -> NetworkSpec {
        NetworkSpec {
            inputs,
            layers,
            weight_range: WeightRange::default(),
            rewire: RewirePolicy::default(),
        }
    }

    /// Builds a network with every weight drawn from `rng`.
    pub fn build<R: Rng>(&self, rng: R) -> Result<Network<R>> {
        let mut network = Network::with_range(self.inputs, self.weight_range, rng)?;
        network.set_rewire_policy(self.rewire);
        for &size in &self.layers {
            network.push_layer(size)?;
        }
        Ok(network)
    }

    /// Serializes this `NetworkSpec` to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file and validates it.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let spec: NetworkSpec = serde_json::from_reader(reader)?;
        spec.weight_range.validate()?;
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn weight_range_rejects_inverted_and_non_finite_bounds() {
        assert!(WeightRange::new(-1.0, 1.0).is_ok());
        assert!(WeightRange::new(0.5, 0.5).is_ok());
        assert!(matches!(WeightRange::new(1.0, -1.0), Err(NetworkError::InvalidArgument(_))));
        assert!(WeightRange::new(f64::NAN, 1.0).is_err());
        assert!(WeightRange::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn samples_stay_inside_the_range() {
        let range = WeightRange::new(-0.25, 0.75).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let w = range.sample(&mut rng);
            assert!((-0.25..=0.75).contains(&w));
        }
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let spec: NetworkSpec = serde_json::from_str(r#"{ "inputs": 3 }"#).unwrap();
        assert_eq!(spec, NetworkSpec::new(3, vec![]));
        assert_eq!(spec.weight_range, WeightRange { min: -2.0, max: 2.0 });
    }

    #[test]
    fn policy_uses_snake_case_names() {
        let spec: NetworkSpec = serde_json::from_str(
            r#"{ "inputs": 2, "layers": [3, 1], "rewire": "preserve_when_compatible" }"#,
        )
        .unwrap();
        assert_eq!(spec.rewire, RewirePolicy::PreserveWhenCompatible);
    }

    #[test]
    fn json_file_round_trip() {
        let mut spec = NetworkSpec::new(2, vec![4, 1]);
        spec.weight_range = WeightRange::new(-0.5, 0.5).unwrap();
        let path = std::env::temp_dir().join(format!("ferrite-mlp-spec-{}.json", std::process::id()));
        let path = path.to_str().unwrap();

        spec.save_json(path).unwrap();
        let loaded = NetworkSpec::load_json(path).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(loaded, spec);
    }

    #[test]
    fn load_reports_missing_file_and_bad_json() {
        assert!(matches!(
            NetworkSpec::load_json("/definitely/not/here.json"),
            Err(NetworkError::Io(_))
        ));

        let path = std::env::temp_dir().join(format!("ferrite-mlp-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ inputs: }").unwrap();
        let result = NetworkSpec::load_json(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(NetworkError::Json(_))));
    }

    #[test]
    fn build_follows_the_layer_list() {
        let spec = NetworkSpec::new(3, vec![4, 2]);
        let network = spec.build(StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(network.input_width(), 3);
        assert_eq!(network.layer_sizes(), &[4, 2]);
        assert_eq!(network.output_width(), 2);
    }

    #[test]
    fn build_rejects_empty_layers() {
        let spec = NetworkSpec::new(3, vec![4, 0]);
        assert!(matches!(
            spec.build(StdRng::seed_from_u64(1)),
            Err(NetworkError::InvalidArgument(_))
        ));
    }
}
