use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Serialize, Deserialize};

use crate::error::{check_index, NetError, Result};
use crate::layers::dense::Layer;
use crate::network::architecture::validate_sizes;
use crate::network::param::{ParamEdit, ParamId};

/// A fully connected sigmoid network.
///
/// Owns one [`Layer`] per consecutive pair of entries in `architecture`.
/// Every parameter can be read and overwritten at any time; the next forward
/// pass sees the new value.
///
/// Deserialization goes through [`Network::from_layers`], so a decoded
/// network always satisfies the same shape rules as a constructed one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    architecture: Vec<usize>,
    layers: Vec<Layer>,
}

/// Unchecked wire form of a [`Network`].
#[derive(Deserialize)]
struct RawNetwork {
    architecture: Vec<usize>,
    layers: Vec<Layer>,
}

impl TryFrom<RawNetwork> for Network {
    type Error = NetError;

    fn try_from(raw: RawNetwork) -> Result<Network> {
        let network = Network::from_layers(raw.layers)?;
        if network.architecture != raw.architecture {
            return Err(NetError::invalid_architecture(format!(
                "stored architecture {:?} does not match layer shapes {:?}",
                raw.architecture,
                network.architecture
            )));
        }
        Ok(network)
    }
}

impl Network {
    /// Builds a network with every weight and bias drawn uniformly from [-1, 1).
    pub fn new(architecture: &[usize]) -> Result<Network> {
        Network::with_rng(architecture, &mut rand::thread_rng())
    }

    /// Like [`Network::new`] but reproducible for a given seed.
    pub fn seeded(architecture: &[usize], seed: u64) -> Result<Network> {
        Network::with_rng(architecture, &mut StdRng::seed_from_u64(seed))
    }

    pub fn with_rng<R: Rng + ?Sized>(architecture: &[usize], rng: &mut R) -> Result<Network> {
        validate_sizes(architecture)?;

        let layers = architecture.windows(2)
            .map(|pair| Layer::new(pair[1], pair[0], rng))
            .collect();
        let network = Network { architecture: architecture.to_vec(), layers };

        debug!(
            "initialized network {:?} with {} parameters",
            network.architecture,
            network.parameter_count()
        );
        Ok(network)
    }

    /// Assembles a network from existing layers, checking that each layer's
    /// input size matches the previous layer's output size.
    pub fn from_layers(layers: Vec<Layer>) -> Result<Network> {
        let first = layers.first()
            .ok_or_else(|| NetError::invalid_architecture("a network needs at least one layer"))?;

        let mut architecture = vec![first.input_size()];
        for (i, layer) in layers.iter().enumerate() {
            if !layer.is_consistent() {
                return Err(NetError::invalid_architecture(format!(
                    "layer {i} has {} biases for {} weight rows",
                    layer.biases.len(),
                    layer.weights.rows
                )));
            }
            let expected = architecture[i];
            if layer.input_size() != expected {
                return Err(NetError::invalid_architecture(format!(
                    "layer {i} takes {} inputs but the previous layer has {expected} neurons",
                    layer.input_size()
                )));
            }
            architecture.push(layer.size());
        }
        validate_sizes(&architecture)?;

        Ok(Network { architecture, layers })
    }

    /// Throws away every parameter and rebuilds for `architecture`.
    ///
    /// On an invalid architecture the current network is left untouched.
    pub fn reinitialize(&mut self, architecture: &[usize]) -> Result<()> {
        *self = Network::new(architecture)?;
        Ok(())
    }

    pub fn reinitialize_with_rng<R: Rng + ?Sized>(
        &mut self,
        architecture: &[usize],
        rng: &mut R,
    ) -> Result<()> {
        *self = Network::with_rng(architecture, rng)?;
        Ok(())
    }

    pub fn architecture(&self) -> &[usize] {
        &self.architecture
    }

    pub fn input_size(&self) -> usize {
        self.architecture[0]
    }

    pub fn output_size(&self) -> usize {
        self.architecture[self.architecture.len() - 1]
    }

    /// Connection layers, one per consecutive pair of architecture entries.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.layers.iter()
            .map(|l| l.size() * l.input_size() + l.size())
            .sum()
    }

    pub fn get_weight(&self, layer: usize, dst: usize, src: usize) -> Result<f64> {
        let l = self.layer(layer)?;
        check_index("dst", dst, l.size())?;
        check_index("src", src, l.input_size())?;
        Ok(l.weights.data[dst][src])
    }

    pub fn set_weight(&mut self, layer: usize, dst: usize, src: usize, value: f64) -> Result<()> {
        let l = self.layer_mut(layer)?;
        check_index("dst", dst, l.size())?;
        check_index("src", src, l.input_size())?;
        l.weights.set(dst, src, value);
        Ok(())
    }

    pub fn get_bias(&self, layer: usize, dst: usize) -> Result<f64> {
        let l = self.layer(layer)?;
        check_index("dst", dst, l.size())?;
        Ok(l.biases[dst])
    }

    pub fn set_bias(&mut self, layer: usize, dst: usize, value: f64) -> Result<()> {
        let l = self.layer_mut(layer)?;
        check_index("dst", dst, l.size())?;
        l.biases[dst] = value;
        Ok(())
    }

    pub fn get(&self, id: ParamId) -> Result<f64> {
        match id {
            ParamId::Weight { layer, dst, src } => self.get_weight(layer, dst, src),
            ParamId::Bias { layer, dst } => self.get_bias(layer, dst),
        }
    }

    /// Applies a manual override.
    pub fn apply(&mut self, edit: ParamEdit) -> Result<()> {
        match edit.id {
            ParamId::Weight { layer, dst, src } => self.set_weight(layer, dst, src, edit.value),
            ParamId::Bias { layer, dst } => self.set_bias(layer, dst, edit.value),
        }
    }

    /// Every parameter with its current value: all weights layer by layer,
    /// then all biases layer by layer.
    pub fn parameters(&self) -> Vec<(ParamId, f64)> {
        let mut params = Vec::with_capacity(self.parameter_count());

        for (layer, l) in self.layers.iter().enumerate() {
            for (dst, row) in l.weights.data.iter().enumerate() {
                for (src, &w) in row.iter().enumerate() {
                    params.push((ParamId::Weight { layer, dst, src }, w));
                }
            }
        }
        for (layer, l) in self.layers.iter().enumerate() {
            for (dst, &b) in l.biases.iter().enumerate() {
                params.push((ParamId::Bias { layer, dst }, b));
            }
        }

        params
    }

    /// Serializes the network to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a network written by `save_json`, rejecting files whose
    /// parameter shapes disagree with the stored architecture.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    fn layer(&self, layer: usize) -> Result<&Layer> {
        check_index("layer", layer, self.layers.len())?;
        Ok(&self.layers[layer])
    }

    fn layer_mut(&mut self, layer: usize) -> Result<&mut Layer> {
        check_index("layer", layer, self.layers.len())?;
        Ok(&mut self.layers[layer])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_follow_consecutive_pairs() {
        for arch in [vec![2, 1], vec![2, 3, 1], vec![4, 7, 5, 3, 2, 9]] {
            let net = Network::new(&arch).unwrap();
            assert_eq!(net.architecture(), arch.as_slice());
            assert_eq!(net.layers().len(), arch.len() - 1);
            for (i, layer) in net.layers().iter().enumerate() {
                assert_eq!(layer.weights.rows, arch[i + 1]);
                assert_eq!(layer.weights.cols, arch[i]);
                assert_eq!(layer.biases.len(), arch[i + 1]);
            }
        }
    }

    #[test]
    fn invalid_architectures_are_rejected() {
        assert!(matches!(Network::new(&[]), Err(NetError::InvalidArchitecture { .. })));
        assert!(matches!(Network::new(&[3]), Err(NetError::InvalidArchitecture { .. })));
        assert!(matches!(Network::new(&[2, 0, 1]), Err(NetError::InvalidArchitecture { .. })));
    }

    #[test]
    fn engine_does_not_cap_depth() {
        assert!(Network::new(&[1; 9]).is_ok());
    }

    #[test]
    fn parameter_count_matches_shapes() {
        let net = Network::new(&[2, 3, 1]).unwrap();
        assert_eq!(net.parameter_count(), 2 * 3 + 3 + 3 + 1);
        assert_eq!(net.parameters().len(), net.parameter_count());
    }

    #[test]
    fn seeded_is_reproducible() {
        let a = Network::seeded(&[2, 3, 1], 42).unwrap();
        let b = Network::seeded(&[2, 3, 1], 42).unwrap();
        let c = Network::seeded(&[2, 3, 1], 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn weight_and_bias_access() {
        let mut net = Network::seeded(&[2, 3, 1], 1).unwrap();
        net.set_weight(0, 2, 1, 1.75).unwrap();
        net.set_bias(1, 0, -3.0).unwrap();
        assert_eq!(net.get_weight(0, 2, 1).unwrap(), 1.75);
        assert_eq!(net.get_bias(1, 0).unwrap(), -3.0);
        assert_eq!(net.layers()[0].weights.data[2][1], 1.75);
    }

    #[test]
    fn out_of_range_access_fails_without_mutation() {
        let mut net = Network::seeded(&[2, 3, 1], 1).unwrap();
        let before = net.clone();

        assert!(matches!(
            net.set_weight(2, 0, 0, 1.0),
            Err(NetError::IndexOutOfBounds { what: "layer", index: 2, len: 2 })
        ));
        assert!(matches!(
            net.set_weight(0, 3, 0, 1.0),
            Err(NetError::IndexOutOfBounds { what: "dst", .. })
        ));
        assert!(matches!(
            net.set_weight(0, 0, 2, 1.0),
            Err(NetError::IndexOutOfBounds { what: "src", .. })
        ));
        assert!(matches!(net.set_bias(1, 1, 1.0), Err(NetError::IndexOutOfBounds { .. })));
        assert!(net.get_bias(5, 0).is_err());
        assert!(net.get_weight(1, 0, 3).is_err());

        assert_eq!(net, before);
    }

    #[test]
    fn any_value_is_accepted() {
        let mut net = Network::seeded(&[1, 1], 3).unwrap();
        net.set_weight(0, 0, 0, 1e300).unwrap();
        net.set_bias(0, 0, f64::NEG_INFINITY).unwrap();
        assert_eq!(net.get_weight(0, 0, 0).unwrap(), 1e300);
        assert_eq!(net.get_bias(0, 0).unwrap(), f64::NEG_INFINITY);
    }

    #[test]
    fn parameters_list_weights_before_biases() {
        let net = Network::seeded(&[2, 2, 1], 5).unwrap();
        let labels: Vec<String> = net.parameters().iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(labels, vec![
            "W1[0][0]", "W1[0][1]", "W1[1][0]", "W1[1][1]",
            "W2[0][0]", "W2[0][1]",
            "B1[0]", "B1[1]",
            "B2[0]",
        ]);
        for (id, value) in net.parameters() {
            assert_eq!(net.get(id).unwrap(), value);
        }
    }

    #[test]
    fn apply_routes_edits() {
        let mut net = Network::seeded(&[2, 2, 1], 5).unwrap();
        net.apply(ParamEdit::weight(1, 0, 1, 0.125)).unwrap();
        net.apply(ParamEdit::bias(0, 1, -0.5)).unwrap();
        assert_eq!(net.get_weight(1, 0, 1).unwrap(), 0.125);
        assert_eq!(net.get_bias(0, 1).unwrap(), -0.5);
        assert!(net.apply(ParamEdit::bias(2, 0, 0.0)).is_err());
    }

    #[test]
    fn reinitialize_changes_shape_and_keeps_old_on_error() {
        let mut net = Network::seeded(&[2, 3, 1], 9).unwrap();
        net.reinitialize(&[3, 4, 4, 2]).unwrap();
        assert_eq!(net.architecture(), &[3, 4, 4, 2]);
        assert_eq!(net.layers().len(), 3);

        let before = net.clone();
        assert!(net.reinitialize(&[3]).is_err());
        assert_eq!(net, before);
    }

    #[test]
    fn from_layers_checks_chaining() {
        let mut rng = StdRng::seed_from_u64(0);
        let ok = Network::from_layers(vec![Layer::new(3, 2, &mut rng), Layer::new(1, 3, &mut rng)]);
        assert_eq!(ok.unwrap().architecture(), &[2, 3, 1]);

        let bad = Network::from_layers(vec![Layer::new(3, 2, &mut rng), Layer::new(1, 4, &mut rng)]);
        assert!(matches!(bad, Err(NetError::InvalidArchitecture { .. })));
        assert!(Network::from_layers(vec![]).is_err());
    }

    #[test]
    fn json_round_trip() {
        let net = Network::seeded(&[2, 3, 1], 11).unwrap();
        let path = std::env::temp_dir().join(format!("tinker-nn-net-{}.json", std::process::id()));
        net.save_json(&path).unwrap();
        let loaded = Network::load_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, net);
    }

    #[test]
    fn load_rejects_inconsistent_shapes() {
        let net = Network::seeded(&[2, 3, 1], 11).unwrap();
        let mut value = serde_json::to_value(&net).unwrap();
        value["architecture"] = serde_json::json!([2, 4, 1]);

        let path = std::env::temp_dir().join(format!("tinker-nn-bad-{}.json", std::process::id()));
        std::fs::write(&path, value.to_string()).unwrap();
        let loaded = Network::load_json(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(loaded, Err(NetError::Json(_))));
    }

    #[test]
    fn decoding_rejects_empty_network() {
        let res = serde_json::from_str::<Network>(r#"{"architecture":[],"layers":[]}"#);
        assert!(res.is_err());
    }

    #[test]
    fn decoding_rejects_architecture_that_disagrees_with_weights() {
        // Declares two inputs but the only weight row has one column.
        let json = r#"{
            "architecture": [2, 1],
            "layers": [{
                "weights": { "rows": 1, "cols": 1, "data": [[0.5]] },
                "biases": [0.0]
            }]
        }"#;
        let err = serde_json::from_str::<Network>(json).unwrap_err();
        assert!(err.to_string().contains("does not match layer shapes"));
    }

    #[test]
    fn decoding_rejects_ragged_weights() {
        let json = r#"{
            "architecture": [2, 1],
            "layers": [{
                "weights": { "rows": 1, "cols": 2, "data": [[0.5]] },
                "biases": [0.0]
            }]
        }"#;
        assert!(serde_json::from_str::<Network>(json).is_err());
    }

    #[test]
    fn decoding_a_nested_network_validates_it() {
        #[derive(serde::Deserialize)]
        struct Host {
            #[allow(dead_code)]
            net: Network,
        }
        let net = Network::seeded(&[2, 3, 1], 4).unwrap();
        let mut value = serde_json::json!({ "net": serde_json::to_value(&net).unwrap() });
        assert!(serde_json::from_value::<Host>(value.clone()).is_ok());

        value["net"]["architecture"] = serde_json::json!([2, 3]);
        assert!(serde_json::from_value::<Host>(value).is_err());
    }
}
