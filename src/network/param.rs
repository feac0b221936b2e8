use std::fmt;

use serde::{Serialize, Deserialize};

/// Address of a single learnable scalar.
///
/// `layer` counts connection layers from zero: layer 0 connects the input
/// layer to the first hidden (or output) layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParamId {
    Weight { layer: usize, dst: usize, src: usize },
    Bias { layer: usize, dst: usize },
}

impl fmt::Display for ParamId {
    /// `W1[dst][src]` / `B1[dst]`, with 1-based layer numbers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParamId::Weight { layer, dst, src } => write!(f, "W{}[{dst}][{src}]", layer + 1),
            ParamId::Bias { layer, dst } => write!(f, "B{}[{dst}]", layer + 1),
        }
    }
}

/// A manual override: write `value` into the parameter at `id`.
///
/// Any finite or non-finite `f64` is accepted as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamEdit {
    pub id: ParamId,
    pub value: f64,
}

impl ParamEdit {
    pub fn weight(layer: usize, dst: usize, src: usize, value: f64) -> ParamEdit {
        ParamEdit { id: ParamId::Weight { layer, dst, src }, value }
    }

    pub fn bias(layer: usize, dst: usize, value: f64) -> ParamEdit {
        ParamEdit { id: ParamId::Bias { layer, dst }, value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_use_one_based_layers() {
        assert_eq!(ParamId::Weight { layer: 0, dst: 2, src: 1 }.to_string(), "W1[2][1]");
        assert_eq!(ParamId::Bias { layer: 1, dst: 0 }.to_string(), "B2[0]");
    }

    #[test]
    fn edits_round_trip_through_json() {
        let edit = ParamEdit::bias(1, 0, -1.25);
        let json = serde_json::to_string(&edit).unwrap();
        assert!(json.contains("\"kind\":\"bias\""));
        let back: ParamEdit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, edit);
    }
}
