pub mod architecture;
pub mod network;
pub mod param;

pub use architecture::{Architecture, MAX_LAYERS, MIN_LAYERS, NEW_HIDDEN_LAYER_SIZE};
pub use network::Network;
pub use param::{ParamEdit, ParamId};
