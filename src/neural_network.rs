/// Module that contains neural network layer implementations
pub mod layer;
/// Module that contains the layer contract shared by all layers
pub mod neural_network_trait;
/// Module that contains the tensor extent type
pub mod size_3d;

pub use layer::*;
pub use neural_network_trait::Layer;
pub use size_3d::Size3D;

use ndarray::Array3;

/// Type alias for the 3D arrays used as activation and gradient tensors, indexed `[[x, y, z]]`
pub type Tensor = Array3<f32>;
