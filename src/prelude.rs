pub use crate::error::ModelError;
pub use crate::neural_network::Tensor;
pub use crate::neural_network::layer::TrainingParameters;
pub use crate::neural_network::layer::pooling_layer::*;
pub use crate::neural_network::neural_network_trait::Layer;
pub use crate::neural_network::size_3d::Size3D;
