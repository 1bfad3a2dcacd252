/// Error types that can occur while building or running a layer
///
/// # Variants
///
/// - `InvalidConfiguration` - indicates the layer hyperparameters cannot form a valid layer
///   (for example a pooling window smaller than its stride). Raised only at construction time,
///   no layer value exists afterwards
/// - `InputValidationError` - indicates a tensor handed to the layer does not have the shape
///   the layer was built for
#[cfg(feature = "neural_network")]
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InvalidConfiguration(String),
    InputValidationError(String),
}

#[cfg(feature = "neural_network")]
impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            ModelError::InputValidationError(msg) => write!(f, "Input validation error: {}", msg),
        }
    }
}

#[cfg(feature = "neural_network")]
impl std::error::Error for ModelError {}
