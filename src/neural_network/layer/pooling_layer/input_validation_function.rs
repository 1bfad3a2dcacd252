use super::*;

/// Validates the stride of a pooling layer.
///
/// # Errors
///
/// Returns `ModelError::InvalidConfiguration` if stride is 0.
pub fn validate_stride(stride: usize) -> Result<(), ModelError> {
    if stride == 0 {
        return Err(ModelError::InvalidConfiguration(
            "stride must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

/// Validates the window size of a pooling layer against its stride.
///
/// A window smaller than its stride would leave input cells that no output cell covers.
///
/// # Errors
///
/// Returns `ModelError::InvalidConfiguration` if:
/// - filter_size is 0
/// - filter_size is smaller than stride
pub fn validate_filter_size(filter_size: usize, stride: usize) -> Result<(), ModelError> {
    if filter_size == 0 {
        return Err(ModelError::InvalidConfiguration(
            "filter_size must be greater than zero".to_string(),
        ));
    }
    if filter_size < stride {
        return Err(ModelError::InvalidConfiguration(format!(
            "Pool filter size ({}) must be >= stride ({})",
            filter_size, stride
        )));
    }
    Ok(())
}

/// Validates that a tensor handed to a layer has the extent the layer was built for.
///
/// # Parameters
///
/// - `tensor` - Tensor to check
/// - `expected` - Extent the layer expects
/// - `tensor_name` - Name of the tensor used in the error message (e.g. "input")
/// - `layer_name` - Name of the layer used in the error message
///
/// # Errors
///
/// Returns `ModelError::InputValidationError` if the extents differ.
pub fn validate_tensor_size(
    tensor: &Tensor,
    expected: Size3D,
    tensor_name: &str,
    layer_name: &str,
) -> Result<(), ModelError> {
    let actual = Size3D::of(tensor);
    if actual != expected {
        return Err(ModelError::InputValidationError(format!(
            "{} {} tensor must have size {}, got {}",
            layer_name, tensor_name, expected, actual
        )));
    }
    Ok(())
}
