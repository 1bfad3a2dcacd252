use crate::error::ModelError;
use crate::neural_network::Tensor;
use crate::neural_network::layer::TrainingParameters;
use crate::neural_network::size_3d::Size3D;

/// Defines the interface for neural network layers.
///
/// A layer owns its input, output and input-gradient tensors. A network driver calls
/// `activate` on the way forward, `calc_grads` on the way back and `fix_weights` once the
/// gradients of every layer are known. Layers without trainable parameters implement
/// `fix_weights` as a no-op so the driver can treat all layers uniformly.
pub trait Layer: std::any::Any + Send + Sync {
    /// Performs forward propagation through the layer.
    ///
    /// The input is copied into the layer so that a later `calc_grads` call can refer to the
    /// exact activation that produced the current output.
    ///
    /// # Parameters
    ///
    /// - `input` - The input tensor, shaped like `in_size()`
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The output tensor is available through `output()`
    /// - `Err(ModelError::InputValidationError)` - If `input` does not have the configured shape
    fn activate(&mut self, input: &Tensor) -> Result<(), ModelError>;

    /// Performs backward propagation through the layer.
    ///
    /// Only meaningful after `activate` and before the next `activate`, since the gradient
    /// is derived from the tensors that call left behind.
    ///
    /// # Parameters
    ///
    /// - `grad_next_layer` - The gradient flowing into this layer's output, shaped like
    ///   `out_size()`
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The input gradient is available through `grads_in()`
    /// - `Err(ModelError::InputValidationError)` - If the gradient does not have the output shape
    fn calc_grads(&mut self, grad_next_layer: &Tensor) -> Result<(), ModelError>;

    /// Applies the gradients computed by `calc_grads` to the trainable parameters.
    fn fix_weights(&mut self);

    /// Returns the kind name of the layer (e.g. "pool").
    ///
    /// # Returns
    ///
    /// * `&str` - A string slice representing the layer kind
    fn layer_type(&self) -> &str {
        "Unknown"
    }

    /// Returns a human-readable description of the layer hyperparameters.
    ///
    /// # Returns
    ///
    /// - `String` - Comma separated `name=value` pairs
    fn param_str(&self) -> String {
        String::new()
    }

    /// Returns a description of the output shape of the layer.
    ///
    /// # Returns
    ///
    /// - `String` - A string describing the output dimensions
    fn output_shape(&self) -> String {
        self.out_size().to_string()
    }

    /// Returns the total number of trainable parameters in the layer.
    ///
    /// # Returns
    ///
    /// - `TrainingParameters` - The count of parameters as an enum variant
    fn param_count(&self) -> TrainingParameters;

    /// Returns the extent of the input tensor the layer was built for.
    fn in_size(&self) -> Size3D {
        Size3D::of(self.input())
    }

    /// Returns the extent of the output tensor.
    fn out_size(&self) -> Size3D {
        Size3D::of(self.output())
    }

    /// Returns the activation received by the last `activate` call.
    fn input(&self) -> &Tensor;

    /// Returns the activation produced by the last `activate` call.
    fn output(&self) -> &Tensor;

    /// Returns the input gradient produced by the last `calc_grads` call.
    fn grads_in(&self) -> &Tensor;
}
