/// Error types returned by layer construction and layer operations.
pub mod error;

#[cfg(feature = "neural_network")]
pub use error::ModelError;

/// A macro that generates a getter method for any field.
///
/// This macro creates a public getter method that returns the value of the specified
/// field. The generated method includes documentation describing the field being accessed.
///
/// # Parameters
///
/// - `$method_name` - The name of the getter method (e.g., get_stride)
/// - `$field_name` - The name of the field to access (e.g., stride)
/// - `$return_type` - The return type of the getter method
#[cfg(feature = "neural_network")]
macro_rules! get_field {
    ($method_name:ident, $field_name:ident, $return_type:ty) => {
        #[doc = concat!("Gets the `", stringify!($field_name), "` field.\n\n")]
        #[doc = "# Returns\n\n"]
        #[doc = concat!("* `", stringify!($return_type), "` - The value of the `", stringify!($field_name), "` field")]
        pub fn $method_name(&self) -> $return_type {
            self.$field_name
        }
    };
}

/// A convenience module that re-exports the most commonly used types and traits from this crate.
///
/// # Examples
/// ```rust
/// use rustypool::prelude::*;
///
/// let layer = MaxPooling2D::new(2, 2, 0.0, Size3D::new(4, 4, 1)).unwrap();
/// assert_eq!(layer.out_size(), Size3D::new(2, 2, 1));
/// ```
#[cfg(feature = "neural_network")]
pub mod prelude;

/// Components for spatial max pooling inside a small convolutional network.
///
/// The module provides a 2D max-pooling layer operating on 3D activation tensors addressed
/// as `[[x, y, z]]`, where `x` and `y` are the spatial axes and `z` is the channel axis.
///
/// # Core Components
///
/// ## Tensors
/// - **Tensor**: Type alias for `Array3<f32>` used for activations and gradients
/// - **Size3D**: Immutable `(x, y, z)` extent of a tensor
///
/// ## Layers
/// - **MaxPooling2D**: Reference max pooling with constant padding past the input edge
/// - **OptimizedMaxPooling2D**: Separable, channel-parallel variant that produces bit-for-bit
///   the same `in`, `out` and `grads_in` tensors as the reference layer
/// - **build_pooling_layer**: Selects one of the two implementations from a `PoolConfig`
///
/// ## Receptive fields
/// - `input_window` - Input span read for one output cell
/// - `map_to_output` - Output cells whose windows contain one input cell
///
/// # Examples
/// ```rust
/// use rustypool::neural_network::*;
/// use ndarray::Array3;
///
/// let mut layer = MaxPooling2D::new(2, 2, 0.0, Size3D::new(4, 4, 1)).unwrap();
///
/// let input = Array3::from_shape_fn((4, 4, 1), |(x, y, _)| (x * 4 + y) as f32);
/// layer.activate(&input).unwrap();
/// assert_eq!(layer.output()[[0, 0, 0]], 5.0);
///
/// let grads = Array3::ones((2, 2, 1));
/// layer.calc_grads(&grads).unwrap();
/// assert_eq!(layer.grads_in()[[1, 1, 0]], 1.0);
/// assert_eq!(layer.grads_in()[[0, 0, 0]], 0.0);
/// ```
#[cfg(feature = "neural_network")]
pub mod neural_network;
