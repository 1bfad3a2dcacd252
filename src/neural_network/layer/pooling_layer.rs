use crate::error::ModelError;
use crate::neural_network::Tensor;
use crate::neural_network::layer::TrainingParameters;
use crate::neural_network::neural_network_trait::Layer;
use crate::neural_network::size_3d::Size3D;
use input_validation_function::*;
use log::debug;

/// Threshold for deciding between parallel and sequential execution.
/// When channels * output_x * output_y >= this threshold, channels are processed in parallel.
const MAX_POOLING_PARALLEL_THRESHOLD: usize = 4096;

/// Whether `val` replaces `max_val` as the running window maximum.
///
/// Strictly greater values win, and `0.0` beats `-0.0`, so the maximum of a window does not
/// depend on the order its cells are read in. NaN never wins.
fn replaces_max(val: f32, max_val: f32) -> bool {
    val > max_val || (val == max_val && max_val.is_sign_negative() && val.is_sign_positive())
}

/// Runs `$compute` for every channel in `0..$channels`, on the rayon pool when `$work`
/// reaches `$threshold`. Results come back in channel order either way.
macro_rules! execute_parallel_or_sequential {
    ($channels:expr, $work:expr, $threshold:expr, $compute:expr) => {
        if $work >= $threshold {
            (0..$channels)
                .into_par_iter()
                .map($compute)
                .collect::<Vec<_>>()
        } else {
            (0..$channels).map($compute).collect::<Vec<_>>()
        }
    };
}

/// A macro that generates the `Layer` functions shared by both max pooling implementations.
///
/// # Generated Functions
///
/// - `layer_type()`: Returns `"pool"`
/// - `param_str()`: Returns `"stride=.., filter_size=.., pad=.."`
/// - `in_size()`, `out_size()`: Extents of the input and output tensors
/// - `input()`, `output()`, `grads_in()`: The tensors held by the layer
/// - All functions from `no_trainable_parameters_layer_functions!()` macro
///
/// # Requirements
///
/// The implementing struct must have the following field:
/// - `state: PoolState` - Tensors and hyperparameters of the layer
macro_rules! layer_functions_max_pooling_2d {
    () => {
        fn layer_type(&self) -> &str {
            "pool"
        }

        fn param_str(&self) -> String {
            self.state.param_str()
        }

        fn in_size(&self) -> Size3D {
            self.state.in_size()
        }

        fn out_size(&self) -> Size3D {
            self.state.out_size()
        }

        fn input(&self) -> &Tensor {
            &self.state.input
        }

        fn output(&self) -> &Tensor {
            &self.state.output
        }

        fn grads_in(&self) -> &Tensor {
            &self.state.grads_in
        }

        no_trainable_parameters_layer_functions!();
    };
}

/// A macro that generates the inherent methods shared by both max pooling implementations.
///
/// # Generated Methods
///
/// - `new(stride, filter_size, pad, in_size)`: Validating constructor
/// - `from_config(config)`: Constructor from an already validated `PoolConfig`
/// - `get_stride()`, `get_filter_size()`, `get_pad()`: Hyperparameter getters
/// - `map_to_output(x, y)`, `input_window(x, y)`: Receptive-field maps with this layer's geometry
///
/// # Requirements
///
/// The implementing struct must have exactly one field, `state: PoolState`.
macro_rules! max_pooling_2d_constructors {
    ($layer:ident) => {
        /// Creates a new max pooling layer.
        ///
        /// All three tensors are allocated here and zero-filled: `in` and `grads_in` with
        /// extent `in_size`, `out` with both spatial axes of `in_size` divided by `stride`,
        /// rounding up.
        ///
        /// # Parameters
        ///
        /// - `stride` - Step between consecutive pooling windows
        /// - `filter_size` - Side length of the square pooling window
        /// - `pad` - Value read for window cells past the input edge
        /// - `in_size` - Extent of the input tensor
        ///
        /// # Returns
        ///
        /// - `Result<Self, ModelError>` - New layer instance on success
        ///
        /// # Errors
        ///
        /// - `ModelError::InvalidConfiguration` - If `stride` or `filter_size` is zero, or
        ///   `filter_size < stride`
        pub fn new(
            stride: usize,
            filter_size: usize,
            pad: f32,
            in_size: Size3D,
        ) -> Result<Self, ModelError> {
            let config = PoolConfig::new(stride, filter_size, pad, in_size)?;
            Ok(Self::from_config(&config))
        }

        /// Creates a new max pooling layer from a validated configuration.
        pub fn from_config(config: &PoolConfig) -> Self {
            debug!(
                "{}: in_size={}, out_size={}, stride={}, filter_size={}, pad={}",
                stringify!($layer),
                config.get_in_size(),
                config.out_size(),
                config.get_stride(),
                config.get_filter_size(),
                config.get_pad()
            );
            $layer {
                state: PoolState::new(config),
            }
        }

        /// Returns the step between consecutive pooling windows.
        pub fn get_stride(&self) -> usize {
            self.state.stride
        }

        /// Returns the side length of the pooling window.
        pub fn get_filter_size(&self) -> usize {
            self.state.filter_size
        }

        /// Returns the value read for window cells past the input edge.
        pub fn get_pad(&self) -> f32 {
            self.state.pad
        }

        /// Returns the output cells whose windows contain input cell `(x, y)`.
        ///
        /// See `receptive_field::map_to_output`.
        pub fn map_to_output(&self, x: usize, y: usize) -> Range {
            self.state.map_to_output(x, y)
        }

        /// Returns the input cells read for output cell `(x, y)`.
        ///
        /// See `receptive_field::input_window`.
        pub fn input_window(&self, x: usize, y: usize) -> Range {
            self.state.input_window(x, y)
        }
    };
}

/// Input validation functions for pooling layers
mod input_validation_function;
/// Reference 2D max pooling layer
pub mod max_pooling_2d;
/// Optimized 2D max pooling layer, observationally identical to the reference one
pub mod optimized_max_pooling_2d;
/// Validated pooling hyperparameters and implementation selector
pub mod pool_config;
/// Tensors and hyperparameters shared by both max pooling layers
pub mod pool_state;
/// Maps between output cells and the input cells they read
pub mod receptive_field;

pub use max_pooling_2d::MaxPooling2D;
pub use optimized_max_pooling_2d::OptimizedMaxPooling2D;
pub use pool_config::{PoolConfig, PoolingAlgorithm};
pub use pool_state::PoolState;
pub use receptive_field::{Range, input_window, map_to_output};

/// Builds the max pooling implementation selected by `algorithm`.
///
/// # Parameters
///
/// - `config` - Validated pooling hyperparameters
/// - `algorithm` - Implementation to construct
///
/// # Returns
///
/// * `Box<dyn Layer>` - The layer, driven through the `Layer` contract
///
/// # Examples
/// ```rust
/// use rustypool::neural_network::*;
///
/// let config = PoolConfig::new(2, 4, 0.0, Size3D::new(10, 10, 3)).unwrap();
/// let layer = build_pooling_layer(&config, PoolingAlgorithm::Optimized);
/// assert_eq!(layer.layer_type(), "pool");
/// assert_eq!(layer.out_size(), Size3D::new(5, 5, 3));
/// ```
pub fn build_pooling_layer(config: &PoolConfig, algorithm: PoolingAlgorithm) -> Box<dyn Layer> {
    debug!("selecting {:?} max pooling implementation", algorithm);
    match algorithm {
        PoolingAlgorithm::Reference => Box::new(MaxPooling2D::from_config(config)),
        PoolingAlgorithm::Optimized => Box::new(OptimizedMaxPooling2D::from_config(config)),
    }
}

impl PartialEq<OptimizedMaxPooling2D> for MaxPooling2D {
    fn eq(&self, other: &OptimizedMaxPooling2D) -> bool {
        self.state == other.state
    }
}

impl PartialEq<MaxPooling2D> for OptimizedMaxPooling2D {
    fn eq(&self, other: &MaxPooling2D) -> bool {
        self.state == other.state
    }
}
