use super::*;
use log::trace;
use std::fmt;

/// 2D max pooling layer, reference implementation.
///
/// Selects the maximum value within each `filter_size x filter_size` window of the two
/// spatial axes, independently for every channel. Input tensor extent: `(x, y, z)`. Output
/// tensor extent: `(ceil(x / stride), ceil(y / stride), z)`. Window cells that fall past
/// the input edge are read as `pad`.
///
/// The backward pass hands the upstream gradient of an output cell to every input cell in
/// its window whose value equals the output value. When several cells tie for the maximum,
/// each of them receives the full gradient.
///
/// # Fields
///
/// - `state` - Hyperparameters and the `in`, `out`, `grads_in` tensors
///
/// # Examples
/// ```rust
/// use rustypool::neural_network::*;
/// use ndarray::Array3;
///
/// // 3x3 single-channel input, window 2, stride 2, padding value -1
/// let mut layer = MaxPooling2D::new(2, 2, -1.0, Size3D::new(3, 3, 1)).unwrap();
/// assert_eq!(layer.out_size(), Size3D::new(2, 2, 1));
///
/// let input = Array3::from_shape_fn((3, 3, 1), |(x, y, _)| -((x * 3 + y) as f32) - 2.0);
/// layer.activate(&input).unwrap();
///
/// // the bottom-right window holds only one real cell (-10) and three padding cells (-1)
/// assert_eq!(layer.output()[[1, 1, 0]], -1.0);
/// assert_eq!(layer.output()[[0, 0, 0]], -2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MaxPooling2D {
    pub(super) state: PoolState,
}

impl MaxPooling2D {
    max_pooling_2d_constructors!(MaxPooling2D);
}

/// Maximum over the window at `(origin_x, origin_y)` of channel `z`.
///
/// Starts from negative infinity and moves only when `replaces_max` says so.
fn window_max(
    input: &Tensor,
    origin_x: usize,
    origin_y: usize,
    z: usize,
    filter_size: usize,
    pad: f32,
) -> f32 {
    let (in_x, in_y, _) = input.dim();
    let mut max_val = f32::NEG_INFINITY;

    for i in 0..filter_size {
        for j in 0..filter_size {
            let x = origin_x + i;
            let y = origin_y + j;
            let val = if x >= in_x || y >= in_y {
                pad
            } else {
                input[[x, y, z]]
            };

            if replaces_max(val, max_val) {
                max_val = val;
            }
        }
    }

    max_val
}

impl Layer for MaxPooling2D {
    fn activate(&mut self, input: &Tensor) -> Result<(), ModelError> {
        self.state.copy_input(input, "MaxPooling2D")?;

        let PoolState {
            stride,
            filter_size,
            pad,
            input,
            output,
            ..
        } = &mut self.state;
        let (out_x, out_y, channels) = output.dim();
        trace!(
            "MaxPooling2D activate: input {:?} -> output {:?}",
            input.dim(),
            output.dim()
        );

        for x in 0..out_x {
            for y in 0..out_y {
                for z in 0..channels {
                    output[[x, y, z]] =
                        window_max(input, x * *stride, y * *stride, z, *filter_size, *pad);
                }
            }
        }

        Ok(())
    }

    fn calc_grads(&mut self, grad_next_layer: &Tensor) -> Result<(), ModelError> {
        validate_tensor_size(
            grad_next_layer,
            self.state.out_size(),
            "gradient",
            "MaxPooling2D",
        )?;
        trace!(
            "MaxPooling2D calc_grads: gradient {:?} -> grads_in {:?}",
            grad_next_layer.dim(),
            self.state.grads_in.dim()
        );

        let (in_x, in_y, channels) = self.state.input.dim();
        for x in 0..in_x {
            for y in 0..in_y {
                let rn = self.state.map_to_output(x, y);
                for z in 0..channels {
                    let val = self.state.input[[x, y, z]];
                    let mut sum_error = 0.0;
                    for (i, j) in rn.spatial_iter() {
                        if val == self.state.output[[i, j, z]] {
                            sum_error += grad_next_layer[[i, j, z]];
                        }
                    }
                    self.state.grads_in[[x, y, z]] = sum_error;
                }
            }
        }

        Ok(())
    }

    layer_functions_max_pooling_2d!();
}

impl fmt::Display for MaxPooling2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.layer_type(), self.param_str())
    }
}
