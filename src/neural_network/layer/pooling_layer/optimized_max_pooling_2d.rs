use super::*;
use log::trace;
use ndarray::{Array2, ArrayView2, Axis};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::fmt;

/// 2D max pooling layer, optimized implementation.
///
/// Honours exactly the contract of `MaxPooling2D`: after the same sequence of `activate`,
/// `calc_grads` and `fix_weights` calls on the same tensors, both layers hold equal `in`,
/// `out` and `grads_in` tensors and compare equal with `==`.
///
/// The forward pass is separable: each channel is first reduced along `x` into per-window
/// column maxima, then along `y`, which costs `2 * filter_size` reads per output cell
/// instead of `filter_size^2`. The backward pass walks every output cell once and scatters
/// its gradient onto the tied maxima of its window. Gradients for one input cell are added
/// in the same output order as the reference backward pass, so the sums are bit-identical.
///
/// Channels are independent and run on the rayon pool once
/// `channels * out_x * out_y >= MAX_POOLING_PARALLEL_THRESHOLD`.
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
/// let mut reference = MaxPooling2D::new(2, 3, 0.0, Size3D::new(7, 5, 2)).unwrap();
/// let mut optimized = OptimizedMaxPooling2D::new(2, 3, 0.0, Size3D::new(7, 5, 2)).unwrap();
///
/// let input = Array3::from_shape_fn((7, 5, 2), |(x, y, z)| ((x * 7 + y * 3 + z) % 5) as f32);
/// let grads = Array3::from_shape_fn((4, 3, 2), |(x, y, z)| (x + y + z) as f32 * 0.5);
///
/// for layer in [&mut reference as &mut dyn Layer, &mut optimized as &mut dyn Layer] {
///     layer.activate(&input).unwrap();
///     layer.calc_grads(&grads).unwrap();
///     layer.fix_weights();
/// }
///
/// assert!(reference == optimized);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedMaxPooling2D {
    pub(super) state: PoolState,
}

impl OptimizedMaxPooling2D {
    max_pooling_2d_constructors!(OptimizedMaxPooling2D);
}

/// Pools one channel, `channel` indexed `[[x, y]]`.
fn pool_channel(
    channel: ArrayView2<f32>,
    out_x: usize,
    out_y: usize,
    stride: usize,
    filter_size: usize,
    pad: f32,
) -> Array2<f32> {
    let (in_x, in_y) = channel.dim();

    // column_max[[ox, y]]: maximum of window row `ox` along x, for every input y
    let mut column_max = Array2::from_elem((out_x, in_y), f32::NEG_INFINITY);
    for ox in 0..out_x {
        let origin = ox * stride;
        for i in 0..filter_size {
            let x = origin + i;
            for y in 0..in_y {
                let val = if x >= in_x { pad } else { channel[[x, y]] };
                let slot = &mut column_max[[ox, y]];
                if replaces_max(val, *slot) {
                    *slot = val;
                }
            }
        }
    }

    let mut pooled = Array2::from_elem((out_x, out_y), f32::NEG_INFINITY);
    for ox in 0..out_x {
        for oy in 0..out_y {
            let origin = oy * stride;
            let mut max_val = f32::NEG_INFINITY;
            for j in 0..filter_size {
                let y = origin + j;
                let val = if y >= in_y {
                    pad
                } else {
                    column_max[[ox, y]]
                };
                if replaces_max(val, max_val) {
                    max_val = val;
                }
            }
            pooled[[ox, oy]] = max_val;
        }
    }

    pooled
}

/// Input gradient of one channel. Output cells are visited `x` outer, `y` inner, which is
/// the order the reference pass sums them in.
fn scatter_channel_grads(
    input: ArrayView2<f32>,
    output: ArrayView2<f32>,
    grad: ArrayView2<f32>,
    stride: usize,
    filter_size: usize,
) -> Array2<f32> {
    let (in_x, in_y) = input.dim();
    let (out_x, out_y) = output.dim();
    let mut grads_in = Array2::zeros((in_x, in_y));

    for i in 0..out_x {
        let x_start = i * stride;
        let x_end = (x_start + filter_size).min(in_x);
        for j in 0..out_y {
            let y_start = j * stride;
            let y_end = (y_start + filter_size).min(in_y);
            let max_val = output[[i, j]];
            let g = grad[[i, j]];

            for x in x_start..x_end {
                for y in y_start..y_end {
                    if input[[x, y]] == max_val {
                        grads_in[[x, y]] += g;
                    }
                }
            }
        }
    }

    grads_in
}

impl Layer for OptimizedMaxPooling2D {
    fn activate(&mut self, input: &Tensor) -> Result<(), ModelError> {
        self.state.copy_input(input, "OptimizedMaxPooling2D")?;

        let (out_x, out_y, channels) = self.state.output.dim();
        let work = self.state.out_size().volume();
        trace!(
            "OptimizedMaxPooling2D activate: input {:?} -> output {:?}, parallel={}",
            self.state.input.dim(),
            self.state.output.dim(),
            work >= MAX_POOLING_PARALLEL_THRESHOLD
        );

        let stored = &self.state.input;
        let (stride, filter_size, pad) =
            (self.state.stride, self.state.filter_size, self.state.pad);
        let compute_channel = |z: usize| {
            pool_channel(
                stored.index_axis(Axis(2), z),
                out_x,
                out_y,
                stride,
                filter_size,
                pad,
            )
        };

        let results: Vec<Array2<f32>> = execute_parallel_or_sequential!(
            channels,
            work,
            MAX_POOLING_PARALLEL_THRESHOLD,
            compute_channel
        );

        for (z, pooled) in results.into_iter().enumerate() {
            self.state.output.index_axis_mut(Axis(2), z).assign(&pooled);
        }

        Ok(())
    }

    fn calc_grads(&mut self, grad_next_layer: &Tensor) -> Result<(), ModelError> {
        validate_tensor_size(
            grad_next_layer,
            self.state.out_size(),
            "gradient",
            "OptimizedMaxPooling2D",
        )?;

        let channels = self.state.input.dim().2;
        let work = self.state.in_size().volume();
        trace!(
            "OptimizedMaxPooling2D calc_grads: gradient {:?} -> grads_in {:?}, parallel={}",
            grad_next_layer.dim(),
            self.state.grads_in.dim(),
            work >= MAX_POOLING_PARALLEL_THRESHOLD
        );

        let (input, output) = (&self.state.input, &self.state.output);
        let (stride, filter_size) = (self.state.stride, self.state.filter_size);
        let compute_channel = |z: usize| {
            scatter_channel_grads(
                input.index_axis(Axis(2), z),
                output.index_axis(Axis(2), z),
                grad_next_layer.index_axis(Axis(2), z),
                stride,
                filter_size,
            )
        };

        let results: Vec<Array2<f32>> = execute_parallel_or_sequential!(
            channels,
            work,
            MAX_POOLING_PARALLEL_THRESHOLD,
            compute_channel
        );

        for (z, grads) in results.into_iter().enumerate() {
            self.state.grads_in.index_axis_mut(Axis(2), z).assign(&grads);
        }

        Ok(())
    }

    layer_functions_max_pooling_2d!();
}

impl fmt::Display for OptimizedMaxPooling2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.layer_type(), self.param_str())
    }
}
