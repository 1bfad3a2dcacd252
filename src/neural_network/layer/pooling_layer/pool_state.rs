use super::*;

/// Tensors and hyperparameters owned by a max pooling layer.
///
/// Both pooling implementations keep their state in this struct, which is what makes them
/// comparable with `==`: two states are equal when their stride, window size and all three
/// tensors match element by element. `pad` does not take part in the comparison.
///
/// # Fields
///
/// - `stride` - Step between consecutive windows
/// - `filter_size` - Side length of the pooling window
/// - `pad` - Value read for window cells past the input edge
/// - `input` - Activation received by the last forward pass
/// - `output` - Activation produced by the last forward pass
/// - `grads_in` - Input gradient produced by the last backward pass
#[derive(Debug, Clone)]
pub struct PoolState {
    pub(super) stride: usize,
    pub(super) filter_size: usize,
    pub(super) pad: f32,
    pub(super) input: Tensor,
    pub(super) output: Tensor,
    pub(super) grads_in: Tensor,
}

impl PoolState {
    /// Allocates zero-filled tensors sized from the configuration.
    pub fn new(config: &PoolConfig) -> Self {
        let in_size = config.get_in_size();
        let out_size = config.out_size();

        PoolState {
            stride: config.get_stride(),
            filter_size: config.get_filter_size(),
            pad: config.get_pad(),
            input: Tensor::zeros(in_size.shape()),
            output: Tensor::zeros(out_size.shape()),
            grads_in: Tensor::zeros(in_size.shape()),
        }
    }

    pub fn in_size(&self) -> Size3D {
        Size3D::of(&self.input)
    }

    pub fn out_size(&self) -> Size3D {
        Size3D::of(&self.output)
    }

    /// Overwrites the stored input with `input` after checking its extent.
    pub fn copy_input(&mut self, input: &Tensor, layer_name: &str) -> Result<(), ModelError> {
        validate_tensor_size(input, self.in_size(), "input", layer_name)?;
        self.input.assign(input);
        Ok(())
    }

    /// Output cells whose windows contain input cell `(x, y)` under this layer's geometry.
    pub fn map_to_output(&self, x: usize, y: usize) -> Range {
        let out_size = self.out_size();
        map_to_output(x, y, self.filter_size, self.stride, out_size.z, out_size)
    }

    /// Input cells read by the forward pass for output cell `(x, y)`.
    pub fn input_window(&self, x: usize, y: usize) -> Range {
        input_window(x, y, self.filter_size, self.stride, self.out_size().z)
    }

    /// `stride=.., filter_size=.., pad=..`
    pub fn param_str(&self) -> String {
        format!(
            "stride={}, filter_size={}, pad={}",
            self.stride, self.filter_size, self.pad
        )
    }
}

/// Compares `stride`, `filter_size` and the three tensors element-wise with f32 `==`.
/// `pad` is ignored.
///
/// Float semantics carry over: a NaN in any tensor makes a state unequal to itself, and
/// `0.0 == -0.0`.
impl PartialEq for PoolState {
    fn eq(&self, other: &Self) -> bool {
        self.stride == other.stride
            && self.filter_size == other.filter_size
            && self.input == other.input
            && self.grads_in == other.grads_in
            && self.output == other.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(stride: usize, filter_size: usize, pad: f32, in_size: Size3D) -> PoolState {
        PoolState::new(&PoolConfig::new(stride, filter_size, pad, in_size).unwrap())
    }

    #[test]
    fn tensors_are_sized_from_config() {
        let s = state(2, 4, 0.0, Size3D::new(10, 9, 3));
        assert_eq!(s.in_size(), Size3D::new(10, 9, 3));
        assert_eq!(s.out_size(), Size3D::new(5, 5, 3));
        assert_eq!(Size3D::of(&s.grads_in), Size3D::new(10, 9, 3));
        assert!(s.output.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn equality_ignores_pad() {
        let a = state(2, 4, 0.0, Size3D::new(4, 4, 1));
        let b = state(2, 4, -1.5, Size3D::new(4, 4, 1));
        assert_eq!(a, b);

        let c = state(2, 3, 0.0, Size3D::new(4, 4, 1));
        assert_ne!(a, c);
    }

    #[test]
    fn copy_input_rejects_wrong_extent() {
        let mut s = state(1, 1, 0.0, Size3D::new(2, 2, 1));
        let wrong = Tensor::zeros((2, 2, 2));
        assert!(matches!(
            s.copy_input(&wrong, "pool"),
            Err(ModelError::InputValidationError(_))
        ));
    }

    #[test]
    fn param_str_lists_hyperparameters() {
        let s = state(2, 4, 0.0, Size3D::new(4, 4, 1));
        assert_eq!(s.param_str(), "stride=2, filter_size=4, pad=0");
    }
}
