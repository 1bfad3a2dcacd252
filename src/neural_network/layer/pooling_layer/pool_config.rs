use super::*;

/// Selects which max pooling implementation `build_pooling_layer` constructs.
///
/// Both implementations honour the same contract and leave identical tensors behind.
///
/// # Variants
///
/// - `Reference` - Direct per-cell window scans (`MaxPooling2D`)
/// - `Optimized` - Separable, channel-parallel scans (`OptimizedMaxPooling2D`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolingAlgorithm {
    #[default]
    Reference,
    Optimized,
}

/// Validated hyperparameters of a max pooling layer.
///
/// # Fields
///
/// - `stride` - Step between consecutive pooling windows on both spatial axes
/// - `filter_size` - Side length of the square pooling window, never smaller than `stride`
/// - `pad` - Value read for window cells that fall past the input edge
/// - `in_size` - Extent of the input tensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolConfig {
    stride: usize,
    filter_size: usize,
    pad: f32,
    in_size: Size3D,
}

impl PoolConfig {
    /// Creates a new pooling configuration.
    ///
    /// # Parameters
    ///
    /// - `stride` - Step between consecutive windows
    /// - `filter_size` - Side length of the pooling window
    /// - `pad` - Fill value for window cells outside the input
    /// - `in_size` - Extent of the input tensor
    ///
    /// # Returns
    ///
    /// - `Result<PoolConfig, ModelError>` - The configuration on success
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
        validate_stride(stride)?;
        validate_filter_size(filter_size, stride)?;

        Ok(PoolConfig {
            stride,
            filter_size,
            pad,
            in_size,
        })
    }

    get_field!(get_stride, stride, usize);
    get_field!(get_filter_size, filter_size, usize);
    get_field!(get_pad, pad, f32);
    get_field!(get_in_size, in_size, Size3D);

    /// Returns the extent of the pooled output: `in_size` with both spatial axes divided by
    /// `stride`, rounding up.
    pub fn out_size(&self) -> Size3D {
        self.in_size.pooled(self.stride)
    }
}
