use crate::neural_network::Tensor;
use std::fmt;

/// Extent of a 3D tensor.
///
/// `x` and `y` are the spatial axes, `z` is the channel axis. A `Size3D` converts to the
/// `(x, y, z)` shape that ndarray expects, so `Tensor::zeros(size.shape())` allocates a
/// tensor of this extent.
///
/// # Fields
///
/// - `x` - Extent along the first spatial axis
/// - `y` - Extent along the second spatial axis
/// - `z` - Number of channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size3D {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Size3D {
    /// Creates a new extent.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Size3D { x, y, z }
    }

    /// Returns the extent as an ndarray shape tuple `(x, y, z)`.
    pub const fn shape(&self) -> (usize, usize, usize) {
        (self.x, self.y, self.z)
    }

    /// Returns the number of elements covered by this extent.
    pub const fn volume(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Returns the extent left after downsampling both spatial axes by `stride`.
    ///
    /// Each spatial axis is rounded up, so a trailing partial window still produces an output
    /// cell. The channel count is unchanged.
    ///
    /// # Parameters
    ///
    /// * `stride` - Step between consecutive windows, must be greater than zero
    ///
    /// # Returns
    ///
    /// * `Size3D` - `(ceil(x / stride), ceil(y / stride), z)`
    pub const fn pooled(&self, stride: usize) -> Self {
        Size3D {
            x: self.x.div_ceil(stride),
            y: self.y.div_ceil(stride),
            z: self.z,
        }
    }

    /// Returns the extent of an existing tensor.
    pub fn of(tensor: &Tensor) -> Self {
        Self::from(tensor.dim())
    }
}

impl From<(usize, usize, usize)> for Size3D {
    fn from((x, y, z): (usize, usize, usize)) -> Self {
        Size3D { x, y, z }
    }
}

impl fmt::Display for Size3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
