use super::*;

/// Closed rectangular block of tensor coordinates.
///
/// Every bound is inclusive, so a `Range` always covers at least one cell on each axis.
///
/// # Fields
///
/// - `min_x`, `max_x` - Bounds along the first spatial axis
/// - `min_y`, `max_y` - Bounds along the second spatial axis
/// - `min_z`, `max_z` - Bounds along the channel axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub min_x: usize,
    pub max_x: usize,
    pub min_y: usize,
    pub max_y: usize,
    pub min_z: usize,
    pub max_z: usize,
}

impl Range {
    /// Iterates the `(x, y)` pairs of the range, `x` in the outer loop.
    pub fn spatial_iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (self.min_x..=self.max_x)
            .flat_map(move |x| (self.min_y..=self.max_y).map(move |y| (x, y)))
    }
}

/// Returns the input cells read by the forward pass for output cell `(x, y)`.
///
/// The window starts at `(x * stride, y * stride)` and spans `filter_size` cells on both
/// spatial axes. The result is not clipped to the input: cells past the input edge are read
/// as padding.
///
/// # Parameters
///
/// - `x`, `y` - Output coordinate
/// - `filter_size` - Side length of the pooling window
/// - `stride` - Step between consecutive windows
/// - `channels` - Number of channels, the range covers all of them
///
/// # Returns
///
/// * `Range` - Input coordinates covered by the window
///
/// # Panics
///
/// Panics if `filter_size` is zero. Layers only call this with a validated `PoolConfig`.
pub fn input_window(
    x: usize,
    y: usize,
    filter_size: usize,
    stride: usize,
    channels: usize,
) -> Range {
    Range {
        min_x: x * stride,
        max_x: x * stride + filter_size - 1,
        min_y: y * stride,
        max_y: y * stride + filter_size - 1,
        min_z: 0,
        max_z: channels.saturating_sub(1),
    }
}

/// Returns the output cells whose pooling windows contain input cell `(x, y)`.
///
/// This is the inverse of `input_window`: output `i` reads input `x` exactly when
/// `i * stride <= x <= i * stride + filter_size - 1`. The bounds are clipped to
/// `[0, out_size - 1]` on each spatial axis.
///
/// With `filter_size >= stride` every input cell is covered by at least one window, so the
/// returned range is never empty.
///
/// # Parameters
///
/// - `x`, `y` - Input coordinate
/// - `filter_size` - Side length of the pooling window
/// - `stride` - Step between consecutive windows
/// - `channels` - Number of channels, the range covers all of them
/// - `out_size` - Extent of the pooled output
///
/// # Returns
///
/// * `Range` - Output coordinates that may have selected `(x, y)` as their maximum
///
/// # Panics
///
/// Panics if `stride` is zero. Layers only call this with a validated `PoolConfig`.
pub fn map_to_output(
    x: usize,
    y: usize,
    filter_size: usize,
    stride: usize,
    channels: usize,
    out_size: Size3D,
) -> Range {
    Range {
        min_x: first_covering_window(x, filter_size, stride),
        max_x: last_covering_window(x, stride, out_size.x),
        min_y: first_covering_window(y, filter_size, stride),
        max_y: last_covering_window(y, stride, out_size.y),
        min_z: 0,
        max_z: channels.saturating_sub(1),
    }
}

/// `ceil((pos - filter_size + 1) / stride)`, clamped at 0
fn first_covering_window(pos: usize, filter_size: usize, stride: usize) -> usize {
    (pos + 1).saturating_sub(filter_size).div_ceil(stride)
}

/// `floor(pos / stride)`, clamped at `out_len - 1`
fn last_covering_window(pos: usize, stride: usize, out_len: usize) -> usize {
    (pos / stride).min(out_len.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_window_spans_filter_size() {
        let r = input_window(0, 0, 5, 4, 1);
        assert_eq!((r.min_x, r.max_x, r.min_y, r.max_y), (0, 4, 0, 4));
        assert_eq!((r.min_z, r.max_z), (0, 0));

        let r = input_window(2, 1, 5, 4, 3);
        assert_eq!((r.min_x, r.max_x, r.min_y, r.max_y), (8, 12, 4, 8));
        assert_eq!(r.max_z, 2);
    }

    #[test]
    fn map_to_output_first_cell() {
        let r = map_to_output(0, 0, 5, 4, 1, Size3D::new(5, 5, 1));
        assert_eq!((r.min_x, r.max_x, r.min_y, r.max_y), (0, 0, 0, 0));
        assert_eq!(r.max_z, 0);
    }

    #[test]
    fn map_to_output_overlapping_windows() {
        // windows of output 0 and 1 are [0, 4] and [4, 8]
        let r = map_to_output(4, 3, 5, 4, 2, Size3D::new(5, 5, 2));
        assert_eq!((r.min_x, r.max_x), (0, 1));
        assert_eq!((r.min_y, r.max_y), (0, 0));
        assert_eq!(r.max_z, 1);
    }

    #[test]
    fn map_to_output_clips_to_output_extent() {
        // 4x4 input, window 2, stride 1: output is 4x4 and the last input cell is only read
        // by outputs 2 and 3
        let r = map_to_output(3, 3, 2, 1, 1, Size3D::new(4, 4, 1));
        assert_eq!((r.min_x, r.max_x, r.min_y, r.max_y), (2, 3, 2, 3));

        let r = map_to_output(32, 0, 8, 1, 1, Size3D::new(33, 31, 1));
        assert_eq!((r.min_x, r.max_x), (25, 32));
        assert_eq!((r.min_y, r.max_y), (0, 0));
    }

    #[test]
    fn map_to_output_inverts_input_window() {
        let in_size = Size3D::new(13, 11, 1);
        for (filter_size, stride) in [(1, 1), (2, 1), (4, 2), (5, 2), (5, 4), (8, 3)] {
            let out_size = in_size.pooled(stride);
            for x in 0..in_size.x {
                for y in 0..in_size.y {
                    let r = map_to_output(x, y, filter_size, stride, 1, out_size);
                    for i in 0..out_size.x {
                        for j in 0..out_size.y {
                            let w = input_window(i, j, filter_size, stride, 1);
                            let covers = (w.min_x..=w.max_x).contains(&x)
                                && (w.min_y..=w.max_y).contains(&y);
                            let mapped = (r.min_x..=r.max_x).contains(&i)
                                && (r.min_y..=r.max_y).contains(&j);
                            assert_eq!(
                                covers, mapped,
                                "f={filter_size} s={stride} in=({x},{y}) out=({i},{j})"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn spatial_iter_is_x_major() {
        let r = input_window(0, 0, 2, 1, 1);
        let cells: Vec<_> = r.spatial_iter().collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
