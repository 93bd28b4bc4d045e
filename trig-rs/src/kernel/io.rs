use super::ConfigError;
use crate::sample::Point;
use ndarray::{Array1, ArrayView1};

/// Borrow contiguous 1D input, such as the x grid of a plot.
pub trait Read1D<T> {
    /// Borrow the underlying input as a contiguous slice.
    fn read_slice(&self) -> Result<&[T], ConfigError>;
}

/// Borrow contiguous 1D output for evaluated values.
pub trait Write1D<T> {
    /// Borrow the underlying output as a mutable contiguous slice.
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError>;
}

/// Ordered destination for `(x, y)` pairs.
///
/// Points are pushed in ascending x order; sinks must keep that order.
pub trait PointSink<T> {
    /// Append one point.
    fn push_point(&mut self, point: Point<T>);

    /// Number of points accepted so far.
    fn point_count(&self) -> usize;
}

impl<T> Read1D<T> for [T] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T> Write1D<T> for [T] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

impl<T> Read1D<T> for Vec<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self.as_slice())
    }
}

impl<T> Write1D<T> for Vec<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self.as_mut_slice())
    }
}

impl<T> Read1D<T> for Array1<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice().ok_or(ConfigError::NonContiguous { arg: "grid" })
    }
}

impl<T> Write1D<T> for Array1<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut()
            .ok_or(ConfigError::NonContiguous { arg: "values" })
    }
}

impl<'a, T> Read1D<T> for ArrayView1<'a, T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "grid_view" })
    }
}

impl<T> PointSink<T> for Vec<Point<T>> {
    fn push_point(&mut self, point: Point<T>) {
        self.push(point);
    }

    fn point_count(&self) -> usize {
        self.len()
    }
}

/// Column sink: x values and y values in two parallel vectors.
impl<T> PointSink<T> for (Vec<T>, Vec<T>) {
    fn push_point(&mut self, point: Point<T>) {
        self.0.push(point.x);
        self.1.push(point.y);
    }

    fn point_count(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{PointSink, Read1D, Write1D};
    use crate::kernel::ConfigError;
    use crate::sample::Point;
    use ndarray::{s, Array1};

    #[test]
    fn vec_and_slice_adapters() {
        let grid = vec![-1.0f64, 0.0, 1.0];
        assert_eq!(grid.read_slice().expect("vec adapter").len(), 3);

        let mut out = vec![0.0f64; 3];
        out.write_slice_mut()
            .expect("vec write adapter")
            .copy_from_slice(&[0.5, 0.25, 0.125]);
        assert_eq!(out, vec![0.5, 0.25, 0.125]);
    }

    #[test]
    fn strided_view_is_rejected() {
        let grid = Array1::linspace(0.0f64, 1.0, 6);
        let strided = grid.slice(s![..;2]);
        assert_eq!(
            strided.read_slice().expect_err("strided view"),
            ConfigError::NonContiguous { arg: "grid_view" }
        );
    }

    #[test]
    fn column_sink_splits_points() {
        let mut columns: (Vec<f64>, Vec<f64>) = (Vec::new(), Vec::new());
        columns.push_point(Point { x: 1.0, y: 2.0 });
        columns.push_point(Point { x: 3.0, y: 4.0 });
        assert_eq!(columns.point_count(), 2);
        assert_eq!(columns.0, vec![1.0, 3.0]);
        assert_eq!(columns.1, vec![2.0, 4.0]);
    }
}
