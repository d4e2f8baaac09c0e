//! Generates the ordered sample coordinates for a square render.  The
//! two axes are independent: each is `side_size` evenly spaced values
//! starting at the range minimum, and the maximum endpoint is never
//! sampled (the step divides by `side_size`, not `side_size - 1`).

use errors::RenderError;

/// The sample coordinates for one render: `side_size` values along
/// each axis, ordered ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    /// Column coordinates, ascending.
    pub x_values: Vec<f64>,
    /// Row coordinates, ascending.
    pub y_values: Vec<f64>,
}

impl SampleGrid {
    /// Build the grid for a region.  Either range may be given with
    /// its endpoints reversed; they are swapped before the step is
    /// computed, so the effective range is always oriented min ≤ max.
    pub fn new(
        side_size: usize,
        xrange: (f64, f64),
        yrange: (f64, f64),
    ) -> Result<SampleGrid, RenderError> {
        if side_size == 0 {
            return Err(RenderError::EmptySide);
        }
        check_finite(xrange)?;
        check_finite(yrange)?;
        Ok(SampleGrid {
            x_values: axis_values(side_size, xrange),
            y_values: axis_values(side_size, yrange),
        })
    }
}

fn check_finite(range: (f64, f64)) -> Result<(), RenderError> {
    if range.0.is_finite() && range.1.is_finite() {
        Ok(())
    } else {
        Err(RenderError::BadRange(range.0, range.1))
    }
}

fn axis_values(side_size: usize, range: (f64, f64)) -> Vec<f64> {
    let (mut min, mut max) = range;
    if min > max {
        ::std::mem::swap(&mut min, &mut max);
    }
    let step = (max - min) / (side_size as f64);
    (0..side_size).map(|i| min + (i as f64) * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_is_half_open() {
        let grid = SampleGrid::new(4, (-2.0, 1.0), (-1.5, 1.5)).unwrap();
        assert_eq!(grid.x_values, vec![-2.0, -1.25, -0.5, 0.25]);
        assert_eq!(grid.y_values, vec![-1.5, -0.75, 0.0, 0.75]);
    }

    #[test]
    fn reversed_range_is_swapped() {
        let forward = SampleGrid::new(8, (-2.0, 1.0), (-1.5, 1.5)).unwrap();
        let reversed = SampleGrid::new(8, (1.0, -2.0), (1.5, -1.5)).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn generation_is_bit_identical() {
        let a = SampleGrid::new(100, (-2.0, 1.0), (-1.5, 1.5)).unwrap();
        let b = SampleGrid::new(100, (-2.0, 1.0), (-1.5, 1.5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_side_is_rejected() {
        assert!(SampleGrid::new(0, (-2.0, 1.0), (-1.5, 1.5)).is_err());
    }

    #[test]
    fn non_finite_range_is_rejected() {
        assert!(SampleGrid::new(4, (::std::f64::NAN, 1.0), (-1.5, 1.5)).is_err());
        assert!(SampleGrid::new(4, (-2.0, 1.0), (0.0, ::std::f64::INFINITY)).is_err());
    }
}
