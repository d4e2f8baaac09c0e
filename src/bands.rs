// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Splits the column axis into one contiguous band per worker and
//! defines the per-sample result types.  The split truncates: with W
//! workers and a side that W does not divide, the trailing
//! `side mod W` columns are dropped rather than folded into the last
//! band.  That keeps every band the same size, which is what makes
//! the per-band timings comparable, and it is the behavior the
//! renderer's reference images were produced with.

use errors::RenderError;
use escape;
use itertools::iproduct;
use num::Complex;

/// The outcome for one sample point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// The sample's column coordinate.
    pub x: f64,
    /// The sample's row coordinate.
    pub y: f64,
    /// Whether the point survived the iteration budget.
    pub member: bool,
}

/// A contiguous run of grid columns owned by exactly one worker.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    /// The worker index this band is keyed by.
    pub index: usize,
    /// The column coordinates this band owns, in grid order.
    pub x_values: Vec<f64>,
}

/// The ordered classifications produced from one band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandResult {
    /// The index of the band that produced these samples.
    pub band: usize,
    /// One classification per (x, y) pair, column-major: all rows of
    /// the band's first column, then all rows of its second, and so on.
    pub samples: Vec<Classification>,
}

/// Divide the column coordinates into `workers` equal contiguous
/// bands, truncating the leftovers.  Rejects a split in which the
/// bands would be empty.
pub fn partition(x_values: &[f64], workers: usize) -> Result<Vec<Band>, RenderError> {
    if workers == 0 {
        return Err(RenderError::NoWorkers);
    }
    let band_len = x_values.len() / workers;
    if band_len == 0 {
        return Err(RenderError::TooFewColumns {
            side: x_values.len(),
            workers,
        });
    }
    Ok((0..workers)
        .map(|index| Band {
            index,
            x_values: x_values[index * band_len..(index + 1) * band_len].to_vec(),
        })
        .collect())
}

impl Band {
    /// Classify every sample in this band: the band's columns crossed
    /// with the full row sequence, in order.
    pub fn classify(&self, y_values: &[f64], steps: u32) -> BandResult {
        let samples = iproduct!(self.x_values.iter(), y_values.iter())
            .map(|(&x, &y)| Classification {
                x,
                y,
                member: escape::in_set(Complex { re: x, im: y }, steps),
            })
            .collect();
        BandResult {
            band: self.index,
            samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn even_partition_covers_every_column() {
        let xs = columns(8);
        let bands = partition(&xs, 2).unwrap();
        assert_eq!(bands.len(), 2);
        let rejoined: Vec<f64> = bands.iter().flat_map(|b| b.x_values.clone()).collect();
        assert_eq!(rejoined, xs);
    }

    #[test]
    fn leftover_columns_are_dropped() {
        let xs = columns(10);
        let bands = partition(&xs, 4).unwrap();
        let kept: usize = bands.iter().map(|b| b.x_values.len()).sum();
        // 10 mod 4 == 2 trailing columns silently dropped.
        assert_eq!(kept, 8);
        for band in &bands {
            assert!(!band.x_values.contains(&8.0));
            assert!(!band.x_values.contains(&9.0));
        }
    }

    #[test]
    fn bands_are_contiguous_and_keyed_in_order() {
        let xs = columns(9);
        let bands = partition(&xs, 3).unwrap();
        for (i, band) in bands.iter().enumerate() {
            assert_eq!(band.index, i);
            assert_eq!(band.x_values, xs[i * 3..(i + 1) * 3].to_vec());
        }
    }

    #[test]
    fn more_workers_than_columns_is_rejected() {
        let xs = columns(3);
        assert!(partition(&xs, 8).is_err());
    }

    #[test]
    fn classify_walks_columns_then_rows() {
        let band = Band {
            index: 0,
            x_values: vec![10.0, 20.0],
        };
        let result = band.classify(&[1.0, 2.0], 5);
        let order: Vec<(f64, f64)> = result.samples.iter().map(|s| (s.x, s.y)).collect();
        assert_eq!(
            order,
            vec![(10.0, 1.0), (10.0, 2.0), (20.0, 1.0), (20.0, 2.0)]
        );
    }
}
