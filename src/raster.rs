// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Rebuilds a dense two-color image from the joined band results.
//! The sample coordinates are floating point and need not be
//! grid-aligned, so each axis is normalized by rank: sort the
//! distinct values, and a coordinate's pixel index is its position in
//! that order.  Painting only ever sets the one foreground color, so
//! the image is identical no matter what order the bands arrive in.

use bands::BandResult;
use errors::RenderError;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use std::path::Path;

const BACKGROUND: u8 = 0;
const FOREGROUND: u8 = 255;

/// A dense grayscale buffer, row-major, one byte per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    /// Number of distinct column coordinates.
    pub width: usize,
    /// Number of distinct row coordinates.
    pub height: usize,
    /// `width * height` bytes, row-major, background 0 / foreground 255.
    pub pixels: Vec<u8>,
}

/// Flatten the band results and paint the members.  Width and height
/// are the distinct-coordinate counts per axis, so duplicate
/// coordinates collapse onto one pixel and repainting it is a no-op.
pub fn rasterize(results: &[BandResult]) -> Raster {
    let samples = || results.iter().flat_map(|r| r.samples.iter());
    let x_order = distinct_sorted(samples().map(|s| s.x));
    let y_order = distinct_sorted(samples().map(|s| s.y));

    let width = x_order.len();
    let height = y_order.len();
    let mut pixels = vec![BACKGROUND; width * height];
    for sample in samples() {
        if !sample.member {
            continue;
        }
        let column = rank_of(&x_order, sample.x);
        let row = rank_of(&y_order, sample.y);
        pixels[row * width + column] = FOREGROUND;
    }
    Raster {
        width,
        height,
        pixels,
    }
}

/// The distinct values of one coordinate axis, ascending.  The rank
/// of a value is its index in the returned vector.
pub fn distinct_sorted<I: Iterator<Item = f64>>(values: I) -> Vec<f64> {
    let mut distinct: Vec<f64> = values.collect();
    // Non-finite coordinates are rejected at configuration time, so
    // the ordering here is total.
    distinct.sort_by(|a, b| a.partial_cmp(b).unwrap());
    distinct.dedup();
    distinct
}

fn rank_of(order: &[f64], value: f64) -> usize {
    match order.binary_search_by(|probe| probe.partial_cmp(&value).unwrap()) {
        Ok(rank) | Err(rank) => rank,
    }
}

/// Write the raster as a binary graymap PNM.  The image is encoded
/// fully in memory first, so a failure cannot leave a truncated file
/// behind.
pub fn write_image(path: &Path, raster: &Raster) -> Result<(), RenderError> {
    let mut encoded: Vec<u8> = Vec::with_capacity(raster.pixels.len());
    {
        let mut encoder = PNMEncoder::new(&mut encoded)
            .with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
        encoder.encode(
            &raster.pixels[..],
            raster.width as u32,
            raster.height as u32,
            ColorType::Gray(8),
        )?;
    }
    ::std::fs::write(path, &encoded)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bands::partition;
    use grid::SampleGrid;
    use pool;

    extern crate tempfile;

    fn render(side: usize, workers: usize, steps: u32) -> Raster {
        let grid = SampleGrid::new(side, (-2.0, 1.0), (-1.5, 1.5)).unwrap();
        let bands = partition(&grid.x_values, workers).unwrap();
        let results = pool::classify(&bands, &grid.y_values, steps).unwrap();
        rasterize(&results)
    }

    #[test]
    fn rank_count_equals_distinct_count() {
        let values = vec![3.0, 1.0, 3.0, 2.0, 1.0, -5.0];
        let order = distinct_sorted(values.into_iter());
        assert_eq!(order, vec![-5.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn four_by_four_end_to_end() {
        let raster = render(4, 2, 50);
        assert_eq!(raster.width, 4);
        assert_eq!(raster.height, 4);
        // Lowest-ranked corner is (x ≈ -2, y ≈ -1.5), which escapes.
        assert_eq!(raster.pixels[0], 0);
        // The sample nearest the origin is (0.25, 0.0): x rank 3,
        // y rank 2, and c = 0.25 never escapes.
        assert_eq!(raster.pixels[2 * 4 + 3], 255);
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render(16, 4, 60);
        let b = render(16, 4, 60);
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn band_order_does_not_change_the_image() {
        let grid = SampleGrid::new(8, (-2.0, 1.0), (-1.5, 1.5)).unwrap();
        let bands = partition(&grid.x_values, 4).unwrap();
        let mut results = pool::classify(&bands, &grid.y_values, 40).unwrap();
        let forward = rasterize(&results);
        results.reverse();
        let reversed = rasterize(&results);
        assert_eq!(forward, reversed);
    }

    #[test]
    fn written_image_is_a_nonempty_graymap() {
        let raster = render(8, 2, 30);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("size8rep0.pnm");
        write_image(&path, &raster).unwrap();
        let bytes = ::std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"P5"));
        assert!(bytes.len() > raster.pixels.len());
    }
}
