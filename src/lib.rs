#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Banded Mandelbrot renderer
//!
//! The Mandelbrot set is the set of complex numbers c for which the
//! iteration `z ← z² + c`, starting from zero, never escapes the
//! circle of radius 2.  This crate renders a rectangular region of
//! the complex plane by sampling it on a square grid, splitting the
//! grid into contiguous column bands, classifying each band on its
//! own thread, and reassembling the joined results into a two-color
//! raster.
//!
//! The split is deliberately coarse: one band per worker, each band a
//! contiguous run of grid columns crossed with the full set of rows.
//! Workers share nothing; each returns its results through its join
//! handle, and the image is rebuilt only after every worker has
//! finished.  Because the sample coordinates are floating point, the
//! rasterizer maps them to pixel indices by rank rather than by
//! arithmetic, so the image is deterministic no matter what order the
//! bands come back in.
//!
//! The harness module drives the pipeline across a list of
//! resolutions and repetitions, recording wall-clock timings, which
//! makes the crate usable as a thread-scaling benchmark.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
extern crate num;
extern crate num_cpus;

pub mod bands;
pub mod errors;
pub mod escape;
pub mod grid;
pub mod harness;
pub mod pool;
pub mod raster;

pub use bands::{partition, Band, BandResult, Classification};
pub use errors::RenderError;
pub use grid::SampleGrid;
pub use harness::{resolve_workers, Config, Timing};
pub use raster::Raster;
