// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drives the pipeline across the requested resolutions and
//! repetitions, timing each run.  The timed span covers grid
//! generation, partitioning, and the worker pool; rasterizing and
//! writing artifacts happen outside the clock so the timings measure
//! computation, not disk.

extern crate num_cpus;

use bands::partition;
use errors::RenderError;
use grid::SampleGrid;
use pool;
use raster;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// One full benchmark request.
#[derive(Debug, Clone)]
pub struct Config {
    /// Worker (and band) count, already resolved to ≥ 1.
    pub workers: usize,
    /// Column coordinate range, either orientation.
    pub xrange: (f64, f64),
    /// Row coordinate range, either orientation.
    pub yrange: (f64, f64),
    /// The grid side lengths to render, in order.
    pub side_sizes: Vec<usize>,
    /// Iteration budget per sample.
    pub steps: u32,
    /// How many times to repeat each side length.
    pub reps: usize,
}

/// The wall-clock record for one (side_size, repetition) run.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    /// The grid side length that was rendered.
    pub side_size: usize,
    /// Seconds spent in grid generation, partitioning, and the pool.
    pub seconds: f64,
}

/// Map a requested worker count to an effective one: zero means one
/// worker per available core.
pub fn resolve_workers(requested: usize) -> usize {
    if requested == 0 {
        num_cpus::get()
    } else {
        requested
    }
}

impl Config {
    /// Reject contradictory configurations before any worker is
    /// dispatched.  Every side length must be able to feed every
    /// worker at least one column.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.workers == 0 {
            return Err(RenderError::NoWorkers);
        }
        if self.reps == 0 {
            return Err(RenderError::NoReps);
        }
        for &side in &self.side_sizes {
            if side == 0 {
                return Err(RenderError::EmptySide);
            }
            if side < self.workers {
                return Err(RenderError::TooFewColumns {
                    side,
                    workers: self.workers,
                });
            }
        }
        SampleGrid::new(1, self.xrange, self.yrange).map(|_| ())
    }
}

/// Run the whole benchmark.  Each (side_size, rep) pair is rendered
/// once; when `save_dir` is given the raster is also written there as
/// `size{side}rep{rep}.pnm`.  Returns one timing per run, in
/// execution order.
pub fn run(config: &Config, save_dir: Option<&Path>) -> Result<Vec<Timing>, RenderError> {
    config.validate()?;
    let mut timings = Vec::with_capacity(config.side_sizes.len() * config.reps);
    for &side_size in &config.side_sizes {
        for rep in 0..config.reps {
            let tic = Instant::now();
            let grid = SampleGrid::new(side_size, config.xrange, config.yrange)?;
            let bands = partition(&grid.x_values, config.workers)?;
            let results = pool::classify(&bands, &grid.y_values, config.steps)?;
            timings.push(Timing {
                side_size,
                seconds: tic.elapsed().as_secs_f64(),
            });
            println!("Done size {}, rep {}", side_size, rep);

            if let Some(dir) = save_dir {
                let image = raster::rasterize(&results);
                let path = dir.join(format!("size{}rep{}.pnm", side_size, rep));
                raster::write_image(&path, &image)?;
            }
        }
    }
    Ok(timings)
}

/// The timing-log file name for a worker count.
pub fn timing_file_name(workers: usize) -> String {
    format!("computation_time_workers{}.csv", workers)
}

/// Append the timing records to a CSV file, header first.
pub fn write_timings(path: &Path, timings: &[Timing]) -> Result<(), RenderError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "side_size,computation_time(s)")?;
    for timing in timings {
        writeln!(file, "{},{}", timing.side_size, timing.seconds)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate tempfile;

    fn config() -> Config {
        Config {
            workers: 2,
            xrange: (-2.0, 1.0),
            yrange: (-1.5, 1.5),
            side_sizes: vec![4, 6],
            steps: 30,
            reps: 2,
        }
    }

    #[test]
    fn one_timing_per_run_in_order() {
        let timings = run(&config(), None).unwrap();
        let sides: Vec<usize> = timings.iter().map(|t| t.side_size).collect();
        assert_eq!(sides, vec![4, 4, 6, 6]);
        for timing in &timings {
            assert!(timing.seconds >= 0.0);
        }
    }

    #[test]
    fn images_are_written_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config {
            side_sizes: vec![4],
            reps: 2,
            ..config()
        };
        run(&cfg, Some(dir.path())).unwrap();
        assert!(dir.path().join("size4rep0.pnm").exists());
        assert!(dir.path().join("size4rep1.pnm").exists());
    }

    #[test]
    fn timing_log_has_header_and_one_row_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(timing_file_name(2));
        let timings = vec![
            Timing {
                side_size: 4,
                seconds: 0.25,
            },
            Timing {
                side_size: 6,
                seconds: 0.5,
            },
        ];
        write_timings(&path, &timings).unwrap();
        let text = ::std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "side_size,computation_time(s)\n4,0.25\n6,0.5\n");
    }

    #[test]
    fn contradictory_configs_are_rejected_before_dispatch() {
        let mut cfg = config();
        cfg.side_sizes = vec![4, 1];
        assert!(run(&cfg, None).is_err());

        let mut cfg = config();
        cfg.reps = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = config();
        cfg.xrange = (::std::f64::NAN, 1.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn resolve_workers_maps_zero_to_all_cores() {
        assert!(resolve_workers(0) >= 1);
        assert_eq!(resolve_workers(3), 3);
    }
}
