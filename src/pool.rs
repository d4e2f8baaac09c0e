// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fans the bands out to one scoped thread each and joins them all
//! before any result is read.  Each worker owns its band and hands
//! its results back through its join handle, so there is no shared
//! mutable state anywhere in the pool; the join loop is the only
//! synchronization point.

extern crate crossbeam;

use bands::{Band, BandResult};
use errors::RenderError;

/// Classify every band on its own thread and collect the results in
/// band-index order.  Blocks until all workers have finished.  A
/// worker that panics fails the whole run; a partial collection is
/// never returned.
pub fn classify(
    bands: &[Band],
    y_values: &[f64],
    steps: u32,
) -> Result<Vec<BandResult>, RenderError> {
    classify_with(bands, |band| band.classify(y_values, steps))
}

/// The fan-out/join skeleton, generic over the per-band job so the
/// failure path can be exercised with a job that dies.
fn classify_with<F>(bands: &[Band], job: F) -> Result<Vec<BandResult>, RenderError>
where
    F: Fn(&Band) -> BandResult + Sync,
{
    let job = &job;
    let collected = crossbeam::scope(|spawner| {
        let handles: Vec<_> = bands
            .iter()
            .map(|band| spawner.spawn(move |_| job(band)))
            .collect();
        handles
            .into_iter()
            .enumerate()
            .map(|(band, handle)| {
                handle
                    .join()
                    .map_err(|_| RenderError::WorkerFailed { band })
            })
            .collect::<Result<Vec<BandResult>, RenderError>>()
    });
    match collected {
        Ok(results) => results,
        Err(_) => Err(RenderError::PoolFailed),
    }
}
