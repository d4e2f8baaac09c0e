// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time membership test.  A point c belongs to the set if
//! iterating `z ← z² + c` from zero keeps `|z|² < 4` for the whole
//! iteration budget.

use num::Complex;

/// Classify one point of the complex plane.  Returns true if the
/// point survives the full iteration budget without escaping the
/// circle of radius 2.
///
/// The loop makes `steps + 1` passes, and each pass tests the z from
/// *before* its own update.  Both quirks are kept from the renderer
/// this one is compared against pixel-for-pixel: at `steps = 0` the
/// only test sees the initial z = 0, so every point classifies as a
/// member.
pub fn in_set(c: Complex<f64>, steps: u32) -> bool {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for _ in 0..=steps {
        if z.norm_sqr() >= 4.0 {
            return false;
        }
        z = z * z + c;
    }
    true
}
