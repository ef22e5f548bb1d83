// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! PID coefficient set.

/// The three PID control-loop coefficients stored per valve.
///
/// The library only stores and serves these values; the control loop itself
/// runs elsewhere. Updates always replace the whole triple so a reader can
/// never observe a half-applied gain set.
///
/// # Examples
///
/// ```
/// use valvr_lib::types::PidGains;
///
/// let gains = PidGains::new(30.0, 0.0, 0.0);
/// assert_eq!(gains.kp, 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PidGains {
    /// Proportional coefficient.
    pub kp: f64,
    /// Integral coefficient.
    pub ki: f64,
    /// Derivative coefficient.
    pub kd: f64,
}

impl PidGains {
    /// Creates a coefficient set.
    #[must_use]
    pub const fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self { kp, ki, kd }
    }
}

impl Default for PidGains {
    /// The factory gains: proportional-only with `kp = 30.0`.
    fn default() -> Self {
        Self::new(30.0, 0.0, 0.0)
    }
}
