// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Weekly setpoint schedule.

use std::ops::RangeInclusive;

use crate::types::ScheduleSlot;

/// Hours of the day treated as daytime when building a banded schedule.
const DAYTIME_HOURS: RangeInclusive<u8> = 6..=21;

/// A fixed 7×24 grid of temperature setpoints.
///
/// The grid always holds exactly one value per day-of-week and hour-of-day;
/// there is no notion of an unset entry. Access goes through
/// [`ScheduleSlot`], so lookups are bounds-checked by construction.
///
/// # Examples
///
/// ```
/// use valvr_lib::schedule::WeekSchedule;
/// use valvr_lib::types::ScheduleSlot;
///
/// let mut schedule = WeekSchedule::banded(21.0, 17.0);
/// let slot = ScheduleSlot::new(0, 8).unwrap();
/// assert_eq!(schedule.get(slot), 21.0);
///
/// schedule.set(slot, 19.5);
/// assert_eq!(schedule.get(slot), 19.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WeekSchedule {
    grid: [[f64; 24]; 7],
}

impl WeekSchedule {
    /// Number of days in the grid.
    pub const DAYS: usize = 7;

    /// Number of hours per day in the grid.
    pub const HOURS: usize = 24;

    /// Creates a schedule with a single setpoint for every slot.
    #[must_use]
    pub fn uniform(celsius: f64) -> Self {
        Self {
            grid: [[celsius; 24]; 7],
        }
    }

    /// Creates the factory day/night pattern: `daytime` for hours 6 through
    /// 21 inclusive, `nighttime` otherwise, on every day of the week.
    #[must_use]
    pub fn banded(daytime: f64, nighttime: f64) -> Self {
        let mut schedule = Self::uniform(nighttime);
        for day in &mut schedule.grid {
            for hour in DAYTIME_HOURS {
                day[usize::from(hour)] = daytime;
            }
        }
        schedule
    }

    /// Returns the setpoint at the given slot.
    #[must_use]
    pub fn get(&self, slot: ScheduleSlot) -> f64 {
        self.grid[usize::from(slot.day())][usize::from(slot.hour())]
    }

    /// Replaces the setpoint at the given slot.
    pub fn set(&mut self, slot: ScheduleSlot, celsius: f64) {
        self.grid[usize::from(slot.day())][usize::from(slot.hour())] = celsius;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(day: u8, hour: u8) -> ScheduleSlot {
        ScheduleSlot::new(day, hour).unwrap()
    }

    #[test]
    fn uniform_fills_every_slot() {
        let schedule = WeekSchedule::uniform(18.5);
        for day in 0..=6 {
            for hour in 0..=23 {
                assert_eq!(schedule.get(slot(day, hour)), 18.5);
            }
        }
    }

    #[test]
    fn banded_pattern_boundaries() {
        let schedule = WeekSchedule::banded(21.0, 17.0);

        // Night up to 05:00, day from 06:00 through 21:00, night again at 22:00
        assert_eq!(schedule.get(slot(0, 5)), 17.0);
        assert_eq!(schedule.get(slot(0, 6)), 21.0);
        assert_eq!(schedule.get(slot(0, 21)), 21.0);
        assert_eq!(schedule.get(slot(0, 22)), 17.0);
        assert_eq!(schedule.get(slot(6, 0)), 17.0);
        assert_eq!(schedule.get(slot(6, 12)), 21.0);
    }

    #[test]
    fn set_then_get_round_trips_every_slot() {
        let mut schedule = WeekSchedule::uniform(0.0);
        for day in 0..=6 {
            for hour in 0..=23 {
                let value = f64::from(day) * 24.0 + f64::from(hour);
                schedule.set(slot(day, hour), value);
                assert_eq!(schedule.get(slot(day, hour)), value);
            }
        }
    }

    #[test]
    fn set_touches_only_its_slot() {
        let mut schedule = WeekSchedule::uniform(17.0);
        schedule.set(slot(3, 12), 25.0);

        assert_eq!(schedule.get(slot(3, 12)), 25.0);
        assert_eq!(schedule.get(slot(3, 11)), 17.0);
        assert_eq!(schedule.get(slot(3, 13)), 17.0);
        assert_eq!(schedule.get(slot(2, 12)), 17.0);
        assert_eq!(schedule.get(slot(4, 12)), 17.0);
    }
}
