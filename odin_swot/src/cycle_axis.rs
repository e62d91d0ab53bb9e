/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;
use crate::orf::CycleFirstMeasurement;
use crate::errors::{OdinSwotError, Result, op_failed};

/// number of cycles we cover if the mission config does not say otherwise
pub const DEFAULT_CYCLE_HORIZON: usize = 200;

/// return the index `i` such that `axis[i-1] <= v < axis[i]` for a non-decreasing axis.
/// Values before the first element map to 0, values at or after the last one map to `axis.len()`
pub fn insertion_index<T: PartialOrd> (axis: &[T], v: &T) -> usize {
    axis.partition_point( |x| x <= v)
}

/// dense per-cycle start times, indexed by `cycle_number - 1`.
/// Logged cycles keep their ORF time, all others are extrapolated with a constant cycle duration
#[derive(Debug,Clone,PartialEq)]
pub struct CycleAxis {
    starts: Vec<DateTime<Utc>>,
    logged: Vec<bool>,
    cycle_duration: TimeDelta,
}

impl CycleAxis {

    /// build the axis for cycles `1..=horizon`.
    /// Slots after the last logged cycle are `last_logged + k * cycle_duration` (k = 1,2,..). Gaps between logged
    /// cycles continue from the closest preceding logged cycle, and cycles before the first logged one are extrapolated
    /// backwards from it
    pub fn new (cfm: &CycleFirstMeasurement, cycle_duration: TimeDelta, horizon: usize) -> Result<Self> {
        let (last_cycle, last_time) = cfm.last_logged().ok_or( OdinSwotError::NoLoggedCycles)?;
        if last_cycle as usize > horizon {
            return Err( OdinSwotError::HorizonExceeded { cycle: last_cycle as usize, horizon })
        }
        if cfm.get(0).is_some() {
            return Err( op_failed!("cycle 0 is not a valid cycle number"))
        }
        if cycle_duration <= TimeDelta::zero() {
            return Err( op_failed!("cycle duration has to be positive: {}", cycle_duration))
        }

        let mut slots: Vec<Option<DateTime<Utc>>> = vec![None; horizon];
        for (cycle, date) in cfm.iter() {
            slots[*cycle as usize - 1] = Some(*date);
        }
        let logged: Vec<bool> = slots.iter().map( |s| s.is_some()).collect();

        let last_idx = last_cycle as usize - 1;
        let first_idx = logged.iter().position( |l| *l).unwrap_or(last_idx);
        let first_time = slots[first_idx].unwrap_or(last_time);

        let mut starts: Vec<DateTime<Utc>> = Vec::with_capacity(horizon);
        let mut prev: Option<(usize,DateTime<Utc>)> = None;
        let mut rank: i32 = 0; // rank among the undefined slots after the last logged one

        for (i,slot) in slots.iter().enumerate() {
            let t = match slot {
                Some(t) => { prev = Some((i,*t)); *t }
                None if i > last_idx => {
                    rank += 1;
                    last_time + cycle_duration * rank
                }
                None => match prev {
                    Some((j,tj)) => tj + cycle_duration * (i - j) as i32,
                    None => first_time - cycle_duration * (first_idx - i) as i32
                }
            };
            starts.push(t);
        }

        if let Some(i) = starts.windows(2).position( |w| w[0] >= w[1]) {
            return Err( op_failed!("cycle axis not strictly increasing at cycle {} ({} >= {})", i+1, starts[i], starts[i+1]))
        }

        debug!("cycle axis with {} logged and {} extrapolated cycles", cfm.len(), horizon - cfm.len());
        Ok( CycleAxis { starts, logged, cycle_duration } )
    }

    /// number of cycles covered by this axis
    pub fn horizon (&self) -> usize { self.starts.len() }

    pub fn cycle_duration (&self) -> TimeDelta { self.cycle_duration }

    pub fn as_slice (&self) -> &[DateTime<Utc>] { &self.starts }

    /// start of the given (1-based) cycle
    pub fn cycle_start (&self, cycle_number: usize) -> Result<DateTime<Utc>> {
        if cycle_number == 0 || cycle_number > self.starts.len() {
            Err( OdinSwotError::HorizonExceeded { cycle: cycle_number, horizon: self.starts.len() })
        } else {
            Ok( self.starts[cycle_number-1] )
        }
    }

    pub fn is_extrapolated (&self, cycle_number: usize) -> bool {
        cycle_number == 0 || !self.logged.get(cycle_number-1).copied().unwrap_or(false)
    }

    /// the first point in time that is not covered by any cycle of this axis
    pub fn end (&self) -> DateTime<Utc> {
        self.starts[self.starts.len()-1] + self.cycle_duration
    }

    /// see [`insertion_index`]
    pub fn insertion_index (&self, t: &DateTime<Utc>) -> usize {
        insertion_index( &self.starts, t)
    }
}
