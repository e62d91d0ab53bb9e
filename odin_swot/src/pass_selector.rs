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

use std::fmt;
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;
use crate::cycle_axis::{CycleAxis, insertion_index};
use crate::errors::{OdinSwotError, Result, invalid_reference};

/// the query time window `[start,end)`
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new (start: DateTime<Utc>, duration: TimeDelta) -> Result<Self> {
        if duration < TimeDelta::zero() {
            Err( OdinSwotError::InvalidDateRange { start, duration })
        } else {
            Ok( DateRange { start, end: start + duration } )
        }
    }

    pub fn duration (&self) -> TimeDelta { self.end - self.start }
}

/// a (cycle,pass) that starts within or right before the query window
#[derive(Debug,Clone,PartialEq)]
pub struct CandidatePass {
    pub cycle_number: u32,
    pub pass_number: u32,

    /// first measurement of the cycle this pass belongs to
    pub cycle_start: DateTime<Utc>,

    /// cycle start + pass start offset
    pub first_measurement: DateTime<Utc>,

    /// cycle start + pass end offset
    pub last_measurement: DateTime<Utc>,
}

impl fmt::Display for CandidatePass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CandidatePass( cycle:{}, pass:{}, first:{}, last:{})", self.cycle_number, self.pass_number, self.first_measurement, self.last_measurement)
    }
}

/// enumerate the passes of `range`.
/// We first get the cycles that overlap the range from the cycle axis, then expand them into absolute pass start times
/// and search that (finer) axis again since cycle boundaries do not line up with pass boundaries. The result includes
/// the pass that is in progress at `range.start` and all passes that start before `range.end`
pub fn select_passes (range: &DateRange, passes_per_cycle: usize, axis: &CycleAxis,
                      start_offsets: &[TimeDelta], end_offsets: &[TimeDelta]) -> Result<Vec<CandidatePass>> {
    if start_offsets.len() != passes_per_cycle || end_offsets.len() != passes_per_cycle {
        return Err( invalid_reference!("expected {} pass offsets, got {} start and {} end offsets",
                                       passes_per_cycle, start_offsets.len(), end_offsets.len()))
    }

    if range.end >= axis.end() {
        let beyond = (range.end - axis.end()).num_milliseconds() / axis.cycle_duration().num_milliseconds().max(1);
        let cycle = axis.horizon() + 1 + beyond as usize;
        return Err( OdinSwotError::HorizonExceeded { cycle, horizon: axis.horizon() })
    }

    let i0 = axis.insertion_index( &range.start).saturating_sub(1);
    let i1 = axis.insertion_index( &range.end);
    if i1 <= i0 {
        return Ok( Vec::new())
    }
    debug!("cycles {}..{} overlap {} - {}", i0+1, i1, range.start, range.end);

    let cycle_starts = &axis.as_slice()[i0..i1];
    let pass_starts: Vec<DateTime<Utc>> = cycle_starts.iter()
        .flat_map( |t| start_offsets.iter().map( move |dt| *t + *dt))
        .collect();

    let lower = insertion_index( &pass_starts, &range.start).saturating_sub(1);
    let upper = pass_starts.partition_point( |t| *t < range.end);
    if upper <= lower {
        return Ok( Vec::new())
    }

    let candidates: Vec<CandidatePass> = (lower..upper).map( |k| {
        let c = k / passes_per_cycle;
        let p = k % passes_per_cycle;
        let cycle_start = cycle_starts[c];
        CandidatePass {
            cycle_number: (i0 + c + 1) as u32,
            pass_number: (p + 1) as u32,
            cycle_start,
            first_measurement: cycle_start + start_offsets[p],
            last_measurement: cycle_start + end_offsets[p],
        }
    }).collect();

    debug!("{} candidate passes", candidates.len());
    Ok(candidates)
}
