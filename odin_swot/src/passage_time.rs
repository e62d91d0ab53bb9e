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

//! mapping of intersection boundaries back into elapsed times. The nadir latitude is monotonic over a half orbit,
//! so we can use it as a proxy for the time along the track and look up boundary latitudes with a binary search

use std::fmt;
use chrono::TimeDelta;
use crate::geometry::{GeoCoord, Intersection};
use crate::mission::IntersectionPolicy;

/// the part of a pass (as offsets from the cycle start) during which its ground track is inside the selected area
#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub struct PassageInterval {
    pub pass_number: u32,
    pub first_time: TimeDelta,
    pub last_time: TimeDelta,
}

impl fmt::Display for PassageInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PassageInterval( pass:{}, first:{} s, last:{} s)",
            self.pass_number, self.first_time.num_milliseconds() as f64 / 1000.0, self.last_time.num_milliseconds() as f64 / 1000.0)
    }
}

/// index of the first element that is not less than `v`
fn search_sorted (axis: &[f64], v: f64) -> usize {
    axis.partition_point( |x| *x < v)
}

/// turn the boundary points of one intersection piece into a `(first,last)` elapsed time interval.
/// Returns `None` if there are no finite latitude samples or no boundary points
pub fn resolve_passage_time (lat_nadir: &[f64], elapsed: &[TimeDelta], boundary: &[GeoCoord]) -> Option<(TimeDelta,TimeDelta)> {
    let (mut lats, mut times): (Vec<f64>,Vec<TimeDelta>) = lat_nadir.iter().zip( elapsed.iter())
        .filter( |(lat,_)| lat.is_finite())
        .map( |(lat,t)| (*lat,*t))
        .unzip();

    if lats.is_empty() { return None }
    let (b0, b1) = (boundary.first()?, boundary.last()?);

    // descending pass
    if lats[0] > lats[lats.len()-1] {
        lats.reverse();
        times.reverse();
    }

    let last = lats.len() - 1;
    let t0 = search_sorted( &lats, b0.y).min(last);
    let t1 = search_sorted( &lats, b1.y).min(last);

    let a = times[t0.min(t1)];
    let b = times[t0.max(t1)];
    Some( (a.min(b), a.max(b)) )
}

/// resolve all pieces of an intersection and combine them according to the policy.
/// `FirstPiece` picks the piece that the ground track enters first
pub fn resolve_intersection (lat_nadir: &[f64], elapsed: &[TimeDelta], intersection: &Intersection, policy: IntersectionPolicy) -> Option<(TimeDelta,TimeDelta)> {
    let bounds = intersection.boundaries().into_iter()
        .filter_map( |boundary| resolve_passage_time( lat_nadir, elapsed, &boundary));

    match policy {
        IntersectionPolicy::FirstPiece => bounds.min_by_key( |(first,_)| *first),
        IntersectionPolicy::AllPieces => bounds.reduce( |(f0,l0), (f1,l1)| (f0.min(f1), l0.max(l1)))
    }
}
