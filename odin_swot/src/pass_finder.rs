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

use std::{collections::{BTreeSet,HashMap}, fmt, io, sync::Arc};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use tracing::{debug,warn};
use crate::cycle_axis::CycleAxis;
use crate::datetime::{floor_to_seconds, ser_iso_millis};
use crate::errors::{OdinSwotError, Result};
use crate::geometry::{SelectedArea, intersect};
use crate::mission::MissionConfig;
use crate::orbit_ref::OrbitReference;
use crate::orf::CycleFirstMeasurement;
use crate::pass_selector::{CandidatePass, DateRange, select_passes};
use crate::passage_time::{PassageInterval, resolve_intersection};

/// the read-only per-mission resources. This is loaded once and shared between queries as `Arc<MissionData>`
#[derive(Debug)]
pub struct MissionData {
    pub config: MissionConfig,
    pub orbit: OrbitReference,
    pub cycles: CycleFirstMeasurement,
    cycle_duration: TimeDelta,
}

impl MissionData {
    pub fn new (config: MissionConfig, orbit: OrbitReference, cycles: CycleFirstMeasurement) -> Result<Self> {
        config.validate()?;
        orbit.validate( config.passes_per_cycle, config.mission_type)?;
        let cycle_duration = orbit.cycle_duration()?;
        Ok( MissionData { config, orbit, cycles, cycle_duration } )
    }

    /// load the cached cycle mapping and the orbit reference table the config refers to
    pub fn load (config: MissionConfig) -> Result<Self> {
        for path in [&config.orf_file, &config.orbit_file] {
            if !path.is_file() {
                return Err( OdinSwotError::MissingResource( path.clone()))
            }
        }
        let cycles = CycleFirstMeasurement::load_json( &config.orf_file)?;
        let orbit = OrbitReference::from_json_file( &config.orbit_file)?;
        Self::new( config, orbit, cycles)
    }

    pub fn cycle_duration (&self) -> TimeDelta { self.cycle_duration }

    /// this is cheap enough to do per query
    pub fn cycle_axis (&self) -> Result<CycleAxis> {
        CycleAxis::new( &self.cycles, self.cycle_duration, self.config.cycle_horizon)
    }
}

/// a pass that crosses the selected area, with the times its ground track enters and leaves the area
#[derive(Debug,Clone,PartialEq,Eq,Serialize)]
pub struct ResultRow {
    pub cycle_number: u32,
    pub pass_number: u32,

    #[serde(serialize_with="ser_iso_millis")]
    pub first_measurement: DateTime<Utc>,

    #[serde(serialize_with="ser_iso_millis")]
    pub last_measurement: DateTime<Utc>,
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:6} {:6}  {}  {}", self.cycle_number, self.pass_number,
            self.first_measurement.format("%Y-%m-%d %H:%M:%S"), self.last_measurement.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// the query interface. Holds a shared reference to the mission data, queries do not mutate anything
#[derive(Debug,Clone)]
pub struct PassFinder {
    data: Arc<MissionData>
}

impl PassFinder {
    pub fn new (data: Arc<MissionData>) -> Self {
        PassFinder { data }
    }

    pub fn mission (&self) -> &MissionData { &self.data }

    /// all passes that start in (or are in progress at the start of) `[start, start + search_duration)`.
    /// The search duration defaults to one cycle
    pub fn select_passes (&self, start: DateTime<Utc>, search_duration: Option<TimeDelta>) -> Result<Vec<CandidatePass>> {
        let data = &self.data;
        let range = DateRange::new( start, search_duration.unwrap_or( data.cycle_duration))?;
        let axis = data.cycle_axis()?;

        select_passes( &range, data.config.passes_per_cycle, &axis, &data.orbit.start_time, &data.orbit.end_time)
    }

    /// passage intervals for the given pass numbers. Passes that do not intersect the area are skipped.
    /// The ground track is the same in every cycle, hence we only need the pass numbers
    pub fn passage_times (&self, pass_numbers: impl IntoIterator<Item=u32>, area: &SelectedArea) -> Vec<PassageInterval> {
        let data = &self.data;
        let mission_type = data.config.mission_type;
        let policy = data.config.intersection_policy;
        let mut passages: Vec<PassageInterval> = Vec::new();

        for pass_number in pass_numbers {
            let (Some(geometry), Some((lat_nadir,elapsed))) = (data.orbit.pass_geometry( pass_number, mission_type), data.orbit.nadir_profile( pass_number)) else {
                warn!("no reference data for pass {}", pass_number);
                continue
            };

            let intersection = intersect( &geometry, area);
            if intersection.is_empty() { continue }

            if let Some((first_time,last_time)) = resolve_intersection( lat_nadir, elapsed, &intersection, policy) {
                passages.push( PassageInterval { pass_number, first_time, last_time });
            } else {
                warn!("dropping pass {}: no finite nadir latitude samples", pass_number);
            }
        }

        passages
    }

    /// the main query: candidate passes in the time window that cross the selected area (whole earth if `None`),
    /// with measurement times restricted to the passage through the area, ordered by (cycle,pass)
    pub fn select_and_resolve (&self, start: DateTime<Utc>, search_duration: Option<TimeDelta>, area: Option<&SelectedArea>) -> Result<Vec<ResultRow>> {
        let candidates = self.select_passes( start, search_duration)?;
        if candidates.is_empty() {
            return Ok( Vec::new())
        }

        let whole_earth;
        let area = match area {
            Some(area) => area,
            None => { whole_earth = SelectedArea::whole_earth(); &whole_earth }
        };

        let pass_numbers: BTreeSet<u32> = candidates.iter().map( |c| c.pass_number).collect();
        let passages: HashMap<u32,PassageInterval> = self.passage_times( pass_numbers, area).into_iter()
            .map( |p| (p.pass_number, p))
            .collect();
        debug!("{} of {} candidates cross the selected area", passages.len(), candidates.len());

        let floor = self.data.config.floor_to_seconds;
        let mut rows: Vec<ResultRow> = candidates.iter().filter_map( |c| {
            passages.get( &c.pass_number).map( |p| {
                let first = c.cycle_start + p.first_time;
                let last = c.cycle_start + p.last_time;
                ResultRow {
                    cycle_number: c.cycle_number,
                    pass_number: c.pass_number,
                    first_measurement: if floor { floor_to_seconds(first) } else { first },
                    last_measurement: if floor { floor_to_seconds(last) } else { last },
                }
            })
        }).collect();

        rows.sort_by_key( |r| (r.cycle_number, r.pass_number));
        Ok(rows)
    }
}

/// write result rows as ';' separated CSV with a header line
pub fn write_csv (rows: &[ResultRow], writer: impl io::Write) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
