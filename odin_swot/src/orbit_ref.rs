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

//! the orbit reference table of a repeat orbit mission. All arrays are indexed by `pass_number - 1`, time values are
//! offsets from the start of the cycle. Sample rows can contain missing values (`null` in JSON, NaN in memory)

use std::{fs, path::Path};
use chrono::TimeDelta;
use serde::{Deserialize, Deserializer};
use tracing::info;
use crate::datetime::{de_timedeltas_from_fractional_secs, timedelta_from_fractional_secs};
use crate::geometry::PassGeometry;
use crate::mission::MissionType;
use crate::errors::{OdinSwotError, Result, invalid_reference};

#[derive(Debug,Clone,Default,Deserialize)]
pub struct OrbitReference {
    /// start offset of each pass
    #[serde(deserialize_with="de_timedeltas_from_fractional_secs")]
    pub start_time: Vec<TimeDelta>,

    /// end offset of each pass
    #[serde(deserialize_with="de_timedeltas_from_fractional_secs")]
    pub end_time: Vec<TimeDelta>,

    /// nadir ground track
    #[serde(deserialize_with="de_sample_rows")]
    pub line_string_lon: Vec<Vec<f64>>,
    #[serde(deserialize_with="de_sample_rows")]
    pub line_string_lat: Vec<Vec<f64>>,

    /// nadir latitude over elapsed time
    #[serde(deserialize_with="de_sample_rows")]
    pub lat_nadir: Vec<Vec<f64>>,
    #[serde(deserialize_with="de_time_rows")]
    pub pass_time: Vec<Vec<TimeDelta>>,

    // swath missions only
    #[serde(default, deserialize_with="de_sample_rows")]
    pub left_polygon_lon: Vec<Vec<f64>>,
    #[serde(default, deserialize_with="de_sample_rows")]
    pub left_polygon_lat: Vec<Vec<f64>>,
    #[serde(default, deserialize_with="de_sample_rows")]
    pub right_polygon_lon: Vec<Vec<f64>>,
    #[serde(default, deserialize_with="de_sample_rows")]
    pub right_polygon_lat: Vec<Vec<f64>>,
}

fn de_sample_rows <'a,D>(deserializer: D) -> std::result::Result<Vec<Vec<f64>>,D::Error> where D: Deserializer<'a> {
    let rows: Vec<Vec<Option<f64>>> = Vec::deserialize(deserializer)?;
    Ok( rows.into_iter().map( |row| row.into_iter().map( |v| v.unwrap_or(f64::NAN)).collect()).collect() )
}

fn de_time_rows <'a,D>(deserializer: D) -> std::result::Result<Vec<Vec<TimeDelta>>,D::Error> where D: Deserializer<'a> {
    let rows: Vec<Vec<Option<f64>>> = Vec::deserialize(deserializer)?;
    Ok( rows.into_iter().map( |row| {
        row.into_iter().map( |v| timedelta_from_fractional_secs( v.unwrap_or(f64::NAN))).collect()
    }).collect() )
}

impl OrbitReference {

    pub fn from_json_str (s: &str) -> Result<Self> {
        Ok( serde_json::from_str(s)? )
    }

    pub fn from_json_file (path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let orbit = Self::from_json_str( &fs::read_to_string(path)?)?;
        info!("loaded orbit reference with {} passes from {:?}", orbit.n_passes(), path);
        Ok(orbit)
    }

    pub fn n_passes (&self) -> usize { self.start_time.len() }

    /// check that all tables have one row per pass and that the per-pass sample rows are consistent
    pub fn validate (&self, passes_per_cycle: usize, mission_type: MissionType) -> Result<()> {
        let mut tables: Vec<(&str,usize)> = vec![
            ("start_time", self.start_time.len()),
            ("end_time", self.end_time.len()),
            ("line_string_lon", self.line_string_lon.len()),
            ("line_string_lat", self.line_string_lat.len()),
            ("lat_nadir", self.lat_nadir.len()),
            ("pass_time", self.pass_time.len()),
        ];
        if mission_type == MissionType::Swath {
            tables.push( ("left_polygon_lon", self.left_polygon_lon.len()));
            tables.push( ("left_polygon_lat", self.left_polygon_lat.len()));
            tables.push( ("right_polygon_lon", self.right_polygon_lon.len()));
            tables.push( ("right_polygon_lat", self.right_polygon_lat.len()));
        }

        for (name,len) in tables {
            if len != passes_per_cycle {
                return Err( invalid_reference!("{} has {} rows, expected {}", name, len, passes_per_cycle))
            }
        }

        for i in 0..passes_per_cycle {
            if self.lat_nadir[i].len() != self.pass_time[i].len() {
                return Err( invalid_reference!("pass {} has {} nadir latitudes but {} time samples", i+1, self.lat_nadir[i].len(), self.pass_time[i].len()))
            }
            if self.line_string_lon[i].len() != self.line_string_lat[i].len() {
                return Err( invalid_reference!("pass {} has inconsistent ground track samples", i+1))
            }
        }

        Ok(())
    }

    /// time between the start of the first pass and the end of the last pass
    pub fn cycle_duration (&self) -> Result<TimeDelta> {
        match (self.start_time.first(), self.end_time.last()) {
            (Some(start), Some(end)) if end > start => Ok( *end - *start ),
            _ => Err( invalid_reference!("no valid first pass start and last pass end time"))
        }
    }

    fn index (&self, pass_number: u32) -> Option<usize> {
        let n = self.start_time.len();
        if pass_number == 0 || pass_number as usize > n { None } else { Some( pass_number as usize - 1) }
    }

    /// start of the pass relative to the cycle start
    pub fn pass_offset (&self, pass_number: u32) -> Option<TimeDelta> {
        self.index(pass_number).map( |i| self.start_time[i])
    }

    pub fn pass_end_offset (&self, pass_number: u32) -> Option<TimeDelta> {
        self.index(pass_number).and_then( |i| self.end_time.get(i).copied())
    }

    /// the ground track geometry we intersect for the given mission type
    pub fn pass_geometry (&self, pass_number: u32, mission_type: MissionType) -> Option<PassGeometry> {
        let i = self.index(pass_number)?;
        match mission_type {
            MissionType::Nadir => {
                Some( PassGeometry::nadir( self.line_string_lon.get(i)?, self.line_string_lat.get(i)?))
            }
            MissionType::Swath => {
                Some( PassGeometry::swath(
                    self.left_polygon_lon.get(i)?, self.left_polygon_lat.get(i)?,
                    self.right_polygon_lon.get(i)?, self.right_polygon_lat.get(i)?
                ))
            }
        }
    }

    /// nadir latitude and elapsed time samples of the given pass
    pub fn nadir_profile (&self, pass_number: u32) -> Option<(&[f64],&[TimeDelta])> {
        let i = self.index(pass_number)?;
        Some( (self.lat_nadir.get(i)?.as_slice(), self.pass_time.get(i)?.as_slice()) )
    }
}
