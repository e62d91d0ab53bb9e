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

//! timestamp formats and serde support for the time values we read from reference files.
//! All absolute times are `DateTime<Utc>`, all offsets relative to a cycle start are `TimeDelta`

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use crate::errors::{OdinSwotError, Result};

/// date format of ORF event log records, e.g. "2023/01/01 00:00:00.000"
pub const ORF_DATETIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.3f";

/// ISO-8601 with millisecond precision and no zone suffix, e.g. "2023-01-01T00:00:00.000"
pub const ISO_MILLIS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

pub fn to_iso_millis (dt: &DateTime<Utc>) -> String {
    dt.format( ISO_MILLIS_FORMAT).to_string()
}

/// parse ISO-8601 timestamps with or without fractional seconds. A trailing 'Z' or numeric offset is accepted
pub fn parse_iso_millis (s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok( dt.to_utc())
    }
    NaiveDateTime::parse_from_str( s, "%Y-%m-%dT%H:%M:%S%.f")
        .map( |ndt| ndt.and_utc())
        .map_err( |_| OdinSwotError::InvalidTimestamp( s.to_string()))
}

/// parse a user supplied date spec, which can be a plain date ("2024-03-01") or any [`parse_iso_millis`] timestamp
pub fn parse_date_spec (s: &str) -> Result<DateTime<Utc>> {
    if let Ok(nd) = NaiveDate::parse_from_str( s.trim(), "%Y-%m-%d") {
        if let Some(ndt) = nd.and_hms_opt(0,0,0) {
            return Ok( ndt.and_utc())
        }
    }
    parse_iso_millis(s)
}

/// drop sub-second fractions (time values are always on or after the epoch for our missions)
pub fn floor_to_seconds (dt: DateTime<Utc>) -> DateTime<Utc> {
    dt - TimeDelta::nanoseconds( dt.timestamp_subsec_nanos() as i64)
}

/// NaN maps to zero, which never reaches a result since NaN samples are masked out before
pub fn timedelta_from_fractional_secs (secs: f64) -> TimeDelta {
    if secs.is_finite() { TimeDelta::nanoseconds( (secs * 1e9).round() as i64) } else { TimeDelta::zero() }
}

//--- serde support

pub fn ser_iso_millis<S: Serializer> (dt: &DateTime<Utc>, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str( &to_iso_millis(dt))
}

pub fn de_timedeltas_from_fractional_secs <'a,D>(deserializer: D) -> std::result::Result<Vec<TimeDelta>,D::Error> where D: Deserializer<'a> {
    let secs: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok( secs.into_iter().map( |s| timedelta_from_fractional_secs( s.unwrap_or(f64::NAN))).collect() )
}
