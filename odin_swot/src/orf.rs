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

//! reader for the orbit revolution files (ORF) that log the historic pass events of a mission.
//! We only need the first measurement time of each cycle from it, which is what we cache as a small
//! JSON object ({"<cycle>": "<iso timestamp>", ..}) so that the raw log does not have to be parsed for each run

use std::{collections::BTreeMap, fs::File, io::{BufRead,BufReader,Read,Write}, path::Path, sync::LazyLock};
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Serialize,Deserialize,Serializer,Deserializer,ser::SerializeMap,de::Error as DeError};
use tracing::{debug,info};
use crate::datetime::{ORF_DATETIME_FORMAT, parse_iso_millis, to_iso_millis};
use crate::errors::Result;

/// regex to extract date, time, cycle, pass, longitude and latitude from an ORF line, e.g.
/// "2023/03/29 21:08:24.853   1   1  0   -105.7203   -77.6117"
pub static ORF_ENTRY_RE: LazyLock<Regex> = LazyLock::new(||
    Regex::new( r"(?P<date>\d{4}/\d{2}/\d{2})\s+(?P<time>\d{2}:\d{2}:\d{2}\.\d{3})\s+(?P<cycle>\d+)\s+(?P<pass>\d+)\s+\d+\s+(?P<lon>-?\d+\.\d+)\s+(?P<lat>-?\d+\.\d+)").unwrap()
);

/// a single ORF event record
#[derive(Debug,Clone,PartialEq)]
pub struct OrfEntry {
    pub date: DateTime<Utc>,
    pub cycle_number: u32,
    pub pass_number: u32,
    pub latitude: f64,
    pub longitude: f64,
}

impl OrfEntry {
    /// parse a line of the ORF file. Lines that do not match [`ORF_ENTRY_RE`] return `None`
    pub fn from_line (line: &str) -> Option<OrfEntry> {
        let caps = ORF_ENTRY_RE.captures(line)?;

        let ds = format!("{} {}", &caps["date"], &caps["time"]);
        let date = NaiveDateTime::parse_from_str( &ds, ORF_DATETIME_FORMAT).ok()?.and_utc();
        let cycle_number: u32 = caps["cycle"].parse().ok()?;
        let pass_number: u32 = caps["pass"].parse().ok()?;
        let longitude: f64 = caps["lon"].parse().ok()?;
        let latitude: f64 = caps["lat"].parse().ok()?;

        Some( OrfEntry { date, cycle_number, pass_number, latitude, longitude } )
    }

    /// cycle 0 marks records that are not associated with a cycle, latitude 0 marks placeholder entries at the poles
    pub fn is_cycle_reference (&self) -> bool {
        self.cycle_number != 0 && self.latitude != 0.0
    }
}

/// cycle number -> time of the first valid measurement of that cycle.
/// This is immutable once constructed
#[derive(Debug,Clone,PartialEq,Default)]
pub struct CycleFirstMeasurement {
    cycles: BTreeMap<u32,DateTime<Utc>>
}

impl CycleFirstMeasurement {

    pub fn from_map (cycles: BTreeMap<u32,DateTime<Utc>>) -> Self {
        CycleFirstMeasurement { cycles }
    }

    /// build the mapping from ORF entries in file order. Only the first entry of each run of consecutive records
    /// with the same cycle number is a candidate. If a cycle shows up again in a later run, that run replaces it
    pub fn from_entries<I> (entries: I) -> Self where I: IntoIterator<Item=OrfEntry> {
        let mut cycles: BTreeMap<u32,DateTime<Utc>> = BTreeMap::new();
        let mut previous_cycle: Option<u32> = None;

        for e in entries.into_iter().filter( |e| e.is_cycle_reference()) {
            if previous_cycle != Some(e.cycle_number) {
                if let Some(t) = cycles.insert( e.cycle_number, e.date) {
                    debug!("cycle {} is interleaved in ORF input, replacing {} with {}", e.cycle_number, t, e.date);
                }
            }
            previous_cycle = Some(e.cycle_number);
        }

        CycleFirstMeasurement { cycles }
    }

    pub fn from_reader (reader: impl BufRead) -> Result<Self> {
        let mut entries: Vec<OrfEntry> = Vec::new();
        for line in reader.lines() {
            if let Some(e) = OrfEntry::from_line( &line?) {
                entries.push(e);
            }
        }
        Ok( Self::from_entries( entries))
    }

    /// parse a raw ORF file
    pub fn from_orf_file (path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let cfm = Self::from_reader( BufReader::new( File::open(path)?))?;
        info!("parsed {} cycles from ORF file {:?}", cfm.len(), path);
        Ok(cfm)
    }

    //--- the cached JSON form

    pub fn from_json_str (s: &str) -> Result<Self> {
        Ok( serde_json::from_str(s)? )
    }

    pub fn to_json_string (&self) -> Result<String> {
        Ok( serde_json::to_string_pretty(self)? )
    }

    pub fn load_json (path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut s = String::new();
        File::open(path)?.read_to_string(&mut s)?;
        let cfm = Self::from_json_str(&s)?;
        info!("loaded {} cycles from {:?}", cfm.len(), path);
        Ok(cfm)
    }

    pub fn write_json (&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all( self.to_json_string()?.as_bytes())?;
        Ok(())
    }

    //--- accessors

    pub fn get (&self, cycle_number: u32) -> Option<&DateTime<Utc>> {
        self.cycles.get(&cycle_number)
    }

    /// the highest logged cycle and its first measurement
    pub fn last_logged (&self) -> Option<(u32,DateTime<Utc>)> {
        self.cycles.last_key_value().map( |(c,t)| (*c,*t))
    }

    pub fn iter (&self) -> impl Iterator<Item=(&u32,&DateTime<Utc>)> {
        self.cycles.iter()
    }

    pub fn len (&self) -> usize { self.cycles.len() }

    pub fn is_empty (&self) -> bool { self.cycles.is_empty() }
}

impl Serialize for CycleFirstMeasurement {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> where S: Serializer {
        let mut map = serializer.serialize_map( Some(self.cycles.len()))?;
        for (cycle,date) in &self.cycles {
            map.serialize_entry( &cycle.to_string(), &to_iso_millis(date))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CycleFirstMeasurement {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error> where D: Deserializer<'de> {
        let raw: BTreeMap<String,String> = BTreeMap::deserialize(deserializer)?;
        let mut cycles: BTreeMap<u32,DateTime<Utc>> = BTreeMap::new();

        for (k,v) in raw {
            let cycle: u32 = k.trim().parse().map_err( |_| DeError::custom( format!("invalid cycle number {k}")))?;
            let date = parse_iso_millis(&v).map_err( |e| DeError::custom( e.to_string()))?;
            cycles.insert( cycle, date);
        }

        Ok( CycleFirstMeasurement { cycles } )
    }
}
