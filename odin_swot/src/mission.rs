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

use std::{fs, path::{Path,PathBuf}};
use serde::{Deserialize,Serialize};
use crate::cycle_axis::DEFAULT_CYCLE_HORIZON;
use crate::errors::{OdinSwotError, Result, op_failed};

/// which ground track geometry we intersect with the selected area
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum MissionType {
    /// left and right swath polygons
    Swath,
    /// nadir ground track line
    Nadir,
}

/// how to turn intersections with several disjoint pieces into a single passage time
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize,Default)]
pub enum IntersectionPolicy {
    /// only use the first piece (the ground track enters the area once)
    FirstPiece,
    /// union of the time bounds of all pieces
    #[default]
    AllPieces,
}

fn default_horizon()->usize { DEFAULT_CYCLE_HORIZON }
fn default_true()->bool { true }

/// the static properties of a repeat orbit mission.
/// Relative file paths are resolved against the directory the config was loaded from
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct MissionConfig {
    pub name: String,
    pub mission_type: MissionType,

    /// cached cycle -> first measurement mapping (JSON)
    pub orf_file: PathBuf,

    /// orbit reference table (JSON)
    pub orbit_file: PathBuf,

    pub passes_per_cycle: usize,

    #[serde(default="default_horizon")]
    pub cycle_horizon: usize,

    #[serde(default)]
    pub intersection_policy: IntersectionPolicy,

    #[serde(default="default_true")]
    pub floor_to_seconds: bool,
}

impl MissionConfig {
    pub fn new (name: impl ToString, mission_type: MissionType, passes_per_cycle: usize) -> Self {
        MissionConfig {
            name: name.to_string(),
            mission_type,
            orf_file: PathBuf::new(),
            orbit_file: PathBuf::new(),
            passes_per_cycle,
            cycle_horizon: DEFAULT_CYCLE_HORIZON,
            intersection_policy: IntersectionPolicy::default(),
            floor_to_seconds: true,
        }
    }

    /// load a RON mission config and resolve its file references
    pub fn load (path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config: MissionConfig = load_config(path)?;

        if let Some(dir) = path.parent() {
            config.orf_file = resolve_path( dir, &config.orf_file);
            config.orbit_file = resolve_path( dir, &config.orbit_file);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate (&self) -> Result<()> {
        if self.passes_per_cycle == 0 {
            return Err( op_failed!("mission {} has no passes per cycle", self.name))
        }
        if self.cycle_horizon == 0 {
            return Err( op_failed!("mission {} has an empty cycle horizon", self.name))
        }
        Ok(())
    }
}

fn resolve_path (dir: &Path, p: &Path) -> PathBuf {
    if p.is_relative() { dir.join(p) } else { p.to_path_buf() }
}

/// generic RON config loader
pub fn load_config<C> (path: impl AsRef<Path>) -> Result<C> where C: for <'a> Deserialize<'a> {
    let s = fs::read_to_string( path.as_ref())?;
    Ok( ron::from_str(&s)? )
}
