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

//! odin_swot finds the passes of a repeat orbit mission (such as SWOT) that cross a selected area within a
//! given time window, and the time interval during which each of those passes is inside the area.
//!
//! The processing chain is
//! ORF event log ([`orf`]) -> per-cycle start times ([`cycle_axis`]) -> candidate passes ([`pass_selector`])
//! -> ground track intersection ([`geometry`]) -> passage times ([`passage_time`]).
//! [`PassFinder`] ties them together on top of a shared, immutable [`MissionData`] resource.

pub mod errors;
pub use errors::{OdinSwotError, Result};

pub mod datetime;
pub mod orf;
pub mod cycle_axis;
pub mod mission;
pub mod orbit_ref;
pub mod pass_selector;
pub mod geometry;
pub mod passage_time;
pub mod pass_finder;

pub use orf::{CycleFirstMeasurement, OrfEntry};
pub use cycle_axis::{CycleAxis, DEFAULT_CYCLE_HORIZON};
pub use mission::{IntersectionPolicy, MissionConfig, MissionType, load_config};
pub use orbit_ref::OrbitReference;
pub use pass_selector::{CandidatePass, DateRange, select_passes};
pub use geometry::{Intersection, PassGeometry, SelectedArea, intersect};
pub use passage_time::{PassageInterval, resolve_passage_time};
pub use pass_finder::{MissionData, PassFinder, ResultRow, write_csv};
