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

use chrono::{DateTime,TimeDelta,Utc};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OdinSwotError>;

#[derive(Error,Debug)]
pub enum OdinSwotError {

   #[error("IO error {0}")]
   IOError( #[from] std::io::Error),

   #[error("JSON error {0}")]
   JsonError( #[from] serde_json::Error),

   #[error("config error {0}")]
   RonError( #[from] ron::error::SpannedError),

   #[error("CSV error {0}")]
   CsvError( #[from] csv::Error),

   /// the query window has a negative duration
   #[error("invalid date range: search duration {duration} starting at {start} is negative")]
   InvalidDateRange { start: DateTime<Utc>, duration: TimeDelta },

   /// the query needs a cycle that is not covered by the cycle axis
   #[error("cycle {cycle} is out of range (cycle axis horizon is {horizon})")]
   HorizonExceeded { cycle: usize, horizon: usize },

   #[error("no logged cycles to build cycle axis from")]
   NoLoggedCycles,

   #[error("invalid timestamp {0}")]
   InvalidTimestamp( String ),

   /// a data file referenced by the mission config does not exist
   #[error("mission resource not found: {0:?}")]
   MissingResource( std::path::PathBuf ),

   #[error("invalid orbit reference {0}")]
   InvalidReference( String ),

   #[error("operation failed {0}")]
   OpFailedError(String),
}

macro_rules! op_failed {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinSwotError::OpFailedError( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use op_failed;

macro_rules! invalid_reference {
    ($fmt:literal $(, $arg:expr )* ) => {
        OdinSwotError::InvalidReference( format!( $fmt $(, $arg)* ))
    };
}
pub (crate) use invalid_reference;
