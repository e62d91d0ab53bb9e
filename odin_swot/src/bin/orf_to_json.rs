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

use std::path::PathBuf;
use anyhow::{anyhow,Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use odin_swot::CycleFirstMeasurement;

#[derive(Parser, Debug)]
#[command(version, about, long_about = "convert an ORF event log into the JSON cycle -> first measurement mapping")]
pub struct Args {
    /// ORF file to parse
    pub orf: PathBuf,

    /// JSON file to write
    pub json: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let cycles = CycleFirstMeasurement::from_orf_file( &args.orf)?;
    if cycles.is_empty() {
        return Err( anyhow!("no cycles found in {:?}", args.orf))
    }
    cycles.write_json( &args.json)?;

    if let Some((cycle,date)) = cycles.last_logged() {
        println!("{} cycles written to {:?} (last cycle {} at {})", cycles.len(), args.json, cycle, date);
    }
    Ok(())
}
