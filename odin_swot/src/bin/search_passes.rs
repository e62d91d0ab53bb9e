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

use std::{fs::File, io, path::PathBuf, sync::Arc};
use anyhow::{Context,Result,anyhow};
use chrono::{TimeDelta,Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use odin_swot::{MissionConfig, MissionData, PassFinder, SelectedArea, datetime::parse_date_spec, write_csv};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "list the passes of a repeat orbit mission that cross an area within a time window")]
pub struct Args {
    /// mission config (RON)
    #[arg(short,long, default_value = "odin_swot/configs/swot_swath.ron")]
    pub config: PathBuf,

    /// first date of the search (default is tomorrow)
    #[arg(short,long)]
    pub start: Option<String>,

    /// last date of the search (alternative to --days)
    #[arg(short,long, conflicts_with = "days")]
    pub end: Option<String>,

    /// number of days to search (default is one cycle)
    #[arg(short,long)]
    pub days: Option<i64>,

    /// area vertices as "lon,lat" pairs (whole earth if not set)
    #[arg(short,long, num_args=3.., allow_hyphen_values=true)]
    pub area: Vec<String>,

    /// write result as CSV to this file ("-" for stdout)
    #[arg(long)]
    pub csv: Option<PathBuf>,
}

fn parse_area (specs: &[String]) -> Result<Option<SelectedArea>> {
    if specs.is_empty() { return Ok(None) }

    let mut vertices: Vec<(f64,f64)> = Vec::with_capacity(specs.len());
    for spec in specs {
        let (lon,lat) = spec.split_once(',').ok_or( anyhow!("vertex not in lon,lat format: {spec}"))?;
        vertices.push( (lon.trim().parse()?, lat.trim().parse()?));
    }
    Ok( Some( SelectedArea::from_lon_lat_degrees( &vertices)))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter( EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = MissionConfig::load( &args.config)?;
    let data = Arc::new( MissionData::load( config)
        .with_context( || format!("mission data of {:?} not available (see the config for expected file locations)", args.config))?);
    let finder = PassFinder::new( data.clone());

    let start = match &args.start {
        Some(spec) => parse_date_spec(spec)?,
        None => Utc::now().date_naive().and_hms_opt(0,0,0).ok_or( anyhow!("invalid date"))?.and_utc() + TimeDelta::days(1)
    };
    let duration = match (&args.end, args.days) {
        (Some(spec),_) => Some( parse_date_spec(spec)? - start),
        (None,Some(days)) => Some( TimeDelta::days(days)),
        (None,None) => None
    };
    let area = parse_area( &args.area)?;

    let rows = finder.select_and_resolve( start, duration, area.as_ref())?;

    if let Some(path) = &args.csv {
        if path.as_os_str() == "-" {
            write_csv( &rows, io::stdout())?;
        } else {
            write_csv( &rows, File::create(path)?)?;
            println!("{} passes written to {:?}", rows.len(), path);
        }
    } else if rows.is_empty() {
        println!("no {} passes found in the selected area", data.config.name);
    } else {
        println!(" cycle   pass  first measurement    last measurement");
        for row in &rows { println!("{row}") }
    }

    Ok(())
}
