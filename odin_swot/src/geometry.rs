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

//! intersection of pass ground tracks (nadir line or swath polygons) with a selected area.
//! We use the planar boolean ops of the [geo](https://docs.rs/geo/latest/geo/index.html) crate on longitude/latitude
//! degrees. Ground tracks that cross the antimeridian are unwrapped into a continuous longitude range, which is why
//! we also intersect with copies of the area that are shifted by ±360°

use std::fmt;
use geo::{BooleanOps, Coord, LineString, MapCoords, MultiLineString, MultiPolygon, Polygon, Rect};

pub type GeoCoord = Coord<f64>;

const SEAM_EPS: f64 = 1e-9;

/* #region selected area ****************************************************************************************/

/// the user selected query region, a simple polygon in longitude/latitude degrees
#[derive(Debug,Clone,PartialEq)]
pub struct SelectedArea(Polygon<f64>);

impl SelectedArea {
    pub fn new (polygon: Polygon<f64>) -> Self {
        SelectedArea(polygon)
    }

    /// the ring is closed automatically
    pub fn from_lon_lat_degrees (vertices: &[(f64,f64)]) -> Self {
        let exterior: LineString<f64> = vertices.iter().map( |(lon,lat)| Coord { x: *lon, y: *lat }).collect();
        SelectedArea( Polygon::new( exterior, vec![]))
    }

    /// what we use if there is no selection
    pub fn whole_earth () -> Self {
        SelectedArea( Rect::new( Coord { x: -180.0, y: -90.0 }, Coord { x: 180.0, y: 90.0 }).to_polygon())
    }

    pub fn polygon (&self) -> &Polygon<f64> { &self.0 }

    fn shifted (&self, dlon: f64) -> Polygon<f64> {
        self.0.map_coords( |c| Coord { x: c.x + dlon, y: c.y })
    }
}

impl fmt::Display for SelectedArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i,c) in self.0.exterior().coords().enumerate() {
            if i > 0 { write!(f, ",")? }
            write!(f, "({},{})", c.x, c.y)?;
        }
        write!(f, "]")
    }
}

/* #endregion selected area */

/* #region pass geometry ****************************************************************************************/

/// the ground track geometry of a pass. Which variant we use is a property of the mission (see [`crate::MissionType`])
#[derive(Debug,Clone,PartialEq)]
pub enum PassGeometry {
    Nadir( LineString<f64> ),
    Swath { left: Polygon<f64>, right: Polygon<f64> },
}

impl PassGeometry {
    pub fn nadir (lon: &[f64], lat: &[f64]) -> Self {
        PassGeometry::Nadir( LineString::new( track_coords( lon, lat)))
    }

    pub fn swath (left_lon: &[f64], left_lat: &[f64], right_lon: &[f64], right_lat: &[f64]) -> Self {
        let left = Polygon::new( LineString::new( track_coords( left_lon, left_lat)), vec![]);
        let right = Polygon::new( LineString::new( track_coords( right_lon, right_lat)), vec![]);
        PassGeometry::Swath { left, right }
    }

    /// min and max longitude of all vertices
    pub fn lon_bounds (&self) -> Option<(f64,f64)> {
        let coords: Box<dyn Iterator<Item=&GeoCoord>> = match self {
            PassGeometry::Nadir(line) => Box::new( line.coords()),
            PassGeometry::Swath{left,right} => Box::new( left.exterior().coords().chain( right.exterior().coords()))
        };
        coords.fold( None, |acc, c| match acc {
            None => Some((c.x, c.x)),
            Some((min,max)) => Some((min.min(c.x), max.max(c.x)))
        })
    }
}

/// drop vertices with non-finite coordinates (missing samples) and unwrap longitudes so that the
/// track does not jump at the antimeridian
pub fn track_coords (lon: &[f64], lat: &[f64]) -> Vec<GeoCoord> {
    let mut coords: Vec<GeoCoord> = lon.iter().zip( lat.iter())
        .filter( |(x,y)| x.is_finite() && y.is_finite())
        .map( |(x,y)| Coord { x: *x, y: *y })
        .collect();
    unwrap_longitudes( &mut coords);
    coords
}

/// make longitudes continuous: each step between consecutive vertices is taken modulo 360 into [-180,180]
pub fn unwrap_longitudes (coords: &mut [GeoCoord]) {
    for i in 1..coords.len() {
        let mut d = coords[i].x - coords[i-1].x;
        while d > 180.0 { d -= 360.0 }
        while d < -180.0 { d += 360.0 }
        coords[i].x = coords[i-1].x + d;
    }
}

/* #endregion pass geometry */

/* #region intersection *****************************************************************************************/

/// the (possibly empty) result of intersecting a [`PassGeometry`] with a [`SelectedArea`]
#[derive(Debug,Clone,PartialEq)]
pub enum Intersection {
    Lines( Vec<LineString<f64>> ),
    Areas( Vec<Polygon<f64>> ),
}

impl Intersection {
    pub fn is_empty (&self) -> bool {
        match self {
            Intersection::Lines(ls) => ls.is_empty(),
            Intersection::Areas(ps) => ps.is_empty()
        }
    }

    /// number of disjoint pieces
    pub fn len (&self) -> usize {
        match self {
            Intersection::Lines(ls) => ls.len(),
            Intersection::Areas(ps) => ps.len()
        }
    }

    /// boundary points of each piece that delimit it along the track.
    /// For lines this is the vertex sequence. For areas the outer ring is closed, which is why we
    /// use its southernmost and northernmost vertex instead
    pub fn boundaries (&self) -> Vec<Vec<GeoCoord>> {
        match self {
            Intersection::Lines(ls) => ls.iter().map( |l| l.0.clone()).collect(),
            Intersection::Areas(ps) => ps.iter().filter_map( |p| latitude_extent( p.exterior())).collect()
        }
    }
}

fn latitude_extent (ring: &LineString<f64>) -> Option<Vec<GeoCoord>> {
    let mut it = ring.coords();
    let first = *it.next()?;
    let (south,north) = it.fold( (first,first), |(s,n), c| {
        (if c.y < s.y { *c } else { s }, if c.y > n.y { *c } else { n })
    });
    Some( vec![south, north] )
}

/// intersect the pass geometry with the selected area.
/// A track that crosses the antimeridian of a whole earth area stays a single piece since the area copies
/// are merged before we intersect
pub fn intersect (geometry: &PassGeometry, area: &SelectedArea) -> Intersection {
    let area = merged_area( geometry, area);

    match geometry {
        PassGeometry::Nadir(line) => {
            if line.0.len() < 2 { return Intersection::Lines( Vec::new()) }

            let mls = MultiLineString::new( vec![line.clone()]);
            let lines: Vec<LineString<f64>> = area.clip( &mls, false).0.into_iter()
                .filter( |l| !l.0.is_empty())
                .collect();
            Intersection::Lines( join_touching( lines))
        }
        PassGeometry::Swath{left,right} => {
            let polygons: Vec<Polygon<f64>> = [left,right].into_iter()
                .filter( |p| p.exterior().0.len() >= 4) // closed ring of at least a triangle
                .flat_map( |p| p.intersection( &area).0.into_iter())
                .filter( |p| !p.exterior().0.is_empty())
                .collect();
            Intersection::Areas( polygons)
        }
    }
}

/// the area itself plus copies shifted by ±360° if the (unwrapped) pass geometry extends beyond ±180°.
/// Copies that touch the area at the seam are unioned with it
fn merged_area (geometry: &PassGeometry, area: &SelectedArea) -> MultiPolygon<f64> {
    let mut merged = MultiPolygon::new( vec![ area.polygon().clone() ]);
    if let Some((lon_min,lon_max)) = geometry.lon_bounds() {
        if lon_max > 180.0 { merged = merged.union( &area.shifted( 360.0)) }
        if lon_min < -180.0 { merged = merged.union( &area.shifted( -360.0)) }
    }
    merged
}

fn same_vertex (a: Option<&GeoCoord>, b: Option<&GeoCoord>) -> bool {
    match (a,b) {
        (Some(a), Some(b)) => (a.x - b.x).abs() < SEAM_EPS && (a.y - b.y).abs() < SEAM_EPS,
        _ => false
    }
}

/// concatenate consecutive line pieces that share an end vertex
fn join_touching (lines: Vec<LineString<f64>>) -> Vec<LineString<f64>> {
    let mut joined: Vec<LineString<f64>> = Vec::with_capacity( lines.len());
    for mut line in lines {
        if let Some(prev) = joined.last_mut() {
            if same_vertex( prev.0.last(), line.0.first()) {
                prev.0.extend( line.0.into_iter().skip(1));
                continue
            }
            if same_vertex( line.0.last(), prev.0.first()) {
                line.0.extend( prev.0.iter().skip(1).copied());
                *prev = line;
                continue
            }
        }
        joined.push( line);
    }
    joined
}

/* #endregion intersection */
