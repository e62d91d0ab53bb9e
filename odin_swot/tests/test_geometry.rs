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

use geo::{Coord, Rect};
use odin_swot::{Intersection, PassGeometry, SelectedArea, intersect, geometry::{track_coords, unwrap_longitudes}};

const EPS: f64 = 1e-6;

fn lats () -> Vec<f64> { (0..13).map( |i| -60.0 + 10.0 * i as f64).collect() }

fn box_area (west: f64, south: f64, east: f64, north: f64) -> SelectedArea {
    SelectedArea::from_lon_lat_degrees( &[(west,south), (east,south), (east,north), (west,north)])
}

fn lat_range (boundaries: &[Vec<Coord<f64>>]) -> (f64,f64) {
    boundaries.iter().flatten().fold( (f64::MAX, f64::MIN), |(min,max), c| (min.min(c.y), max.max(c.y)))
}

#[test]
fn test_nadir_intersection() {
    let lat = lats();
    let lon = vec![10.0; lat.len()];
    let geometry = PassGeometry::nadir( &lon, &lat);

    let area = box_area( 0.0, -35.0, 20.0, 35.0);
    println!("area: {area}");
    let intersection = intersect( &geometry, &area);
    println!("intersection: {intersection:?}");

    assert!( matches!( intersection, Intersection::Lines(_)));
    assert!( !intersection.is_empty());

    let (lat_min,lat_max) = lat_range( &intersection.boundaries());
    assert!( (lat_min + 35.0).abs() < EPS);
    assert!( (lat_max - 35.0).abs() < EPS);
}

#[test]
fn test_disjoint_area() {
    let lat = lats();
    let lon = vec![10.0; lat.len()];
    let geometry = PassGeometry::nadir( &lon, &lat);

    let intersection = intersect( &geometry, &box_area( 50.0, -35.0, 60.0, 35.0));
    assert!( intersection.is_empty());
    assert_eq!( intersection.len(), 0);
    assert!( intersection.boundaries().is_empty());
}

#[test]
fn test_whole_earth() {
    let world = Rect::new( Coord { x: -180.0, y: -90.0 }, Coord { x: 180.0, y: 90.0 }).to_polygon();
    assert_eq!( SelectedArea::whole_earth(), SelectedArea::new( world));

    let lat = lats();
    let lon: Vec<f64> = lat.iter().map( |y| 100.0 + y / 10.0).collect();
    let geometry = PassGeometry::nadir( &lon, &lat);

    let intersection = intersect( &geometry, &SelectedArea::whole_earth());
    assert!( !intersection.is_empty());
    let (lat_min,lat_max) = lat_range( &intersection.boundaries());
    assert!( (lat_min + 60.0).abs() < EPS);
    assert!( (lat_max - 60.0).abs() < EPS);
}

#[test]
fn test_missing_samples() {
    let lon = vec![ 10.0, f64::NAN, 10.0, 10.0, 10.0 ];
    let lat = vec![ -20.0, -10.0, f64::NAN, 10.0, 20.0 ];

    let coords = track_coords( &lon, &lat);
    assert_eq!( coords.len(), 3);

    if let PassGeometry::Nadir(line) = PassGeometry::nadir( &lon, &lat) {
        assert_eq!( line.0.len(), 3);
        assert!( line.coords().all( |c| c.x.is_finite() && c.y.is_finite()));
    } else {
        panic!("not a nadir geometry");
    }

    // nothing left to intersect
    let all_missing = vec![f64::NAN; 5];
    let geometry = PassGeometry::nadir( &all_missing, &lat);
    assert!( intersect( &geometry, &SelectedArea::whole_earth()).is_empty());
}

#[test]
fn test_antimeridian() {
    let mut coords: Vec<Coord<f64>> = [170.0, 175.0, 180.0, -175.0, -170.0].iter().enumerate()
        .map( |(i,x)| Coord { x: *x, y: i as f64 }).collect();
    unwrap_longitudes( &mut coords);
    let xs: Vec<f64> = coords.iter().map( |c| c.x).collect();
    assert_eq!( xs, vec![170.0, 175.0, 180.0, 185.0, 190.0]);

    let lon = vec![170.0, 175.0, 180.0, -175.0, -170.0];
    let lat = vec![0.0, 1.0, 2.0, 3.0, 4.0];
    let geometry = PassGeometry::nadir( &lon, &lat);

    let intersection = intersect( &geometry, &box_area( -178.0, -10.0, -172.0, 10.0));
    println!("intersection: {intersection:?}");
    assert!( !intersection.is_empty());
    let (lat_min,lat_max) = lat_range( &intersection.boundaries());
    assert!( (lat_min - 2.4).abs() < EPS);
    assert!( (lat_max - 3.6).abs() < EPS);
}

#[test]
fn test_swath_intersection() {
    let geometry = PassGeometry::swath(
        &[5.0, 10.0, 10.0, 5.0, 5.0], &[-60.0, -60.0, 60.0, 60.0, -60.0],
        &[10.0, 15.0, 15.0, 10.0, 10.0], &[-60.0, -60.0, 60.0, 60.0, -60.0]
    );

    let intersection = intersect( &geometry, &box_area( 12.0, -35.0, 20.0, 35.0));
    println!("intersection: {intersection:?}");
    assert!( matches!( intersection, Intersection::Areas(_)));
    assert_eq!( intersection.len(), 1); // right swath only

    let boundaries = intersection.boundaries();
    assert_eq!( boundaries.len(), 1);
    assert_eq!( boundaries[0].len(), 2);
    assert!( (boundaries[0][0].y + 35.0).abs() < EPS); // southernmost
    assert!( (boundaries[0][1].y - 35.0).abs() < EPS); // northernmost

    // the gap between the swaths is not covered
    let geometry = PassGeometry::swath(
        &[5.0, 8.0, 8.0, 5.0, 5.0], &[-60.0, -60.0, 60.0, 60.0, -60.0],
        &[12.0, 15.0, 15.0, 12.0, 12.0], &[-60.0, -60.0, 60.0, 60.0, -60.0]
    );
    assert!( intersect( &geometry, &box_area( 9.0, -35.0, 11.0, 35.0)).is_empty());
}

#[test]
fn test_whole_earth_across_antimeridian() {
    let lon = vec![140.0, 150.0, 160.0, 170.0, 180.0, -170.0, -160.0];
    let lat = vec![-60.0, -40.0, -20.0, 0.0, 20.0, 40.0, 60.0];
    let geometry = PassGeometry::nadir( &lon, &lat);

    let intersection = intersect( &geometry, &SelectedArea::whole_earth());
    println!("intersection: {intersection:?}");
    assert_eq!( intersection.len(), 1);
    let (lat_min,lat_max) = lat_range( &intersection.boundaries());
    assert!( (lat_min + 60.0).abs() < EPS);
    assert!( (lat_max - 60.0).abs() < EPS);

    let geometry = PassGeometry::swath(
        &[160.0, 175.0, 175.0, 160.0, 160.0], &[-60.0, -60.0, 60.0, 60.0, -60.0],
        &[175.0, -170.0, -170.0, 175.0, 175.0], &[-60.0, -60.0, 60.0, 60.0, -60.0]
    );
    let intersection = intersect( &geometry, &SelectedArea::whole_earth());
    println!("intersection: {intersection:?}");
    assert_eq!( intersection.len(), 2); // one piece per swath side
}
