//! Tests for centroid computation.

use meetup_engine::centroid::{centroid, centroid_of_known};
use meetup_engine::types::Coordinate;

fn coord(lat: f64, lng: f64) -> Coordinate {
    Coordinate::new(lat, lng)
}

#[test]
fn two_points_average_exactly() {
    let result = centroid(&[coord(12.0, 77.0), coord(14.0, 79.0)]);
    assert_eq!(result, Some(coord(13.0, 78.0)));
}

#[test]
fn empty_input_has_no_centroid() {
    assert_eq!(centroid(&[]), None);
}

#[test]
fn single_point_is_its_own_centroid() {
    let p = coord(12.9716, 77.5946);
    assert_eq!(centroid(&[p]), Some(p));
}

#[test]
fn centroid_is_component_wise_mean() {
    // Whitefield, Koramangala, Malleshwaram
    let points = [
        coord(12.9698, 77.7499),
        coord(12.9352, 77.6245),
        coord(13.0039, 77.5703),
    ];

    let c = centroid(&points).unwrap();

    let expected_lat = (12.9698 + 12.9352 + 13.0039) / 3.0;
    let expected_lng = (77.7499 + 77.6245 + 77.5703) / 3.0;
    assert!((c.lat - expected_lat).abs() < 1e-12);
    assert!((c.lng - expected_lng).abs() < 1e-12);
}

#[test]
fn unknown_locations_are_skipped() {
    let points = vec![Some(coord(12.0, 77.0)), None, Some(coord(14.0, 79.0)), None];
    assert_eq!(centroid_of_known(points), Some(coord(13.0, 78.0)));
}

#[test]
fn all_unknown_locations_have_no_centroid() {
    let points: Vec<Option<Coordinate>> = vec![None, None];
    assert_eq!(centroid_of_known(points), None);
}
