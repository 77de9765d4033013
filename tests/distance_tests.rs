use thor_routing::shared::geo::{Coordinate, Distance};

#[test]
fn distance_test() {
    let paris = Coordinate {
        latitude: 48.85800943005911,
        longitude: 2.3514350059357927,
    };
    let london = Coordinate {
        latitude: 51.5052389927712,
        longitude: -0.12495407345099824,
    };
    let d = paris.great_circle_distance(&london);
    assert!((d.as_kilometers() - 343.0).abs() < 2.0);
}

#[test]
fn distance_is_symmetric() {
    let a = Coordinate::from((45.7606, 4.8593));
    let b = Coordinate::from((43.3028, 5.3806));
    let there = a.great_circle_distance(&b).as_kilometers();
    let back = b.great_circle_distance(&a).as_kilometers();
    assert!((there - back).abs() < 1e-9);
    assert_eq!(a.great_circle_distance(&a).as_kilometers(), 0.0);
}

#[test]
fn distance_eq_test() {
    assert_eq!(Distance::from_meters(1000.0), Distance::from_kilometers(1.0));
}

#[test]
fn distance_cmp_test() {
    assert!(Distance::from_meters(1000.0) > Distance::from_kilometers(0.5));
}

#[test]
fn distance_sum() {
    let total: Distance = [1.5, 2.25, 0.25]
        .into_iter()
        .map(Distance::from_kilometers)
        .sum();
    assert_eq!(total, Distance::from_kilometers(4.0));
    assert_eq!(total.to_string(), "4.00 km");
}
