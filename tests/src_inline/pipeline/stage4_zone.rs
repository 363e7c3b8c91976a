use super::*;

#[test]
fn test_zone_boundaries_are_left_closed() {
    let th = ZoneThresholds::default_v1();
    assert_eq!(classify_zone(-0.0001, &th), Zone::Z0);
    assert_eq!(classify_zone(0.0, &th), Zone::Z1);
    assert_eq!(classify_zone(-0.0, &th), Zone::Z1);
    assert_eq!(classify_zone(0.9999, &th), Zone::Z1);
    assert_eq!(classify_zone(1.0, &th), Zone::Z2);
    assert_eq!(classify_zone(2.0, &th), Zone::Z3);
    assert_eq!(classify_zone(2.9999, &th), Zone::Z3);
    assert_eq!(classify_zone(3.0, &th), Zone::Z4);
    assert_eq!(classify_zone(1e9, &th), Zone::Z4);
    assert_eq!(classify_zone(f64::NEG_INFINITY, &th), Zone::Z0);
}

#[test]
fn test_zone_is_monotone_in_t() {
    let th = ZoneThresholds::default_v1();
    let mut prev = Zone::Z0;
    let mut t = -2.0;
    while t < 5.0 {
        let zone = classify_zone(t, &th);
        assert!(zone >= prev);
        prev = zone;
        t += 0.01;
    }
    assert_eq!(prev, Zone::Z4);
}

#[test]
fn test_zone_bounds_are_queryable() {
    let th = ZoneThresholds::default();
    assert_eq!(th.lower_bound(Zone::Z0), None);
    assert_eq!(th.upper_bound(Zone::Z0), Some(0.0));
    assert_eq!(th.lower_bound(Zone::Z2), Some(1.0));
    assert_eq!(th.upper_bound(Zone::Z2), Some(2.0));
    assert_eq!(th.lower_bound(Zone::Z4), Some(3.0));
    assert_eq!(th.upper_bound(Zone::Z4), None);
}

#[test]
fn test_custom_thresholds() {
    let th = ZoneThresholds {
        boundaries: [-1.0, 0.0, 5.0, 10.0],
    };
    assert_eq!(classify_zone(-0.5, &th), Zone::Z1);
    assert_eq!(classify_zone(7.0, &th), Zone::Z3);
}

#[test]
fn test_zone_labels() {
    let labels: Vec<String> = Zone::ALL.iter().map(|z| z.to_string()).collect();
    assert_eq!(labels, vec!["Z0", "Z1", "Z2", "Z3", "Z4"]);
    assert_eq!(serde_json::to_string(&Zone::Z3).unwrap(), "\"Z3\"");
}
