use super::*;

#[test]
fn test_multiplicity_rounds_half_to_even() {
    assert_eq!(multiplicity(1.0), Some(1));
    assert_eq!(multiplicity(1.5), Some(2));
    assert_eq!(multiplicity(2.5), Some(2));
    assert_eq!(multiplicity(3.5), Some(4));
    assert_eq!(multiplicity(2.4999), Some(2));
    assert_eq!(multiplicity(2.5001), Some(3));
}

#[test]
fn test_multiplicity_never_below_one() {
    assert_eq!(multiplicity(0.0001), Some(1));
    assert_eq!(multiplicity(0.5), Some(1));
    assert_eq!(multiplicity(0.49), Some(1));
}

#[test]
fn test_multiplicity_is_exact_beyond_u64() {
    assert_eq!(multiplicity(1e19), Some(10_000_000_000_000_000_000));
    assert_eq!(multiplicity(2f64.powi(100)), Some(1u128 << 100));
}

#[test]
fn test_multiplicity_beyond_u128_is_none() {
    assert_eq!(multiplicity(2f64.powi(128)), None);
    assert_eq!(multiplicity(1e300), None);
    assert_eq!(multiplicity(f64::MAX), None);
}

#[test]
fn test_item_builder_defaults() {
    let item = ScoredItem::new("Cx", 2);
    assert_eq!(item.weight, DEFAULT_WEIGHT);
    assert_eq!(item.justification, None);
    assert_eq!(item.multiplicity(), Some(1));

    let item = item.with_weight(3.0).with_justification("why");
    assert_eq!(item.multiplicity(), Some(3));
    assert_eq!(item.justification.as_deref(), Some("why"));
}

#[test]
fn test_validated_input_defaults_to_empty_system() {
    let input = ValidatedInput::new(vec![]);
    assert_eq!(input.system, Value::Object(Map::new()));
    assert!(input.items.is_empty());
}
