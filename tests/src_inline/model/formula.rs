use super::*;

#[test]
fn test_is_close_tolerances() {
    assert!(is_close(1.0, 1.0, 0.0, 0.0));
    assert!(is_golden_close(0.0, 5e-9));
    assert!(!is_golden_close(0.0, 1e-7));
    assert!(is_golden_close(1000.0, 1000.009));
    assert!(!is_golden_close(1000.0, 1000.02));
    assert!(!is_golden_close(f64::NAN, f64::NAN));
    assert!(is_golden_close(f64::INFINITY, f64::INFINITY));
}

#[test]
fn test_tau_aliases() {
    assert!(is_tau("τ"));
    assert!(is_tau("tau"));
    assert!(!is_tau("Tau"));
    assert!(!is_tau("T"));
}

#[test]
fn test_declaration_lists_core_dimensions() {
    let decl = declaration();
    assert_eq!(decl.capacity_dimension, "K");
    assert_eq!(decl.additive_dimensions, vec!["Cx", "τ", "G", "D"]);
    assert_eq!(decl.denominator_base, 1.0);
    assert_eq!(CORE_DIMENSIONS, ["Cx", "K", "τ", "G", "D"]);
}
