use super::*;

#[test]
fn test_tier_names() {
    assert_eq!(NumericTier::from_name("bool"), Some(NumericTier::Bool));
    assert_eq!(NumericTier::from_name("long"), Some(NumericTier::Long));
    assert_eq!(NumericTier::from_name("complex"), Some(NumericTier::Complex));
    assert!(NumericTier::Int < NumericTier::Float);
    assert_eq!(NumericTier::from_name("str"), None);
    assert_eq!(NumericTier::from_name("Int"), None);
}

#[test]
fn test_promotion_is_upward_only() {
    assert!(numeric_promotes("int", "bool"));
    assert!(numeric_promotes("long", "int"));
    assert!(numeric_promotes("float", "bool"));
    assert!(numeric_promotes("complex", "float"));
    assert!(numeric_promotes("complex", "int"));

    assert!(!numeric_promotes("bool", "int"));
    assert!(!numeric_promotes("int", "float"));
    assert!(!numeric_promotes("float", "complex"));
}

#[test]
fn test_equal_tiers_are_not_promotions() {
    for name in ["bool", "int", "long", "float", "complex"] {
        assert!(!numeric_promotes(name, name));
    }
}

#[test]
fn test_non_numeric_names_never_promote() {
    assert!(!numeric_promotes("str", "bool"));
    assert!(!numeric_promotes("float", "str"));
    assert!(!numeric_promotes("object", "int"));
}
