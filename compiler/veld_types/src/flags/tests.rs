use super::*;

#[test]
fn numeric_mask_covers_all_numeric_kinds() {
    assert!(BasicInfo::INTEGER.is(BasicInfo::NUMERIC));
    assert!(BasicInfo::FLOAT.is(BasicInfo::NUMERIC));
    assert!(BasicInfo::COMPLEX.is(BasicInfo::NUMERIC));
    assert!(!BasicInfo::BOOLEAN.is(BasicInfo::NUMERIC));
    assert!(!BasicInfo::STRING.is(BasicInfo::NUMERIC));
}

#[test]
fn const_type_mask() {
    assert!(BasicInfo::STRING.is(BasicInfo::CONST_TYPE));
    assert!(BasicInfo::BOOLEAN.is(BasicInfo::CONST_TYPE));
    assert!(!BasicInfo::empty().is(BasicInfo::CONST_TYPE));
}

#[test]
fn untyped_numeric_requires_both() {
    let untyped_int = BasicInfo::INTEGER | BasicInfo::UNTYPED | BasicInfo::ORDERED;
    assert!(untyped_int.is_untyped_numeric());

    let untyped_bool = BasicInfo::BOOLEAN | BasicInfo::UNTYPED;
    assert!(untyped_bool.is_untyped());
    assert!(!untyped_bool.is_untyped_numeric());

    let typed_int = BasicInfo::INTEGER | BasicInfo::ORDERED;
    assert!(!typed_int.is_untyped_numeric());
}

#[test]
fn ordered_is_independent() {
    let string = BasicInfo::STRING | BasicInfo::ORDERED;
    assert!(string.is(BasicInfo::ORDERED));

    let complex = BasicInfo::COMPLEX;
    assert!(!complex.is(BasicInfo::ORDERED));
}
