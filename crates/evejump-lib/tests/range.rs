use std::collections::HashMap;

use evejump_lib::{
    max_jump_range, AttributeId, AttributeProvider, TypeId, DEFAULT_BASE_JUMP_RANGE_LY,
    JUMP_DRIVE_RANGE_ATTRIBUTE_ID,
};

mod common;
use common::{jump_range_attributes, TEST_SHIP};

#[test]
fn skill_bonus_scales_the_base_attribute() {
    let attributes = jump_range_attributes(&[(TEST_SHIP, 3.5)]);

    assert_eq!(max_jump_range(&attributes, TEST_SHIP, 0), 3.5);
    assert!((max_jump_range(&attributes, TEST_SHIP, 3) - 5.6).abs() < 1e-12);
    assert_eq!(max_jump_range(&attributes, TEST_SHIP, 5), 7.0);
}

#[test]
fn absent_attribute_uses_the_documented_default() {
    let attributes: HashMap<(TypeId, AttributeId), f64> = HashMap::new();

    for skill_level in 0u8..=5 {
        let expected = DEFAULT_BASE_JUMP_RANGE_LY * (1.0 + f64::from(skill_level) * 0.2);
        assert_eq!(max_jump_range(&attributes, TEST_SHIP, skill_level), expected);
    }
}

#[test]
fn no_upper_clamp_is_applied_to_skill_level() {
    let attributes = jump_range_attributes(&[(TEST_SHIP, 5.0)]);

    // Level legality is the caller's concern; the calculator stays linear.
    assert_eq!(max_jump_range(&attributes, TEST_SHIP, 10), 15.0);
}

#[test]
fn other_hulls_do_not_leak_attributes() {
    let attributes = jump_range_attributes(&[(TEST_SHIP, 9.0)]);

    assert_eq!(attributes.attribute_value(999, JUMP_DRIVE_RANGE_ATTRIBUTE_ID), None);
    assert_eq!(
        max_jump_range(&attributes, 999, 0),
        DEFAULT_BASE_JUMP_RANGE_LY
    );
}
