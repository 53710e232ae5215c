//! Effective jump-range calculation for a ship and pilot skill.

use std::collections::HashMap;

use tracing::debug;

/// Numeric identifier for an inventory type (ship hull, module, etc.).
pub type TypeId = i64;

/// Numeric identifier for a dogma attribute.
pub type AttributeId = i64;

/// Dogma attribute carrying a ship's base jump-drive range in light-years.
pub const JUMP_DRIVE_RANGE_ATTRIBUTE_ID: AttributeId = 867;

/// Base range assumed when the attribute table has no entry for a hull.
/// Ship-data gaps must not abort route planning.
pub const DEFAULT_BASE_JUMP_RANGE_LY: f64 = 5.0;

/// Range bonus granted per level of the jump calibration skill.
pub const JUMP_CALIBRATION_BONUS_PER_LEVEL: f64 = 0.2;

/// Read-only lookup of dogma attribute values.
///
/// Implementations must report an absent attribute as `None`; returning
/// `Some(0.0)` instead would defeat the default-range fallback.
pub trait AttributeProvider {
    fn attribute_value(&self, type_id: TypeId, attribute_id: AttributeId) -> Option<f64>;
}

impl AttributeProvider for HashMap<(TypeId, AttributeId), f64> {
    fn attribute_value(&self, type_id: TypeId, attribute_id: AttributeId) -> Option<f64> {
        self.get(&(type_id, attribute_id)).copied()
    }
}

/// Maximum single-jump distance in light-years for a hull and skill level.
///
/// The base attribute is scaled by a linear skill bonus:
/// `base * (1 + level * 0.2)`. Skill-level legality (the usual 0-5 band) is
/// the caller's concern; this function imposes no upper clamp.
pub fn max_jump_range<P>(provider: &P, ship_type_id: TypeId, skill_level: u8) -> f64
where
    P: AttributeProvider + ?Sized,
{
    let base = provider
        .attribute_value(ship_type_id, JUMP_DRIVE_RANGE_ATTRIBUTE_ID)
        .unwrap_or_else(|| {
            debug!(
                ship_type_id,
                "no jump-range attribute for hull, using default base range"
            );
            DEFAULT_BASE_JUMP_RANGE_LY
        });

    base * (1.0 + f64::from(skill_level) * JUMP_CALIBRATION_BONUS_PER_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_linear_skill_bonus() {
        let mut attributes = HashMap::new();
        attributes.insert((671, JUMP_DRIVE_RANGE_ATTRIBUTE_ID), 4.0);

        assert_eq!(max_jump_range(&attributes, 671, 0), 4.0);
        assert_eq!(max_jump_range(&attributes, 671, 5), 8.0);
    }

    #[test]
    fn falls_back_to_default_base_range() {
        let attributes: HashMap<(TypeId, AttributeId), f64> = HashMap::new();

        assert_eq!(max_jump_range(&attributes, 671, 0), 5.0);
        assert_eq!(max_jump_range(&attributes, 671, 4), 9.0);
    }

    #[test]
    fn zero_attribute_is_not_treated_as_absent() {
        let mut attributes = HashMap::new();
        attributes.insert((671, JUMP_DRIVE_RANGE_ATTRIBUTE_ID), 0.0);

        assert_eq!(max_jump_range(&attributes, 671, 5), 0.0);
    }
}
