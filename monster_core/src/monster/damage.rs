//! Damage calculation - Three-tier attack vs defense curve

/// Raw damage before effectiveness.
///
/// - defense < attack / 2: `attack - defense`
/// - defense < attack: `attack * 5/8 - defense / 4`
/// - otherwise: `attack / 4`
pub fn raw_damage(attack: f64, defense: f64) -> f64 {
    if defense < attack / 2.0 {
        attack - defense
    } else if defense < attack {
        attack * 5.0 / 8.0 - defense / 4.0
    } else {
        attack / 4.0
    }
}

/// Final integer damage: raw damage scaled by `multiplier`, rounded up
pub fn calculate_damage(attack: u32, defense: u32, multiplier: f64) -> u32 {
    let scaled = raw_damage(attack as f64, defense as f64) * multiplier;
    // Negative or NaN saturates to 0
    scaled.ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_defense_tier() {
        assert!((raw_damage(8.0, 2.0) - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mid_defense_tier() {
        assert!((raw_damage(8.0, 6.0) - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_high_defense_tier() {
        assert!((raw_damage(8.0, 8.0) - 2.0).abs() < f64::EPSILON);
        assert!((raw_damage(8.0, 20.0) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tier_boundary_at_half_attack() {
        // defense == attack / 2 falls into the middle tier
        assert!((raw_damage(8.0, 4.0) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_calculate_damage_ceils_after_multiplier() {
        assert_eq!(calculate_damage(8, 6, 1.0), 4);
        assert_eq!(calculate_damage(8, 6, 2.0), 7);
        assert_eq!(calculate_damage(8, 6, 0.5), 2);
        assert_eq!(calculate_damage(8, 2, 0.0), 0);
        assert_eq!(calculate_damage(3, 8, 1.0), 1);
    }

    #[test]
    fn test_zero_attack_deals_nothing() {
        assert_eq!(calculate_damage(0, 0, 1.0), 0);
    }
}
