//! Semantic checks on projected records.
//!
//! Decoding never validates: a record with odd values decodes as written.
//! Callers that persist records run these checks first and decide what to
//! do with a failure (skip the record, log it, store it anyway).

use crate::error::ValidationError;
use crate::model::Species;

/// Gender ratios are written with at most three decimals; this absorbs the
/// float error from parsing and summing them.
const RATIO_TOLERANCE: f64 = 1e-6;

/// Validates a species projection.
///
/// - The stat total equals the sum of the six base stats. `Species::from_record`
///   always computes the total, so this only fails for records built or
///   deserialized elsewhere (for example read back from stored JSON)
/// - The species has one or two types
/// - Gender ratios, when present, sum to 1
pub fn validate_species(species: &Species) -> Result<(), ValidationError> {
    if let Some(stats) = species.stats {
        let computed = stats.total();
        if species.total != computed {
            return Err(ValidationError::StatTotalMismatch {
                species: species.key.clone(),
                declared: species.total,
                computed,
            });
        }
    }

    if !(1..=2).contains(&species.type_count) {
        return Err(ValidationError::TypeCount {
            species: species.key.clone(),
            count: species.type_count,
        });
    }

    if !species.gender_ratio.is_empty() {
        let sum: f64 = species.gender_ratio.values().sum();
        if (sum - 1.0).abs() > RATIO_TOLERANCE {
            return Err(ValidationError::GenderRatioSum {
                species: species.key.clone(),
                sum,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BaseStats;

    fn bulbasaur() -> Species {
        let stats = BaseStats {
            hp: 45,
            attack: 49,
            defense: 49,
            sp_atk: 65,
            sp_def: 65,
            speed: 45,
        };
        Species {
            key: "bulbasaur".to_string(),
            name: "Bulbasaur".to_string(),
            type1: Some("Grass".to_string()),
            type2: Some("Poison".to_string()),
            type_count: 2,
            stats: Some(stats),
            total: stats.total(),
            gender_ratio: [("M".to_string(), 0.875), ("F".to_string(), 0.125)]
                .into_iter()
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_species() {
        assert!(validate_species(&bulbasaur()).is_ok());
    }

    #[test]
    fn test_stat_total_mismatch() {
        let mut species = bulbasaur();
        species.total = 320;
        let result = validate_species(&species);
        assert!(matches!(
            result,
            Err(ValidationError::StatTotalMismatch {
                declared: 320,
                computed: 318,
                ..
            })
        ));
    }

    #[test]
    fn test_stat_total_checked_on_stored_records() {
        let mut stored = serde_json::to_value(bulbasaur()).unwrap();
        stored["total"] = serde_json::json!(400);
        let species: Species = serde_json::from_value(stored).unwrap();
        assert!(matches!(
            validate_species(&species),
            Err(ValidationError::StatTotalMismatch { declared: 400, computed: 318, .. })
        ));
    }

    #[test]
    fn test_type_count() {
        let mut species = bulbasaur();
        species.type_count = 0;
        assert!(matches!(
            validate_species(&species),
            Err(ValidationError::TypeCount { count: 0, .. })
        ));
        species.type_count = 3;
        assert!(matches!(
            validate_species(&species),
            Err(ValidationError::TypeCount { count: 3, .. })
        ));
    }

    #[test]
    fn test_gender_ratio() {
        let mut species = bulbasaur();
        species.gender_ratio.insert("F".to_string(), 0.25);
        assert!(matches!(
            validate_species(&species),
            Err(ValidationError::GenderRatioSum { .. })
        ));

        // genderless species carry no ratio
        species.gender_ratio.clear();
        assert!(validate_species(&species).is_ok());
    }

    #[test]
    fn test_ratio_tolerance() {
        let mut species = bulbasaur();
        species.gender_ratio.insert("M".to_string(), 0.8750000001);
        assert!(validate_species(&species).is_ok());
    }
}
