//! Weight unit conversion helpers.
//!
//! History records carry the unit their weights were entered in, so
//! display-time conversion is always from the stored unit to the current
//! preference. Pure functions, no storage access.

/// Kilograms to pounds.
const KG_TO_LBS: f64 = 2.20462;

/// Convert a weight between metric and imperial. Identity when the units
/// already match.
pub fn convert_weight(value: f64, from_metric: bool, to_metric: bool) -> f64 {
    if from_metric == to_metric {
        return value;
    }
    if from_metric {
        value * KG_TO_LBS
    } else {
        value / KG_TO_LBS
    }
}

/// Render a weight with its unit suffix.
pub fn format_weight(value: f64, use_metric: bool) -> String {
    if use_metric {
        format!("{} kg", value)
    } else {
        format!("{} lbs", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_kg_to_lbs() {
        assert!((convert_weight(100.0, true, false) - 220.462).abs() < 1e-9);
    }

    #[test]
    fn converts_lbs_to_kg() {
        assert!((convert_weight(100.0, false, true) - 45.35929).abs() < 1e-4);
    }

    #[test]
    fn matching_units_are_identity() {
        assert_eq!(convert_weight(100.0, true, true), 100.0);
        assert_eq!(convert_weight(62.5, false, false), 62.5);
    }

    #[test]
    fn formats_with_unit_suffix() {
        assert_eq!(format_weight(80.0, true), "80 kg");
        assert_eq!(format_weight(185.0, false), "185 lbs");
    }
}
