/// IELTS Academic Reading conversion: percentage thresholds to band scores.
/// Thresholds are checked top-down; the first one met wins.
pub const BAND_TABLE: [(f64, f64); 14] = [
    (97.0, 9.0),
    (94.0, 8.5),
    (89.0, 8.0),
    (83.0, 7.5),
    (75.0, 7.0),
    (67.0, 6.5),
    (58.0, 6.0),
    (50.0, 5.5),
    (42.0, 5.0),
    (33.0, 4.5),
    (25.0, 4.0),
    (17.0, 3.5),
    (8.0, 3.0),
    (3.0, 2.5),
];

/// Floor of the scale for anything under the lowest threshold.
pub const MINIMUM_BAND: f64 = 2.0;

pub fn band_for_percentage(percentage: f64) -> f64 {
    for (threshold, band) in BAND_TABLE {
        if percentage >= threshold {
            return band;
        }
    }
    MINIMUM_BAND
}

pub fn convert_to_band_score(raw_score: usize, total_questions: usize) -> f64 {
    if total_questions == 0 {
        return MINIMUM_BAND;
    }
    band_for_percentage(raw_score as f64 / total_questions as f64 * 100.0)
}

pub fn band_description(band: f64) -> &'static str {
    if band >= 8.5 {
        "Expert User - Very Good User"
    } else if band >= 7.5 {
        "Very Good User - Good User"
    } else if band >= 6.5 {
        "Good User - Competent User"
    } else if band >= 5.5 {
        "Competent User - Modest User"
    } else if band >= 4.5 {
        "Modest User - Limited User"
    } else if band >= 3.5 {
        "Limited User - Extremely Limited User"
    } else {
        "Extremely Limited User - Non User"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_boundaries() {
        for (threshold, band) in BAND_TABLE {
            assert_eq!(band_for_percentage(threshold), band, "at threshold {threshold}");
            // Just under a threshold must fall to the next band down.
            assert!(band_for_percentage(threshold - 0.1) < band, "below threshold {threshold}");
        }
        assert_eq!(band_for_percentage(0.0), MINIMUM_BAND);
        assert_eq!(band_for_percentage(100.0), 9.0);
    }

    #[test]
    fn test_monotonic_non_decreasing() {
        let mut previous = band_for_percentage(0.0);
        let mut percentage = 0.0;
        while percentage <= 100.0 {
            let band = band_for_percentage(percentage);
            assert!(band >= previous, "band dropped at {percentage}%");
            previous = band;
            percentage += 0.25;
        }
    }

    #[test]
    fn test_raw_score_conversion() {
        // 30/40 = 75% -> band 7.0, 29/40 = 72.5% -> band 6.5
        assert_eq!(convert_to_band_score(30, 40), 7.0);
        assert_eq!(convert_to_band_score(29, 40), 6.5);
        assert_eq!(convert_to_band_score(40, 40), 9.0);
        assert_eq!(convert_to_band_score(0, 40), MINIMUM_BAND);
        assert_eq!(convert_to_band_score(0, 0), MINIMUM_BAND);
    }

    #[test]
    fn test_band_descriptions() {
        assert_eq!(band_description(9.0), "Expert User - Very Good User");
        assert_eq!(band_description(7.0), "Good User - Competent User");
        assert_eq!(band_description(2.0), "Extremely Limited User - Non User");
    }
}
