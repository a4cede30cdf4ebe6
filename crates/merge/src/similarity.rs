use strsim::sorensen_dice;

pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// Character-bigram similarity ratio in [0, 1], computed on trimmed,
/// lowercased input so "POSCO" and "posco" score 1.0. Symmetric and
/// deterministic.
pub fn ratio(a: &str, b: &str) -> f64 {
    sorensen_dice(&a.trim().to_lowercase(), &b.trim().to_lowercase())
}

/// True iff the two names score at or above the threshold.
pub fn is_similar(a: &str, b: &str, threshold: f64) -> bool {
    ratio(a, b) >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetry() {
        let pairs = [
            ("Samsung Electronics", "Samsung Electronics Co."),
            ("POSCO", "현대제철"),
            ("", "SK hynix"),
            ("동진쎄미켐", "동진쎄미켐"),
        ];
        for (a, b) in pairs {
            assert_eq!(ratio(a, b), ratio(b, a), "asymmetric for {:?}/{:?}", a, b);
        }
    }

    #[test]
    fn test_case_is_ignored() {
        assert_eq!(ratio("POSCO", "posco"), 1.0);
        assert!(is_similar("POSCO", " posco ", DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_name_variants_score_above_threshold() {
        assert!(is_similar(
            "Samsung Electronics",
            "Samsung Electronics Co.",
            DEFAULT_THRESHOLD
        ));
    }

    #[test]
    fn test_distinct_companies_score_below_threshold() {
        assert!(!is_similar("POSCO", "현대제철", DEFAULT_THRESHOLD));
        assert!(!is_similar("POSCO", "POSCO인터내셔널", DEFAULT_THRESHOLD));
    }
}
