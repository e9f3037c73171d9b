//! Static treatment and recommendation lookup tables

use tracing::debug;

/// Returned for any class with no entry in the treatment table.
/// Advice text is never safety-critical, so a missing key degrades
/// gracefully instead of erroring.
pub const TREATMENT_FALLBACK: &str = "Consult local agricultural expert";

const HEALTHY_RECOMMENDATIONS: [&str; 3] = [
    "Continue current care routine",
    "Monitor regularly",
    "Maintain proper watering",
];

const DISEASE_RECOMMENDATIONS: [&str; 4] = [
    "Remove affected leaves",
    "Improve air circulation",
    "Apply recommended treatment",
    "Monitor closely",
];

/// Exact-match treatment text for a class label.
///
/// Unknown labels return [`TREATMENT_FALLBACK`] rather than failing.
pub fn treatment_for(label: &str) -> &'static str {
    match label {
        "Pepper__bell___Bacterial_spot" => {
            "Apply copper-based bactericide spray every 7-10 days"
        }
        "Pepper__bell___healthy" => "Plant is healthy - continue regular care",
        "Potato___Early_blight" => {
            "Use fungicide with chlorothalonil, remove affected leaves"
        }
        "Potato___Late_blight" => "Apply copper fungicide immediately, improve drainage",
        "Potato___healthy" => "Potato plant is healthy - maintain current care",
        "Tomato_Bacterial_spot" => "Use copper spray, avoid overhead watering",
        "Tomato_Early_blight" => "Apply preventive fungicide spray",
        "Tomato_Late_blight" => "Emergency treatment - copper fungicide needed",
        "Tomato_Leaf_Mold" => "Improve air circulation, reduce humidity",
        "Tomato_healthy" => "Tomato plant is healthy - continue regular care",
        other => {
            debug!("No treatment entry for {}, using fallback", other);
            TREATMENT_FALLBACK
        }
    }
}

/// Care recommendations for a class label.
///
/// Any label containing "healthy" (case-insensitive) gets the fixed
/// healthy list; everything else gets the fixed disease list. Coarse
/// heuristic, not a per-disease lookup.
pub fn recommendations_for(label: &str) -> &'static [&'static str] {
    if label.to_ascii_lowercase().contains("healthy") {
        &HEALTHY_RECOMMENDATIONS
    } else {
        &DISEASE_RECOMMENDATIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_healthy_recommendations_have_three_items() {
        let recs = recommendations_for("Tomato_healthy");
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0], "Continue current care routine");
    }

    #[test]
    fn test_disease_recommendations_have_four_items() {
        let recs = recommendations_for("Tomato_Late_blight");
        assert_eq!(recs.len(), 4);
        assert_eq!(recs[2], "Apply recommended treatment");
    }

    #[test]
    fn test_healthy_check_is_case_insensitive() {
        assert_eq!(recommendations_for("Healthy").len(), 3);
        assert_eq!(recommendations_for("Pepper__bell___healthy").len(), 3);
        assert_eq!(recommendations_for("Diseased").len(), 4);
    }

    #[test]
    fn test_unknown_label_gets_fallback_treatment() {
        assert_eq!(treatment_for("Tomato__Target_Spot"), TREATMENT_FALLBACK);
        assert_eq!(treatment_for("not_a_label"), TREATMENT_FALLBACK);
    }

    #[test]
    fn test_known_label_gets_exact_treatment() {
        assert_eq!(
            treatment_for("Tomato_Late_blight"),
            "Emergency treatment - copper fungicide needed"
        );
    }
}
