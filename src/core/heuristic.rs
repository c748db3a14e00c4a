//! Rule-based scoring used when no model-backed answer is reachable.
//!
//! The weights mirror the trained model's strongest signals closely enough
//! to keep the prediction panel meaningful while the service is offline.

use ordered_float::OrderedFloat;

use crate::core::form::PredictionInput;
use crate::core::payload::{BrandComparisonPayload, BrandScore, PredictionPayload};

pub const LIKELY_MESSAGE: &str = "Likely to purchase";
pub const NOT_LIKELY_MESSAGE: &str = "Not likely to purchase";

/// Decision threshold shared by the single prediction and the comparison.
pub const PURCHASE_THRESHOLD: f64 = 0.5;

/// Per-brand probability boost applied in comparison scoring.
const BRAND_FACTORS: [(&str, f64); 9] = [
    ("iPhone", 0.15),
    ("Samsung", 0.12),
    ("Google Pixel", 0.10),
    ("OnePlus", 0.08),
    ("Nothing", 0.07),
    ("Xiaomi", 0.05),
    ("Realme", 0.03),
    ("Oppo", 0.02),
    ("Vivo", 0.01),
];

const COMPARISON_PROBABILITY_MIN: f64 = 0.05;
const COMPARISON_PROBABILITY_MAX: f64 = 0.95;

/// Weighted-sum purchase probability for one form input.
///
/// Each satisfied signal contributes its fixed weight. The raw sum of all
/// weights exceeds 1, so the result is capped to stay a valid probability.
#[must_use]
pub fn purchase_probability(input: &PredictionInput) -> f64 {
    let mut score: f64 = 0.0;
    if input.income > 40_000.0 {
        score += 0.2;
    }
    if input.time_on_website > 15.0 {
        score += 0.3;
    }
    if input.previous_purchases > 0.0 {
        score += 0.2;
    }
    if input.marketing_engaged {
        score += 0.2;
    }
    if input.search_frequency > 5.0 {
        score += 0.1;
    }
    if input.device_age > 2.0 {
        score += 0.1;
    }
    score.min(1.0)
}

/// Full heuristic prediction for one form input.
#[must_use]
pub fn predict(input: &PredictionInput) -> PredictionPayload {
    let probability = purchase_probability(input);
    let likely = probability > PURCHASE_THRESHOLD;
    PredictionPayload {
        prediction: u8::from(likely),
        probability,
        message: if likely {
            LIKELY_MESSAGE.to_owned()
        } else {
            NOT_LIKELY_MESSAGE.to_owned()
        },
        brand: (!input.brand.is_empty()).then(|| input.brand.clone()),
    }
}

/// Heuristic brand comparison: the shared base probability plus a per-brand
/// boost, clamped away from certainty, ranked best first.
#[must_use]
pub fn compare_brands(input: &PredictionInput, brands: &[String]) -> BrandComparisonPayload {
    let base = purchase_probability(input);
    let mut results: Vec<BrandScore> = brands
        .iter()
        .map(|brand| {
            let boost = brand_factor(brand);
            let probability = (base + boost)
                .clamp(COMPARISON_PROBABILITY_MIN, COMPARISON_PROBABILITY_MAX);
            BrandScore {
                brand: brand.clone(),
                prediction: u8::from(probability > PURCHASE_THRESHOLD),
                probability,
            }
        })
        .collect();
    results.sort_by_key(|score| std::cmp::Reverse(OrderedFloat(score.probability)));
    BrandComparisonPayload { results }
}

fn brand_factor(brand: &str) -> f64 {
    BRAND_FACTORS
        .iter()
        .find(|(name, _)| *name == brand)
        .map_or(0.0, |(_, factor)| *factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong_buyer() -> PredictionInput {
        PredictionInput {
            age: 35.0,
            income: 80_000.0,
            time_on_website: 25.0,
            previous_purchases: 3.0,
            marketing_engaged: true,
            search_frequency: 8.0,
            device_age: 3.0,
            brand: "iPhone".to_owned(),
        }
    }

    #[test]
    fn all_signals_cap_at_one() {
        let probability = purchase_probability(&strong_buyer());
        assert_eq!(probability, 1.0);
    }

    #[test]
    fn no_signals_score_zero() {
        let input = PredictionInput {
            age: 20.0,
            income: 20_000.0,
            time_on_website: 5.0,
            previous_purchases: 0.0,
            marketing_engaged: false,
            search_frequency: 2.0,
            device_age: 1.0,
            brand: "Samsung".to_owned(),
        };
        assert_eq!(purchase_probability(&input), 0.0);
        let payload = predict(&input);
        assert_eq!(payload.prediction, 0);
        assert_eq!(payload.message, NOT_LIKELY_MESSAGE);
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        let input = PredictionInput {
            income: 80_000.0,
            time_on_website: 25.0,
            previous_purchases: 0.0,
            marketing_engaged: false,
            search_frequency: 2.0,
            device_age: 1.0,
            ..PredictionInput::default()
        };
        assert_eq!(purchase_probability(&input), 0.5);
        assert_eq!(predict(&input).prediction, 0);
    }

    #[test]
    fn comparison_ranks_by_descending_probability() {
        let brands = vec![
            "Vivo".to_owned(),
            "iPhone".to_owned(),
            "Xiaomi".to_owned(),
        ];
        let input = PredictionInput {
            income: 45_000.0,
            ..PredictionInput::default()
        };
        let comparison = compare_brands(&input, &brands);
        let ordered: Vec<&str> = comparison
            .results
            .iter()
            .map(|score| score.brand.as_str())
            .collect();
        assert_eq!(ordered, vec!["iPhone", "Xiaomi", "Vivo"]);
        for pair in comparison.results.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
    }

    #[test]
    fn comparison_probabilities_stay_clamped() {
        let comparison = compare_brands(&strong_buyer(), &["iPhone".to_owned()]);
        assert_eq!(comparison.results[0].probability, 0.95);

        let cold = PredictionInput {
            income: 0.0,
            time_on_website: 0.0,
            previous_purchases: 0.0,
            search_frequency: 0.0,
            device_age: 0.0,
            ..PredictionInput::default()
        };
        let comparison = compare_brands(&cold, &["UnknownBrand".to_owned()]);
        assert_eq!(comparison.results[0].probability, 0.05);
        assert_eq!(comparison.results[0].prediction, 0);
    }
}
