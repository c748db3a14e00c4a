//! Built-in demo payloads, the terminal stage of the fallback chain.
//!
//! Exactly one canonical definition exists per dataset. The read datasets
//! are fixed historical-style aggregates; the form-driven datasets are
//! computed from the submitted input so the answer still varies with the
//! form even while offline.

use indexmap::IndexMap;

use crate::core::form::PredictionInput;
use crate::core::heuristic;
use crate::core::payload::{
    DashboardStatsPayload, DatasetPayload, FeatureImportancePayload, ModelInfo, StatusPayload,
};
use crate::core::types::{DatasetName, DatasetRequest};

/// Provider of the always-available demo payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoDataCatalog;

impl DemoDataCatalog {
    /// The demo payload for any request. Never fails: the demo stage is the
    /// guarantee that every resolve produces a usable payload.
    #[must_use]
    pub fn payload_for(&self, request: &DatasetRequest) -> DatasetPayload {
        match request.name {
            DatasetName::Status => DatasetPayload::Status(self.status()),
            DatasetName::DashboardData => DatasetPayload::DashboardStats(self.dashboard_stats()),
            DatasetName::FeatureImportance => {
                DatasetPayload::FeatureImportance(self.feature_importance())
            }
            DatasetName::Prediction => {
                let input = PredictionInput::from_params(&request.params);
                DatasetPayload::Prediction(heuristic::predict(&input))
            }
            DatasetName::BrandComparison => {
                let input = PredictionInput::from_params(&request.params);
                let brands = comparison_brands(&request.params);
                DatasetPayload::BrandComparison(heuristic::compare_brands(&input, &brands))
            }
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusPayload {
        StatusPayload {
            status: "ok".to_owned(),
            version: "1.0.0".to_owned(),
            model_info: ModelInfo {
                name: "Random Forest Classifier".to_owned(),
                accuracy: 0.87,
                date_trained: "2023-06-15".to_owned(),
            },
        }
    }

    #[must_use]
    pub fn dashboard_stats(&self) -> DashboardStatsPayload {
        DashboardStatsPayload {
            total_records: 1000,
            purchase_rate: 0.5,
            conversion_rate: 0.5,
            avg_age: 34.7,
            avg_income: 76_316.0,
            avg_time_on_website: 15.0,
            high_income_conversion: 0.65,
            low_income_conversion: 0.42,
            brand_distribution: counts(&[
                ("Samsung", 320),
                ("Xiaomi", 250),
                ("OnePlus", 180),
                ("iPhone", 150),
                ("Other", 100),
            ]),
            age_groups: counts(&[
                ("18-25", 100),
                ("26-35", 250),
                ("36-45", 300),
                ("46-55", 200),
                ("56+", 150),
            ]),
            age_purchase_rates: rates(&[
                ("18-25", 0.45),
                ("26-35", 0.55),
                ("36-45", 0.52),
                ("46-55", 0.48),
                ("56+", 0.40),
            ]),
            income_groups: counts(&[
                ("<30k", 120),
                ("30k-50k", 200),
                ("50k-70k", 300),
                ("70k-100k", 230),
                (">100k", 150),
            ]),
            income_purchase_rates: rates(&[
                ("<30k", 0.35),
                ("30k-50k", 0.45),
                ("50k-70k", 0.50),
                ("70k-100k", 0.55),
                (">100k", 0.65),
            ]),
            brand_purchase_rates: rates(&[
                ("Samsung", 0.48),
                ("Xiaomi", 0.42),
                ("OnePlus", 0.53),
                ("iPhone", 0.62),
                ("Other", 0.45),
            ]),
        }
    }

    #[must_use]
    pub fn feature_importance(&self) -> FeatureImportancePayload {
        let mut payload = FeatureImportancePayload {
            feature_importance: rates(&[
                ("income", 0.35),
                ("age", 0.25),
                ("time_on_website", 0.18),
                ("previous_purchases", 0.15),
                ("marketing_engaged", 0.12),
                ("search_frequency", 0.10),
                ("device_age", 0.08),
                ("brand_iPhone", 0.06),
                ("brand_Samsung", 0.05),
            ]),
            normalized_importance: IndexMap::new(),
        };
        payload.ensure_normalized();
        payload
    }
}

/// Brands requested for comparison, falling back to the single form brand.
fn comparison_brands(params: &IndexMap<String, serde_json::Value>) -> Vec<String> {
    if let Some(serde_json::Value::Array(brands)) = params.get("brands") {
        let listed: Vec<String> = brands
            .iter()
            .filter_map(|value| value.as_str())
            .map(ToOwned::to_owned)
            .collect();
        if !listed.is_empty() {
            return listed;
        }
    }
    let single = params
        .get("brand")
        .and_then(|value| value.as_str())
        .unwrap_or("Other");
    vec![single.to_owned()]
}

fn counts(entries: &[(&str, u64)]) -> IndexMap<String, u64> {
    entries
        .iter()
        .map(|(label, count)| ((*label).to_owned(), *count))
        .collect()
}

fn rates(entries: &[(&str, f64)]) -> IndexMap<String, f64> {
    entries
        .iter()
        .map(|(label, rate)| ((*label).to_owned(), *rate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_dataset_has_a_valid_demo_payload() {
        let catalog = DemoDataCatalog;
        for name in DatasetName::ALL {
            let payload = catalog.payload_for(&DatasetRequest::read(name));
            payload.validate().expect("demo payload must validate");
            assert_eq!(payload.dataset(), name);
        }
    }

    #[test]
    fn demo_prediction_varies_with_form_input() {
        let catalog = DemoDataCatalog;
        let mut params = IndexMap::new();
        params.insert("income".to_owned(), json!(90_000));
        params.insert("time_on_website".to_owned(), json!(30));
        params.insert("marketing_engaged".to_owned(), json!(1));
        params.insert("brand".to_owned(), json!("iPhone"));
        let engaged = catalog
            .payload_for(&DatasetRequest::with_params(
                DatasetName::Prediction,
                params.clone(),
            ));
        params.insert("income".to_owned(), json!(10_000));
        params.insert("time_on_website".to_owned(), json!(2));
        params.insert("marketing_engaged".to_owned(), json!(0));
        params.insert("previous_purchases".to_owned(), json!(0));
        let cold = catalog.payload_for(&DatasetRequest::with_params(
            DatasetName::Prediction,
            params,
        ));
        let engaged = engaged.as_prediction().expect("prediction").probability;
        let cold = cold.as_prediction().expect("prediction").probability;
        assert!(engaged > cold);
    }

    #[test]
    fn comparison_uses_requested_brand_list() {
        let catalog = DemoDataCatalog;
        let mut params = IndexMap::new();
        params.insert("brands".to_owned(), json!(["Samsung", "iPhone"]));
        let payload = catalog.payload_for(&DatasetRequest::with_params(
            DatasetName::BrandComparison,
            params,
        ));
        let comparison = payload.as_brand_comparison().expect("comparison");
        let mut brands: Vec<&str> = comparison
            .results
            .iter()
            .map(|score| score.brand.as_str())
            .collect();
        brands.sort_unstable();
        assert_eq!(brands, vec!["Samsung", "iPhone"]);
    }
}
