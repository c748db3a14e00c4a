//! Typed JSON contracts for each dataset the dashboard consumes.
//!
//! Every stage of the fallback chain (live API, static snapshot, demo
//! catalog) must produce one of these shapes. Parsing into a typed payload
//! is also the structural validation gate: a payload that deserializes and
//! passes [`DatasetPayload::validate`] is safe to hand to chart building.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::types::DatasetName;
use crate::error::{DashboardError, DashboardResult};

/// Model metadata reported by the `status` dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub accuracy: f64,
    pub date_trained: String,
}

/// Service health and model metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub status: String,
    pub version: String,
    pub model_info: ModelInfo,
}

impl StatusPayload {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Aggregate statistics driving the overview and insight charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStatsPayload {
    pub total_records: u64,
    pub purchase_rate: f64,
    pub conversion_rate: f64,
    pub avg_age: f64,
    pub avg_income: f64,
    pub avg_time_on_website: f64,
    pub high_income_conversion: f64,
    pub low_income_conversion: f64,
    pub brand_distribution: IndexMap<String, u64>,
    pub age_groups: IndexMap<String, u64>,
    pub age_purchase_rates: IndexMap<String, f64>,
    pub income_groups: IndexMap<String, u64>,
    pub income_purchase_rates: IndexMap<String, f64>,
    pub brand_purchase_rates: IndexMap<String, f64>,
}

/// Per-feature model weights, raw and normalized to shares of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportancePayload {
    pub feature_importance: IndexMap<String, f64>,
    #[serde(default)]
    pub normalized_importance: IndexMap<String, f64>,
}

impl FeatureImportancePayload {
    /// Fills `normalized_importance` from the raw weights when the producer
    /// did not include it. Each entry is its absolute weight as a share of
    /// the absolute total, sorted with the dominant feature first.
    pub fn ensure_normalized(&mut self) {
        if !self.normalized_importance.is_empty() {
            return;
        }
        let total: f64 = self.feature_importance.values().map(|w| w.abs()).sum();
        if !total.is_finite() || total <= 0.0 {
            return;
        }
        let mut shares: Vec<(String, f64)> = self
            .feature_importance
            .iter()
            .map(|(feature, weight)| (feature.clone(), weight.abs() / total))
            .collect();
        shares.sort_by_key(|(_, share)| std::cmp::Reverse(OrderedFloat(*share)));
        self.normalized_importance = shares.into_iter().collect();
    }
}

/// One purchase prediction, either model-computed or heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPayload {
    pub prediction: u8,
    pub probability: f64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// One brand's score within a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandScore {
    pub brand: String,
    pub prediction: u8,
    pub probability: f64,
}

/// Brand comparison results, ordered by descending probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrandComparisonPayload {
    pub results: Vec<BrandScore>,
}

/// A parsed payload for any dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetPayload {
    Status(StatusPayload),
    DashboardStats(DashboardStatsPayload),
    FeatureImportance(FeatureImportancePayload),
    Prediction(PredictionPayload),
    BrandComparison(BrandComparisonPayload),
}

impl DatasetPayload {
    #[must_use]
    pub const fn dataset(&self) -> DatasetName {
        match self {
            Self::Status(_) => DatasetName::Status,
            Self::DashboardStats(_) => DatasetName::DashboardData,
            Self::FeatureImportance(_) => DatasetName::FeatureImportance,
            Self::Prediction(_) => DatasetName::Prediction,
            Self::BrandComparison(_) => DatasetName::BrandComparison,
        }
    }

    /// Parses a raw JSON value into the typed shape for `name` and runs the
    /// structural validation pass.
    pub fn from_json(name: DatasetName, value: &serde_json::Value) -> DashboardResult<Self> {
        let parse_err = |e: serde_json::Error| DashboardError::InvalidPayload {
            dataset: name.as_str().to_owned(),
            reason: e.to_string(),
        };
        let payload = match name {
            DatasetName::Status => Self::Status(StatusPayload::deserialize(value).map_err(parse_err)?),
            DatasetName::DashboardData => {
                Self::DashboardStats(DashboardStatsPayload::deserialize(value).map_err(parse_err)?)
            }
            DatasetName::FeatureImportance => {
                let mut parsed =
                    FeatureImportancePayload::deserialize(value).map_err(parse_err)?;
                parsed.ensure_normalized();
                Self::FeatureImportance(parsed)
            }
            DatasetName::Prediction => {
                Self::Prediction(PredictionPayload::deserialize(value).map_err(parse_err)?)
            }
            DatasetName::BrandComparison => {
                Self::BrandComparison(BrandComparisonPayload::deserialize(value).map_err(parse_err)?)
            }
        };
        payload.validate()?;
        Ok(payload)
    }

    /// Structural checks beyond what serde enforces: rates and probabilities
    /// must be valid fractions, predictions binary, breakdown maps non-empty.
    pub fn validate(&self) -> DashboardResult<()> {
        let invalid = |reason: String| DashboardError::InvalidPayload {
            dataset: self.dataset().as_str().to_owned(),
            reason,
        };
        match self {
            Self::Status(status) => {
                if status.status.is_empty() {
                    return Err(invalid("status string must not be empty".to_owned()));
                }
                if !is_fraction(status.model_info.accuracy) {
                    return Err(invalid(format!(
                        "model accuracy {} must be in [0, 1]",
                        status.model_info.accuracy
                    )));
                }
            }
            Self::DashboardStats(stats) => {
                for (label, value) in [
                    ("purchase_rate", stats.purchase_rate),
                    ("conversion_rate", stats.conversion_rate),
                    ("high_income_conversion", stats.high_income_conversion),
                    ("low_income_conversion", stats.low_income_conversion),
                ] {
                    if !is_fraction(value) {
                        return Err(invalid(format!("{label} {value} must be in [0, 1]")));
                    }
                }
                for (label, rates) in [
                    ("age_purchase_rates", &stats.age_purchase_rates),
                    ("income_purchase_rates", &stats.income_purchase_rates),
                    ("brand_purchase_rates", &stats.brand_purchase_rates),
                ] {
                    if rates.is_empty() {
                        return Err(invalid(format!("{label} must not be empty")));
                    }
                    if let Some((group, rate)) =
                        rates.iter().find(|(_, rate)| !is_fraction(**rate))
                    {
                        return Err(invalid(format!(
                            "{label} entry `{group}` has rate {rate} outside [0, 1]"
                        )));
                    }
                }
                for (label, groups) in [
                    ("brand_distribution", &stats.brand_distribution),
                    ("age_groups", &stats.age_groups),
                    ("income_groups", &stats.income_groups),
                ] {
                    if groups.is_empty() {
                        return Err(invalid(format!("{label} must not be empty")));
                    }
                }
            }
            Self::FeatureImportance(features) => {
                if features.feature_importance.is_empty() {
                    return Err(invalid("feature_importance must not be empty".to_owned()));
                }
                if let Some((feature, weight)) = features
                    .feature_importance
                    .iter()
                    .find(|(_, weight)| !weight.is_finite() || **weight < 0.0)
                {
                    return Err(invalid(format!(
                        "feature `{feature}` has weight {weight}; weights must be finite and >= 0"
                    )));
                }
            }
            Self::Prediction(prediction) => {
                if prediction.prediction > 1 {
                    return Err(invalid(format!(
                        "prediction {} must be 0 or 1",
                        prediction.prediction
                    )));
                }
                if !is_fraction(prediction.probability) {
                    return Err(invalid(format!(
                        "probability {} must be in [0, 1]",
                        prediction.probability
                    )));
                }
            }
            Self::BrandComparison(comparison) => {
                if comparison.results.is_empty() {
                    return Err(invalid("comparison results must not be empty".to_owned()));
                }
                for score in &comparison.results {
                    if score.prediction > 1 {
                        return Err(invalid(format!(
                            "brand `{}` prediction {} must be 0 or 1",
                            score.brand, score.prediction
                        )));
                    }
                    if !is_fraction(score.probability) {
                        return Err(invalid(format!(
                            "brand `{}` probability {} must be in [0, 1]",
                            score.brand, score.probability
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn as_status(&self) -> Option<&StatusPayload> {
        match self {
            Self::Status(status) => Some(status),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dashboard_stats(&self) -> Option<&DashboardStatsPayload> {
        match self {
            Self::DashboardStats(stats) => Some(stats),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_feature_importance(&self) -> Option<&FeatureImportancePayload> {
        match self {
            Self::FeatureImportance(features) => Some(features),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_prediction(&self) -> Option<&PredictionPayload> {
        match self {
            Self::Prediction(prediction) => Some(prediction),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_brand_comparison(&self) -> Option<&BrandComparisonPayload> {
        match self {
            Self::BrandComparison(comparison) => Some(comparison),
            _ => None,
        }
    }
}

fn is_fraction(value: f64) -> bool {
    value.is_finite() && (0.0..=1.0).contains(&value)
}
