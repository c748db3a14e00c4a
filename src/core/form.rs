//! Typed prediction form input with lenient coercion and strict validation.
//!
//! Missing or non-numeric fields coerce to the model's training-set medians
//! before validation runs, matching the preprocessing applied server-side.

use indexmap::IndexMap;

use crate::error::{DashboardError, DashboardResult, FieldError};

pub const DEFAULT_AGE: f64 = 30.0;
pub const DEFAULT_INCOME: f64 = 50_000.0;
pub const DEFAULT_TIME_ON_WEBSITE: f64 = 15.0;
pub const DEFAULT_PREVIOUS_PURCHASES: f64 = 1.0;
pub const DEFAULT_SEARCH_FREQUENCY: f64 = 5.0;
pub const DEFAULT_DEVICE_AGE: f64 = 2.0;

/// One submitted prediction form, after coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionInput {
    pub age: f64,
    pub income: f64,
    pub time_on_website: f64,
    pub previous_purchases: f64,
    pub marketing_engaged: bool,
    pub search_frequency: f64,
    pub device_age: f64,
    pub brand: String,
}

impl Default for PredictionInput {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            income: DEFAULT_INCOME,
            time_on_website: DEFAULT_TIME_ON_WEBSITE,
            previous_purchases: DEFAULT_PREVIOUS_PURCHASES,
            marketing_engaged: false,
            search_frequency: DEFAULT_SEARCH_FREQUENCY,
            device_age: DEFAULT_DEVICE_AGE,
            brand: String::new(),
        }
    }
}

impl PredictionInput {
    /// Builds an input from loose request parameters, coercing absent or
    /// malformed numeric fields to their defaults. Coercion never fails;
    /// only [`PredictionInput::validate`] rejects.
    #[must_use]
    pub fn from_params(params: &IndexMap<String, serde_json::Value>) -> Self {
        let number = |key: &str, default: f64| {
            params.get(key).map_or(default, |value| {
                coerce_number(value).unwrap_or(default)
            })
        };
        let engaged = params
            .get("marketing_engaged")
            .map_or(false, |value| coerce_bool(value));
        let brand = params
            .get("brand")
            .and_then(|value| value.as_str())
            .unwrap_or_default()
            .to_owned();

        Self {
            age: number("age", DEFAULT_AGE),
            income: number("income", DEFAULT_INCOME),
            time_on_website: number("time_on_website", DEFAULT_TIME_ON_WEBSITE),
            previous_purchases: number("previous_purchases", DEFAULT_PREVIOUS_PURCHASES),
            marketing_engaged: engaged,
            search_frequency: number("search_frequency", DEFAULT_SEARCH_FREQUENCY),
            device_age: number("device_age", DEFAULT_DEVICE_AGE),
            brand,
        }
    }

    /// Serializes back to the wire parameter shape. `marketing_engaged`
    /// travels as 0/1 the way the model features encode it.
    #[must_use]
    pub fn to_params(&self) -> IndexMap<String, serde_json::Value> {
        let mut params = IndexMap::new();
        params.insert("age".to_owned(), serde_json::json!(self.age));
        params.insert("income".to_owned(), serde_json::json!(self.income));
        params.insert(
            "time_on_website".to_owned(),
            serde_json::json!(self.time_on_website),
        );
        params.insert(
            "previous_purchases".to_owned(),
            serde_json::json!(self.previous_purchases),
        );
        params.insert(
            "marketing_engaged".to_owned(),
            serde_json::json!(u8::from(self.marketing_engaged)),
        );
        params.insert(
            "search_frequency".to_owned(),
            serde_json::json!(self.search_frequency),
        );
        params.insert("device_age".to_owned(), serde_json::json!(self.device_age));
        params.insert("brand".to_owned(), serde_json::json!(self.brand));
        params
    }

    /// Collects every field violation instead of stopping at the first, so
    /// callers can surface the full set to the form at once.
    pub fn validate(&self) -> DashboardResult<()> {
        self.validate_inner(true)
    }

    /// Like [`Self::validate`], but without requiring a brand. Comparison
    /// submissions carry a brand list instead of the single brand field.
    pub fn validate_for_comparison(&self) -> DashboardResult<()> {
        self.validate_inner(false)
    }

    fn validate_inner(&self, require_brand: bool) -> DashboardResult<()> {
        let mut errors = Vec::new();

        if !self.age.is_finite() || !(18.0..=100.0).contains(&self.age) {
            errors.push(FieldError::new("age", "must be between 18 and 100"));
        }
        for (field, value) in [
            ("income", self.income),
            ("time_on_website", self.time_on_website),
            ("previous_purchases", self.previous_purchases),
            ("search_frequency", self.search_frequency),
            ("device_age", self.device_age),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(FieldError::new(field, "must be a non-negative number"));
            }
        }
        if require_brand && self.brand.trim().is_empty() {
            errors.push(FieldError::new("brand", "must not be empty"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DashboardError::InvalidForm { errors })
        }
    }
}

fn coerce_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text
            .trim()
            .parse()
            .ok()
            .filter(|number: &f64| number.is_finite()),
        serde_json::Value::Bool(flag) => Some(f64::from(u8::from(*flag))),
        _ => None,
    }
}

fn coerce_bool(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(text) => {
            matches!(text.trim(), "1" | "true" | "on" | "yes")
        }
        _ => false,
    }
}
