use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The datasets the dashboard knows how to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetName {
    Status,
    DashboardData,
    FeatureImportance,
    Prediction,
    BrandComparison,
}

impl DatasetName {
    pub const ALL: [Self; 5] = [
        Self::Status,
        Self::DashboardData,
        Self::FeatureImportance,
        Self::Prediction,
        Self::BrandComparison,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::DashboardData => "dashboard_data",
            Self::FeatureImportance => "feature_importance",
            Self::Prediction => "predict",
            Self::BrandComparison => "compare_brands",
        }
    }

    /// API route path for the live backend.
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::Status => "/api/status",
            Self::DashboardData => "/api/dashboard_data",
            Self::FeatureImportance => "/api/feature_importance",
            Self::Prediction => "/api/predict",
            Self::BrandComparison => "/api/compare_brands",
        }
    }

    /// File name of the pre-exported snapshot for this dataset.
    #[must_use]
    pub const fn static_file_name(self) -> &'static str {
        match self {
            Self::Status => "status.json",
            Self::DashboardData => "dashboard_data.json",
            Self::FeatureImportance => "feature_importance.json",
            Self::Prediction => "prediction.json",
            Self::BrandComparison => "brand_comparison.json",
        }
    }

    /// Whether fetching this dataset is a side-effect-free read.
    ///
    /// Reads may be retried and answered from static snapshots. Form-driven
    /// datasets carry request parameters, so a canned snapshot cannot answer
    /// them and a retry could double-submit against a non-conforming backend.
    #[must_use]
    pub const fn is_idempotent_read(self) -> bool {
        matches!(
            self,
            Self::Status | Self::DashboardData | Self::FeatureImportance
        )
    }
}

impl std::fmt::Display for DatasetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dataset fetch request, with optional form parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRequest {
    pub name: DatasetName,
    pub params: IndexMap<String, serde_json::Value>,
}

impl DatasetRequest {
    /// Parameterless read request.
    #[must_use]
    pub fn read(name: DatasetName) -> Self {
        Self {
            name,
            params: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_params(name: DatasetName, params: IndexMap<String, serde_json::Value>) -> Self {
        Self { name, params }
    }
}

/// Which stage of the fallback chain produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSource {
    Live,
    Static,
    Demo,
}

impl DatasetSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Static => "static",
            Self::Demo => "demo",
        }
    }
}

impl std::fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved dataset: the payload plus provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetResult {
    pub source: DatasetSource,
    pub payload: crate::core::payload::DatasetPayload,
    pub fetched_at: DateTime<Utc>,
}

impl DatasetResult {
    #[must_use]
    pub fn new(source: DatasetSource, payload: crate::core::payload::DatasetPayload) -> Self {
        Self {
            source,
            payload,
            fetched_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.source == DatasetSource::Demo
    }
}
