pub mod demo_catalog;
pub mod form;
pub mod heuristic;
pub mod payload;
pub mod types;

pub use demo_catalog::DemoDataCatalog;
pub use form::PredictionInput;
pub use payload::{
    BrandComparisonPayload, BrandScore, DashboardStatsPayload, DatasetPayload,
    FeatureImportancePayload, ModelInfo, PredictionPayload, StatusPayload,
};
pub use types::{DatasetName, DatasetRequest, DatasetResult, DatasetSource};
