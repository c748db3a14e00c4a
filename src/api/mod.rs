//! Public dashboard facade.
//!
//! [`DashboardEngine`] owns the resolver, the chart registry and the theme
//! state, and exposes the operations a host UI drives: section activation,
//! form submission, manual refresh and theme switching.

pub mod chart_builders;
pub mod chart_registry;
pub mod sections;
pub mod theme;

pub use chart_registry::ChartRegistry;
pub use sections::{DashboardSection, slots};
pub use theme::{ThemeListener, ThemeMode, ThemePalette, ThemeState};

use tracing::debug;

use crate::core::form::PredictionInput;
use crate::core::payload::{BrandComparisonPayload, DatasetPayload, PredictionPayload};
use crate::core::types::{DatasetName, DatasetRequest, DatasetResult};
use crate::error::{DashboardError, DashboardResult, FieldError};
use crate::render::{ChartBackend, ChartConfig, RenderOutcome};
use crate::resolver::DataSourceResolver;

/// Engine bootstrap configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardEngineConfig {
    pub initial_theme: ThemeMode,
}

impl Default for DashboardEngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardEngineConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            initial_theme: ThemeMode::Dark,
        }
    }

    #[must_use]
    pub const fn with_initial_theme(mut self, mode: ThemeMode) -> Self {
        self.initial_theme = mode;
        self
    }
}

/// The dashboard controller, generic over the drawing backend.
pub struct DashboardEngine<B: ChartBackend> {
    backend: B,
    registry: ChartRegistry,
    resolver: DataSourceResolver,
    theme: ThemeState,
    status: Option<DatasetResult>,
    stats: Option<DatasetResult>,
    features: Option<DatasetResult>,
    last_prediction: Option<DatasetResult>,
    last_comparison: Option<DatasetResult>,
    active_section: Option<DashboardSection>,
}

impl<B: ChartBackend> DashboardEngine<B> {
    #[must_use]
    pub fn new(backend: B, resolver: DataSourceResolver, config: DashboardEngineConfig) -> Self {
        Self {
            backend,
            registry: ChartRegistry::new(),
            resolver,
            theme: ThemeState::new(config.initial_theme),
            status: None,
            stats: None,
            features: None,
            last_prediction: None,
            last_comparison: None,
            active_section: None,
        }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[must_use]
    pub fn registry(&self) -> &ChartRegistry {
        &self.registry
    }

    #[must_use]
    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.mode()
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeState {
        &mut self.theme
    }

    #[must_use]
    pub fn is_demo_mode(&self) -> bool {
        self.resolver.is_demo_mode()
    }

    #[must_use]
    pub fn is_live_available(&self) -> bool {
        self.resolver.is_live_available()
    }

    #[must_use]
    pub fn active_section(&self) -> Option<DashboardSection> {
        self.active_section
    }

    #[must_use]
    pub fn last_prediction(&self) -> Option<&DatasetResult> {
        self.last_prediction.as_ref()
    }

    #[must_use]
    pub fn last_comparison(&self) -> Option<&DatasetResult> {
        self.last_comparison.as_ref()
    }

    /// Service status and model metadata, resolved on first use.
    pub fn status(&mut self) -> &DatasetResult {
        if self.status.is_none() {
            let result = self
                .resolver
                .resolve(&DatasetRequest::read(DatasetName::Status));
            self.status = Some(result);
        }
        self.status
            .as_ref()
            .unwrap_or_else(|| unreachable!("status resolved above"))
    }

    /// Aggregate statistics, resolved on first use.
    pub fn dashboard_stats(&mut self) -> &DatasetResult {
        self.ensure_stats();
        self.stats
            .as_ref()
            .unwrap_or_else(|| unreachable!("stats resolved above"))
    }

    /// Feature importance weights, resolved on first use.
    pub fn feature_importance(&mut self) -> &DatasetResult {
        self.ensure_features();
        self.features
            .as_ref()
            .unwrap_or_else(|| unreachable!("features resolved above"))
    }

    /// Activates a section: resolves the datasets it needs and renders each
    /// of its chart slots exactly once. Returns how many slots produced a
    /// live chart; slots without attached surfaces are skipped.
    pub fn activate_section(&mut self, section: DashboardSection) -> DashboardResult<usize> {
        debug!(section = %section, "activating section");
        self.active_section = Some(section);
        match section {
            DashboardSection::Overview => self.ensure_stats(),
            DashboardSection::Insights => {
                self.ensure_stats();
                self.ensure_features();
            }
            DashboardSection::Prediction | DashboardSection::Comparison => {}
        }

        let mut rendered = 0;
        for slot_id in section.slot_ids() {
            let Some(config) = self.config_for_slot(slot_id) else {
                continue;
            };
            if matches!(
                self.registry.render(&mut self.backend, slot_id, config)?,
                RenderOutcome::Rendered(_)
            ) {
                rendered += 1;
            }
        }
        Ok(rendered)
    }

    /// Manual refresh: re-arms the live-health latch with one probe, drops
    /// cached read datasets, re-resolves the ones previously in use and
    /// re-renders every known chart. Form results are kept as-is and only
    /// re-rendered. Returns whether the live backend answered the probe.
    pub fn refresh(&mut self) -> DashboardResult<bool> {
        let live = self.resolver.probe_live();
        debug!(live, "manual refresh");

        let had_status = self.status.take().is_some();
        let had_stats = self.stats.take().is_some();
        let had_features = self.features.take().is_some();
        if had_status {
            self.status();
        }
        if had_stats {
            self.ensure_stats();
        }
        if had_features {
            self.ensure_features();
        }

        self.rerender_known_slots()?;
        Ok(live)
    }

    /// Validates and submits the prediction form, renders the gauge chart
    /// and returns the resolved prediction.
    pub fn submit_prediction(
        &mut self,
        input: &PredictionInput,
    ) -> DashboardResult<PredictionPayload> {
        input.validate()?;
        let request = DatasetRequest::with_params(DatasetName::Prediction, input.to_params());
        let result = self.resolver.resolve(&request);
        let DatasetPayload::Prediction(payload) = result.payload.clone() else {
            return Err(DashboardError::InvalidData(
                "prediction resolve produced a mismatched payload".to_owned(),
            ));
        };
        self.last_prediction = Some(result);

        let config = chart_builders::gauge_chart(&payload, self.theme.mode());
        self.registry
            .render(&mut self.backend, slots::GAUGE, config)?;
        Ok(payload)
    }

    /// Validates and submits the comparison form for the given brands,
    /// renders the comparison chart and returns the ranked results.
    pub fn compare_brands(
        &mut self,
        input: &PredictionInput,
        brands: &[String],
    ) -> DashboardResult<BrandComparisonPayload> {
        input.validate_for_comparison()?;
        if brands.is_empty() {
            return Err(DashboardError::InvalidForm {
                errors: vec![FieldError::new("brands", "must include at least one brand")],
            });
        }

        let mut params = input.to_params();
        params.insert("brands".to_owned(), serde_json::json!(brands));
        let request = DatasetRequest::with_params(DatasetName::BrandComparison, params);
        let result = self.resolver.resolve(&request);
        let DatasetPayload::BrandComparison(payload) = result.payload.clone() else {
            return Err(DashboardError::InvalidData(
                "comparison resolve produced a mismatched payload".to_owned(),
            ));
        };
        self.last_comparison = Some(result);

        let config = chart_builders::comparison_chart(&payload, self.theme.mode());
        self.registry
            .render(&mut self.backend, slots::COMPARISON, config)?;
        Ok(payload)
    }

    /// Switches the theme and re-renders every known chart with the new
    /// palette. Setting the current mode again is a no-op. Returns whether
    /// a transition happened.
    pub fn set_theme(&mut self, mode: ThemeMode) -> DashboardResult<bool> {
        if !self.theme.set(mode) {
            return Ok(false);
        }
        self.rerender_known_slots()?;
        Ok(true)
    }

    /// Flips between dark and light.
    pub fn toggle_theme(&mut self) -> DashboardResult<ThemeMode> {
        let next = self.theme_mode().toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Disposes every live chart instance, keeping resolved data cached.
    pub fn dispose_all_charts(&mut self) {
        self.registry.dispose_all(&mut self.backend);
    }

    fn ensure_stats(&mut self) {
        if self.stats.is_none() {
            let result = self
                .resolver
                .resolve(&DatasetRequest::read(DatasetName::DashboardData));
            self.stats = Some(result);
        }
    }

    fn ensure_features(&mut self) {
        if self.features.is_none() {
            let result = self
                .resolver
                .resolve(&DatasetRequest::read(DatasetName::FeatureImportance));
            self.features = Some(result);
        }
    }

    fn rerender_known_slots(&mut self) -> DashboardResult<()> {
        let slot_ids: Vec<String> = self.registry.slot_ids().map(ToOwned::to_owned).collect();
        for slot_id in slot_ids {
            let Some(config) = self.config_for_slot(&slot_id) else {
                continue;
            };
            self.registry.render(&mut self.backend, &slot_id, config)?;
        }
        Ok(())
    }

    /// Builds the themed config for a slot from the cached payloads. `None`
    /// when the slot's dataset has not been resolved yet.
    fn config_for_slot(&self, slot_id: &str) -> Option<ChartConfig> {
        let mode = self.theme.mode();
        let stats = self
            .stats
            .as_ref()
            .and_then(|result| result.payload.as_dashboard_stats());
        match slot_id {
            slots::PURCHASE_DISTRIBUTION => {
                stats.map(|stats| chart_builders::purchase_distribution_chart(stats, mode))
            }
            slots::AGE_DISTRIBUTION => {
                stats.map(|stats| chart_builders::age_distribution_chart(stats, mode))
            }
            slots::INCOME_DISTRIBUTION => {
                stats.map(|stats| chart_builders::income_distribution_chart(stats, mode))
            }
            slots::BRAND_DISTRIBUTION => {
                stats.map(|stats| chart_builders::brand_distribution_chart(stats, mode))
            }
            slots::AGE_PURCHASE_RATE => {
                stats.map(|stats| chart_builders::age_purchase_rate_chart(stats, mode))
            }
            slots::BRAND_PURCHASE_RATE => {
                stats.map(|stats| chart_builders::brand_purchase_rate_chart(stats, mode))
            }
            slots::MARKETING_IMPACT => {
                stats.map(|stats| chart_builders::marketing_impact_chart(stats, mode))
            }
            slots::FEATURE_IMPORTANCE => self
                .features
                .as_ref()
                .and_then(|result| result.payload.as_feature_importance())
                .map(|features| chart_builders::feature_importance_chart(features, mode)),
            slots::GAUGE => self
                .last_prediction
                .as_ref()
                .and_then(|result| result.payload.as_prediction())
                .map(|prediction| chart_builders::gauge_chart(prediction, mode)),
            slots::COMPARISON => self
                .last_comparison
                .as_ref()
                .and_then(|result| result.payload.as_brand_comparison())
                .map(|comparison| chart_builders::comparison_chart(comparison, mode)),
            _ => self.registry.last_config_for(slot_id).cloned(),
        }
    }
}
