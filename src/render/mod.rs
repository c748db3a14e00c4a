mod chart_config;
mod null_backend;
mod primitives;

pub use chart_config::{ChartConfig, ChartKind};
pub use null_backend::NullBackend;
pub use primitives::Color;

use crate::error::DashboardResult;

/// Identifier a backend assigns to one live chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartInstanceId(pub u64);

/// Result of asking the registry to render into a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A chart instance now exists in the slot.
    Rendered(ChartInstanceId),
    /// The slot's drawing surface is not attached; nothing was created.
    SurfaceAbsent,
}

/// Contract implemented by any drawing backend.
///
/// Backends receive a fully materialized, deterministic [`ChartConfig`] so
/// drawing code remains isolated from data resolution and theming logic.
pub trait ChartBackend {
    /// Whether the drawing surface for `slot_id` is currently attached.
    fn surface_exists(&self, slot_id: &str) -> bool;

    /// Creates a chart on an attached surface and returns its instance id.
    fn create_chart(&mut self, slot_id: &str, config: &ChartConfig) -> DashboardResult<ChartInstanceId>;

    /// Destroys a live chart instance. Unknown ids are ignored.
    fn dispose_chart(&mut self, instance: ChartInstanceId);
}
