//! Chart instance lifecycle, keyed by surface slot id.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::DashboardResult;
use crate::render::{ChartBackend, ChartConfig, ChartInstanceId, RenderOutcome};

#[derive(Debug, Default)]
struct ChartSlot {
    instance: Option<ChartInstanceId>,
    last_config: Option<ChartConfig>,
}

/// Tracks at most one live chart per slot.
///
/// Rendering into a slot always disposes the previous instance before
/// creating the next, so repeated renders can never stack duplicate charts
/// onto one surface.
#[derive(Debug, Default)]
pub struct ChartRegistry {
    slots: IndexMap<String, ChartSlot>,
}

impl ChartRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| slot.instance.is_some())
            .count()
    }

    #[must_use]
    pub fn has_chart(&self, slot_id: &str) -> bool {
        self.slots
            .get(slot_id)
            .is_some_and(|slot| slot.instance.is_some())
    }

    #[must_use]
    pub fn instance_for(&self, slot_id: &str) -> Option<ChartInstanceId> {
        self.slots.get(slot_id).and_then(|slot| slot.instance)
    }

    #[must_use]
    pub fn last_config_for(&self, slot_id: &str) -> Option<&ChartConfig> {
        self.slots
            .get(slot_id)
            .and_then(|slot| slot.last_config.as_ref())
    }

    /// Slot ids the registry has seen, in first-render order.
    pub fn slot_ids(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    /// Renders `config` into `slot_id`, replacing any previous instance.
    ///
    /// The config is remembered even when the surface is absent, so a later
    /// [`Self::refresh_all`] can materialize the chart once the surface
    /// attaches.
    pub fn render<B: ChartBackend>(
        &mut self,
        backend: &mut B,
        slot_id: &str,
        config: ChartConfig,
    ) -> DashboardResult<RenderOutcome> {
        let slot = self.slots.entry(slot_id.to_owned()).or_default();
        if let Some(previous) = slot.instance.take() {
            trace!(slot_id, ?previous, "disposing previous chart instance");
            backend.dispose_chart(previous);
        }
        slot.last_config = Some(config.clone());

        if !backend.surface_exists(slot_id) {
            debug!(slot_id, "surface absent, skipping chart creation");
            return Ok(RenderOutcome::SurfaceAbsent);
        }

        let instance = backend.create_chart(slot_id, &config)?;
        slot.instance = Some(instance);
        debug!(slot_id, ?instance, "chart created");
        Ok(RenderOutcome::Rendered(instance))
    }

    /// Re-renders every known slot from its remembered config, after letting
    /// `map` adjust it. Returns how many slots produced a live instance.
    pub fn refresh_all<B, F>(&mut self, backend: &mut B, mut map: F) -> DashboardResult<usize>
    where
        B: ChartBackend,
        F: FnMut(&str, ChartConfig) -> ChartConfig,
    {
        let slot_ids: Vec<String> = self.slots.keys().cloned().collect();
        let mut rendered = 0;
        for slot_id in slot_ids {
            let Some(config) = self.last_config_for(&slot_id).cloned() else {
                continue;
            };
            let config = map(&slot_id, config);
            if matches!(
                self.render(backend, &slot_id, config)?,
                RenderOutcome::Rendered(_)
            ) {
                rendered += 1;
            }
        }
        Ok(rendered)
    }

    /// Disposes the slot's instance, keeping its remembered config.
    /// Returns `true` when an instance was live.
    pub fn dispose<B: ChartBackend>(&mut self, backend: &mut B, slot_id: &str) -> bool {
        let Some(slot) = self.slots.get_mut(slot_id) else {
            return false;
        };
        match slot.instance.take() {
            Some(instance) => {
                backend.dispose_chart(instance);
                debug!(slot_id, ?instance, "chart disposed");
                true
            }
            None => false,
        }
    }

    /// Disposes every live instance.
    pub fn dispose_all<B: ChartBackend>(&mut self, backend: &mut B) {
        let slot_ids: Vec<String> = self.slots.keys().cloned().collect();
        for slot_id in slot_ids {
            self.dispose(backend, &slot_id);
        }
    }
}
