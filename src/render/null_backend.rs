use indexmap::{IndexMap, IndexSet};

use crate::error::DashboardResult;
use crate::render::{ChartBackend, ChartConfig, ChartInstanceId};

/// No-op backend used by tests and headless engine usage.
///
/// It still validates configs so tests can catch invalid chart data before
/// a real backend is introduced, and it records every create and dispose so
/// lifecycle invariants can be asserted.
#[derive(Debug, Default)]
pub struct NullBackend {
    attached: IndexSet<String>,
    live: IndexMap<ChartInstanceId, String>,
    next_id: u64,
    pub created: Vec<(String, ChartConfig)>,
    pub disposed: Vec<ChartInstanceId>,
}

impl NullBackend {
    /// Backend with the given surfaces already attached.
    #[must_use]
    pub fn with_surfaces<I, S>(slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            attached: slots.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn attach_surface(&mut self, slot_id: impl Into<String>) {
        self.attached.insert(slot_id.into());
    }

    pub fn detach_surface(&mut self, slot_id: &str) {
        self.attached.shift_remove(slot_id);
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Number of live instances currently drawn into `slot_id`.
    #[must_use]
    pub fn live_count_in_slot(&self, slot_id: &str) -> usize {
        self.live.values().filter(|slot| *slot == slot_id).count()
    }

    #[must_use]
    pub fn last_config_for(&self, slot_id: &str) -> Option<&ChartConfig> {
        self.created
            .iter()
            .rev()
            .find(|(slot, _)| slot == slot_id)
            .map(|(_, config)| config)
    }
}

impl ChartBackend for NullBackend {
    fn surface_exists(&self, slot_id: &str) -> bool {
        self.attached.contains(slot_id)
    }

    fn create_chart(
        &mut self,
        slot_id: &str,
        config: &ChartConfig,
    ) -> DashboardResult<ChartInstanceId> {
        config.validate()?;
        self.next_id += 1;
        let id = ChartInstanceId(self.next_id);
        self.live.insert(id, slot_id.to_owned());
        self.created.push((slot_id.to_owned(), config.clone()));
        Ok(id)
    }

    fn dispose_chart(&mut self, instance: ChartInstanceId) {
        if self.live.shift_remove(&instance).is_some() {
            self.disposed.push(instance);
        }
    }
}
