//! Data-source resolution: live service, static snapshots, demo catalog.
//!
//! [`DataSourceResolver::resolve`] is infallible by construction. The live
//! stage may fail and the static stage may be absent, but the demo catalog
//! always answers, so every resolve yields a payload plus its provenance.

pub mod live;
pub mod static_store;

use std::time::Duration;

use tracing::{debug, warn};

use crate::core::demo_catalog::DemoDataCatalog;
use crate::core::payload::DatasetPayload;
use crate::core::types::{DatasetRequest, DatasetResult, DatasetSource};

pub use live::LiveBackend;
pub use static_store::StaticStore;

#[cfg(feature = "http-backend")]
pub use live::HttpLiveBackend;

/// Bounded fixed-delay retry settings for the live stage.
///
/// Retries apply to side-effect-free reads only. Form submissions get a
/// single attempt so a slow backend is never handed a duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// No waiting between attempts. Intended for tests and embedded hosts
    /// that handle pacing themselves.
    #[must_use]
    pub const fn immediate(max_retries: u32) -> Self {
        Self::new(max_retries, Duration::ZERO)
    }

    #[must_use]
    const fn attempts_for(self, request: &DatasetRequest) -> u32 {
        if request.name.is_idempotent_read() {
            1 + self.max_retries
        } else {
            1
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(2, Duration::from_millis(1000))
    }
}

/// Observer for demo-mode banner state.
///
/// Called only on transitions, never repeatedly for the same state, so a
/// host can map it one-to-one onto showing and hiding a banner.
pub trait DemoModeObserver {
    fn demo_mode_changed(&mut self, active: bool);
}

/// Resolves dataset requests through the live, static, demo chain.
pub struct DataSourceResolver {
    live: Option<Box<dyn LiveBackend>>,
    static_store: Option<StaticStore>,
    demo: DemoDataCatalog,
    retry: RetryPolicy,
    live_available: bool,
    demo_mode: bool,
    observer: Option<Box<dyn DemoModeObserver>>,
}

impl std::fmt::Debug for DataSourceResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataSourceResolver")
            .field("has_live", &self.live.is_some())
            .field("static_store", &self.static_store)
            .field("retry", &self.retry)
            .field("live_available", &self.live_available)
            .field("demo_mode", &self.demo_mode)
            .finish_non_exhaustive()
    }
}

impl Default for DataSourceResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSourceResolver {
    /// Resolver with no live backend and no static store. Every resolve
    /// serves demo data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            live: None,
            static_store: None,
            demo: DemoDataCatalog,
            retry: RetryPolicy::default(),
            live_available: true,
            demo_mode: false,
            observer: None,
        }
    }

    #[must_use]
    pub fn with_live(mut self, live: Box<dyn LiveBackend>) -> Self {
        self.live = Some(live);
        self
    }

    #[must_use]
    pub fn with_static_store(mut self, store: StaticStore) -> Self {
        self.static_store = Some(store);
        self
    }

    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_demo_observer(mut self, observer: Box<dyn DemoModeObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Whether the live backend answered within the last successful check.
    ///
    /// The flag is a sticky latch: it starts optimistic, drops after a full
    /// retry exhaustion, and is re-armed only by [`Self::probe_live`].
    #[must_use]
    pub fn is_live_available(&self) -> bool {
        self.live.is_some() && self.live_available
    }

    /// Whether the most recent resolve was answered from the demo catalog.
    #[must_use]
    pub fn is_demo_mode(&self) -> bool {
        self.demo_mode
    }

    /// Resolves a dataset request. Never fails; the result names which stage
    /// answered.
    pub fn resolve(&mut self, request: &DatasetRequest) -> DatasetResult {
        if let Some(payload) = self.try_live(request) {
            self.set_demo_mode(false);
            return DatasetResult::new(DatasetSource::Live, payload);
        }

        if request.name.is_idempotent_read() {
            if let Some(payload) = self.try_static(request) {
                self.set_demo_mode(false);
                return DatasetResult::new(DatasetSource::Static, payload);
            }
        } else {
            debug!(
                dataset = %request.name,
                "skipping static stage for form-driven dataset"
            );
        }

        let payload = self.demo.payload_for(request);
        debug!(dataset = %request.name, "serving demo payload");
        self.set_demo_mode(true);
        DatasetResult::new(DatasetSource::Demo, payload)
    }

    /// Re-arms the live latch and performs one status fetch to decide its
    /// new state. Returns whether the backend is reachable.
    pub fn probe_live(&mut self) -> bool {
        let Some(live) = self.live.as_ref() else {
            return false;
        };
        let request = DatasetRequest::read(crate::core::types::DatasetName::Status);
        match live
            .fetch(&request)
            .and_then(|value| DatasetPayload::from_json(request.name, &value))
        {
            Ok(_) => {
                debug!("live health probe succeeded");
                self.live_available = true;
                true
            }
            Err(err) => {
                warn!(error = %err, "live health probe failed");
                self.live_available = false;
                false
            }
        }
    }

    fn try_live(&mut self, request: &DatasetRequest) -> Option<DatasetPayload> {
        let live = self.live.as_ref()?;
        if !self.live_available {
            debug!(
                dataset = %request.name,
                "skipping live stage; backend latched unavailable"
            );
            return None;
        }

        let attempts = self.retry.attempts_for(request);
        for attempt in 1..=attempts {
            match live
                .fetch(request)
                .and_then(|value| DatasetPayload::from_json(request.name, &value))
            {
                Ok(payload) => {
                    debug!(
                        dataset = %request.name,
                        attempt,
                        "live fetch succeeded"
                    );
                    return Some(payload);
                }
                Err(err) => {
                    warn!(
                        dataset = %request.name,
                        attempt,
                        attempts,
                        error = %err,
                        "live fetch failed"
                    );
                    if attempt < attempts && !self.retry.delay.is_zero() {
                        std::thread::sleep(self.retry.delay);
                    }
                }
            }
        }

        warn!(
            backend = %live.describe(),
            "live backend latched unavailable after retry exhaustion"
        );
        self.live_available = false;
        None
    }

    fn try_static(&self, request: &DatasetRequest) -> Option<DatasetPayload> {
        let store = self.static_store.as_ref()?;
        let value = store.load(request.name)?;
        match DatasetPayload::from_json(request.name, &value) {
            Ok(payload) => {
                debug!(dataset = %request.name, "served from static snapshot");
                Some(payload)
            }
            Err(err) => {
                warn!(
                    dataset = %request.name,
                    error = %err,
                    "static snapshot rejected by payload validation"
                );
                None
            }
        }
    }

    fn set_demo_mode(&mut self, active: bool) {
        if self.demo_mode == active {
            return;
        }
        self.demo_mode = active;
        debug!(active, "demo mode changed");
        if let Some(observer) = self.observer.as_mut() {
            observer.demo_mode_changed(active);
        }
    }
}
