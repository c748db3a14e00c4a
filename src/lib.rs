//! dashboard-rs: headless analytics dashboard core.
//!
//! This crate provides a Rust-idiomatic API for the data and lifecycle layer
//! of an analytics dashboard: resolving datasets through a live/static/demo
//! fallback chain, managing chart instances per surface slot, and propagating
//! theme changes to live charts. Rendering itself stays behind the
//! [`render::ChartBackend`] seam so hosts bring their own drawing toolkit.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod resolver;
pub mod telemetry;

pub use api::{DashboardEngine, DashboardEngineConfig};
pub use error::{DashboardError, DashboardResult};
