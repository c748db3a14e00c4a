//! Theme state and synchronous change propagation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DashboardError, DashboardResult};
use crate::render::Color;

/// Dashboard color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Resolved colors for one theme mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemePalette {
    pub text: Color,
    pub grid: Color,
    pub background: Color,
}

impl ThemePalette {
    #[must_use]
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                text: Color::from_rgb8(0xe2, 0xe8, 0xf0),
                grid: Color::rgba(1.0, 1.0, 1.0, 0.1),
                background: Color::from_rgb8(0x1e, 0x1b, 0x2e),
            },
            ThemeMode::Light => Self {
                text: Color::from_rgb8(0x33, 0x33, 0x33),
                grid: Color::rgba(0.0, 0.0, 0.0, 0.1),
                background: Color::from_rgb8(0xf8, 0xfa, 0xfc),
            },
        }
    }
}

/// Observer hook for theme transitions.
///
/// Listeners receive the new mode and its resolved palette; they cannot
/// mutate the theme from inside the callback, so notification is re-entrancy
/// free by construction.
pub trait ThemeListener {
    fn id(&self) -> &str;
    fn theme_changed(&mut self, mode: ThemeMode, palette: &ThemePalette);
}

/// Owns the current mode and the listener set.
#[derive(Default)]
pub struct ThemeState {
    mode: ThemeMode,
    listeners: Vec<Box<dyn ThemeListener>>,
}

impl std::fmt::Debug for ThemeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeState")
            .field("mode", &self.mode)
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl ThemeState {
    #[must_use]
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    #[must_use]
    pub fn palette(&self) -> ThemePalette {
        ThemePalette::for_mode(self.mode)
    }

    /// Registers a listener with unique identifier.
    pub fn register_listener(&mut self, listener: Box<dyn ThemeListener>) -> DashboardResult<()> {
        let listener_id = listener.id().to_owned();
        if listener_id.is_empty() {
            return Err(DashboardError::InvalidData(
                "theme listener id must not be empty".to_owned(),
            ));
        }
        if self
            .listeners
            .iter()
            .any(|entry| entry.id() == listener_id)
        {
            return Err(DashboardError::InvalidData(format!(
                "theme listener with id `{listener_id}` is already registered"
            )));
        }
        self.listeners.push(listener);
        Ok(())
    }

    /// Unregisters a listener by id. Returns `true` when removed.
    pub fn unregister_listener(&mut self, listener_id: &str) -> bool {
        if let Some(position) = self
            .listeners
            .iter()
            .position(|entry| entry.id() == listener_id)
        {
            self.listeners.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn has_listener(&self, listener_id: &str) -> bool {
        self.listeners.iter().any(|entry| entry.id() == listener_id)
    }

    /// Switches the mode. Setting the current mode again is a no-op and
    /// notifies nobody. Returns whether a transition happened.
    pub fn set(&mut self, mode: ThemeMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        let palette = ThemePalette::for_mode(mode);
        debug!(?mode, listeners = self.listeners.len(), "theme changed");
        for listener in &mut self.listeners {
            listener.theme_changed(mode, &palette);
        }
        true
    }

    /// Flips between dark and light.
    pub fn toggle(&mut self) -> ThemeMode {
        let next = self.mode.toggled();
        self.set(next);
        next
    }
}
