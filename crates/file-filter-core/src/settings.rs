//! Global settings and live reload.
//!
//! # Overview
//!
//! [`Settings`] is the deserialized settings file. [`SettingsStore`] owns the current value,
//! reloads it and notifies subscribers. Subscribing returns a [`Subscription`] guard; dropping
//! the guard unsubscribes, so a component's live-reload hook ends exactly when the component
//! does. [`LiveSettings`] packages that pattern: a snapshot kept current by its own
//! subscription.
//!
//! # Example
//!
//! ```rust
//! use file_filter_core::{LiveSettings, SettingsStore};
//!
//! let mut store = SettingsStore::default();
//! let live = LiveSettings::new(&store);
//!
//! store
//!     .reload_from_str(r#"{ "favorites": [{ "name": "Errors", "expression": "ERROR" }] }"#)
//!     .unwrap();
//! assert_eq!(live.snapshot().favorites.len(), 1);
//!
//! drop(live);
//! assert_eq!(store.subscriber_count(), 0);
//! ```

use crate::clear::ClearOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::{Ref, RefCell};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings text is not valid JSON for [`Settings`].
    #[error("settings parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The settings file could not be read.
    #[error("failed to read settings file {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A named regex offered in the favorites menu.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Favorite {
    /// Menu label.
    pub name: String,
    /// The regex.
    pub expression: String,
}

/// File filter settings.
///
/// Unknown keys are ignored and missing keys take their defaults. Policy defaults are kept as
/// raw values and validated when resolved, so a bad value only loses that one setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Favorite regexes.
    #[serde(alias = "favorits")]
    pub favorites: Vec<Favorite>,
    /// Folding policy used when the session has none.
    pub default_folding_type: Option<Value>,
    /// Highlight style used when the session has none.
    pub default_highlight_type: Option<Value>,
    /// Options for the clear command.
    pub on_clear_command_options: ClearOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            favorites: Vec::new(),
            default_folding_type: None,
            default_highlight_type: None,
            on_clear_command_options: ClearOptions::command_default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a settings file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

type Listener = Box<dyn FnMut(&Settings)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
    notifying: bool,
    /// Ids dropped while their listener was checked out for notification.
    dropped: HashSet<u64>,
}

/// Owner of the current [`Settings`].
#[derive(Default)]
pub struct SettingsStore {
    current: Settings,
    registry: Rc<RefCell<Registry>>,
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("current", &self.current)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl SettingsStore {
    /// Create a store holding `settings`.
    pub fn new(settings: Settings) -> Self {
        Self {
            current: settings,
            registry: Rc::default(),
        }
    }

    /// Current settings.
    pub fn get(&self) -> &Settings {
        &self.current
    }

    /// Replace the settings and notify subscribers.
    pub fn replace(&mut self, settings: Settings) {
        self.current = settings;
        self.notify();
    }

    /// Reload from JSON text. On error the current settings are kept and nobody is notified.
    pub fn reload_from_str(&mut self, text: &str) -> Result<(), SettingsError> {
        let settings = Settings::from_json(text)?;
        info!("settings reloaded");
        self.replace(settings);
        Ok(())
    }

    /// Reload from a settings file. On error the current settings are kept.
    pub fn reload_from_path(&mut self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let settings = Settings::from_path(path)?;
        info!(path = %path.display(), "settings reloaded");
        self.replace(settings);
        Ok(())
    }

    /// Call `listener` after every reload until the returned guard is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&Settings) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, Box::new(listener)));
        debug!(id, "settings subscriber added");

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    fn notify(&self) {
        // Listeners are checked out so they may subscribe or drop guards while running.
        let mut listeners = {
            let mut registry = self.registry.borrow_mut();
            registry.notifying = true;
            std::mem::take(&mut registry.listeners)
        };

        for (_, listener) in listeners.iter_mut() {
            listener(&self.current);
        }

        let removed = {
            let mut registry = self.registry.borrow_mut();
            let dropped = std::mem::take(&mut registry.dropped);
            let (mut kept, removed): (Vec<_>, Vec<_>) = listeners
                .into_iter()
                .partition(|(id, _)| !dropped.contains(id));
            // Subscriptions added during notification go after the existing ones.
            kept.append(&mut registry.listeners);
            registry.listeners = kept;
            registry.notifying = false;
            removed
        };
        // Released outside the borrow: a listener may own other guards.
        drop(removed);
    }
}

/// Guard returned by [`SettingsStore::subscribe`]. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(shared) = self.registry.upgrade() else {
            return;
        };
        let Ok(mut registry) = shared.try_borrow_mut() else {
            return;
        };

        let before = registry.listeners.len();
        registry.listeners.retain(|(id, _)| *id != self.id);
        if registry.listeners.len() == before && registry.notifying {
            registry.dropped.insert(self.id);
        }
        debug!(id = self.id, "settings subscriber removed");
    }
}

/// A settings snapshot refreshed on every reload of the store it was created from.
#[derive(Debug)]
pub struct LiveSettings {
    snapshot: Rc<RefCell<Settings>>,
    _subscription: Subscription,
}

impl LiveSettings {
    /// Take a snapshot of `store` and follow its reloads.
    pub fn new(store: &SettingsStore) -> Self {
        let snapshot = Rc::new(RefCell::new(store.get().clone()));
        let target = Rc::clone(&snapshot);
        let subscription = store.subscribe(move |settings| {
            *target.borrow_mut() = settings.clone();
        });
        Self {
            snapshot,
            _subscription: subscription,
        }
    }

    /// The latest settings.
    pub fn snapshot(&self) -> Ref<'_, Settings> {
        self.snapshot.borrow()
    }
}
