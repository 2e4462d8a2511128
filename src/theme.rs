//! Light/dark theme preference.
//!
//! The preference lives in a [`PreferenceStore`] handed to the [`ThemeContext`], so rendering
//! code never touches a global. Stores notify subscribers when a key changes.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use serde::Deserialize;

pub const THEME_STORAGE_KEY: &str = "theme-preference";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
}

impl ThemePreference {
    pub fn toggled(self) -> ThemePreference {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            other => Err(format!("Unknown theme {}", other)),
        }
    }
}

pub type Listener = Box<dyn Fn(&str, &str) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    /// The listener receives `(key, value)` after every `set`.
    fn subscribe(&self, listener: Listener) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}

#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
    listeners: Mutex<Vec<(SubscriptionId, Arc<Listener>)>>,
    next_id: AtomicU64,
}

impl MemoryPreferenceStore {
    pub fn new() -> MemoryPreferenceStore {
        Default::default()
    }

    pub fn with_value(key: &str, value: &str) -> MemoryPreferenceStore {
        let store = MemoryPreferenceStore::new();
        if let Ok(mut values) = store.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }

        // Listeners run outside the lock so they may read the store back
        let listeners: Vec<Arc<Listener>> = match self.listeners.lock() {
            Ok(listeners) => listeners.iter().map(|(_, l)| l.clone()).collect(),
            Err(_) => return,
        };
        for listener in listeners {
            (**listener)(key, value);
        }
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, Arc::new(listener)));
        }
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.retain(|(sid, _)| *sid != id);
        }
    }
}

/// Current theme, resolved from the store with a system fallback and kept in sync with it.
pub struct ThemeContext {
    store: Arc<dyn PreferenceStore>,
    current: Arc<RwLock<ThemePreference>>,
    subscription: SubscriptionId,
}

impl ThemeContext {
    pub fn new(store: Arc<dyn PreferenceStore>, system_default: ThemePreference) -> ThemeContext {
        let initial = store.get(THEME_STORAGE_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or(system_default);
        let current = Arc::new(RwLock::new(initial));

        let tracked = current.clone();
        let subscription = store.subscribe(Box::new(move |key, value| {
            if key != THEME_STORAGE_KEY {
                return;
            }
            if let (Ok(theme), Ok(mut current)) = (value.parse::<ThemePreference>(), tracked.write()) {
                *current = theme;
            }
        }));

        ThemeContext {
            store,
            current,
            subscription,
        }
    }

    pub fn theme(&self) -> ThemePreference {
        self.current.read()
            .map(|theme| *theme)
            .unwrap_or(ThemePreference::Light)
    }

    pub fn set(&self, theme: ThemePreference) {
        self.store.set(THEME_STORAGE_KEY, theme.as_str());
    }

    pub fn toggle(&self) -> ThemePreference {
        let next = self.theme().toggled();
        self.set(next);
        next
    }
}

impl Drop for ThemeContext {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}
