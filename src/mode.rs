use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt,
    rc::{Rc, Weak},
};

use tracing::{debug, info};

use crate::error::StorageError;

pub const MODE_STORAGE_KEY: &str = "performanceMode";
pub const LOW_POWER_VIEWPORT_WIDTH: f64 = 768.0;
const MOBILE_AGENT_MARKERS: [&str; 4] = ["iphone", "ipad", "ipod", "android"];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PerformanceMode {
    #[default]
    Full,
    Light,
}

impl PerformanceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Light => "light",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "full" => Some(Self::Full),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Full => Self::Light,
            Self::Light => Self::Full,
        }
    }

    pub fn is_full(self) -> bool {
        matches!(self, Self::Full)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::Light => "Light",
        }
    }

    pub fn toggle_title(self) -> &'static str {
        match self {
            Self::Full => "Switch to light mode (better performance)",
            Self::Light => "Switch to full mode (more visual effects)",
        }
    }
}

impl fmt::Display for PerformanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the page can observe about the device at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct DeviceSignals {
    pub viewport_width: f64,
    pub user_agent: String,
}

impl DeviceSignals {
    pub fn is_low_powered(&self) -> bool {
        if self.viewport_width < LOW_POWER_VIEWPORT_WIDTH {
            return true;
        }

        let agent = self.user_agent.to_ascii_lowercase();
        MOBILE_AGENT_MARKERS
            .iter()
            .any(|marker| agent.contains(marker))
    }

    pub fn heuristic_mode(&self) -> PerformanceMode {
        if self.is_low_powered() {
            PerformanceMode::Light
        } else {
            PerformanceMode::Full
        }
    }
}

pub trait ModeStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Session-only storage; also the fallback when durable storage is missing.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl ModeStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

type Listener = Rc<dyn Fn(PerformanceMode)>;

struct StoreInner {
    mode: Cell<PerformanceMode>,
    storage: Box<dyn ModeStorage>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener: Cell<u64>,
}

/// Owner of the page-wide performance mode.
///
/// Handed to components explicitly (the frontend wraps it in a Yew context)
/// rather than living in a global. Clones share the same state.
#[derive(Clone)]
pub struct PerformanceStore {
    inner: Rc<StoreInner>,
}

impl PerformanceStore {
    /// Picks the heuristic mode for `signals`, then lets a persisted choice
    /// override it. Unreadable or unrecognised persisted values are ignored.
    pub fn initialize(signals: &DeviceSignals, storage: impl ModeStorage + 'static) -> Self {
        let mut mode = signals.heuristic_mode();

        match storage.load(MODE_STORAGE_KEY) {
            Ok(Some(saved)) => match PerformanceMode::parse(&saved) {
                Some(saved_mode) => mode = saved_mode,
                None => debug!(value = %saved, "ignoring unrecognised stored performance mode"),
            },
            Ok(None) => {}
            Err(error) => debug!(%error, "performance mode storage unreadable, using heuristic"),
        }

        debug!(%mode, low_powered = signals.is_low_powered(), "performance mode initialised");

        Self {
            inner: Rc::new(StoreInner {
                mode: Cell::new(mode),
                storage: Box::new(storage),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn mode(&self) -> PerformanceMode {
        self.inner.mode.get()
    }

    pub fn toggle(&self) -> PerformanceMode {
        let next = self.mode().toggled();
        self.set(next);
        next
    }

    pub fn set(&self, mode: PerformanceMode) {
        if self.inner.mode.replace(mode) == mode {
            return;
        }

        if let Err(error) = self.inner.storage.store(MODE_STORAGE_KEY, mode.as_str()) {
            debug!(%error, "performance mode not persisted, keeping it in memory");
        }

        info!(%mode, "performance mode changed");

        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(mode);
        }
    }

    pub fn subscribe(&self, listener: impl Fn(PerformanceMode) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }
}

impl PartialEq for PerformanceStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for PerformanceStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerformanceStore")
            .field("mode", &self.mode())
            .finish_non_exhaustive()
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    store: Weak<StoreInner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.store.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> DeviceSignals {
        DeviceSignals {
            viewport_width: 1440.0,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0".to_string(),
        }
    }

    struct UnavailableStorage;

    impl ModeStorage for UnavailableStorage {
        fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn store(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn narrow_viewport_or_mobile_agent_starts_light() {
        let narrow = DeviceSignals {
            viewport_width: 390.0,
            ..desktop()
        };
        let tablet = DeviceSignals {
            user_agent: "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X)".to_string(),
            ..desktop()
        };

        assert_eq!(narrow.heuristic_mode(), PerformanceMode::Light);
        assert_eq!(tablet.heuristic_mode(), PerformanceMode::Light);
        assert_eq!(desktop().heuristic_mode(), PerformanceMode::Full);
    }

    #[test]
    fn persisted_choice_overrides_heuristic() {
        let narrow = DeviceSignals {
            viewport_width: 500.0,
            ..desktop()
        };
        let storage = MemoryStorage::with_value(MODE_STORAGE_KEY, "full");

        let store = PerformanceStore::initialize(&narrow, storage);
        assert_eq!(store.mode(), PerformanceMode::Full);
    }

    #[test]
    fn unrecognised_persisted_value_is_ignored() {
        let storage = MemoryStorage::with_value(MODE_STORAGE_KEY, "turbo");

        let store = PerformanceStore::initialize(&desktop(), storage);
        assert_eq!(store.mode(), PerformanceMode::Full);
    }

    #[test]
    fn toggle_persists_and_notifies_subscribers() {
        let storage = MemoryStorage::new();
        let store = PerformanceStore::initialize(&desktop(), storage.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let subscription = {
            let seen = seen.clone();
            store.subscribe(move |mode| seen.borrow_mut().push(mode))
        };

        assert_eq!(store.toggle(), PerformanceMode::Light);
        assert_eq!(
            storage.load(MODE_STORAGE_KEY).expect("memory storage"),
            Some("light".to_string())
        );

        drop(subscription);
        store.toggle();

        assert_eq!(*seen.borrow(), vec![PerformanceMode::Light]);
        assert_eq!(store.mode(), PerformanceMode::Full);
    }

    #[test]
    fn unavailable_storage_degrades_to_memory() {
        let store = PerformanceStore::initialize(&desktop(), UnavailableStorage);
        assert_eq!(store.mode(), PerformanceMode::Full);

        store.toggle();
        assert_eq!(store.mode(), PerformanceMode::Light);
    }

    #[test]
    fn clones_share_state() {
        let store = PerformanceStore::initialize(&desktop(), MemoryStorage::new());
        let handle = store.clone();

        handle.toggle();
        assert_eq!(store.mode(), PerformanceMode::Light);
        assert_eq!(store, handle);
    }
}
