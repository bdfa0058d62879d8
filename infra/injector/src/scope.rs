use crate::Instance;
use crate::error::InjectError;
use appwire_domain::scope::ScopeKind;
use fxhash::FxHashMap;
use parking_lot::Mutex;
use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

const SCOPE_ID_LEN: usize = 10;

// No visually ambiguous characters (I, O, l, 0, 1): ids end up in log lines.
const SCOPE_ID_ALPHABET: &[char; 55] = &[
    '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L',
    'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f',
    'g', 'h', 'j', 'k', 'm', 'n', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

struct Slot {
    type_name: &'static str,
    value: Instance,
}

/// A mutable key/value store bound to one logical execution unit.
///
/// The owner of the unit (web middleware, task runner, test) creates the context when
/// the unit starts and drops it when it ends. Values never leak between contexts: the
/// context instance itself is the cache boundary.
///
/// The slot map sits behind a mutex, but providers run outside of it, so a provider may
/// resolve other scoped values of the same context. Two threads racing on the first
/// access of one key may both run the provider; the first stored value wins and is
/// returned to both.
pub struct ScopeContext {
    id: String,
    kind: ScopeKind,
    slots: Mutex<FxHashMap<&'static str, Slot>>,
}

impl ScopeContext {
    /// Creates an empty context with a fresh random id.
    #[must_use]
    pub fn new(kind: ScopeKind) -> Self {
        Self {
            id: nanoid::nanoid!(SCOPE_ID_LEN, SCOPE_ID_ALPHABET),
            kind,
            slots: Mutex::new(FxHashMap::default()),
        }
    }

    #[must_use]
    pub fn request() -> Self {
        Self::new(ScopeKind::Request)
    }

    #[must_use]
    pub fn task() -> Self {
        Self::new(ScopeKind::Task)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn kind(&self) -> &ScopeKind {
        &self.kind
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.slots.lock().contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }

    /// Returns the value stored under `key` if it exists and has type `T`.
    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        let value = self.slots.lock().get(key).map(|slot| Arc::clone(&slot.value))?;
        value.downcast::<T>().ok()
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn insert<T: Any + Send + Sync>(&self, key: &'static str, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.slots.lock().insert(
            key,
            Slot { type_name: type_name::<T>(), value: Arc::clone(&value) as Instance },
        );
        value
    }

    /// Returns the value under `key`, running `init` once to create it if absent.
    ///
    /// # Errors
    /// Propagates the error of `init`, or returns [`InjectError::TypeMismatch`] when the
    /// slot already holds a value of another type.
    pub fn get_or_try_insert_with<T, F>(&self, key: &'static str, init: F) -> Result<Arc<T>, InjectError>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> Result<T, InjectError>,
    {
        let cached = self.slots.lock().get(key).map(|slot| Arc::clone(&slot.value));
        if let Some(value) = cached {
            trace!(scope = %self.id, key, "Scoped value reused");
            return downcast_slot::<T>(key, value);
        }

        let created = Arc::new(init()?) as Instance;
        trace!(scope = %self.id, kind = %self.kind, key, "Scoped value created");

        let stored = Arc::clone(
            &self
                .slots
                .lock()
                .entry(key)
                .or_insert(Slot { type_name: type_name::<T>(), value: created })
                .value,
        );
        downcast_slot::<T>(key, stored)
    }

    /// Drops every stored value.
    pub fn clear(&self) {
        self.slots.lock().clear();
    }
}

fn downcast_slot<T: Any + Send + Sync>(key: &str, value: Instance) -> Result<Arc<T>, InjectError> {
    value.downcast::<T>().map_err(|_| InjectError::TypeMismatch {
        message: format!("slot `{key}` does not hold a {}", type_name::<T>()).into(),
        context: None,
    })
}

impl fmt::Debug for ScopeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.lock();
        let mut entries: Vec<_> = slots.iter().map(|(key, slot)| (*key, slot.type_name)).collect();
        entries.sort_unstable();
        f.debug_struct("ScopeContext")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("slots", &entries)
            .finish()
    }
}
