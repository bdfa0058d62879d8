//! Named callback declarations and their process-wide, per-type cache.
//!
//! Loader and binder lists are declared once per type through plain functions and
//! then memoized here, keyed by the [`TypeId`] of the entry type.

use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::{Arc, OnceLock};
use tracing::trace;

/// One named callback.
#[derive(Debug, Clone, Copy)]
pub struct Declared<C> {
    pub name: &'static str,
    pub callback: C,
}

/// An ordered list of named callbacks.
///
/// Adding a name that already exists replaces its callback in place, so an override
/// keeps the position of the entry it replaces.
#[derive(Debug, Clone)]
pub struct Declarations<C> {
    entries: Vec<Declared<C>>,
}

impl<C> Default for Declarations<C> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<C> Declarations<C> {
    pub fn add(&mut self, name: &'static str, callback: C) -> &mut Self {
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(existing) => existing.callback = callback,
            None => self.entries.push(Declared { name, callback }),
        }
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<Declared<C>> {
        self.entries
    }
}

type Cache = RwLock<FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>>;

static CACHE: OnceLock<Cache> = OnceLock::new();

fn cache() -> &'static Cache {
    CACHE.get_or_init(|| RwLock::new(FxHashMap::default()))
}

/// Returns the memoized list for entry type `E`, building it with `build` on first use.
///
/// `build` runs without the cache lock held, so it may itself consult the cache.
/// When two threads race, the first stored list wins.
pub fn cached<E, F>(build: F) -> Arc<Vec<E>>
where
    E: Send + Sync + 'static,
    F: FnOnce() -> Vec<E>,
{
    let key = TypeId::of::<E>();
    if let Some(list) = lookup::<E>(key) {
        return list;
    }

    let built: Arc<dyn Any + Send + Sync> = Arc::new(build());
    trace!(entry = type_name::<E>(), "Declaration list computed");

    let stored = Arc::clone(cache().write().entry(key).or_insert(built));
    stored.downcast::<Vec<E>>().unwrap_or_else(|_| unreachable!("cache keyed by entry type"))
}

fn lookup<E: Send + Sync + 'static>(key: TypeId) -> Option<Arc<Vec<E>>> {
    let stored = cache().read().get(&key).map(Arc::clone)?;
    stored.downcast::<Vec<E>>().ok()
}
