//! Compiled template cache.
//!
//! [`TemplateCache`] maps a template name to its compiled form. Each
//! [`Renderer`](crate::Renderer) owns one cache and its lock, so renderers never
//! contend with each other.
//!
//! The policy is read-through, populate-on-miss:
//!
//! - Entries are created on the first successful build of a name and live as
//!   long as the cache. There is no eviction and no TTL.
//! - A rebuild of the same name overwrites the entry.
//! - The lock is held only around the map access, never while reading files
//!   or compiling. Two callers missing the same name at once may both build;
//!   the last write wins and both results are equivalent.
//!
//! When the cache is disabled, [`get`](TemplateCache::get) always misses and
//! [`put`](TemplateCache::put) does nothing, so every request rebuilds from disk.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::engine::SharedTemplate;

/// Concurrent map from template name to compiled template.
pub struct TemplateCache {
    entries: RwLock<HashMap<String, SharedTemplate>>,
    enabled: bool,
}

impl TemplateCache {
    /// Creates an empty cache, enabled or not.
    pub fn new(enabled: bool) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turns caching on or off. Existing entries are kept but ignored while off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Looks up a compiled template. Always `None` while the cache is disabled.
    pub fn get(&self, name: &str) -> Option<SharedTemplate> {
        if !self.enabled {
            return None;
        }
        self.read().get(name).cloned()
    }

    /// Stores a compiled template, replacing any previous entry for `name`.
    ///
    /// Does nothing while the cache is disabled.
    pub fn put(&self, name: impl Into<String>, template: SharedTemplate) {
        if !self.enabled {
            return;
        }
        self.write().insert(name.into(), template);
    }

    /// Whether an entry exists for `name`, regardless of the enabled flag.
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Cached template names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Entries are inserted whole, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, SharedTemplate>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, SharedTemplate>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl std::fmt::Debug for TemplateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateCache")
            .field("enabled", &self.enabled)
            .field("names", &self.names())
            .finish()
    }
}
