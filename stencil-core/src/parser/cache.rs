use crate::ParsedSql;
use lru::LruCache;
use std::{
    collections::HashMap,
    num::NonZeroUsize,
    sync::{Arc, Mutex, PoisonError, RwLock},
};

/// Default capacity of [`LruParseCache`].
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Memoization of parsed templates, owned by one parser.
///
/// Implementations are shared between threads. When two threads insert the same
/// template, the entry inserted first is kept and returned to both, so every
/// reader observes one canonical [`ParsedSql`].
pub trait ParseCache: Send + Sync {
    fn get(&self, template: &str) -> Option<Arc<ParsedSql>>;
    /// Store `parsed` unless `template` is already present, returns the stored entry.
    fn insert(&self, template: &str, parsed: Arc<ParsedSql>) -> Arc<ParsedSql>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn clear(&self);
}

/// Bounded cache evicting the least recently used template.
pub struct LruParseCache {
    cache: Mutex<LruCache<String, Arc<ParsedSql>>>,
}

impl LruParseCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// A zero capacity falls back to the default one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity)
            .or(NonZeroUsize::new(DEFAULT_CACHE_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cap()
            .get()
    }
}

impl Default for LruParseCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ParseCache for LruParseCache {
    fn get(&self, template: &str) -> Option<Arc<ParsedSql>> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(template)
            .cloned()
    }

    fn insert(&self, template: &str, parsed: Arc<ParsedSql>) -> Arc<ParsedSql> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = cache.get(template) {
            return existing.clone();
        }
        if let Some((evicted, ..)) = cache.push(template.to_owned(), parsed.clone()) {
            log::debug!(
                "Parse cache evicted template:\n{}",
                crate::truncate_long!(evicted)
            );
        }
        parsed
    }

    fn len(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn clear(&self) {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Cache that never evicts, for applications with a fixed set of templates.
#[derive(Default)]
pub struct UnboundedParseCache {
    cache: RwLock<HashMap<String, Arc<ParsedSql>>>,
}

impl UnboundedParseCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParseCache for UnboundedParseCache {
    fn get(&self, template: &str) -> Option<Arc<ParsedSql>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(template)
            .cloned()
    }

    fn insert(&self, template: &str, parsed: Arc<ParsedSql>) -> Arc<ParsedSql> {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(template.to_owned())
            .or_insert(parsed)
            .clone()
    }

    fn len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn clear(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Disables caching, every parse starts from scratch.
#[derive(Default, Clone, Copy)]
pub struct NoParseCache;

impl ParseCache for NoParseCache {
    fn get(&self, _template: &str) -> Option<Arc<ParsedSql>> {
        None
    }
    fn insert(&self, _template: &str, parsed: Arc<ParsedSql>) -> Arc<ParsedSql> {
        parsed
    }
    fn len(&self) -> usize {
        0
    }
    fn clear(&self) {}
}
