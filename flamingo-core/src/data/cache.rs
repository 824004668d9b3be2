//! Time-boxed response memoization.
//!
//! `TtlCache` maps a key to `(value, expiry)` and evicts lazily on read.
//! Time comes from an injected [`Clock`], so expiry is testable without
//! sleeping. `CachedSymbolSource` and `CachedHistorySource` wrap any source
//! and remember successful responses only; failures always reach the caller.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::provider::{DataError, History, HistorySource, SymbolSource};
use crate::domain::LookbackPeriod;

/// Symbols are refreshed at most once a day.
pub const DEFAULT_SYMBOLS_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Price history is refreshed at most once an hour.
pub const DEFAULT_HISTORY_TTL: Duration = Duration::from_secs(60 * 60);

/// Source of "now" for expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|p| p.into_inner());
        *now += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|p| p.into_inner())
    }
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Key → (value, expiry) map with a fixed time-to-live.
#[derive(Debug)]
pub struct TtlCache<K, V, C = SystemClock> {
    entries: HashMap<K, Entry<V>>,
    ttl: Duration,
    clock: C,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V, SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<K: Eq + Hash, V: Clone, C: Clock> TtlCache<K, V, C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Unexpired value for `key`; an expired entry is removed.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let now = self.clock.now();
        match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        let expires_at = self.clock.now() + self.ttl;
        self.entries.insert(key, Entry { value, expires_at });
    }

    pub fn invalidate(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop every expired entry; returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, e| e.expires_at > now);
        before - self.entries.len()
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panic while holding the lock cannot leave a half-written entry.
    m.lock().unwrap_or_else(|p| p.into_inner())
}

/// Caching wrapper around a [`SymbolSource`].
pub struct CachedSymbolSource<S, C = SystemClock> {
    inner: S,
    cache: Mutex<TtlCache<(), BTreeSet<String>, C>>,
}

impl<S: SymbolSource> CachedSymbolSource<S, SystemClock> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self::with_clock(inner, ttl, SystemClock)
    }
}

impl<S: SymbolSource, C: Clock> CachedSymbolSource<S, C> {
    pub fn with_clock(inner: S, ttl: Duration, clock: C) -> Self {
        Self {
            inner,
            cache: Mutex::new(TtlCache::with_clock(ttl, clock)),
        }
    }

    /// Forget the cached listing so the next call goes to the source.
    pub fn invalidate(&self) {
        lock(&self.cache).clear();
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: SymbolSource, C: Clock> SymbolSource for CachedSymbolSource<S, C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn list_symbols(&self) -> Result<BTreeSet<String>, DataError> {
        if let Some(hit) = lock(&self.cache).get(&()) {
            log::debug!("symbol listing served from cache");
            return Ok(hit);
        }
        let symbols = self.inner.list_symbols()?;
        lock(&self.cache).insert((), symbols.clone());
        Ok(symbols)
    }
}

/// Caching wrapper around a [`HistorySource`], keyed by `(ticker, period)`.
pub struct CachedHistorySource<H, C = SystemClock> {
    inner: H,
    cache: Mutex<TtlCache<(String, LookbackPeriod), History, C>>,
}

impl<H: HistorySource> CachedHistorySource<H, SystemClock> {
    pub fn new(inner: H, ttl: Duration) -> Self {
        Self::with_clock(inner, ttl, SystemClock)
    }
}

impl<H: HistorySource, C: Clock> CachedHistorySource<H, C> {
    pub fn with_clock(inner: H, ttl: Duration, clock: C) -> Self {
        Self {
            inner,
            cache: Mutex::new(TtlCache::with_clock(ttl, clock)),
        }
    }

    /// Forget one selection so the next call refetches it.
    pub fn invalidate(&self, ticker: &str, period: LookbackPeriod) -> bool {
        lock(&self.cache).invalidate(&(ticker.to_string(), period))
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn cached_entries(&self) -> usize {
        let mut cache = lock(&self.cache);
        cache.purge_expired();
        cache.len()
    }
}

impl<H: HistorySource, C: Clock> HistorySource for CachedHistorySource<H, C> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn fetch_history(&self, ticker: &str, period: LookbackPeriod) -> Result<History, DataError> {
        let key = (ticker.to_string(), period);
        if let Some(hit) = lock(&self.cache).get(&key) {
            log::debug!("{ticker} {period} served from cache");
            return Ok(hit);
        }
        let history = self.inner.fetch_history(ticker, period)?;
        if !history.is_empty() {
            lock(&self.cache).insert(key, history.clone());
        }
        Ok(history)
    }
}
