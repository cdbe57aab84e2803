//! Timestamped cache entries and the freshness policy that governs them.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use super::store::CacheStore;

/// Default rolling max-age for cached upstream data.
/// Fixture and prediction data changes at most daily, so 24 hours keeps
/// repeat lookups free while staying within one news cycle.
pub const DEFAULT_MAX_AGE_HOURS: i64 = 24;

/// Default UTC hour for the daily-cutoff policy, matching the hour the
/// upstream provider publishes its daily refresh.
pub const DEFAULT_CUTOFF_HOUR: u32 = 6;

/// A cached payload together with its insertion instant.
///
/// `cached_at` is never mutated in place; an update replaces the whole entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedEntry<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

/// Source of "now", injectable so freshness checks are deterministic in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Cache invalidation policy. A deployment picks exactly one; the two
/// variants are never applied to the same keys simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Entry valid while `now - cached_at < max_age`.
    MaxAge(Duration),
    /// Entry valid only if written at or after the most recent daily cutoff
    /// instant (a fixed UTC wall-clock time). Models data that refreshes
    /// once per day at a fixed hour rather than a fixed duration from fetch.
    DailyCutoff(NaiveTime),
}

impl Freshness {
    pub fn max_age_hours(hours: i64) -> Self {
        Freshness::MaxAge(Duration::hours(hours))
    }

    pub fn daily_cutoff(hour: u32) -> Self {
        let cutoff = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
        Freshness::DailyCutoff(cutoff)
    }

    /// Whether an entry written at `cached_at` is still valid at `now`.
    pub fn is_fresh(&self, cached_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Freshness::MaxAge(max_age) => now - cached_at < *max_age,
            Freshness::DailyCutoff(cutoff) => {
                let today_cutoff = now.date_naive().and_time(*cutoff).and_utc();
                let last_cutoff = if now < today_cutoff {
                    today_cutoff - Duration::days(1)
                } else {
                    today_cutoff
                };
                cached_at >= last_cutoff
            }
        }
    }
}

impl Default for Freshness {
    fn default() -> Self {
        Freshness::max_age_hours(DEFAULT_MAX_AGE_HOURS)
    }
}

/// Typed facade over a [`CacheStore`].
///
/// Reads fail open: a missing, stale, or corrupt entry is treated as absent,
/// and stale/corrupt entries are removed so the store does not accumulate
/// dead data. Writes are unconditional, last-write-wins.
///
/// Clone is cheap - the store and clock are shared behind `Arc`.
#[derive(Clone)]
pub struct CacheManager {
    store: Arc<dyn CacheStore>,
    clock: Arc<dyn Clock>,
    freshness: Freshness,
}

impl CacheManager {
    pub fn new(store: Arc<dyn CacheStore>, freshness: Freshness) -> Self {
        Self::with_clock(store, freshness, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn CacheStore>,
        freshness: Freshness,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            clock,
            freshness,
        }
    }

    /// Load an entry, honoring the freshness policy. Expired entries are
    /// purged and reported as absent.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.entry::<T>(key)?;
        if self.freshness.is_fresh(entry.cached_at, self.clock.now()) {
            Some(entry.data)
        } else {
            debug!(key, "Cache entry expired, purging");
            self.discard(key);
            None
        }
    }

    /// Load an entry regardless of age. Reserved for payloads that are
    /// immutable once produced (narrative reports).
    pub fn load_pinned<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.entry(key).map(|entry| entry.data)
    }

    /// Store a value under `key`, stamped with the current instant.
    pub fn save<T: Serialize>(&self, key: &str, data: &T) {
        let entry = CachedEntry {
            data,
            cached_at: self.clock.now(),
        };
        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key, error = %e, "Failed to serialize cache entry");
                return;
            }
        };
        if let Err(e) = self.store.write(key, &raw) {
            warn!(key, error = %e, "Cache write failed");
        }
    }

    fn entry<T: DeserializeOwned>(&self, key: &str) -> Option<CachedEntry<T>> {
        let raw = match self.store.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                debug!(key, error = %e, "Cache read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(key, error = %e, "Discarding corrupt cache entry");
                self.discard(key);
                None
            }
        }
    }

    fn discard(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            debug!(key, error = %e, "Failed to remove cache entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::cache::store::MemoryStore;

    struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(now),
            })
        }

        fn set(&self, now: DateTime<Utc>) {
            *self.now.lock().expect("clock lock") = now;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().expect("clock lock")
        }
    }

    fn utc(date: &str, time: &str) -> DateTime<Utc> {
        format!("{}T{}Z", date, time)
            .parse()
            .expect("valid timestamp")
    }

    fn manager(freshness: Freshness, clock: Arc<ManualClock>) -> (CacheManager, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheManager::with_clock(store.clone(), freshness, clock);
        (cache, store)
    }

    #[test]
    fn test_max_age_serves_until_exact_expiry() {
        let clock = ManualClock::at(utc("2025-08-01", "12:00:00"));
        let (cache, store) = manager(Freshness::max_age_hours(24), clock.clone());

        cache.save("pred_1", &"payload".to_string());

        clock.set(utc("2025-08-02", "11:59:59"));
        assert_eq!(cache.load::<String>("pred_1").as_deref(), Some("payload"));

        // Exactly t0 + T is already stale, and the entry is purged.
        clock.set(utc("2025-08-02", "12:00:00"));
        assert!(cache.load::<String>("pred_1").is_none());
        assert!(store.read("pred_1").expect("read").is_none());
    }

    #[test]
    fn test_daily_cutoff_invalidates_across_boundary() {
        let clock = ManualClock::at(utc("2025-08-01", "05:59:00"));
        let (cache, _) = manager(Freshness::daily_cutoff(6), clock.clone());

        cache.save("fixtures_2025-08-01", &vec![1, 2, 3]);

        // Written 05:59, read 06:01 the same day: less than a day elapsed,
        // but the cutoff has passed.
        clock.set(utc("2025-08-01", "06:01:00"));
        assert!(cache.load::<Vec<i32>>("fixtures_2025-08-01").is_none());
    }

    #[test]
    fn test_daily_cutoff_valid_until_next_boundary() {
        let clock = ManualClock::at(utc("2025-08-01", "06:01:00"));
        let (cache, _) = manager(Freshness::daily_cutoff(6), clock.clone());

        cache.save("fixtures_2025-08-01", &vec![1]);

        clock.set(utc("2025-08-01", "23:59:00"));
        assert_eq!(cache.load::<Vec<i32>>("fixtures_2025-08-01"), Some(vec![1]));

        // Before today's cutoff, yesterday evening's write is still fresh.
        clock.set(utc("2025-08-02", "05:00:00"));
        assert_eq!(cache.load::<Vec<i32>>("fixtures_2025-08-01"), Some(vec![1]));

        clock.set(utc("2025-08-02", "06:00:00"));
        assert!(cache.load::<Vec<i32>>("fixtures_2025-08-01").is_none());
    }

    #[test]
    fn test_corrupt_entry_discarded() {
        let clock = ManualClock::at(utc("2025-08-01", "12:00:00"));
        let (cache, store) = manager(Freshness::default(), clock);

        store.write("pred_9", "{not valid json").expect("write");
        assert!(cache.load::<String>("pred_9").is_none());
        assert!(store.read("pred_9").expect("read").is_none());
    }

    #[test]
    fn test_load_pinned_ignores_expiry() {
        let clock = ManualClock::at(utc("2025-08-01", "12:00:00"));
        let (cache, _) = manager(Freshness::max_age_hours(24), clock.clone());

        cache.save("narrative_5", &"report".to_string());

        clock.set(utc("2025-11-01", "12:00:00"));
        assert!(cache.load::<String>("narrative_5").is_none());
        // load() purged the entry above, so re-seed before the pinned read.
        cache.save("narrative_5", &"report".to_string());
        clock.set(utc("2026-02-01", "12:00:00"));
        assert_eq!(cache.load_pinned::<String>("narrative_5").as_deref(), Some("report"));
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let clock = ManualClock::at(utc("2025-08-01", "12:00:00"));
        let (cache, _) = manager(Freshness::default(), clock);

        cache.save("stats_1_2_2025", &10);
        cache.save("stats_1_2_2025", &20);
        assert_eq!(cache.load::<i32>("stats_1_2_2025"), Some(20));
    }
}
