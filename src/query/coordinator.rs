use super::key::QueryKey;
use std::collections::HashMap;
use std::fmt::Display;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Settled payloads kept per key before the oldest is dropped
const MAX_CACHE_ENTRIES: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// What callers observe for the current key
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot<T> {
    pub status: FetchStatus,
    /// Last settled payload for the current key; kept across errors
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> QuerySnapshot<T> {
    pub fn idle() -> Self {
        Self {
            status: FetchStatus::Idle,
            data: None,
            error: None,
        }
    }

    /// A fetch for the current key is in flight
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == FetchStatus::Error
    }
}

/// Proof that a fetch was started. Hand it back to `settle` with the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    key: QueryKey,
    generation: u64,
}

impl FetchTicket {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// The result became the current state
    Applied,
    /// The result belonged to an abandoned key or superseded fetch
    Stale,
}

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    data: T,
    updated_at: Instant,
}

/// Turns a changing query key into a fetch lifecycle.
///
/// The coordinator never performs I/O. `set_key` and `refetch` hand out a
/// [`FetchTicket`] when the caller should start a request; the caller runs it
/// and reports back through `settle`. At most one ticket per key is
/// outstanding. Results are only applied when the ticket's key is still the
/// current key and its generation is the latest issued for that key.
#[derive(Debug)]
pub struct QueryCoordinator<T> {
    current: Option<QueryKey>,
    snapshot: QuerySnapshot<T>,
    in_flight: HashMap<QueryKey, u64>,
    cache: HashMap<QueryKey, CacheEntry<T>>,
    next_generation: u64,
    stale_time: Duration,
}

impl<T: Clone> Default for QueryCoordinator<T> {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl<T: Clone> QueryCoordinator<T> {
    pub fn new(stale_time: Duration) -> Self {
        Self {
            current: None,
            snapshot: QuerySnapshot::idle(),
            in_flight: HashMap::new(),
            cache: HashMap::new(),
            next_generation: 1,
            stale_time,
        }
    }

    pub fn snapshot(&self) -> &QuerySnapshot<T> {
        &self.snapshot
    }

    /// Current key, `None` while disabled
    pub fn key(&self) -> Option<&QueryKey> {
        self.current.as_ref()
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.in_flight.contains_key(key)
    }

    pub fn set_key(&mut self, key: QueryKey, enabled: bool) -> Option<FetchTicket> {
        self.set_key_at(key, enabled, Instant::now())
    }

    /// Point the coordinator at `key`.
    ///
    /// Returns a ticket when a fetch should start: the query became enabled,
    /// or the key changed while enabled and no fresh payload is cached.
    pub fn set_key_at(&mut self, key: QueryKey, enabled: bool, now: Instant) -> Option<FetchTicket> {
        if !enabled {
            if self.current.take().is_some() {
                debug!("Query disabled");
            }
            self.snapshot = QuerySnapshot::idle();
            return None;
        }

        if self.current.as_ref() == Some(&key) {
            return None;
        }

        debug!("Query key changed to {}", key);
        self.current = Some(key.clone());

        let cached = self.cache.get(&key).cloned();
        self.snapshot = match &cached {
            Some(entry) => QuerySnapshot {
                status: FetchStatus::Success,
                data: Some(entry.data.clone()),
                error: None,
            },
            None => QuerySnapshot::idle(),
        };

        if self.in_flight.contains_key(&key) {
            debug!("Adopting in-flight fetch for {}", key);
            self.snapshot.status = FetchStatus::Loading;
            return None;
        }

        if let Some(entry) = cached {
            if now.saturating_duration_since(entry.updated_at) < self.stale_time {
                debug!("Cached payload for {} is fresh, not fetching", key);
                return None;
            }
        }

        Some(self.begin(key))
    }

    /// Re-run the current key regardless of freshness. No-op while disabled
    /// or while a fetch for the key is already outstanding.
    pub fn refetch(&mut self) -> Option<FetchTicket> {
        let key = self.current.clone()?;
        if self.in_flight.contains_key(&key) {
            debug!("Refetch for {} ignored, fetch already in flight", key);
            return None;
        }
        Some(self.begin(key))
    }

    pub fn settle<E: Display>(&mut self, ticket: FetchTicket, result: Result<T, E>) -> Settled {
        self.settle_at(ticket, result, Instant::now())
    }

    /// Report the outcome of a ticket's fetch
    pub fn settle_at<E: Display>(
        &mut self,
        ticket: FetchTicket,
        result: Result<T, E>,
        now: Instant,
    ) -> Settled {
        if self.in_flight.get(&ticket.key) != Some(&ticket.generation) {
            warn!(
                "Discarding superseded fetch #{} for {}",
                ticket.generation, ticket.key
            );
            return Settled::Stale;
        }
        self.in_flight.remove(&ticket.key);

        if let Ok(data) = &result {
            self.store(ticket.key.clone(), data.clone(), now);
        }

        if self.current.as_ref() != Some(&ticket.key) {
            info!(
                "Fetch #{} for abandoned key {} settled, not applied",
                ticket.generation, ticket.key
            );
            return Settled::Stale;
        }

        match result {
            Ok(data) => {
                info!("Fetch #{} for {} succeeded", ticket.generation, ticket.key);
                self.snapshot = QuerySnapshot {
                    status: FetchStatus::Success,
                    data: Some(data),
                    error: None,
                };
            }
            Err(e) => {
                warn!("Fetch #{} for {} failed: {}", ticket.generation, ticket.key, e);
                self.snapshot.status = FetchStatus::Error;
                self.snapshot.error = Some(e.to_string());
            }
        }
        Settled::Applied
    }

    fn begin(&mut self, key: QueryKey) -> FetchTicket {
        let generation = self.next_generation;
        self.next_generation += 1;

        info!("Starting fetch #{} for {}", generation, key);
        self.in_flight.insert(key.clone(), generation);
        if self.current.as_ref() == Some(&key) {
            self.snapshot.status = FetchStatus::Loading;
        }

        FetchTicket { key, generation }
    }

    fn store(&mut self, key: QueryKey, data: T, now: Instant) {
        self.cache.insert(
            key,
            CacheEntry {
                data,
                updated_at: now,
            },
        );

        while self.cache.len() > MAX_CACHE_ENTRIES {
            let oldest = self
                .cache
                .iter()
                .filter(|(k, _)| Some(*k) != self.current.as_ref())
                .min_by_key(|(_, entry)| entry.updated_at)
                .map(|(k, _)| k.clone());
            match oldest {
                Some(k) => {
                    self.cache.remove(&k);
                }
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(q: &str) -> QueryKey {
        QueryKey::search_images(q)
    }

    fn coordinator() -> QueryCoordinator<Vec<&'static str>> {
        QueryCoordinator::new(Duration::ZERO)
    }

    #[test]
    fn test_disabled_key_never_fetches() {
        let mut coord = coordinator();

        assert!(coord.set_key(key(""), false).is_none());
        assert_eq!(coord.snapshot().status, FetchStatus::Idle);
        assert!(coord.refetch().is_none());
        assert!(coord.key().is_none());
    }

    #[test]
    fn test_enabling_starts_one_fetch() {
        let mut coord = coordinator();

        let ticket = coord.set_key(key("cats"), true).expect("fetch should start");
        assert_eq!(ticket.key(), &key("cats"));
        assert!(coord.snapshot().is_loading());

        // Same key again while in flight: no second request
        assert!(coord.set_key(key("cats"), true).is_none());
        assert!(coord.refetch().is_none());

        assert_eq!(coord.settle(ticket, Ok::<_, String>(vec!["1"])), Settled::Applied);
        assert!(coord.snapshot().is_success());
        assert_eq!(coord.snapshot().data, Some(vec!["1"]));
    }

    #[test]
    fn test_late_result_for_abandoned_key_is_not_applied() {
        let mut coord = coordinator();

        let cats = coord.set_key(key("cats"), true).unwrap();
        let dogs = coord.set_key(key("dogs"), true).unwrap();
        assert!(dogs.generation() > cats.generation());

        assert_eq!(coord.settle(dogs, Ok::<_, String>(vec!["dog"])), Settled::Applied);
        assert_eq!(coord.settle(cats, Ok::<_, String>(vec!["cat"])), Settled::Stale);

        assert_eq!(coord.snapshot().data, Some(vec!["dog"]));
        assert!(coord.snapshot().is_success());
    }

    #[test]
    fn test_late_result_before_new_fetch_settles_is_not_applied() {
        let mut coord = coordinator();

        let cats = coord.set_key(key("cats"), true).unwrap();
        let _dogs = coord.set_key(key("dogs"), true).unwrap();

        assert_eq!(coord.settle(cats, Ok::<_, String>(vec!["cat"])), Settled::Stale);
        assert!(coord.snapshot().is_loading());
        assert_eq!(coord.snapshot().data, None);
    }

    #[test]
    fn test_returning_to_in_flight_key_adopts_fetch() {
        let mut coord = coordinator();

        let cats = coord.set_key(key("cats"), true).unwrap();
        let _dogs = coord.set_key(key("dogs"), true).unwrap();
        assert!(coord.set_key(key("cats"), true).is_none());
        assert!(coord.snapshot().is_loading());

        assert_eq!(coord.settle(cats, Ok::<_, String>(vec!["cat"])), Settled::Applied);
        assert_eq!(coord.snapshot().data, Some(vec!["cat"]));
    }

    #[test]
    fn test_error_keeps_previous_data() {
        let mut coord = coordinator();

        let first = coord.set_key(key("cats"), true).unwrap();
        coord.settle(first, Ok::<_, String>(vec!["1", "2"]));

        let retry = coord.refetch().expect("refetch should start a fetch");
        assert!(coord.snapshot().is_loading());
        assert_eq!(coord.snapshot().data, Some(vec!["1", "2"]));

        coord.settle(retry, Err::<Vec<&str>, _>("connection refused"));
        assert!(coord.snapshot().is_error());
        assert_eq!(coord.snapshot().data, Some(vec!["1", "2"]));
        assert_eq!(coord.snapshot().error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_refetch_after_success_starts_exactly_one_fetch() {
        let mut coord = coordinator();

        let first = coord.set_key(key("cats"), true).unwrap();
        coord.settle(first.clone(), Ok::<_, String>(vec!["1"]));

        let again = coord.refetch().unwrap();
        assert_ne!(again.generation(), first.generation());
        assert!(coord.refetch().is_none());
        assert!(coord.is_fetching(&key("cats")));
    }

    #[test]
    fn test_disable_resets_to_idle() {
        let mut coord = coordinator();

        let ticket = coord.set_key(key("cats"), true).unwrap();
        coord.set_key(key(""), false);
        assert_eq!(coord.snapshot(), &QuerySnapshot::idle());

        // Result lands after the query was cleared
        assert_eq!(coord.settle(ticket, Ok::<_, String>(vec!["1"])), Settled::Stale);
        assert_eq!(coord.snapshot().status, FetchStatus::Idle);
    }

    #[test]
    fn test_reenabling_same_key_fetches_again() {
        let mut coord = coordinator();

        let ticket = coord.set_key(key("cats"), true).unwrap();
        coord.settle(ticket, Ok::<_, String>(vec!["1"]));
        coord.set_key(key(""), false);

        assert!(coord.set_key(key("cats"), true).is_some());
        // Cached payload is visible while the refresh runs
        assert_eq!(coord.snapshot().data, Some(vec!["1"]));
        assert!(coord.snapshot().is_loading());
    }

    #[test]
    fn test_fresh_cache_entry_skips_fetch() {
        let mut coord = QueryCoordinator::new(Duration::from_secs(60));
        let start = Instant::now();

        let cats = coord.set_key_at(key("cats"), true, start).unwrap();
        coord.settle_at(cats, Ok::<_, String>(vec!["cat"]), start);
        let dogs = coord.set_key_at(key("dogs"), true, start).unwrap();
        coord.settle_at(dogs, Ok::<_, String>(vec!["dog"]), start);

        let later = start + Duration::from_secs(10);
        assert!(coord.set_key_at(key("cats"), true, later).is_none());
        assert!(coord.snapshot().is_success());
        assert_eq!(coord.snapshot().data, Some(vec!["cat"]));

        let much_later = start + Duration::from_secs(120);
        assert!(coord.set_key_at(key("dogs"), true, much_later).is_some());
    }

    #[test]
    fn test_abandoned_result_is_cached() {
        let mut coord = QueryCoordinator::new(Duration::from_secs(60));
        let start = Instant::now();

        let cats = coord.set_key_at(key("cats"), true, start).unwrap();
        let _dogs = coord.set_key_at(key("dogs"), true, start).unwrap();
        coord.settle_at(cats, Ok::<_, String>(vec!["cat"]), start);

        assert!(coord.set_key_at(key("cats"), true, start).is_none());
        assert_eq!(coord.snapshot().data, Some(vec!["cat"]));
    }
}
