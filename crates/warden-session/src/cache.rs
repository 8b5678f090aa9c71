//! Single-entry session cache with forced synchronization.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{RwLock, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

use warden_types::{SessionRecord, SessionSource, SourceError};

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::status::SessionStatus;

/// Last successful fetch result.
#[derive(Debug, Clone)]
struct Committed {
    /// Record returned by the source. `None` is the unauthenticated state.
    record: Option<SessionRecord>,

    /// When the fetch committed.
    fetched_at: Instant,
}

/// Terminal state of one fetch, published on its watch channel.
#[derive(Debug, Clone)]
enum FetchOutcome {
    /// The result was committed to the cache.
    Committed,

    /// The fetch failed; the error was recorded.
    Failed(Arc<SourceError>),

    /// A later invalidation made the result unusable; it was discarded.
    Superseded,
}

/// Bookkeeping for the at-most-one fetch in flight.
struct Inflight {
    /// Whether this fetch was started by a forced synchronization.
    forced: bool,

    /// Publishes the fetch outcome to waiters.
    done: watch::Receiver<Option<FetchOutcome>>,

    /// Handle used to cancel the fetch.
    task: JoinHandle<()>,
}

/// Inner state protected by RwLock.
struct CacheInner {
    /// Last successful fetch, if any.
    committed: Option<Committed>,

    /// Set by forced synchronization, cleared by the next successful
    /// commit. While set, the committed record is not exposed.
    invalidated: bool,

    /// Failure recorded by the most recent fetch, cleared on success.
    last_error: Option<Arc<SourceError>>,

    /// Bumped on every invalidation and teardown. A fetch commits only if
    /// its epoch is still current.
    epoch: u64,

    /// The single fetch in flight, if any.
    inflight: Option<Inflight>,

    /// Activity counters.
    stats: SyncStats,
}

/// Session cache holding at most one record: the current authenticated
/// user.
///
/// The cache fetches lazily through its [`SessionSource`], de-duplicates
/// concurrent fetches, and exposes [`sync`](SessionCache::sync) for the
/// moments a caller knows server-side state changed out of band.
///
/// Cloning is cheap; all clones share the same entry.
pub struct SessionCache<S: SessionSource> {
    inner: Arc<RwLock<CacheInner>>,
    source: Arc<S>,
    config: CacheConfig,
}

impl<S: SessionSource + 'static> SessionCache<S> {
    /// Create a new session cache over the given source.
    pub fn new(config: CacheConfig, source: S) -> Self {
        Self::with_shared_source(config, Arc::new(source))
    }

    /// Create a new session cache over an already-shared source.
    pub fn with_shared_source(config: CacheConfig, source: Arc<S>) -> Self {
        let inner = CacheInner {
            committed: None,
            invalidated: false,
            last_error: None,
            epoch: 0,
            inflight: None,
            stats: SyncStats::default(),
        };

        Self {
            inner: Arc::new(RwLock::new(inner)),
            source,
            config,
        }
    }

    /// Get the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Point-in-time view of the cached session.
    ///
    /// Spawns a background fetch when the entry is missing, stale per
    /// policy, or invalidated, unless one is already in flight. Never waits
    /// for the fetch: callers observe `is_loading` and read again once it
    /// clears. A record that is merely stale stays visible while its
    /// revalidation is in flight.
    pub async fn read(&self) -> SessionStatus {
        let mut inner = self.inner.write().await;

        if inner.inflight.is_none() && self.needs_fetch(&inner) {
            self.spawn_fetch(&mut inner, false);
        }

        self.snapshot(&inner)
    }

    /// Current status without triggering a fetch.
    pub async fn peek(&self) -> SessionStatus {
        let inner = self.inner.read().await;
        self.snapshot(&inner)
    }

    /// Force synchronization with the remote source.
    ///
    /// Invalidates the entry immediately so concurrent readers stop seeing
    /// it as fresh, fetches regardless of any standing staleness window,
    /// and resolves only after the replacement is committed. A read issued
    /// after this resolves observes the post-refresh value, never the
    /// pre-refresh one.
    ///
    /// An in-flight read-triggered fetch is cancelled and restarted;
    /// concurrent forced synchronizations share one fetch and all resolve
    /// no earlier than its completion.
    ///
    /// A transport failure surfaces as [`Error::Fetch`] and leaves the
    /// entry invalidated: the prior record's authenticated status is not
    /// reused. The source reporting no session resolves `Ok` with an
    /// unauthenticated status.
    pub async fn sync(&self) -> Result<SessionStatus> {
        let mut rx = {
            let mut inner = self.inner.write().await;
            inner.stats.forced_syncs += 1;

            match &inner.inflight {
                Some(inflight) if inflight.forced => {
                    trace!("joining in-flight forced fetch");
                    inflight.done.clone()
                }
                _ => {
                    if let Some(stale) = inner.inflight.take() {
                        debug!("cancelling in-flight fetch for forced synchronization");
                        stale.task.abort();
                    }
                    inner.epoch += 1;
                    inner.invalidated = true;
                    self.spawn_fetch(&mut inner, true)
                }
            }
        };

        // Wait for the fetch to publish its outcome. The sender side drops
        // without publishing only if the task is aborted mid-flight.
        let outcome = loop {
            let current = rx.borrow_and_update().clone();
            if let Some(outcome) = current {
                break outcome;
            }
            if rx.changed().await.is_err() {
                return Err(Error::Interrupted);
            }
        };

        match outcome {
            FetchOutcome::Committed => {
                let inner = self.inner.read().await;
                Ok(self.snapshot(&inner))
            }
            FetchOutcome::Failed(err) => Err(Error::Fetch(err)),
            FetchOutcome::Superseded => Err(Error::Interrupted),
        }
    }

    /// Drop trust in the cached record without fetching.
    ///
    /// The next read spawns a fresh fetch. Prefer
    /// [`sync`](SessionCache::sync) when the caller needs the refreshed
    /// record before proceeding.
    pub async fn invalidate(&self) {
        let mut inner = self.inner.write().await;
        inner.epoch += 1;
        inner.invalidated = true;
        if let Some(inflight) = inner.inflight.take() {
            debug!("cancelling in-flight fetch on invalidation");
            inflight.task.abort();
        }
    }

    /// Tear down the cache: abort any in-flight fetch and clear the entry.
    ///
    /// A fetch completing after teardown discards its result without
    /// mutating the cache.
    pub async fn shutdown(&self) {
        let mut inner = self.inner.write().await;
        inner.epoch += 1;
        if let Some(inflight) = inner.inflight.take() {
            debug!("aborting in-flight fetch at teardown");
            inflight.task.abort();
        }
        inner.committed = None;
        inner.invalidated = false;
        inner.last_error = None;
        debug!("session cache torn down");
    }

    /// Activity counters since construction.
    pub async fn stats(&self) -> SyncStats {
        self.inner.read().await.stats.clone()
    }

    /// Whether the entry must be re-established from the source.
    fn needs_fetch(&self, inner: &CacheInner) -> bool {
        if inner.invalidated {
            return true;
        }
        match &inner.committed {
            Some(committed) => !self.config.staleness.is_fresh(committed.fetched_at),
            None => true,
        }
    }

    /// Build the consumer-facing snapshot from the current state.
    ///
    /// The committed record is exposed unless the entry is invalidated, or
    /// the most recent fetch failed and the record has left its validity
    /// window.
    fn snapshot(&self, inner: &CacheInner) -> SessionStatus {
        let user = inner.committed.as_ref().and_then(|committed| {
            if inner.invalidated {
                return None;
            }
            if inner.last_error.is_some() && !self.config.staleness.is_fresh(committed.fetched_at)
            {
                return None;
            }
            committed.record.clone()
        });

        SessionStatus {
            user,
            is_loading: inner.inflight.is_some(),
            error: inner.last_error.clone(),
        }
    }

    /// Spawn the single fetch for the current epoch and register it as
    /// in-flight. The caller holds the write lock.
    fn spawn_fetch(
        &self,
        inner: &mut CacheInner,
        forced: bool,
    ) -> watch::Receiver<Option<FetchOutcome>> {
        let (tx, rx) = watch::channel(None);
        let epoch = inner.epoch;
        inner.stats.fetches += 1;

        let source = Arc::clone(&self.source);
        let state = Arc::downgrade(&self.inner);

        debug!(forced, epoch, "spawning session fetch");

        let task = tokio::spawn(async move {
            let result = source.fetch_current().await;

            // The cache may have been dropped while the fetch was in
            // flight; its result is then discarded wholesale.
            let Some(state) = state.upgrade() else {
                return;
            };
            let mut inner = state.write().await;

            if inner.epoch != epoch {
                trace!(epoch, current = inner.epoch, "discarding superseded fetch result");
                let _ = tx.send(Some(FetchOutcome::Superseded));
                return;
            }

            inner.inflight = None;
            match result {
                Ok(record) => {
                    debug!(authenticated = record.is_some(), "session fetch committed");
                    inner.committed = Some(Committed {
                        record,
                        fetched_at: Instant::now(),
                    });
                    inner.invalidated = false;
                    inner.last_error = None;
                    let _ = tx.send(Some(FetchOutcome::Committed));
                }
                Err(err) => {
                    debug!(error = %err, "session fetch failed");
                    let err = Arc::new(err);
                    inner.stats.fetch_failures += 1;
                    inner.last_error = Some(Arc::clone(&err));
                    let _ = tx.send(Some(FetchOutcome::Failed(err)));
                }
            }
        });

        inner.inflight = Some(Inflight {
            forced,
            done: rx.clone(),
            task,
        });

        rx
    }
}

impl<S: SessionSource> Clone for SessionCache<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            source: Arc::clone(&self.source),
            config: self.config.clone(),
        }
    }
}

/// Cache activity counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Fetches started, passive and forced.
    pub fetches: u64,

    /// Fetches that failed.
    pub fetch_failures: u64,

    /// Forced synchronization calls.
    pub forced_syncs: u64,
}
