//! Staleness policy for the cached session.

use std::time::{Duration, Instant};

/// Rule deciding when the cached record must be re-fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StalenessPolicy {
    /// Re-fetch once the record is older than the given duration.
    TimeToLive(Duration),

    /// Every read re-fetches. The "no caching" variant: only the fetch a
    /// read itself triggered is trusted as fresh.
    AlwaysStale,

    /// The record stays fresh until explicitly synchronized.
    NeverStale,
}

impl StalenessPolicy {
    /// Check whether a record fetched at `fetched_at` is still fresh.
    pub fn is_fresh(&self, fetched_at: Instant) -> bool {
        match self {
            StalenessPolicy::TimeToLive(ttl) => fetched_at.elapsed() <= *ttl,
            StalenessPolicy::AlwaysStale => false,
            StalenessPolicy::NeverStale => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_ttl_expires() {
        let policy = StalenessPolicy::TimeToLive(Duration::from_millis(10));
        let fetched_at = Instant::now();

        assert!(policy.is_fresh(fetched_at));

        thread::sleep(Duration::from_millis(20));

        assert!(!policy.is_fresh(fetched_at));
    }

    #[test]
    fn test_always_stale() {
        let policy = StalenessPolicy::AlwaysStale;
        assert!(!policy.is_fresh(Instant::now()));
    }

    #[test]
    fn test_never_stale() {
        let policy = StalenessPolicy::NeverStale;
        let fetched_at = Instant::now();

        thread::sleep(Duration::from_millis(10));

        assert!(policy.is_fresh(fetched_at));
    }
}
