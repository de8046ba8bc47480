use chrono::{DateTime, Utc};
use std::time::Duration;

/// A cached value together with its write time
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub key: String,

    pub data: T,

    /// When the value was stored
    pub created_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Creates an entry stamped with the current time
    pub fn new(key: String, data: T) -> Self {
        Self {
            key,
            data,
            created_at: Utc::now(),
        }
    }

    /// Time elapsed since the entry was stored
    ///
    /// A timestamp in the future (clock adjustments) counts as zero.
    pub fn age(&self) -> Duration {
        (Utc::now() - self.created_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Returns true if the entry is younger than `freshness`
    pub fn is_fresh(&self, freshness: Duration) -> bool {
        self.age() < freshness
    }
}
