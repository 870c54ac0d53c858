use chrono::{DateTime, Duration, Utc};

#[derive(Clone, Debug)]
pub struct CacheEntry<T> {
    pub value: T,
    pub expires_at: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    pub fn new(value: T, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Utc::now() + ttl,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// The cached value while it is still fresh.
    pub fn fresh(&self) -> Option<&T> {
        (!self.is_expired()).then_some(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry() {
        let live = CacheEntry::new(1, Duration::minutes(5));
        assert_eq!(live.fresh(), Some(&1));
        let stale = CacheEntry::new(2, Duration::seconds(-1));
        assert!(stale.is_expired());
        assert_eq!(stale.fresh(), None);
    }
}
