use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

/// In-process TTL cache holding outstanding password reset tokens.
///
/// Entries map the opaque token string to the owning user id. A token is
/// redeemable exactly once: `take` removes the entry atomically, so of two
/// concurrent redemptions only one can observe the mapping.
pub struct ResetTokenCache {
    /// token -> (user_id, inserted_at)
    entries: DashMap<String, (Uuid, Instant)>,
    ttl: Duration,
}

impl ResetTokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Store a freshly issued token for a user.
    pub fn insert(&self, token: String, user_id: Uuid) {
        self.entries.insert(token, (user_id, Instant::now()));
    }

    /// Redeem a token, removing it in the same step. Returns the user id if
    /// the token exists and is still inside its TTL window, `None` otherwise.
    /// An expired entry is discarded on the way out.
    pub fn take(&self, token: &str) -> Option<Uuid> {
        let (_, (user_id, inserted_at)) = self.entries.remove(token)?;
        if inserted_at.elapsed() > self.ttl {
            return None;
        }
        Some(user_id)
    }

    /// Evict entries past their TTL. `take` never returns expired entries;
    /// this only keeps the map from accumulating dead tokens.
    pub fn cleanup(&self) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, (_, inserted_at)| inserted_at.elapsed() <= ttl);
    }
}
