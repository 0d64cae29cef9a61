//! Per-user exclusive access for balance check-then-append sequences.

use std::sync::Arc;

use dashmap::DashMap;
use tally_shared::types::UserId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of one async mutex per paying account.
///
/// Serializes operations within a single process only. Entries are never
/// evicted; the map grows with the number of distinct payers.
#[derive(Debug, Default)]
pub struct UserLocks {
    locks: DashMap<UserId, Arc<Mutex<()>>>,
}

impl UserLocks {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `user_id`'s balance.
    ///
    /// The guard releases the lock when dropped.
    pub async fn acquire(&self, user_id: UserId) -> OwnedMutexGuard<()> {
        // Clone the Arc so the shard guard is released before awaiting.
        let lock = self.locks.entry(user_id).or_default().value().clone();
        lock.lock_owned().await
    }

    /// Number of accounts that have been locked at least once.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Returns true if no account has been locked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_user_is_exclusive() {
        let locks = UserLocks::new();
        let user = UserId::new();

        let guard = locks.acquire(user).await;
        let second = tokio::time::timeout(Duration::from_millis(50), locks.acquire(user)).await;
        assert!(second.is_err(), "second acquire should wait");

        drop(guard);
        let third = tokio::time::timeout(Duration::from_millis(50), locks.acquire(user)).await;
        assert!(third.is_ok());
    }

    #[tokio::test]
    async fn test_different_users_do_not_block() {
        let locks = UserLocks::new();

        let _first = locks.acquire(UserId::new()).await;
        let second =
            tokio::time::timeout(Duration::from_millis(50), locks.acquire(UserId::new())).await;

        assert!(second.is_ok());
        assert_eq!(locks.len(), 2);
    }
}
