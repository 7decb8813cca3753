use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-team mutual exclusion for membership mutations.
///
/// Every action that checks the manager invariant and then commits holds the
/// team's guard for the whole sequence, so two requests cannot both pass the
/// check before either one writes. Locks are process-local.
///
/// Entries live as long as the table. Team ids are never reused, so a
/// deleted team's entry only ever hands out guards to actions that will
/// find the team gone.
///
/// Cloning shares the lock table.
#[derive(Clone, Default)]
pub struct TeamLocks {
    inflight: Arc<Mutex<HashMap<i32, Arc<Mutex<()>>>>>,
}

impl TeamLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and returns the guard for `team_id`.
    pub async fn acquire(&self, team_id: i32) -> OwnedMutexGuard<()> {
        let lock = {
            let mut inflight = self.inflight.lock().await;
            Arc::clone(
                inflight
                    .entry(team_id)
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_same_team_is_exclusive() {
        let locks = TeamLocks::new();
        let guard = locks.acquire(1).await;

        let contender = locks.clone();
        let waiting = tokio::spawn(async move {
            let _guard = contender.acquire(1).await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiting.is_finished());

        drop(guard);
        waiting.await.unwrap();
    }

    #[tokio::test]
    async fn test_different_teams_do_not_block() {
        let locks = TeamLocks::new();
        let _first = locks.acquire(1).await;

        let second = tokio::time::timeout(Duration::from_millis(100), locks.acquire(2)).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_entry_is_reused() {
        let locks = TeamLocks::new();
        drop(locks.acquire(7).await);
        drop(locks.acquire(7).await);

        assert_eq!(locks.inflight.lock().await.len(), 1);
    }
}
