//! Optimistic concurrency check for partial syncs

use tracing::info;

use crate::action::SyncAction;

/// How a sync request is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Clear every chunk and asset entry, then rebuild all entities
    Full,
    /// Rebuild only what the action names
    Incremental(SyncAction),
    /// The stored theme state is unknown or stale; nothing is written
    Skip,
}

/// Decides between full, incremental and skipped syncs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommitGate;

impl CommitGate {
    /// `all` always rebuilds everything. Any other action is applied
    /// incrementally only when the payload is exactly one commit ahead of
    /// the stored state.
    pub fn decide(payload_commit: u64, stored_commit: Option<u64>, action: SyncAction) -> Decision {
        if action == SyncAction::All {
            info!(commit = payload_commit, "Full sync requested");
            return Decision::Full;
        }

        let follows = match (payload_commit.checked_sub(1), stored_commit) {
            (Some(previous), Some(stored)) => previous == stored,
            _ => false,
        };

        if follows {
            info!(%action, commit = payload_commit, "Incremental sync");
            Decision::Incremental(action)
        } else {
            info!(
                %action,
                commit = payload_commit,
                stored = ?stored_commit,
                "Commit does not follow stored state, skipping"
            );
            Decision::Skip
        }
    }
}
