//! Trait describing a runnable client front-end.
use anyhow::Result;
use async_trait::async_trait;
use leaderboard_runtime::LeaderboardHandle;

/// Frontend abstraction for UI layers.
///
/// Frontends talk to the runtime through [`LeaderboardHandle`] only:
/// - Watch the staff and clients boards
/// - Submit entries
/// - Subscribe to events (Leaderboard, Submission)
///
/// Frontends do NOT own the Runtime; its lifecycle stays with the caller.
#[async_trait]
pub trait Frontend: Send {
    /// Run the frontend event loop until the user quits.
    async fn run(&mut self, handle: LeaderboardHandle) -> Result<()>;
}
