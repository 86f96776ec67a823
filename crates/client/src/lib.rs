//! Top-level client orchestrating the runtime and a frontend.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ Runtime (storage, live boards, submissions)
//!   └─→ Frontend (UI layer - CLI, GUI, etc.)
//! ```
//!
//! The client is the composition root: it owns the runtime, hands the
//! frontend a handle, and shuts the runtime down once the frontend returns.

mod builder;

pub use builder::ClientBuilder;

// Re-export Frontend trait from client-frontend-core
pub use client_frontend_core::Frontend;

use anyhow::Result;
use leaderboard_runtime::Runtime;

/// Top-level client container.
///
/// # Lifecycle
///
/// 1. `Client::builder()` takes an already-built runtime and a frontend
/// 2. `Client::run()` transfers control to the frontend
/// 3. When the frontend returns, both live queries are closed
pub struct Client {
    runtime: Runtime,
    frontend: Box<dyn Frontend>,
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Run the frontend until it quits, then shut the runtime down.
    ///
    /// The runtime is shut down even when the frontend fails; the frontend
    /// error takes precedence.
    pub async fn run(self) -> Result<()> {
        let Client {
            runtime,
            mut frontend,
        } = self;

        let result = frontend.run(runtime.handle()).await;

        if let Err(e) = &result {
            tracing::error!("Frontend error: {}", e);
        }

        runtime.shutdown().await?;
        tracing::info!("Runtime shut down");

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use leaderboard_core::{Category, EntryDraft, LapTimeInput};
    use leaderboard_runtime::{InMemoryEntryRepository, LeaderboardHandle};

    struct ScriptedFrontend {
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Frontend for ScriptedFrontend {
        async fn run(&mut self, handle: LeaderboardHandle) -> Result<()> {
            let draft = EntryDraft {
                name: "A. Driver".into(),
                company: "Acme".into(),
                lap_time: LapTimeInput::FreeText("1:23.456".into()),
                date: "2024-05-01".into(),
                category: Category::Staff,
            };
            handle.submit(&draft).await?;

            let mut staff = handle.watch(Category::Staff);
            let board = tokio::time::timeout(
                Duration::from_secs(2),
                staff.wait_for(|board| !board.is_empty()),
            )
            .await??
            .clone();

            let mut seen = self.seen.lock().unwrap();
            seen.extend(board.lap_times().into_iter().map(String::from));
            Ok(())
        }
    }

    #[tokio::test]
    async fn frontend_drives_runtime_then_runtime_stops() {
        let repo = Arc::new(InMemoryEntryRepository::new());
        let runtime = Runtime::builder()
            .shared_repository(repo.clone())
            .build()
            .await
            .unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        Client::builder()
            .runtime(runtime)
            .frontend(ScriptedFrontend { seen: seen.clone() })
            .build()
            .unwrap()
            .run()
            .await
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), ["1:23.456"]);
        assert_eq!(repo.subscriber_count(Category::Staff), 0);
        assert_eq!(repo.subscriber_count(Category::Clients), 0);
    }

    #[test]
    fn builder_requires_runtime() {
        let err = Client::builder().build().err().unwrap();
        assert!(err.to_string().contains("Runtime is required"));
    }
}
