//! Client builder with dependency injection pattern.

use anyhow::{Context, Result};
use leaderboard_runtime::Runtime;

use crate::{Client, Frontend};

/// Builder for constructing a Client with proper validation.
///
/// Runtime and frontend are both required; `build()` fails fast when either
/// is missing.
#[derive(Default)]
pub struct ClientBuilder {
    runtime: Option<Runtime>,
    frontend: Option<Box<dyn Frontend>>,
}

impl ClientBuilder {
    /// Create a new ClientBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the runtime (required).
    pub fn runtime(mut self, runtime: Runtime) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Set the frontend (required).
    ///
    /// The frontend receives a LeaderboardHandle, never the runtime itself.
    pub fn frontend(mut self, frontend: impl Frontend + 'static) -> Self {
        self.frontend = Some(Box::new(frontend));
        self
    }

    /// Build the Client.
    pub fn build(self) -> Result<Client> {
        let runtime = self
            .runtime
            .context("Runtime is required. Use .runtime() to set it.")?;

        let frontend = self
            .frontend
            .context("Frontend is required. Use .frontend() to set it.")?;

        Ok(Client { runtime, frontend })
    }
}
