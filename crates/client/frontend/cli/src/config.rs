//! CLI-specific configuration for the terminal frontend.
use std::env;

/// Terminal frontend configuration.
///
/// This contains settings specific to the terminal interface,
/// separate from cross-frontend client configuration.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// Rows printed per board.
    pub board_limit: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self { board_limit: 10 }
    }
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LEADERBOARD_BOARD_LIMIT` - Rows shown per board (default: 10)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(limit) = read_env::<usize>("LEADERBOARD_BOARD_LIMIT") {
            config.board_limit = limit.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
