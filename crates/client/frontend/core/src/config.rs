//! Frontend configuration structures and loaders.
//!
//! This module contains UI-specific configuration that is shared across
//! different frontend implementations (CLI, GUI, etc.).

use std::env;

use leaderboard_core::InputMode;

/// Frontend-specific configuration.
#[derive(Clone, Debug, Default)]
pub struct FrontendConfig {
    /// Lap-time input mode a fresh form starts in.
    pub input_mode: InputMode,
    pub messages: MessageConfig,
}

impl FrontendConfig {
    pub const fn new(input_mode: InputMode, messages: MessageConfig) -> Self {
        Self {
            input_mode,
            messages,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `LEADERBOARD_INPUT_MODE` - `split` or `text` (default: split)
    /// - `LEADERBOARD_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(mode) = read_env::<InputMode>("LEADERBOARD_INPUT_MODE") {
            config.input_mode = mode;
        }

        if let Some(capacity) = read_env::<usize>("LEADERBOARD_MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(1);
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
