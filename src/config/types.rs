use serde::{Deserialize, Serialize};

use crate::games::GameKind;
use crate::rate_limit::RateLimitConfig;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Throttle applied to every player's delayed view.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_filter")]
    pub filter: String,
}

/// Settings for the headless demo match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Game to play (default: tictactoe).
    #[serde(default)]
    pub game: GameKind,
    /// Number of player turns before stopping (default: 6).
    #[serde(default = "default_turns")]
    pub turns: u32,
}

fn default_filter() -> String {
    "info".to_string()
}

fn default_turns() -> u32 {
    6
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            game: GameKind::default(),
            turns: default_turns(),
        }
    }
}
