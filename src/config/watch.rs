//! `[watch]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// `[watch]` section in weft.toml - rebuild-on-change settings.
///
/// # Example
/// ```toml
/// [watch]
/// debounce_ms = 500
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    /// Quiet period after the last file event before rebuilding.
    #[serde(default = "defaults::watch::debounce_ms")]
    #[educe(Default = defaults::watch::debounce_ms())]
    pub debounce_ms: u64,

    /// Minimum gap between two rebuilds. Events arriving sooner are
    /// queued until it ends.
    #[serde(default = "defaults::watch::cooldown_ms")]
    #[educe(Default = defaults::watch::cooldown_ms())]
    pub cooldown_ms: u64,
}

impl WatchConfig {
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub const fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}
