//! Server configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Server settings, loaded from defaults with `MOOD_*` environment
/// overrides (e.g. `MOOD_BIND_ADDR=127.0.0.1:9000`).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Listen address
    pub bind_addr: String,
    /// Rate limit replenish interval (seconds per request)
    pub rate_limit_per_second: u64,
    /// Rate limit burst size
    pub rate_limit_burst: u32,
    /// Guardian alert cooldown (seconds); 0 re-fires every evaluation
    pub guardian_cooldown_seconds: u64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("bind_addr", "0.0.0.0:8080")?
            .set_default("rate_limit_per_second", 2i64)?
            .set_default("rate_limit_burst", 5i64)?
            .set_default("guardian_cooldown_seconds", 0i64)?
            .add_source(Environment::with_prefix("MOOD"))
            .build()?
            .try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            rate_limit_per_second: 2,
            rate_limit_burst: 5,
            guardian_cooldown_seconds: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.rate_limit_burst, 5);
        assert_eq!(settings.guardian_cooldown_seconds, 0);
    }
}
