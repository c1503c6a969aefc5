//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use mixed_doubles::session::{DEFAULT_MAX_SESSIONS, MAX_ROUNDS};
use std::net::SocketAddr;

/// Bind address used when neither `SERVER_BIND` nor `PORT` is set
const DEFAULT_BIND: &str = "127.0.0.1:5001";

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Prometheus scrape listener, disabled when `None`
    pub metrics_bind: Option<SocketAddr>,
    /// Maximum tournaments held in memory
    pub max_sessions: usize,
    /// Most rounds a request may ask for
    pub max_rounds: usize,
    /// Values used for fields a tournament request leaves out
    pub tournament_defaults: TournamentDefaultsConfig,
}

/// Default tournament request values
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentDefaultsConfig {
    /// Courts in use
    pub courts: usize,
    /// Rounds to schedule
    pub rounds: usize,
    /// Players taking part
    pub total_players: usize,
    /// Round length in minutes
    pub round_duration: u32,
    /// Rating preference weight
    pub rating_factor: f64,
}

impl Default for TournamentDefaultsConfig {
    fn default() -> Self {
        Self {
            courts: 2,
            rounds: 6,
            total_players: 8,
            round_duration: 13,
            rating_factor: 3.0,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `metrics_bind_override` - Optional metrics address override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if an address variable is set but cannot be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        metrics_bind_override: Option<SocketAddr>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(
            |key| std::env::var(key).ok(),
            bind_override,
            metrics_bind_override,
        )
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(
        lookup: F,
        bind_override: Option<SocketAddr>,
        metrics_bind_override: Option<SocketAddr>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Bind address: CLI, then SERVER_BIND, then PORT on all interfaces
        let bind = match bind_override {
            Some(addr) => addr,
            None => match parse_addr(&lookup, "SERVER_BIND")? {
                Some(addr) => addr,
                None => match lookup("PORT") {
                    Some(port) => {
                        let port: u16 = port.parse().map_err(|_| ConfigError::Invalid {
                            var: "PORT".to_string(),
                            reason: format!("'{}' is not a valid port", port),
                        })?;
                        SocketAddr::from(([0, 0, 0, 0], port))
                    }
                    None => DEFAULT_BIND.parse().map_err(|_| ConfigError::Invalid {
                        var: "SERVER_BIND".to_string(),
                        reason: "built-in default is not a socket address".to_string(),
                    })?,
                },
            },
        };

        let metrics_bind = match metrics_bind_override {
            Some(addr) => Some(addr),
            None => parse_addr(&lookup, "METRICS_BIND")?,
        };

        let defaults = TournamentDefaultsConfig::default();
        let tournament_defaults = TournamentDefaultsConfig {
            courts: parse_or(&lookup, "DEFAULT_COURTS", defaults.courts),
            rounds: parse_or(&lookup, "DEFAULT_ROUNDS", defaults.rounds),
            total_players: parse_or(&lookup, "DEFAULT_TOTAL_PLAYERS", defaults.total_players),
            round_duration: parse_or(&lookup, "DEFAULT_ROUND_DURATION", defaults.round_duration),
            rating_factor: parse_or(&lookup, "DEFAULT_RATING_FACTOR", defaults.rating_factor),
        };

        Ok(ServerConfig {
            bind,
            metrics_bind,
            max_sessions: parse_or(&lookup, "MAX_SESSIONS", DEFAULT_MAX_SESSIONS),
            max_rounds: parse_or(&lookup, "MAX_ROUNDS", MAX_ROUNDS),
            tournament_defaults,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_sessions == 0 {
            return Err(ConfigError::Invalid {
                var: "MAX_SESSIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.max_rounds == 0 || self.max_rounds > MAX_ROUNDS {
            return Err(ConfigError::Invalid {
                var: "MAX_ROUNDS".to_string(),
                reason: format!("Must be between 1 and {}", MAX_ROUNDS),
            });
        }

        let defaults = &self.tournament_defaults;
        if defaults.courts == 0 {
            return Err(ConfigError::Invalid {
                var: "DEFAULT_COURTS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if defaults.rounds == 0 {
            return Err(ConfigError::Invalid {
                var: "DEFAULT_ROUNDS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if defaults.rounds > self.max_rounds {
            return Err(ConfigError::Invalid {
                var: "DEFAULT_ROUNDS".to_string(),
                reason: format!("Must not exceed MAX_ROUNDS ({})", self.max_rounds),
            });
        }

        let needed = defaults.courts.saturating_mul(4);
        if defaults.total_players < needed {
            return Err(ConfigError::Invalid {
                var: "DEFAULT_TOTAL_PLAYERS".to_string(),
                reason: format!(
                    "Must be at least {} to fill {} courts",
                    needed, defaults.courts
                ),
            });
        }

        if !defaults.rating_factor.is_finite() {
            return Err(ConfigError::Invalid {
                var: "DEFAULT_RATING_FACTOR".to_string(),
                reason: "Must be a finite number".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

fn parse_addr<F>(lookup: &F, key: &str) -> Result<Option<SocketAddr>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value.parse().map(Some).map_err(|_| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("'{}' is not a socket address", value),
        }),
        None => Ok(None),
    }
}

/// Helper to parse a variable with default fallback
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
