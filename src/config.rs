use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

/// Complete application configuration, loaded from environment variables or
/// default values.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub planner: PlannerConfig,
}

impl AppConfig {
    /// Creates a configuration from the currently available environment
    /// variables.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            planner: PlannerConfig::from_env(),
        }
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    bind_ip: IpAddr,
    display_host: String,
    port: u16,
}

impl ApiConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8080;

    fn from_env() -> Self {
        let host_value =
            env_string("PACKPLAN_API_HOST").unwrap_or_else(|| Self::DEFAULT_HOST.to_string());
        let (bind_ip, effective_host) = match host_value.parse::<IpAddr>() {
            Ok(ip) => (ip, host_value),
            Err(err) => {
                eprintln!(
                    "⚠️ Could not parse PACKPLAN_API_HOST ('{}'): {}. Using {}.",
                    host_value,
                    err,
                    Self::DEFAULT_HOST
                );
                (
                    Self::DEFAULT_HOST
                        .parse::<IpAddr>()
                        .expect("Default host must be valid"),
                    Self::DEFAULT_HOST.to_string(),
                )
            }
        };

        let port = match env_string("PACKPLAN_API_PORT") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(value) if value != 0 => value,
                Ok(_) => {
                    eprintln!(
                        "⚠️ PACKPLAN_API_PORT must not be 0. Using {}.",
                        Self::DEFAULT_PORT
                    );
                    Self::DEFAULT_PORT
                }
                Err(err) => {
                    eprintln!(
                        "⚠️ Could not parse PACKPLAN_API_PORT ('{}'): {}. Using {}.",
                        raw,
                        err,
                        Self::DEFAULT_PORT
                    );
                    Self::DEFAULT_PORT
                }
            },
            None => Self::DEFAULT_PORT,
        };

        Self {
            bind_ip,
            display_host: effective_host,
            port,
        }
    }

    /// Socket address to bind the server to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// Visible hostname for logging and hints.
    pub fn display_host(&self) -> &str {
        &self.display_host
    }

    /// Configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Indicates whether binding to all interfaces.
    pub fn binds_to_all_interfaces(&self) -> bool {
        match self.bind_ip {
            IpAddr::V4(addr) => addr == Ipv4Addr::UNSPECIFIED,
            IpAddr::V6(addr) => addr == Ipv6Addr::UNSPECIFIED,
        }
    }

    /// Checks whether the hostname matches the default value.
    pub fn uses_default_host(&self) -> bool {
        self.display_host == Self::DEFAULT_HOST
    }
}

/// Configuration for the placement planner orchestration.
///
/// The planner itself has no knobs; the only configurable part is the
/// cosmetic processing delay applied by the streaming endpoint before the
/// (near-instant) computation runs.
#[derive(Clone, Copy, Debug)]
pub struct PlannerConfig {
    processing_delay_ms: u64,
}

impl PlannerConfig {
    const DELAY_VAR: &'static str = "PACKPLAN_PROCESSING_DELAY_MS";
    pub const DEFAULT_PROCESSING_DELAY_MS: u64 = 2_000;

    fn from_env() -> Self {
        let processing_delay_ms = match env_string(Self::DELAY_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(value) => value,
                Err(err) => {
                    eprintln!(
                        "⚠️ Could not parse {} ('{}') as number: {}. Using {}.",
                        Self::DELAY_VAR,
                        raw,
                        err,
                        Self::DEFAULT_PROCESSING_DELAY_MS
                    );
                    Self::DEFAULT_PROCESSING_DELAY_MS
                }
            },
            None => Self::DEFAULT_PROCESSING_DELAY_MS,
        };

        Self {
            processing_delay_ms,
        }
    }

    /// Delay applied before streaming placement events.
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: Self::DEFAULT_PROCESSING_DELAY_MS,
        }
    }
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            eprintln!(
                "⚠️ Access to {} failed: {}. Using default value.",
                name, err
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planner_default_delay_is_two_seconds() {
        let config = PlannerConfig::default();
        assert_eq!(config.processing_delay(), Duration::from_secs(2));
    }

    #[test]
    fn default_api_config_binds_all_interfaces() {
        // No env vars are set in the test environment for these names.
        let config = ApiConfig {
            bind_ip: ApiConfig::DEFAULT_HOST.parse().unwrap(),
            display_host: ApiConfig::DEFAULT_HOST.to_string(),
            port: ApiConfig::DEFAULT_PORT,
        };
        assert!(config.binds_to_all_interfaces());
        assert!(config.uses_default_host());
        assert_eq!(config.socket_addr().port(), 8080);
    }
}
