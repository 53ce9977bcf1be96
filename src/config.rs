use std::{str::FromStr, time::Duration};

/// Default seconds allowed for the TCP connect and TLS handshake
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// Settings for one inspection run, read-only while a batch is in flight
#[derive(Debug, Clone)]
pub struct Config {
    /// Accept any server identity during the handshake (diagnostic only)
    pub skip_verify: bool,
    /// Timezone used to render `notBefore` / `notAfter`
    pub zone: Zone,
    /// Bound for TCP connect plus TLS handshake
    pub timeout: Duration,
    /// User supplied layout overriding the default plain text output
    pub template: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_verify: false,
            zone: Zone::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            template: None,
        }
    }
}

/// Timezone used when rendering validity timestamps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    #[default]
    Local,
    Utc,
}

impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" => Ok(Self::Utc),
            _ => Err(format!("Invalid timezone: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.skip_verify);
        assert_eq!(config.zone, Zone::Local);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(config.template.is_none());
    }

    #[test]
    fn test_zone_from_str() {
        assert_eq!("local".parse::<Zone>().unwrap(), Zone::Local);
        assert_eq!("utc".parse::<Zone>().unwrap(), Zone::Utc);
    }

    #[test]
    fn test_zone_case_insensitive() {
        assert_eq!("UTC".parse::<Zone>().unwrap(), Zone::Utc);
        assert_eq!("Local".parse::<Zone>().unwrap(), Zone::Local);
    }

    #[test]
    fn test_zone_invalid() {
        let err = "mars".parse::<Zone>().unwrap_err();
        assert!(err.contains("mars"));
    }
}
