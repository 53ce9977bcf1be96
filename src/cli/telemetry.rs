use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a level for this crate's events
#[must_use]
pub const fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Logs go to stderr so rendered output on
/// stdout stays pipeable. `RUST_LOG` takes precedence over `-v`.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("certinfo={}", level(verbosity))));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level() {
        assert_eq!(level(0), "error");
        assert_eq!(level(1), "warn");
        assert_eq!(level(2), "info");
        assert_eq!(level(3), "debug");
        assert_eq!(level(9), "trace");
    }

    #[test]
    fn test_init_twice() {
        // only one global subscriber may be installed per process
        let _ = init(2);
        assert!(init(2).is_err());
    }
}
