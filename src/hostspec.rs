use std::{fmt, str::FromStr};
use thiserror::Error;

/// Port used when a host identifier carries none
pub const DEFAULT_PORT: u16 = 443;

/// Malformed `host[:port]` identifier
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostSpecError {
    #[error("address {0}: missing port in address")]
    MissingPort(String),
    #[error("address {0}: too many colons in address")]
    TooManyColons(String),
    #[error("address {0}: missing ']' in address")]
    MissingBracket(String),
    #[error("address {0}: unexpected '[' in address")]
    UnexpectedOpenBracket(String),
    #[error("address {0}: unexpected ']' in address")]
    UnexpectedCloseBracket(String),
    #[error("address {addr}: invalid port {port:?}")]
    InvalidPort { addr: String, port: String },
}

/// A host and the port to dial on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostSpec {
    pub host: String,
    pub port: u16,
}

impl HostSpec {
    /// Parse `host`, `host:port`, `host:` or `[v6]:port`
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier cannot be split or the port is not a number
    pub fn parse(hostport: &str) -> Result<Self, HostSpecError> {
        if !hostport.contains(':') {
            return Ok(Self {
                host: hostport.to_string(),
                port: DEFAULT_PORT,
            });
        }

        let (host, port) = split_host_port(hostport)?;
        let port = if port.is_empty() {
            DEFAULT_PORT
        } else {
            port.parse::<u16>()
                .map_err(|_| HostSpecError::InvalidPort {
                    addr: hostport.to_string(),
                    port: port.to_string(),
                })?
        };

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl FromStr for HostSpec {
    type Err = HostSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HostSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Split `host:port` or `[host]:port` into its parts. The port may be empty.
///
/// # Errors
///
/// Returns an error when the colon or bracket layout is not a valid address
pub fn split_host_port(hostport: &str) -> Result<(&str, &str), HostSpecError> {
    let addr = || hostport.to_string();

    let Some((head, port)) = hostport.rsplit_once(':') else {
        return Err(HostSpecError::MissingPort(addr()));
    };

    let host = if let Some(rest) = hostport.strip_prefix('[') {
        let Some((inner, after)) = rest.split_once(']') else {
            return Err(HostSpecError::MissingBracket(addr()));
        };
        if after.strip_prefix(':') != Some(port) {
            if after.starts_with(':') {
                return Err(HostSpecError::TooManyColons(addr()));
            }
            return Err(HostSpecError::MissingPort(addr()));
        }
        if rest.contains('[') {
            return Err(HostSpecError::UnexpectedOpenBracket(addr()));
        }
        if after.contains(']') {
            return Err(HostSpecError::UnexpectedCloseBracket(addr()));
        }
        inner
    } else {
        if head.contains(':') {
            return Err(HostSpecError::TooManyColons(addr()));
        }
        if hostport.contains('[') {
            return Err(HostSpecError::UnexpectedOpenBracket(addr()));
        }
        if hostport.contains(']') {
            return Err(HostSpecError::UnexpectedCloseBracket(addr()));
        }
        head
    };

    Ok((host, port))
}
