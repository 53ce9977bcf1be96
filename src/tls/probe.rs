use super::verifier::build_client_config;
use crate::{
    config::Config,
    error::Result,
    hostspec::{HostSpec, HostSpecError},
};
use rustls::pki_types::{CertificateDer, ServerName};
use std::{future::Future, io, net::IpAddr, sync::Arc, time::Duration};
use thiserror::Error;
use tokio::{net::TcpStream, time::timeout};
use tokio_rustls::TlsConnector;
use tracing::debug;

/// Why a single host produced no certificate. The `Display` text is what ends
/// up in the record's `error` field.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error(transparent)]
    HostSpec(#[from] HostSpecError),

    #[error("dial tcp {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("dial tcp {addr}: i/o timeout")]
    Timeout { addr: String, timeout: Duration },

    #[error("invalid server name: {0}")]
    ServerName(String),

    #[error("tls handshake with {addr}: {source}")]
    Handshake {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}: no peer certificates presented")]
    NoPeerCertificates(String),

    #[error("failed to parse certificate: {0}")]
    Parse(String),

    #[error("inspection task failed: {0}")]
    Task(String),
}

/// Certificates presented by a peer, leaf first, and the address they came from
#[derive(Debug, Clone)]
pub struct PeerChain {
    pub chain: Vec<CertificateDer<'static>>,
    pub ip: IpAddr,
}

/// Anything able to fetch the certificate chain of one host.
///
/// The orchestrator is generic over this so batches can be driven without a
/// network.
pub trait CertFetcher: Send + Sync + 'static {
    /// Fetch the chain presented by `spec`
    fn fetch(&self, spec: &HostSpec)
    -> impl Future<Output = Result<PeerChain, FetchError>> + Send;
}

/// Fetcher dialing real hosts over TCP + TLS
#[derive(Clone)]
pub struct TlsFetcher {
    connector: TlsConnector,
    timeout: Duration,
}

impl std::fmt::Debug for TlsFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsFetcher")
            .field("connector", &"TlsConnector")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TlsFetcher {
    /// Build a fetcher honouring `skip_verify` and `timeout` from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS client configuration cannot be built
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_client_config(config.skip_verify)?;
        Ok(Self {
            connector: TlsConnector::from(Arc::new(client)),
            timeout: config.timeout,
        })
    }

    async fn connect(&self, spec: &HostSpec, addr: &str) -> Result<PeerChain, FetchError> {
        let stream = TcpStream::connect((spec.host.as_str(), spec.port))
            .await
            .map_err(|source| FetchError::Connect {
                addr: addr.to_string(),
                source,
            })?;

        let ip = stream
            .peer_addr()
            .map_err(|source| FetchError::Connect {
                addr: addr.to_string(),
                source,
            })?
            .ip();
        debug!(%addr, %ip, "tcp connected");

        let server_name = server_name_from_host(&spec.host)?;
        let tls_stream = self
            .connector
            .connect(server_name, stream)
            .await
            .map_err(|source| FetchError::Handshake {
                addr: addr.to_string(),
                source,
            })?;

        let (_, connection) = tls_stream.get_ref();
        let chain = connection
            .peer_certificates()
            .map(<[CertificateDer<'static>]>::to_vec)
            .unwrap_or_default();
        debug!(%addr, certificates = chain.len(), "tls handshake complete");

        // no application data is exchanged, the connection ends here
        drop(tls_stream);

        if chain.is_empty() {
            return Err(FetchError::NoPeerCertificates(addr.to_string()));
        }

        Ok(PeerChain { chain, ip })
    }
}

impl CertFetcher for TlsFetcher {
    async fn fetch(&self, spec: &HostSpec) -> Result<PeerChain, FetchError> {
        let addr = spec.to_string();
        let outcome = timeout(self.timeout, self.connect(spec, &addr)).await;
        outcome.map_err(|_| FetchError::Timeout {
            addr,
            timeout: self.timeout,
        })?
    }
}

fn server_name_from_host(host: &str) -> Result<ServerName<'static>, FetchError> {
    host.parse::<IpAddr>().map_or_else(
        |_| {
            ServerName::try_from(host.to_string())
                .map_err(|_| FetchError::ServerName(host.to_string()))
        },
        |ip| Ok(ServerName::from(ip)),
    )
}
