//! TLS certificate fetching
//!
//! This module dials remote hosts, completes a TLS handshake and hands back
//! the certificate chain the peer presented.
//!
//! # Module Organization
//!
//! - `probe` - Single-host fetcher and the `CertFetcher` seam
//! - `verifier` - Client configuration and the skip-verify verifier
//!
//! # Example
//!
//! ```rust,ignore
//! use certinfo::{Config, HostSpec, tls::{CertFetcher, TlsFetcher}};
//!
//! let fetcher = TlsFetcher::new(&Config::default())?;
//! let peer = fetcher.fetch(&HostSpec::parse("example.com")?).await?;
//! println!("{} presented {} certificates", peer.ip, peer.chain.len());
//! ```

pub mod probe;
pub mod verifier;

// Re-export commonly used types
pub use probe::{CertFetcher, FetchError, PeerChain, TlsFetcher};
pub use verifier::{NoVerifier, build_client_config};
