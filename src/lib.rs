//! Inspect the TLS certificates presented by remote hosts.
//!
//! Hosts are inspected concurrently, at most [`DEFAULT_CONCURRENCY`] at a
//! time, and reported in the order they were requested. A host that cannot be
//! reached yields a record with its `error` set instead of failing the batch.
//!
//! # Example
//!
//! ```rust,no_run
//! # async fn run() -> certinfo::Result<()> {
//! use certinfo::{Config, Format};
//!
//! let certs = certinfo::inspect(&["example.com", "example.org:443"], &Config::default()).await?;
//! println!("{}", certs.render(Format::Markdown, None)?);
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod hostspec;
pub mod record;
pub mod render;
pub mod tls;

pub use batch::{DEFAULT_CONCURRENCY, Inspector};
pub use config::{Config, Zone};
pub use error::{Error, Result};
pub use hostspec::{DEFAULT_PORT, HostSpec, HostSpecError};
pub use record::{CertificateRecord, Certificates};
pub use render::{Format, Renderer, load_template};

/// Inspect every host in `hosts` with the settings of `config`
///
/// # Errors
///
/// Returns an error if `hosts` is empty or the TLS client cannot be built.
/// Per-host failures are reported in the returned records.
pub async fn inspect<S: AsRef<str>>(hosts: &[S], config: &Config) -> Result<Certificates> {
    if hosts.is_empty() {
        return Err(Error::EmptyBatch);
    }

    Inspector::from_config(config)?.inspect_all(hosts).await
}
