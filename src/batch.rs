use crate::{
    config::{Config, Zone},
    error::{Error, Result},
    hostspec::HostSpec,
    record::{CertificateRecord, Certificates},
    tls::{CertFetcher, FetchError, TlsFetcher},
};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Maximum number of hosts inspected at the same time
pub const DEFAULT_CONCURRENCY: usize = 128;

/// Runs a fetcher over a batch of hosts with a fixed number of slots.
///
/// Every host gets its own task. A task holds one slot from acquisition until
/// its record is built, the slot goes back to the pool on every exit path.
/// Records are returned in request order whatever the completion order was.
pub struct Inspector<F> {
    fetcher: Arc<F>,
    zone: Zone,
    slots: Arc<Semaphore>,
    concurrency: usize,
}

impl<F> std::fmt::Debug for Inspector<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inspector")
            .field("zone", &self.zone)
            .field("concurrency", &self.concurrency)
            .field("available_slots", &self.slots.available_permits())
            .finish_non_exhaustive()
    }
}

impl Inspector<TlsFetcher> {
    /// Inspector dialing real hosts with the TLS settings of `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS client cannot be built
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(TlsFetcher::new(config)?, config.zone))
    }
}

impl<F: CertFetcher> Inspector<F> {
    #[must_use]
    pub fn new(fetcher: F, zone: Zone) -> Self {
        Self::with_concurrency(fetcher, zone, DEFAULT_CONCURRENCY)
    }

    pub(crate) fn with_concurrency(fetcher: F, zone: Zone, concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        Self {
            fetcher: Arc::new(fetcher),
            zone,
            slots: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        }
    }

    /// Slots not held by a running task
    #[must_use]
    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }

    /// Inspect a single `host[:port]` without taking a slot
    pub async fn inspect_one(&self, hostport: &str) -> CertificateRecord {
        inspect_host(self.fetcher.as_ref(), hostport, self.zone).await
    }

    /// Inspect every host of the batch, `result[i]` describes `hosts[i]`.
    ///
    /// A host failing to parse or to answer yields an error record at its
    /// position, the rest of the batch is unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if `hosts` is empty, before any connection is attempted
    pub async fn inspect_all<S: AsRef<str>>(&self, hosts: &[S]) -> Result<Certificates> {
        if hosts.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let handles: Vec<_> = hosts
            .iter()
            .enumerate()
            .map(|(index, host)| {
                let host = host.as_ref().to_string();
                let fetcher = Arc::clone(&self.fetcher);
                let slots = Arc::clone(&self.slots);
                let zone = self.zone;

                tokio::spawn(async move {
                    debug!(index, %host, "pending");
                    let permit = match slots.acquire_owned().await {
                        Ok(permit) => permit,
                        Err(e) => {
                            return CertificateRecord::error(host, FetchError::Task(e.to_string()));
                        }
                    };
                    debug!(index, %host, "slot acquired");

                    let record = inspect_host(fetcher.as_ref(), &host, zone).await;

                    drop(permit);
                    debug!(index, %host, failed = record.is_error(), "slot released");
                    record
                })
            })
            .collect();

        // handles are awaited in request order, so position i always holds host i
        let records: Vec<CertificateRecord> = join_all(handles)
            .await
            .into_iter()
            .zip(hosts)
            .map(|(joined, host)| {
                joined.unwrap_or_else(|e| {
                    warn!(host = host.as_ref(), "inspection task aborted: {e}");
                    CertificateRecord::error(host.as_ref(), FetchError::Task(e.to_string()))
                })
            })
            .collect();

        let failed = records.iter().filter(|r| r.is_error()).count();
        info!(hosts = records.len(), failed, "batch complete");

        Ok(Certificates::from(records))
    }
}

/// Parse, fetch and build the record of one host. Never fails: any error
/// becomes an error record.
async fn inspect_host<F: CertFetcher>(fetcher: &F, hostport: &str, zone: Zone) -> CertificateRecord {
    let spec = match HostSpec::parse(hostport) {
        Ok(spec) => spec,
        Err(e) => {
            warn!(host = hostport, "{e}");
            return CertificateRecord::error(hostport, e);
        }
    };

    debug!(%spec, "fetching");
    let built = match fetcher.fetch(&spec).await {
        Ok(peer) => CertificateRecord::from_chain(spec.host.as_str(), peer, zone),
        Err(e) => Err(e),
    };

    built.unwrap_or_else(|e| {
        warn!(%spec, "{e}");
        CertificateRecord::error(spec.host, e)
    })
}
