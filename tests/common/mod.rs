#![allow(dead_code, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use rustls::{
    ServerConfig,
    crypto::ring,
    pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer},
};
use std::{sync::Arc, time::Duration};
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_rustls::TlsAcceptor;

pub const SERVER_NAMES: [&str; 2] = ["localhost", "127.0.0.1"];

/// Local TLS endpoint serving a freshly generated self-signed certificate.
/// The accept loop is aborted when the server is dropped.
pub struct TlsServer {
    pub port: u16,
    pub cert: CertificateDer<'static>,
    handle: JoinHandle<()>,
}

impl TlsServer {
    pub fn hostport(&self) -> String {
        format!("127.0.0.1:{}", self.port)
    }
}

impl Drop for TlsServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_tls_server() -> TlsServer {
    let rcgen::CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(SERVER_NAMES.map(String::from).to_vec())
            .expect("failed to generate certificate");
    let cert_der = cert.der().clone();
    let key_der = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key_pair.serialize_der()));

    let config = ServerConfig::builder_with_provider(Arc::new(ring::default_provider()))
        .with_safe_default_protocol_versions()
        .expect("failed to select protocol versions")
        .with_no_client_auth()
        .with_single_cert(vec![cert_der.clone()], key_der)
        .expect("failed to build server config");
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("failed to bind tls listener");
    let port = listener.local_addr().expect("missing local addr").port();

    let handle = tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                // clients hang up right after the handshake, errors are expected
                let _ = acceptor.accept(stream).await;
            });
        }
    });

    TlsServer {
        port,
        cert: cert_der,
        handle,
    }
}

/// Listener that accepts TCP connections but never answers the TLS handshake
pub struct SilentServer {
    pub port: u16,
    handle: JoinHandle<()>,
}

impl Drop for SilentServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub async fn spawn_silent_server() -> SilentServer {
    let listener = TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("failed to bind silent listener");
    let port = listener.local_addr().expect("missing local addr").port();

    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    SilentServer { port, handle }
}

pub fn pick_free_port() -> u16 {
    std::net::TcpListener::bind(("127.0.0.1", 0))
        .expect("failed to bind random local port")
        .local_addr()
        .expect("failed to read local addr")
        .port()
}

pub fn config(skip_verify: bool, timeout: Duration) -> certinfo::Config {
    certinfo::Config {
        skip_verify,
        zone: certinfo::Zone::Utc,
        timeout,
        template: None,
    }
}
