use crate::{
    config::Zone,
    tls::{FetchError, PeerChain},
};
use chrono::{DateTime, Local, Utc};
use rustls::pki_types::CertificateDer;
use serde::Serialize;
use std::{fmt, ops::Deref};
use x509_parser::{
    objects::{oid_registry, oid2sn},
    prelude::{FromDer, GeneralName, X509Certificate, X509Name},
    public_key::PublicKey,
    time::ASN1Time,
    x509::SubjectPublicKeyInfo,
};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z %Z";

/// Certificate metadata of one requested host.
///
/// Either `error` is empty and the descriptive fields come from the leaf
/// certificate, or `error` holds the failure and everything else is empty.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    /// Host name as requested, not resolved
    pub domain_name: String,
    /// Remote address the handshake was made with
    pub ip: String,
    /// Issuer common name
    pub issuer: String,
    /// Subject common name
    pub common_name: String,
    /// DNS subject alternative names, in certificate order
    pub sans: Vec<String>,
    pub not_before: String,
    pub not_after: String,
    /// Decimal serial number
    pub serial_number: String,
    pub signature_algorithm: String,
    pub public_key_algorithm: String,
    /// Key parameters, e.g. `RSA 2048 bits` or `EC prime256v1 256 bits`
    pub public_key: String,
    pub error: String,
    #[serde(skip)]
    pub(crate) chain: Vec<CertificateDer<'static>>,
}

impl CertificateRecord {
    /// Error-only record for a host that could not be inspected
    ///
    /// ```
    /// use certinfo::CertificateRecord;
    /// let record = CertificateRecord::error("example.invalid", "no such host");
    /// assert!(record.is_error());
    /// ```
    pub fn error<T, E>(domain_name: T, err: E) -> Self
    where
        T: Into<String>,
        E: fmt::Display,
    {
        Self {
            domain_name: domain_name.into(),
            error: err.to_string(),
            ..Default::default()
        }
    }

    /// Build a record from the chain a host presented, reading the leaf.
    ///
    /// # Errors
    ///
    /// Returns an error if the chain is empty or the leaf cannot be parsed
    pub fn from_chain<T>(domain_name: T, peer: PeerChain, zone: Zone) -> Result<Self, FetchError>
    where
        T: Into<String>,
    {
        let domain_name = domain_name.into();
        let leaf = peer
            .chain
            .first()
            .ok_or_else(|| FetchError::NoPeerCertificates(domain_name.clone()))?;

        let (_, cert) = X509Certificate::from_der(leaf.as_ref())
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        let validity = cert.validity();
        let not_before = format_time(validity.not_before, zone)?;
        let not_after = format_time(validity.not_after, zone)?;

        let spki = cert.public_key();
        let public_key_algorithm = algorithm_name(&spki.algorithm.algorithm);
        let public_key = describe_public_key(spki, &public_key_algorithm);

        let record = Self {
            domain_name,
            ip: peer.ip.to_string(),
            issuer: common_name(cert.issuer()),
            common_name: common_name(cert.subject()),
            sans: dns_names(&cert),
            not_before,
            not_after,
            serial_number: cert.tbs_certificate.serial.to_string(),
            signature_algorithm: algorithm_name(&cert.signature_algorithm.algorithm),
            public_key_algorithm,
            public_key,
            error: String::new(),
            chain: Vec::new(),
        };

        Ok(Self {
            chain: peer.chain,
            ..record
        })
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Leaf certificate, `None` for error records
    #[must_use]
    pub fn detail(&self) -> Option<&CertificateDer<'static>> {
        self.chain.first()
    }

    /// Full chain as presented by the peer, leaf first
    #[must_use]
    pub fn chain(&self) -> &[CertificateDer<'static>] {
        &self.chain
    }
}

/// Ordered records of one batch, `certs[i]` describes the i-th requested host
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Certificates(Vec<CertificateRecord>);

impl Certificates {
    #[must_use]
    pub fn into_inner(self) -> Vec<CertificateRecord> {
        self.0
    }
}

impl From<Vec<CertificateRecord>> for Certificates {
    fn from(records: Vec<CertificateRecord>) -> Self {
        Self(records)
    }
}

impl Deref for Certificates {
    type Target = [CertificateRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl IntoIterator for Certificates {
    type Item = CertificateRecord;
    type IntoIter = std::vec::IntoIter<CertificateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Certificates {
    type Item = &'a CertificateRecord;
    type IntoIter = std::slice::Iter<'a, CertificateRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn common_name(name: &X509Name<'_>) -> String {
    name.iter_common_name()
        .filter_map(|cn| cn.as_str().ok())
        .last()
        .unwrap_or_default()
        .to_string()
}

fn dns_names(cert: &X509Certificate<'_>) -> Vec<String> {
    match cert.subject_alternative_name() {
        Ok(Some(san)) => san
            .value
            .general_names
            .iter()
            .filter_map(|name| match name {
                GeneralName::DNSName(dns) => Some((*dns).to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn algorithm_name(oid: &x509_parser::der_parser::oid::Oid<'_>) -> String {
    oid2sn(oid, oid_registry()).map_or_else(|_| oid.to_id_string(), ToString::to_string)
}

fn describe_public_key(spki: &SubjectPublicKeyInfo<'_>, algorithm: &str) -> String {
    match spki.parsed() {
        Ok(PublicKey::RSA(rsa)) => format!("RSA {} bits", rsa.key_size()),
        Ok(PublicKey::EC(point)) => {
            let curve = named_curve(spki).unwrap_or_else(|| "unnamed-curve".to_string());
            format!("EC {curve} {} bits", point.key_size())
        }
        _ => format!(
            "{algorithm} {} bits",
            spki.subject_public_key.data.len() * 8
        ),
    }
}

/// EC keys carry their curve OID in the algorithm parameters
fn named_curve(spki: &SubjectPublicKeyInfo<'_>) -> Option<String> {
    let params = spki.algorithm.parameters.as_ref()?;
    let curve = params.as_oid().ok()?;
    Some(algorithm_name(&curve))
}

fn format_time(time: ASN1Time, zone: Zone) -> Result<String, FetchError> {
    let raw = time.to_datetime();
    let utc = DateTime::<Utc>::from_timestamp(raw.unix_timestamp(), raw.nanosecond())
        .ok_or_else(|| FetchError::Parse("invalid certificate timestamp".to_string()))?;

    Ok(match zone {
        Zone::Utc => utc.format(TIME_FORMAT).to_string(),
        Zone::Local => utc.with_timezone(&Local).format(TIME_FORMAT).to_string(),
    })
}
