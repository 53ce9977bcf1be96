use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Call-level failures. Per-host failures never end up here, they are
/// reported inside the host's [`crate::CertificateRecord`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("input at least one domain name")]
    EmptyBatch,

    #[error("failed to read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid template: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    #[error("failed to render template: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("failed to serialize certificates: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to build TLS client: {0}")]
    Tls(#[from] rustls::Error),
}

impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_batch_message() {
        assert_eq!(
            Error::EmptyBatch.to_string(),
            "input at least one domain name"
        );
    }

    #[test]
    fn test_template_read_message() {
        let err = Error::TemplateRead {
            path: PathBuf::from("/etc/certinfo/layout.hbs"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/certinfo/layout.hbs"));
        assert!(msg.contains("permission denied"));
    }
}
