use crate::{
    error::{Error, Result},
    record::{CertificateRecord, Certificates},
};
use handlebars::Handlebars;
use std::{fs, io, path::PathBuf, str::FromStr};

const PLAIN: &str = "plain";
const MARKDOWN: &str = "markdown";

/// Default plain text layout, one block per record
pub const DEFAULT_TEMPLATE: &str = "{{#each this}}DomainName: {{domainName}}
IP:         {{ip}}
Issuer:     {{issuer}}
NotBefore:  {{notBefore}}
NotAfter:   {{notAfter}}
CommonName: {{commonName}}
SANs:       [{{#each sans}}{{#unless @first}} {{/unless}}{{this}}{{/each}}]
SerialNumber: {{serialNumber}}
SignatureAlgorithm: {{signatureAlgorithm}}
PublicKeyAlgorithm: {{publicKeyAlgorithm}}
PublicKey:  {{publicKey}}
Error:      {{error}}

{{/each}}";

const MARKDOWN_TEMPLATE: &str = "DomainName | IP | Issuer | NotBefore | NotAfter | CN | SANs | Error
--- | --- | --- | --- | --- | --- | --- | ---
{{#each this}}{{domainName}} | {{ip}} | {{issuer}} | {{notBefore}} | {{notAfter}} | {{commonName}} | {{#each sans}}{{this}}<br/>{{/each}} | {{error}}
{{/each}}";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Plain,
    Markdown,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {s}")),
        }
    }
}

/// Compiled layouts. A user template replaces the plain text layout.
pub struct Renderer<'reg> {
    registry: Handlebars<'reg>,
}

impl Renderer<'_> {
    /// Compile the layouts, `template` overrides the default plain text one
    ///
    /// # Errors
    ///
    /// Returns an error if `template` is not a valid template
    pub fn new(template: Option<&str>) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_template_string(MARKDOWN, MARKDOWN_TEMPLATE)?;
        registry.register_template_string(PLAIN, template.unwrap_or(DEFAULT_TEMPLATE))?;

        Ok(Self { registry })
    }

    /// # Errors
    ///
    /// Returns an error if the template references fields a record does not have
    pub fn plain(&self, certs: &Certificates) -> Result<String> {
        Ok(self.registry.render(PLAIN, certs)?)
    }

    /// Markdown table, `*` in SANs is escaped so it does not read as emphasis
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be rendered
    pub fn markdown(&self, certs: &Certificates) -> Result<String> {
        let escaped: Vec<CertificateRecord> = certs
            .iter()
            .map(|cert| CertificateRecord {
                sans: cert.sans.iter().map(|san| san.replace('*', "\\*")).collect(),
                ..cert.clone()
            })
            .collect();

        Ok(self.registry.render(MARKDOWN, &escaped)?)
    }
}

impl Certificates {
    /// Render with the default or the given plain text template
    ///
    /// # Errors
    ///
    /// Returns an error if the template is malformed or fails to render
    pub fn render_plain(&self, template: Option<&str>) -> Result<String> {
        Renderer::new(template)?.plain(self)
    }

    /// # Errors
    ///
    /// Returns an error if the table cannot be rendered
    pub fn render_markdown(&self) -> Result<String> {
        Renderer::new(None)?.markdown(self)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn render_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// # Errors
    ///
    /// Returns an error if the selected output cannot be produced
    pub fn render(&self, format: Format, template: Option<&str>) -> Result<String> {
        match format {
            Format::Plain => self.render_plain(template),
            Format::Markdown => self.render_markdown(),
            Format::Json => self.render_json(),
        }
    }
}

/// Resolve a `--template` argument: the content of the file it names, or the
/// argument itself when no such file exists. An empty argument means no
/// template.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read
pub fn load_template(arg: &str) -> Result<Option<String>> {
    if arg.is_empty() {
        return Ok(None);
    }

    let path = std::path::absolute(arg).map_err(|source| Error::TemplateRead {
        path: PathBuf::from(arg),
        source,
    })?;

    match fs::read_to_string(&path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Some(arg.to_string())),
        Err(source) => Err(Error::TemplateRead { path, source }),
    }
}
