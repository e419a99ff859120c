use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyctlError {
    #[error("Template name cannot be empty")]
    EmptyTemplateName,

    #[error("Domain '{domain}' contains an underscore; Hestia web domains must not contain '_'")]
    UnderscoreInDomain { domain: String },

    #[error("'{domain}' is not a valid domain name (expected e.g. my-site.example.com)")]
    InvalidDomainFormat { domain: String },

    #[error("'{target}' is not a valid proxy target: {reason}")]
    InvalidProxyTarget { target: String, reason: String },

    #[error("Required Hestia binary not found: {path}")]
    MissingBinary { path: PathBuf },

    #[error("Hestia user '{user}' does not exist")]
    UnknownUser { user: String },

    #[error("No IPv4 address assigned to user '{user}'")]
    IpNotFound { user: String },

    #[error("v-add-web-domain failed for '{domain}': {detail}")]
    RegistrationFailed { domain: String, detail: String },

    #[error("Let's Encrypt certificate issuance failed for '{domain}': {detail}")]
    CertificateFailed { domain: String, detail: String },

    #[error("v-change-web-domain-tpl failed for '{domain}': {detail}")]
    TemplateSwitchFailed { domain: String, detail: String },

    #[error("Template '{name}' already exists; delete it first or pick another name")]
    TemplateExists { name: String },

    #[error("No file found for '{name}'")]
    FileNotFound { name: String },

    #[error("This tool must be run as root")]
    NotRoot,

    #[error("Failed to launch an editor ({editor}): {detail}")]
    EditorFailed { editor: String, detail: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProxyctlError>;

impl ProxyctlError {
    /// Stable mapping from failure kind to process exit code. Scripts built
    /// on top of this tool key off these values, so additions go at the end.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProxyctlError::Io(_) => 1,
            ProxyctlError::EmptyTemplateName => 3,
            ProxyctlError::UnderscoreInDomain { .. } => 4,
            ProxyctlError::InvalidDomainFormat { .. } => 5,
            ProxyctlError::InvalidProxyTarget { .. } => 6,
            ProxyctlError::MissingBinary { .. } => 7,
            ProxyctlError::UnknownUser { .. } => 8,
            ProxyctlError::IpNotFound { .. } => 9,
            ProxyctlError::RegistrationFailed { .. } => 10,
            ProxyctlError::CertificateFailed { .. } => 11,
            ProxyctlError::TemplateSwitchFailed { .. } => 12,
            ProxyctlError::TemplateExists { .. } => 13,
            ProxyctlError::FileNotFound { .. } => 14,
            ProxyctlError::NotRoot => 15,
            ProxyctlError::EditorFailed { .. } => 16,
        }
    }

    /// Short operator-facing hint printed below the error message.
    pub fn recovery_hint(&self) -> Option<String> {
        match self {
            ProxyctlError::UnderscoreInDomain { .. } => {
                Some("Replace underscores with hyphens".to_string())
            }
            ProxyctlError::InvalidProxyTarget { .. } => Some(
                "Proxy targets look like http://127.0.0.1:8080 or https://backend.local/api"
                    .to_string(),
            ),
            ProxyctlError::MissingBinary { .. } => Some(
                "Check that HestiaCP is installed and $HESTIA points at its base directory"
                    .to_string(),
            ),
            ProxyctlError::UnknownUser { user } => Some(format!(
                "Run 'v-list-users' to see existing users, or create '{user}' first"
            )),
            ProxyctlError::CertificateFailed { domain, .. } => Some(format!(
                "See /usr/local/hestia/log/LE-*-{domain}.log and check the domain's DNS records"
            )),
            ProxyctlError::NotRoot => Some("Re-run with sudo".to_string()),
            _ => None,
        }
    }
}
