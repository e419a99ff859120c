use crate::utils::error::{ProxyctlError, Result};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

// Labels: alphanumerics and inner hyphens, max 63 chars. TLD: 2-6 letters.
const DOMAIN_PATTERN: &str = r"^(?i)([a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,6}$";

fn domain_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DOMAIN_PATTERN).expect("domain pattern is valid"))
}

/// Validates a domain name the way Hestia's web-domain rules expect it.
/// The underscore rule is checked first so the operator gets the specific
/// message rather than the generic format one.
pub fn validate_domain_name(domain: &str) -> Result<()> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(ProxyctlError::EmptyTemplateName);
    }
    if domain.contains('_') {
        return Err(ProxyctlError::UnderscoreInDomain {
            domain: domain.to_string(),
        });
    }
    if !domain_regex().is_match(domain) {
        return Err(ProxyctlError::InvalidDomainFormat {
            domain: domain.to_string(),
        });
    }
    Ok(())
}

/// Validates a proxy target as `scheme://host[:port][/path]` with the scheme
/// restricted to http/https.
pub fn validate_proxy_target(target: &str) -> Result<()> {
    let invalid = |reason: &str| ProxyctlError::InvalidProxyTarget {
        target: target.to_string(),
        reason: reason.to_string(),
    };

    if target.trim().is_empty() {
        return Err(invalid("target cannot be empty"));
    }

    let url = Url::parse(target).map_err(|e| invalid(&e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(invalid(&format!("unsupported scheme '{scheme}'"))),
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query strings and fragments are not allowed"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_domains() {
        assert!(validate_domain_name("example.com").is_ok());
        assert!(validate_domain_name("my-site.example.com").is_ok());
        assert!(validate_domain_name("shop.example.co.uk").is_ok());
        assert!(validate_domain_name("a1.b2.travel").is_ok());
    }

    #[test]
    fn underscore_gets_its_own_error() {
        match validate_domain_name("bad_domain.com") {
            Err(ProxyctlError::UnderscoreInDomain { domain }) => {
                assert_eq!(domain, "bad_domain.com");
            }
            other => panic!("expected underscore error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_domains() {
        assert!(matches!(
            validate_domain_name("nodottld"),
            Err(ProxyctlError::InvalidDomainFormat { .. })
        ));
        assert!(matches!(
            validate_domain_name("-bad.example.com"),
            Err(ProxyctlError::InvalidDomainFormat { .. })
        ));
        assert!(matches!(
            validate_domain_name("bad-.example.com"),
            Err(ProxyctlError::InvalidDomainFormat { .. })
        ));
        assert!(matches!(
            validate_domain_name("example.toolongtld"),
            Err(ProxyctlError::InvalidDomainFormat { .. })
        ));
        assert!(matches!(
            validate_domain_name(""),
            Err(ProxyctlError::EmptyTemplateName)
        ));
    }

    #[test]
    fn accepts_http_and_https_targets() {
        assert!(validate_proxy_target("http://127.0.0.1:8080").is_ok());
        assert!(validate_proxy_target("https://api.example.com/v2").is_ok());
        assert!(validate_proxy_target("http://backend.local").is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(validate_proxy_target("ftp://x.com").is_err());
        assert!(validate_proxy_target("not-a-url").is_err());
        assert!(validate_proxy_target("").is_err());
        assert!(validate_proxy_target("http://").is_err());
        assert!(validate_proxy_target("http://host/path?q=1").is_err());
    }
}
