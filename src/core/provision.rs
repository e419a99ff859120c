use crate::config::Settings;
use crate::core::template::create_template;
use crate::domain::model::Template;
use crate::domain::ports::Provisioner;
use crate::utils::error::Result;
use crate::utils::validation::{validate_domain_name, validate_proxy_target};
use colored::Colorize;

/// Hestia's stock nginx template, used as a scratch target while a
/// certificate is re-issued.
pub const DEFAULT_WEB_TEMPLATE: &str = "default";

/// Full domain setup: validate, resolve the user's IP, write the template
/// pair, register the web domain, issue a certificate, and bind the custom
/// template. Fail-fast with no rollback; a partially completed run leaves
/// whatever it created in place for the operator.
pub fn setup_domain(
    settings: &Settings,
    provisioner: &dyn Provisioner,
    user: &str,
    domain: &str,
    proxy_target: &str,
) -> Result<Template> {
    let domain = domain.trim();

    println!("{}", format!("[1/6] Validating input for {domain}").bold());
    validate_domain_name(domain)?;
    validate_proxy_target(proxy_target)?;

    println!("[2/6] Resolving IP address for user '{user}'");
    let ip = provisioner.resolve_user_ip(user)?;
    tracing::info!("User {} resolves to {}", user, ip);

    println!("[3/6] Writing proxy template '{domain}'");
    let template = create_template(settings, domain, proxy_target)?;

    println!("[4/6] Registering web domain on {ip}");
    provisioner.register_domain(user, domain, ip)?;

    println!("[5/6] Requesting Let's Encrypt certificate");
    provisioner.issue_certificate(user, domain)?;

    println!("[6/6] Binding template '{}' to the domain", template.name);
    provisioner.switch_template(user, domain, &template.name)?;

    println!(
        "{}",
        format!("✅ {domain} is now proxying to {proxy_target}").green()
    );
    Ok(template)
}

/// Recovers a domain whose certificate issuance got wedged: park the domain
/// on the stock template, re-issue the certificate, then restore the custom
/// template named after the domain.
pub fn fix_ssl(provisioner: &dyn Provisioner, user: &str, domain: &str) -> Result<()> {
    let domain = domain.trim();
    validate_domain_name(domain)?;

    println!("[1/3] Switching '{domain}' to the stock template");
    provisioner.switch_template(user, domain, DEFAULT_WEB_TEMPLATE)?;

    println!("[2/3] Re-issuing Let's Encrypt certificate");
    provisioner.issue_certificate(user, domain)?;

    println!("[3/3] Restoring custom template '{domain}'");
    provisioner.switch_template(user, domain, domain)?;

    println!("{}", format!("✅ Certificate for {domain} renewed").green());
    Ok(())
}
