use crate::domain::model::UserIp;
use crate::utils::error::Result;

/// Narrow capability interface over the HestiaCP provisioning binaries.
/// The concrete implementation shells out; tests substitute a fake so the
/// saga logic can be exercised without a control panel installed.
pub trait Provisioner {
    /// Resolve the IPv4 address the panel has assigned to `user`.
    fn resolve_user_ip(&self, user: &str) -> Result<UserIp>;

    /// Register `domain` for `user` on `ip`, with mail and extra features
    /// disabled.
    fn register_domain(&self, user: &str, domain: &str, ip: UserIp) -> Result<()>;

    /// Request a Let's Encrypt certificate for `domain`.
    fn issue_certificate(&self, user: &str, domain: &str) -> Result<()>;

    /// Bind the named proxy template to `domain`.
    fn switch_template(&self, user: &str, domain: &str, template: &str) -> Result<()>;
}
