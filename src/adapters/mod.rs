use crate::config::Settings;
use crate::domain::model::UserIp;
use crate::domain::ports::Provisioner;
use crate::utils::error::{ProxyctlError, Result};
use regex::Regex;
use std::io::ErrorKind;
use std::net::Ipv4Addr;
use std::path::Path;
use std::process::{Command, Output};
use std::sync::OnceLock;

/// Shells out to the HestiaCP `v-*` binaries. Each call is blocking and
/// reported by exit status; stderr is carried into the error detail.
pub struct HestiaCli<'a> {
    settings: &'a Settings,
}

impl<'a> HestiaCli<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    fn run(&self, bin: &Path, args: &[&str]) -> Result<Output> {
        tracing::debug!("Running {:?} {:?}", bin, args);
        Command::new(bin).args(args).output().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ProxyctlError::MissingBinary {
                    path: bin.to_path_buf(),
                }
            } else {
                ProxyctlError::Io(e)
            }
        })
    }
}

fn ipv4_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("ipv4 pattern is valid")
    })
}

/// Pulls the first IPv4-shaped token out of the second whitespace-separated
/// column of `v-list-user-ips` output.
pub fn extract_user_ip(listing: &str) -> Option<Ipv4Addr> {
    listing
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .find(|token| ipv4_regex().is_match(token))
        .and_then(|token| token.parse().ok())
}

fn stderr_detail(output: &Output) -> String {
    let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if detail.is_empty() {
        format!("exit status {}", output.status)
    } else {
        detail
    }
}

impl Provisioner for HestiaCli<'_> {
    fn resolve_user_ip(&self, user: &str) -> Result<UserIp> {
        let output = self.run(&self.settings.list_user_ips_bin, &[user])?;
        if !output.status.success() {
            return Err(ProxyctlError::UnknownUser {
                user: user.to_string(),
            });
        }
        let listing = String::from_utf8_lossy(&output.stdout);
        extract_user_ip(&listing)
            .map(UserIp)
            .ok_or_else(|| ProxyctlError::IpNotFound {
                user: user.to_string(),
            })
    }

    fn register_domain(&self, user: &str, domain: &str, ip: UserIp) -> Result<()> {
        // Aliases "none" keeps Hestia from adding the www alias and its
        // mail/extras along with it.
        let ip = ip.to_string();
        let output = self.run(
            &self.settings.add_web_domain_bin,
            &[user, domain, ip.as_str(), "none"],
        )?;
        if !output.status.success() {
            return Err(ProxyctlError::RegistrationFailed {
                domain: domain.to_string(),
                detail: stderr_detail(&output),
            });
        }
        Ok(())
    }

    fn issue_certificate(&self, user: &str, domain: &str) -> Result<()> {
        let output = self.run(&self.settings.add_letsencrypt_bin, &[user, domain])?;
        if !output.status.success() {
            return Err(ProxyctlError::CertificateFailed {
                domain: domain.to_string(),
                detail: stderr_detail(&output),
            });
        }
        Ok(())
    }

    fn switch_template(&self, user: &str, domain: &str, template: &str) -> Result<()> {
        let output = self.run(
            &self.settings.change_web_tpl_bin,
            &[user, domain, template],
        )?;
        if !output.status.success() {
            return Err(ProxyctlError::TemplateSwitchFailed {
                domain: domain.to_string(),
                detail: stderr_detail(&output),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_ipv4_from_second_column() {
        let listing = "USER    IP              STATUS\nadmin   203.0.113.5     active\n";
        assert_eq!(
            extract_user_ip(listing),
            Some(Ipv4Addr::new(203, 0, 113, 5))
        );
    }

    #[test]
    fn skips_rows_whose_second_column_is_not_an_address() {
        let listing = "ip: shared\nassigned 198.51.100.7 primary\n";
        assert_eq!(
            extract_user_ip(listing),
            Some(Ipv4Addr::new(198, 51, 100, 7))
        );
    }

    #[test]
    fn no_ip_means_none() {
        assert_eq!(extract_user_ip("IP MASK\n"), None);
        assert_eq!(extract_user_ip(""), None);
        assert_eq!(extract_user_ip("lonely-token\n"), None);
    }
}
