pub mod cli;

use std::env;
use std::path::PathBuf;

pub const DEFAULT_BASE_PATH: &str = "/usr/local/hestia";
pub const DEFAULT_CONFIG_DIR: &str = "/etc/nginx/conf.d/domains";
pub const DEFAULT_EDITOR: &str = "nano";
pub const FALLBACK_EDITOR: &str = "vi";

/// All paths and binary locations, resolved once at startup. Nothing else
/// in the crate reads the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub base_path: PathBuf,
    /// Where `.tpl`/`.stpl` pairs are written.
    pub template_dir: PathBuf,
    /// Live nginx configs generated by Hestia; outside the base path.
    pub config_dir: PathBuf,
    /// Deleted templates are copied here as `.bak` before removal.
    pub backup_dir: PathBuf,
    pub list_user_ips_bin: PathBuf,
    pub add_web_domain_bin: PathBuf,
    pub add_letsencrypt_bin: PathBuf,
    pub change_web_tpl_bin: PathBuf,
    pub editor: String,
    pub fallback_editor: String,
}

impl Settings {
    /// Reads `HESTIA` (installation base), `HESTIA_PROXY_CONF_DIR` (live
    /// config directory, mainly for tests) and `EDITOR`.
    pub fn from_env() -> Self {
        let base = env::var("HESTIA").unwrap_or_else(|_| DEFAULT_BASE_PATH.to_string());
        let config_dir = env::var("HESTIA_PROXY_CONF_DIR")
            .unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
        let editor = env::var("EDITOR").unwrap_or_else(|_| DEFAULT_EDITOR.to_string());
        Self::new(PathBuf::from(base), PathBuf::from(config_dir), editor)
    }

    pub fn new(base_path: PathBuf, config_dir: PathBuf, editor: String) -> Self {
        let template_dir = base_path.join("data/templates/web/nginx");
        let backup_dir = template_dir.join("backup");
        let bin = base_path.join("bin");
        Self {
            list_user_ips_bin: bin.join("v-list-user-ips"),
            add_web_domain_bin: bin.join("v-add-web-domain"),
            add_letsencrypt_bin: bin.join("v-add-letsencrypt-domain"),
            change_web_tpl_bin: bin.join("v-change-web-domain-tpl"),
            template_dir,
            backup_dir,
            config_dir,
            base_path,
            editor,
            fallback_editor: FALLBACK_EDITOR.to_string(),
        }
    }
}
