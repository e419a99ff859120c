use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

pub const TPL_EXT: &str = "tpl";
pub const STPL_EXT: &str = "stpl";

/// A proxy template: a `.tpl`/`.stpl` file pair sharing one base name.
/// The pair is addressed by name only; the files live wherever the
/// configured template directory points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn tpl_file(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", self.name, TPL_EXT))
    }

    pub fn stpl_file(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", self.name, STPL_EXT))
    }

    /// A template exists if either half of the pair is present. Partial
    /// pairs are tolerated everywhere, so presence of one file is enough.
    pub fn exists_in(&self, dir: &Path) -> bool {
        self.tpl_file(dir).exists() || self.stpl_file(dir).exists()
    }
}

/// IPv4 address a Hestia user is provisioned on, as reported by
/// `v-list-user-ips`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIp(pub Ipv4Addr);

impl std::fmt::Display for UserIp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
