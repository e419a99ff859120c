pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::HestiaCli;
pub use crate::config::{cli::Cli, cli::Commands, Settings};
pub use crate::core::{inventory, menu, provision, template};
pub use crate::domain::model::{Template, UserIp};
pub use crate::domain::ports::Provisioner;
pub use crate::utils::error::{ProxyctlError, Result};
