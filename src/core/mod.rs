pub mod inventory;
pub mod menu;
pub mod provision;
pub mod template;

pub use crate::domain::model::{Template, UserIp};
pub use crate::domain::ports::Provisioner;
pub use crate::utils::error::Result;
