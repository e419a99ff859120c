use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "hestia-proxyctl")]
#[command(about = "Manage Nginx reverse-proxy templates and domains on HestiaCP")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List proxy templates and interactively edit or delete them
    List,

    /// Create a template (`add NAME TARGET`) or provision a full domain
    /// (`add USER DOMAIN TARGET`); with no arguments, opens the menu
    Add {
        #[arg(num_args = 0..=3, value_names = ["USER|NAME", "DOMAIN|TARGET", "TARGET"])]
        args: Vec<String>,
    },

    /// Back up and remove a template pair
    #[command(visible_aliases = ["rm", "remove"])]
    Delete {
        /// Template name (a domain)
        name: String,
    },

    /// Open a domain's live nginx config in the editor
    Edit {
        /// Domain whose config to edit
        domain: String,
    },

    /// List live domain configs and pick one to edit
    Configs,

    /// Re-issue a broken Let's Encrypt certificate for a proxied domain
    FixSsl {
        /// Hestia user owning the domain
        user: String,
        /// Domain to fix
        domain: String,
    },
}
