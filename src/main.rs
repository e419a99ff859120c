use clap::Parser;
use colored::Colorize;
use hestia_proxyctl::utils::logger;
use hestia_proxyctl::{
    inventory, menu, provision, template, Cli, Commands, HestiaCli, ProxyctlError, Result, Settings,
};

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    if cli.verbose {
        tracing::debug!("CLI arguments: {:?}", cli);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("❌ {e}").red());
        if let Some(hint) = e.recovery_hint() {
            eprintln!("{}", format!("💡 {hint}").yellow());
        }
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // Clap has already handled --help/--version; everything past this
    // point touches the panel or its files and needs root.
    ensure_root()?;

    let settings = Settings::from_env();
    tracing::debug!("Settings: {:?}", settings);
    let hestia = HestiaCli::new(&settings);

    match cli.command {
        None => menu::run_menu(&settings, &hestia),
        Some(Commands::List) => menu::template_list_view(&settings)?,
        Some(Commands::Add { args }) => match args.as_slice() {
            [user, domain, target] => {
                provision::setup_domain(&settings, &hestia, user, domain, target)?;
            }
            [name, target] => {
                let tpl = template::create_template(&settings, name, target)?;
                println!("{}", format!("✅ Template '{}' created", tpl.name).green());
            }
            _ => menu::run_menu(&settings, &hestia),
        },
        Some(Commands::Delete { name }) => menu::delete_with_confirmation(&settings, &name)?,
        Some(Commands::Edit { domain }) => inventory::edit_config(&settings, &domain)?,
        Some(Commands::Configs) => menu::config_list_view(&settings)?,
        Some(Commands::FixSsl { user, domain }) => provision::fix_ssl(&hestia, &user, &domain)?,
    }

    Ok(())
}

fn ensure_root() -> Result<()> {
    if unsafe { libc::geteuid() } != 0 {
        return Err(ProxyctlError::NotRoot);
    }
    Ok(())
}
