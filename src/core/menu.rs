use crate::config::Settings;
use crate::core::{inventory, provision, template};
use crate::domain::ports::Provisioner;
use crate::utils::error::Result;
use crate::utils::validation::validate_domain_name;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// One-letter verbs accepted after an index in the template list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Edit,
    Delete,
}

/// Outcome of parsing a list-view selection like `3`, `3e`, `3d` or an
/// empty line to go back. This is its own little grammar, separate from
/// the plain numbered menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// 0-based index into the displayed list.
    Index(usize),
    WithVerb(usize, Verb),
    Back,
}

/// Parses `N` / `Ne` / `Nd` against a list of `len` items (displayed
/// 1-indexed). Returns `None` on anything out of range or unparseable so
/// the caller can re-prompt.
pub fn parse_selection(input: &str, len: usize) -> Option<Selection> {
    let input = input.trim();
    if input.is_empty() || input.eq_ignore_ascii_case("b") || input.eq_ignore_ascii_case("q") {
        return Some(Selection::Back);
    }

    let (digits, verb) = match input.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        None => (input, None),
        Some((pos, _)) => {
            let (digits, rest) = input.split_at(pos);
            let verb = match rest {
                "e" | "E" => Verb::Edit,
                "d" | "D" => Verb::Delete,
                _ => return None,
            };
            (digits, Some(verb))
        }
    };

    let number: usize = digits.parse().ok()?;
    if number == 0 || number > len {
        return None;
    }
    let index = number - 1;
    Some(match verb {
        None => Selection::Index(index),
        Some(verb) => Selection::WithVerb(index, verb),
    })
}

/// Reads one trimmed line; `None` on EOF so callers can bail out of their
/// loops instead of spinning.
fn read_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Yes/no prompt defaulting to no.
pub fn confirm(question: &str) -> bool {
    let answer = read_line(&format!("{question} [y/N] ")).unwrap_or_default();
    matches!(answer.to_lowercase().as_str(), "y" | "yes")
}

/// Prompts until a valid domain is entered; an empty line (or EOF) cancels.
fn prompt_domain(label: &str) -> Option<String> {
    loop {
        let input = read_line(&format!("{label} (empty to cancel): "))?;
        if input.is_empty() {
            return None;
        }
        match validate_domain_name(&input) {
            Ok(()) => return Some(input),
            Err(e) => eprintln!("{}", format!("❌ {e}").red()),
        }
    }
}

fn prompt_nonempty(label: &str) -> Option<String> {
    let input = read_line(&format!("{label} (empty to cancel): "))?;
    if input.is_empty() {
        None
    } else {
        Some(input)
    }
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("{}", format!("❌ {e}").red());
        if let Some(hint) = e.recovery_hint() {
            eprintln!("{}", format!("💡 {hint}").yellow());
        }
    }
}

/// The numbered main menu. Invalid selections re-prompt; only option 7
/// (or EOF on stdin) leaves the loop.
pub fn run_menu(settings: &Settings, provisioner: &dyn Provisioner) {
    loop {
        println!();
        println!("{}", "hestia-proxyctl".bold());
        println!("  1) Create proxy template");
        println!("  2) Set up full domain");
        println!("  3) List templates");
        println!("  4) List live configs");
        println!("  5) Delete template");
        println!("  6) Fix SSL certificate");
        println!("  7) Quit");
        let Some(choice) = read_line("Choice: ") else {
            return;
        };
        match choice.as_str() {
            "1" => report(menu_create_template(settings)),
            "2" => report(menu_setup_domain(settings, provisioner)),
            "3" => report(template_list_view(settings)),
            "4" => report(config_list_view(settings)),
            "5" => report(menu_delete_template(settings)),
            "6" => report(menu_fix_ssl(provisioner)),
            "7" | "q" | "exit" => return,
            other => eprintln!("{}", format!("Unknown choice '{other}'").yellow()),
        }
    }
}

fn menu_create_template(settings: &Settings) -> Result<()> {
    let Some(name) = prompt_domain("Template name") else {
        return Ok(());
    };
    let Some(target) = prompt_nonempty("Proxy target") else {
        return Ok(());
    };
    let tpl = template::create_template(settings, &name, &target)?;
    println!("{}", format!("✅ Template '{}' created", tpl.name).green());
    Ok(())
}

fn menu_setup_domain(settings: &Settings, provisioner: &dyn Provisioner) -> Result<()> {
    let Some(user) = prompt_nonempty("Hestia user") else {
        return Ok(());
    };
    let Some(domain) = prompt_domain("Domain") else {
        return Ok(());
    };
    let Some(target) = prompt_nonempty("Proxy target") else {
        return Ok(());
    };
    provision::setup_domain(settings, provisioner, &user, &domain, &target)?;
    Ok(())
}

fn menu_delete_template(settings: &Settings) -> Result<()> {
    let Some(name) = prompt_nonempty("Template to delete") else {
        return Ok(());
    };
    delete_with_confirmation(settings, &name)
}

fn menu_fix_ssl(provisioner: &dyn Provisioner) -> Result<()> {
    let Some(user) = prompt_nonempty("Hestia user") else {
        return Ok(());
    };
    let Some(domain) = prompt_domain("Domain") else {
        return Ok(());
    };
    provision::fix_ssl(provisioner, &user, &domain)
}

pub fn delete_with_confirmation(settings: &Settings, name: &str) -> Result<()> {
    if !confirm(&format!("Back up and delete template '{name}'?")) {
        println!("Aborted");
        return Ok(());
    }
    inventory::backup_and_delete_template(settings, name)?;
    println!("{}", format!("✅ Template '{name}' backed up and removed").green());
    Ok(())
}

/// Lists templates and loops on `N` / `Ne` / `Nd` selections until the
/// operator backs out.
pub fn template_list_view(settings: &Settings) -> Result<()> {
    loop {
        let templates = inventory::list_templates(settings)?;
        if templates.is_empty() {
            println!("{}", "No proxy templates found".yellow());
            return Ok(());
        }
        println!("{}", "Proxy templates:".bold());
        for (i, name) in templates.iter().enumerate() {
            println!("  {}) {}", i + 1, name);
        }
        let Some(input) = read_line("Select [Ne=edit, Nd=delete, empty=back]: ") else {
            return Ok(());
        };
        match parse_selection(&input, templates.len()) {
            Some(Selection::Back) => return Ok(()),
            Some(Selection::Index(i)) | Some(Selection::WithVerb(i, Verb::Edit)) => {
                report(inventory::edit_template(settings, &templates[i]));
            }
            Some(Selection::WithVerb(i, Verb::Delete)) => {
                report(delete_with_confirmation(settings, &templates[i]));
            }
            None => eprintln!("{}", format!("Invalid selection '{input}'").yellow()),
        }
    }
}

/// Lists live configs and opens the selected one in the editor.
pub fn config_list_view(settings: &Settings) -> Result<()> {
    loop {
        let configs = inventory::list_configs(settings)?;
        if configs.is_empty() {
            println!("{}", "No domain configs found".yellow());
            return Ok(());
        }
        println!("{}", "Domain configs:".bold());
        for (i, name) in configs.iter().enumerate() {
            println!("  {}) {}", i + 1, name);
        }
        let Some(input) = read_line("Select a config to edit [empty=back]: ") else {
            return Ok(());
        };
        match parse_selection(&input, configs.len()) {
            Some(Selection::Back) => return Ok(()),
            Some(Selection::Index(i)) => report(inventory::edit_config(settings, &configs[i])),
            Some(Selection::WithVerb(..)) | None => {
                eprintln!("{}", format!("Invalid selection '{input}'").yellow())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_index_is_one_based() {
        assert_eq!(parse_selection("1", 3), Some(Selection::Index(0)));
        assert_eq!(parse_selection("3", 3), Some(Selection::Index(2)));
    }

    #[test]
    fn verb_suffix_selects_and_acts() {
        assert_eq!(
            parse_selection("3d", 5),
            Some(Selection::WithVerb(2, Verb::Delete))
        );
        assert_eq!(
            parse_selection("1e", 5),
            Some(Selection::WithVerb(0, Verb::Edit))
        );
        assert_eq!(
            parse_selection("2E", 5),
            Some(Selection::WithVerb(1, Verb::Edit))
        );
    }

    #[test]
    fn out_of_range_and_garbage_are_rejected() {
        assert_eq!(parse_selection("0", 3), None);
        assert_eq!(parse_selection("4", 3), None);
        assert_eq!(parse_selection("4d", 3), None);
        assert_eq!(parse_selection("3x", 3), None);
        assert_eq!(parse_selection("d3", 3), None);
        assert_eq!(parse_selection("3dd", 3), None);
    }

    #[test]
    fn empty_and_back_tokens_go_back() {
        assert_eq!(parse_selection("", 3), Some(Selection::Back));
        assert_eq!(parse_selection("  ", 3), Some(Selection::Back));
        assert_eq!(parse_selection("b", 3), Some(Selection::Back));
        assert_eq!(parse_selection("Q", 3), Some(Selection::Back));
    }
}
