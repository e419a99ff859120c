use crate::config::Settings;
use crate::domain::model::{Template, TPL_EXT};
use crate::utils::error::{ProxyctlError, Result};
use crate::utils::validation::validate_domain_name;
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Template names present in the template directory, sorted. Only `.tpl`
/// files with a domain-shaped stem count; Hestia's stock templates
/// (`default`, `caching`, ...) have no dot and fall out here.
pub fn list_templates(settings: &Settings) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let entries = match fs::read_dir(&settings.template_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(names),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(TPL_EXT) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            if validate_domain_name(stem).is_ok() {
                names.push(stem.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Domains with a live nginx config, derived by stripping the `.ssl.conf`
/// and `.conf` suffixes and de-duplicating.
pub fn list_configs(settings: &Settings) -> Result<Vec<String>> {
    let mut domains = BTreeSet::new();
    let entries = match fs::read_dir(&settings.config_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let path = entry?.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let domain = file_name
            .strip_suffix(".ssl.conf")
            .or_else(|| file_name.strip_suffix(".conf"));
        if let Some(domain) = domain {
            domains.insert(domain.to_string());
        }
    }
    Ok(domains.into_iter().collect())
}

/// Copies whatever exists of the template pair into the backup directory
/// (as `.bak`, replacing any earlier backup of the same name), then removes
/// the originals. Missing halves of the pair are skipped silently; deleting
/// a partial template is still a success.
pub fn backup_and_delete_template(settings: &Settings, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ProxyctlError::EmptyTemplateName);
    }
    let template = Template::new(name);
    if !template.exists_in(&settings.template_dir) {
        return Err(ProxyctlError::FileNotFound {
            name: name.to_string(),
        });
    }

    fs::create_dir_all(&settings.backup_dir)?;
    for file in [
        template.tpl_file(&settings.template_dir),
        template.stpl_file(&settings.template_dir),
    ] {
        if !file.exists() {
            continue;
        }
        let backup = backup_path(&settings.backup_dir, &file);
        fs::copy(&file, &backup)?;
        fs::remove_file(&file)?;
        tracing::info!("Backed up {:?} to {:?}", file, backup);
    }
    Ok(())
}

fn backup_path(backup_dir: &Path, file: &Path) -> PathBuf {
    let file_name = file.file_name().unwrap_or_default().to_string_lossy();
    backup_dir.join(format!("{file_name}.bak"))
}

/// Opens the first existing file of the template pair in the editor.
pub fn edit_template(settings: &Settings, name: &str) -> Result<()> {
    let template = Template::new(name.trim());
    let candidates = [
        template.tpl_file(&settings.template_dir),
        template.stpl_file(&settings.template_dir),
    ];
    edit_first_match(settings, name, &candidates)
}

/// Opens a domain's live config, preferring the plain variant over SSL.
pub fn edit_config(settings: &Settings, domain: &str) -> Result<()> {
    let domain = domain.trim();
    let candidates = [
        settings.config_dir.join(format!("{domain}.conf")),
        settings.config_dir.join(format!("{domain}.ssl.conf")),
    ];
    edit_first_match(settings, domain, &candidates)
}

fn edit_first_match(settings: &Settings, name: &str, candidates: &[PathBuf]) -> Result<()> {
    let file = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| ProxyctlError::FileNotFound {
            name: name.to_string(),
        })?;
    open_in_editor(settings, file)
}

/// Hands the file to the preferred editor, falling back to the secondary
/// one when the preferred binary cannot be spawned.
fn open_in_editor(settings: &Settings, file: &Path) -> Result<()> {
    match Command::new(&settings.editor).arg(file).status() {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(
                "Editor '{}' not found, falling back to '{}'",
                settings.editor,
                settings.fallback_editor
            );
            Command::new(&settings.fallback_editor)
                .arg(file)
                .status()
                .map(|_| ())
                .map_err(|e| ProxyctlError::EditorFailed {
                    editor: settings.fallback_editor.clone(),
                    detail: e.to_string(),
                })
        }
        Err(e) => Err(ProxyctlError::EditorFailed {
            editor: settings.editor.clone(),
            detail: e.to_string(),
        }),
    }
}
