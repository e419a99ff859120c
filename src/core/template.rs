use crate::config::Settings;
use crate::domain::model::Template;
use crate::utils::error::{ProxyctlError, Result};
use crate::utils::validation::{validate_domain_name, validate_proxy_target};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

// Hestia substitutes the %token% placeholders when it renders a domain's
// live config from the template; only %proxy_target% is ours.
const HTTP_TEMPLATE: &str = r#"server {
    listen      %ip%:%web_port%;
    server_name %domain_idn% %alias_idn%;

    location / {
        proxy_pass %proxy_target%;
        proxy_set_header Host $host;
        proxy_set_header X-Real-IP $remote_addr;
        proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;
        proxy_set_header X-Forwarded-Proto $scheme;
    }

    location /error/ {
        alias %home%/%user%/web/%domain%/document_errors/;
    }

    include %home%/%user%/conf/web/%domain%/nginx.conf_*;
}
"#;

const HTTPS_TEMPLATE: &str = r#"server {
    listen      %ip%:%web_ssl_port% ssl;
    server_name %domain_idn% %alias_idn%;

    ssl_certificate     %ssl_pem%;
    ssl_certificate_key %ssl_key%;

    location / {
        proxy_pass %proxy_target%;
        proxy_set_header Host $host;
        proxy_set_header X-Real-IP $remote_addr;
        proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;
        proxy_set_header X-Forwarded-Proto $scheme;
    }

    location /error/ {
        alias %home%/%user%/web/%domain%/document_errors/;
    }

    include %home%/%user%/conf/web/%domain%/nginx.conf_s*;
}
"#;

// Templates embed backend addresses, so keep them out of world-readable.
const TEMPLATE_FILE_MODE: u32 = 0o640;

pub fn render_http_template(proxy_target: &str) -> String {
    HTTP_TEMPLATE.replace("%proxy_target%", proxy_target)
}

pub fn render_https_template(proxy_target: &str) -> String {
    HTTPS_TEMPLATE.replace("%proxy_target%", proxy_target)
}

/// Writes a `.tpl`/`.stpl` pair for `name` proxying to `proxy_target`.
/// Validates both inputs, refuses to overwrite an existing pair, and writes
/// nothing on any failure.
pub fn create_template(settings: &Settings, name: &str, proxy_target: &str) -> Result<Template> {
    let name = name.trim();
    validate_domain_name(name)?;
    validate_proxy_target(proxy_target)?;

    let template = Template::new(name);
    if template.exists_in(&settings.template_dir) {
        return Err(ProxyctlError::TemplateExists {
            name: name.to_string(),
        });
    }

    fs::create_dir_all(&settings.template_dir)?;

    let tpl_path = template.tpl_file(&settings.template_dir);
    let stpl_path = template.stpl_file(&settings.template_dir);
    write_restricted(&tpl_path, &render_http_template(proxy_target))?;
    write_restricted(&stpl_path, &render_https_template(proxy_target))?;

    tracing::info!("Created template files {:?} and {:?}", tpl_path, stpl_path);
    Ok(template)
}

fn write_restricted(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;
    fs::set_permissions(path, fs::Permissions::from_mode(TEMPLATE_FILE_MODE))?;
    Ok(())
}
