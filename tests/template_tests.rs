use hestia_proxyctl::{template, ProxyctlError, Settings};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tempfile::TempDir;

fn test_settings(base: &TempDir) -> Settings {
    Settings::new(
        base.path().to_path_buf(),
        base.path().join("nginx-domains"),
        "true".to_string(),
    )
}

#[test]
fn creates_both_files_with_the_target_embedded() {
    let base = TempDir::new().unwrap();
    let settings = test_settings(&base);

    let tpl = template::create_template(&settings, "shop.example.com", "http://127.0.0.1:4000")
        .unwrap();
    assert_eq!(tpl.name, "shop.example.com");

    let tpl_path = settings.template_dir.join("shop.example.com.tpl");
    let stpl_path = settings.template_dir.join("shop.example.com.stpl");
    assert!(tpl_path.exists());
    assert!(stpl_path.exists());

    let http = fs::read_to_string(&tpl_path).unwrap();
    assert!(http.contains("proxy_pass http://127.0.0.1:4000;"));
    assert!(http.contains("proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;"));

    let https = fs::read_to_string(&stpl_path).unwrap();
    assert!(https.contains("proxy_pass http://127.0.0.1:4000;"));
    assert!(https.contains("ssl_certificate     %ssl_pem%;"));
    assert!(https.contains("ssl_certificate_key %ssl_key%;"));
}

#[test]
fn template_files_are_not_world_readable() {
    let base = TempDir::new().unwrap();
    let settings = test_settings(&base);

    template::create_template(&settings, "internal.example.com", "http://10.0.0.8:3000").unwrap();

    for file in ["internal.example.com.tpl", "internal.example.com.stpl"] {
        let mode = fs::metadata(settings.template_dir.join(file))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o640, "{file} has mode {mode:o}");
    }
}

#[test]
fn refuses_to_overwrite_an_existing_pair() {
    let base = TempDir::new().unwrap();
    let settings = test_settings(&base);

    template::create_template(&settings, "shop.example.com", "http://127.0.0.1:4000").unwrap();
    let before = fs::read_to_string(settings.template_dir.join("shop.example.com.tpl")).unwrap();

    let err = template::create_template(&settings, "shop.example.com", "http://127.0.0.1:9999")
        .unwrap_err();
    assert!(matches!(err, ProxyctlError::TemplateExists { .. }));

    let after = fs::read_to_string(settings.template_dir.join("shop.example.com.tpl")).unwrap();
    assert_eq!(before, after, "conflicting create must leave files untouched");
}

#[test]
fn a_lone_stpl_file_still_counts_as_existing() {
    let base = TempDir::new().unwrap();
    let settings = test_settings(&base);

    fs::create_dir_all(&settings.template_dir).unwrap();
    fs::write(settings.template_dir.join("half.example.com.stpl"), "server {}\n").unwrap();

    let err =
        template::create_template(&settings, "half.example.com", "http://127.0.0.1:4000")
            .unwrap_err();
    assert!(matches!(err, ProxyctlError::TemplateExists { .. }));
    assert!(!settings.template_dir.join("half.example.com.tpl").exists());
}

#[test]
fn validation_failures_write_nothing() {
    let base = TempDir::new().unwrap();
    let settings = test_settings(&base);

    let cases: Vec<(&str, &str)> = vec![
        ("bad_domain.com", "http://127.0.0.1:4000"),
        ("nodottld", "http://127.0.0.1:4000"),
        ("", "http://127.0.0.1:4000"),
        ("ok.example.com", "ftp://x.com"),
        ("ok.example.com", "not a url"),
    ];
    for (name, target) in cases {
        assert!(
            template::create_template(&settings, name, target).is_err(),
            "{name} / {target} should be rejected"
        );
    }

    // The directory is only created on a successful write.
    assert!(
        !settings.template_dir.exists()
            || fs::read_dir(&settings.template_dir).unwrap().next().is_none()
    );
}

#[test]
fn underscore_is_reported_as_its_own_failure() {
    let base = TempDir::new().unwrap();
    let settings = test_settings(&base);

    match template::create_template(&settings, "my_shop.example.com", "http://127.0.0.1:4000") {
        Err(ProxyctlError::UnderscoreInDomain { domain }) => {
            assert_eq!(domain, "my_shop.example.com")
        }
        other => panic!("expected underscore error, got {other:?}"),
    }
}

#[test]
fn exit_codes_distinguish_validation_failures() {
    let base = TempDir::new().unwrap();
    let settings = test_settings(&base);

    let underscore = template::create_template(&settings, "a_b.example.com", "http://h.x")
        .unwrap_err()
        .exit_code();
    let format = template::create_template(&settings, "nodottld", "http://h.x")
        .unwrap_err()
        .exit_code();
    let target = template::create_template(&settings, "ok.example.com", "gopher://h")
        .unwrap_err()
        .exit_code();
    assert_ne!(underscore, format);
    assert_ne!(format, target);
    assert_ne!(underscore, target);
}

#[test]
fn settings_template_dir_matches_hestia_layout() {
    let settings = Settings::new(
        PathBuf::from("/usr/local/hestia"),
        PathBuf::from("/etc/nginx/conf.d/domains"),
        "nano".to_string(),
    );
    assert_eq!(
        settings.template_dir,
        PathBuf::from("/usr/local/hestia/data/templates/web/nginx")
    );
}
