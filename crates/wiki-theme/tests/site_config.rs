//! Loading site configuration files from disk.

use std::fs;

use serial_test::serial;
use tempfile::TempDir;
use wiki_theme::surface::memory::{MemoryCookieJar, MemoryDocument};
use wiki_theme::{
    reset_theme_detector, set_theme_detector, Error, OsPreference, SameSitePolicy, SiteConfig, ThemePreference,
    ThemePreferenceController, ToggleRenderer,
};

const YAML: &str = r#"
site_name: Course Wiki
site_url: https://wiki.example.org/
nav:
  - title: Home
    path: index.md
  - title: Evaluator
    children:
      - title: Submitting
        path: evaluator/submit.md
theme_switch:
  dark_class: night
  same_site: Strict
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_loads_yaml_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "mkdocs.yml", YAML);

    let config = SiteConfig::load(&path).unwrap();
    assert_eq!(config.site_url.as_deref(), Some("https://wiki.example.org/"));
    assert_eq!(config.theme_switch.dark_class, "night");
    assert_eq!(config.theme_switch.same_site, SameSitePolicy::Strict);
    assert_eq!(config.theme_switch.cookie_name, "theme_preference");
    assert_eq!(config.pages().len(), 2);
    config.validate().unwrap();
}

#[test]
fn test_loads_json_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "site.json",
        r#"{"site_name": "Wiki", "nav": [{"title": "Home", "path": "index.md"}]}"#,
    );
    let config = SiteConfig::load(&path).unwrap();
    assert_eq!(config.pages()[0].path, "index.md");
}

#[test]
fn test_near_duplicate_configs_can_be_compared() {
    let dir = TempDir::new().unwrap();
    let main = SiteConfig::load(write(&dir, "main.yml", YAML)).unwrap();
    let mirror = SiteConfig::load(write(
        &dir,
        "mirror.yaml",
        "site_name: Course Wiki\nnav:\n  - title: Home\n    path: index.md\n",
    ))
    .unwrap();

    let diff = main.diff_nav(&mirror);
    assert_eq!(diff.only_here, vec!["evaluator/submit.md"]);
    assert!(diff.only_there.is_empty());
}

#[test]
fn test_load_errors() {
    let dir = TempDir::new().unwrap();

    let missing = SiteConfig::load(dir.path().join("absent.yml"));
    assert!(matches!(missing, Err(Error::Io { .. })));

    let toml = SiteConfig::load(write(&dir, "site.toml", "site_name = 'x'"));
    assert!(matches!(toml, Err(Error::UnsupportedFormat(ext)) if ext == "toml"));

    let broken = SiteConfig::load(write(&dir, "broken.yml", "site_name: [unclosed"));
    assert!(matches!(broken, Err(Error::Yaml(_))));

    let no_name = SiteConfig::load(write(&dir, "empty.json", "{}"));
    assert!(matches!(no_name, Err(Error::Json(_))));

    let typo = SiteConfig::load(write(&dir, "typo.yml", "site_name: x\ntheme_swich:\n  dark_class: night\n"));
    assert!(matches!(typo, Err(Error::Yaml(_))));
}

#[test]
#[serial]
fn test_configured_controller_on_native_host() {
    let config = SiteConfig::from_yaml(YAML).unwrap();
    set_theme_detector(|| Some(ThemePreference::Dark));

    let controller = ThemePreferenceController::new(
        config.theme_switch.clone(),
        MemoryCookieJar::new(),
        MemoryDocument::new().with_toggle("theme-toggle-checkbox"),
        OsPreference,
    );
    let startup = controller.start();
    reset_theme_detector();

    assert_eq!(startup.theme, ThemePreference::Dark);
    assert_eq!(controller.document().root_classes(), vec!["night".to_string()]);

    controller.toggle_preference();
    let written = controller.cookies().writes().pop().unwrap();
    let written = cookie::Cookie::parse(written).unwrap();
    assert_eq!(written.path(), Some("/"));
    assert_eq!(written.same_site(), Some(cookie::SameSite::Strict));

    let html = ToggleRenderer::new()
        .unwrap()
        .render(controller.config(), controller.applied_preference())
        .unwrap();
    assert!(html.contains(" checked>"));
}
