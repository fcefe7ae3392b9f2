//! Tests for settings loading and CLI command functions.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use safari_ld::cli::{
    checksum_file, cmd_check, cmd_compose, diagnostic_fields, read_page, render_breadcrumbs,
    render_config,
};
use safari_ld::settings::load_settings_with;
use safari_ld_core::{Diagnostic, Page, SchemaError, SiteConfig};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TOUR_PAGE: &str = r#"{
    "page": "tour_detail",
    "tour": {
        "id": "t-1",
        "slug": "great-migration",
        "name": "Great Migration Safari",
        "price": {"amount": 4850},
        "reviews": [
            {"author": "Amina", "rating": 5},
            {"author": "Lars", "rating": 4}
        ]
    }
}"#;

fn config() -> SiteConfig {
    SiteConfig {
        base_url: "https://example.com".to_string(),
        ..SiteConfig::default()
    }
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// SETTINGS TESTS
// =============================================================================

#[test]
fn test_missing_settings_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_settings_with(&dir.path().join("absent.toml"), None).unwrap();

    assert_eq!(config, SiteConfig::default());
}

#[test]
fn test_settings_file_is_loaded_and_normalized() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "safari-ld.toml",
        r#"
base_url = "https://www.example.com/"
site_name = "Example Safaris"

[organization]
name = "Example Safaris Ltd"
same_as = ["https://www.instagram.com/example"]
"#,
    );

    let config = load_settings_with(&path, None).unwrap();
    assert_eq!(config.base_url, "https://www.example.com");
    assert_eq!(config.site_name, "Example Safaris");
    assert_eq!(config.organization.name, "Example Safaris Ltd");
    assert_eq!(config.organization.same_as.len(), 1);
    // Unset keys keep their defaults
    assert_eq!(config.price_currency, "USD");
}

#[test]
fn test_base_url_override_wins() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "safari-ld.toml", "base_url = \"https://a.example.com\"\n");

    let config =
        load_settings_with(&path, Some("https://staging.example.com/".to_string())).unwrap();
    assert_eq!(config.base_url, "https://staging.example.com");

    let config = load_settings_with(&path, Some("   ".to_string())).unwrap();
    assert_eq!(config.base_url, "https://a.example.com");
}

#[test]
fn test_malformed_settings_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "safari-ld.toml", "base_url = [unterminated\n");

    let result = load_settings_with(&path, None);
    assert!(matches!(result, Err(SchemaError::InvalidConfig(_))));
}

#[test]
fn test_invalid_base_url_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "safari-ld.toml", "base_url = \"example.com\"\n");

    let result = load_settings_with(&path, None);
    assert!(matches!(result, Err(SchemaError::InvalidConfig(_))));
}

#[test]
fn test_render_config_round_trips_through_toml() {
    let text = render_config(&config(), false).unwrap();
    let parsed: SiteConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config());

    let json = render_config(&config(), true).unwrap();
    assert!(json.contains("\"base_url\": \"https://example.com\""));
}

// =============================================================================
// PAGE INPUT TESTS
// =============================================================================

#[test]
fn test_read_page() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "tour.json", TOUR_PAGE);

    let page = read_page(&path).unwrap();
    assert!(matches!(page, Page::TourDetail { .. }));
    assert_eq!(page.path(), "/tours/great-migration");
}

#[test]
fn test_read_page_rejects_bad_json() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.json", r#"{"page": "nonexistent"}"#);

    let result = read_page(&path);
    assert!(matches!(result, Err(SchemaError::SerializationError(_))));
}

#[test]
fn test_read_page_missing_file() {
    let result = read_page(Path::new("/definitely/not/here.json"));
    assert!(matches!(result, Err(SchemaError::IoError(_))));
}

#[test]
fn test_read_page_rejects_directory() {
    let dir = TempDir::new().unwrap();
    let result = read_page(dir.path());
    assert!(matches!(result, Err(SchemaError::IoError(_))));
}

// =============================================================================
// COMMAND TESTS
// =============================================================================

#[test]
fn test_compose_writes_document() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "tour.json", TOUR_PAGE);
    let output = dir.path().join("tour.jsonld");

    cmd_compose(&config(), false, true, &input, Some(&output), false).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    let wire: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(wire["@context"], "https://schema.org");

    let types: Vec<&str> = wire["@graph"]
        .as_array()
        .unwrap()
        .iter()
        .map(|node| node["@type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        vec![
            "Organization",
            "WebPage",
            "BreadcrumbList",
            "Product",
            "AggregateRating"
        ]
    );
    let rating = &wire["@graph"][4];
    assert_eq!(rating["ratingValue"], "4.5");
    assert_eq!(rating["reviewCount"], "2");
}

#[test]
fn test_compose_compact_is_single_line() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "tour.json", TOUR_PAGE);
    let output = dir.path().join("tour.min.jsonld");

    cmd_compose(&config(), false, true, &input, Some(&output), true).unwrap();

    let text = std::fs::read_to_string(&output).unwrap();
    assert!(!text.contains('\n'));
}

#[test]
fn test_compose_rejects_missing_output_dir() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "tour.json", TOUR_PAGE);
    let output = dir.path().join("missing").join("tour.jsonld");

    let result = cmd_compose(&config(), false, true, &input, Some(&output), false);
    assert!(matches!(result, Err(SchemaError::IoError(_))));
}

#[test]
fn test_check_succeeds_with_diagnostics() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "listing.json",
        r#"{"page": "tour_listing", "tours": [{"slug": "no-name"}, {"slug": "kili", "name": "Kilimanjaro"}]}"#,
    );

    assert!(cmd_check(&config(), false, &input).is_ok());
    assert!(cmd_check(&config(), true, &input).is_ok());
}

#[test]
fn test_check_fails_on_duplicate_identity() {
    let dir = TempDir::new().unwrap();
    let input = write_file(
        &dir,
        "listing.json",
        r#"{"page": "tour_listing", "tours": [{"slug": "a", "name": "A"}, {"slug": "a", "name": "A again"}]}"#,
    );

    let result = cmd_check(&config(), false, &input);
    assert!(matches!(result, Err(SchemaError::DuplicateIdentity(_))));
}

#[test]
fn test_checksum_is_stable() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "tour.json", TOUR_PAGE);

    let first = checksum_file(&config(), &input).unwrap();
    let second = checksum_file(&config(), &input).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 64);
    assert!(first.chars().all(|c| c.is_ascii_hexdigit()));

    let other = SiteConfig {
        base_url: "https://other.example.com".to_string(),
        ..SiteConfig::default()
    };
    assert_ne!(first, checksum_file(&other, &input).unwrap());
}

#[test]
fn test_render_breadcrumbs_text() {
    let text =
        render_breadcrumbs(&config(), false, "/destinations/northern-serengeti", None).unwrap();

    assert_eq!(
        text,
        "1. Home  https://example.com/\n2. Northern Serengeti  https://example.com/destinations/northern-serengeti"
    );
}

#[test]
fn test_render_breadcrumbs_json() {
    let text = render_breadcrumbs(&config(), true, "/unknown/xyz", Some("Ignored")).unwrap();
    let items: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(
        items,
        serde_json::json!([
            {"position": 1, "name": "Home", "url": "/", "item": "https://example.com/"}
        ])
    );
}

#[test]
fn test_diagnostic_fields() {
    let skipped = Diagnostic::SkippedNode {
        entity: "tour 'a'".to_string(),
        field: "name".to_string(),
    };
    assert_eq!(
        diagnostic_fields(&skipped),
        ("tour 'a'", "missing required field 'name'".to_string())
    );

    let unmatched = Diagnostic::InvalidPath {
        path: "/x".to_string(),
    };
    assert_eq!(diagnostic_fields(&unmatched).0, "/x");
}
