// Configuration module unit tests

use mockup_forge::config::*;
use mockup_forge::imaging::{OutputFormat, RegionSpec};
use mockup_forge::watermark::WatermarkSpec;

const FULL_CONFIG: &str = r#"
output:
  dir: generated-zips
  format: webp
  quality: 85
  max_total_mb: 100
feed:
  crawl_log_url: https://feed.test/crawl-log.txt
  url_list_template: https://feed.test/{domain}.txt
defaults:
  title_clean_keywords: ["t-shirt", "shirt"]
  font_path: fonts/verdanab.ttf
template_sets:
  classic:
    white: https://cdn.test/white.png
    black: https://cdn.test/black.png
    coords: { x: 100, y: 120, w: 800, h: 1000 }
    watermark_text: "ACME"
    title_prefix_to_add: "Vintage"
    title_suffix_to_add: "Shirt"
  branded:
    white: https://cdn.test/white.png
    coords: { x: 50, y: 60, w: 400, h: 500, offset_y: 0 }
    watermark_text: https://cdn.test/logo.png
    watermark_style:
      max_width: 120
domains:
  shop.example.com:
    - pattern: "-front"
      action: process
      mockup_sets_to_use: [classic, branded]
      coords: { x: 0, y: 0, w: 500, h: 500 }
      skipWhite: false
      skipBlack: true
    - pattern: "-back"
      action: skip
"#;

#[test]
fn test_can_deserialize_full_config() {
    let config = Config::from_yaml_with_env(FULL_CONFIG).expect("Failed to parse config");

    assert_eq!(config.output.format, OutputFormat::WebP);
    assert_eq!(config.output.quality, 85);
    assert_eq!(config.output.max_total_mb, 100);
    assert_eq!(
        config.defaults.font_path.as_deref(),
        Some(std::path::Path::new("fonts/verdanab.ttf"))
    );
    assert_eq!(config.template_sets.len(), 2);
    assert!(config.validate().is_ok());
}

#[test]
fn test_watermark_kind_decided_at_load() {
    let config = Config::from_yaml_with_env(FULL_CONFIG).unwrap();

    let classic = config.template_set("classic").unwrap();
    assert!(matches!(classic.watermark, Some(WatermarkSpec::Text { .. })));

    let branded = config.template_set("branded").unwrap();
    assert!(matches!(branded.watermark, Some(WatermarkSpec::Image { .. })));
    assert_eq!(branded.watermark_style.max_width, 120);
    assert_eq!(branded.watermark_style.margin_bottom, 50);
}

#[test]
fn test_region_offset_defaults_to_twenty() {
    let config = Config::from_yaml_with_env(FULL_CONFIG).unwrap();
    assert_eq!(
        config.template_set("classic").unwrap().coords,
        RegionSpec::new(100, 120, 800, 1000)
    );
    assert_eq!(config.template_set("branded").unwrap().coords.offset_y, 0);
}

#[test]
fn test_rule_resolution_through_config() {
    let config = Config::from_yaml_with_env(FULL_CONFIG).unwrap();
    let rules = config.domain_rules("shop.example.com").unwrap();

    let front = rules.resolve("cat-front.png").unwrap();
    assert_eq!(front.action, RuleAction::Process);
    assert!(front.skip_black);
    assert_eq!(front.coords, Some(CropRect::new(0, 0, 500, 500)));

    let back = rules.resolve("cat-back.png").unwrap();
    assert_eq!(back.action, RuleAction::Skip);

    assert!(rules.resolve("cat-side.png").is_none());
    assert_eq!(rules.referenced_sets(), vec!["classic", "branded"]);
}

#[test]
fn test_invalid_quality_rejected() {
    let yaml = "output:\n  quality: 0\n";
    let config = Config::from_yaml_with_env(yaml).unwrap();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("quality"));
}

#[test]
fn test_invalid_yaml_is_parse_error() {
    let err = Config::from_yaml_with_env("template_sets: [not, a, map]").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = Config::from_yaml_with_env("{}").unwrap();
    assert!(config.feed.is_none());
    assert!(config.template_sets.is_empty());
    assert_eq!(config.output, OutputConfig::default());
    assert!(config.validate().is_ok());
}
