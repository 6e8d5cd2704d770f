// End-to-end generator runs against an in-memory feed

use super::harness::*;
use image::Rgba;
use mockup_forge::config::{Config, CropRect, DomainRule, DomainRules, RuleAction};
use mockup_forge::fetch::MemoryFetcher;
use mockup_forge::generator::{Generator, GeneratorError, GeneratorOptions};
use mockup_forge::imaging::decode;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

fn generator(config: Config, fetcher: MemoryFetcher, options: GeneratorOptions) -> Generator {
    Generator::new(config, Arc::new(fetcher), options).unwrap()
}

fn zip_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .filter(|n| n.ends_with(".zip"))
        .collect();
    names.sort();
    names
}

fn read_entry(archive: &Path, name: &str) -> Vec<u8> {
    let mut zip = zip::ZipArchive::new(std::fs::File::open(archive).unwrap()).unwrap();
    let mut data = Vec::new();
    zip.by_name(name).unwrap().read_to_end(&mut data).unwrap();
    data
}

#[tokio::test]
async fn test_full_run_writes_archives_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("stale.20250101_000000_9_images.zip"), b"old").unwrap();

    let mut gen = generator(config(dir.path()), feed(), GeneratorOptions::default());
    let summary = gen.run().await.unwrap();

    // shop.test: cat-front -> 2 mockups, dog-front -> 1 (branded has no
    // black template), cat-back skipped by rule; late-front is beyond N=3
    let shop = summary.domain("shop.test").unwrap();
    assert_eq!(shop.processed, 3);
    assert_eq!(shop.skipped, 1);
    assert_eq!(shop.total_to_process, 3);

    // ghost.test names an unknown template set
    let ghost = summary.domain("ghost.test").unwrap();
    assert_eq!((ghost.processed, ghost.skipped), (0, 1));

    // unknown.test has no rules and idle.test no new URLs
    assert!(summary.domain("unknown.test").is_none());
    assert!(summary.domain("idle.test").is_none());

    let zips = zip_files(dir.path());
    assert_eq!(zips.len(), 2, "{:?}", zips);
    assert!(zips[0].starts_with("branded.") && zips[0].ends_with("_1_images.zip"));
    assert!(zips[1].starts_with("classic.") && zips[1].ends_with("_2_images.zip"));
    assert!(dir.path().join("generate_summary.json").exists());
    assert!(!summary.budget_exhausted);

    let classic = dir.path().join(&zips[1]);
    let cat = decode(&read_entry(&classic, "Vintage cat Tee.png")).unwrap();
    assert_eq!(cat.dimensions(), (200, 150));
    assert_eq!(*cat.get_pixel(0, 0), WHITE_TEMPLATE);
    // Logo watermark 20 px from the right, 50 px from the bottom
    assert_eq!(*cat.get_pixel(175, 95), BLUE);

    let dog = decode(&read_entry(&classic, "Vintage dog Tee.png")).unwrap();
    assert_eq!(*dog.get_pixel(0, 0), BLACK_TEMPLATE);

    // Missing watermark image only drops the watermark
    let branded = dir.path().join(&zips[0]);
    let cat = decode(&read_entry(&branded, "cat.png")).unwrap();
    assert_eq!(*cat.get_pixel(175, 95), WHITE_TEMPLATE);
}

#[tokio::test]
async fn test_dry_run_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let stale = dir.path().join("stale.zip");
    std::fs::write(&stale, b"old").unwrap();

    let options = GeneratorOptions {
        dry_run: true,
        ..GeneratorOptions::default()
    };
    let mut gen = generator(config(dir.path()), feed(), options);
    let summary = gen.run().await.unwrap();

    assert!(stale.exists());
    assert!(!dir.path().join("generate_summary.json").exists());
    assert_eq!(summary.archives.len(), 2);
    assert!(summary.archives.iter().all(|a| a.path.is_none()));
    assert_eq!(gen.outputs()["classic"].len(), 2);
}

#[tokio::test]
async fn test_domain_filter() {
    let dir = tempfile::tempdir().unwrap();
    let options = GeneratorOptions {
        domain_filter: Some("ghost.test".to_string()),
        ..GeneratorOptions::default()
    };
    let mut gen = generator(config(dir.path()), feed(), options);
    let summary = gen.run().await.unwrap();

    assert_eq!(summary.domains.len(), 1);
    assert_eq!(summary.domains[0].domain, "ghost.test");
    assert!(zip_files(dir.path()).is_empty());
}

#[tokio::test]
async fn test_output_dir_override() {
    let config_dir = tempfile::tempdir().unwrap();
    let override_dir = tempfile::tempdir().unwrap();
    let options = GeneratorOptions {
        output_dir: Some(override_dir.path().join("out")),
        ..GeneratorOptions::default()
    };

    let mut gen = generator(config(config_dir.path()), feed(), options);
    gen.run().await.unwrap();

    assert!(zip_files(config_dir.path()).is_empty());
    assert_eq!(zip_files(&override_dir.path().join("out")).len(), 2);
}

#[tokio::test]
async fn test_budget_stops_taking_images() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path());
    config.output.max_total_mb = 1;

    // A noisy template makes every mockup larger than the whole budget
    let fetcher = feed();
    fetcher.insert("https://cdn.test/classic-white.png", png(&noise(800, 600)));

    let mut gen = generator(config, fetcher, GeneratorOptions::default());
    let summary = gen.run().await.unwrap();

    assert!(summary.budget_exhausted);
    assert!(gen.bytes_produced() >= 1024 * 1024);
    // Only the first source made it through
    assert_eq!(gen.outputs()["classic"].len(), 1);
    assert!(summary.domain("ghost.test").is_none());
}

#[tokio::test]
async fn test_missing_feed_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path());
    config.feed = None;

    let mut gen = generator(config, feed(), GeneratorOptions::default());
    assert!(matches!(gen.run().await, Err(GeneratorError::NoFeed)));
}

#[tokio::test]
async fn test_unreachable_crawl_log_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut gen = generator(config(dir.path()), MemoryFetcher::new(), GeneratorOptions::default());
    assert!(matches!(gen.run().await, Err(GeneratorError::CrawlLog(_))));
}

#[tokio::test]
async fn test_process_urls_counts_failures_per_source() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = feed();
    fetcher.insert(
        "https://img.test/blank-front.png",
        png(&image::RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255]))),
    );
    fetcher.insert("https://img.test/corrupt-front.png", b"not an image".to_vec());

    let rules = DomainRules::new(vec![DomainRule {
        pattern: "-front".to_string(),
        action: RuleAction::Process,
        mockup_sets_to_use: vec!["classic".to_string()],
        coords: Some(CropRect::new(0, 0, 100, 100)),
        skip_white: false,
        skip_black: true,
    }]);
    let urls: Vec<String> = [
        "https://img.test/cat-front.png",
        "https://img.test/dog-front.png",
        "https://img.test/blank-front.png",
        "https://img.test/corrupt-front.png",
        "https://img.test/missing-front.png",
        "https://img.test/cat-back.png",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let mut gen = generator(config(dir.path()), fetcher, GeneratorOptions::default());
    let counts = gen.process_urls("shop.test", &rules, &urls, urls.len()).await;

    // cat-front renders. The other five are skipped: dog-front is
    // black-filtered, blank has no content, corrupt fails to decode,
    // missing is a 404 and cat-back matches no rule.
    assert_eq!(counts.processed, 1);
    assert_eq!(counts.skipped, 5);
    assert_eq!(counts.total_to_process, 6);
}

#[tokio::test]
async fn test_domain_template_sets_load_before_its_sources() {
    let dir = tempfile::tempdir().unwrap();
    let fetcher = feed();
    // Only a source the rules skip: no variant is ever rendered
    fetcher.insert(
        "https://feed.test/shop.test.txt",
        b"https://img.test/cat-back.png\n".to_vec(),
    );
    let recorder = RecordingFetcher::new(fetcher);
    let options = GeneratorOptions {
        domain_filter: Some("shop.test".to_string()),
        dry_run: true,
        ..GeneratorOptions::default()
    };
    let mut gen =
        Generator::new(config(dir.path()), Arc::new(recorder.clone()), options).unwrap();
    let summary = gen.run().await.unwrap();

    let shop = summary.domain("shop.test").unwrap();
    assert_eq!((shop.processed, shop.skipped), (0, 1));

    let requests = recorder.requests();
    let position = |url: &str| requests.iter().position(|r| r == url);
    let source = position("https://img.test/cat-back.png").unwrap();
    for template in [
        "https://cdn.test/classic-white.png",
        "https://cdn.test/classic-black.png",
        "https://cdn.test/branded-white.png",
    ] {
        let loaded = position(template).unwrap_or_else(|| panic!("{template} never fetched"));
        assert!(loaded < source, "{template} fetched after the source");
    }
    // Each template is fetched once per run
    let classic_white = requests
        .iter()
        .filter(|r| r.as_str() == "https://cdn.test/classic-white.png")
        .count();
    assert_eq!(classic_white, 1);
}

#[tokio::test]
async fn test_skip_rule_and_unmatched_source_are_rule_skips() {
    let dir = tempfile::tempdir().unwrap();
    let rules = DomainRules::new(vec![DomainRule {
        pattern: "-back".to_string(),
        action: RuleAction::Skip,
        mockup_sets_to_use: Vec::new(),
        coords: None,
        skip_white: false,
        skip_black: false,
    }]);
    let urls: Vec<String> = ["https://img.test/cat-back.png", "https://img.test/ghost.png"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let recorder = RecordingFetcher::new(feed());
    let mut gen = Generator::new(
        config(dir.path()),
        Arc::new(recorder.clone()),
        GeneratorOptions::default(),
    )
    .unwrap();
    let counts = gen.process_urls("shop.test", &rules, &urls, urls.len()).await;

    assert_eq!((counts.processed, counts.skipped), (0, 2));
    // Rejected before the source is ever fetched
    assert!(recorder.requests().is_empty());
}
