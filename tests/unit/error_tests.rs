// Error handling tests

use mockup_forge::error::MockupError;
use mockup_forge::fetch::FetchError;
use mockup_forge::imaging::ImageError;
use mockup_forge::pipeline::Backing;
use mockup_forge::watermark::WatermarkError;

#[test]
fn test_mockup_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<MockupError>();
    assert_error::<ImageError>();
    assert_error::<WatermarkError>();
    assert_error::<FetchError>();
}

#[test]
fn test_mockup_error_messages_name_the_problem() {
    assert!(MockupError::MissingAsset("template set 'classic' has no black template".into())
        .to_string()
        .contains("classic"));
    assert!(MockupError::EncodeFailed("webp".into())
        .to_string()
        .starts_with("Encoding failed"));
    assert!(MockupError::BackingFiltered(Backing::White)
        .to_string()
        .contains("white"));
}

#[test]
fn test_fetch_failure_becomes_retrieval_failure() {
    let err: MockupError = FetchError::EmptyBody {
        url: "https://x.test/a.png".to_string(),
    }
    .into();
    assert_eq!(err.kind(), "retrieval_failure");
}

#[test]
fn test_image_error_helpers() {
    let err = ImageError::invalid_dimensions(0, 10, "empty region");
    assert!(err.to_string().contains("0x10"));
}
