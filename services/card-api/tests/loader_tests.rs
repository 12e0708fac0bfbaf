//! Image loader behaviour for every source kind.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::time::Duration;

use card_api::loaders::ImageLoader;
use card_common::CardError;
use test_utils::{colors, solid_png, AssetRoot};

fn loader() -> ImageLoader {
    ImageLoader::new(Duration::from_secs(2), 1024 * 1024).unwrap()
}

#[tokio::test]
async fn test_empty_source_is_absent() {
    assert!(loader().load_image_safe("").await.is_none());
}

#[tokio::test]
async fn test_missing_path_is_absent() {
    let root = AssetRoot::empty();
    let missing = root.path().join("nope.png");
    assert!(loader()
        .load_image_safe(&missing.display().to_string())
        .await
        .is_none());
}

#[tokio::test]
async fn test_garbage_file_is_absent() {
    let root = AssetRoot::empty();
    let path = root.write_file("garbage.png", b"\x89PNG but not really");
    assert!(loader()
        .load_image_safe(&path.display().to_string())
        .await
        .is_none());
}

#[tokio::test]
async fn test_plain_path_and_file_url() {
    let root = AssetRoot::empty();
    let path = root.write_file("a.png", &solid_png(12, 7, colors::RED));

    let plain = loader()
        .load_image_safe(&path.display().to_string())
        .await
        .unwrap();
    assert_eq!((plain.width(), plain.height()), (12, 7));

    let url = format!("file://{}", path.display());
    let via_url = loader().load_image_safe(&url).await.unwrap();
    assert_eq!((via_url.width(), via_url.height()), (12, 7));
}

#[tokio::test]
async fn test_data_uri() {
    let uri = format!(
        "data:image/png;base64,{}",
        STANDARD.encode(solid_png(3, 5, colors::BLUE))
    );
    let asset = loader().load_image_safe(&uri).await.unwrap();
    assert_eq!((asset.width(), asset.height()), (3, 5));
}

#[tokio::test]
async fn test_unreachable_url_is_absent() {
    assert!(loader()
        .load_image_safe("http://127.0.0.1:9/x.png")
        .await
        .is_none());
}

#[tokio::test]
async fn test_oversized_file_is_rejected() {
    let root = AssetRoot::empty();
    let path = root.write_file("big.png", &solid_png(64, 64, colors::RED));
    let tiny = ImageLoader::new(Duration::from_secs(2), 16).unwrap();

    let err = tiny.load(&path.display().to_string()).await.unwrap_err();
    assert!(matches!(err, CardError::ImageLoad { .. }));
    assert!(tiny.load_image_safe(&path.display().to_string()).await.is_none());
}

#[tokio::test]
async fn test_default_background_failure_is_fatal() {
    let root = AssetRoot::empty();
    let err = loader()
        .load_default_background(&root.background_path())
        .await
        .unwrap_err();
    assert!(matches!(err, CardError::BackgroundUnavailable { .. }));
    assert!(!err.is_recoverable());
}

#[tokio::test]
async fn test_default_background_loads() {
    let root = AssetRoot::with_background();
    let bg = loader()
        .load_default_background(&root.background_path())
        .await
        .unwrap();
    assert_eq!((bg.width(), bg.height()), (1530, 383));
}
