//! Live tests against a real S3 (or S3-compatible) endpoint.
//!
//! Ignored by default. Run with `cargo test -- --ignored` after setting
//! `WEBOTRON_TEST_BUCKET` to an existing, writable bucket. The usual
//! `WEBOTRON_PROFILE`, `WEBOTRON_REGION` and `WEBOTRON_ENDPOINT_URL`
//! variables select the account.
use serial_test::serial;
use std::fs::write;
use tempfile::tempdir;
use webotron::load_config::{CliConfig, SessionConfig};
use webotron::s3::S3Store;
use webotron_core::contract::BucketStore;
use webotron_core::synchronise::{resolve_root, synchronise};
use webotron_core::upload::upload_file;

async fn store_from_env() -> (S3Store, String) {
    dotenvy::dotenv().ok();
    let bucket = std::env::var("WEBOTRON_TEST_BUCKET").expect("WEBOTRON_TEST_BUCKET missing");
    let session = SessionConfig::merge(
        std::env::var("WEBOTRON_PROFILE").ok(),
        std::env::var("WEBOTRON_REGION").ok(),
        std::env::var("WEBOTRON_ENDPOINT_URL").ok(),
        CliConfig::default(),
    );
    (S3Store::connect(&session).await, bucket)
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_upload_then_list_finds_key() {
    let (store, bucket) = store_from_env().await;
    let dir = tempdir().unwrap();
    let file = dir.path().join("readme.txt");
    write(&file, "hello from webotron").unwrap();

    let content_type = upload_file(&store, &bucket, &file, "webotron-test/docs/readme.txt")
        .await
        .expect("Upload should succeed");
    assert_eq!(content_type, "text/plain");

    let keys = store.list_objects(&bucket).await.expect("Listing should succeed");
    assert!(keys.iter().any(|k| k == "webotron-test/docs/readme.txt"));
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_sync_directory_to_live_bucket() {
    let (store, bucket) = store_from_env().await;
    let dir = tempdir().unwrap();
    write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
    std::fs::create_dir(dir.path().join("css")).unwrap();
    write(dir.path().join("css").join("site.css"), "body {}").unwrap();

    let root = resolve_root(dir.path()).unwrap();
    let report = synchronise(&store, &root, &bucket)
        .await
        .expect("Sync should succeed");
    assert_eq!(report.uploaded.len(), 2);

    let keys = store.list_objects(&bucket).await.unwrap();
    assert!(keys.iter().any(|k| k == "index.html"));
    assert!(keys.iter().any(|k| k == "css/site.css"));
}
