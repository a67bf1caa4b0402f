use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::tempdir;
use webotron::cli::{execute, Commands};
use webotron::load_config::SessionConfig;
use webotron_core::contract::{BucketLocation, MockBucketStore, UploadRequest, WebsiteConfig};

fn session(region: Option<&str>) -> SessionConfig {
    SessionConfig {
        region: region.map(str::to_string),
        ..SessionConfig::default()
    }
}

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("utf-8 output")
}

#[tokio::test]
async fn list_buckets_prints_one_name_per_line() {
    let mut store = MockBucketStore::new();
    store
        .expect_list_buckets()
        .returning(|| Ok(vec!["alpha".to_string(), "beta".to_string()]));

    let mut out = Vec::new();
    execute(Commands::ListBuckets, &store, &session(None), &mut out)
        .await
        .unwrap();
    assert_eq!(output(out), "alpha\nbeta\n");
}

#[tokio::test]
async fn list_bucket_objects_prints_keys() {
    let mut store = MockBucketStore::new();
    store
        .expect_list_objects()
        .withf(|bucket: &str| bucket == "my-site")
        .returning(|_| Ok(vec!["index.html".to_string(), "css/site.css".to_string()]));

    let mut out = Vec::new();
    execute(
        Commands::ListBucketObjects {
            bucket: "my-site".to_string(),
        },
        &store,
        &session(None),
        &mut out,
    )
    .await
    .unwrap();
    assert_eq!(output(out), "index.html\ncss/site.css\n");
}

#[tokio::test]
async fn bucket_upload_uses_key_for_content_type() {
    let mut store = MockBucketStore::new();
    store
        .expect_upload()
        .withf(|req: &UploadRequest| {
            *req == UploadRequest {
                bucket: "mybucket".to_string(),
                path: PathBuf::from("./readme.txt"),
                key: "docs/readme.txt".to_string(),
                content_type: "text/plain".to_string(),
            }
        })
        .times(1)
        .returning(|_| Ok(()));

    let mut out = Vec::new();
    execute(
        Commands::BucketUpload {
            bucket: "mybucket".to_string(),
            file: PathBuf::from("./readme.txt"),
            key: "docs/readme.txt".to_string(),
        },
        &store,
        &session(None),
        &mut out,
    )
    .await
    .unwrap();
    assert!(output(out).contains("s3://mybucket/docs/readme.txt (text/plain)"));
}

#[tokio::test]
async fn setup_bucket_uses_session_region_and_website() {
    let mut store = MockBucketStore::new();
    store
        .expect_create_bucket()
        .withf(|bucket: &str, location: &BucketLocation| {
            bucket == "my-site" && *location == BucketLocation::Region("ap-southeast-2".to_string())
        })
        .times(1)
        .returning(|_, _| Ok(()));
    store
        .expect_put_bucket_policy()
        .withf(|_, policy: &str| policy.contains("arn:aws:s3:::my-site/*"))
        .times(1)
        .returning(|_, _| Ok(()));
    store
        .expect_put_bucket_website()
        .withf(|_, config: &WebsiteConfig| *config == WebsiteConfig::default())
        .times(1)
        .returning(|_, _| Ok(()));

    let mut out = Vec::new();
    execute(
        Commands::SetupBucket {
            bucket: "my-site".to_string(),
        },
        &store,
        &session(Some("ap-southeast-2")),
        &mut out,
    )
    .await
    .unwrap();
    assert!(output(out).contains("my-site"));
}

#[tokio::test]
async fn sync_prints_uploaded_keys_and_summary() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.html"), b"a").unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("b.css"), b"b").unwrap();

    let uploads = Arc::new(Mutex::new(Vec::new()));
    let sink = uploads.clone();
    let mut store = MockBucketStore::new();
    store.expect_upload().times(2).returning(move |req| {
        sink.lock().unwrap().push((req.key, req.content_type));
        Ok(())
    });

    let mut out = Vec::new();
    execute(
        Commands::Sync {
            pathname: dir.path().to_path_buf(),
            bucket: "my-site".to_string(),
        },
        &store,
        &session(None),
        &mut out,
    )
    .await
    .unwrap();

    assert_eq!(
        *uploads.lock().unwrap(),
        vec![
            ("a.html".to_string(), "text/html".to_string()),
            ("sub/b.css".to_string(), "text/css".to_string()),
        ]
    );
    let printed = output(out);
    assert!(printed.contains("a.html (text/html)"));
    assert!(printed.contains("Synchronised 2 files to s3://my-site"));
}

#[tokio::test]
async fn storage_errors_surface_with_context() {
    let mut store = MockBucketStore::new();
    store
        .expect_list_objects()
        .returning(|_| Err("NoSuchBucket: The specified bucket does not exist".into()));

    let mut out = Vec::new();
    let err = execute(
        Commands::ListBucketObjects {
            bucket: "missing".to_string(),
        },
        &store,
        &session(None),
        &mut out,
    )
    .await
    .unwrap_err();

    let chain = format!("{err:#}");
    assert!(chain.contains("failed to list objects in missing"), "got: {chain}");
    assert!(chain.contains("NoSuchBucket"), "got: {chain}");
    assert!(out.is_empty());
}
