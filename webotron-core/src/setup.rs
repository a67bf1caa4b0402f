//! Bucket setup: create, make publicly readable, enable website hosting.

use tracing::{error, info};

use crate::contract::{BucketLocation, BucketStore, StorageError, WebsiteConfig};
use crate::policy::public_read_policy;

/// Create `bucket` in `region` and configure it to serve a static website.
///
/// Steps run in order and stop at the first error: bucket creation, public-read
/// policy, website configuration.
pub async fn setup_bucket<S>(
    store: &S,
    bucket: &str,
    region: Option<&str>,
    website: &WebsiteConfig,
) -> Result<(), StorageError>
where
    S: BucketStore + ?Sized,
{
    let location = BucketLocation::for_region(region);
    info!(bucket, ?location, "[SETUP] Creating bucket");
    if let Err(e) = store.create_bucket(bucket, &location).await {
        error!(bucket, error = %e, "[SETUP][ERROR] Bucket creation failed");
        return Err(e);
    }

    let policy = public_read_policy(bucket);
    info!(bucket, "[SETUP] Attaching public-read policy");
    if let Err(e) = store.put_bucket_policy(bucket, &policy).await {
        error!(bucket, error = %e, "[SETUP][ERROR] Attaching policy failed");
        return Err(e);
    }

    info!(
        bucket,
        index = %website.index_document,
        error_document = %website.error_document,
        "[SETUP] Enabling website hosting"
    );
    if let Err(e) = store.put_bucket_website(bucket, website).await {
        error!(bucket, error = %e, "[SETUP][ERROR] Website configuration failed");
        return Err(e);
    }

    info!(bucket, "[SETUP] Bucket ready");
    Ok(())
}
