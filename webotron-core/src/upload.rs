//! Single-file upload with content type inferred from the destination key.

use std::path::Path;

use tracing::{error, info};

use crate::content_type::infer_content_type;
use crate::contract::{BucketStore, StorageError, UploadRequest};

/// Upload the file at `path` to `bucket` under `key`.
///
/// The content type comes from `key`, not from the local file name. Returns the
/// content type that was sent.
pub async fn upload_file<S>(
    store: &S,
    bucket: &str,
    path: &Path,
    key: &str,
) -> Result<&'static str, StorageError>
where
    S: BucketStore + ?Sized,
{
    let content_type = infer_content_type(key);
    info!(bucket, key, content_type, path = %path.display(), "Uploading file");

    let request = UploadRequest {
        bucket: bucket.to_string(),
        path: path.to_path_buf(),
        key: key.to_string(),
        content_type: content_type.to_string(),
    };

    match store.upload(request).await {
        Ok(()) => Ok(content_type),
        Err(e) => {
            error!(bucket, key, error = %e, "Upload failed");
            Err(e)
        }
    }
}
