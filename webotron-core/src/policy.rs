//! Bucket policy documents.

/// Public-read policy: grants anonymous `s3:GetObject` on every object in `bucket`.
pub fn public_read_policy(bucket: &str) -> String {
    let resource = bucket_objects_arn(bucket);
    let policy = format!(
        r#"
    {{
    "Version":"2012-10-17",
    "Statement":[{{
    "Sid":"PublicReadGetObject",
    "Effect":"Allow",
    "Principal": "*",
        "Action":["s3:GetObject"],
        "Resource":["{resource}"]
        }}
    ]}}
    "#
    );
    policy.trim().to_string()
}

/// ARN covering every object in `bucket`.
pub fn bucket_objects_arn(bucket: &str) -> String {
    format!("arn:aws:s3:::{bucket}/*")
}
