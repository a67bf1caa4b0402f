#![doc = "Amazon S3 implementation of the core `BucketStore` contract."]
//
//! # S3 store (CLI <-> AWS)
//!
//! This module wires the [`BucketStore`] trait from `webotron-core` to the AWS SDK.
//! The CLI builds exactly one [`S3Store`] from the resolved [`SessionConfig`] and
//! passes it to every command.
//!
//! - Credentials come from the SDK provider chain, optionally pinned to a named profile.
//! - A custom endpoint (S3-compatible services) switches to path-style addressing.
//! - Service errors are returned as-is; nothing is retried here.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, ErrorDocument, IndexDocument,
    WebsiteConfiguration,
};
use aws_sdk_s3::Client as S3Client;

use crate::load_config::SessionConfig;
use webotron_core::contract::{
    BucketLocation, BucketStore, StorageError, UploadRequest, WebsiteConfig,
};

pub struct S3Store {
    client: S3Client,
    region: Option<String>,
}

impl S3Store {
    /// Build a client from the session: profile, region override and endpoint.
    pub async fn connect(session: &SessionConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &session.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &session.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &session.endpoint_url {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let region = sdk_config.region().map(|r| r.as_ref().to_string());
        tracing::info!(
            region = region.as_deref().unwrap_or("<unset>"),
            custom_endpoint = session.endpoint_url.is_some(),
            "Initialized S3 client"
        );

        Self {
            client: S3Client::from_conf(builder.build()),
            region,
        }
    }

    /// Wrap an existing client.
    pub fn from_client(client: S3Client, region: Option<String>) -> Self {
        Self { client, region }
    }

    /// Region the client resolved to, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

#[async_trait]
impl BucketStore for S3Store {
    async fn list_buckets(&self) -> Result<Vec<String>, StorageError> {
        tracing::info!("Listing buckets");
        let output = match self.client.list_buckets().send().await {
            Ok(output) => output,
            Err(e) => {
                tracing::error!(error = ?e, "Failed to list buckets");
                return Err(Box::new(e.into_service_error()));
            }
        };
        let names: Vec<String> = output
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(str::to_string))
            .collect();
        tracing::info!(count = names.len(), "Listed buckets");
        Ok(names)
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>, StorageError> {
        tracing::info!(bucket, "Listing objects");
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = match page {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!(bucket, error = ?e, "Failed to list objects");
                    return Err(Box::new(e.into_service_error()));
                }
            };
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|o| o.key().map(str::to_string)),
            );
        }
        tracing::info!(bucket, count = keys.len(), "Listed objects");
        Ok(keys)
    }

    async fn create_bucket(
        &self,
        bucket: &str,
        location: &BucketLocation,
    ) -> Result<(), StorageError> {
        let mut request = self.client.create_bucket().bucket(bucket);
        if let BucketLocation::Region(region) = location {
            let configuration = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region.as_str()))
                .build();
            request = request.create_bucket_configuration(configuration);
        }

        tracing::info!(bucket, ?location, "Creating bucket");
        match request.send().await {
            Ok(_) => {
                tracing::info!(bucket, "Created bucket");
                Ok(())
            }
            Err(e) => {
                tracing::error!(bucket, error = ?e, "Failed to create bucket");
                Err(Box::new(e.into_service_error()))
            }
        }
    }

    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<(), StorageError> {
        tracing::info!(bucket, "Putting bucket policy");
        match self
            .client
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!(bucket, error = ?e, "Failed to put bucket policy");
                Err(Box::new(e.into_service_error()))
            }
        }
    }

    async fn put_bucket_website(
        &self,
        bucket: &str,
        config: &WebsiteConfig,
    ) -> Result<(), StorageError> {
        let index = IndexDocument::builder()
            .suffix(&config.index_document)
            .build()?;
        let error = ErrorDocument::builder()
            .key(&config.error_document)
            .build()?;
        let website = WebsiteConfiguration::builder()
            .index_document(index)
            .error_document(error)
            .build();

        tracing::info!(bucket, "Putting bucket website configuration");
        match self
            .client
            .put_bucket_website()
            .bucket(bucket)
            .website_configuration(website)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(e) => {
                tracing::error!(bucket, error = ?e, "Failed to put bucket website configuration");
                Err(Box::new(e.into_service_error()))
            }
        }
    }

    async fn upload(&self, request: UploadRequest) -> Result<(), StorageError> {
        let body = ByteStream::from_path(&request.path).await.map_err(|e| {
            tracing::error!(path = %request.path.display(), error = ?e, "Failed to open file for upload");
            e
        })?;

        match self
            .client
            .put_object()
            .bucket(&request.bucket)
            .key(&request.key)
            .content_type(&request.content_type)
            .body(body)
            .send()
            .await
        {
            Ok(_) => {
                tracing::debug!(
                    bucket = %request.bucket,
                    key = %request.key,
                    "Stored object"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    bucket = %request.bucket,
                    key = %request.key,
                    error = ?e,
                    "Failed to store object"
                );
                Err(Box::new(e.into_service_error()))
            }
        }
    }
}
