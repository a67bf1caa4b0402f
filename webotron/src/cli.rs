///
/// This module implements the CLI interface for webotron: command parsing,
/// session resolution, and dispatch to the core operations.
///
/// All storage-independent logic (bucket setup, synchronisation, content types)
/// lives in the [`webotron-core`] crate. This module is CLI glue only.
///
/// ## How To Use
/// - For command-line users: use the installed `webotron` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`], or
///   [`execute`] with any [`BucketStore`] (e.g. the core crate's mock).
///
/// [`webotron-core`]: ../../webotron-core/
use crate::load_config::{load_config, CliConfig, SessionConfig};
use crate::s3::S3Store;
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use webotron_core::contract::BucketStore;
use webotron_core::setup::setup_bucket;
use webotron_core::synchronise::{resolve_root, synchronise};
use webotron_core::upload::upload_file;

/// CLI for webotron: deploy static websites to Amazon S3.
#[derive(Debug, Parser)]
#[clap(name = "webotron", version, about = "Webotron deploys websites to AWS.")]
pub struct Cli {
    /// AWS named profile used for credentials
    #[clap(long, global = true, env = "WEBOTRON_PROFILE")]
    pub profile: Option<String>,

    /// AWS region; overrides the profile's region
    #[clap(long, global = true, env = "WEBOTRON_REGION")]
    pub region: Option<String>,

    /// Endpoint URL of an S3-compatible service
    #[clap(long, global = true, env = "WEBOTRON_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Path to an optional YAML config file
    #[clap(long, global = true, env = "WEBOTRON_CONFIG")]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List all s3 buckets
    ListBuckets,
    /// List all objects in a bucket
    ListBucketObjects { bucket: String },
    /// Upload object to bucket
    BucketUpload {
        bucket: String,
        /// Local file to upload
        file: PathBuf,
        /// Destination key; its extension decides the content type
        key: String,
    },
    /// Create and configure bucket
    SetupBucket { bucket: String },
    /// Sync contents of PATHNAME to BUCKET
    Sync { pathname: PathBuf, bucket: String },
}

/// Async CLI entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    let file_config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CliConfig::default(),
    };
    let mut session = SessionConfig::merge(cli.profile, cli.region, cli.endpoint_url, file_config);

    // Fail on a bad sync root before any credential or region lookup.
    if let Commands::Sync { pathname, .. } = &cli.command {
        resolve_root(pathname).with_context(|| format!("invalid sync path {}", pathname.display()))?;
    }

    let store = S3Store::connect(&session).await;
    if session.region.is_none() {
        session.region = store.region().map(str::to_string);
    }

    let mut stdout = std::io::stdout();
    execute(cli.command, &store, &session, &mut stdout).await
}

/// Runs one command against `store`, writing user-facing output to `out`.
pub async fn execute<S, W>(
    command: Commands,
    store: &S,
    session: &SessionConfig,
    out: &mut W,
) -> Result<()>
where
    S: BucketStore + ?Sized,
    W: Write,
{
    match command {
        Commands::ListBuckets => {
            tracing::info!(command = "list-buckets", "Listing buckets");
            let buckets = store
                .list_buckets()
                .await
                .map_err(|e| anyhow!(e).context("failed to list buckets"))?;
            for bucket in buckets {
                writeln!(out, "{bucket}")?;
            }
        }
        Commands::ListBucketObjects { bucket } => {
            tracing::info!(command = "list-bucket-objects", bucket = %bucket, "Listing objects");
            let keys = store
                .list_objects(&bucket)
                .await
                .map_err(|e| anyhow!(e).context(format!("failed to list objects in {bucket}")))?;
            for key in keys {
                writeln!(out, "{key}")?;
            }
        }
        Commands::BucketUpload { bucket, file, key } => {
            tracing::info!(command = "bucket-upload", bucket = %bucket, key = %key, "Uploading file");
            let content_type = upload_file(store, &bucket, &file, &key)
                .await
                .map_err(|e| {
                    anyhow!(e).context(format!(
                        "failed to upload {} to s3://{bucket}/{key}",
                        file.display()
                    ))
                })?;
            writeln!(
                out,
                "Uploaded {} to s3://{bucket}/{key} ({content_type})",
                file.display()
            )?;
        }
        Commands::SetupBucket { bucket } => {
            tracing::info!(command = "setup-bucket", bucket = %bucket, "Setting up bucket");
            setup_bucket(store, &bucket, session.region.as_deref(), &session.website)
                .await
                .map_err(|e| anyhow!(e).context(format!("failed to set up bucket {bucket}")))?;
            writeln!(out, "Bucket {bucket} is configured for website hosting")?;
        }
        Commands::Sync { pathname, bucket } => {
            let root = resolve_root(&pathname)
                .with_context(|| format!("invalid sync path {}", pathname.display()))?;
            tracing::info!(command = "sync", root = %root.display(), bucket = %bucket, "Starting synchronisation");
            match synchronise(store, &root, &bucket).await {
                Ok(report) => {
                    for object in &report.uploaded {
                        writeln!(out, "{} ({})", object.key, object.content_type)?;
                    }
                    writeln!(
                        out,
                        "Synchronised {} files to s3://{}",
                        report.uploaded.len(),
                        report.bucket
                    )?;
                    tracing::info!(command = "sync", count = report.uploaded.len(), "Synchronisation complete");
                }
                Err(e) => {
                    tracing::error!(command = "sync", error = %e, "Synchronisation failed");
                    return Err(anyhow!(e).context(format!(
                        "failed to sync {} to {bucket}",
                        root.display()
                    )));
                }
            }
        }
    }

    Ok(())
}
