#![doc = "webotron-core: core logic library for webotron."]

//! This crate holds everything webotron does that is independent of a concrete
//! cloud SDK: the storage contract, content-type inference, the public-read
//! policy, bucket setup and directory synchronisation.
//!
//! # Usage
//! Implement [`contract::BucketStore`] for a storage backend, then drive it with
//! [`setup::setup_bucket`], [`upload::upload_file`] or [`synchronise::synchronise`].

pub mod content_type;
pub mod contract;
pub mod policy;
pub mod setup;
pub mod synchronise;
pub mod upload;
