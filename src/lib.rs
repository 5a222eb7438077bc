//! GinyWow - backend for the GinyWow tool site
//!
//! Stores uploaded thumbnails and their enhancement results, title
//! optimizations, newsletter subscriptions and deep-link short URLs, and
//! serves the YouTube thumbnail downloader.
//!
//! # Architecture
//! - `validation`: request bodies and their validation rules
//! - `storage`: SeaORM backends and data models
//! - `services`: business logic shared by the HTTP API and the CLI
//! - `api`: HTTP handlers and middleware
//! - `interfaces`: command-line interface
//! - `config`: configuration management
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
pub mod validation;
