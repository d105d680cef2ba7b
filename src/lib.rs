//! ndsync - master-to-slave Notion database sync.
//!
//! This crate provides the core functionality for the `ndsync` CLI.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Credential and database-id loading
//! - [`model`] - Property model (pages, typed properties, sync status)
//! - [`notion`] - Notion API collaborator (trait + HTTP client)
//! - [`sync`] - Extraction, encoding, selection, and the sync engine
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod notion;
pub mod sync;

pub use error::{Error, Result};
