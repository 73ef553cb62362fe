//! cvforge build pipeline library.
//!
//! Exposes the pipeline components for the binary and for integration
//! tests.

pub mod build;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod init;
pub mod output;
pub mod pdf;
pub mod skills;
pub mod templates;
