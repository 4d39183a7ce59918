//! Core library for the `apivet` CLI.
//!
//! This crate provides the internal building blocks used by the binary:
//! CLI argument types, configuration resolution, single-shot HTTP
//! probing, concurrent batch dispatch, the fixed verification-case
//! suite, statistics aggregation, and result sinks. The primary
//! user-facing interface is the `apivet` command-line application;
//! library APIs may evolve as the CLI grows.
pub mod args;
pub mod cases;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod probe;
pub mod sinks;
pub mod stats;
