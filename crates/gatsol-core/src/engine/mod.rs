//! # Engine Module
//!
//! The stages of a prediction run and the state they share.
//!
//! - [`config`] - Fully-qualified pipeline layout and validated run configuration.
//! - [`assets`] - The fail-fast structure availability gate.
//! - [`materialize`] - Writes the per-record FASTA files and the manifest table.
//! - [`invoker`] - The capability that runs the external predictor pipeline.
//! - [`state`] - The run state machine.
//! - [`progress`] - Progress events for front-ends.
//! - [`error`] - The engine's error taxonomy.

pub mod assets;
pub mod config;
pub mod error;
pub mod invoker;
pub mod materialize;
pub mod progress;
pub mod state;
