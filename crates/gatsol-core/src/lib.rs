//! # GATSol Benchmark Kit
//!
//! A library that wraps the GATSol protein-solubility predictor, an opaque shell pipeline,
//! behind a stable benchmarking contract: FASTA in, a standardized CSV table out.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer split so that each stage of a run can be tested on
//! its own and the external pipeline can be replaced by a scripted fake.
//!
//! - **[`core`]: The Foundation.** Immutable data models (`SequenceRecord`, `RunManifest`,
//!   result rows) and the file formats the run touches: FASTA, the manifest CSV, the
//!   predictor's raw result table, the standardized output table, and PDB truncation.
//!
//! - **[`engine`]: The Stages.** The pipeline's on-disk layout, run configuration, the
//!   structure availability gate, input materialization, the invoker abstraction over the
//!   external process, progress reporting, and the run state machine.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that sequence the engine
//!   stages: the prediction run and the standalone structure truncation.

pub mod core;
pub mod engine;
pub mod workflows;
