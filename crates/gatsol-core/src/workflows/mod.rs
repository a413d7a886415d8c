//! # Workflows Module
//!
//! End-to-end procedures built from the engine stages.
//!
//! - **Prediction Workflow** ([`predict`]) - FASTA and structure files in, standardized
//!   solubility table out, with the external pipeline run in between.
//! - **Truncation Workflow** ([`truncate`]) - Trims a structure file's chain to a
//!   maximum residue number so it matches its sequence.

pub mod predict;
pub mod truncate;
