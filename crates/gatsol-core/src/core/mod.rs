//! # Core Module
//!
//! Stateless building blocks shared by every stage of a prediction run.
//!
//! - **Data Models** ([`models`]) - Sequence records, the run manifest, and the raw and
//!   standardized result rows.
//! - **File I/O** ([`io`]) - FASTA parsing, manifest and result table serialization, and
//!   fixed-column PDB filtering.

pub mod io;
pub mod models;
