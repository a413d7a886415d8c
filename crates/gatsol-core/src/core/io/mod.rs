//! Provides input/output for the file formats a prediction run touches.
//!
//! FASTA input is parsed with `bio`, tabular artifacts are read and written with `csv`,
//! and structure files are filtered line by line on their fixed-width columns.

pub mod fasta;
pub mod manifest;
pub mod pdb;
pub mod results;
