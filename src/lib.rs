//! Position weight matrices and sequence logos from aligned FASTA in Rust

pub mod config;
pub mod error;
pub mod fasta;
pub mod format;
pub mod generator;
pub mod logo;
pub mod pwm;
pub mod types;
