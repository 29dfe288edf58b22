//! # satori-base
//!
//! Core types and utilities shared by the Satori SAT solving crates:
//!
//! - **Literals**: the dense `1..=2V` literal encoding used throughout the
//!   solver cores
//! - **Error Types**: unified error handling across the workspace
//! - **Utilities**: a small deterministic PRNG

pub mod error;
pub mod lit;
pub mod utils;

pub use error::{Error, Result};
pub use lit::{Lit, Var};
