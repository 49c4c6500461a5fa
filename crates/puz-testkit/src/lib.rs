//! Test kit for the puz codec.
//!
//! - [`fixtures`] - ready-made puzzles and the matching encoded bytes
//! - [`init_test_tracing`] - tracing output for tests and benches
//!
//! # Example
//!
//! ```rust
//! use puz_testkit::{fixtures, init_test_tracing};
//!
//! init_test_tracing();
//! let bytes = puz::encode(&fixtures::tiny_puzzle()).unwrap();
//! assert_eq!(bytes, fixtures::TINY_PUZZLE_BYTES);
//! ```

#![forbid(unsafe_code)]

pub mod fixtures;
mod tracing_config;

pub use tracing_config::*;
