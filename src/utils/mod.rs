//! Shared utility functions.
//!
//! # Overview
//!
//! - [`content_length`] - Advertised body length and KB conversion
//!
//! # Examples
//!
//! ```rust
//! use fetchpack::utils::{parse_content_length, to_kb};
//!
//! let total = parse_content_length("5120").map(to_kb);
//! assert_eq!(total, Some(5));
//! ```

pub mod content_length;

pub use content_length::{advertised_length, parse_content_length, to_kb, BYTES_PER_KB};
