//! Line-oriented parsing of `.env` content.
//!
//! This module handles:
//! - Value normalization (quotes, inline comments, whitespace)
//! - `export` prefixes, comment and blank lines
//! - Splitting lines into key/value entries

pub mod line;
pub mod normalize;

pub use line::{Entry, parse_line, parse_str};
pub use normalize::normalize;
